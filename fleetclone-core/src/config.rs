//! Configuration management for fleetclone
//!
//! Clone options are merged from four sources (highest to lowest priority):
//! 1. CLI flags
//! 2. Environment variables (FLEETCLONE_*)
//! 3. Config file (~/.config/fleetclone/config.toml)
//! 4. Built-in defaults
//!
//! The merged options are then validated into a single [`ClonePolicy`].

use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::policy::ClonePolicy;
use crate::{Error, Result};

/// Prefix shared by every environment variable the resolver reads
pub const ENV_PREFIX: &str = "FLEETCLONE_";

/// Upper bound for the default concurrency
const MAX_DEFAULT_CONCURRENCY: usize = 32;

/// A boolean override that can also be left unspecified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Toggle {
    /// Not mentioned; defer to lower-priority sources
    #[default]
    Unset,
    /// Explicitly enabled
    On,
    /// Explicitly disabled
    Off,
}

impl Toggle {
    /// Build from a `--flag` / `--no-flag` pair
    pub fn from_flags(on: bool, off: bool) -> Self {
        match (on, off) {
            (true, false) => Toggle::On,
            (false, true) => Toggle::Off,
            _ => Toggle::Unset,
        }
    }

    pub fn value(self) -> Option<bool> {
        match self {
            Toggle::Unset => None,
            Toggle::On => Some(true),
            Toggle::Off => Some(false),
        }
    }
}

impl From<Option<bool>> for Toggle {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Toggle::Unset,
            Some(true) => Toggle::On,
            Some(false) => Toggle::Off,
        }
    }
}

/// One layer of clone options; every field may be left unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneOptions {
    /// Bare mirror clone instead of a working copy
    pub mirror: Option<bool>,

    /// Shallow clone depth (working-copy mode only)
    pub depth: Option<u32>,

    /// Branch to clone (working-copy mode only)
    pub branch: Option<String>,

    /// Retries after the first failed attempt
    pub max_retries: Option<u32>,

    /// First backoff delay
    #[serde(with = "humantime_serde")]
    pub backoff_base: Option<Duration>,

    /// Backoff ceiling
    #[serde(with = "humantime_serde")]
    pub backoff_max: Option<Duration>,

    /// Maximum simultaneous clones
    pub concurrency: Option<usize>,

    /// Time limit for one clone attempt
    #[serde(with = "humantime_serde")]
    pub clone_timeout: Option<Duration>,

    /// Reject mirror/depth and mirror/branch conflicts instead of downgrading
    pub strict: Option<bool>,
}

impl CloneOptions {
    /// Built-in defaults; every field is set
    pub fn defaults() -> Self {
        let concurrency = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(MAX_DEFAULT_CONCURRENCY);

        Self {
            mirror: Some(true),
            depth: None,
            branch: None,
            max_retries: Some(3),
            backoff_base: Some(Duration::from_secs(2)),
            backoff_max: Some(Duration::from_secs(30)),
            concurrency: Some(concurrency),
            clone_timeout: Some(Duration::from_secs(600)),
            strict: Some(false),
        }
    }

    /// Read options from `FLEETCLONE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read options through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| -> Option<(String, String)> {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        };

        let mut options = Self::default();

        if let Some((key, value)) = get("MIRROR") {
            options.mirror = Some(parse_bool(&key, &value)?);
        }
        if let Some((key, value)) = get("DEPTH") {
            options.depth = Some(parse_int(&key, &value)?);
        }
        if let Some((_, value)) = get("BRANCH") {
            options.branch = Some(value);
        }
        if let Some((key, value)) = get("MAX_RETRIES") {
            options.max_retries = Some(parse_int(&key, &value)?);
        }
        if let Some((key, value)) = get("BACKOFF_BASE") {
            options.backoff_base = Some(parse_duration(&key, &value)?);
        }
        if let Some((key, value)) = get("BACKOFF_MAX") {
            options.backoff_max = Some(parse_duration(&key, &value)?);
        }
        if let Some((key, value)) = get("CONCURRENCY") {
            options.concurrency = Some(parse_int(&key, &value)?);
        }
        if let Some((key, value)) = get("CLONE_TIMEOUT") {
            options.clone_timeout = Some(parse_duration(&key, &value)?);
        }
        if let Some((key, value)) = get("STRICT") {
            options.strict = Some(parse_bool(&key, &value)?);
        }

        Ok(options)
    }

    /// Overlay `higher` on top of `self`; fields set in `higher` win
    pub fn merge(self, higher: CloneOptions) -> Self {
        Self {
            mirror: higher.mirror.or(self.mirror),
            depth: higher.depth.or(self.depth),
            branch: higher.branch.or(self.branch),
            max_retries: higher.max_retries.or(self.max_retries),
            backoff_base: higher.backoff_base.or(self.backoff_base),
            backoff_max: higher.backoff_max.or(self.backoff_max),
            concurrency: higher.concurrency.or(self.concurrency),
            clone_timeout: higher.clone_timeout.or(self.clone_timeout),
            strict: higher.strict.or(self.strict),
        }
    }
}

/// Explicit overrides, typically from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub mirror: Toggle,
    pub depth: Option<u32>,
    pub branch: Option<String>,
    pub max_retries: Option<u32>,
    pub backoff_base: Option<Duration>,
    pub backoff_max: Option<Duration>,
    pub concurrency: Option<usize>,
    pub clone_timeout: Option<Duration>,
    pub strict: Toggle,
}

impl From<CliOverrides> for CloneOptions {
    fn from(cli: CliOverrides) -> Self {
        Self {
            mirror: cli.mirror.value(),
            depth: cli.depth,
            branch: cli.branch,
            max_retries: cli.max_retries,
            backoff_base: cli.backoff_base,
            backoff_max: cli.backoff_max,
            concurrency: cli.concurrency,
            clone_timeout: cli.clone_timeout,
            strict: cli.strict.value(),
        }
    }
}

/// A conflict the resolver fixed instead of rejecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyWarning {
    /// `depth` was set together with mirror mode and has been dropped
    DepthIgnored(u32),
    /// `branch` was set together with mirror mode and has been dropped
    BranchIgnored(String),
}

impl std::fmt::Display for PolicyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyWarning::DepthIgnored(depth) => write!(
                f,
                "depth {} is incompatible with mirror mode and will be ignored",
                depth
            ),
            PolicyWarning::BranchIgnored(branch) => write!(
                f,
                "branch '{}' is incompatible with mirror mode and will be ignored",
                branch
            ),
        }
    }
}

/// A validated policy plus the warnings produced while resolving it
#[derive(Debug, Clone)]
pub struct Resolved {
    pub policy: ClonePolicy,
    pub warnings: Vec<PolicyWarning>,
}

/// Merge the four option layers and validate the result
///
/// Precedence, lowest to highest: `defaults`, `file`, `env`, `cli`.
pub fn resolve(
    defaults: &CloneOptions,
    file: Option<&CloneOptions>,
    env: Option<&CloneOptions>,
    cli: &CliOverrides,
) -> Result<Resolved> {
    let merged = [file, env]
        .into_iter()
        .flatten()
        .fold(defaults.clone(), |acc, layer| acc.merge(layer.clone()))
        .merge(cli.clone().into());

    validate(merged)
}

/// Turn one fully merged option set into a policy
pub fn validate(options: CloneOptions) -> Result<Resolved> {
    let CloneOptions {
        mirror,
        mut depth,
        mut branch,
        max_retries,
        backoff_base,
        backoff_max,
        concurrency,
        clone_timeout,
        strict,
    } = options;

    let mirror = mirror.unwrap_or(true);
    let strict = strict.unwrap_or(false);
    let mut warnings = Vec::new();

    if mirror {
        if let Some(d) = depth.take() {
            if strict {
                return Err(Error::validation(
                    "depth",
                    "shallow clones are not possible in mirror mode",
                ));
            }
            warn!(depth = d, "Mirror mode ignores depth");
            warnings.push(PolicyWarning::DepthIgnored(d));
        }
        if let Some(b) = branch.take() {
            if strict {
                return Err(Error::validation(
                    "branch",
                    "a single branch cannot be cloned in mirror mode",
                ));
            }
            warn!(branch = %b, "Mirror mode ignores branch");
            warnings.push(PolicyWarning::BranchIgnored(b));
        }
    }

    let depth = match depth {
        Some(d) => Some(
            NonZeroU32::new(d)
                .ok_or_else(|| Error::validation("depth", "must be a positive integer"))?,
        ),
        None => None,
    };

    if let Some(ref b) = branch {
        if b.trim().is_empty() {
            return Err(Error::validation("branch", "must not be empty"));
        }
    }

    let max_retries = max_retries.ok_or_else(|| Error::validation("max_retries", "no value"))?;
    let backoff_base = positive("backoff_base", backoff_base)?;
    let backoff_max = positive("backoff_max", backoff_max)?;
    if backoff_max < backoff_base {
        return Err(Error::validation(
            "backoff_max",
            format!(
                "{} is shorter than backoff_base {}",
                humantime::format_duration(backoff_max),
                humantime::format_duration(backoff_base)
            ),
        ));
    }

    let concurrency = concurrency
        .ok_or_else(|| Error::validation("concurrency", "no value"))
        .and_then(|c| {
            NonZeroUsize::new(c)
                .ok_or_else(|| Error::validation("concurrency", "must be at least 1"))
        })?;
    let clone_timeout = positive("clone_timeout", clone_timeout)?;

    Ok(Resolved {
        policy: ClonePolicy::new(
            mirror,
            depth,
            branch,
            max_retries,
            backoff_base,
            backoff_max,
            concurrency,
            clone_timeout,
        ),
        warnings,
    })
}

fn positive(field: &'static str, value: Option<Duration>) -> Result<Duration> {
    match value {
        None => Err(Error::validation(field, "no value")),
        Some(d) if d.is_zero() => Err(Error::validation(field, "must be greater than zero")),
        Some(d) => Ok(d),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "Invalid boolean value for {}: '{}'",
            key, value
        ))),
    }
}

fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid integer value for {}: '{}'", key, value)))
}

fn parse_duration(key: &str, value: &str) -> Result<Duration> {
    if let Ok(secs) = value.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).map_err(|_| {
            Error::Config(format!("Invalid duration value for {}: '{}'", key, value))
        });
    }

    humantime::parse_duration(value)
        .map_err(|e| Error::Config(format!("Invalid duration value for {}: '{}' ({})", key, value, e)))
}

/// Which kind of code-review host to discover repositories from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Gerrit,
    GitHub,
}

/// Discovery settings from the `[source]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Host type
    pub kind: SourceKind,

    /// Server name, optionally with port (e.g. `gerrit.example.org:29418`)
    pub host: Option<String>,

    /// GitHub organization
    pub org: Option<String>,

    /// SSH user for Gerrit clone URLs
    pub ssh_user: Option<String>,

    /// Skip archived (GitHub) or read-only (Gerrit) repositories
    pub skip_archived: bool,

    /// Clone over HTTPS instead of SSH
    pub https: bool,

    /// Root directory for clones; defaults to `./<host>`
    pub output_dir: Option<PathBuf>,
}

/// Root configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Clone policy options
    pub clone: CloneOptions,

    /// Repository discovery settings
    pub source: SourceConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns `None` if the file doesn't exist
    pub fn load() -> Result<Option<Self>> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path).map(Some),
            _ => Ok(None),
        }
    }

    /// Load configuration from a specific file
    ///
    /// The format is chosen from the extension: `.toml`, `.json`, `.yaml` or `.yml`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parsed = match extension.as_deref() {
            Some("toml") => toml::from_str(&contents).map_err(|e| e.to_string()),
            Some("json") => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&contents).map_err(|e| e.to_string())
            }
            _ => {
                return Err(Error::Config(format!(
                    "Unsupported config file format: {}",
                    path.display()
                )))
            }
        };

        parsed.map_err(|e| {
            Error::Config(format!(
                "Error parsing config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/fleetclone/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fleetclone").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Result<CloneOptions> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (format!("{}{}", ENV_PREFIX, k), v.to_string()))
            .collect();
        CloneOptions::from_env_with(|key| map.get(key).cloned())
    }

    fn resolve_cli(cli: CliOverrides) -> Result<Resolved> {
        resolve(&CloneOptions::defaults(), None, None, &cli)
    }

    #[test]
    fn test_defaults_resolve() {
        let resolved = resolve_cli(CliOverrides::default()).unwrap();
        assert!(resolved.policy.mirror());
        assert!(resolved.policy.depth().is_none());
        assert_eq!(resolved.policy.max_retries(), 3);
        assert!(resolved.policy.concurrency().get() >= 1);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_mirror_defaults_true_when_no_source_sets_it() {
        let defaults = CloneOptions {
            mirror: None,
            ..CloneOptions::defaults()
        };
        let resolved = resolve(&defaults, None, None, &CliOverrides::default()).unwrap();
        assert!(resolved.policy.mirror());
    }

    #[test]
    fn test_mirror_drops_depth_with_warning() {
        let resolved = resolve_cli(CliOverrides {
            mirror: Toggle::On,
            depth: Some(5),
            ..Default::default()
        })
        .unwrap();

        assert!(resolved.policy.mirror());
        assert!(resolved.policy.depth().is_none());
        assert_eq!(resolved.warnings, vec![PolicyWarning::DepthIgnored(5)]);
    }

    #[test]
    fn test_mirror_drops_branch_with_warning() {
        let resolved = resolve_cli(CliOverrides {
            mirror: Toggle::On,
            branch: Some("main".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert!(resolved.policy.branch().is_none());
        assert_eq!(
            resolved.warnings,
            vec![PolicyWarning::BranchIgnored("main".to_string())]
        );
    }

    #[test]
    fn test_strict_mode_rejects_conflict() {
        let err = resolve_cli(CliOverrides {
            mirror: Toggle::On,
            depth: Some(5),
            strict: Toggle::On,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, Error::Validation { field: "depth", .. }));
    }

    #[test]
    fn test_working_copy_keeps_depth_and_branch() {
        let resolved = resolve_cli(CliOverrides {
            mirror: Toggle::Off,
            depth: Some(1),
            branch: Some("develop".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert!(!resolved.policy.mirror());
        assert_eq!(resolved.policy.depth().map(NonZeroU32::get), Some(1));
        assert_eq!(resolved.policy.branch(), Some("develop"));
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let err = resolve_cli(CliOverrides {
            concurrency: Some(0),
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation {
                field: "concurrency",
                ..
            }
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_fields_are_named() {
        let cases = [
            (
                CliOverrides {
                    mirror: Toggle::Off,
                    depth: Some(0),
                    ..Default::default()
                },
                "depth",
            ),
            (
                CliOverrides {
                    mirror: Toggle::Off,
                    branch: Some("  ".to_string()),
                    ..Default::default()
                },
                "branch",
            ),
            (
                CliOverrides {
                    backoff_base: Some(Duration::ZERO),
                    ..Default::default()
                },
                "backoff_base",
            ),
            (
                CliOverrides {
                    backoff_base: Some(Duration::from_secs(60)),
                    backoff_max: Some(Duration::from_secs(1)),
                    ..Default::default()
                },
                "backoff_max",
            ),
            (
                CliOverrides {
                    clone_timeout: Some(Duration::ZERO),
                    ..Default::default()
                },
                "clone_timeout",
            ),
        ];

        for (cli, expected) in cases {
            match resolve_cli(cli) {
                Err(Error::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation error for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_required_value_is_validation_error() {
        let err = resolve(
            &CloneOptions::default(),
            None,
            None,
            &CliOverrides::default(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = CloneOptions {
            mirror: Some(false),
            ..Default::default()
        };
        let resolved = resolve(
            &CloneOptions::defaults(),
            Some(&file),
            None,
            &CliOverrides::default(),
        )
        .unwrap();
        assert!(!resolved.policy.mirror());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = CloneOptions {
            mirror: Some(false),
            ..Default::default()
        };
        let cli = CliOverrides {
            mirror: Toggle::On,
            ..Default::default()
        };
        let resolved = resolve(&CloneOptions::defaults(), Some(&file), None, &cli).unwrap();
        assert!(resolved.policy.mirror());
    }

    #[test]
    fn test_precedence_across_all_layers() {
        let file = CloneOptions {
            concurrency: Some(4),
            max_retries: Some(1),
            clone_timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let env = CloneOptions {
            concurrency: Some(8),
            max_retries: Some(2),
            ..Default::default()
        };
        let cli = CliOverrides {
            concurrency: Some(16),
            ..Default::default()
        };

        let policy = resolve(&CloneOptions::defaults(), Some(&file), Some(&env), &cli)
            .unwrap()
            .policy;

        assert_eq!(policy.concurrency().get(), 16);
        assert_eq!(policy.max_retries(), 2);
        assert_eq!(policy.clone_timeout(), Duration::from_secs(30));
        assert_eq!(policy.backoff_base(), Duration::from_secs(2));
    }

    #[test]
    fn test_unset_toggle_defers() {
        let env = CloneOptions {
            mirror: Some(false),
            ..Default::default()
        };
        let resolved = resolve(
            &CloneOptions::defaults(),
            None,
            Some(&env),
            &CliOverrides::default(),
        )
        .unwrap();
        assert!(!resolved.policy.mirror());
    }

    #[test]
    fn test_toggle_from_flags() {
        assert_eq!(Toggle::from_flags(true, false), Toggle::On);
        assert_eq!(Toggle::from_flags(false, true), Toggle::Off);
        assert_eq!(Toggle::from_flags(false, false), Toggle::Unset);
        assert_eq!(Toggle::from(Some(false)).value(), Some(false));
    }

    #[test]
    fn test_env_parsing() {
        let options = env(&[
            ("MIRROR", "false"),
            ("DEPTH", "5"),
            ("BRANCH", "develop"),
            ("MAX_RETRIES", "4"),
            ("BACKOFF_BASE", "1.5"),
            ("BACKOFF_MAX", "1m"),
            ("CONCURRENCY", "16"),
            ("CLONE_TIMEOUT", "15m"),
            ("STRICT", "yes"),
        ])
        .unwrap();

        assert_eq!(options.mirror, Some(false));
        assert_eq!(options.depth, Some(5));
        assert_eq!(options.branch.as_deref(), Some("develop"));
        assert_eq!(options.max_retries, Some(4));
        assert_eq!(options.backoff_base, Some(Duration::from_millis(1500)));
        assert_eq!(options.backoff_max, Some(Duration::from_secs(60)));
        assert_eq!(options.concurrency, Some(16));
        assert_eq!(options.clone_timeout, Some(Duration::from_secs(900)));
        assert_eq!(options.strict, Some(true));
    }

    #[test]
    fn test_env_empty_values_are_unset() {
        let options = env(&[("MIRROR", ""), ("BRANCH", "  ")]).unwrap();
        assert_eq!(options, CloneOptions::default());
    }

    #[test]
    fn test_env_invalid_values() {
        let err = env(&[("MIRROR", "maybe")]).unwrap_err().to_string();
        assert!(err.contains("Invalid boolean value"));
        assert!(err.contains("FLEETCLONE_MIRROR"));

        let err = env(&[("CONCURRENCY", "-1")]).unwrap_err().to_string();
        assert!(err.contains("Invalid integer value"));

        let err = env(&[("BACKOFF_BASE", "soon")]).unwrap_err().to_string();
        assert!(err.contains("Invalid duration value"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[clone]
mirror = false
depth = 10
branch = "release"
backoff_base = "500ms"

[source]
kind = "github"
host = "github.com"
org = "example"
skip_archived = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.clone.mirror, Some(false));
        assert_eq!(config.clone.depth, Some(10));
        assert_eq!(config.clone.backoff_base, Some(Duration::from_millis(500)));
        assert_eq!(config.source.kind, SourceKind::GitHub);
        assert_eq!(config.source.org.as_deref(), Some("example"));
        assert!(config.source.skip_archived);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("[clone]\nconcurrency = 2\n").unwrap();
        assert_eq!(config.clone.concurrency, Some(2));
        assert!(config.clone.mirror.is_none());
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn test_unknown_clone_key_is_rejected() {
        assert!(toml::from_str::<Config>("[clone]\nthreads = 2\n").is_err());
    }

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_file() {
        let file = write_temp(
            ".json",
            r#"{"clone": {"mirror": false, "depth": 20}, "source": {"host": "gerrit.example.org"}}"#,
        );
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.clone.depth, Some(20));
        assert_eq!(config.source.host.as_deref(), Some("gerrit.example.org"));
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_temp(".yaml", "clone:\n  max_retries: 6\n  clone_timeout: 5m\n");
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.clone.max_retries, Some(6));
        assert_eq!(config.clone.clone_timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_load_invalid_file() {
        let file = write_temp(".toml", "[clone\nmirror = ");
        let err = Config::load_from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Error parsing config file"));
    }

    #[test]
    fn test_load_invalid_json_is_config_error() {
        let file = write_temp(".json", r#"{"clone": {"mirror": "#);
        match Config::load_from_file(file.path()) {
            Err(Error::Config(msg)) => assert!(msg.contains("Error parsing config file")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file(Path::new("/nonexistent/fleetclone.toml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn test_load_unsupported_format() {
        let file = write_temp(".txt", "mirror = true");
        let err = Config::load_from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Unsupported config file format"));
    }
}
