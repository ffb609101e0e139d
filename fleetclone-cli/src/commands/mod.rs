//! CLI command implementations

pub mod clone;
pub mod config;
mod policy;

pub use clone::CloneArgs;
pub use config::ConfigArgs;
