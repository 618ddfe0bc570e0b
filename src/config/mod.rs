//! JSON configuration files for the command-line tools.

pub mod segments;

pub use segments::LsdToolConfig;
