//! Loading of `objclint.toml` configuration files.

mod discovery;
mod config;

pub use discovery::{CONFIG_FILE_NAMES, find_config};
pub use config::{
    ConfigError, DEFAULT_INDENT_WIDTH, DEFAULT_SUPPRESSION_OFF, DEFAULT_SUPPRESSION_ON, FixConfig,
    ImportsConfig, ObjclintConfig, RuleMode, SuppressionConfig,
};
