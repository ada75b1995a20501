//! Error types for configuration loading.
//!
//! 配置加载的错误类型。

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that abort a run before any script is executed.
/// Every variant that concerns a field carries its path, e.g. `script[1].run`.
///
/// 在执行任何脚本之前中止运行的错误。
/// 每个与字段相关的变体都带有字段路径，例如 `script[1].run`。
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML / TOML / JSON
    #[error("failed to parse {format} configuration: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// A required field is absent
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// A field has the wrong type or shape
    #[error("invalid field `{field}`: {message}")]
    InvalidType { field: String, message: String },

    /// A field has the right type but an unusable value
    #[error("invalid value for field `{field}`: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// The path of the offending field, if the error concerns one.
    /// 出错字段的路径（如果错误与字段相关）。
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field }
            | ConfigError::InvalidType { field, .. }
            | ConfigError::InvalidValue { field, .. } => Some(field),
            ConfigError::Read { .. } | ConfigError::Parse { .. } => None,
        }
    }
}
