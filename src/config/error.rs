use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Non-fatal conditions observed while loading a configuration.
///
/// Warnings are returned to the caller as values rather than logged and lost;
/// none of them abort a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    #[error("configuration file not found: {0}")]
    MissingSource(PathBuf),

    #[error("unknown environment '{0}', falling back to development")]
    UnknownEnvironment(String),

    #[error("possible circular reference in configuration values")]
    PossibleCircularReference,
}
