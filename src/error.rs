//! Error types for spark-stopwatch.

use thiserror::Error;

/// Errors surfaced by compilation, configuration and host I/O.
///
/// Dispatch misses (unknown binding, unknown handler) are not errors and
/// never show up here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("template produced no root element")]
    MissingRoot,

    #[error("failed to parse stopwatch config")]
    Config {
        #[source]
        source: toml::de::Error,
    },

    #[error("clipboard rejected write: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
