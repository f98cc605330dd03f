use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the vendor driver. Fatal for the whole process.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load reader driver from {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("reader driver does not export `{symbol}`: {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// Errors from hex string conversion
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("hex string of {digits} digits does not fit in {length} bytes")]
    InvalidLength { digits: usize, length: usize },

    #[error("invalid hex digit {digit:?} at index {index}")]
    InvalidDigit { digit: char, index: usize },

    #[error("hex string has an odd number of digits")]
    OddLength,
}

/// Errors raised by `configure`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid reader configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reader driver is already loaded; configure must run before first use")]
    AlreadyLoaded,

    #[error("reader configuration was already set")]
    AlreadyConfigured,
}
