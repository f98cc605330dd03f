//! Process-wide driver state. Built once on first use and immutable after.

use crate::adapter::Reader;
use crate::bindings::NativeDriver;
use crate::config::LoaderConfig;
use crate::errors::{ConfigError, LoadError};
use crate::logging;
use once_cell::sync::OnceCell;
use std::path::PathBuf;

static CONFIG: OnceCell<LoaderConfig> = OnceCell::new();
static READER: OnceCell<Result<Reader<NativeDriver>, LoadError>> = OnceCell::new();
static LOADED_PATH: OnceCell<PathBuf> = OnceCell::new();

/// Set where the driver is loaded from. Only allowed before first use.
pub fn configure(config: LoaderConfig) -> Result<(), ConfigError> {
    if READER.get().is_some() {
        return Err(ConfigError::AlreadyLoaded);
    }
    CONFIG.set(config).map_err(|_| ConfigError::AlreadyConfigured)
}

fn config() -> LoaderConfig {
    CONFIG.get().cloned().unwrap_or_default().with_env_override()
}

/// Path the driver was loaded from, or will be loaded from on first use
pub fn library_path() -> PathBuf {
    match LOADED_PATH.get() {
        Some(path) => path.clone(),
        None => config().library_location(),
    }
}

/// The loaded reader, or the error that stopped it from loading. A failed
/// load is never retried.
pub fn reader() -> Result<&'static Reader<NativeDriver>, &'static LoadError> {
    READER
        .get_or_init(|| {
            logging::init();
            let path = LOADED_PATH.get_or_init(|| config().library_location());
            match NativeDriver::load(path) {
                Ok(driver) => {
                    tracing::info!(path = %path.display(), "reader driver loaded");
                    Ok(Reader::new(driver))
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    Err(e)
                }
            }
        })
        .as_ref()
}
