use crate::errors::ConfigError;
use crate::path;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable holding an explicit driver path. Wins over any
/// configured value.
pub const LIB_PATH_ENV: &str = "F4_MDS_LIB_PATH";

/// Base name of the vendor driver, without platform prefix or extension
pub const DEFAULT_LIBRARY_NAME: &str = "F4_MDS";

/// Where to find the vendor driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Full path to the driver file
    pub library_path: Option<PathBuf>,
    /// Library base name used when no path is given (`F4_MDS` -> `libF4_MDS.so`)
    pub library_name: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply the `F4_MDS_LIB_PATH` override from the process environment.
    pub fn with_env_override(self) -> Self {
        self.with_override_from(|key| std::env::var_os(key))
    }

    pub fn with_override_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        if let Some(value) = lookup(LIB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.library_path = Some(PathBuf::from(value));
        }
        self
    }

    /// The path handed to the dynamic loader.
    pub fn library_location(&self) -> PathBuf {
        let location = match &self.library_path {
            Some(path) => path.clone(),
            None => PathBuf::from(libloading::library_filename(&self.library_name)),
        };
        path::resolve(&location)
    }
}
