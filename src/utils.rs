use crate::adapter::Reader;
use crate::bindings::NativeDriver;
use crate::config::LoaderConfig;
use crate::runtime;
use napi::bindgen_prelude::*;
use napi_derive::napi;

/// The loaded driver, or a JS exception if it could not be loaded
pub(crate) fn loaded_reader() -> Result<&'static Reader<NativeDriver>> {
    runtime::reader()
        .map_err(|e| napi::Error::new(napi::Status::GenericFailure, format!("Reader driver unavailable: {}", e)))
}

/// Get library version
#[napi]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Where the driver library is loaded from
#[napi]
pub fn library_path() -> String {
    runtime::library_path().to_string_lossy().into_owned()
}

/// Set the driver location before the first reader call, e.g.
/// `configure('{"libraryPath": "/opt/f4/libF4_MDS.so"}')`
#[napi]
pub fn configure(config_json: String) -> Result<()> {
    let config = LoaderConfig::from_json(&config_json)
        .map_err(|e| napi::Error::new(napi::Status::InvalidArg, e.to_string()))?;
    runtime::configure(config)
        .map_err(|e| napi::Error::new(napi::Status::GenericFailure, e.to_string()))
}
