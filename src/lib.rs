//! Node.js bindings for the F4 MDS smart card / magnetic stripe reader.
//!
//! The vendor `F4_MDS` driver does all device work. This crate loads it,
//! marshals buffers across the C boundary and hands every result back to JS
//! as `{ error, data? }`:
//!
//! ```text
//! JS call -> napi export -> runtime (load once) -> Reader<NativeDriver> -> F4_MDS
//! ```
//!
//! ```js
//! const mds = require('f4-mds-reader');
//! const { error, data } = mds.ICC_Reader_Open('AUTO');
//! mds.ICC_Reader_PowerOn(data.handle, 1);
//! mds.ICC_Reader_Application(data.handle, 1, '00A404000E315041592E5359532E4444463031');
//! ```

pub mod adapter;
pub mod bindings;
pub mod config;
pub mod errors;
pub mod hex;
pub mod logging;
pub mod path;
pub mod runtime;

// JS exports need a Node host to link against, so the unit-test harness
// builds without them
#[cfg(not(test))]
mod card;
#[cfg(not(test))]
mod magnetic;
#[cfg(not(test))]
mod reader;
#[cfg(not(test))]
mod types;
#[cfg(not(test))]
mod utils;

#[cfg(test)]
mod testing;

pub use adapter::{Envelope, Reader, RESPONSE_CAPACITY};
pub use bindings::{Driver, NativeDriver};
pub use config::LoaderConfig;
pub use errors::{ConfigError, HexError, LoadError};
