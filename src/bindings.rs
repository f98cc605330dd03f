//! Native entry points of the vendor `F4_MDS` driver.
//!
//! The symbol table below is the whole calling-convention contract with the
//! driver. Every symbol is resolved when the library loads, so a missing or
//! mismatched driver fails before any reader call is made.

use crate::errors::LoadError;
use libloading::Library;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uchar};
use std::path::Path;

/// Raw driver operations, one method per native entry point.
///
/// Output buffers are owned by the caller and must outlive the call.
pub trait Driver: Send + Sync {
    fn reader_open(&self, port: &CStr) -> c_int;
    fn reader_close(&self, handle: c_int) -> c_int;
    fn reader_get_status(&self, handle: c_int, slot: c_char) -> c_int;
    fn reader_power_on(&self, handle: c_int, slot: c_char, response: &mut [u8]) -> c_int;
    fn reader_power_off(&self, handle: c_int, slot: c_char) -> c_int;
    fn reader_get_dev_id(&self, handle: c_int, dev_id: &mut u8) -> c_int;
    fn reader_application(
        &self,
        handle: c_int,
        slot: c_char,
        command: &[u8],
        response: &mut [u8],
    ) -> c_int;
    fn reader_lib_info(&self, info: &mut [u8]) -> c_int;
    fn device_get_info(&self, handle: c_int, info: &mut [u8]) -> c_int;
    fn serial_number_read(&self, handle: c_int, serial: &mut [u8]) -> c_int;
    fn track_timeout(&self, handle: c_int, timeout: c_int) -> c_int;
    fn magnetic_get_tracks(&self, handle: c_int, tracks: &mut [u8]) -> c_int;
}

macro_rules! native_bindings {
    ($( $field:ident = $symbol:literal : fn($($arg:ty),*); )*) => {
        /// Exported symbols the driver must provide
        pub const SYMBOLS: &[&str] = &[$($symbol),*];

        struct Bindings {
            $( $field: unsafe extern "C" fn($($arg),*) -> c_int, )*
        }

        impl Bindings {
            /// # Safety
            /// `library` must export each symbol with the declared signature.
            unsafe fn resolve(library: &Library) -> Result<Self, LoadError> {
                Ok(Self {
                    $(
                        $field: *library
                            .get::<unsafe extern "C" fn($($arg),*) -> c_int>(concat!($symbol, "\0").as_bytes())
                            .map_err(|source| LoadError::MissingSymbol { symbol: $symbol, source })?,
                    )*
                })
            }
        }
    };
}

native_bindings! {
    open = "ICC_Reader_Open": fn(*const c_char);
    close = "ICC_Reader_Close": fn(c_int);
    get_status = "ICC_Reader_GetStatus": fn(c_int, c_char);
    power_on = "ICC_Reader_PowerOn": fn(c_int, c_char, *mut c_uchar);
    power_off = "ICC_Reader_PowerOff": fn(c_int, c_char);
    get_dev_id = "ICC_Reader_GetDevID": fn(c_int, *mut c_uchar);
    application = "ICC_Reader_Application": fn(c_int, c_char, c_int, *const c_uchar, *mut c_uchar);
    lib_info = "ICC_Reader_Libinfo": fn(*mut c_char);
    device_info = "Device_Get_info": fn(c_int, *mut c_char);
    serial_number = "SerialNumber_Read": fn(c_int, *mut c_char);
    track_timeout = "Icc_TrackTimeOut": fn(c_int, c_int);
    magnetic_tracks = "Magnetic_Get_Track123Data": fn(c_int, *mut c_char);
}

/// The vendor driver, loaded from disk.
pub struct NativeDriver {
    bindings: Bindings,
    // Keeps the resolved function pointers valid
    _library: Library,
}

impl NativeDriver {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        // SAFETY: loading runs the driver's initializers; the driver is trusted
        // vendor code and symbol signatures are fixed by the table above.
        unsafe {
            let library = Library::new(path).map_err(|source| LoadError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            let bindings = Bindings::resolve(&library)?;
            Ok(Self {
                bindings,
                _library: library,
            })
        }
    }
}

// The driver writes at most the documented response size into output
// buffers; callers size buffers with `RESPONSE_CAPACITY`.
impl Driver for NativeDriver {
    fn reader_open(&self, port: &CStr) -> c_int {
        unsafe { (self.bindings.open)(port.as_ptr()) }
    }

    fn reader_close(&self, handle: c_int) -> c_int {
        unsafe { (self.bindings.close)(handle) }
    }

    fn reader_get_status(&self, handle: c_int, slot: c_char) -> c_int {
        unsafe { (self.bindings.get_status)(handle, slot) }
    }

    fn reader_power_on(&self, handle: c_int, slot: c_char, response: &mut [u8]) -> c_int {
        unsafe { (self.bindings.power_on)(handle, slot, response.as_mut_ptr()) }
    }

    fn reader_power_off(&self, handle: c_int, slot: c_char) -> c_int {
        unsafe { (self.bindings.power_off)(handle, slot) }
    }

    fn reader_get_dev_id(&self, handle: c_int, dev_id: &mut u8) -> c_int {
        unsafe { (self.bindings.get_dev_id)(handle, dev_id as *mut u8) }
    }

    fn reader_application(
        &self,
        handle: c_int,
        slot: c_char,
        command: &[u8],
        response: &mut [u8],
    ) -> c_int {
        // Callers reject commands longer than c_int::MAX
        let len = command.len() as c_int;
        unsafe {
            (self.bindings.application)(handle, slot, len, command.as_ptr(), response.as_mut_ptr())
        }
    }

    fn reader_lib_info(&self, info: &mut [u8]) -> c_int {
        unsafe { (self.bindings.lib_info)(info.as_mut_ptr().cast()) }
    }

    fn device_get_info(&self, handle: c_int, info: &mut [u8]) -> c_int {
        unsafe { (self.bindings.device_info)(handle, info.as_mut_ptr().cast()) }
    }

    fn serial_number_read(&self, handle: c_int, serial: &mut [u8]) -> c_int {
        unsafe { (self.bindings.serial_number)(handle, serial.as_mut_ptr().cast()) }
    }

    fn track_timeout(&self, handle: c_int, timeout: c_int) -> c_int {
        unsafe { (self.bindings.track_timeout)(handle, timeout) }
    }

    fn magnetic_get_tracks(&self, handle: c_int, tracks: &mut [u8]) -> c_int {
        unsafe { (self.bindings.magnetic_tracks)(handle, tracks.as_mut_ptr().cast()) }
    }
}
