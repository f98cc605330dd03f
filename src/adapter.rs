//! Uniform `{error, data}` results over the raw driver calls.
//!
//! Each operation allocates its own output buffer, calls the driver inside a
//! fault boundary and reshapes the return code. A panic or a marshalling
//! failure becomes `error: -1`; driver codes pass through untouched.

use crate::bindings::Driver;
use crate::hex::{self, PadSide};
use serde::Serialize;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Size of every variable-length output buffer handed to the driver
pub const RESPONSE_CAPACITY: usize = 1000;

/// Error code for a call that failed on this side of the driver
pub const FAULT: i32 = -1;

/// Result of one reader operation.
///
/// `data` is only present on success. What a non-zero `error` means is up to
/// the driver. Serializes to the same JSON the JS exports produce (`data`
/// omitted when absent), for Rust callers that pass results on as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub error: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            error: 0,
            data: Some(data),
        }
    }

    pub fn code(error: i32) -> Self {
        Self { error, data: None }
    }

    pub fn fault() -> Self {
        Self::code(FAULT)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            error: self.error,
            data: self.data.map(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opened {
    pub handle: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoweredOn {
    #[serde(rename = "Response")]
    pub response: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceId {
    #[serde(rename = "DevID")]
    pub dev_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApduResponse {
    #[serde(rename = "Response_APDU")]
    pub response_apdu: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text(pub String);

/// A call that never produced a driver return code
#[derive(Debug)]
struct Fault;

/// Safe wrapper over a [`Driver`]. Holds no session state.
pub struct Reader<D> {
    driver: D,
}

impl<D: Driver> Reader<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn guarded<F>(&self, op: &'static str, call: F) -> Result<c_int, Fault>
    where
        F: FnOnce(&D) -> Result<c_int, Fault>,
    {
        match panic::catch_unwind(AssertUnwindSafe(|| call(&self.driver))) {
            Ok(Ok(code)) => {
                debug!(op, code, "driver call returned");
                Ok(code)
            }
            Ok(Err(fault)) => {
                warn!(op, "driver call not made: arguments could not be marshalled");
                Err(fault)
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown".to_string());
                warn!(op, %reason, "driver call faulted");
                Err(Fault)
            }
        }
    }

    /// Open the reader on `port` (`"AUTO"` or a device path).
    pub fn open(&self, port: &str) -> Envelope<Opened> {
        let result = self.guarded("open", |driver| {
            let port = CString::new(port).map_err(|_| Fault)?;
            Ok(driver.reader_open(&port))
        });
        match result {
            Ok(handle) if handle < 0 => Envelope::code(handle),
            Ok(handle) => Envelope::ok(Opened { handle }),
            Err(Fault) => Envelope::fault(),
        }
    }

    pub fn close(&self, handle: i32) -> Envelope<()> {
        success_or_fault(self.guarded("close", |driver| Ok(driver.reader_close(handle))))
    }

    /// Card status for `slot`. The raw driver code is returned as `error`,
    /// whatever its sign.
    pub fn get_status(&self, handle: i32, slot: i32) -> Envelope<()> {
        match self.guarded("get_status", |driver| {
            Ok(driver.reader_get_status(handle, slot_arg(slot)))
        }) {
            Ok(code) => Envelope::code(code),
            Err(Fault) => Envelope::fault(),
        }
    }

    /// Power the card in `slot`; the payload is the card's answer to reset.
    pub fn power_on(&self, handle: i32, slot: i32) -> Envelope<PoweredOn> {
        let mut buffer = vec![0u8; RESPONSE_CAPACITY];
        let result = self.guarded("power_on", |driver| {
            Ok(driver.reader_power_on(handle, slot_arg(slot), &mut buffer))
        });
        with_length(result, &buffer).map(|response| PoweredOn {
            response: response.to_vec(),
        })
    }

    pub fn power_off(&self, handle: i32, slot: i32) -> Envelope<()> {
        success_or_fault(self.guarded("power_off", |driver| {
            Ok(driver.reader_power_off(handle, slot_arg(slot)))
        }))
    }

    pub fn get_dev_id(&self, handle: i32) -> Envelope<DeviceId> {
        let mut dev_id = 0u8;
        match self.guarded("get_dev_id", |driver| {
            Ok(driver.reader_get_dev_id(handle, &mut dev_id))
        }) {
            Ok(0) => Envelope::ok(DeviceId { dev_id }),
            Ok(code) => Envelope::code(code),
            Err(Fault) => Envelope::fault(),
        }
    }

    /// Send a hex-encoded command APDU to the card in `slot`.
    pub fn application(&self, handle: i32, slot: i32, command: &str) -> Envelope<ApduResponse> {
        let mut buffer = vec![0u8; RESPONSE_CAPACITY];
        let result = self.guarded("application", |driver| {
            let command = hex::encode(command, None, PadSide::Right).map_err(|_| Fault)?;
            if c_int::try_from(command.len()).is_err() {
                return Err(Fault);
            }
            Ok(driver.reader_application(handle, slot_arg(slot), &command, &mut buffer))
        });
        with_length(result, &buffer).map(|response| ApduResponse {
            response_apdu: hex::decode(response),
        })
    }

    /// Version text reported by the driver itself.
    pub fn lib_info(&self) -> Envelope<Text> {
        let mut buffer = vec![0u8; RESPONSE_CAPACITY];
        let result = self.guarded("lib_info", |driver| Ok(driver.reader_lib_info(&mut buffer)));
        with_text(result, &buffer)
    }

    pub fn device_info(&self, handle: i32) -> Envelope<Text> {
        let mut buffer = vec![0u8; RESPONSE_CAPACITY];
        let result = self.guarded("device_info", |driver| {
            Ok(driver.device_get_info(handle, &mut buffer))
        });
        with_text(result, &buffer)
    }

    pub fn serial_number(&self, handle: i32) -> Envelope<Text> {
        let mut buffer = vec![0u8; RESPONSE_CAPACITY];
        let result = self.guarded("serial_number", |driver| {
            Ok(driver.serial_number_read(handle, &mut buffer))
        });
        with_text(result, &buffer)
    }

    /// Set how long a stripe read waits for a swipe. Units are the driver's.
    pub fn set_track_timeout(&self, handle: i32, timeout: i32) -> Envelope<()> {
        match self.guarded("set_track_timeout", |driver| {
            Ok(driver.track_timeout(handle, timeout))
        }) {
            Ok(code) => Envelope::code(code),
            Err(Fault) => Envelope::fault(),
        }
    }

    /// Read tracks 1-3 of a swiped card. Blocks until a swipe or the driver's
    /// track timeout.
    pub fn magnetic_tracks(&self, handle: i32) -> Envelope<Text> {
        let mut buffer = vec![0u8; RESPONSE_CAPACITY];
        let result = self.guarded("magnetic_tracks", |driver| {
            Ok(driver.magnetic_get_tracks(handle, &mut buffer))
        });
        with_text(result, &buffer)
    }
}

// Slots travel as a C `char`; out-of-range values wrap like the C cast would.
fn slot_arg(slot: i32) -> c_char {
    slot as c_char
}

fn success_or_fault(result: Result<c_int, Fault>) -> Envelope<()> {
    match result {
        Ok(0) => Envelope::code(0),
        Ok(_) | Err(Fault) => Envelope::fault(),
    }
}

/// Positive codes are the number of bytes the driver wrote.
fn with_length<'a>(result: Result<c_int, Fault>, buffer: &'a [u8]) -> Envelope<&'a [u8]> {
    match result {
        Ok(len) if len > 0 => {
            let len = (len as usize).min(buffer.len());
            Envelope::ok(&buffer[..len])
        }
        Ok(code) => Envelope::code(code),
        Err(Fault) => Envelope::fault(),
    }
}

/// Zero means the buffer holds NUL-terminated text.
fn with_text(result: Result<c_int, Fault>, buffer: &[u8]) -> Envelope<Text> {
    match result {
        Ok(0) => {
            let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
            Envelope::ok(Text(String::from_utf8_lossy(&buffer[..end]).into_owned()))
        }
        Ok(code) => Envelope::code(code),
        Err(Fault) => Envelope::fault(),
    }
}
