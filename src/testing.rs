//! Stand-in drivers for exercising the adapter without a reader attached.

use crate::bindings::Driver;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    Close(c_int),
    GetStatus(c_int, c_char),
    PowerOn(c_int, c_char),
    PowerOff(c_int, c_char),
    GetDevId(c_int),
    Application(c_int, c_char, Vec<u8>),
    LibInfo,
    DeviceInfo(c_int),
    SerialNumber(c_int),
    TrackTimeout(c_int, c_int),
    MagneticTracks(c_int),
}

/// Returns one fixed code from every entry point and copies `output` into
/// any output buffer.
pub struct MockDriver {
    code: c_int,
    output: Vec<u8>,
    panics: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockDriver {
    pub fn returning(code: c_int) -> Self {
        Self {
            code,
            output: Vec::new(),
            panics: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call panics, as a driver fault surfacing in Rust would.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::returning(0)
        }
    }

    pub fn with_output(mut self, output: &[u8]) -> Self {
        self.output = output.to_vec();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> c_int {
        if self.panics {
            panic!("simulated driver fault in {:?}", call);
        }
        self.calls.lock().unwrap().push(call);
        self.code
    }

    fn fill(&self, buffer: &mut [u8]) {
        let len = self.output.len().min(buffer.len());
        buffer[..len].copy_from_slice(&self.output[..len]);
    }
}

impl Driver for MockDriver {
    fn reader_open(&self, port: &CStr) -> c_int {
        self.record(Call::Open(port.to_string_lossy().into_owned()))
    }

    fn reader_close(&self, handle: c_int) -> c_int {
        self.record(Call::Close(handle))
    }

    fn reader_get_status(&self, handle: c_int, slot: c_char) -> c_int {
        self.record(Call::GetStatus(handle, slot))
    }

    fn reader_power_on(&self, handle: c_int, slot: c_char, response: &mut [u8]) -> c_int {
        let code = self.record(Call::PowerOn(handle, slot));
        self.fill(response);
        code
    }

    fn reader_power_off(&self, handle: c_int, slot: c_char) -> c_int {
        self.record(Call::PowerOff(handle, slot))
    }

    fn reader_get_dev_id(&self, handle: c_int, dev_id: &mut u8) -> c_int {
        let code = self.record(Call::GetDevId(handle));
        if let Some(&id) = self.output.first() {
            *dev_id = id;
        }
        code
    }

    fn reader_application(
        &self,
        handle: c_int,
        slot: c_char,
        command: &[u8],
        response: &mut [u8],
    ) -> c_int {
        let code = self.record(Call::Application(handle, slot, command.to_vec()));
        self.fill(response);
        code
    }

    fn reader_lib_info(&self, info: &mut [u8]) -> c_int {
        let code = self.record(Call::LibInfo);
        self.fill(info);
        code
    }

    fn device_get_info(&self, handle: c_int, info: &mut [u8]) -> c_int {
        let code = self.record(Call::DeviceInfo(handle));
        self.fill(info);
        code
    }

    fn serial_number_read(&self, handle: c_int, serial: &mut [u8]) -> c_int {
        let code = self.record(Call::SerialNumber(handle));
        self.fill(serial);
        code
    }

    fn track_timeout(&self, handle: c_int, timeout: c_int) -> c_int {
        self.record(Call::TrackTimeout(handle, timeout))
    }

    fn magnetic_get_tracks(&self, handle: c_int, tracks: &mut [u8]) -> c_int {
        let code = self.record(Call::MagneticTracks(handle));
        self.fill(tracks);
        code
    }
}

const SIM_HANDLE: c_int = 3;
const SIM_ATR: &[u8] = &[0x3B, 0x68, 0x00, 0x00, 0x00, 0x73, 0xC8, 0x40, 0x13, 0x00, 0x90, 0x00];
const SIM_FCI: &[u8] = &[0x6F, 0x0A, 0x84, 0x08, 0xA0, 0x00, 0x00, 0x03, 0x33, 0x01, 0x01, 0x01, 0x90, 0x00];
const ERR_NO_DEVICE: c_int = -1;
const ERR_BAD_HANDLE: c_int = -2;
const ERR_NOT_POWERED: c_int = -5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Session {
    #[default]
    Closed,
    Opened,
    Powered,
}

/// One reader on port `AUTO` with a card that answers any APDU, enforcing
/// the Closed -> Opened -> Powered sequence the way a driver would.
#[derive(Default)]
pub struct SimulatedReader {
    session: Mutex<Session>,
}

impl SimulatedReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_session<F>(&self, handle: c_int, f: F) -> c_int
    where
        F: FnOnce(&mut Session) -> c_int,
    {
        let mut session = self.session.lock().unwrap();
        if handle != SIM_HANDLE || *session == Session::Closed {
            return ERR_BAD_HANDLE;
        }
        f(&mut session)
    }
}

fn write(buffer: &mut [u8], data: &[u8]) -> c_int {
    buffer[..data.len()].copy_from_slice(data);
    data.len() as c_int
}

impl Driver for SimulatedReader {
    fn reader_open(&self, port: &CStr) -> c_int {
        if port.to_bytes() != b"AUTO" {
            return ERR_NO_DEVICE;
        }
        *self.session.lock().unwrap() = Session::Opened;
        SIM_HANDLE
    }

    fn reader_close(&self, handle: c_int) -> c_int {
        self.with_session(handle, |s| {
            *s = Session::Closed;
            0
        })
    }

    fn reader_get_status(&self, handle: c_int, _slot: c_char) -> c_int {
        self.with_session(handle, |s| if *s == Session::Powered { 0 } else { 1 })
    }

    fn reader_power_on(&self, handle: c_int, _slot: c_char, response: &mut [u8]) -> c_int {
        self.with_session(handle, |s| {
            *s = Session::Powered;
            write(response, SIM_ATR)
        })
    }

    fn reader_power_off(&self, handle: c_int, _slot: c_char) -> c_int {
        self.with_session(handle, |s| {
            *s = Session::Opened;
            0
        })
    }

    fn reader_get_dev_id(&self, handle: c_int, dev_id: &mut u8) -> c_int {
        self.with_session(handle, |_| {
            *dev_id = 0x01;
            0
        })
    }

    fn reader_application(
        &self,
        handle: c_int,
        _slot: c_char,
        _command: &[u8],
        response: &mut [u8],
    ) -> c_int {
        self.with_session(handle, |s| match s {
            Session::Powered => write(response, SIM_FCI),
            _ => ERR_NOT_POWERED,
        })
    }

    fn reader_lib_info(&self, info: &mut [u8]) -> c_int {
        write(info, b"SIM\0");
        0
    }

    fn device_get_info(&self, handle: c_int, info: &mut [u8]) -> c_int {
        self.with_session(handle, |_| {
            write(info, b"F4\0");
            0
        })
    }

    fn serial_number_read(&self, handle: c_int, serial: &mut [u8]) -> c_int {
        self.with_session(handle, |_| {
            write(serial, b"0000\0");
            0
        })
    }

    fn track_timeout(&self, handle: c_int, _timeout: c_int) -> c_int {
        self.with_session(handle, |_| 0)
    }

    fn magnetic_get_tracks(&self, handle: c_int, tracks: &mut [u8]) -> c_int {
        self.with_session(handle, |_| {
            write(tracks, b"\0");
            0
        })
    }
}
