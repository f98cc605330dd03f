use crate::adapter::{ApduResponse, DeviceId, Envelope, Opened, PoweredOn, Text};
use napi::bindgen_prelude::*;
use napi_derive::napi;

/// Result with no payload; `error` carries the code
#[napi(object)]
pub struct CodeResult {
    pub error: i32,
}

#[napi(object)]
pub struct OpenData {
    pub handle: i32,
}

/// Result of `ICC_Reader_Open`
#[napi(object)]
pub struct OpenResult {
    pub error: i32,
    pub data: Option<OpenData>,
}

#[napi(object)]
pub struct PowerOnData {
    /// Answer to reset
    #[napi(js_name = "Response")]
    pub response: Buffer,
}

/// Result of `ICC_Reader_PowerOn`
#[napi(object)]
pub struct PowerOnResult {
    pub error: i32,
    pub data: Option<PowerOnData>,
}

#[napi(object)]
pub struct DevIdData {
    #[napi(js_name = "DevID")]
    pub dev_id: u8,
}

/// Result of `ICC_Reader_GetDevID`
#[napi(object)]
pub struct DevIdResult {
    pub error: i32,
    pub data: Option<DevIdData>,
}

#[napi(object)]
pub struct ApduData {
    /// Response APDU as uppercase hex, status word included
    #[napi(js_name = "Response_APDU")]
    pub response_apdu: String,
}

/// Result of `ICC_Reader_Application`
#[napi(object)]
pub struct ApduResult {
    pub error: i32,
    pub data: Option<ApduData>,
}

#[napi(object)]
pub struct InfoData {
    pub info: String,
}

/// Result of `ICC_Reader_Libinfo` and `Device_Get_info`
#[napi(object)]
pub struct InfoResult {
    pub error: i32,
    pub data: Option<InfoData>,
}

#[napi(object)]
pub struct SerialData {
    pub serial: String,
}

/// Result of `SerialNumber_Read`
#[napi(object)]
pub struct SerialResult {
    pub error: i32,
    pub data: Option<SerialData>,
}

#[napi(object)]
pub struct TracksData {
    /// Raw track 1-3 text as the driver formats it
    pub tracks: String,
}

/// Result of a magnetic stripe read
#[napi(object)]
pub struct TracksResult {
    pub error: i32,
    pub data: Option<TracksData>,
}

impl From<Envelope<()>> for CodeResult {
    fn from(env: Envelope<()>) -> Self {
        Self { error: env.error }
    }
}

impl From<Envelope<Opened>> for OpenResult {
    fn from(env: Envelope<Opened>) -> Self {
        Self {
            error: env.error,
            data: env.data.map(|d| OpenData { handle: d.handle }),
        }
    }
}

impl From<Envelope<PoweredOn>> for PowerOnResult {
    fn from(env: Envelope<PoweredOn>) -> Self {
        Self {
            error: env.error,
            data: env.data.map(|d| PowerOnData {
                response: Buffer::from(d.response),
            }),
        }
    }
}

impl From<Envelope<DeviceId>> for DevIdResult {
    fn from(env: Envelope<DeviceId>) -> Self {
        Self {
            error: env.error,
            data: env.data.map(|d| DevIdData { dev_id: d.dev_id }),
        }
    }
}

impl From<Envelope<ApduResponse>> for ApduResult {
    fn from(env: Envelope<ApduResponse>) -> Self {
        Self {
            error: env.error,
            data: env.data.map(|d| ApduData {
                response_apdu: d.response_apdu,
            }),
        }
    }
}

impl From<Envelope<Text>> for InfoResult {
    fn from(env: Envelope<Text>) -> Self {
        Self {
            error: env.error,
            data: env.data.map(|Text(info)| InfoData { info }),
        }
    }
}

impl From<Envelope<Text>> for SerialResult {
    fn from(env: Envelope<Text>) -> Self {
        Self {
            error: env.error,
            data: env.data.map(|Text(serial)| SerialData { serial }),
        }
    }
}

impl From<Envelope<Text>> for TracksResult {
    fn from(env: Envelope<Text>) -> Self {
        Self {
            error: env.error,
            data: env.data.map(|Text(tracks)| TracksData { tracks }),
        }
    }
}
