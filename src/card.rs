use crate::types::{ApduResult, CodeResult, PowerOnResult};
use crate::utils::loaded_reader;
use napi::bindgen_prelude::*;
use napi_derive::napi;

/// Raw card status for `slot`; the driver's code is returned as `error`
#[napi(js_name = "ICC_Reader_GetStatus")]
pub fn icc_reader_get_status(handle: i32, slot: i32) -> Result<CodeResult> {
    Ok(loaded_reader()?.get_status(handle, slot).into())
}

#[napi(js_name = "ICC_Reader_PowerOn")]
pub fn icc_reader_power_on(handle: i32, slot: i32) -> Result<PowerOnResult> {
    Ok(loaded_reader()?.power_on(handle, slot).into())
}

#[napi(js_name = "ICC_Reader_PowerOff")]
pub fn icc_reader_power_off(handle: i32, slot: i32) -> Result<CodeResult> {
    Ok(loaded_reader()?.power_off(handle, slot).into())
}

/// Exchange one APDU. `command` is hex, e.g. `"00A404000E315041592E5359532E4444463031"`.
#[napi(js_name = "ICC_Reader_Application")]
pub fn icc_reader_application(handle: i32, slot: i32, command: String) -> Result<ApduResult> {
    Ok(loaded_reader()?.application(handle, slot, &command).into())
}
