use crate::types::{CodeResult, DevIdResult, InfoResult, OpenResult, SerialResult};
use crate::utils::loaded_reader;
use napi::bindgen_prelude::*;
use napi_derive::napi;

/// Open a reader. `port` is `"AUTO"` or a device path.
#[napi(js_name = "ICC_Reader_Open")]
pub fn icc_reader_open(port: String) -> Result<OpenResult> {
    Ok(loaded_reader()?.open(&port).into())
}

#[napi(js_name = "ICC_Reader_Close")]
pub fn icc_reader_close(handle: i32) -> Result<CodeResult> {
    Ok(loaded_reader()?.close(handle).into())
}

#[napi(js_name = "ICC_Reader_GetDevID")]
pub fn icc_reader_get_dev_id(handle: i32) -> Result<DevIdResult> {
    Ok(loaded_reader()?.get_dev_id(handle).into())
}

/// Driver version text
#[napi(js_name = "ICC_Reader_Libinfo")]
pub fn icc_reader_libinfo() -> Result<InfoResult> {
    Ok(loaded_reader()?.lib_info().into())
}

#[napi(js_name = "Device_Get_info")]
pub fn device_get_info(handle: i32) -> Result<InfoResult> {
    Ok(loaded_reader()?.device_info(handle).into())
}

#[napi(js_name = "SerialNumber_Read")]
pub fn serial_number_read(handle: i32) -> Result<SerialResult> {
    Ok(loaded_reader()?.serial_number(handle).into())
}
