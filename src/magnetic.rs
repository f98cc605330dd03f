use crate::types::{CodeResult, TracksResult};
use crate::utils::loaded_reader;
use napi::bindgen_prelude::*;
use napi_derive::napi;

/// How long `Magnetic_Get_Track123Data` waits for a swipe
#[napi(js_name = "Icc_TrackTimeOut")]
pub fn icc_track_timeout(handle: i32, timeout: i32) -> Result<CodeResult> {
    Ok(loaded_reader()?.set_track_timeout(handle, timeout).into())
}

/// Blocking stripe read
#[napi(js_name = "Magnetic_Get_Track123Data")]
pub fn magnetic_get_track123_data(handle: i32) -> Result<TracksResult> {
    Ok(loaded_reader()?.magnetic_tracks(handle).into())
}

/// Stripe read off the event loop. Resolves once the card is swiped or the
/// track timeout passes.
#[napi(js_name = "Magnetic_Wait_Track123Data")]
pub async fn magnetic_wait_track123_data(handle: i32) -> Result<TracksResult> {
    let reader = loaded_reader()?;
    let envelope = tokio::task::spawn_blocking(move || reader.magnetic_tracks(handle))
        .await
        .map_err(|e| napi::Error::new(napi::Status::GenericFailure, format!("Track read task failed: {}", e)))?;
    Ok(envelope.into())
}
