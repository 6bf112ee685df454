//! iOS capture notifications through the C-exported screenshot listener
//!
//! The listener itself lives in the app's Objective-C sources. Objective-C
//! exceptions cannot be caught from Rust, so only argument conversion can
//! fail here.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use observer_protocol::{BridgeConfig, CaptureEvent, ListenerTarget, Platform};
use tracing::{debug, info};

use crate::{BridgeError, BridgeResult, CaptureHandler, HandlerSlot, PlatformBridge};

#[allow(non_snake_case)]
unsafe extern "C" {
    fn _iOS_StartScreenshotListening(target_id: *const c_char, callback_name: *const c_char);
    fn _iOS_StopScreenshotListening();
}

static NATIVE_HANDLER: HandlerSlot = HandlerSlot::new();

/// Entry point the Objective-C listener calls after a screenshot.
///
/// `path` may be null.
///
/// # Safety
///
/// `path` must be null or point to a NUL-terminated string valid for the
/// duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snapwatch_ios_on_capture(path: *const c_char) {
    let raw = if path.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(path) }.to_string_lossy().into_owned())
    };

    debug!("iOS capture notification: {:?}", raw);
    NATIVE_HANDLER.emit(CaptureEvent::from_native(raw.as_deref()));
}

/// iOS bridge implementation
pub struct IosBridge {
    _private: (),
}

impl IosBridge {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn to_c_string(call: &'static str, value: &str) -> BridgeResult<CString> {
    CString::new(value).map_err(|e| BridgeError::native(call, e))
}

impl PlatformBridge for IosBridge {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn start(&self, target: &ListenerTarget, _config: &BridgeConfig) -> BridgeResult<()> {
        const CALL: &str = "_iOS_StartScreenshotListening";

        let target_id = to_c_string(CALL, target.target_id())?;
        let callback_name = to_c_string(CALL, target.callback_name())?;

        unsafe { _iOS_StartScreenshotListening(target_id.as_ptr(), callback_name.as_ptr()) };

        info!("iOS screenshot listening started - target: {}", target);
        Ok(())
    }

    fn stop(&self) -> BridgeResult<()> {
        unsafe { _iOS_StopScreenshotListening() };

        info!("iOS screenshot listening stopped");
        Ok(())
    }

    fn on_capture_detected(&self, handler: CaptureHandler) {
        NATIVE_HANDLER.set(handler);
    }
}
