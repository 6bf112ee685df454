//! Capture Bridge - Platform-native screen capture notifications for Snapwatch
//!
//! Provides abstraction over platform-specific capture detection:
//! - Android: `ScreenshotLifecycleObserver` through JNI
//! - iOS: the C-exported screenshot listener
//! - Everything else: a logging no-op

mod error;
mod handler;
mod noop;
mod traits;

#[cfg(target_os = "android")]
mod android;

#[cfg(target_os = "ios")]
mod ios;

pub use error::*;
pub use handler::*;
pub use noop::*;
pub use traits::*;

#[cfg(target_os = "android")]
pub use android::AndroidBridge;

#[cfg(target_os = "ios")]
pub use ios::IosBridge;

/// Create a platform-appropriate bridge.
///
/// Falls back to [`NoopBridge`] when the native side is unavailable, so the
/// host never has to handle a missing bridge.
pub fn create_bridge() -> Box<dyn PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        match AndroidBridge::new() {
            Ok(bridge) => Box::new(bridge),
            Err(e) => {
                tracing::warn!("Android bridge unavailable ({}), using no-op bridge", e);
                Box::new(NoopBridge::unsupported())
            }
        }
    }

    #[cfg(target_os = "ios")]
    {
        Box::new(IosBridge::new())
    }

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        Box::new(NoopBridge::unsupported())
    }
}
