//! Platform bridge trait abstraction

use std::sync::Arc;

use observer_protocol::{BridgeConfig, CaptureEvent, ListenerTarget, Platform};

use crate::BridgeResult;

/// Callback the native layer invokes when the screen was captured.
///
/// May run on any thread.
pub type CaptureHandler = Arc<dyn Fn(CaptureEvent) + Send + Sync>;

/// Platform bridge trait
pub trait PlatformBridge: Send + Sync {
    /// Platform this bridge talks to
    fn platform(&self) -> Platform;

    /// Ask the native layer to start listening for captures.
    ///
    /// Every call reaches the native side; replacing or ignoring a running
    /// listener is up to the platform code.
    fn start(&self, target: &ListenerTarget, config: &BridgeConfig) -> BridgeResult<()>;

    /// Ask the native layer to stop listening. Succeeds when not listening.
    fn stop(&self) -> BridgeResult<()>;

    /// Install the handler native notifications are delivered to
    fn on_capture_detected(&self, handler: CaptureHandler);

    /// Check the media-read permission the legacy detection strategy needs
    fn has_media_permission(&self) -> bool {
        true
    }

    /// Request the media-read permission (may show a system dialog)
    fn request_media_permission(&self) -> BridgeResult<()> {
        Ok(())
    }
}
