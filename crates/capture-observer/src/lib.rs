//! Capture Observer - main-thread delivery of screen capture notifications
//!
//! Tracks the single listener registration, forwards start/stop to the
//! platform bridge and hands native notifications to the host's object
//! messaging on the host's own thread.

mod dispatcher;
mod error;
mod host;
mod registry;

pub use dispatcher::*;
pub use error::*;
pub use host::*;
pub use registry::*;

pub use capture_bridge::{BridgeError, NoopBridge, PlatformBridge, create_bridge};
pub use observer_protocol::{
    BridgeConfig, CaptureEvent, DEFAULT_CALLBACK_NAME, DEFAULT_TARGET_ID, ListenerState,
    ListenerTarget, Platform, ValidationError,
};

/// Create a dispatcher backed by the platform-appropriate bridge
pub fn create_dispatcher(host: Box<dyn MessageSink>) -> CaptureDispatcher {
    CaptureDispatcher::new(create_bridge(), host)
}
