//! Shared definitions for Snapwatch
//!
//! This crate contains the listener target, capture event and bridge
//! configuration types shared across the Snapwatch screen-capture observer.

mod config;
mod error;
mod event;
mod target;

pub use config::*;
pub use error::*;
pub use event::*;
pub use target::*;

/// Host object that receives capture callbacks when none is configured
pub const DEFAULT_TARGET_ID: &str = "NativeMsgRx";

/// Host method invoked on the target when none is configured
pub const DEFAULT_CALLBACK_NAME: &str = "OnScreenshotDetected";

/// Payload the Android 14+ screen-capture callback emits in place of a file path
pub const SCREEN_CAPTURE_SENTINEL: &str = "screenshot_detected";
