//! Capture notification payloads

use serde::{Deserialize, Serialize};

use crate::SCREEN_CAPTURE_SENTINEL;

/// A single screen capture notification from the native layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureEvent {
    /// Path of the saved screenshot, when the platform can supply one
    pub file_path: Option<String>,
}

impl CaptureEvent {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            file_path: Some(path.into()),
        }
    }

    pub fn without_path() -> Self {
        Self { file_path: None }
    }

    /// Normalize a raw payload received from native code.
    ///
    /// Null, empty and the screen-capture sentinel all mean "captured, no path".
    pub fn from_native(raw: Option<&str>) -> Self {
        match raw {
            Some(path) if !path.is_empty() && path != SCREEN_CAPTURE_SENTINEL => {
                Self::with_path(path)
            }
            _ => Self::without_path(),
        }
    }

    pub fn has_path(&self) -> bool {
        self.file_path.is_some()
    }

    /// String handed to the host callback; never null
    pub fn callback_payload(&self) -> &str {
        self.file_path.as_deref().unwrap_or("")
    }
}
