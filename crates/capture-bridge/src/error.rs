//! Bridge error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Native call {call} failed: {reason}")]
    NativeCallFailed { call: &'static str, reason: String },

    #[error("Platform not supported")]
    UnsupportedPlatform,

    #[error("Native runtime not initialized")]
    NotInitialized,
}

impl BridgeError {
    pub fn native(call: &'static str, reason: impl ToString) -> Self {
        Self::NativeCallFailed {
            call,
            reason: reason.to_string(),
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
