//! Observer error types

use capture_bridge::BridgeError;
use observer_protocol::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("Invalid listener: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

pub type ObserverResult<T> = Result<T, ObserverError>;
