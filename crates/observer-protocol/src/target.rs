//! Listener registration types

use serde::{Deserialize, Serialize};

use crate::{ValidationError, ValidationResult};

/// Host object and method that receive capture notifications
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawListenerTarget")]
pub struct ListenerTarget {
    target_id: String,
    callback_name: String,
}

impl ListenerTarget {
    /// Build a target, rejecting empty identifiers
    pub fn new(
        target_id: impl Into<String>,
        callback_name: impl Into<String>,
    ) -> ValidationResult<Self> {
        let target_id = target_id.into();
        let callback_name = callback_name.into();

        if target_id.is_empty() {
            return Err(ValidationError::EmptyTargetId);
        }
        if callback_name.is_empty() {
            return Err(ValidationError::EmptyCallbackName);
        }

        Ok(Self {
            target_id,
            callback_name,
        })
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn callback_name(&self) -> &str {
        &self.callback_name
    }
}

/// Unvalidated wire form; deserialization goes through [`ListenerTarget::new`]
#[derive(Deserialize)]
struct RawListenerTarget {
    target_id: String,
    callback_name: String,
}

impl TryFrom<RawListenerTarget> for ListenerTarget {
    type Error = ValidationError;

    fn try_from(raw: RawListenerTarget) -> ValidationResult<Self> {
        Self::new(raw.target_id, raw.callback_name)
    }
}

impl std::fmt::Display for ListenerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.target_id, self.callback_name)
    }
}

/// Listening state of the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListenerState {
    /// No target registered
    Idle,
    /// A target is registered and native detection was requested
    Listening,
}

impl Default for ListenerState {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rejects_empty_fields() {
        assert_eq!(
            ListenerTarget::new("", "OnShot"),
            Err(ValidationError::EmptyTargetId)
        );
        assert_eq!(
            ListenerTarget::new("Rx", ""),
            Err(ValidationError::EmptyCallbackName)
        );
        // Target id is checked first
        assert_eq!(
            ListenerTarget::new("", ""),
            Err(ValidationError::EmptyTargetId)
        );
    }

    #[test]
    fn test_target_display() {
        let target = ListenerTarget::new("Rx", "OnShot").unwrap();
        assert_eq!(target.target_id(), "Rx");
        assert_eq!(target.callback_name(), "OnShot");
        assert_eq!(target.to_string(), "Rx.OnShot");
    }

    #[test]
    fn test_target_deserialize_validates() {
        let target: ListenerTarget =
            serde_json::from_str(r#"{"target_id":"Rx","callback_name":"OnShot"}"#).unwrap();
        assert_eq!(target, ListenerTarget::new("Rx", "OnShot").unwrap());

        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, r#"{"target_id":"Rx","callback_name":"OnShot"}"#);

        let err = serde_json::from_str::<ListenerTarget>(
            r#"{"target_id":"","callback_name":"OnShot"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Target id must not be empty"));

        assert!(
            serde_json::from_str::<ListenerTarget>(r#"{"target_id":"Rx","callback_name":""}"#)
                .is_err()
        );
    }
}
