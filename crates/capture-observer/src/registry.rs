//! Single-slot listener registration

use observer_protocol::{ListenerState, ListenerTarget, ValidationResult};
use parking_lot::RwLock;

#[derive(Default)]
struct Slot {
    target: Option<ListenerTarget>,
    /// Bumped every time the slot goes from occupied to empty
    session: u64,
}

impl Slot {
    fn set(&mut self, target: Option<ListenerTarget>) -> Option<ListenerTarget> {
        let previous = std::mem::replace(&mut self.target, target);
        if previous.is_some() && self.target.is_none() {
            self.session += 1;
        }
        previous
    }
}

/// Holds at most one [`ListenerTarget`].
///
/// Registering again replaces the previous target; the last writer wins.
/// Each uninterrupted stretch of listening is one session: replacing the
/// target keeps the session, clearing the slot ends it.
#[derive(Default)]
pub struct CaptureListenerRegistry {
    slot: RwLock<Slot>,
}

impl CaptureListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a target, returning the stored value
    pub fn register(
        &self,
        target_id: &str,
        callback_name: &str,
    ) -> ValidationResult<ListenerTarget> {
        let target = ListenerTarget::new(target_id, callback_name)?;
        self.slot.write().set(Some(target.clone()));
        Ok(target)
    }

    /// Overwrite the slot, returning what it held
    pub fn replace(&self, target: Option<ListenerTarget>) -> Option<ListenerTarget> {
        self.slot.write().set(target)
    }

    /// Remove the registration. Idempotent.
    pub fn clear(&self) -> Option<ListenerTarget> {
        self.slot.write().set(None)
    }

    pub fn current(&self) -> Option<ListenerTarget> {
        self.slot.read().target.clone()
    }

    /// Id of the running listening session, read together with the target
    pub fn session(&self) -> Option<u64> {
        let slot = self.slot.read();
        slot.target.as_ref().map(|_| slot.session)
    }

    /// Current target if it still belongs to `session`
    pub fn target_for(&self, session: u64) -> Option<ListenerTarget> {
        let slot = self.slot.read();
        if slot.session == session {
            slot.target.clone()
        } else {
            None
        }
    }

    pub fn is_listening(&self) -> bool {
        self.slot.read().target.is_some()
    }

    pub fn state(&self) -> ListenerState {
        if self.is_listening() {
            ListenerState::Listening
        } else {
            ListenerState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use observer_protocol::ValidationError;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_rejects_empty_fields() {
        let registry = CaptureListenerRegistry::new();

        assert_eq!(
            registry.register("", "OnShot"),
            Err(ValidationError::EmptyTargetId)
        );
        assert_eq!(
            registry.register("Rx", ""),
            Err(ValidationError::EmptyCallbackName)
        );
        assert_eq!(registry.state(), ListenerState::Idle);
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_invalid_register_keeps_existing_target() {
        let registry = CaptureListenerRegistry::new();
        registry.register("Rx", "OnShot").unwrap();

        assert!(registry.register("", "").is_err());
        assert_eq!(registry.current().unwrap().to_string(), "Rx.OnShot");
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = CaptureListenerRegistry::new();
        registry.register("First", "OnShot").unwrap();
        let second = registry.register("Second", "OnCapture").unwrap();

        assert_eq!(registry.current(), Some(second));
        assert_eq!(registry.state(), ListenerState::Listening);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let registry = CaptureListenerRegistry::new();
        assert!(registry.clear().is_none());

        let target = registry.register("Rx", "OnShot").unwrap();
        assert_eq!(registry.clear(), Some(target));
        assert!(registry.clear().is_none());
        assert!(registry.clear().is_none());
        assert_eq!(registry.state(), ListenerState::Idle);
    }

    #[test]
    fn test_replace_restores_previous() {
        let registry = CaptureListenerRegistry::new();
        let original = registry.register("Rx", "OnShot").unwrap();
        let previous = registry.current();

        registry.register("Other", "OnShot").unwrap();
        registry.replace(previous);

        assert_eq!(registry.current(), Some(original));
    }

    #[test]
    fn test_session_ends_on_clear_not_on_replace() {
        let registry = CaptureListenerRegistry::new();
        assert!(registry.session().is_none());

        registry.register("A", "OnShot").unwrap();
        let first = registry.session().unwrap();

        registry.register("B", "OnShot").unwrap();
        assert_eq!(registry.session(), Some(first));
        assert_eq!(registry.target_for(first).unwrap().target_id(), "B");

        registry.clear();
        registry.clear();
        registry.register("C", "OnShot").unwrap();
        let second = registry.session().unwrap();

        assert_ne!(first, second);
        assert!(registry.target_for(first).is_none());
        assert_eq!(registry.target_for(second).unwrap().target_id(), "C");
    }

    #[test]
    fn test_concurrent_reads_never_see_partial_target() {
        let registry = Arc::new(CaptureListenerRegistry::new());

        let writer = {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    if i % 2 == 0 {
                        registry.register("Rx", "OnShot").unwrap();
                    } else {
                        registry.clear();
                    }
                }
            })
        };

        for _ in 0..1000 {
            if let Some(target) = registry.current() {
                assert_eq!(target.target_id(), "Rx");
                assert_eq!(target.callback_name(), "OnShot");
            }
        }

        writer.join().unwrap();
    }
}
