//! Storage for the installed capture handler

use observer_protocol::CaptureEvent;
use parking_lot::RwLock;
use tracing::debug;

use crate::CaptureHandler;

/// Holds at most one [`CaptureHandler`].
///
/// Native entry points are free functions, so platform modules keep one of
/// these in a `static`.
pub struct HandlerSlot {
    handler: RwLock<Option<CaptureHandler>>,
}

impl HandlerSlot {
    pub const fn new() -> Self {
        Self {
            handler: parking_lot::const_rwlock(None),
        }
    }

    /// Install a handler, replacing the previous one
    pub fn set(&self, handler: CaptureHandler) {
        *self.handler.write() = Some(handler);
    }

    pub fn clear(&self) {
        self.handler.write().take();
    }

    pub fn is_set(&self) -> bool {
        self.handler.read().is_some()
    }

    /// Deliver an event to the installed handler.
    ///
    /// Returns false when no handler is installed. The lock is released
    /// before the handler runs.
    pub fn emit(&self, event: CaptureEvent) -> bool {
        let handler = self.handler.read().clone();

        match handler {
            Some(handler) => {
                handler(event);
                true
            }
            None => {
                debug!("Capture notification without handler dropped: {:?}", event);
                false
            }
        }
    }
}

impl Default for HandlerSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_without_handler() {
        let slot = HandlerSlot::new();
        assert!(!slot.is_set());
        assert!(!slot.emit(CaptureEvent::without_path()));
    }

    #[test]
    fn test_emit_reaches_latest_handler() {
        let slot = HandlerSlot::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        slot.set(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let counter = second.clone();
        slot.set(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(slot.emit(CaptureEvent::with_path("/a.png")));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        slot.clear();
        assert!(!slot.emit(CaptureEvent::with_path("/b.png")));
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_may_replace_itself() {
        // Handler runs outside the lock, so re-entrant installs don't deadlock
        let slot = Arc::new(HandlerSlot::new());
        let inner = slot.clone();
        slot.set(Arc::new(move |_| {
            inner.set(Arc::new(|_| {}));
        }));

        assert!(slot.emit(CaptureEvent::without_path()));
        assert!(slot.is_set());
    }
}
