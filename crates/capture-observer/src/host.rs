//! Host object messaging seam

/// The host's "invoke method by name on object by name" facility.
///
/// Called only from [`CaptureDispatcher::pump`](crate::CaptureDispatcher::pump),
/// i.e. on the host's main thread.
pub trait MessageSink: Send + Sync {
    fn send_message(&self, target_id: &str, method: &str, payload: &str);
}

impl<F> MessageSink for F
where
    F: Fn(&str, &str, &str) + Send + Sync,
{
    fn send_message(&self, target_id: &str, method: &str, payload: &str) {
        self(target_id, method, payload)
    }
}
