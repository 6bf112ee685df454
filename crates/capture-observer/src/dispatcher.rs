//! Capture dispatcher - from native notification to host callback
//!
//! Native code reports captures on whatever thread it likes. Those events are
//! queued by [`NativeEventSink`] and only reach the host when the host's main
//! loop calls [`CaptureDispatcher::pump`]. Every queued event carries the
//! listening session it arrived in, so nothing crosses a stop into the next
//! registration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use capture_bridge::{BridgeError, PlatformBridge};
use crossbeam_channel::{Receiver, Sender, unbounded};
use observer_protocol::{BridgeConfig, CaptureEvent, ListenerState, ListenerTarget, Platform};
use tracing::{debug, error, info, warn};

use crate::{CaptureListenerRegistry, MessageSink, ObserverResult};

/// Dispatch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Notifications reported by the native layer
    pub received: u64,
    /// Callbacks invoked on the host
    pub delivered: u64,
    /// Notifications discarded because nobody was listening
    pub dropped: u64,
}

#[derive(Default)]
struct DispatchCounters {
    received: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl DispatchCounters {
    fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            received: self.received.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Event tagged with the listening session it was reported in
type QueuedEvent = (u64, CaptureEvent);

/// Thread-safe handle native callbacks use to report captures
#[derive(Clone)]
pub struct NativeEventSink {
    registry: Arc<CaptureListenerRegistry>,
    events_tx: Sender<QueuedEvent>,
    counters: Arc<DispatchCounters>,
}

impl NativeEventSink {
    /// Queue an event for the main thread.
    ///
    /// Returns false when the event was dropped because no listener is
    /// registered or the dispatcher is gone.
    pub fn deliver(&self, event: CaptureEvent) -> bool {
        self.counters.received.fetch_add(1, Ordering::Relaxed);

        let Some(session) = self.registry.session() else {
            debug!("Capture event dropped, no listener registered: {:?}", event);
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        };

        if self.events_tx.send((session, event)).is_err() {
            debug!("Capture event dropped, dispatcher shut down");
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        true
    }
}

/// Relays start/stop to the platform bridge and capture events to the host
pub struct CaptureDispatcher {
    registry: Arc<CaptureListenerRegistry>,
    bridge: Box<dyn PlatformBridge>,
    host: Box<dyn MessageSink>,
    sink: NativeEventSink,
    events_rx: Receiver<QueuedEvent>,
    counters: Arc<DispatchCounters>,
}

impl CaptureDispatcher {
    /// Wire `bridge` notifications into a new dispatcher
    pub fn new(bridge: Box<dyn PlatformBridge>, host: Box<dyn MessageSink>) -> Self {
        let registry = Arc::new(CaptureListenerRegistry::new());
        let counters = Arc::new(DispatchCounters::default());
        let (events_tx, events_rx) = unbounded();

        let sink = NativeEventSink {
            registry: registry.clone(),
            events_tx,
            counters: counters.clone(),
        };

        let handler_sink = sink.clone();
        bridge.on_capture_detected(Arc::new(move |event| {
            handler_sink.deliver(event);
        }));

        info!("Capture dispatcher ready on platform {}", bridge.platform());

        Self {
            registry,
            bridge,
            host,
            sink,
            events_rx,
            counters,
        }
    }

    /// Register `target_id.callback_name` and start native listening.
    ///
    /// Errors are logged here; the returned error is informational. A second
    /// start while listening replaces the target. If the native call fails
    /// the previous registration is kept.
    pub fn start(
        &self,
        target_id: &str,
        callback_name: &str,
        config: BridgeConfig,
    ) -> ObserverResult<()> {
        let previous = self.registry.current();

        let target = match self.registry.register(target_id, callback_name) {
            Ok(target) => target,
            Err(e) => {
                error!(
                    "Start listening failed - target_id = {:?}, callback_name = {:?}: {}",
                    target_id, callback_name, e
                );
                return Err(e.into());
            }
        };

        if let Some(previous) = &previous {
            if *previous != target {
                debug!("Replacing listener {} with {}", previous, target);
            }
        }

        match self.bridge.start(&target, &config) {
            Ok(()) => {
                info!("Listening for screen captures - target: {}", target);
                Ok(())
            }
            Err(BridgeError::UnsupportedPlatform) => {
                warn!("Start listening not supported on this platform - target: {}", target);
                Ok(())
            }
            Err(e) => {
                error!("Start listening failed - target: {}: {}", target, e);
                self.registry.replace(previous);
                Err(e.into())
            }
        }
    }

    /// Stop native listening, clear the registration and discard events
    /// still waiting for a pump.
    ///
    /// The registration is cleared even when the native call fails.
    pub fn stop(&self) -> ObserverResult<()> {
        let result = self.bridge.stop();

        match self.registry.clear() {
            Some(target) => info!("Stopped listening - target: {}", target),
            None => debug!("Stop requested while idle"),
        }

        let discarded = self.events_rx.try_iter().count();
        if discarded > 0 {
            debug!("Discarded {} capture events queued before stop", discarded);
            self.counters
                .dropped
                .fetch_add(discarded as u64, Ordering::Relaxed);
        }

        match result {
            Ok(()) => Ok(()),
            Err(BridgeError::UnsupportedPlatform) => {
                warn!("Stop listening not supported on this platform");
                Ok(())
            }
            Err(e) => {
                error!("Stop listening failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Report a capture as the native layer would. Callable from any thread.
    pub fn on_native_event(&self, event: CaptureEvent) -> bool {
        self.sink.deliver(event)
    }

    /// Handle for native callbacks living outside the bridge
    pub fn native_sink(&self) -> NativeEventSink {
        self.sink.clone()
    }

    /// Deliver queued events to the host. Call from the host's main loop.
    ///
    /// Events queued while this runs wait for the next call. Each event goes
    /// to the target registered at delivery time, provided the session it
    /// was reported in is still running; anything else is dropped. Returns
    /// the number delivered.
    pub fn pump(&self) -> usize {
        let pending = self.events_rx.len();
        let mut delivered = 0;

        for _ in 0..pending {
            let Ok((session, event)) = self.events_rx.try_recv() else {
                break;
            };

            let Some(target) = self.registry.target_for(session) else {
                debug!("Capture event dropped, listener stopped: {:?}", event);
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                continue;
            };

            debug!("Invoking {}({:?})", target, event.callback_payload());
            self.host.send_message(
                target.target_id(),
                target.callback_name(),
                event.callback_payload(),
            );
            delivered += 1;
        }

        self.counters
            .delivered
            .fetch_add(delivered as u64, Ordering::Relaxed);
        delivered
    }

    pub fn state(&self) -> ListenerState {
        self.registry.state()
    }

    pub fn current_target(&self) -> Option<ListenerTarget> {
        self.registry.current()
    }

    pub fn platform(&self) -> Platform {
        self.bridge.platform()
    }

    /// Events waiting for the next pump
    pub fn pending(&self) -> usize {
        self.events_rx.len()
    }

    pub fn stats(&self) -> DispatchStats {
        self.counters.snapshot()
    }

    /// Whether the legacy detection strategy may read the media store
    pub fn has_media_permission(&self) -> bool {
        self.bridge.has_media_permission()
    }

    /// Ask the user for media-read permission; start again once granted
    pub fn request_media_permission(&self) -> ObserverResult<()> {
        self.bridge.request_media_permission().map_err(|e| {
            error!("Media permission request failed: {}", e);
            e.into()
        })
    }
}
