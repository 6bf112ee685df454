//! Logging-only bridge for platforms without native capture detection

use observer_protocol::{BridgeConfig, CaptureEvent, ListenerTarget, Platform};
use tracing::{info, warn};

use crate::{BridgeResult, CaptureHandler, HandlerSlot, PlatformBridge};

/// Bridge that never reaches native code.
///
/// `simulation()` is meant for editor and desktop runs where the host feeds
/// events by hand; `unsupported()` is the fallback for platforms with no
/// implementation and logs at warn level.
pub struct NoopBridge {
    simulated: bool,
    handler: HandlerSlot,
}

impl NoopBridge {
    pub fn simulation() -> Self {
        Self {
            simulated: true,
            handler: HandlerSlot::new(),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            simulated: false,
            handler: HandlerSlot::new(),
        }
    }

    pub fn is_simulation(&self) -> bool {
        self.simulated
    }

    /// Push an event through the installed handler as if native code had
    /// reported it
    pub fn emit(&self, event: CaptureEvent) -> bool {
        self.handler.emit(event)
    }
}

impl PlatformBridge for NoopBridge {
    fn platform(&self) -> Platform {
        Platform::Unsupported
    }

    fn start(&self, target: &ListenerTarget, config: &BridgeConfig) -> BridgeResult<()> {
        if self.simulated {
            info!(
                "Start listening in simulation - target: {}, legacy detection: {}",
                target, config.use_legacy_detection
            );
        } else {
            warn!("Start listening not supported on this platform - target: {}", target);
        }
        Ok(())
    }

    fn stop(&self) -> BridgeResult<()> {
        if self.simulated {
            info!("Stop listening in simulation");
        } else {
            warn!("Stop listening not supported on this platform");
        }
        Ok(())
    }

    fn on_capture_detected(&self, handler: CaptureHandler) {
        self.handler.set(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_noop_start_stop_never_fail() {
        let target = ListenerTarget::new("Rx", "OnShot").unwrap();

        for bridge in [NoopBridge::simulation(), NoopBridge::unsupported()] {
            assert!(bridge.start(&target, &BridgeConfig::default()).is_ok());
            assert!(bridge.start(&target, &BridgeConfig::default()).is_ok());
            assert!(bridge.stop().is_ok());
            assert!(bridge.stop().is_ok());
            assert_eq!(bridge.platform(), Platform::Unsupported);
            assert!(bridge.has_media_permission());
            assert!(bridge.request_media_permission().is_ok());
        }
    }

    #[test]
    fn test_simulated_emit_reaches_handler() {
        let bridge = NoopBridge::simulation();
        assert!(bridge.is_simulation());
        assert!(!bridge.emit(CaptureEvent::with_path("/dropped.png")));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bridge.on_capture_detected(Arc::new(move |event| sink.lock().push(event)));

        assert!(bridge.emit(CaptureEvent::with_path("/sdcard/img.png")));
        assert_eq!(
            seen.lock().as_slice(),
            &[CaptureEvent::with_path("/sdcard/img.png")]
        );
    }
}
