//! Snapwatch Observer
//!
//! Composition root for the screen-capture observer. Drives the dispatcher
//! from a fixed-rate main loop and reads simulated native notifications from
//! stdin on a separate OS thread.

mod commands;
mod config;

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use capture_bridge::{NoopBridge, PlatformBridge, create_bridge};
use capture_observer::{CaptureDispatcher, MessageSink, NativeEventSink};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use commands::Command;
use config::ObserverConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snapwatch=debug".parse()?)
                .add_directive("capture_observer=debug".parse()?)
                .add_directive("capture_bridge=info".parse()?),
        )
        .init();

    let config = ObserverConfig::load(std::env::args_os().nth(1).map(PathBuf::from))?;
    info!("Starting Snapwatch observer: {:?}", config);

    let bridge: Box<dyn PlatformBridge> = if config.simulation {
        Box::new(NoopBridge::simulation())
    } else {
        create_bridge()
    };
    let dispatcher = CaptureDispatcher::new(bridge, Box::new(LogHost));

    if config.auto_start {
        // Failures are already logged by the dispatcher
        let _ = dispatcher.start(
            &config.target_id,
            &config.callback_name,
            config.bridge_config(),
        );
    }

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let sink = dispatcher.native_sink();
    std::thread::spawn(move || read_console(sink, cmd_tx));

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                dispatcher.pump();
            }
            cmd = cmd_rx.recv() => match cmd {
                Some(Command::Quit) | None => break,
                Some(cmd) => handle_command(&dispatcher, &config, cmd),
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let _ = dispatcher.stop();
    dispatcher.pump();

    let stats = dispatcher.stats();
    info!(
        "Observer shut down - received: {}, delivered: {}, dropped: {}",
        stats.received, stats.delivered, stats.dropped
    );

    Ok(())
}

/// Stands in for the host engine's object messaging
struct LogHost;

impl MessageSink for LogHost {
    fn send_message(&self, target_id: &str, method: &str, payload: &str) {
        info!("{}.{}({:?})", target_id, method, payload);
    }
}

/// Stdin reader. Captures go straight into the sink from this thread, the
/// way native callbacks arrive; everything else goes to the main loop.
fn read_console(sink: NativeEventSink, cmd_tx: mpsc::UnboundedSender<Command>) {
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Capture(event)) => {
                if !sink.deliver(event) {
                    info!("Capture ignored, not listening");
                }
            }
            Ok(cmd) => {
                if cmd_tx.send(cmd).is_err() {
                    break;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }

    debug!("Console closed");
    let _ = cmd_tx.send(Command::Quit);
}

fn handle_command(dispatcher: &CaptureDispatcher, config: &ObserverConfig, cmd: Command) {
    match cmd {
        Command::Start { target, config: bridge_config } => {
            let (target_id, callback_name) = target
                .unwrap_or_else(|| (config.target_id.clone(), config.callback_name.clone()));
            let bridge_config = bridge_config.unwrap_or_else(|| config.bridge_config());
            let _ = dispatcher.start(&target_id, &callback_name, bridge_config);
        }
        Command::Stop => {
            let _ = dispatcher.stop();
        }
        Command::Status => {
            let stats = dispatcher.stats();
            info!(
                "Platform: {}, state: {:?}, target: {}, pending: {}, received: {}, delivered: {}, dropped: {}",
                dispatcher.platform(),
                dispatcher.state(),
                dispatcher
                    .current_target()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                dispatcher.pending(),
                stats.received,
                stats.delivered,
                stats.dropped
            );
        }
        Command::Permission => {
            if dispatcher.has_media_permission() {
                info!("Media permission granted");
            } else {
                info!("Media permission missing, requesting");
                let _ = dispatcher.request_media_permission();
            }
        }
        // Handled before reaching the main loop
        Command::Capture(event) => {
            dispatcher.on_native_event(event);
        }
        Command::Quit => {}
    }
}
