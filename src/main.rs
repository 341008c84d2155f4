use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use touchwake::actuation::{ActuationGate, GateSettings, TracingKeySink};
use touchwake::config::ConfigStore;
use touchwake::feed::FeedHandle;
use touchwake::gesture::{GestureRecognizer, ScreenState};
use touchwake::persistence::{default_settings_path, load_settings, save_settings};
use touchwake::script::{parse_line, Command};

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let settings_path = default_settings_path();
    let settings = match load_settings(&settings_path).await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring unreadable settings: {}", e);
            Default::default()
        }
    };
    let config = Arc::new(ConfigStore::new(settings));

    if let Some(value) = boot_override() {
        config.apply_boot_override(&value);
    }
    info!(
        "Starting with sweep2wake={:?} doubletap2wake={:?}",
        config.sweep_mode(),
        config.doubletap_mode()
    );

    let sink = Arc::new(TracingKeySink::new("gesture_s2w"));
    let (gate, _actuation_worker) = ActuationGate::spawn(sink, Some(GateSettings::default()));
    let recognizer = GestureRecognizer::new(config.clone(), gate);

    let (event_tx, event_rx) = mpsc::channel(256);
    let (screen_tx, screen_rx) = watch::channel(ScreenState::Awake);
    let (gesture_tx, mut gesture_rx) = mpsc::channel(16);
    let feed = FeedHandle::spawn(recognizer, event_rx, screen_rx, gesture_tx);

    let _observer = tokio::spawn(async move {
        while let Some(gesture) = gesture_rx.recv().await {
            info!("Gesture: {:?}", gesture);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        match command {
            Command::Touch(event) => event_tx
                .send(event)
                .await
                .map_err(|e| eyre!("Touch feed stopped: {}", e))?,
            Command::Screen(state) => {
                screen_tx.send_replace(state);
                info!("Screen {:?}", state);
            }
            // Invalid writes are logged by the store and otherwise ignored
            Command::WriteSweep(value) => {
                let _ = config.write_sweep_mode(&value);
            }
            Command::WriteDoubleTap(value) => {
                let _ = config.write_doubletap_mode(&value);
            }
            Command::Show => {
                print!("sweep2wake: {}", config.show_sweep_mode());
                print!("doubletap2wake: {}", config.show_doubletap_mode());
            }
            Command::Save => {
                if let Err(e) = save_settings(&settings_path, &config.snapshot()).await {
                    error!("Failed to save settings: {}", e);
                }
            }
        }
    }

    drop(event_tx);
    feed.join().await.map_err(|e| eyre!("{}", e))?;
    // Let a cycle scheduled by the last sample finish
    tokio::time::sleep(std::time::Duration::from_millis(
        2 * GateSettings::default().hold_ms,
    ))
    .await;
    info!("Input closed, shutting down");
    Ok(())
}

/// `S2W` environment variable or an `s2w=<n>` argument
fn boot_override() -> Option<String> {
    std::env::args()
        .skip(1)
        .find_map(|arg| arg.strip_prefix("s2w=").map(str::to_string))
        .or_else(|| std::env::var("S2W").ok())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}
