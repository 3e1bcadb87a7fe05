use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;

use meshwatch::config::Config;
use meshwatch::output::{run_writer, OutputFormat, OutputHandler, TelemetryEvent, TelemetrySink};
use meshwatch::poll::{spawn_interval, PollHandle};
use meshwatch::views::{
    DashboardView, FetchOutcome, LedgerView, LiveThreatsView, NodeMonitor, ResponseLogView,
};
use meshwatch::ApiClient;

/// Main daemon entry point for the mesh telemetry simulator
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting meshwatch daemon...");

    // Load configuration
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        log::warn!("Config file not found, using defaults");
        Config::default()
    };

    // Setup graceful shutdown signal handling
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal, gracefully stopping...");
        let _ = shutdown_tx.send(true);
    })?;

    // Initialize telemetry output
    let output_format = OutputFormat::from_str(&config.output.format);
    let output_handler = OutputHandler::new(output_format, config.output.file_path.clone())?;
    let (sink, rx) = TelemetrySink::channel();
    let writer = tokio::spawn(run_writer(output_handler, rx));

    // Seed the generated views once before polling begins
    let mut rng = StdRng::from_entropy();
    let mut dashboard = DashboardView::new(config.dashboard.cap);
    dashboard.seed(&mut rng, config.dashboard.seed_count);
    let mut ledger = LedgerView::new();
    ledger.seed(&mut rng, config.ledger.seed_count);
    let mut responses = ResponseLogView::new(config.response_logs.cap);
    responses.seed(&mut rng, config.response_logs.seed_count);
    let mut nodes = NodeMonitor::new();
    nodes.seed(&mut rng);

    log::info!(
        "Seeded {} threats, {} ledger blocks ({}), {} response logs",
        dashboard.threats().len(),
        ledger.total_blocks(),
        ledger.consensus_label(),
        responses.logs().len()
    );
    sink.send(TelemetryEvent::Stats(dashboard.stats()));

    // Threat generator loop: one threat per tick, plus its ledger block
    // and automated response
    let generator_handle = {
        let sink = sink.clone();
        let mut rng = StdRng::from_entropy();
        let period = Duration::from_secs(config.dashboard.refresh_interval_secs);
        spawn_interval(period, move || {
            if let Some(threat) = dashboard.tick(&mut rng) {
                sink.send(TelemetryEvent::Threat(threat.clone()));
                if let Some(block) = ledger.append(&mut rng) {
                    sink.send(TelemetryEvent::Block(block.clone()));
                }
                if let Some(entry) = responses.respond_to(&mut rng, &threat) {
                    sink.send(TelemetryEvent::Response(entry));
                }
                sink.send(TelemetryEvent::Stats(dashboard.stats()));
            }
        })
    };

    // Live threats poll loop. The first fetch fires immediately; poll
    // failures keep the previous list on display.
    let live_handle = {
        let sink = sink.clone();
        let api = ApiClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.request_timeout_secs),
        );
        let period = Duration::from_secs(config.api.poll_interval_secs);
        let (tx, mut rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut view = LiveThreatsView::new();
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match view.refresh(&api).await {
                            Ok(FetchOutcome::Applied(count)) => {
                                log::debug!("Live threat list replaced ({} threats)", count);
                                sink.send(TelemetryEvent::LiveThreats {
                                    threats: view.threats().to_vec(),
                                });
                            }
                            Ok(outcome) => log::debug!("Live threat poll: {:?}", outcome),
                            Err(e) => log::error!("Live threat poll failed: {}", e),
                        }
                    }
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                }
            }
            view.teardown();
        });
        PollHandle::new(tx, task)
    };

    // Node sync loop
    let nodes_handle = {
        let sink = sink.clone();
        let mut rng = StdRng::from_entropy();
        let period = Duration::from_secs(config.nodes.sync_interval_secs);
        spawn_interval(period, move || {
            if nodes.resync(&mut rng) {
                sink.send(TelemetryEvent::NodeSync {
                    last_sync: nodes.last_sync().to_string(),
                    nodes: nodes.reports().to_vec(),
                });
            }
        })
    };

    log::info!("Polling loops started. Press Ctrl+C to stop.");
    let _ = shutdown_rx.changed().await;

    generator_handle.stop().await;
    live_handle.stop().await;
    nodes_handle.stop().await;
    drop(sink);
    let _ = writer.await;

    log::info!("Meshwatch daemon stopped");
    Ok(())
}
