//! Telemetry output.
//!
//! Polling loops funnel events through an mpsc channel into a single
//! writer task, which renders them as pretty JSON, JSONL, or console lines
//! to stdout or an append-only file.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::models::ledger::LedgerBlock;
use crate::models::response::ResponseLogEntry;
use crate::models::threat::{LiveThreat, ThreatEvent};
use crate::views::dashboard::DashboardStats;
use crate::views::nodes::NodeReport;

/// One record emitted by a polling loop.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TelemetryEvent {
    Threat(ThreatEvent),
    Stats(DashboardStats),
    Block(LedgerBlock),
    Response(ResponseLogEntry),
    LiveThreats { threats: Vec<LiveThreat> },
    NodeSync { last_sync: String, nodes: Vec<NodeReport> },
}

#[derive(Debug, Clone)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Console,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            "console" => OutputFormat::Console,
            _ => OutputFormat::Jsonl, // Default
        }
    }
}

/// Writer for telemetry events
pub struct OutputHandler {
    format: OutputFormat,
    writer: Option<Box<dyn Write + Send>>,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new(
        format: OutputFormat,
        file_path: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let writer: Option<Box<dyn Write + Send>> = match (&format, file_path) {
            (OutputFormat::Console, _) => None,
            (_, Some(path)) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(Box::new(BufWriter::new(file)))
            }
            (_, None) => None,
        };

        Ok(OutputHandler { format, writer })
    }

    /// Write one telemetry event
    pub fn write_event(
        &mut self,
        event: &TelemetryEvent,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(event)?;
                self.write_output(&format!("{}\n", json))?;
            }
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(event)?;
                self.write_output(&format!("{}\n", json))?;
            }
            OutputFormat::Console => {
                self.write_output(&format!("{}\n", Self::console_line(event)))?;
            }
        }
        Ok(())
    }

    fn console_line(event: &TelemetryEvent) -> String {
        match event {
            TelemetryEvent::Threat(t) => format!(
                "[THREAT] {} {} from {} severity={} status={}",
                t.time, t.threat_type, t.ip_address, t.severity, t.status
            ),
            TelemetryEvent::Stats(s) => format!(
                "[STATS] today total={} high={} medium={} low={}",
                s.total, s.high, s.medium, s.low
            ),
            TelemetryEvent::Block(b) => format!(
                "[BLOCK] #{} type={} hash={} verified={}",
                b.block_number, b.threat_type, b.current_hash, b.verified
            ),
            TelemetryEvent::Response(r) => format!(
                "[RESPONSE] {} triggered_by={} ip={}",
                r.action, r.triggered_by, r.ip_address
            ),
            TelemetryEvent::LiveThreats { threats } => {
                format!("[LIVE] {} threats in view", threats.len())
            }
            TelemetryEvent::NodeSync { last_sync, nodes } => {
                let summary: Vec<String> = nodes
                    .iter()
                    .map(|n| {
                        format!(
                            "{} cpu={:.1}% mem={:.1}%",
                            n.node.name, n.health.cpu_percent, n.health.memory_percent
                        )
                    })
                    .collect();
                format!("[NODES] sync {} | {}", last_sync, summary.join(", "))
            }
        }
    }

    fn write_output(&mut self, data: &str) -> Result<(), Box<dyn std::error::Error>> {
        match &mut self.writer {
            Some(writer) => {
                writer.write_all(data.as_bytes())?;
                writer.flush()?;
            }
            None => {
                print!("{}", data);
                use std::io::{self, Write};
                io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(writer) = &mut self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Sync-friendly sender for queueing telemetry from polling loops.
///
/// Uses try_send so ticks never block on the writer. If the channel is
/// full the event is dropped with a warning.
#[derive(Clone)]
pub struct TelemetrySink {
    tx: mpsc::Sender<TelemetryEvent>,
}

impl TelemetrySink {
    pub fn channel() -> (TelemetrySink, mpsc::Receiver<TelemetryEvent>) {
        let (tx, rx) = mpsc::channel(100);
        (TelemetrySink { tx }, rx)
    }

    pub fn send(&self, event: TelemetryEvent) {
        if let Err(e) = self.tx.try_send(event) {
            match e {
                mpsc::error::TrySendError::Full(_) => {
                    log::warn!("Telemetry queue full, dropping event");
                }
                mpsc::error::TrySendError::Closed(_) => {
                    log::warn!("Telemetry queue closed");
                }
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Writer task: drains the channel until every sink is dropped.
pub async fn run_writer(mut handler: OutputHandler, mut rx: mpsc::Receiver<TelemetryEvent>) {
    log::info!("Telemetry writer started");
    while let Some(event) = rx.recv().await {
        if let Err(e) = handler.write_event(&event) {
            log::error!("Failed to write telemetry event: {}", e);
        }
    }
    if let Err(e) = handler.flush() {
        log::error!("Failed to flush telemetry output: {}", e);
    }
    log::info!("Telemetry writer stopped");
}
