pub mod api;
pub mod config;
pub mod generator;
pub mod models;
pub mod output;
pub mod poll;
pub mod views;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use models::{
    LedgerBlock, LiveThreat, ResponseLogEntry, Severity, SubmitThreat, ThreatEvent, ThreatStatus,
    ThreatType,
};
pub use output::{OutputFormat, OutputHandler, TelemetryEvent, TelemetrySink};
pub use poll::PollHandle;
pub use views::{
    AiModelsView, DashboardView, HistoryFilter, HistoryView, LedgerView, LiveThreatsView,
    NodeMonitor, ResponseLogView,
};
