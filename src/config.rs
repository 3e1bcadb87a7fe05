use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the meshwatch daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Dashboard threat feed configuration
    pub dashboard: DashboardConfig,
    /// Threat history configuration
    pub history: HistoryConfig,
    /// Ledger configuration
    pub ledger: LedgerConfig,
    /// Automated response log configuration
    pub response_logs: ResponseLogsConfig,
    /// Node monitor configuration
    pub nodes: NodesConfig,
    /// Telemetry output configuration
    pub output: OutputConfig,
    /// Report export configuration
    pub reports: ReportsConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. "http://localhost:5001/api"
    pub base_url: String,
    /// Live threat poll period in seconds
    pub poll_interval_secs: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Dashboard threat feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Initial batch size
    pub seed_count: usize,
    /// Most-recent threats retained for display
    pub cap: usize,
    /// Generation period in seconds
    pub refresh_interval_secs: u64,
}

/// Threat history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Historical batch size
    pub seed_count: usize,
}

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Blocks created at startup
    pub seed_count: usize,
}

/// Automated response log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseLogsConfig {
    /// Initial batch size
    pub seed_count: usize,
    /// Most-recent entries retained
    pub cap: usize,
}

/// Node monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodesConfig {
    /// Metric re-sample period in seconds
    pub sync_interval_secs: u64,
}

/// Telemetry output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "json", "jsonl", or "console"
    pub format: String,
    /// Output file path (if format is not "console")
    pub file_path: Option<PathBuf>,
}

/// Report export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Directory downloaded reports are written to
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: "http://localhost:5001/api".to_string(),
                poll_interval_secs: 5,
                request_timeout_secs: 30,
            },
            dashboard: DashboardConfig {
                seed_count: 10,
                cap: 15,
                refresh_interval_secs: 10,
            },
            history: HistoryConfig { seed_count: 50 },
            ledger: LedgerConfig { seed_count: 20 },
            response_logs: ResponseLogsConfig {
                seed_count: 30,
                cap: 50,
            },
            nodes: NodesConfig {
                sync_interval_secs: 5,
            },
            output: OutputConfig {
                format: "console".to_string(),
                file_path: None,
            },
            reports: ReportsConfig {
                dir: PathBuf::from("reports"),
            },
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_views() {
        let config = Config::default();
        assert_eq!(config.api.poll_interval_secs, 5);
        assert_eq!(config.dashboard.seed_count, 10);
        assert_eq!(config.dashboard.cap, 15);
        assert_eq!(config.dashboard.refresh_interval_secs, 10);
        assert_eq!(config.history.seed_count, 50);
        assert_eq!(config.ledger.seed_count, 20);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://mesh.internal/api".to_string();
        config.output.format = "jsonl".to_string();
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, "http://mesh.internal/api");
        assert_eq!(loaded.output.format, "jsonl");
        assert_eq!(loaded.response_logs.cap, 50);
    }
}
