use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use meshwatch::config::Config;
use meshwatch::generator;
use meshwatch::views::{
    AiModelsView, HistoryFilter, HistoryView, LedgerView, LiveThreatsView, NodeMonitor,
};
use meshwatch::{ApiClient, Severity, SubmitThreat};

/// Cyber Defense Mesh Telemetry Command Line Interface
#[derive(StructOpt, Debug)]
#[structopt(name = "mesh", about = "Cyber defense mesh telemetry CLI")]
pub enum Cli {
    /// Validate a daemon configuration file
    Daemon {
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
    /// Generate and print sample records
    Generate {
        /// Record kind: threat, block, response, or node
        #[structopt(short, long, default_value = "threat")]
        kind: String,
        /// Number of records to generate
        #[structopt(short, long, default_value = "10")]
        count: usize,
        /// RNG seed for deterministic output
        #[structopt(short, long)]
        seed: Option<u64>,
    },
    /// Seed a threat history batch and filter it
    History {
        /// Search term matched against IP address and threat type
        #[structopt(short, long, default_value = "")]
        search: String,
        /// Severity filter: All, Critical, High, Medium, or Low
        #[structopt(long, default_value = "All")]
        severity: String,
        /// Batch size
        #[structopt(short, long, default_value = "50")]
        count: usize,
    },
    /// Fetch the live threat list once
    Fetch {
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Submit a threat for monitoring
    Submit {
        /// Source IP address (dotted quad)
        #[structopt(short, long)]
        ip: String,
        /// Threat type, e.g. "DDoS Attack" or "Ransomware"
        #[structopt(short = "t", long, default_value = "DDoS Attack")]
        threat_type: String,
        /// Severity: Critical, High, Medium, or Low
        #[structopt(long, default_value = "High")]
        severity: Severity,
        /// Protocol: TCP, UDP, HTTP, or HTTPS
        #[structopt(long, default_value = "TCP")]
        protocol: String,
        /// Target port
        #[structopt(short, long, default_value = "80")]
        port: u16,
        /// Additional details
        #[structopt(short, long, default_value = "")]
        description: String,
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Download a live threats PDF report
    Report {
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Show AI model status cards
    Models,
}

fn load_config(path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        Config::from_file(path)
    } else {
        eprintln!("Config file not found at {:?}, using defaults", path);
        Ok(Config::default())
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::from_args();

    match cli {
        Cli::Daemon { config } => {
            println!("Checking daemon config: {:?}", config);
            if config.exists() {
                let _config = Config::from_file(&config)?;
                println!("Configuration loaded successfully");
                println!("Use 'mesh_daemon' binary to run the daemon");
            } else {
                eprintln!("Configuration file not found: {:?}", config);
                eprintln!("Run 'mesh config' to generate a default configuration");
                std::process::exit(1);
            }
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Cli::Generate { kind, count, seed } => {
            let mut rng = make_rng(seed);
            match kind.as_str() {
                "threat" => {
                    for _ in 0..count {
                        let threat = generator::random_threat(&mut rng);
                        println!("{}", serde_json::to_string_pretty(&threat)?);
                    }
                }
                "block" => {
                    let mut ledger = LedgerView::new();
                    ledger.seed(&mut rng, count);
                    for block in ledger.blocks() {
                        println!("{}", serde_json::to_string_pretty(block)?);
                    }
                }
                "response" => {
                    for _ in 0..count {
                        let entry = generator::response_log(&mut rng);
                        println!("{}", serde_json::to_string_pretty(&entry)?);
                    }
                }
                "node" => {
                    let mut monitor = NodeMonitor::new();
                    monitor.seed(&mut rng);
                    for report in monitor.reports() {
                        println!("{}", serde_json::to_string_pretty(report)?);
                    }
                }
                other => {
                    eprintln!("Unknown record kind: {}", other);
                    eprintln!("Expected one of: threat, block, response, node");
                    std::process::exit(1);
                }
            }
        }
        Cli::History {
            search,
            severity,
            count,
        } => {
            let filter = HistoryFilter {
                search,
                severity: if severity.eq_ignore_ascii_case("all") {
                    None
                } else {
                    Some(severity.parse::<Severity>()?)
                },
            };

            let mut rng = StdRng::from_entropy();
            let mut view = HistoryView::new();
            view.seed(&mut rng, count);

            let filtered = view.filtered(&filter);
            println!(
                "Showing {} of {} threats:\n",
                filtered.len(),
                view.threats().len()
            );
            for threat in filtered {
                println!(
                    "  {} {} {} severity={} status={}",
                    threat.time,
                    threat.threat_type,
                    threat.ip_address,
                    threat.severity,
                    threat.status
                );
            }
        }
        Cli::Fetch { config } => {
            let config = load_config(&config)?;
            let api = ApiClient::new(
                &config.api.base_url,
                Duration::from_secs(config.api.request_timeout_secs),
            );

            match api.fetch_live_threats().await? {
                Some(threats) => {
                    println!("Fetched {} live threat(s):\n", threats.len());
                    for threat in &threats {
                        println!(
                            "  [{}] {} {} from {} status={}{}",
                            threat.threat_id,
                            threat.severity,
                            threat.threat_type,
                            threat.ip,
                            threat.status,
                            if threat.user_submitted {
                                " (user submitted)"
                            } else {
                                ""
                            }
                        );
                    }
                }
                None => println!("Server answered without a threat update"),
            }
        }
        Cli::Submit {
            ip,
            threat_type,
            severity,
            protocol,
            port,
            description,
            config,
        } => {
            let config = load_config(&config)?;
            let api = ApiClient::new(
                &config.api.base_url,
                Duration::from_secs(config.api.request_timeout_secs),
            );

            let mut view = LiveThreatsView::new();
            *view.form_mut() = SubmitThreat {
                ip,
                threat_type,
                severity,
                description,
                protocol,
                port,
            };

            let now = Instant::now();
            view.submit(&api, now).await?;
            if let Some(message) = view.notification(now) {
                println!("{}", message);
            }
            println!("Now monitoring {} live threat(s)", view.threats().len());
        }
        Cli::Report { config } => {
            let config = load_config(&config)?;
            let api = ApiClient::new(
                &config.api.base_url,
                Duration::from_secs(config.api.request_timeout_secs),
            );

            let path = api.download_report(&config.reports.dir).await?;
            println!("Report saved to: {:?}", path);
        }
        Cli::Models => {
            let view = AiModelsView::new();
            let overview = view.overview();
            println!(
                "Active models: {}  Average accuracy: {:.1}%  Training: {}\n",
                overview.active_models, overview.average_accuracy, overview.training
            );
            for model in view.models() {
                println!("  {} [{}]", model.name, model.training_status);
                println!(
                    "    type: {}  accuracy: {}%  last retrain: {}  dataset: {}",
                    model.model_type, model.accuracy, model.last_retrain, model.dataset
                );
            }
        }
    }

    Ok(())
}
