pub mod ai;
pub mod ledger;
pub mod node;
pub mod response;
pub mod threat;

pub use ai::{ModelOverview, ModelStatus, TrainingStatus};
pub use ledger::LedgerBlock;
pub use node::{Node, NodeHealth, NodeStatus};
pub use response::ResponseLogEntry;
pub use threat::{LiveThreat, Severity, SubmitThreat, ThreatEvent, ThreatStatus, ThreatType};
