//! Per-view polling presenters.
//!
//! Each view owns its retained record sequence and walks the same
//! lifecycle: `Uninitialized -> Seeded -> Polling -> TornDown`. Views never
//! share state; a torn-down view ignores further ticks.

pub mod ai_models;
pub mod dashboard;
pub mod history;
pub mod ledger;
pub mod live;
pub mod nodes;
pub mod response_logs;

pub use ai_models::AiModelsView;
pub use dashboard::{DashboardStats, DashboardView};
pub use history::{HistoryFilter, HistoryView};
pub use ledger::LedgerView;
pub use live::{FetchOutcome, FormError, LiveThreatsView, SubmitError};
pub use nodes::{NodeMonitor, NodeReport};
pub use response_logs::ResponseLogView;

/// Lifecycle of a view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Uninitialized,
    Seeded,
    Polling,
    TornDown,
}

/// Prepend a record and drop the oldest beyond `cap`.
pub(crate) fn push_front_capped<T>(records: &mut Vec<T>, record: T, cap: usize) {
    records.insert(0, record);
    records.truncate(cap);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_capped() {
        let mut records: Vec<u32> = (0..5).collect();
        push_front_capped(&mut records, 99, 5);
        assert_eq!(records, vec![99, 0, 1, 2, 3]);

        push_front_capped(&mut records, 100, 6);
        assert_eq!(records.len(), 6);
        assert_eq!(records[0], 100);
    }
}
