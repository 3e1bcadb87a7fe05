//! Threat history: a seeded batch with client-side search and severity
//! filtering. Filtering is pure and never mutates the retained sequence.

use rand::Rng;

use crate::generator;
use crate::models::threat::{Severity, ThreatEvent};
use crate::views::ViewPhase;

pub const DEFAULT_SEED_COUNT: usize = 50;

/// Filter settings. `severity: None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub search: String,
    pub severity: Option<Severity>,
}

impl HistoryFilter {
    fn matches(&self, threat: &ThreatEvent) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = threat.ip_address.to_lowercase().contains(&term)
            || threat.threat_type.as_str().to_lowercase().contains(&term);
        let matches_severity = match self.severity {
            None => true,
            Some(severity) => threat.severity == severity,
        };
        matches_search && matches_severity
    }
}

pub struct HistoryView {
    threats: Vec<ThreatEvent>,
    phase: ViewPhase,
}

impl HistoryView {
    pub fn new() -> Self {
        HistoryView {
            threats: Vec::new(),
            phase: ViewPhase::Uninitialized,
        }
    }

    pub fn seed(&mut self, rng: &mut impl Rng, count: usize) {
        self.threats = (0..count).map(|_| generator::random_threat(rng)).collect();
        self.phase = ViewPhase::Seeded;
    }

    pub fn teardown(&mut self) {
        self.phase = ViewPhase::TornDown;
    }

    pub fn threats(&self) -> &[ThreatEvent] {
        &self.threats
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// The retained threats that pass the filter, in retained order.
    pub fn filtered(&self, filter: &HistoryFilter) -> Vec<&ThreatEvent> {
        self.threats.iter().filter(|t| filter.matches(t)).collect()
    }
}

impl Default for HistoryView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::threat::{ThreatStatus, ThreatType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn threat(ip: &str, threat_type: ThreatType, severity: Severity) -> ThreatEvent {
        ThreatEvent {
            id: "abcdefghi".to_string(),
            time: "10:00:00".to_string(),
            threat_type,
            ip_address: ip.to_string(),
            severity,
            status: ThreatStatus::Monitoring,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut view = HistoryView::new();
        view.seed(&mut rng, DEFAULT_SEED_COUNT);

        let filtered = view.filtered(&HistoryFilter::default());
        assert_eq!(filtered.len(), view.threats().len());
        for (kept, original) in filtered.iter().zip(view.threats()) {
            assert_eq!(kept.id, original.id);
        }
    }

    #[test]
    fn test_search_matches_ip_or_type() {
        let mut view = HistoryView::new();
        view.threats = vec![
            threat("192.168.1.1", ThreatType::DDoS, Severity::High),
            threat("10.0.0.5", ThreatType::Phishing, Severity::Low),
        ];
        view.phase = ViewPhase::Seeded;

        let by_ip = view.filtered(&HistoryFilter {
            search: "192.168".to_string(),
            severity: None,
        });
        assert_eq!(by_ip.len(), 1);
        assert_eq!(by_ip[0].ip_address, "192.168.1.1");

        // Case-insensitive against the type name.
        let by_type = view.filtered(&HistoryFilter {
            search: "phish".to_string(),
            severity: None,
        });
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].threat_type, ThreatType::Phishing);
    }

    #[test]
    fn test_severity_filter_combines_with_search() {
        let mut view = HistoryView::new();
        view.threats = vec![
            threat("1.1.1.1", ThreatType::DDoS, Severity::High),
            threat("1.1.1.2", ThreatType::DDoS, Severity::Low),
            threat("2.2.2.2", ThreatType::Malware, Severity::High),
        ];
        view.phase = ViewPhase::Seeded;

        let filtered = view.filtered(&HistoryFilter {
            search: "ddos".to_string(),
            severity: Some(Severity::High),
        });
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].ip_address, "1.1.1.1");
    }

    #[test]
    fn test_filtering_does_not_mutate() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut view = HistoryView::new();
        view.seed(&mut rng, 20);
        let before: Vec<String> = view.threats().iter().map(|t| t.id.clone()).collect();

        let _ = view.filtered(&HistoryFilter {
            search: "no-such-term".to_string(),
            severity: Some(Severity::High),
        });

        let after: Vec<String> = view.threats().iter().map(|t| t.id.clone()).collect();
        assert_eq!(before, after);
    }
}
