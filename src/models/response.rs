use serde::{Deserialize, Serialize};

use crate::models::threat::{Severity, ThreatType};

/// Actions shown in the automated response log.
pub const RESPONSE_ACTIONS: [&str; 7] = [
    "IP Address Blocked",
    "Traffic Isolated to Quarantine",
    "Firewall Rule Updated",
    "Alert Sent to Administrator",
    "Connection Terminated",
    "Port Closed",
    "Access Denied",
];

/// Actions the automated responder may take for a given severity.
/// Low-severity threats never trigger an automated action.
pub fn actions_for_severity(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Critical => &[
            "IP Blocked",
            "Firewall Rule Updated",
            "Port Closed",
            "Session Terminated",
        ],
        Severity::High => &["IP Blocked", "Firewall Rule Updated", "Alert Sent"],
        Severity::Medium => &["Traffic Throttled", "Rate Limit Applied", "Alert Sent"],
        Severity::Low => &[],
    }
}

/// One entry in the automated response log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLogEntry {
    pub id: String,
    pub action: String,
    pub triggered_by: ThreatType,
    /// Local datetime string, `YYYY-MM-DD HH:MM:SS`.
    pub time: String,
    pub ip_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_severity_has_an_action_table() {
        assert_eq!(actions_for_severity(Severity::Critical).len(), 4);
        assert_eq!(actions_for_severity(Severity::High).len(), 3);
        assert_eq!(actions_for_severity(Severity::Medium).len(), 3);
        assert!(actions_for_severity(Severity::Low).is_empty());
    }

    #[test]
    fn test_entry_wire_fields() {
        let entry = ResponseLogEntry {
            id: "x9y8z7w6v".to_string(),
            action: "Port Closed".to_string(),
            triggered_by: ThreatType::Malware,
            time: "2026-08-04 10:15:00".to_string(),
            ip_address: "198.51.100.23".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"triggeredBy\":\"Malware\""));
        assert!(json.contains("\"ipAddress\":\"198.51.100.23\""));
    }
}
