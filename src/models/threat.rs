use serde::{Deserialize, Serialize};
use std::fmt;

/// Threat categories used by the client-side generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatType {
    DDoS,
    Malware,
    #[serde(rename = "Brute Force")]
    BruteForce,
    Phishing,
}

impl ThreatType {
    pub const ALL: [ThreatType; 4] = [
        ThreatType::DDoS,
        ThreatType::Malware,
        ThreatType::BruteForce,
        ThreatType::Phishing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatType::DDoS => "DDoS",
            ThreatType::Malware => "Malware",
            ThreatType::BruteForce => "Brute Force",
            ThreatType::Phishing => "Phishing",
        }
    }
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency label attached to a threat. Critical only appears on
/// user-submitted or server-sourced threats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// The subset the local generator draws from.
    pub const GENERATED: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// Handling state of a threat. Mitigated only appears on server-sourced
/// threats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatStatus {
    Blocked,
    Isolated,
    Monitoring,
    Mitigated,
}

impl ThreatStatus {
    /// The subset the local generator draws from.
    pub const GENERATED: [ThreatStatus; 3] = [
        ThreatStatus::Blocked,
        ThreatStatus::Isolated,
        ThreatStatus::Monitoring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatStatus::Blocked => "Blocked",
            ThreatStatus::Isolated => "Isolated",
            ThreatStatus::Monitoring => "Monitoring",
            ThreatStatus::Mitigated => "Mitigated",
        }
    }
}

impl fmt::Display for ThreatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locally generated threat event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatEvent {
    pub id: String,
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
    pub threat_type: ThreatType,
    pub ip_address: String,
    pub severity: Severity,
    pub status: ThreatStatus,
    /// Epoch milliseconds at generation time.
    pub timestamp: i64,
}

/// A threat as reported by the backend API. The type vocabulary is
/// server-controlled, so it stays a free string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveThreat {
    pub threat_id: String,
    #[serde(rename = "type")]
    pub threat_type: String,
    pub severity: Severity,
    pub ip: String,
    pub status: ThreatStatus,
    pub timestamp: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub user_submitted: bool,
}

/// Threat types accepted by the submission form.
pub const SUBMIT_THREAT_TYPES: [&str; 9] = [
    "DDoS Attack",
    "SQL Injection",
    "XSS Attack",
    "Brute Force",
    "Malware Detection",
    "Port Scanning",
    "Phishing Attempt",
    "Ransomware",
    "Data Exfiltration",
];

/// Protocols accepted by the submission form.
pub const SUBMIT_PROTOCOLS: [&str; 4] = ["TCP", "UDP", "HTTP", "HTTPS"];

/// Payload for `POST /submit-threat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitThreat {
    pub ip: String,
    pub threat_type: String,
    pub severity: Severity,
    pub description: String,
    pub protocol: String,
    pub port: u16,
}

impl Default for SubmitThreat {
    fn default() -> Self {
        SubmitThreat {
            ip: String::new(),
            threat_type: "DDoS Attack".to_string(),
            severity: Severity::High,
            description: String::new(),
            protocol: "TCP".to_string(),
            port: 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"High\"");
        let sev: Severity = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(sev, Severity::Critical);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("high".parse::<Severity>(), Ok(Severity::High));
        assert_eq!("Critical".parse::<Severity>(), Ok(Severity::Critical));
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn test_threat_type_display_matches_serde() {
        for t in ThreatType::ALL {
            let wire = serde_json::to_string(&t).unwrap();
            assert_eq!(wire, format!("\"{}\"", t));
        }
    }

    #[test]
    fn test_threat_event_camel_case_fields() {
        let event = ThreatEvent {
            id: "a1b2c3d4e".to_string(),
            time: "12:00:00".to_string(),
            threat_type: ThreatType::BruteForce,
            ip_address: "10.0.0.1".to_string(),
            severity: Severity::Medium,
            status: ThreatStatus::Monitoring,
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"threatType\":\"Brute Force\""));
        assert!(json.contains("\"ipAddress\":\"10.0.0.1\""));
    }

    #[test]
    fn test_live_threat_deserializes_server_payload() {
        let json = r#"{
            "threatId": "THR-4821",
            "type": "SQL Injection",
            "severity": "Critical",
            "ip": "203.0.113.7",
            "status": "Mitigated",
            "timestamp": "2026-08-04T10:15:00",
            "nodeId": "Node-B",
            "protocol": "TCP",
            "userSubmitted": true,
            "confidence": 100.0
        }"#;

        let threat: LiveThreat = serde_json::from_str(json).unwrap();
        assert_eq!(threat.threat_id, "THR-4821");
        assert_eq!(threat.threat_type, "SQL Injection");
        assert_eq!(threat.severity, Severity::Critical);
        assert_eq!(threat.status, ThreatStatus::Mitigated);
        assert!(threat.user_submitted);
        assert!(threat.source.is_none());
    }

    #[test]
    fn test_submit_threat_defaults() {
        let form = SubmitThreat::default();
        assert_eq!(form.threat_type, "DDoS Attack");
        assert_eq!(form.severity, Severity::High);
        assert_eq!(form.protocol, "TCP");
        assert_eq!(form.port, 80);
        assert!(form.ip.is_empty());

        let json = serde_json::to_string(&form).unwrap();
        assert!(json.contains("\"threatType\":\"DDoS Attack\""));
    }
}
