//! Synthetic record generation.
//!
//! Every function here is stateless and infallible: one call produces one
//! record with internally consistent fields. Randomness comes in through a
//! `rand::Rng` parameter so callers (and tests) control the sequence.

use chrono::Local;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::models::node::NodeHealth;
use crate::models::response::{actions_for_severity, ResponseLogEntry, RESPONSE_ACTIONS};
use crate::models::threat::{Severity, ThreatEvent, ThreatStatus, ThreatType};
use crate::models::LedgerBlock;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX_DIGITS: &[u8] = b"0123456789abcdef";

/// Chance that a medium-severity threat triggers an automated response.
const MEDIUM_RESPONSE_PROBABILITY: f64 = 0.7;

fn sample<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Four independent components in [0, 255), dot-joined. Reserved ranges are
/// not excluded.
pub fn random_ip(rng: &mut impl Rng) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(0..255),
        rng.gen_range(0..255),
        rng.gen_range(0..255),
        rng.gen_range(0..255)
    )
}

/// `0x` followed by 64 uniform hex digits. Not a digest of anything.
pub fn threat_hash(rng: &mut impl Rng) -> String {
    let mut hash = String::with_capacity(66);
    hash.push_str("0x");
    for _ in 0..64 {
        hash.push(*sample(rng, HEX_DIGITS) as char);
    }
    hash
}

/// Nine characters of base-36.
pub fn record_id(rng: &mut impl Rng) -> String {
    (0..9).map(|_| *sample(rng, ID_ALPHABET) as char).collect()
}

/// One threat event stamped with the current local clock. Severity is drawn
/// from High/Medium/Low and status from Blocked/Isolated/Monitoring only.
pub fn random_threat(rng: &mut impl Rng) -> ThreatEvent {
    let now = Local::now();
    ThreatEvent {
        id: record_id(rng),
        time: now.format("%H:%M:%S").to_string(),
        threat_type: *sample(rng, &ThreatType::ALL),
        ip_address: random_ip(rng),
        severity: *sample(rng, &Severity::GENERATED),
        status: *sample(rng, &ThreatStatus::GENERATED),
        timestamp: now.timestamp_millis(),
    }
}

/// First 16 hex chars of SHA-256 over the block inputs. This is the
/// simulated block hash, not a cryptographic commitment.
pub fn chain_hash(block_number: u64, threat_hash: &str, nonce: u64) -> String {
    let digest = Sha256::digest(format!("{}{}{}", block_number, threat_hash, nonce));
    hex::encode(digest)[..16].to_string()
}

/// One ledger block. The caller supplies the sequential block number and the
/// predecessor's hash; `verified` is unconditionally true.
pub fn ledger_block(rng: &mut impl Rng, block_number: u64, previous_hash: &str) -> LedgerBlock {
    let threat_hash = threat_hash(rng);
    let current_hash = chain_hash(block_number, &threat_hash, rng.gen());
    LedgerBlock {
        block_number,
        threat_hash,
        previous_hash: previous_hash.to_string(),
        current_hash,
        threat_type: *sample(rng, &ThreatType::ALL),
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        verified: true,
    }
}

/// One response log entry with the action drawn uniformly from the fixed
/// seven-item list.
pub fn response_log(rng: &mut impl Rng) -> ResponseLogEntry {
    ResponseLogEntry {
        id: record_id(rng),
        action: sample(rng, &RESPONSE_ACTIONS).to_string(),
        triggered_by: *sample(rng, &ThreatType::ALL),
        time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ip_address: random_ip(rng),
    }
}

/// Pick an automated response action for a threat of the given severity.
/// Critical and High always act, Medium acts 70% of the time, Low never
/// does.
pub fn response_action_for(rng: &mut impl Rng, severity: Severity) -> Option<&'static str> {
    let actions = actions_for_severity(severity);
    if actions.is_empty() {
        return None;
    }
    match severity {
        Severity::Critical | Severity::High => Some(sample::<&str>(rng, actions)),
        Severity::Medium if rng.gen::<f64>() < MEDIUM_RESPONSE_PROBABILITY => {
            Some(sample::<&str>(rng, actions))
        }
        _ => None,
    }
}

/// Build the response log entry for a generated threat, if its severity
/// warrants one. The entry carries the threat's own IP and type.
pub fn response_for_threat(rng: &mut impl Rng, threat: &ThreatEvent) -> Option<ResponseLogEntry> {
    let action = response_action_for(rng, threat.severity)?;
    Some(ResponseLogEntry {
        id: record_id(rng),
        action: action.to_string(),
        triggered_by: threat.threat_type,
        time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ip_address: threat.ip_address.clone(),
    })
}

/// Fresh node metrics: cpu in [45, 65), memory in [60, 75), latency
/// 10-100 ms, uptime 98.0%-100.9%.
pub fn node_health(rng: &mut impl Rng) -> NodeHealth {
    NodeHealth {
        cpu_percent: 45.0 + rng.gen::<f64>() * 20.0,
        memory_percent: 60.0 + rng.gen::<f64>() * 15.0,
        latency_ms: rng.gen_range(10..=100),
        uptime: format!("{}.{}%", rng.gen_range(98..=100), rng.gen_range(0..=9)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_ip_components_in_range() {
        let mut rng = rng();
        for _ in 0..500 {
            let ip = random_ip(&mut rng);
            let parts: Vec<&str> = ip.split('.').collect();
            assert_eq!(parts.len(), 4, "bad ip: {}", ip);
            for part in parts {
                let value: u16 = part.parse().expect("non-numeric ip component");
                assert!(value < 255, "component out of range in {}", ip);
            }
        }
    }

    #[test]
    fn test_threat_hash_shape() {
        let pattern = Regex::new(r"^0x[0-9a-f]{64}$").unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            assert!(pattern.is_match(&threat_hash(&mut rng)));
        }
    }

    #[test]
    fn test_record_id_shape() {
        let pattern = Regex::new(r"^[0-9a-z]{9}$").unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            assert!(pattern.is_match(&record_id(&mut rng)));
        }
    }

    #[test]
    fn test_generated_threat_stays_in_enums() {
        let mut rng = rng();
        for _ in 0..200 {
            let threat = random_threat(&mut rng);
            assert!(Severity::GENERATED.contains(&threat.severity));
            assert!(ThreatStatus::GENERATED.contains(&threat.status));
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(random_ip(&mut a), random_ip(&mut b));
        }
        assert_eq!(threat_hash(&mut a), threat_hash(&mut b));
    }

    #[test]
    fn test_ledger_block_is_verified_and_chained() {
        let mut rng = rng();
        let block = ledger_block(&mut rng, 1, "0000000000000000");
        assert!(block.verified);
        assert_eq!(block.block_number, 1);
        assert_eq!(block.previous_hash, "0000000000000000");
        assert_eq!(block.current_hash.len(), 16);
        assert!(block.current_hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_chain_hash_is_stable() {
        let a = chain_hash(3, "0xdeadbeef", 99);
        let b = chain_hash(3, "0xdeadbeef", 99);
        assert_eq!(a, b);
        assert_ne!(a, chain_hash(4, "0xdeadbeef", 99));
    }

    #[test]
    fn test_response_log_uses_known_actions() {
        let mut rng = rng();
        for _ in 0..100 {
            let entry = response_log(&mut rng);
            assert!(RESPONSE_ACTIONS.contains(&entry.action.as_str()));
        }
    }

    #[test]
    fn test_response_action_severity_rules() {
        let mut rng = rng();
        for _ in 0..50 {
            assert!(response_action_for(&mut rng, Severity::Critical).is_some());
            assert!(response_action_for(&mut rng, Severity::High).is_some());
            assert!(response_action_for(&mut rng, Severity::Low).is_none());
        }

        // Medium acts sometimes but not always.
        let outcomes: Vec<bool> = (0..200)
            .map(|_| response_action_for(&mut rng, Severity::Medium).is_some())
            .collect();
        assert!(outcomes.iter().any(|&acted| acted));
        assert!(outcomes.iter().any(|&acted| !acted));
    }

    #[test]
    fn test_response_for_threat_links_fields() {
        let mut rng = rng();
        let mut threat = random_threat(&mut rng);
        threat.severity = Severity::Critical;

        let entry = response_for_threat(&mut rng, &threat).unwrap();
        assert_eq!(entry.ip_address, threat.ip_address);
        assert_eq!(entry.triggered_by, threat.threat_type);
    }

    #[test]
    fn test_node_health_ranges() {
        let mut rng = rng();
        for _ in 0..200 {
            let health = node_health(&mut rng);
            assert!(health.cpu_percent >= 45.0 && health.cpu_percent < 65.0);
            assert!(health.memory_percent >= 60.0 && health.memory_percent < 75.0);
            assert!((10..=100).contains(&health.latency_ms));
            assert!(health.uptime.ends_with('%'));
        }
    }
}
