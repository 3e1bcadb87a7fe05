use serde::{Deserialize, Serialize};

use crate::models::threat::ThreatType;

/// Predecessor hash recorded on the first block of the chain.
pub const GENESIS_PREVIOUS_HASH: &str = "0000000000000000";

/// Consensus mechanism shown on the ledger view. Display label only; no
/// consensus protocol runs anywhere in this system.
pub const CONSENSUS_LABEL: &str = "PBFT (Practical Byzantine Fault Tolerance)";

/// A block in the mock threat ledger.
///
/// `threat_hash` is 64 random hex digits, not a digest of anything.
/// `previous_hash`/`current_hash` chain blocks together the way the
/// upstream service does: 16 hex chars of a truncated SHA-256.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerBlock {
    pub block_number: u64,
    pub threat_hash: String,
    pub previous_hash: String,
    pub current_hash: String,
    pub threat_type: ThreatType,
    /// Local datetime string, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_wire_fields() {
        let block = LedgerBlock {
            block_number: 7,
            threat_hash: format!("0x{}", "ab".repeat(32)),
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            current_hash: "1234567890abcdef".to_string(),
            threat_type: ThreatType::DDoS,
            timestamp: "2026-08-04 10:15:00".to_string(),
            verified: true,
        };

        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"blockNumber\":7"));
        assert!(json.contains("\"threatHash\":\"0xabab"));
        assert!(json.contains("\"previousHash\":\"0000000000000000\""));
        assert!(json.contains("\"verified\":true"));
    }
}
