//! Mock blockchain ledger: sequentially numbered, hash-chained blocks.
//! The consensus mechanism shown alongside is a display label only.

use rand::Rng;

use crate::generator;
use crate::models::ledger::{LedgerBlock, CONSENSUS_LABEL, GENESIS_PREVIOUS_HASH};
use crate::views::ViewPhase;

pub const DEFAULT_SEED_COUNT: usize = 20;

pub struct LedgerView {
    blocks: Vec<LedgerBlock>,
    phase: ViewPhase,
}

impl LedgerView {
    pub fn new() -> Self {
        LedgerView {
            blocks: Vec::new(),
            phase: ViewPhase::Uninitialized,
        }
    }

    /// Seed blocks numbered 1..=count, chained from the genesis hash.
    pub fn seed(&mut self, rng: &mut impl Rng, count: usize) {
        self.blocks.clear();
        for _ in 0..count {
            self.push_next(rng);
        }
        self.phase = ViewPhase::Seeded;
    }

    /// Append the next sequential block. Returns `None` once torn down.
    pub fn append(&mut self, rng: &mut impl Rng) -> Option<&LedgerBlock> {
        if self.phase == ViewPhase::TornDown {
            return None;
        }
        if self.phase != ViewPhase::Uninitialized {
            self.phase = ViewPhase::Polling;
        }
        self.push_next(rng);
        self.blocks.last()
    }

    fn push_next(&mut self, rng: &mut impl Rng) {
        let block_number = self.blocks.last().map(|b| b.block_number + 1).unwrap_or(1);
        let previous_hash = self
            .blocks
            .last()
            .map(|b| b.current_hash.as_str())
            .unwrap_or(GENESIS_PREVIOUS_HASH);
        let block = generator::ledger_block(rng, block_number, previous_hash);
        self.blocks.push(block);
    }

    pub fn teardown(&mut self) {
        self.phase = ViewPhase::TornDown;
    }

    pub fn blocks(&self) -> &[LedgerBlock] {
        &self.blocks
    }

    pub fn total_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn consensus_label(&self) -> &'static str {
        CONSENSUS_LABEL
    }

    /// Every block's `previous_hash` must equal its predecessor's
    /// `current_hash`, starting from the genesis constant.
    pub fn verify_chain(&self) -> bool {
        let mut expected = GENESIS_PREVIOUS_HASH;
        for block in &self.blocks {
            if block.previous_hash != expected {
                return false;
            }
            expected = &block.current_hash;
        }
        true
    }
}

impl Default for LedgerView {
    fn default() -> Self {
        Self::new()
    }
}
