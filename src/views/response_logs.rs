//! Automated response log: a seeded batch plus severity-driven entries
//! recorded for generated threats.

use rand::Rng;

use crate::generator;
use crate::models::response::ResponseLogEntry;
use crate::models::threat::ThreatEvent;
use crate::views::{push_front_capped, ViewPhase};

pub const DEFAULT_SEED_COUNT: usize = 30;
pub const DEFAULT_CAP: usize = 50;

pub struct ResponseLogView {
    logs: Vec<ResponseLogEntry>,
    cap: usize,
    phase: ViewPhase,
}

impl ResponseLogView {
    pub fn new(cap: usize) -> Self {
        ResponseLogView {
            logs: Vec::new(),
            cap,
            phase: ViewPhase::Uninitialized,
        }
    }

    pub fn seed(&mut self, rng: &mut impl Rng, count: usize) {
        self.logs = (0..count).map(|_| generator::response_log(rng)).collect();
        self.logs.truncate(self.cap);
        self.phase = ViewPhase::Seeded;
    }

    /// Record the automated response for a generated threat, if its
    /// severity warrants one.
    pub fn respond_to(
        &mut self,
        rng: &mut impl Rng,
        threat: &ThreatEvent,
    ) -> Option<ResponseLogEntry> {
        if self.phase == ViewPhase::TornDown {
            return None;
        }
        if self.phase != ViewPhase::Uninitialized {
            self.phase = ViewPhase::Polling;
        }

        let entry = generator::response_for_threat(rng, threat)?;
        push_front_capped(&mut self.logs, entry.clone(), self.cap);
        Some(entry)
    }

    pub fn teardown(&mut self) {
        self.phase = ViewPhase::TornDown;
    }

    pub fn logs(&self) -> &[ResponseLogEntry] {
        &self.logs
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }
}

impl Default for ResponseLogView {
    fn default() -> Self {
        Self::new(DEFAULT_CAP)
    }
}
