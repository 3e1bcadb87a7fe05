//! Dashboard overview: a rolling window of generated threats plus
//! severity counts for the current day.

use chrono::{Local, NaiveDate, TimeZone};
use rand::Rng;
use serde::Serialize;

use crate::generator;
use crate::models::threat::{Severity, ThreatEvent};
use crate::views::{push_front_capped, ViewPhase};

pub const DEFAULT_SEED_COUNT: usize = 10;
pub const DEFAULT_CAP: usize = 15;

/// Counts over today's retained threats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub struct DashboardView {
    threats: Vec<ThreatEvent>,
    stats: DashboardStats,
    cap: usize,
    phase: ViewPhase,
}

impl DashboardView {
    pub fn new(cap: usize) -> Self {
        DashboardView {
            threats: Vec::new(),
            stats: DashboardStats::default(),
            cap,
            phase: ViewPhase::Uninitialized,
        }
    }

    /// Generate the initial batch.
    pub fn seed(&mut self, rng: &mut impl Rng, count: usize) {
        self.threats = (0..count).map(|_| generator::random_threat(rng)).collect();
        self.stats = Self::stats_for_date(&self.threats, Local::now().date_naive());
        self.phase = ViewPhase::Seeded;
    }

    /// One timer tick: generate a single threat, prepend it, truncate to the
    /// cap, and recompute today's stats. Returns the new threat, or `None`
    /// if the view is not in a tickable phase.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Option<ThreatEvent> {
        match self.phase {
            ViewPhase::Seeded | ViewPhase::Polling => {}
            ViewPhase::Uninitialized | ViewPhase::TornDown => return None,
        }
        self.phase = ViewPhase::Polling;

        let threat = generator::random_threat(rng);
        push_front_capped(&mut self.threats, threat.clone(), self.cap);
        self.stats = Self::stats_for_date(&self.threats, Local::now().date_naive());
        Some(threat)
    }

    pub fn teardown(&mut self) {
        self.phase = ViewPhase::TornDown;
    }

    pub fn threats(&self) -> &[ThreatEvent] {
        &self.threats
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Severity counts restricted to threats whose local date matches
    /// `date`.
    pub fn stats_for_date(threats: &[ThreatEvent], date: NaiveDate) -> DashboardStats {
        let mut stats = DashboardStats::default();
        for threat in threats {
            let matches_date = Local
                .timestamp_millis_opt(threat.timestamp)
                .single()
                .map(|dt| dt.date_naive() == date)
                .unwrap_or(false);
            if !matches_date {
                continue;
            }
            stats.total += 1;
            match threat.severity {
                Severity::High => stats.high += 1,
                Severity::Medium => stats.medium += 1,
                Severity::Low => stats.low += 1,
                Severity::Critical => {}
            }
        }
        stats
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new(DEFAULT_CAP)
    }
}
