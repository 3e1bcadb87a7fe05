//! Node monitor: the static three-node fleet with metrics re-sampled on
//! every sync tick.

use chrono::Local;
use rand::Rng;
use serde::Serialize;

use crate::generator;
use crate::models::node::{default_nodes, Node, NodeHealth};
use crate::views::ViewPhase;

/// One node with its most recent metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReport {
    #[serde(flatten)]
    pub node: Node,
    #[serde(flatten)]
    pub health: NodeHealth,
}

pub struct NodeMonitor {
    reports: Vec<NodeReport>,
    last_sync: String,
    phase: ViewPhase,
}

impl NodeMonitor {
    pub fn new() -> Self {
        NodeMonitor {
            reports: Vec::new(),
            last_sync: String::new(),
            phase: ViewPhase::Uninitialized,
        }
    }

    /// Build the fleet with an initial metric sample.
    pub fn seed(&mut self, rng: &mut impl Rng) {
        self.reports = default_nodes()
            .into_iter()
            .map(|node| NodeReport {
                node,
                health: generator::node_health(rng),
            })
            .collect();
        self.last_sync = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.phase = ViewPhase::Seeded;
    }

    /// One sync tick: refresh the sync timestamp and re-sample every node's
    /// metrics. The fleet itself never changes.
    pub fn resync(&mut self, rng: &mut impl Rng) -> bool {
        match self.phase {
            ViewPhase::Seeded | ViewPhase::Polling => {}
            ViewPhase::Uninitialized | ViewPhase::TornDown => return false,
        }
        self.phase = ViewPhase::Polling;

        for report in &mut self.reports {
            report.health = generator::node_health(rng);
        }
        self.last_sync = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        true
    }

    pub fn teardown(&mut self) {
        self.phase = ViewPhase::TornDown;
    }

    pub fn reports(&self) -> &[NodeReport] {
        &self.reports
    }

    pub fn last_sync(&self) -> &str {
        &self.last_sync
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }
}

impl Default for NodeMonitor {
    fn default() -> Self {
        Self::new()
    }
}
