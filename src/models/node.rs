use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    Online,
    Offline,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStatus::Online => f.write_str("Online"),
            NodeStatus::Offline => f.write_str("Offline"),
        }
    }
}

/// A mesh node. The fleet is a static list of three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub status: NodeStatus,
}

impl Node {
    /// Display identifier, e.g. `NODE-001`.
    pub fn node_label(&self) -> String {
        format!("NODE-{:03}", self.id)
    }
}

/// Runtime metrics for one node, re-sampled on every sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeHealth {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub latency_ms: u32,
    pub uptime: String,
}

/// The fixed three-node fleet.
pub fn default_nodes() -> Vec<Node> {
    vec![
        Node {
            id: 1,
            name: "Node 1".to_string(),
            location: "Bangalore".to_string(),
            status: NodeStatus::Online,
        },
        Node {
            id: 2,
            name: "Node 2".to_string(),
            location: "Mumbai".to_string(),
            status: NodeStatus::Online,
        },
        Node {
            id: 3,
            name: "Node 3".to_string(),
            location: "Delhi".to_string(),
            status: NodeStatus::Online,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fleet() {
        let nodes = default_nodes();
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| n.status == NodeStatus::Online));
        assert_eq!(nodes[0].location, "Bangalore");
        assert_eq!(nodes[2].node_label(), "NODE-003");
    }
}
