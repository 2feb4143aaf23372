//! Graph projection: event nodes pointing at their interpretation nodes.
//!
//! # Layout
//!
//! ```text
//!   y=3        [evt 0]              [evt 1]              [evt 2]
//!             /   |   \            /   |   \            /   |   \
//!   y=2   [i0]  [i1]  [i2]     [i0]  [i1]  [i2]     [i0]  [i1]  [i2]
//!          -1    0     1        2     3     4        5     6     7
//! ```
//!
//! Record `i` puts its event node at `x = 3*i` and interpretation `j` at
//! `x = 3*i - 1 + j`. With [`NodeKeying::Label`] two placements of the same
//! node keep the latest one.

use std::collections::{HashMap, HashSet};

use diary_events::EventLog;
use serde::{Deserialize, Serialize};

/// Horizontal distance between consecutive event nodes.
pub const EVENT_SPACING: f64 = 3.0;

/// Vertical coordinate of the event tier.
pub const EVENT_TIER_Y: f64 = 3.0;

/// Vertical coordinate of the interpretation tier.
pub const INTERPRETATION_TIER_Y: f64 = 2.0;

/// How records map to node identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeKeying {
    /// Node id is the display label; identical labels share one node
    #[default]
    Label,
    /// Node id is derived from the record position; labels never merge
    Record,
}

/// Tier a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Event,
    Interpretation,
}

/// Layout coordinate in graph units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A graph node with its layout position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub position: Position,
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Directed two-tier graph built from an event log.
///
/// Nodes keep first-insertion order; edges are a set in first-insertion
/// order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmotionGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    edge_set: HashSet<(usize, usize)>,
}

impl EmotionGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node or moves an existing one to `position`.
    ///
    /// Returns the node's index.
    fn place_node(&mut self, id: String, label: String, kind: NodeKind, position: Position) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            self.nodes[idx].position = position;
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(id.clone(), idx);
        self.nodes.push(GraphNode {
            id,
            label,
            kind,
            position,
        });
        idx
    }

    /// Adds an edge; a no-op if it already exists.
    fn add_edge(&mut self, from: usize, to: usize) {
        if self.edge_set.insert((from, to)) {
            self.edges.push(GraphEdge {
                from: self.nodes[from].id.clone(),
                to: self.nodes[to].id.clone(),
            });
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Layout position of a node by id.
    pub fn position(&self, id: &str) -> Option<Position> {
        self.node(id).map(|n| n.position)
    }

    /// All layout positions keyed by node id, in node order.
    pub fn positions(&self) -> Vec<(&str, Position)> {
        self.nodes
            .iter()
            .map(|n| (n.id.as_str(), n.position))
            .collect()
    }

    /// Resolves an edge to its endpoint nodes.
    pub fn endpoints(&self, edge: &GraphEdge) -> Option<(&GraphNode, &GraphNode)> {
        Some((self.node(&edge.from)?, self.node(&edge.to)?))
    }

    /// Bounding box of all node positions as `(min, max)`.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let first = self.nodes.first()?.position;
        let (mut min, mut max) = (first, first);
        for node in &self.nodes[1..] {
            let p = node.position;
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// Serializes the graph (nodes and edges) to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text listing of nodes and edges for terminal display.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} nodes, {} edges\n",
            self.node_count(),
            self.edge_count()
        ));
        for node in &self.nodes {
            let tier = match node.kind {
                NodeKind::Event => "event",
                NodeKind::Interpretation => "interp",
            };
            out.push_str(&format!(
                "  [{:>6}] ({:>5.1}, {:.1}) {}\n",
                tier, node.position.x, node.position.y, node.label
            ));
        }
        for edge in &self.edges {
            if let Some((from, to)) = self.endpoints(edge) {
                out.push_str(&format!("  {} -> {}\n", from.label, to.label));
            }
        }
        out
    }
}

/// Synthetic event node id for record-keyed graphs.
fn record_event_id(record_index: usize) -> String {
    format!("evt_{:04}", record_index + 1)
}

/// Builds the graph projection of the whole log.
pub fn to_graph(log: &EventLog, keying: NodeKeying) -> EmotionGraph {
    let mut graph = EmotionGraph::new();

    for (i, record) in log.iter().enumerate() {
        let x = i as f64 * EVENT_SPACING;
        let event_label = record.node_label();
        let event_id = match keying {
            NodeKeying::Label => event_label.clone(),
            NodeKeying::Record => record_event_id(i),
        };
        let event_idx = graph.place_node(
            event_id.clone(),
            event_label,
            NodeKind::Event,
            Position::new(x, EVENT_TIER_Y),
        );

        for (j, interp) in record.interpretations.iter().enumerate() {
            let label = interp.node_label();
            let id = match keying {
                NodeKeying::Label => label.clone(),
                NodeKeying::Record => format!("{}.int_{}", event_id, j + 1),
            };
            let offset = j as f64 - 1.0;
            let idx = graph.place_node(
                id,
                label,
                NodeKind::Interpretation,
                Position::new(x + offset, INTERPRETATION_TIER_Y),
            );
            graph.add_edge(event_idx, idx);
        }
    }

    graph
}
