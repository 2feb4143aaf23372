//! Read-side projections of the event log.
//!
//! Both projections are recomputed from the full log on every read.

pub mod graph;
pub mod table;

pub use graph::{
    to_graph, EmotionGraph, GraphEdge, GraphNode, NodeKeying, NodeKind, Position, EVENT_SPACING,
    EVENT_TIER_Y, INTERPRETATION_TIER_Y,
};
pub use table::{render_table, to_rows, TableRow, TABLE_HEADERS};
