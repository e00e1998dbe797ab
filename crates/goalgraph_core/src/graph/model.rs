//! Derived graph shapes handed to the presentation layer.
//!
//! # Invariants
//! - Exactly one hub node exists in every graph.
//! - Edge ids are `"{source}-{target}"` over node ids.
//! - Category node ids carry a `category-` prefix so they can never collide
//!   with the synthetic `hub`/`add-output`/`add-input` ids.

use crate::model::category::{Category, CategoryId, CategoryKind};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

const HUB_NODE_ID: &str = "hub";
const ADD_OUTPUT_NODE_ID: &str = "add-output";
const ADD_INPUT_NODE_ID: &str = "add-input";
const CATEGORY_NODE_PREFIX: &str = "category-";

/// Graph node identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn hub() -> Self {
        Self(HUB_NODE_ID.to_string())
    }

    /// Id of the "add a category of `kind`" action node.
    pub fn action(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Output => Self(ADD_OUTPUT_NODE_ID.to_string()),
            CategoryKind::Input => Self(ADD_INPUT_NODE_ID.to_string()),
        }
    }

    pub fn category(id: &CategoryId) -> Self {
        Self(format!("{CATEGORY_NODE_PREFIX}{id}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Canvas coordinates of a node's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Side of a node an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    Top,
    Bottom,
    Left,
    Right,
}

impl Handle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Node payload variants. The engine only ever emits these three.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// One user category card.
    Category { category: Category },
    /// The single convergence point.
    Hub,
    /// Synthetic "add a new category of `kind`" affordance.
    Action { kind: CategoryKind },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Handle,
    pub target_handle: Handle,
}

impl GraphEdge {
    /// Connects two nodes; the edge id is derived from the endpoints.
    pub fn connect(
        source: NodeId,
        source_handle: Handle,
        target: NodeId,
        target_handle: Handle,
    ) -> Self {
        Self {
            id: format!("{source}-{target}"),
            source,
            target,
            source_handle,
            target_handle,
        }
    }
}

/// Interaction switches the presentation layer must honour.
///
/// The graph is a read-only projection of the category list, so every
/// switch is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InteractionPolicy {
    pub nodes_draggable: bool,
    pub nodes_connectable: bool,
    pub pan_enabled: bool,
    pub zoom_enabled: bool,
}

impl InteractionPolicy {
    pub const READ_ONLY: Self = Self {
        nodes_draggable: false,
        nodes_connectable: false,
        pan_enabled: false,
        zoom_enabled: false,
    };
}

/// Positioned node/edge projection of a category list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: BTreeMap<NodeId, GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub interaction: InteractionPolicy,
}

impl Graph {
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn position_of(&self, id: &NodeId) -> Option<Position> {
        self.nodes.get(id).map(|node| node.position)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes ordered top to bottom.
    pub fn nodes_by_position(&self) -> Vec<&GraphNode> {
        let mut nodes: Vec<&GraphNode> = self.nodes.values().collect();
        nodes.sort_by(|left, right| left.position.y.total_cmp(&right.position.y));
        nodes
    }
}
