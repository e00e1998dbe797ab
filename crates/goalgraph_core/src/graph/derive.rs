//! Category list to graph derivation.
//!
//! # Responsibility
//! - Map a `CategoryList` snapshot to a positioned node/edge `Graph`.
//!
//! # Invariants
//! - Pure and total: no I/O, no hidden state, no failure path.
//! - Same input yields an equal `Graph` (positions and edge ids).
//! - A node's position depends only on its partition and its index within
//!   that partition, never on id or title.
//! - `n` outputs and `m` inputs yield `n + m + 3` nodes and `n + m + 2` edges.

use crate::graph::model::{
    Graph, GraphEdge, GraphNode, Handle, InteractionPolicy, NodeId, NodeKind, Position,
};
use crate::model::category::{Category, CategoryKind, CategoryList};
use std::collections::BTreeMap;

/// Layout constants for the vertical stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Vertical distance between consecutive rows.
    pub spacing: f64,
    /// X of category cards.
    pub category_x: f64,
    /// X of the two action nodes.
    pub action_x: f64,
    /// X of the hub.
    pub hub_x: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 100.0,
            category_x: 0.0,
            action_x: 16.0,
            hub_x: 72.0,
        }
    }
}

impl LayoutConfig {
    fn row_y(&self, row: usize) -> f64 {
        row as f64 * self.spacing
    }
}

/// Derives the graph using the default layout.
pub fn derive_graph(categories: &CategoryList) -> Graph {
    derive_graph_with(categories, &LayoutConfig::default())
}

/// Derives the graph using an explicit layout.
///
/// Rows from the top: outputs, add-output, hub, add-input, inputs.
pub fn derive_graph_with(categories: &CategoryList, layout: &LayoutConfig) -> Graph {
    let outputs: Vec<&Category> = categories.outputs().collect();
    let inputs: Vec<&Category> = categories.inputs().collect();

    let add_output_row = outputs.len();
    let hub_row = add_output_row + 1;
    let add_input_row = hub_row + 1;
    let first_input_row = add_input_row + 1;

    let hub = NodeId::hub();
    let add_output = NodeId::action(CategoryKind::Output);
    let add_input = NodeId::action(CategoryKind::Input);

    let mut nodes = BTreeMap::new();
    let mut edges = Vec::with_capacity(outputs.len() + inputs.len() + 2);

    for (index, category) in outputs.iter().enumerate() {
        let node = category_node(category, layout.category_x, layout.row_y(index));
        edges.push(GraphEdge::connect(
            node.id.clone(),
            Handle::Right,
            hub.clone(),
            Handle::Top,
        ));
        nodes.insert(node.id.clone(), node);
    }

    insert_node(
        &mut nodes,
        add_output.clone(),
        NodeKind::Action {
            kind: CategoryKind::Output,
        },
        layout.action_x,
        layout.row_y(add_output_row),
    );
    edges.push(GraphEdge::connect(
        add_output,
        Handle::Bottom,
        hub.clone(),
        Handle::Top,
    ));

    insert_node(
        &mut nodes,
        hub.clone(),
        NodeKind::Hub,
        layout.hub_x,
        layout.row_y(hub_row),
    );

    insert_node(
        &mut nodes,
        add_input.clone(),
        NodeKind::Action {
            kind: CategoryKind::Input,
        },
        layout.action_x,
        layout.row_y(add_input_row),
    );
    edges.push(GraphEdge::connect(
        hub.clone(),
        Handle::Bottom,
        add_input,
        Handle::Top,
    ));

    for (index, category) in inputs.iter().enumerate() {
        let node = category_node(
            category,
            layout.category_x,
            layout.row_y(first_input_row + index),
        );
        edges.push(GraphEdge::connect(
            hub.clone(),
            Handle::Bottom,
            node.id.clone(),
            Handle::Left,
        ));
        nodes.insert(node.id.clone(), node);
    }

    Graph {
        nodes,
        edges,
        interaction: InteractionPolicy::READ_ONLY,
    }
}

fn category_node(category: &Category, x: f64, y: f64) -> GraphNode {
    GraphNode {
        id: NodeId::category(&category.id),
        kind: NodeKind::Category {
            category: category.clone(),
        },
        position: Position { x, y },
    }
}

fn insert_node(
    nodes: &mut BTreeMap<NodeId, GraphNode>,
    id: NodeId,
    kind: NodeKind,
    x: f64,
    y: f64,
) {
    nodes.insert(
        id.clone(),
        GraphNode {
            id,
            kind,
            position: Position { x, y },
        },
    );
}

#[cfg(test)]
mod tests {
    use super::{derive_graph, derive_graph_with, LayoutConfig};
    use crate::graph::model::{Handle, NodeId, NodeKind, Position};
    use crate::model::category::{Category, CategoryId, CategoryKind, CategoryList};

    fn list(entries: &[(&str, CategoryKind)]) -> CategoryList {
        CategoryList::from_categories(
            entries
                .iter()
                .map(|(id, kind)| Category::with_id(CategoryId::new(*id), *kind, *id, 0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rows_follow_output_action_hub_action_input_order() {
        let graph = derive_graph(&list(&[
            ("o1", CategoryKind::Output),
            ("o2", CategoryKind::Output),
            ("i1", CategoryKind::Input),
        ]));

        let y = |id: NodeId| graph.position_of(&id).unwrap().y;
        assert_eq!(y(NodeId::category(&CategoryId::new("o1"))), 0.0);
        assert_eq!(y(NodeId::category(&CategoryId::new("o2"))), 100.0);
        assert_eq!(y(NodeId::action(CategoryKind::Output)), 200.0);
        assert_eq!(y(NodeId::hub()), 300.0);
        assert_eq!(y(NodeId::action(CategoryKind::Input)), 400.0);
        assert_eq!(y(NodeId::category(&CategoryId::new("i1"))), 500.0);
    }

    #[test]
    fn handles_encode_output_to_hub_to_input_flow() {
        let graph = derive_graph(&list(&[
            ("o1", CategoryKind::Output),
            ("i1", CategoryKind::Input),
        ]));

        let output_edge = graph.edge("category-o1-hub").unwrap();
        assert_eq!(output_edge.source_handle, Handle::Right);
        assert_eq!(output_edge.target_handle, Handle::Top);

        let input_edge = graph.edge("hub-category-i1").unwrap();
        assert_eq!(input_edge.source, NodeId::hub());
        assert_eq!(input_edge.source_handle, Handle::Bottom);
        assert_eq!(input_edge.target_handle, Handle::Left);

        assert!(graph.edge("add-output-hub").is_some());
        assert!(graph.edge("hub-add-input").is_some());
    }

    #[test]
    fn empty_list_still_renders_hub_and_actions() {
        let graph = derive_graph(&CategoryList::new());

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.position_of(&NodeId::action(CategoryKind::Output)),
            Some(Position { x: 16.0, y: 0.0 })
        );
        assert_eq!(
            graph.position_of(&NodeId::hub()),
            Some(Position { x: 72.0, y: 100.0 })
        );
        assert!(matches!(
            graph.node(&NodeId::hub()).unwrap().kind,
            NodeKind::Hub
        ));
    }

    #[test]
    fn custom_spacing_scales_rows() {
        let layout = LayoutConfig {
            spacing: 40.0,
            ..LayoutConfig::default()
        };
        let graph = derive_graph_with(&list(&[("o1", CategoryKind::Output)]), &layout);
        assert_eq!(graph.position_of(&NodeId::hub()).unwrap().y, 80.0);
    }

    #[test]
    fn position_ignores_title_and_id() {
        let first = derive_graph(&list(&[("alpha", CategoryKind::Input)]));
        let second = derive_graph(&list(&[("omega", CategoryKind::Input)]));

        assert_eq!(
            first.position_of(&NodeId::category(&CategoryId::new("alpha"))),
            second.position_of(&NodeId::category(&CategoryId::new("omega")))
        );
    }
}
