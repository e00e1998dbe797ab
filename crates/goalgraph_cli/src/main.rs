//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `goalgraph_core` linkage without Flutter/FFI runtime setup.
//! - Print the seed graph summary deterministically.

use goalgraph_core::{derive_graph, CategoryList};

fn main() {
    println!("goalgraph_core ping={}", goalgraph_core::ping());
    println!("goalgraph_core version={}", goalgraph_core::core_version());

    let graph = derive_graph(&CategoryList::default_seed());
    println!(
        "seed_graph nodes={} edges={}",
        graph.node_count(),
        graph.edge_count()
    );
    for node in graph.nodes_by_position() {
        println!(
            "node id={} x={} y={}",
            node.id, node.position.x, node.position.y
        );
    }
}
