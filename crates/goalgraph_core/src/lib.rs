//! Core domain logic for GoalGraph.
//! This crate is the single source of truth for category ordering and graph
//! derivation invariants.

pub mod db;
pub mod graph;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use graph::derive::{derive_graph, derive_graph_with, LayoutConfig};
pub use graph::model::{
    Graph, GraphEdge, GraphNode, Handle, InteractionPolicy, NodeId, NodeKind, Position,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{
    parse_category_kind, Category, CategoryId, CategoryKind, CategoryList, SnapshotError,
    DEFAULT_INPUT_TITLE, DEFAULT_OUTPUT_TITLE,
};
pub use model::sub_goal::{GoalProgress, SubGoal, SubGoalId};
pub use repo::slot_repo::{
    InMemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use service::category_store::{
    load_categories, load_snapshot, CategoryStore, CATEGORY_SLOT_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
