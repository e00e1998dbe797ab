//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose category list, append, and graph derivation to the UI via FRB.
//! - Flatten core types into plain string/number envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call reads the persisted slot, so no list state lives here.

use goalgraph_core::db::open_db;
use goalgraph_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    parse_category_kind, ping as ping_inner, Category, CategoryStore, Graph, GraphEdge, GraphNode,
    NodeKind, SqliteSlotRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "goalgraph.sqlite3";
const DB_PATH_ENV: &str = "GOALGRAPH_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One category card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    /// Stable category id.
    pub category_id: String,
    pub title: String,
    /// Number of sub-goals shown on the card.
    pub goal_count: u32,
    /// `output|input`.
    pub kind: String,
}

/// Ordered category list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListResponse {
    pub ok: bool,
    /// Outputs first, then inputs, each in stacking order.
    pub items: Vec<CategoryItem>,
    pub message: String,
}

/// Append result envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryActionResponse {
    pub ok: bool,
    /// Created category, present only on success.
    pub category: Option<CategoryItem>,
    pub message: String,
}

/// One positioned graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNodeItem {
    pub node_id: String,
    /// `category|hub|action`.
    pub kind: String,
    /// Set for `category` nodes.
    pub category_id: Option<String>,
    /// `output|input`, set for `action` nodes.
    pub action_kind: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// One directed connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdgeItem {
    pub edge_id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
}

/// Derived graph envelope.
///
/// The UI must render it read-only: no dragging, connecting, pan or zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphResponse {
    pub ok: bool,
    /// Nodes ordered top to bottom.
    pub nodes: Vec<GraphNodeItem>,
    pub edges: Vec<GraphEdgeItem>,
    pub message: String,
}

/// Lists categories in stacking order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Missing or malformed persisted state yields the default seed.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_list() -> CategoryListResponse {
    match with_category_store(|store| {
        store
            .categories()
            .iter()
            .map(to_category_item)
            .collect::<Vec<_>>()
    }) {
        Ok(items) => CategoryListResponse {
            ok: true,
            message: format!("Loaded {} categories.", items.len()),
            items,
        },
        Err(err) => CategoryListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("categories_list failed: {err}"),
        },
    }
}

/// Appends a category of `kind` (`output|input`) at the partition boundary.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unknown `kind` values return `ok=false` without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn category_append(kind: String) -> CategoryActionResponse {
    let Some(kind) = parse_category_kind(kind.as_str()) else {
        return CategoryActionResponse {
            ok: false,
            category: None,
            message: format!("category_append failed: unsupported kind `{}`", kind.trim()),
        };
    };

    match with_category_store(|store| store.append(kind)) {
        Ok(category) => CategoryActionResponse {
            ok: true,
            category: Some(to_category_item(&category)),
            message: "Category added.".to_string(),
        },
        Err(err) => CategoryActionResponse {
            ok: false,
            category: None,
            message: format!("category_append failed: {err}"),
        },
    }
}

/// Derives the positioned graph for the persisted category list.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Deterministic: unchanged storage yields an identical response.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_derive() -> GraphResponse {
    match with_category_store(|store| store.graph()) {
        Ok(graph) => to_graph_response(&graph),
        Err(err) => GraphResponse {
            ok: false,
            nodes: Vec::new(),
            edges: Vec::new(),
            message: format!("graph_derive failed: {err}"),
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_category_store<T>(
    f: impl FnOnce(&mut CategoryStore<SqliteSlotRepository<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("DB open failed: {err}")
    })?;
    let repo =
        SqliteSlotRepository::try_new(&conn).map_err(|err| format!("repo init failed: {err}"))?;
    let mut store = CategoryStore::open(repo);
    Ok(f(&mut store))
}

fn to_category_item(category: &Category) -> CategoryItem {
    CategoryItem {
        category_id: category.id.to_string(),
        title: category.title.clone(),
        goal_count: category.weight,
        kind: category.kind.as_str().to_string(),
    }
}

fn to_graph_response(graph: &Graph) -> GraphResponse {
    let nodes = graph
        .nodes_by_position()
        .into_iter()
        .map(to_graph_node_item)
        .collect::<Vec<_>>();
    let edges = graph
        .edges
        .iter()
        .map(to_graph_edge_item)
        .collect::<Vec<_>>();
    GraphResponse {
        ok: true,
        message: format!("Derived {} nodes and {} edges.", nodes.len(), edges.len()),
        nodes,
        edges,
    }
}

fn to_graph_node_item(node: &GraphNode) -> GraphNodeItem {
    let (kind, category_id, action_kind) = match &node.kind {
        NodeKind::Category { category } => ("category", Some(category.id.to_string()), None),
        NodeKind::Hub => ("hub", None, None),
        NodeKind::Action { kind } => ("action", None, Some(kind.as_str().to_string())),
    };
    GraphNodeItem {
        node_id: node.id.to_string(),
        kind: kind.to_string(),
        category_id,
        action_kind,
        x: node.position.x,
        y: node.position.y,
    }
}

fn to_graph_edge_item(edge: &GraphEdge) -> GraphEdgeItem {
    GraphEdgeItem {
        edge_id: edge.id.clone(),
        source: edge.source.to_string(),
        target: edge.target.to_string(),
        source_handle: edge.source_handle.as_str().to_string(),
        target_handle: edge.target_handle.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        categories_list, category_append, core_version, graph_derive, init_logging, ping,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn category_append_rejects_unknown_kind() {
        let response = category_append("sideways".to_string());
        assert!(!response.ok);
        assert!(response.category.is_none());
        assert!(response.message.contains("sideways"));
    }

    #[test]
    fn category_append_persists_and_keeps_partitions_contiguous() {
        let response = category_append(" Output ".to_string());
        assert!(response.ok, "{}", response.message);
        let created = response.category.expect("created category");
        assert_eq!(created.kind, "output");
        assert_eq!(created.title, "New Output Category");
        assert_eq!(created.goal_count, 0);

        let listed = categories_list();
        assert!(listed.ok, "{}", listed.message);
        assert!(listed
            .items
            .iter()
            .any(|item| item.category_id == created.category_id));

        let first_input = listed
            .items
            .iter()
            .position(|item| item.kind == "input")
            .unwrap_or(listed.items.len());
        assert!(listed.items[first_input..]
            .iter()
            .all(|item| item.kind == "input"));
    }

    #[test]
    fn graph_derive_matches_listed_categories() {
        let listed = categories_list();
        let graph = graph_derive();
        assert!(graph.ok, "{}", graph.message);
        assert!(graph.nodes.len() >= 3);
        assert_eq!(graph.nodes.len(), graph.edges.len() + 1);

        let hub = graph
            .nodes
            .iter()
            .find(|node| node.kind == "hub")
            .expect("hub node");
        assert_eq!(hub.node_id, "hub");
        assert!(listed.items.len() + 3 <= graph.nodes.len());
    }
}
