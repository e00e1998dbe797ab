//! Category store use-case service.
//!
//! # Responsibility
//! - Own the in-memory `CategoryList` for one session.
//! - Load it once from the slot repository, save it after every append.
//! - Hand explicit snapshots to the graph engine.
//!
//! # Invariants
//! - `append` is the only mutation entry point.
//! - In-memory state is authoritative; persistence failures never roll it back.
//! - Malformed or missing persisted state degrades to the default seed.
//! - Log events carry ids and counts only, never category titles.

use crate::graph::derive::{derive_graph, derive_graph_with, LayoutConfig};
use crate::graph::model::Graph;
use crate::model::category::{Category, CategoryId, CategoryKind, CategoryList};
use crate::repo::slot_repo::SlotRepository;
use log::{debug, info, warn};

/// Well-known slot key holding the serialized category list.
pub const CATEGORY_SLOT_KEY: &str = "goal-categories";

/// Single owner of the session's category list.
pub struct CategoryStore<R: SlotRepository> {
    repo: R,
    categories: CategoryList,
}

impl<R: SlotRepository> CategoryStore<R> {
    /// Loads persisted categories, falling back to the default seed.
    ///
    /// Never fails; read and decode problems are logged and recovered.
    pub fn open(repo: R) -> Self {
        let categories = load_categories(&repo);
        Self { repo, categories }
    }

    /// Current ordered list.
    pub fn categories(&self) -> &CategoryList {
        &self.categories
    }

    /// Appends a new category of `kind` at the output/input boundary.
    ///
    /// # Contract
    /// - Title is the kind default, weight is 0, id is freshly generated.
    /// - Saves the whole list after the in-memory insert commits.
    /// - Returns the created category even when the save fails.
    pub fn append(&mut self, kind: CategoryKind) -> Category {
        let mut id = CategoryId::generate();
        while self.categories.contains(&id) {
            id = CategoryId::generate();
        }
        let category = Category::with_id(id, kind, kind.default_title(), 0);
        let index = self.categories.insert_at_boundary(category.clone());
        info!(
            "event=category_append module=store status=ok kind={} id={} index={} total={}",
            kind.as_str(),
            category.id,
            index,
            self.categories.len()
        );

        self.save();
        category
    }

    /// Derives the graph for the current list with the default layout.
    pub fn graph(&self) -> Graph {
        let graph = derive_graph(&self.categories);
        debug!(
            "event=graph_derive module=store status=ok nodes={} edges={}",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Derives the graph for the current list with an explicit layout.
    pub fn graph_with(&self, layout: &LayoutConfig) -> Graph {
        derive_graph_with(&self.categories, layout)
    }

    /// Backing slot repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    fn save(&self) {
        let raw = match self.categories.to_snapshot() {
            Ok(raw) => raw,
            Err(err) => {
                warn!("event=category_save module=store status=error error_code=encode_failed error={err}");
                return;
            }
        };

        match self.repo.write_slot(CATEGORY_SLOT_KEY, raw.as_str()) {
            Ok(()) => debug!(
                "event=category_save module=store status=ok total={}",
                self.categories.len()
            ),
            Err(err) => warn!(
                "event=category_save module=store status=error error_code=write_failed error={err}"
            ),
        }
    }
}

/// Reads the category slot and decodes it, or falls back to the seed.
pub fn load_categories<R: SlotRepository + ?Sized>(repo: &R) -> CategoryList {
    match repo.read_slot(CATEGORY_SLOT_KEY) {
        Ok(raw) => load_snapshot(raw.as_deref()),
        Err(err) => {
            warn!("event=category_load module=store status=fallback reason=read_failed error={err}");
            CategoryList::default_seed()
        }
    }
}

/// Decodes a previously saved snapshot.
///
/// `None` and malformed payloads both yield the default seed; the malformed
/// case is logged rather than surfaced.
pub fn load_snapshot(snapshot: Option<&str>) -> CategoryList {
    let Some(raw) = snapshot else {
        info!("event=category_load module=store status=fallback reason=missing");
        return CategoryList::default_seed();
    };

    match CategoryList::from_snapshot(raw) {
        Ok(categories) => {
            info!(
                "event=category_load module=store status=ok total={} outputs={}",
                categories.len(),
                categories.boundary()
            );
            categories
        }
        Err(err) => {
            warn!("event=category_load module=store status=fallback reason=malformed error={err}");
            CategoryList::default_seed()
        }
    }
}
