//! Graph derivation engine.
//!
//! # Responsibility
//! - Project the category list onto a positioned, read-only node/edge graph.
//! - Stay free of state so callers may re-derive on every change.
//!
//! # See also
//! - `service::category_store::CategoryStore::graph`

pub mod derive;
pub mod model;
