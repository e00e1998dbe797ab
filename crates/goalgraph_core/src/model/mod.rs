//! Goal domain model.
//!
//! # Responsibility
//! - Define the canonical records the store, engine and persistence share.
//! - Keep partition order rules next to the data they protect.
//!
//! # Invariants
//! - Every category is identified by a stable `CategoryId`.
//! - Categories are never deleted; the list only grows.

pub mod category;
pub mod sub_goal;
