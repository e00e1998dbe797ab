//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key/value slot contract the store saves through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs never interpret slot contents.

pub mod slot_repo;
