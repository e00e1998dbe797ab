//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, engine and repository calls into use-case APIs.
//! - Keep FFI/presentation callers decoupled from storage details.

pub mod category_store;
