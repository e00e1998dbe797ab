//! Flutter-facing bindings over `goalgraph_core`.

pub mod api;
