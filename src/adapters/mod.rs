// Adapters layer: concrete implementations for external systems (http download, process launch).

pub mod http;
pub mod launcher;
