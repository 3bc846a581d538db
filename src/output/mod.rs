//! File output module
//!
//! Provides deterministic JSON artifacts for comparing cluster state.

mod json;

pub use json::write_json;
