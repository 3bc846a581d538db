//! Test harness module
//!
//! The per-test façade and the once-per-suite initialization path.

mod context;
pub mod suite;

pub use context::TestContext;
