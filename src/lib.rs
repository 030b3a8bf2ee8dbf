//! Scent Quiz — fragrance discovery routing core.
//!
//! A branching questionnaire engine: a static quiz graph, hybrid
//! remote-AI/local-heuristic answer classification, and session state with
//! back navigation. UI rendering and recommendation fetching live outside
//! this crate and consume the emitted outcomes.

pub mod classifier;
pub mod config;
pub mod error;
pub mod graph;
pub mod orchestrator;
pub mod session;
