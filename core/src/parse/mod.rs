//! Heuristic response extraction: model free text -> structured Decision
//!
//! This module provides:
//! - `confidence` - static phrase lexicon mapped to confidence tiers
//! - `steps` - numbered-step extraction
//! - `flight`, `market`, `code` - per-domain parsers composing isolated,
//!   `Option`-returning pattern functions in a documented priority order
//!
//! All parsing is pure (no I/O) and never fails past this boundary: each
//! parser returns a complete `Decision`.

pub mod code;
pub mod confidence;
pub mod flight;
pub mod market;
pub mod steps;

pub use confidence::{confidence_tier, determine_confidence, ConfidenceTier};
pub use steps::extract_steps;
