//! Core types, traits, errors, config, events, tracing, and constants for the
//! SORA assessment engine.
//!
//! `sora-analysis` builds the assessment pipeline on top of this crate;
//! embedders that only need the data model (operation snapshots, risk
//! classes, rule revisions) can depend on it directly.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;
