//! # Timecard Agent
//!
//! A timecard digitizer with AI-powered extraction.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (timecards, clock times, durations)
//! - **agents**: AI-powered extraction agents and the vision backend
//! - **normalize**: Model-output cleanup and parsing
//! - **calculate**: Worked-hours and total computation
//! - **enrich**: Per-entry and per-card hour attachment
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod agents;
pub mod api;
pub mod calculate;
pub mod config;
pub mod enrich;
pub mod models;
pub mod normalize;

pub use models::*;
