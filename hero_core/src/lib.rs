#![forbid(unsafe_code)]

//! Core domain model and business logic for the Heroforge system.
//!
//! This crate provides:
//! - Domain types (workout categories, distribution stats, hero paths, flows)
//! - Hero path classification
//! - Level-up flow sequencing
//! - XP accounting and content unlock detection
//! - Workout history ingest

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod records;
pub mod leveling;
pub mod classifier;
pub mod flow;
pub mod mailbox;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{ClassifierParams, Config, LevelingParams};
pub use classifier::classify;
pub use flow::FlowSequencer;
pub use mailbox::{FlowMailbox, FlowPost, SequencerEvent};
pub use leveling::{apply_xp, level_for_xp, xp_for_level, LevelOutcome, XpOutcome};
pub use records::load_workout_records;
