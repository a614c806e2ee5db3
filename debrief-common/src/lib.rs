//! # Debrief Common Library
//!
//! Shared code for the debrief service including:
//! - Record data model (debrief, content items, tasks, lessons)
//! - Pure input normalization transforms
//! - Enrichment merging and completeness validation
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod enrichment;
pub mod error;
pub mod identity;
pub mod model;
pub mod sections;
pub mod timestamp;
pub mod validate;

pub use error::{Error, Result};
pub use model::DebriefInput;
