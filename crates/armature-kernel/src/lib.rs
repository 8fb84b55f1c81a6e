//! # Armature Kernel
//!
//! Consistency checks for semantic skeleton documents: a writing project
//! described as divisions → segments → blocks, annotated with hooks, a
//! tension field and version bookkeeping.
//!
//! ## Architecture
//!
//! ```text
//! Skeleton              ← immutable document tree (model)
//!     │
//! SchemaEngine          ← optional, raw JSON only (schema)
//!     │
//! structure → hooks → tension → versioning     ← passes push Findings
//!     │
//! stats                 ← always computed, never fails
//!     │
//! ValidationReport      ← passed / errors / warnings / stats
//! ```
//!
//! Errors fail a document; warnings never do. Input that cannot be read as
//! a skeleton at all surfaces as [`ArmatureError`] before any pass runs.

pub mod config;
pub mod error;
pub mod hooks;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod stats;
pub mod structure;
pub mod tension;
pub mod versioning;

#[cfg(test)]
mod fixtures;

pub use config::ValidatorConfig;
pub use error::ArmatureError;
pub use loader::{list_documents, load_json};
pub use model::{
    Block, ChangelogEntry, Division, Hook, Resultant, Segment, SegmentStatus, Skeleton,
    TensionField, TensionSource,
};
pub use pipeline::Validator;
pub use report::{Severity, ValidationIssue, ValidationReport};
pub use schema::{SchemaEngine, SchemaViolation};
pub use stats::SkeletonStats;
