//! Core module for frame-grouper
//!
//! This module provides the grouping pipeline, from session discovery to the
//! on-disk rename. It follows a modular architecture for testability.
//!
//! # Architecture
//!
//! - `models`: Core data structures (Frame, GroupingConfig, RenamePlan)
//! - `error`: Error types using thiserror
//! - `extract`: Capture timestamp extraction from filenames
//! - `boundaries`: Group boundary construction (direct / midpoint policies)
//! - `assign`: Boundary search, label formatting, filename prefixing
//! - `scanner`: LIGHT/FLAT session discovery with SessionScanner trait
//! - `engine`: GroupingEngine orchestration (pure planning)
//! - `rename`: Plan application against the filesystem

pub mod assign;
pub mod boundaries;
pub mod engine;
pub mod error;
pub mod extract;
pub mod models;
pub mod rename;
pub mod scanner;

// Re-export commonly used types
pub use assign::{assign_group, group_label, label_width, prefixed_name, Assignment};
pub use boundaries::{build_boundaries, midnight, Boundary};
pub use engine::{FolderPlan, GroupingEngine, RootPlan};
pub use error::{GrouperError, Result};
pub use extract::{capture_date, capture_instant};
pub use models::{
    Anomaly, Config, Frame, FrameKind, GroupLogic, GroupingConfig, RenameEntry, RenamePlan,
    RunSummary, GROUP_PREFIX,
};
pub use rename::{apply_plan, ApplyOutcome};
pub use scanner::{DefaultScanner, ScanReport, SessionFolder, SessionScanner};
