//! frame-grouper - date-based grouping and renaming of imaging frames
//!
//! This library groups astronomical LIGHT (science) frames against the
//! capture dates of their FLAT (calibration) frames and renames both sets
//! with a stable `Grp_NN_` prefix, so downstream stacking tools can treat a
//! whole session uniformly.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs / core/**: Pure logic, no CLI concerns
//! - **bin/fgrp.rs**: Thin wrapper that calls the library
//!
//! The grouping itself is a pure function of one folder's inputs: distinct
//! FLAT dates become group boundaries (either directly or at the midpoints
//! between consecutive dates), each frame is assigned the last boundary at or
//! before its capture instant, and the group number becomes a zero-padded
//! filename prefix. Folders never share state; numbering restarts at
//! `start_index` in every folder.
//!
//! # Example
//!
//! ```
//! use frame_grouper::core::{
//!     build_boundaries, assign_group, GroupLogic,
//! };
//! use chrono::NaiveDate;
//!
//! let dates = vec![
//!     NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 10, 31).unwrap(),
//! ];
//! let boundaries = build_boundaries(&dates, GroupLogic::Midpoint);
//! let t = NaiveDate::from_ymd_opt(2024, 10, 24).unwrap()
//!     .and_hms_opt(21, 30, 0).unwrap();
//! assert_eq!(assign_group(&boundaries, t).ordinal, 2);
//! ```

pub mod core;

pub use crate::core::{
    apply_plan, assign_group, build_boundaries, capture_instant, Anomaly, Config, DefaultScanner,
    Frame, FrameKind, GroupLogic, GrouperError, GroupingConfig, GroupingEngine, RenamePlan, Result,
    RunSummary, SessionScanner,
};

/// Crate version, surfaced by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
