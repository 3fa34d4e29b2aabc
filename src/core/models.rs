//! Core data models for frame-grouper
//!
//! This module contains the fundamental data structures used throughout the grouper.

use crate::core::error::{GrouperError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix applied to every grouped filename
pub const GROUP_PREFIX: &str = "Grp_";

/// A frame on disk with its capture instant
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Full path to the file
    pub path: PathBuf,
    /// Capture instant extracted from the filename
    pub instant: NaiveDateTime,
}

impl Frame {
    /// Create a new Frame
    pub fn new(path: impl Into<PathBuf>, instant: NaiveDateTime) -> Self {
        Self {
            path: path.into(),
            instant,
        }
    }

    /// The bare filename, lossy on non-UTF-8 paths
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether this file already carries a group prefix
    pub fn already_grouped(&self) -> bool {
        self.file_name().starts_with(GROUP_PREFIX)
    }
}

/// Boundary policy for partitioning target frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupLogic {
    /// Calibration dates themselves become group starts
    #[default]
    Direct,
    /// Boundaries sit at the midpoint between consecutive calibration midnights
    Midpoint,
}

impl GroupLogic {
    /// Parse logic from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "direct" => Some(GroupLogic::Direct),
            "midpoint" => Some(GroupLogic::Midpoint),
            _ => None,
        }
    }
}

impl fmt::Display for GroupLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLogic::Direct => write!(f, "direct"),
            GroupLogic::Midpoint => write!(f, "midpoint"),
        }
    }
}

/// Configuration loaded from .fgrp.json
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Grouping logic ("direct" or "midpoint")
    #[serde(default)]
    pub logic: Option<String>,
    /// Starting group index
    #[serde(default)]
    pub start_index: Option<usize>,
    /// Filename patterns to consider (globs, empty = all)
    #[serde(default)]
    pub include: Vec<String>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Runtime configuration for one grouping run
#[derive(Debug, Clone)]
pub struct GroupingConfig {
    /// Boundary policy
    pub logic: GroupLogic,
    /// First group number (labels count up from here)
    pub start_index: usize,
    /// Filename patterns to consider (globs, empty = all)
    pub include: Vec<String>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            logic: GroupLogic::Direct,
            start_index: 1,
            include: vec![],
        }
    }
}

impl GroupingConfig {
    /// Validate the configuration before any folder is processed
    pub fn validate(&self) -> Result<()> {
        if self.start_index == 0 {
            return Err(GrouperError::invalid_config(
                "start_index must be a positive integer",
            ));
        }
        Ok(())
    }

    /// Merge values from a config file; existing CLI values win
    pub fn merged_with(mut self, file: &Config, cli_logic: bool, cli_start: bool) -> Result<Self> {
        if !cli_logic {
            if let Some(ref s) = file.logic {
                self.logic = GroupLogic::parse(s).ok_or_else(|| GrouperError::UnknownLogic {
                    value: s.clone(),
                })?;
            }
        }
        if !cli_start {
            if let Some(start) = file.start_index {
                self.start_index = start;
            }
        }
        if self.include.is_empty() {
            self.include = file.include.clone();
        }
        Ok(self)
    }
}

/// Which set a frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Calibration frame (defines the groups)
    Flat,
    /// Science frame (assigned against the boundaries)
    Light,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Flat => write!(f, "FLAT"),
            FrameKind::Light => write!(f, "LIGHT"),
        }
    }
}

/// One planned rename
#[derive(Debug, Clone, PartialEq)]
pub struct RenameEntry {
    /// Original full path
    pub original: PathBuf,
    /// New bare filename (same directory)
    pub new_name: String,
    /// Assigned group label value (start_index based)
    pub group: usize,
    /// FLAT or LIGHT
    pub kind: FrameKind,
}

/// The rename plan for one filter folder, plus any anomalies found while planning
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    /// Planned renames, calibration frames first
    pub entries: Vec<RenameEntry>,
    /// Non-fatal anomalies (clamped frames etc.)
    pub anomalies: Vec<Anomaly>,
}

impl RenamePlan {
    /// Number of planned renames for a given kind
    pub fn count(&self, kind: FrameKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

/// A non-fatal data-quality anomaly, aggregated into the run summary
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// Target frame predates the first boundary; clamped to group 1
    OutOfRangeFrame { path: PathBuf, instant: NaiveDateTime },
    /// No capture timestamp could be extracted from the filename
    UndatedFile { path: PathBuf },
    /// LIGHT folder has no FLAT sibling
    MissingFlatFolder { light_dir: PathBuf },
    /// FLAT folder exists but holds no dated frames
    EmptyCalibrationSet { flat_dir: PathBuf },
    /// Filesystem rename failed
    RenameFailed { from: PathBuf, message: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::OutOfRangeFrame { path, instant } => write!(
                f,
                "frame predates first group boundary (clamped to first group): {} ({})",
                path.display(),
                instant
            ),
            Anomaly::UndatedFile { path } => {
                write!(f, "could not extract a date from filename: {}", path.display())
            }
            Anomaly::MissingFlatFolder { light_dir } => write!(
                f,
                "FLAT folder not found next to LIGHT folder: {}",
                light_dir.display()
            ),
            Anomaly::EmptyCalibrationSet { flat_dir } => {
                write!(f, "no FLAT dates found in {}, folder skipped", flat_dir.display())
            }
            Anomaly::RenameFailed { from, message } => {
                write!(f, "rename failed for {}: {}", from.display(), message)
            }
        }
    }
}

/// Aggregated outcome of one run, printed at the end
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Filter folders fully processed
    pub folders_processed: usize,
    /// Folders skipped (no usable calibration set)
    pub folders_skipped: usize,
    /// FLAT files renamed
    pub flats_renamed: usize,
    /// LIGHT files renamed
    pub lights_renamed: usize,
    /// All anomalies encountered, in discovery order
    pub anomalies: Vec<Anomaly>,
}

impl RunSummary {
    /// Print the end-of-run report to stderr
    pub fn report(&self) {
        eprintln!("{}", "=".repeat(60));
        eprintln!("GROUPING SUMMARY");
        eprintln!("{}", "=".repeat(60));
        eprintln!("Folders processed: {}", self.folders_processed);
        eprintln!("Folders skipped:   {}", self.folders_skipped);
        eprintln!(
            "Files renamed:     {} ({} FLAT, {} LIGHT)",
            self.flats_renamed + self.lights_renamed,
            self.flats_renamed,
            self.lights_renamed
        );
        if self.anomalies.is_empty() {
            eprintln!("Warnings:          0");
        } else {
            eprintln!("Warnings:          {}", self.anomalies.len());
            for anomaly in &self.anomalies {
                eprintln!("  - {}", anomaly);
            }
        }
    }
}
