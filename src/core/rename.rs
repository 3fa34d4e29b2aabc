//! Rename application
//!
//! Executes a rename plan against the filesystem. Each file stays in its own
//! directory; only the name gains the group prefix. Per-file failures are
//! reported and never abort the folder, and nothing is ever rolled back.

use crate::core::models::{Anomaly, FrameKind, RenamePlan};
use std::path::PathBuf;

/// What actually happened on disk
#[derive(Debug, Clone, Default)]
pub struct ApplyOutcome {
    /// FLAT files renamed
    pub flats_renamed: usize,
    /// LIGHT files renamed
    pub lights_renamed: usize,
    /// Failed renames
    pub anomalies: Vec<Anomaly>,
}

/// Apply every entry of a plan with `fs::rename`
pub fn apply_plan(plan: &RenamePlan) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    for entry in &plan.entries {
        let target = match entry.original.parent() {
            Some(parent) => parent.join(&entry.new_name),
            None => PathBuf::from(&entry.new_name),
        };
        if target.exists() {
            outcome.anomalies.push(Anomaly::RenameFailed {
                from: entry.original.clone(),
                message: format!("target already exists: {}", target.display()),
            });
            continue;
        }
        match std::fs::rename(&entry.original, &target) {
            Ok(()) => {
                eprintln!(
                    "Renamed {} file: {} -> {}",
                    entry.kind,
                    entry.original.display(),
                    target.display()
                );
                match entry.kind {
                    FrameKind::Flat => outcome.flats_renamed += 1,
                    FrameKind::Light => outcome.lights_renamed += 1,
                }
            }
            Err(e) => outcome.anomalies.push(Anomaly::RenameFailed {
                from: entry.original.clone(),
                message: e.to_string(),
            }),
        }
    }

    outcome
}
