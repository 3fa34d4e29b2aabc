//! Grouping engine
//!
//! Composes boundary construction and frame assignment into a rename plan for
//! one session folder, and drives the per-folder loop over a scanned tree.
//! Planning is pure: nothing here touches the filesystem.
//!
//! Calibration frames self-assign by their own distinct-date index (they
//! define the boundaries); target frames go through the boundary search.
//! Group numbering restarts in every folder at `start_index` — there is no
//! counter shared across folders.

use crate::core::assign::{assign_group, group_label, label_width, prefixed_name};
use crate::core::boundaries::build_boundaries;
use crate::core::error::{GrouperError, Result};
use crate::core::models::{Anomaly, FrameKind, GroupingConfig, RenameEntry, RenamePlan};
use crate::core::scanner::{SessionFolder, SessionScanner};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// The planned renames for one session folder
#[derive(Debug, Clone)]
pub struct FolderPlan {
    /// The LIGHT directory this plan belongs to
    pub light_dir: PathBuf,
    /// Planned renames and local anomalies
    pub plan: RenamePlan,
}

/// All folder plans for one root, plus anything that went wrong along the way
#[derive(Debug, Clone, Default)]
pub struct RootPlan {
    /// One plan per usable session folder
    pub folders: Vec<FolderPlan>,
    /// Folders skipped for lack of a calibration set
    pub skipped: usize,
    /// Scan-level and skip anomalies
    pub anomalies: Vec<Anomaly>,
}

/// Stateless grouping engine, configured once per run
pub struct GroupingEngine {
    config: GroupingConfig,
}

impl GroupingEngine {
    /// Create an engine; fails fast on an invalid configuration
    pub fn new(config: GroupingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Compute the rename plan for one session folder.
    ///
    /// Dates are taken from every FLAT frame, renamed or not, so re-running
    /// over a partially grouped tree sees the same calibration set. Frames
    /// that already carry a group prefix produce no entries, which makes the
    /// whole operation idempotent.
    pub fn plan_folder(&self, session: &SessionFolder) -> Result<RenamePlan> {
        let mut dates: Vec<NaiveDate> =
            session.flats.iter().map(|f| f.instant.date()).collect();
        dates.sort();
        dates.dedup();
        if dates.is_empty() {
            return Err(GrouperError::EmptyCalibrationSet {
                path: session.flat_dir.clone(),
            });
        }

        let start = self.config.start_index;
        let width = label_width(start + dates.len() - 1);
        let boundaries = build_boundaries(&dates, self.config.logic);
        let mut plan = RenamePlan::default();

        for frame in &session.flats {
            if frame.already_grouped() {
                continue;
            }
            // The date came from this same set, so the search cannot miss;
            // fall back to the first group all the same.
            let ordinal = dates
                .binary_search(&frame.instant.date())
                .map(|i| i + 1)
                .unwrap_or(1);
            let label = group_label(ordinal, start, width);
            plan.entries.push(RenameEntry {
                original: frame.path.clone(),
                new_name: prefixed_name(&label, &frame.file_name()),
                group: start + ordinal - 1,
                kind: FrameKind::Flat,
            });
        }

        for frame in &session.lights {
            if frame.already_grouped() {
                continue;
            }
            let assignment = assign_group(&boundaries, frame.instant);
            if assignment.clamped {
                plan.anomalies.push(Anomaly::OutOfRangeFrame {
                    path: frame.path.clone(),
                    instant: frame.instant,
                });
            }
            let label = group_label(assignment.ordinal, start, width);
            plan.entries.push(RenameEntry {
                original: frame.path.clone(),
                new_name: prefixed_name(&label, &frame.file_name()),
                group: start + assignment.ordinal - 1,
                kind: FrameKind::Light,
            });
        }

        Ok(plan)
    }

    /// Scan a root and plan every discovered session folder.
    ///
    /// A folder with no usable calibration set is skipped and reported;
    /// everything else propagates.
    pub fn plan_root(&self, scanner: &dyn SessionScanner, root: &Path) -> Result<RootPlan> {
        let report = scanner.scan(root, &self.config)?;
        let mut root_plan = RootPlan {
            anomalies: report.anomalies,
            ..Default::default()
        };

        for session in &report.sessions {
            match self.plan_folder(session) {
                Ok(plan) => root_plan.folders.push(FolderPlan {
                    light_dir: session.light_dir.clone(),
                    plan,
                }),
                Err(GrouperError::EmptyCalibrationSet { path }) => {
                    root_plan.skipped += 1;
                    root_plan
                        .anomalies
                        .push(Anomaly::EmptyCalibrationSet { flat_dir: path });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(root_plan)
    }
}
