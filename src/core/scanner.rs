//! Session discovery
//!
//! This module provides the SessionScanner trait and default implementation
//! for walking a capture tree and pairing LIGHT folders with their FLAT
//! siblings. The layout follows common imaging-session conventions:
//!
//! ```text
//! WitchHead/System1/B/LIGHT/IC2118_..._2024-10-15_22-11-30.fits
//! WitchHead/System1/B/FLAT/FLAT_B_2024-10-15_18-00-00.fits
//! ```
//!
//! Every directory named `LIGHT` (case-insensitive) with a `FLAT` sibling is
//! one session folder; the files inside are read flat, not recursively.

use crate::core::error::{GrouperError, Result};
use crate::core::extract::capture_instant;
use crate::core::models::{Anomaly, Frame, GroupingConfig};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// One LIGHT/FLAT folder pair with its extracted frames
#[derive(Debug, Clone, Default)]
pub struct SessionFolder {
    /// The LIGHT directory
    pub light_dir: PathBuf,
    /// The sibling FLAT directory
    pub flat_dir: PathBuf,
    /// Calibration frames with extracted instants
    pub flats: Vec<Frame>,
    /// Target frames with extracted instants
    pub lights: Vec<Frame>,
}

/// Result of scanning a root tree
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Discovered session folders, in walk order
    pub sessions: Vec<SessionFolder>,
    /// Scan-level anomalies (missing FLAT siblings, undated files)
    pub anomalies: Vec<Anomaly>,
}

/// Trait for session discovery
///
/// This trait allows for mocking in tests and alternative layouts.
#[cfg_attr(test, automock)]
pub trait SessionScanner: Send + Sync {
    /// Walk a root directory and return the discovered sessions
    fn scan(&self, root: &Path, config: &GroupingConfig) -> Result<ScanReport>;
}

/// Default filesystem scanner
pub struct DefaultScanner;

impl DefaultScanner {
    /// Create a new DefaultScanner
    pub fn new() -> Self {
        Self
    }

    /// Build a GlobSet from include patterns; empty means match everything
    fn build_include_set(patterns: &[String]) -> Result<Option<GlobSet>> {
        if patterns.is_empty() {
            return Ok(None);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                GrouperError::invalid_config(format!("bad include pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| GrouperError::invalid_config(format!("include patterns: {}", e)))?;
        Ok(Some(set))
    }

    /// List the files of one folder and extract their capture instants.
    ///
    /// Undated files are reported, not renamed; files that already carry a
    /// group prefix are kept (their dates still count toward the calibration
    /// set) and filtered out later at planning time.
    fn collect_frames(
        dir: &Path,
        include: &Option<GlobSet>,
        anomalies: &mut Vec<Anomaly>,
    ) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };
            if let Some(set) = include {
                if !set.is_match(&name) {
                    continue;
                }
            }
            match capture_instant(&name) {
                Some(instant) => frames.push(Frame::new(path, instant)),
                None => anomalies.push(Anomaly::UndatedFile { path }),
            }
        }
        // Deterministic order regardless of readdir ordering.
        frames.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(frames)
    }

    fn is_light_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.eq_ignore_ascii_case("LIGHT"))
            .unwrap_or(false)
    }
}

impl Default for DefaultScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionScanner for DefaultScanner {
    fn scan(&self, root: &Path, config: &GroupingConfig) -> Result<ScanReport> {
        if !root.exists() {
            return Err(GrouperError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(GrouperError::invalid_config(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        let include = Self::build_include_set(&config.include)?;
        let mut report = ScanReport::default();

        for entry in walkdir::WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_dir() || !Self::is_light_dir(entry.path()) {
                continue;
            }
            let light_dir = entry.path().to_path_buf();
            let flat_dir = match light_dir.parent() {
                Some(parent) => parent.join("FLAT"),
                None => continue,
            };
            if !flat_dir.is_dir() {
                report.anomalies.push(Anomaly::MissingFlatFolder {
                    light_dir: light_dir.clone(),
                });
                continue;
            }

            let flats = Self::collect_frames(&flat_dir, &include, &mut report.anomalies)?;
            let lights = Self::collect_frames(&light_dir, &include, &mut report.anomalies)?;
            report.sessions.push(SessionFolder {
                light_dir,
                flat_dir,
                flats,
                lights,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"frame").unwrap();
    }

    fn session_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let filter = temp.path().join("System1").join("B");
        let light = filter.join("LIGHT");
        let flat = filter.join("FLAT");
        fs::create_dir_all(&light).unwrap();
        fs::create_dir_all(&flat).unwrap();
        touch(&flat, "FLAT_B_2024-10-15_18-00-00.fits");
        touch(&flat, "FLAT_B_2024-10-31_18-05-00.fits");
        touch(&light, "IC2118_B_2024-10-22_22-11-30.fits");
        touch(&light, "IC2118_B_2024-10-24_21-00-00.fits");
        temp
    }

    #[test]
    fn test_scan_finds_session_pair() {
        let temp = session_tree();
        let report = DefaultScanner::new()
            .scan(temp.path(), &GroupingConfig::default())
            .unwrap();
        assert_eq!(report.sessions.len(), 1);
        let session = &report.sessions[0];
        assert!(session.light_dir.ends_with("LIGHT"));
        assert!(session.flat_dir.ends_with("FLAT"));
        assert_eq!(session.flats.len(), 2);
        assert_eq!(session.lights.len(), 2);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_scan_missing_root_errors() {
        let result = DefaultScanner::new().scan(
            Path::new("/definitely/not/here"),
            &GroupingConfig::default(),
        );
        assert!(matches!(result, Err(GrouperError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_scan_reports_missing_flat_sibling() {
        let temp = TempDir::new().unwrap();
        let light = temp.path().join("System1").join("R").join("LIGHT");
        fs::create_dir_all(&light).unwrap();
        touch(&light, "IC2118_R_2024-10-22_22-11-30.fits");

        let report = DefaultScanner::new()
            .scan(temp.path(), &GroupingConfig::default())
            .unwrap();
        assert!(report.sessions.is_empty());
        assert!(matches!(
            report.anomalies.as_slice(),
            [Anomaly::MissingFlatFolder { .. }]
        ));
    }

    #[test]
    fn test_scan_reports_undated_files() {
        let temp = session_tree();
        let light = temp.path().join("System1").join("B").join("LIGHT");
        touch(&light, "notes.txt");

        let report = DefaultScanner::new()
            .scan(temp.path(), &GroupingConfig::default())
            .unwrap();
        assert_eq!(report.sessions[0].lights.len(), 2);
        assert!(report
            .anomalies
            .iter()
            .any(|a| matches!(a, Anomaly::UndatedFile { .. })));
    }

    #[test]
    fn test_scan_include_patterns_filter() {
        let temp = session_tree();
        let light = temp.path().join("System1").join("B").join("LIGHT");
        touch(&light, "IC2118_B_2024-10-23_20-00-00.cr3");

        let config = GroupingConfig {
            include: vec!["*.fits".to_string()],
            ..Default::default()
        };
        let report = DefaultScanner::new().scan(temp.path(), &config).unwrap();
        assert_eq!(report.sessions[0].lights.len(), 2);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_scan_bad_include_pattern_fails_fast() {
        let temp = session_tree();
        let config = GroupingConfig {
            include: vec!["[".to_string()],
            ..Default::default()
        };
        let result = DefaultScanner::new().scan(temp.path(), &config);
        assert!(matches!(result, Err(GrouperError::InvalidConfig { .. })));
    }

    #[test]
    fn test_scan_case_insensitive_light_dir() {
        let temp = TempDir::new().unwrap();
        let filter = temp.path().join("M42").join("L");
        fs::create_dir_all(filter.join("Light")).unwrap();
        fs::create_dir_all(filter.join("FLAT")).unwrap();
        touch(&filter.join("FLAT"), "FLAT_L_2024-11-15.fits");
        touch(&filter.join("Light"), "M42_L_2024-11-16_01-00-00.fits");

        let report = DefaultScanner::new()
            .scan(temp.path(), &GroupingConfig::default())
            .unwrap();
        assert_eq!(report.sessions.len(), 1);
    }

    #[test]
    fn test_scan_frames_sorted_by_path() {
        let temp = session_tree();
        let report = DefaultScanner::new()
            .scan(temp.path(), &GroupingConfig::default())
            .unwrap();
        let lights = &report.sessions[0].lights;
        assert!(lights[0].path < lights[1].path);
    }
}
