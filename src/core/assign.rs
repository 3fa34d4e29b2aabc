//! Frame-to-group assignment and label formatting
//!
//! Locates the group a frame instant falls into (the greatest boundary at or
//! before the instant, found by binary search) and renders the externally
//! visible zero-padded label and prefixed filename.

use crate::core::boundaries::Boundary;
use crate::core::models::GROUP_PREFIX;
use chrono::NaiveDateTime;

/// The outcome of assigning one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// 1-based group ordinal within this folder
    pub ordinal: usize,
    /// True when the instant preceded every boundary and was clamped to group 1
    pub clamped: bool,
}

/// Assign an instant to a group over a strictly increasing boundary sequence.
///
/// Returns the greatest ordinal `k` with `b_k <= instant`. An instant earlier
/// than the first boundary is a data-quality anomaly: it is clamped to group 1
/// and flagged, never rejected.
pub fn assign_group(boundaries: &[Boundary], instant: NaiveDateTime) -> Assignment {
    let admitted = boundaries.partition_point(|b| b.admits(instant));
    if admitted == 0 {
        Assignment {
            ordinal: 1,
            clamped: true,
        }
    } else {
        Assignment {
            ordinal: admitted,
            clamped: false,
        }
    }
}

/// Label width for a folder: at least two digits, widening past 99 groups
pub fn label_width(highest_label: usize) -> usize {
    let digits = highest_label.to_string().len();
    digits.max(2)
}

/// Render the zero-padded group label for an ordinal
pub fn group_label(ordinal: usize, start_index: usize, width: usize) -> String {
    format!("{:0width$}", start_index + ordinal - 1, width = width)
}

/// Prefix a filename with its group label; the original name is untouched
pub fn prefixed_name(label: &str, original: &str) -> String {
    format!("{}{}_{}", GROUP_PREFIX, label, original)
}
