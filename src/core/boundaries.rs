//! Group boundary construction
//!
//! Turns a sorted sequence of distinct calibration (FLAT) dates into the
//! ordered boundary sequence that delimits groups. Two policies:
//!
//! - **direct**: each calibration midnight is itself a group start.
//! - **midpoint**: the first group is open-ended on the left; every later
//!   group starts at the midpoint instant between consecutive calibration
//!   midnights.
//!
//! Group `i` covers `[b_i, b_{i+1})`; the last group extends to infinity.
//! An instant exactly on a boundary belongs to the later group.

use crate::core::models::GroupLogic;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// The left edge of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// No lower bound; admits every instant
    Open,
    /// Group starts at this instant (inclusive)
    At(NaiveDateTime),
}

impl Boundary {
    /// Whether an instant falls on or after this boundary
    pub fn admits(&self, instant: NaiveDateTime) -> bool {
        match self {
            Boundary::Open => true,
            Boundary::At(start) => instant >= *start,
        }
    }
}

/// Midnight at the start of a calendar date
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Build the boundary sequence for a sorted list of distinct calibration dates.
///
/// Returns one boundary per date: boundary `i` is the start of group `i + 1`.
/// An empty input yields an empty sequence (no groups).
pub fn build_boundaries(dates: &[NaiveDate], logic: GroupLogic) -> Vec<Boundary> {
    match logic {
        GroupLogic::Direct => dates.iter().map(|d| Boundary::At(midnight(*d))).collect(),
        GroupLogic::Midpoint => {
            let mut boundaries = Vec::with_capacity(dates.len());
            if dates.is_empty() {
                return boundaries;
            }
            boundaries.push(Boundary::Open);
            for pair in dates.windows(2) {
                let prev = midnight(pair[0]);
                let next = midnight(pair[1]);
                // Sub-day precision matters: a 5-day gap splits at noon.
                boundaries.push(Boundary::At(prev + (next - prev) / 2));
            }
            boundaries
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn at(m: u32, d: u32, h: u32) -> Boundary {
        Boundary::At(date(m, d).and_hms_opt(h, 0, 0).unwrap())
    }

    #[test]
    fn test_direct_boundaries_are_calibration_midnights() {
        let dates = vec![date(11, 15), date(11, 20), date(11, 27)];
        let boundaries = build_boundaries(&dates, GroupLogic::Direct);
        assert_eq!(boundaries, vec![at(11, 15, 0), at(11, 20, 0), at(11, 27, 0)]);
    }

    #[test]
    fn test_midpoint_boundaries() {
        let dates = vec![date(10, 15), date(10, 31)];
        let boundaries = build_boundaries(&dates, GroupLogic::Midpoint);
        // 16 days between midnights, half is 8: boundary at Oct 23 00:00.
        assert_eq!(boundaries, vec![Boundary::Open, at(10, 23, 0)]);
    }

    #[test]
    fn test_midpoint_odd_gap_splits_at_noon() {
        let dates = vec![date(11, 15), date(11, 20)];
        let boundaries = build_boundaries(&dates, GroupLogic::Midpoint);
        assert_eq!(boundaries, vec![Boundary::Open, at(11, 17, 12)]);
    }

    #[test]
    fn test_boundary_count_matches_date_count() {
        for logic in [GroupLogic::Direct, GroupLogic::Midpoint] {
            let dates = vec![date(1, 2), date(3, 4), date(5, 6), date(7, 8)];
            assert_eq!(build_boundaries(&dates, logic).len(), dates.len());
        }
    }

    #[test]
    fn test_boundaries_strictly_increasing() {
        let dates = vec![date(1, 1), date(1, 2), date(2, 1), date(6, 30)];
        for logic in [GroupLogic::Direct, GroupLogic::Midpoint] {
            let boundaries = build_boundaries(&dates, logic);
            for pair in boundaries.windows(2) {
                match (pair[0], pair[1]) {
                    (Boundary::Open, Boundary::At(_)) => {}
                    (Boundary::At(a), Boundary::At(b)) => assert!(a < b),
                    other => panic!("unexpected boundary order: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_empty_dates_yield_no_boundaries() {
        for logic in [GroupLogic::Direct, GroupLogic::Midpoint] {
            assert!(build_boundaries(&[], logic).is_empty());
        }
    }

    #[test]
    fn test_single_date_midpoint_is_open() {
        let boundaries = build_boundaries(&[date(10, 15)], GroupLogic::Midpoint);
        assert_eq!(boundaries, vec![Boundary::Open]);
    }

    #[test]
    fn test_boundary_admits_on_the_instant() {
        let b = at(10, 23, 0);
        assert!(b.admits(date(10, 23).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!b.admits(date(10, 22).and_hms_opt(23, 59, 59).unwrap()));
        assert!(Boundary::Open.admits(date(1, 1).and_hms_opt(0, 0, 0).unwrap()));
    }
}
