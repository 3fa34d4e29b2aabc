//! Capture timestamp extraction from filenames
//!
//! Capture software embeds the session timestamp in the filename, e.g.
//! `IC2118_Pane_01_System_1_B_2024-10-15_22-11-30_300s.fits`. The date part
//! is mandatory for grouping; the time part is used at full precision when
//! present and falls back to midnight otherwise.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIMESTAMP_RE: Regex =
        Regex::new(r"(\d{4})-(\d{2})-(\d{2})(?:[_T ](\d{2})-(\d{2})-(\d{2}))?")
            .expect("timestamp regex is valid");
}

/// Extract the capture instant from a filename.
///
/// Returns `None` when no `YYYY-MM-DD` token is present or the token is not a
/// real calendar date.
pub fn capture_instant(filename: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_RE.captures(filename)?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    let time = match (caps.get(4), caps.get(5), caps.get(6)) {
        (Some(h), Some(m), Some(s)) => NaiveTime::from_hms_opt(
            h.as_str().parse().ok()?,
            m.as_str().parse().ok()?,
            s.as_str().parse().ok()?,
        )?,
        _ => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

/// Extract just the capture date from a filename
pub fn capture_date(filename: &str) -> Option<NaiveDate> {
    capture_instant(filename).map(|t| t.date())
}
