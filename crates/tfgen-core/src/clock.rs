//! Clock abstraction for timestamp-derived identifiers
//!
//! Generation directories and branch names are both derived from the current
//! time, in two different formats: directory names use an underscore
//! (`20250101_120000`), ref names use a hyphen (`20250101-120000`).

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::Result;

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// `YYYYMMDD_HHMMSS`, used for generation directory names
pub fn generation_id(at: OffsetDateTime) -> Result<String> {
    Ok(at.format(format_description!(
        "[year][month][day]_[hour][minute][second]"
    ))?)
}

/// `YYYYMMDD-HHMMSS`, used for branch names
pub fn branch_stamp(at: OffsetDateTime) -> Result<String> {
    Ok(at.format(format_description!(
        "[year][month][day]-[hour][minute][second]"
    ))?)
}

/// Full date-time for human-readable summaries
pub fn full_timestamp(at: OffsetDateTime) -> Result<String> {
    Ok(at.format(&Rfc3339)?)
}
