use crate::holidays::HolidayError;
use crate::persistence::PersistenceError;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// Failures raised by the pure schedule computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A date range whose start lies after its end.
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// A session whose end time is not after its start time.
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
    /// A weekday index outside 0..=6 (Monday = 0).
    InvalidWeekday(u8),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidRange { start, end } => {
                write!(f, "invalid date range: start {start} is after end {end}")
            }
            ScheduleError::InvalidTimeRange { start, end } => {
                write!(f, "invalid time range: end {end} is not after start {start}")
            }
            ScheduleError::InvalidWeekday(index) => {
                write!(f, "invalid weekday {index} (expected 0 = Monday .. 6 = Sunday)")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Any failure while assembling a course plan. Each variant carries the
/// collaborator's error unchanged.
#[derive(Debug)]
pub enum PlanError {
    Semester(PersistenceError),
    Schedule(ScheduleError),
    Holiday(HolidayError),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Semester(err) => write!(f, "{err}"),
            PlanError::Schedule(err) => write!(f, "{err}"),
            PlanError::Holiday(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Semester(err) => Some(err),
            PlanError::Schedule(err) => Some(err),
            PlanError::Holiday(err) => Some(err),
        }
    }
}

impl From<PersistenceError> for PlanError {
    fn from(value: PersistenceError) -> Self {
        Self::Semester(value)
    }
}

impl From<ScheduleError> for PlanError {
    fn from(value: ScheduleError) -> Self {
        Self::Schedule(value)
    }
}

impl From<HolidayError> for PlanError {
    fn from(value: HolidayError) -> Self {
        Self::Holiday(value)
    }
}
