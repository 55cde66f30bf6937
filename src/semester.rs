use crate::error::ScheduleError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Start and end of the lecture period, both inclusive.
///
/// Serialized as a two-element array: `["2024-04-08", "2024-07-19"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(NaiveDate, NaiveDate)", into = "(NaiveDate, NaiveDate)")]
pub struct LecturePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LecturePeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every calendar year the period touches.
    pub fn years(&self) -> BTreeSet<i32> {
        (self.start.year()..=self.end.year()).collect()
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.start > self.end {
            return Err(ScheduleError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl From<(NaiveDate, NaiveDate)> for LecturePeriod {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        Self { start, end }
    }
}

impl From<LecturePeriod> for (NaiveDate, NaiveDate) {
    fn from(period: LecturePeriod) -> Self {
        (period.start, period.end)
    }
}

/// A named recess. Serialized as `["Pfingstpause", "2024-05-20", "2024-05-24"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(String, NaiveDate, NaiveDate)",
    into = "(String, NaiveDate, NaiveDate)"
)]
pub struct Break {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Break {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl From<(String, NaiveDate, NaiveDate)> for Break {
    fn from((name, start, end): (String, NaiveDate, NaiveDate)) -> Self {
        Self { name, start, end }
    }
}

impl From<Break> for (String, NaiveDate, NaiveDate) {
    fn from(value: Break) -> Self {
        (value.name, value.start, value.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterConfig {
    pub lecture_period: LecturePeriod,
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl SemesterConfig {
    pub fn new(lecture_period: LecturePeriod, breaks: Vec<Break>) -> Self {
        Self {
            lecture_period,
            breaks,
        }
    }

    /// Check that the lecture period and every break run forwards. Breaks may
    /// overlap each other.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.lecture_period.validate()?;
        for entry in &self.breaks {
            if entry.start > entry.end {
                return Err(ScheduleError::InvalidRange {
                    start: entry.start,
                    end: entry.end,
                });
            }
        }
        Ok(())
    }
}
