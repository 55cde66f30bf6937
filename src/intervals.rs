use crate::annotate::AnnotatedDate;
use crate::error::ScheduleError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One concrete meeting of a normal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SessionInterval {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Dates without a label, in input order.
pub fn filter_normal(annotated: &[AnnotatedDate]) -> Vec<NaiveDate> {
    annotated
        .iter()
        .filter(|entry| entry.is_normal())
        .map(|entry| entry.date)
        .collect()
}

pub fn build_intervals(
    dates: &[NaiveDate],
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<Vec<SessionInterval>, ScheduleError> {
    if start_time >= end_time {
        return Err(ScheduleError::InvalidTimeRange {
            start: start_time,
            end: end_time,
        });
    }
    Ok(dates
        .iter()
        .map(|date| SessionInterval {
            start: date.and_time(start_time),
            end: date.and_time(end_time),
        })
        .collect())
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_times() {
        assert_eq!(parse_time_of_day("10:15"), NaiveTime::from_hms_opt(10, 15, 0));
        assert_eq!(parse_time_of_day(" 08:00:30 "), NaiveTime::from_hms_opt(8, 0, 30));
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day("noon"), None);
    }
}
