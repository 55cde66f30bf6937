use crate::error::ScheduleError;
use crate::semester::LecturePeriod;
use chrono::{Datelike, Days, NaiveDate, Weekday};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Convert a Monday-based index (Monday = 0 .. Sunday = 6) into a weekday.
pub fn weekday_from_index(index: u8) -> Result<Weekday, ScheduleError> {
    ALL_WEEKDAYS
        .get(usize::from(index))
        .copied()
        .ok_or(ScheduleError::InvalidWeekday(index))
}

/// First date on or after `from` that falls on `weekday`.
pub fn next_weekday(from: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let offset = (7 + weekday.num_days_from_monday() - from.weekday().num_days_from_monday()) % 7;
    from.checked_add_days(Days::new(u64::from(offset)))
}

/// Every `weekday` inside the lecture period, both ends inclusive, in
/// ascending order.
pub fn generate(weekday: Weekday, period: &LecturePeriod) -> Result<Vec<NaiveDate>, ScheduleError> {
    if period.start > period.end {
        return Err(ScheduleError::InvalidRange {
            start: period.start,
            end: period.end,
        });
    }

    let mut dates = Vec::new();
    let mut current = next_weekday(period.start, weekday);
    while let Some(date) = current {
        if date > period.end {
            break;
        }
        dates.push(date);
        current = date.checked_add_days(Days::new(7));
    }

    tracing::trace!(weekday = %weekday, count = dates.len(), "generated weekly dates");
    Ok(dates)
}
