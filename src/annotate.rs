use crate::holidays::{HolidayError, HolidayProvider, HolidaySet};
use crate::semester::{Break, SemesterConfig};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled date and, if the session does not take place, the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDate {
    pub date: NaiveDate,
    pub label: Option<String>,
}

impl AnnotatedDate {
    pub fn new(date: NaiveDate, label: Option<String>) -> Self {
        Self { date, label }
    }

    pub fn is_normal(&self) -> bool {
        self.label.is_none()
    }
}

/// Label a single date. Breaks are checked in configuration order before the
/// holiday set, so a holiday inside a break carries the break's name.
pub fn annotate_date(date: NaiveDate, breaks: &[Break], holidays: &HolidaySet) -> AnnotatedDate {
    if let Some(entry) = breaks.iter().find(|entry| entry.contains(date)) {
        return AnnotatedDate::new(date, Some(entry.name.clone()));
    }
    let label = holidays.name(date).map(ToOwned::to_owned);
    AnnotatedDate::new(date, label)
}

pub fn annotate(dates: &[NaiveDate], breaks: &[Break], holidays: &HolidaySet) -> Vec<AnnotatedDate> {
    dates
        .iter()
        .map(|date| annotate_date(*date, breaks, holidays))
        .collect()
}

/// Annotate `dates` with the semester's breaks and the public holidays of
/// `region` for every year the lecture period touches.
pub fn annotate_schedule<P>(
    dates: &[NaiveDate],
    config: &SemesterConfig,
    provider: &P,
    region: &str,
) -> Result<Vec<AnnotatedDate>, HolidayError>
where
    P: HolidayProvider + ?Sized,
{
    let years = config.lecture_period.years();
    let holidays = provider.holidays_for(region, &years)?;
    let annotated = annotate(dates, &config.breaks, &holidays);
    tracing::debug!(
        region,
        excluded = annotated.iter().filter(|entry| !entry.is_normal()).count(),
        total = annotated.len(),
        "annotated schedule"
    );
    Ok(annotated)
}
