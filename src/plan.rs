use crate::annotate::{AnnotatedDate, annotate_schedule};
use crate::error::PlanError;
use crate::generator::generate;
use crate::holidays::HolidayProvider;
use crate::intervals::{SessionInterval, build_intervals, filter_normal};
use crate::persistence::SemesterStore;
use chrono::{NaiveTime, Weekday};
use serde::Serialize;

/// What to schedule: one weekday slot in one semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub semester: String,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Every weekly date of a course with its annotation, plus the concrete
/// meeting slots of the sessions that take place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoursePlan {
    pub semester: String,
    pub weekday: Weekday,
    pub annotated: Vec<AnnotatedDate>,
    pub intervals: Vec<SessionInterval>,
}

impl CoursePlan {
    pub fn normal_sessions(&self) -> usize {
        self.intervals.len()
    }

    pub fn excluded(&self) -> impl Iterator<Item = &AnnotatedDate> {
        self.annotated.iter().filter(|entry| !entry.is_normal())
    }
}

pub fn plan_course<S, P>(
    store: &S,
    provider: &P,
    region: &str,
    request: &PlanRequest,
) -> Result<CoursePlan, PlanError>
where
    S: SemesterStore + ?Sized,
    P: HolidayProvider + ?Sized,
{
    let config = store.load(&request.semester)?;
    let dates = generate(request.weekday, &config.lecture_period)?;
    tracing::debug!(
        semester = %request.semester,
        weekday = %request.weekday,
        count = dates.len(),
        "generated schedule dates"
    );

    let annotated = annotate_schedule(&dates, &config, provider, region)?;
    let normal = filter_normal(&annotated);
    let intervals = build_intervals(&normal, request.start_time, request.end_time)?;
    tracing::debug!(sessions = intervals.len(), "built session intervals");

    Ok(CoursePlan {
        semester: request.semester.clone(),
        weekday: request.weekday,
        annotated,
        intervals,
    })
}
