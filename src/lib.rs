pub mod annotate;
pub mod error;
pub mod export;
pub mod generator;
pub mod holidays;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod intervals;
pub mod logging;
pub mod persistence;
pub mod plan;
pub mod semester;
pub mod settings;

pub use annotate::{AnnotatedDate, annotate, annotate_date, annotate_schedule};
pub use error::{PlanError, ScheduleError};
pub use export::{ExportError, ExportFormat, filename_base, render_export, write_export};
pub use generator::{generate, next_weekday, weekday_from_index};
pub use holidays::{FixedHolidays, GermanHolidays, GermanRegion, HolidayError, HolidayProvider, HolidaySet};
pub use intervals::{SessionInterval, build_intervals, filter_normal, parse_time_of_day};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteSemesterStore;
pub use persistence::{
    JsonSemesterStore, PersistenceError, PersistenceResult, SemesterStore, load_semesters_from_json,
    save_semesters_to_json,
};
pub use plan::{CoursePlan, PlanRequest, plan_course};
pub use semester::{Break, LecturePeriod, SemesterConfig};
pub use settings::{Locale, Settings};
