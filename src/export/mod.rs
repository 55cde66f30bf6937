use crate::plan::CoursePlan;
use crate::settings::Locale;
use chrono::{DateTime, Utc};
use polars::prelude::PolarsError;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

pub mod ics;
pub mod table;

pub use ics::render_ics;
pub use table::{render_markdown, render_text_table, schedule_table, write_csv};

#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Csv(csv::Error),
    DataFrame(PolarsError),
    UnsupportedFormat(String),
    /// A calendar needs at least one event.
    EmptyCalendar,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "io error: {err}"),
            ExportError::Csv(err) => write!(f, "csv error: {err}"),
            ExportError::DataFrame(err) => write!(f, "dataframe conversion error: {err}"),
            ExportError::UnsupportedFormat(ext) => {
                write!(f, "unknown output format '{ext}' (expected md, csv or ics)")
            }
            ExportError::EmptyCalendar => write!(f, "no sessions take place, calendar would be empty"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<PolarsError> for ExportError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Csv,
    Ics,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Result<Self, ExportError> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "csv" => Ok(ExportFormat::Csv),
            "ics" | "ical" => Ok(ExportFormat::Ics),
            _ => Err(ExportError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Csv => "csv",
            ExportFormat::Ics => "ics",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Ics => "text/calendar; charset=utf-8",
        }
    }
}

/// File name stem for a course: lowercase, `/` replaced by `-`, whitespace
/// runs joined with `-`.
pub fn filename_base(course_name: &str) -> String {
    course_name
        .to_lowercase()
        .replace('/', "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Render `plan` in `format`. Table formats list every annotated date; the
/// calendar only carries the normal sessions and is refused when there are
/// none.
pub fn render_export(
    format: ExportFormat,
    plan: &CoursePlan,
    course_name: &str,
    locale: Locale,
    dtstamp: DateTime<Utc>,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Markdown => {
            let df = schedule_table(&plan.annotated)?;
            Ok(render_markdown(&df, locale).into_bytes())
        }
        ExportFormat::Csv => {
            let df = schedule_table(&plan.annotated)?;
            let mut buffer = Vec::new();
            write_csv(&df, locale, &mut buffer)?;
            Ok(buffer)
        }
        ExportFormat::Ics => {
            if plan.intervals.is_empty() {
                return Err(ExportError::EmptyCalendar);
            }
            Ok(render_ics(&plan.intervals, course_name, dtstamp).into_bytes())
        }
    }
}

/// Write `plan` to `path`, choosing the format from the file extension.
pub fn write_export<P: AsRef<Path>>(
    path: P,
    plan: &CoursePlan,
    course_name: &str,
    locale: Locale,
) -> Result<ExportFormat, ExportError> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)?;
    let bytes = render_export(format, plan, course_name, locale, Utc::now())?;
    fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), format = format.extension(), "wrote export");
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::AnnotatedDate;
    use chrono::{NaiveDate, TimeZone, Weekday};

    #[test]
    fn filename_base_slugs_course_names() {
        assert_eq!(filename_base("Einführung in die Religionswissenschaft"), "einführung-in-die-religionswissenschaft");
        assert_eq!(filename_base("  Proseminar  A/B "), "proseminar-a-b");
        assert_eq!(filename_base(""), "");
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("plan.md")).unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::from_path(Path::new("plan.ICS")).unwrap(), ExportFormat::Ics);
        assert!(matches!(
            ExportFormat::from_path(Path::new("plan.xlsx")),
            Err(ExportError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
        assert!(ExportFormat::from_path(Path::new("plan")).is_err());
    }

    #[test]
    fn calendar_without_sessions_is_refused() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap();
        let plan = CoursePlan {
            semester: "SoSe 2024".into(),
            weekday: Weekday::Tue,
            annotated: vec![AnnotatedDate::new(date, Some("Pfingstpause".into()))],
            intervals: Vec::new(),
        };
        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert!(matches!(
            render_export(ExportFormat::Ics, &plan, "Kurs", Locale::De, stamp),
            Err(ExportError::EmptyCalendar)
        ));
        let md = render_export(ExportFormat::Markdown, &plan, "Kurs", Locale::De, stamp).unwrap();
        assert!(String::from_utf8(md).unwrap().contains("Pfingstpause"));
    }
}
