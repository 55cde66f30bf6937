use crate::annotate::AnnotatedDate;
use crate::settings::Locale;
use chrono::{Datelike, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use std::io::Write;

pub const DATE_COLUMN: &str = "Date";
pub const TOPIC_COLUMN: &str = "Topic";

/// Two-column table of the annotated schedule: the formatted date and the
/// exclusion label (null for normal sessions).
pub fn schedule_table(annotated: &[AnnotatedDate]) -> PolarsResult<DataFrame> {
    let dates = format_dates(annotated.iter().map(|entry| entry.date));
    let topics: Vec<Option<&str>> = annotated
        .iter()
        .map(|entry| entry.label.as_deref())
        .collect();

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static(DATE_COLUMN), dates).into_column(),
        Series::new(PlSmallStr::from_static(TOPIC_COLUMN), topics).into_column(),
    ];
    DataFrame::new(columns)
}

/// `D.M.YYYY` for the first date of each year, `D.M.` for the rest.
pub fn format_dates<I>(dates: I) -> Vec<String>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut last_year = None;
    dates
        .into_iter()
        .map(|date| {
            if last_year == Some(date.year()) {
                date.format("%-d.%-m.").to_string()
            } else {
                last_year = Some(date.year());
                date.format("%-d.%-m.%Y").to_string()
            }
        })
        .collect()
}

fn headers(df: &DataFrame, locale: Locale) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|col| match col.name().as_str() {
            DATE_COLUMN => locale.date_header().to_string(),
            TOPIC_COLUMN => locale.topic_header().to_string(),
            other => other.to_string(),
        })
        .collect()
}

fn cell_text(col: &Column, row_idx: usize) -> String {
    match col.get(row_idx) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(AnyValue::StringOwned(s)) => s.as_str().to_string(),
        Ok(av) => av.to_string(),
    }
}

fn rows(df: &DataFrame) -> Vec<Vec<String>> {
    let columns = df.get_columns();
    (0..df.height())
        .map(|row_idx| columns.iter().map(|col| cell_text(col, row_idx)).collect())
        .collect()
}

fn column_widths(header: &[String], body: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in body {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }
    widths
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

/// Pipe table with left-aligned columns.
pub fn render_markdown(df: &DataFrame, locale: Locale) -> String {
    let header = headers(df, locale);
    let body = rows(df);
    let widths = column_widths(&header, &body);

    let line = |cells: &[String]| {
        let inner: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        format!("| {} |\n", inner.join(" | "))
    };

    let mut out = line(&header);
    let rule: Vec<String> = widths
        .iter()
        .map(|w| format!(":{}", "-".repeat(w + 1)))
        .collect();
    out.push_str(&format!("|{}|\n", rule.join("|")));
    for row in &body {
        out.push_str(&line(row));
    }
    out
}

/// Boxed table for terminal output.
pub fn render_text_table(df: &DataFrame, locale: Locale) -> String {
    let header = headers(df, locale);
    let body = rows(df);
    let widths = column_widths(&header, &body);

    // Build horizontal separator
    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(w + 2));
        sep.push('+');
    }
    sep.push('\n');

    let line = |cells: &[String]| {
        let mut out = String::from("|");
        for (cell, w) in cells.iter().zip(&widths) {
            out.push(' ');
            out.push_str(&pad(cell, *w));
            out.push_str(" |");
        }
        out.push('\n');
        out
    };

    let mut out = sep.clone();
    out.push_str(&line(&header));
    out.push_str(&sep);
    for row in &body {
        out.push_str(&line(row));
    }
    out.push_str(&sep);
    out
}

pub fn write_csv<W: Write>(df: &DataFrame, locale: Locale, writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(headers(df, locale))?;
    for row in rows(df) {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
