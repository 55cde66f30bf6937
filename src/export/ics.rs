//! iCalendar (RFC 5545) output for normal sessions.
//!
//! Times are written as floating local times: the schedule has a single
//! fixed locale and carries no timezone.

use crate::intervals::SessionInterval;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

const PRODID: &str = "-//seminarplan//Seminarplan-Generator//DE";

/// One VEVENT per interval, all sharing `calendar_name` as summary. An empty
/// `intervals` slice yields a calendar without components, which RFC 5545
/// does not allow; `render_export` refuses that case.
pub fn render_ics(intervals: &[SessionInterval], calendar_name: &str, dtstamp: DateTime<Utc>) -> String {
    let name = calendar_name.trim();
    let uid_suffix = match super::filename_base(name) {
        base if base.is_empty() => "session".to_string(),
        base => base,
    };
    let stamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();

    let mut out = String::new();
    out.push_str(&fold_line("BEGIN:VCALENDAR"));
    out.push_str(&fold_line("VERSION:2.0"));
    out.push_str(&fold_line(&format!("PRODID:{PRODID}")));
    out.push_str(&fold_line("CALSCALE:GREGORIAN"));
    out.push_str(&fold_line("METHOD:PUBLISH"));
    if !name.is_empty() {
        out.push_str(&fold_line(&format!("X-WR-CALNAME:{}", escape_text(name))));
    }

    for interval in intervals {
        out.push_str(&fold_line("BEGIN:VEVENT"));
        out.push_str(&fold_line(&format!(
            "UID:{}-{uid_suffix}@seminarplan",
            local_time(interval.start)
        )));
        out.push_str(&fold_line(&format!("DTSTAMP:{stamp}")));
        out.push_str(&fold_line(&format!("DTSTART:{}", local_time(interval.start))));
        out.push_str(&fold_line(&format!("DTEND:{}", local_time(interval.end))));
        if !name.is_empty() {
            out.push_str(&fold_line(&format!("SUMMARY:{}", escape_text(name))));
        }
        out.push_str(&fold_line("END:VEVENT"));
    }

    out.push_str(&fold_line("END:VCALENDAR"));
    out
}

fn local_time(value: NaiveDateTime) -> String {
    value.format("%Y%m%dT%H%M%S").to_string()
}

/// Escape a TEXT value (RFC 5545 §3.3.11).
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Fold a content line at 75 octets and terminate it with CRLF. Continuation
/// lines start with a single space; UTF-8 sequences are never split.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}\r\n");
    }

    let mut out = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS) * 3);
    let mut rest = line;
    let mut first = true;
    while !rest.is_empty() {
        let limit = if first { MAX_LINE_OCTETS } else { MAX_LINE_OCTETS - 1 };
        let mut end = rest.len().min(limit);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if !first {
            out.push(' ');
        }
        out.push_str(&rest[..end]);
        out.push_str("\r\n");
        rest = &rest[end..];
        first = false;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_specials() {
        assert_eq!(escape_text("Kurs; Teil 1, Gruppe A"), "Kurs\\; Teil 1\\, Gruppe A");
        assert_eq!(escape_text("a\\b\nc"), "a\\\\b\\nc");
    }

    #[test]
    fn short_lines_are_not_folded() {
        assert_eq!(fold_line("SUMMARY:Short"), "SUMMARY:Short\r\n");
        let exact = "X".repeat(75);
        assert_eq!(fold_line(&exact), format!("{exact}\r\n"));
    }

    #[test]
    fn long_lines_fold_at_75_octets() {
        let line = "A".repeat(80);
        let folded = fold_line(&line);
        let parts: Vec<&str> = folded.split("\r\n").filter(|s| !s.is_empty()).collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 75);
        assert_eq!(parts[1], format!(" {}", "A".repeat(5)));
    }

    #[test]
    fn folding_keeps_multibyte_characters_whole() {
        let line = format!("{}äöü", "A".repeat(74));
        let folded = fold_line(&line);
        let unfolded = folded.replace("\r\n ", "").replace("\r\n", "");
        assert_eq!(unfolded, line);
        assert!(folded.starts_with(&format!("{}\r\n ä", "A".repeat(74))));
    }
}
