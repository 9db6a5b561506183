//! iCalendar (RFC 5545) output for EOL dates.
//!
//! Each inventory entry becomes one all-day event on its EOL date.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::inventory::EolEntry;
use crate::issues::issue_title;
use crate::resolve::EolResolver;

const PRODID: &str = "-//eol-check//EOL calendar//EN";
const UID_DOMAIN: &str = "eol-checks";
/// Maximum content line length in octets, excluding the line break
const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    /// The all-day event's date
    pub date: NaiveDate,
}

impl CalendarEvent {
    pub fn for_entry(entry: &EolEntry, eol: NaiveDate) -> Self {
        Self {
            uid: format!("{}-{}@{}", entry.product, entry.version, UID_DOMAIN),
            summary: format!("{} EOL", entry.label()),
            description: issue_title(entry, eol),
            date: eol,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
    stamp: DateTime<Utc>,
}

impl Calendar {
    /// Create an empty calendar whose events carry `stamp` as DTSTAMP.
    pub fn new(stamp: DateTime<Utc>) -> Self {
        Self {
            events: Vec::new(),
            stamp,
        }
    }

    /// Add an event. Returns false if an event with the same UID is present.
    pub fn add(&mut self, event: CalendarEvent) -> bool {
        if self.events.iter().any(|e| e.uid == event.uid) {
            warn!(uid = %event.uid, "duplicate calendar event skipped");
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn to_ics(&self) -> String {
        let stamp = self.stamp.format("%Y%m%dT%H%M%SZ").to_string();
        let mut out = String::new();

        push_line(&mut out, "BEGIN:VCALENDAR");
        push_line(&mut out, "VERSION:2.0");
        push_line(&mut out, &format!("PRODID:{}", PRODID));
        push_line(&mut out, "CALSCALE:GREGORIAN");

        for event in &self.events {
            let end = event.date.succ_opt().unwrap_or(event.date);
            push_line(&mut out, "BEGIN:VEVENT");
            push_line(&mut out, &format!("UID:{}", escape_text(&event.uid)));
            push_line(&mut out, &format!("DTSTAMP:{}", stamp));
            push_line(
                &mut out,
                &format!("DTSTART;VALUE=DATE:{}", event.date.format("%Y%m%d")),
            );
            push_line(&mut out, &format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
            push_line(&mut out, &format!("SUMMARY:{}", escape_text(&event.summary)));
            push_line(
                &mut out,
                &format!("DESCRIPTION:{}", escape_text(&event.description)),
            );
            push_line(&mut out, "TRANSP:TRANSPARENT");
            push_line(&mut out, "END:VEVENT");
        }

        push_line(&mut out, "END:VCALENDAR");
        out
    }
}

/// Resolve every entry and build the calendar.
///
/// Any resolution failure aborts the whole calendar.
pub fn generate_calendar(
    entries: &[EolEntry],
    resolver: &dyn EolResolver,
    stamp: DateTime<Utc>,
) -> Result<Calendar> {
    let mut calendar = Calendar::new(stamp);

    for entry in entries {
        debug!(entry = %entry.label(), source = %entry.source, "resolving");
        let eol = resolver
            .resolve(entry)
            .with_context(|| format!("Failed to resolve EOL date for {}", entry.label()))?;
        calendar.add(CalendarEvent::for_entry(entry, eol));
    }

    Ok(calendar)
}

/// Escape a TEXT property value.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Append a content line, folded at 75 octets, terminated by CRLF.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}
