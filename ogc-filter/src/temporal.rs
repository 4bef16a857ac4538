use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// A temporal literal: a single instant or a closed period between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValue {
    Instant(DateTime<Utc>),
    Period {
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl TemporalValue {
    pub fn instant(at: DateTime<Utc>) -> Self {
        TemporalValue::Instant(at)
    }

    pub fn period(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TemporalValue::Period { begin, end }
    }

    pub fn is_period(&self) -> bool {
        matches!(self, TemporalValue::Period { .. })
    }

    /// Parses `<instant>` or `<instant>/<instant>`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once('/') {
            Some((begin, end)) => Some(TemporalValue::Period {
                begin: parse_instant(begin)?,
                end: parse_instant(end)?,
            }),
            None => parse_instant(text).map(TemporalValue::Instant),
        }
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalValue::Instant(at) => write!(f, "{}", at.to_rfc3339()),
            TemporalValue::Period { begin, end } => {
                write!(f, "{}/{}", begin.to_rfc3339(), end.to_rfc3339())
            }
        }
    }
}

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parses an ISO-8601 style instant. Values without an offset are taken as UTC,
/// a bare date is midnight UTC.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
