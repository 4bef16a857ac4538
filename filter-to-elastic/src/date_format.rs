//! Rendering of instants in the date formats an Elasticsearch mapping can declare.

use crate::errors::EncodeError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use ogc_filter::temporal::parse_instant;
use serde_json::Value;

pub const DEFAULT_DATE_FORMAT: &str = "date_optional_time";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormat {
    /// ISO-8601 in UTC, fractional seconds only when present.
    OptionalTime,
    EpochMillis,
    EpochSecond,
    /// A chrono strftime pattern.
    Pattern(String),
}

/// Built-in Elasticsearch format names with a fixed textual layout.
fn named_pattern(name: &str) -> Option<&'static str> {
    let name = name.strip_prefix("strict_").unwrap_or(name);
    Some(match name {
        "basic_date" => "%Y%m%d",
        "basic_date_time" => "%Y%m%dT%H%M%S%.3fZ",
        "basic_date_time_no_millis" => "%Y%m%dT%H%M%SZ",
        "date" | "year_month_day" => "%Y-%m-%d",
        "date_time" => "%Y-%m-%dT%H:%M:%S%.3fZ",
        "date_time_no_millis" => "%Y-%m-%dT%H:%M:%SZ",
        "date_hour_minute_second" => "%Y-%m-%dT%H:%M:%S",
        "date_hour_minute_second_millis" => "%Y-%m-%dT%H:%M:%S%.3f",
        "date_hour_minute" => "%Y-%m-%dT%H:%M",
        _ => return None,
    })
}

impl DateFormat {
    /// Parses a single format: a built-in name or a `SimpleDateFormat` style pattern.
    pub fn parse(format: &str) -> Result<Self, EncodeError> {
        let format = format.trim();
        match format {
            "date_optional_time" | "strict_date_optional_time" => {
                return Ok(DateFormat::OptionalTime)
            }
            "epoch_millis" => return Ok(DateFormat::EpochMillis),
            "epoch_second" => return Ok(DateFormat::EpochSecond),
            _ => {}
        }
        let pattern = match named_pattern(format) {
            Some(pattern) => pattern.to_string(),
            None => java_to_strftime(format)?,
        };
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(EncodeError::invalid(format!(
                "date format '{}' is not supported",
                format
            )));
        }
        Ok(DateFormat::Pattern(pattern))
    }

    /// Picks the first usable format of a `||` separated list, falling back to
    /// `default` and then to [`DateFormat::OptionalTime`].
    pub fn resolve(formats: Option<&str>, default: &str) -> Self {
        if let Some(formats) = formats {
            for candidate in formats.split("||") {
                match DateFormat::parse(candidate) {
                    Ok(format) => return format,
                    Err(err) => tracing::debug!("Skipping date format {}: {}", candidate, err),
                }
            }
        }
        DateFormat::parse(default).unwrap_or(DateFormat::OptionalTime)
    }

    pub fn format(&self, at: &DateTime<Utc>) -> Value {
        match self {
            DateFormat::OptionalTime => Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            DateFormat::EpochMillis => Value::from(at.timestamp_millis()),
            DateFormat::EpochSecond => Value::from(at.timestamp()),
            DateFormat::Pattern(pattern) => Value::String(at.format(pattern).to_string()),
        }
    }

    /// Reads a date written in this format, or in ISO-8601.
    pub fn parse_text(&self, text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        let parsed = match self {
            DateFormat::OptionalTime => None,
            DateFormat::EpochMillis => text
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis),
            DateFormat::EpochSecond => text
                .parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            DateFormat::Pattern(pattern) => parse_with_pattern(text, pattern),
        };
        parsed.or_else(|| parse_instant(text))
    }
}

fn parse_with_pattern(text: &str, pattern: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_str(text, pattern) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Translates a `SimpleDateFormat` style pattern into strftime syntax.
fn java_to_strftime(pattern: &str) -> Result<String, EncodeError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '\'' {
            // quoted literal text, '' is a single quote
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }
        if !ch.is_ascii_alphabetic() {
            push_literal(&mut out, ch);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&c| c == ch).count();
        let directive = match (ch, run) {
            ('y', 2) => "%y",
            ('y', _) | ('u', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('D', _) => "%j",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', _) => "%M",
            ('s', _) => "%S",
            ('S', 3) => "%3f",
            ('S', 6) => "%6f",
            ('S', 9) => "%9f",
            ('a', _) => "%p",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('Z', _) => "%z",
            ('X', _) => "Z",
            ('z', _) => "%Z",
            _ => {
                return Err(EncodeError::invalid(format!(
                    "unsupported date pattern letter '{}' (x{}) in '{}'",
                    ch, run, pattern
                )))
            }
        };
        out.push_str(directive);
        i += run;
    }
    Ok(out)
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(text: &str) -> DateTime<Utc> {
        text.parse().unwrap()
    }

    #[test]
    fn test_optional_time_drops_zero_fraction() {
        let format = DateFormat::parse(DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(format.format(&at("1970-07-19T00:00:00Z")), json!("1970-07-19T00:00:00Z"));
        assert_eq!(
            format.format(&at("1970-07-19T01:02:03.456-01:00")),
            json!("1970-07-19T02:02:03.456Z")
        );
    }

    #[test]
    fn test_named_formats() {
        let instant = at("1970-07-19T01:02:03.456-01:00");
        assert_eq!(
            DateFormat::parse("basic_date_time").unwrap().format(&instant),
            json!("19700719T020203.456Z")
        );
        assert_eq!(
            DateFormat::parse("strict_date").unwrap().format(&instant),
            json!("1970-07-19")
        );
        assert_eq!(
            DateFormat::parse("epoch_millis").unwrap().format(&at("1970-01-01T00:00:01Z")),
            json!(1000)
        );
    }

    #[test]
    fn test_java_patterns() {
        assert_eq!(
            DateFormat::parse("yyyy-MM-dd").unwrap(),
            DateFormat::Pattern("%Y-%m-%d".to_string())
        );
        assert_eq!(
            java_to_strftime("yyyy-MM-dd'T'HH:mm:ss.SSSZ").unwrap(),
            "%Y-%m-%dT%H:%M:%S.%3f%z"
        );
        assert_eq!(java_to_strftime("dd/MM/yy 'o''clock'").unwrap(), "%d/%m/%y o'clock");
        assert!(DateFormat::parse("yyyy-qq").is_err());
    }

    #[test]
    fn test_resolve_picks_first_valid_format() {
        assert_eq!(
            DateFormat::resolve(Some("bogus_q||yyyy-MM-dd"), DEFAULT_DATE_FORMAT),
            DateFormat::Pattern("%Y-%m-%d".to_string())
        );
        assert_eq!(
            DateFormat::resolve(Some("qqq"), DEFAULT_DATE_FORMAT),
            DateFormat::OptionalTime
        );
        assert_eq!(
            DateFormat::resolve(None, "epoch_second"),
            DateFormat::EpochSecond
        );
    }

    #[test]
    fn test_parse_text() {
        let format = DateFormat::parse("dd.MM.yyyy").unwrap();
        assert_eq!(format.parse_text("19.07.1970"), Some(at("1970-07-19T00:00:00Z")));
        assert_eq!(
            format.parse_text("1970-07-19T01:02:03Z"),
            Some(at("1970-07-19T01:02:03Z"))
        );
        assert_eq!(format.parse_text("yesterday"), None);
        assert_eq!(
            DateFormat::EpochMillis.parse_text("1000"),
            Some(at("1970-01-01T00:00:01Z"))
        );
    }
}
