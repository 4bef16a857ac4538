//! Conversion of filter literals into the JSON values an attribute expects.

use crate::date_format::DateFormat;
use crate::errors::EncodeError;
use chrono::{DateTime, Utc};
use ogc_filter::{AttributeDescriptor, AttributeType, Literal, TemporalValue};
use serde_json::Value;

/// Converts `literal` for a comparison against `attribute`.
///
/// Numeric and boolean attributes parse the literal's textual form and fail on
/// malformed input. Date attributes parse strings with `dates` before falling
/// back to ISO-8601. Unknown attributes receive the literal's natural form.
/// Null and non-finite numbers have no query value and are rejected.
pub fn coerce_literal(
    literal: &Literal,
    attribute: Option<&AttributeDescriptor>,
    dates: &DateFormat,
) -> Result<Value, EncodeError> {
    let Some(attribute) = attribute else {
        return natural_value(literal, dates);
    };

    match attribute.binding {
        AttributeType::Date => coerce_date(literal, dates),
        AttributeType::String => match literal {
            Literal::Date(_) | Literal::Temporal(_) | Literal::Geometry(_) => {
                natural_value(literal, dates)
            }
            _ => Ok(text_of(literal, attribute)?.into()),
        },
        AttributeType::Geometry => natural_value(literal, dates),
        AttributeType::Integer => {
            let text = text_of(literal, attribute)?;
            parse_text::<i32>(&text, attribute).map(Value::from)
        }
        AttributeType::Long => {
            let text = text_of(literal, attribute)?;
            parse_text::<i64>(&text, attribute).map(Value::from)
        }
        AttributeType::Float => {
            let text = text_of(literal, attribute)?;
            // widen through the shortest decimal form so 4.1f stays 4.1
            let value = parse_text::<f32>(&text, attribute)?;
            float_value(value.to_string().parse().unwrap_or(f64::from(value)))
        }
        AttributeType::Double => {
            let text = text_of(literal, attribute)?;
            parse_text::<f64>(&text, attribute).and_then(float_value)
        }
        AttributeType::Boolean => {
            let text = text_of(literal, attribute)?;
            match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(EncodeError::invalid(format!(
                    "'{}' is not a boolean value for attribute {}",
                    text, attribute.name
                ))),
            }
        }
    }
}

/// The literal without any attribute driven conversion.
pub fn natural_value(literal: &Literal, dates: &DateFormat) -> Result<Value, EncodeError> {
    match literal {
        Literal::Null => Err(EncodeError::invalid("null cannot be used as a query value")),
        Literal::String(s) => Ok(Value::String(s.clone())),
        Literal::Integer(i) => Ok(Value::from(*i)),
        Literal::Float(f) => float_value(*f),
        Literal::Boolean(b) => Ok(Value::Bool(*b)),
        Literal::Date(at) | Literal::Temporal(TemporalValue::Instant(at)) => Ok(dates.format(at)),
        Literal::Temporal(TemporalValue::Period { .. }) => Err(EncodeError::unsupported(
            "time periods are only supported by temporal predicates",
        )),
        Literal::Geometry(_) => Err(EncodeError::unsupported(
            "geometry literals are only supported by spatial predicates",
        )),
    }
}

fn coerce_date(literal: &Literal, dates: &DateFormat) -> Result<Value, EncodeError> {
    match literal {
        Literal::String(text) => dates
            .parse_text(text)
            .map(|at| dates.format(&at))
            .ok_or_else(|| EncodeError::invalid(format!("'{}' is not a valid date", text))),
        Literal::Integer(millis) => DateTime::from_timestamp_millis(*millis)
            .map(|at| dates.format(&at))
            .ok_or_else(|| EncodeError::invalid(format!("{} is out of the date range", millis))),
        Literal::Float(_) | Literal::Boolean(_) => Err(EncodeError::invalid(format!(
            "{:?} cannot be compared with a date",
            literal
        ))),
        _ => natural_value(literal, dates),
    }
}

fn text_of(literal: &Literal, attribute: &AttributeDescriptor) -> Result<String, EncodeError> {
    literal.to_text().ok_or_else(|| {
        EncodeError::invalid(format!(
            "{:?} cannot be converted for attribute {}",
            literal, attribute.name
        ))
    })
}

fn parse_text<T: std::str::FromStr>(
    text: &str,
    attribute: &AttributeDescriptor,
) -> Result<T, EncodeError> {
    text.trim().parse::<T>().map_err(|_| {
        EncodeError::invalid(format!(
            "'{}' is not a valid {} value for attribute {}",
            text, attribute.binding, attribute.name
        ))
    })
}

fn float_value(value: f64) -> Result<Value, EncodeError> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| EncodeError::invalid(format!("{} is not a finite number", value)))
}
