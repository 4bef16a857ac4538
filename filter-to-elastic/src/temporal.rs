//! Temporal predicates as `range` and `term` queries.

use crate::date_format::DateFormat;
use crate::errors::EncodeError;
use crate::query::{QueryFragment, RangeBounds};
use ogc_filter::{Literal, TemporalOp, TemporalValue};

/// Reads the literal operand of a temporal predicate.
pub fn temporal_value(literal: &Literal, dates: &DateFormat) -> Result<TemporalValue, EncodeError> {
    match literal {
        Literal::Temporal(value) => Ok(*value),
        Literal::Date(at) => Ok(TemporalValue::Instant(*at)),
        Literal::String(text) => dates
            .parse_text(text)
            .map(TemporalValue::Instant)
            .or_else(|| TemporalValue::parse(text))
            .ok_or_else(|| {
                EncodeError::invalid(format!("'{}' is not a time instant or period", text))
            }),
        other => Err(EncodeError::invalid(format!(
            "{:?} is not a time instant or period",
            other
        ))),
    }
}

fn requires_period(op: TemporalOp) -> bool {
    matches!(
        op,
        TemporalOp::Begins
            | TemporalOp::BegunBy
            | TemporalOp::Ends
            | TemporalOp::EndedBy
            | TemporalOp::During
            | TemporalOp::TContains
    )
}

/// Translates `field op value`, or `value op field` when `swapped`.
pub fn translate_temporal(
    op: TemporalOp,
    field: &str,
    value: &TemporalValue,
    swapped: bool,
    dates: &DateFormat,
) -> Result<QueryFragment, EncodeError> {
    if matches!(
        op,
        TemporalOp::Meets
            | TemporalOp::MetBy
            | TemporalOp::TOverlaps
            | TemporalOp::OverlappedBy
            | TemporalOp::AnyInteracts
    ) {
        return Err(EncodeError::unsupported(format!(
            "{} has no Elasticsearch translation",
            op
        )));
    }

    let period = match value {
        TemporalValue::Period { begin, end } => Some((begin, end)),
        TemporalValue::Instant(_) if requires_period(op) => {
            return Err(EncodeError::invalid(format!("{} requires a time period", op)))
        }
        TemporalValue::Instant(_) => None,
    };

    match (op, swapped) {
        (TemporalOp::Begins, true) | (TemporalOp::Ends, true) => {
            return Err(EncodeError::invalid(format!(
                "{} requires the property as first operand",
                op
            )))
        }
        (TemporalOp::EndedBy, false) => {
            return Err(EncodeError::invalid(format!(
                "{} requires the property as second operand",
                op
            )))
        }
        _ => {}
    }

    let fragment = match (op, value) {
        (TemporalOp::After, _) | (TemporalOp::Before, _) => {
            let property_later = (op == TemporalOp::After) != swapped;
            let bound = match value {
                TemporalValue::Instant(at) => at,
                TemporalValue::Period { end, .. } if property_later => end,
                TemporalValue::Period { begin, .. } => begin,
            };
            let bound = dates.format(bound);
            let bounds = if property_later {
                RangeBounds::default().gt(bound)
            } else {
                RangeBounds::default().lt(bound)
            };
            QueryFragment::range(field, bounds)
        }
        (TemporalOp::TEquals, TemporalValue::Instant(at)) => {
            QueryFragment::term(field, dates.format(at))
        }
        (TemporalOp::TEquals, TemporalValue::Period { .. }) => {
            return Err(EncodeError::invalid("TEquals does not accept a time period"))
        }
        _ => {
            let Some((begin, end)) = period else {
                return Err(EncodeError::invalid(format!("{} requires a time period", op)));
            };
            match op {
                TemporalOp::Begins | TemporalOp::BegunBy => {
                    QueryFragment::term(field, dates.format(begin))
                }
                TemporalOp::Ends | TemporalOp::EndedBy => {
                    QueryFragment::term(field, dates.format(end))
                }
                _ => QueryFragment::range(
                    field,
                    RangeBounds::default()
                        .gt(dates.format(begin))
                        .lt(dates.format(end)),
                ),
            }
        }
    };
    Ok(fragment)
}
