use crate::coercion::coerce_literal;
use crate::config::{EncoderConfig, LikeMode};
use crate::date_format::DateFormat;
use crate::errors::EncodeError;
use crate::like_pattern::{convert_to_query_string, convert_to_regex};
use crate::query::{QueryFragment, RangeBounds};
use crate::spatial::translate_spatial;
use crate::temporal::{temporal_value, translate_temporal};
use ogc_filter::{
    AttributeDescriptor, Between, CompareOp, Comparison, Expression, Filter, GeometryKind, Like,
    Literal, SchemaProvider, Spatial, Temporal,
};
use serde_json::Value;

/// A property reference resolved against the schema.
struct Field<'s> {
    /// Key the generated query uses.
    key: String,
    attribute: Option<&'s AttributeDescriptor>,
}

/// Read-only state threaded through one translation.
pub(super) struct Translator<'a> {
    pub schema: &'a dyn SchemaProvider,
    pub config: &'a EncoderConfig,
}

impl<'a> Translator<'a> {
    pub fn translate(&self, filter: &Filter) -> Result<QueryFragment, EncodeError> {
        tracing::trace!("Translating {}", filter.kind());
        match filter {
            Filter::Include => Ok(QueryFragment::match_all()),
            Filter::Exclude => Ok(QueryFragment::match_none()),
            Filter::And(children) => Ok(QueryFragment::must(self.translate_all(children)?)),
            Filter::Or(children) => Ok(QueryFragment::should(self.translate_all(children)?)),
            Filter::Not(child) => match child.as_ref() {
                Filter::IsNull(expression) => self.exists(expression),
                other => Ok(QueryFragment::must_not(self.translate(other)?)),
            },
            Filter::Id(ids) => Ok(QueryFragment::ids(ids.clone())),
            Filter::Compare(comparison) => self.comparison(comparison),
            Filter::Between(between) => self.between(between),
            Filter::Like(like) => self.like(like),
            Filter::IsNull(expression) => Ok(QueryFragment::must_not(self.exists(expression)?)),
            Filter::IsNil(_) => Err(EncodeError::unsupported(
                "PropertyIsNil has no Elasticsearch translation",
            )),
            Filter::Spatial(spatial) => self.spatial(spatial),
            Filter::Temporal(temporal) => self.temporal(temporal),
        }
    }

    fn translate_all(&self, children: &[Filter]) -> Result<Vec<QueryFragment>, EncodeError> {
        children.iter().map(|child| self.translate(child)).collect()
    }

    fn field(&self, property: &str) -> Field<'a> {
        let attribute = self.schema.resolve(property);
        if attribute.is_none() {
            tracing::debug!("Property {} is not in the schema", property);
        }
        Field {
            key: attribute.map_or(property, |a| a.field_name()).to_string(),
            attribute,
        }
    }

    fn dates(&self, field: &Field<'_>) -> DateFormat {
        DateFormat::resolve(
            field.attribute.and_then(|a| a.date_format.as_deref()),
            &self.config.default_date_format,
        )
    }

    /// Scopes `fragment` to the parent path of a nested attribute.
    fn nest(&self, field: &Field<'_>, fragment: QueryFragment) -> QueryFragment {
        if !field.attribute.is_some_and(|a| a.nested) {
            return fragment;
        }
        let path = field
            .key
            .rsplit_once('.')
            .map_or(field.key.as_str(), |(parent, _)| parent);
        QueryFragment::nested(path, fragment, self.config.nested_score_mode)
    }

    fn property_of<'e>(&self, expression: &'e Expression, context: &str) -> Result<&'e str, EncodeError> {
        match expression {
            Expression::Property(name) => Ok(name),
            other => Err(EncodeError::unsupported(format!(
                "{} requires a property operand, got {}",
                context,
                describe(other)
            ))),
        }
    }

    fn exists(&self, expression: &Expression) -> Result<QueryFragment, EncodeError> {
        let field = self.field(self.property_of(expression, "PropertyIsNull")?);
        Ok(self.nest(&field, QueryFragment::exists(field.key.clone())))
    }

    fn comparison(&self, comparison: &Comparison) -> Result<QueryFragment, EncodeError> {
        let (property, right, swapped) = match (&comparison.left, &comparison.right) {
            (Expression::Property(property), right) => (property, right, false),
            (left, Expression::Property(property)) => (property, left, true),
            (left, right) => {
                return Err(EncodeError::unsupported(format!(
                    "comparison between {} and {} has no property operand",
                    describe(left),
                    describe(right)
                )))
            }
        };
        if !comparison.match_case {
            tracing::debug!("Case-insensitive comparison on {} is matched exactly", property);
        }

        let field = self.field(property);
        let value = match right {
            Expression::Property(other) => Value::String(other.clone()),
            other => {
                let literal = literal_of(other)?;
                coerce_literal(&literal, field.attribute, &self.dates(&field))?
            }
        };
        let op = if swapped {
            comparison.op.flipped()
        } else {
            comparison.op
        };
        let key = field.key.clone();
        let fragment = match op {
            CompareOp::EqualTo => QueryFragment::term(key, value),
            CompareOp::NotEqualTo => QueryFragment::must_not(QueryFragment::term(key, value)),
            CompareOp::GreaterThan => QueryFragment::range(key, RangeBounds::default().gt(value)),
            CompareOp::GreaterThanOrEqualTo => {
                QueryFragment::range(key, RangeBounds::default().gte(value))
            }
            CompareOp::LessThan => QueryFragment::range(key, RangeBounds::default().lt(value)),
            CompareOp::LessThanOrEqualTo => {
                QueryFragment::range(key, RangeBounds::default().lte(value))
            }
        };
        Ok(self.nest(&field, fragment))
    }

    fn between(&self, between: &Between) -> Result<QueryFragment, EncodeError> {
        let field = self.field(self.property_of(&between.expression, "PropertyIsBetween")?);
        let dates = self.dates(&field);
        let bound = |expression: &Expression| -> Result<Value, EncodeError> {
            let literal = literal_of(expression)?;
            match field.attribute {
                Some(_) => coerce_literal(&literal, field.attribute, &dates),
                // unknown type compares as text
                None => literal.to_text().map(Value::String).ok_or_else(|| {
                    EncodeError::invalid(format!("{:?} is not a valid range bound", literal))
                }),
            }
        };
        let bounds = RangeBounds::default()
            .gte(bound(&between.lower)?)
            .lte(bound(&between.upper)?);
        Ok(self.nest(&field, QueryFragment::range(field.key.clone(), bounds)))
    }

    fn like(&self, like: &Like) -> Result<QueryFragment, EncodeError> {
        let field = self.field(self.property_of(&like.expression, "PropertyIsLike")?);
        if !like.match_case {
            tracing::debug!("Case-insensitive LIKE on {} is matched as written", field.key);
        }
        let free_text = match field.attribute {
            Some(attribute) => attribute.analyzed,
            None => self.config.unknown_like_mode == LikeMode::QueryString,
        };
        let fragment = if free_text {
            QueryFragment::QueryString {
                query: convert_to_query_string(
                    &like.pattern,
                    like.escape,
                    like.wildcard,
                    like.single_char,
                ),
                default_field: field.key.clone(),
            }
        } else {
            QueryFragment::Regexp {
                field: field.key.clone(),
                pattern: convert_to_regex(&like.pattern, like.escape, like.wildcard, like.single_char),
            }
        };
        Ok(self.nest(&field, fragment))
    }

    fn spatial(&self, spatial: &Spatial) -> Result<QueryFragment, EncodeError> {
        let (property, geometry) = match (&spatial.left, &spatial.right) {
            (Expression::Property(property), Expression::Literal(Literal::Geometry(geometry)))
            | (Expression::Literal(Literal::Geometry(geometry)), Expression::Property(property)) => {
                (property, geometry)
            }
            (left, right) => {
                return Err(EncodeError::unsupported(format!(
                    "{} requires a property and a geometry literal, got {} and {}",
                    spatial.op,
                    describe(left),
                    describe(right)
                )))
            }
        };

        let attribute = if property.is_empty() {
            Some(self.schema.default_geometry().ok_or_else(|| {
                EncodeError::invalid("the schema declares no default geometry")
            })?)
        } else {
            self.schema.resolve(property)
        };
        let key = attribute.map_or(property.as_str(), |a| a.field_name());
        let kind = match attribute.map(|a| a.geometry_kind()) {
            Some(GeometryKind::Point) => GeometryKind::Point,
            _ => GeometryKind::Shape,
        };
        translate_spatial(spatial.op, key, kind, geometry, spatial.distance.as_ref())
    }

    fn temporal(&self, temporal: &Temporal) -> Result<QueryFragment, EncodeError> {
        let (property, literal, swapped) = match (&temporal.left, &temporal.right) {
            (Expression::Property(property), Expression::Literal(literal)) => {
                (property, literal, false)
            }
            (Expression::Literal(literal), Expression::Property(property)) => {
                (property, literal, true)
            }
            (left, right) => {
                return Err(EncodeError::unsupported(format!(
                    "{} requires one property and one literal, got {} and {}",
                    temporal.op,
                    describe(left),
                    describe(right)
                )))
            }
        };
        let field = self.field(property);
        let dates = self.dates(&field);
        let value = temporal_value(literal, &dates)?;
        let fragment = translate_temporal(temporal.op, &field.key, &value, swapped, &dates)?;
        Ok(self.nest(&field, fragment))
    }
}

fn literal_of(expression: &Expression) -> Result<Literal, EncodeError> {
    match expression {
        Expression::Literal(literal) => Ok(literal.clone()),
        Expression::Nil => Ok(Literal::Null),
        other => Err(EncodeError::unsupported(format!(
            "{} cannot be translated",
            describe(other)
        ))),
    }
}

fn describe(expression: &Expression) -> String {
    match expression {
        Expression::Property(name) => format!("property {}", name),
        Expression::Literal(literal) => format!("literal {:?}", literal),
        Expression::Function { name, .. } => format!("function {}", name),
        Expression::Arithmetic { op, .. } => format!("arithmetic expression '{}'", op),
        Expression::Nil => "nil".to_string(),
    }
}
