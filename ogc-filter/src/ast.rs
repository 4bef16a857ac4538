use crate::temporal::TemporalValue;
use chrono::{DateTime, Utc};
use geo_types::{Geometry, GeometryCollection, LineString, Point, Polygon, Rect};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Literal values carried by [`Expression::Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    Temporal(TemporalValue),
    Geometry(Geometry<f64>),
}

impl Literal {
    /// Natural textual form, used when no attribute type drives the conversion.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Literal::Null => None,
            Literal::String(s) => Some(s.clone()),
            Literal::Integer(i) => Some(i.to_string()),
            Literal::Float(f) => Some(f.to_string()),
            Literal::Boolean(b) => Some(b.to_string()),
            Literal::Date(d) => Some(d.to_rfc3339()),
            Literal::Temporal(t) => Some(t.to_string()),
            Literal::Geometry(_) => None,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::Date(value)
    }
}

impl From<TemporalValue> for Literal {
    fn from(value: TemporalValue) -> Self {
        Literal::Temporal(value)
    }
}

impl From<Geometry<f64>> for Literal {
    fn from(value: Geometry<f64>) -> Self {
        Literal::Geometry(value)
    }
}

macro_rules! geometry_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::Geometry(Geometry::from(value))
                }
            }
        )*
    };
}

geometry_literal!(
    Point<f64>,
    LineString<f64>,
    Polygon<f64>,
    Rect<f64>
);

impl From<GeometryCollection<f64>> for Literal {
    fn from(value: GeometryCollection<f64>) -> Self {
        Literal::Geometry(Geometry::GeometryCollection(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArithmeticOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
}

/// Value-producing node of a filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Property(String),
    Literal(Literal),
    Function {
        name: String,
        args: Vec<Expression>,
    },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Nil,
}

impl Expression {
    pub fn property(name: impl Into<String>) -> Self {
        Expression::Property(name.into())
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function {
            name: name.into(),
            args,
        }
    }

    pub fn arithmetic(op: ArithmeticOp, left: Expression, right: Expression) -> Self {
        Expression::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn as_property(&self) -> Option<&str> {
        match self {
            Expression::Property(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expression::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// True for property references and literals, the only operand shapes
    /// that translate without residual evaluation.
    pub fn is_simple(&self) -> bool {
        matches!(self, Expression::Property(_) | Expression::Literal(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CompareOp {
    #[strum(serialize = "=")]
    EqualTo,
    #[strum(serialize = "<>")]
    NotEqualTo,
    #[strum(serialize = ">")]
    GreaterThan,
    #[strum(serialize = ">=")]
    GreaterThanOrEqualTo,
    #[strum(serialize = "<")]
    LessThan,
    #[strum(serialize = "<=")]
    LessThanOrEqualTo,
}

impl CompareOp {
    /// Operator to use when the operands swap sides.
    pub fn flipped(self) -> Self {
        match self {
            CompareOp::GreaterThan => CompareOp::LessThan,
            CompareOp::GreaterThanOrEqualTo => CompareOp::LessThanOrEqualTo,
            CompareOp::LessThan => CompareOp::GreaterThan,
            CompareOp::LessThanOrEqualTo => CompareOp::GreaterThanOrEqualTo,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SpatialOp {
    #[strum(serialize = "BBOX")]
    BBox,
    Intersects,
    Disjoint,
    Contains,
    Within,
    Crosses,
    Touches,
    Overlaps,
    Equals,
    DWithin,
    Beyond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TemporalOp {
    After,
    Before,
    Begins,
    BegunBy,
    Ends,
    EndedBy,
    During,
    TContains,
    TEquals,
    Meets,
    MetBy,
    TOverlaps,
    OverlappedBy,
    AnyInteracts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub op: CompareOp,
    pub left: Expression,
    pub right: Expression,
    pub match_case: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Between {
    pub expression: Expression,
    pub lower: Expression,
    pub upper: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Like {
    pub expression: Expression,
    pub pattern: String,
    pub wildcard: char,
    pub single_char: char,
    pub escape: char,
    pub match_case: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    pub value: f64,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spatial {
    pub op: SpatialOp,
    pub left: Expression,
    pub right: Expression,
    /// Only set for `DWithin` and `Beyond`.
    pub distance: Option<Distance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Temporal {
    pub op: TemporalOp,
    pub left: Expression,
    pub right: Expression,
}

/// Boolean-valued node of a filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Include,
    Exclude,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Id(Vec<String>),
    Compare(Comparison),
    Between(Between),
    Like(Like),
    IsNull(Expression),
    IsNil(Expression),
    Spatial(Spatial),
    Temporal(Temporal),
}

/// One variant per concrete filter kind, used by capability lookups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumString, EnumIter,
)]
pub enum FilterKind {
    Include,
    Exclude,
    And,
    Or,
    Not,
    Id,
    PropertyIsEqualTo,
    PropertyIsNotEqualTo,
    PropertyIsGreaterThan,
    PropertyIsGreaterThanOrEqualTo,
    PropertyIsLessThan,
    PropertyIsLessThanOrEqualTo,
    PropertyIsBetween,
    PropertyIsLike,
    PropertyIsNull,
    PropertyIsNil,
    #[strum(serialize = "BBOX")]
    BBox,
    Intersects,
    Disjoint,
    Contains,
    Within,
    Crosses,
    Touches,
    Overlaps,
    Equals,
    DWithin,
    Beyond,
    After,
    Before,
    Begins,
    BegunBy,
    Ends,
    EndedBy,
    During,
    TContains,
    TEquals,
    Meets,
    MetBy,
    TOverlaps,
    OverlappedBy,
    AnyInteracts,
}

impl From<CompareOp> for FilterKind {
    fn from(op: CompareOp) -> Self {
        match op {
            CompareOp::EqualTo => FilterKind::PropertyIsEqualTo,
            CompareOp::NotEqualTo => FilterKind::PropertyIsNotEqualTo,
            CompareOp::GreaterThan => FilterKind::PropertyIsGreaterThan,
            CompareOp::GreaterThanOrEqualTo => FilterKind::PropertyIsGreaterThanOrEqualTo,
            CompareOp::LessThan => FilterKind::PropertyIsLessThan,
            CompareOp::LessThanOrEqualTo => FilterKind::PropertyIsLessThanOrEqualTo,
        }
    }
}

impl From<SpatialOp> for FilterKind {
    fn from(op: SpatialOp) -> Self {
        match op {
            SpatialOp::BBox => FilterKind::BBox,
            SpatialOp::Intersects => FilterKind::Intersects,
            SpatialOp::Disjoint => FilterKind::Disjoint,
            SpatialOp::Contains => FilterKind::Contains,
            SpatialOp::Within => FilterKind::Within,
            SpatialOp::Crosses => FilterKind::Crosses,
            SpatialOp::Touches => FilterKind::Touches,
            SpatialOp::Overlaps => FilterKind::Overlaps,
            SpatialOp::Equals => FilterKind::Equals,
            SpatialOp::DWithin => FilterKind::DWithin,
            SpatialOp::Beyond => FilterKind::Beyond,
        }
    }
}

impl From<TemporalOp> for FilterKind {
    fn from(op: TemporalOp) -> Self {
        match op {
            TemporalOp::After => FilterKind::After,
            TemporalOp::Before => FilterKind::Before,
            TemporalOp::Begins => FilterKind::Begins,
            TemporalOp::BegunBy => FilterKind::BegunBy,
            TemporalOp::Ends => FilterKind::Ends,
            TemporalOp::EndedBy => FilterKind::EndedBy,
            TemporalOp::During => FilterKind::During,
            TemporalOp::TContains => FilterKind::TContains,
            TemporalOp::TEquals => FilterKind::TEquals,
            TemporalOp::Meets => FilterKind::Meets,
            TemporalOp::MetBy => FilterKind::MetBy,
            TemporalOp::TOverlaps => FilterKind::TOverlaps,
            TemporalOp::OverlappedBy => FilterKind::OverlappedBy,
            TemporalOp::AnyInteracts => FilterKind::AnyInteracts,
        }
    }
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Include => FilterKind::Include,
            Filter::Exclude => FilterKind::Exclude,
            Filter::And(_) => FilterKind::And,
            Filter::Or(_) => FilterKind::Or,
            Filter::Not(_) => FilterKind::Not,
            Filter::Id(_) => FilterKind::Id,
            Filter::Compare(c) => c.op.into(),
            Filter::Between(_) => FilterKind::PropertyIsBetween,
            Filter::Like(_) => FilterKind::PropertyIsLike,
            Filter::IsNull(_) => FilterKind::PropertyIsNull,
            Filter::IsNil(_) => FilterKind::PropertyIsNil,
            Filter::Spatial(s) => s.op.into(),
            Filter::Temporal(t) => t.op.into(),
        }
    }

    pub fn and(children: Vec<Filter>) -> Self {
        Filter::And(children)
    }

    pub fn or(children: Vec<Filter>) -> Self {
        Filter::Or(children)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Filter) -> Self {
        Filter::Not(Box::new(child))
    }

    pub fn id<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Id(ids.into_iter().map(Into::into).collect())
    }

    pub fn compare(op: CompareOp, left: Expression, right: Expression) -> Self {
        Filter::Compare(Comparison {
            op,
            left,
            right,
            match_case: true,
        })
    }

    pub fn equals(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::EqualTo, left, right)
    }

    pub fn not_equals(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::NotEqualTo, left, right)
    }

    pub fn greater(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::GreaterThan, left, right)
    }

    pub fn greater_or_equal(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::GreaterThanOrEqualTo, left, right)
    }

    pub fn less(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::LessThan, left, right)
    }

    pub fn less_or_equal(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::LessThanOrEqualTo, left, right)
    }

    pub fn between(expression: Expression, lower: Expression, upper: Expression) -> Self {
        Filter::Between(Between {
            expression,
            lower,
            upper,
        })
    }

    /// LIKE with `*` as wildcard, `.` as single character and `!` as escape.
    pub fn like(expression: Expression, pattern: impl Into<String>) -> Self {
        Self::like_with(expression, pattern, '*', '.', '!', true)
    }

    pub fn like_with(
        expression: Expression,
        pattern: impl Into<String>,
        wildcard: char,
        single_char: char,
        escape: char,
        match_case: bool,
    ) -> Self {
        Filter::Like(Like {
            expression,
            pattern: pattern.into(),
            wildcard,
            single_char,
            escape,
            match_case,
        })
    }

    pub fn is_null(expression: Expression) -> Self {
        Filter::IsNull(expression)
    }

    pub fn is_nil(expression: Expression) -> Self {
        Filter::IsNil(expression)
    }

    pub fn spatial(op: SpatialOp, left: Expression, right: Expression) -> Self {
        Filter::Spatial(Spatial {
            op,
            left,
            right,
            distance: None,
        })
    }

    pub fn bbox(property: &str, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let envelope = Rect::new((min_x, min_y), (max_x, max_y));
        Self::spatial(
            SpatialOp::BBox,
            Expression::property(property),
            Expression::literal(envelope),
        )
    }

    pub fn intersects(left: Expression, right: Expression) -> Self {
        Self::spatial(SpatialOp::Intersects, left, right)
    }

    pub fn disjoint(left: Expression, right: Expression) -> Self {
        Self::spatial(SpatialOp::Disjoint, left, right)
    }

    pub fn dwithin(left: Expression, right: Expression, distance: f64, units: &str) -> Self {
        Filter::Spatial(Spatial {
            op: SpatialOp::DWithin,
            left,
            right,
            distance: Some(Distance {
                value: distance,
                units: units.to_string(),
            }),
        })
    }

    pub fn beyond(left: Expression, right: Expression, distance: f64, units: &str) -> Self {
        Filter::Spatial(Spatial {
            op: SpatialOp::Beyond,
            left,
            right,
            distance: Some(Distance {
                value: distance,
                units: units.to_string(),
            }),
        })
    }

    pub fn temporal(op: TemporalOp, left: Expression, right: Expression) -> Self {
        Filter::Temporal(Temporal { op, left, right })
    }

    pub fn after(left: Expression, right: Expression) -> Self {
        Self::temporal(TemporalOp::After, left, right)
    }

    pub fn before(left: Expression, right: Expression) -> Self {
        Self::temporal(TemporalOp::Before, left, right)
    }

    pub fn during(left: Expression, right: Expression) -> Self {
        Self::temporal(TemporalOp::During, left, right)
    }

    pub fn tequals(left: Expression, right: Expression) -> Self {
        Self::temporal(TemporalOp::TEquals, left, right)
    }
}
