use super::parse;
use crate::ast::{ArithmeticOp, Expression, Filter, Literal, SpatialOp, TemporalOp};
use crate::errors::CqlError;
use crate::temporal::TemporalValue;
use chrono::{DateTime, Utc};
use geo_types::{Geometry, LineString, Point, Rect};

fn prop(name: &str) -> Expression {
    Expression::property(name)
}

fn at(text: &str) -> DateTime<Utc> {
    text.parse().unwrap()
}

#[test]
fn test_simple_equality() {
    let filter = parse("stringAttr = 'test'").unwrap();
    assert_eq!(
        filter,
        Filter::equals(prop("stringAttr"), Expression::literal("test"))
    );
}

#[test]
fn test_doubled_quote_in_string() {
    let filter = parse("name = 'it''s'").unwrap();
    assert_eq!(filter, Filter::equals(prop("name"), Expression::literal("it's")));
}

#[test]
fn test_comparison_operators() {
    assert_eq!(
        parse("a <> 1").unwrap(),
        Filter::not_equals(prop("a"), Expression::literal(1))
    );
    assert_eq!(
        parse("a != 1").unwrap(),
        Filter::not_equals(prop("a"), Expression::literal(1))
    );
    assert_eq!(
        parse("a >= 2.5").unwrap(),
        Filter::greater_or_equal(prop("a"), Expression::literal(2.5))
    );
    assert_eq!(
        parse("a < -5").unwrap(),
        Filter::less(prop("a"), Expression::literal(-5))
    );
    assert_eq!(
        parse("3 <= a").unwrap(),
        Filter::less_or_equal(Expression::literal(3), prop("a"))
    );
}

#[test]
fn test_double_quoted_name_is_property() {
    let filter = parse(r#"time > "1970-01-01""#).unwrap();
    assert_eq!(filter, Filter::greater(prop("time"), prop("1970-01-01")));
}

#[test]
fn test_and_with_spatial_function() {
    let filter = parse(r#"time > "1970-01-01" and INTERSECTS("geom", LINESTRING(0 0,1 1))"#).unwrap();
    let line: LineString<f64> = vec![(0.0, 0.0), (1.0, 1.0)].into();
    assert_eq!(
        filter,
        Filter::And(vec![
            Filter::greater(prop("time"), prop("1970-01-01")),
            Filter::intersects(prop("geom"), Expression::literal(line)),
        ])
    );
}

#[test]
fn test_precedence_and_parentheses() {
    let eq = |name: &str, value: i64| Filter::equals(prop(name), Expression::literal(value));

    let filter = parse("a = 1 OR b = 2 AND c = 3").unwrap();
    assert_eq!(
        filter,
        Filter::Or(vec![eq("a", 1), Filter::And(vec![eq("b", 2), eq("c", 3)])])
    );

    let filter = parse("(a = 1 OR b = 2) AND NOT c = 3").unwrap();
    assert_eq!(
        filter,
        Filter::And(vec![
            Filter::Or(vec![eq("a", 1), eq("b", 2)]),
            Filter::not(eq("c", 3)),
        ])
    );
}

#[test]
fn test_arithmetic_expression() {
    let filter = parse("(a + 1) * 2 > 10").unwrap();
    let expected_left = Expression::arithmetic(
        ArithmeticOp::Multiply,
        Expression::arithmetic(ArithmeticOp::Add, prop("a"), Expression::literal(1)),
        Expression::literal(2),
    );
    assert_eq!(filter, Filter::greater(expected_left, Expression::literal(10)));

    let filter = parse("a - 5 > 0").unwrap();
    assert_eq!(
        filter,
        Filter::greater(
            Expression::arithmetic(ArithmeticOp::Subtract, prop("a"), Expression::literal(5)),
            Expression::literal(0)
        )
    );
}

#[test]
fn test_function_call() {
    let filter = parse("strToUpperCase(name) = 'A'").unwrap();
    assert_eq!(
        filter,
        Filter::equals(
            Expression::function("strToUpperCase", vec![prop("name")]),
            Expression::literal("A")
        )
    );
}

#[test]
fn test_between_like_and_null() {
    assert_eq!(
        parse("integerAttr BETWEEN 1 AND 5").unwrap(),
        Filter::between(prop("integerAttr"), Expression::literal(1), Expression::literal(5))
    );
    assert_eq!(
        parse("stringAttr LIKE 'ab%'").unwrap(),
        Filter::like_with(prop("stringAttr"), "ab%", '%', '_', '\\', true)
    );
    assert_eq!(
        parse("stringAttr NOT ILIKE '_b%'").unwrap(),
        Filter::not(Filter::like_with(prop("stringAttr"), "_b%", '%', '_', '\\', false))
    );
    assert_eq!(parse("a IS NULL").unwrap(), Filter::is_null(prop("a")));
    assert_eq!(
        parse("a IS NOT NULL").unwrap(),
        Filter::not(Filter::is_null(prop("a")))
    );
}

#[test]
fn test_in_lists() {
    assert_eq!(
        parse("IN ('active.1', 'active.2')").unwrap(),
        Filter::id(["active.1", "active.2"])
    );
    assert_eq!(
        parse("a IN (1, 2)").unwrap(),
        Filter::Or(vec![
            Filter::equals(prop("a"), Expression::literal(1)),
            Filter::equals(prop("a"), Expression::literal(2)),
        ])
    );
}

#[test]
fn test_include_exclude() {
    assert_eq!(parse("INCLUDE").unwrap(), Filter::Include);
    assert_eq!(parse("exclude").unwrap(), Filter::Exclude);
}

#[test]
fn test_bbox() {
    let filter = parse("BBOX(geo_point, 0, 0, 1.1, 1.1, 'EPSG:4326')").unwrap();
    assert_eq!(filter, Filter::bbox("geo_point", 0.0, 0.0, 1.1, 1.1));
    let Filter::Spatial(spatial) = filter else {
        panic!("expected spatial filter");
    };
    assert_eq!(
        spatial.right,
        Expression::Literal(Literal::Geometry(Geometry::Rect(Rect::new(
            (0.0, 0.0),
            (1.1, 1.1)
        ))))
    );
}

#[test]
fn test_dwithin_and_beyond() {
    let filter = parse("DWITHIN(geo_point, POINT(0 1.1), 1.0, meters)").unwrap();
    assert_eq!(
        filter,
        Filter::dwithin(
            prop("geo_point"),
            Expression::literal(Point::new(0.0, 1.1)),
            1.0,
            "meters"
        )
    );

    let filter = parse("BEYOND(geo_point, POINT(0 1.1), 5, 'kilometers')").unwrap();
    assert_eq!(
        filter,
        Filter::beyond(
            prop("geo_point"),
            Expression::literal(Point::new(0.0, 1.1)),
            5.0,
            "kilometers"
        )
    );
}

#[test]
fn test_reversed_spatial_operands() {
    let filter = parse("DISJOINT(POLYGON((0 0, 0 1, 1 1, 1 0, 0 0)), geom)").unwrap();
    let Filter::Spatial(spatial) = filter else {
        panic!("expected spatial filter");
    };
    assert_eq!(spatial.op, SpatialOp::Disjoint);
    assert!(matches!(
        spatial.left,
        Expression::Literal(Literal::Geometry(Geometry::Polygon(_)))
    ));
    assert_eq!(spatial.right, prop("geom"));
}

#[test]
fn test_empty_geometry() {
    let filter = parse("INTERSECTS(geom, LINESTRING EMPTY)").unwrap();
    assert_eq!(
        filter,
        Filter::intersects(prop("geom"), Expression::literal(LineString::<f64>::new(vec![])))
    );
}

#[test]
fn test_attribute_named_like_geometry_keyword() {
    let filter = parse("point = 'x'").unwrap();
    assert_eq!(filter, Filter::equals(prop("point"), Expression::literal("x")));
}

#[test]
fn test_date_literal_in_comparison() {
    let filter = parse("dateAttr = 1970-07-19T01:02:03.456Z").unwrap();
    assert_eq!(
        filter,
        Filter::equals(
            prop("dateAttr"),
            Expression::literal(at("1970-07-19T01:02:03.456Z"))
        )
    );
}

#[test]
fn test_temporal_predicates() {
    assert_eq!(
        parse("dateAttr AFTER 1970-07-19T01:02:03.456Z").unwrap(),
        Filter::temporal(
            TemporalOp::After,
            prop("dateAttr"),
            Expression::literal(TemporalValue::instant(at("1970-07-19T01:02:03.456Z")))
        )
    );

    let filter =
        parse("dateAttr DURING 1970-07-19T01:02:03.456Z/1970-07-19T07:08:09.101Z").unwrap();
    assert_eq!(
        filter,
        Filter::temporal(
            TemporalOp::During,
            prop("dateAttr"),
            Expression::literal(TemporalValue::period(
                at("1970-07-19T01:02:03.456Z"),
                at("1970-07-19T07:08:09.101Z")
            ))
        )
    );

    let filter = parse("dateAttr tequals 1970-07-19").unwrap();
    assert!(matches!(filter, Filter::Temporal(ref t) if t.op == TemporalOp::TEquals));
}

#[test]
fn test_errors() {
    assert_eq!(
        parse("a = 'unterminated").unwrap_err(),
        CqlError::UnterminatedString(4)
    );
    assert_eq!(
        parse("a # 1").unwrap_err(),
        CqlError::UnexpectedCharacter('#', 2)
    );
    assert!(matches!(
        parse("a =").unwrap_err(),
        CqlError::UnexpectedEnd(_)
    ));
    assert!(matches!(parse("").unwrap_err(), CqlError::UnexpectedEnd(_)));
    assert!(matches!(
        parse("a = 1 b").unwrap_err(),
        CqlError::UnexpectedToken(_)
    ));
    assert!(matches!(
        parse("INTERSECTS(geom, POINT(0))").unwrap_err(),
        CqlError::InvalidGeometry(_)
    ));
}
