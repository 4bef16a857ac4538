use super::*;
use ogc_filter::{AttributeDescriptor, AttributeType, Expression, FeatureSchema};

fn schema() -> FeatureSchema {
    FeatureSchema::new(
        "t",
        vec![
            AttributeDescriptor::new("name", AttributeType::String),
            AttributeDescriptor::new("tags.label", AttributeType::String)
                .nested()
                .with_full_name("doc.tags.label"),
            AttributeDescriptor::new("flat", AttributeType::String).nested(),
        ],
    )
}

fn encoded(schema: &FeatureSchema, filter: &Filter) -> Value {
    let mut encoder = FilterToElastic::new(schema);
    encoder.encode(filter).unwrap();
    encoder.query_builder().to_json()
}

#[test]
fn test_new_encoder_is_match_all() {
    let schema = schema();
    let encoder = FilterToElastic::new(&schema);
    assert!(encoder.query_builder().is_match_all());
    assert!(encoder.native_query_builder().is_match_all());
    assert!(encoder.aggregations().is_none());
    assert!(encoder.fully_supported());
    assert_eq!(encoder.to_json()["aggregations"], Value::Null);
}

#[test]
fn test_nested_path_follows_full_name() {
    let schema = schema();
    let filter = Filter::equals(Expression::property("tags.label"), Expression::literal("x"));
    assert_eq!(
        encoded(&schema, &filter),
        json!({"nested": {
            "path": "doc.tags",
            "query": {"term": {"doc.tags.label": "x"}},
            "score_mode": "none"
        }})
    );
}

#[test]
fn test_nested_without_parent_uses_whole_name() {
    let schema = schema();
    let filter = Filter::equals(Expression::property("flat"), Expression::literal("x"));
    assert_eq!(
        encoded(&schema, &filter),
        json!({"nested": {
            "path": "flat",
            "query": {"term": {"flat": "x"}},
            "score_mode": "none"
        }})
    );
}

#[test]
fn test_unsupported_message_names_the_operand() {
    let schema = schema();
    let mut encoder = FilterToElastic::new(&schema);
    let filter = Filter::equals(
        Expression::function("strLength", vec![Expression::property("name")]),
        Expression::literal(3),
    );
    match encoder.encode(&filter) {
        Err(EncodeError::UnsupportedOperation(msg)) => assert!(msg.contains("function strLength")),
        other => panic!("expected unsupported operation, got {:?}", other),
    }
}

#[test]
fn test_spatial_without_default_geometry() {
    let schema = schema();
    let mut encoder = FilterToElastic::new(&schema);
    let filter = Filter::intersects(
        Expression::property(""),
        Expression::literal(ogc_filter::geo_types::Point::new(1.0, 2.0)),
    );
    assert!(matches!(
        encoder.encode(&filter),
        Err(EncodeError::InvalidArgument(_))
    ));
}
