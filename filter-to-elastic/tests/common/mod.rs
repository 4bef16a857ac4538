//! Common test utilities and the shared feature schema for the filter-to-elastic crate

#![allow(dead_code)]

use filter_to_elastic::{EncodeError, EncoderConfig, FilterToElastic, Query};
use ogc_filter::{AttributeDescriptor, AttributeType, Expression, FeatureSchema, Filter};
use serde_json::{json, Value};

/// Same attribute set as `test_schema()`, in the on-disk YAML form
pub const TEST_SCHEMA_YAML: &str = r#"
name: test
attributes:
  - { name: stringAttr, type: string }
  - { name: integerAttr, type: integer }
  - { name: longAttr, type: long }
  - { name: booleanAttr, type: boolean }
  - { name: doubleAttr, type: double }
  - { name: floatAttr, type: float }
  - { name: dateAttr, type: date }
  - { name: geo_point, type: geometry, geometry: point }
  - { name: geom, type: geometry, geometry: shape, default_geometry: true }
  - { name: analyzed, type: string, analyzed: true }
  - { name: nested.hej, type: string, nested: true, analyzed: true }
  - { name: nested.datehej, type: date, nested: true }
"#;

pub fn test_schema() -> FeatureSchema {
    FeatureSchema::new(
        "test",
        vec![
            AttributeDescriptor::new("stringAttr", AttributeType::String),
            AttributeDescriptor::new("integerAttr", AttributeType::Integer),
            AttributeDescriptor::new("longAttr", AttributeType::Long),
            AttributeDescriptor::new("booleanAttr", AttributeType::Boolean),
            AttributeDescriptor::new("doubleAttr", AttributeType::Double),
            AttributeDescriptor::new("floatAttr", AttributeType::Float),
            AttributeDescriptor::new("dateAttr", AttributeType::Date),
            AttributeDescriptor::point("geo_point"),
            AttributeDescriptor::shape("geom").default_geometry(),
            AttributeDescriptor::new("analyzed", AttributeType::String).analyzed(),
            AttributeDescriptor::new("nested.hej", AttributeType::String)
                .nested()
                .analyzed(),
            AttributeDescriptor::new("nested.datehej", AttributeType::Date).nested(),
        ],
    )
}

pub fn p(name: &str) -> Expression {
    Expression::property(name)
}

pub fn lit(value: impl Into<ogc_filter::Literal>) -> Expression {
    Expression::literal(value)
}

/// Encodes `filter` against the test schema and renders the compiled query
pub fn encode(filter: &Filter) -> Value {
    try_encode(filter).unwrap()
}

pub fn try_encode(filter: &Filter) -> Result<Value, EncodeError> {
    encode_with(filter, EncoderConfig::default())
}

pub fn encode_with(filter: &Filter, config: EncoderConfig) -> Result<Value, EncodeError> {
    let schema = test_schema();
    let mut encoder = FilterToElastic::new(&schema).with_config(config);
    encoder.encode(filter)?;
    Ok(encoder.query_builder().to_json())
}

pub fn encode_query(query: &Query) -> Result<Value, EncodeError> {
    let schema = test_schema();
    let mut encoder = FilterToElastic::new(&schema);
    encoder.encode_query(query)?;
    Ok(encoder.to_json())
}

/// `bool{must:[match_all], filter:[query]}`, the filter context spatial queries run in
pub fn filtered(query: Value) -> Value {
    json!({"bool": {"must": [{"match_all": {}}], "filter": [query]}})
}

pub fn must_not(query: Value) -> Value {
    json!({"bool": {"must_not": [query]}})
}

pub fn match_none() -> Value {
    must_not(json!({"match_all": {}}))
}

pub fn nested(path: &str, query: Value) -> Value {
    json!({"nested": {"path": path, "query": query, "score_mode": "none"}})
}
