mod common;

use common::*;
use filter_to_elastic::{EncodeError, EncoderConfig, LikeMode};
use ogc_filter::{Expression, Filter};
use serde_json::json;

#[test]
fn test_analyzed_attribute_uses_query_string() {
    assert_eq!(
        encode(&Filter::like(p("analyzed"), "broad.ay")),
        json!({"query_string": {"query": "broad?ay", "default_field": "analyzed"}})
    );
    assert_eq!(
        encode(&Filter::like(p("analyzed"), "BroadWay*")),
        json!({"query_string": {"query": "BroadWay*", "default_field": "analyzed"}})
    );
}

#[test]
fn test_plain_attribute_uses_regexp() {
    let cases = [
        ("BroadWay*", "BroadWay.*"),
        ("broad.ay", "broad\\.ay"),
        ("broadway!", "broadway"),
        ("broadway!!", "broadway\\!"),
    ];
    for (pattern, expected) in cases {
        assert_eq!(
            encode(&Filter::like(p("stringAttr"), pattern)),
            json!({"regexp": {"stringAttr": expected}}),
            "pattern {}",
            pattern
        );
    }
}

#[test]
fn test_unknown_attribute_follows_config() {
    assert_eq!(
        encode(&Filter::like(p("unknown"), "broadway.")),
        json!({"query_string": {"query": "broadway?", "default_field": "unknown"}})
    );
    let config = EncoderConfig {
        unknown_like_mode: LikeMode::Regex,
        ..EncoderConfig::default()
    };
    assert_eq!(
        encode_with(&Filter::like(p("unknown"), "broadway*"), config).unwrap(),
        json!({"regexp": {"unknown": "broadway.*"}})
    );
}

#[test]
fn test_nested_like() {
    assert_eq!(
        encode(&Filter::like(p("nested.hej"), "val*")),
        nested(
            "nested",
            json!({"query_string": {"query": "val*", "default_field": "nested.hej"}})
        )
    );
}

#[test]
fn test_sql_style_pattern_and_case_flag() {
    let filter = Filter::like_with(p("stringAttr"), "ab%c", '%', '_', '\\', false);
    assert_eq!(encode(&filter), json!({"regexp": {"stringAttr": "ab.*c"}}));
}

#[test]
fn test_like_on_function_is_unsupported() {
    let upper = Expression::function("strToUpperCase", vec![p("stringAttr")]);
    assert!(matches!(
        try_encode(&Filter::like(upper, "A*")),
        Err(EncodeError::UnsupportedOperation(_))
    ));
}
