//! Typed Elasticsearch query fragments and their JSON rendering.

use crate::errors::EncodeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strum::{AsRefStr, Display, EnumString};

/// Score mode of a `nested` query.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScoreMode {
    #[default]
    None,
    Avg,
    Max,
    Min,
    Sum,
}

/// Spatial relation of a `geo_shape` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ShapeRelation {
    Intersects,
    Within,
    Contains,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
}

impl RangeBounds {
    pub fn gt(mut self, value: Value) -> Self {
        self.gt = Some(value);
        self
    }

    pub fn gte(mut self, value: Value) -> Self {
        self.gte = Some(value);
        self
    }

    pub fn lt(mut self, value: Value) -> Self {
        self.lt = Some(value);
        self
    }

    pub fn lte(mut self, value: Value) -> Self {
        self.lte = Some(value);
        self
    }

    fn to_json(&self) -> Value {
        let mut bounds = Map::new();
        for (key, bound) in [
            ("gt", &self.gt),
            ("gte", &self.gte),
            ("lt", &self.lt),
            ("lte", &self.lte),
        ] {
            if let Some(value) = bound {
                bounds.insert(key.to_string(), value.clone());
            }
        }
        Value::Object(bounds)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<QueryFragment>,
    pub filter: Vec<QueryFragment>,
    pub should: Vec<QueryFragment>,
    pub must_not: Vec<QueryFragment>,
}

impl BoolQuery {
    fn to_json(&self) -> Value {
        let mut clauses = Map::new();
        for (key, list) in [
            ("must", &self.must),
            ("filter", &self.filter),
            ("should", &self.should),
            ("must_not", &self.must_not),
        ] {
            if !list.is_empty() {
                let rendered = list.iter().map(QueryFragment::to_json).collect();
                clauses.insert(key.to_string(), Value::Array(rendered));
            }
        }
        Value::Object(clauses)
    }
}

/// `[lon, lat]` in the order Elasticsearch expects for array coordinates.
pub type LonLat = [f64; 2];

#[derive(Debug, Clone, PartialEq)]
pub enum QueryFragment {
    MatchAll,
    Term {
        field: String,
        value: Value,
    },
    Range {
        field: String,
        bounds: RangeBounds,
    },
    Bool(BoolQuery),
    Exists {
        field: String,
    },
    Ids {
        values: Vec<String>,
    },
    Nested {
        path: String,
        query: Box<QueryFragment>,
        score_mode: ScoreMode,
    },
    Regexp {
        field: String,
        pattern: String,
    },
    QueryString {
        query: String,
        default_field: String,
    },
    GeoShape {
        field: String,
        shape: Value,
        relation: ShapeRelation,
    },
    GeoBoundingBox {
        field: String,
        top_left: LonLat,
        bottom_right: LonLat,
    },
    GeoPolygon {
        field: String,
        points: Vec<LonLat>,
    },
    GeoDistance {
        field: String,
        distance: String,
        point: LonLat,
    },
    /// Caller supplied query source, base64 encoded.
    Wrapper {
        query: String,
    },
}

impl QueryFragment {
    pub fn match_all() -> Self {
        QueryFragment::MatchAll
    }

    /// Matches no document.
    pub fn match_none() -> Self {
        Self::must_not(QueryFragment::MatchAll)
    }

    pub fn term(field: impl Into<String>, value: Value) -> Self {
        QueryFragment::Term {
            field: field.into(),
            value,
        }
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        QueryFragment::Range {
            field: field.into(),
            bounds,
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        QueryFragment::Exists {
            field: field.into(),
        }
    }

    pub fn ids(values: Vec<String>) -> Self {
        QueryFragment::Ids { values }
    }

    pub fn must(children: Vec<QueryFragment>) -> Self {
        QueryFragment::Bool(BoolQuery {
            must: children,
            ..Default::default()
        })
    }

    pub fn should(children: Vec<QueryFragment>) -> Self {
        QueryFragment::Bool(BoolQuery {
            should: children,
            ..Default::default()
        })
    }

    pub fn must_not(child: QueryFragment) -> Self {
        QueryFragment::Bool(BoolQuery {
            must_not: vec![child],
            ..Default::default()
        })
    }

    /// Runs `child` in filter context so it does not contribute to scoring.
    pub fn filtered(child: QueryFragment) -> Self {
        QueryFragment::Bool(BoolQuery {
            must: vec![QueryFragment::MatchAll],
            filter: vec![child],
            ..Default::default()
        })
    }

    pub fn nested(path: impl Into<String>, query: QueryFragment, score_mode: ScoreMode) -> Self {
        QueryFragment::Nested {
            path: path.into(),
            query: Box::new(query),
            score_mode,
        }
    }

    pub fn wrapper(source: &str) -> Self {
        QueryFragment::Wrapper {
            query: STANDARD.encode(source.as_bytes()),
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, QueryFragment::MatchAll)
    }

    /// Decoded source of a wrapper query, `None` for every other fragment.
    pub fn wrapped_source(&self) -> Option<Result<String, EncodeError>> {
        match self {
            QueryFragment::Wrapper { query } => Some(decode_wrapped(query)),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            QueryFragment::MatchAll => json!({ "match_all": {} }),
            QueryFragment::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            QueryFragment::Range { field, bounds } => {
                json!({ "range": { field.as_str(): bounds.to_json() } })
            }
            QueryFragment::Bool(query) => json!({ "bool": query.to_json() }),
            QueryFragment::Exists { field } => json!({ "exists": { "field": field } }),
            QueryFragment::Ids { values } => json!({ "ids": { "values": values } }),
            QueryFragment::Nested {
                path,
                query,
                score_mode,
            } => json!({
                "nested": {
                    "path": path,
                    "query": query.to_json(),
                    "score_mode": score_mode.as_ref(),
                }
            }),
            QueryFragment::Regexp { field, pattern } => {
                json!({ "regexp": { field.as_str(): pattern } })
            }
            QueryFragment::QueryString {
                query,
                default_field,
            } => json!({
                "query_string": { "query": query, "default_field": default_field }
            }),
            QueryFragment::GeoShape {
                field,
                shape,
                relation,
            } => json!({
                "geo_shape": {
                    field.as_str(): { "shape": shape, "relation": relation.as_ref() }
                }
            }),
            QueryFragment::GeoBoundingBox {
                field,
                top_left,
                bottom_right,
            } => json!({
                "geo_bounding_box": {
                    field.as_str(): { "top_left": top_left, "bottom_right": bottom_right }
                }
            }),
            QueryFragment::GeoPolygon { field, points } => {
                json!({ "geo_polygon": { field.as_str(): { "points": points } } })
            }
            QueryFragment::GeoDistance {
                field,
                distance,
                point,
            } => json!({
                "geo_distance": { "distance": distance, field.as_str(): point }
            }),
            QueryFragment::Wrapper { query } => json!({ "wrapper": { "query": query } }),
        }
    }
}

impl Serialize for QueryFragment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

pub fn decode_wrapped(encoded: &str) -> Result<String, EncodeError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| EncodeError::ViewParam(format!("wrapper query is not base64: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| EncodeError::ViewParam(format!("wrapper query is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_renders_only_populated_clauses() {
        let query = QueryFragment::must(vec![
            QueryFragment::term("a", json!(1)),
            QueryFragment::exists("b"),
        ]);
        assert_eq!(
            query.to_json(),
            json!({"bool": {"must": [
                {"term": {"a": 1}},
                {"exists": {"field": "b"}}
            ]}})
        );
        assert_eq!(
            QueryFragment::Bool(BoolQuery::default()).to_json(),
            json!({"bool": {}})
        );
    }

    #[test]
    fn test_range_bounds_order() {
        let query = QueryFragment::range("n", RangeBounds::default().lte(json!(5)).gte(json!(1)));
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"range":{"n":{"gte":1,"lte":5}}}"#
        );
    }

    #[test]
    fn test_nested_and_match_none() {
        let query = QueryFragment::nested(
            "nested",
            QueryFragment::term("nested.hej", json!("x")),
            ScoreMode::None,
        );
        assert_eq!(
            query.to_json(),
            json!({"nested": {
                "path": "nested",
                "query": {"term": {"nested.hej": "x"}},
                "score_mode": "none"
            }})
        );
        assert_eq!(
            QueryFragment::match_none().to_json(),
            json!({"bool": {"must_not": [{"match_all": {}}]}})
        );
    }

    #[test]
    fn test_geo_fragments() {
        let bbox = QueryFragment::GeoBoundingBox {
            field: "p".to_string(),
            top_left: [0.0, 1.0],
            bottom_right: [1.0, 0.0],
        };
        assert_eq!(
            bbox.to_json(),
            json!({"geo_bounding_box": {"p": {"top_left": [0.0, 1.0], "bottom_right": [1.0, 0.0]}}})
        );
        let distance = QueryFragment::GeoDistance {
            field: "p".to_string(),
            distance: "1.0m".to_string(),
            point: [0.0, 1.1],
        };
        assert_eq!(
            distance.to_json(),
            json!({"geo_distance": {"distance": "1.0m", "p": [0.0, 1.1]}})
        );
        let shape = QueryFragment::GeoShape {
            field: "g".to_string(),
            shape: json!({"type": "Point", "coordinates": [1.0, 2.0]}),
            relation: ShapeRelation::Within,
        };
        assert_eq!(
            shape.to_json()["geo_shape"]["g"]["relation"],
            json!("WITHIN")
        );
    }

    #[test]
    fn test_wrapper_round_trip() {
        let source = r#"{"term":{"a":"ü"}}"#;
        let wrapper = QueryFragment::wrapper(source);
        assert_eq!(wrapper.wrapped_source().unwrap().unwrap(), source);
        assert!(QueryFragment::MatchAll.wrapped_source().is_none());
        assert!(matches!(
            decode_wrapped("***"),
            Err(EncodeError::ViewParam(_))
        ));
    }

    #[test]
    fn test_score_mode_names() {
        assert_eq!(ScoreMode::default().as_ref(), "none");
        assert_eq!("avg".parse::<ScoreMode>().unwrap(), ScoreMode::Avg);
    }
}
