use crate::errors::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use strum::{Display, EnumString};

/// Declared value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttributeType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    Geometry,
}

/// How a geometry attribute is indexed by the backend.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GeometryKind {
    #[default]
    None,
    Point,
    Shape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub binding: AttributeType,
    #[serde(default)]
    pub geometry: GeometryKind,
    #[serde(default)]
    pub nested: bool,
    #[serde(default)]
    pub analyzed: bool,
    /// One or more date formats separated by `||`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default)]
    pub default_geometry: bool,
    /// Field path in the index when it differs from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, binding: AttributeType) -> Self {
        let geometry = if binding == AttributeType::Geometry {
            GeometryKind::Shape
        } else {
            GeometryKind::None
        };
        Self {
            name: name.into(),
            binding,
            geometry,
            nested: false,
            analyzed: false,
            date_format: None,
            default_geometry: false,
            full_name: None,
        }
    }

    pub fn point(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Geometry).with_geometry(GeometryKind::Point)
    }

    pub fn shape(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Geometry)
    }

    pub fn with_geometry(mut self, kind: GeometryKind) -> Self {
        self.geometry = kind;
        self
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    pub fn analyzed(mut self) -> Self {
        self.analyzed = true;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn default_geometry(mut self) -> Self {
        self.default_geometry = true;
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Name of the index field queries are keyed on.
    pub fn field_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_geometry(&self) -> bool {
        self.binding == AttributeType::Geometry || self.geometry != GeometryKind::None
    }

    /// Geometry attributes that do not say how they are indexed are shapes.
    pub fn geometry_kind(&self) -> GeometryKind {
        match (self.geometry, self.binding) {
            (GeometryKind::None, AttributeType::Geometry) => GeometryKind::Shape,
            (kind, _) => kind,
        }
    }
}

/// Metadata lookup used while translating filters.
pub trait SchemaProvider {
    fn resolve(&self, property: &str) -> Option<&AttributeDescriptor>;

    fn default_geometry(&self) -> Option<&AttributeDescriptor>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
}

impl FeatureSchema {
    pub fn new(name: impl Into<String>, attributes: Vec<AttributeDescriptor>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        let schema: FeatureSchema = serde_yaml_ng::from_str(content)?;
        schema.validate()
    }

    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        let schema: FeatureSchema = serde_json::from_str(content)?;
        schema.validate()
    }

    /// Loads a schema file, JSON when the extension is `.json`, YAML otherwise.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    fn validate(self) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for attribute in &self.attributes {
            if !seen.insert(attribute.name.as_str()) {
                return Err(SchemaError::DuplicateAttribute(attribute.name.clone()));
            }
        }
        Ok(self)
    }
}

impl SchemaProvider for FeatureSchema {
    fn resolve(&self, property: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == property)
    }

    fn default_geometry(&self) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|a| a.default_geometry)
            .or_else(|| self.attributes.iter().find(|a| a.is_geometry()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA_YAML: &str = r#"
name: active
attributes:
  - name: dateAttr
    type: date
    date_format: "yyyy-MM-dd"
  - name: geo_point
    type: geometry
    geometry: point
  - name: geom
    type: geometry
    geometry: shape
    default_geometry: true
  - name: nested.hej
    type: string
    nested: true
    analyzed: true
  - name: label
    type: string
    full_name: properties.label
"#;

    #[test]
    fn test_schema_from_yaml() {
        let schema = FeatureSchema::from_yaml_str(SCHEMA_YAML).unwrap();
        assert_eq!(schema.name, "active");
        assert_eq!(schema.attributes.len(), 5);

        let date = schema.resolve("dateAttr").unwrap();
        assert_eq!(date.binding, AttributeType::Date);
        assert_eq!(date.date_format.as_deref(), Some("yyyy-MM-dd"));
        assert_eq!(date.geometry, GeometryKind::None);

        let nested = schema.resolve("nested.hej").unwrap();
        assert!(nested.nested);
        assert!(nested.analyzed);

        assert_eq!(schema.resolve("label").unwrap().field_name(), "properties.label");
        assert_eq!(schema.default_geometry().unwrap().name, "geom");
        assert!(schema.resolve("missing").is_none());
    }

    #[test]
    fn test_default_geometry_falls_back_to_first_geometry() {
        let schema = FeatureSchema::new(
            "t",
            vec![
                AttributeDescriptor::new("name", AttributeType::String),
                AttributeDescriptor::point("location"),
            ],
        );
        assert_eq!(schema.default_geometry().unwrap().name, "location");
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let json = r#"{"name":"t","attributes":[
            {"name":"a","type":"string"},
            {"name":"a","type":"integer"}]}"#;
        match FeatureSchema::from_json_str(json) {
            Err(SchemaError::DuplicateAttribute(name)) => assert_eq!(name, "a"),
            other => panic!("expected duplicate attribute error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_by_extension() {
        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        yaml.write_all(SCHEMA_YAML.as_bytes()).unwrap();
        assert_eq!(FeatureSchema::load(yaml.path()).unwrap().attributes.len(), 5);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json.write_all(br#"{"attributes":[{"name":"n","type":"long"}]}"#)
            .unwrap();
        let schema = FeatureSchema::load(json.path()).unwrap();
        assert_eq!(schema.resolve("n").unwrap().binding, AttributeType::Long);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let result = FeatureSchema::from_yaml_str("attributes:\n  - name: a\n    type: blob\n");
        assert!(matches!(result, Err(SchemaError::Yaml(_))));
    }
}
