/// Errors raised while parsing ECQL text
#[derive(Debug, Clone, PartialEq)]
pub enum CqlError {
    UnexpectedCharacter(char, usize),
    UnterminatedString(usize),
    UnexpectedToken(String),
    UnexpectedEnd(&'static str),
    InvalidNumber(String),
    InvalidGeometry(String),
    InvalidTemporal(String),
}

impl std::fmt::Display for CqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CqlError::UnexpectedCharacter(ch, pos) => {
                write!(f, "Unexpected character '{}' at position {}", ch, pos)
            }
            CqlError::UnterminatedString(pos) => {
                write!(f, "Unterminated string starting at position {}", pos)
            }
            CqlError::UnexpectedToken(token) => write!(f, "Unexpected token: {}", token),
            CqlError::UnexpectedEnd(expected) => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            CqlError::InvalidNumber(text) => write!(f, "Invalid number: {}", text),
            CqlError::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            CqlError::InvalidTemporal(text) => write!(f, "Invalid date or period: {}", text),
        }
    }
}

impl std::error::Error for CqlError {}

/// Errors raised while loading a feature schema
#[derive(Debug)]
pub enum SchemaError {
    Io(std::io::Error),
    Yaml(serde_yaml_ng::Error),
    Json(serde_json::Error),
    DuplicateAttribute(String),
}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for SchemaError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        SchemaError::Yaml(err)
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json(err)
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::Io(err) => write!(f, "IO error: {}", err),
            SchemaError::Yaml(err) => write!(f, "YAML error: {}", err),
            SchemaError::Json(err) => write!(f, "JSON error: {}", err),
            SchemaError::DuplicateAttribute(name) => {
                write!(f, "Attribute declared more than once: {}", name)
            }
        }
    }
}

impl std::error::Error for SchemaError {}
