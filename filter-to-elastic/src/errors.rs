/// Errors raised while translating a filter or merging view parameters
#[derive(Debug)]
pub enum EncodeError {
    /// The filter uses a construct that has no Elasticsearch translation.
    UnsupportedOperation(String),
    /// Operand order, operand shape or a literal value is not acceptable.
    InvalidArgument(String),
    /// A caller supplied view parameter could not be interpreted.
    ViewParam(String),
    Json(serde_json::Error),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err)
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            EncodeError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            EncodeError::ViewParam(msg) => write!(f, "Invalid view parameter: {}", msg),
            EncodeError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for EncodeError {}

impl EncodeError {
    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        EncodeError::UnsupportedOperation(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EncodeError::InvalidArgument(msg.into())
    }
}
