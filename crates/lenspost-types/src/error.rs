/// Failure carried by a wrapped protocol API result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    pub message: String,
    pub code: Option<String>,
}

impl ProtocolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Typed-data document could not be assembled for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedDataError {
    NoPrimaryType,
    AmbiguousPrimaryType(Vec<String>),
    Encoding(String),
}

impl std::fmt::Display for TypedDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPrimaryType => write!(f, "typed data has no primary type"),
            Self::AmbiguousPrimaryType(roots) => {
                write!(f, "typed data has several root types: {}", roots.join(", "))
            }
            Self::Encoding(msg) => write!(f, "typed data encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for TypedDataError {}
