use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kind for response parse failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// The response could not be decoded, a structural rewrite found a node
    /// of the wrong kind, or a date string failed the ISO-8601 grammar.
    MalformedResponse,
    /// A leaf value could not be coerced to its target scalar type.
    TypeMismatch,
}

/// Produced when a response cannot be normalized and mapped to model objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ParseError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ParseError {
            kind: ParseErrorKind::MalformedResponse,
            message: message.into(),
            path: None,
        }
    }

    pub(crate) fn with_path(mut self, path: impl Into<String>) -> Self {
        if self.path.is_none() {
            self.path = Some(path.into());
        }
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Error body returned by the OAuth2 token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OauthError {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

impl fmt::Display for OauthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error_description.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{}: {}", self.error, self.error_description)
        }
    }
}

impl std::error::Error for OauthError {}

/// Combined error type for the API methods.
#[derive(Debug)]
pub enum MauticError {
    /// A response was received but could not be parsed into model objects.
    Parse(ParseError),
    /// The OAuth2 endpoint rejected a token request.
    Oauth(OauthError),
    /// The API answered with a non-success HTTP status.
    Api { status: u16, message: String },
    /// The request never produced a usable response (connection failures,
    /// unreadable bodies).
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// The client is not configured for the attempted operation.
    Config(String),
}

impl MauticError {
    pub(crate) fn transport(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        MauticError::Transport {
            message: message.into(),
            source,
        }
    }
}

impl fmt::Display for MauticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MauticError::Parse(e) => write!(f, "parse error: {}", e),
            MauticError::Oauth(e) => write!(f, "oauth error: {}", e),
            MauticError::Api { status, message } => {
                write!(f, "api error (HTTP {}): {}", status, message)
            }
            MauticError::Transport { message, .. } => write!(f, "transport error: {}", message),
            MauticError::Config(message) => write!(f, "configuration error: {}", message),
        }
    }
}

impl std::error::Error for MauticError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MauticError::Parse(e) => Some(e),
            MauticError::Oauth(e) => Some(e),
            MauticError::Transport { source, .. } => source
                .as_ref()
                .map(|e| &**e as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl From<ParseError> for MauticError {
    fn from(e: ParseError) -> Self {
        MauticError::Parse(e)
    }
}

impl From<OauthError> for MauticError {
    fn from(e: OauthError) -> Self {
        MauticError::Oauth(e)
    }
}
