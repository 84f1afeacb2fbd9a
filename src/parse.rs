//! Entry points that turn raw response bytes into typed results.
//!
//! Each parse composes the same pipeline: decode the byte stream into a
//! generic JSON tree, run the structural rewrites from [`crate::normalize`],
//! then bind the canonical tree onto the model types. The tree is private to
//! one call; nothing is shared or cached between calls.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ParseError, ParseErrorKind};
use crate::normalize;
use crate::types::{GetContactResult, ListContactsResult};

/// Parse the JSON returned by the `GET /contacts` endpoint.
///
/// # Errors
///
/// Returns a [`ParseError`] when the stream is not valid JSON, a structural
/// rewrite meets a node of the wrong kind, or a leaf value cannot be coerced
/// to its model type.
pub fn parse_list_contacts<R: Read>(input: R) -> Result<ListContactsResult, ParseError> {
    let mut tree = read_tree(input)?;
    normalize::normalize_list_contacts(&mut tree)?;
    bind(tree, "ListContactsResult")
}

/// Parse the JSON returned by the `GET /contacts/{id}` endpoint.
///
/// # Errors
///
/// Same conditions as [`parse_list_contacts`]; additionally fails when the
/// response carries no contact object under the legacy `lead` key.
pub fn parse_get_contact<R: Read>(input: R) -> Result<GetContactResult, ParseError> {
    let mut tree = read_tree(input)?;
    normalize::normalize_get_contact(&mut tree)?;
    bind(tree, "GetContactResult")
}

/// Decode a byte stream into a generic JSON tree.
fn read_tree<R: Read>(input: R) -> Result<Value, ParseError> {
    serde_json::from_reader(input).map_err(|e| ParseError {
        kind: ParseErrorKind::MalformedResponse,
        message: format!("could not read json: {}", e),
        path: None,
    })
}

/// Bind a normalized tree onto a model type, classifying binding failures.
fn bind<T: DeserializeOwned>(tree: Value, target: &str) -> Result<T, ParseError> {
    serde_json::from_value(tree).map_err(|e| {
        let message = e.to_string();
        ParseError {
            kind: classify_bind_error(&message),
            message: format!("could not convert json to {}: {}", target, message),
            path: None,
        }
    })
}

/// Serde reports binding failures as rendered messages, so classification is
/// by message shape: date-grammar failures and missing envelope keys are
/// malformed responses, everything else is a scalar coercion failure.
fn classify_bind_error(message: &str) -> ParseErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("iso-8601") || lower.contains("missing field") {
        ParseErrorKind::MalformedResponse
    } else {
        ParseErrorKind::TypeMismatch
    }
}
