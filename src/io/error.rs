use std::io;
use std::path::PathBuf;

use crate::quantity::ParseError;
use thiserror::Error;

/// Errors turning a document tree into a model.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized tag `{0}`")]
    UnknownTag(String),

    #[error("`{tag}` element used where a {expected} was expected")]
    UnexpectedTag { tag: String, expected: &'static str },

    #[error("`{tag}` element is missing attribute `{attribute}`")]
    MissingAttribute {
        tag: String,
        attribute: &'static str,
    },

    #[error("`{tag}` element is missing its `{child}` child")]
    MissingChild { tag: String, child: &'static str },

    #[error("attribute `{attribute}`: {source}")]
    BadQuantity {
        attribute: &'static str,
        source: ParseError,
    },

    #[error("attribute `{attribute}` is not a positive whole number: `{value}`")]
    BadCount {
        attribute: &'static str,
        value: String,
    },

    #[error("target amount `{0}` is neither an attribute name nor a quantity")]
    BadTargetAmount(String),
}

/// Errors reading or writing a model file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
