//! Error taxonomy shared by every fallible operation in the crate.

use alloc::string::String;

use blacksquid_arena::AllocError;
use thiserror::Error;

use crate::values::Kind;

/// Everything that can go wrong while building, querying or rendering values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("range {start}..{end} out of bounds for length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("key {key:?} not found")]
    NotFound { key: String },

    #[error(transparent)]
    Allocation(#[from] AllocError),

    #[error("template syntax error at byte {offset}: {message}")]
    TemplateSyntax { offset: usize, message: &'static str },

    #[error("no value for placeholder {key:?} at byte {offset}")]
    MissingKey { key: String, offset: usize },

    #[error("format error at byte {offset}: {message}")]
    Format { offset: usize, message: &'static str },

    #[error("expected {expected} value, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    #[error("value nesting exceeds maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
