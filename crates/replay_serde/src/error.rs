use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

use crate::info::ReflectKind;

// -----------------------------------------------------------------------------
// EncodingError

/// A value could not be turned into its wire representation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodingError {
    #[error("failed to encode `{type_path}`: {source}")]
    Leaf {
        type_path: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no serializer registered for `{type_path}`")]
    Unregistered { type_path: &'static str },

    #[error("`{type_path}` encodes to an empty structure")]
    EmptyStructure { type_path: &'static str },

    #[error("encoder for `{expected}` was given a `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to write encoded payload: {0}")]
    Sink(#[source] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl EncodingError {
    /// Creates an error with a free-form message, for use in encode overrides.
    #[inline]
    pub fn custom(msg: impl Display) -> Self {
        Self::Custom(msg.to_string())
    }
}

// -----------------------------------------------------------------------------
// TypeResolutionError

/// A type identifier could not be turned into an instantiable type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeResolutionError {
    #[error("no type registered under `{type_path}`")]
    Unknown { type_path: String },

    #[error("Rust type `{type_name}` is not registered")]
    Unregistered { type_name: &'static str },

    #[error("`{type_path}` has no default constructor")]
    NotConstructible { type_path: &'static str },

    #[error("`{type_path}` has no deserializer")]
    NotDeserializable { type_path: &'static str },

    #[error("`{type_path}` is a {found}, expected a {expected}")]
    KindMismatch {
        type_path: &'static str,
        expected: ReflectKind,
        found: ReflectKind,
    },
}

// -----------------------------------------------------------------------------
// DecodingError

/// A payload could not be turned back into a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodingError {
    #[error("payload is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),

    #[error("malformed {context} at position {position}: {reason}")]
    Malformed {
        context: &'static str,
        position: usize,
        reason: String,
    },

    #[error("failed to decode `{type_path}`: {source}")]
    Leaf {
        type_path: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot update `{type_path}` in place: {source}")]
    Merge {
        type_path: &'static str,
        #[source]
        source: EncodingError,
    },

    #[error("decoded a `{found}` where a `{expected}` was requested")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Custom(String),
}

impl DecodingError {
    /// Creates an error with a free-form message, for use in decode overrides.
    #[inline]
    pub fn custom(msg: impl Display) -> Self {
        Self::Custom(msg.to_string())
    }

    #[inline]
    pub(crate) fn malformed(context: &'static str, position: usize, reason: impl Display) -> Self {
        Self::Malformed {
            context,
            position,
            reason: reason.to_string(),
        }
    }

    /// Returns `true` if a type identifier in the payload could not be resolved.
    #[inline]
    pub fn is_type_resolution(&self) -> bool {
        matches!(self, Self::TypeResolution(_))
    }
}

// -----------------------------------------------------------------------------
// Tests
