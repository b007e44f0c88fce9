// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for polycodec.
//!
//! Every failure the engine can report is a variant of [`CodecError`]:
//! registration and initialization problems, wire-level read failures and
//! value/shape mismatches found while encoding. None of them panic.

use thiserror::Error;

/// Errors that can occur while registering types or encoding/decoding values.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// The input ended before a read could complete.
    #[error(
        "Truncated stream: requested {requested} bytes at position {position}, but only {available} bytes available"
    )]
    TruncatedStream {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the read started
        position: usize,
    },

    /// A length does not fit the wire representation.
    #[error("Encoding limit exceeded for {what}: length {length} exceeds maximum {limit}")]
    EncodingLimitExceeded {
        /// What was being written (string, blob, element count)
        what: String,
        /// Actual length
        length: usize,
        /// Largest encodable length
        limit: usize,
    },

    /// A type name or type id is not registered.
    #[error("Unknown type: '{type_name}'")]
    UnknownType {
        /// Type name, or `#id` for numeric lookups
        type_name: String,
    },

    /// A type was registered twice.
    #[error("Duplicate type: '{type_name}' is already registered")]
    DuplicateType {
        /// Type name
        type_name: String,
    },

    /// A participating field has a type the engine cannot encode.
    #[error("Unsupported field type '{field_type}' for field '{type_name}.{field_name}'")]
    UnsupportedFieldType {
        /// Owning type
        type_name: String,
        /// Field name
        field_name: String,
        /// Declared field type
        field_type: String,
    },

    /// A runtime type is neither the declared type nor one of its subtypes.
    #[error("Type mismatch: '{actual}' is not '{expected}' or a subtype of it")]
    TypeMismatch {
        /// Declared type
        expected: String,
        /// Runtime type found in the value or the stream
        actual: String,
    },

    /// Bytes were present but do not form a valid value.
    #[error("Invalid data at position {position}: {message}")]
    InvalidData {
        /// Cursor position of the offending read
        position: usize,
        /// What was wrong
        message: String,
    },

    /// A value does not have the shape its declared field type requires.
    #[error("Invalid value for {context}: expected {expected}, found {found}")]
    InvalidValue {
        /// Field or type being encoded
        context: String,
        /// Expected shape
        expected: String,
        /// Actual shape
        found: String,
    },

    /// An object is missing a participating field.
    #[error("Missing field '{field_name}' in object of type '{type_name}'")]
    MissingField {
        /// Object type
        type_name: String,
        /// Field name
        field_name: String,
    },

    /// A type or enum descriptor is inconsistent.
    #[error("Invalid descriptor '{type_name}': {reason}")]
    InvalidDescriptor {
        /// Type name
        type_name: String,
        /// Validation error message
        reason: String,
    },

    /// Nesting went deeper than the configured limit.
    #[error("Nesting depth exceeded limit of {limit}")]
    DepthExceeded {
        /// Configured limit
        limit: usize,
    },

    /// A compiled unit cannot be used with this registry.
    #[error("Compiled unit rejected: {reason}")]
    UnitMismatch {
        /// Why the unit was rejected
        reason: String,
    },

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl CodecError {
    /// Create a truncated stream error.
    pub fn truncated(requested: usize, available: usize, position: usize) -> Self {
        CodecError::TruncatedStream {
            requested,
            available,
            position,
        }
    }

    /// Create an encoding limit error.
    pub fn limit_exceeded(what: impl Into<String>, length: usize, limit: usize) -> Self {
        CodecError::EncodingLimitExceeded {
            what: what.into(),
            length,
            limit,
        }
    }

    /// Create an "unknown type" error from a name.
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        CodecError::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Create an "unknown type" error from a numeric id.
    pub fn unknown_type_id(id: i32) -> Self {
        CodecError::UnknownType {
            type_name: format!("#{id}"),
        }
    }

    /// Create a duplicate type error.
    pub fn duplicate_type(type_name: impl Into<String>) -> Self {
        CodecError::DuplicateType {
            type_name: type_name.into(),
        }
    }

    /// Create an unsupported field type error.
    pub fn unsupported_field(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        CodecError::UnsupportedFieldType {
            type_name: type_name.into(),
            field_name: field_name.into(),
            field_type: field_type.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CodecError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(position: usize, message: impl Into<String>) -> Self {
        CodecError::InvalidData {
            position,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(
        context: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        CodecError::InvalidValue {
            context: context.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        CodecError::MissingField {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }

    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidDescriptor {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a unit mismatch error.
    pub fn unit_mismatch(reason: impl Into<String>) -> Self {
        CodecError::UnitMismatch {
            reason: reason.into(),
        }
    }

    /// Whether this error means the input simply ran out.
    pub fn is_truncation(&self) -> bool {
        matches!(self, CodecError::TruncatedStream { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::TruncatedStream {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::EncodingLimitExceeded {
                what,
                length,
                limit,
            } => vec![
                ("what", what.clone()),
                ("length", length.to_string()),
                ("limit", limit.to_string()),
            ],
            CodecError::UnknownType { type_name } | CodecError::DuplicateType { type_name } => {
                vec![("type", type_name.clone())]
            }
            CodecError::UnsupportedFieldType {
                type_name,
                field_name,
                field_type,
            } => vec![
                ("type", type_name.clone()),
                ("field", field_name.clone()),
                ("field_type", field_type.clone()),
            ],
            CodecError::TypeMismatch { expected, actual } => {
                vec![("expected", expected.clone()), ("actual", actual.clone())]
            }
            CodecError::InvalidData { position, message } => {
                vec![("position", position.to_string()), ("message", message.clone())]
            }
            CodecError::InvalidValue {
                context,
                expected,
                found,
            } => vec![
                ("context", context.clone()),
                ("expected", expected.clone()),
                ("found", found.clone()),
            ],
            CodecError::MissingField {
                type_name,
                field_name,
            } => vec![("type", type_name.clone()), ("field", field_name.clone())],
            CodecError::InvalidDescriptor { type_name, reason } => {
                vec![("type", type_name.clone()), ("reason", reason.clone())]
            }
            CodecError::DepthExceeded { limit } => vec![("limit", limit.to_string())],
            CodecError::UnitMismatch { reason } => vec![("reason", reason.clone())],
            CodecError::Io(msg) | CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

/// Result type for polycodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
