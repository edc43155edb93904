use thiserror::Error;

use crate::gvk::{GroupVersionKind, ParseGroupVersionError};

/// Possible errors from registering, encoding, decoding, defaulting or converting objects
#[derive(Error, Debug)]
pub enum Error {
    /// The kind was never registered
    #[error("no kind is registered for {0}")]
    UnknownKind(GroupVersionKind),

    /// The kind, or the type backing it, is already bound
    #[error("{0} is already registered")]
    DuplicateKind(GroupVersionKind),

    /// Bytes could not be turned into a registered object
    #[error("failed to decode object: {0}")]
    Decode(#[source] DecodeError),

    /// An object could not be turned into bytes
    #[error("failed to encode object: {0}")]
    Encode(#[source] EncodeError),

    /// A value has no mapping rule between representations
    #[error("failed to convert object: {0}")]
    Conversion(#[source] ConversionError),

    /// The top-level object handed to an operation is not usable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl From<EncodeError> for Error {
    fn from(err: EncodeError) -> Self {
        Error::Encode(err)
    }
}

impl From<ConversionError> for Error {
    fn from(err: ConversionError) -> Self {
        Error::Conversion(err)
    }
}

/// Failures reading an encoded object
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The bytes are not a well-formed object of the named kind
    #[error("malformed object: {0}")]
    Malformed(#[source] serde_json::Error),

    /// `apiVersion` or `kind` is absent
    #[error("object has no type information: {0}")]
    MissingTypeMeta(#[source] serde_json::Error),

    /// `apiVersion` does not parse
    #[error(transparent)]
    InvalidApiVersion(#[from] ParseGroupVersionError),

    /// The bytes carry a different kind than the caller asked for
    #[error("expected {expected}, found {found}")]
    UnexpectedKind {
        /// The type the caller requested
        expected: &'static str,
        /// The kind embedded in the bytes
        found: GroupVersionKind,
    },
}

/// Failures writing an object
#[derive(Error, Debug)]
pub enum EncodeError {
    /// No kind is bound to the value's type
    #[error("type {0} is not registered")]
    Unregistered(&'static str),

    /// The value could not be serialized
    #[error("failed to serialize object: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The value serialized to something other than a JSON object
    #[error("{0} did not serialize to an object")]
    NotAnObject(GroupVersionKind),
}

/// A value that has no mapping rule between the external and internal representations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ConversionError {
    /// Path of the field lacking a rule, as named by its JSON serialization
    pub field: String,
    /// Human-readable description
    pub message: String,
}

impl ConversionError {
    /// Construct a conversion error for a field path
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
