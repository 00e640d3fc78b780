//! Error types for schema mutations and edit merging.

use crate::id::ComponentKey;
use crate::model::ComponentType;
use thiserror::Error;

/// Errors raised by the schema store. All are recoverable: the schema is
/// left exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Drop/insert with a type name outside the palette.
    #[error("unrecognized component type: {0:?}")]
    InvalidType(String),

    /// No component carries the requested key.
    #[error("no component with key `{0}`")]
    NotFound(ComponentKey),

    /// A rename or sync would make two components share a key.
    #[error("a component with key `{0}` already exists")]
    DuplicateKey(ComponentKey),

    /// The submit button must stay a button keyed `submit`.
    #[error("the submit button cannot be re-keyed or re-typed")]
    SubmitButtonLocked,
}

/// Errors raised while merging a property-form submission.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The submitted values do not fit the component's attribute types.
    #[error("submission does not fit a {component_type} component: {source}")]
    InvalidSubmission {
        component_type: ComponentType,
        #[source]
        source: serde_json::Error,
    },

    /// The API key field was submitted empty.
    #[error("component key must not be empty")]
    EmptyKey,

    /// The original component could not be encoded to its wire form.
    #[error("failed to encode component: {0}")]
    Encode(#[source] serde_json::Error),
}
