use fb_core::{MergeError, SchemaError};
use thiserror::Error;

/// Errors surfaced by the editing session.
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Submit/change arrived while no property popup is open.
    #[error("no component is open for editing")]
    NoSelection,
}
