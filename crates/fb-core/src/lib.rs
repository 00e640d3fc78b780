pub mod error;
pub mod id;
pub mod merge;
pub mod model;
pub mod options;
pub mod palette;
pub mod properties;

pub use error::{MergeError, SchemaError};
pub use id::{ComponentKey, KeyGenerator};
pub use merge::{Submission, merge_edit};
pub use model::*;
pub use options::BuilderOptions;
pub use palette::{PALETTE, PaletteCategory, palette_sections};
pub use properties::{EditorKind, PropertyDescriptor, generate};
