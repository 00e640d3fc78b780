pub mod error;
pub mod input;
pub mod popup;
pub mod session;

pub use error::EditError;
pub use input::{Point, PointerEvent};
pub use popup::{PopupDrag, PropertyPopup};
pub use session::{EditorSession, EditorView, SessionConfig};
