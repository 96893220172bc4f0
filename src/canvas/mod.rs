//! Interactive canvas state: view transform, drag handling and undo history

pub mod drag;
pub mod history;
pub mod view;

pub use drag::{DragEngine, DragOutcome, DragPayload, DragPhase, DropTarget};
pub use history::History;
pub use view::{CanvasView, Selection};
