//! Foundation elements for animspecs: modifiers, graphics primitives, and
//! the text model behind the animated text widget.

pub mod graphics;
pub mod modifier;
pub mod text;

pub use graphics::{Color, Point, Rect, Size};
pub use modifier::Modifier;
pub use text::{DisplayParams, TextEvent, TextState};

pub mod prelude {
    pub use crate::graphics::{Color, Point, Rect, Size};
    pub use crate::modifier::Modifier;
    pub use crate::text::{DisplayParams, TextEvent, TextState};
}
