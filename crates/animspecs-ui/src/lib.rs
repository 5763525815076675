//! Widgets, layout, and rendering for animspecs.
//!
//! The centerpiece is [`widgets::AnimatedText`]: a text widget that renders
//! its prefix statically and plays a slide+fade enter/exit pair on the last
//! symbol whenever the symbol (or its position) changes.

#![allow(non_snake_case)]

pub mod animated_content;
pub mod layout;
pub mod nodes;
pub mod render;
pub mod style;
pub mod widgets;

pub use animated_content::{AnimatedContentState, ContentFrame};
pub use layout::{measure_layout, Constraints, LayoutNodeSnapshot, LayoutTree, TextRun};
pub use nodes::LayoutNode;
pub use render::{
    HeadlessRenderer, HeadlessScene, HitTestTarget, PointerEventKind, RenderScene, Renderer,
    SceneDebug, SceneItem,
};
pub use style::{measure_text, FontWeight, TextAlign, TextOverflow, TextStyle};
pub use widgets::{
    AnimatedText, AnimatedTextDefaults, Button, Column, Row, Spacer, Text,
};

pub mod prelude {
    pub use crate::style::{FontWeight, TextAlign, TextOverflow, TextStyle};
    pub use crate::widgets::{AnimatedText, AnimatedTextDefaults, Button, Column, Row, Spacer, Text};
    pub use animspecs_foundation::prelude::*;
}
