//! A small modifier chain for sizing, padding, background, and click input.
//!
//! Later entries in a `then` chain win over earlier ones for the same
//! concern, matching the outermost-first semantics of a modifier list.

use std::rc::Rc;

use crate::graphics::{Color, Point, Size};

#[derive(Clone, Default)]
pub struct Modifier {
    size: Option<Size>,
    fill_max_width: bool,
    fill_max_height: bool,
    padding: f32,
    background: Option<Color>,
    click_handler: Option<Rc<dyn Fn(Point)>>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(size: Size) -> Self {
        Modifier {
            size: Some(size),
            ..Modifier::default()
        }
    }

    pub fn width_height(width: f32, height: f32) -> Self {
        Self::size(Size::new(width, height))
    }

    pub fn fill_max_width() -> Self {
        Modifier {
            fill_max_width: true,
            ..Modifier::default()
        }
    }

    pub fn fill_max_size() -> Self {
        Modifier {
            fill_max_width: true,
            fill_max_height: true,
            ..Modifier::default()
        }
    }

    pub fn padding(padding: f32) -> Self {
        Modifier {
            padding,
            ..Modifier::default()
        }
    }

    pub fn background(color: Color) -> Self {
        Modifier {
            background: Some(color),
            ..Modifier::default()
        }
    }

    pub fn clickable(handler: impl Fn(Point) + 'static) -> Self {
        Modifier {
            click_handler: Some(Rc::new(handler)),
            ..Modifier::default()
        }
    }

    /// Combines two modifiers; `other` overrides on conflicts.
    pub fn then(mut self, other: Modifier) -> Modifier {
        if other.size.is_some() {
            self.size = other.size;
        }
        self.fill_max_width |= other.fill_max_width;
        self.fill_max_height |= other.fill_max_height;
        if other.padding > 0.0 {
            self.padding = other.padding;
        }
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.click_handler.is_some() {
            self.click_handler = other.click_handler;
        }
        self
    }

    pub fn explicit_size(&self) -> Option<Size> {
        self.size
    }

    pub fn fills_max_width(&self) -> bool {
        self.fill_max_width
    }

    pub fn fills_max_height(&self) -> bool {
        self.fill_max_height
    }

    pub fn padding_value(&self) -> f32 {
        self.padding
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background
    }

    pub fn click_handler(&self) -> Option<Rc<dyn Fn(Point)>> {
        self.click_handler.clone()
    }
}
