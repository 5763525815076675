//! Text styling, passed through unchanged to every text region.

use animspecs_foundation::graphics::{Color, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// What happens to text that does not fit its bounds. The style is carried
/// to the rendering surface untouched; this renderer never validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextOverflow {
    #[default]
    Clip,
    Ellipsis,
    Visible,
}

/// Styling options for text regions.
///
/// Every field is forwarded as-is to both the static prefix and the animated
/// symbol, so the two halves of an animated text always render identically.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub italic: bool,
    pub letter_spacing: f32,
    pub text_align: TextAlign,
    pub overflow: TextOverflow,
    pub soft_wrap: bool,
    pub max_lines: usize,
    pub min_lines: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::UNSPECIFIED,
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            italic: false,
            letter_spacing: 0.0,
            text_align: TextAlign::Start,
            overflow: TextOverflow::Clip,
            soft_wrap: true,
            max_lines: usize::MAX,
            min_lines: 1,
        }
    }
}

impl TextStyle {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_font_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }

    /// Line height for this style.
    pub fn line_height(&self) -> f32 {
        self.font_size * 1.2
    }

    /// Horizontal advance of a single glyph.
    pub fn advance(&self) -> f32 {
        self.font_size * 0.6
    }
}

/// Measures single-line text with the headless font metrics: a fixed
/// per-glyph advance plus letter spacing between glyphs.
pub fn measure_text(text: &str, style: &TextStyle) -> Size {
    let glyphs = text.chars().count();
    let spacing = if glyphs > 1 {
        style.letter_spacing * (glyphs as f32 - 1.0)
    } else {
        0.0
    };
    Size::new(
        glyphs as f32 * style.advance() + spacing,
        style.line_height(),
    )
}
