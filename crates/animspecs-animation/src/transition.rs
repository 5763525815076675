//! Data-driven transition descriptors.
//!
//! A transition is described as plain data and interpreted by the rendering
//! layer. Nothing here drives time; the UI layer owns the springs and reads
//! these descriptors to decide what they animate.

use crate::spring::SpringSpec;

/// Which edge content slides across while entering or exiting.
///
/// Offsets are expressed as a fraction of the content's own height, so
/// `FromBottom` means "start fully below the bounds and slide up into place".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideMotion {
    /// No slide component.
    #[default]
    None,
    /// Enter: start below the bounds, move up into place.
    FromBottom,
    /// Exit: move down past the bounds.
    ToBottom,
    /// Enter: start above the bounds, move down into place.
    FromTop,
    /// Exit: move up past the bounds.
    ToTop,
}

impl SlideMotion {
    /// Vertical offset (in fractions of content height) at visibility
    /// `visibility` (1.0 = fully in place, 0.0 = fully out).
    pub fn offset_fraction(self, visibility: f32) -> f32 {
        let out = 1.0 - visibility;
        match self {
            SlideMotion::None => 0.0,
            SlideMotion::FromBottom | SlideMotion::ToBottom => out,
            SlideMotion::FromTop | SlideMotion::ToTop => -out,
        }
    }
}

/// One side of a content transition: how the content moves and fades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSpec {
    pub slide: SlideMotion,
    /// Whether opacity follows visibility (fade in/out).
    pub fade: bool,
    pub spring: SpringSpec,
}

impl MotionSpec {
    pub fn slide_in_from_bottom(spring: SpringSpec) -> Self {
        Self {
            slide: SlideMotion::FromBottom,
            fade: false,
            spring,
        }
    }

    pub fn slide_out_to_bottom(spring: SpringSpec) -> Self {
        Self {
            slide: SlideMotion::ToBottom,
            fade: false,
            spring,
        }
    }

    pub fn with_fade(mut self) -> Self {
        self.fade = true;
        self
    }

    /// Opacity at the given visibility fraction.
    pub fn alpha(&self, visibility: f32) -> f32 {
        if self.fade {
            visibility.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl Default for MotionSpec {
    fn default() -> Self {
        Self {
            slide: SlideMotion::None,
            fade: true,
            spring: SpringSpec::default(),
        }
    }
}

/// Interpolated container resizing while content changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeTransform {
    /// When false the container never clips content mid-transition.
    pub clip: bool,
    pub spec: SpringSpec,
}

impl Default for SizeTransform {
    fn default() -> Self {
        Self {
            clip: true,
            spec: SpringSpec::default(),
        }
    }
}

impl SizeTransform {
    pub const fn unclipped(spec: SpringSpec) -> Self {
        Self { clip: false, spec }
    }
}

/// Paired enter/exit motion for keyed content.
///
/// The two sides always run concurrently: while the incoming content plays
/// `enter`, the outgoing content plays `exit`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentTransform {
    pub enter: MotionSpec,
    pub exit: MotionSpec,
    pub size_transform: Option<SizeTransform>,
}

impl ContentTransform {
    pub fn new(enter: MotionSpec, exit: MotionSpec) -> Self {
        Self {
            enter,
            exit,
            size_transform: None,
        }
    }

    pub fn using(mut self, size_transform: SizeTransform) -> Self {
        self.size_transform = Some(size_transform);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_from_bottom_starts_below() {
        let slide = SlideMotion::FromBottom;
        assert!((slide.offset_fraction(0.0) - 1.0).abs() < f32::EPSILON);
        assert!((slide.offset_fraction(1.0) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn slide_to_top_ends_above() {
        let slide = SlideMotion::ToTop;
        assert!((slide.offset_fraction(0.0) + 1.0).abs() < f32::EPSILON);
        assert!((slide.offset_fraction(1.0) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fade_tracks_visibility() {
        let spec = MotionSpec::slide_in_from_bottom(SpringSpec::low_stiffness()).with_fade();
        assert!((spec.alpha(0.0) - 0.0).abs() < f32::EPSILON);
        assert!((spec.alpha(0.25) - 0.25).abs() < f32::EPSILON);
        assert!((spec.alpha(1.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn no_fade_stays_opaque() {
        let spec = MotionSpec::slide_in_from_bottom(SpringSpec::low_stiffness());
        assert!((spec.alpha(0.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unclipped_size_transform() {
        let transform = ContentTransform::new(
            MotionSpec::slide_in_from_bottom(SpringSpec::low_stiffness()).with_fade(),
            MotionSpec::slide_out_to_bottom(SpringSpec::low_stiffness()).with_fade(),
        )
        .using(SizeTransform::unclipped(SpringSpec::low_stiffness()));
        let size = transform.size_transform.expect("size transform set");
        assert!(!size.clip);
    }
}
