//! Keyed content transitions.
//!
//! [`AnimatedContentState`] is the runtime behind `AnimatedContent`-style
//! widgets: content is keyed by value, and whenever the key changes the
//! outgoing content plays the exit motion while the incoming content plays
//! the enter motion, concurrently. An in-flight transition is interrupted by
//! the next key change; the superseded entry keeps its spring value and
//! velocity and simply retargets.

use animspecs_animation::{ContentTransform, MotionSpec, Spring, SpringSpec};
use animspecs_foundation::graphics::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryPhase {
    Entering,
    Exiting,
}

struct ContentEntry<T> {
    value: T,
    size: Size,
    /// 0.0 = fully out, 1.0 = fully in place.
    visibility: Spring,
    phase: EntryPhase,
}

/// One renderable piece of keyed content for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFrame<T> {
    pub value: T,
    pub size: Size,
    /// Vertical offset in fractions of the content height.
    pub offset_fraction: f32,
    pub alpha: f32,
    pub entering: bool,
}

/// State machine driving keyed enter/exit transitions.
pub struct AnimatedContentState<T> {
    transform: ContentTransform,
    entries: Vec<ContentEntry<T>>,
    container_width: Spring,
    container_height: Spring,
    has_target: bool,
}

impl<T: Clone + PartialEq> AnimatedContentState<T> {
    pub fn new(transform: ContentTransform) -> Self {
        let size_spec = transform
            .size_transform
            .map(|size_transform| size_transform.spec)
            .unwrap_or_else(SpringSpec::default);
        Self {
            transform,
            entries: Vec::new(),
            container_width: Spring::new(0.0, size_spec),
            container_height: Spring::new(0.0, size_spec),
            has_target: false,
        }
    }

    pub fn transform(&self) -> &ContentTransform {
        &self.transform
    }

    /// Current target value, i.e. the most recently set key.
    pub fn target(&self) -> Option<&T> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.phase == EntryPhase::Entering)
            .map(|entry| &entry.value)
    }

    /// Points the state at `value`. Returns true when this starts a
    /// transition (the key differed from the previous target).
    ///
    /// The first target ever set snaps into place without animating; there
    /// is no previous content to transition from.
    pub fn set_target(&mut self, value: T, size: Size) -> bool {
        if !self.has_target {
            self.has_target = true;
            let mut visibility = Spring::new(0.0, self.transform.enter.spring);
            visibility.snap_to(1.0);
            self.entries.push(ContentEntry {
                value,
                size,
                visibility,
                phase: EntryPhase::Entering,
            });
            self.container_width.snap_to(size.width);
            self.container_height.snap_to(size.height);
            return false;
        }

        if let Some(current) = self
            .entries
            .iter_mut()
            .rev()
            .find(|entry| entry.phase == EntryPhase::Entering)
        {
            if current.value == value {
                // Same key: no transition, just pick up styling-driven
                // size changes.
                current.size = size;
                self.retarget_container(size);
                return false;
            }
        }

        // Key changed: everything currently entering starts exiting, the new
        // value enters. Both motions run concurrently from here on.
        for entry in &mut self.entries {
            if entry.phase == EntryPhase::Entering {
                entry.phase = EntryPhase::Exiting;
                entry.visibility.set_spec(self.transform.exit.spring);
                entry.visibility.set_target(0.0);
            }
        }

        let mut visibility = Spring::new(0.0, self.transform.enter.spring);
        visibility.set_target(1.0);
        self.entries.push(ContentEntry {
            value,
            size,
            visibility,
            phase: EntryPhase::Entering,
        });
        self.retarget_container(size);
        true
    }

    fn retarget_container(&mut self, size: Size) {
        if self.transform.size_transform.is_some() {
            self.container_width.set_target(size.width);
            self.container_height.set_target(size.height);
        } else {
            self.container_width.snap_to(size.width);
            self.container_height.snap_to(size.height);
        }
    }

    /// Advances all springs by `dt` seconds and prunes settled exits.
    ///
    /// Returns true when anything moved, including the frame in which the
    /// springs settle, so the caller re-renders the final resting state.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.is_idle() {
            return false;
        }
        for entry in &mut self.entries {
            entry.visibility.tick(dt);
        }
        self.container_width.tick(dt);
        self.container_height.tick(dt);

        self.entries
            .retain(|entry| entry.phase == EntryPhase::Entering || !entry.visibility.is_at_rest());

        true
    }

    pub fn is_idle(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.visibility.is_at_rest())
            && self.container_width.is_at_rest()
            && self.container_height.is_at_rest()
    }

    /// Interpolated size of the container region.
    ///
    /// With a size transform configured this moves smoothly between the
    /// outgoing and incoming content sizes; without one it snaps.
    pub fn container_size(&self) -> Size {
        Size::new(self.container_width.value(), self.container_height.value())
    }

    /// Renderable entries for the current frame, oldest first, so incoming
    /// content paints over outgoing content.
    pub fn frames(&self) -> Vec<ContentFrame<T>> {
        self.entries
            .iter()
            .map(|entry| {
                let spec: &MotionSpec = match entry.phase {
                    EntryPhase::Entering => &self.transform.enter,
                    EntryPhase::Exiting => &self.transform.exit,
                };
                let visibility = entry.visibility.value().clamp(0.0, 1.0);
                ContentFrame {
                    value: entry.value.clone(),
                    size: entry.size,
                    offset_fraction: spec.slide.offset_fraction(visibility),
                    alpha: spec.alpha(visibility),
                    entering: entry.phase == EntryPhase::Entering,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animspecs_animation::SizeTransform;

    const FRAME: f32 = 1.0 / 60.0;

    fn transform() -> ContentTransform {
        ContentTransform::new(
            MotionSpec::slide_in_from_bottom(SpringSpec::low_stiffness()).with_fade(),
            MotionSpec::slide_out_to_bottom(SpringSpec::low_stiffness()).with_fade(),
        )
        .using(SizeTransform::unclipped(SpringSpec::low_stiffness()))
    }

    fn settle(state: &mut AnimatedContentState<String>) {
        for _ in 0..2000 {
            if !state.tick(FRAME) {
                break;
            }
        }
        assert!(state.is_idle(), "state did not settle");
    }

    #[test]
    fn first_target_snaps_without_transition() {
        let mut state = AnimatedContentState::new(transform());
        let started = state.set_target("a".to_string(), Size::new(10.0, 20.0));
        assert!(!started);
        assert!(state.is_idle());
        let frames = state.frames();
        assert_eq!(frames.len(), 1);
        assert!((frames[0].alpha - 1.0).abs() < f32::EPSILON);
        assert!((frames[0].offset_fraction - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn key_change_starts_concurrent_enter_and_exit() {
        let mut state = AnimatedContentState::new(transform());
        state.set_target("a".to_string(), Size::new(10.0, 20.0));
        let started = state.set_target("b".to_string(), Size::new(10.0, 20.0));
        assert!(started);

        state.tick(FRAME);
        let frames = state.frames();
        assert_eq!(frames.len(), 2, "both symbols are on screen");

        let exiting = &frames[0];
        let entering = &frames[1];
        assert!(!exiting.entering);
        assert!(entering.entering);
        // Outgoing slides down and fades; incoming rises from below, faded in
        // proportion to its visibility.
        assert!(exiting.offset_fraction > 0.0);
        assert!(exiting.alpha < 1.0);
        assert!(entering.offset_fraction > 0.0);
        assert!(entering.alpha < 1.0);
    }

    #[test]
    fn same_key_does_not_retrigger() {
        let mut state = AnimatedContentState::new(transform());
        state.set_target("a".to_string(), Size::new(10.0, 20.0));
        settle(&mut state);
        let started = state.set_target("a".to_string(), Size::new(12.0, 20.0));
        assert!(!started);
        assert_eq!(state.frames().len(), 1);
    }

    #[test]
    fn exited_entries_are_pruned_after_settling() {
        let mut state = AnimatedContentState::new(transform());
        state.set_target("a".to_string(), Size::new(10.0, 20.0));
        state.set_target("b".to_string(), Size::new(10.0, 20.0));
        settle(&mut state);
        let frames = state.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].value, "b");
        assert!((frames[0].alpha - 1.0).abs() < 0.01);
    }

    #[test]
    fn interruption_retargets_in_flight_entries() {
        let mut state = AnimatedContentState::new(transform());
        state.set_target("a".to_string(), Size::new(10.0, 20.0));
        state.set_target("b".to_string(), Size::new(10.0, 20.0));
        for _ in 0..5 {
            state.tick(FRAME);
        }
        // Interrupt: a third key while a->b is still playing.
        let started = state.set_target("c".to_string(), Size::new(10.0, 20.0));
        assert!(started);
        let frames = state.frames();
        assert_eq!(frames.len(), 3, "a (exiting), b (now exiting), c (entering)");
        assert!(frames.iter().filter(|frame| frame.entering).count() == 1);

        settle(&mut state);
        let frames = state.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].value, "c");
    }

    #[test]
    fn container_size_interpolates_between_targets() {
        let mut state = AnimatedContentState::new(transform());
        state.set_target("a".to_string(), Size::new(10.0, 20.0));
        state.set_target("wide".to_string(), Size::new(40.0, 20.0));
        state.tick(FRAME);
        let mid = state.container_size();
        assert!(mid.width > 10.0 && mid.width < 40.0, "width: {}", mid.width);
        settle(&mut state);
        assert!((state.container_size().width - 40.0).abs() < 0.01);
    }

    #[test]
    fn target_tracks_latest_key() {
        let mut state = AnimatedContentState::new(transform());
        state.set_target("a".to_string(), Size::new(10.0, 20.0));
        state.set_target("b".to_string(), Size::new(10.0, 20.0));
        assert_eq!(state.target(), Some(&"b".to_string()));
    }
}
