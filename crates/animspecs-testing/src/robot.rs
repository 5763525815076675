//! The robot itself: launch, poke, observe.

use std::panic::Location;

use animspecs_app_shell::AppShell;
use animspecs_core::{location_key, NodeId};
use animspecs_foundation::graphics::Rect;
use animspecs_ui::{HeadlessRenderer, HeadlessScene};

/// Fixed frame step used by deterministic pumping.
pub const FRAME_DT: f32 = 1.0 / 60.0;

pub fn rect_center(rect: &Rect) -> (f32, f32) {
    (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

pub struct Robot {
    shell: AppShell<HeadlessRenderer>,
}

impl Robot {
    /// Launches `content` against a headless renderer and settles the
    /// initial frame.
    #[track_caller]
    pub fn launch(content: impl FnMut() -> NodeId + 'static) -> Self {
        let location = Location::caller();
        let key = location_key(location.file(), location.line(), location.column());
        let mut robot = Self {
            shell: AppShell::new(HeadlessRenderer::new(), key, content),
        };
        robot.pump_until_idle(10);
        robot
    }

    pub fn scene(&self) -> &HeadlessScene {
        self.shell.scene()
    }

    /// Runs frames at [`FRAME_DT`] until nothing needs rendering, up to
    /// `max_frames`. Returns how many frames ran.
    pub fn pump_until_idle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.shell.should_render() {
            self.shell.update_with_dt(FRAME_DT);
            frames += 1;
        }
        frames
    }

    /// Advances exactly `frames` frames of `dt` seconds each, whether or not
    /// anything is animating. Useful for sampling mid-transition.
    pub fn advance_frames(&mut self, frames: usize, dt: f32) {
        for _ in 0..frames {
            self.shell.update_with_dt(dt);
        }
    }

    pub fn is_idle(&mut self) -> bool {
        !self.shell.should_render()
    }

    /// Full press/release at the given scene coordinates.
    pub fn click_at(&mut self, x: f32, y: f32) {
        log::debug!("robot click at ({x:.1}, {y:.1})");
        self.shell.set_cursor(x, y);
        self.shell.pointer_pressed();
        self.shell.pointer_released();
    }

    /// Clicks the center of the first visible text containing `fragment`.
    /// Returns false when no such text is on screen.
    pub fn click_text(&mut self, fragment: &str) -> bool {
        let Some(rect) = self.scene().text_rects(fragment).first().copied() else {
            return false;
        };
        let (x, y) = rect_center(&rect);
        self.click_at(x, y);
        true
    }

    pub fn texts(&self) -> Vec<String> {
        self.scene().all_text()
    }

    pub fn text_rects(&self, fragment: &str) -> Vec<Rect> {
        self.scene().text_rects(fragment)
    }

    pub fn describe_scene(&self) -> Vec<String> {
        self.shell.describe_scene()
    }
}
