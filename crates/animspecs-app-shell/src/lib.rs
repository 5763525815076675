//! App shell: owns the composition, the frame clock, and the renderer.
//!
//! One `update()` per host frame runs recomposition (when state changed),
//! advances animations by the elapsed wall time, re-measures layout, and
//! rebuilds the render scene. Hosts that need determinism (tests) drive
//! `update_with_dt` with a fixed step instead.

use std::fmt::Debug;

use instant::Instant;

use animspecs_core::{Composition, Key, MemoryApplier, NodeId, StdRuntime};
use animspecs_foundation::graphics::Size;
use animspecs_ui::{
    measure_layout, Constraints, HitTestTarget, LayoutTree, PointerEventKind, RenderScene,
    Renderer, SceneDebug,
};

pub struct AppShell<R>
where
    R: Renderer,
    R::Scene: SceneDebug,
{
    runtime: StdRuntime,
    composition: Composition,
    renderer: R,
    cursor: (f32, f32),
    viewport: (f32, f32),
    layout_tree: Option<LayoutTree>,
    layout_dirty: bool,
    scene_dirty: bool,
    root_key: Key,
    content: Box<dyn FnMut() -> NodeId>,
    pending_runtime_frame: bool,
    animations_active: bool,
    last_frame: Instant,
}

impl<R> AppShell<R>
where
    R: Renderer,
    R::Scene: SceneDebug,
    R::Error: Debug,
{
    pub fn new(mut renderer: R, root_key: Key, content: impl FnMut() -> NodeId + 'static) -> Self {
        let runtime = StdRuntime::new();
        let composition = Composition::with_runtime(MemoryApplier::new(), runtime.runtime());
        renderer.scene_mut().clear();
        let mut shell = Self {
            runtime,
            composition,
            renderer,
            cursor: (0.0, 0.0),
            viewport: (800.0, 600.0),
            layout_tree: None,
            layout_dirty: true,
            scene_dirty: true,
            root_key,
            content: Box::new(content),
            pending_runtime_frame: false,
            animations_active: false,
            last_frame: Instant::now(),
        };
        shell.recompose();
        shell.process_frame();
        shell
    }

    fn recompose(&mut self) {
        if let Err(err) = self.composition.render(self.root_key, self.content.as_mut()) {
            log::error!("recomposition failed: {err}");
        }
        self.pending_runtime_frame = false;
        self.layout_dirty = true;
        self.scene_dirty = true;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.layout_dirty = true;
        self.process_frame();
    }

    pub fn scene(&self) -> &R::Scene {
        self.renderer.scene()
    }

    pub fn renderer(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn layout_tree(&self) -> Option<&LayoutTree> {
        self.layout_tree.as_ref()
    }

    /// Whether the next `update` would do visible work.
    pub fn should_render(&mut self) -> bool {
        if !self.pending_runtime_frame {
            self.pending_runtime_frame = self.runtime.take_frame_request();
        }
        self.layout_dirty
            || self.scene_dirty
            || self.pending_runtime_frame
            || self.animations_active
            || self.composition.should_render()
    }

    /// One frame driven by the wall clock.
    pub fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.update_with_dt(dt.min(0.1));
    }

    /// One frame with an explicit time step. Deterministic; tests use this.
    pub fn update_with_dt(&mut self, dt: f32) {
        if !self.pending_runtime_frame {
            self.pending_runtime_frame = self.runtime.take_frame_request();
        }
        if self.pending_runtime_frame {
            self.recompose();
        }

        // Animations mutate node state outside of composition, so a tick
        // that reports activity invalidates layout and scene.
        self.animations_active = self.composition.applier_mut().tick_all(dt);
        if self.animations_active {
            self.layout_dirty = true;
            self.scene_dirty = true;
        }

        self.process_frame();
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        if let Some(hit) = self.renderer.scene().hit_test(x, y) {
            hit.dispatch(PointerEventKind::Move, x, y);
        }
    }

    pub fn pointer_pressed(&mut self) {
        if let Some(hit) = self.renderer.scene().hit_test(self.cursor.0, self.cursor.1) {
            hit.dispatch(PointerEventKind::Down, self.cursor.0, self.cursor.1);
        }
    }

    pub fn pointer_released(&mut self) {
        if let Some(hit) = self.renderer.scene().hit_test(self.cursor.0, self.cursor.1) {
            hit.dispatch(PointerEventKind::Up, self.cursor.0, self.cursor.1);
        }
    }

    pub fn describe_scene(&self) -> Vec<String> {
        self.renderer.scene().describe()
    }

    fn process_frame(&mut self) {
        self.run_layout_phase();
        self.run_render_phase();
        self.composition.mark_rendered();
    }

    fn run_layout_phase(&mut self) {
        if !self.layout_dirty {
            return;
        }
        self.layout_dirty = false;
        let constraints = Constraints::new(self.viewport.0, self.viewport.1);
        match self.composition.root() {
            Some(root) => {
                match measure_layout(&self.composition.applier(), root, constraints) {
                    Ok(tree) => self.layout_tree = Some(tree),
                    Err(err) => {
                        log::error!("layout failed: {err}");
                        self.layout_tree = None;
                    }
                }
            }
            None => self.layout_tree = None,
        }
        self.scene_dirty = true;
    }

    fn run_render_phase(&mut self) {
        if !self.scene_dirty {
            return;
        }
        self.scene_dirty = false;
        let viewport = Size::new(self.viewport.0, self.viewport.1);
        match self.layout_tree.as_ref() {
            Some(layout_tree) => {
                if let Err(err) = self.renderer.rebuild_scene(layout_tree, viewport) {
                    log::error!("scene rebuild failed: {err:?}");
                    self.renderer.scene_mut().clear();
                }
            }
            None => self.renderer.scene_mut().clear(),
        }
    }
}
