//! Render scene abstraction and the headless renderer.
//!
//! A renderer flattens the relative-rect layout tree into absolute-rect
//! scene items once per frame; pointer input is resolved against the same
//! scene via hit testing.

use std::rc::Rc;

use animspecs_foundation::graphics::{Color, Point, Rect, Size};

use crate::layout::{LayoutNodeSnapshot, LayoutTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
}

pub trait HitTestTarget {
    fn dispatch(&self, kind: PointerEventKind, x: f32, y: f32);
}

pub trait RenderScene {
    type HitTarget: HitTestTarget;

    fn clear(&mut self);
    /// Topmost target under the point, if any.
    fn hit_test(&self, x: f32, y: f32) -> Option<Self::HitTarget>;
}

pub trait SceneDebug {
    fn describe(&self) -> Vec<String>;
}

pub trait Renderer {
    type Scene: RenderScene;
    type Error;

    fn scene(&self) -> &Self::Scene;
    fn scene_mut(&mut self) -> &mut Self::Scene;

    fn rebuild_scene(
        &mut self,
        layout_tree: &LayoutTree,
        viewport: Size,
    ) -> Result<(), Self::Error>;
}

/// One drawable item with absolute coordinates.
#[derive(Clone)]
pub struct SceneItem {
    pub rect: Rect,
    pub color: Option<Color>,
    pub alpha: f32,
    /// Present for text items, absent for plain rects.
    pub text: Option<String>,
    pub font_size: f32,
}

/// Clickable region resolved from the layout tree.
#[derive(Clone)]
pub struct SceneTarget {
    pub rect: Rect,
    click_handler: Option<Rc<dyn Fn(Point)>>,
}

impl HitTestTarget for SceneTarget {
    fn dispatch(&self, kind: PointerEventKind, x: f32, y: f32) {
        log::trace!("pointer {kind:?} at ({x:.1}, {y:.1}) inside {}", self.rect);
        if matches!(kind, PointerEventKind::Up) {
            if let Some(handler) = &self.click_handler {
                handler(Point {
                    x: x - self.rect.x,
                    y: y - self.rect.y,
                });
            }
        }
    }
}

/// Scene kept entirely in memory. Doubles as the test surface: robot tests
/// read text and rects out of it instead of pixels.
#[derive(Default)]
pub struct HeadlessScene {
    items: Vec<SceneItem>,
    targets: Vec<SceneTarget>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Text of every visible text item, in paint order.
    pub fn all_text(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.alpha >= 0.05)
            .filter_map(|item| item.text.clone())
            .collect()
    }

    /// Absolute rects of visible text items containing `fragment`.
    pub fn text_rects(&self, fragment: &str) -> Vec<Rect> {
        self.items
            .iter()
            .filter(|item| item.alpha >= 0.05)
            .filter(|item| {
                item.text
                    .as_deref()
                    .is_some_and(|text| text.contains(fragment))
            })
            .map(|item| item.rect)
            .collect()
    }

    fn push_item(&mut self, item: SceneItem) {
        self.items.push(item);
    }

    fn push_target(&mut self, rect: Rect, click_handler: Option<Rc<dyn Fn(Point)>>) {
        self.targets.push(SceneTarget {
            rect,
            click_handler,
        });
    }
}

impl RenderScene for HeadlessScene {
    type HitTarget = SceneTarget;

    fn clear(&mut self) {
        self.items.clear();
        self.targets.clear();
    }

    fn hit_test(&self, x: f32, y: f32) -> Option<Self::HitTarget> {
        self.targets
            .iter()
            .rev()
            .find(|target| target.rect.contains(x, y))
            .cloned()
    }
}

impl SceneDebug for HeadlessScene {
    fn describe(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| match (&item.text, item.color) {
                (Some(text), _) => {
                    format!("{} text \"{}\" alpha {:.2}", item.rect, text, item.alpha)
                }
                (None, Some(color)) => format!(
                    "{} rgba({:.1}, {:.1}, {:.1}, {:.1})",
                    item.rect, color.0, color.1, color.2, color.3
                ),
                (None, None) => format!("{} <no color>", item.rect),
            })
            .collect()
    }
}

#[derive(Default)]
pub struct HeadlessRenderer {
    scene: HeadlessScene,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for HeadlessRenderer {
    type Scene = HeadlessScene;
    type Error = ();

    fn scene(&self) -> &Self::Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Self::Scene {
        &mut self.scene
    }

    fn rebuild_scene(
        &mut self,
        layout_tree: &LayoutTree,
        _viewport: Size,
    ) -> Result<(), Self::Error> {
        self.scene.clear();
        visit(&layout_tree.root, (0.0, 0.0), &mut self.scene);
        Ok(())
    }
}

fn visit(node: &LayoutNodeSnapshot, origin: (f32, f32), scene: &mut HeadlessScene) {
    let rect = Rect {
        x: origin.0 + node.rect.x,
        y: origin.1 + node.rect.y,
        width: node.rect.width,
        height: node.rect.height,
    };
    if node.color.is_some() || node.click_handler.is_some() {
        scene.push_item(SceneItem {
            rect,
            color: node.color,
            alpha: 1.0,
            text: None,
            font_size: 0.0,
        });
        scene.push_target(rect, node.click_handler.clone());
    }
    for run in &node.text_runs {
        scene.push_item(SceneItem {
            rect: Rect {
                x: rect.x + run.rect.x,
                y: rect.y + run.rect.y,
                width: run.rect.width,
                height: run.rect.height,
            },
            color: if run.color.is_unspecified() {
                None
            } else {
                Some(run.color)
            },
            alpha: run.alpha,
            text: Some(run.text.clone()),
            font_size: run.font_size,
        });
    }
    for child in &node.children {
        visit(child, (rect.x, rect.y), scene);
    }
}
