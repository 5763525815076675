//! Measures the node tree into positioned snapshots.
//!
//! Rects inside a snapshot are relative to the parent; the render pass
//! accumulates origins while flattening the tree into a scene.

use std::rc::Rc;

use animspecs_core::{MemoryApplier, NodeError, NodeId};
use animspecs_foundation::graphics::{Color, Point, Rect, Size};
use smallvec::SmallVec;

use crate::nodes::{LayoutNode, NodeKind};
use crate::style::{measure_text, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub max_width: f32,
    pub max_height: f32,
}

impl Constraints {
    pub fn new(max_width: f32, max_height: f32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    fn shrunk_by(self, amount: f32) -> Self {
        Self {
            max_width: (self.max_width - amount).max(0.0),
            max_height: (self.max_height - amount).max(0.0),
        }
    }
}

/// A positioned piece of text inside a node, rect relative to the node.
#[derive(Clone)]
pub struct TextRun {
    pub text: String,
    pub rect: Rect,
    pub color: Color,
    pub font_size: f32,
    pub alpha: f32,
}

#[derive(Clone)]
pub struct LayoutNodeSnapshot {
    pub id: NodeId,
    /// Position and size relative to the parent snapshot.
    pub rect: Rect,
    pub color: Option<Color>,
    pub text_runs: SmallVec<[TextRun; 2]>,
    pub click_handler: Option<Rc<dyn Fn(Point)>>,
    pub children: Vec<LayoutNodeSnapshot>,
}

pub struct LayoutTree {
    pub root: LayoutNodeSnapshot,
}

impl std::fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

impl LayoutTree {
    pub fn describe(&self) -> String {
        fn describe_node(node: &LayoutNodeSnapshot, depth: usize, lines: &mut Vec<String>) {
            let indent = "  ".repeat(depth);
            let clickable = if node.click_handler.is_some() {
                " clickable"
            } else {
                ""
            };
            lines.push(format!("{}{}{}", indent, node.rect, clickable));
            for run in &node.text_runs {
                lines.push(format!(
                    "{}  \"{}\" at {} alpha {:.2}",
                    indent, run.text, run.rect, run.alpha
                ));
            }
            for child in &node.children {
                describe_node(child, depth + 1, lines);
            }
        }

        let mut lines = Vec::new();
        describe_node(&self.root, 0, &mut lines);
        lines.join("\n")
    }
}

/// Measures and places the tree rooted at `root`.
pub fn measure_layout(
    applier: &MemoryApplier,
    root: NodeId,
    constraints: Constraints,
) -> Result<LayoutTree, NodeError> {
    let root = measure(applier, root, constraints)?;
    Ok(LayoutTree { root })
}

fn layout_node(applier: &MemoryApplier, id: NodeId) -> Result<&LayoutNode, NodeError> {
    applier
        .get(id)?
        .as_any()
        .downcast_ref::<LayoutNode>()
        .ok_or(NodeError::TypeMismatch { id })
}

fn measure(
    applier: &MemoryApplier,
    id: NodeId,
    constraints: Constraints,
) -> Result<LayoutNodeSnapshot, NodeError> {
    let node = layout_node(applier, id)?;
    let padding = node.modifier.padding_value();
    let inner = constraints.shrunk_by(2.0 * padding);

    let mut snapshot = match &node.kind {
        NodeKind::Column { spacing } => {
            let mut cursor_y = 0.0_f32;
            let mut max_width = 0.0_f32;
            let mut children = Vec::with_capacity(node.children.len());
            for (index, child_id) in node.children.iter().enumerate() {
                let mut child = measure(applier, *child_id, inner)?;
                if index > 0 {
                    cursor_y += spacing;
                }
                child.rect.x = padding;
                child.rect.y = padding + cursor_y;
                cursor_y += child.rect.height;
                max_width = max_width.max(child.rect.width);
                children.push(child);
            }
            plain_snapshot(id, Size::new(max_width, cursor_y), children)
        }
        NodeKind::Row { spacing } => {
            let mut cursor_x = 0.0_f32;
            let mut max_height = 0.0_f32;
            let mut children = Vec::with_capacity(node.children.len());
            for (index, child_id) in node.children.iter().enumerate() {
                let mut child = measure(applier, *child_id, inner)?;
                if index > 0 {
                    cursor_x += spacing;
                }
                child.rect.x = padding + cursor_x;
                child.rect.y = padding;
                cursor_x += child.rect.width;
                max_height = max_height.max(child.rect.height);
                children.push(child);
            }
            plain_snapshot(id, Size::new(cursor_x, max_height), children)
        }
        NodeKind::Text { text, style } => {
            let size = measure_text(text, style);
            let mut snapshot = plain_snapshot(id, size, Vec::new());
            snapshot.text_runs.push(text_run(text, size, style, 1.0));
            snapshot
        }
        NodeKind::AnimatedText {
            prefix,
            style,
            state,
        } => {
            let prefix_size = measure_text(prefix, style);
            let container = state.container_size();
            let size = Size::new(
                prefix_size.width + container.width,
                prefix_size.height.max(container.height),
            );
            let mut snapshot = plain_snapshot(id, size, Vec::new());
            if !prefix.is_empty() {
                snapshot
                    .text_runs
                    .push(text_run(prefix, prefix_size, style, 1.0));
            }
            // Oldest first, so the incoming symbol draws over the outgoing
            // one. The symbol region is never clipped while it moves.
            for frame in state.frames() {
                if frame.value.symbol.is_empty() {
                    continue;
                }
                snapshot.text_runs.push(TextRun {
                    text: frame.value.symbol.clone(),
                    rect: Rect {
                        x: prefix_size.width,
                        y: frame.offset_fraction * frame.size.height,
                        width: frame.size.width,
                        height: frame.size.height,
                    },
                    color: style.color,
                    font_size: style.font_size,
                    alpha: frame.alpha,
                });
            }
            snapshot
        }
        NodeKind::Button { label, action } => {
            let label_size = measure_text(label, &TextStyle::default());
            let size = Size::new(
                label_size.width + 2.0 * padding,
                label_size.height + 2.0 * padding,
            );
            let mut snapshot = plain_snapshot(id, size, Vec::new());
            snapshot.text_runs.push(TextRun {
                text: label.clone(),
                rect: Rect {
                    x: padding,
                    y: padding,
                    width: label_size.width,
                    height: label_size.height,
                },
                color: Color::UNSPECIFIED,
                font_size: TextStyle::default().font_size,
                alpha: 1.0,
            });
            // The modifier handler (if any) runs first, then the action.
            let modifier_handler = node.modifier.click_handler();
            let action = Rc::clone(action);
            snapshot.click_handler = Some(Rc::new(move |point: Point| {
                if let Some(handler) = modifier_handler.as_ref() {
                    handler(point);
                }
                (action.borrow_mut())();
            }));
            snapshot
        }
        NodeKind::Spacer => plain_snapshot(id, Size::default(), Vec::new()),
    };

    // Modifier sizing wins over the content size.
    if let Some(size) = node.modifier.explicit_size() {
        snapshot.rect.width = size.width;
        snapshot.rect.height = size.height;
    } else {
        if !matches!(node.kind, NodeKind::Button { .. }) && padding > 0.0 {
            snapshot.rect.width += 2.0 * padding;
            snapshot.rect.height += 2.0 * padding;
        }
        if node.modifier.fills_max_width() {
            snapshot.rect.width = constraints.max_width;
        }
        if node.modifier.fills_max_height() {
            snapshot.rect.height = constraints.max_height;
        }
    }

    snapshot.color = node.modifier.background_color();
    if snapshot.click_handler.is_none() {
        snapshot.click_handler = node.modifier.click_handler();
    }
    Ok(snapshot)
}

fn plain_snapshot(id: NodeId, size: Size, children: Vec<LayoutNodeSnapshot>) -> LayoutNodeSnapshot {
    LayoutNodeSnapshot {
        id,
        rect: Rect {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        },
        color: None,
        text_runs: SmallVec::new(),
        click_handler: None,
        children,
    }
}

fn text_run(text: &str, size: Size, style: &TextStyle, alpha: f32) -> TextRun {
    TextRun {
        text: text.to_string(),
        rect: Rect {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        },
        color: style.color,
        font_size: style.font_size,
        alpha,
    }
}
