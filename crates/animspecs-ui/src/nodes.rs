//! The concrete node type emitted by every widget.
//!
//! The runtime stores nodes as `Box<dyn Node>` and never looks inside; the
//! layout and render passes downcast to [`LayoutNode`] to read geometry and
//! content out of the tree.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use animspecs_animation::ContentTransform;
use animspecs_core::{Node, NodeId};
use animspecs_foundation::modifier::Modifier;
use animspecs_foundation::text::DisplayParams;

use crate::animated_content::AnimatedContentState;
use crate::style::{measure_text, TextStyle};

/// Shared, rebindable button activation handler.
pub type ClickAction = Rc<RefCell<Box<dyn FnMut()>>>;

/// What a [`LayoutNode`] contributes to layout and rendering.
pub enum NodeKind {
    /// Vertical stack.
    Column { spacing: f32 },
    /// Horizontal stack.
    Row { spacing: f32 },
    /// Static single-line text.
    Text { text: String, style: TextStyle },
    /// Static prefix plus the animated last symbol.
    AnimatedText {
        prefix: String,
        style: TextStyle,
        state: AnimatedContentState<DisplayParams>,
    },
    /// Labelled click target.
    Button { label: String, action: ClickAction },
    /// Empty space, sized by its modifier.
    Spacer,
}

pub struct LayoutNode {
    pub kind: NodeKind,
    pub modifier: Modifier,
    pub children: Vec<NodeId>,
}

impl LayoutNode {
    pub fn column(spacing: f32) -> Self {
        Self {
            kind: NodeKind::Column { spacing },
            modifier: Modifier::default(),
            children: Vec::new(),
        }
    }

    pub fn row(spacing: f32) -> Self {
        Self {
            kind: NodeKind::Row { spacing },
            modifier: Modifier::default(),
            children: Vec::new(),
        }
    }

    pub fn text() -> Self {
        Self {
            kind: NodeKind::Text {
                text: String::new(),
                style: TextStyle::default(),
            },
            modifier: Modifier::default(),
            children: Vec::new(),
        }
    }

    pub fn animated_text(transform: ContentTransform) -> Self {
        Self {
            kind: NodeKind::AnimatedText {
                prefix: String::new(),
                style: TextStyle::default(),
                state: AnimatedContentState::new(transform),
            },
            modifier: Modifier::default(),
            children: Vec::new(),
        }
    }

    pub fn button(action: ClickAction) -> Self {
        Self {
            kind: NodeKind::Button {
                label: String::new(),
                action,
            },
            modifier: Modifier::default(),
            children: Vec::new(),
        }
    }

    pub fn spacer() -> Self {
        Self {
            kind: NodeKind::Spacer,
            modifier: Modifier::default(),
            children: Vec::new(),
        }
    }

    /// Rebinds static text content. No-op for other kinds.
    pub fn set_text(&mut self, new_text: &str, new_style: TextStyle) {
        if let NodeKind::Text { text, style } = &mut self.kind {
            if text != new_text {
                text.clear();
                text.push_str(new_text);
            }
            *style = new_style;
        }
    }

    /// Rebinds the animated text content and retargets the transition state
    /// when the symbol identity changed. No-op for other kinds.
    pub fn set_animated_text(&mut self, full_text: &str, new_style: TextStyle) {
        if let NodeKind::AnimatedText {
            prefix,
            style,
            state,
        } = &mut self.kind
        {
            let params = DisplayParams::decompose(full_text);
            let symbol_size = measure_text(&params.symbol, &new_style);
            prefix.clear();
            prefix.push_str(&params.prefix);
            *style = new_style;
            if state.set_target(params, symbol_size) {
                log::debug!("animated text transition started for {full_text:?}");
            }
        }
    }

    pub fn set_button_label(&mut self, new_label: &str) {
        if let NodeKind::Button { label, .. } = &mut self.kind {
            label.clear();
            label.push_str(new_label);
        }
    }
}

impl Node for LayoutNode {
    fn tick(&mut self, dt: f32) -> bool {
        match &mut self.kind {
            NodeKind::AnimatedText { state, .. } => state.tick(dt),
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_animated_text_splits_prefix_and_symbol() {
        let mut node = LayoutNode::animated_text(ContentTransform::default());
        node.set_animated_text("abc", TextStyle::default());
        match &node.kind {
            NodeKind::AnimatedText { prefix, state, .. } => {
                assert_eq!(prefix, "ab");
                let target = state.target().cloned().expect("target set");
                assert_eq!(target.symbol, "c");
            }
            _ => panic!("wrong kind"),
        }
    }

    #[test]
    fn animated_text_ticks_while_transitioning() {
        let mut node = LayoutNode::animated_text(ContentTransform::default());
        node.set_animated_text("a", TextStyle::default());
        assert!(!node.tick(1.0 / 60.0), "first content snaps in");

        node.set_animated_text("b", TextStyle::default());
        assert!(node.tick(1.0 / 60.0), "transition needs frames");
    }

    #[test]
    fn static_nodes_never_request_frames() {
        let mut node = LayoutNode::text();
        node.set_text("hello", TextStyle::default());
        assert!(!node.tick(1.0 / 60.0));
    }
}
