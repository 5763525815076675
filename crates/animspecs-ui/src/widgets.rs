//! Composable widget functions.
//!
//! Each function runs inside an active composition, opens a group keyed by
//! its call-site, and emits (or reuses) one [`LayoutNode`]. Containers
//! collect the node ids their content emits through a thread-local stack.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::panic::Location;
use std::rc::Rc;

use animspecs_animation::{ContentTransform, MotionSpec, SizeTransform, SpringSpec};
use animspecs_core::{location_key, with_current_composer, Composer, Key, NodeId};
use animspecs_foundation::modifier::Modifier;

use crate::nodes::{ClickAction, LayoutNode};
use crate::style::TextStyle;

thread_local! {
    static CHILD_STACK: RefCell<Vec<Vec<NodeId>>> = const { RefCell::new(Vec::new()) };
}

fn register_child(id: NodeId) {
    CHILD_STACK.with(|stack| {
        if let Some(current) = stack.borrow_mut().last_mut() {
            current.push(id);
        }
    });
}

fn collect_children(content: impl FnOnce()) -> Vec<NodeId> {
    CHILD_STACK.with(|stack| stack.borrow_mut().push(Vec::new()));
    content();
    CHILD_STACK.with(|stack| stack.borrow_mut().pop().unwrap_or_default())
}

fn caller_key(location: &Location<'_>) -> Key {
    location_key(location.file(), location.line(), location.column())
}

fn apply_update(composer: &Composer, id: NodeId, f: impl FnOnce(&mut LayoutNode)) {
    if let Err(err) = composer.update_node::<LayoutNode, _>(id, f) {
        log::error!("widget update failed: {err}");
    }
}

/// Default motion for [`AnimatedText`]: the outgoing symbol slides down and
/// fades out while the incoming symbol rises from below and fades in, both
/// on a soft critically damped spring, with the symbol container resizing
/// smoothly and never clipping.
pub struct AnimatedTextDefaults;

impl AnimatedTextDefaults {
    pub fn transform() -> ContentTransform {
        ContentTransform::new(
            MotionSpec::slide_in_from_bottom(SpringSpec::low_stiffness()).with_fade(),
            MotionSpec::slide_out_to_bottom(SpringSpec::low_stiffness()).with_fade(),
        )
        .using(SizeTransform::unclipped(SpringSpec::low_stiffness()))
    }
}

/// Text where the last symbol animates in and out as the text changes.
///
/// The text is split into a static prefix and the final symbol; the symbol
/// region transitions whenever the symbol or its position in the text
/// changes, so appending a repeated character still animates.
#[track_caller]
pub fn AnimatedText(modifier: Modifier, text: &str, style: TextStyle) -> NodeId {
    let key = caller_key(Location::caller());
    with_current_composer(|composer| {
        composer.with_group(key, |composer| {
            let id = composer.emit_node(|| {
                LayoutNode::animated_text(AnimatedTextDefaults::transform())
            });
            apply_update(composer, id, |node| {
                node.modifier = modifier.clone();
                node.set_animated_text(text, style.clone());
            });
            register_child(id);
            id
        })
    })
}

#[track_caller]
pub fn Text(modifier: Modifier, text: &str, style: TextStyle) -> NodeId {
    let key = caller_key(Location::caller());
    with_current_composer(|composer| {
        composer.with_group(key, |composer| {
            let id = composer.emit_node(LayoutNode::text);
            apply_update(composer, id, |node| {
                node.modifier = modifier.clone();
                node.set_text(text, style.clone());
            });
            register_child(id);
            id
        })
    })
}

#[track_caller]
pub fn Button(modifier: Modifier, label: &str, on_click: impl FnMut() + 'static) -> NodeId {
    let key = caller_key(Location::caller());
    with_current_composer(|composer| {
        composer.with_group(key, |composer| {
            let action_slot = composer
                .remember(|| Rc::new(RefCell::new(Box::new(|| {}) as Box<dyn FnMut()>)));
            // Rebind the handler each pass so it captures current state.
            action_slot.with(|action| {
                *action.borrow_mut() = Box::new(on_click);
            });
            let action: ClickAction = action_slot.with(Rc::clone);

            let id = composer.emit_node(move || LayoutNode::button(action));
            apply_update(composer, id, |node| {
                node.modifier = modifier.clone();
                node.set_button_label(label);
            });
            register_child(id);
            id
        })
    })
}

#[track_caller]
pub fn Column(modifier: Modifier, content: impl FnOnce()) -> NodeId {
    container(caller_key(Location::caller()), modifier, 0.0, true, content)
}

#[track_caller]
pub fn Row(modifier: Modifier, content: impl FnOnce()) -> NodeId {
    container(caller_key(Location::caller()), modifier, 0.0, false, content)
}

/// Empty box that occupies the modifier's size.
#[track_caller]
pub fn Spacer(modifier: Modifier) -> NodeId {
    let key = caller_key(Location::caller());
    with_current_composer(|composer| {
        composer.with_group(key, |composer| {
            let id = composer.emit_node(LayoutNode::spacer);
            apply_update(composer, id, |node| {
                node.modifier = modifier.clone();
            });
            register_child(id);
            id
        })
    })
}

fn container(
    key: Key,
    modifier: Modifier,
    spacing: f32,
    vertical: bool,
    content: impl FnOnce(),
) -> NodeId {
    with_current_composer(|composer| {
        composer.with_group(key, |composer| {
            let children = collect_children(content);
            let id = composer.emit_node(move || {
                if vertical {
                    LayoutNode::column(spacing)
                } else {
                    LayoutNode::row(spacing)
                }
            });
            apply_update(composer, id, |node| {
                node.modifier = modifier.clone();
                node.children = children.clone();
            });
            register_child(id);
            id
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{measure_layout, Constraints};
    use crate::nodes::NodeKind;
    use animspecs_core::{Composition, MemoryApplier, Runtime};
    use animspecs_foundation::text::{TextEvent, TextState};

    fn compose(mut content: impl FnMut() -> NodeId) -> (Composition, NodeId) {
        let mut composition = Composition::with_runtime(MemoryApplier::new(), Runtime::new());
        let key = location_key(file!(), line!(), column!());
        composition
            .render(key, &mut content)
            .expect("render succeeds");
        let root = composition.root().expect("root emitted");
        (composition, root)
    }

    #[test]
    fn column_collects_emitted_children() {
        let (composition, root) = compose(|| {
            Column(Modifier::default(), || {
                Text(Modifier::default(), "one", TextStyle::default());
                Text(Modifier::default(), "two", TextStyle::default());
            })
        });
        let mut applier = composition.applier_mut();
        let count = applier
            .with_node::<LayoutNode, _>(root, |node| node.children.len())
            .expect("column node");
        assert_eq!(count, 2);
    }

    #[test]
    fn node_identity_survives_recomposition() {
        let state = Rc::new(RefCell::new(TextState::default()));
        let state_for_content = Rc::clone(&state);
        let mut composition = Composition::with_runtime(MemoryApplier::new(), Runtime::new());
        let key = location_key(file!(), line!(), column!());
        let mut content = move || {
            let text = state_for_content.borrow().text().to_string();
            AnimatedText(Modifier::default(), &text, TextStyle::default())
        };

        composition.render(key, &mut content).expect("first pass");
        let first_root = composition.root().expect("root");

        let next = state.borrow().apply(TextEvent::Append('a'));
        *state.borrow_mut() = next;
        composition.render(key, &mut content).expect("second pass");
        assert_eq!(composition.root(), Some(first_root));
    }

    #[test]
    fn animated_text_retargets_on_text_change() {
        let text = Rc::new(RefCell::new(String::from("a")));
        let text_for_content = Rc::clone(&text);
        let mut composition = Composition::with_runtime(MemoryApplier::new(), Runtime::new());
        let key = location_key(file!(), line!(), column!());
        let mut content = move || {
            AnimatedText(
                Modifier::default(),
                &text_for_content.borrow(),
                TextStyle::default(),
            )
        };

        composition.render(key, &mut content).expect("first pass");
        let root = composition.root().expect("root");
        *text.borrow_mut() = String::from("ab");
        composition.render(key, &mut content).expect("second pass");

        let mut applier = composition.applier_mut();
        let (prefix, frame_count) = applier
            .with_node::<LayoutNode, _>(root, |node| match &node.kind {
                NodeKind::AnimatedText { prefix, state, .. } => {
                    (prefix.clone(), state.frames().len())
                }
                _ => panic!("wrong kind"),
            })
            .expect("animated text node");
        assert_eq!(prefix, "a");
        assert_eq!(frame_count, 2, "old and new symbol overlap");
    }

    #[test]
    fn button_click_reaches_latest_handler() {
        let clicks = Rc::new(RefCell::new(0));
        let clicks_for_content = Rc::clone(&clicks);
        let (composition, root) = compose(move || {
            let clicks = Rc::clone(&clicks_for_content);
            Button(Modifier::default(), "Tap", move || {
                *clicks.borrow_mut() += 1;
            })
        });

        let tree = measure_layout(&composition.applier(), root, Constraints::new(800.0, 600.0))
            .expect("layout");
        let handler = tree.root.click_handler.clone().expect("button clickable");
        handler(animspecs_foundation::graphics::Point { x: 1.0, y: 1.0 });
        assert_eq!(*clicks.borrow(), 1);
    }
}
