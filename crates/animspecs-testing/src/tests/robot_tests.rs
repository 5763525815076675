use crate::robot::{Robot, FRAME_DT};
use crate::robot_assertions::{assert_approx_eq, assert_contains_text};

use animspecs_core::{useState, NodeId};
use animspecs_foundation::modifier::Modifier;
use animspecs_foundation::text::{TextEvent, TextState};
use animspecs_ui::{AnimatedText, Button, Column, SceneItem, TextStyle};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn TypewriterApp() -> NodeId {
    Column(Modifier::default(), || {
        let state = useState(TextState::default);
        let snapshot = state.get();
        AnimatedText(Modifier::default(), snapshot.text(), TextStyle::default());
        let append = state.clone();
        Button(Modifier::padding(4.0), "Append", move || {
            append.update(|current| *current = current.apply(TextEvent::Append('a')));
        });
        let erase = state;
        Button(Modifier::padding(4.0), "Erase", move || {
            erase.update(|current| *current = current.apply(TextEvent::RemoveLast));
        });
    })
}

fn symbol_items(robot: &Robot, symbol: &str) -> Vec<SceneItem> {
    robot
        .scene()
        .items()
        .iter()
        .filter(|item| item.text.as_deref() == Some(symbol))
        .cloned()
        .collect()
}

#[test]
fn robot_reads_buttons_from_the_scene() {
    init_logging();
    let robot = Robot::launch(TypewriterApp);
    let texts = robot.texts();
    assert_contains_text(&texts, "Append", "append button present");
    assert_contains_text(&texts, "Erase", "erase button present");
}

#[test]
fn appending_shows_the_symbol_after_the_spring_settles() {
    init_logging();
    let mut robot = Robot::launch(TypewriterApp);
    assert!(robot.click_text("Append"), "append button clickable");
    robot.pump_until_idle(600);
    assert!(robot.is_idle());

    let symbols = symbol_items(&robot, "a");
    assert_eq!(symbols.len(), 1);
    assert_approx_eq(symbols[0].alpha, 1.0, 0.02, "settled symbol is opaque");
}

#[test]
fn incoming_and_outgoing_symbols_overlap_mid_transition() {
    init_logging();
    let mut robot = Robot::launch(TypewriterApp);
    robot.click_text("Append");
    robot.pump_until_idle(600);

    // Appending a repeated symbol moves it to a new position, which still
    // counts as a content change and must animate.
    robot.click_text("Append");
    robot.advance_frames(3, FRAME_DT);

    let symbols = symbol_items(&robot, "a");
    // Static prefix plus the outgoing and incoming animated symbols.
    assert_eq!(symbols.len(), 3, "items: {:?}", robot.describe_scene());
    let animated: Vec<&SceneItem> = symbols
        .iter()
        .filter(|item| item.alpha < 0.99)
        .collect();
    assert_eq!(animated.len(), 2, "both transition sides are translucent");
    for item in animated {
        assert!(
            item.rect.y > symbols[0].rect.y,
            "animated symbols sit below their resting line"
        );
    }
}

#[test]
fn erasing_animates_back_to_the_shorter_text() {
    init_logging();
    let mut robot = Robot::launch(TypewriterApp);
    robot.click_text("Append");
    robot.pump_until_idle(600);
    robot.click_text("Append");
    robot.pump_until_idle(600);
    assert_eq!(symbol_items(&robot, "a").len(), 2, "prefix and symbol");

    robot.click_text("Erase");
    robot.advance_frames(3, FRAME_DT);
    assert!(!robot.is_idle(), "removal animates too");

    robot.pump_until_idle(600);
    assert_eq!(symbol_items(&robot, "a").len(), 1, "back to one symbol");
}

#[test]
fn erasing_empty_text_changes_nothing() {
    init_logging();
    let mut robot = Robot::launch(TypewriterApp);
    let before = robot.texts();
    robot.click_text("Erase");
    robot.pump_until_idle(600);
    assert_eq!(robot.texts(), before);
}

#[test]
fn interrupting_a_transition_keeps_a_single_target() {
    init_logging();
    let mut robot = Robot::launch(TypewriterApp);
    robot.click_text("Append");
    robot.advance_frames(2, FRAME_DT);
    // Erase while the append transition is still in flight.
    robot.click_text("Erase");
    robot.pump_until_idle(600);
    assert!(robot.is_idle());
    assert!(symbol_items(&robot, "a").is_empty(), "text is empty again");
}
