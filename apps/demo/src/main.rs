//! Typewriter demo: an animated text line plus two buttons.
//!
//! "Click me!" appends a random symbol, "erase" removes the last one; the
//! last symbol of the line slides and fades on every change. Runs against
//! the headless renderer and takes commands on stdin:
//!
//!   a | add    append a random symbol
//!   e | erase  remove the last symbol
//!   s | scene  dump the current scene
//!   q | quit   exit

use std::io::{self, BufRead, Write as _};

use anyhow::Context;

use animspecs_app_shell::AppShell;
use animspecs_core::{location_key, useState, NodeId};
use animspecs_foundation::graphics::Size;
use animspecs_foundation::modifier::Modifier;
use animspecs_foundation::text::{TextEvent, TextState};
use animspecs_ui::{AnimatedText, Button, Column, HeadlessRenderer, Row, Spacer, TextStyle};

const FRAME_DT: f32 = 1.0 / 60.0;
const SYMBOLS: [char; 3] = ['a', 'b', 'c'];

fn random_symbol() -> char {
    let mut byte = [0u8; 1];
    match getrandom::getrandom(&mut byte) {
        Ok(()) => SYMBOLS[(byte[0] as usize) % SYMBOLS.len()],
        Err(err) => {
            log::warn!("entropy source unavailable, using 'a': {err}");
            SYMBOLS[0]
        }
    }
}

fn app() -> NodeId {
    Column(Modifier::padding(16.0), || {
        let state = useState(TextState::default);
        let snapshot = state.get();
        AnimatedText(
            Modifier::default(),
            snapshot.text(),
            TextStyle::default().with_font_size(24.0),
        );
        Spacer(Modifier::size(Size::new(0.0, 12.0)));
        Row(Modifier::default(), || {
            let append = state.clone();
            Button(Modifier::padding(8.0), "Click me!", move || {
                append.update(|current| {
                    *current = current.apply(TextEvent::Append(random_symbol()));
                });
            });
            let erase = state.clone();
            Button(Modifier::padding(8.0), "erase", move || {
                erase.update(|current| *current = current.apply(TextEvent::RemoveLast));
            });
        });
    })
}

fn pump(shell: &mut AppShell<HeadlessRenderer>) {
    // Deterministic frames; the demo does not care about wall time.
    let mut frames = 0;
    while shell.should_render() && frames < 1200 {
        shell.update_with_dt(FRAME_DT);
        frames += 1;
    }
    log::debug!("settled after {frames} frames");
}

fn click_button(shell: &mut AppShell<HeadlessRenderer>, label: &str) -> bool {
    let Some(rect) = shell.scene().text_rects(label).first().copied() else {
        log::error!("button {label:?} not found in scene");
        return false;
    };
    shell.set_cursor(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    shell.pointer_pressed();
    shell.pointer_released();
    true
}

fn print_scene(shell: &AppShell<HeadlessRenderer>) {
    println!("text on screen: {:?}", shell.scene().all_text());
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let root_key = location_key(file!(), line!(), column!());
    let mut shell = AppShell::new(HeadlessRenderer::new(), root_key, app);
    shell.set_viewport(640.0, 480.0);
    pump(&mut shell);
    print_scene(&shell);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().context("flush prompt")?;
        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("read command")?;
        if read == 0 {
            break;
        }
        match line.trim() {
            "a" | "add" => {
                if click_button(&mut shell, "Click me!") {
                    pump(&mut shell);
                    print_scene(&shell);
                }
            }
            "e" | "erase" => {
                if click_button(&mut shell, "erase") {
                    pump(&mut shell);
                    print_scene(&shell);
                }
            }
            "s" | "scene" => {
                for line in shell.describe_scene() {
                    println!("{line}");
                }
            }
            "q" | "quit" => break,
            "" => {}
            other => println!("unknown command {other:?}"),
        }
    }
    Ok(())
}
