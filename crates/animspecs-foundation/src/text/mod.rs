//! The text model behind the animated text widget.
//!
//! - [`TextState`] — the full current string as an immutable snapshot,
//!   evolved by a pure reducer over [`TextEvent`]s.
//! - [`DisplayParams`] — the derived (prefix, symbol) split. Its value is
//!   the transition key: a change in either field retriggers the enter/exit
//!   pair.

mod display;
mod state;

pub use display::DisplayParams;
pub use state::{TextEvent, TextState};
