//! Core composition runtime for animspecs.
//!
//! A trimmed slot-table runtime in the Jetpack Compose mold: positional
//! memoization keyed by call-site, node emission with reuse across
//! recompositions, and observable state whose writes schedule a new frame.
//! Single-threaded by construction (`Rc`/`RefCell`); the app shell owns the
//! only execution context.

#![allow(non_snake_case)]

mod composer;
mod runtime;
mod slot_table;
mod state;

pub use composer::{
    enter_composer_scope, location_key, with_current_composer, Composer, ComposerScopeGuard,
    Composition, Key, MemoryApplier, Node, NodeError, NodeId,
};
pub use runtime::{Runtime, RuntimeHandle, StdRuntime};
pub use slot_table::{Owned, SlotTable};
pub use state::{mutableStateOf, remember, useState, MutableState};
