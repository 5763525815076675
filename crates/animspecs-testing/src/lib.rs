//! Robot testing harness.
//!
//! A robot launches an app against the headless renderer and drives it the
//! way a user would: click things, let frames pass, read what is on screen.

#![allow(non_snake_case)]

pub mod robot;
pub mod robot_assertions;

pub use robot::{rect_center, Robot};

#[cfg(test)]
mod tests;
