//! Animation primitives for animspecs.
//!
//! This crate is deliberately free of any composition or rendering types. It
//! provides the value-level building blocks (spring physics) and the
//! data-driven transition descriptors that the UI layer interprets,
//! following Jetpack Compose's split between `animation-core` and the
//! widgets that consume it.

pub mod spring;
pub mod transition;

pub use spring::{Spring, SpringSpec};
pub use transition::{ContentTransform, MotionSpec, SizeTransform, SlideMotion};
