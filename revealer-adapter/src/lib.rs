//! Adapter utilities for the `revealer` crate.
//!
//! The `revealer` crate is UI-agnostic and only describes what should animate. This crate
//! provides small, framework-neutral pieces a host needs to run it:
//!
//! - [`TweenAnimator`]: an in-memory tween engine implementing `revealer::Animator`
//! - [`FrameQueue`] and [`BoundsMap`]: frame pacing and layout backed by adapter calls
//! - [`Runtime`]: a `tick(now_ms)` driver with a start-up readiness gate
//!
//! This crate holds no UI objects. Adapters copy [`NodeStyle`]s to their real elements.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod animator;
mod frames;
mod layout;
mod runtime;
mod style;
mod tween;


pub use animator::TweenAnimator;
pub use frames::FrameQueue;
pub use layout::BoundsMap;
pub use runtime::{Runtime, Stage};
pub use style::NodeStyle;
pub use tween::PropTween;
