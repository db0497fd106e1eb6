//! A headless hover-reveal menu engine.
//!
//! For adapter-level utilities (a tween engine, a frame queue, a tick-driven runtime), see the
//! `revealer-adapter` crate.
//!
//! The crate models an interactive menu whose entries reveal a floating preview that follows the
//! pointer, and which morphs into a detail view (title, number badge, gallery, captions) on click
//! and back again.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - pointer events (move, enter, leave, click)
//! - node bounds (see [`Layout`])
//! - an animation engine that plays declarative [`Timeline`]s (see [`Animator`])
//! - one-shot frame callbacks (see [`FrameScheduler`])
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod content;
mod controller;
mod error;
mod host;
mod markup;
mod math;
mod options;
mod pointer;
mod property;
mod reveal;
mod timeline;
mod types;

#[cfg(test)]
mod tests;

pub use content::ContentEntry;
pub use controller::{MenuController, ViewPhase, ViewState};
pub use error::{AnimatorError, Error, Result};
pub use host::{Animator, AnimatorEvent, FrameRequest, FrameScheduler, Layout, Platform, TimelineId};
pub use markup::{AssetCatalog, AssetRef, CaptionMarkup, ContentMarkup, MenuEntryMarkup, MenuMarkup};
pub use math::{clamp, lerp, map};
pub use options::RevealerOptions;
pub use pointer::{FrameMotion, PointerTracker};
pub use property::{AnimatableProperties, AnimatableProperty};
pub use reveal::{HoverPhase, HoverReveal, RevealNodes};
pub use timeline::{
    Cue, Ease, Length, Prop, PropKind, Stagger, StaggerFrom, Step, TimedStep, Timeline, Tween,
};
pub use types::{Bounds, NodeId, Point};
