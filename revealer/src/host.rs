use crate::{AnimatorError, Bounds, Cue, NodeId, Prop, Timeline};

/// Handle of a timeline accepted by an [`Animator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineId(pub u64);

/// Handle of a pending one-shot frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRequest(pub u64);

/// Something an [`Animator`] reports back while playing timelines.
///
/// Hosts forward these to [`crate::MenuController::on_animator_event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimatorEvent {
    /// A [`crate::Step::Cue`] was reached.
    Cue { timeline: TimelineId, cue: Cue },
    /// Every step of the timeline has finished. Cancelled timelines never complete.
    Completed(TimelineId),
}

/// The animation engine capability.
///
/// The engine never sees controller state; it plays declarative timelines and applies
/// immediate property sets to host nodes.
pub trait Animator {
    fn play(&mut self, timeline: Timeline) -> Result<TimelineId, AnimatorError>;

    /// Stops a timeline. Its remaining steps never run and it reports no completion.
    fn cancel(&mut self, timeline: TimelineId);

    /// Stops every running or pending tween that animates any of `targets`.
    fn kill_tweens_of(&mut self, targets: &[NodeId]);

    /// Applies `props` to `target` immediately.
    fn set(&mut self, target: NodeId, props: &[Prop]) -> Result<(), AnimatorError>;
}

/// The host's frame-pacing primitive (e.g. `requestAnimationFrame`).
///
/// Each request fires at most once. A fired request is delivered to
/// [`crate::MenuController::on_frame`].
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;

    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Read access to host layout.
pub trait Layout {
    /// The current client-space bounds of `node`, or `None` if it is not laid out.
    fn bounds(&self, node: NodeId) -> Option<Bounds>;
}

/// Everything the engine needs from a host, bundled.
pub trait Platform: Animator + FrameScheduler + Layout {}

impl<T: Animator + FrameScheduler + Layout + ?Sized> Platform for T {}
