use crate::math::map;
use crate::{
    AnimatableProperties, Animator, Bounds, Ease, Error, FrameRequest, FrameScheduler, Length,
    NodeId, Platform, PointerTracker, Prop, Result, RevealerOptions, Timeline, TimelineId, Tween,
};

/// The nodes of one hover preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealNodes {
    /// The menu entry that triggers the preview.
    pub trigger: NodeId,
    /// Positioned and rotated every frame.
    pub reveal: NodeId,
    /// Clips the image; slides and scales on show/hide.
    pub inner: NodeId,
    pub image: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoverPhase {
    Idle,
    Hovering,
}

/// A menu entry's floating preview and its pointer-following loop.
#[derive(Clone, Debug)]
pub struct HoverReveal {
    index: usize,
    nodes: RevealNodes,
    asset: usize,
    phase: HoverPhase,
    /// `(trigger, reveal)` bounds, refreshed on the first frame of each session.
    bounds: Option<(Bounds, Bounds)>,
    first_frame: bool,
    frame: Option<FrameRequest>,
    show: Option<TimelineId>,
    hide: Option<TimelineId>,
}

impl HoverReveal {
    pub(crate) fn new(index: usize, nodes: RevealNodes, asset: usize) -> Self {
        Self {
            index,
            nodes,
            asset,
            phase: HoverPhase::Idle,
            bounds: None,
            first_frame: false,
            frame: None,
            show: None,
            hide: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn nodes(&self) -> RevealNodes {
        self.nodes
    }

    /// Index of the preview image in the [`crate::AssetCatalog`].
    pub fn asset_index(&self) -> usize {
        self.asset
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    pub fn is_hovering(&self) -> bool {
        self.phase == HoverPhase::Hovering
    }

    /// The frame request the loop is waiting on, if it is running.
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.frame
    }

    /// The in-flight hide transition, if any.
    pub fn hide_timeline(&self) -> Option<TimelineId> {
        self.hide
    }

    pub fn show_timeline(&self) -> Option<TimelineId> {
        self.show
    }

    /// Starts a hover session: plays the show transition and starts the frame loop.
    ///
    /// `stacking` is the z-index that lifts the trigger above its siblings. Calling this while
    /// already hovering restarts the show transition and leaves the single frame loop running.
    pub fn enter<P: Animator + FrameScheduler + ?Sized>(
        &mut self,
        stacking: i32,
        options: &RevealerOptions,
        platform: &mut P,
    ) -> Result<TimelineId> {
        self.cancel_transitions(platform);

        let n = self.nodes;
        let timeline = Timeline::new(options.preview_duration_ms, Ease::QuintOut)
            .set([n.reveal, n.inner], [Prop::Opacity(1.0)], 0)
            .set([n.trigger], [Prop::ZIndex(stacking)], 0)
            .tween(
                Tween::to(
                    [n.inner],
                    [Prop::X(Length::Percent(0.0)), Prop::Y(Length::Percent(0.0))],
                )
                .start_at([
                    Prop::X(Length::Percent(-50.0)),
                    Prop::Y(Length::Percent(150.0)),
                    Prop::Rotation(10.0),
                ]),
                0,
            )
            .tween(
                Tween::to([n.inner], [Prop::Scale(1.0)])
                    .start_at([Prop::Scale(0.2)])
                    .duration(options.preview_scale_duration_ms)
                    .ease(Ease::ExpoOut),
                0,
            )
            .tween(
                Tween::to([n.image], [Prop::Scale(1.0)])
                    .start_at([Prop::Scale(1.8)])
                    .duration(options.preview_scale_duration_ms)
                    .ease(Ease::ExpoOut),
                0,
            );
        let id = platform.play(timeline)?;

        rdebug!(index = self.index, timeline = id.0, "HoverReveal::enter");
        self.show = Some(id);
        self.phase = HoverPhase::Hovering;
        self.first_frame = true;
        self.loop_render(platform);
        Ok(id)
    }

    /// Ends the hover session: stops the frame loop and plays the hide transition.
    ///
    /// Returns the hide timeline; its [`crate::AnimatorEvent::Completed`] is the "hidden" signal.
    /// When already idle with a hide in flight, that timeline is returned without replaying.
    pub fn leave<P: Animator + FrameScheduler + ?Sized>(
        &mut self,
        options: &RevealerOptions,
        platform: &mut P,
    ) -> Result<TimelineId> {
        self.stop_rendering(platform);
        if self.phase == HoverPhase::Idle {
            if let Some(hide) = self.hide {
                return Ok(hide);
            }
        }
        self.phase = HoverPhase::Idle;
        self.cancel_transitions(platform);

        let n = self.nodes;
        let duration = options.preview_duration_ms;
        let timeline = Timeline::new(duration, Ease::QuintOut)
            .set([n.trigger], [Prop::ZIndex(1)], 0)
            .tween(
                Tween::to(
                    [n.inner],
                    [
                        Prop::Scale(0.8),
                        Prop::X(Length::Percent(50.0)),
                        Prop::Y(Length::Percent(-150.0)),
                        Prop::Opacity(0.0),
                    ],
                ),
                0,
            )
            .tween(Tween::to([n.image], [Prop::Scale(1.8)]), 0)
            .set([n.reveal], [Prop::Opacity(0.0)], duration);
        let id = platform.play(timeline)?;

        rdebug!(index = self.index, timeline = id.0, "HoverReveal::leave");
        self.hide = Some(id);
        Ok(id)
    }

    /// One frame of the pointer-following loop.
    ///
    /// Does nothing unless hovering. Reschedules itself until [`Self::leave`] stops it.
    pub fn render<P: Platform + ?Sized>(
        &mut self,
        pointer: &mut PointerTracker,
        props: &mut AnimatableProperties,
        platform: &mut P,
    ) -> Result<()> {
        self.frame = None;
        if self.phase != HoverPhase::Hovering {
            return Ok(());
        }

        let first = self.first_frame;
        let (el, reveal) = match self.bounds {
            Some(bounds) if !first => bounds,
            _ => {
                let bounds = self.measure(platform)?;
                self.bounds = Some(bounds);
                bounds
            }
        };

        let motion = pointer.advance_frame();
        let mouse = pointer.current();

        props.tx.current = (mouse.x - el.left).abs() - reveal.width / 2.0;
        props.ty.current = (mouse.y - el.top).abs() - reveal.height / 2.0;
        props.rotation.current = if first {
            0.0
        } else {
            let max = if motion.direction.x < 0.0 { -100.0 } else { 100.0 };
            map(motion.distance_x, 0.0, 200.0, 0.0, max)
        };

        let (x, y, rotation) = if first {
            (props.tx.snap(), props.ty.snap(), props.rotation.snap())
        } else {
            (props.tx.step(), props.ty.step(), props.rotation.step())
        };
        rtrace!(index = self.index, x, y, rotation, "HoverReveal::render");
        platform.set(
            self.nodes.reveal,
            &[
                Prop::X(Length::Px(x)),
                Prop::Y(Length::Px(y)),
                Prop::Rotation(rotation),
            ],
        )?;

        self.first_frame = false;
        self.loop_render(platform);
        Ok(())
    }

    /// Forgets a finished show/hide timeline.
    pub(crate) fn on_completed(&mut self, id: TimelineId) {
        if self.show == Some(id) {
            self.show = None;
        }
        if self.hide == Some(id) {
            self.hide = None;
        }
    }

    fn measure<P: Platform + ?Sized>(&self, platform: &P) -> Result<(Bounds, Bounds)> {
        let bounds_of = |node: NodeId| platform.bounds(node).ok_or(Error::LayoutUnavailable(node));
        Ok((bounds_of(self.nodes.trigger)?, bounds_of(self.nodes.reveal)?))
    }

    fn cancel_transitions<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        for id in [self.show.take(), self.hide.take()].into_iter().flatten() {
            animator.cancel(id);
        }
        animator.kill_tweens_of(&[self.nodes.inner, self.nodes.image]);
    }

    fn loop_render<F: FrameScheduler + ?Sized>(&mut self, frames: &mut F) {
        if self.frame.is_none() {
            self.frame = Some(frames.request_frame());
        }
    }

    fn stop_rendering<F: FrameScheduler + ?Sized>(&mut self, frames: &mut F) {
        if let Some(request) = self.frame.take() {
            frames.cancel_frame(request);
        }
    }
}
