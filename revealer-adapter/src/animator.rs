use std::collections::HashMap;

use revealer::{
    Animator, AnimatorError, AnimatorEvent, Cue, Ease, NodeId, Prop, Step, Timeline, TimelineId,
};

use crate::{NodeStyle, PropTween};

/// A tick-driven [`Animator`] that keeps node styles in memory.
///
/// Adapters call [`TweenAnimator::tick`] once per frame with a monotonic clock, copy the styles
/// of touched nodes to their real elements, and forward the returned events to the controller.
/// Timelines start at the clock value of the most recent tick.
#[derive(Clone, Debug, Default)]
pub struct TweenAnimator {
    now_ms: u64,
    next_id: u64,
    styles: HashMap<NodeId, NodeStyle>,
    timelines: Vec<Playing>,
}

#[derive(Clone, Debug)]
struct Playing {
    id: TimelineId,
    end_ms: u64,
    /// Sorted by `at_ms`, ties in insertion order.
    items: Vec<Scheduled>,
}

#[derive(Clone, Debug)]
struct Scheduled {
    at_ms: u64,
    action: Action,
    done: bool,
}

#[derive(Clone, Debug)]
enum Action {
    Set { target: NodeId, props: Vec<Prop> },
    Cue(Cue),
    Tween(TweenRun),
}

#[derive(Clone, Debug)]
struct TweenRun {
    target: NodeId,
    duration_ms: u64,
    ease: Ease,
    to: Vec<Prop>,
    start_at: Vec<Prop>,
    /// Empty until the tween starts and captures its from-values.
    props: Vec<PropTween>,
    started: bool,
}

impl TweenRun {
    /// Returns `true` once every property reached its destination.
    fn advance(&mut self, start_ms: u64, now_ms: u64, style: &mut NodeStyle) -> bool {
        if !self.started {
            self.started = true;
            for &p in &self.start_at {
                style.apply(p);
            }
            self.props = self
                .to
                .iter()
                .map(|&to| {
                    PropTween::new(style.start_value(to), to, start_ms, self.duration_ms, self.ease)
                })
                .collect();
        }
        for t in &self.props {
            style.apply(t.sample(now_ms));
        }
        self.props.iter().all(|t| t.is_done(now_ms))
    }
}

fn check_finite(props: &[Prop]) -> Result<(), AnimatorError> {
    for p in props {
        let finite = match *p {
            Prop::TransformOrigin { x, y } => x.is_finite() && y.is_finite(),
            _ => p.scalar().is_none_or(f32::is_finite),
        };
        if !finite {
            return Err(AnimatorError::new(format!("non-finite value in {p:?}")));
        }
    }
    Ok(())
}

impl TweenAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clock value of the most recent tick.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// The style of `node`; untouched nodes report [`NodeStyle::default`].
    pub fn style(&self, node: NodeId) -> NodeStyle {
        self.styles.get(&node).copied().unwrap_or_default()
    }

    pub fn is_playing(&self, timeline: TimelineId) -> bool {
        self.timelines.iter().any(|t| t.id == timeline)
    }

    /// Number of timelines that have neither completed nor been cancelled.
    pub fn playing(&self) -> usize {
        self.timelines.len()
    }

    /// Advances every playing timeline to `now_ms`.
    ///
    /// Returns cues in the order they were reached, each timeline's completion after its own
    /// cues. A clock that goes backwards is treated as not having moved.
    pub fn tick(&mut self, now_ms: u64) -> Vec<AnimatorEvent> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;
        let styles = &mut self.styles;
        let mut events = Vec::new();

        self.timelines.retain_mut(|playing| {
            for item in playing.items.iter_mut().filter(|i| !i.done) {
                if item.at_ms > now {
                    break;
                }
                item.done = match &mut item.action {
                    Action::Set { target, props } => {
                        let style = styles.entry(*target).or_default();
                        for &p in props.iter() {
                            style.apply(p);
                        }
                        true
                    }
                    Action::Cue(cue) => {
                        atrace!(timeline = playing.id.0, ?cue, "TweenAnimator::tick cue");
                        events.push(AnimatorEvent::Cue {
                            timeline: playing.id,
                            cue: *cue,
                        });
                        true
                    }
                    Action::Tween(run) => {
                        let style = styles.entry(run.target).or_default();
                        run.advance(item.at_ms, now, style)
                    }
                };
            }

            let finished = now >= playing.end_ms && playing.items.iter().all(|i| i.done);
            if finished {
                adebug!(timeline = playing.id.0, now, "TweenAnimator::tick completed");
                events.push(AnimatorEvent::Completed(playing.id));
            }
            !finished
        });
        events
    }
}

impl Animator for TweenAnimator {
    fn play(&mut self, timeline: Timeline) -> Result<TimelineId, AnimatorError> {
        let start = self.now_ms;
        let mut items = Vec::new();
        for step in timeline.ordered_steps() {
            let at_ms = start + u64::from(step.at_ms);
            match &step.step {
                Step::Set { targets, props } => {
                    check_finite(props)?;
                    items.extend(targets.iter().map(|&target| Scheduled {
                        at_ms,
                        action: Action::Set {
                            target,
                            props: props.clone(),
                        },
                        done: false,
                    }));
                }
                Step::Cue(cue) => items.push(Scheduled {
                    at_ms,
                    action: Action::Cue(*cue),
                    done: false,
                }),
                Step::Tween(tween) => {
                    check_finite(&tween.props)?;
                    check_finite(&tween.start_at)?;
                    let duration_ms = u64::from(timeline.duration_of(tween));
                    let ease = timeline.ease_of(tween);
                    let count = tween.targets.len();
                    items.extend(tween.targets.iter().enumerate().map(|(i, &target)| {
                        Scheduled {
                            at_ms: at_ms + u64::from(tween.stagger.delay_ms(i, count)),
                            action: Action::Tween(TweenRun {
                                target,
                                duration_ms,
                                ease,
                                to: tween.props.clone(),
                                start_at: tween.start_at.clone(),
                                props: Vec::new(),
                                started: false,
                            }),
                            done: false,
                        }
                    }));
                }
            }
        }
        items.sort_by_key(|i| i.at_ms);

        self.next_id += 1;
        let id = TimelineId(self.next_id);
        let end_ms = start + u64::from(timeline.end_ms());
        adebug!(timeline = id.0, start, end_ms, steps = items.len(), "TweenAnimator::play");
        self.timelines.push(Playing { id, end_ms, items });
        Ok(id)
    }

    fn cancel(&mut self, timeline: TimelineId) {
        self.timelines.retain(|t| t.id != timeline);
    }

    fn kill_tweens_of(&mut self, targets: &[NodeId]) {
        for playing in &mut self.timelines {
            for item in &mut playing.items {
                if let Action::Tween(run) = &item.action {
                    if targets.contains(&run.target) {
                        item.done = true;
                    }
                }
            }
        }
    }

    fn set(&mut self, target: NodeId, props: &[Prop]) -> Result<(), AnimatorError> {
        check_finite(props)?;
        let style = self.styles.entry(target).or_default();
        for &p in props {
            style.apply(p);
        }
        Ok(())
    }
}
