use crate::NodeId;

/// Easing curves understood by the animation layer.
///
/// Curves map linear progress in `[0, 1]` onto eased progress with `sample(0) == 0` and
/// `sample(1) == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ease {
    Linear,
    QuadIn,
    SineOut,
    QuintOut,
    ExpoOut,
    /// Quartic ease-in.
    Power3In,
}

impl Ease {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::SineOut => (t * core::f32::consts::FRAC_PI_2).sin(),
            Self::QuintOut => 1.0 - (1.0 - t).powi(5),
            Self::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Self::Power3In => t * t * t * t,
        }
    }
}

/// A length along one axis. Percentages are relative to the node's own size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    pub fn value(self) -> f32 {
        match self {
            Self::Px(v) | Self::Percent(v) => v,
        }
    }

    pub fn with_value(self, value: f32) -> Self {
        match self {
            Self::Px(_) => Self::Px(value),
            Self::Percent(_) => Self::Percent(value),
        }
    }
}

/// A visual property and its destination value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prop {
    Opacity(f32),
    Scale(f32),
    ScaleY(f32),
    X(Length),
    Y(Length),
    /// Degrees.
    Rotation(f32),
    ZIndex(i32),
    /// Percentages of the node's box.
    TransformOrigin { x: f32, y: f32 },
    PointerEvents(bool),
    /// Marks a content entry as the current (visible) one.
    Active(bool),
    /// The loading indicator on the document root.
    Loading(bool),
}

/// Identifies which property a [`Prop`] addresses, independent of its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropKind {
    Opacity,
    Scale,
    ScaleY,
    X,
    Y,
    Rotation,
    ZIndex,
    TransformOrigin,
    PointerEvents,
    Active,
    Loading,
}

impl Prop {
    pub fn kind(&self) -> PropKind {
        match self {
            Self::Opacity(_) => PropKind::Opacity,
            Self::Scale(_) => PropKind::Scale,
            Self::ScaleY(_) => PropKind::ScaleY,
            Self::X(_) => PropKind::X,
            Self::Y(_) => PropKind::Y,
            Self::Rotation(_) => PropKind::Rotation,
            Self::ZIndex(_) => PropKind::ZIndex,
            Self::TransformOrigin { .. } => PropKind::TransformOrigin,
            Self::PointerEvents(_) => PropKind::PointerEvents,
            Self::Active(_) => PropKind::Active,
            Self::Loading(_) => PropKind::Loading,
        }
    }

    /// The interpolable scalar of this property, if it has one.
    ///
    /// Discrete properties (z-index, flags, transform origin) return `None` and are applied at
    /// the start of a tween.
    pub fn scalar(&self) -> Option<f32> {
        match *self {
            Self::Opacity(v) | Self::Scale(v) | Self::ScaleY(v) | Self::Rotation(v) => Some(v),
            Self::X(l) | Self::Y(l) => Some(l.value()),
            _ => None,
        }
    }

    /// Returns a copy of this property carrying `value` (same unit for lengths).
    ///
    /// Discrete properties are returned unchanged.
    pub fn with_scalar(self, value: f32) -> Self {
        match self {
            Self::Opacity(_) => Self::Opacity(value),
            Self::Scale(_) => Self::Scale(value),
            Self::ScaleY(_) => Self::ScaleY(value),
            Self::Rotation(_) => Self::Rotation(value),
            Self::X(l) => Self::X(l.with_value(value)),
            Self::Y(l) => Self::Y(l.with_value(value)),
            other => other,
        }
    }
}

/// Where a stagger cascade starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaggerFrom {
    Start,
    End,
    /// Delays grow with index distance from this target.
    Index(usize),
}

/// A per-target delay offset used to cascade one tween across a collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stagger {
    #[default]
    None,
    Each { each_ms: u32, from: StaggerFrom },
}

impl Stagger {
    pub fn each(each_ms: u32) -> Self {
        Self::Each {
            each_ms,
            from: StaggerFrom::Start,
        }
    }

    pub fn from_index(index: usize, each_ms: u32) -> Self {
        Self::Each {
            each_ms,
            from: StaggerFrom::Index(index),
        }
    }

    pub fn reversed(each_ms: u32) -> Self {
        Self::Each {
            each_ms,
            from: StaggerFrom::End,
        }
    }

    /// Delay of target `index` out of `count` targets.
    pub fn delay_ms(&self, index: usize, count: usize) -> u32 {
        let Self::Each { each_ms, from } = *self else {
            return 0;
        };
        let steps = match from {
            StaggerFrom::Start => index,
            StaggerFrom::End => count.saturating_sub(1).saturating_sub(index),
            StaggerFrom::Index(origin) => origin.abs_diff(index),
        };
        u32::try_from(steps)
            .unwrap_or(u32::MAX)
            .saturating_mul(each_ms)
    }

    /// The largest delay among `count` targets.
    pub fn max_delay_ms(&self, count: usize) -> u32 {
        (0..count)
            .map(|i| self.delay_ms(i, count))
            .max()
            .unwrap_or(0)
    }

    /// Target indexes in the order they start animating. Ties keep ascending index order.
    pub fn order(&self, count: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..count).collect();
        order.sort_by_key(|&i| self.delay_ms(i, count));
        order
    }
}

/// A tween of one or more targets toward destination properties.
///
/// `duration_ms`/`ease` fall back to the owning timeline's defaults when `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub targets: Vec<NodeId>,
    pub props: Vec<Prop>,
    /// Properties applied immediately when the tween starts, overriding the current state.
    pub start_at: Vec<Prop>,
    pub duration_ms: Option<u32>,
    pub ease: Option<Ease>,
    pub stagger: Stagger,
}

impl Tween {
    pub fn to(targets: impl IntoIterator<Item = NodeId>, props: impl Into<Vec<Prop>>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            props: props.into(),
            start_at: Vec::new(),
            duration_ms: None,
            ease: None,
            stagger: Stagger::None,
        }
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn start_at(mut self, props: impl Into<Vec<Prop>>) -> Self {
        self.start_at = props.into();
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }
}

/// A point in a timeline reported back to the caller when reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cue {
    /// The content entry at this index becomes the current one.
    ShowContent(usize),
    /// The content entry at this index stops being current; the menu becomes interactive.
    ShowMenu(usize),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    Set { targets: Vec<NodeId>, props: Vec<Prop> },
    Tween(Tween),
    Cue(Cue),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedStep {
    /// Offset from the timeline start.
    pub at_ms: u32,
    pub step: Step,
}

/// A declarative, ordered description of an animation sequence.
///
/// Steps run in `at_ms` order; steps at the same position run in insertion order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    pub default_duration_ms: u32,
    pub default_ease: Ease,
    labels: Vec<(String, u32)>,
    steps: Vec<TimedStep>,
}

impl Timeline {
    pub fn new(default_duration_ms: u32, default_ease: Ease) -> Self {
        Self {
            default_duration_ms,
            default_ease,
            labels: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn add_label(mut self, name: &str, at_ms: u32) -> Self {
        self.labels.retain(|(n, _)| n != name);
        self.labels.push((name.to_owned(), at_ms));
        self
    }

    pub fn label(&self, name: &str) -> Option<u32> {
        self.labels
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, at)| at)
    }

    pub fn set(
        mut self,
        targets: impl IntoIterator<Item = NodeId>,
        props: impl Into<Vec<Prop>>,
        at_ms: u32,
    ) -> Self {
        self.steps.push(TimedStep {
            at_ms,
            step: Step::Set {
                targets: targets.into_iter().collect(),
                props: props.into(),
            },
        });
        self
    }

    pub fn tween(mut self, tween: Tween, at_ms: u32) -> Self {
        self.steps.push(TimedStep {
            at_ms,
            step: Step::Tween(tween),
        });
        self
    }

    pub fn cue(mut self, cue: Cue, at_ms: u32) -> Self {
        self.steps.push(TimedStep {
            at_ms,
            step: Step::Cue(cue),
        });
        self
    }

    pub fn steps(&self) -> &[TimedStep] {
        &self.steps
    }

    pub fn duration_of(&self, tween: &Tween) -> u32 {
        tween.duration_ms.unwrap_or(self.default_duration_ms)
    }

    pub fn ease_of(&self, tween: &Tween) -> Ease {
        tween.ease.unwrap_or(self.default_ease)
    }

    /// The offset at which the last step finishes.
    pub fn end_ms(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| match &s.step {
                Step::Tween(t) => s
                    .at_ms
                    .saturating_add(t.stagger.max_delay_ms(t.targets.len()))
                    .saturating_add(self.duration_of(t)),
                Step::Set { .. } | Step::Cue(_) => s.at_ms,
            })
            .max()
            .unwrap_or(0)
    }

    /// Steps sorted by position, ties in insertion order.
    pub fn ordered_steps(&self) -> Vec<&TimedStep> {
        let mut steps: Vec<&TimedStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.at_ms);
        steps
    }

    /// Tween steps that animate `target`.
    pub fn tweens_of(&self, target: NodeId) -> impl Iterator<Item = (&TimedStep, &Tween)> {
        self.steps.iter().filter_map(move |s| match &s.step {
            Step::Tween(t) if t.targets.contains(&target) => Some((s, t)),
            _ => None,
        })
    }

    pub fn cues(&self) -> impl Iterator<Item = (u32, Cue)> + '_ {
        self.steps.iter().filter_map(|s| match s.step {
            Step::Cue(cue) => Some((s.at_ms, cue)),
            _ => None,
        })
    }
}
