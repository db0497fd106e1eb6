use revealer::{Ease, Prop, lerp};

/// One property of one node moving from `from` to `to` over a fixed span of time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropTween {
    pub from: Prop,
    pub to: Prop,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl PropTween {
    pub fn new(from: Prop, to: Prop, start_ms: u64, duration_ms: u64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            ease,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// The property value at `now_ms`.
    ///
    /// Discrete properties jump to `to` as soon as the tween starts.
    pub fn sample(&self, now_ms: u64) -> Prop {
        let (Some(from), Some(to)) = (self.from.scalar(), self.to.scalar()) else {
            return self.to;
        };
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.to.with_scalar(lerp(from, to, self.ease.sample(t)))
    }
}
