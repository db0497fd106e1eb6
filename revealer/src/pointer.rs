use crate::Point;
use crate::math::clamp;

/// Per-frame pointer motion, as consumed by a hover session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameMotion {
    /// `|cached.x - current.x|`, clamped to `[0, 100]`.
    pub distance_x: f32,
    /// `cached - current`: negative `x` means the pointer moved right.
    pub direction: Point,
}

/// Tracks the latest pointer position and the position as of the last consumed frame.
///
/// The input handler is the only writer of `current` (via [`Self::on_pointer_move`]). The active
/// hover session is the only consumer of frames (via [`Self::advance_frame`]). The tracker is
/// owned by [`crate::MenuController`] and lent to whichever item owns the running frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    current: Point,
    cached: Point,
    direction: Point,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn cached(&self) -> Point {
        self.cached
    }

    /// Direction computed by the most recent [`Self::advance_frame`].
    pub fn direction(&self) -> Point {
        self.direction
    }

    /// Records a raw pointer move. Not frame-gated.
    pub fn on_pointer_move(&mut self, position: Point) {
        self.current = position;
    }

    /// Consumes one animation frame: derives motion from `cached` vs `current`, then caches
    /// `current`.
    pub fn advance_frame(&mut self) -> FrameMotion {
        let distance_x = clamp((self.cached.x - self.current.x).abs(), 0.0, 100.0);
        self.direction = self.cached - self.current;
        self.cached = self.current;
        FrameMotion {
            distance_x,
            direction: self.direction,
        }
    }
}
