use crate::RevealerOptions;
use crate::math::lerp;

/// A smoothed scalar: `current` is the target, `previous` is the displayed value, and `amt` is
/// the per-frame interpolation rate in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimatableProperty {
    pub previous: f32,
    pub current: f32,
    pub amt: f32,
}

impl AnimatableProperty {
    pub fn new(amt: f32) -> Self {
        Self {
            previous: 0.0,
            current: 0.0,
            amt,
        }
    }

    /// Eases the displayed value one frame toward the target and returns it.
    pub fn step(&mut self) -> f32 {
        self.previous = lerp(self.previous, self.current, self.amt);
        self.previous
    }

    /// Jumps the displayed value to the target (no interpolation) and returns it.
    pub fn snap(&mut self) -> f32 {
        self.previous = self.current;
        self.previous
    }
}

/// The properties a hover preview animates while following the pointer.
///
/// One bundle is shared by every menu entry, so smoothing is tuned globally.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimatableProperties {
    /// Translation along x, in px.
    pub tx: AnimatableProperty,
    /// Translation along y, in px.
    pub ty: AnimatableProperty,
    /// Rotation, in degrees.
    pub rotation: AnimatableProperty,
}

impl AnimatableProperties {
    pub fn new(tx_amt: f32, ty_amt: f32, rotation_amt: f32) -> Self {
        Self {
            tx: AnimatableProperty::new(tx_amt),
            ty: AnimatableProperty::new(ty_amt),
            rotation: AnimatableProperty::new(rotation_amt),
        }
    }

    /// The bundle with the interpolation rates of `options`.
    pub fn from_options(options: &RevealerOptions) -> Self {
        Self::new(options.tx_amt, options.ty_amt, options.rotation_amt)
    }
}

impl Default for AnimatableProperties {
    fn default() -> Self {
        Self::from_options(&RevealerOptions::default())
    }
}
