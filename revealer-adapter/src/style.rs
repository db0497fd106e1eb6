use revealer::{Length, Prop, PropKind};

/// The resolved visual state of one host node, as last written by the animator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeStyle {
    pub opacity: f32,
    pub scale: f32,
    pub scale_y: f32,
    pub x: Length,
    pub y: Length,
    pub rotation: f32,
    pub z_index: i32,
    /// Percentages of the node's box.
    pub transform_origin: (f32, f32),
    pub pointer_events: bool,
    pub active: bool,
    pub loading: bool,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            scale_y: 1.0,
            x: Length::Px(0.0),
            y: Length::Px(0.0),
            rotation: 0.0,
            z_index: 0,
            transform_origin: (50.0, 50.0),
            pointer_events: true,
            active: false,
            loading: false,
        }
    }
}

impl NodeStyle {
    pub fn apply(&mut self, prop: Prop) {
        match prop {
            Prop::Opacity(v) => self.opacity = v,
            Prop::Scale(v) => self.scale = v,
            Prop::ScaleY(v) => self.scale_y = v,
            Prop::X(l) => self.x = l,
            Prop::Y(l) => self.y = l,
            Prop::Rotation(v) => self.rotation = v,
            Prop::ZIndex(z) => self.z_index = z,
            Prop::TransformOrigin { x, y } => self.transform_origin = (x, y),
            Prop::PointerEvents(on) => self.pointer_events = on,
            Prop::Active(on) => self.active = on,
            Prop::Loading(on) => self.loading = on,
        }
    }

    /// The current value of `kind`.
    pub fn get(&self, kind: PropKind) -> Prop {
        match kind {
            PropKind::Opacity => Prop::Opacity(self.opacity),
            PropKind::Scale => Prop::Scale(self.scale),
            PropKind::ScaleY => Prop::ScaleY(self.scale_y),
            PropKind::X => Prop::X(self.x),
            PropKind::Y => Prop::Y(self.y),
            PropKind::Rotation => Prop::Rotation(self.rotation),
            PropKind::ZIndex => Prop::ZIndex(self.z_index),
            PropKind::TransformOrigin => Prop::TransformOrigin {
                x: self.transform_origin.0,
                y: self.transform_origin.1,
            },
            PropKind::PointerEvents => Prop::PointerEvents(self.pointer_events),
            PropKind::Active => Prop::Active(self.active),
            PropKind::Loading => Prop::Loading(self.loading),
        }
    }

    /// Where a tween toward `to` starts from.
    ///
    /// A length stored in a different unit than `to` restarts from zero in `to`'s unit.
    pub fn start_value(&self, to: Prop) -> Prop {
        match (to, self.get(to.kind())) {
            (Prop::X(target), Prop::X(current)) | (Prop::Y(target), Prop::Y(current)) => {
                if core::mem::discriminant(&target) == core::mem::discriminant(&current) {
                    to.with_scalar(current.value())
                } else {
                    to.with_scalar(0.0)
                }
            }
            (_, current) => current,
        }
    }
}
