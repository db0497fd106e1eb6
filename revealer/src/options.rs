/// Tunables for [`crate::MenuController`].
///
/// Defaults reproduce the reference motion design. All durations are in milliseconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RevealerOptions {
    /// Per-frame interpolation rate of the preview's x translation.
    pub tx_amt: f32,
    /// Per-frame interpolation rate of the preview's y translation.
    pub ty_amt: f32,
    /// Per-frame interpolation rate of the preview's rotation.
    pub rotation_amt: f32,

    /// Duration of the preview show/hide transitions.
    pub preview_duration_ms: u32,
    /// Duration of the preview's scale settle when shown.
    pub preview_scale_duration_ms: u32,

    /// Default tween duration of the menu → content timeline.
    pub show_content_duration_ms: u32,
    /// Default tween duration of the content → menu timeline.
    pub show_menu_duration_ms: u32,
    /// Where the content phase starts in the menu → content timeline.
    pub show_content_at_ms: u32,
    /// Where the menu phase starts in the content → menu timeline.
    pub show_menu_at_ms: u32,

    /// Stagger step between menu entries, by index distance from the selected entry.
    pub menu_stagger_ms: u32,
    /// Stagger step between gallery images and captions.
    pub gallery_stagger_ms: u32,

    /// Duration of the "more" hover effect.
    pub more_enter_duration_ms: u32,
    /// Duration of the "more" hover effect's reversal.
    pub more_leave_duration_ms: u32,
    /// Horizontal shift per title character while "more" is hovered, in px.
    pub more_char_shift_px: f32,
}

impl RevealerOptions {
    pub fn new() -> Self {
        Self {
            tx_amt: 0.08,
            ty_amt: 0.08,
            rotation_amt: 0.05,
            preview_duration_ms: 800,
            preview_scale_duration_ms: 1000,
            show_content_duration_ms: 1000,
            show_menu_duration_ms: 400,
            show_content_at_ms: 300,
            show_menu_at_ms: 600,
            menu_stagger_ms: 10,
            gallery_stagger_ms: 20,
            more_enter_duration_ms: 1000,
            more_leave_duration_ms: 500,
            more_char_shift_px: 2.0,
        }
    }
}

impl Default for RevealerOptions {
    fn default() -> Self {
        Self::new()
    }
}
