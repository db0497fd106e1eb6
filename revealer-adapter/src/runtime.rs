use revealer::{
    Animator, AnimatorError, AssetCatalog, Bounds, FrameRequest, FrameScheduler, Layout,
    MenuController, MenuMarkup, NodeId, Point, Prop, Result, RevealerOptions, Timeline,
    TimelineId,
};

use crate::{BoundsMap, FrameQueue, TweenAnimator};

/// The host services a [`Runtime`] owns: animator, frame queue and layout.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    pub animator: TweenAnimator,
    pub frames: FrameQueue,
    pub layout: BoundsMap,
}

impl Animator for Stage {
    fn play(&mut self, timeline: Timeline) -> core::result::Result<TimelineId, AnimatorError> {
        self.animator.play(timeline)
    }

    fn cancel(&mut self, timeline: TimelineId) {
        self.animator.cancel(timeline);
    }

    fn kill_tweens_of(&mut self, targets: &[NodeId]) {
        self.animator.kill_tweens_of(targets);
    }

    fn set(&mut self, target: NodeId, props: &[Prop]) -> core::result::Result<(), AnimatorError> {
        self.animator.set(target, props)
    }
}

impl FrameScheduler for Stage {
    fn request_frame(&mut self) -> FrameRequest {
        self.frames.request_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.frames.cancel_frame(request);
    }
}

impl Layout for Stage {
    fn bounds(&self, node: NodeId) -> Option<Bounds> {
        self.layout.bounds(node)
    }
}

/// A framework-neutral driver that owns the host services and the [`MenuController`].
///
/// Start-up is gated: the controller is mounted once both [`Runtime::assets_ready`] and
/// [`Runtime::fonts_ready`] have been reported. Until then the root node shows its loading
/// indicator and input is ignored.
///
/// Adapters drive it by calling:
/// - the `on_*` methods when UI events occur
/// - `tick(now_ms)` once per animation frame
#[derive(Clone, Debug)]
pub struct Runtime {
    stage: Stage,
    markup: MenuMarkup,
    catalog: AssetCatalog,
    options: RevealerOptions,
    assets_ready: bool,
    fonts_ready: bool,
    controller: Option<MenuController>,
}

impl Runtime {
    pub fn new(markup: MenuMarkup, catalog: AssetCatalog, options: RevealerOptions) -> Result<Self> {
        let mut stage = Stage::default();
        if let Some(root) = markup.root {
            stage.set(root, &[Prop::Loading(true)])?;
        }
        Ok(Self {
            stage,
            markup,
            catalog,
            options,
            assets_ready: false,
            fonts_ready: false,
            controller: None,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn layout_mut(&mut self) -> &mut BoundsMap {
        &mut self.stage.layout
    }

    pub fn controller(&self) -> Option<&MenuController> {
        self.controller.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.controller.is_some()
    }

    /// Every preview image has loaded. Returns whether the controller is mounted.
    pub fn assets_ready(&mut self) -> Result<bool> {
        self.assets_ready = true;
        self.try_mount()
    }

    /// The typefaces have loaded. Returns whether the controller is mounted.
    pub fn fonts_ready(&mut self) -> Result<bool> {
        self.fonts_ready = true;
        self.try_mount()
    }

    fn try_mount(&mut self) -> Result<bool> {
        if self.controller.is_some() {
            return Ok(true);
        }
        if !(self.assets_ready && self.fonts_ready) {
            return Ok(false);
        }
        let controller = MenuController::mount(
            &self.markup,
            self.catalog.clone(),
            self.options.clone(),
            &mut self.stage,
        )?;
        adebug!(entries = controller.entry_count(), "Runtime::mount");
        self.controller = Some(controller);
        Ok(true)
    }

    pub fn on_pointer_move(&mut self, position: Point) {
        if let Some(c) = &mut self.controller {
            c.on_pointer_move(position);
        }
    }

    pub fn on_pointer_enter(&mut self, index: usize) -> Result<()> {
        match &mut self.controller {
            Some(c) => c.on_pointer_enter(index, &mut self.stage),
            None => Ok(()),
        }
    }

    pub fn on_pointer_leave(&mut self, index: usize) -> Result<()> {
        match &mut self.controller {
            Some(c) => c.on_pointer_leave(index, &mut self.stage),
            None => Ok(()),
        }
    }

    /// A menu entry was clicked. Returns `None` before mount.
    pub fn on_menu_click(&mut self, index: usize) -> Result<Option<TimelineId>> {
        match &mut self.controller {
            Some(c) => c.select_menu_item(index, &mut self.stage).map(Some),
            None => Ok(None),
        }
    }

    /// The back control was clicked. Returns `None` before mount.
    pub fn on_back_click(&mut self) -> Result<Option<TimelineId>> {
        match &mut self.controller {
            Some(c) => c.go_back(&mut self.stage).map(Some),
            None => Ok(None),
        }
    }

    pub fn on_more_enter(&mut self, entry: usize, pos: usize) -> Result<Option<TimelineId>> {
        match &self.controller {
            Some(c) => c.on_more_enter(entry, pos, &mut self.stage).map(Some),
            None => Ok(None),
        }
    }

    pub fn on_more_leave(&mut self, entry: usize, pos: usize) -> Result<Option<TimelineId>> {
        match &self.controller {
            Some(c) => c.on_more_leave(entry, pos, &mut self.stage).map(Some),
            None => Ok(None),
        }
    }

    /// Advances the runtime to `now_ms`.
    ///
    /// Runs animations first and forwards their events to the controller, then delivers the
    /// frame requests that were pending when this tick started. Before mount only the animator
    /// advances.
    ///
    /// Every event and frame is delivered even if one of them fails; the first error is
    /// returned afterwards.
    pub fn tick(&mut self, now_ms: u64) -> Result<()> {
        let events = self.stage.animator.tick(now_ms);
        let due = self.stage.frames.take_due();
        let Some(c) = &mut self.controller else {
            return Ok(());
        };
        let mut first_err = None;
        for event in events {
            if let Err(err) = c.on_animator_event(event, &mut self.stage) {
                first_err.get_or_insert(err);
            }
        }
        for request in due {
            if let Err(err) = c.on_frame(request, &mut self.stage) {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
