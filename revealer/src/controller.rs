use crate::markup::Document;
use crate::{
    AnimatableProperties, AnimatorEvent, AssetCatalog, AssetRef, ContentEntry, Cue, Ease, Error,
    FrameRequest, HoverReveal, Length, MenuMarkup, NodeId, Platform, Point, PointerTracker, Prop,
    Result, RevealerOptions, Stagger, Timeline, TimelineId, Tween,
};

/// Duration of the vertical "squash" that precedes a text slide.
const SQUASH_MS: u32 = 100;
/// Duration of the number badge fade on the menu.
const NUMBER_MS: u32 = 300;
/// Duration of the menu text slide.
const SLIDE_MS: u32 = 800;
/// Captions start this long after the content phase.
const CAPTION_DELAY_MS: u32 = 200;

/// The view the controller is in, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewPhase {
    MenuVisible,
    TransitioningToContent,
    ContentVisible,
    TransitioningToMenu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    MenuVisible,
    TransitioningToContent { index: usize, timeline: TimelineId },
    ContentVisible { index: usize },
    TransitioningToMenu { index: usize, timeline: TimelineId },
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        match self {
            Self::MenuVisible => ViewPhase::MenuVisible,
            Self::TransitioningToContent { .. } => ViewPhase::TransitioningToContent,
            Self::ContentVisible { .. } => ViewPhase::ContentVisible,
            Self::TransitioningToMenu { .. } => ViewPhase::TransitioningToMenu,
        }
    }

    /// Whether no transition timeline is running.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::MenuVisible | Self::ContentVisible { .. })
    }

    fn timeline(&self) -> Option<TimelineId> {
        match *self {
            Self::TransitioningToContent { timeline, .. }
            | Self::TransitioningToMenu { timeline, .. } => Some(timeline),
            Self::MenuVisible | Self::ContentVisible { .. } => None,
        }
    }
}

#[derive(Clone, Debug)]
struct MenuEntry {
    el: NodeId,
    inner: NodeId,
    number: NodeId,
    reveal: HoverReveal,
    /// Pointer-events override on the entry; `None` inherits from the menu.
    pointer: Option<bool>,
}

/// Owns the menu and content entries and orchestrates the menu ⇄ content transitions.
///
/// The controller holds no UI objects. The host forwards input events, fired frame requests and
/// animator events; the controller answers through the [`Platform`] it is handed.
///
/// Only one transition runs at a time: [`Self::select_menu_item`] is legal only while the menu
/// is settled and [`Self::go_back`] only while content is settled. Other calls are rejected with
/// [`Error::InvalidTransition`].
#[derive(Clone, Debug)]
pub struct MenuController {
    options: RevealerOptions,
    catalog: AssetCatalog,
    menu: NodeId,
    back: NodeId,
    entries: Vec<MenuEntry>,
    contents: Vec<ContentEntry>,

    pointer: PointerTracker,
    props: AnimatableProperties,

    state: ViewState,
    current_item_index: Option<usize>,
    active_content: Option<usize>,
    menu_interactive: bool,
    back_interactive: bool,
    /// `(entry, hide timeline)` of the preview hidden by the last selection.
    pending_preview_hide: Option<(usize, TimelineId)>,
}

impl MenuController {
    /// Validates `markup` against `catalog` and prepares the initial menu state.
    ///
    /// Fails fast when a required element is missing or an entry's `data-img` does not name a
    /// catalog asset. On success the document root's loading indicator is cleared.
    pub fn mount<P: Platform + ?Sized>(
        markup: &MenuMarkup,
        catalog: AssetCatalog,
        options: RevealerOptions,
        platform: &mut P,
    ) -> Result<Self> {
        let Document {
            root,
            menu,
            back,
            entries,
            contents,
        } = markup.validate(&catalog)?;

        let entries: Vec<MenuEntry> = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| MenuEntry {
                el: e.el,
                inner: e.inner,
                number: e.number,
                reveal: HoverReveal::new(i, e.reveal, e.asset),
                pointer: None,
            })
            .collect();

        for e in &entries {
            platform.set(
                e.reveal.nodes().reveal,
                &[Prop::TransformOrigin { x: 0.0, y: 0.0 }, Prop::Opacity(0.0)],
            )?;
        }
        platform.set(back, &[Prop::PointerEvents(false), Prop::Opacity(0.0)])?;
        platform.set(menu, &[Prop::PointerEvents(true)])?;
        platform.set(root, &[Prop::Loading(false)])?;

        rdebug!(entries = entries.len(), "MenuController::mount");
        let props = AnimatableProperties::from_options(&options);
        Ok(Self {
            options,
            catalog,
            menu,
            back,
            entries,
            contents,
            pointer: PointerTracker::new(),
            props,
            state: ViewState::MenuVisible,
            current_item_index: None,
            active_content: None,
            menu_interactive: true,
            back_interactive: false,
            pending_preview_hide: None,
        })
    }

    pub fn options(&self) -> &RevealerOptions {
        &self.options
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn phase(&self) -> ViewPhase {
        self.state.phase()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// The last selected entry. Kept after returning to the menu.
    pub fn current_item_index(&self) -> Option<usize> {
        self.current_item_index
    }

    /// The content entry currently marked as visible.
    pub fn active_content(&self) -> Option<usize> {
        self.active_content
    }

    pub fn is_menu_interactive(&self) -> bool {
        self.menu_interactive
    }

    pub fn is_back_interactive(&self) -> bool {
        self.back_interactive
    }

    /// Whether menu entry `index` currently receives pointer events.
    pub fn is_entry_interactive(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .is_some_and(|e| e.pointer.unwrap_or(self.menu_interactive))
    }

    pub fn hover_reveal(&self, index: usize) -> Option<&HoverReveal> {
        self.entries.get(index).map(|e| &e.reveal)
    }

    pub fn content(&self, index: usize) -> Option<&ContentEntry> {
        self.contents.get(index)
    }

    /// The preview image of menu entry `index`.
    pub fn preview_asset(&self, index: usize) -> Option<&AssetRef> {
        let entry = self.entries.get(index)?;
        self.catalog.get(entry.reveal.asset_index())
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn properties(&self) -> &AnimatableProperties {
        &self.props
    }

    pub fn on_pointer_move(&mut self, position: Point) {
        self.pointer.on_pointer_move(position);
    }

    /// The pointer entered menu entry `index`. Ignored while the entry is not interactive.
    pub fn on_pointer_enter<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        platform: &mut P,
    ) -> Result<()> {
        self.check_index(index)?;
        if !self.can_hover(index) {
            rtrace!(index, "MenuController::on_pointer_enter ignored");
            return Ok(());
        }
        let stacking = self.stacking();
        self.entries[index]
            .reveal
            .enter(stacking, &self.options, platform)?;
        Ok(())
    }

    /// Hover sessions only start on an interactive entry while the menu is (becoming) visible,
    /// and never on an entry whose preview is being hidden for a selection.
    fn can_hover(&self, index: usize) -> bool {
        let menu_phase = matches!(
            self.state,
            ViewState::MenuVisible | ViewState::TransitioningToMenu { .. }
        );
        let hiding = matches!(self.pending_preview_hide, Some((i, _)) if i == index);
        menu_phase && !hiding && self.is_entry_interactive(index)
    }

    /// The z-index that lifts a hovered entry above the others.
    fn stacking(&self) -> i32 {
        i32::try_from(self.catalog.len()).unwrap_or(i32::MAX)
    }

    pub fn on_pointer_leave<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        platform: &mut P,
    ) -> Result<()> {
        self.check_index(index)?;
        let reveal = &mut self.entries[index].reveal;
        if reveal.is_hovering() {
            reveal.leave(&self.options, platform)?;
        }
        Ok(())
    }

    /// Runs the hover loop that owns `request`. Stale requests are ignored.
    pub fn on_frame<P: Platform + ?Sized>(
        &mut self,
        request: FrameRequest,
        platform: &mut P,
    ) -> Result<()> {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.reveal.pending_frame() == Some(request))
        else {
            rtrace!(request = request.0, "MenuController::on_frame stale");
            return Ok(());
        };
        entry
            .reveal
            .render(&mut self.pointer, &mut self.props, platform)
    }

    pub fn on_more_enter<P: Platform + ?Sized>(
        &self,
        entry: usize,
        pos: usize,
        platform: &mut P,
    ) -> Result<TimelineId> {
        self.check_index(entry)?;
        self.contents[entry].more_enter(pos, &self.options, platform)
    }

    pub fn on_more_leave<P: Platform + ?Sized>(
        &self,
        entry: usize,
        pos: usize,
        platform: &mut P,
    ) -> Result<TimelineId> {
        self.check_index(entry)?;
        self.contents[entry].more_leave(pos, &self.options, platform)
    }

    /// Hides the menu and shows content entry `index`.
    ///
    /// On animator failure every pointer-events change made here is undone and the controller
    /// stays in [`ViewPhase::MenuVisible`].
    pub fn select_menu_item<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        platform: &mut P,
    ) -> Result<TimelineId> {
        if self.state != ViewState::MenuVisible {
            rwarn!(index, phase = ?self.phase(), "select_menu_item rejected");
            return Err(Error::InvalidTransition {
                op: "select a menu item",
                phase: self.phase(),
            });
        }
        self.check_index(index)?;

        let prev_entry_pointer = self.entries[index].pointer;
        let was_hovering = self.entries[index].reveal.is_hovering();
        let result = self.begin_show_content(index, platform);
        match result {
            Ok(timeline) => {
                rdebug!(index, timeline = timeline.0, "select_menu_item");
                self.state = ViewState::TransitioningToContent { index, timeline };
                self.current_item_index = Some(index);
                Ok(timeline)
            }
            Err(err) => {
                rwarn!(index, error = %err, "select_menu_item failed, rolling back");
                self.pending_preview_hide = None;
                self.set_menu_pointer(true, platform);
                self.set_entry_pointer(index, prev_entry_pointer, platform);
                if was_hovering {
                    let stacking = self.stacking();
                    let reveal = &mut self.entries[index].reveal;
                    if let Err(_restore) = reveal.enter(stacking, &self.options, platform) {
                        rwarn!(index, error = %_restore, "hover session not restored");
                    }
                }
                Err(err)
            }
        }
    }

    /// Hides the current content entry and shows the menu again.
    pub fn go_back<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<TimelineId> {
        let ViewState::ContentVisible { index } = self.state else {
            rwarn!(phase = ?self.phase(), "go_back rejected");
            return Err(Error::InvalidTransition {
                op: "go back",
                phase: self.phase(),
            });
        };

        let result = self.begin_show_menu(index, platform);
        match result {
            Ok(timeline) => {
                rdebug!(index, timeline = timeline.0, "go_back");
                self.state = ViewState::TransitioningToMenu { index, timeline };
                Ok(timeline)
            }
            Err(err) => {
                rwarn!(index, error = %err, "go_back failed, rolling back");
                if let Err(_restore) = self.set_back_pointer(true, platform) {
                    rwarn!(error = %_restore, "go_back rollback incomplete");
                }
                Err(err)
            }
        }
    }

    /// Applies a cue or completion reported by the animator.
    pub fn on_animator_event<P: Platform + ?Sized>(
        &mut self,
        event: AnimatorEvent,
        platform: &mut P,
    ) -> Result<()> {
        match event {
            AnimatorEvent::Cue { timeline, cue } => {
                if self.state.timeline() != Some(timeline) {
                    rtrace!(timeline = timeline.0, ?cue, "stale cue");
                    return Ok(());
                }
                match cue {
                    Cue::ShowContent(index) => self.activate_content(index, platform),
                    Cue::ShowMenu(index) => self.restore_menu(index, platform),
                }
            }
            AnimatorEvent::Completed(id) => {
                for e in &mut self.entries {
                    e.reveal.on_completed(id);
                }
                if let Some((index, hide)) = self.pending_preview_hide {
                    if hide == id {
                        self.pending_preview_hide = None;
                        if !self.menu_interactive {
                            self.set_entry_pointer(index, Some(false), platform);
                        }
                    }
                }
                self.state = match self.state {
                    ViewState::TransitioningToContent { index, timeline } if timeline == id => {
                        rdebug!(index, "content visible");
                        ViewState::ContentVisible { index }
                    }
                    ViewState::TransitioningToMenu { timeline, .. } if timeline == id => {
                        rdebug!("menu visible");
                        ViewState::MenuVisible
                    }
                    other => other,
                };
                Ok(())
            }
        }
    }

    fn begin_show_content<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        platform: &mut P,
    ) -> Result<TimelineId> {
        platform.set(self.menu, &[Prop::PointerEvents(false)])?;
        self.menu_interactive = false;
        platform.set(self.entries[index].el, &[Prop::PointerEvents(true)])?;
        self.entries[index].pointer = Some(true);

        let hide = self.entries[index].reveal.leave(&self.options, platform)?;
        self.pending_preview_hide = Some((index, hide));

        Ok(platform.play(self.show_content_timeline(index))?)
    }

    fn begin_show_menu<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        platform: &mut P,
    ) -> Result<TimelineId> {
        self.set_back_pointer(false, platform)?;
        Ok(platform.play(self.show_menu_timeline(index))?)
    }

    fn activate_content<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        platform: &mut P,
    ) -> Result<()> {
        if let Some(prev) = self.active_content.filter(|&p| p != index) {
            platform.set(self.contents[prev].el, &[Prop::Active(false)])?;
        }
        platform.set(self.contents[index].el, &[Prop::Active(true)])?;
        self.active_content = Some(index);
        self.set_back_pointer(true, platform)
    }

    fn restore_menu<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        platform: &mut P,
    ) -> Result<()> {
        platform.set(self.contents[index].el, &[Prop::Active(false)])?;
        self.active_content = None;
        self.set_menu_pointer(true, platform);
        self.set_entry_pointer(index, None, platform);
        Ok(())
    }

    fn show_content_timeline(&self, index: usize) -> Timeline {
        let o = &self.options;
        let c = &self.contents[index];
        let texts = self.texts();
        let numbers = self.numbers();
        let menu_stagger = Stagger::from_index(index, o.menu_stagger_ms);
        let gallery = Stagger::each(o.gallery_stagger_ms);
        let show = o.show_content_at_ms;

        let mut captions = c.caption_titles();
        captions.extend(c.caption_metas());

        Timeline::new(o.show_content_duration_ms, Ease::ExpoOut)
            .add_label("hideMenu", 0)
            .set(
                texts.iter().copied().chain([c.title]),
                [Prop::TransformOrigin { x: 50.0, y: 100.0 }],
                0,
            )
            .set(
                [c.title],
                [Prop::Opacity(0.0), Prop::Y(Length::Percent(101.0))],
                0,
            )
            .set([c.number], [Prop::Scale(0.0)], 0)
            .set(c.images.iter().copied(), [Prop::Y(Length::Percent(101.0))], 0)
            .set(c.caption_nodes(), [Prop::Opacity(0.0)], 0)
            .tween(
                Tween::to(numbers, [Prop::Scale(0.0), Prop::Opacity(0.0)])
                    .duration(NUMBER_MS)
                    .ease(Ease::SineOut)
                    .stagger(menu_stagger),
                0,
            )
            .tween(
                Tween::to(texts.iter().copied(), [Prop::ScaleY(1.5)])
                    .duration(SQUASH_MS)
                    .ease(Ease::QuadIn)
                    .stagger(menu_stagger),
                0,
            )
            .tween(
                Tween::to(
                    texts,
                    [
                        Prop::ScaleY(1.0),
                        Prop::Y(Length::Percent(-100.0)),
                        Prop::Opacity(0.0),
                    ],
                )
                .duration(SLIDE_MS)
                .ease(Ease::ExpoOut)
                .stagger(menu_stagger),
                SQUASH_MS,
            )
            .add_label("showContent", show)
            .cue(Cue::ShowContent(index), show)
            .tween(
                Tween::to(
                    [self.back],
                    [Prop::Opacity(1.0), Prop::X(Length::Percent(0.0))],
                )
                .start_at([Prop::X(Length::Percent(-100.0))]),
                show,
            )
            .tween(
                Tween::to([c.title], [Prop::ScaleY(1.5), Prop::Opacity(1.0)])
                    .duration(SQUASH_MS)
                    .ease(Ease::QuadIn),
                show,
            )
            .tween(
                Tween::to([c.title], [Prop::ScaleY(1.0), Prop::Y(Length::Percent(0.0))])
                    .start_at([Prop::Y(Length::Percent(100.0))])
                    .duration(SLIDE_MS)
                    .ease(Ease::ExpoOut),
                show + SQUASH_MS,
            )
            .tween(Tween::to([c.number], [Prop::Scale(1.0)]), show)
            .tween(
                Tween::to(c.images.iter().copied(), [Prop::Y(Length::Percent(0.0))])
                    .stagger(gallery),
                show + SQUASH_MS,
            )
            .tween(
                Tween::to(
                    captions,
                    [Prop::Y(Length::Percent(0.0)), Prop::Opacity(1.0)],
                )
                .start_at([Prop::Y(Length::Percent(100.0))])
                .stagger(gallery),
                show + CAPTION_DELAY_MS,
            )
            .tween(
                Tween::to(c.caption_mores(), [Prop::Scale(1.0), Prop::Opacity(1.0)])
                    .start_at([Prop::Scale(0.0)])
                    .stagger(gallery),
                show + CAPTION_DELAY_MS,
            )
    }

    fn show_menu_timeline(&self, index: usize) -> Timeline {
        let o = &self.options;
        let c = &self.contents[index];
        let texts = self.texts();
        let menu_stagger = Stagger::from_index(index, o.menu_stagger_ms);
        let gallery = Stagger::reversed(o.gallery_stagger_ms);
        let show = o.show_menu_at_ms;

        let mut captions = c.caption_metas();
        captions.extend(c.caption_titles());

        Timeline::new(o.show_menu_duration_ms, Ease::Power3In)
            .add_label("hideContent", 0)
            .set(
                texts.iter().copied().chain([c.title]),
                [Prop::TransformOrigin { x: 50.0, y: 0.0 }],
                0,
            )
            .tween(
                Tween::to(
                    [self.back],
                    [Prop::Opacity(0.0), Prop::X(Length::Percent(-100.0))],
                ),
                0,
            )
            .tween(
                Tween::to(
                    captions,
                    [Prop::Y(Length::Percent(100.0)), Prop::Opacity(0.0)],
                )
                .stagger(gallery),
                0,
            )
            .tween(
                Tween::to(c.caption_mores(), [Prop::Scale(0.0), Prop::Opacity(0.0)])
                    .stagger(gallery),
                0,
            )
            .tween(
                Tween::to(c.images.iter().copied(), [Prop::Y(Length::Percent(101.0))])
                    .stagger(gallery),
                SQUASH_MS,
            )
            .tween(Tween::to([c.number], [Prop::Scale(0.0)]), SQUASH_MS)
            .tween(
                Tween::to([c.title], [Prop::Y(Length::Percent(100.0))]),
                SQUASH_MS,
            )
            .add_label("showMenu", show)
            .cue(Cue::ShowMenu(index), show)
            .tween(
                Tween::to(self.numbers(), [Prop::Scale(1.0), Prop::Opacity(1.0)])
                    .duration(NUMBER_MS)
                    .ease(Ease::SineOut)
                    .stagger(menu_stagger),
                show,
            )
            .tween(
                Tween::to(texts.iter().copied(), [Prop::ScaleY(1.5), Prop::Opacity(1.0)])
                    .duration(SQUASH_MS)
                    .ease(Ease::QuadIn)
                    .stagger(menu_stagger),
                show,
            )
            .tween(
                Tween::to(texts, [Prop::ScaleY(1.0), Prop::Y(Length::Percent(0.0))])
                    .duration(SLIDE_MS)
                    .ease(Ease::ExpoOut)
                    .stagger(menu_stagger),
                show + SQUASH_MS,
            )
    }

    fn texts(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.inner).collect()
    }

    fn numbers(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.number).collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                count: self.entries.len(),
            })
        }
    }

    fn set_back_pointer<P: Platform + ?Sized>(
        &mut self,
        enabled: bool,
        platform: &mut P,
    ) -> Result<()> {
        platform.set(self.back, &[Prop::PointerEvents(enabled)])?;
        self.back_interactive = enabled;
        Ok(())
    }

    /// Best effort: the logical state is updated even if the host rejects the set.
    fn set_menu_pointer<P: Platform + ?Sized>(&mut self, enabled: bool, platform: &mut P) {
        self.menu_interactive = enabled;
        if let Err(_err) = platform.set(self.menu, &[Prop::PointerEvents(enabled)]) {
            rwarn!(error = %_err, "menu pointer-events not applied");
        }
    }

    /// Best effort, like [`Self::set_menu_pointer`]. `None` inherits from the menu.
    fn set_entry_pointer<P: Platform + ?Sized>(
        &mut self,
        index: usize,
        pointer: Option<bool>,
        platform: &mut P,
    ) {
        let entry = &mut self.entries[index];
        entry.pointer = pointer;
        let effective = pointer.unwrap_or(self.menu_interactive);
        if let Err(_err) = platform.set(entry.el, &[Prop::PointerEvents(effective)]) {
            rwarn!(index, error = %_err, "entry pointer-events not applied");
        }
    }
}
