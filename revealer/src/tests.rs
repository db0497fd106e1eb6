use crate::*;

use std::collections::HashMap;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// A value in `[-1000, 1000)`.
    fn gen_f32(&mut self) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        unit * 2000.0 - 1000.0
    }
}

/// Records every call; plays nothing.
#[derive(Default)]
struct FakePlatform {
    next_timeline: u64,
    played: Vec<(TimelineId, Timeline)>,
    cancelled: Vec<TimelineId>,
    killed: Vec<Vec<NodeId>>,
    sets: Vec<(NodeId, Vec<Prop>)>,
    next_frame: u64,
    frames_requested: usize,
    pending_frames: Vec<FrameRequest>,
    bounds: HashMap<NodeId, Bounds>,
    fail_play: bool,
    /// Fails only the play attempt with this 0-based number.
    fail_attempt: Option<usize>,
    play_attempts: usize,
}

impl FakePlatform {
    fn timeline(&self, id: TimelineId) -> &Timeline {
        &self
            .played
            .iter()
            .find(|(t, _)| *t == id)
            .expect("timeline was played")
            .1
    }

    fn last_set(&self, node: NodeId, kind: PropKind) -> Option<Prop> {
        self.sets
            .iter()
            .rev()
            .filter(|(n, _)| *n == node)
            .flat_map(|(_, props)| props.iter().rev())
            .find(|p| p.kind() == kind)
            .copied()
    }

    fn xs_of(&self, node: NodeId) -> Vec<f32> {
        self.sets
            .iter()
            .filter(|(n, _)| *n == node)
            .flat_map(|(_, props)| props.iter())
            .filter_map(|p| match p {
                Prop::X(Length::Px(x)) => Some(*x),
                _ => None,
            })
            .collect()
    }

    fn rotations_of(&self, node: NodeId) -> Vec<f32> {
        self.sets
            .iter()
            .filter(|(n, _)| *n == node)
            .flat_map(|(_, props)| props.iter())
            .filter_map(|p| match p {
                Prop::Rotation(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Animator for FakePlatform {
    fn play(&mut self, timeline: Timeline) -> core::result::Result<TimelineId, AnimatorError> {
        let attempt = self.play_attempts;
        self.play_attempts += 1;
        if self.fail_play || self.fail_attempt == Some(attempt) {
            return Err(AnimatorError::new("engine offline"));
        }
        self.next_timeline += 1;
        let id = TimelineId(self.next_timeline);
        self.played.push((id, timeline));
        Ok(id)
    }

    fn cancel(&mut self, timeline: TimelineId) {
        self.cancelled.push(timeline);
    }

    fn kill_tweens_of(&mut self, targets: &[NodeId]) {
        self.killed.push(targets.to_vec());
    }

    fn set(&mut self, target: NodeId, props: &[Prop]) -> core::result::Result<(), AnimatorError> {
        self.sets.push((target, props.to_vec()));
        Ok(())
    }
}

impl FrameScheduler for FakePlatform {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_frame += 1;
        self.frames_requested += 1;
        let request = FrameRequest(self.next_frame);
        self.pending_frames.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending_frames.retain(|r| *r != request);
    }
}

impl Layout for FakePlatform {
    fn bounds(&self, node: NodeId) -> Option<Bounds> {
        self.bounds.get(&node).copied()
    }
}

struct Ids(u32);

impl Ids {
    fn next(&mut self) -> NodeId {
        self.0 += 1;
        NodeId(self.0)
    }
}

fn build_markup(entries: usize, images: usize) -> MenuMarkup {
    let mut ids = Ids(0);
    let mut markup = MenuMarkup {
        root: Some(ids.next()),
        menu: Some(ids.next()),
        back: Some(ids.next()),
        ..MenuMarkup::default()
    };
    for i in 0..entries {
        markup.entries.push(MenuEntryMarkup {
            el: Some(ids.next()),
            inner: Some(ids.next()),
            number: Some(ids.next()),
            reveal: Some(ids.next()),
            reveal_inner: Some(ids.next()),
            reveal_image: Some(ids.next()),
            image: Some(format!("img/{}.jpg", i + 1)),
        });
    }
    for _ in 0..entries {
        let mut content = ContentMarkup {
            el: Some(ids.next()),
            title: Some(ids.next()),
            number: Some(ids.next()),
            ..ContentMarkup::default()
        };
        for _ in 0..images {
            content.images.push(ids.next());
            let mut caption = CaptionMarkup {
                title: Some(ids.next()),
                meta: Some(ids.next()),
                more: Some(ids.next()),
                title_chars: Vec::new(),
            };
            for _ in 0..4 {
                caption.title_chars.push(ids.next());
            }
            content.captions.push(caption);
        }
        markup.contents.push(content);
    }
    markup
}

fn catalog(count: usize) -> AssetCatalog {
    AssetCatalog::new(
        (1..=count).map(|i| AssetRef::new(format!("{i}.jpg"), format!("/img/{i}.jpg"))),
    )
}

fn mounted(entries: usize) -> (MenuController, FakePlatform, MenuMarkup) {
    let markup = build_markup(entries, 3);
    let mut p = FakePlatform::default();
    let c = MenuController::mount(&markup, catalog(entries), RevealerOptions::default(), &mut p)
        .unwrap();
    (c, p, markup)
}

/// Delivers every cue of `id`, then its completion.
fn finish(c: &mut MenuController, p: &mut FakePlatform, id: TimelineId) {
    let cues: Vec<Cue> = p.timeline(id).cues().map(|(_, cue)| cue).collect();
    for cue in cues {
        c.on_animator_event(AnimatorEvent::Cue { timeline: id, cue }, p)
            .unwrap();
    }
    c.on_animator_event(AnimatorEvent::Completed(id), p).unwrap();
}

fn select_and_settle(c: &mut MenuController, p: &mut FakePlatform, index: usize) {
    let id = c.select_menu_item(index, p).unwrap();
    if let Some(hide) = c.hover_reveal(index).unwrap().hide_timeline() {
        c.on_animator_event(AnimatorEvent::Completed(hide), p).unwrap();
    }
    finish(c, p, id);
}

fn place_entry(p: &mut FakePlatform, c: &MenuController, index: usize) -> RevealNodes {
    let nodes = c.hover_reveal(index).unwrap().nodes();
    p.bounds.insert(nodes.trigger, Bounds::new(0.0, 0.0, 400.0, 80.0));
    p.bounds.insert(nodes.reveal, Bounds::new(0.0, 0.0, 100.0, 60.0));
    nodes
}

/// Fires every pending frame once.
fn pump_frames(c: &mut MenuController, p: &mut FakePlatform) {
    let pending = core::mem::take(&mut p.pending_frames);
    for request in pending {
        c.on_frame(request, p).unwrap();
    }
}

#[test]
fn interpolator_properties_hold_for_random_inputs() {
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let a = rng.gen_f32();
        let b = rng.gen_f32();
        assert_eq!(lerp(a, b, 0.0), a);
        assert!((lerp(a, b, 1.0) - b).abs() <= 1e-3);

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let v = rng.gen_f32() * 2.0;
        let clamped = clamp(v, lo, hi);
        assert!(clamped >= lo && clamped <= hi);
        if v >= lo && v <= hi {
            assert_eq!(clamped, v);
        }

        if hi - lo > 1.0 {
            let x = lerp(lo, hi, 0.3);
            assert!((map(x, lo, hi, lo, hi) - x).abs() <= 1e-2);
        }
    }
}

#[test]
fn map_extrapolates_outside_source_range() {
    assert_eq!(map(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
    assert_eq!(map(20.0, 0.0, 10.0, 0.0, 100.0), 200.0);
    assert_eq!(map(50.0, 0.0, 200.0, 0.0, -100.0), -25.0);
}

#[test]
fn pointer_tracker_direction_is_frame_bound() {
    let mut t = PointerTracker::new();
    t.on_pointer_move(Point::new(30.0, 10.0));
    t.on_pointer_move(Point::new(60.0, 20.0));
    assert_eq!(t.cached(), Point::ORIGIN);

    let m = t.advance_frame();
    assert_eq!(m.distance_x, 60.0);
    assert_eq!(m.direction, Point::new(-60.0, -20.0));
    assert_eq!(t.cached(), Point::new(60.0, 20.0));

    t.on_pointer_move(Point::new(400.0, 20.0));
    let m = t.advance_frame();
    assert_eq!(m.distance_x, 100.0);

    let m = t.advance_frame();
    assert_eq!(m.distance_x, 0.0);
    assert_eq!(m.direction, Point::ORIGIN);
}

#[test]
fn animatable_property_steps_toward_target() {
    let mut p = AnimatableProperty::new(0.5);
    p.current = 10.0;
    assert_eq!(p.step(), 5.0);
    assert_eq!(p.step(), 7.5);
    assert_eq!(p.snap(), 10.0);
    assert_eq!(p.previous, 10.0);
}

#[test]
fn stagger_from_index_orders_by_distance() {
    let s = Stagger::from_index(2, 10);
    assert_eq!(s.order(5), vec![2, 1, 3, 0, 4]);
    assert_eq!(s.delay_ms(0, 5), 20);
    assert_eq!(s.delay_ms(4, 5), 20);
    assert_eq!(s.max_delay_ms(5), 20);

    assert_eq!(Stagger::reversed(20).order(3), vec![2, 1, 0]);
    assert_eq!(Stagger::each(20).delay_ms(2, 3), 40);
    assert_eq!(Stagger::None.order(3), vec![0, 1, 2]);
}

#[test]
fn easing_curves_hit_endpoints() {
    for ease in [
        Ease::Linear,
        Ease::QuadIn,
        Ease::SineOut,
        Ease::QuintOut,
        Ease::ExpoOut,
        Ease::Power3In,
    ] {
        assert!(ease.sample(0.0).abs() < 1e-6, "{ease:?}");
        assert!((ease.sample(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
        assert!(ease.sample(0.5) > 0.0 && ease.sample(0.5) < 1.0, "{ease:?}");
    }
}

#[test]
fn timeline_end_accounts_for_stagger_and_defaults() {
    let t = Timeline::new(400, Ease::Linear)
        .add_label("later", 600)
        .tween(
            Tween::to([NodeId(1), NodeId(2), NodeId(3)], [Prop::Opacity(0.0)])
                .stagger(Stagger::each(20)),
            100,
        )
        .cue(Cue::ShowMenu(0), 200);
    assert_eq!(t.label("later"), Some(600));
    assert_eq!(t.label("missing"), None);
    assert_eq!(t.end_ms(), 100 + 40 + 400);
}

#[test]
fn asset_catalog_resolves_numeric_and_named_references() {
    let mut assets: Vec<AssetRef> = (1..=3)
        .map(|i| AssetRef::new(format!("{i}.jpg"), format!("/img/{i}.jpg")))
        .collect();
    assets.push(AssetRef::new("hero.jpg", "/img/hero.jpg"));
    let catalog = AssetCatalog::new(assets);

    assert_eq!(catalog.resolve("img/3.jpg"), Ok(2));
    assert_eq!(catalog.resolve("1.jpg"), Ok(0));
    assert_eq!(catalog.resolve("assets\\img\\2.webp"), Ok(1));
    assert_eq!(catalog.resolve("img/hero.jpg"), Ok(3));

    for bad in ["img/9.jpg", "img/0.jpg", "img/", "villain.png"] {
        assert!(matches!(
            catalog.resolve(bad),
            Err(Error::AssetNotFound { available: 4, .. })
        ));
    }
}

#[test]
fn mount_reports_missing_structure() {
    let mut p = FakePlatform::default();

    let mut markup = build_markup(3, 2);
    markup.back = None;
    let err = MenuController::mount(&markup, catalog(3), RevealerOptions::default(), &mut p)
        .unwrap_err();
    assert_eq!(
        err,
        Error::MissingElement {
            element: "back",
            entry: None
        }
    );

    let mut markup = build_markup(3, 2);
    markup.entries[1].number = None;
    let err = MenuController::mount(&markup, catalog(3), RevealerOptions::default(), &mut p)
        .unwrap_err();
    assert_eq!(
        err,
        Error::MissingElement {
            element: "menu__item-number",
            entry: Some(1)
        }
    );
    assert_eq!(
        err.to_string(),
        "missing required element `menu__item-number` in entry 1"
    );

    let mut markup = build_markup(3, 2);
    markup.contents.pop();
    let err = MenuController::mount(&markup, catalog(3), RevealerOptions::default(), &mut p)
        .unwrap_err();
    assert_eq!(err, Error::EntryCountMismatch { menu: 3, content: 2 });

    let mut markup = build_markup(3, 2);
    markup.contents[2].captions.pop();
    let err = MenuController::mount(&markup, catalog(3), RevealerOptions::default(), &mut p)
        .unwrap_err();
    assert_eq!(
        err,
        Error::GalleryMismatch {
            entry: 2,
            images: 2,
            captions: 1
        }
    );

    let markup = build_markup(3, 2);
    let err = MenuController::mount(&markup, catalog(2), RevealerOptions::default(), &mut p)
        .unwrap_err();
    assert!(matches!(err, Error::AssetNotFound { available: 2, .. }));

    let markup = build_markup(0, 0);
    let err = MenuController::mount(&markup, catalog(1), RevealerOptions::default(), &mut p)
        .unwrap_err();
    assert_eq!(err, Error::EmptyMenu);
}

#[test]
fn mount_clears_loading_and_prepares_previews() {
    let (c, p, markup) = mounted(3);
    let root = markup.root.unwrap();
    assert_eq!(
        p.last_set(root, PropKind::Loading),
        Some(Prop::Loading(false))
    );
    let reveal = c.hover_reveal(1).unwrap().nodes().reveal;
    assert_eq!(
        p.last_set(reveal, PropKind::TransformOrigin),
        Some(Prop::TransformOrigin { x: 0.0, y: 0.0 })
    );
    assert_eq!(c.preview_asset(2).map(|a| a.url.as_str()), Some("/img/3.jpg"));
    assert_eq!(c.phase(), ViewPhase::MenuVisible);
    assert!(c.is_menu_interactive());
    assert!(!c.is_back_interactive());
}

#[test]
fn selecting_an_entry_staggers_from_the_clicked_index() {
    let (mut c, mut p, markup) = mounted(5);
    let numbers: Vec<NodeId> = markup.entries.iter().map(|e| e.number.unwrap()).collect();

    let id = c.select_menu_item(2, &mut p).unwrap();
    assert_eq!(c.phase(), ViewPhase::TransitioningToContent);
    assert_eq!(c.current_item_index(), Some(2));
    assert!(!c.is_menu_interactive());
    assert!(c.is_entry_interactive(2));
    assert!(!c.is_entry_interactive(0));

    let timeline = p.timeline(id).clone();
    let (_, tween) = timeline.tweens_of(numbers[0]).next().unwrap();
    assert_eq!(tween.targets, numbers);
    let touched: Vec<usize> = tween.stagger.order(tween.targets.len());
    assert_eq!(touched, vec![2, 1, 3, 0, 4]);

    assert_eq!(timeline.label("hideMenu"), Some(0));
    assert_eq!(timeline.label("showContent"), Some(300));
    assert_eq!(
        timeline.cues().collect::<Vec<_>>(),
        vec![(300, Cue::ShowContent(2))]
    );

    let hide = c.hover_reveal(2).unwrap().hide_timeline().unwrap();
    c.on_animator_event(AnimatorEvent::Completed(hide), &mut p)
        .unwrap();
    assert!(!c.is_entry_interactive(2));

    finish(&mut c, &mut p, id);
    assert_eq!(c.state(), ViewState::ContentVisible { index: 2 });
    assert_eq!(c.active_content(), Some(2));
    assert!(c.is_back_interactive());
    for i in 0..5 {
        let el = c.content(i).unwrap().element();
        let active = p.last_set(el, PropKind::Active);
        if i == 2 {
            assert_eq!(active, Some(Prop::Active(true)));
        } else {
            assert_ne!(active, Some(Prop::Active(true)));
        }
    }
}

#[test]
fn every_entry_settles_into_its_own_content() {
    for i in 0..4 {
        let (mut c, mut p, _) = mounted(4);
        select_and_settle(&mut c, &mut p, i);
        assert_eq!(c.state(), ViewState::ContentVisible { index: i });
        assert_eq!(c.active_content(), Some(i));
        assert!(c.is_back_interactive());
        assert!(!c.is_menu_interactive());
    }
}

#[test]
fn going_back_restores_the_menu_and_remembers_the_selection() {
    let (mut c, mut p, markup) = mounted(5);
    select_and_settle(&mut c, &mut p, 3);

    let id = c.go_back(&mut p).unwrap();
    assert_eq!(c.phase(), ViewPhase::TransitioningToMenu);
    assert!(!c.is_back_interactive());
    assert_eq!(
        p.last_set(markup.back.unwrap(), PropKind::PointerEvents),
        Some(Prop::PointerEvents(false))
    );

    let timeline = p.timeline(id).clone();
    assert_eq!(timeline.label("showMenu"), Some(600));
    let images = c.content(3).unwrap().images().to_vec();
    let (step, tween) = timeline.tweens_of(images[0]).next().unwrap();
    assert_eq!(step.at_ms, 100);
    assert_eq!(tween.stagger.order(images.len()), vec![2, 1, 0]);

    finish(&mut c, &mut p, id);
    assert_eq!(c.state(), ViewState::MenuVisible);
    assert_eq!(c.active_content(), None);
    assert_eq!(c.current_item_index(), Some(3));
    assert!(c.is_menu_interactive());
    assert!(!c.is_back_interactive());
    for i in 0..5 {
        assert!(c.is_entry_interactive(i));
    }
    assert_eq!(
        p.last_set(c.content(3).unwrap().element(), PropKind::Active),
        Some(Prop::Active(false))
    );
}

#[test]
fn transitions_are_rejected_outside_their_source_state() {
    let (mut c, mut p, _) = mounted(3);
    assert!(matches!(
        c.go_back(&mut p),
        Err(Error::InvalidTransition {
            phase: ViewPhase::MenuVisible,
            ..
        })
    ));
    assert_eq!(
        c.select_menu_item(7, &mut p),
        Err(Error::IndexOutOfRange { index: 7, count: 3 })
    );

    let id = c.select_menu_item(0, &mut p).unwrap();
    let played = p.played.len();
    assert!(matches!(
        c.select_menu_item(1, &mut p),
        Err(Error::InvalidTransition {
            phase: ViewPhase::TransitioningToContent,
            ..
        })
    ));
    assert!(c.go_back(&mut p).is_err());
    assert_eq!(p.played.len(), played);
    assert_eq!(c.current_item_index(), Some(0));

    finish(&mut c, &mut p, id);
    assert!(c.select_menu_item(1, &mut p).is_err());
}

#[test]
fn stale_cues_and_completions_are_ignored() {
    let (mut c, mut p, _) = mounted(3);
    c.on_animator_event(
        AnimatorEvent::Cue {
            timeline: TimelineId(999),
            cue: Cue::ShowContent(1),
        },
        &mut p,
    )
    .unwrap();
    c.on_animator_event(AnimatorEvent::Completed(TimelineId(999)), &mut p)
        .unwrap();
    assert_eq!(c.active_content(), None);
    assert_eq!(c.state(), ViewState::MenuVisible);
}

#[test]
fn failed_selection_rolls_back() {
    let (mut c, mut p, markup) = mounted(3);
    p.fail_play = true;

    let err = c.select_menu_item(1, &mut p).unwrap_err();
    assert!(matches!(err, Error::Animator(_)));
    assert_eq!(c.state(), ViewState::MenuVisible);
    assert_eq!(c.current_item_index(), None);
    assert!(c.is_menu_interactive());
    assert!(c.is_entry_interactive(1));
    assert_eq!(
        p.last_set(markup.menu.unwrap(), PropKind::PointerEvents),
        Some(Prop::PointerEvents(true))
    );

    p.fail_play = false;
    select_and_settle(&mut c, &mut p, 1);
    p.fail_play = true;
    assert!(c.go_back(&mut p).is_err());
    assert_eq!(c.state(), ViewState::ContentVisible { index: 1 });
    assert!(c.is_back_interactive());
}

#[test]
fn failed_selection_resumes_the_hover_session() {
    let (mut c, mut p, _) = mounted(3);
    place_entry(&mut p, &c, 1);
    c.on_pointer_enter(1, &mut p).unwrap();
    pump_frames(&mut c, &mut p);
    assert!(c.hover_reveal(1).unwrap().is_hovering());

    // The preview hide plays, the transition itself fails.
    p.fail_attempt = Some(p.play_attempts + 1);
    let err = c.select_menu_item(1, &mut p).unwrap_err();
    assert!(matches!(err, Error::Animator(_)));

    let reveal = c.hover_reveal(1).unwrap();
    assert!(reveal.is_hovering());
    assert!(reveal.pending_frame().is_some());
    assert!(reveal.hide_timeline().is_none());
    assert!(reveal.show_timeline().is_some());
    assert_eq!(c.state(), ViewState::MenuVisible);
    assert!(c.is_entry_interactive(1));

    let frames = p.frames_requested;
    pump_frames(&mut c, &mut p);
    assert_eq!(p.frames_requested, frames + 1);
}

#[test]
fn hover_loop_stops_after_leave() {
    let (mut c, mut p, _) = mounted(3);
    place_entry(&mut p, &c, 0);

    c.on_pointer_enter(0, &mut p).unwrap();
    assert!(c.hover_reveal(0).unwrap().is_hovering());
    for _ in 0..5 {
        pump_frames(&mut c, &mut p);
    }
    assert_eq!(p.frames_requested, 6);
    let stale = c.hover_reveal(0).unwrap().pending_frame().unwrap();

    c.on_pointer_leave(0, &mut p).unwrap();
    assert_eq!(c.hover_reveal(0).unwrap().pending_frame(), None);
    assert!(p.pending_frames.is_empty());

    c.on_frame(stale, &mut p).unwrap();
    pump_frames(&mut c, &mut p);
    assert_eq!(p.frames_requested, 6);
}

#[test]
fn entering_twice_keeps_a_single_frame_loop() {
    let (mut c, mut p, _) = mounted(2);
    place_entry(&mut p, &c, 1);

    let first = c.hover_reveal(1).map(|r| r.phase());
    assert_eq!(first, Some(HoverPhase::Idle));

    c.on_pointer_enter(1, &mut p).unwrap();
    let show = c.hover_reveal(1).unwrap().show_timeline().unwrap();
    c.on_pointer_enter(1, &mut p).unwrap();

    assert_eq!(p.frames_requested, 1);
    assert_eq!(p.pending_frames.len(), 1);
    assert!(p.cancelled.contains(&show));
    assert_ne!(c.hover_reveal(1).unwrap().show_timeline(), Some(show));
}

#[test]
fn leaving_while_idle_reuses_the_pending_hide() {
    let (mut c, mut p, _) = mounted(2);
    place_entry(&mut p, &c, 0);
    c.on_pointer_enter(0, &mut p).unwrap();

    let id = c.select_menu_item(0, &mut p).unwrap();
    let hide = c.hover_reveal(0).unwrap().hide_timeline().unwrap();
    let played = p.played.len();

    // The pointer leaves the clicked entry while the transition runs.
    c.on_pointer_leave(0, &mut p).unwrap();
    assert_eq!(p.played.len(), played);
    assert_eq!(c.hover_reveal(0).unwrap().hide_timeline(), Some(hide));
    assert_ne!(hide, id);
}

#[test]
fn hover_is_ignored_while_the_menu_is_disabled() {
    let (mut c, mut p, _) = mounted(3);
    select_and_settle(&mut c, &mut p, 0);
    let played = p.played.len();
    c.on_pointer_enter(1, &mut p).unwrap();
    assert_eq!(p.played.len(), played);
    assert!(!c.hover_reveal(1).unwrap().is_hovering());
}

#[test]
fn preview_converges_toward_pointer_without_overshoot() {
    let (mut c, mut p, _) = mounted(3);
    let nodes = place_entry(&mut p, &c, 0);

    c.on_pointer_move(Point::new(0.0, 0.0));
    c.on_pointer_enter(0, &mut p).unwrap();
    pump_frames(&mut c, &mut p);
    // First frame snaps: |0 - 0| - 100 / 2.
    assert_eq!(p.xs_of(nodes.reveal), vec![-50.0]);
    assert_eq!(p.rotations_of(nodes.reveal), vec![0.0]);

    for step in 1..=10 {
        let t = step as f32 / 10.0;
        c.on_pointer_move(Point::new(100.0 * t, 50.0 * t));
        pump_frames(&mut c, &mut p);
    }
    for _ in 0..300 {
        pump_frames(&mut c, &mut p);
    }

    let target_x = 100.0 - 50.0;
    let xs = p.xs_of(nodes.reveal);
    for pair in xs.windows(2) {
        assert!(pair[1] >= pair[0] - 1e-4, "x went backwards: {pair:?}");
    }
    assert!(xs.iter().all(|&x| x <= target_x + 1e-3));
    assert!((xs.last().unwrap() - target_x).abs() < 0.01);

    let props = c.properties();
    assert_eq!(props.tx.current, target_x);
    assert_eq!(props.ty.current, 50.0 - 30.0);
    assert!((props.ty.previous - 20.0).abs() < 0.01);
}

#[test]
fn rotation_leans_against_pointer_motion() {
    let (mut c, mut p, _) = mounted(1);
    let nodes = place_entry(&mut p, &c, 0);

    c.on_pointer_enter(0, &mut p).unwrap();
    pump_frames(&mut c, &mut p);

    c.on_pointer_move(Point::new(80.0, 0.0));
    pump_frames(&mut c, &mut p);
    // Moving right: direction.x < 0, so the target is map(80, 0, 200, 0, -100).
    assert_eq!(c.properties().rotation.current, -40.0);
    let r = *p.rotations_of(nodes.reveal).last().unwrap();
    assert!(r < 0.0 && r > -40.0);

    c.on_pointer_move(Point::new(20.0, 0.0));
    pump_frames(&mut c, &mut p);
    assert_eq!(c.properties().rotation.current, 30.0);
}

#[test]
fn missing_layout_stops_the_loop_with_an_error() {
    let (mut c, mut p, _) = mounted(1);
    c.on_pointer_enter(0, &mut p).unwrap();
    let request = p.pending_frames[0];
    let trigger = c.hover_reveal(0).unwrap().nodes().trigger;
    assert_eq!(
        c.on_frame(request, &mut p),
        Err(Error::LayoutUnavailable(trigger))
    );
    assert_eq!(c.hover_reveal(0).unwrap().pending_frame(), None);
}

#[test]
fn more_hover_fans_out_title_characters() {
    let (mut c, mut p, markup) = mounted(2);
    select_and_settle(&mut c, &mut p, 1);

    let caption = &markup.contents[1].captions[2];
    let img = markup.contents[1].images[2];
    let id = c.on_more_enter(1, 2, &mut p).unwrap();

    let killed = p.killed.last().unwrap();
    assert_eq!(killed[0], img);
    assert_eq!(&killed[1..], caption.title_chars.as_slice());

    let timeline = p.timeline(id).clone();
    assert_eq!(timeline.default_duration_ms, 1000);
    for (i, ch) in caption.title_chars.iter().enumerate() {
        let (step, tween) = timeline.tweens_of(*ch).next().unwrap();
        assert_eq!(step.at_ms, 0);
        assert_eq!(tween.props, vec![Prop::X(Length::Px(i as f32 * 2.0))]);
    }
    let (_, tween) = timeline.tweens_of(img).next().unwrap();
    assert_eq!(tween.props, vec![Prop::Scale(0.95)]);

    let id = c.on_more_leave(1, 2, &mut p).unwrap();
    let timeline = p.timeline(id);
    assert_eq!(timeline.default_duration_ms, 500);
    let (_, tween) = timeline.tweens_of(caption.title_chars[3]).next().unwrap();
    assert_eq!(tween.props, vec![Prop::X(Length::Px(0.0))]);

    assert_eq!(
        c.on_more_enter(1, 9, &mut p),
        Err(Error::IndexOutOfRange { index: 9, count: 3 })
    );
}

#[test]
fn selected_entry_cannot_be_hovered_again_mid_transition() {
    let (mut c, mut p, _) = mounted(3);
    place_entry(&mut p, &c, 0);
    c.on_pointer_enter(0, &mut p).unwrap();

    let id = c.select_menu_item(0, &mut p).unwrap();
    let hide = c.hover_reveal(0).unwrap().hide_timeline().unwrap();
    c.on_pointer_enter(0, &mut p).unwrap();
    assert!(!c.hover_reveal(0).unwrap().is_hovering());
    assert!(!p.cancelled.contains(&hide));
    assert!(p.pending_frames.is_empty());

    c.on_animator_event(AnimatorEvent::Completed(hide), &mut p)
        .unwrap();
    finish(&mut c, &mut p, id);
    assert_eq!(c.state(), ViewState::ContentVisible { index: 0 });
    assert!(!c.is_entry_interactive(0));

    c.on_pointer_enter(0, &mut p).unwrap();
    assert!(!c.hover_reveal(0).unwrap().is_hovering());
    assert_eq!(c.hover_reveal(0).unwrap().pending_frame(), None);
}

#[test]
fn hovered_entry_is_lifted_by_the_asset_count() {
    let markup = build_markup(3, 3);
    let mut p = FakePlatform::default();
    let mut c =
        MenuController::mount(&markup, catalog(5), RevealerOptions::default(), &mut p).unwrap();
    c.on_pointer_enter(0, &mut p).unwrap();

    let show = c.hover_reveal(0).unwrap().show_timeline().unwrap();
    let trigger = c.hover_reveal(0).unwrap().nodes().trigger;
    let lifted = p.timeline(show).steps().iter().any(|s| {
        matches!(&s.step, Step::Set { targets, props }
            if targets.contains(&trigger) && props.contains(&Prop::ZIndex(5)))
    });
    assert!(lifted);
}

#[test]
fn default_smoothing_rates_come_from_options() {
    let o = RevealerOptions::default();
    let props = AnimatableProperties::default();
    assert_eq!(props.tx.amt, o.tx_amt);
    assert_eq!(props.ty.amt, o.ty_amt);
    assert_eq!(props.rotation.amt, o.rotation_amt);
}
