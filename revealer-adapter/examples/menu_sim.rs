use revealer::{
    AssetCatalog, AssetRef, Bounds, CaptionMarkup, ContentMarkup, MenuEntryMarkup, MenuMarkup,
    NodeId, Point, RevealerOptions,
};
use revealer_adapter::Runtime;

fn main() -> revealer::Result<()> {
    // Example: a headless run of the menu with no UI at all.
    //
    // An adapter would:
    // - build the markup from its element tree and report when images/fonts have loaded
    // - forward pointer events and clicks
    // - call tick(now_ms) every animation frame
    // - copy `stage().animator.style(node)` onto its real elements
    let mut next = 0u32;
    let mut id = || {
        next += 1;
        NodeId(next)
    };

    let mut markup = MenuMarkup {
        root: Some(id()),
        menu: Some(id()),
        back: Some(id()),
        ..MenuMarkup::default()
    };
    for i in 0..4 {
        markup.entries.push(MenuEntryMarkup {
            el: Some(id()),
            inner: Some(id()),
            number: Some(id()),
            reveal: Some(id()),
            reveal_inner: Some(id()),
            reveal_image: Some(id()),
            image: Some(format!("img/{}.jpg", i + 1)),
        });
        let mut content = ContentMarkup {
            el: Some(id()),
            title: Some(id()),
            number: Some(id()),
            ..ContentMarkup::default()
        };
        for _ in 0..3 {
            content.images.push(id());
            content.captions.push(CaptionMarkup {
                title: Some(id()),
                meta: Some(id()),
                more: Some(id()),
                title_chars: (0..6).map(|_| id()).collect(),
            });
        }
        markup.contents.push(content);
    }

    let catalog = AssetCatalog::new(
        (1..=4).map(|i| AssetRef::new(format!("{i}.jpg"), format!("/img/{i}.jpg"))),
    );
    let trigger = markup.entries[1].el;
    let reveal = markup.entries[1].reveal;

    let mut rt = Runtime::new(markup, catalog, RevealerOptions::default())?;
    rt.assets_ready()?;
    rt.fonts_ready()?;
    println!("mounted={}", rt.is_mounted());

    if let (Some(trigger), Some(reveal)) = (trigger, reveal) {
        rt.layout_mut()
            .insert(trigger, Bounds::new(0.0, 120.0, 600.0, 90.0));
        rt.layout_mut()
            .insert(reveal, Bounds::new(0.0, 0.0, 250.0, 320.0));

        rt.on_pointer_move(Point::new(40.0, 150.0));
        rt.on_pointer_enter(1)?;
        let mut now_ms = 0u64;
        for step in 0..30 {
            now_ms += 16;
            rt.on_pointer_move(Point::new(40.0 + step as f32 * 12.0, 150.0));
            rt.tick(now_ms)?;
            if step % 5 == 0 {
                let style = rt.stage().animator.style(reveal);
                println!(
                    "t={now_ms} x={:?} y={:?} rotation={:.2}",
                    style.x, style.y, style.rotation
                );
            }
        }
        rt.on_pointer_leave(1)?;

        rt.on_menu_click(1)?;
        while now_ms < 3_000 {
            now_ms += 16;
            rt.tick(now_ms)?;
        }
        if let Some(c) = rt.controller() {
            println!("t={now_ms} state={:?}", c.state());
        }

        rt.on_back_click()?;
        while now_ms < 6_000 {
            now_ms += 16;
            rt.tick(now_ms)?;
        }
        if let Some(c) = rt.controller() {
            println!("t={now_ms} state={:?}", c.state());
        }
    }
    Ok(())
}
