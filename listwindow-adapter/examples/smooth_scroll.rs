use listwindow::{
    HandleSlot, HeaderInfo, Item, ItemHeights, ListWindow, ListWindowOptions, ViewFactory,
};
use listwindow_adapter::{Easing, ScrollCoordinator, ScrollOptions};

fn main() {
    // Example: a frame loop driving a smooth scroll-to-album while the "scroll container" is just a
    // number.
    //
    // An adapter would:
    // - forward user scroll samples to on_scroll_position_changed
    // - call tick(now_ms) each frame while animating
    // - write the returned offset back into the real scroll container
    struct Labels;

    impl ViewFactory<String> for Labels {
        type Handle = String;
        type Error = core::convert::Infallible;

        fn construct(&mut self, slot: HandleSlot, item: &Item<String>) -> Result<String, Self::Error> {
            Ok(match item.header_info() {
                Some(info) => format!("[{}] {}", slot.index, info.title),
                None => format!("{} {}", slot.index, item.payload().map_or("", |s| s.as_str())),
            })
        }

        fn destroy(&mut self, _handle: String) {}
    }

    let heights = ItemHeights::default();
    let mut items = Vec::new();
    for album in 0..50 {
        items.push(Item::header(
            HeaderInfo::new(format!("album-{album}"), format!("Album {album}")).with_counts(10, 12),
            &heights,
        ));
        for track in 0..12 {
            items.push(Item::row(format!("Track {track}"), album * 12 + track, &heights));
        }
    }

    let mut window = ListWindow::new(
        Labels,
        ListWindowOptions::new().with_viewport_extent(480.0),
    );
    window.set_items(items);

    let mut c = ScrollCoordinator::new(
        window,
        ScrollOptions::new()
            .with_smooth_duration_ms(240)
            .with_easing(Easing::EaseInOutCubic),
    );

    let target = c.scroll_to_index(13 * 25, true, 0);
    println!("target offset={} normalized={}", target.offset, target.normalized);

    let mut now_ms = 0u64;
    while let Some(step) = c.tick(now_ms) {
        let range = c.window().visible_range();
        println!(
            "t={now_ms} off={:.1} churn={} range={}..{}",
            step.offset,
            step.report.churn(),
            range.start_index,
            range.end_index
        );
        now_ms += 16;
    }

    let first = c.window().visible_range().start_index;
    println!("done: off={} first={:?}", c.window().scroll_offset(), c.window().handle(first));
}
