// Example: a grouped playlist (album headers + tracks) driven by a console "view layer".
use std::sync::Arc;

use listwindow::{
    HandleSlot, HeaderInfo, Item, ItemHeights, ItemKind, ListWindow, ListWindowOptions,
    ViewFactory, WindowRange,
};

/// Read-only assets shared by every view, injected at construction.
#[derive(Debug)]
struct Placeholders {
    cover: &'static str,
}

#[derive(Debug)]
enum View {
    Track { title: String, y: f32 },
    Header { title: String, cover: &'static str },
}

struct ConsoleViews {
    placeholders: Arc<Placeholders>,
    live: usize,
}

impl ViewFactory<String> for ConsoleViews {
    type Handle = View;
    type Error = String;

    fn construct(&mut self, slot: HandleSlot, item: &Item<String>) -> Result<View, String> {
        self.live += 1;
        Ok(match item.kind() {
            ItemKind::Row { payload, .. } => View::Track {
                title: payload.clone(),
                y: slot.start,
            },
            ItemKind::SectionHeader(info) => View::Header {
                title: format!("{} ({})", info.title, info.stats_text()),
                cover: self.placeholders.cover,
            },
        })
    }

    fn destroy(&mut self, handle: View) {
        self.live -= 1;
        drop(handle);
    }
}

fn main() {
    let heights = ItemHeights::default();
    let mut items = Vec::new();
    for album in 0..20 {
        items.push(Item::header(
            HeaderInfo::new(format!("album-{album}"), format!("Album {album}")).with_counts(8, 8),
            &heights,
        ));
        for track in 0..8 {
            let original = album * 8 + track;
            items.push(Item::row(format!("Track {original}"), original, &heights));
        }
    }

    let views = ConsoleViews {
        placeholders: Arc::new(Placeholders { cover: "placeholder.png" }),
        live: 0,
    };
    let options = ListWindowOptions::new()
        .with_buffer_count(2)
        .with_viewport_extent(400.0)
        .with_on_visible_range_changed(Some(|r: WindowRange| {
            println!("visible range -> {}..{}", r.start_index, r.end_index)
        }));
    let mut list = ListWindow::new(views, options);

    let report = list.set_items(items);
    println!(
        "total={} created={} live={}",
        list.total_extent(),
        report.created,
        list.factory().live
    );

    for offset in [0.0, 35.0, 500.0, 2_000.0, 10_000.0] {
        let report = list.set_scroll_offset(offset);
        let first = list.visible_range().start_index;
        println!(
            "offset={offset} churn={} first={:?}",
            report.churn(),
            list.handle(first)
        );
    }

    println!("scroll position for album 10: {}", list.normalized_for_index(90));
}
