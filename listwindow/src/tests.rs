use crate::*;

use alloc::collections::BTreeSet;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

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

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_height(&mut self, min: u64, max_exclusive: u64) -> f32 {
        self.gen_range_u64(min, max_exclusive) as f32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Construct { index: usize, version: u64 },
    Destroy { index: usize, version: u64 },
    Update { index: usize },
}

#[derive(Debug)]
struct TestHandle {
    index: usize,
    version: u64,
    serial: u64,
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<Event>,
    failing: BTreeSet<usize>,
    next_serial: u64,
    live: usize,
    peak_live: usize,
}

impl Recorder {
    fn failing(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            failing: indices.into_iter().collect(),
            ..Self::default()
        }
    }

    fn take_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    fn constructed(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Construct { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    fn destroyed(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Destroy { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }
}

impl ViewFactory<u32> for Recorder {
    type Handle = TestHandle;
    type Error = &'static str;

    fn construct(&mut self, slot: HandleSlot, _item: &Item<u32>) -> Result<TestHandle, &'static str> {
        if self.failing.contains(&slot.index) {
            return Err("construct failed");
        }
        self.events.push(Event::Construct {
            index: slot.index,
            version: slot.version,
        });
        self.next_serial += 1;
        self.live += 1;
        self.peak_live = self.peak_live.max(self.live);
        Ok(TestHandle {
            index: slot.index,
            version: slot.version,
            serial: self.next_serial,
        })
    }

    fn destroy(&mut self, handle: TestHandle) {
        self.live -= 1;
        self.events.push(Event::Destroy {
            index: handle.index,
            version: handle.version,
        });
    }

    fn update(&mut self, handle: &mut TestHandle, _item: &Item<u32>) {
        self.events.push(Event::Update {
            index: handle.index,
        });
    }
}

fn rows(n: usize, height: f32) -> Vec<Item<u32>> {
    let heights = ItemHeights::uniform(height);
    (0..n).map(|i| Item::row(i as u32, i, &heights)).collect()
}

fn items_with_heights(heights: &[f32]) -> Vec<Item<u32>> {
    heights
        .iter()
        .enumerate()
        .map(|(i, &h)| {
            Item::with_height(
                ItemKind::Row {
                    payload: i as u32,
                    original_index: i,
                },
                h,
            )
        })
        .collect()
}

fn window(buffer_count: usize, viewport: f32) -> ListWindow<u32, Recorder> {
    ListWindow::new(
        Recorder::default(),
        ListWindowOptions::new()
            .with_buffer_count(buffer_count)
            .with_viewport_extent(viewport),
    )
}

#[test]
fn offset_index_matches_prefix_sums() {
    let mut rng = Lcg::new(0xC0FFEE);
    for _ in 0..50 {
        let n = rng.gen_range_usize(0, 200);
        let heights: Vec<f32> = (0..n).map(|_| rng.gen_height(0, 150)).collect();
        let model = ListModel::new(items_with_heights(&heights));

        let mut expected = 0.0f32;
        for (i, &h) in heights.iter().enumerate() {
            assert_eq!(model.offset_at(i), Some(expected));
            assert_eq!(model.height_at(i), Some(h));
            expected += h;
        }
        assert_eq!(model.total_extent(), expected);
        if n > 0 {
            assert_eq!(
                model.total_extent(),
                model.offset_at(n - 1).unwrap() + heights[n - 1]
            );
        }
        assert_eq!(model.offset_at(n), None);
    }
}

#[test]
fn empty_model_degrades_to_empty_ranges() {
    let model = ListModel::<u32>::default();
    assert_eq!(model.total_extent(), 0.0);
    assert_eq!(model.count(), 0);
    assert_eq!(model.item_at(0), None);
    assert_eq!(model.clamp_index(5), None);
    assert_eq!(model.index_at_offset(10.0), None);
    assert_eq!(
        compute_visible_range(model.offsets(), 0.0, 500.0, 3),
        WindowRange::EMPTY
    );
    assert_eq!(
        compute_visible_range(model.offsets(), 1000.0, 0.0, 0),
        WindowRange::EMPTY
    );
}

#[test]
fn visible_range_contains_item_under_scroll_offset() {
    let mut rng = Lcg::new(42);
    for _ in 0..40 {
        let n = rng.gen_range_usize(1, 120);
        let heights: Vec<f32> = (0..n).map(|_| rng.gen_height(0, 100)).collect();
        let model = ListModel::new(items_with_heights(&heights));
        let offsets = model.offsets();

        for i in 0..n {
            let lo = offsets.start_of(i).unwrap();
            let hi = offsets.end_of(i).unwrap();
            if hi <= lo {
                // Zero-height items own no scroll offsets.
                continue;
            }
            let viewport = rng.gen_height(1, 400);
            for scroll in [lo, (lo + hi) / 2.0] {
                let r = compute_visible_range(offsets, scroll, viewport, 0);
                assert!(
                    r.contains(i),
                    "range {r:?} misses {i} (scroll={scroll}, viewport={viewport})"
                );
            }
        }
    }
}

#[test]
fn fixed_rows_scenario_range_and_creates() {
    let mut w = window(1, 180.0);
    let report = w.set_items(rows(10, 60.0));

    assert_eq!(w.visible_range(), WindowRange::new(0, 4));
    assert_eq!(report.created, 4);
    assert_eq!(report.destroyed, 0);
    assert_eq!(w.factory().constructed(), [0, 1, 2, 3]);
    assert_eq!(w.active_indices().collect::<Vec<_>>(), [0, 1, 2, 3]);
}

#[test]
fn scrolled_past_header_starts_at_first_row() {
    let heights = ItemHeights::default().with_header(100.0, 100.0);
    let mut items = alloc::vec![Item::header(HeaderInfo::new("album-1", "Album"), &heights)];
    items.extend((0..5).map(|i| Item::row(i as u32, i, &heights)));
    let model = ListModel::new(items);

    let r = compute_visible_range(model.offsets(), 100.0, 150.0, 0);
    assert_eq!(r.start_index, 1);
    assert_eq!(r, WindowRange::new(1, 4));
}

#[test]
fn set_items_destroys_old_handles_before_creating_new_ones() {
    let mut w = window(1, 180.0);
    w.set_items(rows(10, 60.0));
    w.factory_mut().take_events();

    let report = w.set_items(rows(6, 60.0));
    assert_eq!(report.destroyed, 4);
    assert_eq!(report.created, 4);

    let events = w.factory_mut().take_events();
    assert_eq!(events.len(), 8);
    for (i, e) in events[..4].iter().enumerate() {
        assert_eq!(*e, Event::Destroy { index: i, version: 1 });
    }
    for e in &events[4..] {
        assert!(matches!(e, Event::Construct { version: 2, .. }), "{e:?}");
    }
}

#[test]
fn normalized_position_for_last_index_is_clamped() {
    let mut w = window(1, 180.0);
    w.set_items(rows(10, 60.0));
    assert_eq!(w.total_extent(), 600.0);
    assert_eq!(w.max_scroll_offset(), 420.0);
    assert_eq!(w.normalized_for_index(9), 1.0);
    assert_eq!(w.normalized_for_index(999), 1.0);
    assert_eq!(w.normalized_for_index(0), 0.0);
    assert_eq!(w.normalized_for_index(7), 1.0);
    assert_eq!(w.normalized_for_index(2), 120.0 / 420.0);
}

#[test]
fn normalized_position_is_zero_when_content_fits() {
    let mut w = window(0, 1000.0);
    w.set_items(rows(3, 60.0));
    assert_eq!(w.max_scroll_offset(), 0.0);
    assert_eq!(w.normalized_for_index(2), 0.0);
    assert_eq!(w.normalized_position(), 0.0);
    assert_eq!(w.offset_for_normalized(1.0), 0.0);
}

#[test]
fn reconcile_same_range_is_a_noop() {
    let model = ListModel::new(rows(50, 10.0));
    let mut out = Vec::new();
    for (s, e) in [(0, 0), (0, 5), (10, 30), (45, 50)] {
        let r = WindowRange::new(s, e);
        collect_instructions(&model, r, r, &mut out);
        assert!(out.is_empty());
    }
}

#[test]
fn reconcile_emits_destroys_before_creates() {
    let model = ListModel::new(rows(20, 10.0));
    let mut out = Vec::new();
    collect_instructions(&model, WindowRange::new(2, 6), WindowRange::new(4, 9), &mut out);

    let kinds: Vec<(bool, usize)> = out
        .iter()
        .map(|ins| (matches!(ins, Instruction::Create(..)), ins.index()))
        .collect();
    assert_eq!(
        kinds,
        [(false, 2), (false, 3), (true, 6), (true, 7), (true, 8)]
    );
    match out[2] {
        Instruction::Create(index, item) => {
            assert_eq!(index, 6);
            assert_eq!(item.payload(), Some(&6));
        }
        Instruction::Destroy(_) => panic!("expected create"),
    }
}

#[test]
fn small_scroll_steps_have_bounded_churn() {
    let mut rng = Lcg::new(7);
    for _ in 0..20 {
        let n = rng.gen_range_usize(20, 150);
        let heights: Vec<f32> = (0..n).map(|_| rng.gen_height(20, 120)).collect();
        let min_height = heights.iter().copied().fold(f32::MAX, f32::min);
        let buffer = rng.gen_range_usize(0, 4);
        let viewport = rng.gen_height(50, 500);

        let mut w = window(buffer, viewport);
        w.set_items(items_with_heights(&heights));

        let mut offset = 0.0f32;
        for _ in 0..200 {
            let step = (rng.gen_range_u64(1, 100) as f32 / 100.0) * (min_height - 1.0);
            offset = (offset + step).min(w.total_extent());
            let report = w.set_scroll_offset(offset);
            assert!(
                report.churn() <= 2 * buffer + 2,
                "churn {} with buffer {buffer}",
                report.churn()
            );
        }
    }
}

#[test]
fn jump_keeps_peak_live_handles_within_window_size() {
    let mut w = window(2, 300.0);
    w.set_items(rows(1000, 30.0));
    let before = w.active_len();

    w.set_scroll_offset(15_000.0);
    let after = w.active_len();
    assert_eq!(w.factory().peak_live, before.max(after));

    let range = w.visible_range();
    assert_eq!(range, WindowRange::new(498, 512));
    assert_eq!(w.active_indices().collect::<Vec<_>>(), range.indices().collect::<Vec<_>>());
}

#[test]
fn overlapping_scroll_does_not_recreate_remaining_handles() {
    let mut w = window(0, 100.0);
    w.set_items(rows(20, 50.0));
    let serial_of_1 = w.handle(1).map(|h| h.serial);
    w.factory_mut().take_events();

    w.set_scroll_offset(50.0);
    assert_eq!(w.visible_range(), WindowRange::new(1, 3));
    assert_eq!(w.handle(1).map(|h| h.serial), serial_of_1);
    assert_eq!(w.factory().destroyed(), [0]);
    assert_eq!(w.factory().constructed(), [2]);
}

#[test]
fn zero_viewport_materializes_single_item_plus_buffer() {
    let mut w = window(1, 0.0);
    w.set_items(rows(10, 60.0));
    assert_eq!(w.visible_range(), WindowRange::new(0, 2));

    w.set_scroll_offset(130.0);
    assert_eq!(w.visible_range(), WindowRange::new(1, 4));
}

#[test]
fn scrolling_past_the_end_keeps_the_last_item() {
    let model = ListModel::new(rows(10, 60.0));
    let r = compute_visible_range(model.offsets(), 10_000.0, 180.0, 0);
    assert_eq!(r, WindowRange::new(9, 10));

    let r = compute_visible_range(model.offsets(), -50.0, 100.0, 0);
    assert_eq!(r, WindowRange::new(0, 1));

    let r = compute_visible_range(model.offsets(), f32::NAN, 100.0, 0);
    assert_eq!(r, WindowRange::new(0, 2));
}

#[test]
fn failed_construction_is_isolated_and_retried_next_pass() {
    let mut w = ListWindow::new(
        Recorder::failing([2]),
        ListWindowOptions::new()
            .with_buffer_count(0)
            .with_viewport_extent(240.0),
    );
    let report = w.set_items(rows(10, 60.0));

    assert_eq!(report.created, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 2);
    assert_eq!(report.failures[0].error, "construct failed");
    assert_eq!(w.active_indices().collect::<Vec<_>>(), [0, 1, 3]);
    assert_eq!(w.unrenderable_indices().collect::<Vec<_>>(), [2]);

    // Same window, host fixed: the failed index is retried exactly once.
    w.factory_mut().failing.clear();
    w.factory_mut().take_events();
    let report = w.refresh();
    assert_eq!(report.created, 1);
    assert!(report.failures.is_empty());
    assert_eq!(w.factory().constructed(), [2]);
    assert_eq!(w.unrenderable_indices().count(), 0);
}

#[test]
fn failed_index_leaving_the_window_is_forgotten() {
    let mut w = ListWindow::new(
        Recorder::failing([0]),
        ListWindowOptions::new()
            .with_buffer_count(0)
            .with_viewport_extent(120.0),
    );
    w.set_items(rows(10, 60.0));
    assert_eq!(w.unrenderable_indices().collect::<Vec<_>>(), [0]);

    let report = w.set_scroll_offset(300.0);
    assert!(report.failures.is_empty());
    assert_eq!(report.destroyed, 1);
    assert_eq!(w.unrenderable_indices().count(), 0);
}

#[test]
fn stale_release_is_ignored_and_released_index_is_rebuilt() {
    let mut w = window(0, 180.0);
    w.set_items(rows(10, 60.0));
    w.factory_mut().take_events();

    assert!(!w.release(9));
    assert!(w.factory().events.is_empty());

    assert!(w.release(1));
    assert!(!w.release(1));
    assert_eq!(w.factory().destroyed(), [1]);
    assert!(w.handle(1).is_none());

    w.refresh();
    assert!(w.handle(1).is_some());
    assert_eq!(w.factory().constructed(), [1]);
}

#[test]
fn pause_defers_reconciliation_until_resumed() {
    let mut w = window(0, 120.0);
    w.set_items(rows(20, 60.0));
    w.factory_mut().take_events();

    assert!(w.set_paused(true).is_noop());
    let report = w.set_scroll_offset(600.0);
    assert!(report.is_noop());
    assert!(w.factory().events.is_empty());
    assert_eq!(w.visible_range(), WindowRange::new(0, 2));

    let report = w.set_paused(false);
    assert_eq!(report.destroyed, 2);
    assert_eq!(report.created, 2);
    assert_eq!(w.visible_range(), WindowRange::new(10, 12));
}

#[test]
fn visible_range_changed_fires_only_on_change() {
    let seen = Arc::new(Mutex::new(Vec::<WindowRange>::new()));
    let sink = Arc::clone(&seen);
    let mut w = ListWindow::new(
        Recorder::default(),
        ListWindowOptions::new()
            .with_buffer_count(0)
            .with_viewport_extent(100.0)
            .with_on_visible_range_changed(Some(move |r: WindowRange| sink.lock().unwrap().push(r))),
    );

    w.set_items(rows(10, 50.0));
    w.set_scroll_offset(10.0);
    w.set_scroll_offset(20.0);
    w.set_scroll_offset(60.0);
    w.refresh();

    assert_eq!(
        *seen.lock().unwrap(),
        [WindowRange::new(0, 2), WindowRange::new(0, 3), WindowRange::new(1, 4)]
    );
}

#[test]
fn activation_routes_header_ids_only() {
    let hits = Arc::new(Mutex::new(Vec::<ItemId>::new()));
    let sink = Arc::clone(&hits);
    let heights = ItemHeights::default();
    let mut w = ListWindow::new(
        Recorder::default(),
        ListWindowOptions::new()
            .with_viewport_extent(500.0)
            .with_on_item_activated(Some(move |id: &ItemId| sink.lock().unwrap().push(id.clone()))),
    );
    w.set_items(alloc::vec![
        Item::header(HeaderInfo::new("a", "A"), &heights),
        Item::row(0, 0, &heights),
    ]);

    assert!(w.activate(0));
    assert!(!w.activate(1));
    assert!(!w.activate(7));
    w.notify_activated(&ItemId::from("external"));

    let hits = hits.lock().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].as_str(), "a");
    assert_eq!(hits[1].to_string(), "external");
}

#[test]
fn refresh_where_updates_only_matching_visible_items() {
    let heights = ItemHeights::default();
    let mut items = Vec::new();
    for album in 0..5u32 {
        let id = alloc::format!("album-{album}");
        items.push(Item::header(HeaderInfo::new(id.as_str(), "Album"), &heights));
        for t in 0..3 {
            items.push(Item::row(album * 10 + t, (album * 3 + t) as usize, &heights));
        }
    }
    let mut w = window(0, 300.0);
    w.set_items(items);
    w.factory_mut().take_events();

    let target = ItemId::from("album-0");
    let n = w.refresh_where(|_, item| item.id() == Some(&target));
    assert_eq!(n, 1);
    assert_eq!(w.factory().events, [Event::Update { index: 0 }]);

    // Off-screen header: nothing to refresh.
    let far = ItemId::from("album-4");
    assert_eq!(w.refresh_where(|_, item| item.id() == Some(&far)), 0);
    assert_eq!(w.model().header_index(&far), Some(16));

    assert!(w.refresh_item(1));
    assert!(!w.refresh_item(19));
}

#[test]
fn clear_tears_down_and_refresh_rebuilds() {
    let mut w = window(0, 120.0);
    w.set_items(rows(10, 60.0));
    assert_eq!(w.clear(), 2);
    assert_eq!(w.active_len(), 0);
    assert_eq!(w.visible_range(), WindowRange::EMPTY);

    let report = w.refresh();
    assert_eq!(report.created, 2);
    assert_eq!(w.visible_range(), WindowRange::new(0, 2));
}

#[test]
fn dropping_the_window_destroys_live_handles() {
    let mut recorder = Recorder::default();
    {
        let mut w = ListWindow::new(
            &mut recorder,
            ListWindowOptions::new()
                .with_buffer_count(1)
                .with_viewport_extent(180.0),
        );
        w.set_items(rows(10, 60.0));
        assert_eq!(w.active_len(), 4);
    }
    assert_eq!(recorder.live, 0);
    assert_eq!(recorder.destroyed(), [0, 1, 2, 3]);
}

#[test]
fn handle_slots_carry_position_and_version() {
    struct Slots(Vec<HandleSlot>);
    impl ViewFactory<u32> for Slots {
        type Handle = HandleSlot;
        type Error = ();
        fn construct(&mut self, slot: HandleSlot, _: &Item<u32>) -> Result<HandleSlot, ()> {
            self.0.push(slot);
            Ok(slot)
        }
        fn destroy(&mut self, _: HandleSlot) {}
    }

    let heights = ItemHeights::default();
    let mut w = ListWindow::new(
        Slots(Vec::new()),
        ListWindowOptions::new().with_viewport_extent(1000.0),
    );
    w.set_items(alloc::vec![
        Item::header(HeaderInfo::new("h", "H"), &heights),
        Item::row(1, 0, &heights),
        Item::header(HeaderInfo::new("g", "G").with_cover(false), &heights),
    ]);

    let slots = &w.factory().0;
    assert_eq!(slots.len(), 3);
    assert_eq!((slots[1].start, slots[1].height), (90.0, 60.0));
    assert_eq!(slots[2].start, 150.0);
    assert_eq!(slots[2].end(), 215.0);
    assert!(slots.iter().all(|s| s.version == 1));
}

#[test]
fn frame_state_roundtrips_through_restore() {
    let mut w = window(0, 120.0);
    w.set_items(rows(50, 60.0));
    w.set_scroll_offset(900.0);
    let frame = w.frame_state();

    let mut other = window(0, 0.0);
    other.set_items(rows(50, 60.0));
    other.restore_frame_state(frame);
    assert_eq!(other.visible_range(), w.visible_range());
    assert_eq!(other.frame_state(), frame);
}

#[test]
fn invalid_heights_are_sanitized() {
    let items = items_with_heights(&[10.0, f32::NAN, -5.0, f32::INFINITY, 20.0]);
    let model = ListModel::new(items);
    assert_eq!(model.height_at(1), Some(0.0));
    assert_eq!(model.height_at(2), Some(0.0));
    assert_eq!(model.height_at(3), Some(0.0));
    assert_eq!(model.total_extent(), 30.0);
    assert_eq!(model.index_at_offset(10.0), Some(4));
    assert_eq!(model.index_at_offset(9.9), Some(0));
}

#[test]
fn header_info_and_heights() {
    let heights = ItemHeights::default();
    let info = HeaderInfo::new("x", "Some Album")
        .with_subtitle("Artist")
        .with_counts(3, 12);
    assert_eq!(info.stats_text(), "3/12");

    let tall = Item::<u32>::header(info.clone(), &heights);
    let compact = Item::<u32>::header(info.with_cover(false), &heights);
    assert_eq!(tall.height(), 90.0);
    assert_eq!(compact.height(), 65.0);
    assert!(tall.is_header());
    assert_eq!(tall.original_index(), None);

    let row = Item::row(7u32, 3, &heights);
    assert_eq!(row.height(), 60.0);
    assert_eq!(row.original_index(), Some(3));
    assert_eq!(row.id(), None);
}

#[test]
fn window_range_buffering_clamps() {
    assert_eq!(WindowRange::new(0, 3).buffered(2, 10), WindowRange::new(0, 5));
    assert_eq!(WindowRange::new(8, 10).buffered(2, 10), WindowRange::new(6, 10));
    assert_eq!(WindowRange::new(5, 3), WindowRange::new(5, 5));
    assert!(WindowRange::new(5, 3).is_empty());
    assert_eq!(WindowRange::new(2, 9).clamp_to(4), WindowRange::new(2, 4));
}

#[test]
fn set_buffer_count_and_viewport_resize_reconcile() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counter);
    let mut w = ListWindow::new(
        Recorder::default(),
        ListWindowOptions::new()
            .with_buffer_count(0)
            .with_viewport_extent(60.0)
            .with_on_visible_range_changed(Some(move |_: WindowRange| {
                c.fetch_add(1, Ordering::Relaxed);
            })),
    );
    w.set_items(rows(10, 60.0));
    assert_eq!(w.visible_range(), WindowRange::new(0, 1));

    w.set_buffer_count(2);
    assert_eq!(w.visible_range(), WindowRange::new(0, 3));

    w.set_viewport_extent(240.0);
    assert_eq!(w.visible_range(), WindowRange::new(0, 6));
    assert_eq!(w.active_len(), 6);
    assert_eq!(counter.load(Ordering::Relaxed), 3);
}

#[test]
fn controller_tears_down_handles_when_snapshot_is_replaced() {
    let mut views = Recorder::default();
    let mut ctl = RecyclingController::new();

    let first = ListModel::new(rows(10, 60.0));
    let report = ctl.apply(&first, WindowRange::new(0, 4), &mut views);
    assert_eq!(report.created, 4);
    views.take_events();

    // Same version, different snapshot.
    let second = ListModel::new(rows(3, 10.0));
    assert_eq!(first.version(), second.version());
    assert_ne!(first.snapshot_id(), second.snapshot_id());

    let report = ctl.apply(&second, WindowRange::new(0, 3), &mut views);
    assert_eq!(report.destroyed, 4);
    assert_eq!(report.created, 3);

    let events = views.take_events();
    let first_create = events
        .iter()
        .position(|e| matches!(e, Event::Construct { .. }))
        .unwrap();
    assert_eq!(first_create, 4);
    assert!(events[..4].iter().all(|e| matches!(e, Event::Destroy { .. })));
    assert_eq!(ctl.active_indices().collect::<Vec<_>>(), [0, 1, 2]);
    assert_eq!(views.live, 3);
}

#[test]
fn controller_keeps_handles_for_the_same_snapshot() {
    let mut views = Recorder::default();
    let mut ctl = RecyclingController::new();
    let model = ListModel::new(rows(10, 60.0));
    let clone = model.clone();

    ctl.apply(&model, WindowRange::new(0, 4), &mut views);
    views.take_events();

    let report = ctl.apply(&clone, WindowRange::new(0, 4), &mut views);
    assert!(report.is_noop());
    assert!(views.take_events().is_empty());
}

#[test]
fn controller_applies_the_reconcile_diff() {
    let model = ListModel::new(rows(20, 10.0));
    let mut views = Recorder::default();
    let mut ctl = RecyclingController::new();
    ctl.apply(&model, WindowRange::new(2, 6), &mut views);
    views.take_events();

    let mut expected = Vec::new();
    collect_instructions(&model, WindowRange::new(2, 6), WindowRange::new(4, 9), &mut expected);
    let expected: Vec<Event> = expected
        .iter()
        .map(|ins| match *ins {
            Instruction::Destroy(index) => Event::Destroy { index, version: 0 },
            Instruction::Create(index, _) => Event::Construct { index, version: 0 },
        })
        .collect();

    ctl.apply(&model, WindowRange::new(4, 9), &mut views);
    assert_eq!(views.take_events(), expected);
}
