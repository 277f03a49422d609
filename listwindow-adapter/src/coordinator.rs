use alloc::vec::Vec;

use listwindow::{FrameState, Item, ListWindow, ReconcileReport, ViewFactory};

use crate::{ScrollOptions, Tween};

/// Whether a smooth scroll is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    Idle,
    Animating,
}

/// The result of a programmatic scroll or an animation tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollStep<E> {
    /// Offset applied to the window (the host mirrors it into its scroll container).
    pub offset: f32,
    /// The same position normalized to `[0, 1]`.
    pub normalized: f32,
    pub report: ReconcileReport<E>,
}

/// A framework-neutral coordinator that wraps a [`ListWindow`] and turns raw scroll input into
/// pipeline runs.
///
/// Adapters drive it by calling:
/// - `on_scroll_position_changed` / `on_normalized_scroll` when the UI reports a scroll sample
/// - `scroll_to_index` for programmatic navigation
/// - `tick(now_ms)` each frame while [`Self::is_animating`] is `true`
///
/// Scroll input supersedes any smooth scroll in flight; requests are never queued. Samples within
/// `epsilon` of the window's current offset are ignored, which also swallows the host echoing back
/// offsets written by `tick`.
///
/// The wrapped window is the source of truth for the offset, so changes made through
/// [`Self::window_mut`] are picked up. An animation is abandoned on its next tick if the window was
/// scrolled or given new items behind its back.
pub struct ScrollCoordinator<P, F: ViewFactory<P>> {
    window: ListWindow<P, F>,
    options: ScrollOptions,
    animation: Option<Animation>,
}

#[derive(Clone, Copy, Debug)]
struct Animation {
    tween: Tween,
    snapshot_id: u64,
    /// Offset this animation last wrote into the window.
    applied: f32,
}

impl<P, F: ViewFactory<P>> ScrollCoordinator<P, F> {
    pub fn new(window: ListWindow<P, F>, options: ScrollOptions) -> Self {
        Self {
            window,
            options,
            animation: None,
        }
    }

    pub fn window(&self) -> &ListWindow<P, F> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut ListWindow<P, F> {
        &mut self.window
    }

    pub fn into_window(self) -> ListWindow<P, F> {
        self.window
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ScrollOptions) {
        self.options = options;
    }

    pub fn phase(&self) -> ScrollPhase {
        if self.animation.is_some() {
            ScrollPhase::Animating
        } else {
            ScrollPhase::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The animation in flight, if any.
    pub fn tween(&self) -> Option<&Tween> {
        self.animation.as_ref().map(|a| &a.tween)
    }

    /// Abandons the animation in flight. The window keeps the last sampled offset.
    pub fn cancel_animation(&mut self) {
        if let Some(_animation) = self.animation.take() {
            vdebug!(to = _animation.tween.to, "smooth scroll cancelled");
        }
    }

    /// Call this when the UI reports a scroll offset (e.g. user wheel/drag).
    ///
    /// Returns `None` for duplicate samples. Otherwise cancels any animation, runs the pipeline and
    /// returns its report.
    pub fn on_scroll_position_changed(&mut self, offset: f32) -> Option<ReconcileReport<F::Error>> {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        let current = self.window.scroll_offset();
        if distance(offset, current) < self.options.epsilon {
            return None;
        }
        vtrace!(offset, current, "on_scroll_position_changed");
        self.cancel_animation();
        Some(self.window.set_scroll_offset(offset))
    }

    /// Same as [`Self::on_scroll_position_changed`], for hosts reporting a position in `[0, 1]`.
    pub fn on_normalized_scroll(&mut self, position: f32) -> Option<ReconcileReport<F::Error>> {
        let offset = self.window.offset_for_normalized(position);
        self.on_scroll_position_changed(offset)
    }

    pub fn on_viewport_extent(&mut self, extent: f32) -> ReconcileReport<F::Error> {
        self.window.set_viewport_extent(extent)
    }

    /// Restores a captured scroll geometry, abandoning any animation in flight.
    pub fn restore_frame_state(&mut self, frame: FrameState) -> ReconcileReport<F::Error> {
        self.cancel_animation();
        self.window.restore_frame_state(frame)
    }

    /// Replaces the items. An animation in flight is abandoned since its target belonged to the
    /// previous snapshot.
    pub fn set_items(&mut self, items: Vec<Item<P>>) -> ReconcileReport<F::Error> {
        self.cancel_animation();
        self.window.set_items(items)
    }

    /// Scrolls so that `index` sits at the top of the viewport, clamped so the list never
    /// overscrolls past its end. `index` is clamped to the model.
    ///
    /// - `smooth = false`: applies the target immediately (one pipeline run, reported in the step).
    /// - `smooth = true`: starts an animation driven by [`Self::tick`]; the step's report is empty.
    ///
    /// Any animation already in flight is replaced.
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        smooth: bool,
        now_ms: u64,
    ) -> ScrollStep<F::Error> {
        self.cancel_animation();
        let normalized = self.window.normalized_for_index(index);
        let offset = self.window.offset_for_normalized(normalized);

        let from = self.window.scroll_offset();
        if !smooth || distance(from, offset) < self.options.epsilon {
            let report = self.window.set_scroll_offset(offset);
            return ScrollStep {
                offset,
                normalized,
                report,
            };
        }

        vdebug!(
            index,
            from,
            to = offset,
            duration_ms = self.options.smooth_duration_ms,
            "smooth scroll started"
        );
        self.animation = Some(Animation {
            tween: Tween::new(
                from,
                offset,
                now_ms,
                self.options.smooth_duration_ms,
                self.options.easing,
            ),
            snapshot_id: self.window.model().snapshot_id(),
            applied: from,
        });
        ScrollStep {
            offset,
            normalized,
            report: ReconcileReport::empty(),
        }
    }

    /// Advances the animation in flight.
    ///
    /// Returns `None` when idle. Otherwise applies the sampled offset, runs the pipeline, and
    /// returns to idle once the target is reached.
    ///
    /// Returns `None` and abandons the animation if the window's items were replaced or its offset
    /// moved away from the last sampled one since the previous tick.
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollStep<F::Error>> {
        let mut animation = self.animation?;
        if animation.snapshot_id != self.window.model().snapshot_id()
            || distance(self.window.scroll_offset(), animation.applied) >= self.options.epsilon
        {
            self.cancel_animation();
            return None;
        }

        let offset = animation.tween.sample(now_ms);
        let report = self.window.set_scroll_offset(offset);
        animation.applied = self.window.scroll_offset();

        if animation.tween.is_done(now_ms) {
            vdebug!(to = animation.tween.to, "smooth scroll finished");
            self.animation = None;
        } else {
            self.animation = Some(animation);
        }

        Some(ScrollStep {
            offset,
            normalized: self.window.normalized_position(),
            report,
        })
    }
}

impl<P, F: ViewFactory<P>> core::fmt::Debug for ScrollCoordinator<P, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollCoordinator")
            .field("window", &self.window)
            .field("options", &self.options)
            .field("animation", &self.animation)
            .finish()
    }
}

fn distance(a: f32, b: f32) -> f32 {
    if a > b { a - b } else { b - a }
}
