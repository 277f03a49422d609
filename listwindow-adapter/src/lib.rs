//! Scroll coordination for the `listwindow` crate.
//!
//! `listwindow` runs the windowing pipeline for whatever offset it is handed. This crate sits
//! between it and the host's scroll container:
//!
//! - [`ScrollCoordinator`]: drops duplicate scroll samples, maps normalized positions to offsets,
//!   and drives smooth scroll-to-index with a [`Tween`] sampled by the host's frame clock
//!
//! No UI framework bindings; the host reports samples and calls `tick(now_ms)`.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod options;
mod tween;


pub use coordinator::{ScrollCoordinator, ScrollPhase, ScrollStep};
pub use options::ScrollOptions;
pub use tween::{Easing, Tween};
