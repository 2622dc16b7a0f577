//! Windowed pulse-rate measurement for frequency-counter firmware.
//!
//! ## Overview
//! Counts qualifying edges from an external signal over fixed wall-clock
//! windows and reports the per-window count with its derived rate. Counting
//! sits behind the [`EdgeCounter`](counter::EdgeCounter) capability: the
//! crate ships a software unit fed from an interrupt or another concurrent
//! context, and platform pulse-counter peripherals slot in behind the same
//! trait. A deadline-driven [`Scheduler`](window::Scheduler) atomically
//! captures-and-clears the counter once per window and publishes the result
//! to a [`SampleSlot`] that consumers poll without blocking the scheduler.
//!
//! Counter units saturate at their configured high limit instead of
//! wrapping; a saturated window is tagged [`SampleKind::Overflow`] so
//! consumers never mistake an undercount for a true rate.
//!
//! ## Examples
//!
//! ```rust
//! use freq_meter::{
//!     counter::{soft, Config, EdgeCounter},
//!     window::{Scheduler, DEFAULT_PERIOD},
//!     SampleSlot,
//! };
//! use fugit::NanosDurationU64;
//!
//! static SLOT: SampleSlot = SampleSlot::new();
//!
//! let unit = soft::Unit::new(Config::default()).unwrap();
//! unit.start().unwrap();
//!
//! // An interrupt handler would feed this from the input line.
//! unit.record_edge(NanosDurationU64::nanos(1500));
//!
//! let mut scheduler = Scheduler::new(&unit, &SLOT, DEFAULT_PERIOD);
//! scheduler.tick();
//!
//! assert_eq!(SLOT.latest().unwrap().count, 1);
//! ```
//!
//! [`Scheduler::run`](window::Scheduler::run) drives the same capture from
//! a [`Timebase`](window::Timebase) at a fixed cadence.
//!
//! ## Feature Flags
#![doc = document_features::document_features!()]
#![no_std]

mod fmt;

pub mod counter;
pub mod refout;
pub mod report;
pub mod sample;
pub mod window;

pub use self::{
    report::SampleSlot,
    sample::{Sample, SampleKind},
};
