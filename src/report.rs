//! # Latest-sample reporting
//!
//! The scheduler publishes one [`Sample`] per window into a [`SampleSlot`];
//! status and network consumers poll the slot on their own cadence. Only
//! the most recent sample is retained.

use core::cell::Cell;

use critical_section::Mutex;

use crate::sample::Sample;

/// Single-slot holder for the most recent [`Sample`].
///
/// Readers never observe a partially written sample and never block the
/// writer; publishing is a bounded critical section independent of any
/// consumer.
pub struct SampleSlot {
    latest: Mutex<Cell<Option<Sample>>>,
}

impl SampleSlot {
    /// An empty slot. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(Cell::new(None)),
        }
    }

    /// Replaces the held sample.
    pub fn publish(&self, sample: Sample) {
        critical_section::with(|cs| self.latest.borrow(cs).set(Some(sample)));
    }

    /// The most recently published sample, or `None` before the first
    /// window completes.
    pub fn latest(&self) -> Option<Sample> {
        critical_section::with(|cs| self.latest.borrow(cs).get())
    }
}

impl Default for SampleSlot {
    fn default() -> Self {
        Self::new()
    }
}
