//! # Measurement windows
//!
//! ## Overview
//! The [`Scheduler`] drives a counter at a fixed cadence: once per window it
//! captures-and-clears the count, wraps the result as a [`Sample`] and hands
//! it to the reporter slot. The wait is deadline-based: the next deadline
//! advances by the period rather than being measured from the wakeup, so a
//! slow handoff shifts one window by at most one tick instead of
//! accumulating drift.
//!
//! Capture failures never escape a tick; the affected window is published
//! as an [`AcquisitionError`](crate::sample::SampleKind::AcquisitionError)
//! sample and measurement continues.

use fugit::MicrosDurationU64;
use portable_atomic::{AtomicBool, Ordering};

use crate::{
    counter::{EdgeCounter, LifecycleError},
    report::SampleSlot,
    sample::Sample,
};

/// Microsecond-resolution point in time, as handed out by a [`Timebase`].
pub type Instant = fugit::Instant<u64, 1, 1_000_000>;

/// The stock window length, 1000 ms.
pub const DEFAULT_PERIOD: MicrosDurationU64 = MicrosDurationU64::from_ticks(1_000_000);

/// Monotonic time source driving [`Scheduler::run`].
pub trait Timebase {
    /// Current uptime.
    fn now(&mut self) -> Instant;

    /// Waits until `deadline` has passed. Returns immediately for deadlines
    /// already in the past.
    fn wait_until(&mut self, deadline: Instant);
}

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Created, not yet running.
    Idle,
    /// Between windows.
    Running,
    /// Capturing and publishing a window.
    Sampling,
    /// Halted by request.
    Stopped,
}

/// Cooperative stop request, checked at window boundaries only.
///
/// A stop requested mid-window lets the in-flight sample publish first;
/// partial windows are never published.
pub struct StopSignal {
    requested: AtomicBool,
}

impl StopSignal {
    /// A signal with no stop requested.
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Asks the scheduler to halt after the window in flight.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives measurement windows over an owned counter.
///
/// The scheduler is the only caller of the counter's capture operations;
/// consumers see results through the [`SampleSlot`] alone.
pub struct Scheduler<'s, C> {
    counter: C,
    slot: &'s SampleSlot,
    period: MicrosDurationU64,
    state: State,
}

impl<'s, C: EdgeCounter> Scheduler<'s, C> {
    /// Creates an idle scheduler publishing into `slot` once per `period`.
    pub fn new(counter: C, slot: &'s SampleSlot, period: MicrosDurationU64) -> Self {
        Self {
            counter,
            slot,
            period,
            state: State::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Completes one window: capture-and-clear, wrap, publish.
    pub fn tick(&mut self) {
        self.state = State::Sampling;

        let sample = match self.counter.read_and_clear() {
            Ok(acquisition) if acquisition.saturated => {
                warn!(
                    "counter saturated at {}; true rate undercounted",
                    acquisition.count
                );
                Sample::overflow(acquisition.count, self.period)
            }
            Ok(acquisition) => Sample::new(acquisition.count, self.period),
            Err(_) => {
                warn!("counter read failed; window lost");
                Sample::acquisition_error(self.period)
            }
        };

        info!("pulses: {} ({} Hz)", sample.count, sample.rate().to_Hz());
        self.slot.publish(sample);

        self.state = State::Running;
    }

    /// Runs windows until `stop` is requested, then stops the counter.
    pub fn run<T: Timebase>(
        &mut self,
        timebase: &mut T,
        stop: &StopSignal,
    ) -> Result<(), LifecycleError> {
        self.counter.clear().ok();
        self.counter.start()?;
        self.state = State::Running;

        let mut deadline = timebase.now() + self.period;
        while !stop.is_requested() {
            timebase.wait_until(deadline);
            deadline += self.period;
            self.tick();
        }

        self.counter.stop()?;
        self.state = State::Stopped;
        Ok(())
    }
}
