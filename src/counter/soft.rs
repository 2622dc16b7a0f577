//! # Software counter unit
//!
//! ## Overview
//! A pulse-counter unit backed by atomics instead of a peripheral register.
//! An interrupt handler (or, in tests, an injected event source) feeds
//! observed edges in via [`Unit::record_edge`]; a scheduler samples the unit
//! through the [`EdgeCounter`] capability from another context. All methods
//! take `&self`, so a single unit can be shared between both sides.

use fugit::NanosDurationU64;
use portable_atomic::{AtomicBool, AtomicI16, Ordering};

use super::{AcquireError, Acquisition, Config, ConfigError, EdgeCounter, LifecycleError};

/// A software pulse-counter unit.
#[derive(Debug)]
pub struct Unit {
    count: AtomicI16,
    running: AtomicBool,
    torn_down: AtomicBool,
    high_limit: i16,
    glitch_filter: Option<NanosDurationU64>,
}

impl Unit {
    /// Creates a stopped unit with the given limits and filter.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            count: AtomicI16::new(0),
            running: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
            high_limit: config.high_limit,
            glitch_filter: config.glitch_filter,
        })
    }

    /// Feeds one observed edge of the given pulse width.
    ///
    /// Safe to call from an interrupt handler. Edges narrower than the
    /// glitch filter are discarded, as are edges arriving while the unit is
    /// stopped. Once the count reaches the high limit further edges are
    /// dropped; the unit saturates rather than wrapping.
    pub fn record_edge(&self, width: NanosDurationU64) {
        if !self.running.load(Ordering::SeqCst) {
            return;
        }
        if let Some(filter) = self.glitch_filter {
            if width < filter {
                return;
            }
        }

        let high_limit = self.high_limit;
        let _ = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                (count < high_limit).then(|| count + 1)
            });
    }

    /// Permanently retires the unit. Counting stops and subsequent
    /// lifecycle or capture calls fail.
    pub fn teardown(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.torn_down.store(true, Ordering::SeqCst);
    }

    fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }
}

impl EdgeCounter for Unit {
    fn start(&self) -> Result<(), LifecycleError> {
        if self.is_torn_down() {
            return Err(LifecycleError::TornDown);
        }
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), LifecycleError> {
        if self.is_torn_down() {
            return Err(LifecycleError::TornDown);
        }
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn read(&self) -> Result<i16, AcquireError> {
        if self.is_torn_down() {
            return Err(AcquireError);
        }
        Ok(self.count.load(Ordering::SeqCst))
    }

    fn clear(&self) -> Result<(), AcquireError> {
        if self.is_torn_down() {
            return Err(AcquireError);
        }
        self.count.store(0, Ordering::SeqCst);
        Ok(())
    }

    fn read_and_clear(&self) -> Result<Acquisition, AcquireError> {
        if self.is_torn_down() {
            return Err(AcquireError);
        }

        // Edges arriving mid-swap land in the fresh zero, i.e. the next
        // window.
        let count = self.count.swap(0, Ordering::SeqCst);
        Ok(Acquisition {
            count,
            saturated: count == self.high_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: NanosDurationU64 = NanosDurationU64::from_ticks(2000);
    const NARROW: NanosDurationU64 = NanosDurationU64::from_ticks(200);

    fn started(config: Config) -> Unit {
        let unit = Unit::new(config).unwrap();
        unit.start().unwrap();
        unit
    }

    #[test]
    fn rejects_bad_limits() {
        let inverted = Config {
            high_limit: -5,
            ..Config::default()
        };
        assert_eq!(Unit::new(inverted).unwrap_err(), ConfigError::InvalidHighLimit);
    }

    #[test]
    fn counts_qualifying_edges() {
        let unit = started(Config::default());

        for _ in 0..42 {
            unit.record_edge(WIDE);
        }

        assert_eq!(unit.read(), Ok(42));
    }

    #[test]
    fn rejects_glitches() {
        let unit = started(Config::default());

        for _ in 0..5 {
            unit.record_edge(NARROW);
        }
        assert_eq!(unit.read(), Ok(0));

        unit.record_edge(WIDE);
        assert_eq!(unit.read(), Ok(1));
    }

    #[test]
    fn filter_boundary_width_is_counted() {
        let unit = started(Config::default());

        unit.record_edge(NanosDurationU64::from_ticks(1000));

        assert_eq!(unit.read(), Ok(1));
    }

    #[test]
    fn unfiltered_unit_counts_narrow_pulses() {
        let unit = started(Config {
            glitch_filter: None,
            ..Config::default()
        });

        unit.record_edge(NARROW);

        assert_eq!(unit.read(), Ok(1));
    }

    #[test]
    fn stopped_unit_ignores_edges() {
        let unit = started(Config::default());
        unit.stop().unwrap();

        unit.record_edge(WIDE);

        assert_eq!(unit.read(), Ok(0));
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let unit = started(Config::default());
        unit.start().unwrap();

        unit.record_edge(WIDE);
        assert_eq!(unit.read(), Ok(1));

        unit.stop().unwrap();
        unit.stop().unwrap();

        unit.record_edge(WIDE);
        assert_eq!(unit.read(), Ok(1));
    }

    #[test]
    fn saturates_at_high_limit() {
        let unit = started(Config {
            high_limit: 3,
            ..Config::default()
        });

        for _ in 0..5 {
            unit.record_edge(WIDE);
        }

        let acquisition = unit.read_and_clear().unwrap();
        assert_eq!(acquisition.count, 3);
        assert!(acquisition.saturated);

        // Capture reopened the range; counting continues normally.
        unit.record_edge(WIDE);
        let acquisition = unit.read_and_clear().unwrap();
        assert_eq!(acquisition.count, 1);
        assert!(!acquisition.saturated);
    }

    #[test]
    fn count_at_limit_reads_as_saturated() {
        let unit = started(Config {
            high_limit: 3,
            ..Config::default()
        });

        for _ in 0..3 {
            unit.record_edge(WIDE);
        }

        assert!(unit.read_and_clear().unwrap().saturated);
    }

    #[test]
    fn read_does_not_clear() {
        let unit = started(Config::default());
        unit.record_edge(WIDE);

        assert_eq!(unit.read(), Ok(1));
        assert_eq!(unit.read(), Ok(1));
    }

    #[test]
    fn clear_zeroes_without_stopping() {
        let unit = started(Config::default());
        unit.record_edge(WIDE);

        unit.clear().unwrap();
        assert_eq!(unit.read(), Ok(0));

        unit.record_edge(WIDE);
        assert_eq!(unit.read(), Ok(1));
    }

    #[test]
    fn empty_capture_is_zero_not_saturated() {
        let unit = started(Config::default());

        let acquisition = unit.read_and_clear().unwrap();
        assert_eq!(acquisition.count, 0);
        assert!(!acquisition.saturated);
    }

    #[test]
    fn torn_down_unit_fails_everything() {
        let unit = started(Config::default());
        unit.record_edge(WIDE);
        unit.teardown();

        assert_eq!(unit.start(), Err(LifecycleError::TornDown));
        assert_eq!(unit.stop(), Err(LifecycleError::TornDown));
        assert_eq!(unit.read(), Err(AcquireError));
        assert_eq!(unit.clear(), Err(AcquireError));
        assert!(unit.read_and_clear().is_err());

        // Feeding a retired unit is a silent no-op.
        unit.record_edge(WIDE);
    }
}
