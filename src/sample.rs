//! # Measurement samples
//!
//! One [`Sample`] is produced per window. It carries the raw edge count and
//! the window length; the rate is derived on demand and never feeds back
//! into counter state.

use core::fmt;
use core::fmt::Write as _;

use fugit::{HertzU32, MicrosDurationU64, RateExtU32};

/// What a window's sample represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleKind {
    /// An ordinary count of qualifying edges.
    Count,
    /// The counter hit its high limit before the window closed; the count
    /// understates the true rate.
    Overflow,
    /// The counter could not be read this window.
    AcquisitionError,
}

/// One measurement window's result.
///
/// Immutable once produced; superseded by the next window's sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Qualifying edges observed during the window.
    pub count: i16,
    /// Window length.
    pub window: MicrosDurationU64,
    /// Data-quality tag.
    pub kind: SampleKind,
}

impl Sample {
    /// An ordinary sample.
    pub fn new(count: i16, window: MicrosDurationU64) -> Self {
        Self {
            count,
            window,
            kind: SampleKind::Count,
        }
    }

    /// A sample whose counter saturated during the window.
    pub fn overflow(count: i16, window: MicrosDurationU64) -> Self {
        Self {
            count,
            window,
            kind: SampleKind::Overflow,
        }
    }

    /// A placeholder for a window whose capture failed.
    pub fn acquisition_error(window: MicrosDurationU64) -> Self {
        Self {
            count: 0,
            window,
            kind: SampleKind::AcquisitionError,
        }
    }

    /// Whether the sample carries a usable count.
    pub fn is_valid(&self) -> bool {
        !matches!(self.kind, SampleKind::AcquisitionError)
    }

    /// Edge rate over the window, truncated toward zero.
    pub fn rate(&self) -> HertzU32 {
        let micros = self.window.to_micros();
        if self.count <= 0 || micros == 0 {
            return 0u32.Hz();
        }
        ((self.count as u64 * 1_000_000 / micros) as u32).Hz()
    }

    /// The status text served to pollers, e.g. `pulses: 42`.
    pub fn status_text(&self) -> heapless::String<32> {
        let mut text = heapless::String::new();
        let _ = write!(text, "{self}");
        text
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SampleKind::Count => write!(f, "pulses: {}", self.count),
            SampleKind::Overflow => write!(f, "pulses: {} (saturated)", self.count),
            SampleKind::AcquisitionError => write!(f, "pulses: unavailable"),
        }
    }
}
