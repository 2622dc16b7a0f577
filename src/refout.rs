//! # Reference output
//!
//! A fixed-frequency signal generator used as a loopback source for the
//! counter input. It is configured once at startup and never re-touched;
//! only the configuration contract lives here, the PWM hardware behind it
//! belongs to the platform.

use fugit::{HertzU32, RateExtU32};

/// Reference signal settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output frequency.
    pub frequency: HertzU32,
    /// Duty % of the output signal.
    pub duty_pct: u8,
}

impl Config {
    /// Rejects a zero frequency or a duty above 100 %.
    pub fn validate(&self) -> Result<(), Error> {
        if self.frequency.raw() == 0 {
            return Err(Error::Frequency);
        }
        if self.duty_pct > 100 {
            return Err(Error::Duty);
        }
        Ok(())
    }
}

impl Default for Config {
    /// The stock reference signal: 136 Hz at 50 % duty.
    fn default() -> Self {
        Self {
            frequency: 136u32.Hz(),
            duty_pct: 50,
        }
    }
}

/// Reference output configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Invalid frequency value
    Frequency,
    /// Invalid duty % value
    Duty,
}

/// A fixed-frequency signal generator configured once at startup.
pub trait ReferenceOutput {
    /// Applies `config` to the generator. The measurement core calls this
    /// exactly once and never reconfigures a running output.
    fn configure(&mut self, config: Config) -> Result<(), Error>;
}
