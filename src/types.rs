//! Shared types used across the TDC firmware
//!
//! Result and measurement types returned by the driver. All values are raw
//! register contents; nothing here converts counts into physical units.

use core::fmt;

use crate::hal::csr::Csr;

/// Driver error
///
/// The default [`Spin`](crate::hal::poll::Spin) policy never produces an
/// error: an unresponsive device blocks the caller instead. Only bounded
/// poll policies can surface [`Error::Timeout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The poll policy gave up before the named status CSR asserted
    Timeout(Csr),
}

impl Error {
    /// Status CSR the driver was waiting on
    #[must_use]
    pub const fn csr(self) -> Csr {
        match self {
            Self::Timeout(csr) => csr,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(csr) => write!(f, "timed out waiting for {}", csr.name()),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Timeout(csr) => defmt::write!(f, "Timeout({})", csr),
        }
    }
}

/// Driver operation result
pub type Result<T> = core::result::Result<T, Error>;

/// One ring oscillator self-test reading
///
/// Both counters are latched by the same measurement; `freq` is the value
/// [`Tdc::ringosc_freq`](crate::drivers::tdc::Tdc::ringosc_freq) returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RingOscMeasurement {
    /// Ring oscillator frequency count
    pub freq: u32,
    /// Secondary frequency count latched alongside `freq`
    pub sfreq: u32,
}

#[cfg(feature = "embedded")]
impl defmt::Format for RingOscMeasurement {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RingOsc(freq={}, sfreq={})", self.freq, self.sfreq);
    }
}

/// Scan chain position relative to the parked start position
///
/// Tracked by software only; the hardware exposes nothing but the
/// "at last position" flag, so the count wraps silently when the chain does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanPosition(u32);

impl ScanPosition {
    /// Position the chain is parked at after the debug handshake
    pub const START: Self = Self(0);

    /// Create from a step count
    #[must_use]
    pub const fn new(steps: u32) -> Self {
        Self(steps)
    }

    /// Number of steps taken since the start position
    #[must_use]
    pub const fn steps(self) -> u32 {
        self.0
    }

    /// Position after one more step
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Check if this is the start position
    #[must_use]
    pub const fn is_start(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ScanPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ScanPosition {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "#{}", self.0);
    }
}
