//! Scoped Debug Freeze
//!
//! A [`DebugSession`] exists only while the core is frozen with its scan
//! chain parked at the start position. Dropping it releases the freeze.

use heapless::Vec;

use crate::config::HISTOGRAM_BINS;
use crate::drivers::tdc::Tdc;
use crate::hal::csr::CsrBus;
use crate::hal::poll::PollPolicy;
use crate::types::{Result, RingOscMeasurement, ScanPosition};

/// Frozen TDC with a tracked scan chain position
///
/// Created by [`Tdc::debug_session`].
pub struct DebugSession<'a, B: CsrBus, P: PollPolicy> {
    tdc: &'a mut Tdc<B, P>,
    position: ScanPosition,
}

impl<'a, B: CsrBus, P: PollPolicy> DebugSession<'a, B, P> {
    pub(crate) fn new(tdc: &'a mut Tdc<B, P>) -> Self {
        Self {
            tdc,
            position: ScanPosition::START,
        }
    }

    /// Steps taken since the chain was parked
    #[must_use]
    pub const fn position(&self) -> ScanPosition {
        self.position
    }

    /// Advance the scan chain one position
    pub fn step(&mut self) -> ScanPosition {
        self.tdc.debug_next();
        self.position = self.position.next();
        trace!("tdc: scan chain at {}", self.position);
        self.position
    }

    /// Advance the scan chain `count` positions
    pub fn step_by(&mut self, count: u32) -> ScanPosition {
        for _ in 0..count {
            self.step();
        }
        self.position
    }

    /// Run the ring oscillator self-test
    pub fn ringosc_freq(&mut self) -> Result<u32> {
        self.tdc.ringosc_freq()
    }

    /// Run the ring oscillator self-test and return both counters
    pub fn ringosc_measure(&mut self) -> Result<RingOscMeasurement> {
        self.tdc.ringosc_measure()
    }

    /// Read one histogram bin
    pub fn read_hist(&mut self, addr: u32) -> u32 {
        self.tdc.read_hist(addr)
    }

    /// Read consecutive histogram bins of the selected channel
    pub fn read_hist_into(&mut self, start: u32, bins: &mut [u32]) {
        self.tdc.read_hist_into(start, bins);
    }

    /// Read every histogram bin of the selected channel
    ///
    /// The scan chain position picks the channel: position `n` after
    /// parking reads channel `n`.
    pub fn histogram(&mut self) -> Vec<u32, HISTOGRAM_BINS> {
        self.tdc.histogram()
    }

    /// Read one calibration LUT entry
    pub fn read_lut(&mut self, addr: u32) -> u32 {
        self.tdc.read_lut(addr)
    }

    /// Release the freeze now
    pub fn finish(self) {}
}

impl<B: CsrBus, P: PollPolicy> Drop for DebugSession<'_, B, P> {
    fn drop(&mut self) {
        self.tdc.debug_finish();
    }
}
