//! TDC Core Control Driver
//!
//! Register-level handshakes for the time-to-digital converter core:
//! reset, debug freeze with scan chain stepping, ring oscillator self-test,
//! and histogram / calibration LUT readback.
//!
//! The driver keeps no device state between calls. Every operation is a
//! short, fixed sequence of CSR writes and status polls, and the device is
//! assumed to be owned by a single caller; nothing here locks.
//!
//! ```text
//! UNFROZEN --freeze_req=1, wait freeze_ack--> FROZEN(unknown position)
//! FROZEN(unknown) --cs_next while !cs_last--> FROZEN(last)
//! FROZEN(last) --cs_next--> FROZEN(start)              debug_init
//! FROZEN(n) --cs_next--> FROZEN(n + 1)                  debug_next
//! FROZEN(any) --freeze_req=0--> UNFROZEN                debug_finish
//! ```

use heapless::Vec;

use crate::config::{HISTOGRAM_BINS, LUT_ENTRIES};
use crate::drivers::debug_session::DebugSession;
use crate::hal::csr::{Csr, CsrBus};
use crate::hal::poll::{PollPolicy, Spin};
use crate::types::{Error, Result, RingOscMeasurement};

/// TDC driver
///
/// Generic over the CSR transport and the policy used while waiting on
/// status bits. With the default [`Spin`] policy no operation ever returns
/// an error; a device that never answers blocks forever.
pub struct Tdc<B, P = Spin> {
    bus: B,
    policy: P,
}

impl<B: CsrBus> Tdc<B> {
    /// Create a driver that busy-waits without bound
    #[must_use]
    pub const fn new(bus: B) -> Self {
        Self { bus, policy: Spin }
    }
}

impl<B: CsrBus, P: PollPolicy> Tdc<B, P> {
    /// Create a driver with a custom poll policy
    #[must_use]
    pub const fn with_policy(bus: B, policy: P) -> Self {
        Self { bus, policy }
    }

    /// Give back the bus and the poll policy
    pub fn release(self) -> (B, P) {
        (self.bus, self.policy)
    }

    /// Borrow the CSR bus
    #[must_use]
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the CSR bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Mutably borrow the poll policy
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Reset the core and wait for it to report ready
    pub fn reset(&mut self) -> Result<()> {
        debug!("tdc: reset");
        self.bus.write_flag(Csr::Reset, true);
        self.bus.write_flag(Csr::Reset, false);
        self.wait_for(Csr::Ready)
    }

    /// Pulse the coarse counter reset
    pub fn reset_coarse_counter(&mut self) {
        self.bus.write_flag(Csr::CcRst, true);
        self.bus.write_flag(Csr::CcRst, false);
    }

    /// Route the calibration oscillator into the channel inputs
    pub fn set_calibration(&mut self, enabled: bool) {
        self.bus.write_flag(Csr::CalibSel, enabled);
    }

    /// Freeze the core and park the scan chain at its start position
    ///
    /// Steps the chain until it reports its last position, then once more
    /// so it wraps to the start regardless of where the freeze caught it.
    /// The number of steps is bounded only by the chain length.
    ///
    /// If the freeze is never acknowledged and the poll policy gives up,
    /// `freeze_req` is left asserted.
    pub fn debug_init(&mut self) -> Result<()> {
        self.bus.write_flag(Csr::FreezeReq, true);
        self.wait_for(Csr::FreezeAck)?;

        let mut pulses: u32 = 0;
        while !self.bus.read_flag(Csr::CsLast) {
            self.debug_next();
            pulses = pulses.wrapping_add(1);
        }
        self.debug_next();
        debug!("tdc: frozen, chain parked after {} steps", pulses.wrapping_add(1));
        Ok(())
    }

    /// Advance the scan chain one position
    ///
    /// Only meaningful while frozen; not checked.
    pub fn debug_next(&mut self) {
        self.bus.write(Csr::CsNext, 1);
    }

    /// Release the freeze
    ///
    /// Does not wait for `freeze_ack` to drop.
    pub fn debug_finish(&mut self) {
        debug!("tdc: release freeze");
        self.bus.write_flag(Csr::FreezeReq, false);
    }

    /// Freeze the core and return a guard that releases it on drop
    ///
    /// Unlike [`debug_init`](Self::debug_init), a failed freeze handshake
    /// releases `freeze_req` before the error is returned.
    pub fn debug_session(&mut self) -> Result<DebugSession<'_, B, P>> {
        if let Err(err) = self.debug_init() {
            self.debug_finish();
            return Err(err);
        }
        Ok(DebugSession::new(self))
    }

    /// Run the ring oscillator self-test and return the frequency count
    ///
    /// Intended for debug mode; not checked.
    pub fn ringosc_freq(&mut self) -> Result<u32> {
        self.start_ringosc()?;
        Ok(self.bus.read(Csr::OcFreq))
    }

    /// Run the ring oscillator self-test and return both counters
    pub fn ringosc_measure(&mut self) -> Result<RingOscMeasurement> {
        self.start_ringosc()?;
        let freq = self.bus.read(Csr::OcFreq);
        let sfreq = self.bus.read(Csr::OcSfreq);
        Ok(RingOscMeasurement { freq, sfreq })
    }

    /// Read one histogram bin
    ///
    /// `addr` is passed to the hardware unchecked.
    pub fn read_hist(&mut self, addr: u32) -> u32 {
        self.bus.write(Csr::HisA, addr);
        self.bus.read(Csr::HisD)
    }

    /// Read consecutive histogram bins starting at `start` into `bins`
    pub fn read_hist_into(&mut self, start: u32, bins: &mut [u32]) {
        let mut addr = start;
        for bin in bins.iter_mut() {
            *bin = self.read_hist(addr);
            addr = addr.wrapping_add(1);
        }
    }

    /// Read every histogram bin
    ///
    /// Reads whatever the scan chain currently selects; see
    /// [`channel_histogram`](Self::channel_histogram) for a frozen,
    /// per-channel dump.
    pub fn histogram(&mut self) -> Vec<u32, HISTOGRAM_BINS> {
        (0..)
            .take(HISTOGRAM_BINS)
            .map(|addr| self.read_hist(addr))
            .collect()
    }

    /// Read every histogram bin of one input channel
    ///
    /// Freezes the core, parks the scan chain, steps it `channel` times to
    /// select the channel, dumps all bins, then releases the freeze.
    /// Channels are numbered `0..CHANNEL_COUNT`; `channel` is not checked.
    pub fn channel_histogram(&mut self, channel: u32) -> Result<Vec<u32, HISTOGRAM_BINS>> {
        let mut session = self.debug_session()?;
        session.step_by(channel);
        Ok(session.histogram())
    }

    /// Read one calibration LUT entry
    ///
    /// `addr` is passed to the hardware unchecked.
    pub fn read_lut(&mut self, addr: u32) -> u32 {
        self.bus.write(Csr::LutA, addr);
        self.bus.read(Csr::LutD)
    }

    /// Read consecutive LUT entries starting at `start` into `entries`
    pub fn read_lut_into(&mut self, start: u32, entries: &mut [u32]) {
        let mut addr = start;
        for entry in entries.iter_mut() {
            *entry = self.read_lut(addr);
            addr = addr.wrapping_add(1);
        }
    }

    /// Read the whole calibration LUT
    pub fn lut(&mut self) -> Vec<u32, LUT_ENTRIES> {
        (0..)
            .take(LUT_ENTRIES)
            .map(|addr| self.read_lut(addr))
            .collect()
    }

    fn start_ringosc(&mut self) -> Result<()> {
        self.bus.write_flag(Csr::OcStart, true);
        self.bus.write_flag(Csr::OcStart, false);
        self.wait_for(Csr::OcReady)
    }

    /// Poll a status bit until it reads set or the policy gives up
    fn wait_for(&mut self, csr: Csr) -> Result<()> {
        self.policy.start();
        loop {
            if self.bus.read_flag(csr) {
                return Ok(());
            }
            if !self.policy.keep_waiting() {
                warn!("tdc: gave up waiting for {}", csr);
                return Err(Error::Timeout(csr));
            }
        }
    }
}
