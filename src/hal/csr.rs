//! TDC Control/Status Register Bank
//!
//! Names every CSR the TDC core exposes and defines the bus trait the
//! driver talks through. On target the bank is memory mapped behind the FMC
//! interface; each register occupies one 32-bit word, in the order the core
//! declares them.

use crate::config::{self, width_mask};

/// Register direction as seen from the CPU
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Status register, written by the device
    ReadOnly,
    /// Command register, written by the CPU
    WriteOnly,
}

/// TDC CSR identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Csr {
    /// Device finished reset
    Ready,
    /// Reset command (level)
    Reset,
    /// Coarse counter reset (level)
    CcRst,
    /// Debug freeze request (level)
    FreezeReq,
    /// Freeze acknowledged by the device
    FreezeAck,
    /// Scan chain single step (any write pulses once)
    CsNext,
    /// Scan chain is at its last position
    CsLast,
    /// Route calibration oscillator into the channel inputs (level)
    CalibSel,
    /// Calibration LUT address
    LutA,
    /// Calibration LUT data at the selected address
    LutD,
    /// Histogram bin address
    HisA,
    /// Histogram bin value at the selected address
    HisD,
    /// Ring oscillator measurement start (level)
    OcStart,
    /// Ring oscillator measurement complete
    OcReady,
    /// Ring oscillator frequency count
    OcFreq,
    /// Secondary ring oscillator frequency count
    OcSfreq,
}

impl Csr {
    /// Every CSR in bank order
    pub const ALL: [Self; 16] = [
        Self::Ready,
        Self::Reset,
        Self::CcRst,
        Self::FreezeReq,
        Self::FreezeAck,
        Self::CsNext,
        Self::CsLast,
        Self::CalibSel,
        Self::LutA,
        Self::LutD,
        Self::HisA,
        Self::HisD,
        Self::OcStart,
        Self::OcReady,
        Self::OcFreq,
        Self::OcSfreq,
    ];

    /// Word index of this register within the bank
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Ready => 0,
            Self::Reset => 1,
            Self::CcRst => 2,
            Self::FreezeReq => 3,
            Self::FreezeAck => 4,
            Self::CsNext => 5,
            Self::CsLast => 6,
            Self::CalibSel => 7,
            Self::LutA => 8,
            Self::LutD => 9,
            Self::HisA => 10,
            Self::HisD => 11,
            Self::OcStart => 12,
            Self::OcReady => 13,
            Self::OcFreq => 14,
            Self::OcSfreq => 15,
        }
    }

    /// Byte offset of this register from the bank base
    #[must_use]
    pub const fn offset(self) -> usize {
        self.index() * config::CSR_STRIDE
    }

    /// Register direction
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Ready
            | Self::FreezeAck
            | Self::CsLast
            | Self::LutD
            | Self::HisD
            | Self::OcReady
            | Self::OcFreq
            | Self::OcSfreq => Access::ReadOnly,
            Self::Reset
            | Self::CcRst
            | Self::FreezeReq
            | Self::CsNext
            | Self::CalibSel
            | Self::LutA
            | Self::HisA
            | Self::OcStart => Access::WriteOnly,
        }
    }

    /// Register width in bits
    #[must_use]
    pub const fn width(self) -> u32 {
        match self {
            Self::LutA | Self::HisA => config::RAW_COUNT,
            Self::LutD => config::FP_COUNT,
            Self::HisD => config::HIS_DATA_WIDTH,
            Self::OcFreq | Self::OcSfreq => config::FCOUNTER_WIDTH,
            _ => 1,
        }
    }

    /// Mask covering the implemented bits
    #[must_use]
    pub const fn mask(self) -> u32 {
        width_mask(self.width())
    }

    /// CSR name as generated for the core
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Reset => "reset",
            Self::CcRst => "cc_rst",
            Self::FreezeReq => "freeze_req",
            Self::FreezeAck => "freeze_ack",
            Self::CsNext => "cs_next",
            Self::CsLast => "cs_last",
            Self::CalibSel => "calib_sel",
            Self::LutA => "lut_a",
            Self::LutD => "lut_d",
            Self::HisA => "his_a",
            Self::HisD => "his_d",
            Self::OcStart => "oc_start",
            Self::OcReady => "oc_ready",
            Self::OcFreq => "oc_freq",
            Self::OcSfreq => "oc_sfreq",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Csr {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// Access to the TDC CSR bank
///
/// Every call must reach the device before it returns: no write buffering,
/// no read caching. The driver relies on this for its write-then-read
/// ordering.
pub trait CsrBus {
    /// Read the current value of a CSR
    fn read(&mut self, csr: Csr) -> u32;

    /// Write a CSR
    fn write(&mut self, csr: Csr, value: u32);

    /// Read a single-bit status CSR
    fn read_flag(&mut self, csr: Csr) -> bool {
        self.read(csr) & 1 != 0
    }

    /// Write a single-bit command CSR
    fn write_flag(&mut self, csr: Csr, value: bool) {
        self.write(csr, u32::from(value));
    }
}

impl<B: CsrBus + ?Sized> CsrBus for &mut B {
    fn read(&mut self, csr: Csr) -> u32 {
        (**self).read(csr)
    }

    fn write(&mut self, csr: Csr, value: u32) {
        (**self).write(csr, value);
    }
}

/// Memory mapped CSR bank
#[cfg(feature = "embedded")]
pub struct MmioCsrBank {
    base: usize,
}

#[cfg(feature = "embedded")]
#[allow(unsafe_code)]
impl MmioCsrBank {
    /// Create a bank at `base`
    ///
    /// # Safety
    ///
    /// `base` must be the address of a mapped TDC CSR bank, and the returned
    /// value must be the only accessor of that bank for its lifetime.
    #[must_use]
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Bank base address
    #[must_use]
    pub const fn base(&self) -> usize {
        self.base
    }

    fn ptr(&self, csr: Csr) -> *mut u32 {
        (self.base + csr.offset()) as *mut u32
    }
}

#[cfg(feature = "embedded")]
#[allow(unsafe_code)]
impl CsrBus for MmioCsrBank {
    fn read(&mut self, csr: Csr) -> u32 {
        // SAFETY: `new` guarantees the bank is mapped and exclusively ours.
        let raw = unsafe { core::ptr::read_volatile(self.ptr(csr)) };
        raw & csr.mask()
    }

    fn write(&mut self, csr: Csr, value: u32) {
        // SAFETY: as above.
        unsafe { core::ptr::write_volatile(self.ptr(csr), value) }
    }
}
