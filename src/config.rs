//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the TDC core and the board
//! it is mapped into. Core geometry must match the parameters the gateware
//! was synthesized with; register widths and bank sizes are derived from it.

/// Number of TDC input channels, selected by scan chain position
pub const CHANNEL_COUNT: u32 = 2;

/// Width of the raw delay-line position (histogram / LUT address width)
pub const RAW_COUNT: u32 = 11;

/// Width of the fine (fractional) timestamp part
pub const FP_COUNT: u32 = 13;

/// Extra histogram counter bits beyond the fine part
pub const EXHIS_COUNT: u32 = 4;

/// Width of the ring oscillator frequency counter
pub const FCOUNTER_WIDTH: u32 = 13;

/// Width of a histogram bin value
pub const HIS_DATA_WIDTH: u32 = FP_COUNT + EXHIS_COUNT;

/// Number of histogram bins (one per raw delay-line position)
pub const HISTOGRAM_BINS: usize = 1 << RAW_COUNT;

/// Number of calibration lookup table entries
pub const LUT_ENTRIES: usize = 1 << RAW_COUNT;

/// Base address of the TDC CSR bank (FMC bank 1, FPGA chip select)
pub const TDC_CSR_BASE: usize = 0x6000_0000;

/// Stride between consecutive CSRs in bytes (32-bit CSR bus)
pub const CSR_STRIDE: usize = 4;

/// Delay between ring oscillator status polls in the diagnostic binary
pub const SELFTEST_POLL_INTERVAL_US: u32 = 10;

/// Poll budget for the diagnostic self-test before reporting a timeout
pub const SELFTEST_MAX_POLLS: u32 = 10_000;

/// Mask covering the low `width` bits of a CSR value
#[must_use]
pub const fn width_mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}
