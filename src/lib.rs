//! TDC Control Driver Library
//!
//! Control driver for an FPGA time-to-digital converter (TDC) core mapped
//! into the MCU address space over FMC. The core measures time intervals
//! on its input channels and exposes a small control/status register (CSR)
//! bank for reset, a debug freeze with a steppable internal scan chain, a
//! ring oscillator frequency self-test, and histogram readback.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DRIVER LAYER                            │
//! │  Tdc (reset / debug / self-test / readback)  │  DebugSession │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       HAL LAYER                              │
//! │  CsrBus (MMIO bank or test fake)  │  PollPolicy (spin/delay) │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   FPGA TDC CORE (CSRs)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Stateless driver**: All device state lives in hardware and is
//!   re-read on every call
//! - **Injected transport**: The CSR bank is a trait, never a global
//! - **Injected waiting**: Status polls go through a policy; the default
//!   spins forever, bounded policies turn a dead device into an error
//! - **No unsafe in driver code**: Volatile access isolated in the HAL

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// CSR transport and status polling strategies.
pub mod hal;

/// Peripheral Drivers
///
/// TDC control protocol and the scoped debug session.
pub mod drivers;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::drivers::debug_session::DebugSession;
    pub use crate::drivers::tdc::Tdc;
    pub use crate::hal::csr::{Csr, CsrBus};
    pub use crate::hal::poll::{DelayBackoff, MaxPolls, PollPolicy, Spin};
    pub use crate::types::*;

    #[cfg(feature = "embedded")]
    pub use crate::hal::csr::MmioCsrBank;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
