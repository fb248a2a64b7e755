//! Hardware Abstraction Layer
//!
//! Isolates the CSR transport and the polling strategy from the TDC
//! protocol logic. The driver only ever sees the [`csr::CsrBus`] and
//! [`poll::PollPolicy`] traits, so it runs unchanged against the memory
//! mapped bank on target and against scripted fakes on the host.

pub mod csr;
pub mod poll;
