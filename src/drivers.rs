//! Peripheral Drivers
//!
//! Protocol-level drivers built on the HAL's CSR bus and poll traits.

pub mod debug_session;
pub mod tdc;
