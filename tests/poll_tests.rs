//! Poll Policy Tests
//!
//! Bounded and sleeping status waits against a device that answers late or
//! never.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test poll_tests

mod common;

use common::{FakeTdc, Op};
use embedded_hal::delay::DelayNs;
use tdc_firmware::drivers::tdc::Tdc;
use tdc_firmware::hal::csr::Csr;
use tdc_firmware::hal::poll::{DelayBackoff, MaxPolls, PollPolicy, Spin};
use tdc_firmware::types::Error;

/// Delay provider that records every requested sleep
#[derive(Default)]
struct RecordingDelay {
    sleeps_ns: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sleeps_ns.push(ns);
    }
}

// =============================================================================
// Spin
// =============================================================================

#[test]
fn spin_waits_through_slow_ready() {
    let mut fake = FakeTdc::default();
    let mut ready = vec![false; 500];
    ready.push(true);
    fake.script_flag(Csr::Ready, &ready);
    let mut tdc = Tdc::with_policy(fake, Spin);

    assert!(tdc.reset().is_ok());
    assert_eq!(tdc.bus().reads_of(Csr::Ready), 501);
}

// =============================================================================
// MaxPolls
// =============================================================================

#[test]
fn max_polls_times_out_on_dead_device() {
    let mut tdc = Tdc::with_policy(FakeTdc::default(), MaxPolls::new(5));

    assert_eq!(tdc.reset(), Err(Error::Timeout(Csr::Ready)));
    assert_eq!(tdc.bus().reads_of(Csr::Ready), 5);
}

#[test]
fn max_polls_succeeds_within_budget() {
    let mut fake = FakeTdc::default();
    fake.script_flag(Csr::OcReady, &[false, false, false, true]);
    fake.set(Csr::OcFreq, 77);
    let mut tdc = Tdc::with_policy(fake, MaxPolls::new(4));

    assert_eq!(tdc.ringosc_freq(), Ok(77));
}

#[test]
fn max_polls_budget_is_per_wait() {
    let mut fake = FakeTdc::responsive();
    fake.script_flag(Csr::Ready, &[false, false, true]);
    fake.script_flag(Csr::OcReady, &[false, false, true]);
    let mut tdc = Tdc::with_policy(fake, MaxPolls::new(3));

    assert!(tdc.reset().is_ok());
    assert!(tdc.ringosc_freq().is_ok());
}

#[test]
fn freeze_timeout_leaves_request_asserted() {
    let mut fake = FakeTdc::responsive();
    fake.set(Csr::FreezeAck, 0);
    let mut tdc = Tdc::with_policy(fake, MaxPolls::new(2));

    assert_eq!(tdc.debug_init(), Err(Error::Timeout(Csr::FreezeAck)));
    assert_eq!(tdc.bus().writes_to(Csr::FreezeReq), vec![1]);
    assert!(tdc.bus().writes_to(Csr::CsNext).is_empty());
}

#[test]
fn timeout_issues_only_status_reads() {
    let mut tdc = Tdc::with_policy(FakeTdc::default(), MaxPolls::new(3));
    let _ = tdc.ringosc_freq();

    assert_eq!(
        tdc.bus().log(),
        &[
            Op::Write(Csr::OcStart, 1),
            Op::Write(Csr::OcStart, 0),
            Op::Read(Csr::OcReady, 0),
            Op::Read(Csr::OcReady, 0),
            Op::Read(Csr::OcReady, 0),
        ]
    );
}

#[test]
fn timeout_error_names_csr() {
    let err = Error::Timeout(Csr::OcReady);
    assert_eq!(err.csr(), Csr::OcReady);
    assert_eq!(err.to_string(), "timed out waiting for oc_ready");
}

// =============================================================================
// DelayBackoff
// =============================================================================

#[test]
fn delay_backoff_sleeps_between_polls() {
    let mut fake = FakeTdc::default();
    fake.script_flag(Csr::Ready, &[false, false, true]);
    let policy = DelayBackoff::new(RecordingDelay::default(), 10);
    let mut tdc = Tdc::with_policy(fake, policy);

    assert!(tdc.reset().is_ok());
    let (_, policy) = tdc.release();
    assert_eq!(policy.into_inner().sleeps_ns, vec![10_000, 10_000]);
}

#[test]
fn delay_backoff_no_sleep_when_ready() {
    let policy = DelayBackoff::new(RecordingDelay::default(), 10);
    let mut tdc = Tdc::with_policy(FakeTdc::responsive(), policy);

    assert!(tdc.reset().is_ok());
    let (_, policy) = tdc.release();
    assert!(policy.into_inner().sleeps_ns.is_empty());
}

#[test]
fn delay_backoff_bounded() {
    let policy = DelayBackoff::new(RecordingDelay::default(), 5).with_max_polls(4);
    let mut tdc = Tdc::with_policy(FakeTdc::default(), policy);

    assert_eq!(tdc.reset(), Err(Error::Timeout(Csr::Ready)));
    assert_eq!(tdc.bus().reads_of(Csr::Ready), 4);
    let (_, policy) = tdc.release();
    assert_eq!(policy.polls(), 4);
    assert_eq!(policy.into_inner().sleeps_ns.len(), 3);
}

#[test]
fn borrowed_policy_keeps_state() {
    let mut policy = MaxPolls::new(10);
    let mut fake = FakeTdc::default();
    fake.script_flag(Csr::Ready, &[false, false, true]);
    {
        let mut tdc = Tdc::with_policy(&mut fake, &mut policy);
        assert!(tdc.reset().is_ok());
    }
    assert_eq!(policy.polls(), 2);
    policy.start();
    assert_eq!(policy.polls(), 0);
}
