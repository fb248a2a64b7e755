//! Status Polling Strategies
//!
//! Every TDC handshake ends with a wait on a status bit. The driver owns
//! the loop (read status, return on success) and asks a [`PollPolicy`]
//! between unsuccessful reads whether to keep going. Policies never touch
//! the CSR bus, so a wait issues nothing but status reads.

use embedded_hal::delay::DelayNs;

/// Decides how long a status wait may run
pub trait PollPolicy {
    /// Called once before the first status read of a wait
    fn start(&mut self) {}

    /// Called after each unsuccessful status read
    ///
    /// Return `false` to abandon the wait; the driver then reports
    /// [`Error::Timeout`](crate::types::Error::Timeout).
    fn keep_waiting(&mut self) -> bool;
}

impl<P: PollPolicy + ?Sized> PollPolicy for &mut P {
    fn start(&mut self) {
        (**self).start();
    }

    fn keep_waiting(&mut self) -> bool {
        (**self).keep_waiting()
    }
}

/// Busy-wait forever
///
/// A device that never asserts the status bit blocks the caller
/// indefinitely. This is the default policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spin;

impl PollPolicy for Spin {
    #[inline]
    fn keep_waiting(&mut self) -> bool {
        core::hint::spin_loop();
        true
    }
}

/// Busy-wait for at most a fixed number of status reads
///
/// The status is always read at least once, even for a budget of zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxPolls {
    limit: u32,
    polls: u32,
}

impl MaxPolls {
    /// Allow up to `limit` status reads per wait
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self { limit, polls: 0 }
    }

    /// Configured read budget
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Unsuccessful status reads in the current (or last) wait
    #[must_use]
    pub const fn polls(&self) -> u32 {
        self.polls
    }
}

impl PollPolicy for MaxPolls {
    fn start(&mut self) {
        self.polls = 0;
    }

    fn keep_waiting(&mut self) -> bool {
        self.polls = self.polls.saturating_add(1);
        if self.polls >= self.limit {
            return false;
        }
        core::hint::spin_loop();
        true
    }
}

/// Sleep a fixed interval between status reads
///
/// With `max_polls` set to `None` the wait is unbounded, like [`Spin`], but
/// yields the bus and core between reads.
pub struct DelayBackoff<D> {
    delay: D,
    interval_us: u32,
    max_polls: Option<u32>,
    polls: u32,
}

impl<D: DelayNs> DelayBackoff<D> {
    /// Unbounded backoff sleeping `interval_us` between reads
    #[must_use]
    pub const fn new(delay: D, interval_us: u32) -> Self {
        Self {
            delay,
            interval_us,
            max_polls: None,
            polls: 0,
        }
    }

    /// Bound each wait to `max_polls` status reads
    #[must_use]
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    /// Sleep interval in microseconds
    #[must_use]
    pub const fn interval_us(&self) -> u32 {
        self.interval_us
    }

    /// Unsuccessful status reads in the current (or last) wait
    #[must_use]
    pub const fn polls(&self) -> u32 {
        self.polls
    }

    /// Get the delay provider back
    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> PollPolicy for DelayBackoff<D> {
    fn start(&mut self) {
        self.polls = 0;
    }

    fn keep_waiting(&mut self) -> bool {
        self.polls = self.polls.saturating_add(1);
        if self.max_polls.is_some_and(|max| self.polls >= max) {
            return false;
        }
        self.delay.delay_us(self.interval_us);
        true
    }
}
