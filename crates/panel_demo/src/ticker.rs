use std::time::{Duration, Instant};

/// A fixed-rate repeating timer, polled by the event loop.
///
/// Like a repeating timer channel, ticks that are missed while the loop was busy are dropped,
/// not delivered in a burst.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    next: Instant,
    stopped: bool,
}

impl Ticker {
    /// The first tick is one `period` after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
            stopped: false,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the event loop should wake up next, or `None` once stopped.
    pub fn deadline(&self) -> Option<Instant> {
        (!self.stopped).then_some(self.next)
    }

    /// Returns `true` if a tick is due at `now`, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.stopped || now < self.next {
            return false;
        }

        self.next += self.period;
        if self.next <= now {
            // We fell behind: skip the missed ticks.
            let behind = now.duration_since(self.next);
            let missed = behind.as_nanos() / self.period.as_nanos().max(1) + 1;
            self.next += self.period * u32::try_from(missed).unwrap_or(u32::MAX);
        }
        true
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
