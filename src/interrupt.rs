//! Cancellation hooks for the unbounded loops of the library.
//!
//! Both the generator setup and the next-prime search run for a
//! data-dependent number of steps with no upper bound. Each loop polls once
//! per unit of work and stops with [`DrsaError::Interrupted`] as soon as the
//! poll fails. Cheap units (one generator step) call [`Interrupt::poll`];
//! costly units (one primality test) call [`Interrupt::poll_costly`].
//!
//! [`DrsaError::Interrupted`]: crate::error::DrsaError::Interrupted

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Number of cheap polls between two reads of the system clock.
const CLOCK_STRIDE: u64 = 1024;

/// Why an [`Interrupt`] stopped a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptReason {
    /// The shared cancellation flag was raised.
    Cancelled,
    /// The wall-clock deadline passed.
    DeadlineExceeded,
    /// The maximum number of polled steps was reached.
    StepBudgetExhausted,
}

impl fmt::Display for InterruptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterruptReason::Cancelled => write!(f, "cancelled"),
            InterruptReason::DeadlineExceeded => write!(f, "deadline exceeded"),
            InterruptReason::StepBudgetExhausted => write!(f, "step budget exhausted"),
        }
    }
}

/// Checkpoint consulted by long-running loops.
///
/// Implementations decide whether the next unit of work may run. A failed
/// poll must not be followed by more work from the same loop.
pub trait Interrupt {
    /// Returns `Ok(())` if one more unit of work is allowed.
    fn poll(&mut self) -> Result<(), InterruptReason>;

    /// Like [`poll`](Self::poll), for a unit of work expensive enough that
    /// every limit must be checked in full before it starts.
    fn poll_costly(&mut self) -> Result<(), InterruptReason> {
        self.poll()
    }
}

/// An [`Interrupt`] that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Interrupt for Unbounded {
    fn poll(&mut self) -> Result<(), InterruptReason> {
        Ok(())
    }
}

/// Configurable [`Interrupt`] combining a cancellation flag, a deadline and
/// a step budget.
///
/// Every limit is optional; a `Watchdog` with none of them set behaves like
/// [`Unbounded`] but still counts steps.
///
/// The step budget and the cancellation flag are checked on every poll.
/// [`poll_costly`](Interrupt::poll_costly) reads the clock every time, while
/// [`poll`](Interrupt::poll) reads it on the first poll and then once every
/// 1024 allowed polls. Rejected polls do not advance that count, so a
/// watchdog reused after a rejection keeps its sampling phase.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use drsa::interrupt::{Interrupt, InterruptReason, Watchdog};
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let mut watchdog = Watchdog::new()
///     .with_cancel_flag(Arc::clone(&flag))
///     .with_timeout(Duration::from_secs(60));
///
/// assert!(watchdog.poll().is_ok());
/// flag.store(true, Ordering::Relaxed);
/// assert_eq!(watchdog.poll(), Err(InterruptReason::Cancelled));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Watchdog {
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
    max_steps: Option<u64>,
    steps: u64,
    unclocked: u64,
}

impl Watchdog {
    /// Creates a watchdog with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops work once `flag` becomes `true`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Stops work once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops work once `timeout` has elapsed from now.
    ///
    /// A timeout too large to represent as an [`Instant`] means no deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Stops work after `max_steps` successful polls.
    pub fn with_step_budget(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Number of polls that have been allowed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Polls still allowed by the step budget, if one is set.
    pub fn remaining_steps(&self) -> Option<u64> {
        self.max_steps.map(|max| max.saturating_sub(self.steps))
    }

    fn check(&mut self, read_clock: bool) -> Result<(), InterruptReason> {
        if let Some(max) = self.max_steps {
            if self.steps >= max {
                return Err(InterruptReason::StepBudgetExhausted);
            }
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(InterruptReason::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if read_clock || self.unclocked == 0 {
                if Instant::now() >= deadline {
                    return Err(InterruptReason::DeadlineExceeded);
                }
                self.unclocked = 0;
            }
        }
        self.steps += 1;
        self.unclocked = (self.unclocked + 1) % CLOCK_STRIDE;
        Ok(())
    }
}

impl Interrupt for Watchdog {
    fn poll(&mut self) -> Result<(), InterruptReason> {
        self.check(false)
    }

    fn poll_costly(&mut self) -> Result<(), InterruptReason> {
        self.check(true)
    }
}
