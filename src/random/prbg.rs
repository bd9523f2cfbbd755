//! PRBG: pseudo-random byte generator with a pattern-triggered setup delay.
//!
//! The generator is a [`XorShift`] register seeded from PBKDF2 output. Before
//! use it goes through a setup procedure: bytes are produced and pushed
//! into a [`RotatingWindow`] until the window equals the confusion pattern,
//! then 64 fresh bytes reseed the register. This repeats `iteration_count`
//! times. The window is never cleared between rounds.
//!
//! For a pattern of `L` bytes one round costs about `256^L` steps, so the
//! whole setup costs about `iteration_count * 256^L` steps with no upper
//! bound. [`Prbg::setup_with`] accepts an [`Interrupt`] to stop it, and an
//! interrupted setup resumes exactly where it stopped.

use std::fmt;

use tracing::{debug, warn};

use super::byte_source::ByteSource;
use super::seed::{self, SEED_LEN};
use super::window::RotatingWindow;
use super::xorshift::XorShift;
use crate::error::DrsaError;
use crate::interrupt::{Interrupt, Unbounded};

/// Pseudo-random byte generator driven by a password, a confusion string
/// and an iteration count.
///
/// # Examples
///
/// ```
/// use drsa::random::prbg::Prbg;
///
/// let mut prbg = Prbg::new("password", "x", 1).unwrap();
/// prbg.setup().unwrap();
/// assert!(prbg.is_set_up());
///
/// let mut again = Prbg::new("password", "x", 1).unwrap();
/// again.setup().unwrap();
/// assert_eq!(prbg.next_byte(), again.next_byte());
/// ```
#[derive(Debug, Clone)]
pub struct Prbg {
    generator: XorShift,
    iteration_count: u32,
    pattern: Vec<u8>,
    window: RotatingWindow,
    rounds_completed: u32,
    round_steps: u64,
    steps: u64,
    setup_complete: bool,
}

impl Prbg {
    /// Creates a generator from its three textual inputs.
    ///
    /// The confusion string is validated before PBKDF2 runs, so invalid
    /// input never pays for key stretching.
    ///
    /// # Parameters
    /// - `password`: Textual password.
    /// - `confusion_string`: 1 to 31 characters.
    /// - `iteration_count`: PBKDF2 rounds and setup rounds (minimum 1).
    ///
    /// # Errors
    /// - [`DrsaError::EmptyConfusionString`] / [`DrsaError::ConfusionStringTooLong`]
    ///   for an unusable confusion string.
    /// - [`DrsaError::InvalidIterationCount`] if `iteration_count == 0`.
    pub fn new(
        password: &str,
        confusion_string: &str,
        iteration_count: u32,
    ) -> Result<Self, DrsaError> {
        let pattern = seed::confusion_pattern(confusion_string)?;
        let block = seed::derive_seed(password, confusion_string, iteration_count)?;
        Self::build(&block, pattern, iteration_count)
    }

    /// Creates a generator from an explicit 64-byte seed block.
    ///
    /// Unlike [`new`](Self::new), an `iteration_count` of 0 is accepted and
    /// makes [`setup`](Self::setup) a no-op that leaves the register as
    /// seeded.
    ///
    /// # Errors
    /// - [`DrsaError::InvalidSeedBlock`] if `seed_block` is not 64 bytes.
    /// - Confusion string errors as for [`new`](Self::new).
    pub fn with_seed(
        seed_block: &[u8],
        confusion_string: &str,
        iteration_count: u32,
    ) -> Result<Self, DrsaError> {
        let pattern = seed::confusion_pattern(confusion_string)?;
        Self::build(seed_block, pattern, iteration_count)
    }

    fn build(seed_block: &[u8], pattern: Vec<u8>, iteration_count: u32) -> Result<Self, DrsaError> {
        let generator = XorShift::from_seed_block(seed_block)?;
        let window = RotatingWindow::new(pattern.len());
        Ok(Prbg {
            generator,
            iteration_count,
            pattern,
            window,
            rounds_completed: 0,
            round_steps: 0,
            steps: 0,
            setup_complete: false,
        })
    }

    /// Runs the setup procedure to completion.
    ///
    /// May take an arbitrarily long time; use [`setup_with`](Self::setup_with)
    /// to bound it.
    pub fn setup(&mut self) -> Result<(), DrsaError> {
        self.setup_with(&mut Unbounded)
    }

    /// Runs the setup procedure, polling `interrupt` before every generator
    /// step.
    ///
    /// The 64-byte reseed that closes a round is never split by an
    /// interruption. On error the progress made so far is kept and calling
    /// this method again continues from the same point, producing the same
    /// final state as an uninterrupted run. Calling it on a generator that
    /// is already set up does nothing.
    ///
    /// # Errors
    /// Returns [`DrsaError::Interrupted`] if `interrupt` stops the loop.
    pub fn setup_with(&mut self, interrupt: &mut dyn Interrupt) -> Result<(), DrsaError> {
        while self.rounds_completed < self.iteration_count {
            if let Err(reason) = interrupt.poll() {
                warn!(
                    round = self.rounds_completed + 1,
                    rounds = self.iteration_count,
                    steps = self.steps,
                    %reason,
                    "PRBG setup interrupted"
                );
                return Err(reason.into());
            }

            let byte = self.generator.next_byte();
            self.window.push(byte);
            self.round_steps += 1;
            self.steps += 1;

            if self.window.matches(&self.pattern) {
                let mut block = [0u8; SEED_LEN];
                for b in block.iter_mut() {
                    *b = self.generator.next_byte();
                }
                self.generator.reseed(&block);
                self.rounds_completed += 1;
                debug!(
                    round = self.rounds_completed,
                    rounds = self.iteration_count,
                    round_steps = self.round_steps,
                    "PRBG setup round complete"
                );
                self.round_steps = 0;
            }
        }

        if !self.setup_complete {
            self.setup_complete = true;
            debug!(steps = self.steps, "PRBG set up");
        }
        Ok(())
    }

    /// Produces the next byte of the stream.
    pub fn next_byte(&mut self) -> u8 {
        self.generator.next_byte()
    }

    /// Returns `true` once every setup round has completed.
    pub fn is_set_up(&self) -> bool {
        self.setup_complete
    }

    /// Number of setup rounds requested.
    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    /// Number of setup rounds finished so far.
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    /// Generator steps spent searching for the pattern, across all rounds.
    ///
    /// The 64 bytes drawn for each reseed are not counted.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The confusion pattern the setup procedure searches for.
    pub fn confusion_pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// The rotating window as left by the setup procedure.
    pub fn window(&self) -> &RotatingWindow {
        &self.window
    }

    /// Current value of the 64-bit register.
    pub fn state(&self) -> i64 {
        self.generator.state()
    }
}

impl ByteSource for Prbg {
    fn next_byte(&mut self) -> u8 {
        self.generator.next_byte()
    }
}

impl fmt::Display for Prbg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PRBG generator:")?;
        writeln!(
            f,
            "  confusion pattern: {:?} (len={})",
            self.pattern,
            self.pattern.len()
        )?;
        writeln!(f, "  iteration count: {}", self.iteration_count)?;
        write!(
            f,
            "  set up: {}",
            if self.setup_complete { "yes" } else { "no" }
        )
    }
}
