//! pigpio daemon access through the `pigs` command line utility
//!
//! Every hardware operation is a short-lived `pigs` invocation:
//! - `pigs p <gpio> <duty>` sets a PWM duty (0-255)
//! - `pigs NO` opens a notification handle
//! - `pigs NB <handle> <mask>` starts notifications for a GPIO bitmask

pub mod notifier;
pub mod pwm;

pub use notifier::{ButtonListener, NotifierError, PigpioNotifier};
pub use pwm::PigsChannel;

use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Output};

use log::trace;

/// Errors from a `pigs` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PigsError {
    /// The utility could not be started
    Spawn(io::ErrorKind),
    /// The utility exited unsuccessfully
    Status {
        /// Exit code, `None` if killed by a signal
        code: Option<i32>,
        /// Trimmed standard error output
        stderr: String,
    },
}

impl fmt::Display for PigsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PigsError::Spawn(kind) => write!(f, "could not run pigs: {}", kind),
            PigsError::Status { code: Some(code), stderr } => {
                write!(f, "pigs exited with status {}: {}", code, stderr)
            }
            PigsError::Status { code: None, stderr } => {
                write!(f, "pigs terminated by signal: {}", stderr)
            }
        }
    }
}

impl std::error::Error for PigsError {}

/// Handle on the `pigs` utility
#[derive(Debug, Clone)]
pub struct Pigs {
    program: PathBuf,
}

impl Pigs {
    /// Use `program` as the `pigs` executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// PWM output on one GPIO
    pub fn pwm_channel(&self, pin: u8) -> PigsChannel {
        PigsChannel::new(self.clone(), pin)
    }

    /// Run one command and capture its output
    ///
    /// Spawn failures and non-zero exits are errors. A successful run may
    /// still carry text on stderr; callers decide what that means.
    pub fn run<I, S>(&self, args: I) -> Result<Output, PigsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args);
        trace!("running {:?}", command);

        let output = command
            .output()
            .map_err(|e| PigsError::Spawn(e.kind()))?;

        if !output.status.success() {
            return Err(PigsError::Status {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}
