//! Button notifications from the pigpio notification FIFO
//!
//! Setup opens a notification handle with `pigs NO`, arms it for the
//! button GPIO with `pigs NB` and opens `/dev/pigpio<handle>`. The
//! listener then blocks on the FIFO forever, turning frames into
//! debounced presses.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tridial_protocol::{ButtonDecoder, Debouncer, FrameError, PressEvent, FRAME_SIZE};

use super::{Pigs, PigsError};

/// Errors while setting up button notifications
#[derive(Debug)]
pub enum NotifierError {
    /// `pigs` failed or printed an error
    Pigs(PigsError),
    /// `pigs NO` did not return a usable handle
    InvalidHandle(String),
    /// Button GPIO cannot be observed
    Pin(FrameError),
    /// Notification FIFO could not be opened
    Open {
        /// FIFO path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl fmt::Display for NotifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierError::Pigs(e) => write!(f, "error creating notifier: {}", e),
            NotifierError::InvalidHandle(out) => {
                write!(f, "did not get a valid handle response: {:?}", out)
            }
            NotifierError::Pin(e) => write!(f, "cannot watch button: {}", e),
            NotifierError::Open { path, source } => {
                write!(f, "could not open pipe {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for NotifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotifierError::Pigs(e) => Some(e),
            NotifierError::Open { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PigsError> for NotifierError {
    fn from(e: PigsError) -> Self {
        NotifierError::Pigs(e)
    }
}

/// An open pigpio notification handle
#[derive(Debug)]
pub struct PigpioNotifier {
    pigs: Pigs,
    handle: u32,
    pipe: PathBuf,
}

impl PigpioNotifier {
    /// Acquire a notification handle with `pigs NO`
    pub fn open(pigs: Pigs) -> Result<Self, NotifierError> {
        let output = pigs.run(["NO"])?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stderr.is_empty() {
            return Err(NotifierError::Pigs(PigsError::Status {
                code: output.status.code(),
                stderr,
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let handle = parse_handle(&stdout)?;
        let pipe = pipe_path(handle);
        debug!("notification handle {} on {}", handle, pipe.display());

        Ok(Self { pigs, handle, pipe })
    }

    /// Handle number issued by the daemon
    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// FIFO carrying this handle's reports
    pub fn pipe(&self) -> &Path {
        &self.pipe
    }

    /// Report level changes for the GPIOs in `mask`
    pub fn arm(&self, mask: u32) -> Result<(), NotifierError> {
        self.pigs
            .run(["NB".to_string(), self.handle.to_string(), format!("0x{:x}", mask)])?;
        Ok(())
    }

    /// Arm for the button on `pin`, open the FIFO and start listening
    pub fn listen(self, pin: u8, debounce_ms: u64) -> Result<ButtonListener<File>, NotifierError> {
        let decoder = button_decoder(pin, debounce_ms)?;
        self.arm(decoder.pin_mask())?;

        let stream = File::open(&self.pipe).map_err(|source| NotifierError::Open {
            path: self.pipe.clone(),
            source,
        })?;
        info!("started button listener on pipe: {}", self.pipe.display());

        Ok(ButtonListener::new(stream, decoder))
    }
}

/// Blocking reader that turns a notification stream into presses
pub struct ButtonListener<R> {
    stream: R,
    decoder: ButtonDecoder,
    started: Instant,
    retry_delay: Duration,
}

impl<R: Read> ButtonListener<R> {
    /// Listen on an already armed stream
    ///
    /// The debounce window starts now. After a read error the listener
    /// waits one debounce window before reading again.
    pub fn new(stream: R, decoder: ButtonDecoder) -> Self {
        let retry_delay = Duration::from_millis(decoder.debounce_ms());
        Self {
            stream,
            decoder,
            started: Instant::now(),
            retry_delay,
        }
    }

    /// Read and decode one frame
    ///
    /// Blocks until a full frame is available. Returns `Ok(None)` for a
    /// frame that is not an accepted press.
    pub fn poll(&mut self) -> io::Result<Option<PressEvent>> {
        let mut frame = [0u8; FRAME_SIZE];
        self.stream.read_exact(&mut frame)?;

        let now_ms = self.started.elapsed().as_millis() as u64;
        match self.decoder.process(&frame, now_ms) {
            Ok(Some(press)) => {
                debug!("read event: {:02x?}", frame);
                Ok(Some(press))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!("discarding notification frame: {}", e);
                Ok(None)
            }
        }
    }

    /// Deliver presses to `on_press` forever
    ///
    /// Read errors are logged and the read is retried after a short pause.
    pub fn run(mut self, mut on_press: impl FnMut(PressEvent)) -> ! {
        loop {
            match self.poll() {
                Ok(Some(press)) => on_press(press),
                Ok(None) => {}
                Err(e) => {
                    warn!("could not read notification stream: {}", e);
                    thread::sleep(self.retry_delay);
                }
            }
        }
    }
}

/// Decoder for `pin` whose debounce window starts at listener creation
fn button_decoder(pin: u8, debounce_ms: u64) -> Result<ButtonDecoder, NotifierError> {
    ButtonDecoder::new(pin, Debouncer::new(debounce_ms, 0)).map_err(NotifierError::Pin)
}

fn parse_handle(stdout: &str) -> Result<u32, NotifierError> {
    let trimmed = stdout.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| NotifierError::InvalidHandle(trimmed.to_string()))
}

fn pipe_path(handle: u32) -> PathBuf {
    PathBuf::from(format!("/dev/pigpio{}", handle))
}
