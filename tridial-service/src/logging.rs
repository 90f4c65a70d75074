//! Logger setup
//!
//! `env_logger` filtered by `RUST_LOG` (default `info`). When a log file is
//! configured every line also goes to that file, opened for append.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};

use env_logger::{Builder, Env, Target};
use log::warn;

/// Writes every line to stdout and the log file
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

/// Install the global logger
///
/// A log file that cannot be opened is reported and skipped.
pub fn init(file: Option<&str>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    let mut open_error = None;
    if let Some(path) = file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(Tee { file })));
            }
            Err(e) => open_error = Some((path, e)),
        }
    }
    builder.init();

    if let Some((path, e)) = open_error {
        warn!("could not open log file {}: {}, logging to stdout only", path, e);
    }
}
