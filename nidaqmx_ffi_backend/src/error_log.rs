//! Status-code handling shared by every native call.
//!
//! Negative codes become [`DaqError`]s; positive codes are warnings and are
//! only logged. Driver errors are also appended to an error log file when one
//! is configured, one `DAQmx Error <code>: <message>` line per error.

use nidaqmx_backend::{DaqError, Result, TransferDirection};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Append-only log of driver errors. The file is opened on the first error.
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, code: i32, message: &str) {
        let mut file = self.file.lock();
        if file.is_none() {
            match OpenOptions::new().append(true).create(true).open(&self.path) {
                Ok(opened) => *file = Some(opened),
                Err(err) => {
                    warn!("Failed to open {}: {err}", self.path.display());
                    return;
                }
            }
        }
        if let Some(file) = file.as_mut() {
            if let Err(err) = writeln!(file, "DAQmx Error {code}: {message}") {
                warn!("Failed to write to {}: {err}", self.path.display());
            }
        }
    }
}

/// Turns driver status codes into results.
#[derive(Debug, Default)]
pub struct StatusHandler {
    log: Option<ErrorLog>,
}

impl StatusHandler {
    pub fn new(log: Option<ErrorLog>) -> Self {
        Self { log }
    }

    pub fn log(&self) -> Option<&ErrorLog> {
        self.log.as_ref()
    }

    /// Check one status code. `describe` fetches the driver's message and is
    /// only called for non-zero codes.
    pub fn check(
        &self,
        status: i32,
        describe: impl FnOnce(i32) -> String,
        transferred: Option<(TransferDirection, usize)>,
    ) -> Result<()> {
        match status {
            0 => Ok(()),
            status if status > 0 => {
                warn!("DAQmx warning {status}: {}", describe(status));
                Ok(())
            }
            status => Err(self.error(status, describe(status), transferred)),
        }
    }

    /// Log a negative status and classify it.
    pub fn error(
        &self,
        status: i32,
        message: String,
        transferred: Option<(TransferDirection, usize)>,
    ) -> DaqError {
        debug!("DAQmx error {status}: {message}");
        if let Some(log) = &self.log {
            log.append(status, &message);
        }
        DaqError::from_status(status, message, transferred)
    }
}
