//! # nidaqmx_ffi_backend
//!
//! The in-process [`Interpreter`](nidaqmx_backend::Interpreter) for
//! `nidaqmx_backend`, calling the NI-DAQmx C library directly.
//!
//! Linking against `NIDAQmx` needs the driver installed, so the interpreter
//! itself is behind the `hardware` feature. Configuration, status handling and
//! the buffer-sizing helpers build and test without it.
//!
//! ```ignore
//! # use nidaqmx_ffi_backend::*;
//! let system = local_system();
//! for device in system.devices().iter()? {
//!     println!("{} ({})", device.name(), device.product_type()?);
//! }
//! ```
//!
//! ## Error log
//!
//! Driver errors are appended to `nidaqmx_error.logs` in the working directory
//! by default. Point `error_log` in a [`NativeConfig`] elsewhere, or set it to
//! `None`, to change that.

pub mod buffer;
pub mod config;
pub mod error_log;
#[cfg(feature = "hardware")]
pub mod ffi;
#[cfg(feature = "hardware")]
pub mod native;

pub use config::{ConfigError, NativeConfig};
pub use error_log::{ErrorLog, StatusHandler};
#[cfg(feature = "hardware")]
pub use native::NativeInterpreter;

#[cfg(feature = "hardware")]
use nidaqmx_backend::System;
#[cfg(feature = "hardware")]
use std::sync::Arc;

/// The system of the local driver, with the default configuration.
#[cfg(feature = "hardware")]
pub fn local_system() -> System {
    local_system_with_config(NativeConfig::default())
}

#[cfg(feature = "hardware")]
pub fn local_system_with_config(config: NativeConfig) -> System {
    System::new(Arc::new(NativeInterpreter::new(config)))
}

/// The system of the local driver, configured from a TOML file.
#[cfg(feature = "hardware")]
pub fn local_system_from_file(
    path: impl AsRef<std::path::Path>,
) -> Result<System, ConfigError> {
    Ok(local_system_with_config(NativeConfig::load(path)?))
}
