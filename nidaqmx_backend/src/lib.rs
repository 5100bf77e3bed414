//! # nidaqmx_backend
//!
//! An object model for National Instruments DAQmx that does not depend on the
//! driver itself. Every call into the driver goes through the [`Interpreter`]
//! trait; `nidaqmx_ffi_backend` provides the implementation that binds the
//! NI-DAQmx C library.
//!
//! ## Overview
//!
//! - [`System`]: the entry point. Devices, saved channels, scales and tasks,
//!   driver version, terminal routing.
//! - [`Task`]: owns a driver task handle and walks the
//!   `Created -> Configured -> Running -> Stopped -> Cleared` state machine.
//!   Channels are added through its channel collections, timing and triggers
//!   through [`Timing`] and [`Triggers`], and data moves through
//!   [`Task::read`]/[`Task::write`] or the stream readers and writers.
//! - [`WatchdogTask`]: a watchdog timer with per-line expiration states.
//! - [`unflatten_channel_string`] / [`flatten_channel_string`]: the
//!   `"Dev1/ai0:3, Dev1/ai7"` channel-list syntax used everywhere.
//!
//! ```ignore
//! let system = System::new(interpreter);
//! let task = system.create_task("acquire")?;
//! task.ai_channels()
//!     .add_ai_voltage_chan("Dev1/ai0:3", "", AiVoltageParams::default())?;
//! task.timing()
//!     .cfg_samp_clk_timing(1e4, "", Edge::Rising, AcquisitionType::Finite, 1000)?;
//! task.start()?;
//! let data = task.read(None, 10.0)?;
//! task.close()?;
//! ```
//!
//! Errors are [`DaqError`]s; [`DaqError::kind`] sorts them into the few
//! categories callers act on.

pub mod attributes;
pub mod channel;
pub mod channel_config;
pub mod channel_string;
pub mod collections;
pub mod constants;
pub mod device;
pub mod error;
pub mod events;
pub mod interpreter;
pub mod persisted;
pub mod physical_channel;
pub mod stream_readers;
pub mod stream_writers;
pub mod system;
pub mod task;
pub mod utils;
pub mod watchdog;

#[cfg(test)]
pub(crate) mod dummy;

pub use attributes::{Attribute, AttributeOwner, AttributeTarget};
pub use channel::*;
pub use channel_config::*;
pub use channel_string::{flatten_channel_string, unflatten_channel_string};
pub use collections::*;
pub use constants::*;
pub use device::Device;
pub use error::{DaqError, ErrorKind, Result, TransferDirection};
pub use events::{EventKind, EventSlot};
pub use interpreter::*;
pub use persisted::*;
pub use physical_channel::PhysicalChannel;
pub use stream_readers::*;
pub use stream_writers::*;
pub use system::{DriverVersion, System};
pub use task::*;
pub use utils::*;
pub use watchdog::*;
