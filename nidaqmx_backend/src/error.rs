//! Error types for NI-DAQmx operations.
//!
//! Every failure the binding reports is a [`DaqError`]. Its variants follow the
//! driver-facing taxonomy: caller mistakes, illegal state, timeouts, partial
//! transfers, unavailable resources and any other driver-reported failure.
//!
//! Native status codes are classified in exactly one place,
//! [`DaqError::from_status`], which every interpreter uses.

use std::fmt;
use thiserror::Error;

/// Result type alias for NI-DAQmx operations.
pub type Result<T> = std::result::Result<T, DaqError>;

/// Native status codes the binding treats specially.
pub mod codes {
    /// Task specified is invalid or does not exist.
    pub const INVALID_TASK: i32 = -200088;
    /// Task name conflicts with an existing task name.
    pub const DUPLICATE_TASK: i32 = -200089;
    /// Physical channel does not exist on the device.
    pub const PHYSICAL_CHAN_DOES_NOT_EXIST: i32 = -200170;
    /// Resource is reserved by another task.
    pub const RESOURCE_RESERVED: i32 = -200022;
    /// Device identifier is invalid.
    pub const INVALID_DEVICE_ID: i32 = -200220;
    /// String buffer too small for the requested value.
    pub const BUFFER_TOO_SMALL_FOR_STRING: i32 = -200228;
    /// Array buffer too small for the requested value.
    pub const WRITE_BUFFER_TOO_SMALL: i32 = -200229;
    /// Attempted to read a sample beyond the final sample acquired.
    pub const SAMPLES_WILL_NEVER_BE_AVAILABLE: i32 = -200278;
    /// Some or all of the samples requested have not yet been acquired.
    pub const SAMPLES_NOT_YET_AVAILABLE: i32 = -200284;
    /// Some or all of the samples to write could not be written to the buffer yet.
    pub const SAMPLES_CAN_NOT_YET_BE_WRITTEN: i32 = -200292;
    /// Property is not supported by the device or not applicable to the task.
    pub const ATTRIBUTE_NOT_SUPPORTED: i32 = -200452;
    /// Generic "operation timed out".
    pub const OPERATION_TIMED_OUT: i32 = -200474;
    /// `DAQmxWaitUntilTaskDone` returned before the task was done.
    pub const WAIT_UNTIL_DONE_DOES_NOT_INDICATE_DONE: i32 = -200560;
    /// Device cannot be accessed.
    pub const DEVICE_CANNOT_BE_ACCESSED: i32 = -201003;
    /// Network device is not reachable.
    pub const NETWORK_DEVICE_NOT_REACHABLE: i32 = -201401;
    /// The string value was truncated to fit the buffer (warning).
    pub const STRING_TRUNCATED_TO_FIT_BUFFER: i32 = 200026;
}

/// Direction of a sample transfer, carried by [`DaqError::PartialTransfer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Read,
    Write,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "written"),
        }
    }
}

/// Stable symbolic kind of a [`DaqError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    StateViolation,
    Timeout,
    PartialTransfer,
    ResourceUnavailable,
    DriverError,
}

/// Errors that can occur when working with NI-DAQmx.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DaqError {
    /// Caller-supplied arguments are malformed.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The verb is illegal in the current task state.
    #[error("{message}")]
    StateViolation { code: Option<i32>, message: String },

    /// The hardware did not complete in time and no data was transferred.
    #[error("Timeout (code {code}): {message}")]
    Timeout { code: i32, message: String },

    /// Timeout or under-run after some samples were transferred.
    #[error("Partial transfer (code {code}), {samples_per_chan} samples per channel {direction}: {message}")]
    PartialTransfer {
        code: i32,
        message: String,
        direction: TransferDirection,
        samples_per_chan: usize,
    },

    /// Device not present, not reserved, or network unreachable.
    #[error("Resource unavailable (code {code}): {message}")]
    ResourceUnavailable { code: i32, message: String },

    /// Any other driver-reported failure, code and message verbatim.
    #[error("DAQmx error (code {code}): {message}")]
    Driver { code: i32, message: String },
}

impl DaqError {
    /// Classify a native status code.
    ///
    /// `transferred` is the samples-per-channel count reported by a read or
    /// write call, if the failing call was one.
    pub fn from_status(
        code: i32,
        message: impl Into<String>,
        transferred: Option<(TransferDirection, usize)>,
    ) -> Self {
        let message = message.into();
        match code {
            codes::SAMPLES_NOT_YET_AVAILABLE
            | codes::SAMPLES_CAN_NOT_YET_BE_WRITTEN
            | codes::SAMPLES_WILL_NEVER_BE_AVAILABLE
            | codes::OPERATION_TIMED_OUT
            | codes::WAIT_UNTIL_DONE_DOES_NOT_INDICATE_DONE => match transferred {
                Some((direction, samples_per_chan)) if samples_per_chan > 0 => {
                    Self::PartialTransfer {
                        code,
                        message,
                        direction,
                        samples_per_chan,
                    }
                }
                _ if code == codes::SAMPLES_WILL_NEVER_BE_AVAILABLE => {
                    Self::Driver { code, message }
                }
                _ => Self::Timeout { code, message },
            },
            codes::INVALID_TASK => Self::StateViolation {
                code: Some(code),
                message,
            },
            codes::DUPLICATE_TASK => Self::InvalidArgument {
                message: format!("{message} (code {code})"),
            },
            codes::RESOURCE_RESERVED
            | codes::INVALID_DEVICE_ID
            | codes::PHYSICAL_CHAN_DOES_NOT_EXIST
            | codes::DEVICE_CANNOT_BE_ACCESSED
            | codes::NETWORK_DEVICE_NOT_REACHABLE => Self::ResourceUnavailable { code, message },
            _ => Self::Driver { code, message },
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn state_violation(message: impl Into<String>) -> Self {
        Self::StateViolation {
            code: None,
            message: message.into(),
        }
    }

    /// The error every verb raises once its task has been cleared.
    pub fn task_cleared(task_name: &str) -> Self {
        Self::state_violation(format!(
            "Task '{task_name}' has been cleared and can no longer be used"
        ))
    }

    /// A value came back from the driver that the binding cannot represent.
    pub fn unexpected_value(what: &str, value: impl fmt::Display) -> Self {
        Self::Driver {
            code: 0,
            message: format!("Driver returned unexpected value {value} for {what}"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::StateViolation { .. } => ErrorKind::StateViolation,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::PartialTransfer { .. } => ErrorKind::PartialTransfer,
            Self::ResourceUnavailable { .. } => ErrorKind::ResourceUnavailable,
            Self::Driver { .. } => ErrorKind::DriverError,
        }
    }

    /// Native status code, when the error came from the driver.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::InvalidArgument { .. } => None,
            Self::StateViolation { code, .. } => *code,
            Self::Timeout { code, .. }
            | Self::PartialTransfer { code, .. }
            | Self::ResourceUnavailable { code, .. }
            | Self::Driver { code, .. } => Some(*code),
        }
    }

    /// Samples per channel moved before a partial transfer failed.
    pub fn samples_transferred(&self) -> Option<usize> {
        match self {
            Self::PartialTransfer {
                samples_per_chan, ..
            } => Some(*samples_per_chan),
            _ => None,
        }
    }

    /// Re-label a driver failure as a state violation, keeping code and message.
    pub(crate) fn into_state_violation(self) -> Self {
        match self {
            Self::StateViolation { .. } | Self::InvalidArgument { .. } => self,
            other => Self::StateViolation {
                code: other.code(),
                message: other.driver_message(),
            },
        }
    }

    fn driver_message(&self) -> String {
        match self {
            Self::InvalidArgument { message }
            | Self::StateViolation { message, .. }
            | Self::Timeout { message, .. }
            | Self::PartialTransfer { message, .. }
            | Self::ResourceUnavailable { message, .. }
            | Self::Driver { message, .. } => message.clone(),
        }
    }
}
