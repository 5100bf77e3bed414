//! Watchdog timer tasks.
//!
//! A watchdog task drives output lines to configured safe states when its
//! timer expires. The application keeps it alive by calling
//! [`WatchdogTask::reset_timer`] faster than the timeout; once expired, the
//! outputs stay in their expiration states until
//! [`WatchdogTask::clear_expiration`].
//!
//! ```ignore
//! let watchdog = system.create_watchdog_task("Dev1", "wd", 0.5)?;
//! watchdog.cfg_watchdog_do_expir_states(&[DoExpirationState {
//!     physical_channel: "Dev1/port0/line0".into(),
//!     expiration_state: DigitalLineState::Low,
//! }])?;
//! watchdog.start()?;
//! loop {
//!     watchdog.reset_timer()?;
//!     // ...
//! }
//! ```

use crate::attributes::{ids::watchdog, AttributeOwner, AttributeTarget};
use crate::channel_string::{flatten_channel_string, unflatten_channel_string};
use crate::constants::*;
use crate::error::{DaqError, Result};
use crate::interpreter::Interpreter;
use crate::properties;
use crate::task::{Task, TaskCore, TaskState};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

/// Expiration state of an analog output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AoExpirationState {
    pub physical_channel: String,
    pub expiration_state: f64,
    pub output_type: WatchdogAoExpirState,
}

/// Expiration state of a counter output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct CoExpirationState {
    pub physical_channel: String,
    pub expiration_state: WatchdogCoExpirState,
}

/// Expiration state of a digital line or port.
#[derive(Debug, Clone, PartialEq)]
pub struct DoExpirationState {
    pub physical_channel: String,
    pub expiration_state: DigitalLineState,
}

/// A task whose payload is a set of per-line expiration states.
///
/// Derefs to [`Task`] for the lifecycle verbs.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct WatchdogTask {
    task: Task,
}

impl WatchdogTask {
    /// Create a watchdog timer task on `device`. An empty name lets the
    /// driver pick one; a timeout of -1 never expires.
    pub fn new(
        interpreter: Arc<dyn Interpreter>,
        device: &str,
        name: &str,
        timeout: f64,
    ) -> Result<Self> {
        let handle = interpreter.create_watchdog_timer_task(device, name, timeout)?;
        let task = Task::adopt(interpreter, handle, TaskState::Configured)?;
        debug!(
            "Created watchdog task '{}' on '{device}' with a {timeout} s timeout",
            task.name()
        );
        Ok(Self { task })
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn cfg_watchdog_ao_expir_states(&self, states: &[AoExpirationState]) -> Result<()> {
        let channels = expiration_channels(states.iter().map(|s| &s.physical_channel))?;
        let values: Vec<f64> = states.iter().map(|s| s.expiration_state).collect();
        let output_types: Vec<WatchdogAoExpirState> =
            states.iter().map(|s| s.output_type).collect();
        self.task.interpreter().cfg_watchdog_ao_expir_states(
            self.task.handle()?,
            &channels,
            &values,
            &output_types,
        )?;
        debug!("Configured AO expiration states on '{channels}'");
        Ok(())
    }

    pub fn cfg_watchdog_co_expir_states(&self, states: &[CoExpirationState]) -> Result<()> {
        let channels = expiration_channels(states.iter().map(|s| &s.physical_channel))?;
        let values: Vec<WatchdogCoExpirState> =
            states.iter().map(|s| s.expiration_state).collect();
        self.task.interpreter().cfg_watchdog_co_expir_states(
            self.task.handle()?,
            &channels,
            &values,
        )?;
        debug!("Configured CO expiration states on '{channels}'");
        Ok(())
    }

    pub fn cfg_watchdog_do_expir_states(&self, states: &[DoExpirationState]) -> Result<()> {
        let channels = expiration_channels(states.iter().map(|s| &s.physical_channel))?;
        let values: Vec<DigitalLineState> = states.iter().map(|s| s.expiration_state).collect();
        self.task.interpreter().cfg_watchdog_do_expir_states(
            self.task.handle()?,
            &channels,
            &values,
        )?;
        debug!("Configured DO expiration states on '{channels}'");
        Ok(())
    }

    /// Restart the countdown.
    pub fn reset_timer(&self) -> Result<()> {
        self.control(WatchdogControlAction::ResetTimer)
    }

    /// Release the outputs from their expiration states.
    pub fn clear_expiration(&self) -> Result<()> {
        self.control(WatchdogControlAction::ClearExpiration)?;
        debug!("Cleared expiration of watchdog task '{}'", self.task.name());
        Ok(())
    }

    fn control(&self, action: WatchdogControlAction) -> Result<()> {
        self.task
            .interpreter()
            .control_watchdog_task(self.task.handle()?, action)
    }

    /// Whether the timer has expired. Only readable while the task runs.
    pub fn expired(&self) -> Result<bool> {
        match self.get_attribute(watchdog::HAS_EXPIRED) {
            Err(err) if self.task.state() != TaskState::Running => Err(err.into_state_violation()),
            result => result,
        }
    }

    /// Per-channel expiration states.
    pub fn expiration_states(&self) -> ExpirationStateCollection<'_> {
        ExpirationStateCollection { task: &self.task }
    }

    properties! {
        /// Seconds until expiration; -1 disables the timer.
        rw timeout / set_timeout / reset_timeout: f64 = watchdog::TIMEOUT;
        rw expir_trig_type / set_expir_trig_type / reset_expir_trig_type:
            TriggerType = watchdog::EXPIR_TRIG_TYPE;
        rw expir_trig_on_network_conn_loss / set_expir_trig_on_network_conn_loss
            / reset_expir_trig_on_network_conn_loss: bool = watchdog::EXPIR_TRIG_ON_NETWORK_CONN_LOSS;
        rw dig_edge_expir_trig_src / set_dig_edge_expir_trig_src / reset_dig_edge_expir_trig_src:
            String = watchdog::DIG_EDGE_EXPIR_TRIG_SRC;
        rw dig_edge_expir_trig_edge / set_dig_edge_expir_trig_edge / reset_dig_edge_expir_trig_edge:
            Edge = watchdog::DIG_EDGE_EXPIR_TRIG_EDGE;
    }
}

fn expiration_channels<'s>(names: impl Iterator<Item = &'s String>) -> Result<String> {
    let names: Vec<&String> = names.collect();
    if names.is_empty() {
        return Err(DaqError::invalid_argument(
            "at least one expiration state is required",
        ));
    }
    flatten_channel_string(&names)
}

impl Deref for WatchdogTask {
    type Target = Task;

    fn deref(&self) -> &Task {
        &self.task
    }
}

impl AttributeOwner for WatchdogTask {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        Ok((
            self.task.interpreter().clone(),
            AttributeTarget::Watchdog(self.task.handle()?, String::new()),
        ))
    }
}

/// The expiration states of a watchdog task, indexed by physical channel.
#[derive(Clone, Copy)]
pub struct ExpirationStateCollection<'a> {
    task: &'a TaskCore,
}

impl<'a> ExpirationStateCollection<'a> {
    /// The expiration state of one or more physical channels.
    pub fn get(&self, physical_channel: &str) -> Result<ExpirationState<'a>> {
        let lines = unflatten_channel_string(physical_channel)?;
        if lines.is_empty() {
            return Err(DaqError::invalid_argument(format!(
                "'{physical_channel}' does not name any physical channel"
            )));
        }
        Ok(ExpirationState {
            task: self.task,
            physical_channel: flatten_channel_string(&lines)?,
        })
    }
}

impl fmt::Debug for ExpirationStateCollection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpirationStateCollection")
            .field("task", &self.task.name())
            .finish()
    }
}

/// Expiration state of one or more physical channels of a watchdog task.
#[derive(Clone)]
pub struct ExpirationState<'a> {
    task: &'a TaskCore,
    physical_channel: String,
}

impl ExpirationState<'_> {
    pub fn physical_channel(&self) -> &str {
        &self.physical_channel
    }

    properties! {
        rw ao_state / set_ao_state / reset_ao_state: f64 = watchdog::AO_EXPIR_STATE;
        rw ao_output_type / set_ao_output_type / reset_ao_output_type:
            WatchdogAoExpirState = watchdog::AO_OUTPUT_TYPE;
        rw co_state / set_co_state / reset_co_state: WatchdogCoExpirState = watchdog::CO_EXPIR_STATE;
        rw do_state / set_do_state / reset_do_state: DigitalLineState = watchdog::DO_EXPIR_STATE;
    }
}

impl AttributeOwner for ExpirationState<'_> {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        Ok((
            self.task.interpreter().clone(),
            AttributeTarget::Watchdog(self.task.handle()?, self.physical_channel.clone()),
        ))
    }
}

impl fmt::Debug for ExpirationState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpirationState")
            .field("physical_channel", &self.physical_channel)
            .finish()
    }
}
