//! The root of the object model.
//!
//! A [`System`] holds the interpreter session. Every device, collection, task
//! and persisted entity reached from it shares that same session.

use crate::attributes::{ids::system, AttributeOwner, AttributeTarget};
use crate::collections::{
    DeviceCollection, PersistedChannelCollection, PersistedScaleCollection,
    PersistedTaskCollection,
};
use crate::constants::Polarity;
use crate::device::Device;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::task::Task;
use crate::utils::same_interpreter;
use crate::watchdog::WatchdogTask;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Installed driver version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverVersion {
    pub major: u32,
    pub minor: u32,
    pub update: u32,
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.update)
    }
}

#[derive(Clone)]
pub struct System {
    interpreter: Arc<dyn Interpreter>,
}

impl System {
    pub fn new(interpreter: Arc<dyn Interpreter>) -> Self {
        Self { interpreter }
    }

    pub fn interpreter(&self) -> &Arc<dyn Interpreter> {
        &self.interpreter
    }

    pub fn devices(&self) -> DeviceCollection {
        DeviceCollection::new(self.interpreter.clone())
    }

    pub fn global_channels(&self) -> PersistedChannelCollection {
        PersistedChannelCollection::new(self.interpreter.clone())
    }

    pub fn scales(&self) -> PersistedScaleCollection {
        PersistedScaleCollection::new(self.interpreter.clone())
    }

    pub fn tasks(&self) -> PersistedTaskCollection {
        PersistedTaskCollection::new(self.interpreter.clone())
    }

    pub fn driver_version(&self) -> Result<DriverVersion> {
        Ok(DriverVersion {
            major: self.get_attribute(system::MAJOR_VERSION)?,
            minor: self.get_attribute(system::MINOR_VERSION)?,
            update: self.get_attribute(system::UPDATE_VERSION)?,
        })
    }

    /// Create a task on this session. An empty name lets the driver pick one.
    pub fn create_task(&self, name: &str) -> Result<Task> {
        Task::new(self.interpreter.clone(), name)
    }

    /// Load a task saved in the configuration store.
    pub fn load_task(&self, name: &str) -> Result<Task> {
        Task::load(self.interpreter.clone(), name)
    }

    /// Create a watchdog timer task on `device`. A timeout of -1 never expires.
    pub fn create_watchdog_task(
        &self,
        device: &str,
        name: &str,
        timeout: f64,
    ) -> Result<WatchdogTask> {
        WatchdogTask::new(self.interpreter.clone(), device, name, timeout)
    }

    /// Route a signal between two terminals outside of any task.
    pub fn connect_terms(
        &self,
        source_terminal: &str,
        destination_terminal: &str,
        signal_modifiers: Polarity,
    ) -> Result<()> {
        self.interpreter
            .connect_terms(source_terminal, destination_terminal, signal_modifiers)?;
        debug!("Connected '{source_terminal}' to '{destination_terminal}'");
        Ok(())
    }

    pub fn disconnect_terms(&self, source_terminal: &str, destination_terminal: &str) -> Result<()> {
        self.interpreter
            .disconnect_terms(source_terminal, destination_terminal)?;
        debug!("Disconnected '{source_terminal}' from '{destination_terminal}'");
        Ok(())
    }

    /// Put an output terminal in high-impedance state.
    pub fn tristate_output_term(&self, output_terminal: &str) -> Result<()> {
        self.interpreter.tristate_output_term(output_terminal)
    }

    /// Add a network device and return it under the name the driver gave it.
    pub fn add_network_device(
        &self,
        ip_address: &str,
        device_name: &str,
        attempt_reservation: bool,
        timeout: f64,
    ) -> Result<Device> {
        let name = self.interpreter.add_network_device(
            ip_address,
            device_name,
            attempt_reservation,
            timeout,
        )?;
        debug!("Added network device '{name}' at {ip_address}");
        Ok(Device::new(name, self.interpreter.clone()))
    }
}

impl AttributeOwner for System {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        Ok((self.interpreter.clone(), AttributeTarget::System))
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("interpreter", &self.interpreter)
            .finish()
    }
}

/// Two systems are equal when they share an interpreter session.
impl PartialEq for System {
    fn eq(&self, other: &Self) -> bool {
        same_interpreter(&self.interpreter, &other.interpreter)
    }
}
