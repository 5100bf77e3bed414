//! Devices known to the driver.
//!
//! A [`Device`] holds no driver resources: it is a name plus the interpreter
//! session it was found through, and every property is read on demand.

use crate::attributes::{ids::device, AttributeOwner, AttributeTarget};
use crate::collections::{Named, PhysicalChannelCollection, PhysicalChannelKind};
use crate::constants::*;
use crate::error::{DaqError, Result};
use crate::interpreter::Interpreter;
use crate::properties;
use crate::utils::enum_bitfield_to_list;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Device {
    name: String,
    interpreter: Arc<dyn Interpreter>,
}

impl Device {
    pub(crate) fn new(name: String, interpreter: Arc<dyn Interpreter>) -> Self {
        Self { name, interpreter }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interpreter(&self) -> &Arc<dyn Interpreter> {
        &self.interpreter
    }

    /// Abort every task on the device and return it to its power-up state.
    pub fn reset_device(&self) -> Result<()> {
        self.interpreter.reset_device(&self.name)?;
        debug!("Reset device '{}'", self.name);
        Ok(())
    }

    pub fn self_test_device(&self) -> Result<()> {
        self.interpreter.self_test_device(&self.name)
    }

    /// Remove a network device from the system.
    pub fn delete_network_device(self) -> Result<()> {
        self.interpreter.delete_network_device(&self.name)?;
        debug!("Deleted network device '{}'", self.name);
        Ok(())
    }

    pub fn reserve_network_device(&self, override_reservation: bool) -> Result<()> {
        self.interpreter
            .reserve_network_device(&self.name, override_reservation)
    }

    pub fn unreserve_network_device(&self) -> Result<()> {
        self.interpreter.unreserve_network_device(&self.name)
    }

    /// Modules installed in a CompactDAQ chassis.
    pub fn chassis_module_devices(&self) -> Result<Vec<Device>> {
        Ok(self
            .get_attribute(device::CHASSIS_MODULE_DEV_NAMES)?
            .into_iter()
            .map(|name| Device::new(name, self.interpreter.clone()))
            .collect())
    }

    /// The chassis this module is installed in.
    pub fn compact_daq_chassis_device(&self) -> Result<Device> {
        let name = self.get_attribute(device::COMPACT_DAQ_CHASSIS_DEV_NAME)?;
        Ok(Device::new(name, self.interpreter.clone()))
    }

    pub fn ai_physical_chans(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::AnalogInput)
    }

    pub fn ao_physical_chans(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::AnalogOutput)
    }

    pub fn ci_physical_chans(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::CounterInput)
    }

    pub fn co_physical_chans(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::CounterOutput)
    }

    pub fn di_lines(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::DigitalInputLines)
    }

    pub fn di_ports(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::DigitalInputPorts)
    }

    pub fn do_lines(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::DigitalOutputLines)
    }

    pub fn do_ports(&self) -> PhysicalChannelCollection {
        self.physical_channels(PhysicalChannelKind::DigitalOutputPorts)
    }

    fn physical_channels(&self, kind: PhysicalChannelKind) -> PhysicalChannelCollection {
        PhysicalChannelCollection::new(self.name.clone(), kind, self.interpreter.clone())
    }

    /// Triggers the device supports for analog input.
    pub fn ai_trig_usage(&self) -> Result<Vec<TriggerUsage>> {
        Ok(enum_bitfield_to_list(self.get_attribute(device::AI_TRIG_USAGE)?))
    }

    pub fn ao_trig_usage(&self) -> Result<Vec<TriggerUsage>> {
        Ok(enum_bitfield_to_list(self.get_attribute(device::AO_TRIG_USAGE)?))
    }

    /// Input ranges as `(low, high)` pairs.
    pub fn ai_voltage_rngs(&self) -> Result<Vec<(f64, f64)>> {
        range_pairs(self.get_attribute(device::AI_VOLTAGE_RNGS)?)
    }

    pub fn ao_voltage_rngs(&self) -> Result<Vec<(f64, f64)>> {
        range_pairs(self.get_attribute(device::AO_VOLTAGE_RNGS)?)
    }

    properties! {
        ro product_type: String = device::PRODUCT_TYPE;
        ro product_num: u32 = device::PRODUCT_NUM;
        ro product_category: ProductCategory = device::PRODUCT_CATEGORY;
        ro serial_num: u32 = device::SERIAL_NUM;
        ro is_simulated: bool = device::IS_SIMULATED;
        ro tcpip_hostname: String = device::TCPIP_HOSTNAME;
        /// Every terminal of the device, as `/<device>/<terminal>`.
        ro terminals: Vec<String> = device::TERMINALS;
        ro num_dma_chans: u32 = device::NUM_DMA_CHANS;
        ro ai_max_single_chan_rate: f64 = device::AI_MAX_SINGLE_CHAN_RATE;
        ro ai_max_multi_chan_rate: f64 = device::AI_MAX_MULTI_CHAN_RATE;
        ro anlg_trig_supported: bool = device::ANLG_TRIG_SUPPORTED;
        ro dig_trig_supported: bool = device::DIG_TRIG_SUPPORTED;
    }
}

fn range_pairs(flat: Vec<f64>) -> Result<Vec<(f64, f64)>> {
    if flat.len() % 2 != 0 {
        return Err(DaqError::unexpected_value(
            "range table length",
            flat.len(),
        ));
    }
    Ok(flat.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

impl AttributeOwner for Device {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        Ok((
            self.interpreter.clone(),
            AttributeTarget::Device(self.name.clone()),
        ))
    }
}

impl Named for Device {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device").field("name", &self.name).finish()
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Device {}

impl Hash for Device {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
