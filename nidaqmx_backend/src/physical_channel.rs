use crate::attributes::{ids::physical_channel, AttributeOwner, AttributeTarget};
use crate::collections::Named;
use crate::constants::*;
use crate::device::Device;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::properties;
use crate::utils::enum_bitfield_to_list;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::trace;

/// A hardware terminal of a device, named `<device>/<terminal>`.
///
/// Compares and hashes by name.
#[derive(Clone)]
pub struct PhysicalChannel {
    name: String,
    interpreter: Arc<dyn Interpreter>,
}

impl PhysicalChannel {
    pub(crate) fn new(name: impl Into<String>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self {
            name: name.into(),
            interpreter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interpreter(&self) -> &Arc<dyn Interpreter> {
        &self.interpreter
    }

    /// The device the channel belongs to.
    pub fn device(&self) -> Device {
        let name = self.name.trim_start_matches('/');
        let device = name.split_once('/').map_or(name, |(device, _)| device);
        Device::new(device.to_string(), self.interpreter.clone())
    }

    pub fn ai_term_cfgs(&self) -> Result<Vec<TerminalConfiguration>> {
        Ok(enum_bitfield_to_list(
            self.get_attribute(physical_channel::AI_TERM_CFGS)?,
        ))
    }

    pub fn ao_term_cfgs(&self) -> Result<Vec<TerminalConfiguration>> {
        Ok(enum_bitfield_to_list(
            self.get_attribute(physical_channel::AO_TERM_CFGS)?,
        ))
    }

    /// Measurement types the channel supports.
    pub fn ai_supported_meas_types(&self) -> Result<Vec<UsageTypeAi>> {
        let raw = self.get_attribute(physical_channel::AI_SUPPORTED_MEAS_TYPES)?;
        Ok(known_members(&raw))
    }

    pub fn ao_supported_output_types(&self) -> Result<Vec<UsageTypeAo>> {
        let raw = self.get_attribute(physical_channel::AO_SUPPORTED_OUTPUT_TYPES)?;
        Ok(known_members(&raw))
    }

    properties! {
        /// Number of lines in a digital input port.
        ro di_port_width: u32 = physical_channel::DI_PORT_WIDTH;
        ro do_port_width: u32 = physical_channel::DO_PORT_WIDTH;
        ro teds_serial_num: u32 = physical_channel::TEDS_SERIAL_NUM;
        ro teds_bit_stream: Vec<u8> = physical_channel::TEDS_BIT_STREAM;
    }
}

/// Driver values newer than this binding are skipped.
fn known_members<E: DaqmxEnum>(raw: &[i32]) -> Vec<E> {
    raw.iter()
        .filter_map(|&value| {
            let member = E::from_raw(value);
            if member.is_none() {
                trace!("skipping unknown {} value {value}", E::NAME);
            }
            member
        })
        .collect()
}

impl AttributeOwner for PhysicalChannel {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        Ok((
            self.interpreter.clone(),
            AttributeTarget::PhysicalChannel(self.name.clone()),
        ))
    }
}

impl Named for PhysicalChannel {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PhysicalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalChannel")
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for PhysicalChannel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PhysicalChannel {}

impl Hash for PhysicalChannel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
