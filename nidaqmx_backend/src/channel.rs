//! Virtual channels.
//!
//! A [`Channel`] names one or more virtual channels of a task (its name may be a
//! flattened channel string). It keeps a `Weak` back-reference, so it never
//! keeps a task alive; once the task is closed or dropped every attribute access
//! fails with a state violation.
//!
//! The typed wrappers ([`AiChannel`], [`AoChannel`], ...) add the properties of
//! their channel kind and deref to [`Channel`] for the common ones.

use crate::attributes::{ids::channel, AttributeOwner, AttributeTarget};
use crate::channel_string::unflatten_channel_string;
use crate::collections::Named;
use crate::constants::*;
use crate::error::{DaqError, Result};
use crate::interpreter::Interpreter;
use crate::physical_channel::PhysicalChannel;
use crate::properties;
use crate::task::TaskCore;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, Weak};

#[derive(Clone)]
pub struct Channel {
    task: Weak<TaskCore>,
    name: String,
}

impl Channel {
    pub(crate) fn new(task: Weak<TaskCore>, name: String) -> Self {
        Self { task, name }
    }

    /// The channel's name, possibly a flattened list of channels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One name per virtual channel this object covers.
    pub fn channel_names(&self) -> Result<Vec<String>> {
        unflatten_channel_string(&self.name)
    }

    /// The owning task, while it is still open.
    pub fn task(&self) -> Result<Arc<TaskCore>> {
        match self.task.upgrade() {
            Some(task) if !task.is_cleared() => Ok(task),
            Some(task) => Err(DaqError::task_cleared(task.name())),
            None => Err(DaqError::state_violation(format!(
                "Channel '{}' belongs to a task that no longer exists",
                self.name
            ))),
        }
    }

    /// The physical channel behind the first virtual channel.
    pub fn physical_channel(&self) -> Result<PhysicalChannel> {
        let task = self.task()?;
        let name = self.physical_chan_name()?;
        Ok(PhysicalChannel::new(name, task.interpreter().clone()))
    }

    properties! {
        ro chan_type: ChannelType = channel::CHAN_TYPE;
        rw physical_chan_name / set_physical_chan_name / reset_physical_chan_name: String = channel::PHYSICAL_CHAN_NAME;
        rw description / set_description / reset_description: String = channel::DESCR;
        /// Whether the channel is a global channel from the configuration store.
        ro is_global: bool = channel::IS_GLOBAL;
    }
}

impl AttributeOwner for Channel {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        let task = self.task()?;
        let target = AttributeTarget::Channel(task.handle()?, self.name.clone());
        Ok((task.interpreter().clone(), target))
    }
}

impl Named for Channel {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel").field("name", &self.name).finish()
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Weak::ptr_eq(&self.task, &other.task)
    }
}

impl Eq for Channel {}

impl Hash for Channel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A channel type that a task channel collection hands out.
pub trait ChannelKind: From<Channel> + Deref<Target = Channel> + Named {
    const CHANNEL_TYPE: ChannelType;
}

macro_rules! typed_channel {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(Channel);

        impl From<Channel> for $name {
            fn from(channel: Channel) -> Self {
                Self(channel)
            }
        }

        impl Deref for $name {
            type Target = Channel;

            fn deref(&self) -> &Channel {
                &self.0
            }
        }

        impl AttributeOwner for $name {
            fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
                self.0.attribute_context()
            }
        }

        impl Named for $name {
            fn name(&self) -> &str {
                &self.0.name
            }
        }

        impl ChannelKind for $name {
            const CHANNEL_TYPE: ChannelType = ChannelType::$kind;
        }
    };
}

typed_channel!(
    /// Analog input channel.
    AiChannel => AnalogInput
);
typed_channel!(
    /// Analog output channel.
    AoChannel => AnalogOutput
);
typed_channel!(
    /// Counter input channel.
    CiChannel => CounterInput
);
typed_channel!(
    /// Counter output channel.
    CoChannel => CounterOutput
);
typed_channel!(
    /// Digital input channel: a line or a port.
    DiChannel => DigitalInput
);
typed_channel!(
    /// Digital output channel: a line or a port.
    DoChannel => DigitalOutput
);

impl AiChannel {
    properties! {
        ro ai_meas_type: UsageTypeAi = channel::AI_MEAS_TYPE;
        /// Largest value expected, in the channel's units.
        rw ai_max / set_ai_max / reset_ai_max: f64 = channel::AI_MAX;
        rw ai_min / set_ai_min / reset_ai_min: f64 = channel::AI_MIN;
        rw ai_term_cfg / set_ai_term_cfg / reset_ai_term_cfg: TerminalConfiguration = channel::AI_TERM_CFG;
        rw ai_voltage_units / set_ai_voltage_units / reset_ai_voltage_units: VoltageUnits = channel::AI_VOLTAGE_UNITS;
        rw ai_current_units / set_ai_current_units / reset_ai_current_units: CurrentUnits = channel::AI_CURRENT_UNITS;
        rw ai_temp_units / set_ai_temp_units / reset_ai_temp_units: TemperatureUnits = channel::AI_TEMP_UNITS;
        rw ai_thrmcpl_type / set_ai_thrmcpl_type / reset_ai_thrmcpl_type: ThermocoupleType = channel::AI_THRMCPL_TYPE;
        rw ai_rtd_type / set_ai_rtd_type / reset_ai_rtd_type: RtdType = channel::AI_RTD_TYPE;
        rw ai_excit_src / set_ai_excit_src / reset_ai_excit_src: ExcitationSource = channel::AI_EXCIT_SRC;
        rw ai_excit_val / set_ai_excit_val / reset_ai_excit_val: f64 = channel::AI_EXCIT_VAL;
        rw ai_bridge_cfg / set_ai_bridge_cfg / reset_ai_bridge_cfg: BridgeConfiguration = channel::AI_BRIDGE_CFG;
        /// Upper limit of the input range the device is set to.
        rw ai_rng_high / set_ai_rng_high / reset_ai_rng_high: f64 = channel::AI_RNG_HIGH;
        rw ai_rng_low / set_ai_rng_low / reset_ai_rng_low: f64 = channel::AI_RNG_LOW;
    }
}

impl AoChannel {
    properties! {
        ro ao_output_type: UsageTypeAo = channel::AO_OUTPUT_TYPE;
        rw ao_max / set_ao_max / reset_ao_max: f64 = channel::AO_MAX;
        rw ao_min / set_ao_min / reset_ao_min: f64 = channel::AO_MIN;
        rw ao_voltage_units / set_ao_voltage_units / reset_ao_voltage_units: VoltageUnits = channel::AO_VOLTAGE_UNITS;
    }
}

impl CiChannel {
    properties! {
        ro ci_meas_type: UsageTypeCi = channel::CI_MEAS_TYPE;
        rw ci_max / set_ci_max / reset_ci_max: f64 = channel::CI_MAX;
        rw ci_min / set_ci_min / reset_ci_min: f64 = channel::CI_MIN;
        /// Current count of an edge-counting channel.
        ro ci_count: u32 = channel::CI_COUNT;
        rw ci_count_edges_term / set_ci_count_edges_term / reset_ci_count_edges_term: String = channel::CI_COUNT_EDGES_TERM;
        rw ci_count_edges_dir / set_ci_count_edges_dir / reset_ci_count_edges_dir: CountDirection = channel::CI_COUNT_EDGES_DIR;
        rw ci_freq_term / set_ci_freq_term / reset_ci_freq_term: String = channel::CI_FREQ_TERM;
    }
}

impl CoChannel {
    properties! {
        ro co_output_type: UsageTypeCo = channel::CO_OUTPUT_TYPE;
        rw co_pulse_freq / set_co_pulse_freq / reset_co_pulse_freq: f64 = channel::CO_PULSE_FREQ;
        rw co_pulse_duty_cyc / set_co_pulse_duty_cyc / reset_co_pulse_duty_cyc: f64 = channel::CO_PULSE_DUTY_CYC;
        rw co_pulse_high_time / set_co_pulse_high_time / reset_co_pulse_high_time: f64 = channel::CO_PULSE_HIGH_TIME;
        rw co_pulse_low_time / set_co_pulse_low_time / reset_co_pulse_low_time: f64 = channel::CO_PULSE_LOW_TIME;
        rw co_pulse_term / set_co_pulse_term / reset_co_pulse_term: String = channel::CO_PULSE_TERM;
    }
}

impl DiChannel {
    properties! {
        rw di_invert_lines / set_di_invert_lines / reset_di_invert_lines: bool = channel::DI_INVERT_LINES;
        /// Number of lines in the channel: 1 for a line, the port width for a port.
        ro di_num_lines: u32 = channel::DI_NUM_LINES;
    }
}

impl DoChannel {
    properties! {
        rw do_invert_lines / set_do_invert_lines / reset_do_invert_lines: bool = channel::DO_INVERT_LINES;
        ro do_num_lines: u32 = channel::DO_NUM_LINES;
    }
}
