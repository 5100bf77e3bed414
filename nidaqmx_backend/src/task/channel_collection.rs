use super::TaskCore;
use crate::attributes::ids;
use crate::channel::{
    AiChannel, AoChannel, Channel, ChannelKind, CiChannel, CoChannel, DiChannel, DoChannel,
};
use crate::channel_config::*;
use crate::channel_string::{flatten_channel_string, numbered_range, unflatten_channel_string};
use crate::collections::Collection;
use crate::constants::*;
use crate::error::{DaqError, Result};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// The virtual channels of one kind in a task, plus the factories that add them.
///
/// Like every collection this is a live view: the channel list is queried
/// from the task on each call.
pub struct TaskChannelCollection<'a, C> {
    task: &'a TaskCore,
    _kind: PhantomData<fn() -> C>,
}

pub type AiChannelCollection<'a> = TaskChannelCollection<'a, AiChannel>;
pub type AoChannelCollection<'a> = TaskChannelCollection<'a, AoChannel>;
pub type CiChannelCollection<'a> = TaskChannelCollection<'a, CiChannel>;
pub type CoChannelCollection<'a> = TaskChannelCollection<'a, CoChannel>;
pub type DiChannelCollection<'a> = TaskChannelCollection<'a, DiChannel>;
pub type DoChannelCollection<'a> = TaskChannelCollection<'a, DoChannel>;

impl<'a, C: ChannelKind> TaskChannelCollection<'a, C> {
    pub(super) fn new(task: &'a TaskCore) -> Self {
        Self {
            task,
            _kind: PhantomData,
        }
    }

    /// One channel object covering every channel of this kind in the task.
    pub fn all(&self) -> Result<C> {
        let names = flatten_channel_string(&self.names()?)?;
        Ok(self.item(names))
    }

    fn create(
        &self,
        physical_channel: &str,
        name_to_assign: &str,
        config: ChannelConfig,
    ) -> Result<C> {
        if let Some((min_val, max_val)) = config.range() {
            if min_val > max_val {
                return Err(DaqError::invalid_argument(format!(
                    "min_val ({min_val}) must not be greater than max_val ({max_val})"
                )));
            }
        }
        let handle = self.task.handle()?;
        let count = match &config {
            ChannelConfig::DigitalInput {
                line_grouping: LineGrouping::ChanForAllLines,
            }
            | ChannelConfig::DigitalOutput {
                line_grouping: LineGrouping::ChanForAllLines,
            } => 1,
            _ => unflatten_channel_string(physical_channel)?.len(),
        };
        let name = numbered_range(name_to_assign, count)?;
        self.task
            .interpreter()
            .create_channel(handle, physical_channel, &name, &config)?;
        self.task.mark_configured();

        let channel_name = if name.is_empty() {
            flatten_channel_string(&[physical_channel])?
        } else {
            name
        };
        debug!(
            "Added {:?} channel '{channel_name}' to task '{}'",
            C::CHANNEL_TYPE,
            self.task.name()
        );
        Ok(self.item(channel_name))
    }
}

impl<C: ChannelKind> Collection for TaskChannelCollection<'_, C> {
    type Item = C;

    fn names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for name in self.task.channel_names()? {
            let chan_type: ChannelType = self.task.channel_attribute(&name, ids::channel::CHAN_TYPE)?;
            if chan_type == C::CHANNEL_TYPE {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn item(&self, name: String) -> C {
        C::from(Channel::new(self.task.downgrade(), name))
    }
}

impl<C> fmt::Debug for TaskChannelCollection<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskChannelCollection")
            .field("task", &self.task.name())
            .finish()
    }
}

/// Task channel collections of the same task compare equal.
impl<C> PartialEq for TaskChannelCollection<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.task == other.task
    }
}

impl TaskChannelCollection<'_, AiChannel> {
    /// Measure voltage.
    pub fn add_ai_voltage_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AiVoltageParams,
    ) -> Result<AiChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AiVoltage(params),
        )
    }

    /// Measure current across a shunt resistor.
    pub fn add_ai_current_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AiCurrentParams,
    ) -> Result<AiChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AiCurrent(params),
        )
    }

    pub fn add_ai_thrmcpl_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AiThermocoupleParams,
    ) -> Result<AiChannel> {
        if params.cjc_source == CjcSource::Channel && params.cjc_channel.is_empty() {
            return Err(DaqError::invalid_argument(
                "cjc_channel is required when cjc_source is Channel",
            ));
        }
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AiThermocouple(params),
        )
    }

    pub fn add_ai_rtd_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AiRtdParams,
    ) -> Result<AiChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AiRtd(params),
        )
    }

    pub fn add_ai_bridge_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AiBridgeParams,
    ) -> Result<AiChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AiBridge(params),
        )
    }

    pub fn add_ai_strain_gage_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AiStrainGageParams,
    ) -> Result<AiChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AiStrainGage(params),
        )
    }

    /// Source and measure voltage and current on a power channel.
    pub fn add_ai_power_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AiPowerParams,
    ) -> Result<AiChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AiPower(params),
        )
    }
}

impl TaskChannelCollection<'_, AoChannel> {
    pub fn add_ao_voltage_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AoVoltageParams,
    ) -> Result<AoChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AoVoltage(params),
        )
    }

    pub fn add_ao_current_chan(
        &self,
        physical_channel: &str,
        name_to_assign_to_channel: &str,
        params: AoCurrentParams,
    ) -> Result<AoChannel> {
        self.create(
            physical_channel,
            name_to_assign_to_channel,
            ChannelConfig::AoCurrent(params),
        )
    }
}

impl TaskChannelCollection<'_, DiChannel> {
    /// Add digital input lines, one channel per line or one for all of them.
    pub fn add_di_chan(
        &self,
        lines: &str,
        name_to_assign_to_lines: &str,
        line_grouping: LineGrouping,
    ) -> Result<DiChannel> {
        self.create(
            lines,
            name_to_assign_to_lines,
            ChannelConfig::DigitalInput { line_grouping },
        )
    }
}

impl TaskChannelCollection<'_, DoChannel> {
    /// Add digital output lines, one channel per line or one for all of them.
    pub fn add_do_chan(
        &self,
        lines: &str,
        name_to_assign_to_lines: &str,
        line_grouping: LineGrouping,
    ) -> Result<DoChannel> {
        self.create(
            lines,
            name_to_assign_to_lines,
            ChannelConfig::DigitalOutput { line_grouping },
        )
    }
}

impl TaskChannelCollection<'_, CiChannel> {
    pub fn add_ci_count_edges_chan(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CiCountEdgesParams,
    ) -> Result<CiChannel> {
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CiCountEdges(params),
        )
    }

    pub fn add_ci_freq_chan(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CiFreqParams,
    ) -> Result<CiChannel> {
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CiFreq(params),
        )
    }

    pub fn add_ci_period_chan(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CiPeriodParams,
    ) -> Result<CiChannel> {
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CiPeriod(params),
        )
    }

    pub fn add_ci_pulse_width_chan(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CiPulseWidthParams,
    ) -> Result<CiChannel> {
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CiPulseWidth(params),
        )
    }

    pub fn add_ci_semi_period_chan(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CiSemiPeriodParams,
    ) -> Result<CiChannel> {
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CiSemiPeriod(params),
        )
    }
}

impl TaskChannelCollection<'_, CoChannel> {
    /// Generate pulses defined by frequency and duty cycle.
    pub fn add_co_pulse_chan_freq(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CoPulseFreqParams,
    ) -> Result<CoChannel> {
        if params.freq <= 0.0 || !(0.0..=1.0).contains(&params.duty_cycle) {
            return Err(DaqError::invalid_argument(format!(
                "invalid pulse: freq {} Hz, duty cycle {}",
                params.freq, params.duty_cycle
            )));
        }
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CoPulseFreq(params),
        )
    }

    /// Generate pulses defined by high and low time.
    pub fn add_co_pulse_chan_time(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CoPulseTimeParams,
    ) -> Result<CoChannel> {
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CoPulseTime(params),
        )
    }

    /// Generate pulses defined by high and low ticks of a timebase.
    pub fn add_co_pulse_chan_ticks(
        &self,
        counter: &str,
        name_to_assign_to_channel: &str,
        params: CoPulseTicksParams,
    ) -> Result<CoChannel> {
        self.create(
            counter,
            name_to_assign_to_channel,
            ChannelConfig::CoPulseTicks(params),
        )
    }
}
