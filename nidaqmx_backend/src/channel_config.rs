//! Parameters of the typed virtual-channel factories.
//!
//! Each factory on a task's channel collection builds one of these and hands it
//! to [`Interpreter::create_channel`](crate::interpreter::Interpreter::create_channel),
//! which maps it onto the matching `DAQmxCreate*Chan` call. Defaults match the
//! driver's documented defaults.

use crate::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct AiVoltageParams {
    pub terminal_config: TerminalConfiguration,
    pub min_val: f64,
    pub max_val: f64,
    pub units: VoltageUnits,
    pub custom_scale_name: String,
}

impl Default for AiVoltageParams {
    fn default() -> Self {
        Self {
            terminal_config: TerminalConfiguration::Default,
            min_val: -5.0,
            max_val: 5.0,
            units: VoltageUnits::Volts,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiCurrentParams {
    pub terminal_config: TerminalConfiguration,
    pub min_val: f64,
    pub max_val: f64,
    pub units: CurrentUnits,
    pub shunt_resistor_loc: CurrentShuntResistorLocation,
    pub ext_shunt_resistor_val: f64,
    pub custom_scale_name: String,
}

impl Default for AiCurrentParams {
    fn default() -> Self {
        Self {
            terminal_config: TerminalConfiguration::Default,
            min_val: -0.01,
            max_val: 0.01,
            units: CurrentUnits::Amps,
            shunt_resistor_loc: CurrentShuntResistorLocation::LetDriverChoose,
            ext_shunt_resistor_val: 249.0,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiThermocoupleParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: TemperatureUnits,
    pub thermocouple_type: ThermocoupleType,
    pub cjc_source: CjcSource,
    pub cjc_val: f64,
    pub cjc_channel: String,
}

impl Default for AiThermocoupleParams {
    fn default() -> Self {
        Self {
            min_val: 0.0,
            max_val: 100.0,
            units: TemperatureUnits::DegC,
            thermocouple_type: ThermocoupleType::J,
            cjc_source: CjcSource::ConstantValue,
            cjc_val: 25.0,
            cjc_channel: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiRtdParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: TemperatureUnits,
    pub rtd_type: RtdType,
    pub resistance_config: ResistanceConfiguration,
    pub current_excit_source: ExcitationSource,
    pub current_excit_val: f64,
    pub r_0: f64,
}

impl Default for AiRtdParams {
    fn default() -> Self {
        Self {
            min_val: 0.0,
            max_val: 100.0,
            units: TemperatureUnits::DegC,
            rtd_type: RtdType::Pt3750,
            resistance_config: ResistanceConfiguration::TwoWire,
            current_excit_source: ExcitationSource::External,
            current_excit_val: 0.0025,
            r_0: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiBridgeParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: BridgeUnits,
    pub bridge_config: BridgeConfiguration,
    pub voltage_excit_source: ExcitationSource,
    pub voltage_excit_val: f64,
    pub nominal_bridge_resistance: f64,
    pub custom_scale_name: String,
}

impl Default for AiBridgeParams {
    fn default() -> Self {
        Self {
            min_val: -0.002,
            max_val: 0.002,
            units: BridgeUnits::VoltsPerVolt,
            bridge_config: BridgeConfiguration::FullBridge,
            voltage_excit_source: ExcitationSource::Internal,
            voltage_excit_val: 2.5,
            nominal_bridge_resistance: 350.0,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiStrainGageParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: StrainUnits,
    pub strain_config: StrainGageBridgeType,
    pub voltage_excit_source: ExcitationSource,
    pub voltage_excit_val: f64,
    pub gage_factor: f64,
    pub initial_bridge_voltage: f64,
    pub nominal_gage_resistance: f64,
    pub poisson_ratio: f64,
    pub lead_wire_resistance: f64,
    pub custom_scale_name: String,
}

impl Default for AiStrainGageParams {
    fn default() -> Self {
        Self {
            min_val: -0.001,
            max_val: 0.001,
            units: StrainUnits::Strain,
            strain_config: StrainGageBridgeType::FullBridgeI,
            voltage_excit_source: ExcitationSource::Internal,
            voltage_excit_val: 2.5,
            gage_factor: 2.0,
            initial_bridge_voltage: 0.0,
            nominal_gage_resistance: 350.0,
            poisson_ratio: 0.3,
            lead_wire_resistance: 0.0,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiPowerParams {
    pub voltage_setpoint: f64,
    pub current_setpoint: f64,
    pub output_enable: bool,
}

impl Default for AiPowerParams {
    fn default() -> Self {
        Self {
            voltage_setpoint: 0.0,
            current_setpoint: 0.0,
            output_enable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AoVoltageParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: VoltageUnits,
    pub custom_scale_name: String,
}

impl Default for AoVoltageParams {
    fn default() -> Self {
        Self {
            min_val: -10.0,
            max_val: 10.0,
            units: VoltageUnits::Volts,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AoCurrentParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: CurrentUnits,
    pub custom_scale_name: String,
}

impl Default for AoCurrentParams {
    fn default() -> Self {
        Self {
            min_val: 0.0,
            max_val: 0.02,
            units: CurrentUnits::Amps,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CiCountEdgesParams {
    pub edge: Edge,
    pub initial_count: u32,
    pub count_direction: CountDirection,
}

impl Default for CiCountEdgesParams {
    fn default() -> Self {
        Self {
            edge: Edge::Rising,
            initial_count: 0,
            count_direction: CountDirection::CountUp,
        }
    }
}

/// Shared by frequency and period measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct CiFreqParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: FrequencyUnits,
    pub edge: Edge,
    pub meas_method: CounterFrequencyMethod,
    pub meas_time: f64,
    pub divisor: u32,
    pub custom_scale_name: String,
}

impl Default for CiFreqParams {
    fn default() -> Self {
        Self {
            min_val: 2.0,
            max_val: 100.0,
            units: FrequencyUnits::Hz,
            edge: Edge::Rising,
            meas_method: CounterFrequencyMethod::LowFrequencyOneCounter,
            meas_time: 0.001,
            divisor: 4,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CiPeriodParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: TimeUnits,
    pub edge: Edge,
    pub meas_method: CounterFrequencyMethod,
    pub meas_time: f64,
    pub divisor: u32,
    pub custom_scale_name: String,
}

impl Default for CiPeriodParams {
    fn default() -> Self {
        Self {
            min_val: 0.000001,
            max_val: 0.1,
            units: TimeUnits::Seconds,
            edge: Edge::Rising,
            meas_method: CounterFrequencyMethod::LowFrequencyOneCounter,
            meas_time: 0.001,
            divisor: 4,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CiPulseWidthParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: TimeUnits,
    pub starting_edge: Edge,
    pub custom_scale_name: String,
}

impl Default for CiPulseWidthParams {
    fn default() -> Self {
        Self {
            min_val: 0.000001,
            max_val: 0.1,
            units: TimeUnits::Seconds,
            starting_edge: Edge::Rising,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CiSemiPeriodParams {
    pub min_val: f64,
    pub max_val: f64,
    pub units: TimeUnits,
    pub custom_scale_name: String,
}

impl Default for CiSemiPeriodParams {
    fn default() -> Self {
        Self {
            min_val: 0.000001,
            max_val: 0.1,
            units: TimeUnits::Seconds,
            custom_scale_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoPulseFreqParams {
    pub units: FrequencyUnits,
    pub idle_state: Level,
    pub initial_delay: f64,
    pub freq: f64,
    pub duty_cycle: f64,
}

impl Default for CoPulseFreqParams {
    fn default() -> Self {
        Self {
            units: FrequencyUnits::Hz,
            idle_state: Level::Low,
            initial_delay: 0.0,
            freq: 1.0,
            duty_cycle: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoPulseTimeParams {
    pub units: TimeUnits,
    pub idle_state: Level,
    pub initial_delay: f64,
    pub low_time: f64,
    pub high_time: f64,
}

impl Default for CoPulseTimeParams {
    fn default() -> Self {
        Self {
            units: TimeUnits::Seconds,
            idle_state: Level::Low,
            initial_delay: 0.0,
            low_time: 0.01,
            high_time: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoPulseTicksParams {
    pub source_terminal: String,
    pub idle_state: Level,
    pub initial_delay: i32,
    pub low_ticks: i32,
    pub high_ticks: i32,
}

impl Default for CoPulseTicksParams {
    fn default() -> Self {
        Self {
            source_terminal: String::new(),
            idle_state: Level::Low,
            initial_delay: 0,
            low_ticks: 100,
            high_ticks: 100,
        }
    }
}

/// Everything needed to create one kind of virtual channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelConfig {
    AiVoltage(AiVoltageParams),
    AiCurrent(AiCurrentParams),
    AiThermocouple(AiThermocoupleParams),
    AiRtd(AiRtdParams),
    AiBridge(AiBridgeParams),
    AiStrainGage(AiStrainGageParams),
    AiPower(AiPowerParams),
    AoVoltage(AoVoltageParams),
    AoCurrent(AoCurrentParams),
    DigitalInput { line_grouping: LineGrouping },
    DigitalOutput { line_grouping: LineGrouping },
    CiCountEdges(CiCountEdgesParams),
    CiFreq(CiFreqParams),
    CiPeriod(CiPeriodParams),
    CiPulseWidth(CiPulseWidthParams),
    CiSemiPeriod(CiSemiPeriodParams),
    CoPulseFreq(CoPulseFreqParams),
    CoPulseTime(CoPulseTimeParams),
    CoPulseTicks(CoPulseTicksParams),
}

impl ChannelConfig {
    pub fn channel_type(&self) -> ChannelType {
        match self {
            Self::AiVoltage(_)
            | Self::AiCurrent(_)
            | Self::AiThermocouple(_)
            | Self::AiRtd(_)
            | Self::AiBridge(_)
            | Self::AiStrainGage(_)
            | Self::AiPower(_) => ChannelType::AnalogInput,
            Self::AoVoltage(_) | Self::AoCurrent(_) => ChannelType::AnalogOutput,
            Self::DigitalInput { .. } => ChannelType::DigitalInput,
            Self::DigitalOutput { .. } => ChannelType::DigitalOutput,
            Self::CiCountEdges(_)
            | Self::CiFreq(_)
            | Self::CiPeriod(_)
            | Self::CiPulseWidth(_)
            | Self::CiSemiPeriod(_) => ChannelType::CounterInput,
            Self::CoPulseFreq(_) | Self::CoPulseTime(_) | Self::CoPulseTicks(_) => {
                ChannelType::CounterOutput
            }
        }
    }

    /// Limits a min/max pair must respect, if the channel kind has one.
    pub(crate) fn range(&self) -> Option<(f64, f64)> {
        match self {
            Self::AiVoltage(p) => Some((p.min_val, p.max_val)),
            Self::AiCurrent(p) => Some((p.min_val, p.max_val)),
            Self::AiThermocouple(p) => Some((p.min_val, p.max_val)),
            Self::AiRtd(p) => Some((p.min_val, p.max_val)),
            Self::AiBridge(p) => Some((p.min_val, p.max_val)),
            Self::AiStrainGage(p) => Some((p.min_val, p.max_val)),
            Self::AoVoltage(p) => Some((p.min_val, p.max_val)),
            Self::AoCurrent(p) => Some((p.min_val, p.max_val)),
            Self::CiFreq(p) => Some((p.min_val, p.max_val)),
            Self::CiPeriod(p) => Some((p.min_val, p.max_val)),
            Self::CiPulseWidth(p) => Some((p.min_val, p.max_val)),
            Self::CiSemiPeriod(p) => Some((p.min_val, p.max_val)),
            _ => None,
        }
    }
}
