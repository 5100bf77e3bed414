use crate::constants::ChannelType;
use crate::interpreter::{CtrFreq, CtrTick, CtrTime};
use ndarray::Array2;

/// Samples returned by [`TaskCore::read`](super::TaskCore::read), shaped
/// `(channels, samples)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadData {
    Analog(Array2<f64>),
    Power {
        voltage: Array2<f64>,
        current: Array2<f64>,
    },
    /// One boolean per channel per sample, for channels of a single line.
    Lines(Array2<bool>),
    /// One packed port value per channel per sample.
    Port(Array2<u32>),
    Counter(Array2<f64>),
    CounterCount(Array2<u32>),
    CounterFreq(Array2<CtrFreq>),
    CounterTime(Array2<CtrTime>),
    CounterTicks(Array2<CtrTick>),
}

impl ReadData {
    fn dim(&self) -> (usize, usize) {
        match self {
            Self::Analog(a) | Self::Counter(a) => a.dim(),
            Self::Power { voltage, .. } => voltage.dim(),
            Self::Lines(a) => a.dim(),
            Self::Port(a) | Self::CounterCount(a) => a.dim(),
            Self::CounterFreq(a) => a.dim(),
            Self::CounterTime(a) => a.dim(),
            Self::CounterTicks(a) => a.dim(),
        }
    }

    pub fn num_channels(&self) -> usize {
        self.dim().0
    }

    pub fn num_samples(&self) -> usize {
        self.dim().1
    }
}

/// Samples for [`TaskCore::write`](super::TaskCore::write), shaped
/// `(channels, samples)`.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteData {
    Analog(Array2<f64>),
    Lines(Array2<bool>),
    Port(Array2<u32>),
    CounterFreq(Array2<CtrFreq>),
    CounterTime(Array2<CtrTime>),
    CounterTicks(Array2<CtrTick>),
}

impl WriteData {
    fn dim(&self) -> (usize, usize) {
        match self {
            Self::Analog(a) => a.dim(),
            Self::Lines(a) => a.dim(),
            Self::Port(a) => a.dim(),
            Self::CounterFreq(a) => a.dim(),
            Self::CounterTime(a) => a.dim(),
            Self::CounterTicks(a) => a.dim(),
        }
    }

    pub fn num_channels(&self) -> usize {
        self.dim().0
    }

    pub fn num_samples(&self) -> usize {
        self.dim().1
    }

    /// The kind of channel this data can be written to.
    pub fn channel_type(&self) -> ChannelType {
        match self {
            Self::Analog(_) => ChannelType::AnalogOutput,
            Self::Lines(_) | Self::Port(_) => ChannelType::DigitalOutput,
            Self::CounterFreq(_) | Self::CounterTime(_) | Self::CounterTicks(_) => {
                ChannelType::CounterOutput
            }
        }
    }
}
