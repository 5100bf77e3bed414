//! Stream readers: typed bulk reads into caller-owned buffers.
//!
//! Unlike [`TaskCore::read`](crate::task::TaskCore::read), readers never
//! allocate sample buffers and never hide a short read. A request for `N`
//! samples per channel that times out after `M < N` fails with
//! [`DaqError::PartialTransfer`] carrying `M`; the first `M` samples of every
//! channel in the caller's buffer are valid and the rest is untouched.
//!
//! Multi-channel buffers are 2-D, shaped `(channels, samples_per_chan)` and
//! laid out channel-major. A buffer of any other shape, or one that is not
//! contiguous, is rejected before the driver is called.
//!
//! Every `number_of_samples_per_channel` argument takes `None` to read all
//! available samples: the remaining samples of a finite task, or whatever is in
//! the buffer of a continuous one.

use crate::attributes::ids;
use crate::error::{DaqError, Result};
use crate::interpreter::{CtrFreq, CtrTick, CtrTime, Interpreter, PowerMeasurement, TaskHandle};
use crate::task::TaskCore;
use ndarray::ArrayViewMut2;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
struct ReaderCore {
    task: Arc<TaskCore>,
}

impl ReaderCore {
    fn handle(&self) -> Result<TaskHandle> {
        self.task.handle()
    }

    fn interpreter(&self) -> &dyn Interpreter {
        self.task.interpreter().as_ref()
    }

    fn num_chans(&self) -> Result<usize> {
        Ok(self.task.in_stream().num_chans()? as usize)
    }

    /// Bytes the driver uses for one sample of one digital channel.
    fn lines_per_chan(&self) -> Result<usize> {
        Ok(self.task.in_stream().di_num_booleans_per_chan()? as usize)
    }

    /// Resolve a sample request into a count and the driver's argument.
    fn samples(&self, number_of_samples_per_channel: Option<usize>) -> Result<(usize, i32)> {
        let samples = match number_of_samples_per_channel {
            Some(samples) => samples,
            None => self.task.samples_available_to_read()?,
        };
        let requested = i32::try_from(samples).map_err(|_| {
            DaqError::invalid_argument(format!(
                "{samples} samples per channel is more than a single read can return"
            ))
        })?;
        trace!("Reading {samples} samples per channel from '{}'", self.task.name());
        Ok((samples, requested))
    }

    fn verify_port_width(&self, bits: u32) -> Result<()> {
        self.task.verify_port_width(ids::channel::DI_NUM_LINES, bits)
    }

    /// The contiguous buffer behind a `(channels, samples)` view.
    fn channel_major<'b, T>(
        &self,
        data: &'b mut ArrayViewMut2<'_, T>,
        samples: usize,
    ) -> Result<&'b mut [T]> {
        let expected = (self.num_chans()?, samples);
        if data.dim() != expected {
            return Err(DaqError::invalid_argument(format!(
                "Read cannot be performed because the buffer has shape {:?} \
                 but the read needs (channels, samples per channel) = {expected:?}",
                data.dim()
            )));
        }
        data.as_slice_mut().ok_or_else(|| {
            DaqError::invalid_argument("Read buffer must be contiguous and in channel-major order")
        })
    }
}

/// The leading `samples` elements of a 1-D buffer.
fn prefix<T>(data: &mut [T], samples: usize) -> Result<&mut [T]> {
    let len = data.len();
    data.get_mut(..samples).ok_or_else(|| {
        DaqError::invalid_argument(format!(
            "Read cannot be performed because the buffer holds {len} samples \
             but {samples} samples per channel were requested"
        ))
    })
}

fn one_per_channel(len: usize, channels: usize) -> Result<()> {
    if len != channels {
        return Err(DaqError::invalid_argument(format!(
            "Read cannot be performed because the buffer holds {len} values \
             but the task has {channels} channels"
        )));
    }
    Ok(())
}

macro_rules! stream_reader {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            core: ReaderCore,
        }

        impl $name {
            pub fn new(task: Arc<TaskCore>) -> Self {
                Self {
                    core: ReaderCore { task },
                }
            }

            pub fn task(&self) -> &Arc<TaskCore> {
                &self.core.task
            }
        }
    };
}

stream_reader!(
    /// Reads samples from one analog input channel.
    AnalogSingleChannelReader
);
stream_reader!(
    /// Reads samples from every analog input channel of a task.
    AnalogMultiChannelReader
);
stream_reader!(
    /// Reads samples from one digital input channel, as lines or a packed port.
    DigitalSingleChannelReader
);
stream_reader!(
    /// Reads samples from every digital input channel of a task.
    DigitalMultiChannelReader
);
stream_reader!(
    /// Reads voltage and current from one power channel.
    PowerSingleChannelReader
);
stream_reader!(
    /// Reads voltage and current from every power channel of a task.
    PowerMultiChannelReader
);
stream_reader!(
    /// Reads samples from one counter input channel.
    CounterReader
);

impl AnalogSingleChannelReader {
    pub fn read_one_sample(&self, timeout: f64) -> Result<f64> {
        self.core
            .interpreter()
            .read_analog_scalar_f64(self.core.handle()?, timeout)
    }

    /// Read into `data`, which must hold at least the requested samples.
    /// Returns the samples read.
    pub fn read_many_sample(
        &self,
        data: &mut [f64],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = prefix(data, samples)?;
        self.core
            .interpreter()
            .read_analog_f64(self.core.handle()?, requested, timeout, buf)
    }
}

impl AnalogMultiChannelReader {
    /// Read one sample from each channel into `data`, one value per channel.
    pub fn read_one_sample(&self, data: &mut [f64], timeout: f64) -> Result<()> {
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core
            .interpreter()
            .read_analog_f64(self.core.handle()?, 1, timeout, data)?;
        Ok(())
    }

    pub fn read_many_sample(
        &self,
        mut data: ArrayViewMut2<'_, f64>,
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = self.core.channel_major(&mut data, samples)?;
        self.core
            .interpreter()
            .read_analog_f64(self.core.handle()?, requested, timeout, buf)
    }
}

impl DigitalSingleChannelReader {
    /// Read one sample of a single-line channel.
    pub fn read_one_sample_one_line(&self, timeout: f64) -> Result<bool> {
        let mut lines = vec![0u8; self.core.lines_per_chan()?.max(1)];
        self.core
            .interpreter()
            .read_digital_lines(self.core.handle()?, 1, timeout, &mut lines)?;
        Ok(lines[0] != 0)
    }

    /// Read one sample of a multi-line channel, one boolean per line.
    pub fn read_one_sample_multi_line(&self, data: &mut [bool], timeout: f64) -> Result<()> {
        let num_lines = self.core.lines_per_chan()?;
        if data.len() != num_lines {
            return Err(DaqError::invalid_argument(format!(
                "Read cannot be performed because the buffer holds {} lines \
                 but the channel has {num_lines}",
                data.len()
            )));
        }
        let mut lines = vec![0u8; num_lines];
        self.core
            .interpreter()
            .read_digital_lines(self.core.handle()?, 1, timeout, &mut lines)?;
        for (line, byte) in data.iter_mut().zip(lines) {
            *line = byte != 0;
        }
        Ok(())
    }

    pub fn read_one_sample_port_byte(&self, timeout: f64) -> Result<u8> {
        self.core.verify_port_width(u8::BITS)?;
        let mut value = [0u8; 1];
        self.core
            .interpreter()
            .read_digital_u8(self.core.handle()?, 1, timeout, &mut value)?;
        Ok(value[0])
    }

    pub fn read_one_sample_port_uint16(&self, timeout: f64) -> Result<u16> {
        self.core.verify_port_width(u16::BITS)?;
        let mut value = [0u16; 1];
        self.core
            .interpreter()
            .read_digital_u16(self.core.handle()?, 1, timeout, &mut value)?;
        Ok(value[0])
    }

    pub fn read_one_sample_port_uint32(&self, timeout: f64) -> Result<u32> {
        self.core
            .interpreter()
            .read_digital_scalar_u32(self.core.handle()?, timeout)
    }

    pub fn read_many_sample_port_byte(
        &self,
        data: &mut [u8],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        self.core.verify_port_width(u8::BITS)?;
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = prefix(data, samples)?;
        self.core
            .interpreter()
            .read_digital_u8(self.core.handle()?, requested, timeout, buf)
    }

    pub fn read_many_sample_port_uint16(
        &self,
        data: &mut [u16],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        self.core.verify_port_width(u16::BITS)?;
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = prefix(data, samples)?;
        self.core
            .interpreter()
            .read_digital_u16(self.core.handle()?, requested, timeout, buf)
    }

    pub fn read_many_sample_port_uint32(
        &self,
        data: &mut [u32],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = prefix(data, samples)?;
        self.core
            .interpreter()
            .read_digital_u32(self.core.handle()?, requested, timeout, buf)
    }
}

impl DigitalMultiChannelReader {
    /// Read one sample of each single-line channel, one boolean per channel.
    pub fn read_one_sample_one_line(&self, data: &mut [bool], timeout: f64) -> Result<()> {
        let channels = self.core.num_chans()?;
        one_per_channel(data.len(), channels)?;
        let stride = self.core.lines_per_chan()?.max(1);
        let mut lines = vec![0u8; channels * stride];
        self.core
            .interpreter()
            .read_digital_lines(self.core.handle()?, 1, timeout, &mut lines)?;
        for (value, chunk) in data.iter_mut().zip(lines.chunks_exact(stride)) {
            *value = chunk[0] != 0;
        }
        Ok(())
    }

    /// Read one sample of each channel into a `(channels, lines)` view.
    pub fn read_one_sample_multi_line(
        &self,
        mut data: ArrayViewMut2<'_, bool>,
        timeout: f64,
    ) -> Result<()> {
        let expected = (self.core.num_chans()?, self.core.lines_per_chan()?);
        if data.dim() != expected {
            return Err(DaqError::invalid_argument(format!(
                "Read cannot be performed because the buffer has shape {:?} \
                 but the read needs (channels, lines) = {expected:?}",
                data.dim()
            )));
        }
        let mut lines = vec![0u8; expected.0 * expected.1];
        self.core
            .interpreter()
            .read_digital_lines(self.core.handle()?, 1, timeout, &mut lines)?;
        for (value, byte) in data.iter_mut().zip(lines) {
            *value = byte != 0;
        }
        Ok(())
    }

    pub fn read_one_sample_port_byte(&self, data: &mut [u8], timeout: f64) -> Result<()> {
        self.core.verify_port_width(u8::BITS)?;
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core
            .interpreter()
            .read_digital_u8(self.core.handle()?, 1, timeout, data)?;
        Ok(())
    }

    pub fn read_one_sample_port_uint16(&self, data: &mut [u16], timeout: f64) -> Result<()> {
        self.core.verify_port_width(u16::BITS)?;
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core
            .interpreter()
            .read_digital_u16(self.core.handle()?, 1, timeout, data)?;
        Ok(())
    }

    pub fn read_one_sample_port_uint32(&self, data: &mut [u32], timeout: f64) -> Result<()> {
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core
            .interpreter()
            .read_digital_u32(self.core.handle()?, 1, timeout, data)?;
        Ok(())
    }

    pub fn read_many_sample_port_byte(
        &self,
        mut data: ArrayViewMut2<'_, u8>,
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        self.core.verify_port_width(u8::BITS)?;
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = self.core.channel_major(&mut data, samples)?;
        self.core
            .interpreter()
            .read_digital_u8(self.core.handle()?, requested, timeout, buf)
    }

    pub fn read_many_sample_port_uint16(
        &self,
        mut data: ArrayViewMut2<'_, u16>,
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        self.core.verify_port_width(u16::BITS)?;
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = self.core.channel_major(&mut data, samples)?;
        self.core
            .interpreter()
            .read_digital_u16(self.core.handle()?, requested, timeout, buf)
    }

    pub fn read_many_sample_port_uint32(
        &self,
        mut data: ArrayViewMut2<'_, u32>,
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = self.core.channel_major(&mut data, samples)?;
        self.core
            .interpreter()
            .read_digital_u32(self.core.handle()?, requested, timeout, buf)
    }
}

impl PowerSingleChannelReader {
    pub fn read_one_sample(&self, timeout: f64) -> Result<PowerMeasurement> {
        self.core
            .interpreter()
            .read_power_scalar_f64(self.core.handle()?, timeout)
    }

    pub fn read_many_sample(
        &self,
        voltages: &mut [f64],
        currents: &mut [f64],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let voltages = prefix(voltages, samples)?;
        let currents = prefix(currents, samples)?;
        self.core.interpreter().read_power_f64(
            self.core.handle()?,
            requested,
            timeout,
            voltages,
            currents,
        )
    }
}

impl PowerMultiChannelReader {
    /// Read one sample from each channel, one voltage and one current per channel.
    pub fn read_one_sample(
        &self,
        voltages: &mut [f64],
        currents: &mut [f64],
        timeout: f64,
    ) -> Result<()> {
        let channels = self.core.num_chans()?;
        one_per_channel(voltages.len(), channels)?;
        one_per_channel(currents.len(), channels)?;
        self.core
            .interpreter()
            .read_power_f64(self.core.handle()?, 1, timeout, voltages, currents)?;
        Ok(())
    }

    pub fn read_many_sample(
        &self,
        mut voltages: ArrayViewMut2<'_, f64>,
        mut currents: ArrayViewMut2<'_, f64>,
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let voltages = self.core.channel_major(&mut voltages, samples)?;
        let currents = self.core.channel_major(&mut currents, samples)?;
        self.core.interpreter().read_power_f64(
            self.core.handle()?,
            requested,
            timeout,
            voltages,
            currents,
        )
    }
}

impl CounterReader {
    pub fn read_one_sample_double(&self, timeout: f64) -> Result<f64> {
        self.core
            .interpreter()
            .read_counter_scalar_f64(self.core.handle()?, timeout)
    }

    pub fn read_one_sample_uint32(&self, timeout: f64) -> Result<u32> {
        self.core
            .interpreter()
            .read_counter_scalar_u32(self.core.handle()?, timeout)
    }

    pub fn read_one_sample_pulse_frequency(&self, timeout: f64) -> Result<CtrFreq> {
        self.core
            .interpreter()
            .read_ctr_freq_scalar(self.core.handle()?, timeout)
    }

    pub fn read_one_sample_pulse_time(&self, timeout: f64) -> Result<CtrTime> {
        self.core
            .interpreter()
            .read_ctr_time_scalar(self.core.handle()?, timeout)
    }

    pub fn read_one_sample_pulse_ticks(&self, timeout: f64) -> Result<CtrTick> {
        self.core
            .interpreter()
            .read_ctr_ticks_scalar(self.core.handle()?, timeout)
    }

    pub fn read_many_sample_double(
        &self,
        data: &mut [f64],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = prefix(data, samples)?;
        self.core
            .interpreter()
            .read_counter_f64(self.core.handle()?, requested, timeout, buf)
    }

    pub fn read_many_sample_uint32(
        &self,
        data: &mut [u32],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let buf = prefix(data, samples)?;
        self.core
            .interpreter()
            .read_counter_u32(self.core.handle()?, requested, timeout, buf)
    }

    pub fn read_many_sample_pulse_frequency(
        &self,
        frequencies: &mut [f64],
        duty_cycles: &mut [f64],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let frequencies = prefix(frequencies, samples)?;
        let duty_cycles = prefix(duty_cycles, samples)?;
        self.core.interpreter().read_ctr_freq(
            self.core.handle()?,
            requested,
            timeout,
            frequencies,
            duty_cycles,
        )
    }

    pub fn read_many_sample_pulse_time(
        &self,
        high_times: &mut [f64],
        low_times: &mut [f64],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let high_times = prefix(high_times, samples)?;
        let low_times = prefix(low_times, samples)?;
        self.core.interpreter().read_ctr_time(
            self.core.handle()?,
            requested,
            timeout,
            high_times,
            low_times,
        )
    }

    pub fn read_many_sample_pulse_ticks(
        &self,
        high_ticks: &mut [u32],
        low_ticks: &mut [u32],
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<usize> {
        let (samples, requested) = self.core.samples(number_of_samples_per_channel)?;
        let high_ticks = prefix(high_ticks, samples)?;
        let low_ticks = prefix(low_ticks, samples)?;
        self.core.interpreter().read_ctr_ticks(
            self.core.handle()?,
            requested,
            timeout,
            high_ticks,
            low_ticks,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::channel_config::*;
    use crate::constants::*;
    use crate::dummy::DummyInterpreter;
    use crate::error::ErrorKind;
    use crate::task::Task;
    use ndarray::{s, Array2};

    fn new_task(name: &str) -> Task {
        let interp: Arc<dyn Interpreter> = Arc::new(DummyInterpreter::with_device("Dev1"));
        Task::new(interp, name).unwrap()
    }

    fn finite_ai(name: &str, physical: &str, samples: u64) -> Task {
        let task = new_task(name);
        task.ai_channels()
            .add_ai_voltage_chan(physical, "", AiVoltageParams::default())
            .unwrap();
        task.timing()
            .cfg_samp_clk_timing(1000.0, "", Edge::Rising, AcquisitionType::Finite, samples)
            .unwrap();
        task.start().unwrap();
        task
    }

    #[test]
    fn short_finite_read_fails_with_the_partial_count() {
        let task = finite_ai("partial", "Dev1/ai0", 5);
        let reader = AnalogSingleChannelReader::new(task.core());
        let mut data = vec![-1.0; 10];
        let err = reader.read_many_sample(&mut data, Some(10), 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PartialTransfer);
        assert_eq!(err.samples_transferred(), Some(5));
        assert_eq!(&data[..5], &[0.0, 0.001, 0.002, 0.003, 0.004]);
        assert!(data[5..].iter().all(|&v| v == -1.0), "tail is untouched");
        task.close().unwrap();
    }

    #[test]
    fn single_channel_buffer_must_fit_the_request() {
        let task = finite_ai("small", "Dev1/ai0", 100);
        let reader = AnalogSingleChannelReader::new(task.core());
        let mut data = [0.0; 4];
        assert_eq!(
            reader.read_many_sample(&mut data, Some(5), 1.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(reader.read_many_sample(&mut data, Some(4), 1.0).unwrap(), 4);
        assert_eq!(reader.read_one_sample(1.0).unwrap(), 0.004);
        task.close().unwrap();
    }

    #[test]
    fn multi_channel_reads_are_channel_major() {
        let task = finite_ai("multi", "Dev1/ai0:2", 8);
        let reader = AnalogMultiChannelReader::new(task.core());

        let mut wrong = Array2::<f64>::zeros((8, 3));
        assert_eq!(
            reader
                .read_many_sample(wrong.view_mut(), Some(8), 1.0)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );

        let mut data = Array2::<f64>::zeros((3, 4));
        assert_eq!(reader.read_many_sample(data.view_mut(), Some(4), 1.0).unwrap(), 4);
        assert_eq!(data.row(0).to_vec(), vec![0.0, 0.001, 0.002, 0.003]);
        assert_eq!(data[[2, 0]], 2.0);

        let mut one = [0.0; 3];
        reader.read_one_sample(&mut one, 1.0).unwrap();
        assert_eq!(one, [0.004, 1.004, 2.004]);

        task.in_stream().set_read_all_avail_samp(true).unwrap();
        let mut rest = Array2::<f64>::zeros((3, 3));
        assert_eq!(reader.read_many_sample(rest.view_mut(), None, 1.0).unwrap(), 3);
        assert_eq!(rest[[1, 2]], 1.007);
        task.close().unwrap();
    }

    #[test]
    fn non_contiguous_views_are_rejected() {
        let task = finite_ai("strided", "Dev1/ai0:1", 10);
        let reader = AnalogMultiChannelReader::new(task.core());
        let mut backing = Array2::<f64>::zeros((2, 8));
        let strided = backing.slice_mut(s![.., ..;2]);
        let err = reader.read_many_sample(strided, Some(4), 1.0).unwrap_err();
        assert!(err.to_string().contains("contiguous"));
        task.close().unwrap();
    }

    #[test]
    fn port_values_must_fit_the_integer_width() {
        let task = new_task("ports");
        task.di_channels()
            .add_di_chan("Dev1/port0/line0:15", "wide", LineGrouping::ChanForAllLines)
            .unwrap();
        let reader = DigitalSingleChannelReader::new(task.core());
        let err = reader.read_one_sample_port_byte(1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("invalid port width"));
        assert_eq!(reader.read_one_sample_port_uint16(1.0).unwrap(), 0);
        assert_eq!(reader.read_one_sample_port_uint32(1.0).unwrap(), 1);

        let mut lines = [false; 16];
        reader.read_one_sample_multi_line(&mut lines, 1.0).unwrap();
        assert!(lines[0] && !lines[1], "sample 2 has every other line set");
        task.close().unwrap();
    }

    #[test]
    fn digital_lines_across_channels() {
        let task = new_task("lines");
        task.di_channels()
            .add_di_chan("Dev1/port0/line0:2", "", LineGrouping::ChanPerLine)
            .unwrap();
        let reader = DigitalMultiChannelReader::new(task.core());
        let mut values = [false; 3];
        reader.read_one_sample_one_line(&mut values, 1.0).unwrap();
        assert_eq!(values, [true, false, true]);

        let mut ports = Array2::<u8>::zeros((3, 2));
        assert_eq!(
            reader.read_many_sample_port_byte(ports.view_mut(), Some(2), 1.0).unwrap(),
            2
        );
        assert_eq!(ports.row(1).to_vec(), vec![2, 3]);
        task.close().unwrap();
    }

    #[test]
    fn counter_and_power_records() {
        let task = new_task("ctr");
        task.ci_channels()
            .add_ci_freq_chan("Dev1/ctr0", "", CiFreqParams::default())
            .unwrap();
        let reader = CounterReader::new(task.core());
        let sample = reader.read_one_sample_pulse_frequency(1.0).unwrap();
        assert_eq!(sample.duty_cycle, 0.5);
        let (mut freq, mut duty) = ([0.0; 3], [0.0; 3]);
        assert_eq!(
            reader
                .read_many_sample_pulse_frequency(&mut freq, &mut duty, Some(3), 1.0)
                .unwrap(),
            3
        );
        assert_eq!(freq, [1001.0, 1002.0, 1003.0]);
        task.close().unwrap();

        let task = new_task("power");
        task.ai_channels()
            .add_ai_power_chan("Dev1/power0:1", "", AiPowerParams::default())
            .unwrap();
        let reader = PowerMultiChannelReader::new(task.core());
        let (mut v, mut i) = (Array2::zeros((2, 2)), Array2::zeros((2, 2)));
        assert_eq!(
            reader.read_many_sample(v.view_mut(), i.view_mut(), Some(2), 1.0).unwrap(),
            2
        );
        assert_eq!(v[[1, 1]], 1.001);
        assert_eq!(i[[0, 0]], 0.01);
        task.close().unwrap();
    }

    #[test]
    fn readers_fail_after_close() {
        let task = finite_ai("closed", "Dev1/ai0", 5);
        let reader = AnalogSingleChannelReader::new(task.core());
        task.close().unwrap();
        let err = reader.read_one_sample(1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StateViolation);
    }
}
