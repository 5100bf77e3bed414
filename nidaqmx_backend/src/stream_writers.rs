//! Stream writers: typed bulk writes from caller-owned buffers.
//!
//! Every writer carries an `auto_start` setting. Left unset, one-sample writes
//! start the task implicitly and many-sample writes do not, so a buffered
//! generation can be filled before it is started.
//!
//! Multi-channel data is 2-D, shaped `(channels, samples_per_chan)`.

use crate::attributes::ids;
use crate::constants::ChannelType;
use crate::error::{DaqError, Result};
use crate::interpreter::{CtrFreq, CtrTick, CtrTime, Interpreter, TaskHandle};
use crate::task::{TaskCore, TaskState};
use ndarray::ArrayView2;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
struct WriterCore {
    task: Arc<TaskCore>,
    auto_start: Option<bool>,
}

impl WriterCore {
    fn handle(&self) -> Result<TaskHandle> {
        self.task.handle()
    }

    fn interpreter(&self) -> &dyn Interpreter {
        self.task.interpreter().as_ref()
    }

    fn num_chans(&self) -> Result<usize> {
        Ok(self.task.out_stream().num_chans()? as usize)
    }

    fn lines_per_chan(&self) -> Result<usize> {
        Ok(self.task.out_stream().do_num_booleans_per_chan()? as usize)
    }

    fn verify_port_width(&self, bits: u32) -> Result<()> {
        self.task.verify_port_width(ids::channel::DO_NUM_LINES, bits)
    }

    /// Run one driver write, resolving `auto_start` and tracking the start it causes.
    fn write<T>(&self, one_sample: bool, op: impl FnOnce(TaskHandle, bool) -> Result<T>) -> Result<T> {
        let auto_start = self.auto_start.unwrap_or(one_sample);
        let written = op(self.handle()?, auto_start)?;
        if auto_start {
            self.task.note_auto_start()?;
        }
        Ok(written)
    }

    /// Flatten `(channels, samples)` data into the channel-major layout.
    fn channel_major<T: Copy>(&self, data: &ArrayView2<'_, T>) -> Result<(Vec<T>, usize)> {
        let (channels, samples) = data.dim();
        let expected = self.num_chans()?;
        if channels != expected {
            return Err(DaqError::invalid_argument(format!(
                "Write cannot be performed, because the number of channels in the data ({channels}) \
                 does not match the number of channels in the task ({expected})"
            )));
        }
        trace!("Writing {samples} samples per channel to '{}'", self.task.name());
        Ok((data.iter().copied().collect(), samples))
    }
}

fn one_per_channel(len: usize, channels: usize) -> Result<()> {
    if len != channels {
        return Err(DaqError::invalid_argument(format!(
            "Write cannot be performed, because the data holds {len} values \
             but the task has {channels} channels"
        )));
    }
    Ok(())
}

fn same_length(first: usize, second: usize) -> Result<()> {
    if first != second {
        return Err(DaqError::invalid_argument(format!(
            "Write cannot be performed, because the paired arrays differ in length ({first} and {second})"
        )));
    }
    Ok(())
}

macro_rules! stream_writer {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            core: WriterCore,
        }

        impl $name {
            pub fn new(task: Arc<TaskCore>) -> Self {
                Self {
                    core: WriterCore {
                        task,
                        auto_start: None,
                    },
                }
            }

            pub fn task(&self) -> &Arc<TaskCore> {
                &self.core.task
            }

            pub fn auto_start(&self) -> Option<bool> {
                self.core.auto_start
            }

            /// `None` restores the default: start on one-sample writes only.
            pub fn set_auto_start(&mut self, auto_start: Option<bool>) {
                self.core.auto_start = auto_start;
            }
        }
    };
}

stream_writer!(
    /// Writes samples to one analog output channel.
    AnalogSingleChannelWriter
);
stream_writer!(
    /// Writes samples to every analog output channel of a task.
    AnalogMultiChannelWriter
);
stream_writer!(
    /// Writes samples to one digital output channel.
    DigitalSingleChannelWriter
);
stream_writer!(
    /// Writes samples to every digital output channel of a task.
    DigitalMultiChannelWriter
);
stream_writer!(
    /// Writes pulse specifications to one counter output channel.
    CounterWriter
);

impl AnalogSingleChannelWriter {
    pub fn write_one_sample(&self, data: f64, timeout: f64) -> Result<()> {
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_analog_scalar_f64(handle, auto_start, timeout, data)
        })
    }

    /// Returns the number of samples written.
    pub fn write_many_sample(&self, data: &[f64], timeout: f64) -> Result<usize> {
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_analog_f64(handle, data.len(), auto_start, timeout, data)
        })
    }
}

impl AnalogMultiChannelWriter {
    /// Write one sample to each channel, one value per channel.
    pub fn write_one_sample(&self, data: &[f64], timeout: f64) -> Result<()> {
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_analog_f64(handle, 1, auto_start, timeout, data)
        })?;
        Ok(())
    }

    pub fn write_many_sample(&self, data: ArrayView2<'_, f64>, timeout: f64) -> Result<usize> {
        let (flat, samples) = self.core.channel_major(&data)?;
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_analog_f64(handle, samples, auto_start, timeout, &flat)
        })
    }
}

impl DigitalSingleChannelWriter {
    pub fn write_one_sample_one_line(&self, data: bool, timeout: f64) -> Result<()> {
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_lines(handle, 1, auto_start, timeout, &[u8::from(data)])
        })?;
        Ok(())
    }

    /// Write one sample of a multi-line channel, one boolean per line.
    pub fn write_one_sample_multi_line(&self, data: &[bool], timeout: f64) -> Result<()> {
        let num_lines = self.core.lines_per_chan()?;
        if data.len() != num_lines {
            return Err(DaqError::invalid_argument(format!(
                "Write cannot be performed, because the data holds {} lines \
                 but the channel has {num_lines}",
                data.len()
            )));
        }
        let lines: Vec<u8> = data.iter().map(|&line| u8::from(line)).collect();
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_lines(handle, 1, auto_start, timeout, &lines)
        })?;
        Ok(())
    }

    pub fn write_one_sample_port_byte(&self, data: u8, timeout: f64) -> Result<()> {
        self.core.verify_port_width(u8::BITS)?;
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u8(handle, 1, auto_start, timeout, &[data])
        })?;
        Ok(())
    }

    pub fn write_one_sample_port_uint16(&self, data: u16, timeout: f64) -> Result<()> {
        self.core.verify_port_width(u16::BITS)?;
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u16(handle, 1, auto_start, timeout, &[data])
        })?;
        Ok(())
    }

    pub fn write_one_sample_port_uint32(&self, data: u32, timeout: f64) -> Result<()> {
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_scalar_u32(handle, auto_start, timeout, data)
        })
    }

    pub fn write_many_sample_port_byte(&self, data: &[u8], timeout: f64) -> Result<usize> {
        self.core.verify_port_width(u8::BITS)?;
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u8(handle, data.len(), auto_start, timeout, data)
        })
    }

    pub fn write_many_sample_port_uint16(&self, data: &[u16], timeout: f64) -> Result<usize> {
        self.core.verify_port_width(u16::BITS)?;
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u16(handle, data.len(), auto_start, timeout, data)
        })
    }

    pub fn write_many_sample_port_uint32(&self, data: &[u32], timeout: f64) -> Result<usize> {
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u32(handle, data.len(), auto_start, timeout, data)
        })
    }
}

impl DigitalMultiChannelWriter {
    /// Write one sample to each single-line channel, one boolean per channel.
    pub fn write_one_sample_one_line(&self, data: &[bool], timeout: f64) -> Result<()> {
        one_per_channel(data.len(), self.core.num_chans()?)?;
        let lines: Vec<u8> = data.iter().map(|&line| u8::from(line)).collect();
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_lines(handle, 1, auto_start, timeout, &lines)
        })?;
        Ok(())
    }

    /// Write one sample to each channel from a `(channels, lines)` view.
    pub fn write_one_sample_multi_line(&self, data: ArrayView2<'_, bool>, timeout: f64) -> Result<()> {
        let expected = (self.core.num_chans()?, self.core.lines_per_chan()?);
        if data.dim() != expected {
            return Err(DaqError::invalid_argument(format!(
                "Write cannot be performed, because the data has shape {:?} \
                 but the task needs (channels, lines) = {expected:?}",
                data.dim()
            )));
        }
        let lines: Vec<u8> = data.iter().map(|&line| u8::from(line)).collect();
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_lines(handle, 1, auto_start, timeout, &lines)
        })?;
        Ok(())
    }

    pub fn write_one_sample_port_byte(&self, data: &[u8], timeout: f64) -> Result<()> {
        self.core.verify_port_width(u8::BITS)?;
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u8(handle, 1, auto_start, timeout, data)
        })?;
        Ok(())
    }

    pub fn write_one_sample_port_uint16(&self, data: &[u16], timeout: f64) -> Result<()> {
        self.core.verify_port_width(u16::BITS)?;
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u16(handle, 1, auto_start, timeout, data)
        })?;
        Ok(())
    }

    pub fn write_one_sample_port_uint32(&self, data: &[u32], timeout: f64) -> Result<()> {
        one_per_channel(data.len(), self.core.num_chans()?)?;
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u32(handle, 1, auto_start, timeout, data)
        })?;
        Ok(())
    }

    pub fn write_many_sample_port_byte(&self, data: ArrayView2<'_, u8>, timeout: f64) -> Result<usize> {
        self.core.verify_port_width(u8::BITS)?;
        let (flat, samples) = self.core.channel_major(&data)?;
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u8(handle, samples, auto_start, timeout, &flat)
        })
    }

    pub fn write_many_sample_port_uint16(
        &self,
        data: ArrayView2<'_, u16>,
        timeout: f64,
    ) -> Result<usize> {
        self.core.verify_port_width(u16::BITS)?;
        let (flat, samples) = self.core.channel_major(&data)?;
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u16(handle, samples, auto_start, timeout, &flat)
        })
    }

    pub fn write_many_sample_port_uint32(
        &self,
        data: ArrayView2<'_, u32>,
        timeout: f64,
    ) -> Result<usize> {
        let (flat, samples) = self.core.channel_major(&data)?;
        self.core.write(false, |handle, auto_start| {
            self.core
                .interpreter()
                .write_digital_u32(handle, samples, auto_start, timeout, &flat)
        })
    }
}

impl CounterWriter {
    pub fn write_one_sample_pulse_frequency(
        &self,
        frequency: f64,
        duty_cycle: f64,
        timeout: f64,
    ) -> Result<()> {
        let value = CtrFreq {
            freq: frequency,
            duty_cycle,
        };
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_ctr_freq_scalar(handle, auto_start, timeout, value)
        })
    }

    pub fn write_one_sample_pulse_time(
        &self,
        high_time: f64,
        low_time: f64,
        timeout: f64,
    ) -> Result<()> {
        let value = CtrTime {
            high_time,
            low_time,
        };
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_ctr_time_scalar(handle, auto_start, timeout, value)
        })
    }

    pub fn write_one_sample_pulse_ticks(
        &self,
        high_ticks: u32,
        low_ticks: u32,
        timeout: f64,
    ) -> Result<()> {
        let value = CtrTick {
            high_tick: high_ticks,
            low_tick: low_ticks,
        };
        self.core.write(true, |handle, auto_start| {
            self.core
                .interpreter()
                .write_ctr_ticks_scalar(handle, auto_start, timeout, value)
        })
    }

    pub fn write_many_sample_pulse_frequency(
        &self,
        frequencies: &[f64],
        duty_cycles: &[f64],
        timeout: f64,
    ) -> Result<usize> {
        same_length(frequencies.len(), duty_cycles.len())?;
        self.core.write(false, |handle, auto_start| {
            self.core.interpreter().write_ctr_freq(
                handle,
                frequencies.len(),
                auto_start,
                timeout,
                frequencies,
                duty_cycles,
            )
        })
    }

    pub fn write_many_sample_pulse_time(
        &self,
        high_times: &[f64],
        low_times: &[f64],
        timeout: f64,
    ) -> Result<usize> {
        same_length(high_times.len(), low_times.len())?;
        self.core.write(false, |handle, auto_start| {
            self.core.interpreter().write_ctr_time(
                handle,
                high_times.len(),
                auto_start,
                timeout,
                high_times,
                low_times,
            )
        })
    }

    pub fn write_many_sample_pulse_ticks(
        &self,
        high_ticks: &[u32],
        low_ticks: &[u32],
        timeout: f64,
    ) -> Result<usize> {
        same_length(high_ticks.len(), low_ticks.len())?;
        self.core.write(false, |handle, auto_start| {
            self.core.interpreter().write_ctr_ticks(
                handle,
                high_ticks.len(),
                auto_start,
                timeout,
                high_ticks,
                low_ticks,
            )
        })
    }

    /// Whether the task's channels are counter outputs.
    pub fn is_counter_output(&self) -> Result<bool> {
        let names = self.core.task.channel_names()?;
        let mut all = !names.is_empty();
        for name in &names {
            let chan_type: ChannelType =
                self.core.task.channel_attribute(name, ids::channel::CHAN_TYPE)?;
            all &= chan_type == ChannelType::CounterOutput;
        }
        Ok(all)
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
    use ndarray::{array, Array2};

    fn dummy() -> (Arc<DummyInterpreter>, Arc<dyn Interpreter>) {
        let dummy = Arc::new(DummyInterpreter::with_device("Dev1"));
        let interp: Arc<dyn Interpreter> = dummy.clone();
        (dummy, interp)
    }

    #[test]
    fn many_sample_writes_do_not_start_by_default() {
        let (dummy, interp) = dummy();
        let task = Task::new(interp, "ao").unwrap();
        task.ao_channels()
            .add_ao_voltage_chan("Dev1/ao0", "", AoVoltageParams::default())
            .unwrap();
        task.timing()
            .cfg_samp_clk_timing(1000.0, "", Edge::Rising, AcquisitionType::Finite, 4)
            .unwrap();

        let mut writer = AnalogSingleChannelWriter::new(task.core());
        assert_eq!(writer.write_many_sample(&[0.5, 1.0, 1.5, 2.0], 1.0).unwrap(), 4);
        assert_eq!(task.state(), TaskState::Configured);
        assert_eq!(
            dummy.written_analog(task.handle().unwrap()),
            vec![0.5, 1.0, 1.5, 2.0]
        );

        writer.set_auto_start(Some(true));
        writer.write_many_sample(&[3.0], 1.0).unwrap();
        assert_eq!(task.state(), TaskState::Running);
        task.close().unwrap();
    }

    #[test]
    fn one_sample_writes_on_demand_leave_the_task_stopped() {
        let (dummy, interp) = dummy();
        let task = Task::new(interp, "single").unwrap();
        task.ao_channels()
            .add_ao_voltage_chan("Dev1/ao0:1", "", AoVoltageParams::default())
            .unwrap();
        let writer = AnalogMultiChannelWriter::new(task.core());
        assert_eq!(
            writer.write_one_sample(&[1.0], 1.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        writer.write_one_sample(&[1.0, -1.0], 1.0).unwrap();
        assert_eq!(task.state(), TaskState::Configured);
        assert_eq!(dummy.written_analog(task.handle().unwrap()), vec![1.0, -1.0]);

        task.register_done_event(Some(Box::new(|_: &TaskCore, _: Result<()>| {})))
            .unwrap();
        task.close().unwrap();
    }

    #[test]
    fn one_sample_writes_start_clocked_tasks() {
        let (_, interp) = dummy();
        let task = Task::new(interp, "clocked").unwrap();
        task.ao_channels()
            .add_ao_voltage_chan("Dev1/ao0", "", AoVoltageParams::default())
            .unwrap();
        task.timing()
            .cfg_samp_clk_timing(1000.0, "", Edge::Rising, AcquisitionType::Continuous, 100)
            .unwrap();
        let writer = AnalogSingleChannelWriter::new(task.core());
        writer.write_one_sample(0.25, 1.0).unwrap();
        assert_eq!(task.state(), TaskState::Running);
        task.close().unwrap();
    }

    #[test]
    fn multi_channel_data_is_flattened_channel_major() {
        let (dummy, interp) = dummy();
        let task = Task::new(interp, "multi").unwrap();
        task.ao_channels()
            .add_ao_voltage_chan("Dev1/ao0:1", "", AoVoltageParams::default())
            .unwrap();
        let writer = AnalogMultiChannelWriter::new(task.core());

        let wrong = Array2::<f64>::zeros((3, 2));
        assert_eq!(
            writer.write_many_sample(wrong.view(), 1.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );

        let data = array![[0.0, 0.1, 0.2], [1.0, 1.1, 1.2]];
        assert_eq!(writer.write_many_sample(data.view(), 1.0).unwrap(), 3);
        assert_eq!(
            dummy.written_analog(task.handle().unwrap()),
            vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2]
        );
        task.close().unwrap();
    }

    #[test]
    fn port_writes_check_the_integer_width() {
        let (dummy, interp) = dummy();
        let task = Task::new(interp, "do").unwrap();
        task.do_channels()
            .add_do_chan("Dev1/port0/line0:15", "wide", LineGrouping::ChanForAllLines)
            .unwrap();
        let writer = DigitalSingleChannelWriter::new(task.core());
        let err = writer.write_one_sample_port_byte(0xFF, 1.0).unwrap_err();
        assert!(err.to_string().contains("invalid port width"));
        writer.write_one_sample_port_uint16(0xBEEF, 1.0).unwrap();
        assert_eq!(dummy.written_digital(task.handle().unwrap()), vec![0xBEEF]);

        let mut lines = [false; 16];
        lines[3] = true;
        writer.write_one_sample_multi_line(&lines, 1.0).unwrap();
        assert_eq!(dummy.written_digital(task.handle().unwrap())[3], 1);
        assert_eq!(
            writer.write_one_sample_multi_line(&lines[..8], 1.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        task.close().unwrap();
    }

    #[test]
    fn digital_lines_across_channels() {
        let (dummy, interp) = dummy();
        let task = Task::new(interp, "lines").unwrap();
        task.do_channels()
            .add_do_chan("Dev1/port0/line0:1", "", LineGrouping::ChanPerLine)
            .unwrap();
        let writer = DigitalMultiChannelWriter::new(task.core());
        writer.write_one_sample_one_line(&[true, false], 1.0).unwrap();
        assert_eq!(dummy.written_digital(task.handle().unwrap()), vec![1, 0]);

        let ports = array![[1u8, 2], [3, 4]];
        assert_eq!(writer.write_many_sample_port_byte(ports.view(), 1.0).unwrap(), 2);
        assert_eq!(dummy.written_digital(task.handle().unwrap()), vec![1, 2, 3, 4]);
        task.close().unwrap();
    }

    #[test]
    fn counter_pulse_specifications() {
        let (_, interp) = dummy();
        let task = Task::new(interp, "co").unwrap();
        task.co_channels()
            .add_co_pulse_chan_freq("Dev1/ctr0", "", CoPulseFreqParams::default())
            .unwrap();
        let writer = CounterWriter::new(task.core());
        assert!(writer.is_counter_output().unwrap());
        assert_eq!(
            writer
                .write_many_sample_pulse_frequency(&[100.0, 200.0], &[0.5], 1.0)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            writer
                .write_many_sample_pulse_frequency(&[100.0, 200.0], &[0.5, 0.25], 1.0)
                .unwrap(),
            2
        );
        writer.write_one_sample_pulse_ticks(10, 20, 1.0).unwrap();
        assert_eq!(task.state(), TaskState::Configured);
        task.close().unwrap();
    }
}
