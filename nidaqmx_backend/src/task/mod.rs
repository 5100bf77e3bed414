//! Tasks: the owners of driver task handles.
//!
//! A [`Task`] owns one native handle for its whole life. The verbs live on
//! [`TaskCore`], which is shared through an `Arc` so stream readers, writers and
//! event callbacks can hold on to the task without owning it. Channels keep only
//! a `Weak` back-reference.
//!
//! ## Lifecycle
//!
//! ```text
//! Created --configure--> Configured --commit--> Committed --start--> Running
//!                                                                       |
//! (any state) --close--> Cleared                 Configured <--stop-----+
//! ```
//!
//! [`TaskCore::close`] clears the handle exactly once. Every other verb on a
//! cleared task fails with [`DaqError::task_cleared`]. Closing twice only logs a
//! warning, and so does dropping a [`Task`] that was never closed (the handle is
//! still cleared).
//!
//! ## Example
//!
//! ```ignore
//! let value = Task::scoped(interpreter, "ai", |task| {
//!     task.ai_channels().add_ai_voltage_chan("Dev1/ai0", "", Default::default())?;
//!     task.read(Some(1), 10.0)
//! })?;
//! ```

mod channel_collection;
mod data;
mod in_stream;
mod out_stream;
mod timing;
mod triggers;

pub use channel_collection::{
    AiChannelCollection, AoChannelCollection, CiChannelCollection, CoChannelCollection,
    DiChannelCollection, DoChannelCollection, TaskChannelCollection,
};
pub use data::{ReadData, WriteData};
pub use in_stream::InStream;
pub use out_stream::OutStream;
pub use timing::Timing;
pub use triggers::{
    AdvanceTrigger, ArmStartTrigger, PauseTrigger, ReferenceTrigger, StartTrigger, Triggers,
};

use crate::attributes::{
    ids, Attribute, AttributeOwner, AttributeTarget, AttributeValue, ReadOnly,
};
use crate::channel::Channel;
use crate::channel_string::flatten_channel_string;
use crate::constants::*;
use crate::device::Device;
use crate::error::{DaqError, Result};
use crate::events::{
    DoneCallback, EventKind, EventSlot, EveryNSamplesCallback, SignalCallback,
};
use crate::interpreter::{CtrFreq, CtrTick, CtrTime, Interpreter, TaskHandle};
use indexmap::IndexMap;
use ndarray::{s, Array2};
use parking_lot::Mutex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// Where a task is in its lifecycle, as far as the binding has observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Created,
    Configured,
    Committed,
    Running,
    Cleared,
}

#[derive(Default)]
struct EventRegistry {
    active: IndexMap<EventKind, Arc<EventSlot>>,
    // Unregistered slots the driver may still be delivering to.
    retired: Vec<Arc<EventSlot>>,
}

/// The shared half of a task. Obtain one through [`Task`].
pub struct TaskCore {
    interpreter: Arc<dyn Interpreter>,
    handle: TaskHandle,
    name: String,
    cleared: AtomicBool,
    state: Mutex<TaskState>,
    events: Mutex<EventRegistry>,
    weak_self: Weak<TaskCore>,
}

impl TaskCore {
    fn new_shared(
        interpreter: Arc<dyn Interpreter>,
        handle: TaskHandle,
        name: String,
        state: TaskState,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            interpreter,
            handle,
            name,
            cleared: AtomicBool::new(false),
            state: Mutex::new(state),
            events: Mutex::new(EventRegistry::default()),
            weak_self: weak_self.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interpreter(&self) -> &Arc<dyn Interpreter> {
        &self.interpreter
    }

    /// The native handle, or the "task cleared" error once the task is closed.
    pub fn handle(&self) -> Result<TaskHandle> {
        if self.is_cleared() {
            Err(DaqError::task_cleared(&self.name))
        } else {
            Ok(self.handle)
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::Acquire)
    }

    pub fn state(&self) -> TaskState {
        *self.state.lock()
    }

    pub(crate) fn downgrade(&self) -> Weak<TaskCore> {
        self.weak_self.clone()
    }

    pub(crate) fn set_state(&self, state: TaskState) {
        let mut current = self.state.lock();
        if *current != TaskState::Cleared && *current != state {
            trace!("Task '{}' {:?} -> {:?}", self.name, *current, state);
            *current = state;
        }
    }

    /// Track the start an auto-started write causes. The driver stops an
    /// on-demand task again as soon as the write completes.
    pub(crate) fn note_auto_start(&self) -> Result<()> {
        if self.timing().samp_timing_type()? != SampleTimingType::OnDemand {
            self.set_state(TaskState::Running);
        }
        Ok(())
    }

    /// Channel, timing and trigger configuration moves a fresh task to Configured.
    pub(crate) fn mark_configured(&self) {
        let mut current = self.state.lock();
        if *current == TaskState::Created {
            *current = TaskState::Configured;
        }
    }

    pub(crate) fn scoped_context(
        &self,
        scope: fn(TaskHandle) -> AttributeTarget,
    ) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        Ok((self.interpreter.clone(), scope(self.handle()?)))
    }

    /// Fail unless every channel's line count fits in a `bits`-wide port value.
    pub(crate) fn verify_port_width(
        &self,
        num_lines: Attribute<u32, ReadOnly>,
        bits: u32,
    ) -> Result<()> {
        let mut widest = 0;
        for name in self.channel_names()? {
            widest = widest.max(self.channel_attribute(&name, num_lines)?);
        }
        if widest > bits {
            return Err(DaqError::invalid_argument(format!(
                "invalid port width: task '{}' has a {widest}-line channel, which does not fit in {bits} bits",
                self.name
            )));
        }
        Ok(())
    }

    pub(crate) fn channel_attribute<T: AttributeValue, A>(
        &self,
        channel: &str,
        attribute: Attribute<T, A>,
    ) -> Result<T> {
        let target = AttributeTarget::Channel(self.handle()?, channel.to_string());
        T::read(self.interpreter.as_ref(), &target, attribute.id)
    }

    // Lifecycle

    pub fn start(&self) -> Result<()> {
        self.interpreter.start_task(self.handle()?)?;
        self.set_state(TaskState::Running);
        debug!("Started task '{}'", self.name);
        Ok(())
    }

    pub fn stop(&self) -> Result<()> {
        self.interpreter.stop_task(self.handle()?)?;
        if self.state() != TaskState::Created {
            self.set_state(TaskState::Configured);
        }
        debug!("Stopped task '{}'", self.name);
        Ok(())
    }

    /// Drive the task through the driver's state model.
    pub fn control(&self, action: TaskMode) -> Result<()> {
        self.interpreter.task_control(self.handle()?, action)?;
        match action {
            TaskMode::Start => self.set_state(TaskState::Running),
            TaskMode::Commit | TaskMode::Reserve => self.set_state(TaskState::Committed),
            TaskMode::Stop | TaskMode::Unreserve | TaskMode::Abort => {
                if self.state() != TaskState::Created {
                    self.set_state(TaskState::Configured);
                }
            }
            TaskMode::Verify => {}
        }
        Ok(())
    }

    /// Wait for a finite task to finish. A timeout of -1 waits forever.
    pub fn wait_until_done(&self, timeout: f64) -> Result<()> {
        self.interpreter.wait_until_task_done(self.handle()?, timeout)
    }

    pub fn is_done(&self) -> Result<bool> {
        self.interpreter.is_task_done(self.handle()?)
    }

    /// Clear the task and release its handle.
    ///
    /// Idempotent: closing an already cleared task logs a warning and succeeds.
    pub fn close(&self) -> Result<()> {
        if self.cleared.swap(true, Ordering::AcqRel) {
            warn!(
                "Attempted to close NI-DAQmx task of name '{}' but task was already closed.",
                self.name
            );
            return Ok(());
        }
        let result = self.interpreter.clear_task(self.handle);
        *self.state.lock() = TaskState::Cleared;
        let registry = std::mem::take(&mut *self.events.lock());
        debug!(
            "Cleared task '{}', releasing {} event slot(s)",
            self.name,
            registry.active.len() + registry.retired.len()
        );
        drop(registry);
        result
    }

    // Channels and sub-objects

    /// Names of every virtual channel in the task, in task order.
    pub fn channel_names(&self) -> Result<Vec<String>> {
        self.get_attribute(ids::task::CHANNELS)
    }

    pub fn number_of_channels(&self) -> Result<u32> {
        self.get_attribute(ids::task::NUM_CHANS)
    }

    pub fn devices(&self) -> Result<Vec<Device>> {
        Ok(self
            .get_attribute(ids::task::DEVICES)?
            .into_iter()
            .map(|name| Device::new(name, self.interpreter.clone()))
            .collect())
    }

    /// A channel object covering every virtual channel of the task.
    pub fn channels(&self) -> Result<Channel> {
        let names = flatten_channel_string(&self.channel_names()?)?;
        Ok(Channel::new(self.downgrade(), names))
    }

    pub fn ai_channels(&self) -> AiChannelCollection<'_> {
        TaskChannelCollection::new(self)
    }

    pub fn ao_channels(&self) -> AoChannelCollection<'_> {
        TaskChannelCollection::new(self)
    }

    pub fn ci_channels(&self) -> CiChannelCollection<'_> {
        TaskChannelCollection::new(self)
    }

    pub fn co_channels(&self) -> CoChannelCollection<'_> {
        TaskChannelCollection::new(self)
    }

    pub fn di_channels(&self) -> DiChannelCollection<'_> {
        TaskChannelCollection::new(self)
    }

    pub fn do_channels(&self) -> DoChannelCollection<'_> {
        TaskChannelCollection::new(self)
    }

    pub fn timing(&self) -> Timing<'_> {
        Timing::new(self)
    }

    pub fn triggers(&self) -> Triggers<'_> {
        Triggers::new(self)
    }

    pub fn in_stream(&self) -> InStream<'_> {
        InStream::new(self)
    }

    pub fn out_stream(&self) -> OutStream<'_> {
        OutStream::new(self)
    }

    /// Add channels saved in the driver's configuration store.
    pub fn add_global_channels<S: AsRef<str>>(&self, channel_names: &[S]) -> Result<()> {
        let names = flatten_channel_string(channel_names)?;
        self.interpreter
            .add_global_chans_to_task(self.handle()?, &names)?;
        self.mark_configured();
        Ok(())
    }

    /// Route a task signal to an output terminal.
    pub fn export_signal(&self, signal: Signal, output_terminal: &str) -> Result<()> {
        self.interpreter
            .export_signal(self.handle()?, signal, output_terminal)
    }

    // Events

    /// Register a callback for every `sample_interval` samples acquired into the
    /// buffer. `None` unregisters.
    pub fn register_every_n_samples_acquired_into_buffer_event(
        &self,
        sample_interval: u32,
        callback: Option<EveryNSamplesCallback>,
    ) -> Result<()> {
        self.register_every_n_samples(
            EveryNSamplesEventType::AcquiredIntoBuffer,
            sample_interval,
            callback,
        )
    }

    /// Register a callback for every `sample_interval` samples transferred out of
    /// the buffer. `None` unregisters.
    pub fn register_every_n_samples_transferred_from_buffer_event(
        &self,
        sample_interval: u32,
        callback: Option<EveryNSamplesCallback>,
    ) -> Result<()> {
        self.register_every_n_samples(
            EveryNSamplesEventType::TransferredFromBuffer,
            sample_interval,
            callback,
        )
    }

    fn register_every_n_samples(
        &self,
        event_type: EveryNSamplesEventType,
        sample_interval: u32,
        callback: Option<EveryNSamplesCallback>,
    ) -> Result<()> {
        let handle = self.handle()?;
        let kind = EventKind::from(event_type);
        match callback {
            Some(callback) => {
                if sample_interval == 0 {
                    return Err(DaqError::invalid_argument(
                        "sample_interval must be greater than zero",
                    ));
                }
                self.check_can_register(kind)?;
                let slot = Arc::new(EventSlot::every_n_samples(
                    self.downgrade(),
                    event_type,
                    callback,
                ));
                self.interpreter.register_every_n_samples_event(
                    handle,
                    event_type,
                    sample_interval,
                    Some(slot.clone()),
                )?;
                self.install(kind, slot);
            }
            None => {
                self.interpreter
                    .register_every_n_samples_event(handle, event_type, 0, None)?;
                self.retire(kind);
            }
        }
        Ok(())
    }

    /// Register a callback for when the task stops, with the status it stopped
    /// with. `None` unregisters.
    pub fn register_done_event(&self, callback: Option<DoneCallback>) -> Result<()> {
        let handle = self.handle()?;
        match callback {
            Some(callback) => {
                self.check_can_register(EventKind::Done)?;
                let slot = Arc::new(EventSlot::done(self.downgrade(), callback));
                self.interpreter
                    .register_done_event(handle, Some(slot.clone()))?;
                self.install(EventKind::Done, slot);
            }
            None => {
                self.interpreter.register_done_event(handle, None)?;
                self.retire(EventKind::Done);
            }
        }
        Ok(())
    }

    /// Register a callback for a hardware signal. `None` unregisters.
    pub fn register_signal_event(
        &self,
        signal: Signal,
        callback: Option<SignalCallback>,
    ) -> Result<()> {
        let handle = self.handle()?;
        match callback {
            Some(callback) => {
                self.check_can_register(EventKind::Signal)?;
                let slot = Arc::new(EventSlot::signal(self.downgrade(), callback));
                self.interpreter
                    .register_signal_event(handle, signal, Some(slot.clone()))?;
                self.install(EventKind::Signal, slot);
            }
            None => {
                self.interpreter.register_signal_event(handle, signal, None)?;
                self.retire(EventKind::Signal);
            }
        }
        Ok(())
    }

    fn check_can_register(&self, kind: EventKind) -> Result<()> {
        if self.state() == TaskState::Running {
            return Err(DaqError::state_violation(format!(
                "Cannot register a {kind:?} event on task '{}' while it is running",
                self.name
            )));
        }
        if self.events.lock().active.contains_key(&kind) {
            return Err(DaqError::state_violation(format!(
                "A {kind:?} event is already registered on task '{}'; unregister it first",
                self.name
            )));
        }
        Ok(())
    }

    fn install(&self, kind: EventKind, slot: Arc<EventSlot>) {
        self.events.lock().active.insert(kind, slot);
        debug!("Registered {kind:?} event on task '{}'", self.name);
    }

    fn retire(&self, kind: EventKind) {
        let mut events = self.events.lock();
        if let Some(slot) = events.active.shift_remove(&kind) {
            events.retired.push(slot);
            debug!("Unregistered {kind:?} event on task '{}'", self.name);
        }
    }

    /// Whether a callback of `kind` is currently registered.
    pub fn has_event(&self, kind: EventKind) -> bool {
        self.events.lock().active.contains_key(&kind)
    }

    // Data

    /// Number of samples per channel a "read all available" request covers.
    pub(crate) fn samples_available_to_read(&self) -> Result<usize> {
        let timing = self.timing();
        let in_stream = self.in_stream();
        let finite = timing.samp_quant_samp_mode()? == AcquisitionType::Finite;
        let samples = if finite && !in_stream.read_all_avail_samp()? {
            timing.samp_quant_samp_per_chan()?
        } else {
            u64::from(in_stream.avail_samp_per_chan()?)
        };
        usize::try_from(samples).map_err(|_| DaqError::unexpected_value("samples per channel", samples))
    }

    /// Read samples from every channel in the task.
    ///
    /// `None` reads all available samples. The variant of [`ReadData`] follows
    /// the channel type and measurement. Arrays are shaped
    /// `(channels, samples_read)`. A timeout that still delivered samples is not
    /// an error here: the samples that arrived are returned.
    pub fn read(
        &self,
        number_of_samples_per_channel: Option<usize>,
        timeout: f64,
    ) -> Result<ReadData> {
        let handle = self.handle()?;
        let channels = self.in_stream().channels_to_read()?;
        let Some(first) = channels.first() else {
            return Err(DaqError::invalid_argument(format!(
                "Task '{}' has no channels to read",
                self.name
            )));
        };
        let num_chans = channels.len();
        let samples = match number_of_samples_per_channel {
            Some(samples) => samples,
            None => self.samples_available_to_read()?,
        };
        let requested = i32::try_from(samples)
            .map_err(|_| DaqError::invalid_argument("number_of_samples_per_channel is too large"))?;
        let len = num_chans * samples;
        let interp = self.interpreter.as_ref();

        let chan_type: ChannelType = self.channel_attribute(first, ids::channel::CHAN_TYPE)?;
        let data = match chan_type {
            ChannelType::AnalogInput => {
                let meas: UsageTypeAi = self.channel_attribute(first, ids::channel::AI_MEAS_TYPE)?;
                if meas == UsageTypeAi::Power {
                    let mut voltage = vec![0.0; len];
                    let mut current = vec![0.0; len];
                    let read = lenient(interp.read_power_f64(
                        handle,
                        requested,
                        timeout,
                        &mut voltage,
                        &mut current,
                    ))?;
                    ReadData::Power {
                        voltage: trim(voltage, num_chans, samples, read)?,
                        current: trim(current, num_chans, samples, read)?,
                    }
                } else {
                    let mut buf = vec![0.0; len];
                    let read = lenient(interp.read_analog_f64(handle, requested, timeout, &mut buf))?;
                    ReadData::Analog(trim(buf, num_chans, samples, read)?)
                }
            }
            ChannelType::DigitalInput => {
                let bytes_per_chan = self.in_stream().di_num_booleans_per_chan()?;
                if bytes_per_chan == 1 {
                    let mut buf = vec![0u8; len];
                    let read = lenient(
                        interp
                            .read_digital_lines(handle, requested, timeout, &mut buf)
                            .map(|(read, _)| read),
                    )?;
                    let lines = buf.into_iter().map(|b| b != 0).collect();
                    ReadData::Lines(trim(lines, num_chans, samples, read)?)
                } else {
                    let mut buf = vec![0u32; len];
                    let read = lenient(interp.read_digital_u32(handle, requested, timeout, &mut buf))?;
                    ReadData::Port(trim(buf, num_chans, samples, read)?)
                }
            }
            ChannelType::CounterInput => {
                let meas: UsageTypeCi = self.channel_attribute(first, ids::channel::CI_MEAS_TYPE)?;
                self.read_counter(handle, meas, requested, timeout, num_chans, samples)?
            }
            other => {
                return Err(DaqError::invalid_argument(format!(
                    "Read is not supported for {other:?} channels"
                )))
            }
        };
        Ok(data)
    }

    fn read_counter(
        &self,
        handle: TaskHandle,
        meas: UsageTypeCi,
        requested: i32,
        timeout: f64,
        num_chans: usize,
        samples: usize,
    ) -> Result<ReadData> {
        let interp = self.interpreter.as_ref();
        let len = num_chans * samples;
        let data = match meas {
            UsageTypeCi::PulseFrequency => {
                let (mut freq, mut duty) = (vec![0.0; len], vec![0.0; len]);
                let read = lenient(interp.read_ctr_freq(handle, requested, timeout, &mut freq, &mut duty))?;
                let records = freq
                    .into_iter()
                    .zip(duty)
                    .map(|(freq, duty_cycle)| CtrFreq { freq, duty_cycle })
                    .collect();
                ReadData::CounterFreq(trim(records, num_chans, samples, read)?)
            }
            UsageTypeCi::PulseTime => {
                let (mut high, mut low) = (vec![0.0; len], vec![0.0; len]);
                let read = lenient(interp.read_ctr_time(handle, requested, timeout, &mut high, &mut low))?;
                let records = high
                    .into_iter()
                    .zip(low)
                    .map(|(high_time, low_time)| CtrTime { high_time, low_time })
                    .collect();
                ReadData::CounterTime(trim(records, num_chans, samples, read)?)
            }
            UsageTypeCi::PulseTicks => {
                let (mut high, mut low) = (vec![0u32; len], vec![0u32; len]);
                let read = lenient(interp.read_ctr_ticks(handle, requested, timeout, &mut high, &mut low))?;
                let records = high
                    .into_iter()
                    .zip(low)
                    .map(|(high_tick, low_tick)| CtrTick { high_tick, low_tick })
                    .collect();
                ReadData::CounterTicks(trim(records, num_chans, samples, read)?)
            }
            UsageTypeCi::CountEdges => {
                let mut buf = vec![0u32; len];
                let read = lenient(interp.read_counter_u32(handle, requested, timeout, &mut buf))?;
                ReadData::CounterCount(trim(buf, num_chans, samples, read)?)
            }
            _ => {
                let mut buf = vec![0.0; len];
                let read = lenient(interp.read_counter_f64(handle, requested, timeout, &mut buf))?;
                ReadData::Counter(trim(buf, num_chans, samples, read)?)
            }
        };
        Ok(data)
    }

    /// Write samples to every channel in the task.
    ///
    /// Data is shaped `(channels, samples)`. With `auto_start` unset the task is
    /// started implicitly only when it uses on-demand timing. Returns the number
    /// of samples per channel written.
    pub fn write(&self, data: &WriteData, auto_start: Option<bool>, timeout: f64) -> Result<usize> {
        let handle = self.handle()?;
        let channels = self.channel_names()?;
        let Some(first) = channels.first() else {
            return Err(DaqError::invalid_argument(format!(
                "Task '{}' has no channels to write",
                self.name
            )));
        };
        if data.num_channels() != channels.len() {
            return Err(DaqError::invalid_argument(format!(
                "Write cannot be performed, because the number of channels in the data ({}) \
                 does not match the number of channels in the task ({})",
                data.num_channels(),
                channels.len()
            )));
        }
        let chan_type: ChannelType = self.channel_attribute(first, ids::channel::CHAN_TYPE)?;
        if chan_type != data.channel_type() {
            return Err(DaqError::invalid_argument(format!(
                "Write data for {:?} channels cannot be written to {chan_type:?} channels",
                data.channel_type()
            )));
        }
        let auto_start = match auto_start {
            Some(auto_start) => auto_start,
            None => self.timing().samp_timing_type()? == SampleTimingType::OnDemand,
        };

        let samples = data.num_samples();
        let interp = self.interpreter.as_ref();
        let written = match data {
            WriteData::Analog(values) => {
                let flat: Vec<f64> = values.iter().copied().collect();
                interp.write_analog_f64(handle, samples, auto_start, timeout, &flat)?
            }
            WriteData::Lines(lines) => {
                let flat: Vec<u8> = lines.iter().map(|&b| u8::from(b)).collect();
                interp.write_digital_lines(handle, samples, auto_start, timeout, &flat)?
            }
            WriteData::Port(values) => {
                let flat: Vec<u32> = values.iter().copied().collect();
                interp.write_digital_u32(handle, samples, auto_start, timeout, &flat)?
            }
            WriteData::CounterFreq(records) => {
                let freq: Vec<f64> = records.iter().map(|r| r.freq).collect();
                let duty: Vec<f64> = records.iter().map(|r| r.duty_cycle).collect();
                interp.write_ctr_freq(handle, samples, auto_start, timeout, &freq, &duty)?
            }
            WriteData::CounterTime(records) => {
                let high: Vec<f64> = records.iter().map(|r| r.high_time).collect();
                let low: Vec<f64> = records.iter().map(|r| r.low_time).collect();
                interp.write_ctr_time(handle, samples, auto_start, timeout, &high, &low)?
            }
            WriteData::CounterTicks(records) => {
                let high: Vec<u32> = records.iter().map(|r| r.high_tick).collect();
                let low: Vec<u32> = records.iter().map(|r| r.low_tick).collect();
                interp.write_ctr_ticks(handle, samples, auto_start, timeout, &high, &low)?
            }
        };
        if auto_start {
            self.note_auto_start()?;
        }
        Ok(written)
    }
}

/// Treat a partial transfer as the samples that did arrive.
fn lenient(result: Result<usize>) -> Result<usize> {
    match result {
        Ok(read) => Ok(read),
        Err(err) => match err.samples_transferred() {
            Some(read) => {
                debug!("Returning {read} samples per channel after: {err}");
                Ok(read)
            }
            None => Err(err),
        },
    }
}

/// Shape a channel-major buffer and drop the samples that were not read.
fn trim<T: Clone>(buf: Vec<T>, channels: usize, samples: usize, read: usize) -> Result<Array2<T>> {
    let full = Array2::from_shape_vec((channels, samples), buf)
        .map_err(|err| DaqError::invalid_argument(format!("invalid read buffer shape: {err}")))?;
    Ok(full.slice(s![.., ..read.min(samples)]).to_owned())
}

impl AttributeOwner for TaskCore {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        self.scoped_context(AttributeTarget::Task)
    }
}

impl fmt::Debug for TaskCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCore")
            .field("name", &self.name)
            .field("handle", &self.handle)
            .field("state", &self.state())
            .finish()
    }
}

impl PartialEq for TaskCore {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for TaskCore {}

impl Hash for TaskCore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

/// An NI-DAQmx task. Owns the native handle.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Task {
    core: Arc<TaskCore>,
}

impl Task {
    /// Create a task. An empty name lets the driver pick one.
    pub fn new(interpreter: Arc<dyn Interpreter>, name: &str) -> Result<Self> {
        let handle = interpreter.create_task(name)?;
        Self::adopt(interpreter, handle, TaskState::Created)
    }

    /// Load a task saved in the driver's configuration store.
    pub fn load(interpreter: Arc<dyn Interpreter>, name: &str) -> Result<Self> {
        let handle = interpreter.load_task(name)?;
        Self::adopt(interpreter, handle, TaskState::Configured)
    }

    /// Take ownership of a freshly created handle, clearing it if the task name
    /// cannot be read back.
    pub(crate) fn adopt(
        interpreter: Arc<dyn Interpreter>,
        handle: TaskHandle,
        state: TaskState,
    ) -> Result<Self> {
        let target = AttributeTarget::Task(handle);
        let name = match String::read(interpreter.as_ref(), &target, ids::task::NAME.id) {
            Ok(name) => name,
            Err(err) => {
                if let Err(clear_err) = interpreter.clear_task(handle) {
                    warn!("Failed to clear task {handle} after a failed creation: {clear_err}");
                }
                return Err(err);
            }
        };
        debug!("Created task '{name}' ({handle})");
        Ok(Self {
            core: TaskCore::new_shared(interpreter, handle, name, state),
        })
    }

    /// Run `f` with a new task, clearing the task on every exit path.
    pub fn scoped<R>(
        interpreter: Arc<dyn Interpreter>,
        name: &str,
        f: impl FnOnce(&Task) -> Result<R>,
    ) -> Result<R> {
        let task = Self::new(interpreter, name)?;
        let result = f(&task);
        let closed = task.close();
        let value = result?;
        closed?;
        Ok(value)
    }

    /// A shared handle on the task's verbs, for readers, writers and callbacks.
    pub fn core(&self) -> Arc<TaskCore> {
        self.core.clone()
    }
}

impl Deref for Task {
    type Target = TaskCore;

    fn deref(&self) -> &TaskCore {
        &self.core
    }
}

impl Drop for Task {
    fn drop(&mut self) {
        if !self.core.is_cleared() {
            warn!(
                "Task of name '{}' was not explicitly closed before it was destroyed. \
                 Resources on the task device may still be reserved.",
                self.core.name
            );
            if let Err(err) = self.core.close() {
                warn!("Failed to clear task '{}' on drop: {err}", self.core.name);
            }
        }
    }
}
