//! An in-memory [`Interpreter`] for unit tests.
//!
//! Attributes live in a map keyed by target and ID, with driver-like defaults
//! and a handful of values computed from the task's channels. Reads synthesize
//! data from the channel index and the task's read position, so tests can
//! check both layout and continuity:
//!
//! | data | value of channel `c` at position `p` |
//! |---|---|
//! | analog, power voltage | `c + p / 1000` |
//! | digital line `l` | `(p + c + l)` is even |
//! | port, counter count | `p + c` |
//! | pulse frequency | `1000 + p + c` Hz at 50 % duty cycle |
//!
//! A finite, clocked task yields exactly its configured number of samples;
//! reading past the end fails with a partial transfer. On-demand and
//! continuous tasks never run dry.

use crate::attributes::{ids, AttributeTarget};
use crate::channel_config::ChannelConfig;
use crate::channel_string::unflatten_channel_string;
use crate::constants::*;
use crate::error::{codes, DaqError, Result, TransferDirection};
use crate::events::EventSlot;
use crate::interpreter::{CtrFreq, CtrTick, CtrTime, Interpreter, PowerMeasurement, TaskHandle};
use indexmap::IndexMap;
use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration-store entry that does not exist.
const NOT_IN_STORE: i32 = -201_340;
/// Watchdog status read while the timer is not running.
const WATCHDOG_NOT_RUNNING: i32 = -201_085;
/// Attribute addressed to a channel the task does not have.
const CHANNEL_NOT_IN_TASK: i32 = -200_486;

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Bool(bool),
    I32(i32),
    U32(u32),
    U64(u64),
    F64(f64),
    Str(String),
    I32s(Vec<i32>),
    U32s(Vec<u32>),
    F64s(Vec<f64>),
    U8s(Vec<u8>),
}

fn raw<E: DaqmxEnum>(member: E) -> Value {
    Value::I32(member.to_raw())
}

fn join(names: &[String]) -> Value {
    Value::Str(names.join(", "))
}

fn lookup<const N: usize>(table: [(i32, Value); N], id: i32) -> Option<Value> {
    table
        .into_iter()
        .find(|(key, _)| *key == id)
        .map(|(_, value)| value)
}

#[derive(Debug)]
struct WatchdogTimer {
    deadline: Option<Instant>,
    expired: bool,
}

#[derive(Debug, Default)]
struct TaskRecord {
    name: String,
    channels: Vec<String>,
    physical: Vec<String>,
    running: bool,
    position: u64,
    watchdog: Option<WatchdogTimer>,
    written_analog: Vec<f64>,
    written_digital: Vec<u32>,
    every_n: HashMap<EveryNSamplesEventType, (u32, Arc<EventSlot>)>,
    done: Option<Arc<EventSlot>>,
    signal: Option<(Signal, Arc<EventSlot>)>,
}

/// Outcome of one simulated read.
struct Block {
    channels: usize,
    start: u64,
    stride: usize,
    count: usize,
    requested: usize,
}

impl Block {
    fn finish(&self) -> Result<usize> {
        if self.count < self.requested {
            return Err(DaqError::from_status(
                codes::SAMPLES_WILL_NEVER_BE_AVAILABLE,
                "Attempted to read samples beyond the final sample acquired.",
                Some((TransferDirection::Read, self.count)),
            ));
        }
        Ok(self.count)
    }

    fn positions(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        (0..self.channels).flat_map(move |c| {
            (0..self.count).map(move |k| (c, c * self.stride + k, self.start + k as u64))
        })
    }
}

#[derive(Debug, Default)]
struct State {
    devices: Vec<String>,
    global_channels: Vec<String>,
    scales: Vec<String>,
    saved_tasks: Vec<String>,
    tasks: IndexMap<usize, TaskRecord>,
    next_handle: usize,
    unnamed: usize,
    network_devices: usize,
    values: HashMap<(AttributeTarget, i32), Value>,
    failures: HashMap<String, VecDeque<DaqError>>,
}

impl State {
    fn add_device(&mut self, name: &str, category: ProductCategory) {
        use ids::device::*;
        let numbered = |prefix: &str, count: usize| -> Vec<String> {
            (0..count).map(|i| format!("{name}/{prefix}{i}")).collect()
        };
        let lines: Vec<String> = (0..2)
            .flat_map(|port| (0..8).map(move |line| format!("{name}/port{port}/line{line}")))
            .collect();
        let terminals: Vec<String> = (0..16).map(|i| format!("/{name}/PFI{i}")).collect();
        let serial = 0x01A2_0000 + self.devices.len() as u32;
        let target = AttributeTarget::Device(name.to_string());
        let seeds = [
            (PRODUCT_TYPE.id, Value::Str("PCIe-6363".to_string())),
            (PRODUCT_NUM.id, Value::U32(0x7435)),
            (PRODUCT_CATEGORY.id, raw(category)),
            (SERIAL_NUM.id, Value::U32(serial)),
            (IS_SIMULATED.id, Value::Bool(true)),
            (TERMINALS.id, join(&terminals)),
            (NUM_DMA_CHANS.id, Value::U32(8)),
            (AI_PHYSICAL_CHANS.id, join(&numbered("ai", 16))),
            (AO_PHYSICAL_CHANS.id, join(&numbered("ao", 4))),
            (CI_PHYSICAL_CHANS.id, join(&numbered("ctr", 4))),
            (CO_PHYSICAL_CHANS.id, join(&numbered("ctr", 4))),
            (DI_LINES.id, join(&lines)),
            (DO_LINES.id, join(&lines)),
            (DI_PORTS.id, join(&numbered("port", 2))),
            (DO_PORTS.id, join(&numbered("port", 2))),
            (AI_MAX_SINGLE_CHAN_RATE.id, Value::F64(2e6)),
            (AI_MAX_MULTI_CHAN_RATE.id, Value::F64(1e6)),
            (
                AI_VOLTAGE_RNGS.id,
                Value::F64s(vec![-10.0, 10.0, -5.0, 5.0, -1.0, 1.0]),
            ),
            (AO_VOLTAGE_RNGS.id, Value::F64s(vec![-10.0, 10.0, -5.0, 5.0])),
            // Advance, pause, reference and start.
            (AI_TRIG_USAGE.id, Value::I32(0b1111)),
            // Pause and start.
            (AO_TRIG_USAGE.id, Value::I32(0b1010)),
            (ANLG_TRIG_SUPPORTED.id, Value::Bool(true)),
            (DIG_TRIG_SUPPORTED.id, Value::Bool(true)),
        ];
        for (id, value) in seeds {
            self.values.insert((target.clone(), id), value);
        }
        self.devices.push(name.to_string());
    }

    fn take_failure(&mut self, verb: &str) -> Result<()> {
        match self.failures.get_mut(verb).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn check_device(&self, device: &str) -> Result<()> {
        if self.devices.iter().any(|d| d == device) {
            Ok(())
        } else {
            Err(DaqError::from_status(
                codes::INVALID_DEVICE_ID,
                format!("Device identifier is invalid. Device Specified: {device}"),
                None,
            ))
        }
    }

    fn check_physical(&self, physical_channel: &str) -> Result<()> {
        let name = physical_channel.trim_start_matches('/');
        let device = name.split('/').next().unwrap_or(name);
        if self.devices.iter().any(|d| d == device) {
            Ok(())
        } else {
            Err(DaqError::from_status(
                codes::PHYSICAL_CHAN_DOES_NOT_EXIST,
                format!("Physical channel specified does not exist: {physical_channel}"),
                None,
            ))
        }
    }

    fn task(&self, task: TaskHandle) -> Result<&TaskRecord> {
        self.tasks.get(&task.0).ok_or_else(|| invalid_task(task))
    }

    fn task_mut(&mut self, task: TaskHandle) -> Result<&mut TaskRecord> {
        self.tasks.get_mut(&task.0).ok_or_else(|| invalid_task(task))
    }

    fn new_task(&mut self, name: &str) -> Result<TaskHandle> {
        let name = if name.is_empty() {
            loop {
                let candidate = format!("_unnamedTask<{}>", self.unnamed);
                self.unnamed += 1;
                if !self.tasks.values().any(|t| t.name == candidate) {
                    break candidate;
                }
            }
        } else {
            name.to_string()
        };
        if self.tasks.values().any(|t| t.name == name) {
            return Err(DaqError::from_status(
                codes::DUPLICATE_TASK,
                format!("Task name specified conflicts with an existing task name: {name}"),
                None,
            ));
        }
        self.next_handle += 1;
        self.tasks.insert(
            self.next_handle,
            TaskRecord {
                name,
                ..TaskRecord::default()
            },
        );
        Ok(TaskHandle(self.next_handle))
    }

    fn stored(&self, target: AttributeTarget, id: i32) -> Option<&Value> {
        self.values.get(&(target, id))
    }

    fn stored_or(&self, target: AttributeTarget, attribute_id: i32, default: i32) -> i32 {
        match self.stored(target, attribute_id) {
            Some(Value::I32(value)) => *value,
            _ => default,
        }
    }

    fn sample_timing(&self, task: TaskHandle) -> (i32, i32, u64) {
        let timing = AttributeTarget::Timing(task);
        let timing_type = self.stored_or(
            timing.clone(),
            ids::timing::SAMP_TIMING_TYPE.id,
            SampleTimingType::OnDemand.to_raw(),
        );
        let mode = self.stored_or(
            timing.clone(),
            ids::timing::SAMP_QUANT_SAMP_MODE.id,
            AcquisitionType::Finite.to_raw(),
        );
        let per_chan = match self.stored(timing, ids::timing::SAMP_QUANT_SAMP_PER_CHAN.id) {
            Some(Value::U64(value)) => *value,
            _ => 1000,
        };
        (timing_type, mode, per_chan)
    }

    /// Samples left in a finite, clocked acquisition; `None` when unbounded.
    fn remaining(&self, task: TaskHandle) -> Result<Option<u64>> {
        let position = self.task(task)?.position;
        let (timing_type, mode, per_chan) = self.sample_timing(task);
        let clocked = timing_type != SampleTimingType::OnDemand.to_raw();
        Ok((clocked && mode == AcquisitionType::Finite.to_raw())
            .then(|| per_chan.saturating_sub(position)))
    }

    fn available(&self, task: TaskHandle) -> Result<u64> {
        if let Some(remaining) = self.remaining(task)? {
            return Ok(remaining);
        }
        let (timing_type, _, per_chan) = self.sample_timing(task);
        Ok(if timing_type == SampleTimingType::OnDemand.to_raw() {
            1
        } else {
            per_chan
        })
    }

    fn channels_to_read(&self, task: TaskHandle) -> Result<Vec<String>> {
        match self.stored(AttributeTarget::Read(task), ids::read::CHANNELS_TO_READ.id) {
            Some(Value::Str(names)) => unflatten_channel_string(names),
            _ => Ok(self.task(task)?.channels.clone()),
        }
    }

    fn max_lines(&self, task: TaskHandle, attribute_id: i32) -> Result<u32> {
        let record = self.task(task)?;
        Ok(record
            .channels
            .iter()
            .filter_map(|name| {
                match self.stored(AttributeTarget::Channel(task, name.clone()), attribute_id) {
                    Some(Value::U32(lines)) => Some(*lines),
                    _ => None,
                }
            })
            .max()
            .unwrap_or(1))
    }

    fn watchdog_timeout(&self, task: TaskHandle) -> f64 {
        let target = AttributeTarget::Watchdog(task, String::new());
        match self.stored(target, ids::watchdog::TIMEOUT.id) {
            Some(Value::F64(timeout)) => *timeout,
            _ => -1.0,
        }
    }

    fn start(&mut self, task: TaskHandle) -> Result<()> {
        let deadline = deadline_after(self.watchdog_timeout(task));
        let record = self.task_mut(task)?;
        record.running = true;
        record.position = 0;
        if let Some(timer) = record.watchdog.as_mut() {
            timer.deadline = deadline;
        }
        Ok(())
    }

    /// Expand an attribute target into the concrete targets values are stored under.
    fn resolve(&self, target: &AttributeTarget) -> Result<Vec<AttributeTarget>> {
        match target {
            AttributeTarget::System => Ok(vec![target.clone()]),
            AttributeTarget::Device(name) => {
                self.check_device(name)?;
                Ok(vec![target.clone()])
            }
            AttributeTarget::PhysicalChannel(name) => {
                self.check_physical(name)?;
                Ok(vec![target.clone()])
            }
            AttributeTarget::PersistedChannel(name) => {
                in_store(&self.global_channels, name)?;
                Ok(vec![target.clone()])
            }
            AttributeTarget::PersistedScale(name) => {
                in_store(&self.scales, name)?;
                Ok(vec![target.clone()])
            }
            AttributeTarget::PersistedTask(name) => {
                in_store(&self.saved_tasks, name)?;
                Ok(vec![target.clone()])
            }
            AttributeTarget::Channel(task, names) => {
                let record = self.task(*task)?;
                let names = if record.channels.contains(names) {
                    vec![names.clone()]
                } else {
                    unflatten_channel_string(names)?
                };
                if names.is_empty() {
                    return Err(not_in_task(""));
                }
                names
                    .into_iter()
                    .map(|name| {
                        if record.channels.contains(&name) {
                            Ok(AttributeTarget::Channel(*task, name))
                        } else {
                            Err(not_in_task(&name))
                        }
                    })
                    .collect()
            }
            AttributeTarget::Watchdog(task, lines) => {
                self.task(*task)?;
                let lines = unflatten_channel_string(lines)?;
                if lines.is_empty() {
                    return Ok(vec![AttributeTarget::Watchdog(*task, String::new())]);
                }
                Ok(lines
                    .into_iter()
                    .map(|line| AttributeTarget::Watchdog(*task, line))
                    .collect())
            }
            AttributeTarget::Task(task)
            | AttributeTarget::Timing(task)
            | AttributeTarget::Trigger(task)
            | AttributeTarget::Read(task)
            | AttributeTarget::Write(task)
            | AttributeTarget::Buffer(task) => {
                self.task(*task)?;
                Ok(vec![target.clone()])
            }
        }
    }

    /// Attributes derived from the simulated driver state rather than stored.
    fn computed(&mut self, target: &AttributeTarget, id: i32) -> Result<Option<Value>> {
        let value = match target {
            AttributeTarget::System => {
                use ids::system::*;
                if id == DEV_NAMES.id {
                    Some(join(&self.devices))
                } else if id == GLOBAL_CHANS.id {
                    Some(join(&self.global_channels))
                } else if id == SCALES.id {
                    Some(join(&self.scales))
                } else if id == TASKS.id {
                    Some(join(&self.saved_tasks))
                } else {
                    lookup(
                        [
                            (MAJOR_VERSION.id, Value::U32(23)),
                            (MINOR_VERSION.id, Value::U32(8)),
                            (UPDATE_VERSION.id, Value::U32(0)),
                        ],
                        id,
                    )
                }
            }
            AttributeTarget::PhysicalChannel(name) => physical_channel_value(name, id),
            AttributeTarget::Task(task) => {
                use ids::task::*;
                let record = self.task(*task)?;
                let mut devices: Vec<String> = Vec::new();
                for physical in &record.physical {
                    let device = physical.trim_start_matches('/').split('/').next();
                    if let Some(device) = device.filter(|d| !d.is_empty()) {
                        if !devices.iter().any(|d| d == device) {
                            devices.push(device.to_string());
                        }
                    }
                }
                if id == NAME.id {
                    Some(Value::Str(record.name.clone()))
                } else if id == CHANNELS.id {
                    Some(join(&record.channels))
                } else if id == NUM_CHANS.id {
                    Some(Value::U32(record.channels.len() as u32))
                } else if id == DEVICES.id {
                    Some(join(&devices))
                } else if id == NUM_DEVICES.id {
                    Some(Value::U32(devices.len() as u32))
                } else if id == COMPLETE.id {
                    let running = record.running;
                    Some(Value::Bool(!running || self.remaining(*task)? == Some(0)))
                } else {
                    None
                }
            }
            AttributeTarget::Read(task) => {
                use ids::read::*;
                if id == NUM_CHANS.id {
                    Some(Value::U32(self.channels_to_read(*task)?.len() as u32))
                } else if id == DIGITAL_LINES_BYTES_PER_CHAN.id {
                    Some(Value::U32(self.max_lines(*task, ids::channel::DI_NUM_LINES.id)?))
                } else if id == AVAIL_SAMP_PER_CHAN.id {
                    Some(Value::U32(self.available(*task)? as u32))
                } else if id == CURR_READ_POS.id || id == TOTAL_SAMP_PER_CHAN_ACQUIRED.id {
                    Some(Value::U64(self.task(*task)?.position))
                } else {
                    None
                }
            }
            AttributeTarget::Write(task) => {
                use ids::write::*;
                if id == NUM_CHANS.id {
                    Some(Value::U32(self.task(*task)?.channels.len() as u32))
                } else if id == DIGITAL_LINES_BYTES_PER_CHAN.id {
                    Some(Value::U32(self.max_lines(*task, ids::channel::DO_NUM_LINES.id)?))
                } else {
                    None
                }
            }
            AttributeTarget::Watchdog(task, line)
                if line.is_empty() && id == ids::watchdog::HAS_EXPIRED.id =>
            {
                let record = self.task_mut(*task)?;
                if !record.running {
                    return Err(DaqError::from_status(
                        WATCHDOG_NOT_RUNNING,
                        "Watchdog timer status can only be queried while the task is running.",
                        None,
                    ));
                }
                record.watchdog.as_mut().map(|timer| {
                    if !timer.expired && timer.deadline.is_some_and(|d| Instant::now() >= d) {
                        timer.expired = true;
                    }
                    Value::Bool(timer.expired)
                })
            }
            _ => None,
        };
        Ok(value)
    }

    fn default_value(&self, target: &AttributeTarget, id: i32) -> Result<Option<Value>> {
        let value = match target {
            AttributeTarget::Timing(_) => {
                use ids::timing::*;
                lookup(
                    [
                        (SAMP_TIMING_TYPE.id, raw(SampleTimingType::OnDemand)),
                        (SAMP_QUANT_SAMP_MODE.id, raw(AcquisitionType::Finite)),
                        (SAMP_QUANT_SAMP_PER_CHAN.id, Value::U64(1000)),
                        (SAMP_CLK_RATE.id, Value::F64(1000.0)),
                        (SAMP_CLK_SRC.id, Value::Str(String::new())),
                        (SAMP_CLK_ACTIVE_EDGE.id, raw(Edge::Rising)),
                    ],
                    id,
                )
            }
            AttributeTarget::Trigger(_) => {
                use ids::trigger::*;
                let none = raw(TriggerType::None);
                lookup(
                    [
                        (START_TRIG_TYPE.id, none.clone()),
                        (REF_TRIG_TYPE.id, none.clone()),
                        (PAUSE_TRIG_TYPE.id, none.clone()),
                        (ARM_START_TRIG_TYPE.id, none.clone()),
                        (ADV_TRIG_TYPE.id, none),
                        (START_TRIG_RETRIGGERABLE.id, Value::Bool(false)),
                    ],
                    id,
                )
            }
            AttributeTarget::Read(task) => {
                use ids::read::*;
                if id == CHANNELS_TO_READ.id {
                    Some(join(&self.task(*task)?.channels))
                } else {
                    lookup(
                        [
                            (READ_ALL_AVAIL_SAMP.id, Value::Bool(false)),
                            (AUTO_START.id, Value::Bool(true)),
                            (OVER_WRITE.id, raw(OverwriteMode::DoNotOverwriteUnreadSamples)),
                            (RELATIVE_TO.id, raw(ReadRelativeTo::CurrentReadPosition)),
                            (OFFSET.id, Value::I32(0)),
                        ],
                        id,
                    )
                }
            }
            AttributeTarget::Write(_) => {
                use ids::write::*;
                lookup(
                    [
                        (REGEN_MODE.id, raw(RegenerationMode::AllowRegeneration)),
                        (OFFSET.id, Value::I32(0)),
                    ],
                    id,
                )
            }
            AttributeTarget::Watchdog(_, line) if line.is_empty() => {
                use ids::watchdog::*;
                lookup(
                    [
                        (EXPIR_TRIG_TYPE.id, raw(TriggerType::None)),
                        (EXPIR_TRIG_ON_NETWORK_CONN_LOSS.id, Value::Bool(false)),
                    ],
                    id,
                )
            }
            AttributeTarget::PersistedChannel(_) => {
                use ids::persisted_channel::*;
                persisted_defaults(AUTHOR.id, ALLOW_INTERACTIVE_EDITING.id, ALLOW_INTERACTIVE_DELETION.id, id)
            }
            AttributeTarget::PersistedScale(_) => {
                use ids::persisted_scale::*;
                persisted_defaults(AUTHOR.id, ALLOW_INTERACTIVE_EDITING.id, ALLOW_INTERACTIVE_DELETION.id, id)
            }
            AttributeTarget::PersistedTask(_) => {
                use ids::persisted_task::*;
                persisted_defaults(AUTHOR.id, ALLOW_INTERACTIVE_EDITING.id, ALLOW_INTERACTIVE_DELETION.id, id)
            }
            _ => None,
        };
        Ok(value)
    }

    /// Advance the read position for a read of `requested` samples per channel
    /// into a buffer of `len` elements, each sample `width` elements wide.
    fn begin_read(&mut self, task: TaskHandle, requested: i32, len: usize, width: usize) -> Result<Block> {
        let channels = self.channels_to_read(task)?.len();
        let requested = if requested < 0 {
            self.available(task)? as usize
        } else {
            requested as usize
        };
        if len < channels * requested * width {
            return Err(DaqError::from_status(
                codes::WRITE_BUFFER_TOO_SMALL,
                format!(
                    "Buffer of {len} elements is too small for {requested} samples of {channels} channels"
                ),
                None,
            ));
        }
        let count = match self.remaining(task)? {
            Some(remaining) => requested.min(remaining as usize),
            None => requested,
        };
        let record = self.task_mut(task)?;
        let start = record.position;
        record.position += count as u64;
        Ok(Block {
            channels,
            start,
            stride: requested,
            count,
            requested,
        })
    }

    fn begin_write(
        &mut self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        lens: &[usize],
    ) -> Result<&mut TaskRecord> {
        let channels = self.task(task)?.channels.len().max(1);
        if let Some(len) = lens.iter().find(|&&len| len < channels * num_samps_per_chan) {
            return Err(DaqError::from_status(
                codes::WRITE_BUFFER_TOO_SMALL,
                format!(
                    "Buffer of {len} elements is too small for {num_samps_per_chan} samples of {channels} channels"
                ),
                None,
            ));
        }
        if auto_start && !self.task(task)?.running {
            self.start(task)?;
        }
        self.task_mut(task)
    }

    fn register_channels(
        &mut self,
        task: TaskHandle,
        names: Vec<String>,
        physical: Vec<String>,
        seeds: &[(i32, Value)],
    ) -> Result<()> {
        let record = self.task_mut(task)?;
        if let Some(name) = names.iter().find(|name| record.channels.contains(name)) {
            return Err(DaqError::from_status(
                -200_489,
                format!("Channel name '{name}' is already used in the task"),
                None,
            ));
        }
        record.channels.extend(names.iter().cloned());
        record.physical.extend(physical.iter().cloned());
        for (name, physical) in names.into_iter().zip(physical) {
            let target = AttributeTarget::Channel(task, name);
            self.values.insert(
                (target.clone(), ids::channel::PHYSICAL_CHAN_NAME.id),
                Value::Str(physical),
            );
            for (id, value) in seeds {
                self.values.insert((target.clone(), *id), value.clone());
            }
        }
        Ok(())
    }
}

fn invalid_task(task: TaskHandle) -> DaqError {
    DaqError::from_status(
        codes::INVALID_TASK,
        format!("Task specified is invalid or does not exist: {task}"),
        None,
    )
}

fn not_in_task(name: &str) -> DaqError {
    DaqError::from_status(
        CHANNEL_NOT_IN_TASK,
        format!("Specified channel is not in the task: '{name}'"),
        None,
    )
}

fn not_supported(id: i32) -> DaqError {
    DaqError::from_status(
        codes::ATTRIBUTE_NOT_SUPPORTED,
        format!("Specified property is not supported by the device or is not applicable to the task. Property: {id:#x}"),
        None,
    )
}

fn in_store(store: &[String], name: &str) -> Result<()> {
    if store.iter().any(|entry| entry == name) {
        Ok(())
    } else {
        Err(DaqError::from_status(
            NOT_IN_STORE,
            format!("'{name}' is not in the configuration store"),
            None,
        ))
    }
}

fn persisted_defaults(author: i32, editing: i32, deletion: i32, id: i32) -> Option<Value> {
    lookup(
        [
            (author, Value::Str("NI MAX".to_string())),
            (editing, Value::Bool(true)),
            (deletion, Value::Bool(true)),
        ],
        id,
    )
}

fn physical_channel_value(name: &str, id: i32) -> Option<Value> {
    use ids::physical_channel::*;
    let analog_in = name.contains("/ai");
    let analog_out = name.contains("/ao");
    let port = name.contains("/port") && !name.contains("/line");
    if analog_in && id == AI_TERM_CFGS.id {
        // RSE, NRSE and differential.
        Some(Value::I32(0b111))
    } else if analog_out && id == AO_TERM_CFGS.id {
        Some(Value::I32(0b001))
    } else if analog_in && id == AI_SUPPORTED_MEAS_TYPES.id {
        Some(Value::I32s(vec![
            UsageTypeAi::Voltage.to_raw(),
            UsageTypeAi::Current.to_raw(),
            UsageTypeAi::TemperatureThermocouple.to_raw(),
        ]))
    } else if analog_out && id == AO_SUPPORTED_OUTPUT_TYPES.id {
        Some(Value::I32s(vec![
            UsageTypeAo::Voltage.to_raw(),
            UsageTypeAo::Current.to_raw(),
        ]))
    } else if port && (id == DI_PORT_WIDTH.id || id == DO_PORT_WIDTH.id) {
        Some(Value::U32(8))
    } else {
        None
    }
}

/// Fire a slot through its bare pointer, holding no reference of our own, the
/// way the driver's callback threads do.
fn dispatch(slot: Arc<EventSlot>, fire: impl FnOnce(&EventSlot) -> i32) {
    let ptr = Arc::as_ptr(&slot);
    drop(slot);
    // SAFETY: the task record and the task's registry still own the slot.
    let slot = unsafe { EventSlot::retain_raw(ptr) };
    fire(slot.as_ref());
}

fn deadline_after(timeout: f64) -> Option<Instant> {
    (timeout >= 0.0).then(|| Instant::now() + Duration::from_secs_f64(timeout))
}

/// Attribute values a new channel starts with.
fn channel_seeds(config: &ChannelConfig, num_lines: u32) -> Vec<(i32, Value)> {
    use ids::channel::*;
    let mut seeds = vec![
        (CHAN_TYPE.id, raw(config.channel_type())),
        (DESCR.id, Value::Str(String::new())),
        (IS_GLOBAL.id, Value::Bool(false)),
    ];
    if let Some((min_val, max_val)) = config.range() {
        let (min_id, max_id) = match config.channel_type() {
            ChannelType::AnalogOutput => (AO_MIN.id, AO_MAX.id),
            ChannelType::CounterInput => (CI_MIN.id, CI_MAX.id),
            _ => (AI_MIN.id, AI_MAX.id),
        };
        seeds.push((min_id, Value::F64(min_val)));
        seeds.push((max_id, Value::F64(max_val)));
    }
    let ai = |meas: UsageTypeAi| (AI_MEAS_TYPE.id, raw(meas));
    let ci = |meas: UsageTypeCi| (CI_MEAS_TYPE.id, raw(meas));
    match config {
        ChannelConfig::AiVoltage(p) => seeds.extend([
            ai(UsageTypeAi::Voltage),
            (AI_TERM_CFG.id, raw(p.terminal_config)),
            (AI_VOLTAGE_UNITS.id, raw(p.units)),
        ]),
        ChannelConfig::AiCurrent(p) => seeds.extend([
            ai(UsageTypeAi::Current),
            (AI_TERM_CFG.id, raw(p.terminal_config)),
            (AI_CURRENT_UNITS.id, raw(p.units)),
        ]),
        ChannelConfig::AiThermocouple(p) => seeds.extend([
            ai(UsageTypeAi::TemperatureThermocouple),
            (AI_TEMP_UNITS.id, raw(p.units)),
            (AI_THRMCPL_TYPE.id, raw(p.thermocouple_type)),
        ]),
        ChannelConfig::AiRtd(p) => seeds.extend([
            ai(UsageTypeAi::TemperatureRtd),
            (AI_TEMP_UNITS.id, raw(p.units)),
            (AI_RTD_TYPE.id, raw(p.rtd_type)),
            (AI_EXCIT_SRC.id, raw(p.current_excit_source)),
            (AI_EXCIT_VAL.id, Value::F64(p.current_excit_val)),
        ]),
        ChannelConfig::AiBridge(p) => seeds.extend([
            ai(UsageTypeAi::Bridge),
            (AI_BRIDGE_CFG.id, raw(p.bridge_config)),
            (AI_EXCIT_SRC.id, raw(p.voltage_excit_source)),
            (AI_EXCIT_VAL.id, Value::F64(p.voltage_excit_val)),
        ]),
        ChannelConfig::AiStrainGage(p) => seeds.extend([
            ai(UsageTypeAi::StrainGage),
            (AI_EXCIT_SRC.id, raw(p.voltage_excit_source)),
            (AI_EXCIT_VAL.id, Value::F64(p.voltage_excit_val)),
        ]),
        ChannelConfig::AiPower(_) => seeds.push(ai(UsageTypeAi::Power)),
        ChannelConfig::AoVoltage(p) => seeds.extend([
            (AO_OUTPUT_TYPE.id, raw(UsageTypeAo::Voltage)),
            (AO_VOLTAGE_UNITS.id, raw(p.units)),
        ]),
        ChannelConfig::AoCurrent(_) => seeds.push((AO_OUTPUT_TYPE.id, raw(UsageTypeAo::Current))),
        ChannelConfig::DigitalInput { .. } => seeds.extend([
            (DI_NUM_LINES.id, Value::U32(num_lines)),
            (DI_INVERT_LINES.id, Value::Bool(false)),
        ]),
        ChannelConfig::DigitalOutput { .. } => seeds.extend([
            (DO_NUM_LINES.id, Value::U32(num_lines)),
            (DO_INVERT_LINES.id, Value::Bool(false)),
        ]),
        ChannelConfig::CiCountEdges(p) => seeds.extend([
            ci(UsageTypeCi::CountEdges),
            (CI_COUNT.id, Value::U32(p.initial_count)),
            (CI_COUNT_EDGES_DIR.id, raw(p.count_direction)),
        ]),
        ChannelConfig::CiFreq(_) => seeds.push(ci(UsageTypeCi::Frequency)),
        ChannelConfig::CiPeriod(_) => seeds.push(ci(UsageTypeCi::Period)),
        ChannelConfig::CiPulseWidth(_) => seeds.push(ci(UsageTypeCi::PulseWidth)),
        ChannelConfig::CiSemiPeriod(_) => seeds.push(ci(UsageTypeCi::SemiPeriod)),
        ChannelConfig::CoPulseFreq(p) => seeds.extend([
            (CO_OUTPUT_TYPE.id, raw(UsageTypeCo::PulseFrequency)),
            (CO_PULSE_FREQ.id, Value::F64(p.freq)),
            (CO_PULSE_DUTY_CYC.id, Value::F64(p.duty_cycle)),
        ]),
        ChannelConfig::CoPulseTime(p) => seeds.extend([
            (CO_OUTPUT_TYPE.id, raw(UsageTypeCo::PulseTime)),
            (CO_PULSE_HIGH_TIME.id, Value::F64(p.high_time)),
            (CO_PULSE_LOW_TIME.id, Value::F64(p.low_time)),
        ]),
        ChannelConfig::CoPulseTicks(_) => {
            seeds.push((CO_OUTPUT_TYPE.id, raw(UsageTypeCo::PulseTicks)))
        }
    }
    seeds
}

/// In-memory driver stand-in. Cheap to build per test.
#[derive(Debug, Default)]
pub struct DummyInterpreter {
    state: Mutex<State>,
}

macro_rules! getter {
    ($name:ident, $ty:ty, $variant:ident) => {
        fn $name(&self, target: &AttributeTarget, id: i32) -> Result<$ty> {
            match self.get(target, id)? {
                Value::$variant(value) => Ok(value),
                other => Err(DaqError::unexpected_value(
                    concat!("a ", stringify!($variant), " attribute"),
                    format!("{other:?}"),
                )),
            }
        }
    };
}

macro_rules! setter {
    ($name:ident, $ty:ty, $variant:ident) => {
        fn $name(&self, target: &AttributeTarget, id: i32, value: $ty) -> Result<()> {
            self.set(target, id, Value::$variant(value.into()))
        }
    };
}

impl DummyInterpreter {
    /// A session with one simulated X Series device.
    pub fn with_device(name: &str) -> Self {
        Self::default().with_device_named(name)
    }

    pub fn with_device_named(self, name: &str) -> Self {
        self.state.lock().add_device(name, ProductCategory::XSeriesDaq);
        self
    }

    pub fn with_saved_tasks(self, names: &[&str]) -> Self {
        self.state
            .lock()
            .saved_tasks
            .extend(names.iter().map(|name| name.to_string()));
        self
    }

    pub fn with_global_channels(self, names: &[&str]) -> Self {
        self.state
            .lock()
            .global_channels
            .extend(names.iter().map(|name| name.to_string()));
        self
    }

    pub fn with_scales(self, names: &[&str]) -> Self {
        self.state
            .lock()
            .scales
            .extend(names.iter().map(|name| name.to_string()));
        self
    }

    /// Make the next call of `verb` fail with `err`.
    pub fn fail_next(&self, verb: &str, err: DaqError) {
        self.state
            .lock()
            .failures
            .entry(verb.to_string())
            .or_default()
            .push_back(err);
    }

    pub fn open_task_count(&self) -> usize {
        self.state.lock().tasks.len()
    }

    /// The analog data of the last write to `task`, channel-major.
    pub fn written_analog(&self, task: TaskHandle) -> Vec<f64> {
        self.state
            .lock()
            .tasks
            .get(&task.0)
            .map(|t| t.written_analog.clone())
            .unwrap_or_default()
    }

    /// The digital data of the last write to `task`, one element per line or port value.
    pub fn written_digital(&self, task: TaskHandle) -> Vec<u32> {
        self.state
            .lock()
            .tasks
            .get(&task.0)
            .map(|t| t.written_digital.clone())
            .unwrap_or_default()
    }

    /// Deliver an every-N-samples event the way the driver would, off the lock.
    pub fn fire_every_n_samples(&self, task: TaskHandle, event_type: EveryNSamplesEventType) {
        let registration = self
            .state
            .lock()
            .tasks
            .get(&task.0)
            .and_then(|t| t.every_n.get(&event_type).cloned());
        if let Some((num_samples, slot)) = registration {
            dispatch(slot, |slot| slot.fire_every_n_samples(event_type.to_raw(), num_samples));
        }
    }

    pub fn fire_done(&self, task: TaskHandle, status: i32) {
        let slot = self
            .state
            .lock()
            .tasks
            .get(&task.0)
            .and_then(|t| t.done.clone());
        if let Some(slot) = slot {
            dispatch(slot, |slot| slot.fire_done(status));
        }
    }

    pub fn fire_signal(&self, task: TaskHandle) {
        let registration = self
            .state
            .lock()
            .tasks
            .get(&task.0)
            .and_then(|t| t.signal.clone());
        if let Some((signal, slot)) = registration {
            dispatch(slot, |slot| slot.fire_signal(signal.to_raw()));
        }
    }

    /// Lock the state for one verb, consuming a scripted failure if there is one.
    fn enter(&self, verb: &str) -> Result<MutexGuard<'_, State>> {
        let mut state = self.state.lock();
        state.take_failure(verb)?;
        Ok(state)
    }

    fn get(&self, target: &AttributeTarget, id: i32) -> Result<Value> {
        let mut state = self.enter("get_attribute")?;
        let resolved = state.resolve(target)?;
        let Some(target) = resolved.into_iter().next() else {
            return Err(not_supported(id));
        };
        if let Some(value) = state.computed(&target, id)? {
            return Ok(value);
        }
        if let Some(value) = state.stored(target.clone(), id) {
            return Ok(value.clone());
        }
        state.default_value(&target, id)?.ok_or_else(|| not_supported(id))
    }

    fn set(&self, target: &AttributeTarget, id: i32, value: Value) -> Result<()> {
        let mut state = self.enter("set_attribute")?;
        for target in state.resolve(target)? {
            state.values.insert((target, id), value.clone());
        }
        Ok(())
    }

    fn read_with<T>(
        &self,
        verb: &str,
        task: TaskHandle,
        num_samps_per_chan: i32,
        buf: &mut [T],
        value: impl Fn(usize, u64) -> T,
    ) -> Result<usize> {
        let block = self
            .enter(verb)?
            .begin_read(task, num_samps_per_chan, buf.len(), 1)?;
        for (channel, index, position) in block.positions() {
            buf[index] = value(channel, position);
        }
        block.finish()
    }

    fn read_pair<A, B>(
        &self,
        verb: &str,
        task: TaskHandle,
        num_samps_per_chan: i32,
        (first, second): (&mut [A], &mut [B]),
        value: impl Fn(usize, u64) -> (A, B),
    ) -> Result<usize> {
        let block = self.enter(verb)?.begin_read(
            task,
            num_samps_per_chan,
            first.len().min(second.len()),
            1,
        )?;
        for (channel, index, position) in block.positions() {
            let (a, b) = value(channel, position);
            first[index] = a;
            second[index] = b;
        }
        block.finish()
    }

    fn read_scalar<T>(&self, verb: &str, task: TaskHandle, value: impl Fn(u64) -> T) -> Result<T> {
        let mut state = self.enter(verb)?;
        let channels = state.channels_to_read(task)?.len().max(1);
        let block = state.begin_read(task, 1, channels, 1)?;
        block.finish()?;
        Ok(value(block.start))
    }

    fn write_with(
        &self,
        verb: &str,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        lens: &[usize],
        record: impl FnOnce(&mut TaskRecord),
    ) -> Result<usize> {
        let mut state = self.enter(verb)?;
        record(state.begin_write(task, num_samps_per_chan, auto_start, lens)?);
        Ok(num_samps_per_chan)
    }

    fn store_verb(&self, verb: &str, delete: impl FnOnce(&mut State) -> &mut Vec<String>, name: &str) -> Result<()> {
        let mut state = self.enter(verb)?;
        let store = delete(&mut *state);
        in_store(store, name)?;
        store.retain(|entry| entry != name);
        Ok(())
    }
}

impl Interpreter for DummyInterpreter {
    getter!(get_attribute_bool, bool, Bool);
    getter!(get_attribute_i32, i32, I32);
    getter!(get_attribute_u32, u32, U32);
    getter!(get_attribute_u64, u64, U64);
    getter!(get_attribute_f64, f64, F64);
    getter!(get_attribute_string, String, Str);
    getter!(get_attribute_i32_array, Vec<i32>, I32s);
    getter!(get_attribute_u32_array, Vec<u32>, U32s);
    getter!(get_attribute_f64_array, Vec<f64>, F64s);
    getter!(get_attribute_u8_array, Vec<u8>, U8s);

    setter!(set_attribute_bool, bool, Bool);
    setter!(set_attribute_i32, i32, I32);
    setter!(set_attribute_u32, u32, U32);
    setter!(set_attribute_u64, u64, U64);
    setter!(set_attribute_f64, f64, F64);
    setter!(set_attribute_string, &str, Str);

    fn reset_attribute(&self, target: &AttributeTarget, id: i32) -> Result<()> {
        let mut state = self.enter("reset_attribute")?;
        for target in state.resolve(target)? {
            state.values.remove(&(target, id));
        }
        Ok(())
    }

    fn create_task(&self, name: &str) -> Result<TaskHandle> {
        self.enter("create_task")?.new_task(name)
    }

    fn load_task(&self, name: &str) -> Result<TaskHandle> {
        let mut state = self.enter("load_task")?;
        in_store(&state.saved_tasks, name)?;
        state.new_task(name)
    }

    fn add_global_chans_to_task(&self, task: TaskHandle, channel_names: &str) -> Result<()> {
        let mut state = self.enter("add_global_chans_to_task")?;
        let names = unflatten_channel_string(channel_names)?;
        for name in &names {
            in_store(&state.global_channels, name)?;
        }
        let mut seeds = channel_seeds(&ChannelConfig::AiVoltage(Default::default()), 1);
        seeds.push((ids::channel::IS_GLOBAL.id, Value::Bool(true)));
        let physical = vec![String::new(); names.len()];
        state.register_channels(task, names, physical, &seeds)
    }

    fn clear_task(&self, task: TaskHandle) -> Result<()> {
        let mut state = self.enter("clear_task")?;
        state
            .tasks
            .shift_remove(&task.0)
            .ok_or_else(|| invalid_task(task))?;
        state.values.retain(|(target, _), _| !targets_task(target, task));
        Ok(())
    }

    fn start_task(&self, task: TaskHandle) -> Result<()> {
        self.enter("start_task")?.start(task)
    }

    fn stop_task(&self, task: TaskHandle) -> Result<()> {
        self.enter("stop_task")?.task_mut(task)?.running = false;
        Ok(())
    }

    fn task_control(&self, task: TaskHandle, action: TaskMode) -> Result<()> {
        let mut state = self.enter("task_control")?;
        match action {
            TaskMode::Start => state.start(task),
            TaskMode::Stop | TaskMode::Abort => {
                state.task_mut(task)?.running = false;
                Ok(())
            }
            _ => state.task(task).map(|_| ()),
        }
    }

    fn is_task_done(&self, task: TaskHandle) -> Result<bool> {
        let state = self.enter("is_task_done")?;
        let running = state.task(task)?.running;
        Ok(!running || state.remaining(task)? == Some(0))
    }

    fn wait_until_task_done(&self, task: TaskHandle, _timeout: f64) -> Result<()> {
        let state = self.enter("wait_until_task_done")?;
        let running = state.task(task)?.running;
        if running && state.remaining(task)?.is_none() {
            return Err(DaqError::from_status(
                codes::WAIT_UNTIL_DONE_DOES_NOT_INDICATE_DONE,
                "Wait Until Done did not indicate all samples were acquired or generated.",
                None,
            ));
        }
        Ok(())
    }

    fn create_channel(
        &self,
        task: TaskHandle,
        physical_channel: &str,
        name_to_assign: &str,
        config: &ChannelConfig,
    ) -> Result<()> {
        let mut state = self.enter("create_channel")?;
        let physical = unflatten_channel_string(physical_channel)?;
        for name in &physical {
            state.check_physical(name)?;
        }
        let all_lines = matches!(
            config,
            ChannelConfig::DigitalInput {
                line_grouping: LineGrouping::ChanForAllLines
            } | ChannelConfig::DigitalOutput {
                line_grouping: LineGrouping::ChanForAllLines
            }
        );
        let (names, physical_names, num_lines) = if all_lines {
            let physical_name = physical_channel.trim().to_string();
            let name = if name_to_assign.is_empty() {
                physical_name.clone()
            } else {
                name_to_assign.to_string()
            };
            (vec![name], vec![physical_name], physical.len() as u32)
        } else {
            let names = if name_to_assign.is_empty() {
                physical.clone()
            } else {
                unflatten_channel_string(name_to_assign)?
            };
            if names.len() != physical.len() {
                return Err(DaqError::invalid_argument(format!(
                    "{} names cannot be assigned to {} physical channels",
                    names.len(),
                    physical.len()
                )));
            }
            (names, physical, 1)
        };
        let seeds = channel_seeds(config, num_lines);
        state.register_channels(task, names, physical_names, &seeds)
    }

    fn cfg_samp_clk_timing(
        &self,
        task: TaskHandle,
        source: &str,
        rate: f64,
        active_edge: Edge,
        sample_mode: AcquisitionType,
        samps_per_chan: u64,
    ) -> Result<()> {
        use ids::timing::*;
        let mut state = self.enter("cfg_samp_clk_timing")?;
        state.task(task)?;
        let target = AttributeTarget::Timing(task);
        for (id, value) in [
            (SAMP_TIMING_TYPE.id, raw(SampleTimingType::SampleClock)),
            (SAMP_CLK_RATE.id, Value::F64(rate)),
            (SAMP_CLK_SRC.id, Value::Str(source.to_string())),
            (SAMP_CLK_ACTIVE_EDGE.id, raw(active_edge)),
            (SAMP_QUANT_SAMP_MODE.id, raw(sample_mode)),
            (SAMP_QUANT_SAMP_PER_CHAN.id, Value::U64(samps_per_chan)),
        ] {
            state.values.insert((target.clone(), id), value);
        }
        Ok(())
    }

    fn cfg_implicit_timing(
        &self,
        task: TaskHandle,
        sample_mode: AcquisitionType,
        samps_per_chan: u64,
    ) -> Result<()> {
        use ids::timing::*;
        let mut state = self.enter("cfg_implicit_timing")?;
        state.task(task)?;
        let target = AttributeTarget::Timing(task);
        for (id, value) in [
            (SAMP_TIMING_TYPE.id, raw(SampleTimingType::Implicit)),
            (SAMP_QUANT_SAMP_MODE.id, raw(sample_mode)),
            (SAMP_QUANT_SAMP_PER_CHAN.id, Value::U64(samps_per_chan)),
        ] {
            state.values.insert((target.clone(), id), value);
        }
        Ok(())
    }

    fn cfg_dig_edge_start_trig(&self, task: TaskHandle, source: &str, edge: Edge) -> Result<()> {
        use ids::trigger::*;
        self.store_all(
            "cfg_dig_edge_start_trig",
            AttributeTarget::Trigger(task),
            vec![
                (START_TRIG_TYPE.id, raw(TriggerType::DigitalEdge)),
                (DIG_EDGE_START_TRIG_SRC.id, Value::Str(source.to_string())),
                (DIG_EDGE_START_TRIG_EDGE.id, raw(edge)),
            ],
        )
    }

    fn cfg_anlg_edge_start_trig(
        &self,
        task: TaskHandle,
        source: &str,
        slope: Slope,
        level: f64,
    ) -> Result<()> {
        use ids::trigger::*;
        self.store_all(
            "cfg_anlg_edge_start_trig",
            AttributeTarget::Trigger(task),
            vec![
                (START_TRIG_TYPE.id, raw(TriggerType::AnalogEdge)),
                (ANLG_EDGE_START_TRIG_SRC.id, Value::Str(source.to_string())),
                (ANLG_EDGE_START_TRIG_SLOPE.id, raw(slope)),
                (ANLG_EDGE_START_TRIG_LVL.id, Value::F64(level)),
            ],
        )
    }

    fn cfg_dig_edge_ref_trig(
        &self,
        task: TaskHandle,
        source: &str,
        edge: Edge,
        pretrigger_samples: u32,
    ) -> Result<()> {
        use ids::trigger::*;
        self.store_all(
            "cfg_dig_edge_ref_trig",
            AttributeTarget::Trigger(task),
            vec![
                (REF_TRIG_TYPE.id, raw(TriggerType::DigitalEdge)),
                (DIG_EDGE_REF_TRIG_SRC.id, Value::Str(source.to_string())),
                (DIG_EDGE_REF_TRIG_EDGE.id, raw(edge)),
                (REF_TRIG_PRETRIG_SAMPLES.id, Value::U32(pretrigger_samples)),
            ],
        )
    }

    fn cfg_anlg_edge_ref_trig(
        &self,
        task: TaskHandle,
        source: &str,
        slope: Slope,
        level: f64,
        pretrigger_samples: u32,
    ) -> Result<()> {
        use ids::trigger::*;
        self.store_all(
            "cfg_anlg_edge_ref_trig",
            AttributeTarget::Trigger(task),
            vec![
                (REF_TRIG_TYPE.id, raw(TriggerType::AnalogEdge)),
                (ANLG_EDGE_REF_TRIG_SRC.id, Value::Str(source.to_string())),
                (ANLG_EDGE_REF_TRIG_SLOPE.id, raw(slope)),
                (ANLG_EDGE_REF_TRIG_LVL.id, Value::F64(level)),
                (REF_TRIG_PRETRIG_SAMPLES.id, Value::U32(pretrigger_samples)),
            ],
        )
    }

    fn disable_start_trig(&self, task: TaskHandle) -> Result<()> {
        self.store_all(
            "disable_start_trig",
            AttributeTarget::Trigger(task),
            vec![(ids::trigger::START_TRIG_TYPE.id, raw(TriggerType::None))],
        )
    }

    fn disable_ref_trig(&self, task: TaskHandle) -> Result<()> {
        self.store_all(
            "disable_ref_trig",
            AttributeTarget::Trigger(task),
            vec![(ids::trigger::REF_TRIG_TYPE.id, raw(TriggerType::None))],
        )
    }

    fn send_software_trigger(&self, task: TaskHandle, _trigger: SoftwareTrigger) -> Result<()> {
        self.enter("send_software_trigger")?.task(task).map(|_| ())
    }

    fn export_signal(&self, task: TaskHandle, _signal: Signal, output_terminal: &str) -> Result<()> {
        let state = self.enter("export_signal")?;
        state.task(task)?;
        state.check_physical(output_terminal)
    }

    fn cfg_input_buffer(&self, task: TaskHandle, samps_per_chan: u32) -> Result<()> {
        self.store_all(
            "cfg_input_buffer",
            AttributeTarget::Buffer(task),
            vec![(ids::buffer::INPUT_BUF_SIZE.id, Value::U32(samps_per_chan))],
        )
    }

    fn cfg_output_buffer(&self, task: TaskHandle, samps_per_chan: u32) -> Result<()> {
        self.store_all(
            "cfg_output_buffer",
            AttributeTarget::Buffer(task),
            vec![(ids::buffer::OUTPUT_BUF_SIZE.id, Value::U32(samps_per_chan))],
        )
    }

    fn read_analog_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        read_array: &mut [f64],
    ) -> Result<usize> {
        self.read_with("read_analog_f64", task, num_samps_per_chan, read_array, analog)
    }

    fn read_analog_scalar_f64(&self, task: TaskHandle, _timeout: f64) -> Result<f64> {
        self.read_scalar("read_analog_scalar_f64", task, |position| analog(0, position))
    }

    fn read_digital_lines(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        read_array: &mut [u8],
    ) -> Result<(usize, usize)> {
        let mut state = self.enter("read_digital_lines")?;
        let lines = state.max_lines(task, ids::channel::DI_NUM_LINES.id)? as usize;
        let block = state.begin_read(task, num_samps_per_chan, read_array.len(), lines)?;
        drop(state);
        for (channel, index, position) in block.positions() {
            for line in 0..lines {
                let high = (position as usize + channel + line) % 2 == 0;
                read_array[index * lines + line] = u8::from(high);
            }
        }
        block.finish().map(|read| (read, lines))
    }

    fn read_digital_u8(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        read_array: &mut [u8],
    ) -> Result<usize> {
        self.read_with("read_digital_u8", task, num_samps_per_chan, read_array, |c, p| {
            (p as usize + c) as u8
        })
    }

    fn read_digital_u16(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        read_array: &mut [u16],
    ) -> Result<usize> {
        self.read_with("read_digital_u16", task, num_samps_per_chan, read_array, |c, p| {
            (p as usize + c) as u16
        })
    }

    fn read_digital_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        read_array: &mut [u32],
    ) -> Result<usize> {
        self.read_with("read_digital_u32", task, num_samps_per_chan, read_array, count)
    }

    fn read_digital_scalar_u32(&self, task: TaskHandle, _timeout: f64) -> Result<u32> {
        self.read_scalar("read_digital_scalar_u32", task, |position| count(0, position))
    }

    fn read_counter_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        read_array: &mut [f64],
    ) -> Result<usize> {
        self.read_with("read_counter_f64", task, num_samps_per_chan, read_array, |c, p| {
            f64::from(count(c, p))
        })
    }

    fn read_counter_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        read_array: &mut [u32],
    ) -> Result<usize> {
        self.read_with("read_counter_u32", task, num_samps_per_chan, read_array, count)
    }

    fn read_counter_scalar_f64(&self, task: TaskHandle, _timeout: f64) -> Result<f64> {
        self.read_scalar("read_counter_scalar_f64", task, |position| {
            f64::from(count(0, position))
        })
    }

    fn read_counter_scalar_u32(&self, task: TaskHandle, _timeout: f64) -> Result<u32> {
        self.read_scalar("read_counter_scalar_u32", task, |position| count(0, position))
    }

    fn read_ctr_freq(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        frequencies: &mut [f64],
        duty_cycles: &mut [f64],
    ) -> Result<usize> {
        self.read_pair(
            "read_ctr_freq",
            task,
            num_samps_per_chan,
            (frequencies, duty_cycles),
            |c, p| {
                let sample = pulse_frequency(c, p);
                (sample.freq, sample.duty_cycle)
            },
        )
    }

    fn read_ctr_time(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        high_times: &mut [f64],
        low_times: &mut [f64],
    ) -> Result<usize> {
        self.read_pair(
            "read_ctr_time",
            task,
            num_samps_per_chan,
            (high_times, low_times),
            |c, p| {
                let sample = pulse_time(c, p);
                (sample.high_time, sample.low_time)
            },
        )
    }

    fn read_ctr_ticks(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        high_ticks: &mut [u32],
        low_ticks: &mut [u32],
    ) -> Result<usize> {
        self.read_pair(
            "read_ctr_ticks",
            task,
            num_samps_per_chan,
            (high_ticks, low_ticks),
            |c, p| {
                let sample = pulse_ticks(c, p);
                (sample.high_tick, sample.low_tick)
            },
        )
    }

    fn read_ctr_freq_scalar(&self, task: TaskHandle, _timeout: f64) -> Result<CtrFreq> {
        self.read_scalar("read_ctr_freq_scalar", task, |position| pulse_frequency(0, position))
    }

    fn read_ctr_time_scalar(&self, task: TaskHandle, _timeout: f64) -> Result<CtrTime> {
        self.read_scalar("read_ctr_time_scalar", task, |position| pulse_time(0, position))
    }

    fn read_ctr_ticks_scalar(&self, task: TaskHandle, _timeout: f64) -> Result<CtrTick> {
        self.read_scalar("read_ctr_ticks_scalar", task, |position| pulse_ticks(0, position))
    }

    fn read_power_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        _timeout: f64,
        voltages: &mut [f64],
        currents: &mut [f64],
    ) -> Result<usize> {
        self.read_pair(
            "read_power_f64",
            task,
            num_samps_per_chan,
            (voltages, currents),
            |c, p| {
                let sample = power(c, p);
                (sample.voltage, sample.current)
            },
        )
    }

    fn read_power_scalar_f64(&self, task: TaskHandle, _timeout: f64) -> Result<PowerMeasurement> {
        self.read_scalar("read_power_scalar_f64", task, |position| power(0, position))
    }

    fn write_analog_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        write_array: &[f64],
    ) -> Result<usize> {
        self.write_with(
            "write_analog_f64",
            task,
            num_samps_per_chan,
            auto_start,
            &[write_array.len()],
            |record| record.written_analog = write_array.to_vec(),
        )
    }

    fn write_analog_scalar_f64(
        &self,
        task: TaskHandle,
        auto_start: bool,
        _timeout: f64,
        value: f64,
    ) -> Result<()> {
        self.write_with("write_analog_scalar_f64", task, 1, auto_start, &[], |record| {
            record.written_analog = vec![value]
        })
        .map(|_| ())
    }

    fn write_digital_lines(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        write_array: &[u8],
    ) -> Result<usize> {
        self.write_with(
            "write_digital_lines",
            task,
            num_samps_per_chan,
            auto_start,
            &[write_array.len()],
            |record| record.written_digital = write_array.iter().map(|&b| u32::from(b)).collect(),
        )
    }

    fn write_digital_u8(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        write_array: &[u8],
    ) -> Result<usize> {
        self.write_with(
            "write_digital_u8",
            task,
            num_samps_per_chan,
            auto_start,
            &[write_array.len()],
            |record| record.written_digital = write_array.iter().map(|&v| u32::from(v)).collect(),
        )
    }

    fn write_digital_u16(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        write_array: &[u16],
    ) -> Result<usize> {
        self.write_with(
            "write_digital_u16",
            task,
            num_samps_per_chan,
            auto_start,
            &[write_array.len()],
            |record| record.written_digital = write_array.iter().map(|&v| u32::from(v)).collect(),
        )
    }

    fn write_digital_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        write_array: &[u32],
    ) -> Result<usize> {
        self.write_with(
            "write_digital_u32",
            task,
            num_samps_per_chan,
            auto_start,
            &[write_array.len()],
            |record| record.written_digital = write_array.to_vec(),
        )
    }

    fn write_digital_scalar_u32(
        &self,
        task: TaskHandle,
        auto_start: bool,
        _timeout: f64,
        value: u32,
    ) -> Result<()> {
        self.write_with("write_digital_scalar_u32", task, 1, auto_start, &[], |record| {
            record.written_digital = vec![value]
        })
        .map(|_| ())
    }

    fn write_ctr_freq(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        frequencies: &[f64],
        duty_cycles: &[f64],
    ) -> Result<usize> {
        self.write_with(
            "write_ctr_freq",
            task,
            num_samps_per_chan,
            auto_start,
            &[frequencies.len(), duty_cycles.len()],
            |_| {},
        )
    }

    fn write_ctr_time(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        high_times: &[f64],
        low_times: &[f64],
    ) -> Result<usize> {
        self.write_with(
            "write_ctr_time",
            task,
            num_samps_per_chan,
            auto_start,
            &[high_times.len(), low_times.len()],
            |_| {},
        )
    }

    fn write_ctr_ticks(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        _timeout: f64,
        high_ticks: &[u32],
        low_ticks: &[u32],
    ) -> Result<usize> {
        self.write_with(
            "write_ctr_ticks",
            task,
            num_samps_per_chan,
            auto_start,
            &[high_ticks.len(), low_ticks.len()],
            |_| {},
        )
    }

    fn write_ctr_freq_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        _timeout: f64,
        _value: CtrFreq,
    ) -> Result<()> {
        self.write_with("write_ctr_freq_scalar", task, 1, auto_start, &[], |_| {})
            .map(|_| ())
    }

    fn write_ctr_time_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        _timeout: f64,
        _value: CtrTime,
    ) -> Result<()> {
        self.write_with("write_ctr_time_scalar", task, 1, auto_start, &[], |_| {})
            .map(|_| ())
    }

    fn write_ctr_ticks_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        _timeout: f64,
        _value: CtrTick,
    ) -> Result<()> {
        self.write_with("write_ctr_ticks_scalar", task, 1, auto_start, &[], |_| {})
            .map(|_| ())
    }

    fn register_every_n_samples_event(
        &self,
        task: TaskHandle,
        event_type: EveryNSamplesEventType,
        num_samples: u32,
        slot: Option<Arc<EventSlot>>,
    ) -> Result<()> {
        let mut state = self.enter("register_every_n_samples_event")?;
        let record = state.task_mut(task)?;
        match slot {
            Some(slot) => {
                record.every_n.insert(event_type, (num_samples, slot));
            }
            None => {
                record.every_n.remove(&event_type);
            }
        }
        Ok(())
    }

    fn register_done_event(&self, task: TaskHandle, slot: Option<Arc<EventSlot>>) -> Result<()> {
        self.enter("register_done_event")?.task_mut(task)?.done = slot;
        Ok(())
    }

    fn register_signal_event(
        &self,
        task: TaskHandle,
        signal: Signal,
        slot: Option<Arc<EventSlot>>,
    ) -> Result<()> {
        self.enter("register_signal_event")?.task_mut(task)?.signal =
            slot.map(|slot| (signal, slot));
        Ok(())
    }

    fn reset_device(&self, device: &str) -> Result<()> {
        self.enter("reset_device")?.check_device(device)
    }

    fn self_test_device(&self, device: &str) -> Result<()> {
        self.enter("self_test_device")?.check_device(device)
    }

    fn add_network_device(
        &self,
        ip_address: &str,
        device_name: &str,
        _attempt_reservation: bool,
        _timeout: f64,
    ) -> Result<String> {
        let mut state = self.enter("add_network_device")?;
        let name = if device_name.is_empty() {
            state.network_devices += 1;
            format!("NetworkDAQ{}", state.network_devices)
        } else {
            device_name.to_string()
        };
        if state.check_device(&name).is_err() {
            state.add_device(&name, ProductCategory::NetworkDaq);
            state.values.insert(
                (
                    AttributeTarget::Device(name.clone()),
                    ids::device::TCPIP_HOSTNAME.id,
                ),
                Value::Str(ip_address.to_string()),
            );
        }
        Ok(name)
    }

    fn delete_network_device(&self, device: &str) -> Result<()> {
        let mut state = self.enter("delete_network_device")?;
        state.check_device(device)?;
        state.devices.retain(|d| d != device);
        state
            .values
            .retain(|(target, _), _| *target != AttributeTarget::Device(device.to_string()));
        Ok(())
    }

    fn reserve_network_device(&self, device: &str, _override_reservation: bool) -> Result<()> {
        self.enter("reserve_network_device")?.check_device(device)
    }

    fn unreserve_network_device(&self, device: &str) -> Result<()> {
        self.enter("unreserve_network_device")?.check_device(device)
    }

    fn connect_terms(
        &self,
        source_terminal: &str,
        destination_terminal: &str,
        _polarity: Polarity,
    ) -> Result<()> {
        let state = self.enter("connect_terms")?;
        state.check_physical(source_terminal)?;
        state.check_physical(destination_terminal)
    }

    fn disconnect_terms(&self, source_terminal: &str, destination_terminal: &str) -> Result<()> {
        let state = self.enter("disconnect_terms")?;
        state.check_physical(source_terminal)?;
        state.check_physical(destination_terminal)
    }

    fn tristate_output_term(&self, output_terminal: &str) -> Result<()> {
        self.enter("tristate_output_term")?
            .check_physical(output_terminal)
    }

    fn delete_saved_global_chan(&self, name: &str) -> Result<()> {
        self.store_verb("delete_saved_global_chan", |s| &mut s.global_channels, name)
    }

    fn delete_saved_scale(&self, name: &str) -> Result<()> {
        self.store_verb("delete_saved_scale", |s| &mut s.scales, name)
    }

    fn delete_saved_task(&self, name: &str) -> Result<()> {
        self.store_verb("delete_saved_task", |s| &mut s.saved_tasks, name)
    }

    fn create_watchdog_timer_task(
        &self,
        device: &str,
        name: &str,
        timeout: f64,
    ) -> Result<TaskHandle> {
        let mut state = self.enter("create_watchdog_timer_task")?;
        state.check_device(device)?;
        let task = state.new_task(name)?;
        state.task_mut(task)?.watchdog = Some(WatchdogTimer {
            deadline: None,
            expired: false,
        });
        state.values.insert(
            (
                AttributeTarget::Watchdog(task, String::new()),
                ids::watchdog::TIMEOUT.id,
            ),
            Value::F64(timeout),
        );
        Ok(task)
    }

    fn cfg_watchdog_ao_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[f64],
        output_types: &[WatchdogAoExpirState],
    ) -> Result<()> {
        use ids::watchdog::*;
        let per_line: Vec<Vec<(i32, Value)>> = expir_states
            .iter()
            .zip(output_types)
            .map(|(&state, &output_type)| {
                vec![
                    (AO_EXPIR_STATE.id, Value::F64(state)),
                    (AO_OUTPUT_TYPE.id, raw(output_type)),
                ]
            })
            .collect();
        self.store_lines("cfg_watchdog_ao_expir_states", task, channel_names, per_line)
    }

    fn cfg_watchdog_co_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[WatchdogCoExpirState],
    ) -> Result<()> {
        let per_line = expir_states
            .iter()
            .map(|&state| vec![(ids::watchdog::CO_EXPIR_STATE.id, raw(state))])
            .collect();
        self.store_lines("cfg_watchdog_co_expir_states", task, channel_names, per_line)
    }

    fn cfg_watchdog_do_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[DigitalLineState],
    ) -> Result<()> {
        let per_line = expir_states
            .iter()
            .map(|&state| vec![(ids::watchdog::DO_EXPIR_STATE.id, raw(state))])
            .collect();
        self.store_lines("cfg_watchdog_do_expir_states", task, channel_names, per_line)
    }

    fn control_watchdog_task(
        &self,
        task: TaskHandle,
        action: WatchdogControlAction,
    ) -> Result<()> {
        let mut state = self.enter("control_watchdog_task")?;
        let deadline = deadline_after(state.watchdog_timeout(task));
        let record = state.task_mut(task)?;
        let Some(timer) = record.watchdog.as_mut() else {
            return Err(DaqError::from_status(
                codes::INVALID_TASK,
                format!("Task '{}' is not a watchdog timer task", record.name),
                None,
            ));
        };
        if action == WatchdogControlAction::ClearExpiration {
            timer.expired = false;
        }
        timer.deadline = deadline;
        Ok(())
    }
}

impl DummyInterpreter {
    fn store_all(&self, verb: &str, target: AttributeTarget, values: Vec<(i32, Value)>) -> Result<()> {
        let mut state = self.enter(verb)?;
        state.resolve(&target)?;
        for (id, value) in values {
            state.values.insert((target.clone(), id), value);
        }
        Ok(())
    }

    fn store_lines(
        &self,
        verb: &str,
        task: TaskHandle,
        channel_names: &str,
        per_line: Vec<Vec<(i32, Value)>>,
    ) -> Result<()> {
        let mut state = self.enter(verb)?;
        state.task(task)?;
        let lines = unflatten_channel_string(channel_names)?;
        if lines.len() != per_line.len() {
            return Err(DaqError::invalid_argument(format!(
                "{} expiration states given for {} lines",
                per_line.len(),
                lines.len()
            )));
        }
        for (line, values) in lines.into_iter().zip(per_line) {
            state.check_physical(&line)?;
            let target = AttributeTarget::Watchdog(task, line);
            for (id, value) in values {
                state.values.insert((target.clone(), id), value);
            }
        }
        Ok(())
    }
}

fn targets_task(target: &AttributeTarget, task: TaskHandle) -> bool {
    match target {
        AttributeTarget::Task(handle)
        | AttributeTarget::Channel(handle, _)
        | AttributeTarget::Timing(handle)
        | AttributeTarget::Trigger(handle)
        | AttributeTarget::Read(handle)
        | AttributeTarget::Write(handle)
        | AttributeTarget::Buffer(handle)
        | AttributeTarget::Watchdog(handle, _) => *handle == task,
        _ => false,
    }
}

fn analog(channel: usize, position: u64) -> f64 {
    channel as f64 + position as f64 / 1000.0
}

fn count(channel: usize, position: u64) -> u32 {
    (position as usize + channel) as u32
}

fn pulse_frequency(channel: usize, position: u64) -> CtrFreq {
    CtrFreq {
        freq: 1000.0 + f64::from(count(channel, position)),
        duty_cycle: 0.5,
    }
}

fn pulse_time(channel: usize, position: u64) -> CtrTime {
    let period = 0.001 * f64::from(count(channel, position) + 1);
    CtrTime {
        high_time: period / 2.0,
        low_time: period / 2.0,
    }
}

fn pulse_ticks(channel: usize, position: u64) -> CtrTick {
    CtrTick {
        high_tick: 100 + count(channel, position),
        low_tick: 100,
    }
}

fn power(channel: usize, position: u64) -> PowerMeasurement {
    PowerMeasurement {
        voltage: analog(channel, position),
        current: 0.01,
    }
}
