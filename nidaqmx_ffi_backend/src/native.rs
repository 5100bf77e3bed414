//! [`NativeInterpreter`]: the [`Interpreter`] that calls the NIDAQmx C library
//! in-process.
//!
//! ## Handles
//!
//! Driver task handles are opaque pointers. They cross the trait boundary as
//! [`TaskHandle`]s holding the pointer's address and are turned back into
//! pointers only at the call site.
//!
//! ## Attributes
//!
//! An [`AttributeTarget`] picks the family of `DAQmxGet/Set/Reset*Attribute`
//! functions to call. Strings and arrays are read with the two-pass sizing
//! protocol in [`crate::buffer`].
//!
//! ## Events
//!
//! The driver receives a plain `extern "C"` trampoline plus the address of the
//! callback's [`EventSlot`]. The interpreter keeps a reference to every slot it
//! handed out, including replaced and unregistered ones, until the task is
//! cleared. Each trampoline takes its own strong reference for the length of
//! the call, so a callback that clears its task is not freed under itself. A
//! panic inside a user callback is caught at the trampoline and never unwinds
//! into the driver.

use crate::buffer::{c_string, decode_c_string, read_two_pass};
use crate::config::NativeConfig;
use crate::error_log::{ErrorLog, StatusHandler};
use crate::ffi::*;
use libc::{c_char, c_void};
use nidaqmx_backend::{
    AcquisitionType, AttributeTarget, ChannelConfig, CtrFreq, CtrTick, CtrTime, DaqError,
    DaqmxEnum, DigitalLineState, Edge, EventKind, EventSlot, EveryNSamplesEventType,
    Interpreter, Polarity, PowerMeasurement, Result, Signal, Slope, SoftwareTrigger, TaskHandle,
    TaskMode, TransferDirection, WatchdogAoExpirState, WatchdogCoExpirState,
    WatchdogControlAction,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::CString;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::Arc;
use tracing::{debug, error, trace};

fn raw(task: TaskHandle) -> RawTaskHandle {
    task.0 as RawTaskHandle
}

fn handle(task: RawTaskHandle) -> TaskHandle {
    TaskHandle(task as usize)
}

fn bool32(value: bool) -> CBool32 {
    CBool32::from(value)
}

/// Null for the sizing probe, the buffer otherwise.
fn buf_ptr<T>(buffer: &mut [T]) -> *mut T {
    if buffer.is_empty() {
        ptr::null_mut()
    } else {
        buffer.as_mut_ptr()
    }
}

fn array_size(len: usize) -> Result<CUint32> {
    CUint32::try_from(len).map_err(|_| {
        DaqError::invalid_argument(format!("A buffer of {len} elements is too large"))
    })
}

fn samps_per_chan(num_samps_per_chan: usize) -> Result<CInt32> {
    CInt32::try_from(num_samps_per_chan).map_err(|_| {
        DaqError::invalid_argument(format!(
            "Cannot transfer {num_samps_per_chan} samples per channel in one call"
        ))
    })
}

fn read_only(target: &AttributeTarget) -> DaqError {
    DaqError::invalid_argument(format!("Attributes of {target:?} are read-only"))
}

/// A resolved attribute target, with names converted for the driver.
#[derive(Debug)]
enum Scope {
    System,
    Device(CString),
    PhysicalChannel(CString),
    PersistedChannel(CString),
    PersistedScale(CString),
    PersistedTask(CString),
    Task(RawTaskHandle),
    Channel(RawTaskHandle, CString),
    Timing(RawTaskHandle),
    Trigger(RawTaskHandle),
    Read(RawTaskHandle),
    Write(RawTaskHandle),
    Buffer(RawTaskHandle),
    Watchdog(RawTaskHandle, CString),
}

/// A value for one of the variadic setters. Only types that survive C default
/// argument promotion unchanged appear here.
#[derive(Debug, Clone, Copy)]
enum SetValue {
    U32(CUint32),
    I32(CInt32),
    U64(CUint64),
    F64(CFloat64),
    Str(*const c_char),
}

impl Scope {
    fn resolve(target: &AttributeTarget) -> Result<Self> {
        Ok(match target {
            AttributeTarget::System => Self::System,
            AttributeTarget::Device(name) => Self::Device(c_string(name)?),
            AttributeTarget::PhysicalChannel(name) => Self::PhysicalChannel(c_string(name)?),
            AttributeTarget::PersistedChannel(name) => Self::PersistedChannel(c_string(name)?),
            AttributeTarget::PersistedScale(name) => Self::PersistedScale(c_string(name)?),
            AttributeTarget::PersistedTask(name) => Self::PersistedTask(c_string(name)?),
            AttributeTarget::Task(task) => Self::Task(raw(*task)),
            AttributeTarget::Channel(task, channel) => Self::Channel(raw(*task), c_string(channel)?),
            AttributeTarget::Timing(task) => Self::Timing(raw(*task)),
            AttributeTarget::Trigger(task) => Self::Trigger(raw(*task)),
            AttributeTarget::Read(task) => Self::Read(raw(*task)),
            AttributeTarget::Write(task) => Self::Write(raw(*task)),
            AttributeTarget::Buffer(task) => Self::Buffer(raw(*task)),
            AttributeTarget::Watchdog(task, lines) => Self::Watchdog(raw(*task), c_string(lines)?),
        })
    }

    /// `size` is passed for strings and arrays only.
    unsafe fn get(&self, id: CInt32, value: *mut c_void, size: Option<CUint32>) -> CInt32 {
        macro_rules! sized {
            ($f:ident($($arg:expr),*)) => {
                match size {
                    Some(size) => $f($($arg),*, value, size),
                    None => $f($($arg),*, value),
                }
            };
        }
        match self {
            Self::System => sized!(DAQmxGetSystemInfoAttribute(id)),
            Self::Device(name) => sized!(DAQmxGetDeviceAttribute(name.as_ptr(), id)),
            Self::PhysicalChannel(name) => sized!(DAQmxGetPhysicalChanAttribute(name.as_ptr(), id)),
            Self::PersistedChannel(name) => {
                sized!(DAQmxGetPersistedChanAttribute(name.as_ptr(), id))
            }
            Self::PersistedScale(name) => sized!(DAQmxGetPersistedScaleAttribute(name.as_ptr(), id)),
            Self::PersistedTask(name) => sized!(DAQmxGetPersistedTaskAttribute(name.as_ptr(), id)),
            Self::Task(task) => sized!(DAQmxGetTaskAttribute(*task, id)),
            Self::Channel(task, channel) => sized!(DAQmxGetChanAttribute(*task, channel.as_ptr(), id)),
            Self::Timing(task) => sized!(DAQmxGetTimingAttribute(*task, id)),
            Self::Trigger(task) => sized!(DAQmxGetTrigAttribute(*task, id)),
            Self::Read(task) => sized!(DAQmxGetReadAttribute(*task, id)),
            Self::Write(task) => sized!(DAQmxGetWriteAttribute(*task, id)),
            Self::Buffer(task) => sized!(DAQmxGetBufferAttribute(*task, id)),
            Self::Watchdog(task, lines) => {
                sized!(DAQmxGetWatchdogAttribute(*task, lines.as_ptr(), id))
            }
        }
    }

    /// `None` when the scope has no setter.
    unsafe fn set(&self, id: CInt32, value: SetValue) -> Option<CInt32> {
        macro_rules! with_value {
            ($f:ident($($arg:expr),*)) => {
                match value {
                    SetValue::U32(v) => $f($($arg),*, v),
                    SetValue::I32(v) => $f($($arg),*, v),
                    SetValue::U64(v) => $f($($arg),*, v),
                    SetValue::F64(v) => $f($($arg),*, v),
                    SetValue::Str(v) => $f($($arg),*, v),
                }
            };
        }
        Some(match self {
            Self::PhysicalChannel(name) => with_value!(DAQmxSetPhysicalChanAttribute(name.as_ptr(), id)),
            Self::Channel(task, channel) => {
                with_value!(DAQmxSetChanAttribute(*task, channel.as_ptr(), id))
            }
            Self::Timing(task) => with_value!(DAQmxSetTimingAttribute(*task, id)),
            Self::Trigger(task) => with_value!(DAQmxSetTrigAttribute(*task, id)),
            Self::Read(task) => with_value!(DAQmxSetReadAttribute(*task, id)),
            Self::Write(task) => with_value!(DAQmxSetWriteAttribute(*task, id)),
            Self::Buffer(task) => with_value!(DAQmxSetBufferAttribute(*task, id)),
            Self::Watchdog(task, lines) => {
                with_value!(DAQmxSetWatchdogAttribute(*task, lines.as_ptr(), id))
            }
            _ => return None,
        })
    }

    unsafe fn reset(&self, id: CInt32) -> Option<CInt32> {
        Some(match self {
            Self::PhysicalChannel(name) => DAQmxResetPhysicalChanAttribute(name.as_ptr(), id),
            Self::Channel(task, channel) => DAQmxResetChanAttribute(*task, channel.as_ptr(), id),
            Self::Timing(task) => DAQmxResetTimingAttribute(*task, id),
            Self::Trigger(task) => DAQmxResetTrigAttribute(*task, id),
            Self::Read(task) => DAQmxResetReadAttribute(*task, id),
            Self::Write(task) => DAQmxResetWriteAttribute(*task, id),
            Self::Buffer(task) => DAQmxResetBufferAttribute(*task, id),
            Self::Watchdog(task, lines) => DAQmxResetWatchdogAttribute(*task, lines.as_ptr(), id),
            _ => return None,
        })
    }
}

fn slot_data(slot: &Arc<EventSlot>) -> *mut c_void {
    Arc::as_ptr(slot).cast_mut().cast()
}

/// Run a user callback without letting a panic cross into the driver.
fn contain(event: &str, fire: impl FnOnce() -> CInt32) -> CInt32 {
    match panic::catch_unwind(AssertUnwindSafe(fire)) {
        Ok(status) => status,
        Err(_) => {
            error!("The {event} callback panicked; the panic was not propagated to the driver");
            0
        }
    }
}

unsafe extern "C" fn every_n_samples_trampoline(
    _task: RawTaskHandle,
    event_type: CInt32,
    num_samples: CUint32,
    callback_data: *mut c_void,
) -> CInt32 {
    if callback_data.is_null() {
        return 0;
    }
    let slot = EventSlot::retain_raw(callback_data.cast_const().cast());
    contain("every-N-samples", || {
        slot.fire_every_n_samples(event_type, num_samples)
    })
}

unsafe extern "C" fn done_trampoline(
    _task: RawTaskHandle,
    status: CInt32,
    callback_data: *mut c_void,
) -> CInt32 {
    if callback_data.is_null() {
        return 0;
    }
    let slot = EventSlot::retain_raw(callback_data.cast_const().cast());
    contain("done", || slot.fire_done(status))
}

unsafe extern "C" fn signal_trampoline(
    _task: RawTaskHandle,
    signal_id: CInt32,
    callback_data: *mut c_void,
) -> CInt32 {
    if callback_data.is_null() {
        return 0;
    }
    let slot = EventSlot::retain_raw(callback_data.cast_const().cast());
    contain("signal", || slot.fire_signal(signal_id))
}

/// Slots handed to the driver for one task.
#[derive(Debug, Default)]
struct TaskEvents {
    active: HashMap<EventKind, Arc<EventSlot>>,
    retired: Vec<Arc<EventSlot>>,
}

/// The in-process interpreter.
#[derive(Debug)]
pub struct NativeInterpreter {
    config: NativeConfig,
    status: StatusHandler,
    events: Mutex<HashMap<usize, TaskEvents>>,
}

impl Default for NativeInterpreter {
    fn default() -> Self {
        Self::new(NativeConfig::default())
    }
}

impl NativeInterpreter {
    pub fn new(config: NativeConfig) -> Self {
        let status = StatusHandler::new(config.error_log.clone().map(ErrorLog::new));
        Self {
            config,
            status,
            events: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &NativeConfig {
        &self.config
    }

    /// The driver's text for a status code.
    fn describe(&self, status: CInt32) -> String {
        let retries = self.config.max_buffer_retries;
        let fetched = if status < 0 && self.config.extended_error_info {
            read_two_pass(retries, |buffer: &mut [c_char]| unsafe {
                DAQmxGetExtendedErrorInfo(buf_ptr(buffer), buffer.len() as CUint32)
            })
        } else {
            read_two_pass(retries, |buffer: &mut [c_char]| unsafe {
                DAQmxGetErrorString(status, buf_ptr(buffer), buffer.len() as CUint32)
            })
        };
        match fetched {
            Ok(buffer) if !buffer.is_empty() => decode_c_string(&buffer),
            _ => format!("NI-DAQmx status code {status}"),
        }
    }

    fn check(&self, status: CInt32) -> Result<()> {
        self.status.check(status, |code| self.describe(code), None)
    }

    /// Run a read or write and report how many samples per channel moved, even
    /// when the call failed part way.
    fn transfer(
        &self,
        direction: TransferDirection,
        call: impl FnOnce(&mut CInt32) -> CInt32,
    ) -> Result<usize> {
        let mut transferred: CInt32 = 0;
        let status = call(&mut transferred);
        let transferred = usize::try_from(transferred).unwrap_or(0);
        self.status.check(
            status,
            |code| self.describe(code),
            Some((direction, transferred)),
        )?;
        Ok(transferred)
    }

    fn get_scalar<T: Copy + Default>(&self, target: &AttributeTarget, id: i32) -> Result<T> {
        let scope = Scope::resolve(target)?;
        let mut value = T::default();
        let status = unsafe { scope.get(id, (&mut value as *mut T).cast(), None) };
        self.check(status)?;
        Ok(value)
    }

    fn get_array<T: Copy + Default>(&self, target: &AttributeTarget, id: i32) -> Result<Vec<T>> {
        let scope = Scope::resolve(target)?;
        read_two_pass(self.config.max_buffer_retries, |buffer: &mut [T]| unsafe {
            scope.get(id, buf_ptr(buffer).cast(), Some(buffer.len() as CUint32))
        })
        .map_err(|status| self.status.error(status, self.describe(status), None))
    }

    fn set_value(&self, target: &AttributeTarget, id: i32, value: SetValue) -> Result<()> {
        let scope = Scope::resolve(target)?;
        trace!("set attribute {id:#x} of {target:?} to {value:?}");
        match unsafe { scope.set(id, value) } {
            Some(status) => self.check(status),
            None => Err(read_only(target)),
        }
    }

    fn register(&self, task: TaskHandle, kind: EventKind, slot: Option<Arc<EventSlot>>) {
        let mut events = self.events.lock();
        let registered = events.entry(task.0).or_default();
        if let Some(previous) = registered.active.remove(&kind) {
            registered.retired.push(previous);
        }
        if let Some(slot) = slot {
            registered.active.insert(kind, slot);
        }
    }

    /// Number of slots kept alive for `task`, active and retired.
    pub fn event_slot_count(&self, task: TaskHandle) -> usize {
        self.events
            .lock()
            .get(&task.0)
            .map_or(0, |events| events.active.len() + events.retired.len())
    }
}

impl Interpreter for NativeInterpreter {
    fn get_attribute_bool(&self, target: &AttributeTarget, id: i32) -> Result<bool> {
        Ok(self.get_scalar::<CBool32>(target, id)? != 0)
    }

    fn get_attribute_i32(&self, target: &AttributeTarget, id: i32) -> Result<i32> {
        self.get_scalar(target, id)
    }

    fn get_attribute_u32(&self, target: &AttributeTarget, id: i32) -> Result<u32> {
        self.get_scalar(target, id)
    }

    fn get_attribute_u64(&self, target: &AttributeTarget, id: i32) -> Result<u64> {
        self.get_scalar(target, id)
    }

    fn get_attribute_f64(&self, target: &AttributeTarget, id: i32) -> Result<f64> {
        self.get_scalar(target, id)
    }

    fn get_attribute_string(&self, target: &AttributeTarget, id: i32) -> Result<String> {
        Ok(decode_c_string(&self.get_array::<c_char>(target, id)?))
    }

    fn get_attribute_i32_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<i32>> {
        self.get_array(target, id)
    }

    fn get_attribute_u32_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<u32>> {
        self.get_array(target, id)
    }

    fn get_attribute_f64_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<f64>> {
        self.get_array(target, id)
    }

    fn get_attribute_u8_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<u8>> {
        self.get_array(target, id)
    }

    fn set_attribute_bool(&self, target: &AttributeTarget, id: i32, value: bool) -> Result<()> {
        self.set_value(target, id, SetValue::U32(bool32(value)))
    }

    fn set_attribute_i32(&self, target: &AttributeTarget, id: i32, value: i32) -> Result<()> {
        self.set_value(target, id, SetValue::I32(value))
    }

    fn set_attribute_u32(&self, target: &AttributeTarget, id: i32, value: u32) -> Result<()> {
        self.set_value(target, id, SetValue::U32(value))
    }

    fn set_attribute_u64(&self, target: &AttributeTarget, id: i32, value: u64) -> Result<()> {
        self.set_value(target, id, SetValue::U64(value))
    }

    fn set_attribute_f64(&self, target: &AttributeTarget, id: i32, value: f64) -> Result<()> {
        self.set_value(target, id, SetValue::F64(value))
    }

    fn set_attribute_string(&self, target: &AttributeTarget, id: i32, value: &str) -> Result<()> {
        let value = c_string(value)?;
        self.set_value(target, id, SetValue::Str(value.as_ptr()))
    }

    fn reset_attribute(&self, target: &AttributeTarget, id: i32) -> Result<()> {
        let scope = Scope::resolve(target)?;
        match unsafe { scope.reset(id) } {
            Some(status) => self.check(status),
            None => Err(read_only(target)),
        }
    }

    fn create_task(&self, name: &str) -> Result<TaskHandle> {
        let name = c_string(name)?;
        let mut task: RawTaskHandle = ptr::null_mut();
        self.check(unsafe { DAQmxCreateTask(name.as_ptr(), &mut task) })?;
        debug!("DAQmxCreateTask returned {}", handle(task));
        Ok(handle(task))
    }

    fn load_task(&self, name: &str) -> Result<TaskHandle> {
        let name = c_string(name)?;
        let mut task: RawTaskHandle = ptr::null_mut();
        self.check(unsafe { DAQmxLoadTask(name.as_ptr(), &mut task) })?;
        debug!("DAQmxLoadTask returned {}", handle(task));
        Ok(handle(task))
    }

    fn add_global_chans_to_task(&self, task: TaskHandle, channel_names: &str) -> Result<()> {
        let channel_names = c_string(channel_names)?;
        self.check(unsafe { DAQmxAddGlobalChansToTask(raw(task), channel_names.as_ptr()) })
    }

    fn clear_task(&self, task: TaskHandle) -> Result<()> {
        let status = unsafe { DAQmxClearTask(raw(task)) };
        // A cleared task never calls back again.
        if let Some(events) = self.events.lock().remove(&task.0) {
            trace!(
                "released {} event slots of task {task}",
                events.active.len() + events.retired.len()
            );
        }
        self.check(status)
    }

    fn start_task(&self, task: TaskHandle) -> Result<()> {
        self.check(unsafe { DAQmxStartTask(raw(task)) })
    }

    fn stop_task(&self, task: TaskHandle) -> Result<()> {
        self.check(unsafe { DAQmxStopTask(raw(task)) })
    }

    fn task_control(&self, task: TaskHandle, action: TaskMode) -> Result<()> {
        self.check(unsafe { DAQmxTaskControl(raw(task), action.to_raw()) })
    }

    fn is_task_done(&self, task: TaskHandle) -> Result<bool> {
        let mut done: CBool32 = 0;
        self.check(unsafe { DAQmxIsTaskDone(raw(task), &mut done) })?;
        Ok(done != 0)
    }

    fn wait_until_task_done(&self, task: TaskHandle, timeout: f64) -> Result<()> {
        self.check(unsafe { DAQmxWaitUntilTaskDone(raw(task), timeout) })
    }

    fn create_channel(
        &self,
        task: TaskHandle,
        physical_channel: &str,
        name_to_assign: &str,
        config: &ChannelConfig,
    ) -> Result<()> {
        let task = raw(task);
        let physical_channel = c_string(physical_channel)?;
        let name_to_assign = c_string(name_to_assign)?;
        let (phys, name) = (physical_channel.as_ptr(), name_to_assign.as_ptr());
        let status = match config {
            ChannelConfig::AiVoltage(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateAIVoltageChan(
                        task,
                        phys,
                        name,
                        p.terminal_config.to_raw(),
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::AiCurrent(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateAICurrentChan(
                        task,
                        phys,
                        name,
                        p.terminal_config.to_raw(),
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        p.shunt_resistor_loc.to_raw(),
                        p.ext_shunt_resistor_val,
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::AiThermocouple(p) => {
                let cjc_channel = c_string(&p.cjc_channel)?;
                unsafe {
                    DAQmxCreateAIThrmcplChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        p.thermocouple_type.to_raw(),
                        p.cjc_source.to_raw(),
                        p.cjc_val,
                        cjc_channel.as_ptr(),
                    )
                }
            }
            ChannelConfig::AiRtd(p) => unsafe {
                DAQmxCreateAIRTDChan(
                    task,
                    phys,
                    name,
                    p.min_val,
                    p.max_val,
                    p.units.to_raw(),
                    p.rtd_type.to_raw(),
                    p.resistance_config.to_raw(),
                    p.current_excit_source.to_raw(),
                    p.current_excit_val,
                    p.r_0,
                )
            },
            ChannelConfig::AiBridge(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateAIBridgeChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        p.bridge_config.to_raw(),
                        p.voltage_excit_source.to_raw(),
                        p.voltage_excit_val,
                        p.nominal_bridge_resistance,
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::AiStrainGage(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateAIStrainGageChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        p.strain_config.to_raw(),
                        p.voltage_excit_source.to_raw(),
                        p.voltage_excit_val,
                        p.gage_factor,
                        p.initial_bridge_voltage,
                        p.nominal_gage_resistance,
                        p.poisson_ratio,
                        p.lead_wire_resistance,
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::AiPower(p) => unsafe {
                DAQmxCreateAIPowerChan(
                    task,
                    phys,
                    name,
                    p.voltage_setpoint,
                    p.current_setpoint,
                    bool32(p.output_enable),
                )
            },
            ChannelConfig::AoVoltage(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateAOVoltageChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::AoCurrent(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateAOCurrentChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::DigitalInput { line_grouping } => unsafe {
                DAQmxCreateDIChan(task, phys, name, line_grouping.to_raw())
            },
            ChannelConfig::DigitalOutput { line_grouping } => unsafe {
                DAQmxCreateDOChan(task, phys, name, line_grouping.to_raw())
            },
            ChannelConfig::CiCountEdges(p) => unsafe {
                DAQmxCreateCICountEdgesChan(
                    task,
                    phys,
                    name,
                    p.edge.to_raw(),
                    p.initial_count,
                    p.count_direction.to_raw(),
                )
            },
            ChannelConfig::CiFreq(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateCIFreqChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        p.edge.to_raw(),
                        p.meas_method.to_raw(),
                        p.meas_time,
                        p.divisor,
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::CiPeriod(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateCIPeriodChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        p.edge.to_raw(),
                        p.meas_method.to_raw(),
                        p.meas_time,
                        p.divisor,
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::CiPulseWidth(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateCIPulseWidthChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        p.starting_edge.to_raw(),
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::CiSemiPeriod(p) => {
                let scale = c_string(&p.custom_scale_name)?;
                unsafe {
                    DAQmxCreateCISemiPeriodChan(
                        task,
                        phys,
                        name,
                        p.min_val,
                        p.max_val,
                        p.units.to_raw(),
                        scale.as_ptr(),
                    )
                }
            }
            ChannelConfig::CoPulseFreq(p) => unsafe {
                DAQmxCreateCOPulseChanFreq(
                    task,
                    phys,
                    name,
                    p.units.to_raw(),
                    p.idle_state.to_raw(),
                    p.initial_delay,
                    p.freq,
                    p.duty_cycle,
                )
            },
            ChannelConfig::CoPulseTime(p) => unsafe {
                DAQmxCreateCOPulseChanTime(
                    task,
                    phys,
                    name,
                    p.units.to_raw(),
                    p.idle_state.to_raw(),
                    p.initial_delay,
                    p.low_time,
                    p.high_time,
                )
            },
            ChannelConfig::CoPulseTicks(p) => {
                let source = c_string(&p.source_terminal)?;
                unsafe {
                    DAQmxCreateCOPulseChanTicks(
                        task,
                        phys,
                        name,
                        source.as_ptr(),
                        p.idle_state.to_raw(),
                        p.initial_delay,
                        p.low_ticks,
                        p.high_ticks,
                    )
                }
            }
        };
        self.check(status)
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
        let source = c_string(source)?;
        self.check(unsafe {
            DAQmxCfgSampClkTiming(
                raw(task),
                source.as_ptr(),
                rate,
                active_edge.to_raw(),
                sample_mode.to_raw(),
                samps_per_chan,
            )
        })
    }

    fn cfg_implicit_timing(
        &self,
        task: TaskHandle,
        sample_mode: AcquisitionType,
        samps_per_chan: u64,
    ) -> Result<()> {
        self.check(unsafe {
            DAQmxCfgImplicitTiming(raw(task), sample_mode.to_raw(), samps_per_chan)
        })
    }

    fn cfg_dig_edge_start_trig(&self, task: TaskHandle, source: &str, edge: Edge) -> Result<()> {
        let source = c_string(source)?;
        self.check(unsafe { DAQmxCfgDigEdgeStartTrig(raw(task), source.as_ptr(), edge.to_raw()) })
    }

    fn cfg_anlg_edge_start_trig(
        &self,
        task: TaskHandle,
        source: &str,
        slope: Slope,
        level: f64,
    ) -> Result<()> {
        let source = c_string(source)?;
        self.check(unsafe {
            DAQmxCfgAnlgEdgeStartTrig(raw(task), source.as_ptr(), slope.to_raw(), level)
        })
    }

    fn cfg_dig_edge_ref_trig(
        &self,
        task: TaskHandle,
        source: &str,
        edge: Edge,
        pretrigger_samples: u32,
    ) -> Result<()> {
        let source = c_string(source)?;
        self.check(unsafe {
            DAQmxCfgDigEdgeRefTrig(raw(task), source.as_ptr(), edge.to_raw(), pretrigger_samples)
        })
    }

    fn cfg_anlg_edge_ref_trig(
        &self,
        task: TaskHandle,
        source: &str,
        slope: Slope,
        level: f64,
        pretrigger_samples: u32,
    ) -> Result<()> {
        let source = c_string(source)?;
        self.check(unsafe {
            DAQmxCfgAnlgEdgeRefTrig(
                raw(task),
                source.as_ptr(),
                slope.to_raw(),
                level,
                pretrigger_samples,
            )
        })
    }

    fn disable_start_trig(&self, task: TaskHandle) -> Result<()> {
        self.check(unsafe { DAQmxDisableStartTrig(raw(task)) })
    }

    fn disable_ref_trig(&self, task: TaskHandle) -> Result<()> {
        self.check(unsafe { DAQmxDisableRefTrig(raw(task)) })
    }

    fn send_software_trigger(&self, task: TaskHandle, trigger: SoftwareTrigger) -> Result<()> {
        self.check(unsafe { DAQmxSendSoftwareTrigger(raw(task), trigger.to_raw()) })
    }

    fn export_signal(
        &self,
        task: TaskHandle,
        signal: Signal,
        output_terminal: &str,
    ) -> Result<()> {
        let output_terminal = c_string(output_terminal)?;
        self.check(unsafe {
            DAQmxExportSignal(raw(task), signal.to_raw(), output_terminal.as_ptr())
        })
    }

    fn cfg_input_buffer(&self, task: TaskHandle, samps_per_chan: u32) -> Result<()> {
        self.check(unsafe { DAQmxCfgInputBuffer(raw(task), samps_per_chan) })
    }

    fn cfg_output_buffer(&self, task: TaskHandle, samps_per_chan: u32) -> Result<()> {
        self.check(unsafe { DAQmxCfgOutputBuffer(raw(task), samps_per_chan) })
    }

    fn read_analog_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [f64],
    ) -> Result<usize> {
        let size = array_size(read_array.len())?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadAnalogF64(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                read_array.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_analog_scalar_f64(&self, task: TaskHandle, timeout: f64) -> Result<f64> {
        let mut value = 0.0;
        self.check(unsafe {
            DAQmxReadAnalogScalarF64(raw(task), timeout, &mut value, ptr::null_mut())
        })?;
        Ok(value)
    }

    fn read_digital_lines(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u8],
    ) -> Result<(usize, usize)> {
        let size = array_size(read_array.len())?;
        let mut bytes_per_samp: CInt32 = 0;
        let read = self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadDigitalLines(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                read_array.as_mut_ptr(),
                size,
                read,
                &mut bytes_per_samp,
                ptr::null_mut(),
            )
        })?;
        Ok((read, usize::try_from(bytes_per_samp).unwrap_or(0)))
    }

    fn read_digital_u8(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u8],
    ) -> Result<usize> {
        let size = array_size(read_array.len())?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadDigitalU8(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                read_array.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_digital_u16(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u16],
    ) -> Result<usize> {
        let size = array_size(read_array.len())?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadDigitalU16(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                read_array.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_digital_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u32],
    ) -> Result<usize> {
        let size = array_size(read_array.len())?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadDigitalU32(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                read_array.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_digital_scalar_u32(&self, task: TaskHandle, timeout: f64) -> Result<u32> {
        let mut value = 0;
        self.check(unsafe {
            DAQmxReadDigitalScalarU32(raw(task), timeout, &mut value, ptr::null_mut())
        })?;
        Ok(value)
    }

    fn read_counter_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [f64],
    ) -> Result<usize> {
        let size = array_size(read_array.len())?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadCounterF64Ex(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                read_array.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_counter_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u32],
    ) -> Result<usize> {
        let size = array_size(read_array.len())?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadCounterU32Ex(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                read_array.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_counter_scalar_f64(&self, task: TaskHandle, timeout: f64) -> Result<f64> {
        let mut value = 0.0;
        self.check(unsafe {
            DAQmxReadCounterScalarF64(raw(task), timeout, &mut value, ptr::null_mut())
        })?;
        Ok(value)
    }

    fn read_counter_scalar_u32(&self, task: TaskHandle, timeout: f64) -> Result<u32> {
        let mut value = 0;
        self.check(unsafe {
            DAQmxReadCounterScalarU32(raw(task), timeout, &mut value, ptr::null_mut())
        })?;
        Ok(value)
    }

    fn read_ctr_freq(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        frequencies: &mut [f64],
        duty_cycles: &mut [f64],
    ) -> Result<usize> {
        let size = array_size(frequencies.len().min(duty_cycles.len()))?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadCtrFreq(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_NONINTERLEAVED,
                frequencies.as_mut_ptr(),
                duty_cycles.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_ctr_time(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        high_times: &mut [f64],
        low_times: &mut [f64],
    ) -> Result<usize> {
        let size = array_size(high_times.len().min(low_times.len()))?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadCtrTime(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_NONINTERLEAVED,
                high_times.as_mut_ptr(),
                low_times.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_ctr_ticks(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        high_ticks: &mut [u32],
        low_ticks: &mut [u32],
    ) -> Result<usize> {
        let size = array_size(high_ticks.len().min(low_ticks.len()))?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadCtrTicks(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_NONINTERLEAVED,
                high_ticks.as_mut_ptr(),
                low_ticks.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_ctr_freq_scalar(&self, task: TaskHandle, timeout: f64) -> Result<CtrFreq> {
        let mut sample = CtrFreq::default();
        self.check(unsafe {
            DAQmxReadCtrFreqScalar(
                raw(task),
                timeout,
                &mut sample.freq,
                &mut sample.duty_cycle,
                ptr::null_mut(),
            )
        })?;
        Ok(sample)
    }

    fn read_ctr_time_scalar(&self, task: TaskHandle, timeout: f64) -> Result<CtrTime> {
        let mut sample = CtrTime::default();
        self.check(unsafe {
            DAQmxReadCtrTimeScalar(
                raw(task),
                timeout,
                &mut sample.high_time,
                &mut sample.low_time,
                ptr::null_mut(),
            )
        })?;
        Ok(sample)
    }

    fn read_ctr_ticks_scalar(&self, task: TaskHandle, timeout: f64) -> Result<CtrTick> {
        let mut sample = CtrTick::default();
        self.check(unsafe {
            DAQmxReadCtrTicksScalar(
                raw(task),
                timeout,
                &mut sample.high_tick,
                &mut sample.low_tick,
                ptr::null_mut(),
            )
        })?;
        Ok(sample)
    }

    fn read_power_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        voltages: &mut [f64],
        currents: &mut [f64],
    ) -> Result<usize> {
        let size = array_size(voltages.len().min(currents.len()))?;
        self.transfer(TransferDirection::Read, |read| unsafe {
            DAQmxReadPowerF64(
                raw(task),
                num_samps_per_chan,
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL as CInt32,
                voltages.as_mut_ptr(),
                currents.as_mut_ptr(),
                size,
                read,
                ptr::null_mut(),
            )
        })
    }

    fn read_power_scalar_f64(&self, task: TaskHandle, timeout: f64) -> Result<PowerMeasurement> {
        let mut sample = PowerMeasurement::default();
        self.check(unsafe {
            DAQmxReadPowerScalarF64(
                raw(task),
                timeout,
                &mut sample.voltage,
                &mut sample.current,
                ptr::null_mut(),
            )
        })?;
        Ok(sample)
    }

    fn write_analog_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[f64],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteAnalogF64(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                write_array.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_analog_scalar_f64(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: f64,
    ) -> Result<()> {
        self.check(unsafe {
            DAQmxWriteAnalogScalarF64(
                raw(task),
                bool32(auto_start),
                timeout,
                value,
                ptr::null_mut(),
            )
        })
    }

    fn write_digital_lines(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u8],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteDigitalLines(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                write_array.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_digital_u8(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u8],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteDigitalU8(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                write_array.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_digital_u16(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u16],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteDigitalU16(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                write_array.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_digital_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u32],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteDigitalU32(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                write_array.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_digital_scalar_u32(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: u32,
    ) -> Result<()> {
        self.check(unsafe {
            DAQmxWriteDigitalScalarU32(
                raw(task),
                bool32(auto_start),
                timeout,
                value,
                ptr::null_mut(),
            )
        })
    }

    fn write_ctr_freq(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        frequencies: &[f64],
        duty_cycles: &[f64],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteCtrFreq(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                frequencies.as_ptr(),
                duty_cycles.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_ctr_time(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        high_times: &[f64],
        low_times: &[f64],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteCtrTime(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                high_times.as_ptr(),
                low_times.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_ctr_ticks(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        high_ticks: &[u32],
        low_ticks: &[u32],
    ) -> Result<usize> {
        let n = samps_per_chan(num_samps_per_chan)?;
        self.transfer(TransferDirection::Write, |written| unsafe {
            DAQmxWriteCtrTicks(
                raw(task),
                n,
                bool32(auto_start),
                timeout,
                DAQMX_VAL_GROUPBYCHANNEL,
                high_ticks.as_ptr(),
                low_ticks.as_ptr(),
                written,
                ptr::null_mut(),
            )
        })
    }

    fn write_ctr_freq_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: CtrFreq,
    ) -> Result<()> {
        self.check(unsafe {
            DAQmxWriteCtrFreqScalar(
                raw(task),
                bool32(auto_start),
                timeout,
                value.freq,
                value.duty_cycle,
                ptr::null_mut(),
            )
        })
    }

    fn write_ctr_time_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: CtrTime,
    ) -> Result<()> {
        self.check(unsafe {
            DAQmxWriteCtrTimeScalar(
                raw(task),
                bool32(auto_start),
                timeout,
                value.high_time,
                value.low_time,
                ptr::null_mut(),
            )
        })
    }

    fn write_ctr_ticks_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: CtrTick,
    ) -> Result<()> {
        self.check(unsafe {
            DAQmxWriteCtrTicksScalar(
                raw(task),
                bool32(auto_start),
                timeout,
                value.high_tick,
                value.low_tick,
                ptr::null_mut(),
            )
        })
    }

    fn register_every_n_samples_event(
        &self,
        task: TaskHandle,
        event_type: EveryNSamplesEventType,
        num_samples: u32,
        slot: Option<Arc<EventSlot>>,
    ) -> Result<()> {
        let callback: EveryNSamplesEventCallback = match slot {
            Some(_) => Some(every_n_samples_trampoline),
            None => None,
        };
        let data = slot.as_ref().map_or(ptr::null_mut(), slot_data);
        self.check(unsafe {
            DAQmxRegisterEveryNSamplesEvent(
                raw(task),
                event_type.to_raw(),
                num_samples,
                DAQMX_VAL_ASYNC_CALLBACKS,
                callback,
                data,
            )
        })?;
        trace!("every-N-samples ({event_type:?}, {num_samples}) callback of task {task} updated");
        self.register(task, EventKind::from(event_type), slot);
        Ok(())
    }

    fn register_done_event(&self, task: TaskHandle, slot: Option<Arc<EventSlot>>) -> Result<()> {
        let callback: DoneEventCallback = match slot {
            Some(_) => Some(done_trampoline),
            None => None,
        };
        let data = slot.as_ref().map_or(ptr::null_mut(), slot_data);
        self.check(unsafe {
            DAQmxRegisterDoneEvent(raw(task), DAQMX_VAL_ASYNC_CALLBACKS, callback, data)
        })?;
        trace!("done callback of task {task} updated");
        self.register(task, EventKind::Done, slot);
        Ok(())
    }

    fn register_signal_event(
        &self,
        task: TaskHandle,
        signal: Signal,
        slot: Option<Arc<EventSlot>>,
    ) -> Result<()> {
        let callback: SignalEventCallback = match slot {
            Some(_) => Some(signal_trampoline),
            None => None,
        };
        let data = slot.as_ref().map_or(ptr::null_mut(), slot_data);
        self.check(unsafe {
            DAQmxRegisterSignalEvent(
                raw(task),
                signal.to_raw(),
                DAQMX_VAL_ASYNC_CALLBACKS,
                callback,
                data,
            )
        })?;
        trace!("{signal:?} callback of task {task} updated");
        self.register(task, EventKind::Signal, slot);
        Ok(())
    }

    fn reset_device(&self, device: &str) -> Result<()> {
        let device = c_string(device)?;
        self.check(unsafe { DAQmxResetDevice(device.as_ptr()) })
    }

    fn self_test_device(&self, device: &str) -> Result<()> {
        let device = c_string(device)?;
        self.check(unsafe { DAQmxSelfTestDevice(device.as_ptr()) })
    }

    fn add_network_device(
        &self,
        ip_address: &str,
        device_name: &str,
        attempt_reservation: bool,
        timeout: f64,
    ) -> Result<String> {
        let ip_address = c_string(ip_address)?;
        let device_name = c_string(device_name)?;
        let mut name_out = [0 as c_char; DEVICE_NAME_BUFFER_SIZE];
        self.check(unsafe {
            DAQmxAddNetworkDevice(
                ip_address.as_ptr(),
                device_name.as_ptr(),
                bool32(attempt_reservation),
                timeout,
                name_out.as_mut_ptr(),
                DEVICE_NAME_BUFFER_SIZE as CUint32,
            )
        })?;
        Ok(decode_c_string(&name_out))
    }

    fn delete_network_device(&self, device: &str) -> Result<()> {
        let device = c_string(device)?;
        self.check(unsafe { DAQmxDeleteNetworkDevice(device.as_ptr()) })
    }

    fn reserve_network_device(&self, device: &str, override_reservation: bool) -> Result<()> {
        let device = c_string(device)?;
        self.check(unsafe {
            DAQmxReserveNetworkDevice(device.as_ptr(), bool32(override_reservation))
        })
    }

    fn unreserve_network_device(&self, device: &str) -> Result<()> {
        let device = c_string(device)?;
        self.check(unsafe { DAQmxUnreserveNetworkDevice(device.as_ptr()) })
    }

    fn connect_terms(
        &self,
        source_terminal: &str,
        destination_terminal: &str,
        polarity: Polarity,
    ) -> Result<()> {
        let source = c_string(source_terminal)?;
        let destination = c_string(destination_terminal)?;
        self.check(unsafe {
            DAQmxConnectTerms(source.as_ptr(), destination.as_ptr(), polarity.to_raw())
        })
    }

    fn disconnect_terms(&self, source_terminal: &str, destination_terminal: &str) -> Result<()> {
        let source = c_string(source_terminal)?;
        let destination = c_string(destination_terminal)?;
        self.check(unsafe { DAQmxDisconnectTerms(source.as_ptr(), destination.as_ptr()) })
    }

    fn tristate_output_term(&self, output_terminal: &str) -> Result<()> {
        let output_terminal = c_string(output_terminal)?;
        self.check(unsafe { DAQmxTristateOutputTerm(output_terminal.as_ptr()) })
    }

    fn delete_saved_global_chan(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        self.check(unsafe { DAQmxDeleteSavedGlobalChan(name.as_ptr()) })
    }

    fn delete_saved_scale(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        self.check(unsafe { DAQmxDeleteSavedScale(name.as_ptr()) })
    }

    fn delete_saved_task(&self, name: &str) -> Result<()> {
        let name = c_string(name)?;
        self.check(unsafe { DAQmxDeleteSavedTask(name.as_ptr()) })
    }

    fn create_watchdog_timer_task(
        &self,
        device: &str,
        name: &str,
        timeout: f64,
    ) -> Result<TaskHandle> {
        let device = c_string(device)?;
        let name = c_string(name)?;
        let mut task: RawTaskHandle = ptr::null_mut();
        self.check(unsafe {
            DAQmxCreateWatchdogTimerTaskEx(device.as_ptr(), name.as_ptr(), &mut task, timeout)
        })?;
        debug!("DAQmxCreateWatchdogTimerTaskEx returned {}", handle(task));
        Ok(handle(task))
    }

    fn cfg_watchdog_ao_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[f64],
        output_types: &[WatchdogAoExpirState],
    ) -> Result<()> {
        if expir_states.len() != output_types.len() {
            return Err(DaqError::invalid_argument(format!(
                "{} expiration states were given with {} output types",
                expir_states.len(),
                output_types.len()
            )));
        }
        let channel_names = c_string(channel_names)?;
        let output_types: Vec<CInt32> = output_types.iter().map(|t| t.to_raw()).collect();
        let size = array_size(expir_states.len())?;
        self.check(unsafe {
            DAQmxCfgWatchdogAOExpirStates(
                raw(task),
                channel_names.as_ptr(),
                expir_states.as_ptr(),
                output_types.as_ptr(),
                size,
            )
        })
    }

    fn cfg_watchdog_co_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[WatchdogCoExpirState],
    ) -> Result<()> {
        let channel_names = c_string(channel_names)?;
        let states: Vec<CInt32> = expir_states.iter().map(|s| s.to_raw()).collect();
        let size = array_size(states.len())?;
        self.check(unsafe {
            DAQmxCfgWatchdogCOExpirStates(raw(task), channel_names.as_ptr(), states.as_ptr(), size)
        })
    }

    fn cfg_watchdog_do_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[DigitalLineState],
    ) -> Result<()> {
        let channel_names = c_string(channel_names)?;
        let states: Vec<CInt32> = expir_states.iter().map(|s| s.to_raw()).collect();
        let size = array_size(states.len())?;
        self.check(unsafe {
            DAQmxCfgWatchdogDOExpirStates(raw(task), channel_names.as_ptr(), states.as_ptr(), size)
        })
    }

    fn control_watchdog_task(
        &self,
        task: TaskHandle,
        action: WatchdogControlAction,
    ) -> Result<()> {
        self.check(unsafe { DAQmxControlWatchdogTask(raw(task), action.to_raw()) })
    }
}
