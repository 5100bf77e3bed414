//! The interpreter: the single boundary between the object model and the driver.
//!
//! Everything in this crate reduces to calls on an [`Interpreter`]. The
//! in-process implementation over the `NIDAQmx` C library lives in the
//! `nidaqmx_ffi_backend` crate; any other transport only has to implement this
//! trait.
//!
//! ## Contract
//!
//! - Attribute accessors are typed by value width. Strings come back decoded and
//!   trimmed to the length the driver reports; arrays come back with exactly the
//!   element count the driver reports. Sizing retries are internal.
//! - Bulk reads and writes always use the group-by-channel layout: a buffer for
//!   `c` channels and `n` samples per channel holds channel 0's `n` samples,
//!   then channel 1's, and so on.
//! - A read that times out after transferring some samples fails with
//!   [`DaqError::PartialTransfer`](crate::error::DaqError::PartialTransfer); the
//!   transferred prefix of the caller's buffer is valid and the rest is untouched.
//! - Every non-zero negative status becomes a [`DaqError`](crate::error::DaqError)
//!   through [`DaqError::from_status`](crate::error::DaqError::from_status).
//!   Positive statuses are warnings and are only logged.

use crate::attributes::AttributeTarget;
use crate::channel_config::ChannelConfig;
use crate::constants::*;
use crate::error::Result;
use crate::events::EventSlot;
use std::fmt;
use std::sync::Arc;

/// Opaque driver task handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub usize);

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One frequency-and-duty-cycle counter sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CtrFreq {
    pub freq: f64,
    pub duty_cycle: f64,
}

/// One high-time/low-time counter sample, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CtrTime {
    pub high_time: f64,
    pub low_time: f64,
}

/// One high-ticks/low-ticks counter sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrTick {
    pub high_tick: u32,
    pub low_tick: u32,
}

/// One voltage-and-current sample of a power channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PowerMeasurement {
    pub voltage: f64,
    pub current: f64,
}

/// Typed façade over the driver.
///
/// Implementations must be usable from several threads at once. The driver does
/// its own locking; implementations add none around verb calls.
pub trait Interpreter: Send + Sync + fmt::Debug {
    // Attributes

    fn get_attribute_bool(&self, target: &AttributeTarget, id: i32) -> Result<bool>;
    fn get_attribute_i32(&self, target: &AttributeTarget, id: i32) -> Result<i32>;
    fn get_attribute_u32(&self, target: &AttributeTarget, id: i32) -> Result<u32>;
    fn get_attribute_u64(&self, target: &AttributeTarget, id: i32) -> Result<u64>;
    fn get_attribute_f64(&self, target: &AttributeTarget, id: i32) -> Result<f64>;
    fn get_attribute_string(&self, target: &AttributeTarget, id: i32) -> Result<String>;
    fn get_attribute_i32_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<i32>>;
    fn get_attribute_u32_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<u32>>;
    fn get_attribute_f64_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<f64>>;
    fn get_attribute_u8_array(&self, target: &AttributeTarget, id: i32) -> Result<Vec<u8>>;

    fn set_attribute_bool(&self, target: &AttributeTarget, id: i32, value: bool) -> Result<()>;
    fn set_attribute_i32(&self, target: &AttributeTarget, id: i32, value: i32) -> Result<()>;
    fn set_attribute_u32(&self, target: &AttributeTarget, id: i32, value: u32) -> Result<()>;
    fn set_attribute_u64(&self, target: &AttributeTarget, id: i32, value: u64) -> Result<()>;
    fn set_attribute_f64(&self, target: &AttributeTarget, id: i32, value: f64) -> Result<()>;
    fn set_attribute_string(&self, target: &AttributeTarget, id: i32, value: &str) -> Result<()>;

    /// Restore the driver default of an attribute.
    fn reset_attribute(&self, target: &AttributeTarget, id: i32) -> Result<()>;

    // Task lifecycle

    fn create_task(&self, name: &str) -> Result<TaskHandle>;
    /// Load a task saved in the driver's configuration store.
    fn load_task(&self, name: &str) -> Result<TaskHandle>;
    fn add_global_chans_to_task(&self, task: TaskHandle, channel_names: &str) -> Result<()>;
    fn clear_task(&self, task: TaskHandle) -> Result<()>;
    fn start_task(&self, task: TaskHandle) -> Result<()>;
    fn stop_task(&self, task: TaskHandle) -> Result<()>;
    fn task_control(&self, task: TaskHandle, action: TaskMode) -> Result<()>;
    fn is_task_done(&self, task: TaskHandle) -> Result<bool>;
    fn wait_until_task_done(&self, task: TaskHandle, timeout: f64) -> Result<()>;

    /// Create one or more virtual channels on `physical_channel`.
    fn create_channel(
        &self,
        task: TaskHandle,
        physical_channel: &str,
        name_to_assign: &str,
        config: &ChannelConfig,
    ) -> Result<()>;

    // Timing, triggering and routing

    fn cfg_samp_clk_timing(
        &self,
        task: TaskHandle,
        source: &str,
        rate: f64,
        active_edge: Edge,
        sample_mode: AcquisitionType,
        samps_per_chan: u64,
    ) -> Result<()>;
    fn cfg_implicit_timing(
        &self,
        task: TaskHandle,
        sample_mode: AcquisitionType,
        samps_per_chan: u64,
    ) -> Result<()>;
    fn cfg_dig_edge_start_trig(&self, task: TaskHandle, source: &str, edge: Edge) -> Result<()>;
    fn cfg_anlg_edge_start_trig(
        &self,
        task: TaskHandle,
        source: &str,
        slope: Slope,
        level: f64,
    ) -> Result<()>;
    fn cfg_dig_edge_ref_trig(
        &self,
        task: TaskHandle,
        source: &str,
        edge: Edge,
        pretrigger_samples: u32,
    ) -> Result<()>;
    fn cfg_anlg_edge_ref_trig(
        &self,
        task: TaskHandle,
        source: &str,
        slope: Slope,
        level: f64,
        pretrigger_samples: u32,
    ) -> Result<()>;
    fn disable_start_trig(&self, task: TaskHandle) -> Result<()>;
    fn disable_ref_trig(&self, task: TaskHandle) -> Result<()>;
    fn send_software_trigger(&self, task: TaskHandle, trigger: SoftwareTrigger) -> Result<()>;
    fn export_signal(&self, task: TaskHandle, signal: Signal, output_terminal: &str)
        -> Result<()>;
    fn cfg_input_buffer(&self, task: TaskHandle, samps_per_chan: u32) -> Result<()>;
    fn cfg_output_buffer(&self, task: TaskHandle, samps_per_chan: u32) -> Result<()>;

    // Reads. `num_samps_per_chan` of -1 reads all available samples. Each
    // returns the number of samples per channel read.

    fn read_analog_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [f64],
    ) -> Result<usize>;
    fn read_analog_scalar_f64(&self, task: TaskHandle, timeout: f64) -> Result<f64>;
    /// Returns samples per channel read and bytes per sample.
    fn read_digital_lines(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u8],
    ) -> Result<(usize, usize)>;
    fn read_digital_u8(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u8],
    ) -> Result<usize>;
    fn read_digital_u16(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u16],
    ) -> Result<usize>;
    fn read_digital_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u32],
    ) -> Result<usize>;
    fn read_digital_scalar_u32(&self, task: TaskHandle, timeout: f64) -> Result<u32>;
    fn read_counter_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [f64],
    ) -> Result<usize>;
    fn read_counter_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        read_array: &mut [u32],
    ) -> Result<usize>;
    fn read_counter_scalar_f64(&self, task: TaskHandle, timeout: f64) -> Result<f64>;
    fn read_counter_scalar_u32(&self, task: TaskHandle, timeout: f64) -> Result<u32>;
    fn read_ctr_freq(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        frequencies: &mut [f64],
        duty_cycles: &mut [f64],
    ) -> Result<usize>;
    fn read_ctr_time(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        high_times: &mut [f64],
        low_times: &mut [f64],
    ) -> Result<usize>;
    fn read_ctr_ticks(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        high_ticks: &mut [u32],
        low_ticks: &mut [u32],
    ) -> Result<usize>;
    fn read_ctr_freq_scalar(&self, task: TaskHandle, timeout: f64) -> Result<CtrFreq>;
    fn read_ctr_time_scalar(&self, task: TaskHandle, timeout: f64) -> Result<CtrTime>;
    fn read_ctr_ticks_scalar(&self, task: TaskHandle, timeout: f64) -> Result<CtrTick>;
    fn read_power_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: i32,
        timeout: f64,
        voltages: &mut [f64],
        currents: &mut [f64],
    ) -> Result<usize>;
    fn read_power_scalar_f64(&self, task: TaskHandle, timeout: f64) -> Result<PowerMeasurement>;

    // Writes. Each returns the number of samples per channel written.

    fn write_analog_f64(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[f64],
    ) -> Result<usize>;
    fn write_analog_scalar_f64(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: f64,
    ) -> Result<()>;
    fn write_digital_lines(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u8],
    ) -> Result<usize>;
    fn write_digital_u8(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u8],
    ) -> Result<usize>;
    fn write_digital_u16(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u16],
    ) -> Result<usize>;
    fn write_digital_u32(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        write_array: &[u32],
    ) -> Result<usize>;
    fn write_digital_scalar_u32(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: u32,
    ) -> Result<()>;
    fn write_ctr_freq(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        frequencies: &[f64],
        duty_cycles: &[f64],
    ) -> Result<usize>;
    fn write_ctr_time(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        high_times: &[f64],
        low_times: &[f64],
    ) -> Result<usize>;
    fn write_ctr_ticks(
        &self,
        task: TaskHandle,
        num_samps_per_chan: usize,
        auto_start: bool,
        timeout: f64,
        high_ticks: &[u32],
        low_ticks: &[u32],
    ) -> Result<usize>;
    fn write_ctr_freq_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: CtrFreq,
    ) -> Result<()>;
    fn write_ctr_time_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: CtrTime,
    ) -> Result<()>;
    fn write_ctr_ticks_scalar(
        &self,
        task: TaskHandle,
        auto_start: bool,
        timeout: f64,
        value: CtrTick,
    ) -> Result<()>;

    // Events. `None` unregisters. The interpreter must not drop the slot while
    // the driver may still call it; the task keeps its own reference as well.

    fn register_every_n_samples_event(
        &self,
        task: TaskHandle,
        event_type: EveryNSamplesEventType,
        num_samples: u32,
        slot: Option<Arc<EventSlot>>,
    ) -> Result<()>;
    fn register_done_event(&self, task: TaskHandle, slot: Option<Arc<EventSlot>>) -> Result<()>;
    fn register_signal_event(
        &self,
        task: TaskHandle,
        signal: Signal,
        slot: Option<Arc<EventSlot>>,
    ) -> Result<()>;

    // Devices, routing and the configuration store

    fn reset_device(&self, device: &str) -> Result<()>;
    fn self_test_device(&self, device: &str) -> Result<()>;
    /// Returns the name the driver gave the new device.
    fn add_network_device(
        &self,
        ip_address: &str,
        device_name: &str,
        attempt_reservation: bool,
        timeout: f64,
    ) -> Result<String>;
    fn delete_network_device(&self, device: &str) -> Result<()>;
    fn reserve_network_device(&self, device: &str, override_reservation: bool) -> Result<()>;
    fn unreserve_network_device(&self, device: &str) -> Result<()>;
    fn connect_terms(
        &self,
        source_terminal: &str,
        destination_terminal: &str,
        polarity: Polarity,
    ) -> Result<()>;
    fn disconnect_terms(&self, source_terminal: &str, destination_terminal: &str) -> Result<()>;
    fn tristate_output_term(&self, output_terminal: &str) -> Result<()>;
    fn delete_saved_global_chan(&self, name: &str) -> Result<()>;
    fn delete_saved_scale(&self, name: &str) -> Result<()>;
    fn delete_saved_task(&self, name: &str) -> Result<()>;

    // Watchdog

    fn create_watchdog_timer_task(
        &self,
        device: &str,
        name: &str,
        timeout: f64,
    ) -> Result<TaskHandle>;
    fn cfg_watchdog_ao_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[f64],
        output_types: &[WatchdogAoExpirState],
    ) -> Result<()>;
    fn cfg_watchdog_co_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[WatchdogCoExpirState],
    ) -> Result<()>;
    fn cfg_watchdog_do_expir_states(
        &self,
        task: TaskHandle,
        channel_names: &str,
        expir_states: &[DigitalLineState],
    ) -> Result<()>;
    fn control_watchdog_task(&self, task: TaskHandle, action: WatchdogControlAction)
        -> Result<()>;
}
