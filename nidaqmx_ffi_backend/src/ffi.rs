//! Raw declarations of the NI-DAQmx C functions the native interpreter calls.
//!
//! Signatures follow `NIDAQmx.h`. Every function returns an `int32` status:
//! 0 is success, negative values are errors and positive values are warnings.
//! The attribute accessors are variadic: getters take an extra `uInt32` buffer
//! size for strings and arrays, setters take the value itself.
//!
//! See the [NI-DAQmx C Reference](https://www.ni.com/docs/en-US/bundle/ni-daqmx-c-api-ref/page/cdaqmx/help_file_title.html).

use libc::c_void;

pub type CConstStr = *const libc::c_char;
pub type CCharBuf = *mut libc::c_char;
pub type CFloat64 = libc::c_double;
pub type CUint32 = libc::c_uint;
pub type CUint64 = libc::c_ulonglong;
pub type CBool32 = libc::c_uint;
pub type CInt32 = libc::c_int;
pub type RawTaskHandle = *mut c_void;

pub const DAQMX_VAL_GROUPBYCHANNEL: CBool32 = 0;
/// Counter pair reads: separate arrays rather than interleaved pairs.
pub const DAQMX_VAL_NONINTERLEAVED: CBool32 = 0;
/// Event callbacks run on a driver thread.
pub const DAQMX_VAL_ASYNC_CALLBACKS: CUint32 = 0;
pub const DEVICE_NAME_BUFFER_SIZE: usize = 256;

pub type EveryNSamplesEventCallback = Option<
    unsafe extern "C" fn(
        task: RawTaskHandle,
        event_type: CInt32,
        num_samples: CUint32,
        callback_data: *mut c_void,
    ) -> CInt32,
>;
pub type DoneEventCallback = Option<
    unsafe extern "C" fn(task: RawTaskHandle, status: CInt32, callback_data: *mut c_void) -> CInt32,
>;
pub type SignalEventCallback = Option<
    unsafe extern "C" fn(
        task: RawTaskHandle,
        signal_id: CInt32,
        callback_data: *mut c_void,
    ) -> CInt32,
>;

#[link(name = "NIDAQmx")]
extern "C" {
    // Errors

    pub fn DAQmxGetExtendedErrorInfo(error_string: CCharBuf, buffer_size: CUint32) -> CInt32;
    pub fn DAQmxGetErrorString(
        error_code: CInt32,
        error_string: CCharBuf,
        buffer_size: CUint32,
    ) -> CInt32;

    // Task lifecycle

    pub fn DAQmxCreateTask(task_name: CConstStr, task: *mut RawTaskHandle) -> CInt32;
    pub fn DAQmxLoadTask(task_name: CConstStr, task: *mut RawTaskHandle) -> CInt32;
    pub fn DAQmxAddGlobalChansToTask(task: RawTaskHandle, channel_names: CConstStr) -> CInt32;
    pub fn DAQmxStartTask(task: RawTaskHandle) -> CInt32;
    pub fn DAQmxStopTask(task: RawTaskHandle) -> CInt32;
    pub fn DAQmxClearTask(task: RawTaskHandle) -> CInt32;
    pub fn DAQmxTaskControl(task: RawTaskHandle, action: CInt32) -> CInt32;
    pub fn DAQmxIsTaskDone(task: RawTaskHandle, is_task_done: *mut CBool32) -> CInt32;
    pub fn DAQmxWaitUntilTaskDone(task: RawTaskHandle, time_to_wait: CFloat64) -> CInt32;

    // Channel creation

    pub fn DAQmxCreateAIVoltageChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        terminal_config: CInt32,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateAICurrentChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        terminal_config: CInt32,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        shunt_resistor_loc: CInt32,
        ext_shunt_resistor_val: CFloat64,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateAIThrmcplChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        thermocouple_type: CInt32,
        cjc_source: CInt32,
        cjc_val: CFloat64,
        cjc_channel: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateAIRTDChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        rtd_type: CInt32,
        resistance_config: CInt32,
        current_excit_source: CInt32,
        current_excit_val: CFloat64,
        r_0: CFloat64,
    ) -> CInt32;
    pub fn DAQmxCreateAIBridgeChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        bridge_config: CInt32,
        voltage_excit_source: CInt32,
        voltage_excit_val: CFloat64,
        nominal_bridge_resistance: CFloat64,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateAIStrainGageChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        strain_config: CInt32,
        voltage_excit_source: CInt32,
        voltage_excit_val: CFloat64,
        gage_factor: CFloat64,
        initial_bridge_voltage: CFloat64,
        nominal_gage_resistance: CFloat64,
        poisson_ratio: CFloat64,
        lead_wire_resistance: CFloat64,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateAIPowerChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        voltage_setpoint: CFloat64,
        current_setpoint: CFloat64,
        output_enable: CBool32,
    ) -> CInt32;
    pub fn DAQmxCreateAOVoltageChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateAOCurrentChan(
        task: RawTaskHandle,
        physical_channel: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateDIChan(
        task: RawTaskHandle,
        lines: CConstStr,
        name_to_assign: CConstStr,
        line_grouping: CInt32,
    ) -> CInt32;
    pub fn DAQmxCreateDOChan(
        task: RawTaskHandle,
        lines: CConstStr,
        name_to_assign: CConstStr,
        line_grouping: CInt32,
    ) -> CInt32;
    pub fn DAQmxCreateCICountEdgesChan(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        edge: CInt32,
        initial_count: CUint32,
        count_direction: CInt32,
    ) -> CInt32;
    pub fn DAQmxCreateCIFreqChan(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        edge: CInt32,
        meas_method: CInt32,
        meas_time: CFloat64,
        divisor: CUint32,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateCIPeriodChan(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        edge: CInt32,
        meas_method: CInt32,
        meas_time: CFloat64,
        divisor: CUint32,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateCIPulseWidthChan(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        starting_edge: CInt32,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateCISemiPeriodChan(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        min_val: CFloat64,
        max_val: CFloat64,
        units: CInt32,
        custom_scale_name: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCreateCOPulseChanFreq(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        units: CInt32,
        idle_state: CInt32,
        initial_delay: CFloat64,
        freq: CFloat64,
        duty_cycle: CFloat64,
    ) -> CInt32;
    pub fn DAQmxCreateCOPulseChanTime(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        units: CInt32,
        idle_state: CInt32,
        initial_delay: CFloat64,
        low_time: CFloat64,
        high_time: CFloat64,
    ) -> CInt32;
    pub fn DAQmxCreateCOPulseChanTicks(
        task: RawTaskHandle,
        counter: CConstStr,
        name_to_assign: CConstStr,
        source_terminal: CConstStr,
        idle_state: CInt32,
        initial_delay: CInt32,
        low_ticks: CInt32,
        high_ticks: CInt32,
    ) -> CInt32;

    // Timing, triggering and buffers

    pub fn DAQmxCfgSampClkTiming(
        task: RawTaskHandle,
        source: CConstStr,
        rate: CFloat64,
        active_edge: CInt32,
        sample_mode: CInt32,
        samps_per_chan: CUint64,
    ) -> CInt32;
    pub fn DAQmxCfgImplicitTiming(
        task: RawTaskHandle,
        sample_mode: CInt32,
        samps_per_chan: CUint64,
    ) -> CInt32;
    pub fn DAQmxCfgDigEdgeStartTrig(
        task: RawTaskHandle,
        trigger_source: CConstStr,
        trigger_edge: CInt32,
    ) -> CInt32;
    pub fn DAQmxCfgAnlgEdgeStartTrig(
        task: RawTaskHandle,
        trigger_source: CConstStr,
        trigger_slope: CInt32,
        trigger_level: CFloat64,
    ) -> CInt32;
    pub fn DAQmxCfgDigEdgeRefTrig(
        task: RawTaskHandle,
        trigger_source: CConstStr,
        trigger_edge: CInt32,
        pretrigger_samples: CUint32,
    ) -> CInt32;
    pub fn DAQmxCfgAnlgEdgeRefTrig(
        task: RawTaskHandle,
        trigger_source: CConstStr,
        trigger_slope: CInt32,
        trigger_level: CFloat64,
        pretrigger_samples: CUint32,
    ) -> CInt32;
    pub fn DAQmxDisableStartTrig(task: RawTaskHandle) -> CInt32;
    pub fn DAQmxDisableRefTrig(task: RawTaskHandle) -> CInt32;
    pub fn DAQmxSendSoftwareTrigger(task: RawTaskHandle, trigger_id: CInt32) -> CInt32;
    pub fn DAQmxExportSignal(
        task: RawTaskHandle,
        signal_id: CInt32,
        output_terminal: CConstStr,
    ) -> CInt32;
    pub fn DAQmxCfgInputBuffer(task: RawTaskHandle, num_samps_per_chan: CUint32) -> CInt32;
    pub fn DAQmxCfgOutputBuffer(task: RawTaskHandle, num_samps_per_chan: CUint32) -> CInt32;

    // Reads

    pub fn DAQmxReadAnalogF64(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CBool32,
        read_array: *mut CFloat64,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadAnalogScalarF64(
        task: RawTaskHandle,
        timeout: CFloat64,
        value: *mut CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadDigitalLines(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CBool32,
        read_array: *mut u8,
        array_size_in_bytes: CUint32,
        samps_per_chan_read: *mut CInt32,
        num_bytes_per_samp: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadDigitalU8(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CBool32,
        read_array: *mut u8,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadDigitalU16(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CBool32,
        read_array: *mut u16,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadDigitalU32(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CBool32,
        read_array: *mut CUint32,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadDigitalScalarU32(
        task: RawTaskHandle,
        timeout: CFloat64,
        value: *mut CUint32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCounterF64Ex(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CBool32,
        read_array: *mut CFloat64,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCounterU32Ex(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CBool32,
        read_array: *mut CUint32,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCounterScalarF64(
        task: RawTaskHandle,
        timeout: CFloat64,
        value: *mut CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCounterScalarU32(
        task: RawTaskHandle,
        timeout: CFloat64,
        value: *mut CUint32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCtrFreq(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        interleaved: CBool32,
        read_array_frequency: *mut CFloat64,
        read_array_duty_cycle: *mut CFloat64,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCtrTime(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        interleaved: CBool32,
        read_array_high_time: *mut CFloat64,
        read_array_low_time: *mut CFloat64,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCtrTicks(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        interleaved: CBool32,
        read_array_high_ticks: *mut CUint32,
        read_array_low_ticks: *mut CUint32,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCtrFreqScalar(
        task: RawTaskHandle,
        timeout: CFloat64,
        frequency: *mut CFloat64,
        duty_cycle: *mut CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCtrTimeScalar(
        task: RawTaskHandle,
        timeout: CFloat64,
        high_time: *mut CFloat64,
        low_time: *mut CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadCtrTicksScalar(
        task: RawTaskHandle,
        timeout: CFloat64,
        high_ticks: *mut CUint32,
        low_ticks: *mut CUint32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadPowerF64(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        timeout: CFloat64,
        fill_mode: CInt32,
        read_array_voltage: *mut CFloat64,
        read_array_current: *mut CFloat64,
        array_size_in_samps: CUint32,
        samps_per_chan_read: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxReadPowerScalarF64(
        task: RawTaskHandle,
        timeout: CFloat64,
        voltage: *mut CFloat64,
        current: *mut CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;

    // Writes

    pub fn DAQmxWriteAnalogF64(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        write_array: *const CFloat64,
        samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteAnalogScalarF64(
        task: RawTaskHandle,
        auto_start: CBool32,
        timeout: CFloat64,
        value: CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteDigitalLines(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        write_array: *const u8,
        samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteDigitalU8(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        write_array: *const u8,
        samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteDigitalU16(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        write_array: *const u16,
        samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteDigitalU32(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        write_array: *const CUint32,
        samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteDigitalScalarU32(
        task: RawTaskHandle,
        auto_start: CBool32,
        timeout: CFloat64,
        value: CUint32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteCtrFreq(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        frequency: *const CFloat64,
        duty_cycle: *const CFloat64,
        num_samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteCtrTime(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        high_time: *const CFloat64,
        low_time: *const CFloat64,
        num_samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteCtrTicks(
        task: RawTaskHandle,
        num_samps_per_chan: CInt32,
        auto_start: CBool32,
        timeout: CFloat64,
        data_layout: CBool32,
        high_ticks: *const CUint32,
        low_ticks: *const CUint32,
        num_samps_per_chan_written: *mut CInt32,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteCtrFreqScalar(
        task: RawTaskHandle,
        auto_start: CBool32,
        timeout: CFloat64,
        frequency: CFloat64,
        duty_cycle: CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteCtrTimeScalar(
        task: RawTaskHandle,
        auto_start: CBool32,
        timeout: CFloat64,
        high_time: CFloat64,
        low_time: CFloat64,
        reserved: *mut CBool32,
    ) -> CInt32;
    pub fn DAQmxWriteCtrTicksScalar(
        task: RawTaskHandle,
        auto_start: CBool32,
        timeout: CFloat64,
        high_ticks: CUint32,
        low_ticks: CUint32,
        reserved: *mut CBool32,
    ) -> CInt32;

    // Events

    pub fn DAQmxRegisterEveryNSamplesEvent(
        task: RawTaskHandle,
        event_type: CInt32,
        num_samples: CUint32,
        options: CUint32,
        callback: EveryNSamplesEventCallback,
        callback_data: *mut c_void,
    ) -> CInt32;
    pub fn DAQmxRegisterDoneEvent(
        task: RawTaskHandle,
        options: CUint32,
        callback: DoneEventCallback,
        callback_data: *mut c_void,
    ) -> CInt32;
    pub fn DAQmxRegisterSignalEvent(
        task: RawTaskHandle,
        signal_id: CInt32,
        options: CUint32,
        callback: SignalEventCallback,
        callback_data: *mut c_void,
    ) -> CInt32;

    // Devices, routing and the configuration store

    pub fn DAQmxResetDevice(device_name: CConstStr) -> CInt32;
    pub fn DAQmxSelfTestDevice(device_name: CConstStr) -> CInt32;
    pub fn DAQmxAddNetworkDevice(
        ip_address: CConstStr,
        device_name: CConstStr,
        attempt_reservation: CBool32,
        timeout: CFloat64,
        device_name_out: CCharBuf,
        device_name_out_buffer_size: CUint32,
    ) -> CInt32;
    pub fn DAQmxDeleteNetworkDevice(device_name: CConstStr) -> CInt32;
    pub fn DAQmxReserveNetworkDevice(
        device_name: CConstStr,
        override_reservation: CBool32,
    ) -> CInt32;
    pub fn DAQmxUnreserveNetworkDevice(device_name: CConstStr) -> CInt32;
    pub fn DAQmxConnectTerms(
        source_terminal: CConstStr,
        destination_terminal: CConstStr,
        signal_modifiers: CInt32,
    ) -> CInt32;
    pub fn DAQmxDisconnectTerms(
        source_terminal: CConstStr,
        destination_terminal: CConstStr,
    ) -> CInt32;
    pub fn DAQmxTristateOutputTerm(output_terminal: CConstStr) -> CInt32;
    pub fn DAQmxDeleteSavedGlobalChan(channel_name: CConstStr) -> CInt32;
    pub fn DAQmxDeleteSavedScale(scale_name: CConstStr) -> CInt32;
    pub fn DAQmxDeleteSavedTask(task_name: CConstStr) -> CInt32;

    // Watchdog

    pub fn DAQmxCreateWatchdogTimerTaskEx(
        device_name: CConstStr,
        task_name: CConstStr,
        task: *mut RawTaskHandle,
        timeout: CFloat64,
    ) -> CInt32;
    pub fn DAQmxCfgWatchdogAOExpirStates(
        task: RawTaskHandle,
        channel_names: CConstStr,
        expir_state_array: *const CFloat64,
        output_type_array: *const CInt32,
        array_size: CUint32,
    ) -> CInt32;
    pub fn DAQmxCfgWatchdogCOExpirStates(
        task: RawTaskHandle,
        channel_names: CConstStr,
        expir_state_array: *const CInt32,
        array_size: CUint32,
    ) -> CInt32;
    pub fn DAQmxCfgWatchdogDOExpirStates(
        task: RawTaskHandle,
        channel_names: CConstStr,
        expir_state_array: *const CInt32,
        array_size: CUint32,
    ) -> CInt32;
    pub fn DAQmxControlWatchdogTask(task: RawTaskHandle, action: CInt32) -> CInt32;

    // Attributes

    pub fn DAQmxGetSystemInfoAttribute(attribute: CInt32, value: *mut c_void, ...) -> CInt32;
    pub fn DAQmxGetDeviceAttribute(
        device_name: CConstStr,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxGetPhysicalChanAttribute(
        physical_channel: CConstStr,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetPhysicalChanAttribute(
        physical_channel: CConstStr,
        attribute: CInt32,
        ...
    ) -> CInt32;
    pub fn DAQmxResetPhysicalChanAttribute(
        physical_channel: CConstStr,
        attribute: CInt32,
    ) -> CInt32;
    pub fn DAQmxGetPersistedChanAttribute(
        channel: CConstStr,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxGetPersistedScaleAttribute(
        scale_name: CConstStr,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxGetPersistedTaskAttribute(
        task_name: CConstStr,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxGetTaskAttribute(
        task: RawTaskHandle,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxGetChanAttribute(
        task: RawTaskHandle,
        channel: CConstStr,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetChanAttribute(
        task: RawTaskHandle,
        channel: CConstStr,
        attribute: CInt32,
        ...
    ) -> CInt32;
    pub fn DAQmxResetChanAttribute(
        task: RawTaskHandle,
        channel: CConstStr,
        attribute: CInt32,
    ) -> CInt32;
    pub fn DAQmxGetTimingAttribute(
        task: RawTaskHandle,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetTimingAttribute(task: RawTaskHandle, attribute: CInt32, ...) -> CInt32;
    pub fn DAQmxResetTimingAttribute(task: RawTaskHandle, attribute: CInt32) -> CInt32;
    pub fn DAQmxGetTrigAttribute(
        task: RawTaskHandle,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetTrigAttribute(task: RawTaskHandle, attribute: CInt32, ...) -> CInt32;
    pub fn DAQmxResetTrigAttribute(task: RawTaskHandle, attribute: CInt32) -> CInt32;
    pub fn DAQmxGetReadAttribute(
        task: RawTaskHandle,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetReadAttribute(task: RawTaskHandle, attribute: CInt32, ...) -> CInt32;
    pub fn DAQmxResetReadAttribute(task: RawTaskHandle, attribute: CInt32) -> CInt32;
    pub fn DAQmxGetWriteAttribute(
        task: RawTaskHandle,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetWriteAttribute(task: RawTaskHandle, attribute: CInt32, ...) -> CInt32;
    pub fn DAQmxResetWriteAttribute(task: RawTaskHandle, attribute: CInt32) -> CInt32;
    pub fn DAQmxGetBufferAttribute(
        task: RawTaskHandle,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetBufferAttribute(task: RawTaskHandle, attribute: CInt32, ...) -> CInt32;
    pub fn DAQmxResetBufferAttribute(task: RawTaskHandle, attribute: CInt32) -> CInt32;
    pub fn DAQmxGetWatchdogAttribute(
        task: RawTaskHandle,
        lines: CConstStr,
        attribute: CInt32,
        value: *mut c_void,
        ...
    ) -> CInt32;
    pub fn DAQmxSetWatchdogAttribute(
        task: RawTaskHandle,
        lines: CConstStr,
        attribute: CInt32,
        ...
    ) -> CInt32;
    pub fn DAQmxResetWatchdogAttribute(
        task: RawTaskHandle,
        lines: CConstStr,
        attribute: CInt32,
    ) -> CInt32;
}
