//! Typed attribute descriptors.
//!
//! The driver addresses every property by a numeric ID whose value type is
//! fixed. An [`Attribute`] pairs that ID with its Rust value type and its access
//! mode, so reading a `f64` attribute as a string, or writing a read-only one, is
//! a compile error instead of a driver error.
//!
//! Entities implement [`AttributeOwner`] to say which [`AttributeTarget`] and
//! interpreter their attributes go through, and expose named accessors with the
//! [`properties!`] macro.

use crate::channel_string::{flatten_channel_string, unflatten_channel_string};
use crate::error::Result;
use crate::interpreter::{Interpreter, TaskHandle};
use std::marker::PhantomData;
use std::sync::Arc;

/// Access marker for attributes that can only be read.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnly;

/// Access marker for attributes that can be read, written and reset.
#[derive(Debug, Clone, Copy)]
pub struct ReadWrite;

/// A typed attribute ID.
#[derive(Debug)]
pub struct Attribute<T, A = ReadWrite> {
    pub id: i32,
    _marker: PhantomData<fn() -> (T, A)>,
}

impl<T, A> Attribute<T, A> {
    pub const fn new(id: i32) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T, A> Clone for Attribute<T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for Attribute<T, A> {}

/// The identity an attribute belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeTarget {
    System,
    Device(String),
    PhysicalChannel(String),
    PersistedChannel(String),
    PersistedScale(String),
    PersistedTask(String),
    Task(TaskHandle),
    /// A virtual channel (or flattened list of channels) of a task.
    Channel(TaskHandle, String),
    Timing(TaskHandle),
    Trigger(TaskHandle),
    Read(TaskHandle),
    Write(TaskHandle),
    Buffer(TaskHandle),
    /// Expiration-state lines of a watchdog task.
    Watchdog(TaskHandle, String),
}

/// A value type that can be read from the driver.
pub trait AttributeValue: Sized {
    fn read(interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32) -> Result<Self>;
}

/// A value type that can also be written to the driver.
pub trait WritableValue: AttributeValue {
    fn write(&self, interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32)
        -> Result<()>;
}

macro_rules! scalar_value {
    ($ty:ty, $get:ident, $set:ident) => {
        impl AttributeValue for $ty {
            fn read(interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32) -> Result<Self> {
                interpreter.$get(target, id)
            }
        }

        impl WritableValue for $ty {
            fn write(
                &self,
                interpreter: &dyn Interpreter,
                target: &AttributeTarget,
                id: i32,
            ) -> Result<()> {
                interpreter.$set(target, id, *self)
            }
        }
    };
}

scalar_value!(bool, get_attribute_bool, set_attribute_bool);
scalar_value!(i32, get_attribute_i32, set_attribute_i32);
scalar_value!(u32, get_attribute_u32, set_attribute_u32);
scalar_value!(u64, get_attribute_u64, set_attribute_u64);
scalar_value!(f64, get_attribute_f64, set_attribute_f64);

impl AttributeValue for String {
    fn read(interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32) -> Result<Self> {
        interpreter.get_attribute_string(target, id)
    }
}

impl WritableValue for String {
    fn write(&self, interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32) -> Result<()> {
        interpreter.set_attribute_string(target, id, self)
    }
}

/// Channel lists travel as flattened channel strings.
impl AttributeValue for Vec<String> {
    fn read(interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32) -> Result<Self> {
        unflatten_channel_string(&interpreter.get_attribute_string(target, id)?)
    }
}

impl WritableValue for Vec<String> {
    fn write(&self, interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32) -> Result<()> {
        interpreter.set_attribute_string(target, id, &flatten_channel_string(self)?)
    }
}

macro_rules! array_value {
    ($ty:ty, $get:ident) => {
        impl AttributeValue for Vec<$ty> {
            fn read(interpreter: &dyn Interpreter, target: &AttributeTarget, id: i32) -> Result<Self> {
                interpreter.$get(target, id)
            }
        }
    };
}

array_value!(i32, get_attribute_i32_array);
array_value!(u32, get_attribute_u32_array);
array_value!(f64, get_attribute_f64_array);
array_value!(u8, get_attribute_u8_array);

/// Anything that owns attributes: it knows its interpreter and its target.
pub trait AttributeOwner {
    /// Resolve the interpreter and target, failing if the owner is no longer usable.
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)>;

    fn get_attribute<T: AttributeValue, A>(&self, attribute: Attribute<T, A>) -> Result<T> {
        let (interpreter, target) = self.attribute_context()?;
        T::read(interpreter.as_ref(), &target, attribute.id)
    }

    fn set_attribute<T: WritableValue>(
        &self,
        attribute: Attribute<T, ReadWrite>,
        value: T,
    ) -> Result<()> {
        let (interpreter, target) = self.attribute_context()?;
        value.write(interpreter.as_ref(), &target, attribute.id)
    }

    /// Restore the driver default.
    fn reset_attribute<T>(&self, attribute: Attribute<T, ReadWrite>) -> Result<()> {
        let (interpreter, target) = self.attribute_context()?;
        interpreter.reset_attribute(&target, attribute.id)
    }
}

/// Generates named accessors for an [`AttributeOwner`].
///
/// ```ignore
/// impl Timing {
///     properties! {
///         /// Sample clock rate in samples per channel per second.
///         rw samp_clk_rate / set_samp_clk_rate / reset_samp_clk_rate: f64 = timing::SAMP_CLK_RATE;
///         ro samp_clk_max_rate: f64 = timing::SAMP_CLK_MAX_RATE;
///     }
/// }
/// ```
#[macro_export]
macro_rules! properties {
    () => {};
    ($(#[$meta:meta])* ro $name:ident: $ty:ty = $attr:expr; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::Result<$ty> {
            $crate::attributes::AttributeOwner::get_attribute(self, $attr)
        }
        $crate::properties!($($rest)*);
    };
    ($(#[$meta:meta])* rw $name:ident / $set:ident / $reset:ident: $ty:ty = $attr:expr; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $name(&self) -> $crate::error::Result<$ty> {
            $crate::attributes::AttributeOwner::get_attribute(self, $attr)
        }
        pub fn $set(&self, value: impl Into<$ty>) -> $crate::error::Result<()> {
            $crate::attributes::AttributeOwner::set_attribute(self, $attr, value.into())
        }
        pub fn $reset(&self) -> $crate::error::Result<()> {
            $crate::attributes::AttributeOwner::reset_attribute(self, $attr)
        }
        $crate::properties!($($rest)*);
    };
}

/// Attribute table, grouped by the target each attribute belongs to.
pub mod ids {
    use super::{Attribute, ReadOnly, ReadWrite};
    use crate::constants::*;

    type Ro<T> = Attribute<T, ReadOnly>;
    type Rw<T> = Attribute<T, ReadWrite>;

    pub mod system {
        use super::*;
        pub const DEV_NAMES: Ro<Vec<String>> = Attribute::new(0x193B);
        pub const GLOBAL_CHANS: Ro<Vec<String>> = Attribute::new(0x1265);
        pub const SCALES: Ro<Vec<String>> = Attribute::new(0x1266);
        pub const TASKS: Ro<Vec<String>> = Attribute::new(0x1267);
        pub const MAJOR_VERSION: Ro<u32> = Attribute::new(0x1272);
        pub const MINOR_VERSION: Ro<u32> = Attribute::new(0x1923);
        pub const UPDATE_VERSION: Ro<u32> = Attribute::new(0x2F22);
    }

    pub mod device {
        use super::*;
        pub const PRODUCT_TYPE: Ro<String> = Attribute::new(0x0631);
        pub const PRODUCT_NUM: Ro<u32> = Attribute::new(0x231D);
        pub const PRODUCT_CATEGORY: Ro<ProductCategory> = Attribute::new(0x29A9);
        pub const SERIAL_NUM: Ro<u32> = Attribute::new(0x0632);
        pub const IS_SIMULATED: Ro<bool> = Attribute::new(0x22CA);
        pub const TCPIP_HOSTNAME: Ro<String> = Attribute::new(0x2A8B);
        pub const CHASSIS_MODULE_DEV_NAMES: Ro<Vec<String>> = Attribute::new(0x29B6);
        pub const COMPACT_DAQ_CHASSIS_DEV_NAME: Ro<String> = Attribute::new(0x29B7);
        pub const TERMINALS: Ro<Vec<String>> = Attribute::new(0x2A40);
        pub const NUM_DMA_CHANS: Ro<u32> = Attribute::new(0x233C);
        pub const AI_PHYSICAL_CHANS: Ro<Vec<String>> = Attribute::new(0x231E);
        pub const AO_PHYSICAL_CHANS: Ro<Vec<String>> = Attribute::new(0x231F);
        pub const DI_LINES: Ro<Vec<String>> = Attribute::new(0x2320);
        pub const DI_PORTS: Ro<Vec<String>> = Attribute::new(0x2321);
        pub const DO_LINES: Ro<Vec<String>> = Attribute::new(0x2322);
        pub const DO_PORTS: Ro<Vec<String>> = Attribute::new(0x2323);
        pub const CI_PHYSICAL_CHANS: Ro<Vec<String>> = Attribute::new(0x2324);
        pub const CO_PHYSICAL_CHANS: Ro<Vec<String>> = Attribute::new(0x2325);
        pub const AI_MAX_SINGLE_CHAN_RATE: Ro<f64> = Attribute::new(0x298C);
        pub const AI_MAX_MULTI_CHAN_RATE: Ro<f64> = Attribute::new(0x298D);
        pub const AI_VOLTAGE_RNGS: Ro<Vec<f64>> = Attribute::new(0x2990);
        pub const AO_VOLTAGE_RNGS: Ro<Vec<f64>> = Attribute::new(0x299B);
        pub const AI_TRIG_USAGE: Ro<i32> = Attribute::new(0x2986);
        pub const AO_TRIG_USAGE: Ro<i32> = Attribute::new(0x2987);
        pub const ANLG_TRIG_SUPPORTED: Ro<bool> = Attribute::new(0x2984);
        pub const DIG_TRIG_SUPPORTED: Ro<bool> = Attribute::new(0x2985);
    }

    pub mod physical_channel {
        use super::*;
        pub const AI_TERM_CFGS: Ro<i32> = Attribute::new(0x2342);
        pub const AO_TERM_CFGS: Ro<i32> = Attribute::new(0x29A3);
        pub const AI_SUPPORTED_MEAS_TYPES: Ro<Vec<i32>> = Attribute::new(0x2FD2);
        pub const AO_SUPPORTED_OUTPUT_TYPES: Ro<Vec<i32>> = Attribute::new(0x2FD3);
        pub const DI_PORT_WIDTH: Ro<u32> = Attribute::new(0x29A4);
        pub const DO_PORT_WIDTH: Ro<u32> = Attribute::new(0x29A7);
        pub const TEDS_SERIAL_NUM: Ro<u32> = Attribute::new(0x21DA);
        pub const TEDS_BIT_STREAM: Ro<Vec<u8>> = Attribute::new(0x21DF);
    }

    pub mod persisted_channel {
        use super::*;
        pub const AUTHOR: Ro<String> = Attribute::new(0x22D0);
        pub const ALLOW_INTERACTIVE_EDITING: Ro<bool> = Attribute::new(0x22D1);
        pub const ALLOW_INTERACTIVE_DELETION: Ro<bool> = Attribute::new(0x22D2);
    }

    pub mod persisted_scale {
        use super::*;
        pub const AUTHOR: Ro<String> = Attribute::new(0x22D4);
        pub const ALLOW_INTERACTIVE_EDITING: Ro<bool> = Attribute::new(0x22D5);
        pub const ALLOW_INTERACTIVE_DELETION: Ro<bool> = Attribute::new(0x22D6);
    }

    pub mod persisted_task {
        use super::*;
        pub const AUTHOR: Ro<String> = Attribute::new(0x22CC);
        pub const ALLOW_INTERACTIVE_EDITING: Ro<bool> = Attribute::new(0x22CD);
        pub const ALLOW_INTERACTIVE_DELETION: Ro<bool> = Attribute::new(0x22CE);
    }

    pub mod task {
        use super::*;
        pub const NAME: Ro<String> = Attribute::new(0x1276);
        pub const CHANNELS: Ro<Vec<String>> = Attribute::new(0x1273);
        pub const NUM_CHANS: Ro<u32> = Attribute::new(0x2181);
        pub const DEVICES: Ro<Vec<String>> = Attribute::new(0x230E);
        pub const NUM_DEVICES: Ro<u32> = Attribute::new(0x29BA);
        pub const COMPLETE: Ro<bool> = Attribute::new(0x1274);
    }

    pub mod channel {
        use super::*;
        pub const CHAN_TYPE: Ro<ChannelType> = Attribute::new(0x187F);
        pub const PHYSICAL_CHAN_NAME: Rw<String> = Attribute::new(0x18F5);
        pub const DESCR: Rw<String> = Attribute::new(0x1926);
        pub const IS_GLOBAL: Ro<bool> = Attribute::new(0x2304);
        pub const AI_MAX: Rw<f64> = Attribute::new(0x17DD);
        pub const AI_MIN: Rw<f64> = Attribute::new(0x17DE);
        pub const AI_MEAS_TYPE: Ro<UsageTypeAi> = Attribute::new(0x0695);
        pub const AI_TERM_CFG: Rw<TerminalConfiguration> = Attribute::new(0x1097);
        pub const AI_VOLTAGE_UNITS: Rw<VoltageUnits> = Attribute::new(0x1094);
        pub const AI_CURRENT_UNITS: Rw<CurrentUnits> = Attribute::new(0x0701);
        pub const AI_TEMP_UNITS: Rw<TemperatureUnits> = Attribute::new(0x1033);
        pub const AI_THRMCPL_TYPE: Rw<ThermocoupleType> = Attribute::new(0x1050);
        pub const AI_RTD_TYPE: Rw<RtdType> = Attribute::new(0x1032);
        pub const AI_EXCIT_SRC: Rw<ExcitationSource> = Attribute::new(0x17F4);
        pub const AI_EXCIT_VAL: Rw<f64> = Attribute::new(0x17F5);
        pub const AI_BRIDGE_CFG: Rw<BridgeConfiguration> = Attribute::new(0x0087);
        pub const AI_RNG_HIGH: Rw<f64> = Attribute::new(0x1815);
        pub const AI_RNG_LOW: Rw<f64> = Attribute::new(0x1816);
        pub const AO_MAX: Rw<f64> = Attribute::new(0x1186);
        pub const AO_MIN: Rw<f64> = Attribute::new(0x1187);
        pub const AO_OUTPUT_TYPE: Ro<UsageTypeAo> = Attribute::new(0x1108);
        pub const AO_VOLTAGE_UNITS: Rw<VoltageUnits> = Attribute::new(0x1184);
        pub const DI_INVERT_LINES: Rw<bool> = Attribute::new(0x0793);
        pub const DI_NUM_LINES: Ro<u32> = Attribute::new(0x2178);
        pub const DO_INVERT_LINES: Rw<bool> = Attribute::new(0x1133);
        pub const DO_NUM_LINES: Ro<u32> = Attribute::new(0x2179);
        pub const CI_MEAS_TYPE: Ro<UsageTypeCi> = Attribute::new(0x18A0);
        pub const CI_MAX: Rw<f64> = Attribute::new(0x189C);
        pub const CI_MIN: Rw<f64> = Attribute::new(0x189D);
        pub const CI_COUNT: Ro<u32> = Attribute::new(0x0148);
        pub const CI_COUNT_EDGES_TERM: Rw<String> = Attribute::new(0x18C7);
        pub const CI_COUNT_EDGES_DIR: Rw<CountDirection> = Attribute::new(0x0696);
        pub const CI_FREQ_TERM: Rw<String> = Attribute::new(0x18A2);
        pub const CO_OUTPUT_TYPE: Ro<UsageTypeCo> = Attribute::new(0x18B5);
        pub const CO_PULSE_FREQ: Rw<f64> = Attribute::new(0x1178);
        pub const CO_PULSE_DUTY_CYC: Rw<f64> = Attribute::new(0x1176);
        pub const CO_PULSE_HIGH_TIME: Rw<f64> = Attribute::new(0x18BA);
        pub const CO_PULSE_LOW_TIME: Rw<f64> = Attribute::new(0x18BB);
        pub const CO_PULSE_TERM: Rw<String> = Attribute::new(0x18E1);
    }

    pub mod timing {
        use super::*;
        pub const SAMP_QUANT_SAMP_MODE: Rw<AcquisitionType> = Attribute::new(0x1300);
        pub const SAMP_QUANT_SAMP_PER_CHAN: Rw<u64> = Attribute::new(0x1310);
        pub const SAMP_TIMING_TYPE: Rw<SampleTimingType> = Attribute::new(0x1347);
        pub const SAMP_CLK_RATE: Rw<f64> = Attribute::new(0x1344);
        pub const SAMP_CLK_MAX_RATE: Ro<f64> = Attribute::new(0x22C8);
        pub const SAMP_CLK_SRC: Rw<String> = Attribute::new(0x1852);
        pub const SAMP_CLK_ACTIVE_EDGE: Rw<Edge> = Attribute::new(0x1301);
        pub const SAMP_CLK_TIMEBASE_DIV: Rw<u32> = Attribute::new(0x18EB);
        pub const SAMP_CLK_TERM: Ro<String> = Attribute::new(0x2F1B);
        pub const AI_CONV_RATE: Rw<f64> = Attribute::new(0x1848);
        pub const REF_CLK_SRC: Rw<String> = Attribute::new(0x1316);
        pub const REF_CLK_RATE: Rw<f64> = Attribute::new(0x1315);
    }

    pub mod trigger {
        use super::*;
        pub const START_TRIG_TYPE: Rw<TriggerType> = Attribute::new(0x1393);
        pub const START_TRIG_RETRIGGERABLE: Rw<bool> = Attribute::new(0x190F);
        pub const START_TRIG_DELAY: Rw<f64> = Attribute::new(0x1856);
        pub const DIG_EDGE_START_TRIG_SRC: Rw<String> = Attribute::new(0x1407);
        pub const DIG_EDGE_START_TRIG_EDGE: Rw<Edge> = Attribute::new(0x1404);
        pub const ANLG_EDGE_START_TRIG_SRC: Rw<String> = Attribute::new(0x1398);
        pub const ANLG_EDGE_START_TRIG_SLOPE: Rw<Slope> = Attribute::new(0x1397);
        pub const ANLG_EDGE_START_TRIG_LVL: Rw<f64> = Attribute::new(0x1396);
        pub const REF_TRIG_TYPE: Rw<TriggerType> = Attribute::new(0x1419);
        pub const REF_TRIG_PRETRIG_SAMPLES: Rw<u32> = Attribute::new(0x1445);
        pub const DIG_EDGE_REF_TRIG_SRC: Rw<String> = Attribute::new(0x1434);
        pub const DIG_EDGE_REF_TRIG_EDGE: Rw<Edge> = Attribute::new(0x1430);
        pub const ANLG_EDGE_REF_TRIG_SRC: Rw<String> = Attribute::new(0x1424);
        pub const ANLG_EDGE_REF_TRIG_SLOPE: Rw<Slope> = Attribute::new(0x1423);
        pub const ANLG_EDGE_REF_TRIG_LVL: Rw<f64> = Attribute::new(0x1422);
        pub const PAUSE_TRIG_TYPE: Rw<TriggerType> = Attribute::new(0x1366);
        pub const DIG_LVL_PAUSE_TRIG_SRC: Rw<String> = Attribute::new(0x1379);
        pub const DIG_LVL_PAUSE_TRIG_WHEN: Rw<Level> = Attribute::new(0x1380);
        pub const ARM_START_TRIG_TYPE: Rw<TriggerType> = Attribute::new(0x1414);
        pub const DIG_EDGE_ARM_START_TRIG_SRC: Rw<String> = Attribute::new(0x1417);
        pub const DIG_EDGE_ARM_START_TRIG_EDGE: Rw<Edge> = Attribute::new(0x1415);
        pub const ADV_TRIG_TYPE: Rw<TriggerType> = Attribute::new(0x1365);
        pub const DIG_EDGE_ADV_TRIG_SRC: Rw<String> = Attribute::new(0x1362);
        pub const DIG_EDGE_ADV_TRIG_EDGE: Rw<Edge> = Attribute::new(0x1360);
    }

    pub mod read {
        use super::*;
        pub const AVAIL_SAMP_PER_CHAN: Ro<u32> = Attribute::new(0x1223);
        pub const CURR_READ_POS: Ro<u64> = Attribute::new(0x1221);
        pub const TOTAL_SAMP_PER_CHAN_ACQUIRED: Ro<u64> = Attribute::new(0x192A);
        pub const RELATIVE_TO: Rw<ReadRelativeTo> = Attribute::new(0x190A);
        pub const OFFSET: Rw<i32> = Attribute::new(0x190B);
        pub const OVER_WRITE: Rw<OverwriteMode> = Attribute::new(0x1211);
        pub const READ_ALL_AVAIL_SAMP: Rw<bool> = Attribute::new(0x1215);
        pub const AUTO_START: Rw<bool> = Attribute::new(0x1826);
        pub const CHANNELS_TO_READ: Rw<Vec<String>> = Attribute::new(0x1823);
        pub const NUM_CHANS: Ro<u32> = Attribute::new(0x217B);
        pub const DIGITAL_LINES_BYTES_PER_CHAN: Ro<u32> = Attribute::new(0x217C);
    }

    pub mod write {
        use super::*;
        pub const REGEN_MODE: Rw<RegenerationMode> = Attribute::new(0x1453);
        pub const CURR_WRITE_POS: Ro<u64> = Attribute::new(0x1458);
        pub const SPACE_AVAIL: Ro<u32> = Attribute::new(0x1460);
        pub const TOTAL_SAMP_PER_CHAN_GENERATED: Ro<u64> = Attribute::new(0x192B);
        pub const NUM_CHANS: Ro<u32> = Attribute::new(0x217E);
        pub const DIGITAL_LINES_BYTES_PER_CHAN: Ro<u32> = Attribute::new(0x217F);
        pub const OFFSET: Rw<i32> = Attribute::new(0x190D);
    }

    pub mod buffer {
        use super::*;
        pub const INPUT_BUF_SIZE: Rw<u32> = Attribute::new(0x186C);
        pub const INPUT_ONBRD_BUF_SIZE: Ro<u32> = Attribute::new(0x230A);
        pub const OUTPUT_BUF_SIZE: Rw<u32> = Attribute::new(0x186D);
        pub const OUTPUT_ONBRD_BUF_SIZE: Rw<u32> = Attribute::new(0x230B);
    }

    pub mod watchdog {
        use super::*;
        pub const TIMEOUT: Rw<f64> = Attribute::new(0x21A9);
        pub const HAS_EXPIRED: Ro<bool> = Attribute::new(0x21A8);
        pub const EXPIR_TRIG_TYPE: Rw<TriggerType> = Attribute::new(0x21A3);
        pub const EXPIR_TRIG_ON_NETWORK_CONN_LOSS: Rw<bool> = Attribute::new(0x305D);
        pub const DIG_EDGE_EXPIR_TRIG_SRC: Rw<String> = Attribute::new(0x21A4);
        pub const DIG_EDGE_EXPIR_TRIG_EDGE: Rw<Edge> = Attribute::new(0x21A5);
        pub const DO_EXPIR_STATE: Rw<DigitalLineState> = Attribute::new(0x21A7);
        pub const AO_EXPIR_STATE: Rw<f64> = Attribute::new(0x305E);
        pub const AO_OUTPUT_TYPE: Rw<WatchdogAoExpirState> = Attribute::new(0x305F);
        pub const CO_EXPIR_STATE: Rw<WatchdogCoExpirState> = Attribute::new(0x3060);
    }
}
