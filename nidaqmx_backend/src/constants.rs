//! NI-DAQmx enumerations with their `DAQmx_Val_*` numeric values.
//!
//! Every enumeration is declared with [`daqmx_enum!`], which generates the
//! conversions to and from the driver's `int32` representation and makes the
//! type usable as an attribute value.

/// Conversion between a driver enumeration and its `int32` value.
pub trait DaqmxEnum: Sized + Copy {
    const NAME: &'static str;
    fn to_raw(self) -> i32;
    fn from_raw(value: i32) -> Option<Self>;
}

macro_rules! daqmx_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::constants::DaqmxEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn to_raw(self) -> i32 {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn from_raw(value: i32) -> Option<Self> {
                $(if value == $value {
                    return Some(Self::$variant);
                })+
                None
            }
        }

        impl $crate::attributes::AttributeValue for $name {
            fn read(
                interpreter: &dyn $crate::interpreter::Interpreter,
                target: &$crate::attributes::AttributeTarget,
                id: i32,
            ) -> $crate::error::Result<Self> {
                let raw = interpreter.get_attribute_i32(target, id)?;
                <Self as $crate::constants::DaqmxEnum>::from_raw(raw)
                    .ok_or_else(|| $crate::error::DaqError::unexpected_value(stringify!($name), raw))
            }
        }

        impl $crate::attributes::WritableValue for $name {
            fn write(
                &self,
                interpreter: &dyn $crate::interpreter::Interpreter,
                target: &$crate::attributes::AttributeTarget,
                id: i32,
            ) -> $crate::error::Result<()> {
                interpreter.set_attribute_i32(
                    target,
                    id,
                    <Self as $crate::constants::DaqmxEnum>::to_raw(*self),
                )
            }
        }
    };
}

daqmx_enum!(AcquisitionType {
    Finite = 10178,
    Continuous = 10123,
    HwTimedSinglePoint = 12522,
});

daqmx_enum!(Edge {
    Rising = 10280,
    Falling = 10171,
});

daqmx_enum!(Slope {
    Rising = 10280,
    Falling = 10171,
});

daqmx_enum!(Level {
    High = 10192,
    Low = 10214,
});

daqmx_enum!(
    /// Input terminal configuration of an analog channel.
    TerminalConfiguration {
        Default = -1,
        Rse = 10083,
        Nrse = 10078,
        Differential = 10106,
        PseudoDifferential = 12529,
    }
);

daqmx_enum!(VoltageUnits {
    Volts = 10348,
    FromCustomScale = 10065,
});

daqmx_enum!(CurrentUnits {
    Amps = 10342,
    FromCustomScale = 10065,
});

daqmx_enum!(TemperatureUnits {
    DegC = 10143,
    DegF = 10144,
    Kelvins = 10325,
    DegR = 10145,
});

daqmx_enum!(FrequencyUnits {
    Hz = 10373,
    Ticks = 10304,
    FromCustomScale = 10065,
});

daqmx_enum!(TimeUnits {
    Seconds = 10364,
    Ticks = 10304,
    FromCustomScale = 10065,
});

daqmx_enum!(StrainUnits {
    Strain = 10299,
    FromCustomScale = 10065,
});

daqmx_enum!(BridgeUnits {
    VoltsPerVolt = 15896,
    MillivoltsPerVolt = 15897,
    FromCustomScale = 10065,
});

daqmx_enum!(ThermocoupleType {
    B = 10047,
    E = 10055,
    J = 10072,
    K = 10073,
    N = 10077,
    R = 10082,
    S = 10085,
    T = 10086,
});

daqmx_enum!(CjcSource {
    BuiltIn = 10200,
    ConstantValue = 10116,
    Channel = 10113,
});

daqmx_enum!(RtdType {
    Pt3750 = 12481,
    Pt3851 = 10071,
    Pt3911 = 12482,
    Pt3916 = 10069,
    Pt3920 = 10053,
    Pt3928 = 12483,
    Custom = 10137,
});

daqmx_enum!(ResistanceConfiguration {
    TwoWire = 2,
    ThreeWire = 3,
    FourWire = 4,
});

daqmx_enum!(ExcitationSource {
    Internal = 10200,
    External = 10167,
    None = 10230,
});

daqmx_enum!(BridgeConfiguration {
    FullBridge = 10182,
    HalfBridge = 10187,
    QuarterBridge = 10270,
    NoBridge = 10228,
});

daqmx_enum!(StrainGageBridgeType {
    FullBridgeI = 10183,
    FullBridgeII = 10184,
    FullBridgeIII = 10185,
    HalfBridgeI = 10188,
    HalfBridgeII = 10189,
    QuarterBridgeI = 10271,
    QuarterBridgeII = 10272,
});

daqmx_enum!(CurrentShuntResistorLocation {
    LetDriverChoose = -1,
    Internal = 10200,
    External = 10167,
});

daqmx_enum!(
    /// How digital lines are grouped into virtual channels.
    LineGrouping {
        ChanPerLine = 0,
        ChanForAllLines = 1,
    }
);

daqmx_enum!(
    /// Actions accepted by `DAQmxTaskControl`.
    TaskMode {
        Start = 0,
        Stop = 1,
        Verify = 2,
        Commit = 3,
        Reserve = 4,
        Unreserve = 5,
        Abort = 6,
    }
);

daqmx_enum!(FillMode {
    GroupByChannel = 0,
    GroupByScanNumber = 1,
});

daqmx_enum!(ChannelType {
    AnalogInput = 10100,
    AnalogOutput = 10102,
    DigitalInput = 10151,
    DigitalOutput = 10153,
    CounterInput = 10131,
    CounterOutput = 10132,
});

daqmx_enum!(UsageTypeAi {
    Voltage = 10322,
    Current = 10134,
    TemperatureThermocouple = 10303,
    TemperatureRtd = 10301,
    Bridge = 15908,
    StrainGage = 10300,
    Power = 16201,
});

daqmx_enum!(UsageTypeAo {
    Voltage = 10322,
    Current = 10134,
});

daqmx_enum!(UsageTypeCi {
    CountEdges = 10125,
    Frequency = 10179,
    Period = 10256,
    PulseWidth = 10359,
    SemiPeriod = 10289,
    TwoEdgeSeparation = 10267,
    PulseFrequency = 15864,
    PulseTime = 15865,
    PulseTicks = 15866,
});

daqmx_enum!(UsageTypeCo {
    PulseTime = 10269,
    PulseFrequency = 10119,
    PulseTicks = 10268,
});

daqmx_enum!(SampleTimingType {
    SampleClock = 10388,
    Handshake = 10389,
    Implicit = 10451,
    OnDemand = 10390,
    ChangeDetection = 12504,
});

daqmx_enum!(TriggerType {
    AnalogEdge = 10099,
    AnalogWindow = 10103,
    DigitalEdge = 10150,
    DigitalLevel = 10152,
    DigitalPattern = 10398,
    Software = 10292,
    Time = 15996,
    None = 10230,
});

daqmx_enum!(EveryNSamplesEventType {
    AcquiredIntoBuffer = 1,
    TransferredFromBuffer = 2,
});

daqmx_enum!(Signal {
    AiConvertClock = 12484,
    SampleClock = 12487,
    AdvanceTrigger = 12488,
    PauseTrigger = 12489,
    ReferenceTrigger = 12490,
    StartTrigger = 12491,
    CounterOutputEvent = 12494,
    TenMhzRefClock = 12536,
});

daqmx_enum!(
    /// Triggers that can be fired with `DAQmxSendSoftwareTrigger`.
    SoftwareTrigger {
        AdvanceTrigger = 12488,
    }
);

daqmx_enum!(RegenerationMode {
    AllowRegeneration = 10097,
    DoNotAllowRegeneration = 10158,
});

daqmx_enum!(OverwriteMode {
    OverwriteUnreadSamples = 10252,
    DoNotOverwriteUnreadSamples = 10159,
});

daqmx_enum!(ReadRelativeTo {
    FirstSample = 10424,
    CurrentReadPosition = 10425,
    ReferenceTrigger = 10426,
    FirstPretriggerSample = 10427,
    MostRecentSample = 10428,
});

daqmx_enum!(
    /// Actions accepted by `DAQmxControlWatchdogTask`.
    WatchdogControlAction {
        ResetTimer = 0,
        ClearExpiration = 1,
    }
);

daqmx_enum!(WatchdogAoExpirState {
    Voltage = 10322,
    Current = 10134,
    NoChange = 10160,
});

daqmx_enum!(WatchdogCoExpirState {
    High = 10192,
    Low = 10214,
    NoChange = 10160,
});

daqmx_enum!(DigitalLineState {
    High = 10192,
    Low = 10214,
    Tristate = 10310,
    NoChange = 10160,
});

daqmx_enum!(CounterFrequencyMethod {
    LowFrequencyOneCounter = 10105,
    HighFrequencyTwoCounters = 10157,
    LargeRangeTwoCounters = 10205,
    DynamicAveraging = 16065,
});

daqmx_enum!(CountDirection {
    CountUp = 10128,
    CountDown = 10124,
    ExternalSource = 10326,
});

daqmx_enum!(ProductCategory {
    ESeriesDaq = 14642,
    MSeriesDaq = 14643,
    SSeriesDaq = 14644,
    BSeriesDaq = 14662,
    XSeriesDaq = 15858,
    UsbDaq = 14646,
    CSeriesModule = 14659,
    CompactDaqChassis = 14658,
    NetworkDaq = 14829,
    Unknown = 12588,
});

daqmx_enum!(
    /// Trigger kinds, as reported by the device trigger-usage bitfields.
    TriggerUsage {
        Advance = 12488,
        Pause = 12489,
        Reference = 12490,
        Start = 12491,
        Handshake = 10389,
        ArmStart = 14641,
    }
);

daqmx_enum!(
    /// Signal modifiers for `DAQmxConnectTerms`.
    Polarity {
        DoNotInvert = 0,
        Invert = 1,
    }
);

/// Timeout value that makes blocking calls wait forever.
pub const WAIT_INFINITELY: f64 = -1.0;

/// Sample count that reads every sample currently available.
pub const READ_ALL_AVAILABLE: i32 = -1;
