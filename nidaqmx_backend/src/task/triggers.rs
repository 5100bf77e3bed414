use super::TaskCore;
use crate::attributes::{ids::trigger, AttributeOwner, AttributeTarget};
use crate::constants::*;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::properties;
use std::sync::Arc;

/// Trigger configuration of a task, one sub-object per trigger.
#[derive(Debug, Clone, Copy)]
pub struct Triggers<'a> {
    task: &'a TaskCore,
}

impl<'a> Triggers<'a> {
    pub(super) fn new(task: &'a TaskCore) -> Self {
        Self { task }
    }

    pub fn start_trigger(&self) -> StartTrigger<'a> {
        StartTrigger { task: self.task }
    }

    pub fn reference_trigger(&self) -> ReferenceTrigger<'a> {
        ReferenceTrigger { task: self.task }
    }

    pub fn pause_trigger(&self) -> PauseTrigger<'a> {
        PauseTrigger { task: self.task }
    }

    pub fn arm_start_trigger(&self) -> ArmStartTrigger<'a> {
        ArmStartTrigger { task: self.task }
    }

    pub fn advance_trigger(&self) -> AdvanceTrigger<'a> {
        AdvanceTrigger { task: self.task }
    }

    pub fn send_software_trigger(&self, trigger: SoftwareTrigger) -> Result<()> {
        self.task
            .interpreter()
            .send_software_trigger(self.task.handle()?, trigger)
    }
}

macro_rules! trigger_owner {
    ($($name:ident),+) => {
        $(
            impl AttributeOwner for $name<'_> {
                fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
                    self.task.scoped_context(AttributeTarget::Trigger)
                }
            }
        )+
    };
}

trigger_owner!(StartTrigger, ReferenceTrigger, PauseTrigger, ArmStartTrigger, AdvanceTrigger);

#[derive(Debug, Clone, Copy)]
pub struct StartTrigger<'a> {
    task: &'a TaskCore,
}

impl StartTrigger<'_> {
    /// Start on an edge of a digital signal.
    pub fn cfg_dig_edge_start_trig(&self, trigger_source: &str, trigger_edge: Edge) -> Result<()> {
        self.task.interpreter().cfg_dig_edge_start_trig(
            self.task.handle()?,
            trigger_source,
            trigger_edge,
        )?;
        self.task.mark_configured();
        Ok(())
    }

    /// Start when an analog signal crosses `trigger_level` with `trigger_slope`.
    pub fn cfg_anlg_edge_start_trig(
        &self,
        trigger_source: &str,
        trigger_slope: Slope,
        trigger_level: f64,
    ) -> Result<()> {
        self.task.interpreter().cfg_anlg_edge_start_trig(
            self.task.handle()?,
            trigger_source,
            trigger_slope,
            trigger_level,
        )?;
        self.task.mark_configured();
        Ok(())
    }

    /// Start as soon as the task starts.
    pub fn disable_start_trig(&self) -> Result<()> {
        self.task
            .interpreter()
            .disable_start_trig(self.task.handle()?)
    }

    properties! {
        rw trig_type / set_trig_type / reset_trig_type: TriggerType = trigger::START_TRIG_TYPE;
        rw retriggerable / set_retriggerable / reset_retriggerable: bool = trigger::START_TRIG_RETRIGGERABLE;
        rw delay / set_delay / reset_delay: f64 = trigger::START_TRIG_DELAY;
        rw dig_edge_src / set_dig_edge_src / reset_dig_edge_src: String = trigger::DIG_EDGE_START_TRIG_SRC;
        rw dig_edge_edge / set_dig_edge_edge / reset_dig_edge_edge: Edge = trigger::DIG_EDGE_START_TRIG_EDGE;
        rw anlg_edge_src / set_anlg_edge_src / reset_anlg_edge_src: String = trigger::ANLG_EDGE_START_TRIG_SRC;
        rw anlg_edge_slope / set_anlg_edge_slope / reset_anlg_edge_slope: Slope = trigger::ANLG_EDGE_START_TRIG_SLOPE;
        rw anlg_edge_lvl / set_anlg_edge_lvl / reset_anlg_edge_lvl: f64 = trigger::ANLG_EDGE_START_TRIG_LVL;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReferenceTrigger<'a> {
    task: &'a TaskCore,
}

impl ReferenceTrigger<'_> {
    /// Stop a finite acquisition `pretrigger_samples` after a digital edge.
    pub fn cfg_dig_edge_ref_trig(
        &self,
        trigger_source: &str,
        pretrigger_samples: u32,
        trigger_edge: Edge,
    ) -> Result<()> {
        self.task.interpreter().cfg_dig_edge_ref_trig(
            self.task.handle()?,
            trigger_source,
            trigger_edge,
            pretrigger_samples,
        )?;
        self.task.mark_configured();
        Ok(())
    }

    pub fn cfg_anlg_edge_ref_trig(
        &self,
        trigger_source: &str,
        pretrigger_samples: u32,
        trigger_slope: Slope,
        trigger_level: f64,
    ) -> Result<()> {
        self.task.interpreter().cfg_anlg_edge_ref_trig(
            self.task.handle()?,
            trigger_source,
            trigger_slope,
            trigger_level,
            pretrigger_samples,
        )?;
        self.task.mark_configured();
        Ok(())
    }

    pub fn disable_ref_trig(&self) -> Result<()> {
        self.task.interpreter().disable_ref_trig(self.task.handle()?)
    }

    properties! {
        rw trig_type / set_trig_type / reset_trig_type: TriggerType = trigger::REF_TRIG_TYPE;
        rw pretrig_samples / set_pretrig_samples / reset_pretrig_samples: u32 = trigger::REF_TRIG_PRETRIG_SAMPLES;
        rw dig_edge_src / set_dig_edge_src / reset_dig_edge_src: String = trigger::DIG_EDGE_REF_TRIG_SRC;
        rw dig_edge_edge / set_dig_edge_edge / reset_dig_edge_edge: Edge = trigger::DIG_EDGE_REF_TRIG_EDGE;
        rw anlg_edge_src / set_anlg_edge_src / reset_anlg_edge_src: String = trigger::ANLG_EDGE_REF_TRIG_SRC;
        rw anlg_edge_slope / set_anlg_edge_slope / reset_anlg_edge_slope: Slope = trigger::ANLG_EDGE_REF_TRIG_SLOPE;
        rw anlg_edge_lvl / set_anlg_edge_lvl / reset_anlg_edge_lvl: f64 = trigger::ANLG_EDGE_REF_TRIG_LVL;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PauseTrigger<'a> {
    task: &'a TaskCore,
}

impl PauseTrigger<'_> {
    properties! {
        rw trig_type / set_trig_type / reset_trig_type: TriggerType = trigger::PAUSE_TRIG_TYPE;
        rw dig_lvl_src / set_dig_lvl_src / reset_dig_lvl_src: String = trigger::DIG_LVL_PAUSE_TRIG_SRC;
        /// Level at which the task pauses.
        rw dig_lvl_when / set_dig_lvl_when / reset_dig_lvl_when: Level = trigger::DIG_LVL_PAUSE_TRIG_WHEN;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArmStartTrigger<'a> {
    task: &'a TaskCore,
}

impl ArmStartTrigger<'_> {
    properties! {
        rw trig_type / set_trig_type / reset_trig_type: TriggerType = trigger::ARM_START_TRIG_TYPE;
        rw dig_edge_src / set_dig_edge_src / reset_dig_edge_src: String = trigger::DIG_EDGE_ARM_START_TRIG_SRC;
        rw dig_edge_edge / set_dig_edge_edge / reset_dig_edge_edge: Edge = trigger::DIG_EDGE_ARM_START_TRIG_EDGE;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdvanceTrigger<'a> {
    task: &'a TaskCore,
}

impl AdvanceTrigger<'_> {
    properties! {
        rw trig_type / set_trig_type / reset_trig_type: TriggerType = trigger::ADV_TRIG_TYPE;
        rw dig_edge_src / set_dig_edge_src / reset_dig_edge_src: String = trigger::DIG_EDGE_ADV_TRIG_SRC;
        rw dig_edge_edge / set_dig_edge_edge / reset_dig_edge_edge: Edge = trigger::DIG_EDGE_ADV_TRIG_EDGE;
    }
}
