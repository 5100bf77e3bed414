use super::TaskCore;
use crate::attributes::{ids::timing, AttributeOwner, AttributeTarget};
use crate::constants::*;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::properties;
use std::sync::Arc;

/// Timing configuration of a task.
#[derive(Debug, Clone, Copy)]
pub struct Timing<'a> {
    task: &'a TaskCore,
}

impl<'a> Timing<'a> {
    pub(super) fn new(task: &'a TaskCore) -> Self {
        Self { task }
    }

    /// Clock the task from a sample clock.
    ///
    /// An empty `source` uses the device's onboard clock. For finite acquisitions
    /// `samps_per_chan` is the number of samples to acquire or generate; for
    /// continuous ones it sizes the buffer.
    pub fn cfg_samp_clk_timing(
        &self,
        rate: f64,
        source: &str,
        active_edge: Edge,
        sample_mode: AcquisitionType,
        samps_per_chan: u64,
    ) -> Result<()> {
        self.task.interpreter().cfg_samp_clk_timing(
            self.task.handle()?,
            source,
            rate,
            active_edge,
            sample_mode,
            samps_per_chan,
        )?;
        self.task.mark_configured();
        Ok(())
    }

    /// Timing without a sample clock, such as counter pulse trains.
    pub fn cfg_implicit_timing(
        &self,
        sample_mode: AcquisitionType,
        samps_per_chan: u64,
    ) -> Result<()> {
        self.task
            .interpreter()
            .cfg_implicit_timing(self.task.handle()?, sample_mode, samps_per_chan)?;
        self.task.mark_configured();
        Ok(())
    }

    properties! {
        rw samp_quant_samp_mode / set_samp_quant_samp_mode / reset_samp_quant_samp_mode:
            AcquisitionType = timing::SAMP_QUANT_SAMP_MODE;
        rw samp_quant_samp_per_chan / set_samp_quant_samp_per_chan / reset_samp_quant_samp_per_chan:
            u64 = timing::SAMP_QUANT_SAMP_PER_CHAN;
        rw samp_timing_type / set_samp_timing_type / reset_samp_timing_type:
            SampleTimingType = timing::SAMP_TIMING_TYPE;
        /// Sample clock rate in samples per channel per second.
        rw samp_clk_rate / set_samp_clk_rate / reset_samp_clk_rate: f64 = timing::SAMP_CLK_RATE;
        /// Fastest sample clock rate the current configuration allows.
        ro samp_clk_max_rate: f64 = timing::SAMP_CLK_MAX_RATE;
        rw samp_clk_src / set_samp_clk_src / reset_samp_clk_src: String = timing::SAMP_CLK_SRC;
        rw samp_clk_active_edge / set_samp_clk_active_edge / reset_samp_clk_active_edge:
            Edge = timing::SAMP_CLK_ACTIVE_EDGE;
        rw samp_clk_timebase_div / set_samp_clk_timebase_div / reset_samp_clk_timebase_div:
            u32 = timing::SAMP_CLK_TIMEBASE_DIV;
        ro samp_clk_term: String = timing::SAMP_CLK_TERM;
        rw ai_conv_rate / set_ai_conv_rate / reset_ai_conv_rate: f64 = timing::AI_CONV_RATE;
        /// Terminal of the reference clock the device phase-locks to.
        rw ref_clk_src / set_ref_clk_src / reset_ref_clk_src: String = timing::REF_CLK_SRC;
        rw ref_clk_rate / set_ref_clk_rate / reset_ref_clk_rate: f64 = timing::REF_CLK_RATE;
    }
}

impl AttributeOwner for Timing<'_> {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        self.task.scoped_context(AttributeTarget::Timing)
    }
}
