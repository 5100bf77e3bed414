use super::TaskCore;
use crate::attributes::{ids, AttributeOwner, AttributeTarget};
use crate::constants::*;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::properties;
use std::sync::Arc;

/// Write-side properties and buffer of a task.
#[derive(Debug, Clone, Copy)]
pub struct OutStream<'a> {
    task: &'a TaskCore,
}

struct OutputBuffer<'a>(&'a TaskCore);

impl AttributeOwner for OutputBuffer<'_> {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        self.0.scoped_context(AttributeTarget::Buffer)
    }
}

impl<'a> OutStream<'a> {
    pub(super) fn new(task: &'a TaskCore) -> Self {
        Self { task }
    }

    /// Size the output buffer, in samples per channel. Zero disables buffering.
    pub fn cfg_output_buffer(&self, samps_per_chan: u32) -> Result<()> {
        self.task
            .interpreter()
            .cfg_output_buffer(self.task.handle()?, samps_per_chan)
    }

    pub fn output_buf_size(&self) -> Result<u32> {
        OutputBuffer(self.task).get_attribute(ids::buffer::OUTPUT_BUF_SIZE)
    }

    pub fn set_output_buf_size(&self, samps_per_chan: u32) -> Result<()> {
        OutputBuffer(self.task).set_attribute(ids::buffer::OUTPUT_BUF_SIZE, samps_per_chan)
    }

    pub fn output_onbrd_buf_size(&self) -> Result<u32> {
        OutputBuffer(self.task).get_attribute(ids::buffer::OUTPUT_ONBRD_BUF_SIZE)
    }

    properties! {
        rw regen_mode / set_regen_mode / reset_regen_mode: RegenerationMode = ids::write::REGEN_MODE;
        ro curr_write_pos: u64 = ids::write::CURR_WRITE_POS;
        ro space_avail: u32 = ids::write::SPACE_AVAIL;
        ro total_samp_per_chan_generated: u64 = ids::write::TOTAL_SAMP_PER_CHAN_GENERATED;
        ro num_chans: u32 = ids::write::NUM_CHANS;
        ro do_num_booleans_per_chan: u32 = ids::write::DIGITAL_LINES_BYTES_PER_CHAN;
        rw offset / set_offset / reset_offset: i32 = ids::write::OFFSET;
    }
}

impl AttributeOwner for OutStream<'_> {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        self.task.scoped_context(AttributeTarget::Write)
    }
}
