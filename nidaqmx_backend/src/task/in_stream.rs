use super::TaskCore;
use crate::attributes::{ids, AttributeOwner, AttributeTarget};
use crate::constants::*;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::properties;
use std::sync::Arc;

/// Read-side properties and buffer of a task.
#[derive(Debug, Clone, Copy)]
pub struct InStream<'a> {
    task: &'a TaskCore,
}

struct InputBuffer<'a>(&'a TaskCore);

impl AttributeOwner for InputBuffer<'_> {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        self.0.scoped_context(AttributeTarget::Buffer)
    }
}

impl<'a> InStream<'a> {
    pub(super) fn new(task: &'a TaskCore) -> Self {
        Self { task }
    }

    /// Size the input buffer, in samples per channel.
    pub fn cfg_input_buffer(&self, samps_per_chan: u32) -> Result<()> {
        self.task
            .interpreter()
            .cfg_input_buffer(self.task.handle()?, samps_per_chan)
    }

    pub fn input_buf_size(&self) -> Result<u32> {
        InputBuffer(self.task).get_attribute(ids::buffer::INPUT_BUF_SIZE)
    }

    pub fn set_input_buf_size(&self, samps_per_chan: u32) -> Result<()> {
        InputBuffer(self.task).set_attribute(ids::buffer::INPUT_BUF_SIZE, samps_per_chan)
    }

    pub fn input_onbrd_buf_size(&self) -> Result<u32> {
        InputBuffer(self.task).get_attribute(ids::buffer::INPUT_ONBRD_BUF_SIZE)
    }

    properties! {
        /// Samples per channel in the buffer that have not been read yet.
        ro avail_samp_per_chan: u32 = ids::read::AVAIL_SAMP_PER_CHAN;
        ro curr_read_pos: u64 = ids::read::CURR_READ_POS;
        ro total_samp_per_chan_acquired: u64 = ids::read::TOTAL_SAMP_PER_CHAN_ACQUIRED;
        rw relative_to / set_relative_to / reset_relative_to: ReadRelativeTo = ids::read::RELATIVE_TO;
        rw offset / set_offset / reset_offset: i32 = ids::read::OFFSET;
        rw over_write / set_over_write / reset_over_write: OverwriteMode = ids::read::OVER_WRITE;
        /// Whether finite reads of "all available" return what is there instead of waiting for every sample.
        rw read_all_avail_samp / set_read_all_avail_samp / reset_read_all_avail_samp: bool = ids::read::READ_ALL_AVAIL_SAMP;
        rw auto_start / set_auto_start / reset_auto_start: bool = ids::read::AUTO_START;
        rw channels_to_read / set_channels_to_read / reset_channels_to_read: Vec<String> = ids::read::CHANNELS_TO_READ;
        ro num_chans: u32 = ids::read::NUM_CHANS;
        ro di_num_booleans_per_chan: u32 = ids::read::DIGITAL_LINES_BYTES_PER_CHAN;
    }
}

impl AttributeOwner for InStream<'_> {
    fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
        self.task.scoped_context(AttributeTarget::Read)
    }
}
