// Helpers shared across the object model: bitfield enumerations and interpreter identity.
use crate::constants::{DaqmxEnum, TerminalConfiguration, TriggerUsage};
use crate::interpreter::Interpreter;
use std::sync::Arc;

/// An enumeration whose members the driver also reports packed into a bitfield.
pub trait BitfieldEnum: DaqmxEnum + 'static {
    /// Each member with its bit, in reporting order.
    const BITS: &'static [(Self, i32)];
}

impl BitfieldEnum for TriggerUsage {
    const BITS: &'static [(Self, i32)] = &[
        (TriggerUsage::Advance, 1 << 0),
        (TriggerUsage::Pause, 1 << 1),
        (TriggerUsage::Reference, 1 << 2),
        (TriggerUsage::Start, 1 << 3),
        (TriggerUsage::Handshake, 1 << 4),
        (TriggerUsage::ArmStart, 1 << 5),
    ];
}

impl BitfieldEnum for TerminalConfiguration {
    const BITS: &'static [(Self, i32)] = &[
        (TerminalConfiguration::Rse, 1 << 0),
        (TerminalConfiguration::Nrse, 1 << 1),
        (TerminalConfiguration::Differential, 1 << 2),
        (TerminalConfiguration::PseudoDifferential, 1 << 3),
    ];
}

/// Members whose bit is set, in declaration order. Unknown bits are ignored.
pub fn enum_bitfield_to_list<E: BitfieldEnum>(bitfield: i32) -> Vec<E> {
    E::BITS
        .iter()
        .filter(|(_, bit)| bitfield & bit != 0)
        .map(|(member, _)| *member)
        .collect()
}

pub fn enum_list_to_bitfield<E: BitfieldEnum + PartialEq>(members: &[E]) -> i32 {
    E::BITS
        .iter()
        .filter(|(member, _)| members.contains(member))
        .fold(0, |acc, (_, bit)| acc | bit)
}

/// Whether two handles point at the same interpreter session.
pub(crate) fn same_interpreter(a: &Arc<dyn Interpreter>, b: &Arc<dyn Interpreter>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
