//! Event callback slots.
//!
//! The driver calls back on threads it owns. Each registered callback lives in
//! a heap-allocated [`EventSlot`] shared between the task's registry and the
//! interpreter, so its address stays stable for as long as the driver may use it.
//! Unregistering moves the slot to the task's retired list; it is only dropped
//! when the task is cleared.
//!
//! The driver only carries a bare context pointer. Dispatch goes through
//! [`EventSlot::retain_raw`], so a callback that clears its own task keeps its
//! slot alive until it returns.

use crate::constants::{DaqmxEnum, EveryNSamplesEventType, Signal};
use crate::error::{DaqError, Result};
use crate::task::TaskCore;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{trace, warn};

pub type EveryNSamplesCallback =
    Box<dyn FnMut(&TaskCore, EveryNSamplesEventType, u32) + Send + 'static>;
pub type DoneCallback = Box<dyn FnMut(&TaskCore, Result<()>) + Send + 'static>;
pub type SignalCallback = Box<dyn FnMut(&TaskCore, Signal) + Send + 'static>;

/// Which registration slot of a task a callback occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    EveryNSamplesAcquiredIntoBuffer,
    EveryNSamplesTransferredFromBuffer,
    Done,
    Signal,
}

impl From<EveryNSamplesEventType> for EventKind {
    fn from(event_type: EveryNSamplesEventType) -> Self {
        match event_type {
            EveryNSamplesEventType::AcquiredIntoBuffer => Self::EveryNSamplesAcquiredIntoBuffer,
            EveryNSamplesEventType::TransferredFromBuffer => {
                Self::EveryNSamplesTransferredFromBuffer
            }
        }
    }
}

enum EventCallback {
    EveryNSamples(EveryNSamplesCallback),
    Done(DoneCallback),
    Signal(SignalCallback),
}

pub struct EventSlot {
    kind: EventKind,
    task: Weak<TaskCore>,
    callback: Mutex<EventCallback>,
}

impl fmt::Debug for EventSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSlot")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl EventSlot {
    pub(crate) fn every_n_samples(
        task: Weak<TaskCore>,
        event_type: EveryNSamplesEventType,
        callback: EveryNSamplesCallback,
    ) -> Self {
        Self {
            kind: event_type.into(),
            task,
            callback: Mutex::new(EventCallback::EveryNSamples(callback)),
        }
    }

    pub(crate) fn done(task: Weak<TaskCore>, callback: DoneCallback) -> Self {
        Self {
            kind: EventKind::Done,
            task,
            callback: Mutex::new(EventCallback::Done(callback)),
        }
    }

    pub(crate) fn signal(task: Weak<TaskCore>, callback: SignalCallback) -> Self {
        Self {
            kind: EventKind::Signal,
            task,
            callback: Mutex::new(EventCallback::Signal(callback)),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Take a strong reference to the slot behind a driver context pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`Arc::as_ptr`] on a slot that is still owned
    /// elsewhere, i.e. still registered with its task.
    pub unsafe fn retain_raw(ptr: *const EventSlot) -> Arc<EventSlot> {
        Arc::increment_strong_count(ptr);
        Arc::from_raw(ptr)
    }

    /// Deliver an every-N-samples event with the driver's raw event type.
    ///
    /// Returns the status handed back to the driver, which is always 0.
    pub fn fire_every_n_samples(&self, event_type: i32, num_samples: u32) -> i32 {
        let Some(task) = self.task.upgrade() else {
            trace!("every-N-samples event for a dropped task ignored");
            return 0;
        };
        let Some(event_type) = EveryNSamplesEventType::from_raw(event_type) else {
            warn!("Ignoring every-N-samples event with unknown type {event_type}");
            return 0;
        };
        match &mut *self.callback.lock() {
            EventCallback::EveryNSamples(callback) => callback(&task, event_type, num_samples),
            _ => warn!("Every-N-samples event delivered to a {:?} slot", self.kind),
        }
        0
    }

    /// Deliver a done event with the driver's status code.
    pub fn fire_done(&self, status: i32) -> i32 {
        let Some(task) = self.task.upgrade() else {
            trace!("done event for a dropped task ignored");
            return 0;
        };
        let status = if status < 0 {
            Err(DaqError::from_status(
                status,
                format!("Task '{}' stopped with an error", task.name()),
                None,
            ))
        } else {
            Ok(())
        };
        match &mut *self.callback.lock() {
            EventCallback::Done(callback) => callback(&task, status),
            _ => warn!("Done event delivered to a {:?} slot", self.kind),
        }
        0
    }

    /// Deliver a signal event with the driver's raw signal ID.
    pub fn fire_signal(&self, signal_id: i32) -> i32 {
        let Some(task) = self.task.upgrade() else {
            trace!("signal event for a dropped task ignored");
            return 0;
        };
        let Some(signal) = Signal::from_raw(signal_id) else {
            warn!("Ignoring signal event with unknown signal ID {signal_id}");
            return 0;
        };
        match &mut *self.callback.lock() {
            EventCallback::Signal(callback) => callback(&task, signal),
            _ => warn!("Signal event delivered to a {:?} slot", self.kind),
        }
        0
    }
}
