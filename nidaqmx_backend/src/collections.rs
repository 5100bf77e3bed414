//! Live, ordered views over named driver entities.
//!
//! Every collection is backed by one string-valued attribute that lists its
//! members. Nothing is cached: each call re-queries the interpreter, so
//! channels, devices or saved tasks added behind the binding's back show up on
//! the next access.
//!
//! The shared contract lives in the [`Collection`] trait:
//!
//! | Access | Method |
//! |---|---|
//! | length | [`Collection::len`] |
//! | by position | [`Collection::get`] |
//! | by position range | [`Collection::slice`] |
//! | by channel string, e.g. `"Dev1/ai0:3"` | [`Collection::by_name`] |
//! | iteration, forwards or reversed | [`Collection::iter`] |
//! | membership | [`Collection::contains_name`], [`Collection::contains`] |
//!
//! Entities produced by a collection share its interpreter.

use crate::attributes::{ids, Attribute, AttributeTarget, AttributeValue, ReadOnly};
use crate::channel_string::unflatten_channel_string;
use crate::device::Device;
use crate::error::{DaqError, Result};
use crate::interpreter::Interpreter;
use crate::persisted::{PersistedChannel, PersistedScale, PersistedTask};
use crate::physical_channel::PhysicalChannel;
use crate::utils::same_interpreter;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

/// Anything identified by a driver name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Result of looking up a channel string in a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> Selection<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(item) => vec![item],
            Self::Multiple(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiple(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait Collection {
    type Item: Named;

    /// Member names, freshly queried, in driver order.
    fn names(&self) -> Result<Vec<String>>;

    /// Build the entity for one member name.
    fn item(&self, name: String) -> Self::Item;

    /// Turn a user-supplied name into the form the driver lists.
    fn qualify(&self, name: &str) -> String {
        name.to_string()
    }

    fn len(&self) -> Result<usize> {
        Ok(self.names()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        let mut names = self.names()?;
        if index >= names.len() {
            return Err(DaqError::invalid_argument(format!(
                "Index {index} is out of range for a collection of {} items",
                names.len()
            )));
        }
        Ok(self.item(names.swap_remove(index)))
    }

    /// Members in `range`, clamped to the collection's length.
    fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Vec<Self::Item>> {
        let names = self.names()?;
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => names.len(),
        }
        .min(names.len());
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(end);
        Ok(names
            .into_iter()
            .skip(start)
            .take(end - start)
            .map(|name| self.item(name))
            .collect())
    }

    /// Look up members by channel string, qualifying each name.
    fn by_name(&self, names: &str) -> Result<Selection<Self::Item>> {
        let mut items: Vec<Self::Item> = unflatten_channel_string(names)?
            .iter()
            .map(|name| self.item(self.qualify(name)))
            .collect();
        match items.len() {
            0 => Err(DaqError::invalid_argument(format!(
                "'{names}' does not name any channel"
            ))),
            1 => Ok(Selection::Single(items.remove(0))),
            _ => Ok(Selection::Multiple(items)),
        }
    }

    /// A snapshot of every member, in order.
    fn items(&self) -> Result<Vec<Self::Item>> {
        Ok(self
            .names()?
            .into_iter()
            .map(|name| self.item(name))
            .collect())
    }

    /// Iterate a fresh snapshot. Reverse with `.rev()`.
    fn iter(&self) -> Result<std::vec::IntoIter<Self::Item>> {
        Ok(self.items()?.into_iter())
    }

    /// Whether every channel `names` describes is a member.
    fn contains_name(&self, names: &str) -> Result<bool> {
        let members = self.names()?;
        let wanted = unflatten_channel_string(names)?;
        Ok(!wanted.is_empty()
            && wanted
                .iter()
                .all(|name| members.contains(&self.qualify(name))))
    }

    fn contains(&self, item: &Self::Item) -> Result<bool> {
        Ok(self.names()?.iter().any(|name| name == item.name()))
    }
}

fn query<T: AttributeValue>(
    interpreter: &Arc<dyn Interpreter>,
    target: AttributeTarget,
    attribute: Attribute<T, ReadOnly>,
) -> Result<T> {
    T::read(interpreter.as_ref(), &target, attribute.id)
}

/// Which physical-channel list of a device a collection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalChannelKind {
    AnalogInput,
    AnalogOutput,
    CounterInput,
    CounterOutput,
    DigitalInputLines,
    DigitalInputPorts,
    DigitalOutputLines,
    DigitalOutputPorts,
}

impl PhysicalChannelKind {
    fn attribute(self) -> Attribute<Vec<String>, ReadOnly> {
        match self {
            Self::AnalogInput => ids::device::AI_PHYSICAL_CHANS,
            Self::AnalogOutput => ids::device::AO_PHYSICAL_CHANS,
            Self::CounterInput => ids::device::CI_PHYSICAL_CHANS,
            Self::CounterOutput => ids::device::CO_PHYSICAL_CHANS,
            Self::DigitalInputLines => ids::device::DI_LINES,
            Self::DigitalInputPorts => ids::device::DI_PORTS,
            Self::DigitalOutputLines => ids::device::DO_LINES,
            Self::DigitalOutputPorts => ids::device::DO_PORTS,
        }
    }
}

/// The physical channels of one kind on a device.
///
/// Names are fully qualified (`Dev1/ai0`); lookups accept the bare terminal
/// name and qualify it with the device name.
#[derive(Clone)]
pub struct PhysicalChannelCollection {
    device_name: String,
    kind: PhysicalChannelKind,
    interpreter: Arc<dyn Interpreter>,
}

impl PhysicalChannelCollection {
    pub(crate) fn new(
        device_name: String,
        kind: PhysicalChannelKind,
        interpreter: Arc<dyn Interpreter>,
    ) -> Self {
        Self {
            device_name,
            kind,
            interpreter,
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn kind(&self) -> PhysicalChannelKind {
        self.kind
    }
}

impl Collection for PhysicalChannelCollection {
    type Item = PhysicalChannel;

    fn names(&self) -> Result<Vec<String>> {
        query(
            &self.interpreter,
            AttributeTarget::Device(self.device_name.clone()),
            self.kind.attribute(),
        )
    }

    fn item(&self, name: String) -> PhysicalChannel {
        PhysicalChannel::new(name, self.interpreter.clone())
    }

    fn qualify(&self, name: &str) -> String {
        if name.contains('/') {
            name.to_string()
        } else {
            format!("{}/{name}", self.device_name)
        }
    }
}

impl fmt::Debug for PhysicalChannelCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalChannelCollection")
            .field("device_name", &self.device_name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl PartialEq for PhysicalChannelCollection {
    fn eq(&self, other: &Self) -> bool {
        self.device_name == other.device_name && self.kind == other.kind
    }
}

macro_rules! system_collection {
    ($(#[$meta:meta])* $name:ident => $item:ident, $attr:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            interpreter: Arc<dyn Interpreter>,
        }

        impl $name {
            pub(crate) fn new(interpreter: Arc<dyn Interpreter>) -> Self {
                Self { interpreter }
            }
        }

        impl Collection for $name {
            type Item = $item;

            fn names(&self) -> Result<Vec<String>> {
                query(&self.interpreter, AttributeTarget::System, $attr)
            }

            fn item(&self, name: String) -> $item {
                $item::new(name, self.interpreter.clone())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }

        /// Equal when backed by the same interpreter session.
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                same_interpreter(&self.interpreter, &other.interpreter)
            }
        }
    };
}

system_collection!(
    /// Every device the driver knows.
    DeviceCollection => Device, ids::system::DEV_NAMES
);
system_collection!(
    /// Global channels saved in the configuration store.
    PersistedChannelCollection => PersistedChannel, ids::system::GLOBAL_CHANS
);
system_collection!(
    /// Custom scales saved in the configuration store.
    PersistedScaleCollection => PersistedScale, ids::system::SCALES
);
system_collection!(
    /// Tasks saved in the configuration store.
    PersistedTaskCollection => PersistedTask, ids::system::TASKS
);
