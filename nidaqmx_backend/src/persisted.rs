//! Entities saved in the driver's configuration store.

use crate::attributes::{ids, AttributeOwner, AttributeTarget};
use crate::collections::Named;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::properties;
use crate::task::Task;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

macro_rules! persisted_entity {
    ($(#[$meta:meta])* $name:ident, $target:ident, $ids:ident, $delete:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            name: String,
            interpreter: Arc<dyn Interpreter>,
        }

        impl $name {
            pub(crate) fn new(name: String, interpreter: Arc<dyn Interpreter>) -> Self {
                Self { name, interpreter }
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn interpreter(&self) -> &Arc<dyn Interpreter> {
                &self.interpreter
            }

            /// Remove the entity from the configuration store.
            pub fn delete(self) -> Result<()> {
                self.interpreter.$delete(&self.name)?;
                debug!("Deleted {} '{}'", stringify!($name), self.name);
                Ok(())
            }

            properties! {
                ro author: String = ids::$ids::AUTHOR;
                ro allow_interactive_editing: bool = ids::$ids::ALLOW_INTERACTIVE_EDITING;
                ro allow_interactive_deletion: bool = ids::$ids::ALLOW_INTERACTIVE_DELETION;
            }
        }

        impl AttributeOwner for $name {
            fn attribute_context(&self) -> Result<(Arc<dyn Interpreter>, AttributeTarget)> {
                Ok((
                    self.interpreter.clone(),
                    AttributeTarget::$target(self.name.clone()),
                ))
            }
        }

        impl Named for $name {
            fn name(&self) -> &str {
                &self.name
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("name", &self.name)
                    .finish()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.name.hash(state);
            }
        }
    };
}

persisted_entity!(
    /// A global virtual channel saved in the configuration store.
    PersistedChannel,
    PersistedChannel,
    persisted_channel,
    delete_saved_global_chan
);
persisted_entity!(
    /// A custom scale saved in the configuration store.
    PersistedScale,
    PersistedScale,
    persisted_scale,
    delete_saved_scale
);
persisted_entity!(
    /// A task saved in the configuration store.
    PersistedTask,
    PersistedTask,
    persisted_task,
    delete_saved_task
);

impl PersistedTask {
    /// Load the saved task. The returned task owns a new handle.
    pub fn load(&self) -> Result<Task> {
        Task::load(self.interpreter.clone(), &self.name)
    }
}
