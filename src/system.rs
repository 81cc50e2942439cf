//! The synthetic self-module representing the running framework.
//!
//! When inspection or content APIs are pointed at the framework itself
//! there is no installed module to answer for it. [`SystemModule`] stands
//! in: content lookups delegate to whatever loading context embeds the
//! framework implementation, never to any installed module's private
//! content. Its lifecycle is bound to the process, so persistent-state
//! accessors always report active and the mutators do nothing.

use std::io::Read;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::id::ModuleId;
use crate::module::ModuleHandle;
use crate::version::Version;

/// Resources of the loading context that embeds the framework itself.
pub trait HostResources: Send + Sync {
    /// Open a host resource by name; `None` when the host has no such
    /// resource. This is an absent answer, not an error.
    fn open_resource(&self, name: &str) -> Option<Box<dyn Read + Send>>;
}

/// Persisted lifecycle record of a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistentState {
    Installed,
    Active,
    Uninstalled,
}

/// The framework's own module representation.
pub struct SystemModule {
    version: Version,
    host: Arc<dyn HostResources>,
    start_level: Mutex<u32>,
}

impl SystemModule {
    /// Create the self-module for a framework at the given version.
    pub fn new(version: Version, host: Arc<dyn HostResources>) -> Self {
        Self {
            version,
            host,
            start_level: Mutex::new(0),
        }
    }

    /// Framework version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The self-module has no archive behind it.
    pub fn archive(&self) -> Option<Box<dyn Read + Send>> {
        None
    }

    /// Native library lookups never resolve against the self-module.
    pub fn native_library(&self, _name: &str) -> Option<String> {
        None
    }

    /// Current start level. Held only in memory; lost on process restart.
    pub fn start_level(&self) -> u32 {
        *self.start_level.lock()
    }

    pub fn set_start_level(&self, level: u32) {
        *self.start_level.lock() = level;
    }

    /// The self-module is active for as long as the process runs.
    pub fn persistent_state(&self) -> PersistentState {
        PersistentState::Active
    }

    /// Persistence mutators are no-ops; there is no record to update.
    pub fn set_persistent_state(&self, _state: PersistentState) {}

    pub fn save(&self) {}
}

impl ModuleHandle for SystemModule {
    fn id(&self) -> ModuleId {
        ModuleId::nil()
    }

    fn location(&self) -> &str {
        "System Module"
    }

    fn is_stale(&self) -> bool {
        false
    }

    fn is_removal_pending(&self) -> bool {
        false
    }

    fn entry_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn open_entry(&self, path: &str) -> std::io::Result<Option<Box<dyn Read + Send>>> {
        Ok(self.host.open_resource(path))
    }
}
