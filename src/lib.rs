//! # Quay Content
//!
//! `quay_content` is the module content resolution and capability tracking
//! layer of the Quay runtime, a dynamic, pluggable system in which modules
//! are installed, updated, and removed while the process runs.
//!
//! Key concepts:
//!
//! 1. **Locator**: a virtual address (`module://<id>/<path>`) for content
//!    owned by a module, resolvable even when the caller's and the module's
//!    loading contexts cannot name each other's types.
//!
//! 2. **Export**: a named resource namespace a module makes available to
//!    others, with its owner and consumers hidden once the owning module's
//!    content goes stale.
//!
//! 3. **Entry enumeration**: lazy, directory-style listing over a module's
//!    flat resource-name index.
//!
//! 4. **Protection context**: the per-module delegate consulted by the
//!    permission-checking path.
//!
//! 5. **System module**: the synthetic self-module standing in for the
//!    running framework itself.
//!
//! The module registry, lifecycle state machine, and dependency resolver
//! are external collaborators reached through the traits in [`module`].

pub mod config;
pub mod entries;
pub mod error;
pub mod export;
pub mod id;
pub mod locator;
pub mod module;
pub mod protection;
pub mod system;
pub mod version;

#[cfg(test)]
mod testing;

pub use config::{ContentConfig, LocatorService, LOCATOR_SCHEME_PROP};
pub use entries::{entry_paths, EntryPaths, SEPARATOR};
pub use error::{ContentError, Error, LocatorError, Result};
pub use export::Export;
pub use id::{ContextId, ModuleId, RuntimeId};
pub use locator::{
    Connection, Connector, Locator, LocatorHandler, ModuleConnector, RuntimeContext,
    SchemeRegistry, SCHEME,
};
pub use module::{ModuleHandle, ModuleRegistry, Resolution};
pub use protection::{Permission, PolicyDecider, ProtectionContext};
pub use system::{HostResources, PersistentState, SystemModule};
pub use version::{ParseVersionError, Version};
