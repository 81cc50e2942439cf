//! Interfaces to the module registry owned by the lifecycle manager.
//!
//! This layer never owns module state. It reads a module's identity, its
//! live/stale flag, its flat resource-name index, and the reverse import
//! index through the traits defined here; the lifecycle state machine,
//! dependency resolver, and archive store live elsewhere.

use std::io::Read;
use std::sync::Arc;

use crate::id::ModuleId;

/// A handle to an installed module, owned by the external lifecycle manager.
///
/// `is_stale` and `is_removal_pending` are independent flags: a stale module
/// whose content is still referenced by active consumers reports both, and
/// no precedence between them is defined.
pub trait ModuleHandle: Send + Sync {
    /// Stable identity of the module.
    fn id(&self) -> ModuleId;

    /// Location string the module was installed from.
    fn location(&self) -> &str;

    /// Whether the module's content has been superseded or removed.
    fn is_stale(&self) -> bool;

    /// Whether superseded content is still pinned by active consumers.
    fn is_removal_pending(&self) -> bool;

    /// The module's flat resource-name index, in archive order. Directory
    /// entries end with `/`; hierarchy is inferred from name prefixes only.
    fn entry_names(&self) -> Vec<String>;

    /// Open a content entry by exact name. `Ok(None)` means the entry does
    /// not exist; an `Err` is a genuine I/O failure.
    fn open_entry(&self, path: &str) -> std::io::Result<Option<Box<dyn Read + Send>>>;
}

/// Read access to the registry of installed modules.
pub trait ModuleRegistry: Send + Sync {
    /// Look up a module by identity. `None` means the registry no longer
    /// knows the id at all, which is distinct from the module being stale.
    fn module(&self, id: &ModuleId) -> Option<Arc<dyn ModuleHandle>>;

    /// Modules currently importing the given exported namespace.
    fn importers_of(&self, namespace: &str) -> Vec<Arc<dyn ModuleHandle>>;
}

/// Three-way outcome of a registry-backed lookup.
///
/// Distinguishes a module that is known but stale from one the registry has
/// forgotten entirely, so callers never conflate the two.
#[derive(Debug)]
pub enum Resolution<T> {
    /// The module is live; here is the result.
    Found(T),
    /// The module is known but its content is stale.
    Stale,
    /// The registry no longer knows the identity.
    NotFound,
}

impl<T> Resolution<T> {
    /// Collapse to an optional value, dropping the stale/absent distinction.
    pub fn found(self) -> Option<T> {
        match self {
            Resolution::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Resolution::Stale)
    }

    /// Map the found value, preserving the other variants.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Found(value) => Resolution::Found(f(value)),
            Resolution::Stale => Resolution::Stale,
            Resolution::NotFound => Resolution::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_found() {
        let r = Resolution::Found(7);
        assert!(r.is_found());
        assert_eq!(r.map(|v| v * 2).found(), Some(14));
    }

    #[test]
    fn test_resolution_stale_is_not_absent() {
        let stale: Resolution<i32> = Resolution::Stale;
        let absent: Resolution<i32> = Resolution::NotFound;
        assert!(stale.is_stale());
        assert!(!absent.is_stale());
        assert!(stale.found().is_none());
        assert!(absent.found().is_none());
    }
}
