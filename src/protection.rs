//! Per-module protection contexts for the permission-checking path.
//!
//! A [`ProtectionContext`] carries no permissions of its own; it is a pure
//! delegate whose identity is the owning module's identity. Every check is
//! forwarded to the runtime's centralized [`PolicyDecider`].

use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use crate::id::ModuleId;

/// A security-sensitive operation being checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permission {
    /// What kind of access, e.g. `"content.read"` or `"service.publish"`.
    pub kind: String,
    /// What the access targets, e.g. an entry path or namespace name.
    pub target: String,
}

impl Permission {
    pub fn new(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: target.into(),
        }
    }
}

/// The runtime's centralized policy evaluator.
///
/// `direct` discriminates framework-internal checks (`true`) from checks
/// made on behalf of externally-observable operations (`false`); the
/// runtime may apply different rules to each.
pub trait PolicyDecider: Send + Sync {
    fn implies(&self, subject: &ProtectionContext, permission: &Permission, direct: bool) -> bool;
}

/// Security delegate for one module.
///
/// Holds the decider weakly: the protection context must not keep a stopped
/// runtime alive. Independently constructed contexts for the same module
/// compare equal and hash identically, because the security subsystem may
/// build several and must treat them as interchangeable. Security maps that
/// only need a key should use [`ProtectionContext::module_id`] directly.
#[derive(Clone)]
pub struct ProtectionContext {
    module: ModuleId,
    decider: Weak<dyn PolicyDecider>,
}

impl ProtectionContext {
    pub fn new(module: ModuleId, decider: &Arc<dyn PolicyDecider>) -> Self {
        Self {
            module,
            decider: Arc::downgrade(decider),
        }
    }

    /// Identity of the module this context stands for.
    pub fn module_id(&self) -> ModuleId {
        self.module
    }

    /// Whether the centralized policy grants `permission` to this module.
    /// Evaluated with `direct = false`; a runtime that has already been
    /// dropped denies everything.
    pub fn implies(&self, permission: &Permission) -> bool {
        match self.decider.upgrade() {
            Some(decider) => decider.implies(self, permission, false),
            None => false,
        }
    }
}

impl PartialEq for ProtectionContext {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module
    }
}

impl Eq for ProtectionContext {}

impl Hash for ProtectionContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.module.hash(state);
    }
}

impl std::fmt::Debug for ProtectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectionContext")
            .field("module", &self.module)
            .finish()
    }
}
