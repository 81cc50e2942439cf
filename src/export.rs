//! Exported capability bookkeeping.
//!
//! An [`Export`] describes one namespace a module makes available to other
//! modules: who owns it, who consumes it, at which version, and whether the
//! owning content is pending removal. The export's identity and owner are
//! fixed at construction; liveness is re-checked against the registry on
//! every query.

use std::sync::Arc;
use std::sync::OnceLock;

use crate::id::ModuleId;
use crate::module::{ModuleHandle, ModuleRegistry, Resolution};
use crate::version::Version;

/// A named resource namespace exported by a module.
///
/// The export object persists until its holder drops it; staleness of the
/// owning module hides the owner and consumers but never deletes or
/// resurrects the export itself.
pub struct Export {
    registry: Arc<dyn ModuleRegistry>,
    owner: Arc<dyn ModuleHandle>,
    name: String,
    version: Version,
    rendered_version: OnceLock<String>,
}

impl Export {
    /// Create an export. An absent version is recorded as
    /// [`Version::EMPTY`], never as an optional value.
    pub fn new(
        registry: Arc<dyn ModuleRegistry>,
        owner: Arc<dyn ModuleHandle>,
        name: impl Into<String>,
        version: Option<Version>,
    ) -> Self {
        Self {
            registry,
            owner,
            name: name.into(),
            version: version.unwrap_or(Version::EMPTY),
            rendered_version: OnceLock::new(),
        }
    }

    /// The exported namespace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the owning module.
    pub fn owner_id(&self) -> ModuleId {
        self.owner.id()
    }

    /// The export's version; [`Version::EMPTY`] when none was declared.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The version rendered as text, e.g. `"0.0.0"` for the sentinel.
    /// Computed once and cached; an export's version never changes.
    pub fn version_string(&self) -> &str {
        self.rendered_version
            .get_or_init(|| self.version.to_string())
    }

    /// The owning module, hidden once the module is stale.
    ///
    /// `Stale` is deliberate visibility hiding, not an error; `NotFound`
    /// means the registry has forgotten the identity entirely.
    pub fn owner(&self) -> Resolution<Arc<dyn ModuleHandle>> {
        match self.registry.module(&self.owner.id()) {
            Some(module) if module.is_stale() => Resolution::Stale,
            Some(module) => Resolution::Found(module),
            None => Resolution::NotFound,
        }
    }

    /// Modules currently importing this namespace, under the same staleness
    /// rule as [`Export::owner`].
    pub fn consumers(&self) -> Resolution<Vec<Arc<dyn ModuleHandle>>> {
        self.owner()
            .map(|_| self.registry.importers_of(&self.name))
    }

    /// Whether the owning module's superseded content is still pinned by
    /// active consumers. Answered from the handle held at construction, so
    /// it stays answerable even after the registry drops the module.
    pub fn is_removal_pending(&self) -> bool {
        self.owner.is_removal_pending()
    }
}

impl std::fmt::Debug for Export {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Export")
            .field("owner", &self.owner.id())
            .field("name", &self.name)
            .field("version", &self.version)
            .finish()
    }
}

impl std::fmt::Display for Export {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}; version={}", self.name, self.version_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestModule, TestRegistry};

    fn export_for(registry: &Arc<TestRegistry>, module: &Arc<TestModule>) -> Export {
        Export::new(
            registry.clone() as Arc<dyn ModuleRegistry>,
            module.clone() as Arc<dyn ModuleHandle>,
            "org.sample.api",
            Some(Version::new(1, 4, 0)),
        )
    }

    #[test]
    fn test_owner_visible_while_live() {
        let registry = Arc::new(TestRegistry::new());
        let module = registry.install(TestModule::new("file:sample.jar"));
        let export = export_for(&registry, &module);

        let owner = export.owner();
        assert!(owner.is_found());
        assert_eq!(owner.found().unwrap().id(), module.id());
    }

    #[test]
    fn test_stale_owner_hidden_but_export_persists() {
        let registry = Arc::new(TestRegistry::new());
        let module = registry.install(TestModule::new("file:sample.jar"));
        let export = export_for(&registry, &module);

        module.set_stale(true);
        assert!(export.owner().is_stale());
        assert!(export.consumers().is_stale());
        // The export itself is untouched by staleness.
        assert_eq!(export.name(), "org.sample.api");
        assert_eq!(export.version_string(), "1.4.0");
    }

    #[test]
    fn test_forgotten_owner_is_not_found() {
        let registry = Arc::new(TestRegistry::new());
        let module = registry.install(TestModule::new("file:sample.jar"));
        let export = export_for(&registry, &module);

        registry.uninstall(&module.id());
        assert!(matches!(export.owner(), Resolution::NotFound));
    }

    #[test]
    fn test_unversioned_export_reports_empty_sentinel() {
        let registry = Arc::new(TestRegistry::new());
        let module = registry.install(TestModule::new("file:sample.jar"));
        let export = Export::new(
            registry.clone() as Arc<dyn ModuleRegistry>,
            module as Arc<dyn ModuleHandle>,
            "org.sample.util",
            None,
        );

        assert_eq!(*export.version(), Version::EMPTY);
        assert_eq!(export.version_string(), "0.0.0");
        // Cached render returns the same slice on every call.
        assert!(std::ptr::eq(export.version_string(), export.version_string()));
    }

    #[test]
    fn test_consumers_come_from_reverse_index() {
        let registry = Arc::new(TestRegistry::new());
        let owner = registry.install(TestModule::new("file:owner.jar"));
        let consumer = registry.install(TestModule::new("file:consumer.jar"));
        registry.record_import(&consumer.id(), "org.sample.api");

        let export = export_for(&registry, &owner);
        let consumers = export.consumers().found().unwrap();
        assert_eq!(consumers.len(), 1);
        assert_eq!(consumers[0].id(), consumer.id());
    }

    #[test]
    fn test_removal_pending_independent_of_staleness() {
        let registry = Arc::new(TestRegistry::new());
        let module = registry.install(TestModule::new("file:sample.jar"));
        let export = export_for(&registry, &module);

        module.set_removal_pending(true);
        assert!(export.is_removal_pending());
        assert!(export.owner().is_found());

        module.set_stale(true);
        assert!(export.is_removal_pending());
        assert!(export.owner().is_stale());
    }
}
