//! In-memory module registry used by unit tests.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::id::ModuleId;
use crate::module::{ModuleHandle, ModuleRegistry};

pub struct TestModule {
    id: ModuleId,
    location: String,
    stale: AtomicBool,
    removal_pending: AtomicBool,
    entries: RwLock<HashMap<String, Vec<u8>>>,
    order: RwLock<Vec<String>>,
}

impl TestModule {
    pub fn new(location: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ModuleId::new(),
            location: location.to_string(),
            stale: AtomicBool::new(false),
            removal_pending: AtomicBool::new(false),
            entries: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
        })
    }

    pub fn set_stale(&self, stale: bool) {
        self.stale.store(stale, Ordering::SeqCst);
    }

    pub fn set_removal_pending(&self, pending: bool) {
        self.removal_pending.store(pending, Ordering::SeqCst);
    }

    pub fn add_entry(&self, name: &str, bytes: &[u8]) {
        self.order.write().push(name.to_string());
        self.entries.write().insert(name.to_string(), bytes.to_vec());
    }
}

impl ModuleHandle for TestModule {
    fn id(&self) -> ModuleId {
        self.id
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    fn is_removal_pending(&self) -> bool {
        self.removal_pending.load(Ordering::SeqCst)
    }

    fn entry_names(&self) -> Vec<String> {
        self.order.read().clone()
    }

    fn open_entry(&self, path: &str) -> std::io::Result<Option<Box<dyn Read + Send>>> {
        Ok(self
            .entries
            .read()
            .get(path)
            .map(|bytes| Box::new(Cursor::new(bytes.clone())) as Box<dyn Read + Send>))
    }
}

#[derive(Default)]
pub struct TestRegistry {
    modules: RwLock<HashMap<ModuleId, Arc<TestModule>>>,
    imports: RwLock<Vec<(ModuleId, String)>>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, module: Arc<TestModule>) -> Arc<TestModule> {
        self.modules.write().insert(module.id(), module.clone());
        module
    }

    pub fn uninstall(&self, id: &ModuleId) {
        self.modules.write().remove(id);
    }

    pub fn record_import(&self, importer: &ModuleId, namespace: &str) {
        self.imports.write().push((*importer, namespace.to_string()));
    }
}

impl ModuleRegistry for TestRegistry {
    fn module(&self, id: &ModuleId) -> Option<Arc<dyn ModuleHandle>> {
        self.modules
            .read()
            .get(id)
            .map(|m| m.clone() as Arc<dyn ModuleHandle>)
    }

    fn importers_of(&self, namespace: &str) -> Vec<Arc<dyn ModuleHandle>> {
        let modules = self.modules.read();
        self.imports
            .read()
            .iter()
            .filter(|(_, ns)| ns == namespace)
            .filter_map(|(id, _)| modules.get(id).map(|m| m.clone() as Arc<dyn ModuleHandle>))
            .collect()
    }
}
