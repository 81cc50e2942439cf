//! The virtual locator scheme for module content.
//!
//! A locator (`module://<module-id>/<internal-path>`) addresses content
//! owned by a module without the caller being linked to the module's own
//! loading context. Resolution goes through a [`SchemeRegistry`] shared by
//! every runtime instance in the process: the registry discovers which
//! runtime owns the caller's loading context, and that runtime's
//! [`Connector`] constructs the connection in its own type space.
//!
//! The registry is an explicit object whose lifetime is tied to the
//! framework's own start/stop; it is passed by reference, never reached
//! through hidden global state.

use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::entries::SEPARATOR;
use crate::error::{ContentError, LocatorError};
use crate::id::{ContextId, ModuleId, RuntimeId};
use crate::module::ModuleRegistry;

/// Scheme tag of the virtual locator form.
pub const SCHEME: &str = "module";

/// A parsed locator: scheme tag + module identity + internal path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locator {
    module: ModuleId,
    path: String,
}

impl Locator {
    /// Create a locator for an entry of a module. A single leading
    /// separator on `path` is dropped; the canonical form stores none.
    pub fn new(module: ModuleId, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.strip_prefix(SEPARATOR).unwrap_or(&path).to_string();
        Self { module, path }
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// The internal path, without a leading separator.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", SCHEME, self.module, self.path)
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SCHEME)
            .and_then(|r| r.strip_prefix("://"))
            .ok_or_else(|| LocatorError::Malformed(format!("expected {}:// prefix: {}", SCHEME, s)))?;
        let (identity, path) = match rest.find(SEPARATOR) {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => (rest, ""),
        };
        let module = ModuleId::from_str(identity)
            .map_err(|e| LocatorError::Malformed(format!("bad module identity in {}: {}", s, e)))?;
        Ok(Self {
            module,
            path: path.to_string(),
        })
    }
}

/// A resolved content connection: the bytes of one module entry.
pub struct Connection {
    locator: Locator,
    runtime: RuntimeId,
    reader: Box<dyn Read + Send>,
}

impl Connection {
    pub fn new(locator: Locator, runtime: RuntimeId, reader: Box<dyn Read + Send>) -> Self {
        Self {
            locator,
            runtime,
            reader,
        }
    }

    /// The locator this connection was opened for.
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// The runtime instance that constructed the connection.
    pub fn runtime(&self) -> RuntimeId {
        self.runtime
    }

    pub fn into_reader(self) -> Box<dyn Read + Send> {
        self.reader
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("locator", &self.locator)
            .field("runtime", &self.runtime)
            .finish()
    }
}

/// One runtime instance, as seen by the locator layer.
///
/// The caller's loading context and the target module's loading context may
/// be unable to name each other's types, so each runtime supplies its own
/// [`Connector`] through which connections are constructed.
pub trait RuntimeContext: Send + Sync {
    fn id(&self) -> RuntimeId;
    fn registry(&self) -> Arc<dyn ModuleRegistry>;
    fn connector(&self) -> Arc<dyn Connector>;
}

/// Per-runtime connection factory.
pub trait Connector: Send + Sync {
    fn open(
        &self,
        runtime: &dyn RuntimeContext,
        locator: &Locator,
    ) -> Result<Connection, LocatorError>;
}

/// Default connector: resolves the entry through the runtime's own module
/// registry. Stale modules never yield content.
pub struct ModuleConnector;

impl Connector for ModuleConnector {
    fn open(
        &self,
        runtime: &dyn RuntimeContext,
        locator: &Locator,
    ) -> Result<Connection, LocatorError> {
        let module = runtime
            .registry()
            .module(&locator.module())
            .ok_or(LocatorError::ModuleNotFound(locator.module()))?;
        if module.is_stale() {
            // Wrapped like any other connect failure, carrying the cause.
            return Err(LocatorError::Connect(
                ContentError::Stale(locator.module()).to_string(),
            ));
        }
        let reader = module
            .open_entry(locator.path())
            .map_err(|e| LocatorError::Connect(e.to_string()))?
            .ok_or_else(|| LocatorError::EntryNotFound {
                module: locator.module(),
                path: locator.path().to_string(),
            })?;
        Ok(Connection::new(locator.clone(), runtime.id(), reader))
    }
}

/// Process-wide registry of runtime instances for locator resolution.
///
/// Replaces ambient singleton registration: the framework creates one
/// registry, registers itself on start, and unregisters on stop. Loading
/// contexts are bound to their owning runtime through an explicit handle
/// table rather than discovered from the call stack.
#[derive(Default)]
pub struct SchemeRegistry {
    /// Runtimes that enabled the locator scheme.
    runtimes: RwLock<Vec<Arc<dyn RuntimeContext>>>,
    /// Total registrations, including disabled ones. The single-instance
    /// shortcut in `runtime_for` is only valid when nothing else has
    /// registered at all.
    registered: RwLock<usize>,
    /// Loading context -> owning runtime.
    contexts: DashMap<ContextId, Arc<dyn RuntimeContext>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runtime instance. A runtime that disabled the locator
    /// scheme is counted but never discoverable.
    pub fn register_runtime(&self, runtime: Arc<dyn RuntimeContext>, enabled: bool) {
        *self.registered.write() += 1;
        if enabled {
            debug!(runtime = %runtime.id(), "registering runtime for locator scheme");
            self.runtimes.write().push(runtime);
        } else {
            debug!(runtime = %runtime.id(), "runtime registered with locator scheme disabled");
        }
    }

    /// Remove a runtime instance and every context bound to it.
    pub fn unregister_runtime(&self, id: RuntimeId) {
        {
            let mut registered = self.registered.write();
            *registered = registered.saturating_sub(1);
        }
        self.runtimes.write().retain(|rt| rt.id() != id);
        self.contexts.retain(|_, rt| rt.id() != id);
        debug!(runtime = %id, "unregistered runtime from locator scheme");
    }

    /// Bind a loading context to the runtime that owns it.
    pub fn bind_context(&self, context: ContextId, runtime: Arc<dyn RuntimeContext>) {
        self.contexts.insert(context, runtime);
    }

    pub fn unbind_context(&self, context: &ContextId) {
        self.contexts.remove(context);
    }

    /// Discover the runtime instance for a calling context.
    ///
    /// When exactly one runtime has ever registered, it answers for every
    /// caller; otherwise the context handle table decides.
    pub fn runtime_for(&self, context: Option<&ContextId>) -> Option<Arc<dyn RuntimeContext>> {
        if self.contexts.is_empty() {
            let runtimes = self.runtimes.read();
            if *self.registered.read() == 1 && runtimes.len() == 1 {
                return Some(runtimes[0].clone());
            }
        }
        let context = context?;
        self.contexts.get(context).map(|entry| entry.value().clone())
    }
}

/// Resolves locators to content connections.
///
/// A handler created inside a runtime holds a direct reference and never
/// needs discovery; a handler created in an isolated loading context
/// discovers the runtime through the shared registry. Connection opening on
/// one handler instance is serialized; the lock is per handler, not global.
pub struct LocatorHandler {
    runtime: Option<Arc<dyn RuntimeContext>>,
    registry: Arc<SchemeRegistry>,
    open_gate: Mutex<()>,
}

impl LocatorHandler {
    /// Handler bound directly to a runtime instance.
    pub fn for_runtime(runtime: Arc<dyn RuntimeContext>, registry: Arc<SchemeRegistry>) -> Self {
        Self {
            runtime: Some(runtime),
            registry,
            open_gate: Mutex::new(()),
        }
    }

    /// Handler for an isolated loading context; every resolution goes
    /// through runtime discovery.
    pub fn detached(registry: Arc<SchemeRegistry>) -> Self {
        Self {
            runtime: None,
            registry,
            open_gate: Mutex::new(()),
        }
    }

    /// Resolve a locator to a content connection.
    ///
    /// `calling_context` identifies the loading context on whose behalf the
    /// resolution happens; it is only consulted when the handler holds no
    /// direct runtime reference.
    pub fn open(
        &self,
        locator: &Locator,
        calling_context: Option<&ContextId>,
    ) -> Result<Connection, LocatorError> {
        let _serialized = self.open_gate.lock();

        if let Some(runtime) = &self.runtime {
            return runtime.connector().open(runtime.as_ref(), locator);
        }

        let runtime = self.registry.runtime_for(calling_context).ok_or_else(|| {
            warn!(%locator, "no runtime discoverable for locator resolution");
            LocatorError::NoContext
        })?;
        debug!(%locator, runtime = %runtime.id(), "resolving locator through discovered runtime");
        runtime.connector().open(runtime.as_ref(), locator)
    }
}
