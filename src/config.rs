//! Configuration and registration lifecycle for the locator scheme.
//!
//! The host hands the framework a flat string property map. One property
//! matters to this layer: whether the virtual locator scheme is registered
//! at runtime start.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::id::RuntimeId;
use crate::locator::{RuntimeContext, SchemeRegistry};

/// Property controlling locator scheme registration. Absent, or any value
/// other than the literal `"false"`, means enabled.
pub const LOCATOR_SCHEME_PROP: &str = "quay.service.locator";

/// Content layer configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Whether to register the locator scheme at runtime start.
    pub enable_locator_scheme: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            enable_locator_scheme: true,
        }
    }
}

impl ContentConfig {
    /// Read the configuration from the host's property map.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let enable_locator_scheme = properties
            .get(LOCATOR_SCHEME_PROP)
            .map(|value| value != "false")
            .unwrap_or(true);
        Self {
            enable_locator_scheme,
        }
    }
}

/// Ties locator scheme registration to the framework's own lifecycle.
///
/// The framework starts the service when it starts and stops it when it
/// stops; the shared registry is passed in by reference and owned by the
/// embedding process, never by this layer.
pub struct LocatorService {
    registry: Arc<SchemeRegistry>,
    runtime: RuntimeId,
}

impl LocatorService {
    /// Register `runtime` with the scheme registry, honoring the toggle.
    pub fn start(
        registry: Arc<SchemeRegistry>,
        runtime: Arc<dyn RuntimeContext>,
        config: &ContentConfig,
    ) -> Self {
        let id = runtime.id();
        registry.register_runtime(runtime, config.enable_locator_scheme);
        info!(
            runtime = %id,
            enabled = config.enable_locator_scheme,
            "locator service started"
        );
        Self {
            registry,
            runtime: id,
        }
    }

    /// Remove the runtime's registration.
    pub fn stop(self) {
        self.registry.unregister_runtime(self.runtime);
        info!(runtime = %self.runtime, "locator service stopped");
    }
}
