//! Data provider registry
//!
//! Resolves the provider named in the session parameters. Names are
//! case-insensitive.

use crate::constants::MEMORY_PROVIDER_NAME;
use crate::data::memory::MemoryDataServicesProvider;
use dashmap::DashMap;
use shellcache_domain::error::{Error, Result};
use shellcache_domain::ports::{DataServicesProvider, DataServicesProviderFactory};
use shellcache_domain::value_objects::SessionFactoryParameters;
use std::sync::Arc;
use tracing::{debug, info};

/// Constructor registered for a provider name
pub type ProviderConstructor =
    Arc<dyn Fn(&SessionFactoryParameters) -> Result<Arc<dyn DataServicesProvider>> + Send + Sync>;

/// Provider factory resolving providers by name
#[derive(Default)]
pub struct DataServicesProviderRegistry {
    constructors: DashMap<String, ProviderConstructor>,
}

impl DataServicesProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in providers
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(MEMORY_PROVIDER_NAME, |_| {
            Ok(Arc::new(MemoryDataServicesProvider::new()) as Arc<dyn DataServicesProvider>)
        });
        registry
    }

    /// Register or replace the constructor for `name`
    pub fn register<F>(&self, name: &str, constructor: F)
    where
        F: Fn(&SessionFactoryParameters) -> Result<Arc<dyn DataServicesProvider>>
            + Send
            + Sync
            + 'static,
    {
        info!(provider = %name, "Registering data provider");
        self.constructors
            .insert(name.to_lowercase(), Arc::new(constructor));
    }

    /// Registered provider names, sorted
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .constructors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&name.to_lowercase())
    }
}

impl DataServicesProviderFactory for DataServicesProviderRegistry {
    fn create_provider(
        &self,
        parameters: &SessionFactoryParameters,
    ) -> Result<Arc<dyn DataServicesProvider>> {
        let name = parameters.provider.to_lowercase();
        // Clone the constructor so the shard lock is released before it runs
        let constructor = self
            .constructors
            .get(&name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Unknown data provider '{}'. Registered providers: {}",
                    parameters.provider,
                    self.provider_names().join(", ")
                ))
            })?;
        debug!(provider = %name, "Creating data provider");
        constructor(parameters)
    }
}
