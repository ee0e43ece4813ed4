//! In-memory data provider
//!
//! Maps every record descriptor one-to-one and produces factories that only
//! track their open/closed state. Used for wiring and tests where no storage
//! engine is available.

use crate::constants::MEMORY_PROVIDER_NAME;
use async_trait::async_trait;
use shellcache_domain::error::Result;
use shellcache_domain::ports::{DataServicesProvider, SessionFactory};
use shellcache_domain::value_objects::{
    ClassMapping, SessionConfiguration, SessionFactoryParameters,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Data provider keeping nothing but mapping metadata
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryDataServicesProvider;

impl MemoryDataServicesProvider {
    /// Create the provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataServicesProvider for MemoryDataServicesProvider {
    fn provider_name(&self) -> &str {
        MEMORY_PROVIDER_NAME
    }

    async fn build_configuration(
        &self,
        parameters: &SessionFactoryParameters,
    ) -> Result<SessionConfiguration> {
        let mut properties = BTreeMap::new();
        properties.insert(
            "data.folder".to_string(),
            parameters.data_folder.display().to_string(),
        );
        if let Some(connection_string) = &parameters.connection_string {
            properties.insert(
                "connection.connection_string".to_string(),
                connection_string.clone(),
            );
        }

        let class_mappings: Vec<ClassMapping> = parameters
            .record_descriptors
            .iter()
            .map(ClassMapping::from)
            .collect();
        debug!(
            mappings = class_mappings.len(),
            "Built in-memory session configuration"
        );

        Ok(SessionConfiguration {
            provider: MEMORY_PROVIDER_NAME.to_string(),
            properties,
            class_mappings,
        })
    }

    async fn build_session_factory(
        &self,
        configuration: Arc<SessionConfiguration>,
    ) -> Result<Arc<dyn SessionFactory>> {
        Ok(Arc::new(MemorySessionFactory::new(configuration)))
    }
}

/// Session factory over a session configuration, holding no connections
#[derive(Debug)]
pub struct MemorySessionFactory {
    configuration: Arc<SessionConfiguration>,
    closed: AtomicBool,
}

impl MemorySessionFactory {
    /// Create an open factory
    pub fn new(configuration: Arc<SessionConfiguration>) -> Self {
        Self {
            configuration,
            closed: AtomicBool::new(false),
        }
    }

    /// Configuration the factory was built from
    pub fn configuration(&self) -> &SessionConfiguration {
        &self.configuration
    }
}

impl SessionFactory for MemorySessionFactory {
    fn provider_name(&self) -> &str {
        &self.configuration.provider
    }

    fn entity_names(&self) -> Vec<String> {
        self.configuration
            .class_mappings
            .iter()
            .map(|mapping| mapping.entity_name.clone())
            .collect()
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(provider = %self.configuration.provider, "Closed session factory");
        }
    }
}
