//! Data Access Ports
//!
//! The session factory holder talks to three collaborators:
//!
//! ```text
//! SessionFactoryHolder ──► SessionConfigurationCache ──► (build future)
//!          │                                                  │
//!          └──────────► DataServicesProviderFactory ──► DataServicesProvider
//!                                                             │
//!                                                      SessionFactory
//! ```

use crate::error::Result;
use crate::value_objects::{SessionConfiguration, SessionFactoryParameters};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Deferred construction of a session configuration
pub type ConfigurationBuild = BoxFuture<'static, Result<SessionConfiguration>>;

/// Heavyweight per-tenant resource built from a session configuration
pub trait SessionFactory: Send + Sync {
    /// Provider that built the factory
    fn provider_name(&self) -> &str;

    /// Entities the factory can open sessions for
    fn entity_names(&self) -> Vec<String>;

    /// Whether [`close`](Self::close) has run
    fn is_closed(&self) -> bool;

    /// Release the underlying resources
    ///
    /// Must be idempotent.
    fn close(&self);
}

/// Provider able to assemble configurations and factories for one storage engine
#[async_trait]
pub trait DataServicesProvider: Send + Sync {
    /// Provider name
    fn provider_name(&self) -> &str;

    /// Assemble the session configuration from the tenant parameters
    async fn build_configuration(
        &self,
        parameters: &SessionFactoryParameters,
    ) -> Result<SessionConfiguration>;

    /// Build the session factory described by a configuration
    async fn build_session_factory(
        &self,
        configuration: Arc<SessionConfiguration>,
    ) -> Result<Arc<dyn SessionFactory>>;
}

/// Resolves the provider named in the session parameters
pub trait DataServicesProviderFactory: Send + Sync {
    /// Create the provider for the given parameters
    fn create_provider(
        &self,
        parameters: &SessionFactoryParameters,
    ) -> Result<Arc<dyn DataServicesProvider>>;
}

/// Memoizes session configurations
///
/// Implementations decide what identity the configuration is keyed by and
/// may reuse a previously persisted configuration instead of awaiting
/// `build`. They may also always build.
#[async_trait]
pub trait SessionConfigurationCache: Send + Sync {
    /// Return a cached configuration or the result of `build`
    async fn get_configuration(&self, build: ConfigurationBuild) -> Result<SessionConfiguration>;
}

/// Per-tenant owner of the session configuration and session factory
#[async_trait]
pub trait SessionFactoryHolderInterface: Send + Sync {
    /// Session factory, built on first use
    async fn get_session_factory(&self) -> Result<Arc<dyn SessionFactory>>;

    /// Session configuration, built on first use
    async fn get_configuration(&self) -> Result<Arc<SessionConfiguration>>;

    /// Parameters handed to the data provider
    async fn get_session_factory_parameters(&self) -> Result<SessionFactoryParameters>;

    /// Release the session factory; the holder is unusable afterwards
    fn dispose(&self);
}
