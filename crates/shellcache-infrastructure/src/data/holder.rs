//! Session factory holder
//!
//! One holder per tenant shell. The session configuration and the session
//! factory are each built once, on first use, through a [`ResourceCache`].
//!
//! ```text
//! get_session_factory ──► factory cache ──► build_session_factory
//!                                                │
//!                                                ▼
//! get_configuration ────► configuration cache ──► build_configuration
//!                                                │
//!                                                ▼
//!                              SessionConfigurationCache::get_configuration
//! ```
//!
//! The factory build reaches the configuration through the public getter,
//! so the two caches never wait on each other's cell.

use crate::cache::ResourceCache;
use crate::error_ext::ErrorContext;
use async_trait::async_trait;
use shellcache_domain::constants::SITES_FOLDER;
use shellcache_domain::error::{Error, Result};
use shellcache_domain::ports::{
    AppDataFolder, DataServicesProviderFactory, SessionConfigurationCache, SessionFactory,
    SessionFactoryHolderInterface,
};
use shellcache_domain::value_objects::{
    SessionConfiguration, SessionFactoryParameters, ShellBlueprint, ShellSettings,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-tenant owner of the session configuration and session factory
pub struct SessionFactoryHolder {
    shell_settings: ShellSettings,
    shell_blueprint: ShellBlueprint,
    provider_factory: Arc<dyn DataServicesProviderFactory>,
    app_data_folder: Arc<dyn AppDataFolder>,
    configuration_cache: Arc<dyn SessionConfigurationCache>,
    configuration: ResourceCache<(), Arc<SessionConfiguration>>,
    session_factory: ResourceCache<(), Arc<dyn SessionFactory>>,
    disposed: AtomicBool,
}

impl SessionFactoryHolder {
    /// Create a holder for one tenant shell
    pub fn new(
        shell_settings: ShellSettings,
        shell_blueprint: ShellBlueprint,
        provider_factory: Arc<dyn DataServicesProviderFactory>,
        app_data_folder: Arc<dyn AppDataFolder>,
        configuration_cache: Arc<dyn SessionConfigurationCache>,
    ) -> Self {
        let tenant = shell_settings.name.clone();
        Self {
            shell_settings,
            shell_blueprint,
            provider_factory,
            app_data_folder,
            configuration_cache,
            configuration: ResourceCache::new(format!("{}/session-configuration", tenant)),
            session_factory: ResourceCache::new(format!("{}/session-factory", tenant)),
            disposed: AtomicBool::new(false),
        }
    }

    /// Fail configuration and factory builds running longer than `timeout`
    pub fn with_build_timeout(mut self, timeout: Duration) -> Self {
        self.configuration.set_build_timeout(Some(timeout));
        self.session_factory.set_build_timeout(Some(timeout));
        self
    }

    /// Tenant served by this holder
    pub fn tenant(&self) -> &str {
        &self.shell_settings.name
    }

    /// Whether [`dispose`](SessionFactoryHolderInterface::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn ensure_not_disposed(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(Error::disposed(format!(
                "Session factory holder for tenant '{}'",
                self.tenant()
            )));
        }
        Ok(())
    }

    async fn build_session_factory(&self) -> Result<Arc<dyn SessionFactory>> {
        debug!(tenant = %self.tenant(), "Building session factory");

        let configuration = self.get_configuration().await?;
        let parameters = self.get_session_factory_parameters().await?;
        let provider = self.provider_factory.create_provider(&parameters)?;
        let factory = provider
            .build_session_factory(configuration)
            .await
            .build_context(format!("session factory for tenant '{}'", self.tenant()))?;

        debug!(tenant = %self.tenant(), "Done building session factory");
        Ok(factory)
    }

    async fn build_configuration(&self) -> Result<Arc<SessionConfiguration>> {
        debug!(tenant = %self.tenant(), "Building configuration");
        let parameters = self.get_session_factory_parameters().await?;

        let provider_factory = Arc::clone(&self.provider_factory);
        let build = Box::pin(async move {
            provider_factory
                .create_provider(&parameters)?
                .build_configuration(&parameters)
                .await
        });
        let mut configuration = self
            .configuration_cache
            .get_configuration(build)
            .await
            .build_context(format!(
                "session configuration for tenant '{}'",
                self.tenant()
            ))?;

        let hidden = configuration.disable_proxy_record_selection();
        debug!(
            tenant = %self.tenant(),
            mappings = configuration.class_mappings.len(),
            hidden_record_properties = hidden,
            "Done building configuration"
        );
        Ok(Arc::new(configuration))
    }
}

#[async_trait]
impl SessionFactoryHolderInterface for SessionFactoryHolder {
    async fn get_session_factory(&self) -> Result<Arc<dyn SessionFactory>> {
        self.ensure_not_disposed()?;
        let factory = self
            .session_factory
            .get_or_build((), || self.build_session_factory())
            .await?;

        // Disposal may have run while the factory was being built
        if self.is_disposed() {
            warn!(tenant = %self.tenant(), "Session factory built after disposal, closing it");
            self.session_factory.invalidate(&());
            factory.close();
            self.ensure_not_disposed()?;
        }
        Ok(factory)
    }

    async fn get_configuration(&self) -> Result<Arc<SessionConfiguration>> {
        self.ensure_not_disposed()?;
        self.configuration
            .get_or_build((), || self.build_configuration())
            .await
    }

    async fn get_session_factory_parameters(&self) -> Result<SessionFactoryParameters> {
        let shell_path = self
            .app_data_folder
            .combine(&[SITES_FOLDER, &self.shell_settings.name]);
        self.app_data_folder.create_directory(&shell_path).await?;

        Ok(SessionFactoryParameters {
            provider: self.shell_settings.data_provider.clone(),
            data_folder: self.app_data_folder.map_path(&shell_path),
            connection_string: self.shell_settings.data_connection_string.clone(),
            record_descriptors: self.shell_blueprint.records.clone(),
        })
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(factory) = self.session_factory.invalidate(&()) {
            factory.close();
            info!(tenant = %self.tenant(), "Disposed session factory");
        }
    }
}

impl Drop for SessionFactoryHolder {
    fn drop(&mut self) {
        self.dispose();
    }
}
