//! Application bootstrap
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?).await?;
//!
//! let smtp = context.settings().get_settings::<SmtpSettings>().await?;
//! let holder = context.shell(shell_settings, blueprint).await?;
//! let factory = holder.get_session_factory().await?;
//! ```

use crate::cache::ResourceCache;
use crate::config::{AppConfig, ConfigurationCacheMode};
use crate::data::{
    DataServicesProviderRegistry, FileSessionConfigurationCache, NullSessionConfigurationCache,
    PhysicalAppDataFolder, SessionFactoryHolder,
};
use crate::settings::{FileChangeNotifier, JsonFileSettingsProvider, NullChangeNotifier};
use shellcache_domain::error::Result;
use shellcache_domain::ports::{
    AppDataFolder, ChangeNotifier, DataServicesProviderFactory, SessionConfigurationCache,
    SessionFactoryHolderInterface,
};
use shellcache_domain::value_objects::{ShellBlueprint, ShellSettings};
use std::sync::Arc;
use tracing::info;

/// Application context
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    app_data_folder: Arc<dyn AppDataFolder>,
    provider_registry: Arc<DataServicesProviderRegistry>,
    notifier: Arc<dyn ChangeNotifier>,
    settings: Arc<JsonFileSettingsProvider>,
    shells: ResourceCache<String, Arc<SessionFactoryHolder>>,
}

impl AppContext {
    /// App-data folder shared by every tenant
    pub fn app_data_folder(&self) -> Arc<dyn AppDataFolder> {
        Arc::clone(&self.app_data_folder)
    }

    /// Data provider registry; register custom providers here
    pub fn provider_registry(&self) -> Arc<DataServicesProviderRegistry> {
        Arc::clone(&self.provider_registry)
    }

    /// Settings file change notifier
    pub fn notifier(&self) -> Arc<dyn ChangeNotifier> {
        Arc::clone(&self.notifier)
    }

    /// Typed settings provider
    pub fn settings(&self) -> Arc<JsonFileSettingsProvider> {
        Arc::clone(&self.settings)
    }

    /// Session factory holder for a tenant shell, created on first request
    ///
    /// Later calls for the same tenant return the existing holder and
    /// ignore the arguments.
    pub async fn shell(
        &self,
        shell_settings: ShellSettings,
        shell_blueprint: ShellBlueprint,
    ) -> Result<Arc<SessionFactoryHolder>> {
        let tenant = shell_settings.name.clone();
        self.shells
            .get_or_build(tenant, move || async move {
                Ok(Arc::new(self.create_holder(shell_settings, shell_blueprint)))
            })
            .await
    }

    /// Dispose and forget the holder of `tenant`
    ///
    /// Returns false when no holder is built yet. A holder whose build was
    /// in flight still reaches its caller and is disposed by [`shutdown`](Self::shutdown).
    pub fn release_shell(&self, tenant: &str) -> bool {
        match self.shells.invalidate(tenant) {
            Some(holder) => {
                holder.dispose();
                info!(tenant = %tenant, "Released shell");
                true
            }
            None => false,
        }
    }

    /// Dispose every tenant holder
    pub fn shutdown(&self) {
        let holders = self.shells.clear();
        let count = holders.len();
        for holder in holders {
            holder.dispose();
        }
        info!(shells = count, "Application context shut down");
    }

    /// Build a holder wired to this context's collaborators
    pub fn create_holder(
        &self,
        shell_settings: ShellSettings,
        shell_blueprint: ShellBlueprint,
    ) -> SessionFactoryHolder {
        let configuration_cache: Arc<dyn SessionConfigurationCache> =
            match self.config.data.configuration_cache {
                ConfigurationCacheMode::File => Arc::new(FileSessionConfigurationCache::new(
                    Arc::clone(&self.app_data_folder),
                    &shell_settings,
                    &shell_blueprint,
                )),
                ConfigurationCacheMode::Disabled => Arc::new(NullSessionConfigurationCache::new()),
            };

        let provider_factory: Arc<dyn DataServicesProviderFactory> =
            self.provider_registry.clone();
        let holder = SessionFactoryHolder::new(
            shell_settings,
            shell_blueprint,
            provider_factory,
            Arc::clone(&self.app_data_folder),
            configuration_cache,
        );
        match self.config.cache.build_timeout() {
            Some(timeout) => holder.with_build_timeout(timeout),
            None => holder,
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("settings", &self.settings)
            .field("providers", &self.provider_registry.provider_names())
            .field("shells", &self.shells)
            .finish_non_exhaustive()
    }
}

/// Initialize the application context
///
/// Must run inside a Tokio runtime; the settings provider spawns its
/// change dispatcher here.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    info!("Initializing application context");
    let config = Arc::new(config);

    let app_data_folder: Arc<dyn AppDataFolder> =
        Arc::new(PhysicalAppDataFolder::new(&config.data.app_data_path));
    let provider_registry = Arc::new(DataServicesProviderRegistry::with_defaults());
    info!(
        providers = ?provider_registry.provider_names(),
        "Registered data providers"
    );

    let notifier: Arc<dyn ChangeNotifier> = if config.settings.watch {
        Arc::new(FileChangeNotifier::new())
    } else {
        Arc::new(NullChangeNotifier::new())
    };
    let settings = JsonFileSettingsProvider::new(&config.settings, Arc::clone(&notifier))?;

    let shells = ResourceCache::new("shells");
    info!(
        app_data = %config.data.app_data_path.display(),
        settings = %settings.root().display(),
        watch = config.settings.watch,
        "Application context ready"
    );

    Ok(AppContext {
        config,
        app_data_folder,
        provider_registry,
        notifier,
        settings,
        shells,
    })
}
