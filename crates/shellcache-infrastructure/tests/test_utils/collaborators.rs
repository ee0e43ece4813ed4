//! Instrumented collaborators

use async_trait::async_trait;
use dashmap::DashMap;
use shellcache_domain::error::{Error, Result};
use shellcache_domain::ports::{
    ChangeListener, ChangeNotifier, DataServicesProvider, SessionFactory,
};
use shellcache_domain::value_objects::{
    ChangeNotification, SessionConfiguration, SessionFactoryParameters,
};
use shellcache_infrastructure::data::{DataServicesProviderRegistry, MemoryDataServicesProvider};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Provider name the counting provider is registered under
pub const COUNTING_PROVIDER: &str = "counting";

/// Data provider counting its builds, optionally slow or failing
#[derive(Default)]
pub struct CountingDataProvider {
    configuration_builds: AtomicUsize,
    factory_builds: AtomicUsize,
    failures_remaining: AtomicUsize,
    delay: Duration,
}

impl CountingDataProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every configuration build sleeps for `delay` first
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::default()
        })
    }

    /// The first `times` configuration builds fail
    pub fn failing(times: usize) -> Arc<Self> {
        Arc::new(Self {
            failures_remaining: AtomicUsize::new(times),
            ..Self::default()
        })
    }

    pub fn configuration_builds(&self) -> usize {
        self.configuration_builds.load(Ordering::SeqCst)
    }

    pub fn factory_builds(&self) -> usize {
        self.factory_builds.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl DataServicesProvider for CountingDataProvider {
    fn provider_name(&self) -> &str {
        COUNTING_PROVIDER
    }

    async fn build_configuration(
        &self,
        parameters: &SessionFactoryParameters,
    ) -> Result<SessionConfiguration> {
        self.configuration_builds.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.take_failure() {
            return Err(Error::internal("configured configuration failure"));
        }
        MemoryDataServicesProvider::new()
            .build_configuration(parameters)
            .await
    }

    async fn build_session_factory(
        &self,
        configuration: Arc<SessionConfiguration>,
    ) -> Result<Arc<dyn SessionFactory>> {
        self.factory_builds.fetch_add(1, Ordering::SeqCst);
        MemoryDataServicesProvider::new()
            .build_session_factory(configuration)
            .await
    }
}

/// Registry resolving `counting` to `provider`
pub fn registry_with(provider: &Arc<CountingDataProvider>) -> Arc<DataServicesProviderRegistry> {
    let registry = DataServicesProviderRegistry::with_defaults();
    let provider = Arc::clone(provider);
    registry.register(COUNTING_PROVIDER, move |_| {
        Ok(provider.clone() as Arc<dyn DataServicesProvider>)
    });
    Arc::new(registry)
}

/// Notifier whose notifications are fired by the test
#[derive(Default)]
pub struct ManualChangeNotifier {
    listeners: DashMap<String, (PathBuf, ChangeListener)>,
    registrations: AtomicUsize,
}

impl ManualChangeNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Total `watch` calls, repeats included
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// Deliver a notification for `settings_key`; false when not watched
    pub fn fire(&self, settings_key: &str) -> bool {
        let listener = self
            .listeners
            .get(settings_key)
            .map(|entry| (entry.value().0.clone(), Arc::clone(&entry.value().1)));
        match listener {
            Some((path, listener)) => {
                listener(ChangeNotification::new(path, settings_key));
                true
            }
            None => false,
        }
    }
}

impl ChangeNotifier for ManualChangeNotifier {
    fn watch(
        &self,
        directory: &Path,
        file_name: &str,
        settings_key: &str,
        listener: ChangeListener,
    ) -> Result<()> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        self.listeners
            .entry(settings_key.to_string())
            .or_insert_with(|| (directory.join(file_name), listener));
        Ok(())
    }

    fn is_watching(&self, settings_key: &str) -> bool {
        self.listeners.contains_key(settings_key)
    }
}
