//! Session factory holder tests

use crate::test_utils::{content_blueprint, registry_with, CountingDataProvider, COUNTING_PROVIDER};
use shellcache_domain::ports::{AppDataFolder, SessionFactoryHolderInterface};
use shellcache_domain::value_objects::{ShellBlueprint, ShellSettings};
use shellcache_infrastructure::data::{
    FileSessionConfigurationCache, NullSessionConfigurationCache, PhysicalAppDataFolder,
    SessionFactoryHolder,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct Fixture {
    _temp_dir: TempDir,
    folder: Arc<dyn AppDataFolder>,
    provider: Arc<CountingDataProvider>,
}

impl Fixture {
    fn new(provider: Arc<CountingDataProvider>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let folder: Arc<dyn AppDataFolder> = Arc::new(PhysicalAppDataFolder::new(temp_dir.path()));
        Self {
            _temp_dir: temp_dir,
            folder,
            provider,
        }
    }

    fn holder(&self, shell: ShellSettings, blueprint: ShellBlueprint) -> SessionFactoryHolder {
        SessionFactoryHolder::new(
            shell,
            blueprint,
            registry_with(&self.provider),
            Arc::clone(&self.folder),
            Arc::new(NullSessionConfigurationCache::new()),
        )
    }

    fn counting_holder(&self) -> SessionFactoryHolder {
        self.holder(
            ShellSettings::new("tenant-a", COUNTING_PROVIDER),
            content_blueprint(),
        )
    }
}

async fn contend(callers: usize) {
    let fixture = Fixture::new(CountingDataProvider::slow(Duration::from_millis(20)));
    let holder = Arc::new(fixture.counting_holder());

    let mut tasks = Vec::with_capacity(callers);
    for _ in 0..callers {
        let holder = Arc::clone(&holder);
        tasks.push(tokio::spawn(async move { holder.get_session_factory().await }));
    }
    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }

    assert_eq!(fixture.provider.configuration_builds(), 1, "{} callers", callers);
    assert_eq!(fixture.provider.factory_builds(), 1, "{} callers", callers);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_callers_build_one_factory() {
    contend(2).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ten_callers_build_one_factory() {
    contend(10).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hundred_callers_build_one_factory() {
    contend(100).await;
}

#[tokio::test]
async fn test_factory_is_cached() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let holder = fixture.counting_holder();

    let first = holder.get_session_factory().await.unwrap();
    let second = holder.get_session_factory().await.unwrap();

    assert!(std::ptr::addr_eq(Arc::as_ptr(&first), Arc::as_ptr(&second)));
    assert_eq!(fixture.provider.factory_builds(), 1);
    assert_eq!(
        first.entity_names(),
        vec![
            "Orchard.ContentManagement.Records.ContentItemRecord".to_string(),
            "Blogs.Records.BlogPartRecord".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_configuration_hides_content_record_references() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let holder = fixture.counting_holder();

    let configuration = holder.get_configuration().await.unwrap();
    let item = configuration
        .class_mapping("Orchard.ContentManagement.Records.ContentItemRecord")
        .unwrap();
    assert!(!item.property("ContentTypeRecord").unwrap().selectable);
    assert!(item.property("Id").unwrap().selectable);

    // Shared with the factory build, not rebuilt
    holder.get_session_factory().await.unwrap();
    assert_eq!(fixture.provider.configuration_builds(), 1);
}

#[tokio::test]
async fn test_parameters_reserve_tenant_folder() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let holder = fixture.holder(
        ShellSettings::new("tenant-b", "memory").with_connection_string("mem://b"),
        content_blueprint(),
    );

    let parameters = holder.get_session_factory_parameters().await.unwrap();

    assert_eq!(parameters.provider, "memory");
    assert_eq!(parameters.connection_string.as_deref(), Some("mem://b"));
    assert_eq!(parameters.record_descriptors, content_blueprint().records);
    assert!(parameters.data_folder.ends_with("Sites/tenant-b"));
    assert!(parameters.data_folder.is_dir());
}

#[tokio::test]
async fn test_failed_build_is_retried() {
    let fixture = Fixture::new(CountingDataProvider::failing(1));
    let holder = fixture.counting_holder();

    let error = holder.get_session_factory().await.err().expect("first build fails");
    assert!(error.is_build_failure());
    assert_eq!(fixture.provider.factory_builds(), 0);

    holder.get_session_factory().await.unwrap();
    assert_eq!(fixture.provider.configuration_builds(), 2);
    assert_eq!(fixture.provider.factory_builds(), 1);
}

#[tokio::test]
async fn test_unknown_provider_fails_build() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let holder = fixture.holder(ShellSettings::new("tenant-c", "Oracle"), content_blueprint());

    let error = holder.get_session_factory().await.err().expect("unknown provider");
    assert!(error.is_build_failure());
    assert!(error.to_string().contains("Oracle"));
}

#[tokio::test]
async fn test_build_timeout() {
    let fixture = Fixture::new(CountingDataProvider::slow(Duration::from_secs(30)));
    let holder = fixture
        .counting_holder()
        .with_build_timeout(Duration::from_millis(50));

    let error = holder.get_session_factory().await.err().expect("timeout");
    assert!(error.is_build_failure());
}

#[tokio::test]
async fn test_dispose_closes_factory_and_is_terminal() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let holder = fixture.counting_holder();
    let factory = holder.get_session_factory().await.unwrap();

    holder.dispose();
    assert!(factory.is_closed());
    assert!(holder.is_disposed());

    let error = holder.get_session_factory().await.err().expect("disposed");
    assert!(error.is_disposed());
    let error = holder.get_configuration().await.err().expect("disposed");
    assert!(error.is_disposed());

    // Idempotent
    holder.dispose();
    assert_eq!(fixture.provider.factory_builds(), 1);
}

#[tokio::test]
async fn test_dispose_before_first_use() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let holder = fixture.counting_holder();

    holder.dispose();

    let error = holder.get_session_factory().await.err().expect("disposed");
    assert!(error.is_disposed());
    assert_eq!(fixture.provider.configuration_builds(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dispose_during_build() {
    let fixture = Fixture::new(CountingDataProvider::slow(Duration::from_millis(200)));
    let holder = Arc::new(fixture.counting_holder());

    let pending = {
        let holder = Arc::clone(&holder);
        tokio::spawn(async move { holder.get_session_factory().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    holder.dispose();

    let error = pending.await.unwrap().err().expect("disposed while building");
    assert!(error.is_disposed());
}

#[tokio::test]
async fn test_drop_disposes() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let holder = fixture.counting_holder();
    let factory = holder.get_session_factory().await.unwrap();

    drop(holder);
    assert!(factory.is_closed());
}

#[tokio::test]
async fn test_file_configuration_cache_survives_restart() {
    let fixture = Fixture::new(CountingDataProvider::new());
    let shell = ShellSettings::new("tenant-d", COUNTING_PROVIDER);
    let holder_with_file_cache = || {
        SessionFactoryHolder::new(
            shell.clone(),
            content_blueprint(),
            registry_with(&fixture.provider),
            Arc::clone(&fixture.folder),
            Arc::new(FileSessionConfigurationCache::new(
                Arc::clone(&fixture.folder),
                &shell,
                &content_blueprint(),
            )),
        )
    };

    let first = holder_with_file_cache();
    let configuration = first.get_configuration().await.unwrap();
    first.dispose();

    let second = holder_with_file_cache();
    let reloaded = second.get_configuration().await.unwrap();

    assert_eq!(reloaded, configuration);
    assert_eq!(fixture.provider.configuration_builds(), 1);
}
