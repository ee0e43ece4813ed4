//! File system notifier tests
//!
//! These rely on real OS notifications, so they wait generously.

use crate::test_utils::{eventually, write_settings, SmtpSettings};
use shellcache_domain::ports::{ChangeListener, ChangeNotifier, Settings};
use shellcache_domain::value_objects::ChangeNotification;
use shellcache_infrastructure::config::SettingsConfig;
use shellcache_infrastructure::settings::{
    FileChangeNotifier, JsonFileSettingsProvider, NullChangeNotifier,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

const WAIT: Duration = Duration::from_secs(10);

fn channel_listener() -> (ChangeListener, mpsc::UnboundedReceiver<ChangeNotification>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let listener: ChangeListener = Arc::new(move |notification| {
        let _ = sender.send(notification);
    });
    (listener, receiver)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_notifies_only_for_the_watched_file() {
    let dir = TempDir::new().unwrap();
    let notifier = FileChangeNotifier::new();
    let (listener, mut receiver) = channel_listener();

    notifier
        .watch(dir.path(), "SmtpSettings.json", SmtpSettings::KEY, listener)
        .unwrap();
    assert!(notifier.is_watching(SmtpSettings::KEY));

    std::fs::write(dir.path().join("Other.json"), "{}").unwrap();
    write_settings(dir.path(), SmtpSettings::KEY, r#"{ "port": 1 }"#);

    let notification = tokio::time::timeout(WAIT, receiver.recv())
        .await
        .expect("no notification for the settings file")
        .expect("listener dropped");
    assert_eq!(notification.settings_key, SmtpSettings::KEY);
    assert_eq!(
        notification.path.file_name().and_then(|name| name.to_str()),
        Some("SmtpSettings.json")
    );
}

#[tokio::test]
async fn test_repeated_registration_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let notifier = FileChangeNotifier::new();

    for _ in 0..3 {
        let (listener, _receiver) = channel_listener();
        notifier
            .watch(dir.path(), "SmtpSettings.json", SmtpSettings::KEY, listener)
            .unwrap();
    }

    assert_eq!(notifier.watch_count(), 1);
    assert!(!notifier.is_watching("OtherSettings"));
}

#[tokio::test]
async fn test_missing_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("tenants").join("a");
    let notifier = FileChangeNotifier::new();
    let (listener, _receiver) = channel_listener();

    notifier
        .watch(&nested, "SmtpSettings.json", SmtpSettings::KEY, listener)
        .unwrap();

    assert!(nested.is_dir());
}

#[test]
fn test_null_notifier_records_registrations() {
    let notifier = NullChangeNotifier::new();
    let (listener, _receiver) = channel_listener();

    notifier
        .watch(
            std::path::Path::new("/nonexistent"),
            "SmtpSettings.json",
            SmtpSettings::KEY,
            listener,
        )
        .unwrap();

    assert!(notifier.is_watching(SmtpSettings::KEY));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_provider_reloads_on_file_change() {
    let dir = TempDir::new().unwrap();
    write_settings(
        dir.path(),
        SmtpSettings::KEY,
        r#"{ "host": "a", "port": 1 }"#,
    );
    let config = SettingsConfig {
        reload_delay_ms: 50,
        ..SettingsConfig::with_path(dir.path())
    };
    let provider =
        JsonFileSettingsProvider::new(&config, Arc::new(FileChangeNotifier::new())).unwrap();
    let handle = provider.get_settings::<SmtpSettings>().await.unwrap();
    assert_eq!(handle.load().port, 1);

    write_settings(
        dir.path(),
        SmtpSettings::KEY,
        r#"{ "host": "b", "port": 2 }"#,
    );

    assert!(eventually(WAIT, || handle.load().port == 2).await);
    assert_eq!(handle.load().host, "b");
}
