//! Typed settings contract

use serde::de::DeserializeOwned;

/// A settings record loaded from its own structured source
///
/// `KEY` is the explicit discriminator used both as the cache key and as
/// the stem of the backing file name. It must be unique per settings shape.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use shellcache_domain::ports::Settings;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct SmtpSettings {
///     host: String,
///     port: u16,
/// }
///
/// impl Settings for SmtpSettings {
///     const KEY: &'static str = "SmtpSettings";
/// }
/// ```
pub trait Settings: DeserializeOwned + Default + Send + Sync + 'static {
    /// Settings type identifier
    const KEY: &'static str;

    /// Post-load hook
    ///
    /// Runs exactly once on every instance populated from its source file.
    /// Default-constructed instances never see it.
    fn after_load(&mut self) {}
}
