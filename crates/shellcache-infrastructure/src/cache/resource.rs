//! Per-key single-flight resource cache
//!
//! ```text
//! get_or_build(key, build)
//!        │
//!        ├── fast path: initialized, current slot ─────► clone value
//!        │
//!        └── slow path: slot for key (created on demand)
//!                 │
//!                 └── OnceCell::get_or_try_init
//!                        ├── first caller runs `build`
//!                        ├── other callers of the same key wait
//!                        └── failure leaves the cell empty
//! ```
//!
//! Each key owns its own slot, so a slow build only delays callers of
//! that key. The map itself is sharded and its locks are never held
//! across an await.
//!
//! Invalidating a key whose build is in flight marks the slot stale but
//! leaves it mapped. Callers arriving afterwards wait for that build to
//! finish, drop the stale slot and build again, so a key never has two
//! builds running at once.

use crate::utils::TimedOperation;
use dashmap::DashMap;
use shellcache_domain::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Build cell of one key
struct Slot<V> {
    cell: OnceCell<V>,
    stale: AtomicBool,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
            stale: AtomicBool::new(false),
        }
    }
}

impl<V> Slot<V> {
    fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    fn mark_stale(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// Value served to new callers
    fn current(&self) -> Option<&V> {
        if self.is_stale() {
            None
        } else {
            self.cell.get()
        }
    }
}

/// Outcome of one pass through a slot
enum Attempt {
    Failed(Error),
    /// The slot was invalidated before this caller could build in it
    Superseded,
}

/// Cache holding at most one built value per key
///
/// # Example
///
/// ```
/// use shellcache_infrastructure::cache::ResourceCache;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let cache: ResourceCache<String, u64> = ResourceCache::new("answers");
/// let value = cache
///     .get_or_build("life".to_string(), || async { Ok(42) })
///     .await
///     .unwrap();
/// assert_eq!(value, 42);
/// assert_eq!(cache.get("life"), Some(42));
/// # });
/// ```
pub struct ResourceCache<K, V> {
    name: String,
    entries: DashMap<K, Arc<Slot<V>>>,
    build_timeout: Option<Duration>,
}

impl<K, V> ResourceCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// Create an empty cache; `name` identifies it in logs and errors
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            entries: DashMap::new(),
            build_timeout: None,
        }
    }

    /// Fail builds that run longer than `timeout`
    pub fn with_build_timeout(mut self, timeout: Duration) -> Self {
        self.build_timeout = Some(timeout);
        self
    }

    /// Replace the build timeout; `None` lets builds run unbounded
    pub fn set_build_timeout(&mut self, timeout: Option<Duration>) {
        self.build_timeout = timeout;
    }

    /// Cache name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured build timeout
    pub fn build_timeout(&self) -> Option<Duration> {
        self.build_timeout
    }

    /// Built value for `key`, if any
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .and_then(|slot| slot.value().current().cloned())
    }

    /// Return the value for `key`, running `build` if it is not built yet
    ///
    /// At most one build per key is in flight. Callers arriving while a
    /// build runs wait for it and share its result. If the build fails the
    /// error goes to the caller that ran it, the key stays unmapped, and the
    /// next waiter (or caller) runs its own `build`. Callers arriving after
    /// the key was invalidated mid-build wait for that build, then build
    /// afresh.
    pub async fn get_or_build<F, Fut>(&self, key: K, build: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let mut build = Some(build);
        loop {
            if let Some(value) = self.get(&key) {
                return Ok(value);
            }

            let slot = Arc::clone(self.entries.entry(key.clone()).or_default().value());
            let joined_stale = slot.is_stale();
            let attempt = slot
                .cell
                .get_or_try_init(|| {
                    // Nobody builds into a stale slot
                    let next = if slot.is_stale() { None } else { build.take() };
                    let key = &key;
                    async move {
                        match next {
                            Some(build) => self.run_build(key, build).await.map_err(Attempt::Failed),
                            None => Err(Attempt::Superseded),
                        }
                    }
                })
                .await;

            match attempt {
                Ok(value) if !joined_stale => return Ok(value.clone()),
                Err(Attempt::Failed(e)) => return Err(e),
                Ok(_) | Err(Attempt::Superseded) => {
                    // The stale slot has no build running any more
                    self.entries
                        .remove_if(&key, |_, mapped| Arc::ptr_eq(mapped, &slot));
                    if build.is_none() {
                        return Err(Error::internal(format!(
                            "{} entry {:?} lost its build",
                            self.name, key
                        )));
                    }
                }
            }
        }
    }

    /// Remove `key`, returning its value if it was built
    ///
    /// A build already in flight for `key` completes for the callers that
    /// were waiting on it, but is not served to anyone else. The slot stays
    /// mapped until that build ends so the next build cannot overlap it.
    pub fn invalidate<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (owned_key, slot) = {
            let entry = self.entries.get(key)?;
            (entry.key().clone(), Arc::clone(entry.value()))
        };
        slot.mark_stale();

        let value = slot.cell.get().cloned();
        if value.is_some() {
            self.entries
                .remove_if(key, |_, mapped| Arc::ptr_eq(mapped, &slot));
        }
        debug!(
            cache = %self.name,
            key = ?owned_key,
            built = value.is_some(),
            "Invalidated cache entry"
        );
        value
    }

    /// Invalidate every entry, returning the built values
    pub fn clear(&self) -> Vec<V> {
        let keys: Vec<K> = self.entries.iter().map(|entry| entry.key().clone()).collect();
        keys.iter().filter_map(|key| self.invalidate(key)).collect()
    }

    /// Whether `key` has a built value
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .is_some_and(|slot| slot.value().current().is_some())
    }

    /// Number of built values
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().current().is_some())
            .count()
    }

    /// Whether no value is built
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn run_build<F, Fut>(&self, key: &K, build: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        debug!(cache = %self.name, key = ?key, "Building cache entry");
        let timer = TimedOperation::start(format!("{}[{:?}]", self.name, key));

        let result = match self.build_timeout {
            Some(limit) => match tokio::time::timeout(limit, build()).await {
                Ok(result) => result,
                Err(_) => Err(Error::build_timeout(
                    format!("{} entry {:?}", self.name, key),
                    limit,
                )),
            },
            None => build().await,
        };

        if result.is_err() {
            debug!(cache = %self.name, key = ?key, "Build failed, key left unmapped");
        }
        timer.finish(result)
    }
}

impl<K, V> fmt::Debug for ResourceCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCache")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .field("build_timeout", &self.build_timeout)
            .finish()
    }
}
