//! Deduplicating cache in front of a slow resolver.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
};

use tracing::{debug, instrument, warn};

use kiln_core::{
    application::{
        ApplicationError,
        ports::{ManagedVersions, VersionResolver},
    },
    error::KilnResult,
};

type Key = (String, String, String);
type Slot = Arc<OnceLock<KilnResult<ManagedVersions>>>;

const LOCK: &str = "version cache";

/// At most one in-flight resolution per `(group, artifact, version)`.
///
/// Concurrent callers for the same key block on the slot's initializer and
/// share its result. Successful results stay cached for the life of the
/// resolver; failures are evicted so a later call retries.
pub struct CachingVersionResolver {
    inner: Arc<dyn VersionResolver>,
    slots: Mutex<HashMap<Key, Slot>>,
}

impl CachingVersionResolver {
    pub fn new(inner: Arc<dyn VersionResolver>) -> Self {
        Self {
            inner,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, key: &Key) -> KilnResult<Slot> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned { resource: LOCK })?;
        Ok(slots.entry(key.clone()).or_default().clone())
    }

    fn evict(&self, key: &Key, slot: &Slot) -> KilnResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned { resource: LOCK })?;
        // A retry may already have installed a fresh slot.
        if slots.get(key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(key);
        }
        Ok(())
    }

    /// Number of cached or in-flight keys.
    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VersionResolver for CachingVersionResolver {
    #[instrument(skip(self))]
    fn resolve(&self, group_id: &str, artifact_id: &str, version: &str) -> KilnResult<ManagedVersions> {
        let key = (group_id.to_string(), artifact_id.to_string(), version.to_string());
        let slot = self.slot(&key)?;

        let mut computed = false;
        let result = slot.get_or_init(|| {
            computed = true;
            self.inner.resolve(group_id, artifact_id, version)
        });
        debug!(cached = !computed, "version lookup");

        match result {
            Ok(versions) => Ok(versions.clone()),
            Err(e) => {
                let e = e.clone();
                if computed {
                    warn!(error = %e, "resolution failed, evicting");
                    self.evict(&key, &slot)?;
                }
                Err(e)
            }
        }
    }
}
