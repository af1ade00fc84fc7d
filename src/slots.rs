use crate::key::CallbackKey;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::{collections::HashMap, fmt, sync::Arc};

/// Keyed callback storage used by generated dispatchers. One key holds at most
/// one value; inserting under an existing key replaces it.
pub struct Slots<V: ?Sized> {
    owner: &'static str,
    kind: &'static str,
    inner: RwLock<HashMap<String, Arc<V>>>,
}

impl<V: ?Sized> Slots<V> {
    /// `owner` and `kind` only label trace output.
    pub fn new(owner: &'static str, kind: &'static str) -> Self {
        Self {
            owner,
            kind,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Binds `value` under `key`, returning the binding it replaced.
    pub fn insert(&self, key: String, value: Arc<V>) -> Option<Arc<V>> {
        tracing::trace!(owner = self.owner, kind = self.kind, key = %key, "register");
        self.inner.write().insert(key, value)
    }

    /// Removes every listed key; keys that are not bound are ignored.
    pub fn remove_all<I>(&self, keys: I) -> usize
    where
        I: IntoIterator,
        I::Item: CallbackKey,
    {
        let mut map = self.inner.write();
        let mut removed = 0;
        for k in keys {
            let key = k.to_key();
            if map.remove(&key).is_some() {
                removed += 1;
            }
            tracing::trace!(owner = self.owner, kind = self.kind, key = %key, "unregister");
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys().cloned().collect()
    }

    /// Current values, copied out so callers run without holding the lock.
    pub fn snapshot(&self) -> SmallVec<[Arc<V>; 4]> {
        self.inner.read().values().cloned().collect()
    }
}

impl<V: ?Sized> fmt::Debug for Slots<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots")
            .field("owner", &self.owner)
            .field("kind", &self.kind)
            .field("keys", &self.keys())
            .finish()
    }
}
