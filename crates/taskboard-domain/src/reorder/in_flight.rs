use std::collections::HashMap;
use std::hash::Hash;

/// Handle for one dispatched persistence request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken<K> {
    pub key: K,
    pub generation: u64,
}

/// Tracks the latest outstanding request per key (a task, or a list whose
/// order is being saved). Starting a new request for a key supersedes the
/// older one; only the newest token settles as current.
#[derive(Debug)]
pub struct InFlightTracker<K> {
    current: HashMap<K, u64>,
    next_generation: u64,
}

impl<K: Eq + Hash + Clone> InFlightTracker<K> {
    pub fn new() -> Self {
        Self {
            current: HashMap::new(),
            next_generation: 1,
        }
    }

    pub fn begin(&mut self, key: K) -> RequestToken<K> {
        let generation = self.next_generation;
        self.next_generation += 1;
        if self.current.insert(key.clone(), generation).is_some() {
            tracing::debug!(generation, "Superseding in-flight request");
        }
        RequestToken { key, generation }
    }

    pub fn is_current(&self, token: &RequestToken<K>) -> bool {
        self.current.get(&token.key) == Some(&token.generation)
    }

    /// Retire `token`. Returns false if a newer request replaced it, in
    /// which case its response must be ignored.
    pub fn settle(&mut self, token: &RequestToken<K>) -> bool {
        if self.is_current(token) {
            self.current.remove(&token.key);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.current.contains_key(key)
    }
}

impl<K: Eq + Hash + Clone> Default for InFlightTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
