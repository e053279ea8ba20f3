use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::ComposeStats;

/// Global registry of composition statistics, indexed by composer name.
///
/// Composers built with a name register their counters here, so a host can
/// report how often units were keyed or skipped without holding on to every
/// composer instance. The registry is only written when a named composer is
/// built; composing keys never touches it.
///
/// # Examples
///
/// ```
/// use varykey_core::{stats_registry, KeyComposer};
///
/// let _composer = KeyComposer::builder().name("docs_site").build().unwrap();
///
/// let stats = stats_registry::get("docs_site").unwrap();
/// assert_eq!(stats.total(), 0);
/// assert!(stats_registry::list().contains(&"docs_site".to_string()));
/// ```
static STATS_REGISTRY: Lazy<RwLock<HashMap<String, Arc<ComposeStats>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a composer's statistics under a name, replacing any previous
/// registration with the same name.
pub fn register(name: &str, stats: Arc<ComposeStats>) {
    let mut registry = STATS_REGISTRY.write();
    registry.insert(name.to_string(), stats);
}

/// Returns a snapshot of the statistics registered under `name`.
pub fn get(name: &str) -> Option<ComposeStats> {
    let registry = STATS_REGISTRY.read();
    registry.get(name).map(|stats| (**stats).clone())
}

/// Returns the live counters registered under `name`.
pub fn get_shared(name: &str) -> Option<Arc<ComposeStats>> {
    let registry = STATS_REGISTRY.read();
    registry.get(name).cloned()
}

/// Lists all registered composer names.
pub fn list() -> Vec<String> {
    let registry = STATS_REGISTRY.read();
    registry.keys().cloned().collect()
}

/// Removes every registration. The counters themselves are left untouched.
pub fn clear() {
    let mut registry = STATS_REGISTRY.write();
    registry.clear();
}

/// Resets the counters registered under `name`.
///
/// Returns `false` if no composer with that name is registered.
pub fn reset(name: &str) -> bool {
    let registry = STATS_REGISTRY.read();
    if let Some(stats) = registry.get(name) {
        stats.reset();
        true
    } else {
        false
    }
}
