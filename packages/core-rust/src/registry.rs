//! Name-keyed executor registry used to resolve `service` routes.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::error::RouteError;
use crate::traits::{Executor, Runtime};

/// Runtime registry mapping service names to executors.
///
/// Unlike a router, the registry may change while calls are in flight: a
/// `service` route resolves its executor on every call, so replacing an
/// entry takes effect for the next dispatch.
pub struct ExecutorRegistry {
    by_name: DashMap<String, Arc<dyn Executor>>,
    /// Registration order, for deterministic listing.
    order: RwLock<Vec<String>>,
}

impl ExecutorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_name: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Registers `executor` as `name`, replacing any previous entry with that name.
    pub fn register(&self, name: impl Into<String>, executor: Arc<dyn Executor>) {
        let name = name.into();
        if self.by_name.insert(name.clone(), executor).is_none() {
            self.order.write().push(name);
        }
    }

    /// Removes the executor registered as `name`.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Executor>> {
        let removed = self.by_name.remove(name).map(|(_, executor)| executor);
        if removed.is_some() {
            self.order.write().retain(|n| n != name);
        }
        removed
    }

    /// Service names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.order.read().clone()
    }
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for ExecutorRegistry {
    fn get_executor(&self, name: &str) -> Result<Arc<dyn Executor>, RouteError> {
        self.by_name
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RouteError::UnknownService {
                name: name.to_string(),
            })
    }
}
