use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::registry::ExecutorRegistry;
use crate::traits::Runtime;

/// Per-call context threaded through interceptors, executors, and scheme providers.
///
/// The router itself only reads [`ExecContext::runtime`] (to resolve
/// `service` routes); everything else is carried for executors and for the
/// transport that opened the call.
#[derive(Clone)]
pub struct ExecContext {
    /// Operation name the context was opened for.
    pub name: String,
    /// Distributed trace identifier for observability.
    pub trace: String,
    /// Registry used to resolve named services at dispatch time.
    pub runtime: Arc<dyn Runtime>,
    /// Point in time after which the call should be abandoned. `None` means no deadline.
    pub deadline: Option<Instant>,
    values: HashMap<String, Value>,
}

impl ExecContext {
    /// Opens a context for `name` with a freshly generated trace id.
    pub fn new(name: impl Into<String>, runtime: Arc<dyn Runtime>) -> Self {
        Self::with_trace(name, new_trace(), runtime)
    }

    /// Opens a context for `name` continuing an existing trace.
    pub fn with_trace(
        name: impl Into<String>,
        trace: impl Into<String>,
        runtime: Arc<dyn Runtime>,
    ) -> Self {
        Self {
            name: name.into(),
            trace: trace.into(),
            runtime,
            deadline: None,
            values: HashMap::new(),
        }
    }

    /// Opens a context backed by an empty registry. Mostly useful in tests.
    #[must_use]
    pub fn detached(name: &str) -> Self {
        Self::new(name, Arc::new(ExecutorRegistry::new()))
    }

    /// Sets the deadline to `timeout` from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Time left before the deadline, or `None` when there is no deadline.
    /// Returns `Some(Duration::ZERO)` once the deadline has passed.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Stores a value under `key`, replacing any previous value.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Reads a value previously stored with [`ExecContext::set_value`].
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecContext")
            .field("name", &self.name)
            .field("trace", &self.trace)
            .field("deadline", &self.deadline)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// Generates a new trace identifier (UUID v4, hyphenless).
#[must_use]
pub fn new_trace() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
