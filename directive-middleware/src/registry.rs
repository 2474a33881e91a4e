//! Directive registry: name -> middleware.
//!
//! One registry is owned by one schema build; visitors register their middleware when they
//! are installed in a [`SchemaBuilder`](crate::SchemaBuilder). Entries are never removed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::chain::BuildError;
use crate::config::DuplicatePolicy;
use crate::middleware::DirectiveMiddleware;

/// Association from directive name to the middleware registered under it.
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    entries: HashMap<String, Arc<dyn DirectiveMiddleware>>,
    policy: DuplicatePolicy,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Registers `middleware` under `name`.
    ///
    /// On a taken name the outcome depends on the policy: `Overwrite` and `Warn` replace the
    /// previous entry (last registration wins), `Reject` keeps it and returns
    /// [`BuildError::DuplicateRegistration`].
    pub fn register(
        &mut self,
        name: impl Into<String>,
        middleware: Arc<dyn DirectiveMiddleware>,
    ) -> Result<(), BuildError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            match self.policy {
                DuplicatePolicy::Overwrite => {
                    tracing::debug!(directive = %name, "Overwriting directive middleware");
                }
                DuplicatePolicy::Warn => {
                    tracing::warn!(directive = %name, "Directive middleware registered twice; last registration wins");
                }
                DuplicatePolicy::Reject => {
                    return Err(BuildError::DuplicateRegistration(name));
                }
            }
        } else {
            tracing::debug!(directive = %name, "Registered directive middleware");
        }
        self.entries.insert(name, middleware);
        Ok(())
    }

    /// Middleware registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn DirectiveMiddleware>, BuildError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| BuildError::UnregisteredMiddleware(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("names", &self.names())
            .field("policy", &self.policy)
            .finish()
    }
}
