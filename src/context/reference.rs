//! Lookup of named collaborators.
//!
//! The resolver replaces container-managed bean lookup: anything a test
//! needs by name (endpoints, queues, components, script validators) is
//! bound here explicitly. Values are stored type-erased and retrieved by
//! the exact type they were bound with.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use super::error::{ContextError, ContextResult};

type Entry = Arc<dyn Any + Send + Sync>;

/// Shared name to object registry. Clones share the same entries.
#[derive(Clone, Default)]
pub struct ReferenceResolver {
    entries: Arc<RwLock<BTreeMap<String, Entry>>>,
}

impl ReferenceResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` under `name`, replacing any earlier binding.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::LockPoisoned`] if the registry is unusable.
    pub fn bind<T: Any + Send + Sync>(&self, name: impl Into<String>, value: T) -> ContextResult<()> {
        let mut guard = self.entries.write().map_err(ContextError::poisoned)?;
        guard.insert(name.into(), Arc::new(value));
        Ok(())
    }

    /// Resolves the value bound under `name` as `T`.
    ///
    /// Returns `Ok(None)` when nothing of type `T` is bound under that name.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::LockPoisoned`] if the registry is unusable.
    pub fn resolve<T: Any + Send + Sync + Clone>(&self, name: &str) -> ContextResult<Option<T>> {
        let guard = self.entries.read().map_err(ContextError::poisoned)?;
        Ok(guard
            .get(name)
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned())
    }

    /// Resolves `name` as `T`, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnresolvedReference`] when nothing of type
    /// `T` is bound under `name`.
    pub fn require<T: Any + Send + Sync + Clone>(&self, name: &str) -> ContextResult<T> {
        self.resolve(name)?
            .ok_or_else(|| ContextError::UnresolvedReference(name.to_owned()))
    }

    /// Resolves the value bound under `name`, binding the result of
    /// `create` first if nothing of type `T` is bound yet.
    ///
    /// Lookup and insert happen under one write lock, so concurrent
    /// callers observe the same instance.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::LockPoisoned`] if the registry is unusable.
    pub fn resolve_or_bind<T, F>(&self, name: &str, create: F) -> ContextResult<T>
    where
        T: Any + Send + Sync + Clone,
        F: FnOnce() -> T,
    {
        let mut guard = self.entries.write().map_err(ContextError::poisoned)?;
        if let Some(existing) = guard.get(name).and_then(|entry| entry.downcast_ref::<T>()) {
            return Ok(existing.clone());
        }
        let created = create();
        guard.insert(name.to_owned(), Arc::new(created.clone()));
        Ok(created)
    }

    /// Returns every binding of type `T`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::LockPoisoned`] if the registry is unusable.
    pub fn resolve_all<T: Any + Send + Sync + Clone>(&self) -> ContextResult<Vec<(String, T)>> {
        let guard = self.entries.read().map_err(ContextError::poisoned)?;
        Ok(guard
            .iter()
            .filter_map(|(name, entry)| {
                entry
                    .downcast_ref::<T>()
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect())
    }

    /// Returns `true` if anything is bound under `name`.
    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        self.entries
            .read()
            .map(|guard| guard.contains_key(name))
            .unwrap_or(false)
    }
}

impl fmt::Debug for ReferenceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .entries
            .read()
            .map(|guard| guard.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        f.debug_struct("ReferenceResolver").field("names", &names).finish()
    }
}
