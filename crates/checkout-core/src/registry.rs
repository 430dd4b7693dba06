//! # Keyed Factory Registry
//!
//! Generic mapping from a token to a lazily constructed, cached instance.
//! Construction can be expensive (a strategy allocates its collaborators),
//! so an instance is built at most once per cache token and reused for
//! every later lookup.

use crate::error::{CheckoutError, CheckoutResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Factory producing an instance for a token
pub type Factory<T> = Box<dyn Fn() -> Arc<T> + Send + Sync>;

const DEFAULT_TOKEN: &str = "default";

/// Token-keyed factory registry with construct-on-first-access caching.
///
/// The cache token defaults to the lookup token but may differ, so two
/// lookups resolving to the same factory can still hold distinct cached
/// instances (one per gateway, for example).
pub struct Registry<T: ?Sized> {
    factories: HashMap<String, Factory<T>>,
    instances: Mutex<HashMap<String, Arc<T>>>,
    default_token: String,
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self::with_default_token(DEFAULT_TOKEN)
    }

    /// Create a registry whose tokenless lookups resolve to `token`
    pub fn with_default_token(token: impl Into<String>) -> Self {
        Self {
            factories: HashMap::new(),
            instances: Mutex::new(HashMap::new()),
            default_token: token.into(),
        }
    }

    /// Register a factory under `token`.
    ///
    /// Registering a token twice is rejected with
    /// `CheckoutError::Configuration`: silently replacing a factory would
    /// let later wiring shadow an exact-match registration without any
    /// signal.
    pub fn register<F>(&mut self, token: impl Into<String>, factory: F) -> CheckoutResult<()>
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        let token = token.into();
        if self.factories.contains_key(&token) {
            return Err(CheckoutError::Configuration(format!(
                "a factory is already registered for token: {}",
                token
            )));
        }

        self.factories.insert(token, Box::new(factory));
        Ok(())
    }

    pub fn has_factory(&self, token: &str) -> bool {
        self.factories.contains_key(token)
    }

    /// Look up an instance.
    ///
    /// A missing `token` falls back to the default token; a missing
    /// `cache_token` falls back to `token`. A cached instance is returned
    /// as-is; otherwise the factory registered under `token` is invoked
    /// and the result cached under `cache_token`. Unknown tokens fail
    /// with `CheckoutError::NotFound`.
    ///
    /// The instance lock is held across the miss path, so racing lookups
    /// for the same cache token invoke the factory exactly once.
    pub fn get(&self, token: Option<&str>, cache_token: Option<&str>) -> CheckoutResult<Arc<T>> {
        let token = token.unwrap_or(&self.default_token);
        let cache_token = cache_token.unwrap_or(token);

        let mut instances = self.instances.lock().expect("registry cache lock poisoned");

        if let Some(existing) = instances.get(cache_token) {
            return Ok(Arc::clone(existing));
        }

        let factory = self
            .factories
            .get(token)
            .ok_or_else(|| CheckoutError::NotFound {
                token: token.to_string(),
            })?;

        let instance = factory();
        instances.insert(cache_token.to_string(), Arc::clone(&instance));

        Ok(instance)
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
