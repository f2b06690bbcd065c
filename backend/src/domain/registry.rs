//! Thread-safe lookup table from provider key to [`AdminProvider`].
//!
//! Providers are registered at startup and resolved per request. Resolution
//! happens on every admin call, so reads take a shared lock and registration
//! takes an exclusive one.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{AdminProvider, define_port_error};

define_port_error! {
    /// Registry lookup failures.
    pub enum RegistryError {
        /// No provider is registered under the requested (or default) key.
        ProviderNotFound { key: String } => "provider not found: {key}",
    }
}

impl From<RegistryError> for Error {
    fn from(value: RegistryError) -> Self {
        Error::provider_not_found(value.to_string())
    }
}

/// Registered providers keyed by trimmed name, plus the key used when a
/// caller names none.
///
/// # Examples
/// ```
/// use admin_gateway::domain::ProviderRegistry;
///
/// let registry = ProviderRegistry::new(" stellar ");
/// assert_eq!(registry.default_key(), "stellar");
/// assert!(registry.list().is_empty());
/// assert!(registry.resolve("").is_err());
/// ```
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn AdminProvider>>>,
    default_key: String,
}

impl ProviderRegistry {
    /// Empty registry falling back to `default_key`.
    pub fn new(default_key: impl AsRef<str>) -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            default_key: default_key.as_ref().trim().to_owned(),
        }
    }

    /// Key used when a request does not name a provider.
    pub fn default_key(&self) -> &str {
        self.default_key.as_str()
    }

    /// Register `provider` under the trimmed `name`, replacing any previous
    /// entry. A blank name registers under the empty key, which blank
    /// lookups reach when the default key is also empty.
    pub fn register(&self, name: impl AsRef<str>, provider: Arc<dyn AdminProvider>) {
        let key = name.as_ref().trim();
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let replaced = providers.insert(key.to_owned(), provider).is_some();
        info!(provider = key, replaced, "provider registered");
    }

    /// Registered keys in ascending order.
    pub fn list(&self) -> Vec<String> {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = providers.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Provider for `candidate`, or for the default key when `candidate` is
    /// blank.
    pub fn resolve(&self, candidate: &str) -> Result<Arc<dyn AdminProvider>, RegistryError> {
        let trimmed = candidate.trim();
        let key = if trimmed.is_empty() {
            self.default_key.as_str()
        } else {
            trimmed
        };
        let providers = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        providers
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::provider_not_found(key))
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.list())
            .field("default_key", &self.default_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockAdminProvider;
    use rstest::{fixture, rstest};
    use std::thread;

    fn named(name: &str) -> Arc<dyn AdminProvider> {
        let mut provider = MockAdminProvider::new();
        provider.expect_name().return_const(name.to_owned());
        Arc::new(provider)
    }

    #[fixture]
    fn registry() -> ProviderRegistry {
        let registry = ProviderRegistry::new("stellar");
        registry.register("stellar", named("stellar"));
        registry.register("nebula", named("nebula"));
        registry
    }

    #[rstest]
    fn list_is_sorted(registry: ProviderRegistry) {
        assert_eq!(registry.list(), vec!["nebula".to_owned(), "stellar".to_owned()]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("stellar")]
    #[case(" stellar\t")]
    fn blank_or_padded_keys_resolve(registry: ProviderRegistry, #[case] candidate: &str) {
        let provider = registry.resolve(candidate).expect("provider resolves");
        assert_eq!(provider.name(), "stellar");
    }

    #[rstest]
    fn blank_key_matches_default_instance(registry: ProviderRegistry) {
        let by_blank = registry.resolve("").expect("default resolves");
        let by_name = registry.resolve("stellar").expect("named resolves");
        assert!(Arc::ptr_eq(&by_blank, &by_name));
    }

    #[rstest]
    fn unknown_key_is_reported(registry: ProviderRegistry) {
        let err = registry.resolve("unknown").err().expect("unknown key fails");
        assert_eq!(err, RegistryError::provider_not_found("unknown"));
        assert_eq!(err.to_string(), "provider not found: unknown");

        let domain: Error = err.into();
        assert_eq!(domain.code(), ErrorCode::ProviderNotFound);
        assert_eq!(domain.code().status(), 400);
    }

    #[rstest]
    fn missing_default_fails_blank_lookups() {
        let registry = ProviderRegistry::new("");
        registry.register("stellar", named("stellar"));
        let err = registry.resolve(" ").err().expect("no default");
        assert_eq!(err, RegistryError::provider_not_found(""));
    }

    #[rstest]
    fn blank_names_register_under_the_empty_key() {
        let registry = ProviderRegistry::new("");
        registry.register("  ", named("ghost"));

        assert_eq!(registry.list(), vec![String::new()]);
        let provider = registry.resolve(" ").expect("empty key resolves");
        assert_eq!(provider.name(), "ghost");
    }

    #[rstest]
    fn re_registering_replaces(registry: ProviderRegistry) {
        registry.register(" nebula ", named("nebula-v2"));
        let provider = registry.resolve("nebula").expect("replacement resolves");
        assert_eq!(provider.name(), "nebula-v2");
        assert_eq!(registry.list().len(), 2);
    }

    #[rstest]
    fn concurrent_registration_and_resolution(registry: ProviderRegistry) {
        let registry = Arc::new(registry);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let name = format!("tenant-{i}");
                    registry.register(&name, named(&name));
                    for _ in 0..50 {
                        let provider = registry.resolve("").expect("default stays resolvable");
                        assert_eq!(provider.name(), "stellar");
                    }
                    registry.resolve(&name).expect("own registration visible").name().to_owned()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let resolved = handle.join().expect("worker thread");
            assert_eq!(resolved, format!("tenant-{i}"));
        }
        assert_eq!(registry.list().len(), 10);
    }
}
