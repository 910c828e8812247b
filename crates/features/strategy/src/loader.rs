use crate::error::StrategyError;
use crate::resolver::{StrategyType, TypeResolver, Visibility};
use flip_domain::config::StrategyConfig;
use flip_domain::{FlippingStrategy, InitParams};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
struct LoaderInner {
    resolver: Box<dyn TypeResolver>,
    allowed_namespaces: Vec<String>,
    cache: RwLock<FxHashMap<String, Arc<StrategyType>>>,
}

/// Resolves type names through a [`TypeResolver`] and builds initialized strategies.
///
/// Clones share the resolved-type cache. Only successful resolutions are cached,
/// so a resolver that learns new types later is picked up on the next call.
#[derive(Debug, Clone)]
pub struct StrategyLoader {
    inner: Arc<LoaderInner>,
}

impl StrategyLoader {
    pub fn new(resolver: impl TypeResolver + 'static) -> Self {
        Self::with_allowed_namespaces(resolver, Vec::<String>::new())
    }

    /// Restricts instantiation to type names starting with one of `namespaces`.
    /// An empty list allows every public type.
    pub fn with_allowed_namespaces<I, S>(resolver: impl TypeResolver + 'static, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(LoaderInner {
                resolver: Box::new(resolver),
                allowed_namespaces: namespaces.into_iter().map(Into::into).collect(),
                cache: RwLock::new(FxHashMap::default()),
            }),
        }
    }

    pub fn from_config(resolver: impl TypeResolver + 'static, config: &StrategyConfig) -> Self {
        Self::with_allowed_namespaces(resolver, config.allowed_namespaces.iter().cloned())
    }

    /// Resolves `type_name`, constructs it, and calls `init(uid, params)` once.
    ///
    /// # Errors
    /// * [`StrategyError::TypeNotFound`] if the resolver does not know the name.
    /// * [`StrategyError::AccessDenied`] for internal types or names outside the allowed namespaces.
    /// * [`StrategyError::NotConstructible`] if construction or initialization fails.
    pub fn resolve_and_init(
        &self,
        type_name: &str,
        uid: &str,
        params: &InitParams,
    ) -> Result<Arc<dyn FlippingStrategy>, StrategyError> {
        let strategy_type = self.resolve(type_name)?;
        self.check_access(&strategy_type)?;

        let mut strategy = strategy_type.instantiate()?;
        strategy.init(uid, params).map_err(|source| StrategyError::NotConstructible {
            type_name: type_name.to_owned(),
            reason: format!("initialization failed for feature '{uid}': {source}").into(),
            source: Some(source),
            context: None,
        })?;

        debug!(type_name, uid, "Strategy initialized");
        Ok(Arc::from(strategy))
    }

    /// Looks up type metadata, filling the cache on first use.
    ///
    /// # Errors
    /// Returns [`StrategyError::TypeNotFound`] if the resolver does not know the name.
    pub fn resolve(&self, type_name: &str) -> Result<Arc<StrategyType>, StrategyError> {
        if let Some(hit) = self.inner.cache.read().get(type_name) {
            return Ok(Arc::clone(hit));
        }

        // First use: re-check under the write lock so the resolver runs once per name.
        let mut cache = self.inner.cache.write();
        if let Some(hit) = cache.get(type_name) {
            return Ok(Arc::clone(hit));
        }

        let resolved = self.inner.resolver.resolve(type_name).ok_or_else(|| {
            StrategyError::TypeNotFound { type_name: type_name.to_owned(), context: None }
        })?;
        let resolved = Arc::new(resolved);
        cache.insert(type_name.to_owned(), Arc::clone(&resolved));
        debug!(type_name, "Strategy type cached");

        Ok(resolved)
    }

    /// Number of cached type entries.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.inner.cache.read().len()
    }

    fn check_access(&self, strategy_type: &StrategyType) -> Result<(), StrategyError> {
        let name = strategy_type.name();

        if strategy_type.visibility() == Visibility::Internal {
            return Err(StrategyError::AccessDenied {
                type_name: name.to_owned(),
                reason: "type is registered for internal use only".into(),
                context: None,
            });
        }

        let allowed = &self.inner.allowed_namespaces;
        if !allowed.is_empty() && !allowed.iter().any(|prefix| name.starts_with(prefix.as_str())) {
            return Err(StrategyError::AccessDenied {
                type_name: name.to_owned(),
                reason: format!("outside allowed namespaces [{}]", allowed.join(", ")).into(),
                context: None,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrategyCatalog;
    use crate::builtin::{CLIENT_FILTER, ClientFilterStrategy};

    fn params() -> InitParams {
        InitParams::from([("grantedClients".to_owned(), "pc1".to_owned())])
    }

    #[test]
    fn caches_successful_resolutions_only() {
        let loader = StrategyLoader::new(StrategyCatalog::with_builtins());
        assert!(loader.resolve("acme.Missing").is_err());
        assert_eq!(loader.cached(), 0);

        loader.resolve_and_init(CLIENT_FILTER, "F1", &params()).unwrap();
        loader.resolve_and_init(CLIENT_FILTER, "F2", &params()).unwrap();
        assert_eq!(loader.cached(), 1);
    }

    #[test]
    fn namespace_rules_deny_foreign_types() {
        let catalog = StrategyCatalog::with_builtins().register_with("acme.Canary", || {
            Ok(Box::new(ClientFilterStrategy::default()) as Box<dyn FlippingStrategy>)
        });
        let loader = StrategyLoader::with_allowed_namespaces(catalog, ["flip::"]);

        assert!(loader.resolve_and_init(CLIENT_FILTER, "F1", &params()).is_ok());
        let err = loader.resolve_and_init("acme.Canary", "F1", &params()).unwrap_err();
        assert!(matches!(err, StrategyError::AccessDenied { .. }));
    }

    #[test]
    fn internal_types_are_denied() {
        let catalog = StrategyCatalog::new().register_internal::<ClientFilterStrategy>();
        let err = StrategyLoader::new(catalog).resolve_and_init(CLIENT_FILTER, "F1", &params()).unwrap_err();
        assert!(matches!(err, StrategyError::AccessDenied { .. }));
    }
}
