use crate::builtin::{ClientFilterStrategy, ReleaseDateFlipStrategy, ServerFilterStrategy};
use crate::resolver::{StrategyType, TypeResolver, Visibility};
use flip_domain::{FlippingStrategy, NamedStrategy};
use fxhash::FxHashMap;
use std::borrow::Cow;

/// Name-to-type registry populated once at startup by the composing application.
#[derive(Debug, Clone, Default)]
pub struct StrategyCatalog {
    types: FxHashMap<String, StrategyType>,
}

impl StrategyCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the strategies shipped with this crate.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new()
            .register::<ClientFilterStrategy>()
            .register::<ServerFilterStrategy>()
            .register::<ReleaseDateFlipStrategy>()
    }

    #[must_use]
    pub fn register<T: NamedStrategy>(self) -> Self {
        self.register_type(StrategyType::of::<T>())
    }

    /// Registers a named constructor, for types without `Default` or for aliases.
    #[must_use]
    pub fn register_with<F>(self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Result<Box<dyn FlippingStrategy>, Cow<'static, str>> + Send + Sync + 'static,
    {
        self.register_type(StrategyType::new(name, constructor))
    }

    /// Declares a type that exists but cannot be built from a document.
    #[must_use]
    pub fn register_abstract(self, name: impl Into<String>) -> Self {
        self.register_type(StrategyType::abstract_type(name))
    }

    /// Registers a type that only application code may instantiate.
    #[must_use]
    pub fn register_internal<T: NamedStrategy>(self) -> Self {
        self.register_type(StrategyType::of::<T>().with_visibility(Visibility::Internal))
    }

    #[must_use]
    pub fn register_type(mut self, strategy: StrategyType) -> Self {
        if let Some(previous) = self.types.insert(strategy.name().to_owned(), strategy) {
            tracing::warn!(type_name = previous.name(), "Strategy type registered twice, keeping the latest");
        }
        self
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }
}

impl TypeResolver for StrategyCatalog {
    fn resolve(&self, type_name: &str) -> Option<StrategyType> {
        self.types.get(type_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    #[test]
    fn builtins_are_registered() {
        let catalog = StrategyCatalog::with_builtins();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(builtin::CLIENT_FILTER));
        assert!(catalog.contains(builtin::SERVER_FILTER));
        assert!(catalog.contains(builtin::RELEASE_DATE));
    }

    #[test]
    fn abstract_types_resolve_but_cannot_be_built() {
        let catalog = StrategyCatalog::new().register_abstract("acme.Base");
        let ty = catalog.resolve("acme.Base").expect("registered");
        assert!(!ty.is_constructible());
        assert!(ty.instantiate().is_err());
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        assert!(StrategyCatalog::with_builtins().resolve("acme.Missing").is_none());
    }
}
