use crate::error::StrategyError;
use flip_domain::{FlippingStrategy, NamedStrategy};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Zero-argument constructor of a strategy implementation.
pub type Constructor =
    Arc<dyn Fn() -> Result<Box<dyn FlippingStrategy>, Cow<'static, str>> + Send + Sync>;

/// Whether documents may instantiate a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Registered for programmatic use only.
    Internal,
}

/// Resolved metadata of a strategy implementation.
#[derive(Clone)]
pub struct StrategyType {
    name: String,
    constructor: Option<Constructor>,
    visibility: Visibility,
}

impl StrategyType {
    /// A public type built by `constructor`.
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Result<Box<dyn FlippingStrategy>, Cow<'static, str>> + Send + Sync + 'static,
    {
        Self { name: name.into(), constructor: Some(Arc::new(constructor)), visibility: Visibility::Public }
    }

    /// A public type built through `Default`.
    #[must_use]
    pub fn of<T: NamedStrategy>() -> Self {
        Self::new(T::TYPE_NAME, || Ok(Box::new(T::default()) as Box<dyn FlippingStrategy>))
    }

    /// A known type without a usable zero-argument constructor.
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self { name: name.into(), constructor: None, visibility: Visibility::Public }
    }

    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub const fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Runs the zero-argument constructor.
    ///
    /// # Errors
    /// Returns [`StrategyError::NotConstructible`] for abstract types or a failing constructor.
    pub fn instantiate(&self) -> Result<Box<dyn FlippingStrategy>, StrategyError> {
        let constructor = self.constructor.as_ref().ok_or_else(|| StrategyError::NotConstructible {
            type_name: self.name.clone(),
            reason: "no zero-argument constructor is registered".into(),
            source: None,
            context: None,
        })?;

        constructor().map_err(|reason| StrategyError::NotConstructible {
            type_name: self.name.clone(),
            reason,
            source: None,
            context: Some("constructor failed".into()),
        })
    }
}

impl fmt::Debug for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyType")
            .field("name", &self.name)
            .field("constructible", &self.is_constructible())
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Runtime type lookup consumed by the loader. Inject a fake in tests.
pub trait TypeResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, type_name: &str) -> Option<StrategyType>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for Arc<R> {
    fn resolve(&self, type_name: &str) -> Option<StrategyType> {
        (**self).resolve(type_name)
    }
}
