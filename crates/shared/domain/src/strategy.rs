//! The pluggable activation capability attached to a [`Feature`](crate::Feature).

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// String parameters handed verbatim to [`FlippingStrategy::init`].
pub type InitParams = BTreeMap<String, String>;

/// Decides whether an enabled feature is active for a given context.
///
/// Implementations are created through a zero-argument constructor and then
/// initialized exactly once with the owning feature's uid and its parameters.
pub trait FlippingStrategy: Debug + Send + Sync {
    /// Fully-qualified name under which the implementation is registered.
    fn type_name(&self) -> &str;

    /// Binds the strategy to a feature.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidParameter`] when a parameter is missing or unusable.
    fn init(&mut self, uid: &str, params: &InitParams) -> Result<(), DomainError>;

    /// Parameters to serialize back into the feature document.
    fn init_params(&self) -> &InitParams;

    /// Evaluates the strategy for the feature `uid`.
    fn evaluate(&self, uid: &str, context: &FlippingContext) -> bool;

    /// Tagged, behavior-free form used by serialization.
    fn to_ref(&self) -> StrategyRef {
        StrategyRef { class_type: self.type_name().to_owned(), init_params: self.init_params().clone() }
    }
}

/// A strategy type that knows its own registration name.
pub trait NamedStrategy: FlippingStrategy + Default + 'static {
    const TYPE_NAME: &'static str;
}

/// Type-name tag plus parameters: the serialized form of a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRef {
    pub class_type: String,
    #[serde(default)]
    pub init_params: InitParams,
}

/// Request-scoped facts a strategy may inspect (client host, clock override, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlippingContext {
    values: BTreeMap<String, String>,
}

impl FlippingContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
