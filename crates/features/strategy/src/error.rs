use flip_domain::DomainError;
use std::borrow::Cow;

/// Distinct failure modes of strategy resolution and construction.
#[flip_derive::flip_error]
pub enum StrategyError {
    /// No implementation is registered under the name.
    #[error("'{type_name}' has not been found in the strategy registry, check syntax{}", format_context(.context))]
    TypeNotFound { type_name: String, context: Option<Cow<'static, str>> },

    /// The type is abstract, its constructor failed, or `init` rejected the parameters.
    #[error("'{type_name}' cannot be constructed{}: {reason}", format_context(.context))]
    NotConstructible {
        type_name: String,
        reason: Cow<'static, str>,
        source: Option<DomainError>,
        context: Option<Cow<'static, str>>,
    },

    /// The type exists but may not be instantiated from documents.
    #[error("'{type_name}' is not accessible{}: {reason}", format_context(.context))]
    AccessDenied { type_name: String, reason: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl StrategyError {
    /// The type name the failure refers to.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::TypeNotFound { type_name, .. }
            | Self::NotConstructible { type_name, .. }
            | Self::AccessDenied { type_name, .. } => type_name,
        }
    }
}
