use flip_strategy::StrategyError;
use std::borrow::Cow;

/// Codec failures. Every parse-side variant echoes a snippet of the offending input.
#[flip_derive::flip_error]
pub enum CodecError {
    /// Unparsable text, wrong top-level type, or a missing/mistyped field.
    #[error("Cannot parse JSON as {target}{}: {reason} (input: {input})", format_context(.context))]
    MalformedDocument {
        target: &'static str,
        field: Option<Cow<'static, str>>,
        reason: Cow<'static, str>,
        input: String,
        source: Option<serde_json::Error>,
        context: Option<Cow<'static, str>>,
    },

    /// `flippingStrategy.classType` could not be resolved or constructed.
    #[error("Cannot load flipping strategy '{class_type}'{}: {source} (input: {input})", format_context(.context))]
    Strategy {
        class_type: String,
        input: String,
        source: StrategyError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Serialization failed{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

impl CodecError {
    /// True for every failure caused by the input document.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. } | Self::Strategy { .. })
    }

    /// The field the failure refers to, when one is known.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedDocument { field, .. } => field.as_deref(),
            Self::Strategy { .. } => Some("flippingStrategy.classType"),
            Self::Serialize { .. } => None,
        }
    }
}
