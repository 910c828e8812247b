use crate::error::{CodecError, CodecErrorExt};
use flip_domain::{Feature, FlippingStrategy};

/// Serializes one feature to its canonical document.
///
/// # Errors
/// Returns [`CodecError::Serialize`] if the serializer fails.
pub fn feature_to_json(feature: &Feature) -> Result<String, CodecError> {
    serde_json::to_string(feature).context(format!("Serializing feature '{}'", feature.uid()))
}

/// Serializes a feature list as a JSON array; `None` yields `[]`.
///
/// # Errors
/// Returns [`CodecError::Serialize`] if the serializer fails.
pub fn features_to_json(features: Option<&[Feature]>) -> Result<String, CodecError> {
    serde_json::to_string(features.unwrap_or_default()).context("Serializing feature array")
}

/// Serializes the `flippingStrategy` sub-document on its own.
///
/// # Errors
/// Returns [`CodecError::Serialize`] if the serializer fails.
pub fn strategy_to_json(strategy: &dyn FlippingStrategy) -> Result<String, CodecError> {
    serde_json::to_string(&strategy.to_ref()).context("Serializing flipping strategy")
}
