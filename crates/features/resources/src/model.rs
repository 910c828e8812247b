use flip_derive::api_model;
use std::collections::BTreeMap;

#[api_model]
/// Canonical feature document, as returned by the read resource
pub struct FeatureDocument {
    /// Unique feature identifier
    pub uid: String,
    /// Master on/off switch
    pub enable: bool,
    /// Free-text description, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Group name, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Role identifiers, omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Activation strategy, omitted when the feature has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipping_strategy: Option<StrategyDocument>,
}

#[api_model]
/// Serialized flipping strategy
pub struct StrategyDocument {
    /// Registered strategy type name
    pub class_type: String,
    /// Parameters handed to the strategy on initialization
    #[serde(default)]
    pub init_params: BTreeMap<String, String>,
}

#[api_model]
/// Error payload of the read resource
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Requested uid, when the error concerns a single feature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}
