//! Shared string constants: `OpenAPI` tags and canonical JSON keys.

pub const SYSTEM_TAG: &str = "System";
pub const FEATURES_TAG: &str = "Features";

/// Keys of the canonical feature document.
pub mod json {
    pub const UID: &str = "uid";
    pub const ENABLE: &str = "enable";
    pub const DESCRIPTION: &str = "description";
    pub const GROUP: &str = "group";
    pub const PERMISSIONS: &str = "permissions";
    pub const FLIPPING_STRATEGY: &str = "flippingStrategy";
    pub const CLASS_TYPE: &str = "classType";
    pub const INIT_PARAMS: &str = "initParams";
}
