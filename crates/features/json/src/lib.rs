//! # Feature JSON Codec
//!
//! Canonical text form of [`Feature`](flip_domain::Feature) documents:
//!
//! ```json
//! {
//!   "uid": "F1",
//!   "enable": true,
//!   "description": "optional",
//!   "group": "optional",
//!   "permissions": ["ADMIN"],
//!   "flippingStrategy": { "classType": "flip::strategy::ClientFilterStrategy", "initParams": {} }
//! }
//! ```
//!
//! * **Encoding** ([`feature_to_json`], [`features_to_json`]) is driven by the
//!   domain's `Serialize` impl; absent optional fields are omitted.
//! * **Decoding** ([`FeatureCodec`]) parses a generic JSON value first, then reads
//!   fields by name and rebuilds strategies through the
//!   [`StrategyLoader`](flip_strategy::StrategyLoader).

mod decode;
mod encode;
mod error;

pub use crate::decode::FeatureCodec;
pub use crate::encode::{feature_to_json, features_to_json, strategy_to_json};
pub use crate::error::{CodecError, CodecErrorExt};
