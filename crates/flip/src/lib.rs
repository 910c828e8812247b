//! Facade crate for the feature toggle core.
//! Re-exports the domain, kernel, registry and codec crates and wires their defaults together.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `flip` with the `server` feature to get the HTTP read resource.
//! - Call [`codec`] to obtain a [`FeatureCodec`](json::FeatureCodec) backed by the built-in strategies.

pub use flip_domain as domain;
pub use flip_json as json;
pub use flip_kernel as kernel;
pub use flip_strategy as strategy;

use flip_domain::config::ApiConfig;
use flip_json::FeatureCodec;
use flip_strategy::{StrategyCatalog, StrategyLoader};

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use flip_kernel::server::router::system_router;
        pub use flip_resources::features_router;
    }
}

/// Build-time enabled features (by Cargo feature).
pub const ENABLED: &[&str] = &[
    #[cfg(feature = "server")]
    "server",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    ENABLED.contains(&name)
}

/// Strategy catalog holding every strategy shipped with the crate.
#[must_use]
pub fn catalog() -> StrategyCatalog {
    StrategyCatalog::with_builtins()
}

/// Codec resolving strategies through [`catalog`], restricted by the configured namespaces.
#[must_use]
pub fn codec(config: &ApiConfig) -> FeatureCodec {
    let catalog = catalog();
    tracing::info!(
        strategies = catalog.len(),
        allowed_namespaces = ?config.strategy.allowed_namespaces,
        "Strategy registry ready"
    );
    FeatureCodec::new(StrategyLoader::from_config(catalog, &config.strategy))
}
