//! # Strategy Registry
//!
//! Resolves a flipping strategy's type name to a constructible implementation and
//! hands back an initialized instance.
//!
//! ## Architecture
//!
//! 1. **[`TypeResolver`]**: the injectable "classpath". Anything that can map a name
//!    to a [`StrategyType`] qualifies; [`StrategyCatalog`] is the in-process registry
//!    populated at startup.
//! 2. **[`StrategyLoader`]**: caches resolved types, enforces visibility rules, then
//!    constructs and initializes the strategy exactly once per call.
//! 3. **[`builtin`]**: host filters and release-date activation.
//!
//! ## Example
//!
//! ```rust
//! use flip_domain::InitParams;
//! use flip_strategy::{StrategyCatalog, StrategyLoader, builtin};
//!
//! let loader = StrategyLoader::new(StrategyCatalog::with_builtins());
//! let params = InitParams::from([("grantedClients".to_owned(), "pc1,pc2".to_owned())]);
//! let strategy = loader.resolve_and_init(builtin::CLIENT_FILTER, "F1", &params).unwrap();
//! assert_eq!(strategy.type_name(), builtin::CLIENT_FILTER);
//! ```

pub mod builtin;
mod catalog;
mod error;
mod loader;
mod resolver;

pub use crate::catalog::StrategyCatalog;
pub use crate::error::{StrategyError, StrategyErrorExt};
pub use crate::loader::StrategyLoader;
pub use crate::resolver::{Constructor, StrategyType, TypeResolver, Visibility};
