//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, the feature store contract,
//! and (behind `server`) the Axum state and system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use flip_kernel::config::load_config;
//! use flip_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;
pub mod store;

pub use flip_domain as domain;
