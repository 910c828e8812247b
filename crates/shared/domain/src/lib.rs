//! # Domain Models
//!
//! Pure feature-toggle types with minimal dependencies (`serde`, error derive).
//! Keep it lean: no I/O, networking, or registry logic, just data and simple helpers.

pub mod config;
pub mod constants;
mod error;
pub mod feature;
pub mod strategy;

pub use crate::error::{DomainError, DomainErrorExt};
pub use crate::feature::Feature;
pub use crate::strategy::{FlippingContext, FlippingStrategy, InitParams, NamedStrategy, StrategyRef};
