//! Axum plumbing shared by every slice: application state and system routes.

mod health;
pub mod router;
pub mod state;

pub use state::{ApiState, ApiStateBuilder, ApiStateError};
