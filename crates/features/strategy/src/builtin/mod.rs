//! Strategies shipped with the registry.

mod host_filter;
mod release_date;

pub use host_filter::{ClientFilterStrategy, ServerFilterStrategy};
pub use release_date::ReleaseDateFlipStrategy;

pub const CLIENT_FILTER: &str = "flip::strategy::ClientFilterStrategy";
pub const SERVER_FILTER: &str = "flip::strategy::ServerFilterStrategy";
pub const RELEASE_DATE: &str = "flip::strategy::ReleaseDateFlipStrategy";

/// Context key read by [`ClientFilterStrategy`].
pub const CLIENT_HOSTNAME: &str = "clientHostName";
/// Context key read by [`ServerFilterStrategy`].
pub const SERVER_HOSTNAME: &str = "serverHostName";
/// Context key overriding the clock for [`ReleaseDateFlipStrategy`].
pub const NOW: &str = "now";
