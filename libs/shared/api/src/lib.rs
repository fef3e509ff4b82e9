pub mod client;

pub use client::{ApiClient, HealthStatus};

// Abort-signal primitive used by every request in the workspace.
pub use tokio_util::sync::CancellationToken;
