//! Application state for the HTTP server.

use crate::db::repository::FullRepository;
use crate::models::AllocationPolicy;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Allocation policy for this deployment epoch
    pub policy: AllocationPolicy,
}

impl AppState {
    /// Create a new application state with the given repository and policy.
    pub fn new(repository: Arc<dyn FullRepository>, policy: AllocationPolicy) -> Self {
        Self { repository, policy }
    }
}
