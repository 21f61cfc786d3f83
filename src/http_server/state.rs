//! Shared handler state

use std::sync::Arc;

use super::errors::ApiError;
use crate::repository::{Repositories, RepositoryResult};
use crate::storage::DocumentStore;

/// State shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repositories: Repositories::new(store),
        }
    }
}

/// Runs a repository call on the blocking pool.
///
/// Store calls do file I/O and take locks, so they stay off the async
/// workers.
pub(crate) async fn run_blocking<F, T>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ApiError::Internal(format!("repository task failed: {}", e)))?
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;

    #[tokio::test]
    async fn test_run_blocking_passes_value_through() {
        let value = run_blocking(|| Ok(41 + 1)).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_blocking_maps_errors() {
        let err = run_blocking::<_, ()>(|| Err(RepositoryError::CreateFailed { collection: "meals" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::CreateFailed(_)));
    }
}
