//! Storage backend factory.
//!
//! Creates the appropriate allocation store based on configuration.

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppError;
use crate::storage::file::FileAllocationStore;
use crate::storage::postgres::PgAllocationStore;
use crate::storage::traits::AllocationStore;

/// Create an allocation store based on configuration.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be initialized or fails
/// its health check.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn AllocationStore>, AppError> {
    match config.backend {
        StorageBackend::File => {
            let store = FileAllocationStore::new(&config.file).map_err(AppError::Storage)?;
            store.health_check().await.map_err(AppError::Storage)?;
            Ok(Arc::new(store))
        }
        StorageBackend::PostgreSQL => {
            let store = PgAllocationStore::connect(&config.postgresql)
                .await
                .map_err(AppError::Storage)?;
            store.health_check().await.map_err(AppError::Storage)?;
            Ok(Arc::new(store))
        }
    }
}
