use std::sync::Arc;

use salvo::async_trait;
use shuriken_dav::Storage;

use crate::error::{AppError, AppResult};

/// Injects the shared `Storage` backend into the depot, the way
/// `ConfigHandler` injects settings — one `hoop` per cross-cutting
/// dependency the DAV handler needs.
pub struct StorageHandler {
    pub storage: Arc<dyn Storage>,
}

#[async_trait]
impl salvo::Handler for StorageHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.storage.clone());
    }
}

/// ## Errors
/// Returns an error if the storage handle is not found in the depot.
pub fn get_storage_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn Storage>> {
    depot.obtain::<Arc<dyn Storage>>().cloned().map_err(|_err| {
        AppError::CoreError(shuriken_core::error::CoreError::InvariantViolation(
            "Storage backend not found in depot",
        ))
    })
}
