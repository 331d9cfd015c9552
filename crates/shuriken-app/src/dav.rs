//! Bridges a `salvo` request/response pair to [`shuriken_dav::dispatch`].
//! This module is the entire HTTP harness: no routing logic, no method
//! filtering beyond what the engine itself does — every method and path
//! reaches the same handler, which hands raw request parts to the engine
//! and writes its `FinalResponse` back out unchanged.

use std::collections::HashMap;

use salvo::async_trait;
use salvo::http::StatusCode;

use crate::storage_handler::get_storage_from_depot;

pub struct DavHandler;

#[async_trait]
impl salvo::Handler for DavHandler {
    #[tracing::instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let storage = match get_storage_from_depot(depot) {
            Ok(storage) => storage,
            Err(error) => {
                tracing::error!(%error, "storage backend missing from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                return;
            }
        };

        let method = req.method().as_str().to_string();
        let path = req.uri().path().to_string();
        let headers: HashMap<String, String> = req
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str().to_ascii_lowercase(), value.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = req.payload().await.map(|bytes| bytes.to_vec()).unwrap_or_default();

        let response = shuriken_dav::dispatch(&method, &path, headers, body, storage).await;

        res.status_code(StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
        for (name, value) in response.headers {
            res.add_header(name, value, true).ok();
        }
        res.write_body(response.body).ok();
    }
}
