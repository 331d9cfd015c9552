//! Top-level request dispatch (§4.4): method lookup, path sanitation,
//! `Context` construction, and conversion of a handler's `DavResult` into a
//! final `(status, headers, body)` triple. The single place a `DavError`
//! becomes an HTTP status, mirroring `handle_dav_request`'s role in the
//! donor system.

use std::collections::HashMap;
use std::sync::Arc;

use shuriken_rfc::dav::build;

use crate::context::Context;
use crate::error::{DavError, DavResult};
use crate::methods;
use crate::path;
use crate::propfind;
use crate::report::{self, ReportOutcome};
use crate::response::{FinalResponse, Response};
use crate::storage::{self, Entity, Storage};

/// Handles one request end to end. Never panics on malformed input; every
/// failure mode is a `DavError` turned into a status line by [`finalize`].
#[tracing::instrument(skip(storage, headers, body), fields(method = %method, path = %raw_path))]
pub async fn dispatch(
    method: &str,
    raw_path: &str,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    storage: Arc<dyn Storage>,
) -> FinalResponse {
    let method = method.to_ascii_uppercase();
    let path = path::sanitize(raw_path);
    let ctx = Context::new(method.clone(), path, storage).with_headers(headers).with_body(body);

    let result = match method.as_str() {
        "OPTIONS" => methods::options::handle(&ctx),
        "GET" | "HEAD" => methods::get::handle(&ctx).await,
        "PUT" => methods::put::handle(&ctx).await,
        "DELETE" => methods::delete::handle(&ctx).await,
        "PROPFIND" => propfind_handler(&ctx).await,
        "REPORT" => report_handler(&ctx).await,
        _ => Err(DavError::MethodNotAllowed),
    };

    finalize(result)
}

fn finalize(result: DavResult<Response>) -> FinalResponse {
    match result {
        Ok(response) => response.into(),
        Err(error) => Response::plain_text(error.status_code(), error.plain_body()).into(),
    }
}

#[tracing::instrument(skip_all, fields(path = %ctx.path))]
async fn propfind_handler(ctx: &Context) -> DavResult<Response> {
    let body = crate::body::decode_request_body(&ctx.body, ctx.content_type())?;
    let request = if body.trim().is_empty() {
        shuriken_rfc::dav::PropfindRequest::allprop()
    } else {
        propfind::parse_request(&body)?
    };

    let depth = storage::effective_depth(ctx.depth_header());
    let entities = ctx.storage.discover(&ctx.path, depth).await?;
    if entities.is_empty() {
        return Err(DavError::NotFound);
    }

    let user = ctx.storage.user().await;
    let multistatus = propfind::build_multistatus(ctx.storage.as_ref(), &request, &user, &ctx.path, &entities).await?;
    let xml = build::serialize_multistatus(&multistatus).map_err(|e| DavError::BadRequest(e.to_string()))?;
    Ok(Response::new(207).with_text_body("text/xml", xml))
}

#[tracing::instrument(skip_all, fields(path = %ctx.path))]
async fn report_handler(ctx: &Context) -> DavResult<Response> {
    let body = crate::body::decode_request_body(&ctx.body, ctx.content_type())?;
    let request = if body.trim().is_empty() {
        shuriken_rfc::dav::ReportRequest::NoOp
    } else {
        report::parse_request(&body)?
    };

    let entity = ctx.storage.get(&ctx.path).await?.ok_or(DavError::NotFound)?;
    let collection = match entity {
        Entity::Collection(collection) => collection,
        Entity::Item(item) => item.collection,
    };

    match report::run(ctx.storage.as_ref(), &ctx.path, &collection, &request).await? {
        ReportOutcome::Multistatus(multistatus) => {
            let xml = build::serialize_multistatus(&multistatus).map_err(|e| DavError::BadRequest(e.to_string()))?;
            Ok(Response::new(207).with_text_body("text/xml", xml))
        }
        ReportOutcome::Error(error) => {
            let xml = build::serialize_error(&error).map_err(|e| DavError::BadRequest(e.to_string()))?;
            Ok(Response::new(error.status).with_text_body("text/xml", xml))
        }
    }
}
