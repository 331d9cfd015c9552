//! OPTIONS (§4.8).

use crate::context::Context;
use crate::error::DavResult;
use crate::response::Response;

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PROPFIND, PUT, REPORT";
const DAV_COMPLIANCE: &str = "1, 2, 3, calendar-access, addressbook, extended-mkcol";

#[tracing::instrument(skip_all, fields(path = %ctx.path))]
pub fn handle(ctx: &Context) -> DavResult<Response> {
    Ok(Response::new(200)
        .with_header("Allow", ALLOWED_METHODS)
        .with_header("DAV", DAV_COMPLIANCE))
}
