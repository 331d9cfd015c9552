//! GET and HEAD (§4.8). HEAD returns the identical triple; stripping the
//! body is the external harness's job.

use crate::context::Context;
use crate::error::DavResult;
use crate::response::Response;
use crate::storage::Entity;
use crate::xml;

#[tracing::instrument(skip(ctx), fields(path = %ctx.path))]
pub async fn handle(ctx: &Context) -> DavResult<Response> {
    let Some(entity) = ctx.storage.get(&ctx.path).await? else {
        return Ok(Response::plain_text(404, "The requested resource could not be found."));
    };

    let (content_type, content_disposition, etag) = match &entity {
        Entity::Collection(collection) => {
            let Some(tag) = collection.tag else {
                tracing::debug!("directory listing requested, not supported");
                return Ok(Response::plain_text(403, "Directory listings are not supported."));
            };
            let disposition = xml::content_disposition_attachment(&xml::collection_filename(&collection.slug, tag));
            (
                xml::collection_mime(tag).to_string(),
                Some(disposition),
                ctx.storage.collection_etag(collection).await?,
            )
        }
        Entity::Item(item) => (xml::item_mime(item.tag).to_string(), None, ctx.storage.item_etag(item).await?),
    };

    let last_modified = ctx.storage.get_last_modified(&entity).await?;
    let body = ctx.storage.serialize(&entity).await?;

    let mut response = Response::new(200)
        .with_text_body(content_type, body)
        .with_header("Last-Modified", last_modified)
        .with_header("ETag", etag);
    if let Some(disposition) = content_disposition {
        response = response.with_header("Content-Disposition", disposition);
    }
    Ok(response)
}
