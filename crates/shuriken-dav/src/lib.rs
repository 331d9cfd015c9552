//! The method-dispatch and protocol-response engine for a `WebDAV` server
//! with `CalDAV`/`CardDAV` extensions: HTTP method routing, path sanitation,
//! the `PROPFIND` property-resolution engine, the `REPORT` engine for
//! multiget/sync-collection, and conditional-request semantics for
//! `PUT`/`DELETE`.
//!
//! Storage, the HTTP server harness, authentication, and the vCard/iCalendar
//! body parsers are external collaborators, reached only through the
//! [`Storage`] trait and the bytes a handler is handed.

mod body;
mod context;
mod dispatcher;
mod error;
mod memory;
mod methods;
mod path;
mod propfind;
mod report;
mod response;
mod storage;
mod xml;

pub use context::Context;
pub use dispatcher::dispatch;
pub use error::{DavError, DavResult};
pub use memory::MemoryStorage;
pub use response::{Body, FinalResponse, Response};
pub use storage::{Collection, CollectionTag, Depth, Entity, Item, ItemTag, Storage};
