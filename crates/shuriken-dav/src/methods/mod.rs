//! Per-HTTP-method handlers (§4.8). Each takes a [`Context`](crate::context::Context)
//! and returns a [`DavResult<Response>`](crate::error::DavResult); PROPFIND
//! and REPORT live in their own top-level modules since they carry the bulk
//! of this crate's logic.

pub mod delete;
pub mod get;
pub mod options;
pub mod put;
