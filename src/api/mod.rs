//! HTTP surface for the extraction service.
//!
//! The upload collaborator: receives a multipart workbook plus a report
//! type, runs the matching transform, and returns the record list verbatim.
//! Run with `solreport-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
