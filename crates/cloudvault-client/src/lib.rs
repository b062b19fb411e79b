//! # cloudvault-client
//!
//! HTTP client layer for the CloudVault REST API. One [`ApiClient`] attaches
//! bearer tokens, encodes JSON, form and multipart bodies, and funnels every
//! response through [`decode`], which owns the content-type check and the
//! token-expired classification.
//!
//! Endpoint wrappers live in [`api`]; wire-only request/response shapes in
//! [`dto`].

pub mod api;
pub mod client;
pub mod decode;
pub mod dto;
pub mod upload;

pub use client::{ApiClient, RequestBody};
pub use upload::UploadFile;
