//! HTTP file server with Basic authentication
//!
//! This crate shares one directory over plain HTTP. Every request passes an
//! authentication gate, then an access log, before the static file service
//! answers it. Audit and access lines go through `tracing`.

mod access_log;
mod auth;
mod config;
mod credentials;
mod error;
mod identity;
mod listing;
mod server;

pub mod logging;

#[cfg(test)]
mod test_support;

pub use access_log::access_log;
pub use auth::{auth_gate, BasicCredentials, BASIC_CHALLENGE};
pub use config::{resolve_root, ServerConfig, DEFAULT_PORT};
pub use credentials::{CredentialStore, DEFAULT_PASSWORD, DEFAULT_USERNAME};
pub use error::{Error, Result};
pub use identity::{client_identifier, RequestContext};
pub use listing::DirectoryListing;
pub use server::FileServerApi;
