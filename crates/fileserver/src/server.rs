//! Handler chain and listener

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::access_log::access_log;
use crate::auth::auth_gate;
use crate::config::ServerConfig;
use crate::credentials::CredentialStore;
use crate::error::{Error, Result};
use crate::listing::DirectoryListing;

/// Authenticated file server for a single shared directory
#[derive(Clone)]
pub struct FileServerApi {
    root: PathBuf,
    credentials: Arc<CredentialStore>,
}

impl FileServerApi {
    /// Create a new file server
    ///
    /// # Arguments
    /// * `root` - Directory served at `/`, already validated
    /// * `credentials` - Accounts allowed to read it
    pub fn new(root: PathBuf, credentials: Arc<CredentialStore>) -> Self {
        Self { root, credentials }
    }

    /// Build from a validated [`ServerConfig`]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.root.clone(), config.credentials.clone())
    }

    /// Create the axum router for every path
    ///
    /// Auth gate, then access log, then request tracing, then the static
    /// file service with its directory listing fallback. Layers added last
    /// run first, so the gate sees every request before anything else.
    pub fn router(&self) -> Router {
        let files = ServeDir::new(&self.root).fallback(DirectoryListing::new(self.root.clone()));

        Router::new()
            .fallback_service(files)
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(access_log))
            .layer(middleware::from_fn_with_state(
                self.credentials.clone(),
                auth_gate,
            ))
    }

    /// Bind `addr` and serve until the process is interrupted
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        tracing::info!("File server listening on {}", addr);

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }
}
