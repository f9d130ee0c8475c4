//! Validated startup configuration

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::error::{Error, Result};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Everything the server needs, checked once before anything binds
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces)
    pub port: u16,
    /// Canonical, existing directory to share
    pub root: PathBuf,
    /// Accounts allowed to read the shared tree
    pub credentials: Arc<CredentialStore>,
    /// Optional log file, in addition to the console
    pub log_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Validate raw settings
    ///
    /// # Arguments
    /// * `port` - Listening port
    /// * `root` - Directory to share, relative paths resolve against the cwd
    /// * `users` - `user:pass,user2:pass2`, empty for the fallback account
    /// * `log_path` - Log file path, empty for console only
    pub fn new(port: u16, root: &Path, users: &str, log_path: &str) -> Result<Self> {
        let credentials = CredentialStore::parse(users)?;
        let root = resolve_root(root)?;
        let log_path = (!log_path.is_empty()).then(|| PathBuf::from(log_path));

        Ok(Self {
            port,
            root,
            credentials: Arc::new(credentials),
            log_path,
        })
    }

    /// Address the listener binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Resolve the shared root to a canonical directory
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = root.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::RootNotFound(root.to_path_buf()),
        _ => Error::RootInaccessible {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    if !resolved.is_dir() {
        return Err(Error::RootNotDirectory(resolved));
    }

    Ok(resolved)
}
