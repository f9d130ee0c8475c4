use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Startup failures for the file server
///
/// Every variant is fatal: the binary reports it and exits non-zero.
/// Per-request authentication failures are never represented here.
#[derive(Debug, Error)]
pub enum Error {
    /// A user entry without a `:` separator
    #[error("malformed user entry `{0}` (expected user:pass,user2:pass2)")]
    MalformedUserEntry(String),

    /// A user entry whose username or password is empty
    #[error("username and password must not be empty: `{0}`")]
    EmptyUserField(String),

    /// The user configuration produced no accounts
    #[error("no valid users configured, check the users setting")]
    NoUsers,

    /// The shared root does not exist
    #[error("shared path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The shared root exists but is not a directory
    #[error("shared path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// The shared root could not be resolved or inspected
    #[error("failed to access shared path {}: {source}", .path.display())]
    RootInaccessible { path: PathBuf, source: io::Error },

    /// The log file's parent directory could not be created
    #[error("failed to create log directory {}: {source}", .path.display())]
    LogDirectory { path: PathBuf, source: io::Error },

    /// The log file could not be opened for appending
    #[error("failed to open log file {}: {source}", .path.display())]
    LogFile { path: PathBuf, source: io::Error },

    /// A global subscriber was already installed
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),

    /// The listener could not bind
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    /// The server loop stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Result type alias for file server operations
pub type Result<T> = std::result::Result<T, Error>;
