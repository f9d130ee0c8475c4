use std::path::PathBuf;

use clap::Parser;
use fileserver::DEFAULT_PORT;

#[derive(Parser, Debug)]
#[command(name = "authserve")]
#[command(about = "Share a directory over HTTP behind Basic authentication")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "FILESERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory to share
    #[arg(long, env = "FILESERVER_PATH", default_value = "./")]
    pub path: PathBuf,

    /// Accounts as user1:pass1,user2:pass2 (default admin:123456)
    #[arg(long, env = "FILESERVER_USERS", default_value = "")]
    pub users: String,

    /// Log file, e.g. /var/log/file-server.log (console only when empty)
    #[arg(long, env = "FILESERVER_LOGPATH", default_value = "")]
    pub logpath: String,
}
