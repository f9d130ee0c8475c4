//! Console and optional file log sinks

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::{Error, Result};

/// Target of the auth and access lines, never filtered below `info`
pub const AUDIT_TARGET: &str = "fileserver::audit";

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info";

/// Timestamp prefix of every log line
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Install the global subscriber
///
/// Logs always go to stdout. With a `log_path` every line is also appended
/// to that file; its parent directory is created first. Lines read
/// `<timestamp> <message>` with no level or target in between.
///
/// # Returns
/// * `Ok(Some(guard))` - File sink active, keep the guard alive until exit
/// * `Ok(None)` - Console only
pub fn init(log_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref())?;

    let console = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_level(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));

    let (file_layer, guard) = match log_path {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_level(false)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::LoggingInit(e.to_string()))?;

    Ok(guard)
}

/// Filter from a `RUST_LOG` style string, with audit lines always enabled
///
/// An unparsable `raw` falls back to the default filter.
pub fn build_filter(raw: Option<&str>) -> Result<EnvFilter> {
    let filter = raw
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let audit: Directive = format!("{}=info", AUDIT_TARGET)
        .parse()
        .map_err(|e| Error::LoggingInit(format!("invalid audit directive: {}", e)))?;

    Ok(filter.add_directive(audit))
}

/// Open `path` for appending, creating missing parent directories
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| Error::LogDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LogCapture;
    use std::io::Write;

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/server.log");

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "first").unwrap();
        drop(file);

        assert!(path.is_file());
    }

    #[test]
    fn test_open_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.log");

        writeln!(open_log_file(&path).unwrap(), "one").unwrap();
        writeln!(open_log_file(&path).unwrap(), "two").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_audit_lines_survive_restrictive_filter() {
        let capture = LogCapture::default();
        let subscriber = tracing_subscriber::registry()
            .with(build_filter(Some("warn")).unwrap())
            .with(
                fmt::layer()
                    .with_writer(capture.clone())
                    .with_ansi(false)
                    .without_time()
                    .with_level(false)
                    .with_target(false),
            );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: AUDIT_TARGET, "[10.0.0.1] file access - path: /a");
            tracing::info!("startup chatter");
            tracing::warn!("still shown");
        });

        assert_eq!(
            capture.lines(),
            vec!["[10.0.0.1] file access - path: /a", "still shown"]
        );
    }

    #[test]
    fn test_invalid_filter_falls_back_to_default() {
        assert!(build_filter(Some("=!=garbage[")).is_ok());
        assert!(build_filter(None).is_ok());
    }

    #[test]
    fn test_file_lines_start_with_timestamp_then_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/server.log");

        let guard = init(Some(&path)).unwrap();
        tracing::info!(
            target: AUDIT_TARGET,
            "[10.0.0.1] auth succeeded - user: alice (path: /a)"
        );
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents
            .lines()
            .find(|line| line.contains("auth succeeded"))
            .unwrap();
        assert!(is_timestamp(&line[..19]), "line: {:?}", line);
        assert_eq!(
            &line[19..],
            " [10.0.0.1] auth succeeded - user: alice (path: /a)"
        );
    }

    /// `YYYY/MM/DD HH:MM:SS`
    fn is_timestamp(text: &str) -> bool {
        text.len() == 19
            && text.char_indices().all(|(i, c)| match i {
                4 | 7 => c == '/',
                10 => c == ' ',
                13 | 16 => c == ':',
                _ => c.is_ascii_digit(),
            })
    }

    #[test]
    fn test_directory_creation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = open_log_file(&blocker.join("sub/server.log"));
        assert!(matches!(result, Err(Error::LogDirectory { .. })));
    }
}
