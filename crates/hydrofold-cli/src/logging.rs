use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// `-q` wins over any `-v`; without flags only warnings and errors show.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Compact stderr output, plus a plain-text copy with thread ids and targets
/// when `log_file` is given. Both outputs share one level filter.
fn build_subscriber(
    verbosity: u8,
    quiet: bool,
    log_file: Option<&Path>,
) -> Result<BoxedSubscriber> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    let registry = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer);

    let Some(path) = log_file else {
        let subscriber: BoxedSubscriber = Box::new(registry);
        return Ok(subscriber);
    };
    let file = File::create(path)?;
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true);
    let subscriber: BoxedSubscriber = Box::new(registry.with(file_layer));
    Ok(subscriber)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let subscriber = build_subscriber(verbosity, quiet, log_file)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install global logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::PathBuf;
    use tracing::{debug, error, info, trace, warn};

    fn log_with(verbosity: u8, quiet: bool) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hydrofold.log");
        let subscriber = build_subscriber(verbosity, quiet, Some(&path)).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            error!("relaxation error line");
            warn!("relaxation warn line");
            info!("relaxation info line");
            debug!("relaxation debug line");
            trace!("relaxation trace line");
        });

        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn verbosity_maps_to_level_filters() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn log_file_receives_events_at_the_chosen_level() {
        let content = log_with(2, false);
        assert!(content.contains("relaxation error line"));
        assert!(content.contains("relaxation debug line"));
        assert!(!content.contains("relaxation trace line"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
        assert!(content.contains("hydrofold::logging::tests"));
        assert!(!content.contains('\u{1b}'), "file output must not carry ANSI codes");
    }

    #[test]
    fn quiet_log_file_only_keeps_errors() {
        let content = log_with(3, true);
        assert!(content.contains("relaxation error line"));
        assert!(!content.contains("relaxation warn line"));
        assert!(!content.contains("relaxation info line"));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing_parent: PathBuf = dir.path().join("no-such-dir").join("run.log");
        let result = setup_logging(0, false, Some(&missing_parent));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    #[serial]
    fn global_logger_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("global.log");
        setup_logging(1, false, Some(&path)).unwrap();
        info!("installed global logger");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("installed global logger"));

        let second = setup_logging(1, false, None);
        assert!(matches!(second, Err(CliError::Other(_))));
    }
}
