use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// A configured subscriber, plus the guard that flushes the log file when
/// dropped.
pub struct LogSetup {
    pub subscriber: Box<dyn Subscriber + Send + Sync>,
    pub guard: Option<WorkerGuard>,
}

/// Build the subscriber without installing it. With `debug` the level is
/// `debug` and `RUST_LOG` may override it; otherwise the level is forced to
/// `info`. When `log_file` is given, output is mirrored into that file
/// through a non-blocking writer.
pub fn build(debug: bool, log_file: Option<PathBuf>) -> LogSetup {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let file_target = log_file.and_then(|path| {
        let dir = path.parent()?.to_path_buf();
        let name = path.file_name()?.to_owned();
        Some((dir, name))
    });

    match file_target {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::io::stderr.and(writer))
                .finish();
            LogSetup {
                subscriber: Box::new(subscriber),
                guard: Some(guard),
            }
        }
        None => LogSetup {
            subscriber: Box::new(tracing_subscriber::fmt().with_env_filter(filter).finish()),
            guard: None,
        },
    }
}

/// Initialise logging for the process. Only the first call takes effect.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let setup = build(debug, log_file);
    if tracing::subscriber::set_global_default(setup.subscriber).is_ok() {
        if let Some(guard) = setup.guard {
            let _ = FILE_GUARD.set(guard);
        }
    }
}

/// Initialise logging from the loaded settings.
pub fn init_from_settings(settings: &crate::settings::WhiteboardSettings) {
    init(settings.debug_logging, settings.log_file.clone());
}
