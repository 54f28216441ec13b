/*
 * Logging Module
 *
 * Installs the tracing subscriber: RUST_LOG filtering (default "info"),
 * compact stderr output, and an optional daily-rolling log file when
 * MOVERS_LOG_FILE names a path. Panics are routed through tracing.
 */

use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_ENV: &str = "MOVERS_LOG_FILE";

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    let file_layer = env::var(LOG_FILE_ENV).ok().map(|log_path| {
        let path = Path::new(&log_path);
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
            path.parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new(".")),
            path.file_name().unwrap_or(OsStr::new("movers.log")),
        ));
        let _ = FILE_GUARD.set(guard);

        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_level(true)
            .compact()
    });

    // A second init (e.g. from tests) keeps the first subscriber
    if tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "<unknown>".to_string());
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "<non-string panic>".to_string()
        };
        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!("panic at {location}: {message}\nBacktrace:\n{backtrace:?}");
    }));
}
