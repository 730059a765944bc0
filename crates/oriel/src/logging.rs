//! Logging setup for the session binary.
//
// File logging goes into a timestamped folder under the platform data
// directory; console output is optional and colored. Call `logging::init`
// once at the start of main and keep the returned guard alive for the
// program's duration.

use chrono::Local;
use directories::ProjectDirs;
use std::fs;
use tracing::Subscriber;
use tracing_subscriber::fmt::{
    format::{FormatEvent, FormatFields, Writer},
    FmtContext,
};
use tracing_subscriber::registry::LookupSpan;

#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Initializes the tracing subscriber. Returns a guard when file logging is
/// active; dropping it stops the background log writer.
pub fn init(log_to_file: bool, console: bool) -> Option<LogGuard> {
    use tracing_subscriber::prelude::*;

    let env_filter = match std::env::var("RUST_LOG").ok() {
        Some(val) => tracing_subscriber::EnvFilter::new(val),
        None => tracing_subscriber::EnvFilter::new("info"),
    };

    let (file_layer, guard) = if log_to_file {
        let proj_dirs = ProjectDirs::from("org", "Oriel", "Oriel")
            .expect("Could not determine app data directory");
        let logs_dir = proj_dirs.data_dir().join("logs");
        let now = Local::now();
        let log_folder = logs_dir.join(format!("{}", now.format("%Y-%m-%d_%H-%M-%S")));
        if let Err(e) = fs::create_dir_all(&log_folder) {
            eprintln!("Failed to create log directory: {e}");
        }
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_folder.join("oriel.log"))
            .expect("Failed to open oriel.log for writing");
        let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

        // File log: plain formatting, no ANSI codes
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true);
        (Some(layer), Some(LogGuard(guard)))
    } else {
        (None, None)
    };

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .event_format(ConsoleFormatter)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}

/// Compact colored formatter for console output.
pub struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let (level_str, level_color) = match *meta.level() {
            tracing::Level::ERROR => ("ERROR", "\x1b[1;91m"),
            tracing::Level::WARN => ("WARN ", "\x1b[1;93m"),
            tracing::Level::INFO => ("INFO ", "\x1b[1;94m"),
            tracing::Level::DEBUG => ("DEBUG", "\x1b[1;92m"),
            tracing::Level::TRACE => ("TRACE", "\x1b[1;95m"),
        };
        let now = Local::now();
        write!(writer, "\x1b[2;36m{}\x1b[0m ", now.format("%H:%M:%S%.3f"))?;
        write!(writer, "{}{}\x1b[0m ", level_color, level_str)?;
        write!(writer, "\x1b[2;33m{}\x1b[0m: ", meta.target())?;

        // Collect fields space-separated rather than key=value formatted.
        struct MsgVisitor(String);
        impl tracing_subscriber::field::Visit for MsgVisitor {
            fn record_debug(
                &mut self,
                _field: &tracing::field::Field,
                value: &dyn std::fmt::Debug,
            ) {
                if !self.0.is_empty() {
                    self.0.push(' ');
                }
                use std::fmt::Write;
                let _ = write!(self.0, "{:?}", value);
            }
            fn record_str(&mut self, _field: &tracing::field::Field, value: &str) {
                if !self.0.is_empty() {
                    self.0.push(' ');
                }
                self.0.push_str(value);
            }
        }
        let mut visitor = MsgVisitor(String::new());
        event.record(&mut visitor);
        write!(writer, "{}", visitor.0.trim())?;
        writeln!(writer)
    }
}
