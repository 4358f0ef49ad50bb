//! src/logging.rs
//! ============================================================================
//! # Logging: tracing subscriber setup
//!
//! Installs a `tracing_subscriber` registry with a daily rolling file layer and
//! an optional stderr layer. Both use the compact sequence-numbered
//! formatter `[SEQ] LEVEL [file:line module] message`.

use std::{
    io,
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::Metadata;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    EnvFilter,
    filter::Directive,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    prelude::*,
    registry::LookupSpan,
};

use crate::{config::LoggingConfig, error::AppError};

const LOG_FILE_PREFIX: &str = "fleet";

static SEQ: AtomicU64 = AtomicU64::new(1);

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`. Keep the returned guard alive
    /// until exit so buffered lines are flushed.
    pub fn init_tracing(config: &LoggingConfig) -> Result<WorkerGuard, AppError> {
        validate_log_directory(&config.dir)?;

        // daily rolling file appender → <dir>/fleet.YYYY-MM-DD
        let file = rolling::daily(&config.dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(file);

        let file_layer = fmt::layer()
            .event_format(SeqFileMod)
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(build_filter(&config.level)?);

        let stderr_layer = if config.stderr {
            Some(
                fmt::layer()
                    .event_format(SeqFileMod)
                    .with_writer(io::stderr)
                    .with_ansi(true)
                    .with_filter(build_filter(&config.level)?),
            )
        } else {
            None
        };

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .try_init()
            .map_err(|e| AppError::Logging(e.to_string()))?;

        Ok(guard)
    }
}

/// `RUST_LOG` wins; otherwise the configured level.
fn build_filter(default_level: &str) -> Result<EnvFilter, AppError> {
    let directive: Directive = default_level
        .parse()
        .map_err(|e| AppError::invalid_input("logging.level", format!("{e}")))?;

    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}

fn validate_log_directory(path: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(path)
        .map_err(|e| AppError::Logging(format!("cannot create {}: {e}", path.display())))?;

    let meta = std::fs::metadata(path)?;
    if meta.permissions().readonly() {
        return Err(AppError::Logging(format!(
            "log directory {} is read-only",
            path.display()
        )));
    }

    Ok(())
}

/// Custom formatter: `[SEQ] LEVEL [file:line mod::path] message`
struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        // monotonically-increasing sequence number
        let seq: u64 = SEQ.fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        // all key-value pairs for this event, message first
        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_rejects_garbage_level() {
        assert!(build_filter("info").is_ok());
        assert!(matches!(
            build_filter("fleet=loudest"),
            Err(AppError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_log_directory_is_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logs = dir.path().join("a").join("logs");

        validate_log_directory(&logs).expect("create");
        assert!(logs.is_dir());
    }
}
