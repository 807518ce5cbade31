//! Provides logging utilities, used by library.
//!
//! Library code logs through the [`log`] facade. This module builds the
//! [`slog`] logger those records end up in.

use std::io;

use chrono::Local;
use slog::{
    o, Drain, Duplicate, FnValue, Fuse, Level, Logger, PushFnValue, Record,
};
use slog_async::Async;
use slog_json::Json;
use slog_scope::GlobalLoggerGuard;

use crate::conf;

/// Builds JSON [`Logger`] printing records up to `level` into `w_out`, but
/// WARN and higher into `w_err`, through an [`Async`] drain buffering
/// `buffer_size` records.
///
/// Records carry `fqn`, `lvl`, `time` and `msg` fields.
pub fn new_dual_logger<W1, W2>(
    w_out: W1,
    w_err: W2,
    level: Level,
    buffer_size: usize,
) -> Logger
where
    W1: io::Write + Send + 'static,
    W2: io::Write + Send + 'static,
{
    let drain_out = Json::new(w_out).build();
    let drain_err = Json::new(w_err).build();
    let drain = Duplicate(
        drain_out.filter(|r| !r.level().is_at_least(Level::Warning)),
        drain_err.filter_level(Level::Warning),
    )
    .map(Fuse);
    let drain = drain.filter_level(level).fuse();
    let drain = Async::new(drain).chan_size(buffer_size).build().fuse();
    add_default_keys(&Logger::root(drain, o!()))
}

/// Installs the global logger configured by the provided [`conf::Log`] and
/// routes [`log`] records into it.
///
/// Returns `None` if logging is turned off. Logging stays installed while the
/// returned guard is alive.
pub fn init(conf: &conf::Log) -> Option<GlobalLoggerGuard> {
    let level = conf.level()?;
    let logger =
        new_dual_logger(io::stdout(), io::stderr(), level, conf.buffer_size);
    let guard = slog_scope::set_global_logger(logger);
    if slog_stdlog::init_with_level(facade_level(level)).is_err() {
        log::debug!("`log` facade is bound already");
    }
    Some(guard)
}

/// Converts [`slog::Level`] into the matching [`log::Level`].
fn facade_level(level: Level) -> log::Level {
    match level {
        Level::Critical | Level::Error => log::Level::Error,
        Level::Warning => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
        Level::Trace => log::Level::Trace,
    }
}

/// Adds default log record data (key-value pairs) to specified [`Logger`]:
/// - `msg`: log record message.
/// - `fqn`: path to code line that called log function.
/// - `time`: creation date and time of log record in [RFC 3339] format.
/// - `lvl`: logging level of log record.
///
/// [RFC 3339]: https://www.ietf.org/rfc/rfc3339.txt
fn add_default_keys(logger: &Logger) -> Logger {
    logger.new(o!(
        "msg" => PushFnValue(move |record : &Record, ser| {
            ser.emit(record.msg())
        }),
        "fqn" => PushFnValue(move |record : &Record, ser| {
             ser.emit(format_args!("{}:{}", record.module(), record.line()))
        }),
        "time" => PushFnValue(move |_ : &Record, ser| {
            ser.emit(Local::now().to_rfc3339())
        }),
        "lvl" => FnValue(move |rinfo : &Record| {
            rinfo.level().as_str()
        }),
    ))
}
