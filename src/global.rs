//! # Process-wide Default Logger
//!
//! A single [`Logger`] is constructed lazily on first use and shared by the
//! free functions and macros in this module. It starts from the global level
//! at the moment it is first touched, so call [`set_level_by_string`] early.
//!
//! ## Usage Examples
//!
//! ```rust
//! use clog::Context;
//!
//! clog::info!(None, "service started on port {}", 8080);
//!
//! let ctx = Context::background().with_value("rid", "r-42");
//! clog::warn!(Some(&ctx), "slow request: {}ms", 950);
//! clog::logf!(clog::Level::INFO, "r-42", "request response: {}", "hello");
//! ```
//!
//! The same macros address a specific logger with a `logger:` prefix:
//!
//! ```rust
//! let logger = clog::Logger::new();
//! clog::error!(logger: logger, None, "disk {} full", "/dev/sda1");
//! ```

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::context::Context;
use crate::level::{set_global_level, Level};
use crate::logger::Logger;

static DEFAULT: Lazy<Arc<Logger>> = Lazy::new(|| Arc::new(Logger::new()));

/// The shared default logger.
pub fn default_logger() -> &'static Logger {
    &DEFAULT
}

pub(crate) fn default_logger_arc() -> Arc<Logger> {
    Arc::clone(&DEFAULT)
}

#[track_caller]
pub fn debug(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    DEFAULT.debug(ctx, args);
}

#[track_caller]
pub fn info(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    DEFAULT.info(ctx, args);
}

#[track_caller]
pub fn warn(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    DEFAULT.warn(ctx, args);
}

#[track_caller]
pub fn error(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    DEFAULT.error(ctx, args);
}

#[track_caller]
pub fn fatal(ctx: Option<&Context>, args: fmt::Arguments<'_>) {
    DEFAULT.fatal(ctx, args);
}

#[track_caller]
pub fn log(level: Level, tag: &str, message: &str) {
    DEFAULT.log(level, tag, message);
}

#[track_caller]
pub fn logf(level: Level, tag: &str, args: fmt::Arguments<'_>) {
    DEFAULT.logf(level, tag, args);
}

/// Replace the default logger's sink.
pub fn set_output<W>(output: W)
where
    W: Write + Send + 'static,
{
    DEFAULT.set_output(output);
}

/// Set the default logger's threshold and the global level together.
pub fn set_level_by_string(level: &str) {
    let level = Level::parse(level);
    DEFAULT.set_level(level);
    set_global_level(level);
}

/// Replace the default logger's context formatter.
pub fn set_context_formatter<F>(formatter: F)
where
    F: Fn(Option<&Context>) -> String + Send + Sync + 'static,
{
    DEFAULT.set_context_formatter(formatter);
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.debug($ctx, ::std::format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::global::debug($ctx, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.info($ctx, ::std::format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::global::info($ctx, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.warn($ctx, ::std::format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::global::warn($ctx, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.error($ctx, ::std::format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::global::error($ctx, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.fatal($ctx, ::std::format_args!($($arg)+))
    };
    ($ctx:expr, $($arg:tt)+) => {
        $crate::global::fatal($ctx, ::std::format_args!($($arg)+))
    };
}

/// Unconditional formatted record with an explicit tag.
#[macro_export]
macro_rules! logf {
    (logger: $logger:expr, $level:expr, $tag:expr, $($arg:tt)+) => {
        $logger.logf($level, $tag, ::std::format_args!($($arg)+))
    };
    ($level:expr, $tag:expr, $($arg:tt)+) => {
        $crate::global::logf($level, $tag, ::std::format_args!($($arg)+))
    };
}
