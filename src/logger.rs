//! # Logger
//!
//! A [`Logger`] owns four pieces of configuration:
//!
//! - **threshold**: the most verbose [`Level`] it still emits, stored in an
//!   atomic so it can be changed from any thread while others are logging
//! - **sink**: any `Write + Send` destination, standard output by default
//! - **context formatter**: turns the optional per-call [`Context`] into the
//!   bracketed tag, `-` by default
//! - **call-stack flag**: whether records end with `(file:line)`
//!
//! ## Emission
//!
//! The leveled methods (`debug`, `info`, `warn`, `error`, `fatal`) check the
//! threshold first. A suppressed call returns before the context formatter
//! runs and before the `fmt::Arguments` are rendered, so disabled logging
//! costs one atomic load.
//!
//! [`Logger::log`] and [`Logger::logf`] skip the threshold and take a tag
//! directly.
//!
//! Emission never fails from the caller's point of view: sink errors are
//! dropped and a poisoned sink lock is recovered.
//!
//! ## Configuration
//!
//! Setters take `&self` and return `&Self`, so a shared logger can be
//! reconfigured in place and calls can be chained:
//!
//! ```rust
//! use clog::{Level, Logger, MemorySink};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new();
//! logger.set_output(sink.clone()).hide_callstack();
//! logger.set_level(Level::DEBUG);
//! logger.debug(None, format_args!("processing {} items", 3));
//! assert!(sink.contents().contains("processing 3 items"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::Local;

use crate::caller::{CallSite, CallerResolver, TrackedCaller};
use crate::context::{default_context_formatter, Context, ContextFormatter};
use crate::format::format_record;
use crate::level::{global_level, Level};

/// Leveled logger writing one line per record to a replaceable sink.
pub struct Logger {
    threshold: AtomicU32,
    hide_callstack: AtomicBool,
    sink: Mutex<Box<dyn Write + Send>>,
    context_formatter: RwLock<ContextFormatter>,
    resolver: RwLock<Arc<dyn CallerResolver>>,
}

impl Logger {
    /// Logger at the current global level, writing to stdout, tagging every
    /// record with `-` and showing call sites.
    pub fn new() -> Self {
        Logger {
            threshold: AtomicU32::new(global_level().as_u32()),
            hide_callstack: AtomicBool::new(false),
            sink: Mutex::new(Box::new(io::stdout())),
            context_formatter: RwLock::new(Arc::new(default_context_formatter)),
            resolver: RwLock::new(Arc::new(TrackedCaller)),
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        Level::from_u32(self.threshold.load(Ordering::Relaxed))
    }

    /// Store a new threshold. Any value is accepted.
    pub fn set_level(&self, level: Level) {
        self.threshold.store(level.as_u32(), Ordering::Relaxed);
    }

    /// Parse and apply a level name; unrecognized names mean `info`.
    pub fn set_level_by_string(&self, level: &str) {
        self.set_level(Level::parse(level));
    }

    /// Whether a record at `level` would currently be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        self.level().permits(level)
    }

    /// Replace the function that turns a per-call context into the tag.
    pub fn set_context_formatter<F>(&self, formatter: F) -> &Self
    where
        F: Fn(Option<&Context>) -> String + Send + Sync + 'static,
    {
        *self
            .context_formatter
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(formatter);
        self
    }

    /// Send subsequent records to `output`.
    pub fn set_output<W>(&self, output: W) -> &Self
    where
        W: Write + Send + 'static,
    {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = Box::new(output);
        self
    }

    /// Stop appending `(file:line)` to records.
    pub fn hide_callstack(&self) -> &Self {
        self.hide_callstack.store(true, Ordering::Relaxed);
        self
    }

    /// Resume appending `(file:line)` to records.
    pub fn show_callstack(&self) -> &Self {
        self.hide_callstack.store(false, Ordering::Relaxed);
        self
    }

    /// Whether `(file:line)` suffixes are currently suppressed.
    pub fn is_callstack_hidden(&self) -> bool {
        self.hide_callstack.load(Ordering::Relaxed)
    }

    /// Replace the policy that turns a captured caller into a file and line.
    pub fn set_caller_resolver<R>(&self, resolver: R) -> &Self
    where
        R: CallerResolver + 'static,
    {
        *self.resolver.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(resolver);
        self
    }

    /// Flush the sink, ignoring errors.
    pub fn flush(&self) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = sink.flush();
    }

    #[track_caller]
    pub fn debug(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        self.level_context_log(ctx, Level::DEBUG, args, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        self.level_context_log(ctx, Level::INFO, args, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        self.level_context_log(ctx, Level::WARN, args, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        self.level_context_log(ctx, Level::ERROR, args, Location::caller());
    }

    /// Emit at `FATAL`. The process is not terminated.
    #[track_caller]
    pub fn fatal(&self, ctx: Option<&Context>, args: fmt::Arguments<'_>) {
        self.level_context_log(ctx, Level::FATAL, args, Location::caller());
    }

    /// Write `message` regardless of the threshold.
    #[track_caller]
    pub fn log(&self, level: Level, tag: &str, message: &str) {
        self.write_record(level, tag, message, Location::caller());
    }

    /// Write formatted `args` regardless of the threshold.
    #[track_caller]
    pub fn logf(&self, level: Level, tag: &str, args: fmt::Arguments<'_>) {
        self.write_record(level, tag, &render(args), Location::caller());
    }

    fn level_context_log(
        &self,
        ctx: Option<&Context>,
        level: Level,
        args: fmt::Arguments<'_>,
        caller: &'static Location<'static>,
    ) {
        if !self.enabled(level) {
            return;
        }
        let tag = self.context_tag(ctx);
        self.write_record(level, &tag, &render(args), caller);
    }

    fn context_tag(&self, ctx: Option<&Context>) -> String {
        // Clone out of the lock so a formatter that logs cannot deadlock.
        let formatter = self
            .context_formatter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        formatter(ctx)
    }

    fn write_record(
        &self,
        level: Level,
        tag: &str,
        message: &str,
        caller: &'static Location<'static>,
    ) {
        let location = if self.is_callstack_hidden() {
            None
        } else {
            let resolver = self
                .resolver
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            Some(resolver.resolve(caller))
        };
        self.emit(level, tag, message, location);
    }

    /// Format and write one record. `location` follows the convention of
    /// [`format_record`].
    pub(crate) fn emit(
        &self,
        level: Level,
        tag: &str,
        message: &str,
        location: Option<Option<CallSite>>,
    ) {
        let mut line = format_record(&Local::now(), level, tag, message, location);
        line.push('\n');

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = sink.write_all(line.as_bytes());
    }

    /// Run an already-known site through the configured resolver.
    pub(crate) fn resolve_site(&self, site: CallSite) -> Option<CallSite> {
        let resolver = self
            .resolver
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        resolver.resolve_site(site)
    }

    pub(crate) fn tag_without_context(&self) -> String {
        self.context_tag(None)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("hide_callstack", &self.is_callstack_hidden())
            .finish_non_exhaustive()
    }
}

fn render(args: fmt::Arguments<'_>) -> Cow<'static, str> {
    match args.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(args.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caller::UnknownCaller;
    use crate::sink::MemorySink;

    fn capture() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::new();
        logger.set_level(Level::INFO);
        logger.set_output(sink.clone());
        (logger, sink)
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_default_threshold_filters_debug() {
        let (logger, sink) = capture();
        logger.debug(None, format_args!("x"));
        assert!(sink.take().is_empty());

        logger.info(None, format_args!("y"));
        let out = sink.take();
        assert!(out.contains("INFO"));
        assert!(out.contains("] y"));
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_set_level_by_string() {
        let (logger, sink) = capture();
        logger.set_level_by_string("debug");
        logger.debug(None, format_args!("z"));
        let out = sink.take();
        assert!(out.contains("DEBUG"));
        assert!(out.contains("z"));

        logger.set_level_by_string("nonsense");
        assert_eq!(logger.level(), Level::INFO);
    }

    #[test]
    fn test_threshold_matrix() {
        let (logger, sink) = capture();
        let levels = [
            Level::FATAL,
            Level::ERROR,
            Level::WARN,
            Level::INFO,
            Level::DEBUG,
        ];
        for threshold in levels {
            logger.set_level(threshold);
            for severity in levels {
                match severity.as_u32() {
                    0 => logger.fatal(None, format_args!("m")),
                    1 => logger.error(None, format_args!("m")),
                    2 => logger.warn(None, format_args!("m")),
                    3 => logger.info(None, format_args!("m")),
                    _ => logger.debug(None, format_args!("m")),
                }
                let written = !sink.take().is_empty();
                assert_eq!(
                    written,
                    threshold >= severity,
                    "threshold {} severity {}",
                    threshold,
                    severity
                );
            }
        }
    }

    #[test]
    fn test_suppressed_call_skips_context_formatter() {
        use std::sync::atomic::AtomicUsize;

        let (logger, sink) = capture();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        logger.set_context_formatter(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            "tag".to_string()
        });

        logger.debug(None, format_args!("hidden"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(sink.is_empty());

        logger.warn(None, format_args!("shown"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sink.take().contains("[tag] shown"));
    }

    #[test]
    fn test_logf_ignores_threshold() {
        let (logger, sink) = capture();
        logger.set_level(Level::FATAL);
        logger.logf(Level::INFO, "abc-123", format_args!("val={}", 7));
        let out = sink.take();
        assert!(out.contains("[abc-123]"));
        assert!(out.contains("val=7"));

        logger.log(Level::DEBUG, "t", "raw");
        assert!(sink.take().contains("DEBUG [t] raw"));
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let (logger, sink) = capture();
        logger.hide_callstack();
        logger.info(None, format_args!("line1\nline2\rline3"));
        let out = sink.take();
        assert_eq!(out.matches('\n').count(), 1);
        assert!(!out.contains('\r'));
        assert!(out.contains("line1\\nline2\\rline3"));
    }

    #[test]
    fn test_callstack_suffix_points_here() {
        let (logger, sink) = capture();
        let line = line!() + 1;
        logger.info(None, format_args!("where"));
        let out = sink.take();
        assert!(
            out.trim_end().ends_with(&format!("(logger.rs:{})", line)),
            "{}",
            out
        );

        let line = line!() + 1;
        logger.log(Level::INFO, "-", "where");
        assert!(sink.take().trim_end().ends_with(&format!("(logger.rs:{})", line)));
    }

    #[test]
    fn test_hidden_callstack_has_no_suffix() {
        let (logger, sink) = capture();
        logger.hide_callstack().set_context_formatter(|_| "ctx".to_string());
        logger.warn(None, format_args!("log_content"));
        let out = sink.take();
        assert!(out.trim_end().ends_with("WARN  [ctx] log_content"), "{}", out);

        logger.show_callstack();
        logger.warn(None, format_args!("log_content"));
        assert!(sink.take().trim_end().ends_with(')'));
    }

    #[test]
    fn test_unresolved_caller_placeholder() {
        let (logger, sink) = capture();
        logger.set_caller_resolver(UnknownCaller);
        logger.error(None, format_args!("boom"));
        assert!(sink.take().trim_end().ends_with("boom (???:0)"));
    }

    #[test]
    fn test_out_of_range_level() {
        let (logger, sink) = capture();
        logger.set_level(Level::from_u32(42));
        assert!(logger.enabled(Level::DEBUG));
        logger.log(Level::from_u32(9), "-", "odd");
        assert!(sink.take().contains("UNKNOWN [-] odd"));
    }

    #[test]
    fn test_failing_sink_is_silent() {
        let logger = Logger::new();
        logger.set_output(FailingWriter);
        logger.set_level(Level::DEBUG);
        logger.fatal(None, format_args!("lost"));
        logger.log(Level::INFO, "-", "lost");
        logger.flush();
    }

    /// Panics on its first write, then forwards to `sink`.
    struct PanicOnce {
        panicked: bool,
        sink: MemorySink,
    }

    impl Write for PanicOnce {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.panicked {
                self.panicked = true;
                panic!("sink failure");
            }
            self.sink.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_poisoned_sink_keeps_logging() {
        let sink = MemorySink::new();
        let logger = Arc::new(Logger::new());
        logger.set_level(Level::INFO);
        logger.set_output(PanicOnce {
            panicked: false,
            sink: sink.clone(),
        });

        let worker = Arc::clone(&logger);
        let result = std::thread::spawn(move || worker.info(None, format_args!("first"))).join();
        assert!(result.is_err());

        logger.info(None, format_args!("second"));
        let out = sink.contents();
        assert!(out.contains("second"), "{}", out);
        assert!(!out.contains("first"));
    }

    #[test]
    fn test_fresh_logger_defaults_to_info() {
        let sink = MemorySink::new();
        let logger = Logger::new();
        logger.set_output(sink.clone());
        assert_eq!(logger.level(), Level::INFO);

        logger.debug(None, format_args!("quiet"));
        assert!(sink.is_empty());

        logger.info(None, format_args!("loud"));
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("] loud"));
    }

    #[test]
    fn test_output_replacement_takes_effect() {
        let (logger, first) = capture();
        logger.info(None, format_args!("one"));
        let second = MemorySink::new();
        logger.set_output(second.clone());
        logger.info(None, format_args!("two"));
        assert!(first.contents().contains("one"));
        assert!(!first.contents().contains("two"));
        assert!(second.contents().contains("two"));
    }

    #[test]
    fn test_new_logger_uses_global_level() {
        assert_eq!(Logger::new().level(), global_level());
    }
}
