//! # tracing Bridge
//!
//! [`LoggerLayer`] is a `tracing_subscriber` layer that renders `tracing`
//! events as clog records, so a host that already instruments with `tracing`
//! gets the same one-line format.
//!
//! Only the event's `message` is kept; other fields are dropped. The record's
//! level is mapped with `From<tracing::Level>` and filtered by the logger's
//! own threshold. The tag comes from the logger's context formatter called
//! without a context. The call site comes from the event metadata and is
//! passed through the logger's [`CallerResolver::resolve_site`], so a logger
//! using [`UnknownCaller`] prints `(???:0)` here too.
//!
//! [`CallerResolver::resolve_site`]: crate::caller::CallerResolver::resolve_site
//! [`UnknownCaller`]: crate::caller::UnknownCaller
//!
//! ```rust,no_run
//! use tracing_subscriber::prelude::*;
//!
//! tracing_subscriber::registry()
//!     .with(clog::LoggerLayer::global())
//!     .init();
//! tracing::info!("ready");
//! ```

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{self, Layer};

use crate::caller::CallSite;
use crate::global::default_logger_arc;
use crate::level::Level;
use crate::logger::Logger;

/// `tracing_subscriber` layer that forwards events to a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    /// Layer writing through `logger`.
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Layer writing through the process-wide default logger.
    pub fn global() -> Self {
        Self::new(default_logger_arc())
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: layer::Context<'_, S>) {
        let meta = event.metadata();
        let level = Level::from(*meta.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let location = if self.logger.is_callstack_hidden() {
            None
        } else {
            Some(match (meta.file(), meta.line()) {
                (Some(file), Some(line)) => self.logger.resolve_site(CallSite { file, line }),
                _ => None,
            })
        };

        let tag = self.logger.tag_without_context();
        self.logger.emit(level, &tag, &visitor.message, location);
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        }
    }
}
