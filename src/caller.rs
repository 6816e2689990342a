//! Call-site resolution.
//!
//! Every public emission entry point is `#[track_caller]`, so the location
//! of the user's own call is captured once at the outermost boundary and
//! handed down unchanged. No stack walking and no frame-depth constant is
//! involved, which keeps filtered calls, unconditional calls and the global
//! forwarders all pointing at the same place.
//!
//! Turning that location into a [`CallSite`] goes through [`CallerResolver`]
//! so hosts and tests can substitute their own policy.

use std::panic::Location;

/// A resolved source location. `file` is the path as the compiler recorded
/// it; the formatter reduces it to its last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Turns call-site information into the `(file:line)` suffix.
pub trait CallerResolver: Send + Sync {
    /// Resolve the captured caller, or `None` when no location is available.
    fn resolve(&self, caller: &'static Location<'static>) -> Option<CallSite>;

    /// Resolve a site that arrived already known, such as `tracing` event
    /// metadata. Passes it through unless overridden.
    fn resolve_site(&self, site: CallSite) -> Option<CallSite> {
        Some(site)
    }
}

/// Reports the tracked caller as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackedCaller;

impl CallerResolver for TrackedCaller {
    fn resolve(&self, caller: &'static Location<'static>) -> Option<CallSite> {
        Some(CallSite::from(caller))
    }
}

/// Never resolves; records end in `(???:0)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnknownCaller;

impl CallerResolver for UnknownCaller {
    fn resolve(&self, _caller: &'static Location<'static>) -> Option<CallSite> {
        None
    }

    fn resolve_site(&self, _site: CallSite) -> Option<CallSite> {
        None
    }
}
