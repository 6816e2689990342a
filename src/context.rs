//! Per-call context values and the formatters that turn them into tags.
//!
//! A [`Context`] is an immutable chain of string bindings, typically carrying
//! a request id. Deriving a child with [`Context::with_value`] never changes
//! the parent, so a context can be shared freely across threads.

use std::sync::Arc;

/// Immutable chain of string bindings passed to the context formatter.
#[derive(Debug, Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

#[derive(Debug)]
struct Node {
    key: String,
    value: String,
    parent: Option<Arc<Node>>,
}

impl Context {
    /// Empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Child context with one more binding. Later bindings shadow earlier
    /// ones for the same key.
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Context {
            node: Some(Arc::new(Node {
                key: key.into(),
                value: value.into(),
                parent: self.node.clone(),
            })),
        }
    }

    /// Nearest binding for `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        let mut node = self.node.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return Some(&n.value);
            }
            node = n.parent.as_deref();
        }
        None
    }
}

/// Maps the optional per-call context to the bracketed tag.
pub type ContextFormatter = Arc<dyn Fn(Option<&Context>) -> String + Send + Sync>;

/// Tag used when no formatter has been configured.
pub fn default_context_formatter(_ctx: Option<&Context>) -> String {
    "-".to_string()
}

/// Formatter that reads `key` from the context, falling back to `fallback`
/// when the context is absent or lacks the key.
pub fn value_formatter(
    key: impl Into<String>,
    fallback: impl Into<String>,
) -> impl Fn(Option<&Context>) -> String + Send + Sync + 'static {
    let key = key.into();
    let fallback = fallback.into();
    move |ctx: Option<&Context>| {
        ctx.and_then(|c| c.value(&key))
            .unwrap_or(fallback.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_empty() {
        assert_eq!(Context::background().value("rid"), None);
    }

    #[test]
    fn test_child_does_not_touch_parent() {
        let parent = Context::background().with_value("rid", "r-1");
        let child = parent.with_value("rid", "r-2").with_value("user", "u");
        assert_eq!(parent.value("rid"), Some("r-1"));
        assert_eq!(child.value("rid"), Some("r-2"));
        assert_eq!(child.value("user"), Some("u"));
        assert_eq!(parent.value("user"), None);
    }

    #[test]
    fn test_default_formatter_ignores_context() {
        let ctx = Context::background().with_value("rid", "x");
        assert_eq!(default_context_formatter(None), "-");
        assert_eq!(default_context_formatter(Some(&ctx)), "-");
    }

    #[test]
    fn test_value_formatter() {
        let fmt = value_formatter("rid", "--");
        let ctx = Context::background().with_value("rid", "hello");
        assert_eq!(fmt(Some(&ctx)), "hello");
        assert_eq!(fmt(Some(&Context::background())), "--");
        assert_eq!(fmt(None), "--");
    }
}
