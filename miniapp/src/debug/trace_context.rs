//! Trace IDs for correlating the log lines of one user action
//!
//! Handlers are async and may resume on any worker thread, so the id
//! travels in a span field rather than in thread-local storage.

use tracing::Span;
use uuid::Uuid;

/// Generate a new trace ID
pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span for one user action; instrument the action's future with it.
pub fn action_span(action: &'static str) -> Span {
    let trace_id = new_trace_id();
    tracing::info_span!("action", action, trace_id = %trace_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ids_are_unique() {
        let a = new_trace_id();
        let b = new_trace_id();

        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
