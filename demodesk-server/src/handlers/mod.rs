//! Request handlers, independent of the HTTP layer
//!
//! Each handler is a function of (validated input, store handle). Submission
//! surfaces store failures; reporting handlers (health, metrics, diagnostics)
//! absorb them and degrade.

pub mod demo_requests;
pub mod diagnostics;
pub mod health;
pub mod metrics;

pub use demo_requests::{list_demo_requests, submit_demo_request, DEMO_REQUEST_COLLECTION};
pub use diagnostics::diagnostics;
pub use health::health;
pub use metrics::{baseline_metrics, metrics};

use std::fmt;

/// Run a reporting sub-check, logging and discarding its failure.
pub(crate) fn best_effort<T, E: fmt::Display>(check: &'static str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(check, error = %e, "Reporting check failed, degrading");
            None
        }
    }
}

/// First `max` characters of `text`, on a char boundary.
pub(crate) fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_effort_keeps_success() {
        assert_eq!(best_effort::<_, String>("ok", Ok(3)), Some(3));
        assert_eq!(best_effort::<u8, _>("fails", Err("boom")), None);
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("", 3), "");
    }
}
