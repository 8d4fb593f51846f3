//! First-non-empty search over an ordered list of queries.

use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

/// Result of a fallback run.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOutcome<T> {
    /// Items from the first attempt that produced any, else empty.
    pub items: Vec<T>,
    /// The query that produced `items`.
    pub matched_query: Option<String>,
    /// Attempts made, including the successful one.
    pub attempts: usize,
}

impl<T> FallbackOutcome<T> {
    fn empty(attempts: usize) -> Self {
        Self {
            items: Vec::new(),
            matched_query: None,
            attempts,
        }
    }
}

/// Run `attempt` for each query in order and stop at the first non-empty
/// result. A failed attempt is logged and counts as empty.
pub async fn first_non_empty<T, E, F, Fut>(queries: &[String], mut attempt: F) -> FallbackOutcome<T>
where
    E: Display,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut attempts = 0;

    for query in queries.iter().filter(|q| !q.trim().is_empty()) {
        attempts += 1;
        match attempt(query.clone()).await {
            Ok(items) if !items.is_empty() => {
                debug!(query = %query, count = items.len(), attempts, "Query matched");
                return FallbackOutcome {
                    items,
                    matched_query: Some(query.clone()),
                    attempts,
                };
            }
            Ok(_) => debug!(query = %query, "No results, trying next variation"),
            Err(e) => warn!(query = %query, error = %e, "Attempt failed, trying next variation"),
        }
    }

    FallbackOutcome::empty(attempts)
}
