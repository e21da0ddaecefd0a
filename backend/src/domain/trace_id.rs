//! Correlation id shared by a request's logs, error bodies and headers.
//!
//! The `Trace` middleware mints one [`TraceId`] per request and runs the
//! handler inside [`TraceId::scope`]. Anything executing in that task, such
//! as a domain [`Error`](crate::domain::Error) being constructed, reads it
//! back with [`TraceId::current`] and the client sees the same value in the
//! `Trace-Id` header and the `traceId` field.
//!
//! The id lives in Tokio task-local storage, which spawned tasks and
//! blocking threads do not inherit; wrap such work in [`TraceId::scope`]
//! again when it should stay correlated.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT_TRACE: TraceId;
}

/// Random per-request identifier, rendered as a hyphenated UUID.
///
/// # Examples
/// ```
/// use portfolio::TraceId;
///
/// let id: TraceId = "6f1c8d0e-3b7a-4c55-9e2f-0a1b2c3d4e5f".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c8d0e-3b7a-4c55-9e2f-0a1b2c3d4e5f");
/// assert!("contact-42".parse::<TraceId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh identifier for an incoming request.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the request being handled on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT_TRACE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use portfolio::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id: TraceId = "6f1c8d0e-3b7a-4c55-9e2f-0a1b2c3d4e5f".parse().expect("uuid");
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// assert_eq!(TraceId::current(), None);
    /// # });
    /// ```
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        CURRENT_TRACE.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn nested_scope_shadows_then_restores_outer_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let observed = TraceId::scope(outer, async move {
            let during = TraceId::scope(inner, async { TraceId::current() }).await;
            (during, TraceId::current())
        })
        .await;

        assert_eq!(observed, (Some(inner), Some(outer)));
    }

    #[rstest]
    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_the_id() {
        let id = TraceId::generate();
        let spawned = TraceId::scope(id, async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("task joins")
        })
        .await;
        assert_eq!(spawned, None);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case("00000000-0000-0000-0000")]
    fn rejects_non_uuid_text(#[case] raw: &str) {
        assert!(raw.parse::<TraceId>().is_err());
    }

    #[rstest]
    fn generated_ids_are_distinct_and_parse_back() {
        let first = TraceId::generate();
        let second = TraceId::generate();
        assert_ne!(first, second);
        assert_eq!(first.to_string().parse::<TraceId>().expect("parse"), first);
    }
}
