//! Correlation id shared by log lines, error bodies and the `trace-id` header.
//!
//! The active id is task-local. Spawned tasks do not inherit it, so work moved
//! onto the blocking pool goes through [`TraceId::spawn_blocking`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task::JoinHandle;
use tokio::task_local;
use uuid::Uuid;

/// Request and response header carrying the trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// Identifier correlating one request across logs and the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Id supplied by a caller in the `trace-id` header.
    ///
    /// Surrounding whitespace is ignored. The nil UUID is refused so that
    /// clients sending a placeholder still get a distinct id.
    ///
    /// # Examples
    /// ```
    /// use guestbook::TraceId;
    ///
    /// assert!(TraceId::from_header(" 6f9619ff-8b86-d011-b42d-00c04fc964ff ").is_some());
    /// assert!(TraceId::from_header("00000000-0000-0000-0000-000000000000").is_none());
    /// assert!(TraceId::from_header("req-42").is_none());
    /// ```
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        value
            .trim()
            .parse::<Self>()
            .ok()
            .filter(|id| !id.0.is_nil())
    }

    /// Id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` active.
    ///
    /// # Examples
    /// ```
    /// use guestbook::TraceId;
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().map(|rt| rt.block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # })).ok();
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        ACTIVE.scope(trace_id, fut).await
    }

    /// Run `work` on the blocking pool with the caller's id still active.
    pub fn spawn_blocking<F, R>(work: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let inherited = Self::current();
        tokio::task::spawn_blocking(move || match inherited {
            Some(id) => ACTIVE.sync_scope(id, work),
            None => work(),
        })
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
