//! Side effects requested by the search controller.
//!
//! The event handler never sleeps, spawns or performs I/O. It returns a
//! `Vec<Action>` and the runtime ([`crate::runtime::SearchRuntime`]) carries
//! them out, feeding timer and network completions back in as events.

use std::fmt;
use std::time::Duration;

/// Opaque identity of one provider request.
///
/// Tokens are issued from a monotonically increasing counter. The controller only
/// accepts a completion whose token matches the request it currently considers in
/// flight; anything else is a superseded request and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Commands executed by the runtime after each transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts (or restarts) the quiescence timer.
    ///
    /// Any previously scheduled timer must be discarded. When the timer fires the
    /// runtime sends [`Event::DebounceElapsed`](super::Event::DebounceElapsed)
    /// carrying the same generation.
    ScheduleDebounce {
        /// Query generation this timer belongs to.
        generation: u64,
        /// Quiescence delay.
        delay: Duration,
    },

    /// Discards the pending quiescence timer, if any.
    CancelDebounce,

    /// Issues a provider search for `query`.
    ///
    /// The runtime reports the result with
    /// [`Event::FetchCompleted`](super::Event::FetchCompleted) tagged with `token`.
    StartFetch {
        /// Identity of this request.
        token: RequestToken,
        /// Settled query text.
        query: String,
    },

    /// Aborts the request identified by `token`.
    CancelFetch {
        /// Request to abort.
        token: RequestToken,
    },

    /// Hands a committed value to the navigator.
    ///
    /// The value is raw; escaping it for a route is the navigator's job.
    Navigate(String),
}
