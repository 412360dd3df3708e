//! Tunable settings for scraping.

use std::time::Duration;

use crate::constants::{IO_TIMEOUT, SESSION_TTL};

/// Timing settings shared by every session of a [`Bulk`](crate::Bulk).
///
/// The defaults are the protocol policy: a one second deadline per exchange
/// and a one minute lifetime for connection IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Deadline covering the send and the receive of one exchange
    pub io_timeout: Duration,
    /// Time after which all sessions are re-established
    pub session_ttl: Duration,
}

impl ScrapeConfig {
    /// Sets the deadline for each request/response exchange.
    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    /// Sets how long sessions are reused before reconnecting.
    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            io_timeout: IO_TIMEOUT,
            session_ttl: SESSION_TTL,
        }
    }
}
