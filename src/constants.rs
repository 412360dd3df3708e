//! Protocol constants and timing policy.
//!
//! Wire values follow [BEP-15]. The timing values are the defaults used by
//! [`ScrapeConfig`](crate::ScrapeConfig).
//!
//! [BEP-15]: http://bittorrent.org/beps/bep_0015.html

use std::time::Duration;

// ============================================================================
// Wire protocol
// ============================================================================

/// Magic connection ID sent with every connect request
pub const PROTOCOL_ID: u64 = 0x41727101980;

/// Action code for the connect handshake
pub const ACTION_CONNECT: u32 = 0;

/// Action code for a scrape request
pub const ACTION_SCRAPE: u32 = 2;

/// Action code a tracker uses to report an error
pub const ACTION_ERROR: u32 = 3;

/// Size of a connect request and of a connect response
pub const CONNECT_PACKET_LEN: usize = 16;

/// Fixed header of a scrape request (connection ID, action, transaction ID)
pub const SCRAPE_REQUEST_HEADER_LEN: usize = 16;

/// Fixed header of a scrape response (action, transaction ID)
pub const SCRAPE_RESPONSE_HEADER_LEN: usize = 8;

/// Size of one seeders/completed/leechers record in a scrape response
pub const SCRAPE_RECORD_LEN: usize = 12;

/// Raw length of a v1 info hash
pub const INFO_HASH_LEN: usize = 20;

// ============================================================================
// Timing
// ============================================================================

/// Deadline for one request/response exchange with a tracker
pub const IO_TIMEOUT: Duration = Duration::from_secs(1);

/// How long a set of tracker sessions is reused before reconnecting
pub const SESSION_TTL: Duration = Duration::from_secs(60);
