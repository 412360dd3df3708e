//! UDP tracker scrape protocol (BEP-15)
//!
//! [`UdpTracker`] speaks the wire protocol with one tracker, [`Session`]
//! wraps it with the URL it came from, and [`Bulk`] fans scrapes out over
//! many trackers and merges the answers.

mod bulk;
mod error;
mod response;
mod session;
mod udp;

pub use bulk::{scrape_once, Bulk, BulkState};
pub use error::{Mismatch, TrackerError};
pub use response::{ScrapeResult, ScrapeStats};
pub use session::Session;
pub use udp::{
    decode_connect_response, decode_scrape_response, encode_connect_request,
    encode_scrape_request, normalize_url, UdpTracker,
};
