//! rscrape - A BitTorrent UDP tracker scrape client
//!
//! Asks one or more UDP trackers ([BEP-15]) how many seeders, leechers and
//! completed downloads they know of for a set of torrents, and merges the
//! answers.
//!
//! # Modules
//!
//! - [`tracker`] - Wire codec, per-tracker sessions and multi-tracker scraping
//! - [`info_hash`] - Hex info-hash parsing
//! - [`config`] - Timeouts and session lifetime
//! - [`constants`] - Protocol values
//!
//! [BEP-15]: http://bittorrent.org/beps/bep_0015.html

pub mod config;
pub mod constants;
pub mod info_hash;
pub mod tracker;

pub use config::ScrapeConfig;
pub use info_hash::InfoHash;
pub use tracker::{
    scrape_once, Bulk, BulkState, Mismatch, ScrapeResult, ScrapeStats, Session, TrackerError,
    UdpTracker,
};
