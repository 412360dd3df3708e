use tracing::warn;

use super::error::TrackerError;
use super::response::{ScrapeResult, ScrapeStats};
use super::udp::UdpTracker;
use crate::config::ScrapeConfig;
use crate::info_hash::InfoHash;

/// One tracker URL and, if the handshake succeeded, the live connection to
/// it.
///
/// A session is never updated in place. Reconnecting means building a new
/// session from [`url`](Session::url) and dropping the old one, which closes
/// its socket.
#[derive(Debug)]
pub struct Session {
    url: String,
    tracker: Option<UdpTracker>,
}

impl Session {
    /// Performs the handshake against `url`.
    ///
    /// A failed handshake still yields a session; it is uninitialized and
    /// rejects every scrape.
    pub async fn connect(url: impl Into<String>, config: &ScrapeConfig) -> Self {
        let url = url.into();
        let tracker = match UdpTracker::connect(&url, config.io_timeout).await {
            Ok(tracker) => Some(tracker),
            Err(e) => {
                warn!("handshake with {} failed: {}", url, e);
                None
            }
        };
        Self { url, tracker }
    }

    pub(crate) fn uninitialized(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tracker: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_connected(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn connection_id(&self) -> Option<u64> {
        self.tracker.as_ref().map(UdpTracker::connection_id)
    }

    /// Scrapes a batch of hex info hashes.
    ///
    /// Any malformed hash fails the whole call before a packet is sent.
    pub async fn scrape<S: AsRef<str>>(
        &self,
        info_hashes: &[S],
    ) -> Result<Vec<ScrapeResult>, TrackerError> {
        let parsed = info_hashes
            .iter()
            .map(|h| InfoHash::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let stats = self.scrape_parsed(&parsed).await?;

        Ok(info_hashes
            .iter()
            .zip(stats)
            .map(|(hash, stats)| ScrapeResult::new(hash.as_ref(), stats))
            .collect())
    }

    /// Scrapes a single hex info hash.
    pub async fn scrape_one(&self, info_hash: &str) -> Result<ScrapeResult, TrackerError> {
        let parsed = InfoHash::from_hex(info_hash)?;
        let stats = self.scrape_parsed(&[parsed]).await?;

        // decode_scrape_response yields exactly one record per hash
        Ok(ScrapeResult::new(
            info_hash,
            stats.first().copied().unwrap_or_default(),
        ))
    }

    pub(crate) async fn scrape_parsed(
        &self,
        info_hashes: &[InfoHash],
    ) -> Result<Vec<ScrapeStats>, TrackerError> {
        let tracker = self.tracker.as_ref().ok_or(TrackerError::Uninitialized)?;
        tracker.scrape(info_hashes).await
    }
}
