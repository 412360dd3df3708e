use std::time::Instant;

use tracing::{debug, info, warn};

use super::response::{ScrapeResult, ScrapeStats};
use super::session::Session;
use crate::config::ScrapeConfig;
use crate::info_hash::InfoHash;

/// Whether a [`Bulk`]'s connection IDs are still within their lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkState {
    Fresh,
    Stale,
}

/// A set of tracker sessions reused across many scrapes.
///
/// Every session is re-established once the set outlives
/// [`ScrapeConfig::session_ttl`]; the check runs at the start of each
/// [`scrape`](Bulk::scrape). Results from all trackers are merged by taking
/// the largest value of each counter.
///
/// `scrape` and `refresh` take `&mut self`, so a refresh can never interleave
/// with a scrape. Callers sharing one `Bulk` across tasks should wrap it in a
/// `tokio::sync::Mutex`.
///
/// # Examples
///
/// ```no_run
/// use rscrape::Bulk;
///
/// # async fn example() {
/// let mut bulk = Bulk::new(&["udp://tracker.opentrackr.org:1337/announce"]).await;
///
/// let results = bulk
///     .scrape(&["c12fe1c06bba254a9dc9f519b335aa7c1367a88a"])
///     .await;
///
/// for result in results {
///     println!("{}: {} seeders", result.info_hash, result.seeders);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Bulk {
    sessions: Vec<Session>,
    expires_at: Instant,
    config: ScrapeConfig,
}

impl Bulk {
    /// Connects to every tracker concurrently using the default config.
    pub async fn new<S: AsRef<str>>(trackers: &[S]) -> Self {
        Self::with_config(trackers, ScrapeConfig::default()).await
    }

    pub async fn with_config<S: AsRef<str>>(trackers: &[S], config: ScrapeConfig) -> Self {
        let urls = trackers.iter().map(|t| t.as_ref().to_string()).collect();
        let sessions = establish(urls, config).await;

        Self {
            sessions,
            expires_at: Instant::now() + config.session_ttl,
            config,
        }
    }

    pub fn state(&self) -> BulkState {
        if Instant::now() < self.expires_at {
            BulkState::Fresh
        } else {
            BulkState::Stale
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn trackers(&self) -> impl Iterator<Item = &str> {
        self.sessions.iter().map(Session::url)
    }

    /// Replaces every session with a freshly connected one and restarts the
    /// lifetime. Old sockets are closed when their sessions drop.
    pub async fn refresh(&mut self) {
        let urls = self.trackers().map(str::to_string).collect();
        let sessions = establish(urls, self.config).await;

        self.sessions = sessions;
        self.expires_at = Instant::now() + self.config.session_ttl;

        info!(
            "refreshed {} tracker sessions ({} connected)",
            self.sessions.len(),
            self.sessions.iter().filter(|s| s.is_connected()).count()
        );
    }

    /// Scrapes every tracker for `info_hashes` and merges the answers.
    ///
    /// Returns one result per well-formed hash, in input order, carrying the
    /// hash string exactly as given. Malformed hashes are left out. Trackers
    /// that are down or misbehave contribute nothing.
    pub async fn scrape<S: AsRef<str>>(&mut self, info_hashes: &[S]) -> Vec<ScrapeResult> {
        if self.state() == BulkState::Stale {
            self.refresh().await;
        }

        let (mut results, parsed): (Vec<ScrapeResult>, Vec<InfoHash>) = info_hashes
            .iter()
            .filter_map(|hash| {
                let hash = hash.as_ref();
                match InfoHash::from_hex(hash) {
                    Ok(parsed) => Some((ScrapeResult::new(hash, ScrapeStats::default()), parsed)),
                    Err(e) => {
                        warn!("skipping {}", e);
                        None
                    }
                }
            })
            .unzip();

        if parsed.is_empty() {
            return results;
        }

        for session in self.sessions.iter().filter(|s| s.is_connected()) {
            match session.scrape_parsed(&parsed).await {
                Ok(stats) => {
                    for (result, stats) in results.iter_mut().zip(&stats) {
                        result.merge_max(stats);
                    }
                }
                Err(e) => debug!("scrape of {} failed: {}", session.url(), e),
            }
        }

        results
    }
}

/// Connects to `trackers` once and scrapes `info_hashes` without keeping the
/// connections.
pub async fn scrape_once<T, H>(trackers: &[T], info_hashes: &[H]) -> Vec<ScrapeResult>
where
    T: AsRef<str>,
    H: AsRef<str>,
{
    Bulk::new(trackers).await.scrape(info_hashes).await
}

// One task per tracker; slots are collected in input order once all finish.
async fn establish(urls: Vec<String>, config: ScrapeConfig) -> Vec<Session> {
    let handles: Vec<_> = urls
        .into_iter()
        .map(|url| {
            let task_url = url.clone();
            let handle = tokio::spawn(async move { Session::connect(task_url, &config).await });
            (url, handle)
        })
        .collect();

    let mut sessions = Vec::with_capacity(handles.len());
    for (url, handle) in handles {
        match handle.await {
            Ok(session) => sessions.push(session),
            Err(e) => {
                warn!("handshake task for {} failed: {}", url, e);
                sessions.push(Session::uninitialized(url));
            }
        }
    }
    sessions
}
