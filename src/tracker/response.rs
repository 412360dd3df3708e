use crate::constants::SCRAPE_RECORD_LEN;

/// Swarm counters for one info hash as reported by one tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    pub seeders: u32,
    pub completed: u32,
    pub leechers: u32,
}

impl ScrapeStats {
    pub fn new(seeders: u32, leechers: u32, completed: u32) -> Self {
        Self {
            seeders,
            completed,
            leechers,
        }
    }

    /// Parses one 12-byte scrape record.
    ///
    /// Format: seeders, completed, leechers; each a big-endian u32.
    pub fn from_record(bytes: &[u8; SCRAPE_RECORD_LEN]) -> Self {
        let seeders = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let completed = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let leechers = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        Self {
            seeders,
            completed,
            leechers,
        }
    }

    /// Raises each counter to `other`'s value where `other` is larger.
    pub fn merge_max(&mut self, other: &ScrapeStats) {
        self.seeders = self.seeders.max(other.seeders);
        self.completed = self.completed.max(other.completed);
        self.leechers = self.leechers.max(other.leechers);
    }
}

/// Scrape counters for one info hash, keyed by the hash string the caller
/// passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    pub info_hash: String,
    pub seeders: u32,
    pub leechers: u32,
    pub completed: u32,
}

impl ScrapeResult {
    pub fn new(info_hash: impl Into<String>, stats: ScrapeStats) -> Self {
        Self {
            info_hash: info_hash.into(),
            seeders: stats.seeders,
            leechers: stats.leechers,
            completed: stats.completed,
        }
    }

    pub fn stats(&self) -> ScrapeStats {
        ScrapeStats::new(self.seeders, self.leechers, self.completed)
    }

    pub fn merge_max(&mut self, other: &ScrapeStats) {
        let mut stats = self.stats();
        stats.merge_max(other);
        self.seeders = stats.seeders;
        self.leechers = stats.leechers;
        self.completed = stats.completed;
    }
}
