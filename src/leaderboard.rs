//! Per-mode leaderboards
//!
//! Each mode keeps its top scores as one comma-joined blob. Order on disk does
//! not matter; every read re-sorts descending and drops unparseable tokens.

use crate::persistence::{BlobStore, MemoryStore};
use crate::sim::GameMode;
use crate::tuning::Tuning;

/// Default number of scores kept per mode
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// Ranked top-N scores per game mode on top of a blob store
pub struct LeaderboardStore {
    store: Box<dyn BlobStore>,
    max_entries: usize,
}

impl std::fmt::Debug for LeaderboardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardStore")
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}

impl Default for LeaderboardStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl LeaderboardStore {
    pub fn new(store: impl BlobStore + 'static, max_entries: usize) -> Self {
        Self {
            store: Box::new(store),
            max_entries,
        }
    }

    /// Table size taken from the tuning's `max_leaderboard_entries`
    pub fn from_tuning(store: impl BlobStore + 'static, tuning: &Tuning) -> Self {
        Self::new(store, tuning.max_leaderboard_entries)
    }

    /// Leaderboard that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MAX_LEADERBOARD_ENTRIES)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Blob key for a mode
    pub fn storage_key(mode: GameMode) -> &'static str {
        match mode {
            GameMode::Endless => "EndlessLeaderboard",
            GameMode::Race => "RaceLeaderboard",
        }
    }

    /// Scores for `mode`, highest first. Missing or unreadable data is an
    /// empty leaderboard.
    pub fn get_leaderboard(&self, mode: GameMode) -> Vec<u32> {
        let key = Self::storage_key(mode);
        let blob = match self.store.read(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Leaderboard read failed, treating as empty: {}", e);
                return Vec::new();
            }
        };

        let mut scores = parse_scores(&blob);
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores
    }

    /// Record a score. Returns the rank it landed at (1-indexed), or None if
    /// it fell off the bottom of the table.
    pub fn save_score(&mut self, mode: GameMode, score: u32) -> Option<usize> {
        let mut scores = self.get_leaderboard(mode);

        // Ties rank below existing equal scores
        let pos = scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(scores.len());
        scores.insert(pos, score);
        scores.truncate(self.max_entries);

        let key = Self::storage_key(mode);
        if let Err(e) = self.store.write(key, &join_scores(&scores)) {
            log::warn!("Failed to persist {:?} leaderboard: {}", mode, e);
        } else {
            log::info!("{:?} score {} saved ({} entries)", mode, score, scores.len());
        }

        (pos < self.max_entries).then_some(pos + 1)
    }

    /// Best score recorded for `mode`
    pub fn top_score(&self, mode: GameMode) -> Option<u32> {
        self.get_leaderboard(mode).first().copied()
    }
}

fn parse_scores(blob: &str) -> Vec<u32> {
    blob.split(',')
        .filter_map(|token| token.trim().parse::<u32>().ok())
        .collect()
}

fn join_scores(scores: &[u32]) -> String {
    scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
