use jam_types::Hash;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHistoryEntry {
    pub header_hash: Hash,
    pub state_root: Hash,
    pub beefy_mmr: Hash,
    pub work_reports_root: Hash,
    pub accumulate_root: Hash,
}

/// β: a bounded, slot-monotone (by insertion order) sequence of recent
/// block summaries, capacity `recent_blocks_depth`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHistory {
    pub entries: Vec<RecentHistoryEntry>,
}

impl RecentHistory {
    pub fn genesis() -> Self {
        Self { entries: vec![] }
    }

    pub fn last(&self) -> Option<&RecentHistoryEntry> {
        self.entries.last()
    }

    /// Patches the tail entry's `state_root` — the previous block's
    /// post-root is only known when the *next* block names it as its
    /// parent state root (§4.9 step 2, run before anything else touches
    /// β in the new block).
    pub fn patch_last_state_root(&mut self, parent_state_root: Hash) {
        if let Some(last) = self.entries.last_mut() {
            last.state_root = parent_state_root;
        }
    }

    /// Appends a new entry and truncates from the front to `depth`.
    pub fn push_and_truncate(&mut self, entry: RecentHistoryEntry, depth: usize) {
        self.entries.push(entry);
        if self.entries.len() > depth {
            let overflow = self.entries.len() - depth;
            self.entries.drain(0..overflow);
        }
    }
}
