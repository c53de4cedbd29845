use jam_state::{RecentHistory, RecentHistoryEntry};
use jam_types::{Hash, Params};

/// §4.9 step 2: β's last entry's `state_root` is only knowable once the
/// next block names it as its parent — this patches it in before anything
/// else in the new block touches β.
pub fn patch_parent_root(beta: &RecentHistory, parent_state_root: Hash) -> RecentHistory {
    let mut beta = beta.clone();
    beta.patch_last_state_root(parent_state_root);
    beta
}

/// Appends the new block's history entry (post-Accumulation) and
/// truncates β from the front to `recent_blocks_depth` (testable
/// property 7).
pub fn append_entry(beta: &RecentHistory, params: &Params, entry: RecentHistoryEntry) -> RecentHistory {
    let mut beta = beta.clone();
    beta.push_and_truncate(entry, params.recent_blocks_depth as usize);
    beta
}
