use jam_crypto::blake2b_256;
use jam_types::{CoreIndex, Hash, TimeSlot};

const ROTATION_CONTEXT: &[u8] = b"jam_guarantor_rotation";

/// Entropy keying one rotation window: every slot inside the same
/// `validator_rotation_period` window shares it, so the assignment is
/// stable across the window and changes only when the window does.
pub fn rotation_entropy(eta_2: &Hash, slot: TimeSlot, rotation_period: u32) -> Hash {
    let window = slot / rotation_period.max(1);
    let mut buf = Vec::with_capacity(ROTATION_CONTEXT.len() + 32 + 4);
    buf.extend_from_slice(ROTATION_CONTEXT);
    buf.extend_from_slice(eta_2);
    buf.extend_from_slice(&window.to_le_bytes());
    blake2b_256(&buf)
}

/// Assigns every validator index `0..validators_count` to a core, via a
/// shuffled permutation of the validator set split into `core_count`
/// contiguous bands — the "shuffled permutation of kappa (or lambda)"
/// assignment spec.md §4.4 describes.
pub fn guarantor_assignment(entropy: &Hash, validators_count: u32, core_count: u32) -> Vec<CoreIndex> {
    let ids: Vec<u32> = (0..validators_count).collect();
    let shuffled = jam_shuffle::fisher_yates(ids, entropy);
    let mut assignment = vec![0u16; validators_count as usize];
    for (position, &validator) in shuffled.iter().enumerate() {
        let core = (position as u32 * core_count) / validators_count.max(1);
        assignment[validator as usize] = core as u16;
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_covers_every_validator_with_a_valid_core() {
        let entropy = [1u8; 32];
        let assignment = guarantor_assignment(&entropy, 6, 2);
        assert_eq!(assignment.len(), 6);
        assert!(assignment.iter().all(|&c| c < 2));
    }

    #[test]
    fn assignment_is_deterministic() {
        let entropy = [2u8; 32];
        assert_eq!(
            guarantor_assignment(&entropy, 6, 2),
            guarantor_assignment(&entropy, 6, 2)
        );
    }

    #[test]
    fn rotation_entropy_is_stable_within_a_window_and_changes_across_it() {
        let eta_2 = [3u8; 32];
        assert_eq!(rotation_entropy(&eta_2, 0, 4), rotation_entropy(&eta_2, 3, 4));
        assert_ne!(rotation_entropy(&eta_2, 0, 4), rotation_entropy(&eta_2, 4, 4));
    }
}
