use jam_state::Statistics;
use jam_types::{CoreIndex, Gas, ServiceId, ValidatorIndex};

/// The header author's per-block increments (spec.md §4.8).
pub fn record_author(
    stats: &mut Statistics,
    author: ValidatorIndex,
    ticket_count: u32,
    preimage_count: u32,
    octets: u64,
) {
    let entry = &mut stats.validators.current[author as usize];
    entry.blocks_produced += 1;
    entry.tickets_introduced += ticket_count;
    entry.preimages_introduced += preimage_count;
    entry.octets_across_preimages += octets;
}

pub fn record_assurer(stats: &mut Statistics, validator: ValidatorIndex) {
    stats.validators.current[validator as usize].availability_assurances += 1;
}

pub fn record_guarantor(stats: &mut Statistics, validator: ValidatorIndex) {
    stats.validators.current[validator as usize].reports_guaranteed += 1;
}

pub fn record_core_gas(stats: &mut Statistics, core: CoreIndex, gas_used: Gas, out_of_gas: bool) {
    let entry = stats.core_mut(core);
    entry.gas_used += gas_used;
    if out_of_gas {
        entry.out_of_gas_results += 1;
    }
}

pub fn record_service_gas(stats: &mut Statistics, service: ServiceId, accumulate_gas: Gas, transfer_gas: Gas) {
    let entry = stats.service_mut(service);
    entry.accumulate_gas_used += accumulate_gas;
    entry.transfer_gas_used += transfer_gas;
}

/// On epoch rotation the current validator-stats bucket becomes previous
/// and a fresh one starts accumulating.
pub fn rotate_epoch(stats: &mut Statistics) {
    stats.validators.rotate_epoch();
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_types::Params;

    #[test]
    fn record_author_increments_all_four_fields() {
        let params = Params::tiny();
        let mut stats = Statistics::genesis(params.validators_count as usize, params.core_count as usize);
        record_author(&mut stats, 2, 3, 1, 256);
        let entry = &stats.validators.current[2];
        assert_eq!(entry.blocks_produced, 1);
        assert_eq!(entry.tickets_introduced, 3);
        assert_eq!(entry.preimages_introduced, 1);
        assert_eq!(entry.octets_across_preimages, 256);
    }

    #[test]
    fn record_assurer_and_guarantor_touch_only_their_own_field() {
        let params = Params::tiny();
        let mut stats = Statistics::genesis(params.validators_count as usize, params.core_count as usize);
        record_assurer(&mut stats, 0);
        record_guarantor(&mut stats, 1);
        assert_eq!(stats.validators.current[0].availability_assurances, 1);
        assert_eq!(stats.validators.current[1].reports_guaranteed, 1);
        assert_eq!(stats.validators.current[0].reports_guaranteed, 0);
    }

    #[test]
    fn rotate_epoch_moves_current_into_previous() {
        let params = Params::tiny();
        let mut stats = Statistics::genesis(params.validators_count as usize, params.core_count as usize);
        record_assurer(&mut stats, 0);
        rotate_epoch(&mut stats);
        assert_eq!(stats.validators.previous[0].availability_assurances, 1);
        assert_eq!(stats.validators.current[0].availability_assurances, 0);
    }
}
