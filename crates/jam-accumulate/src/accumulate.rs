use std::collections::VecDeque;

use jam_state::{PreimageStatus, ServiceAccount, Services, Statistics, WorkReport};
use jam_types::{CoreIndex, Hash, ServiceId, TimeSlot};

use crate::pvm::{PvmCall, PvmEntryPoint, PvmHost, PvmStatus, Transfer};

/// Runs Accumulation over the newly-available reports, in the
/// deterministic core-ascending order assurances already produced
/// (spec.md §4.6). Returns the updated service dictionary, updated
/// statistics, and the accumulate root committing to every touched
/// service's resulting state.
pub fn process_accumulation(
    services: &Services,
    stats: &Statistics,
    host: &impl PvmHost,
    current_slot: TimeSlot,
    reports: &[WorkReport],
) -> (Services, Statistics, Hash) {
    let mut services = services.clone();
    let mut stats = stats.clone();
    let mut transfer_queue: VecDeque<Transfer> = VecDeque::new();
    let mut touched: Vec<ServiceId> = Vec::new();

    for report in reports {
        for result in &report.results {
            let Some(account) = services.get(&result.service) else {
                continue;
            };
            if result.accumulate_gas < account.min_gas_accumulate {
                stats.core_mut(report.core_index).out_of_gas_results += 1;
                continue;
            }

            let payload = match &result.result {
                Ok(bytes) => bytes.clone(),
                Err(_) => Vec::new(),
            };
            let call = PvmCall {
                service: result.service,
                code_hash: result.code_hash,
                entry_point: PvmEntryPoint::Accumulate,
                gas_limit: result.accumulate_gas,
                payload,
            };
            let outcome = host.invoke(call);
            apply_outcome(
                &mut services,
                &mut stats,
                report.core_index,
                result.service,
                current_slot,
                &outcome,
                false,
            );
            transfer_queue.extend(outcome.transfers);
            if !touched.contains(&result.service) {
                touched.push(result.service);
            }
        }
    }

    while let Some(transfer) = transfer_queue.pop_front() {
        let Some(recipient) = services.get(&transfer.to) else {
            continue;
        };
        if transfer.gas < recipient.min_gas_on_transfer {
            continue;
        }
        let call = PvmCall {
            service: transfer.to,
            code_hash: recipient.code_hash,
            entry_point: PvmEntryPoint::OnTransfer,
            gas_limit: transfer.gas,
            payload: transfer.amount.to_le_bytes().to_vec(),
        };
        let outcome = host.invoke(call);
        apply_outcome(&mut services, &mut stats, 0, transfer.to, current_slot, &outcome, true);
        if !touched.contains(&transfer.to) {
            touched.push(transfer.to);
        }
    }

    touched.sort();
    let entries: Vec<(jam_merkle::StateKey, Vec<u8>)> = touched
        .into_iter()
        .filter_map(|id| {
            services.get(&id).map(|account| {
                let mut key = [0u8; 31];
                key[0..4].copy_from_slice(&id.to_le_bytes());
                let output = jam_crypto::blake2b_256(
                    &bincode::serialize(account).expect("service accounts are always serializable"),
                );
                (key, output.to_vec())
            })
        })
        .collect();
    let accumulate_root = jam_merkle::state_root(&entries);

    (services, stats, accumulate_root)
}

fn apply_outcome(
    services: &mut Services,
    stats: &mut Statistics,
    core: CoreIndex,
    service: ServiceId,
    current_slot: TimeSlot,
    outcome: &crate::pvm::PvmOutcome,
    is_transfer: bool,
) {
    for new_service in &outcome.new_services {
        services.entry(new_service.id).or_insert_with(|| {
            ServiceAccount::new(
                new_service.code_hash,
                new_service.min_gas_accumulate,
                new_service.min_gas_on_transfer,
                current_slot,
            )
        });
    }

    if let Some(account) = services.get_mut(&service) {
        for (key, value) in &outcome.storage_writes {
            match value {
                Some(bytes) => {
                    account.storage.insert(*key, bytes.clone());
                }
                None => {
                    account.storage.remove(key);
                }
            }
        }
        for preimage in &outcome.preimage_requests {
            account
                .preimage_lookups
                .entry(*preimage)
                .or_insert(PreimageStatus::Requested);
        }
        if !account.created_this_slot(current_slot) {
            account.last_accumulation_slot = current_slot;
        }
    }

    if matches!(outcome.status, PvmStatus::OutOfGas) {
        stats.core_mut(core).out_of_gas_results += 1;
    }
    stats.core_mut(core).gas_used += outcome.gas_used;
    let service_stats = stats.service_mut(service);
    if is_transfer {
        service_stats.transfer_gas_used += outcome.gas_used;
    } else {
        service_stats.accumulate_gas_used += outcome.gas_used;
    }
}
