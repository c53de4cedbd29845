use std::collections::BTreeMap;

use jam_types::{CoreIndex, Gas, ServiceId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorStats {
    pub blocks_produced: u32,
    pub tickets_introduced: u32,
    pub preimages_introduced: u32,
    pub octets_across_preimages: u64,
    pub reports_guaranteed: u32,
    pub availability_assurances: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochValidatorStats {
    pub current: Vec<ValidatorStats>,
    pub previous: Vec<ValidatorStats>,
}

impl EpochValidatorStats {
    pub fn genesis(validators_count: usize) -> Self {
        Self {
            current: vec![ValidatorStats::default(); validators_count],
            previous: vec![ValidatorStats::default(); validators_count],
        }
    }

    /// On epoch rotation the current bucket becomes previous and a fresh
    /// one starts accumulating.
    pub fn rotate_epoch(&mut self) {
        self.previous = std::mem::replace(
            &mut self.current,
            vec![ValidatorStats::default(); self.current.len()],
        );
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreStats {
    pub gas_used: Gas,
    pub out_of_gas_results: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub accumulate_gas_used: Gas,
    pub transfer_gas_used: Gas,
}

/// π: validator epoch buckets plus per-core and per-service aggregates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub validators: EpochValidatorStats,
    pub cores: Vec<CoreStats>,
    pub services: BTreeMap<ServiceId, ServiceStats>,
}

impl Statistics {
    pub fn genesis(validators_count: usize, core_count: usize) -> Self {
        Self {
            validators: EpochValidatorStats::genesis(validators_count),
            cores: vec![CoreStats::default(); core_count],
            services: BTreeMap::new(),
        }
    }

    pub fn core_mut(&mut self, core: CoreIndex) -> &mut CoreStats {
        &mut self.cores[core as usize]
    }

    pub fn service_mut(&mut self, service: ServiceId) -> &mut ServiceStats {
        self.services.entry(service).or_default()
    }
}
