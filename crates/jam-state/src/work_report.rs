use jam_types::{CoreIndex, Ed25519Public, Gas, Hash, ServiceId, TimeSlot};
use serde::{Deserialize, Serialize};

/// Outcomes a guarantor's refine step can attach to a single work result.
/// `Ok` carries the refine output bytes consumed unchanged by
/// Accumulation; the `Err` variants are the refine-side failure modes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkExecError {
    OutOfGas,
    Panic,
    BadExports,
    BadCode,
    CodeOversize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkResult {
    pub service: ServiceId,
    pub code_hash: Hash,
    pub payload_hash: Hash,
    pub accumulate_gas: Gas,
    pub result: Result<Vec<u8>, WorkExecError>,
}

/// A compact commitment to the off-chain refine computation a work report
/// attests to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub hash: Hash,
    pub length: u32,
    pub erasure_root: Hash,
    pub exports_root: Hash,
    pub exports_count: u16,
}

/// The block this report's refine step was anchored against: which
/// historical header it read state from, and when.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementContext {
    pub anchor: Hash,
    pub anchor_state_root: Hash,
    pub timeslot: TimeSlot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkReport {
    pub package_spec: PackageSpec,
    pub context: RefinementContext,
    pub core_index: CoreIndex,
    pub authorizer_hash: Hash,
    pub results: Vec<WorkResult>,
}

/// An entry pending in ρ[core]: an installed report awaiting either
/// availability super-majority or timeout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReport {
    pub report: WorkReport,
    pub timeout: TimeSlot,
    pub guarantor_keys: Vec<Ed25519Public>,
}

/// ρ: one optional pending report per core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReports {
    pub cores: Vec<Option<PendingReport>>,
}

impl PendingReports {
    pub fn genesis(core_count: usize) -> Self {
        Self {
            cores: vec![None; core_count],
        }
    }

    /// Clears every entry whose `timeout` has passed (testable property 5:
    /// after this, every remaining entry's timeout is `>= current_slot`).
    pub fn clear_timed_out(&mut self, current_slot: TimeSlot) {
        for slot in self.cores.iter_mut() {
            if let Some(pending) = slot {
                if current_slot > pending.timeout {
                    *slot = None;
                }
            }
        }
    }

    /// Clears the core entry, if any, whose report hash matches `target`.
    pub fn clear_matching(&mut self, target: &Hash) {
        for slot in self.cores.iter_mut() {
            if matches!(slot, Some(p) if &p.report.package_spec.hash == target) {
                *slot = None;
            }
        }
    }
}
