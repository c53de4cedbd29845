//! Wire-codec impls for the state entities that travel over the
//! conformance protocol (spec.md §4.11): tickets and work reports. State
//! fields that never leave a single process (γ, ψ, ρ, δ, π, …) stay on
//! `bincode` via `crate::flatten` and need no `Encode`/`Decode` here.

use jam_codec::{Decode, Encode};

use crate::safrole::{TicketBody, TicketEnvelope};
use crate::work_report::{PackageSpec, RefinementContext, WorkExecError, WorkReport, WorkResult};

impl Encode for TicketBody {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.id.encode_to(out);
        self.attempt.encode_to(out);
    }
}

impl Decode for TicketBody {
    fn decode(input: &mut &[u8]) -> Result<Self, jam_codec::CodecError> {
        Ok(Self {
            id: Decode::decode(input)?,
            attempt: Decode::decode(input)?,
        })
    }
}

impl Encode for TicketEnvelope {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.attempt.encode_to(out);
        self.signature.encode_to(out);
    }
}

impl Decode for TicketEnvelope {
    fn decode(input: &mut &[u8]) -> Result<Self, jam_codec::CodecError> {
        Ok(Self {
            attempt: Decode::decode(input)?,
            signature: Decode::decode(input)?,
        })
    }
}

impl Encode for WorkExecError {
    fn encode_to(&self, out: &mut Vec<u8>) {
        let tag: u8 = match self {
            WorkExecError::OutOfGas => 0,
            WorkExecError::Panic => 1,
            WorkExecError::BadExports => 2,
            WorkExecError::BadCode => 3,
            WorkExecError::CodeOversize => 4,
        };
        tag.encode_to(out);
    }
}

impl Decode for WorkExecError {
    fn decode(input: &mut &[u8]) -> Result<Self, jam_codec::CodecError> {
        let tag: u8 = Decode::decode(input)?;
        match tag {
            0 => Ok(WorkExecError::OutOfGas),
            1 => Ok(WorkExecError::Panic),
            2 => Ok(WorkExecError::BadExports),
            3 => Ok(WorkExecError::BadCode),
            4 => Ok(WorkExecError::CodeOversize),
            found => Err(jam_codec::CodecError::DiscriminantOutOfRange {
                found: found as u64,
                max: 5,
            }),
        }
    }
}

impl Encode for WorkResult {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.service.encode_to(out);
        self.code_hash.encode_to(out);
        self.payload_hash.encode_to(out);
        self.accumulate_gas.encode_to(out);
        match &self.result {
            Ok(bytes) => {
                0u8.encode_to(out);
                bytes.encode_to(out);
            }
            Err(e) => {
                1u8.encode_to(out);
                e.encode_to(out);
            }
        }
    }
}

impl Decode for WorkResult {
    fn decode(input: &mut &[u8]) -> Result<Self, jam_codec::CodecError> {
        let service = Decode::decode(input)?;
        let code_hash = Decode::decode(input)?;
        let payload_hash = Decode::decode(input)?;
        let accumulate_gas = Decode::decode(input)?;
        let tag: u8 = Decode::decode(input)?;
        let result = match tag {
            0 => Ok(Vec::decode(input)?),
            1 => Err(WorkExecError::decode(input)?),
            found => {
                return Err(jam_codec::CodecError::DiscriminantOutOfRange {
                    found: found as u64,
                    max: 2,
                })
            }
        };
        Ok(Self {
            service,
            code_hash,
            payload_hash,
            accumulate_gas,
            result,
        })
    }
}

impl Encode for PackageSpec {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.hash.encode_to(out);
        self.length.encode_to(out);
        self.erasure_root.encode_to(out);
        self.exports_root.encode_to(out);
        self.exports_count.encode_to(out);
    }
}

impl Decode for PackageSpec {
    fn decode(input: &mut &[u8]) -> Result<Self, jam_codec::CodecError> {
        Ok(Self {
            hash: Decode::decode(input)?,
            length: Decode::decode(input)?,
            erasure_root: Decode::decode(input)?,
            exports_root: Decode::decode(input)?,
            exports_count: Decode::decode(input)?,
        })
    }
}

impl Encode for RefinementContext {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.anchor.encode_to(out);
        self.anchor_state_root.encode_to(out);
        self.timeslot.encode_to(out);
    }
}

impl Decode for RefinementContext {
    fn decode(input: &mut &[u8]) -> Result<Self, jam_codec::CodecError> {
        Ok(Self {
            anchor: Decode::decode(input)?,
            anchor_state_root: Decode::decode(input)?,
            timeslot: Decode::decode(input)?,
        })
    }
}

impl Encode for WorkReport {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.package_spec.encode_to(out);
        self.context.encode_to(out);
        self.core_index.encode_to(out);
        self.authorizer_hash.encode_to(out);
        self.results.encode_to(out);
    }
}

impl Decode for WorkReport {
    fn decode(input: &mut &[u8]) -> Result<Self, jam_codec::CodecError> {
        Ok(Self {
            package_spec: Decode::decode(input)?,
            context: Decode::decode(input)?,
            core_index: Decode::decode(input)?,
            authorizer_hash: Decode::decode(input)?,
            results: Decode::decode(input)?,
        })
    }
}
