//! Wire-codec impls for the disputes extrinsic (spec.md §4.11's
//! `import_block` payload carries one of these per block).

use jam_codec::{CodecError, Decode, Encode};

use crate::types::{Culprit, DisputesExtrinsic, Fault, Judgment, Verdict};

impl Encode for Judgment {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.validator_index.encode_to(out);
        self.is_good.encode_to(out);
        self.signature.encode_to(out);
    }
}

impl Decode for Judgment {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            validator_index: Decode::decode(input)?,
            is_good: Decode::decode(input)?,
            signature: Decode::decode(input)?,
        })
    }
}

impl Encode for Verdict {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.target.encode_to(out);
        self.age.encode_to(out);
        self.judgments.encode_to(out);
    }
}

impl Decode for Verdict {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            target: Decode::decode(input)?,
            age: Decode::decode(input)?,
            judgments: Decode::decode(input)?,
        })
    }
}

impl Encode for Culprit {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.target.encode_to(out);
        self.key.encode_to(out);
        self.signature.encode_to(out);
    }
}

impl Decode for Culprit {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            target: Decode::decode(input)?,
            key: Decode::decode(input)?,
            signature: Decode::decode(input)?,
        })
    }
}

impl Encode for Fault {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.target.encode_to(out);
        self.vote.encode_to(out);
        self.key.encode_to(out);
        self.signature.encode_to(out);
    }
}

impl Decode for Fault {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            target: Decode::decode(input)?,
            vote: Decode::decode(input)?,
            key: Decode::decode(input)?,
            signature: Decode::decode(input)?,
        })
    }
}

impl Encode for DisputesExtrinsic {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.verdicts.encode_to(out);
        self.culprits.encode_to(out);
        self.faults.encode_to(out);
    }
}

impl Decode for DisputesExtrinsic {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            verdicts: Decode::decode(input)?,
            culprits: Decode::decode(input)?,
            faults: Decode::decode(input)?,
        })
    }
}
