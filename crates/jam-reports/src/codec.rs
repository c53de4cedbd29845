//! Wire-codec impls for the guarantees extrinsic.

use jam_codec::{CodecError, Decode, Encode};

use crate::types::{Guarantee, GuarantorSignature};

impl Encode for GuarantorSignature {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.validator_index.encode_to(out);
        self.signature.encode_to(out);
    }
}

impl Decode for GuarantorSignature {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            validator_index: Decode::decode(input)?,
            signature: Decode::decode(input)?,
        })
    }
}

impl Encode for Guarantee {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.report.encode_to(out);
        self.signatures.encode_to(out);
    }
}

impl Decode for Guarantee {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            report: Decode::decode(input)?,
            signatures: Decode::decode(input)?,
        })
    }
}
