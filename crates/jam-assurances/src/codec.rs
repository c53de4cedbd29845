//! Wire-codec impl for the assurances extrinsic.

use jam_codec::{CodecError, Decode, Encode};

use crate::types::Assurance;

impl Encode for Assurance {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.validator_index.encode_to(out);
        self.anchor.encode_to(out);
        self.bitfield.encode_to(out);
        self.signature.encode_to(out);
    }
}

impl Decode for Assurance {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            validator_index: Decode::decode(input)?,
            anchor: Decode::decode(input)?,
            bitfield: Decode::decode(input)?,
            signature: Decode::decode(input)?,
        })
    }
}
