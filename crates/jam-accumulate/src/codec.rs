//! Wire-codec impl for the preimages extrinsic.

use jam_codec::{CodecError, Decode, Encode};

use crate::preimages::{PreimageEntry, PreimagesExtrinsic};

impl Encode for PreimageEntry {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.requester.encode_to(out);
        self.blob.encode_to(out);
    }
}

impl Decode for PreimageEntry {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            requester: Decode::decode(input)?,
            blob: Decode::decode(input)?,
        })
    }
}

impl Encode for PreimagesExtrinsic {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.entries.encode_to(out);
    }
}

impl Decode for PreimagesExtrinsic {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            entries: Decode::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_codec::decode_exact;

    #[test]
    fn preimages_extrinsic_roundtrips() {
        let extrinsic = PreimagesExtrinsic {
            entries: vec![PreimageEntry {
                requester: 7,
                blob: vec![1, 2, 3, 4],
            }],
        };
        assert_eq!(
            decode_exact::<PreimagesExtrinsic>(&extrinsic.encode()).unwrap(),
            extrinsic
        );
    }
}
