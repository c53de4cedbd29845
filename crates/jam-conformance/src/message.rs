//! The conformance protocol's wire messages (spec.md §4.11): a varint
//! length prefix followed by a codec-encoded, single-discriminant-byte
//! sum type. Grounded on `zeratul-p2p/src/jamnp.rs`'s `Message::encode`/
//! `decode` (length-prefix-then-payload shape), generalized from that
//! protocol's fixed 4-byte prefix to `jam-codec`'s bijective varint.

use jam_codec::{decode_exact, CodecError, Decode, Encode};
use jam_state::StateKey;
use jam_stf::{Block, Header};
use jam_types::Hash;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// One ancestor block's hash and slot, used so a guarantee's context can
/// anchor further back than β's own bounded depth (spec.md §4.11's
/// `initialize` payload names `ancestry` without fixing its shape; this is
/// the minimal pair the reports subsystem's anchor lookups need).
pub type AncestryItem = (Hash, jam_types::TimeSlot);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerInfo {
    pub fuzz_version: u8,
    pub fuzz_features: u32,
    pub jam_version: (u8, u8, u8),
    pub app_version: (u8, u8, u8),
    pub app_name: String,
}

impl Encode for PeerInfo {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.fuzz_version.encode_to(out);
        self.fuzz_features.encode_to(out);
        self.jam_version.0.encode_to(out);
        self.jam_version.1.encode_to(out);
        self.jam_version.2.encode_to(out);
        self.app_version.0.encode_to(out);
        self.app_version.1.encode_to(out);
        self.app_version.2.encode_to(out);
        self.app_name.encode_to(out);
    }
}

impl Decode for PeerInfo {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            fuzz_version: Decode::decode(input)?,
            fuzz_features: Decode::decode(input)?,
            jam_version: (
                Decode::decode(input)?,
                Decode::decode(input)?,
                Decode::decode(input)?,
            ),
            app_version: (
                Decode::decode(input)?,
                Decode::decode(input)?,
                Decode::decode(input)?,
            ),
            app_name: Decode::decode(input)?,
        })
    }
}

/// The conformance protocol's wire messages, tagged per spec.md §4.11's
/// discriminant table. Tag 255 (`error`) is kept out of band from 1..=5 on
/// purpose, matching the spec's own table rather than a dense 0..6 run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    PeerInfo(PeerInfo),
    Initialize {
        header: Header,
        keyvals: Vec<(StateKey, Vec<u8>)>,
        ancestry: Vec<AncestryItem>,
    },
    StateRoot(Hash),
    ImportBlock(Block),
    GetState(Hash),
    State(Vec<(StateKey, Vec<u8>)>),
    Error(String),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Message::PeerInfo(_) => "peer_info",
            Message::Initialize { .. } => "initialize",
            Message::StateRoot(_) => "state_root",
            Message::ImportBlock(_) => "import_block",
            Message::GetState(_) => "get_state",
            Message::State(_) => "state",
            Message::Error(_) => "error",
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Message::PeerInfo(_) => 0,
            Message::Initialize { .. } => 1,
            Message::StateRoot(_) => 2,
            Message::ImportBlock(_) => 3,
            Message::GetState(_) => 4,
            Message::State(_) => 5,
            Message::Error(_) => 255,
        }
    }
}

impl Encode for Message {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.tag().encode_to(out);
        match self {
            Message::PeerInfo(info) => info.encode_to(out),
            Message::Initialize { header, keyvals, ancestry } => {
                header.encode_to(out);
                keyvals.encode_to(out);
                ancestry.encode_to(out);
            }
            Message::StateRoot(root) => root.encode_to(out),
            Message::ImportBlock(block) => block.encode_to(out),
            Message::GetState(hash) => hash.encode_to(out),
            Message::State(keyvals) => keyvals.encode_to(out),
            Message::Error(message) => message.encode_to(out),
        }
    }
}

impl Decode for Message {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let tag: u8 = Decode::decode(input)?;
        Ok(match tag {
            0 => Message::PeerInfo(Decode::decode(input)?),
            1 => Message::Initialize {
                header: Decode::decode(input)?,
                keyvals: Decode::decode(input)?,
                ancestry: Decode::decode(input)?,
            },
            2 => Message::StateRoot(Decode::decode(input)?),
            3 => Message::ImportBlock(Decode::decode(input)?),
            4 => Message::GetState(Decode::decode(input)?),
            5 => Message::State(Decode::decode(input)?),
            255 => Message::Error(Decode::decode(input)?),
            found => {
                return Err(CodecError::DiscriminantOutOfRange {
                    found: found as u64,
                    max: 256,
                })
            }
        })
    }
}

/// Reads one varint off `reader`, byte by byte: the first byte's leading
/// one-bits say how many continuation bytes follow, so the continuation
/// is read in one shot and handed to [`jam_codec::decode_varint`] rather
/// than re-implementing its bit arithmetic here.
async fn read_varint_async<R: AsyncRead + Unpin>(reader: &mut R) -> std::io::Result<u64> {
    let b0 = reader.read_u8().await?;
    let leading = b0.leading_ones();
    let tail_len = if leading == 8 { 8 } else { leading as usize };
    let mut buf = Vec::with_capacity(1 + tail_len);
    buf.push(b0);
    if tail_len > 0 {
        let mut tail = vec![0u8; tail_len];
        reader.read_exact(&mut tail).await?;
        buf.extend_from_slice(&tail);
    }
    let mut cursor: &[u8] = &buf;
    jam_codec::decode_varint(&mut cursor)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
}

/// Writes one length-prefixed frame: `varint(payload.len()) ‖ payload`.
/// The write is a single buffer handed to the stream in one call, so a
/// partial write never leaves a half-frame on the wire (spec.md §5: "Writes
/// are blocking; per-message writes are atomic").
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &Message,
) -> std::io::Result<()> {
    let payload = message.encode();
    let mut framed = Vec::with_capacity(payload.len() + 9);
    jam_codec::encode_varint(payload.len() as u64, &mut framed);
    framed.extend_from_slice(&payload);
    writer.write_all(&framed).await?;
    writer.flush().await
}

/// Reads one length-prefixed frame and decodes it. Spec.md §5's single
/// suspension point: any I/O error here terminates the session.
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> std::io::Result<Message> {
    let len = read_varint_async(reader).await? as usize;
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    decode_exact(&payload)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_info_roundtrips() {
        let info = Message::PeerInfo(PeerInfo {
            fuzz_version: 1,
            fuzz_features: 0,
            jam_version: (0, 6, 7),
            app_version: (0, 1, 0),
            app_name: "jam-conformance".to_string(),
        });
        assert_eq!(decode_exact::<Message>(&info.encode()).unwrap(), info);
    }

    #[test]
    fn state_root_roundtrips() {
        let msg = Message::StateRoot([7u8; 32]);
        assert_eq!(decode_exact::<Message>(&msg.encode()).unwrap(), msg);
    }

    #[test]
    fn state_roundtrips_with_several_keyvals() {
        let msg = Message::State(vec![
            ([1u8; 31], vec![1, 2, 3]),
            ([2u8; 31], vec![]),
        ]);
        assert_eq!(decode_exact::<Message>(&msg.encode()).unwrap(), msg);
    }

    #[test]
    fn error_message_roundtrips() {
        let msg = Message::Error("state root mismatch at block 3".to_string());
        assert_eq!(decode_exact::<Message>(&msg.encode()).unwrap(), msg);
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let bytes = vec![7u8];
        assert_eq!(
            decode_exact::<Message>(&bytes),
            Err(CodecError::DiscriminantOutOfRange { found: 7, max: 256 })
        );
    }

    #[tokio::test]
    async fn frame_round_trips_over_an_in_process_duplex_pipe() {
        let (mut a, mut b) = tokio::io::duplex(4096);
        let msg = Message::GetState([9u8; 32]);
        write_frame(&mut a, &msg).await.unwrap();
        let decoded = read_frame(&mut b).await.unwrap();
        assert_eq!(decoded, msg);
    }

    #[tokio::test]
    async fn a_large_frame_exercises_the_multi_byte_varint_path() {
        let (mut a, mut b) = tokio::io::duplex(1 << 16);
        let msg = Message::Error("x".repeat(5000));
        write_frame(&mut a, &msg).await.unwrap();
        let decoded = read_frame(&mut b).await.unwrap();
        assert_eq!(decoded, msg);
    }
}
