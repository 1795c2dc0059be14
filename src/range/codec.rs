//! Wire encoding of [`RangeOverride`] payloads.
//!
//! A payload is a bincode-encoded [`RangePayload`] envelope. The envelope
//! either carries the override directly or a zstd frame holding its bincode
//! encoding, so large trees can travel compressed through the task
//! parameters.

use std::io::Read;

use bincode::{Decode, Encode, config};
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::range::RangeOverride;

pub use zstd::DEFAULT_COMPRESSION_LEVEL;

/// Upper bound on a decoded override, compressed or not.
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Decode)]
enum RangePayload {
    Plain(RangeOverride),
    Compressed(Vec<u8>),
}

// Same wire layout as `RangePayload`, borrowed for encoding.
#[derive(Encode)]
enum RangePayloadRef<'a> {
    Plain(&'a RangeOverride),
    Compressed(&'a [u8]),
}

fn decode_config() -> impl config::Config {
    config::standard().with_limit::<MAX_PAYLOAD_BYTES>()
}

pub fn encode_range(range: &RangeOverride) -> Result<Vec<u8>, RangeCodecError> {
    bincode::encode_to_vec(RangePayloadRef::Plain(range), config::standard()).context(EncodeSnafu)
}

pub fn encode_range_compressed(
    range: &RangeOverride,
    level: i32,
) -> Result<Vec<u8>, RangeCodecError> {
    let raw = bincode::encode_to_vec(range, config::standard()).context(EncodeSnafu)?;
    let compressed = zstd::encode_all(raw.as_slice(), level).context(CompressionSnafu)?;
    debug!(
        "Compressed range payload from {} to {} bytes",
        raw.len(),
        compressed.len()
    );

    bincode::encode_to_vec(RangePayloadRef::Compressed(&compressed), config::standard())
        .context(EncodeSnafu)
}

pub fn decode_range(bytes: &[u8]) -> Result<RangeOverride, RangeCodecError> {
    match decode_exact::<RangePayload>(bytes)? {
        RangePayload::Plain(range) => Ok(range),
        RangePayload::Compressed(frame) => {
            let raw = decompress_frame(&frame, MAX_PAYLOAD_BYTES)?;
            decode_exact(&raw)
        }
    }
}

fn decompress_frame(frame: &[u8], limit: usize) -> Result<Vec<u8>, RangeCodecError> {
    let mut raw = Vec::new();
    zstd::Decoder::new(frame)
        .context(DecompressionSnafu)?
        .take(limit as u64 + 1)
        .read_to_end(&mut raw)
        .context(DecompressionSnafu)?;
    if raw.len() > limit {
        return PayloadTooLargeSnafu { limit }.fail();
    }
    Ok(raw)
}

fn decode_exact<T: Decode<()>>(bytes: &[u8]) -> Result<T, RangeCodecError> {
    let (value, consumed) =
        bincode::decode_from_slice(bytes, decode_config()).context(DecodeSnafu)?;
    if consumed != bytes.len() {
        return TrailingBytesSnafu {
            count: bytes.len() - consumed,
        }
        .fail();
    }
    Ok(value)
}

#[derive(Debug, Snafu)]
pub enum RangeCodecError {
    #[snafu(display("Failed to encode range payload"))]
    EncodeError { source: bincode::error::EncodeError },
    #[snafu(display("Failed to decode range payload"))]
    DecodeError { source: bincode::error::DecodeError },
    #[snafu(display("Range payload has {} unexpected trailing bytes", count))]
    TrailingBytesError { count: usize },
    #[snafu(display("Failed to compress range payload"))]
    CompressionError { source: std::io::Error },
    #[snafu(display("Failed to decompress range payload"))]
    DecompressionError { source: std::io::Error },
    #[snafu(display("Decompressed range payload exceeds {} bytes", limit))]
    PayloadTooLargeError { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::TreeNode;

    fn sample_range() -> RangeOverride {
        RangeOverride::new(42)
            .with_selected_names(["my/path"])
            .with_path_tree([TreeNode::structural("root2").with_children([TreeNode::readable("f4", 42)])])
    }

    #[test]
    fn decodes_plain_payload() {
        let bytes = encode_range(&sample_range()).expect("Failed to encode range");

        let decoded = decode_range(&bytes).expect("Failed to decode range");

        assert_eq!(decoded, sample_range());
    }

    #[test]
    fn decodes_compressed_payload() {
        let range = sample_range().with_path_tree(
            (0..200).map(|i| TreeNode::readable(format!("file-{i}.parquet"), i)),
        );
        let plain = encode_range(&range).expect("Failed to encode range");
        let compressed =
            encode_range_compressed(&range, DEFAULT_COMPRESSION_LEVEL).expect("Failed to compress range");

        assert!(compressed.len() < plain.len());
        assert_eq!(decode_range(&compressed).expect("Failed to decode range"), range);
    }

    #[test]
    fn empty_blob_is_a_decode_error() {
        assert!(matches!(
            decode_range(&[]),
            Err(RangeCodecError::DecodeError { .. })
        ));
    }

    #[test]
    fn unknown_envelope_variant_is_a_decode_error() {
        assert!(matches!(
            decode_range(&[7, 0, 0]),
            Err(RangeCodecError::DecodeError { .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode_range(&sample_range()).expect("Failed to encode range");
        bytes.extend_from_slice(&[0, 0, 0]);

        assert!(matches!(
            decode_range(&bytes),
            Err(RangeCodecError::TrailingBytesError { count: 3 })
        ));
    }

    #[test]
    fn corrupt_compressed_frame_is_a_decompression_error() {
        let bytes = bincode::encode_to_vec(
            RangePayloadRef::Compressed(&[1, 2, 3, 4]),
            config::standard(),
        )
        .expect("Failed to encode envelope");

        assert!(matches!(
            decode_range(&bytes),
            Err(RangeCodecError::DecompressionError { .. })
        ));
    }

    #[test]
    fn huge_length_prefix_is_a_decode_error() {
        // Plain variant, offset 0, then a 2^40 element name list.
        let mut bytes = vec![0, 0, 253];
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());

        assert!(matches!(
            decode_range(&bytes),
            Err(RangeCodecError::DecodeError { .. })
        ));
    }

    #[test]
    fn huge_compressed_frame_length_is_a_decode_error() {
        let mut bytes = vec![1, 253];
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());

        assert!(matches!(
            decode_range(&bytes),
            Err(RangeCodecError::DecodeError { .. })
        ));
    }

    #[test]
    fn decompressed_output_is_capped() {
        let frame = zstd::encode_all(vec![0u8; 4096].as_slice(), DEFAULT_COMPRESSION_LEVEL)
            .expect("Failed to compress");

        assert!(matches!(
            decompress_frame(&frame, 1024),
            Err(RangeCodecError::PayloadTooLargeError { limit: 1024 })
        ));
        assert_eq!(
            decompress_frame(&frame, 4096).expect("Failed to decompress").len(),
            4096
        );
    }

    #[test]
    fn error_display_describes_the_failure() {
        let err = decode_range(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Failed to decode range payload");
    }
}
