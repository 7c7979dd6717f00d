use alloy::primitives::{hex, B256};
use serde::{Deserialize, Serialize};
use socket_constants::FinalityBucket;
use std::{fmt, str::FromStr};

/// Version byte written by [`TransmissionParam::from_finality`].
pub const TRANSMISSION_PARAM_VERSION: u8 = 1;

/// Finality-type byte for a bucket ordinal.
pub const FINALITY_TYPE_BUCKET: u8 = 1;
/// Finality-type byte for a block count.
pub const FINALITY_TYPE_BLOCKS: u8 = 2;
/// Finality-type byte for a number of seconds.
pub const FINALITY_TYPE_SECONDS: u8 = 3;

/// Errors produced by the transmission parameter codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// A field does not fit in its slot.
    #[error("{field} {value} exceeds maximum {max}")]
    ValueOutOfRange {
        /// The offending field.
        field: &'static str,
        /// The supplied value.
        value: u64,
        /// The largest accepted value.
        max: u64,
    },
    /// The encoded string is not 64 hex digits, optionally `0x`-prefixed.
    #[error("transmission param must be 64 hex digits, got {0} characters")]
    InvalidLength(usize),
    /// The encoded string contains non-hex characters.
    #[error("invalid transmission param hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// The finality-type byte is not recognized.
    #[error("unknown finality type {0}")]
    UnknownFinalityType(u8),
    /// A bucket-typed param carries an unknown bucket ordinal.
    #[error("unknown finality bucket {0}")]
    UnknownBucket(u32),
}

/// The 32-byte transmission parameter attached to an outbound message.
///
/// Byte 0 is the version, byte 1 the finality type, bytes 2..6 the
/// big-endian value. The remaining 26 bytes are zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransmissionParam {
    version: u8,
    finality_type: u8,
    value: u32,
}

impl TransmissionParam {
    /// Create a new param.
    pub const fn new(version: u8, finality_type: u8, value: u32) -> Self {
        Self { version, finality_type, value }
    }

    /// Create a new param from wide inputs, rejecting any that overflow.
    pub fn try_encode(version: u64, finality_type: u64, value: u64) -> Result<Self, ParamError> {
        fn narrow<T: TryFrom<u64>>(field: &'static str, value: u64, max: T) -> Result<T, ParamError>
        where
            u64: From<T>,
        {
            T::try_from(value).map_err(|_| ParamError::ValueOutOfRange {
                field,
                value,
                max: u64::from(max),
            })
        }

        Ok(Self::new(
            narrow("version", version, u8::MAX)?,
            narrow("finality type", finality_type, u8::MAX)?,
            narrow("value", value, u32::MAX)?,
        ))
    }

    /// Create a current-version param from a typed finality requirement.
    pub const fn from_finality(finality: TransmissionFinality) -> Self {
        let (finality_type, value) = match finality {
            TransmissionFinality::Bucket(bucket) => (FINALITY_TYPE_BUCKET, bucket.ordinal() as u32),
            TransmissionFinality::Blocks(blocks) => (FINALITY_TYPE_BLOCKS, blocks),
            TransmissionFinality::Seconds(seconds) => (FINALITY_TYPE_SECONDS, seconds),
        };
        Self::new(TRANSMISSION_PARAM_VERSION, finality_type, value)
    }

    /// Get the version byte.
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Get the finality-type byte.
    pub const fn finality_type(&self) -> u8 {
        self.finality_type
    }

    /// Get the value.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Interpret the finality type and value.
    pub fn finality(&self) -> Result<TransmissionFinality, ParamError> {
        match self.finality_type {
            FINALITY_TYPE_BUCKET => FinalityBucket::from_ordinal(self.value as u64)
                .map(TransmissionFinality::Bucket)
                .ok_or(ParamError::UnknownBucket(self.value)),
            FINALITY_TYPE_BLOCKS => Ok(TransmissionFinality::Blocks(self.value)),
            FINALITY_TYPE_SECONDS => Ok(TransmissionFinality::Seconds(self.value)),
            other => Err(ParamError::UnknownFinalityType(other)),
        }
    }

    /// The 32-byte encoding.
    pub fn to_b256(&self) -> B256 {
        let mut word = B256::ZERO;
        word[0] = self.version;
        word[1] = self.finality_type;
        word[2..6].copy_from_slice(&self.value.to_be_bytes());
        word
    }
}

impl From<B256> for TransmissionParam {
    fn from(word: B256) -> Self {
        let value = u32::from_be_bytes([word[2], word[3], word[4], word[5]]);
        Self::new(word[0], word[1], value)
    }
}

impl From<TransmissionParam> for B256 {
    fn from(param: TransmissionParam) -> Self {
        param.to_b256()
    }
}

impl From<TransmissionFinality> for TransmissionParam {
    fn from(finality: TransmissionFinality) -> Self {
        Self::from_finality(finality)
    }
}

impl fmt::Display for TransmissionParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_b256())
    }
}

impl FromStr for TransmissionParam {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 64 {
            return Err(ParamError::InvalidLength(s.len()));
        }
        let mut word = B256::ZERO;
        hex::decode_to_slice(digits, word.as_mut_slice())?;
        Ok(word.into())
    }
}

impl TryFrom<String> for TransmissionParam {
    type Error = ParamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransmissionParam> for String {
    fn from(param: TransmissionParam) -> Self {
        param.to_string()
    }
}

/// Typed view of the finality requirement carried by a
/// [`TransmissionParam`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransmissionFinality {
    /// Wait for the destination's threshold for this bucket.
    Bucket(FinalityBucket),
    /// Wait for this many blocks.
    Blocks(u32),
    /// Wait for this many seconds.
    Seconds(u32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_layout() {
        let param = TransmissionParam::new(1, 2, 255);
        let expected = format!("0x0102000000ff{}", "0".repeat(52));
        assert_eq!(param.to_string(), expected);
        assert_eq!(expected.parse::<TransmissionParam>().unwrap(), param);
        assert_eq!(expected[2..].parse::<TransmissionParam>().unwrap(), param);
    }

    #[test]
    fn try_encode_checks_ranges() {
        assert_eq!(TransmissionParam::try_encode(1, 3, 12).unwrap(), TransmissionParam::new(1, 3, 12));
        assert_eq!(
            TransmissionParam::try_encode(256, 1, 1),
            Err(ParamError::ValueOutOfRange { field: "version", value: 256, max: 255 })
        );
        assert_eq!(
            TransmissionParam::try_encode(1, 1, u32::MAX as u64 + 1),
            Err(ParamError::ValueOutOfRange {
                field: "value",
                value: u32::MAX as u64 + 1,
                max: u32::MAX as u64,
            })
        );
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert_eq!("0x0102".parse::<TransmissionParam>(), Err(ParamError::InvalidLength(6)));
        assert_eq!(
            format!("0x{}", "0".repeat(66)).parse::<TransmissionParam>(),
            Err(ParamError::InvalidLength(68))
        );
        assert!(matches!(
            format!("0x{}", "g".repeat(64)).parse::<TransmissionParam>(),
            Err(ParamError::InvalidHex(_))
        ));
    }

    #[test]
    fn padding_is_ignored_on_decode() {
        let mut word = TransmissionParam::new(1, 2, 7).to_b256();
        word[31] = 0xff;
        assert_eq!(TransmissionParam::from(word), TransmissionParam::new(1, 2, 7));
    }

    #[test]
    fn typed_view() {
        let param = TransmissionParam::from(TransmissionFinality::Bucket(FinalityBucket::Medium));
        assert_eq!(param, TransmissionParam::new(1, FINALITY_TYPE_BUCKET, 2));
        assert_eq!(param.finality(), Ok(TransmissionFinality::Bucket(FinalityBucket::Medium)));
        assert_eq!(
            TransmissionParam::new(1, FINALITY_TYPE_SECONDS, 90).finality(),
            Ok(TransmissionFinality::Seconds(90))
        );
        assert_eq!(TransmissionParam::new(1, 9, 0).finality(), Err(ParamError::UnknownFinalityType(9)));
        assert_eq!(
            TransmissionParam::new(1, FINALITY_TYPE_BUCKET, 4).finality(),
            Err(ParamError::UnknownBucket(4))
        );
    }

    #[test]
    fn serde_as_hex_string() {
        let param = TransmissionParam::new(1, 2, 100);
        let json = serde_json::to_string(&param).unwrap();
        assert_eq!(serde_json::from_str::<TransmissionParam>(&json).unwrap(), param);
    }

    proptest! {
        #[test]
        fn round_trip(version in any::<u8>(), finality_type in any::<u8>(), value in any::<u32>()) {
            let param = TransmissionParam::new(version, finality_type, value);
            prop_assert_eq!(param.to_string().parse::<TransmissionParam>().unwrap(), param);
        }
    }
}
