//! Self-describing signature value

use super::Algorithm;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A signature over one message.
///
/// Carries no reference to the key or message it was produced from; the
/// verifier supplies both. The algorithm tag only lets verification refuse
/// a signature from a different family.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    algorithm: Algorithm,
    bytes: Vec<u8>,
}

impl Signature {
    /// Wrap raw primitive output (DER `SEQUENCE { r, s }` for DSA, the
    /// big-endian signature block for RSA-PSS).
    pub fn from_parts(algorithm: Algorithm, bytes: Vec<u8>) -> Self {
        Self { algorithm, bytes }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Raw primitive bytes, without the algorithm tag
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encode as `tag || primitive bytes`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + 1);
        out.push(self.algorithm.tag());
        out.extend_from_slice(&self.bytes);
        out
    }

    /// Decode the output of [`Signature::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (&tag, body) = bytes
            .split_first()
            .ok_or_else(|| Error::InvalidSignatureEncoding("empty input".to_string()))?;

        let algorithm = Algorithm::from_tag(tag).ok_or_else(|| {
            Error::InvalidSignatureEncoding(format!("unknown algorithm tag 0x{:02x}", tag))
        })?;

        if body.is_empty() {
            return Err(Error::InvalidSignatureEncoding(
                "missing signature body".to_string(),
            ));
        }

        Ok(Self::from_parts(algorithm, body.to_vec()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Copy with a single bit inverted, or `None` if `bit` is past the end.
    /// Bit 0 is the most significant bit of the first primitive byte.
    pub fn with_bit_flipped(&self, bit: usize) -> Option<Self> {
        let mut bytes = self.bytes.clone();
        *bytes.get_mut(bit / 8)? ^= 0x80 >> (bit % 8);
        Some(Self::from_parts(self.algorithm, bytes))
    }

    /// Number of addressable bits for [`Signature::with_bit_flipped`]
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = &self.bytes[..self.bytes.len().min(8)];
        write!(
            f,
            "Signature({}, {}.., {} bytes)",
            self.algorithm,
            hex::encode(shown),
            self.bytes.len()
        )
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| Error::InvalidSignatureEncoding(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_encoding() {
        let sig = Signature::from_parts(Algorithm::Dsa, vec![0x30, 0x06, 0xaa]);
        assert_eq!(sig.to_bytes(), vec![0x01, 0x30, 0x06, 0xaa]);

        let decoded = Signature::from_bytes(&sig.to_bytes()).unwrap();
        assert_eq!(decoded, sig);
        assert_eq!(decoded.algorithm(), Algorithm::Dsa);
    }

    #[test]
    fn test_hex_form() {
        let sig = Signature::from_parts(Algorithm::RsaPss, vec![0xde, 0xad]);
        assert_eq!(sig.to_string(), "02dead");
        assert_eq!("02DEAD".parse::<Signature>().unwrap(), sig);
    }

    #[test]
    fn test_rejects_malformed_encodings() {
        assert!(matches!(
            Signature::from_bytes(&[]),
            Err(Error::InvalidSignatureEncoding(_))
        ));
        assert!(matches!(
            Signature::from_bytes(&[0x01]),
            Err(Error::InvalidSignatureEncoding(_))
        ));
        assert!(matches!(
            Signature::from_bytes(&[0x7f, 0x00]),
            Err(Error::InvalidSignatureEncoding(_))
        ));
        assert!("zz".parse::<Signature>().is_err());
    }

    #[test]
    fn test_bit_flip() {
        let sig = Signature::from_parts(Algorithm::Dsa, vec![0x00, 0xff]);
        assert_eq!(sig.bit_len(), 16);
        assert_eq!(sig.with_bit_flipped(0).unwrap().as_bytes(), &[0x80, 0xff]);
        assert_eq!(sig.with_bit_flipped(15).unwrap().as_bytes(), &[0x00, 0xfe]);
        // Flipping twice restores the original
        let twice = sig.with_bit_flipped(9).and_then(|s| s.with_bit_flipped(9));
        assert_eq!(twice, Some(sig.clone()));
    }

    #[test]
    fn test_bit_flip_out_of_range() {
        let sig = Signature::from_parts(Algorithm::Dsa, vec![0x00, 0xff]);
        assert_eq!(sig.with_bit_flipped(16), None);
        assert_eq!(sig.with_bit_flipped(usize::MAX), None);
    }

    #[test]
    fn test_debug_is_truncated() {
        let sig = Signature::from_parts(Algorithm::Dsa, vec![0xab; 64]);
        let debug = format!("{:?}", sig);
        assert!(debug.contains("64 bytes"));
        assert!(debug.len() < 80);
    }
}
