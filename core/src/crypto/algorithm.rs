//! Signature algorithm families and key-size policy

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest modulus accepted for any family, in bits
pub const MIN_KEY_SIZE: u32 = 2048;

/// Supported asymmetric signature families.
///
/// Both families hash the message with SHA-256 before the asymmetric
/// primitive runs, and both are probabilistic: every signature consumes
/// fresh randomness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// FIPS 186-4 DSA over SHA-256
    #[default]
    Dsa,
    /// RSASSA-PSS over SHA-256
    RsaPss,
}

impl Algorithm {
    /// Standard signature algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dsa => "SHA256withDSA",
            Algorithm::RsaPss => "SHA256withRSA/PSS",
        }
    }

    /// Modulus sizes this family can generate, in bits
    pub fn supported_key_sizes(&self) -> &'static [u32] {
        match self {
            // (L, N) = (2048, 256) and (3072, 256)
            Algorithm::Dsa => &[2048, 3072],
            Algorithm::RsaPss => &[2048, 3072, 4096],
        }
    }

    pub fn default_key_size(&self) -> u32 {
        MIN_KEY_SIZE
    }

    /// Check a requested key size against the security floor and the sizes
    /// the family defines.
    pub fn validate_key_size(&self, key_size: u32) -> Result<()> {
        if key_size < MIN_KEY_SIZE {
            return Err(Error::UnsupportedParameters {
                algorithm: *self,
                reason: format!(
                    "{}-bit keys are below the {}-bit minimum",
                    key_size, MIN_KEY_SIZE
                ),
            });
        }

        if !self.supported_key_sizes().contains(&key_size) {
            return Err(Error::UnsupportedParameters {
                algorithm: *self,
                reason: format!(
                    "{}-bit keys are not defined (supported: {:?})",
                    key_size,
                    self.supported_key_sizes()
                ),
            });
        }

        Ok(())
    }

    /// Tag byte prefixed to encoded signatures
    pub(crate) fn tag(&self) -> u8 {
        match self {
            Algorithm::Dsa => 0x01,
            Algorithm::RsaPss => 0x02,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Algorithm::Dsa),
            0x02 => Some(Algorithm::RsaPss),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dsa" | "sha256withdsa" => Ok(Algorithm::Dsa),
            "rsa" | "rsa-pss" | "rsapss" | "sha256withrsa/pss" => Ok(Algorithm::RsaPss),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("DSA".parse::<Algorithm>().unwrap(), Algorithm::Dsa);
        assert_eq!("SHA256withDSA".parse::<Algorithm>().unwrap(), Algorithm::Dsa);
        assert_eq!("rsa-pss".parse::<Algorithm>().unwrap(), Algorithm::RsaPss);
        assert_eq!(" RSA ".parse::<Algorithm>().unwrap(), Algorithm::RsaPss);
        assert_eq!(
            Algorithm::RsaPss.name().parse::<Algorithm>().unwrap(),
            Algorithm::RsaPss
        );
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let err = "ECDSA".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(name) if name == "ECDSA"));
    }

    #[test]
    fn test_key_size_floor() {
        for algorithm in [Algorithm::Dsa, Algorithm::RsaPss] {
            for size in [0, 512, 1024, 2047] {
                assert!(matches!(
                    algorithm.validate_key_size(size),
                    Err(Error::UnsupportedParameters { .. })
                ));
            }
            assert!(algorithm.validate_key_size(2048).is_ok());
            assert!(algorithm.validate_key_size(3072).is_ok());
        }
    }

    #[test]
    fn test_undefined_key_sizes_rejected() {
        assert!(Algorithm::Dsa.validate_key_size(4096).is_err());
        assert!(Algorithm::RsaPss.validate_key_size(4096).is_ok());
        assert!(Algorithm::RsaPss.validate_key_size(2049).is_err());
    }

    #[test]
    fn test_tags_roundtrip() {
        for algorithm in [Algorithm::Dsa, Algorithm::RsaPss] {
            assert_eq!(Algorithm::from_tag(algorithm.tag()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_tag(0x00), None);
        assert_eq!(Algorithm::from_tag(0xff), None);
    }
}
