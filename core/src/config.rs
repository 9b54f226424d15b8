//! Signature configuration
//!
//! Defaults mirror the classic `SHA256withDSA` setup with a 2048-bit modulus.
//! Environment variables override the defaults; the CLI overrides both.

use crate::crypto::Algorithm;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Algorithm family, e.g. `dsa` or `rsa-pss`
pub const ENV_ALGORITHM: &str = "DSIG_ALGORITHM";

/// Modulus size in bits
pub const ENV_KEY_SIZE: &str = "DSIG_KEY_SIZE";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Signature algorithm family
    pub algorithm: Algorithm,

    /// Modulus size in bits
    pub key_size: u32,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Dsa,
            key_size: Algorithm::Dsa.default_key_size(),
        }
    }
}

impl SignatureConfig {
    pub fn new(algorithm: Algorithm, key_size: u32) -> Result<Self> {
        let config = Self {
            algorithm,
            key_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.algorithm.validate_key_size(self.key_size)
    }

    /// Read `DSIG_ALGORITHM` and `DSIG_KEY_SIZE` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SignatureConfig::from_env`], with explicit values taking
    /// precedence over the environment.
    pub fn from_env_with(algorithm: Option<Algorithm>, key_size: Option<u32>) -> Result<Self> {
        Self::from_lookup_with(|key| std::env::var(key).ok(), algorithm, key_size)
    }

    /// Build a config from any key/value source. Unset keys fall back to the
    /// defaults; an unset key size follows the chosen algorithm's default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with(lookup, None, None)
    }

    /// Merge explicit values over a key/value source, then validate once.
    ///
    /// A source key is not read at all when its explicit value is given. An
    /// explicit algorithm also discards the source key size, which was chosen
    /// for the source algorithm; the key size then comes from `key_size` or
    /// the explicit algorithm's default.
    pub fn from_lookup_with<F>(
        lookup: F,
        algorithm: Option<Algorithm>,
        key_size: Option<u32>,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let algorithm_explicit = algorithm.is_some();
        let algorithm = match (algorithm, lookup(ENV_ALGORITHM)) {
            (Some(algorithm), _) => algorithm,
            (None, Some(value)) => value.parse::<Algorithm>()?,
            (None, None) => Algorithm::default(),
        };

        let key_size = match key_size {
            Some(key_size) => key_size,
            None if algorithm_explicit => algorithm.default_key_size(),
            None => match lookup(ENV_KEY_SIZE) {
                Some(value) => {
                    value
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| Error::UnsupportedParameters {
                            algorithm,
                            reason: format!("invalid {} '{}': {}", ENV_KEY_SIZE, value, e),
                        })?
                }
                None => algorithm.default_key_size(),
            },
        };

        Self::new(algorithm, key_size)
    }
}
