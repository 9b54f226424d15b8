//! Signature service: key generation, signing and verification

use super::{Algorithm, KeyPair, PrivateKey, PublicKey, Signature};
use crate::config::SignatureConfig;
use crate::rng::CryptoRngCore;
use crate::Result;

/// Entry point for the signature workflow.
///
/// Holds only the validated algorithm and key size used for generation.
/// Signing and verification take their keys explicitly, so one service can
/// be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct SignatureService {
    config: SignatureConfig,
}

impl SignatureService {
    /// Create a service, rejecting configurations below the security floor
    pub fn new(config: SignatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    /// Generate a key pair with the configured algorithm and key size
    pub fn generate_key_pair(&self, rng: &mut impl CryptoRngCore) -> Result<KeyPair> {
        generate_key_pair(self.config.algorithm, self.config.key_size, rng)
    }

    pub fn sign(
        &self,
        private_key: &PrivateKey,
        message: &[u8],
        rng: &mut impl CryptoRngCore,
    ) -> Result<Signature> {
        sign(private_key, message, rng)
    }

    pub fn verify(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &Signature,
    ) -> Result<bool> {
        verify(public_key, message, signature)
    }
}

/// Generate a key pair for `algorithm` with a `key_size`-bit modulus
pub fn generate_key_pair(
    algorithm: Algorithm,
    key_size: u32,
    rng: &mut impl CryptoRngCore,
) -> Result<KeyPair> {
    KeyPair::generate(algorithm, key_size, rng)
}

/// Sign exactly `message` (which may be empty)
pub fn sign(
    private_key: &PrivateKey,
    message: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    private_key.sign(message, rng)
}

/// `Ok(true)` iff `signature` is valid over exactly `message` under
/// `public_key`
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> Result<bool> {
    public_key.verify(message, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fixtures::{dsa_key_pair, rng};
    use crate::Error;

    #[test]
    fn test_service_rejects_weak_config() {
        let config = SignatureConfig {
            algorithm: Algorithm::Dsa,
            key_size: 1024,
        };
        assert!(matches!(
            SignatureService::new(config),
            Err(Error::UnsupportedParameters { .. })
        ));
    }

    #[test]
    fn test_service_sign_verify() {
        let service = SignatureService::default();
        let key_pair = dsa_key_pair();
        let message = "qwertyuiopasdfghjklzxvbnm".as_bytes();

        let signature = service
            .sign(key_pair.private_key(), message, &mut rng(20))
            .unwrap();
        assert!(service
            .verify(key_pair.public_key(), message, &signature)
            .unwrap());
    }

    #[test]
    fn test_free_functions_match_service() {
        let key_pair = dsa_key_pair();
        let signature = sign(key_pair.private_key(), b"", &mut rng(21)).unwrap();
        assert!(verify(key_pair.public_key(), b"", &signature).unwrap());
        assert!(!verify(key_pair.public_key(), b"\0", &signature).unwrap());
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignatureService>();
        assert_send_sync::<KeyPair>();
        assert_send_sync::<Signature>();
    }
}
