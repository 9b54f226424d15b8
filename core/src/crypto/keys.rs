//! Key pairs and the public/private key wrappers

use super::algorithm::MIN_KEY_SIZE;
use super::{Algorithm, Signature};
use crate::rng::{ensure_entropy, CryptoRngCore};
use crate::{Error, Result};
use pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::pss::{BlindedSigningKey, VerifyingKey as PssVerifyingKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use signature::{
    DigestVerifier, RandomizedDigestSigner, RandomizedSigner, SignatureEncoding, Verifier,
};
use std::fmt;
use std::hash::{Hash, Hasher};

enum PrivateInner {
    Dsa(dsa::SigningKey),
    RsaPss(BlindedSigningKey<Sha256>),
}

/// Private signing capability.
///
/// There is no export path and `Debug` never prints key material.
pub struct PrivateKey {
    inner: PrivateInner,
    key_size: u32,
}

impl PrivateKey {
    pub fn algorithm(&self) -> Algorithm {
        match self.inner {
            PrivateInner::Dsa(_) => Algorithm::Dsa,
            PrivateInner::RsaPss(_) => Algorithm::RsaPss,
        }
    }

    /// Modulus size in bits
    pub fn key_size(&self) -> u32 {
        self.key_size
    }

    /// Sign the exact message bytes.
    ///
    /// The message is hashed with SHA-256 first; the per-signature secret
    /// (DSA `k`, PSS salt) is drawn from `rng`.
    pub fn sign(&self, message: &[u8], rng: &mut impl CryptoRngCore) -> Result<Signature> {
        ensure_entropy(rng)?;

        let bytes = match &self.inner {
            PrivateInner::Dsa(key) => {
                let digest = Sha256::new_with_prefix(message);
                let sig: dsa::Signature = key
                    .try_sign_digest_with_rng(rng, digest)
                    .map_err(|e| Error::SigningFailed(format!("DSA: {}", e)))?;
                sig.to_vec()
            }
            PrivateInner::RsaPss(key) => {
                let sig: rsa::pss::Signature = key
                    .try_sign_with_rng(rng, message)
                    .map_err(|e| Error::SigningFailed(format!("RSA-PSS: {}", e)))?;
                sig.to_vec()
            }
        };

        tracing::debug!(
            algorithm = %self.algorithm(),
            message_len = message.len(),
            signature_len = bytes.len(),
            "Signed message"
        );

        Ok(Signature::from_parts(self.algorithm(), bytes))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PrivateKey({}, {} bits, <redacted>)",
            self.algorithm(),
            self.key_size
        )
    }
}

#[derive(Clone)]
enum PublicInner {
    Dsa(dsa::VerifyingKey),
    RsaPss(PssVerifyingKey<Sha256>),
}

/// Public verification capability, freely shareable.
///
/// Serialized as an X.509 SubjectPublicKeyInfo DER document, which names the
/// algorithm by OID.
#[derive(Clone)]
pub struct PublicKey {
    inner: PublicInner,
    key_size: u32,
    der: Vec<u8>,
}

impl PublicKey {
    fn from_dsa(key: dsa::VerifyingKey) -> Result<Self> {
        let document = key.to_public_key_der();
        let bits = key.components().p().bits();
        Self::new(PublicInner::Dsa(key), document, bits)
    }

    fn from_rsa(key: RsaPublicKey) -> Result<Self> {
        let document = key.to_public_key_der();
        let bits = key.n().bits();
        Self::new(
            PublicInner::RsaPss(PssVerifyingKey::<Sha256>::new(key)),
            document,
            bits,
        )
    }

    fn new(
        inner: PublicInner,
        document: pkcs8::spki::Result<pkcs8::Document>,
        bits: usize,
    ) -> Result<Self> {
        let document =
            document.map_err(|e| Error::InvalidKey(format!("public key encoding: {}", e)))?;

        Ok(Self {
            inner,
            key_size: bits as u32,
            der: document.as_bytes().to_vec(),
        })
    }

    /// Decode a SubjectPublicKeyInfo DER document holding a DSA or RSA key.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let key = if let Ok(key) = dsa::VerifyingKey::from_public_key_der(der) {
            Self::from_dsa(key)?
        } else if let Ok(key) = RsaPublicKey::from_public_key_der(der) {
            Self::from_rsa(key)?
        } else {
            return Err(Error::InvalidKey(
                "not a DSA or RSA SubjectPublicKeyInfo document".to_string(),
            ));
        };

        if key.key_size < MIN_KEY_SIZE {
            return Err(Error::UnsupportedParameters {
                algorithm: key.algorithm(),
                reason: format!(
                    "{}-bit keys are below the {}-bit minimum",
                    key.key_size, MIN_KEY_SIZE
                ),
            });
        }

        Ok(key)
    }

    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    pub fn algorithm(&self) -> Algorithm {
        match self.inner {
            PublicInner::Dsa(_) => Algorithm::Dsa,
            PublicInner::RsaPss(_) => Algorithm::RsaPss,
        }
    }

    /// Modulus size in bits
    pub fn key_size(&self) -> u32 {
        self.key_size
    }

    /// SHA-256 of the DER encoding
    pub fn fingerprint(&self) -> [u8; 32] {
        Sha256::digest(&self.der).into()
    }

    /// First 8 fingerprint bytes in hex, for logs and display
    pub fn short_fingerprint(&self) -> String {
        hex::encode(&self.fingerprint()[..8])
    }

    /// Check `signature` against exactly these message bytes.
    ///
    /// Returns `Ok(false)` for any signature that does not match, including
    /// bytes that do not even decode. Only a signature from a different
    /// algorithm family is an error, since no predicate can be evaluated.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool> {
        if signature.algorithm() != self.algorithm() {
            return Err(Error::VerificationError(format!(
                "{} signature cannot be checked with a {} key",
                signature.algorithm(),
                self.algorithm()
            )));
        }

        let valid = match &self.inner {
            PublicInner::Dsa(key) => match dsa::Signature::try_from(signature.as_bytes()) {
                Ok(sig) => key
                    .verify_digest(Sha256::new_with_prefix(message), &sig)
                    .is_ok(),
                Err(_) => false,
            },
            PublicInner::RsaPss(key) => {
                match rsa::pss::Signature::try_from(signature.as_bytes()) {
                    Ok(sig) => key.verify(message, &sig).is_ok(),
                    Err(_) => false,
                }
            }
        };

        tracing::debug!(
            algorithm = %self.algorithm(),
            key = %self.short_fingerprint(),
            message_len = message.len(),
            valid,
            "Verified signature"
        );

        Ok(valid)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.der.hash(state);
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PublicKey({}, {} bits, {})",
            self.algorithm(),
            self.key_size,
            self.short_fingerprint()
        )
    }
}

/// Matching private and public keys, generated together and immutable
/// afterwards.
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair.
    ///
    /// The key size is validated against the family's policy before any
    /// entropy is consumed.
    pub fn generate(
        algorithm: Algorithm,
        key_size: u32,
        rng: &mut impl CryptoRngCore,
    ) -> Result<Self> {
        algorithm.validate_key_size(key_size)?;
        ensure_entropy(rng)?;

        let key_pair = match algorithm {
            Algorithm::Dsa => {
                let components = dsa::Components::generate(rng, dsa_key_size(key_size)?);
                Self::from_dsa_components(components, key_size, rng)?
            }
            Algorithm::RsaPss => {
                let private = RsaPrivateKey::new(rng, key_size as usize).map_err(|e| {
                    Error::UnsupportedParameters {
                        algorithm,
                        reason: e.to_string(),
                    }
                })?;
                let public = RsaPublicKey::from(&private);

                Self {
                    private: PrivateKey {
                        inner: PrivateInner::RsaPss(BlindedSigningKey::<Sha256>::new(private)),
                        key_size,
                    },
                    public: PublicKey::from_rsa(public)?,
                }
            }
        };

        tracing::debug!(
            algorithm = %algorithm,
            key_size,
            key = %key_pair.public.short_fingerprint(),
            "Generated key pair"
        );

        Ok(key_pair)
    }

    /// Generate an independent key pair with the same algorithm and size.
    ///
    /// DSA peers share the domain parameters (p, q, g) and differ in their
    /// secret exponent, which skips the expensive parameter search.
    pub fn generate_peer(&self, rng: &mut impl CryptoRngCore) -> Result<Self> {
        match &self.public.inner {
            PublicInner::Dsa(key) => {
                ensure_entropy(rng)?;
                Self::from_dsa_components(key.components().clone(), self.key_size(), rng)
            }
            PublicInner::RsaPss(_) => Self::generate(Algorithm::RsaPss, self.key_size(), rng),
        }
    }

    fn from_dsa_components(
        components: dsa::Components,
        key_size: u32,
        rng: &mut impl CryptoRngCore,
    ) -> Result<Self> {
        let signing_key = dsa::SigningKey::generate(rng, components);
        let public = PublicKey::from_dsa(signing_key.verifying_key().clone())?;

        Ok(Self {
            private: PrivateKey {
                inner: PrivateInner::Dsa(signing_key),
                key_size,
            },
            public,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn algorithm(&self) -> Algorithm {
        self.public.algorithm()
    }

    pub fn key_size(&self) -> u32 {
        self.private.key_size
    }

    /// Sign a message with the private half
    pub fn sign(&self, message: &[u8], rng: &mut impl CryptoRngCore) -> Result<Signature> {
        self.private.sign(message, rng)
    }

    /// Verify a signature with the public half
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool> {
        self.public.verify(message, signature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &self.private)
            .field("public", &self.public)
            .finish()
    }
}

fn dsa_key_size(key_size: u32) -> Result<dsa::KeySize> {
    match key_size {
        2048 => Ok(dsa::KeySize::DSA_2048_256),
        3072 => Ok(dsa::KeySize::DSA_3072_256),
        _ => Err(Error::UnsupportedParameters {
            algorithm: Algorithm::Dsa,
            reason: format!("no (L, N) pair for {}-bit keys", key_size),
        }),
    }
}
