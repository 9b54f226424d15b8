//! dsig Core Library
//!
//! Key-pair generation, hash-then-sign signing and signature verification
//! for discrete-log (DSA) and RSA-PSS signature families. Randomness is
//! always injected by the caller so production code runs on OS entropy
//! while tests can run on a seeded generator.

pub mod config;
pub mod crypto;
pub mod demo;
pub mod rng;
pub mod version;

pub use config::SignatureConfig;
pub use crypto::{Algorithm, KeyPair, PrivateKey, PublicKey, Signature, SignatureService};
pub use version::{version_string, VERSION};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
///
/// A signature that simply does not match is never an error: `verify`
/// reports it as `Ok(false)`. These variants cover operational failures only.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unsupported parameters for {algorithm}: {reason}")]
    UnsupportedParameters { algorithm: Algorithm, reason: String },

    #[error("Insufficient entropy: {0}")]
    InsufficientEntropy(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Verification error: {0}")]
    VerificationError(String),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),
}
