//! Cryptographic primitives module
//!
//! This module provides:
//! - Algorithm families and the key-size policy
//! - Key-pair generation and the public/private key wrappers
//! - The self-describing signature value
//! - The signature service tying generation, signing and verification together

pub mod algorithm;
pub mod keys;
pub mod signature;
pub mod signing;

pub use algorithm::Algorithm;
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use self::signature::Signature;
pub use signing::SignatureService;
