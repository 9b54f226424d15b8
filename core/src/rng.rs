//! Secure randomness providers
//!
//! Every operation that needs randomness takes `&mut impl CryptoRngCore`
//! from its caller. Production code passes [`OsRng`]; tests pass a seeded
//! [`StdRng`] from [`seeded`].

pub use rand::rngs::{OsRng, StdRng};
pub use rand_core::CryptoRngCore;

use crate::{Error, Result};
use rand::SeedableRng;
use zeroize::Zeroize;

const SAMPLE_LEN: usize = 32;

/// Deterministic generator for tests and reproducible demo runs.
///
/// Never use this for keys that protect anything.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draw a sample from the provider and report a failing source as
/// `InsufficientEntropy`.
///
/// The signature primitives call the infallible `fill_bytes`, which panics
/// on a broken source, so the failure has to be surfaced before they run.
pub fn ensure_entropy(rng: &mut impl CryptoRngCore) -> Result<()> {
    let mut sample = [0u8; SAMPLE_LEN];
    let outcome = rng.try_fill_bytes(&mut sample);
    sample.zeroize();

    outcome.map_err(|e| {
        tracing::warn!(error = %e, "Entropy source unavailable");
        Error::InsufficientEntropy(e.to_string())
    })
}
