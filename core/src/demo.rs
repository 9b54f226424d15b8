//! Demonstration scenarios
//!
//! Signs a message, then checks three outcomes with the same key pair:
//! - Positive: the signature verifies against the message it was made for
//! - Negative: a signature over a differing message does not verify against
//!   the original message
//! - Tampered: the positive signature with one bit flipped does not verify
//!
//! Text messages are signed as their UTF-8 bytes, with no trimming or
//! normalization.

use crate::crypto::{Algorithm, KeyPair, SignatureService};
use crate::rng::CryptoRngCore;
use crate::{Error, Result};
use serde::Serialize;

pub const ORIGINAL_MESSAGE: &str = "qwertyuiopasdfghjklzxvbnm";
pub const DIFFERING_MESSAGE: &str = "qwertyuiopasdfghjklmnbvcxz";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Positive,
    Negative,
    Tampered,
}

impl ScenarioKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Positive => "Positive Scenario",
            ScenarioKind::Negative => "Negative Scenario",
            ScenarioKind::Tampered => "Tampered Scenario",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScenarioKind::Positive => "signature checked against the message it was made for",
            ScenarioKind::Negative => "signature over a differing message checked against the original",
            ScenarioKind::Tampered => "signature with one bit flipped checked against its message",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioOutcome {
    pub kind: ScenarioKind,
    /// Message the signature was produced over
    pub signed_message: String,
    /// Message handed to verification
    pub verified_message: String,
    /// Tagged signature in hex
    pub signature: String,
    pub expected: bool,
    pub verified: bool,
}

impl ScenarioOutcome {
    pub fn as_expected(&self) -> bool {
        self.expected == self.verified
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub algorithm: Algorithm,
    pub key_size: u32,
    /// Short public key fingerprint
    pub public_key: String,
    pub scenarios: Vec<ScenarioOutcome>,
}

impl ScenarioReport {
    pub fn all_as_expected(&self) -> bool {
        self.scenarios.iter().all(ScenarioOutcome::as_expected)
    }

    pub fn outcome(&self, kind: ScenarioKind) -> Option<&ScenarioOutcome> {
        self.scenarios.iter().find(|s| s.kind == kind)
    }
}

/// Run all three scenarios with one key pair.
///
/// The negative scenario expects `false` unless the two messages are identical.
pub fn run_scenarios(
    service: &SignatureService,
    key_pair: &KeyPair,
    original: &str,
    differing: &str,
    rng: &mut impl CryptoRngCore,
) -> Result<ScenarioReport> {
    let public = key_pair.public_key();
    let private = key_pair.private_key();
    let mut scenarios = Vec::with_capacity(3);

    let signature = service.sign(private, original.as_bytes(), rng)?;
    let verified = service.verify(public, original.as_bytes(), &signature)?;
    scenarios.push(ScenarioOutcome {
        kind: ScenarioKind::Positive,
        signed_message: original.to_string(),
        verified_message: original.to_string(),
        signature: signature.to_hex(),
        expected: true,
        verified,
    });

    let differing_signature = service.sign(private, differing.as_bytes(), rng)?;
    let verified = service.verify(public, original.as_bytes(), &differing_signature)?;
    scenarios.push(ScenarioOutcome {
        kind: ScenarioKind::Negative,
        signed_message: differing.to_string(),
        verified_message: original.to_string(),
        signature: differing_signature.to_hex(),
        expected: original == differing,
        verified,
    });

    // Last bit sits in the final integer (DSA `s`) or the low end of the
    // RSA block.
    let tampered = signature
        .bit_len()
        .checked_sub(1)
        .and_then(|bit| signature.with_bit_flipped(bit))
        .ok_or_else(|| Error::InvalidSignatureEncoding("empty signature".to_string()))?;
    let verified = service.verify(public, original.as_bytes(), &tampered)?;
    scenarios.push(ScenarioOutcome {
        kind: ScenarioKind::Tampered,
        signed_message: original.to_string(),
        verified_message: original.to_string(),
        signature: tampered.to_hex(),
        expected: false,
        verified,
    });

    let report = ScenarioReport {
        algorithm: key_pair.algorithm(),
        key_size: key_pair.key_size(),
        public_key: public.short_fingerprint(),
        scenarios,
    };

    tracing::info!(
        algorithm = %report.algorithm,
        key = %report.public_key,
        as_expected = report.all_as_expected(),
        "Scenarios complete"
    );

    Ok(report)
}
