//! Scenario Tests
//!
//! The concrete sign/verify scenarios through the public service API:
//! - the original message verifies against its own signature
//! - a signature over the differing message is rejected for the original
//! - invalid configurations fail before any key is generated
//! - exported public keys keep verifying

use anyhow::Result;
use dsig_core::demo::{self, ScenarioKind, DIFFERING_MESSAGE, ORIGINAL_MESSAGE};
use dsig_core::rng::{seeded, OsRng};
use dsig_core::{Algorithm, Error, PublicKey, SignatureConfig, SignatureService};

#[test]
fn test_original_and_differing_messages() -> Result<()> {
    let service = SignatureService::new(SignatureConfig::default())?;
    let mut rng = seeded(42);
    let key_pair = service.generate_key_pair(&mut rng)?;

    let message = ORIGINAL_MESSAGE.as_bytes();
    let signature = service.sign(key_pair.private_key(), message, &mut rng)?;
    assert!(service.verify(key_pair.public_key(), message, &signature)?);

    // Signature made over the differing message, checked against the original
    let differing_signature =
        service.sign(key_pair.private_key(), DIFFERING_MESSAGE.as_bytes(), &mut rng)?;
    assert!(!service.verify(key_pair.public_key(), message, &differing_signature)?);

    // The same signature is fine for the message it was actually made over
    assert!(service.verify(
        key_pair.public_key(),
        DIFFERING_MESSAGE.as_bytes(),
        &differing_signature
    )?);

    Ok(())
}

#[test]
fn test_demo_with_os_entropy() -> Result<()> {
    let service = SignatureService::default();
    let key_pair = service.generate_key_pair(&mut OsRng)?;

    let report = demo::run_scenarios(
        &service,
        &key_pair,
        ORIGINAL_MESSAGE,
        DIFFERING_MESSAGE,
        &mut OsRng,
    )?;

    assert!(report.all_as_expected());
    assert_eq!(report.key_size, 2048);
    assert!(report.outcome(ScenarioKind::Positive).unwrap().verified);
    assert!(!report.outcome(ScenarioKind::Negative).unwrap().verified);
    assert!(!report.outcome(ScenarioKind::Tampered).unwrap().verified);

    Ok(())
}

#[test]
fn test_messages_are_not_normalized() -> Result<()> {
    let service = SignatureService::default();
    let mut rng = seeded(43);
    let key_pair = service.generate_key_pair(&mut rng)?;

    let signature = service.sign(key_pair.private_key(), b"message", &mut rng)?;
    for variant in [&b"message "[..], &b" message"[..], &b"Message"[..], &b"message\n"[..]] {
        assert!(!service.verify(key_pair.public_key(), variant, &signature)?);
    }

    Ok(())
}

#[test]
fn test_exported_public_key_verifies() -> Result<()> {
    let service = SignatureService::new(SignatureConfig::new(Algorithm::RsaPss, 2048)?)?;
    let mut rng = seeded(44);
    let key_pair = service.generate_key_pair(&mut rng)?;

    let signature = service.sign(key_pair.private_key(), b"exported", &mut rng)?;
    let imported = PublicKey::from_der(key_pair.public_key().to_der())?;

    assert_eq!(imported.algorithm(), Algorithm::RsaPss);
    assert!(service.verify(&imported, b"exported", &signature)?);
    Ok(())
}

#[test]
fn test_rejected_configurations() {
    assert!(matches!(
        SignatureConfig::new(Algorithm::Dsa, 1024),
        Err(Error::UnsupportedParameters { .. })
    ));
    assert!(matches!(
        SignatureConfig::new(Algorithm::RsaPss, 1536),
        Err(Error::UnsupportedParameters { .. })
    ));
    assert!(matches!(
        "ed448".parse::<Algorithm>(),
        Err(Error::UnsupportedAlgorithm(_))
    ));
}
