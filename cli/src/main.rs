//! dsig CLI - signature workflow demonstration
//!
//! Usage:
//!   dsig
//!   dsig --algorithm rsa-pss --key-size 3072
//!   dsig --message "pay bob 10" --differing-message "pay bob 100" --json

use anyhow::{Context, Result};
use clap::Parser;
use dsig_core::demo::{self, ScenarioReport};
use dsig_core::rng::{self, CryptoRngCore, OsRng};
use dsig_core::{Algorithm, SignatureConfig, SignatureService};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod ui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Signature algorithm (dsa, rsa-pss); overrides DSIG_ALGORITHM
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Modulus size in bits; overrides DSIG_KEY_SIZE
    #[arg(short, long)]
    key_size: Option<u32>,

    /// Message to sign (UTF-8)
    #[arg(short, long, default_value = demo::ORIGINAL_MESSAGE)]
    message: String,

    /// Message whose signature is checked against --message in the negative scenario
    #[arg(short, long, default_value = demo::DIFFERING_MESSAGE)]
    differing_message: String,

    /// Seed a deterministic generator instead of OS entropy (testing only)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let args = Args::parse();

    let config = SignatureConfig::from_env_with(args.algorithm, args.key_size)
        .context("Invalid signature configuration")?;

    let service = SignatureService::new(config).context("Unsupported signature configuration")?;
    info!("Using config: {:?}", service.config());

    if !args.json {
        ui::print_banner(service.config());
    }

    let report = match args.seed {
        Some(seed) => {
            warn!(seed, "Using seeded randomness; generated keys are not secret");
            run(&service, &args, &mut rng::seeded(seed))?
        }
        None => run(&service, &args, &mut OsRng)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::print_report(&report);
    }

    if !report.all_as_expected() {
        anyhow::bail!("One or more scenarios produced an unexpected result");
    }

    Ok(())
}

/// `RUST_LOG` directives, or `warn` when none are given
fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn run(
    service: &SignatureService,
    args: &Args,
    rng: &mut impl CryptoRngCore,
) -> Result<ScenarioReport> {
    let key_pair = service
        .generate_key_pair(rng)
        .context("Key pair generation failed")?;

    info!(
        "Generated {} key pair: {:?}",
        key_pair.algorithm(),
        key_pair.public_key()
    );

    demo::run_scenarios(
        service,
        &key_pair,
        &args.message,
        &args.differing_message,
        rng,
    )
    .context("Signature scenarios failed")
}
