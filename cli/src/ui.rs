//! UI utilities for pretty printing

use colored::Colorize;
use dsig_core::demo::{ScenarioOutcome, ScenarioReport};
use dsig_core::SignatureConfig;

pub fn print_banner(config: &SignatureConfig) {
    println!("{}", "=".repeat(60).bright_blue());
    println!("{}", format!("  {}", dsig_core::version_string()).bright_cyan().bold());
    println!("{}", "  Digital Signature Generation & Verification".bright_white());
    println!("{}", "=".repeat(60).bright_blue());
    println!();
    print_info(&format!(
        "Generating {}-bit {} key pair...",
        config.key_size, config.algorithm
    ));
}

pub fn print_report(report: &ScenarioReport) {
    println!("{} {}", "Algorithm:".bright_green(), report.algorithm);
    println!("{} {} bits", "Key size:".bright_green(), report.key_size);
    println!("{} {}", "Public key:".bright_green(), report.public_key);
    println!();

    for outcome in &report.scenarios {
        print_outcome(outcome);
    }

    println!();
    if report.all_as_expected() {
        print_success("All scenarios behaved as expected");
    } else {
        print_error("Unexpected verification result");
    }
}

fn print_outcome(outcome: &ScenarioOutcome) {
    let verdict = if outcome.verified {
        "true".bright_green()
    } else {
        "false".bright_red()
    };

    println!("{} : {}", outcome.kind.label().bright_cyan().bold(), verdict);
    println!("  {}", outcome.kind.description().dimmed());
    println!("  {:<10} {:?}", "signed", outcome.signed_message);
    println!("  {:<10} {:?}", "verified", outcome.verified_message);

    if !outcome.as_expected() {
        print_warning(&format!("expected {}", outcome.expected));
    }
}

pub fn print_error(msg: &str) {
    println!("{} {}", "✗".bright_red(), msg.red());
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".bright_green(), msg.bright_green());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".bright_blue(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".bright_yellow(), msg.yellow());
}
