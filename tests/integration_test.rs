use std::io::Write;
use std::process::{Command, Output};
use anyhow::Result;
use tempfile::NamedTempFile;

const HEADER: &str = "Name,AmountSubunits,CCNumber,CVV,ExpMonth,ExpYear";

fn encrypted_input(plaintext: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    let obfuscated: Vec<u8> = plaintext.bytes().map(|byte| byte.wrapping_add(128)).collect();

    file.write_all(&obfuscated)?;
    file.flush()?;

    Ok(file)
}

fn run_with_keys(file: &NamedTempFile) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_async-donation-engine");

    // Inputs used here never reach the gateway, so the keys are never sent.
    Ok(Command::new(binary_path)
        .arg(file.path())
        .env("OMISE_PUBLIC_KEY", "pkey_test_integration")
        .env("OMISE_SECRET_KEY", "skey_test_integration")
        .env("DONATION_DISPATCH_INTERVAL_MS", "1")
        .output()?)
}

#[test]
fn test_cli_reports_zero_record_run() -> Result<()> {
    let file = encrypted_input(&format!("{HEADER}\n"))?;

    let output = run_with_keys(&file)?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("total received: THB 0.00"));
    assert!(stdout.contains("successfully donated: THB 0.00"));
    assert!(stdout.contains("average per person: THB 0.00"));
    assert!(stdout.contains("top donors: none"));

    Ok(())
}

#[test]
fn test_cli_counts_malformed_records_as_faulty() -> Result<()> {
    let file = encrypted_input(&format!("{HEADER}\nMr. Short,5000,4242424242424242\nMs. Month,2500,4242424242424242,123,13,2030\n"))?;

    let output = run_with_keys(&file)?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("total received: THB 75.00"));
    assert!(stdout.contains("successfully donated: THB 0.00"));
    assert!(stdout.contains("faulty donation: THB 75.00 (2 of 2 records)"));

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_input_file() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_async-donation-engine");

    let output = Command::new(binary_path)
        .arg("does-not-exist.csv.rot128")
        .env("OMISE_PUBLIC_KEY", "pkey_test_integration")
        .env("OMISE_SECRET_KEY", "skey_test_integration")
        .output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Unable to read input file"));
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_fails_without_gateway_keys() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_async-donation-engine");
    let file = encrypted_input(&format!("{HEADER}\nMr. Short,5000,4242424242424242\n"))?;

    let output = Command::new(binary_path)
        .arg(file.path())
        .env_remove("OMISE_PUBLIC_KEY")
        .env_remove("OMISE_SECRET_KEY")
        .output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("OMISE_PUBLIC_KEY"));

    Ok(())
}

#[test]
fn test_cli_prints_usage_without_arguments() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_async-donation-engine");

    let output = Command::new(binary_path).output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.starts_with("Usage:"));

    Ok(())
}
