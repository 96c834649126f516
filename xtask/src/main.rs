//! Development automation tasks for the `Linkpage` workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::Context;

mod features;

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("audit") => run_audit(),
        Some("test-features") => features::test_feature_matrix(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Linkpage Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci             Run all CI checks (fmt, clippy, features, test, audit)");
    println!("    fmt            Check Rust code formatting");
    println!("    clippy         Run Clippy lints");
    println!("    test           Run all tests");
    println!("    test-features  Verify linkpage-common feature matrix compiles");
    println!("    audit          Audit dependencies for security vulnerabilities");
    println!("    help           Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/5: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/5: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/5: Checking feature matrix...");
    features::test_feature_matrix()?;

    println!("\n==> Step 4/5: Running tests...");
    run_test()?;

    println!("\n==> Step 5/5: Auditing dependencies...");
    run_audit()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

fn cargo(args: &[&str]) -> anyhow::Result<bool> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;
    Ok(status.success())
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    if !cargo(&["fmt", "--all", "--", "--check"])? {
        anyhow::bail!("Format check failed. Run 'cargo fmt --all' to fix.");
    }
    Ok(())
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    if !cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])? {
        anyhow::bail!("Clippy run failed. See output above.");
    }
    Ok(())
}

/// Run all workspace tests
fn run_test() -> anyhow::Result<()> {
    if !cargo(&["test", "--workspace", "--all-features"])? {
        anyhow::bail!("Tests failed");
    }
    Ok(())
}

/// Audit dependencies for security vulnerabilities
fn run_audit() -> anyhow::Result<()> {
    let installed = Command::new("cargo").args(["audit", "--version"]).output();

    if !installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-audit is not installed.");
        eprintln!("Install it with: cargo install cargo-audit");
        anyhow::bail!("cargo-audit not found");
    }

    if !cargo(&["audit"])? {
        anyhow::bail!("cargo-audit found vulnerabilities");
    }
    Ok(())
}
