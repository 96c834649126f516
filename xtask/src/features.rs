use std::process::Command;

use anyhow::{Context, Result};

/// Tiers of `linkpage-common` that downstream crates enable on their own
const FEATURE_COMBINATIONS: &[&[&str]] = &[
    &[], // default
    &["foundation"],
    &["observability"],
    &["platform"],
    &["test-utils"],
    &["platform", "test-utils"],
];

/// Check that every supported feature combination compiles.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} linkpage-common feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let label = if features.is_empty() { "default".to_string() } else { joined.clone() };

        println!(
            "\n[{}/{}] cargo check -p linkpage-common{}",
            index + 1,
            FEATURE_COMBINATIONS.len(),
            if features.is_empty() { String::new() } else { format!(" --features {joined}") }
        );

        let mut command = Command::new("cargo");
        command.args(["check", "-p", "linkpage-common"]);
        if !features.is_empty() {
            command.arg("--features").arg(&joined);
        }

        let status =
            command.status().with_context(|| format!("Failed to run cargo check for '{label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{label}' failed to compile");
        }

        println!("✅ Features '{label}' compiled successfully");
    }

    println!("\n✅ All {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
