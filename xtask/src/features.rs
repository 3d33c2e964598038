use std::process::Command;

use anyhow::{Context, Result};

/// Crates with optional features and the combinations that must compile
const FEATURE_MATRIX: &[(&str, &[&[&str]])] = &[
    ("credwatch-common", &[&[], &["foundation"]]),
    ("credwatch-infra", &[&[]]),
];

/// Check that all required feature combinations compile successfully.
pub fn test_feature_matrix() -> Result<()> {
    let total: usize = FEATURE_MATRIX.iter().map(|(_, combos)| combos.len()).sum();
    println!("Testing {total} feature combinations...");

    let mut index = 0;
    for (package, combinations) in FEATURE_MATRIX {
        for features in *combinations {
            index += 1;
            let joined = features.join(",");
            let display_label = if features.is_empty() {
                format!("{package} (none)")
            } else {
                format!("{package} ({joined})")
            };

            println!(
                "\n[{index}/{total}] cargo check -p {package} --no-default-features{}",
                if features.is_empty() { String::new() } else { format!(" --features {joined}") }
            );

            let mut command = Command::new("cargo");
            command.args(["check", "-p", *package, "--no-default-features"]);
            if !features.is_empty() {
                command.arg("--features").arg(&joined);
            }

            let status = command
                .status()
                .with_context(|| format!("Failed to run cargo check for '{display_label}'"))?;

            if !status.success() {
                anyhow::bail!("Feature combination '{display_label}' failed to compile");
            }

            println!("✅ Features '{display_label}' compiled successfully");
        }
    }

    println!("\n✅ All {total} feature combinations compile successfully!");

    Ok(())
}
