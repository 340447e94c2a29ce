//! Package-manager invocation

use crate::toolkit::ToolkitConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Run the dependency install command with the destination as the working
/// directory, awaited to completion.
///
/// Output is captured rather than streamed; on failure the captured stderr
/// is folded into the error. Lockfile and registry semantics are entirely
/// the package manager's concern.
pub async fn install_dependencies(config: &ToolkitConfig, dest: &Path) -> Result<()> {
    let output = Command::new(config.install_program)
        .args(config.install_args)
        .current_dir(dest)
        .output()
        .await
        .with_context(|| format!("failed to run {}", config.install_program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "{} {} failed with {}\n{}",
            config.install_program,
            config.install_args.join(" "),
            output.status,
            stderr.trim()
        );
    }

    Ok(())
}
