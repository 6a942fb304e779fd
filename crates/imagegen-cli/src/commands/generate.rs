use imagegen_build::{GenerateOptions, generate as generate_all};
use std::path::Path;

/// Compose every variant of a release directory.
pub fn generate(release_dir: &Path, check: bool) -> anyhow::Result<()> {
    let report = generate_all(release_dir, GenerateOptions { check })?;

    if !report.skipped.is_empty() {
        tracing::warn!(
            "{} variant(s) skipped, base fragment missing: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }
    for (variant, reason) in &report.failed {
        tracing::error!("{variant} failed: {reason}");
    }

    if check {
        if !report.stale.is_empty() {
            for path in &report.stale {
                tracing::warn!("stale: {}", path.display());
            }
            anyhow::bail!(
                "{} generated Dockerfile(s) out of date; run `imagegen generate {}`",
                report.stale.len(),
                release_dir.display()
            );
        }
        tracing::info!("{} Dockerfile(s) up to date", report.generated.len());
    } else {
        tracing::info!("{} Dockerfile(s) generated", report.generated.len());
    }

    Ok(())
}
