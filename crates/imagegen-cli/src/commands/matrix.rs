use imagegen_core::MatrixConfig;
use imagegen_matrix::{Layout, MatrixSelector, SelectionMode, output};
use std::path::Path;

/// Select the build matrix and print it for the CI orchestrator.
pub async fn matrix(
    root: &Path,
    layout: Layout,
    base_ref: Option<String>,
    head_sha: Option<String>,
) -> anyhow::Result<()> {
    let mode = SelectionMode::from_env(base_ref, head_sha)?;
    match &mode {
        SelectionMode::Full => tracing::info!("Not a pull request: selecting every product"),
        SelectionMode::PullRequest(pr) => {
            tracing::info!("Pull request: selecting products changed in {}", pr.range());
        }
    }

    let config = MatrixConfig::load(root)?;
    let selector = MatrixSelector::new(&config)?;
    let entries = selector.select(root, layout, &mode).await?;

    output::write_compact(&entries, std::io::stdout().lock())?;
    output::write_pretty(&entries, std::io::stderr().lock())?;

    Ok(())
}
