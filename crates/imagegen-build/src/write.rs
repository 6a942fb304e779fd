use std::path::{Path, PathBuf};

/// Write a composed Dockerfile to `<release_dir>/<variant>/Dockerfile`.
///
/// Empty content means the variant was skipped and nothing is written.
/// Existing output is overwritten, so re-running with unchanged inputs
/// reproduces the same bytes.
pub fn write_variant(
    release_dir: &Path,
    variant: &str,
    content: &str,
) -> Result<Option<PathBuf>, WriteError> {
    if content.is_empty() {
        tracing::debug!("No Dockerfile content to write for variant '{variant}'. Skipping.");
        return Ok(None);
    }

    let out_dir = release_dir.join(variant);
    std::fs::create_dir_all(&out_dir).map_err(|e| WriteError::CreateDir {
        path: out_dir.clone(),
        source: e,
    })?;

    let out_path = output_path(release_dir, variant);
    std::fs::write(&out_path, content).map_err(|e| WriteError::Write {
        path: out_path.clone(),
        source: e,
    })?;

    Ok(Some(out_path))
}

/// Where [`write_variant`] puts a variant's Dockerfile.
pub fn output_path(release_dir: &Path, variant: &str) -> PathBuf {
    release_dir.join(variant).join("Dockerfile")
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
