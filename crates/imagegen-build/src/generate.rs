use crate::dockerfile::DockerfileGenerator;
use crate::resolve::FragmentResolver;
use crate::template::{TemplateError, TrailerTemplates};
use crate::write::{output_path, write_variant};
use imagegen_core::VariantManifest;
use std::path::{Path, PathBuf};

/// Directory of base fragments inside a release directory.
pub const BASE_DIR: &str = "base";
/// Directory of trailer templates inside the base directory.
pub const TEMPLATE_DIR: &str = "templates";

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Compare against the files on disk instead of writing them
    pub check: bool,
}

/// Outcome of one [`generate`] run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Dockerfiles written (or, in check mode, found up to date)
    pub generated: Vec<PathBuf>,
    /// Variants whose base fragment does not exist
    pub skipped: Vec<String>,
    /// Variants that failed to compose or write, with the reason
    pub failed: Vec<(String, String)>,
    /// Check mode only: Dockerfiles that are missing or differ
    pub stale: Vec<PathBuf>,
}

impl GenerateReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.stale.is_empty()
    }
}

/// Generate a Dockerfile for every variant in `<release_dir>/public.json`.
///
/// Configuration problems (missing directory, manifest or template) abort
/// before anything is written. Per-variant problems are logged, recorded in
/// the report, and do not stop the remaining variants.
pub fn generate(release_dir: &Path, options: GenerateOptions) -> Result<GenerateReport, GenerateError> {
    if !release_dir.is_dir() {
        return Err(imagegen_core::Error::ReleaseDirMissing(release_dir.to_path_buf()).into());
    }
    let manifest = VariantManifest::load(release_dir)?;

    let base_dir = release_dir.join(BASE_DIR);
    let templates = TrailerTemplates::load(&base_dir.join(TEMPLATE_DIR))?;
    let resolver = FragmentResolver::new(base_dir);

    let release = release_dir.to_string_lossy();
    let generator = DockerfileGenerator::new(&resolver, &templates, &release);

    let mut report = GenerateReport::default();
    for (variant, spec) in manifest.iter() {
        let content = match generator.render(variant, spec) {
            Ok(Some(content)) => content,
            Ok(None) => {
                report.skipped.push(variant.to_owned());
                continue;
            }
            Err(e) => {
                tracing::error!("{}", error_chain(&e));
                report.failed.push((variant.to_owned(), error_chain(&e)));
                continue;
            }
        };

        if options.check {
            check_variant(release_dir, variant, &content, &mut report);
            continue;
        }

        match write_variant(release_dir, variant, &content) {
            Ok(Some(path)) => {
                tracing::info!("Generated {}.", path.display());
                report.generated.push(path);
            }
            // composed output always carries the disclaimer, never empty
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Error writing output for variant '{variant}': {}", error_chain(&e));
                report.failed.push((variant.to_owned(), error_chain(&e)));
            }
        }
    }

    Ok(report)
}

fn check_variant(release_dir: &Path, variant: &str, expected: &str, report: &mut GenerateReport) {
    let path = output_path(release_dir, variant);
    match std::fs::read_to_string(&path) {
        Ok(actual) if actual == expected => report.generated.push(path),
        Ok(_) => {
            tracing::warn!("{} is out of date.", path.display());
            report.stale.push(path);
        }
        Err(e) => {
            tracing::warn!("{} cannot be read: {e}", path.display());
            report.stale.push(path);
        }
    }
}

/// `error: cause: cause` rendering for log lines.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] imagegen_core::Error),
    #[error(transparent)]
    Template(#[from] TemplateError),
}
