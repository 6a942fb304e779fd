use crate::resolve::{FragmentResolver, ResolveError};
use crate::template::{TrailerTemplates, TrailerVars};
use imagegen_core::VariantSpec;

/// First line of every generated Dockerfile.
pub const DISCLAIMER: &str =
    "# This file was generated by imagegen from base fragments. DO NOT EDIT MANUALLY.";

/// Composes a variant's Dockerfile: resolved base chain + rendered trailer.
pub struct DockerfileGenerator<'a> {
    resolver: &'a FragmentResolver,
    templates: &'a TrailerTemplates,
    release: &'a str,
}

impl<'a> DockerfileGenerator<'a> {
    /// `release` is the release directory as given by the user; it is passed
    /// to the templates as `qd_release`.
    pub fn new(resolver: &'a FragmentResolver, templates: &'a TrailerTemplates, release: &'a str) -> Self {
        Self {
            resolver,
            templates,
            release,
        }
    }

    /// Render the full Dockerfile for `variant`.
    ///
    /// Returns `Ok(None)` when the variant's base fragment does not exist;
    /// such variants are skipped rather than failing the run.
    pub fn render(&self, variant: &str, spec: &VariantSpec) -> Result<Option<String>, ComposeError> {
        let base = spec.base_fragment(variant);
        if !self.resolver.exists(base) {
            tracing::warn!(
                "Skipping {variant}: {} not found.",
                self.resolver.fragment_path(base).display()
            );
            return Ok(None);
        }

        let resolved = self.resolver.resolve_named(base).map_err(|e| ComposeError::Resolve {
            variant: variant.to_owned(),
            source: e,
        })?;

        let vars = TrailerVars {
            qd_release: self.release,
            qd_code: &spec.qd_code,
            description: &spec.description,
            variant: short_name(variant),
            qd_image: variant,
        };
        let trailer = self
            .templates
            .render(spec.is_third_party, &vars)
            .map_err(|e| ComposeError::Render {
                variant: variant.to_owned(),
                source: e,
            })?;

        Ok(Some(format!(
            "{DISCLAIMER}\n\n{}\n\n{trailer}",
            resolved.trim_end()
        )))
    }
}

/// Portion of a variant name before its first `-`.
pub fn short_name(variant: &str) -> &str {
    variant.split('-').next().unwrap_or(variant)
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("failed to resolve base fragments for {variant}")]
    Resolve {
        variant: String,
        source: ResolveError,
    },
    #[error("failed to render trailer for {variant}")]
    Render {
        variant: String,
        source: tera::Error,
    },
}
