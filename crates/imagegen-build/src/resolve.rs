use crate::directive::{self, Line};
use std::path::PathBuf;

/// File extension of base fragments: `<identifier>.Dockerfile`.
pub const FRAGMENT_EXTENSION: &str = "Dockerfile";

/// Inlines `FROM <identifier>` directives with the referenced fragments.
///
/// Resolution is recursive: an included fragment's own directives are
/// resolved before it is substituted. The identifiers on the current
/// inclusion path are tracked, so a fragment that (transitively) includes
/// itself yields [`ResolveError::Cycle`] instead of recursing forever.
#[derive(Debug, Clone)]
pub struct FragmentResolver {
    dir: PathBuf,
}

impl FragmentResolver {
    pub fn new(fragment_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: fragment_dir.into(),
        }
    }

    /// Path a fragment identifier maps to, whether or not it exists.
    pub fn fragment_path(&self, identifier: &str) -> PathBuf {
        self.dir.join(format!("{identifier}.{FRAGMENT_EXTENSION}"))
    }

    pub fn exists(&self, identifier: &str) -> bool {
        self.fragment_path(identifier).is_file()
    }

    /// Resolve every directive in `text`.
    pub fn resolve(&self, text: &str) -> Result<String, ResolveError> {
        self.resolve_with_path(text, &mut Vec::new())
    }

    /// Read the fragment `identifier` and resolve it.
    ///
    /// `identifier` itself counts as being on the inclusion path, so a
    /// fragment that includes itself is reported as a cycle.
    pub fn resolve_named(&self, identifier: &str) -> Result<String, ResolveError> {
        let path = self.fragment_path(identifier);
        let content = std::fs::read_to_string(&path).map_err(|e| ResolveError::Read {
            path,
            source: e,
        })?;
        let mut stack = vec![identifier.to_owned()];
        self.resolve_with_path(&content, &mut stack)
    }

    fn resolve_with_path(
        &self,
        text: &str,
        stack: &mut Vec<String>,
    ) -> Result<String, ResolveError> {
        let mut out = Vec::new();

        for line in directive::parse(text) {
            match line {
                Line::Literal(literal) => out.push(literal.to_owned()),
                Line::Include { identifier, raw } => match self.include(identifier, stack)? {
                    Some(resolved) => out.push(resolved),
                    None => out.push(raw.to_owned()),
                },
            }
        }

        Ok(out.join("\n"))
    }

    /// Resolved content of an included fragment, or `None` when the line
    /// should be kept as written.
    fn include(
        &self,
        identifier: &str,
        stack: &mut Vec<String>,
    ) -> Result<Option<String>, ResolveError> {
        if stack.iter().any(|s| s == identifier) {
            let mut chain = stack.clone();
            chain.push(identifier.to_owned());
            return Err(ResolveError::Cycle { chain });
        }

        let path = self.fragment_path(identifier);
        if !path.is_file() {
            tracing::debug!(
                "{} not found, keeping `FROM {identifier}` as an image reference",
                path.display()
            );
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("failed to read included fragment {}: {e}", path.display());
                return Ok(None);
            }
        };

        stack.push(identifier.to_owned());
        let resolved = self.resolve_with_path(&content, stack);
        stack.pop();

        Ok(Some(resolved?.trim_end().to_owned()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cyclic fragment inheritance: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
    #[error("failed to read fragment {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
