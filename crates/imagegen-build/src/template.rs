use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// Trailer template for IntelliJ-based (first-party) variants.
pub const INTELLIJ_TEMPLATE: &str = "intellij.Dockerfile.j2";
/// Trailer template for third-party linters.
pub const THIRDPARTY_TEMPLATE: &str = "thirdparty.Dockerfile.j2";

/// Values substituted into a trailer template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerVars<'a> {
    pub qd_release: &'a str,
    pub qd_code: &'a str,
    pub description: &'a str,
    /// Variant name up to its first `-` (`python-community` → `python`)
    pub variant: &'a str,
    /// Full variant name
    pub qd_image: &'a str,
}

impl TrailerVars<'_> {
    fn to_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("qd_release", self.qd_release);
        context.insert("qd_code", self.qd_code);
        context.insert("description", self.description);
        context.insert("variant", self.variant);
        context.insert("qd_image", self.qd_image);
        context
    }
}

/// The two trailer templates, parsed once per run.
///
/// One trailing newline is dropped from each template source, so a trailer
/// ends where its last line ends. Only the [`TrailerVars`] names are defined
/// while rendering; a template referring to any other variable fails to
/// render and the variant is reported as failed.
pub struct TrailerTemplates {
    tera: Tera,
}

impl TrailerTemplates {
    /// Load both templates from `template_dir`. Either one missing is fatal.
    pub fn load(template_dir: &Path) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        for name in [INTELLIJ_TEMPLATE, THIRDPARTY_TEMPLATE] {
            let path = template_dir.join(name);
            let content = std::fs::read_to_string(&path)
                .map_err(|e| TemplateError::Read { path: path.clone(), source: e })?;
            tera.add_raw_template(name, strip_trailing_newline(&content))
                .map_err(|e| TemplateError::Parse { path, source: e })?;
        }
        Ok(Self { tera })
    }

    /// Build from in-memory template sources.
    pub fn from_sources(intellij: &str, thirdparty: &str) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        for (name, content) in [(INTELLIJ_TEMPLATE, intellij), (THIRDPARTY_TEMPLATE, thirdparty)] {
            tera.add_raw_template(name, strip_trailing_newline(content))
                .map_err(|e| TemplateError::Parse {
                    path: PathBuf::from(name),
                    source: e,
                })?;
        }
        Ok(Self { tera })
    }

    pub fn render(&self, third_party: bool, vars: &TrailerVars<'_>) -> Result<String, tera::Error> {
        let name = if third_party {
            THIRDPARTY_TEMPLATE
        } else {
            INTELLIJ_TEMPLATE
        };
        self.tera.render(name, &vars.to_context())
    }
}

fn strip_trailing_newline(source: &str) -> &str {
    source
        .strip_suffix("\r\n")
        .or_else(|| source.strip_suffix('\n'))
        .unwrap_or(source)
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse template {path}")]
    Parse { path: PathBuf, source: tera::Error },
}
