//! Finding buildable products on disk.
//!
//! ```text
//! versioned:                    flat:
//!   2024.3/<product>/Dockerfile   dockerfiles/<product>/Dockerfile
//!   next/<product>/Dockerfile
//! ```

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Version directory holding not-yet-released products.
pub const NEXT_VERSION: &str = "next";
/// Root of the flat layout.
pub const FLAT_ROOT: &str = "dockerfiles";
/// Shared fragments inside a version directory; never a product.
const BASE_DIR: &str = "base";

static VERSION_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^20\d\d\.\d$").expect("version regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `<version>/<product>/Dockerfile`
    #[default]
    Versioned,
    /// `dockerfiles/<product>/Dockerfile`
    Flat,
}

/// A product directory that contains a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    pub version: Option<String>,
    pub product: String,
}

impl Candidate {
    /// Key exclusion patterns are matched against.
    pub fn key(&self) -> String {
        match &self.version {
            Some(version) => format!("{version}/{}", self.product),
            None => self.product.clone(),
        }
    }

    /// Dockerfile path relative to the scanned root, `/`-separated.
    pub fn dockerfile(&self) -> String {
        match &self.version {
            Some(version) => format!("{version}/{}/Dockerfile", self.product),
            None => format!("{FLAT_ROOT}/{}/Dockerfile", self.product),
        }
    }
}

pub fn is_version_dir(name: &str) -> bool {
    name == NEXT_VERSION || VERSION_DIR.is_match(name)
}

/// List candidates under `root`, sorted by version then product.
pub fn discover(root: &Path, layout: Layout) -> Result<Vec<Candidate>, DiscoveryError> {
    let mut candidates = Vec::new();

    match layout {
        Layout::Versioned => {
            for version in subdirectories(root)? {
                if !is_version_dir(&version) {
                    continue;
                }
                for product in products(&root.join(&version))? {
                    candidates.push(Candidate {
                        version: Some(version.clone()),
                        product,
                    });
                }
            }
        }
        Layout::Flat => {
            for product in products(&root.join(FLAT_ROOT))? {
                candidates.push(Candidate {
                    version: None,
                    product,
                });
            }
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Product directories of `dir` that contain a Dockerfile.
fn products(dir: &Path) -> Result<Vec<String>, DiscoveryError> {
    Ok(subdirectories(dir)?
        .into_iter()
        .filter(|name| name != BASE_DIR)
        .filter(|name| {
            let has_dockerfile = dir.join(name).join("Dockerfile").is_file();
            if !has_dockerfile {
                tracing::debug!("{}/{name} has no Dockerfile", dir.display());
            }
            has_dockerfile
        })
        .collect())
}

/// Names of the UTF-8 named directories directly under `dir`.
fn subdirectories(dir: &Path) -> Result<Vec<String>, DiscoveryError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::debug!("ignoring non UTF-8 entry {name:?}"),
        }
    }
    names.sort();
    Ok(names)
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to read directory {path}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
