use crate::client::{DiffError, GitClient, PullRequest};
use crate::discovery::{Candidate, DiscoveryError, Layout, discover};
use crate::exclude::ExclusionRules;
use crate::executor::{GitExecutor, RealExecutor};
use imagegen_core::{MatrixConfig, PlatformConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One (version, product, platform) build job.
///
/// Field order is the sort order of the emitted matrix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatrixEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub linter: String,
    pub platform: String,
    pub runner: String,
}

/// Whether candidates are filtered by what a pull request changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every non-excluded candidate is built
    Full,
    /// Only candidates whose Dockerfile changed are built
    PullRequest(PullRequest),
}

impl SelectionMode {
    /// Mode from the CI environment (`GITHUB_BASE_REF`, `GITHUB_SHA`).
    ///
    /// An unset or empty base ref means this is not a pull request. A base
    /// ref without a head revision is a configuration error.
    pub fn from_env(base_ref: Option<String>, head_sha: Option<String>) -> imagegen_core::Result<Self> {
        let Some(base_ref) = base_ref.filter(|r| !r.is_empty()) else {
            return Ok(Self::Full);
        };
        match head_sha.filter(|s| !s.is_empty()) {
            Some(head_sha) => Ok(Self::PullRequest(PullRequest { base_ref, head_sha })),
            None => Err(imagegen_core::Error::MissingRevision { base_ref }),
        }
    }
}

/// Computes the CI build matrix for a repository tree.
pub struct MatrixSelector<E: GitExecutor = RealExecutor> {
    git: GitClient<E>,
    rules: ExclusionRules,
    platforms: Vec<PlatformConfig>,
}

impl MatrixSelector<RealExecutor> {
    pub fn new(config: &MatrixConfig) -> imagegen_core::Result<Self> {
        Self::with_executor(config, RealExecutor)
    }
}

impl<E: GitExecutor> MatrixSelector<E> {
    pub fn with_executor(config: &MatrixConfig, executor: E) -> imagegen_core::Result<Self> {
        Ok(Self {
            git: GitClient::with_executor(executor),
            rules: ExclusionRules::from_config(config)?,
            platforms: config.platforms.clone(),
        })
    }

    /// Select the entries to build under `root`, sorted by version, linter
    /// and platform.
    pub async fn select(
        &self,
        root: &Path,
        layout: Layout,
        mode: &SelectionMode,
    ) -> Result<Vec<MatrixEntry>, SelectError> {
        let mut entries = Vec::new();

        for candidate in discover(root, layout)? {
            let key = candidate.key();
            if let Some(pattern) = self.rules.matching(&key) {
                tracing::debug!("{key} excluded by {pattern:?}");
                continue;
            }

            if let SelectionMode::PullRequest(pr) = mode {
                let changed = self
                    .git
                    .changed_in_pr(root, pr, &candidate.dockerfile())
                    .await?;
                if !changed {
                    tracing::debug!("{key} unchanged since origin/{}", pr.base_ref);
                    continue;
                }
            }

            tracing::info!("{key} selected");
            entries.extend(self.expand(&candidate));
        }

        entries.sort();
        Ok(entries)
    }

    fn expand<'a>(&'a self, candidate: &'a Candidate) -> impl Iterator<Item = MatrixEntry> + 'a {
        self.platforms.iter().map(move |platform| MatrixEntry {
            version: candidate.version.clone(),
            linter: candidate.product.clone(),
            platform: platform.name.clone(),
            runner: platform.runner.clone(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Diff(#[from] DiffError),
}
