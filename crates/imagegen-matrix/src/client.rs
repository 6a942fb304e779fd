use crate::executor::{GitExecutor, RealExecutor};
use crate::git::GitError;
use std::path::{Path, PathBuf};

/// The revisions a pull request is compared between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Target branch name, without the `origin/` prefix
    pub base_ref: String,
    /// Commit under test
    pub head_sha: String,
}

impl PullRequest {
    /// `origin/<base>..<head>`
    pub fn range(&self) -> String {
        format!("origin/{}..{}", self.base_ref, self.head_sha)
    }
}

/// Git operations client, parameterized over the executor for testability.
pub struct GitClient<E: GitExecutor = RealExecutor> {
    executor: E,
}

impl GitClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for GitClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GitExecutor> GitClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Whether `path` (relative to `repo`) differs between the pull request's
    /// target branch and head.
    ///
    /// `git diff --quiet` answers 0 for "no differences" and 1 for
    /// "differences". Every other outcome, such as an unknown revision, is
    /// an error: guessing "unchanged" would silently skip a first build.
    pub async fn changed_in_pr(
        &self,
        repo: &Path,
        pr: &PullRequest,
        path: &str,
    ) -> Result<bool, DiffError> {
        let repo_arg = repo.to_string_lossy();
        let range = pr.range();
        let output = self
            .executor
            .exec(&args([
                "-C", &repo_arg, "diff", "--quiet", &range, "--", path,
            ]))
            .await?;

        match output.code {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            code => Err(DiffError::Inconclusive {
                repo: repo.to_path_buf(),
                path: path.to_owned(),
                range,
                code,
                stderr: output.stderr,
            }),
        }
    }
}

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(
        "git diff {range} -- {path} in {} was inconclusive (exit {}): {stderr}",
        repo.display(),
        code.map_or_else(|| "by signal".to_owned(), |c| c.to_string())
    )]
    Inconclusive {
        repo: PathBuf,
        path: String,
        range: String,
        code: Option<i32>,
        stderr: String,
    },
}
