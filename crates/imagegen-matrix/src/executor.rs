use crate::git::{GitError, GitOutput};

/// Abstraction over git CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait GitExecutor: Send + Sync {
    /// Run git with `args` and report its exit code. A non-zero exit is not
    /// an error at this level; callers decide what each code means.
    async fn exec(&self, args: &[String]) -> Result<GitOutput, GitError>;
}

/// Real git CLI executor.
pub struct RealExecutor;

impl GitExecutor for RealExecutor {
    async fn exec(&self, args: &[String]) -> Result<GitOutput, GitError> {
        use std::process::Stdio;

        let output = tokio::process::Command::new("git")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| GitError::NotFound { source: e })?;

        Ok(GitOutput {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}
