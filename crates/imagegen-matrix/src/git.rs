#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git not found; install git and make sure it is on PATH")]
    NotFound { source: std::io::Error },
}

/// How a git invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, `None` when git was terminated by a signal
    pub code: Option<i32>,
    pub stderr: String,
}
