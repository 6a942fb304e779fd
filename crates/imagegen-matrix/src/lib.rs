//! CI build matrix selection for imagegen.
//!
//! ```text
//! imagegen matrix
//!   1. Discover  ── <version>/<product>/Dockerfile (or dockerfiles/<product>/Dockerfile)
//!   2. Exclude   ── matrix.toml glob patterns
//!   3. Changed?  ── git diff --quiet origin/<base>..<head> (pull requests only)
//!   4. Expand    ── one entry per platform
//!   5. Emit      ── JSON to stdout, pretty JSON to stderr
//! ```

pub mod client;
pub mod discovery;
pub mod exclude;
pub mod executor;
pub mod git;
pub mod matrix;
pub mod output;

pub use client::{DiffError, GitClient, PullRequest};
pub use discovery::{Candidate, DiscoveryError, Layout};
pub use exclude::ExclusionRules;
pub use executor::{GitExecutor, RealExecutor};
pub use matrix::{MatrixEntry, MatrixSelector, SelectError, SelectionMode};
