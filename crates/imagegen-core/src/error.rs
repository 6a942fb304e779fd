use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("release directory {0} doesn't exist")]
    ReleaseDirMissing(PathBuf),

    // ── Variant manifest ──
    #[error("manifest {0} not found")]
    ManifestMissing(PathBuf),

    #[error("failed to read manifest {path}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ── Matrix configuration ──
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid exclude pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("no platforms configured; the matrix would always be empty")]
    NoPlatforms,

    #[error("target branch {base_ref:?} given but no head revision; set GITHUB_SHA or --head-sha")]
    MissingRevision { base_ref: String },
}
