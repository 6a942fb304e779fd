use serde::{Deserialize, Serialize};

/// File name of the optional selector configuration at the scanned root.
pub const CONFIG_FILE: &str = "matrix.toml";

/// matrix.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Glob patterns matched against `<version>/<product>` (or `<product>`);
    /// a match means the product is never built
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    /// Target platforms every selected product is expanded across
    #[serde(default = "default_platforms")]
    pub platforms: Vec<PlatformConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Docker platform, e.g. `linux/amd64`
    pub name: String,
    /// CI runner label the platform builds on
    pub runner: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            platforms: default_platforms(),
        }
    }
}

impl MatrixConfig {
    /// Load from matrix.toml at the given root, or return defaults if not found.
    pub fn load(root: &std::path::Path) -> crate::Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        let config: Self = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })?
        } else {
            tracing::debug!("no {CONFIG_FILE} in {}, using defaults", root.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        if self.platforms.is_empty() {
            return Err(crate::Error::NoPlatforms);
        }
        for pattern in &self.exclude {
            glob::Pattern::new(pattern).map_err(|e| crate::Error::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

fn default_exclude() -> Vec<String> {
    [
        "2023.2/*",
        "2023.3/cpp",
        "2023.3/android",
        "2024.1/android",
        "2023.3/cnova",
        "2024.1/cnova",
        "*/ruby",
        "2025.3/*",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_platforms() -> Vec<PlatformConfig> {
    vec![
        PlatformConfig {
            name: "linux/amd64".to_owned(),
            runner: "ubuntu-24.04".to_owned(),
        },
        PlatformConfig {
            name: "linux/arm64".to_owned(),
            runner: "ubuntu-24.04-arm".to_owned(),
        },
    ]
}
