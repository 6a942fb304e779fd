use glob::Pattern;
use imagegen_core::MatrixConfig;

/// Glob patterns naming products that are never built.
///
/// `*` matches across `/`, so `*/ruby` excludes `ruby` in every version.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    patterns: Vec<Pattern>,
}

impl ExclusionRules {
    pub fn new<I, S>(patterns: I) -> imagegen_core::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|e| imagegen_core::Error::InvalidPattern {
                    pattern: p.to_owned(),
                    source: e,
                })
            })
            .collect::<imagegen_core::Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn from_config(config: &MatrixConfig) -> imagegen_core::Result<Self> {
        Self::new(&config.exclude)
    }

    /// First pattern matching `key`, if any.
    pub fn matching(&self, key: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.matches(key))
            .map(Pattern::as_str)
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.matching(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_version_matches_any_version() {
        let rules = ExclusionRules::new(["*/ruby"]).unwrap();
        assert!(rules.is_excluded("2024.1/ruby"));
        assert!(rules.is_excluded("next/ruby"));
        assert!(!rules.is_excluded("2024.1/rust"));
        assert!(!rules.is_excluded("2024.1/ruby-community"));
    }

    #[test]
    fn wildcard_product_matches_whole_version() {
        let rules = ExclusionRules::new(["2025.3/*"]).unwrap();
        assert!(rules.is_excluded("2025.3/go"));
        assert!(!rules.is_excluded("2025.2/go"));
    }

    #[test]
    fn matching_reports_the_pattern() {
        let rules = ExclusionRules::new(["2023.3/cpp", "*/cpp"]).unwrap();
        assert_eq!(rules.matching("2023.3/cpp"), Some("2023.3/cpp"));
        assert_eq!(rules.matching("2024.1/cpp"), Some("*/cpp"));
        assert_eq!(rules.matching("2024.1/go"), None);
    }

    #[test]
    fn flat_keys_have_no_version() {
        let rules = ExclusionRules::new(["android", "c*"]).unwrap();
        assert!(rules.is_excluded("android"));
        assert!(rules.is_excluded("cnova"));
        assert!(!rules.is_excluded("go"));
    }

    #[test]
    fn empty_rules_exclude_nothing() {
        assert!(!ExclusionRules::default().is_excluded("2024.1/ruby"));
    }

    #[test]
    fn default_config_excludes_ruby_and_android() {
        let rules = ExclusionRules::from_config(&MatrixConfig::default()).unwrap();
        assert!(rules.is_excluded("2024.3/ruby"));
        assert!(rules.is_excluded("2024.1/android"));
        assert!(rules.is_excluded("2023.2/jvm"));
        assert!(!rules.is_excluded("2024.3/jvm"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = ExclusionRules::new(["[unclosed"]).unwrap_err();
        assert!(err.to_string().contains("[unclosed"));
    }
}
