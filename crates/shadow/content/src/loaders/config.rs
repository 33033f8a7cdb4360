//! Calculator configuration loader.

use std::path::Path;

use shadow_core::CalculatorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for calculator configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CalculatorConfig`] from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CalculatorConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CalculatorConfig> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse calculator config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("enforce_spend_cap = true\nfallback_lash_dc = 13\n").unwrap();
        assert!(config.enforce_spend_cap);
        assert_eq!(config.fallback_lash_dc, 13);
        assert_eq!(config.fallback_stub_dc, CalculatorConfig::DEFAULT_STUB_DC);
        assert_eq!(config.self_name, CalculatorConfig::DEFAULT_SELF_NAME);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "self_name = \"Gecko Moria\"").unwrap();
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.self_name, "Gecko Moria");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/calculator.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/calculator.toml"));
    }

    #[test]
    fn shipped_sample_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/calculator.toml");
        let config = ConfigLoader::load(&path).unwrap();
        assert!(!config.enforce_spend_cap);
    }
}
