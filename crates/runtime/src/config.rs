//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// File stem of the persisted document.
pub const DEFAULT_STORAGE_KEY: &str = "shadowFruitSystem_v2";

/// Where documents land when no platform data directory is available.
pub const FALLBACK_DATA_DIR: &str = "./save_data";

/// Settings for the outbound text-generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Bearer credential. Checked when a request is handled, not at startup.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4.1-mini";
    pub const DEFAULT_TEMPERATURE: f32 = 0.85;
    pub const DEFAULT_MAX_TOKENS: u32 = 900;

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Configuration required to open a session and talk to the generator.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub generation: GenerationConfig,
    pub enforce_spend_cap: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            generation: GenerationConfig::default(),
            enforce_spend_cap: false,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHADOW_DATA_DIR` - Directory holding the document (default: platform data dir)
    /// - `SHADOW_STORAGE_KEY` - Document file stem (default: `shadowFruitSystem_v2`)
    /// - `OPENAI_API_KEY` - Credential for text generation (default: unset)
    /// - `SHADOW_GENERATION_URL` - API base URL (default: `https://api.openai.com/v1`)
    /// - `SHADOW_GENERATION_MODEL` - Model name (default: `gpt-4.1-mini`)
    /// - `SHADOW_GENERATION_TEMPERATURE` - Sampling temperature (default: 0.85)
    /// - `SHADOW_GENERATION_MAX_TOKENS` - Completion budget (default: 900)
    /// - `SHADOW_ENFORCE_SPEND_CAP` - Refuse stacks beyond the available pool (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_string("SHADOW_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = read_string("SHADOW_STORAGE_KEY") {
            config.storage_key = key;
        }

        let generation = &mut config.generation;
        generation.api_key = read_string("OPENAI_API_KEY");
        if let Some(url) = read_string("SHADOW_GENERATION_URL") {
            generation.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = read_string("SHADOW_GENERATION_MODEL") {
            generation.model = model;
        }
        if let Some(temperature) = read_env::<f32>("SHADOW_GENERATION_TEMPERATURE") {
            generation.temperature = temperature.clamp(0.0, 2.0);
        }
        if let Some(max_tokens) = read_env::<u32>("SHADOW_GENERATION_MAX_TOKENS") {
            generation.max_tokens = max_tokens.max(1);
        }

        if let Some(enforce) = read_env::<bool>("SHADOW_ENFORCE_SPEND_CAP") {
            config.enforce_spend_cap = enforce;
        }

        config
    }

    /// Path of the JSON document inside [`Self::data_dir`].
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "shadow-fruit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

/// Non-empty value of `key`, trimmed.
fn read_string(key: &str) -> Option<String> {
    let value = env::var(key).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_defaults() {
        let generation = GenerationConfig::default();
        assert_eq!(generation.model, "gpt-4.1-mini");
        assert_eq!(generation.max_tokens, 900);
        assert!((generation.temperature - 0.85).abs() < f32::EPSILON);
        assert!(generation.api_key.is_none());
    }

    #[test]
    fn document_path_uses_storage_key() {
        let config = RuntimeConfig {
            data_dir: PathBuf::from("/tmp/shadow"),
            ..RuntimeConfig::default()
        };
        assert_eq!(
            config.document_path(),
            PathBuf::from("/tmp/shadow/shadowFruitSystem_v2.json")
        );
    }
}
