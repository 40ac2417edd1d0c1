use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub agents: AgentsConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatasetConfig {
    /// Relative paths resolve against the working directory.
    #[serde(default = "DatasetConfig::default_path")]
    pub path: PathBuf,
    #[serde(default = "DatasetConfig::default_top_k")]
    pub top_k: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            top_k: Self::default_top_k(),
        }
    }
}

impl DatasetConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("docs/medicine-recommendation-system-dataset/dataset.csv")
    }

    const fn default_top_k() -> usize {
        5
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FallbackConfig {
    /// Upper bound on disease names requested from the model.
    #[serde(default = "FallbackConfig::default_max_diseases")]
    pub max_diseases: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            max_diseases: Self::default_max_diseases(),
        }
    }
}

impl FallbackConfig {
    const fn default_max_diseases() -> usize {
        5
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentsConfig {
    pub defaults: AgentDefaults,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentDefaults {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub zhipu: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

const CONFIG_TEMPLATE: &str = r#"{
  "agents": {
    "defaults": {
      "model": "glm-4-flash",
      "max_tokens": 4096,
      "temperature": 0.3
    }
  },
  "providers": {
    "zhipu": {
      "api_key": "your-zhipu-api-key-here"
    }
  },
  "dataset": {
    "path": "docs/medicine-recommendation-system-dataset/dataset.csv",
    "top_k": 5
  },
  "fallback": {
    "max_diseases": 5
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("medrec"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'medrec init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        debug!("Reading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Zhipu API key");
        println!("   2. Point dataset.path at your condition dataset CSV");
        println!("   3. Run 'medrec analyze' with your symptoms and profile");
        println!();
        println!("🔧 Configuration options:");
        println!("   - dataset.top_k: Maximum diseases returned from the dataset");
        println!("   - fallback.max_diseases: Maximum diseases requested from the model");
        println!("   - providers.zhipu.base_url: Any OpenAI-compatible endpoint");
        println!();
        Ok(())
    }

    /// Write the default template, refusing to overwrite an existing file.
    pub fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }
        std::fs::write(config_path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_with_defaults() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.agents.defaults.model, "glm-4-flash");
        assert_eq!(config.dataset.top_k, 5);
        assert_eq!(config.fallback.max_diseases, 5);
        assert!(config.providers.zhipu.base_url.is_none());
    }

    #[test]
    fn optional_sections_default() {
        let json = r#"{
            "agents": { "defaults": { "model": "m", "max_tokens": 1, "temperature": 0.1 } },
            "providers": { "zhipu": { "api_key": "k", "base_url": "http://localhost:1234/v1" } },
            "dataset": { "path": "data.csv" }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data.csv"));
        assert_eq!(config.dataset.top_k, 5);
        assert_eq!(config.fallback.max_diseases, 5);
        assert_eq!(
            config.providers.zhipu.base_url.as_deref(),
            Some("http://localhost:1234/v1")
        );
    }

    #[test]
    fn write_template_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join(format!("medrec_cfg_{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        Config::write_template(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.providers.zhipu.api_key, "your-zhipu-api-key-here");
        assert!(Config::write_template(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
