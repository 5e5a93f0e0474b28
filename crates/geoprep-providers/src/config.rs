//! Provider configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geoprep_core::auth::DEFAULT_ADMIN_PASSCODE;
use geoprep_core::gateway::GatewayConfig;
use geoprep_core::traits::LlmProvider;

use crate::gemini::GeminiProvider;
use crate::mock::MockProvider;
use crate::ollama::OllamaProvider;

/// Configuration for a single LLM provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
    /// Canned replies, no network.
    Mock {
        #[serde(default)]
        reply: Option<String>,
        #[serde(default)]
        evaluation: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Mock { reply, evaluation } => f
                .debug_struct("Mock")
                .field("reply", reply)
                .field("evaluation", &evaluation.as_ref().map(|_| "..."))
                .finish(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// Top-level geoprep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoprepConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f64,
    #[serde(default = "default_evaluation_temperature")]
    pub evaluation_temperature: f64,
    /// Output cap per reply; unset leaves it to the provider.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Max retries on transient provider errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Where users and evaluation logs are stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_admin_passcode")]
    pub admin_passcode: String,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_chat_temperature() -> f64 {
    0.7
}
fn default_evaluation_temperature() -> f64 {
    0.2
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./geoprep-data")
}
fn default_admin_passcode() -> String {
    DEFAULT_ADMIN_PASSCODE.to_string()
}

impl Default for GeoprepConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            chat_temperature: default_chat_temperature(),
            evaluation_temperature: default_evaluation_temperature(),
            max_tokens: None,
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            data_dir: default_data_dir(),
            admin_passcode: default_admin_passcode(),
        }
    }
}

impl GeoprepConfig {
    /// Gateway settings derived from this config.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            model: self.default_model.clone(),
            chat_temperature: self.chat_temperature,
            evaluation_temperature: self.evaluation_temperature,
            max_tokens: self.max_tokens,
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Look up a provider by name, or the default provider.
    pub fn provider(&self, name: Option<&str>) -> Result<(&str, &ProviderConfig)> {
        let name = name.unwrap_or(self.default_provider.as_str());
        self.providers
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .with_context(|| {
                format!(
                    "provider '{name}' is not configured. Run `geoprep init` or set GEOPREP_GEMINI_KEY"
                )
            })
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::Ollama { base_url } => ProviderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
        },
        ProviderConfig::Mock { .. } => config.clone(),
    }
}

/// Put an explicit Gemini key into the config, creating the entry if needed.
fn apply_gemini_key(config: &mut GeoprepConfig, lookup: impl Fn(&str) -> Option<String>) {
    let Some(key) = lookup("GEOPREP_GEMINI_KEY").or_else(|| lookup("API_KEY")) else {
        return;
    };
    let entry = config
        .providers
        .entry("gemini".into())
        .or_insert(ProviderConfig::Gemini {
            api_key: String::new(),
            base_url: None,
        });
    if let ProviderConfig::Gemini { api_key, .. } = entry {
        *api_key = key;
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `geoprep.toml` in the current directory
/// 2. `~/.config/geoprep/config.toml`
///
/// Environment variable overrides: `GEOPREP_GEMINI_KEY`, then `API_KEY`.
pub fn load_config() -> Result<GeoprepConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GeoprepConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("geoprep.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GeoprepConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GeoprepConfig::default(),
    };
    tracing::debug!(path = ?config_path, "loaded configuration");

    apply_gemini_key(&mut config, |var| std::env::var(var).ok());

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("geoprep"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(name: &str, config: &ProviderConfig) -> Result<Box<dyn LlmProvider>> {
    let provider: Box<dyn LlmProvider> = match config {
        ProviderConfig::Gemini { api_key, base_url } => {
            if api_key.is_empty() {
                anyhow::bail!("provider '{name}' has no API key. Set GEOPREP_GEMINI_KEY");
            }
            Box::new(GeminiProvider::new(api_key, base_url.clone())?)
        }
        ProviderConfig::Ollama { base_url } => Box::new(OllamaProvider::new(base_url)?),
        ProviderConfig::Mock { reply, evaluation } => {
            let mut mock = match reply {
                Some(reply) => MockProvider::with_fixed_response(reply),
                None => MockProvider::default(),
            };
            if let Some(evaluation) = evaluation {
                mock = mock.with_evaluation(evaluation);
            }
            Box::new(mock)
        }
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GEOPREP_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_GEOPREP_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_GEOPREP_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_close_${BRACE"), "no_close_${BRACE");
        std::env::remove_var("_GEOPREP_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = GeoprepConfig::default();
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(config.default_model, "gemini-3-flash-preview");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.admin_passcode, "BABYMONK");

        let gateway = config.gateway_config();
        assert_eq!(gateway.chat_temperature, 0.7);
        assert_eq!(gateway.evaluation_temperature, 0.2);
        assert_eq!(gateway.retry_delay, Duration::from_secs(1));
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "ollama"
default_model = "llama3.1:8b"
admin_passcode = "SECRET"
max_tokens = 2048

[providers.gemini]
type = "gemini"
api_key = "test-key"

[providers.ollama]
type = "ollama"

[providers.offline]
type = "mock"
reply = "canned"
"#;
        let config: GeoprepConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 3);
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.admin_passcode, "SECRET");
        assert!(matches!(
            config.providers.get("ollama"),
            Some(ProviderConfig::Ollama { base_url }) if base_url == "http://localhost:11434"
        ));
        let (name, _) = config.provider(None).unwrap();
        assert_eq!(name, "ollama");
        assert!(config.provider(Some("missing")).is_err());
    }

    #[test]
    fn debug_masks_api_key() {
        let config = ProviderConfig::Gemini {
            api_key: "super-secret".into(),
            base_url: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn gemini_key_override_prefers_geoprep_var() {
        let mut config = GeoprepConfig::default();
        apply_gemini_key(&mut config, |var| match var {
            "GEOPREP_GEMINI_KEY" => Some("primary".into()),
            "API_KEY" => Some("fallback".into()),
            _ => None,
        });
        assert!(matches!(
            config.providers.get("gemini"),
            Some(ProviderConfig::Gemini { api_key, .. }) if api_key == "primary"
        ));

        let mut config = GeoprepConfig::default();
        apply_gemini_key(&mut config, |var| (var == "API_KEY").then(|| "fallback".into()));
        assert!(matches!(
            config.providers.get("gemini"),
            Some(ProviderConfig::Gemini { api_key, .. }) if api_key == "fallback"
        ));

        let mut config = GeoprepConfig::default();
        apply_gemini_key(&mut config, |_| None);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("geoprep.toml");
        std::fs::write(
            &path,
            "default_provider = \"offline\"\ndata_dir = \"/tmp/geo\"\n\n[providers.offline]\ntype = \"mock\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/geo"));
        let (name, provider) = config.provider(None).unwrap();
        assert_eq!(name, "offline");
        assert_eq!(create_provider(name, provider).unwrap().name(), "mock");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/geoprep.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn gemini_without_key_is_rejected() {
        let config = ProviderConfig::Gemini {
            api_key: String::new(),
            base_url: None,
        };
        assert!(create_provider("gemini", &config).is_err());
    }
}
