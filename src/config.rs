//! Application configuration: a JSON file next to the working directory,
//! created with defaults on first run and overridable from the environment.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::connector::adapter::{gigachat_client, gigachat_oauth, ollama_client};
use crate::connector::{DEFAULT_CACHE_PATH, DEFAULT_LOG_DIR, DEFAULT_SOURCE_PATH};
use crate::domain::DomainError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
const API_KEY_PLACEHOLDER: &str = "PASTE_YOUR_BASE64_GIGACHAT_API_KEY_HERE";
const ENV_PREFIX: &str = "KITQUOTE_";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// `true` sends every request to the local Ollama server instead of GigaChat.
    pub use_alternate_provider: bool,
    pub giga_chat: GigaChatConfig,
    pub ollama: OllamaConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
    /// Ask the model for search keywords before falling back to local tokenization.
    pub model_keywords: bool,
    pub top_k: usize,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GigaChatConfig {
    pub api_key: String,
    pub model: String,
    pub scope: String,
    pub auth_url: String,
    pub api_url: String,
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    pub source_path: PathBuf,
    pub cache_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    pub log_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template_path: Option<PathBuf>,
    pub document_title: String,
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            use_alternate_provider: false,
            giga_chat: GigaChatConfig::default(),
            ollama: OllamaConfig::default(),
            catalog: CatalogConfig::default(),
            output: OutputConfig::default(),
            model_keywords: true,
            top_k: crate::application::DEFAULT_TOP_K,
            request_timeout_secs: 120,
        }
    }
}

impl Default for GigaChatConfig {
    fn default() -> Self {
        Self {
            api_key: API_KEY_PLACEHOLDER.to_string(),
            model: gigachat_client::DEFAULT_MODEL.to_string(),
            scope: gigachat_oauth::DEFAULT_SCOPE.to_string(),
            auth_url: gigachat_oauth::DEFAULT_AUTH_URL.to_string(),
            api_url: gigachat_client::DEFAULT_API_URL.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl fmt::Debug for GigaChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GigaChatConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("scope", &self.scope)
            .field("auth_url", &self.auth_url)
            .field("api_url", &self.api_url)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: ollama_client::DEFAULT_BASE_URL.to_string(),
            model: ollama_client::DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            output_dir: PathBuf::from("."),
            template_path: None,
            document_title: crate::connector::DEFAULT_TITLE.to_string(),
            currency: crate::connector::DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl AppConfig {
    /// Read the config file, writing a default one first if it does not exist,
    /// then apply `KITQUOTE_*` environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let mut config = Self::read_or_create(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn read_or_create(path: &Path) -> Result<Self, DomainError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            return serde_json::from_str(&content).map_err(|e| {
                DomainError::configuration(format!("failed to parse {}: {e}", path.display()))
            });
        }

        let config = Self::default();
        config.save(path)?;
        info!(
            "Created default configuration at {}. Fill in the GigaChat API key or enable the local provider.",
            path.display()
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            DomainError::configuration(format!("failed to serialize configuration: {e}"))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from `lookup`, which maps a full variable name such as
    /// `KITQUOTE_OLLAMA_MODEL` to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}")).filter(|value| !value.trim().is_empty())
        };

        if let Some(value) = var("USE_ALTERNATE_PROVIDER") {
            match parse_bool(&value) {
                Some(flag) => self.use_alternate_provider = flag,
                None => warn!("Ignoring {ENV_PREFIX}USE_ALTERNATE_PROVIDER={value}: not a boolean"),
            }
        }
        if let Some(value) = var("GIGACHAT_API_KEY") {
            self.giga_chat.api_key = value;
        }
        if let Some(value) = var("GIGACHAT_MODEL") {
            self.giga_chat.model = value;
        }
        if let Some(value) = var("OLLAMA_BASE_URL") {
            self.ollama.base_url = value;
        }
        if let Some(value) = var("OLLAMA_MODEL") {
            self.ollama.model = value;
        }
        if let Some(value) = var("REQUEST_TIMEOUT_SECS") {
            match value.parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => warn!("Ignoring {ENV_PREFIX}REQUEST_TIMEOUT_SECS={value}: not a number"),
            }
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.request_timeout_secs == 0 {
            return Err(DomainError::configuration(
                "requestTimeoutSecs must be greater than zero",
            ));
        }
        if self.top_k == 0 {
            return Err(DomainError::configuration("topK must be greater than zero"));
        }

        if self.use_alternate_provider {
            require_non_empty("ollama.model", &self.ollama.model)?;
            require_url("ollama.baseUrl", &self.ollama.base_url)?;
        } else {
            let key = self.giga_chat.api_key.trim();
            if key.is_empty() || key == API_KEY_PLACEHOLDER {
                return Err(DomainError::configuration(
                    "gigaChat.apiKey is not set; add it to the config file or set KITQUOTE_GIGACHAT_API_KEY",
                ));
            }
            require_non_empty("gigaChat.model", &self.giga_chat.model)?;
            require_non_empty("gigaChat.scope", &self.giga_chat.scope)?;
            require_url("gigaChat.authUrl", &self.giga_chat.auth_url)?;
            require_url("gigaChat.apiUrl", &self.giga_chat.api_url)?;
        }

        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::configuration(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<(), DomainError> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .map_err(|e| DomainError::configuration(format!("{field} is not a valid URL ({value}): {e}")))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
