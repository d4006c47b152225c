use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PRICE_API_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_MODEL_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/bigscience/bloomz-7b1";
pub const DEFAULT_MODEL_NAME: &str = "BLOOMZ 7B1";

// Market-data provider settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSourceConfig {
    pub base_url: String,
    pub use_adjusted_close: bool,
}

impl Default for PriceSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PRICE_API_BASE_URL.to_string(),
            use_adjusted_close: true,
        }
    }
}

// Fixed generation parameters, never tuned per request.
// `max_new_tokens` limits generated tokens only; the prompt is not counted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub do_sample: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 500,
            temperature: 0.7,
            top_p: 0.9,
            do_sample: true,
        }
    }
}

// Text-generation model settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub endpoint: String,
    pub name: String,
    pub api_token: Option<String>,
    pub generation: GenerationConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_MODEL_ENDPOINT.to_string(),
            name: DEFAULT_MODEL_NAME.to_string(),
            api_token: None,
            generation: GenerationConfig::default(),
        }
    }
}

// YAML-serializable configuration structure. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ConfigYaml {
    pub price_source: Option<PriceSourceYaml>,
    pub model: Option<ModelYaml>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PriceSourceYaml {
    pub base_url: Option<String>,
    pub use_adjusted_close: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ModelYaml {
    pub endpoint: Option<String>,
    pub name: Option<String>,
    pub api_token: Option<String>,
    pub max_new_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub do_sample: Option<bool>,
}

// Holds application-wide settings
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub price_source: PriceSourceConfig,
    pub model: ModelConfig,
    pub request_timeout: Option<Duration>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            price_source: PriceSourceConfig::default(),
            model: ModelConfig::default(),
            request_timeout: None,
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    // An explicit path wins, then CONFIG_FILE, then environment variables.
    // A YAML file is all-or-nothing, so only the env path can carry a fallback reason.
    pub fn load(config_path: Option<&Path>) -> Result<(Self, Option<ConfigError>), ConfigError> {
        if let Some(path) = config_path {
            return Ok((Self::from_yaml(path)?, None));
        }
        if let Ok(config_file) = env::var("CONFIG_FILE") {
            Ok((Self::from_yaml(Path::new(&config_file))?, None))
        } else {
            Ok(Self::from_env())
        }
    }

    pub fn from_yaml(file_path: &Path) -> Result<Self, ConfigError> {
        let yaml_content = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
            path: file_path.display().to_string(),
            source,
        })?;

        Self::from_yaml_str(&yaml_content)
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self, ConfigError> {
        let yaml_config: ConfigYaml = if yaml_content.trim().is_empty() {
            ConfigYaml::default()
        } else {
            serde_yaml::from_str(yaml_content)?
        };

        let defaults = Self::default();
        let price_yaml = yaml_config.price_source.unwrap_or_default();
        let model_yaml = yaml_config.model.unwrap_or_default();
        let default_generation = defaults.model.generation.clone();

        let config = Self {
            price_source: PriceSourceConfig {
                base_url: price_yaml.base_url.unwrap_or(defaults.price_source.base_url),
                use_adjusted_close: price_yaml
                    .use_adjusted_close
                    .unwrap_or(defaults.price_source.use_adjusted_close),
            },
            model: ModelConfig {
                endpoint: model_yaml.endpoint.unwrap_or(defaults.model.endpoint),
                name: model_yaml.name.unwrap_or(defaults.model.name),
                api_token: model_yaml.api_token.filter(|t| !t.is_empty()),
                generation: GenerationConfig {
                    max_new_tokens: model_yaml
                        .max_new_tokens
                        .unwrap_or(default_generation.max_new_tokens),
                    temperature: model_yaml.temperature.unwrap_or(default_generation.temperature),
                    top_p: model_yaml.top_p.unwrap_or(default_generation.top_p),
                    do_sample: model_yaml.do_sample.unwrap_or(default_generation.do_sample),
                },
            },
            request_timeout: yaml_config.request_timeout_secs.map(Duration::from_secs),
            log_level: yaml_config.log_level.unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load all configuration from environment variables.
    ///
    /// Out-of-range generation settings fall back to defaults; the second
    /// value is the reason, for the caller to log once logging is up.
    pub fn from_env() -> (Self, Option<ConfigError>) {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> (Self, Option<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| var(key).map(|v| v.trim().to_string());
        let defaults = Self::default();
        let generation = defaults.model.generation.clone();

        let config = Self {
            price_source: PriceSourceConfig {
                base_url: var("PRICE_API_BASE_URL").unwrap_or(defaults.price_source.base_url),
                use_adjusted_close: parse("USE_ADJUSTED_CLOSE")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.price_source.use_adjusted_close),
            },
            model: ModelConfig {
                endpoint: var("MODEL_ENDPOINT").unwrap_or(defaults.model.endpoint),
                name: var("MODEL_NAME").unwrap_or(defaults.model.name),
                api_token: var("HF_API_TOKEN").filter(|t| !t.is_empty()),
                generation: GenerationConfig {
                    max_new_tokens: parse("MAX_NEW_TOKENS")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(generation.max_new_tokens),
                    temperature: parse("TEMPERATURE")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(generation.temperature),
                    top_p: parse("TOP_P")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(generation.top_p),
                    do_sample: parse("DO_SAMPLE")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(generation.do_sample),
                },
            },
            request_timeout: parse("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        match config.validate() {
            Ok(()) => (config, None),
            Err(e) => {
                let fallback = Self {
                    model: ModelConfig {
                        generation: GenerationConfig::default(),
                        ..config.model
                    },
                    ..config
                };
                (fallback, Some(e))
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.model.generation;
        if generation.max_new_tokens == 0 {
            return Err(ConfigError::Invalid("max_new_tokens must be positive".to_string()));
        }
        if !(generation.temperature > 0.0) {
            return Err(ConfigError::Invalid("temperature must be positive".to_string()));
        }
        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            return Err(ConfigError::Invalid("top_p must be in (0, 1]".to_string()));
        }
        Ok(())
    }
}
