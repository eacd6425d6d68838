// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::CompanionError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub conversation: ConversationConfig,

    #[serde(default)]
    pub mood: MoodConfig,

    #[serde(default)]
    pub tasks: TasksConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the access token.
    pub token_env: String,
    pub timeout_seconds: u64,
    pub reply_max_tokens: u32,
    pub label_max_tokens: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.huggingface.co/v1".into(),
            model: "meta-llama/Llama-3.2-3B-Instruct".into(),
            token_env: "HF_TOKEN".into(),
            timeout_seconds: 30,
            reply_max_tokens: 350,
            label_max_tokens: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// How many trailing messages are sent along with the system prompt.
    pub context_window: usize,
    /// Replaces the built-in persona when set.
    #[serde(default)]
    pub persona: Option<String>,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            context_window: 4,
            persona: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Level recorded when the classifier answers outside the label set.
    pub default_level: u8,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self { default_level: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    pub names: Vec<String>,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            names: vec![
                "Drink Water".into(),
                "5-min Meditation".into(),
                "Journaling".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8501,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the companion cannot run with.
    pub fn validate(&self) -> Result<(), CompanionError> {
        if !(1..=5).contains(&self.mood.default_level) {
            return Err(CompanionError::Config(format!(
                "mood.default_level must be between 1 and 5, got {}",
                self.mood.default_level
            )));
        }
        if self.conversation.context_window == 0 {
            return Err(CompanionError::Config(
                "conversation.context_window must be at least 1".into(),
            ));
        }
        if self.gateway.timeout_seconds == 0 {
            return Err(CompanionError::Config(
                "gateway.timeout_seconds must be at least 1".into(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &self.tasks.names {
            if name.trim().is_empty() {
                return Err(CompanionError::Config("tasks.names contains an empty name".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(CompanionError::Config(format!(
                    "tasks.names contains '{name}' twice"
                )));
            }
        }
        Ok(())
    }

    /// Read the gateway token from the process environment.
    pub fn gateway_token(&self) -> Result<String, CompanionError> {
        self.gateway_token_with(|key| std::env::var(key).ok())
    }

    /// Resolve the gateway token through `lookup`. A missing or blank value is fatal.
    pub fn gateway_token_with<F>(&self, lookup: F) -> Result<String, CompanionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(&self.gateway.token_env) {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(CompanionError::Config(format!(
                "{} missing. Export your inference access token before starting.",
                self.gateway.token_env
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.gateway.model, "meta-llama/Llama-3.2-3B-Instruct");
        assert_eq!(c.gateway.token_env, "HF_TOKEN");
        assert_eq!(c.gateway.reply_max_tokens, 350);
        assert_eq!(c.gateway.label_max_tokens, 10);
        assert_eq!(c.conversation.context_window, 4);
        assert_eq!(c.mood.default_level, 4);
        assert_eq!(c.tasks.names.len(), 3);
        assert_eq!(c.api.port, 8501);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.conversation.context_window, 4);
        assert!(config.conversation.persona.is_none());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[gateway]
base_url = "http://localhost:8080/v1"
model = "test/model"
token_env = "MY_TOKEN"
timeout_seconds = 5
reply_max_tokens = 300
label_max_tokens = 8

[conversation]
context_window = 3
persona = "You are a calm friend."

[mood]
default_level = 3

[tasks]
names = ["Drink Water", "5-min Walk", "Meditation"]

[api]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.base_url, "http://localhost:8080/v1");
        assert_eq!(config.gateway.timeout_seconds, 5);
        assert_eq!(config.conversation.context_window, 3);
        assert_eq!(
            config.conversation.persona.as_deref(),
            Some("You are a calm friend.")
        );
        assert_eq!(config.mood.default_level, 3);
        assert_eq!(config.tasks.names[1], "5-min Walk");
        assert_eq!(config.api.port, 9000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_level_out_of_range() {
        let mut c = Config::default();
        c.mood.default_level = 6;
        assert!(matches!(c.validate(), Err(CompanionError::Config(_))));
        c.mood.default_level = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut c = Config::default();
        c.conversation.context_window = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_tasks() {
        let mut c = Config::default();
        c.tasks.names = vec!["Drink Water".into(), "Drink Water".into()];
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_gateway_token_missing_is_config_error() {
        let c = Config::default();
        let err = c.gateway_token_with(|_| None).unwrap_err();
        assert!(matches!(err, CompanionError::Config(_)));
        assert!(err.to_string().contains("HF_TOKEN"));
    }

    #[test]
    fn test_gateway_token_blank_is_config_error() {
        let c = Config::default();
        assert!(c.gateway_token_with(|_| Some("   ".into())).is_err());
    }

    #[test]
    fn test_gateway_token_reads_configured_var() {
        let mut c = Config::default();
        c.gateway.token_env = "ALT_TOKEN".into();
        let token = c
            .gateway_token_with(|key| (key == "ALT_TOKEN").then(|| "hf_abc\n".to_string()))
            .unwrap();
        assert_eq!(token, "hf_abc");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[mood]\ndefault_level = 3\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.mood.default_level, 3);
    }

    #[test]
    fn test_load_from_file_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[mood]\ndefault_level = 9\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.gateway.model, config.gateway.model);
        assert_eq!(deserialized.tasks.names, config.tasks.names);
    }
}
