//! Text-generation client configuration.

use crate::error::{NarrativeError, Result};
use serde::{Deserialize, Serialize};

/// Default OpenAI API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer token
    pub api_key: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// API root; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

const fn default_temperature() -> f32 {
    0.6
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl LlmConfig {
    /// Config with the given key and default settings.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Build from `OPENAI_API_KEY`, with optional `OPENAI_BASE_URL` and
    /// `NAVIGATOR_LLM_MODEL` overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(NarrativeError::MissingApiKey)?;

        let mut config = Self::with_api_key(api_key);
        if let Some(base_url) = lookup("OPENAI_BASE_URL").filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("NAVIGATOR_LLM_MODEL").filter(|v| !v.is_empty()) {
            config.model = model;
        }
        Ok(config)
    }

    /// Full chat-completions URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.temperature, 0.6);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_missing_key() {
        let result = LlmConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(NarrativeError::MissingApiKey)));

        let blank = LlmConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")]));
        assert!(matches!(blank, Err(NarrativeError::MissingApiKey)));
    }

    #[test]
    fn test_env_overrides() {
        let config = LlmConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
            ("NAVIGATOR_LLM_MODEL", "gpt-4o-mini"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: LlmConfig = serde_json::from_str(r#"{"api_key": "sk-x"}"#).unwrap();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_debug_hides_key() {
        let config = LlmConfig::with_api_key("sk-secret");
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
