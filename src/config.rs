//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Configuration for the classifier's remote provider.
///
/// With no API key configured the classifier never attempts a network call
/// and routes purely through the local keyword heuristic.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Bearer token for the provider. `None` disables remote classification.
    pub api_key: Option<SecretString>,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Base URL of the chat-completions endpoint.
    pub base_url: String,
    /// Timeout for per-answer routing calls.
    pub routing_timeout: Duration,
    /// Timeout for the final-profile call (lower frequency, may run longer).
    pub final_timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1/chat/completions".to_string(),
            routing_timeout: Duration::from_secs(10),
            final_timeout: Duration::from_secs(15),
        }
    }
}

impl ClassifierConfig {
    /// Build a config from the environment.
    ///
    /// Reads `OPENAI_API_KEY`, `SCENT_QUIZ_MODEL`, `SCENT_QUIZ_API_BASE`,
    /// and the timeout overrides `SCENT_QUIZ_ROUTING_TIMEOUT_SECS` /
    /// `SCENT_QUIZ_FINAL_TIMEOUT_SECS`; anything unset falls back to the
    /// defaults. Fails only on an unparseable timeout value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(SecretString::from);
        if let Ok(model) = std::env::var("SCENT_QUIZ_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("SCENT_QUIZ_API_BASE") {
            config.base_url = base_url;
        }
        if let Ok(raw) = std::env::var("SCENT_QUIZ_ROUTING_TIMEOUT_SECS") {
            config.routing_timeout = parse_secs("SCENT_QUIZ_ROUTING_TIMEOUT_SECS", &raw)?;
        }
        if let Ok(raw) = std::env::var("SCENT_QUIZ_FINAL_TIMEOUT_SECS") {
            config.final_timeout = parse_secs("SCENT_QUIZ_FINAL_TIMEOUT_SECS", &raw)?;
        }
        Ok(config)
    }

    /// Whether a remote credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_credential() {
        let config = ClassifierConfig::default();
        assert!(!config.has_credential());
        assert_eq!(config.routing_timeout, Duration::from_secs(10));
        assert_eq!(config.final_timeout, Duration::from_secs(15));
    }

    #[test]
    fn timeout_override_parsing() {
        assert_eq!(
            parse_secs("SCENT_QUIZ_ROUTING_TIMEOUT_SECS", " 20 ").unwrap(),
            Duration::from_secs(20)
        );
        let err = parse_secs("SCENT_QUIZ_ROUTING_TIMEOUT_SECS", "ten").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
