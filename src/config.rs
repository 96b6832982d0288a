//! # Configuration Management
//!
//! This module handles loading and managing application configuration from multiple sources:
//! - TOML configuration files (config.toml)
//! - Environment variables (with APP_ prefix, nested keys separated by `__`)
//! - Well-known deployment variables (HOST, PORT, OPENAI_API_KEY, SESSION_SECRET, APP_ENV)
//! - Default values (built into the code)
//!
//! ## Configuration Priority (highest to lowest):
//! 1. Well-known deployment variables
//! 2. Environment variables (APP_OPENAI__CHAT_MODEL, APP_SERVER__PORT, etc.)
//! 3. Configuration file (config.toml)
//! 4. Default values (defined in the Default impl)
//!
//! ## Secrets:
//! The API credential and the session-signing secret have no usable defaults.
//! `validate()` refuses to let the server start without them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Minimum length of the session-signing secret. Cookie keys are derived
/// from this material and the derivation needs at least 256 bits.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Main application configuration that contains all settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub speech: SpeechConfig,
    pub session: SessionConfig,
}

/// Server-specific configuration settings.
///
/// ## Fields:
/// - `host`: IP address or hostname to bind the server to (e.g., "127.0.0.1", "0.0.0.0")
/// - `port`: TCP port number to listen on
/// - `environment`: Deployment environment name; `"production"` turns on
///   secure cookies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

/// Settings for the completion / speech collaborator.
///
/// ## Fields:
/// - `api_key`: Bearer credential sent with every upstream request
/// - `base_url`: Root of an OpenAI-compatible API (no trailing slash)
/// - `chat_model`: Model used for questions, weakness analysis and the verdict
/// - `summary_model`: Model used to condense older history
/// - `tts_model`: Text-to-speech model
/// - `request_timeout_secs`: Upper bound for a single upstream HTTP call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub summary_model: String,
    pub tts_model: String,
    pub request_timeout_secs: u64,
}

/// Defaults applied to `/api/tts` requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub default_voice: String,
    pub default_speed: f32,
    /// Longer input is truncated before it is sent upstream
    pub max_input_chars: usize,
}

/// Session cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub max_age_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),  // Localhost only (safe for development)
                port: 8080,
                environment: "development".to_string(),
            },
            openai: OpenAiConfig {
                api_key: String::new(),         // Must come from the environment
                base_url: "https://api.openai.com/v1".to_string(),
                chat_model: "gpt-4o-mini".to_string(),
                summary_model: "gpt-4o-mini".to_string(),
                tts_model: "gpt-4o-mini-tts".to_string(),
                request_timeout_secs: 60,
            },
            speech: SpeechConfig {
                default_voice: "alloy".to_string(),
                default_speed: 1.0,
                max_input_chars: 4096,          // Upstream rejects longer input
            },
            session: SessionConfig {
                secret: String::new(),          // Must come from the environment
                cookie_name: "interview_sid".to_string(),
                max_age_secs: 3600,             // One hour
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources in priority order.
    ///
    /// ## Environment Variable Examples:
    /// - `APP_SERVER__PORT=3000`: Override server port
    /// - `APP_OPENAI__CHAT_MODEL=gpt-4o`: Override the question model
    /// - `OPENAI_API_KEY=sk-...`: Credential (special case)
    /// - `SESSION_SECRET=...`: Cookie signing secret (special case)
    /// - `APP_ENV=production`: Deployment environment (special case)
    /// - `HOST` / `PORT`: Special cases for deployment platforms
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let overrides = [
            ("HOST", "server.host"),
            ("PORT", "server.port"),
            ("APP_ENV", "server.environment"),
            ("OPENAI_API_KEY", "openai.api_key"),
            ("SESSION_SECRET", "session.secret"),
        ];
        for (var, key) in overrides {
            if let Ok(value) = env::var(var) {
                settings = settings.set_override(key, value)?;
            }
        }

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate that the configuration values make sense.
    ///
    /// ## What this checks:
    /// - Server port is not 0
    /// - The API credential is present
    /// - The session secret is present and long enough to derive a cookie key
    /// - Speech defaults are usable
    /// - Session cookies live for a positive amount of time
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.openai.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Missing API credential: set OPENAI_API_KEY or openai.api_key"
            ));
        }

        if self.session.secret.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Missing session secret: set SESSION_SECRET or session.secret"
            ));
        }

        if self.session.secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "Session secret must be at least {} bytes",
                MIN_SESSION_SECRET_LEN
            ));
        }

        if self.session.max_age_secs == 0 {
            return Err(anyhow::anyhow!("Session max age must be greater than 0"));
        }

        if !(self.speech.default_speed.is_finite() && self.speech.default_speed > 0.0) {
            return Err(anyhow::anyhow!("Default speech speed must be a positive number"));
        }

        if self.speech.max_input_chars == 0 {
            return Err(anyhow::anyhow!("Speech input limit must be greater than 0"));
        }

        Ok(())
    }

    /// Whether the server runs in a production deployment. Controls the
    /// `Secure` and `SameSite` attributes of the session cookie.
    pub fn is_production(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.openai.api_key = "test-key".to_string();
    config.session.secret = "a-test-secret-that-is-long-enough-for-hmac-keys".to_string();
    config
}
