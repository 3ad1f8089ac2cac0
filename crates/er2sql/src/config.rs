//! Configuration types for er2sql conversion and validation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining lint and semantic settings.
//! - [`LintConfig`] - Controls the static lint rules.
//! - [`SemanticConfig`] - Controls the language-model endpoint used by the
//!   semantic checker.
//!
//! # Example
//!
//! ```
//! # use er2sql::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.lint().max_line_length(), 80);
//! assert!(config.semantic().endpoint().is_none());
//! ```

use serde::Deserialize;

const DEFAULT_MAX_LINE_LENGTH: usize = 80;
const DEFAULT_MODEL: &str = "Salesforce/codet5-base";
const DEFAULT_MAX_LENGTH: u32 = 512;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Lint configuration section.
    #[serde(default)]
    lint: LintConfig,

    /// Semantic checker configuration section.
    #[serde(default)]
    semantic: SemanticConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(lint: LintConfig, semantic: SemanticConfig) -> Self {
        Self { lint, semantic }
    }

    /// Returns the lint configuration.
    pub fn lint(&self) -> &LintConfig {
        &self.lint
    }

    /// Returns the semantic checker configuration.
    pub fn semantic(&self) -> &SemanticConfig {
        &self.semantic
    }
}

/// Static lint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Maximum line length before `LT05` is reported.
    max_line_length: usize,

    /// Rule codes that are never reported (e.g. `["LT12"]`).
    exclude_rules: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            exclude_rules: Vec::new(),
        }
    }
}

impl LintConfig {
    /// Creates a new [`LintConfig`].
    pub fn new(max_line_length: usize, exclude_rules: Vec<String>) -> Self {
        Self {
            max_line_length,
            exclude_rules,
        }
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Returns `true` when `code` is listed in `exclude_rules`.
    pub fn is_excluded(&self, code: &str) -> bool {
        self.exclude_rules
            .iter()
            .any(|rule| rule.eq_ignore_ascii_case(code))
    }
}

/// Language-model configuration for the semantic checker.
///
/// The checker is enabled only when [`SemanticConfig::endpoint`] is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SemanticConfig {
    /// OpenAI-compatible chat-completions URL.
    endpoint: Option<String>,

    /// Model name sent with every request.
    model: String,

    /// Name of the environment variable holding the API key, if any.
    api_key_env: Option<String>,

    /// Upper bound on the completion length, in tokens.
    max_length: u32,

    /// Request timeout, in seconds.
    timeout_secs: u64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: DEFAULT_MODEL.to_string(),
            api_key_env: None,
            max_length: DEFAULT_MAX_LENGTH,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SemanticConfig {
    /// Returns a copy of this configuration pointing at `endpoint`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key_env(&self) -> Option<&str> {
        self.api_key_env.as_deref()
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}
