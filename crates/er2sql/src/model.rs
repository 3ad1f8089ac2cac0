//! Language-model seam used by the semantic checker.
//!
//! The model is a process-wide, read-only handle ([`SharedModel`]) created
//! once at startup and shared by every validation request. Engines that
//! cannot serve concurrent calls are wrapped in [`Serialized`], which queues
//! callers behind a mutex.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SemanticConfig;

/// Infrastructure failures of the language model.
///
/// Malformed completions are not errors; they are handled by the semantic
/// checker's fallback.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    Response(String),

    #[error("model is unavailable: {0}")]
    Unavailable(String),
}

/// A text-completion model.
pub trait LanguageModel: Send + Sync {
    /// Generates a completion of at most `max_length` tokens for `prompt`.
    fn generate(&self, prompt: &str, max_length: u32) -> Result<String, ModelError>;
}

impl<F> LanguageModel for F
where
    F: Fn(&str, u32) -> Result<String, ModelError> + Send + Sync,
{
    fn generate(&self, prompt: &str, max_length: u32) -> Result<String, ModelError> {
        self(prompt, max_length)
    }
}

/// Process-wide shared model handle.
pub type SharedModel = Arc<dyn LanguageModel>;

/// An inference engine that needs exclusive access for each call.
pub trait Inference: Send {
    fn infer(&mut self, prompt: &str, max_length: u32) -> Result<String, ModelError>;
}

/// Serializes calls to a non-reentrant [`Inference`] engine.
pub struct Serialized<M> {
    engine: Mutex<M>,
}

impl<M: Inference> Serialized<M> {
    pub fn new(engine: M) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }
}

impl<M: Inference> LanguageModel for Serialized<M> {
    fn generate(&self, prompt: &str, max_length: u32) -> Result<String, ModelError> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| ModelError::Unavailable("engine lock poisoned".to_string()))?;
        engine.infer(prompt, max_length)
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// A model served over an OpenAI-compatible chat-completions endpoint.
///
/// Requests use greedy decoding (`temperature = 0`).
pub struct HttpModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpModel {
    /// Builds the model described by `config`.
    ///
    /// Returns `Ok(None)` when no endpoint is configured. The API key is read
    /// from the environment variable named by `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Unavailable`] when the HTTP client cannot be built.
    pub fn from_config(config: &SemanticConfig) -> Result<Option<Self>, ModelError> {
        let Some(endpoint) = config.endpoint() else {
            debug!("No semantic endpoint configured");
            return Ok(None);
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|err| ModelError::Unavailable(err.to_string()))?;
        let api_key = config
            .api_key_env()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty());

        info!(endpoint, model = config.model(); "Semantic model configured");
        Ok(Some(Self {
            client,
            endpoint: endpoint.to_string(),
            model: config.model().to_string(),
            api_key,
        }))
    }
}

impl LanguageModel for HttpModel {
    fn generate(&self, prompt: &str, max_length: u32) -> Result<String, ModelError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: max_length,
            temperature: 0.0,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|err| ModelError::Request(err.to_string()))?;
        let body: ChatResponse = response
            .json()
            .map_err(|err| ModelError::Response(err.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| ModelError::Response("no choices in completion".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter {
        calls: usize,
    }

    impl Inference for Counter {
        fn infer(&mut self, _prompt: &str, _max_length: u32) -> Result<String, ModelError> {
            self.calls += 1;
            Ok(format!("[\"call {}\"]", self.calls))
        }
    }

    #[test]
    fn test_closure_is_a_model() {
        let calls = AtomicUsize::new(0);
        let model = |prompt: &str, max_length: u32| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ModelError>(format!("{}:{max_length}", prompt.len()))
        };

        assert_eq!(model.generate("abc", 16).unwrap(), "3:16");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_serialized_engine_shared_across_threads() {
        let model: SharedModel = Arc::new(Serialized::new(Counter { calls: 0 }));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let model = Arc::clone(&model);
                std::thread::spawn(move || model.generate("sql", 8).unwrap())
            })
            .collect();
        let mut outputs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        outputs.sort();

        assert_eq!(
            outputs,
            ["[\"call 1\"]", "[\"call 2\"]", "[\"call 3\"]", "[\"call 4\"]"]
        );
    }

    #[test]
    fn test_http_model_disabled_without_endpoint() {
        let model = HttpModel::from_config(&SemanticConfig::default()).unwrap();
        assert!(model.is_none());
    }

    #[test]
    fn test_chat_response_parsing() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"[]"}}]}"#,
        )
        .unwrap();

        assert_eq!(body.choices[0].message.content.as_deref(), Some("[]"));
    }
}
