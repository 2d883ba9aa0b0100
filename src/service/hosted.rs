//! Hosted text-generation backend.
//!
//! Talks to an inference endpoint that accepts
//! `POST {endpoint}/{model}` with `{"inputs": ..., "parameters": ...}` and
//! answers `[{"generated_text": ...}]` (the Hugging Face Inference API shape).

use super::{Translator, TranslatorLoader};
use crate::config::Secret;
use crate::error::{Error, Result};
use crate::format::{clean_completion, instruction_prompt, plain_prompt};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MODEL_ID: &str = "distilgpt2";

/// How the formal sentence is turned into a model prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// `Translate this formal text to informal slang: ...\nInformal:`
    #[default]
    Plain,
    /// `<s>[INST] ... [/INST]`, matching the fine-tuning template
    Instruct,
}

impl PromptStyle {
    pub fn prompt(&self, formal: &str) -> String {
        match self {
            PromptStyle::Plain => plain_prompt(formal),
            PromptStyle::Instruct => instruction_prompt(formal),
        }
    }
}

impl FromStr for PromptStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(PromptStyle::Plain),
            "instruct" | "inst" => Ok(PromptStyle::Instruct),
            other => Err(Error::Config(format!(
                "unknown prompt style '{other}' (expected 'plain' or 'instruct')"
            ))),
        }
    }
}

/// Hosted model settings.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    /// Base URL; the model id is appended as a path segment.
    pub endpoint: String,
    pub model_id: String,
    /// Smaller model tried when the primary one cannot be loaded.
    pub fallback_model_id: Option<String>,
    pub token: Option<Secret>,
    pub prompt_style: PromptStyle,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            fallback_model_id: None,
            token: None,
            prompt_style: PromptStyle::Plain,
            max_new_tokens: 50,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

impl HostedConfig {
    /// Models to try, primary first.
    pub fn candidate_models(&self) -> Vec<&str> {
        let mut models = vec![self.model_id.as_str()];
        if let Some(fallback) = self.fallback_model_id.as_deref() {
            if fallback != self.model_id {
                models.push(fallback);
            }
        }
        models
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), model)
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: GenerationOptions,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct GenerationOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Generations(Vec<Generation>),
    Single(Generation),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// Extracts the cleaned completion from a response body.
fn parse_generation(body: &str, prompt: &str) -> Result<String> {
    let response: GenerationResponse = serde_json::from_str(body)
        .map_err(|e| Error::Generation(format!("unexpected response: {e}")))?;

    let generated = match response {
        GenerationResponse::Generations(mut generations) if !generations.is_empty() => {
            generations.swap_remove(0).generated_text
        }
        GenerationResponse::Generations(_) => {
            return Err(Error::Generation("model returned no generations".into()))
        }
        GenerationResponse::Single(generation) => generation.generated_text,
        GenerationResponse::Error { error } => return Err(Error::Generation(error)),
    };

    let completion = clean_completion(&generated, prompt);
    if completion.is_empty() {
        return Err(Error::Generation("model returned an empty completion".into()));
    }
    Ok(completion)
}

fn authorized(request: reqwest::RequestBuilder, token: Option<&Secret>) -> reqwest::RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.expose()),
        None => request,
    }
}

/// Translator backed by a hosted model.
pub struct HostedTranslator {
    client: reqwest::Client,
    config: HostedConfig,
    model: String,
}

impl fmt::Debug for HostedTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedTranslator")
            .field("model", &self.model)
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}

impl HostedTranslator {
    /// Model id this translator generates with.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Translator for HostedTranslator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn translate(&self, formal_text: &str) -> Result<String> {
        let prompt = self.config.prompt_style.prompt(formal_text);
        let body = GenerationRequest {
            inputs: &prompt,
            parameters: GenerationParameters {
                max_new_tokens: self.config.max_new_tokens,
                temperature: self.config.temperature,
                do_sample: true,
                return_full_text: false,
            },
            options: GenerationOptions {
                wait_for_model: true,
            },
        };

        let request = self
            .client
            .post(self.config.model_url(&self.model))
            .json(&body);
        let response = authorized(request, self.config.token.as_ref()).send().await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("Generation response ({status}): {text}");

        if !status.is_success() {
            // Error bodies usually carry {"error": "..."}
            return match parse_generation(&text, &prompt) {
                Err(e) => Err(e),
                Ok(_) => Err(Error::Generation(format!("endpoint returned {status}"))),
            };
        }

        parse_generation(&text, &prompt)
    }
}

/// Loads a [`HostedTranslator`], falling back to a smaller model if the
/// primary one is unavailable.
#[derive(Debug, Clone)]
pub struct HostedLoader {
    config: HostedConfig,
}

impl HostedLoader {
    pub fn new(config: HostedConfig) -> Self {
        Self { config }
    }

    async fn probe(&self, client: &reqwest::Client, model: &str) -> Result<()> {
        let request = client.get(self.config.model_url(model));
        let response = authorized(request, self.config.token.as_ref()).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::ModelUnavailable(format!("{model}: endpoint returned {status}")))
        }
    }
}

#[async_trait]
impl TranslatorLoader for HostedLoader {
    async fn load(&self) -> Result<Arc<dyn Translator>> {
        if self.config.token.is_none() {
            warn!("HUGGINGFACE_HUB_TOKEN is not set; gated models will be unavailable");
        }

        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()?;

        let mut last_error = None;
        for model in self.config.candidate_models() {
            info!("Loading hosted model {model}...");
            match self.probe(&client, model).await {
                Ok(()) => {
                    info!("Model {model} loaded successfully!");
                    return Ok(Arc::new(HostedTranslator {
                        client: client.clone(),
                        config: self.config.clone(),
                        model: model.to_string(),
                    }));
                }
                Err(e) => {
                    warn!("Failed to load model {model}: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(Error::ModelUnavailable(reason)) => Error::ModelUnavailable(reason),
            Some(other) => Error::ModelUnavailable(other.to_string()),
            None => Error::ModelUnavailable("no model configured".into()),
        })
    }
}
