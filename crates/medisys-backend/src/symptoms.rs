//! Text-completion symptom checker.

use async_trait::async_trait;
use medisys_shared::config::SymptomCheckerConfig;
use medisys_shared::validate_min_length;
use serde_json::{json, Value};
use tracing::warn;

pub const MIN_SYMPTOM_CHARS: usize = 10;

pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum SymptomCheckError {
    #[error("Please describe your symptoms in more detail.")]
    TooShort,
    #[error("Symptom checker is not configured: {0}")]
    NotConfigured(String),
    #[error("Provider '{0}' unavailable")]
    ProviderUnavailable(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SymptomCheckError {
    fn from(e: reqwest::Error) -> Self {
        SymptomCheckError::Http(e.to_string())
    }
}

impl SymptomCheckError {
    /// Message shown under the symptom form
    pub fn user_message(&self) -> String {
        match self {
            SymptomCheckError::TooShort => self.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Free-text symptoms in, free-text likely causes out
#[async_trait]
pub trait SymptomChecker: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, SymptomCheckError>;
    fn name(&self) -> &str;
}

pub fn symptom_prompt(symptoms: &str) -> String {
    format!(
        "You are an AI-driven symptom checker. A patient will provide a list of symptoms they are \
         experiencing, and you will provide a list of likely causes for those symptoms.\n\n\
         Symptoms: {}",
        symptoms
    )
}

pub fn validate_symptoms(symptoms: &str) -> Result<&str, SymptomCheckError> {
    let result = validate_min_length(
        symptoms,
        MIN_SYMPTOM_CHARS,
        "symptoms",
        "Please describe your symptoms in more detail.",
    );
    if result.is_valid() {
        Ok(symptoms.trim())
    } else {
        Err(SymptomCheckError::TooShort)
    }
}

/// Validate, build the prompt and ask the provider once
pub async fn check_symptoms(
    checker: &dyn SymptomChecker,
    symptoms: &str,
) -> Result<String, SymptomCheckError> {
    let symptoms = validate_symptoms(symptoms)?;
    checker
        .complete(&symptom_prompt(symptoms))
        .await
        .map_err(|e| {
            warn!(provider = checker.name(), error = %e, "symptom check failed");
            e
        })
}

/// Google `generateContent` client
pub struct GeminiSymptomChecker {
    api_key: String,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiSymptomChecker {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Read the API key from the environment variable named in the config
    pub fn from_config(config: &SymptomCheckerConfig) -> Result<Self, SymptomCheckError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SymptomCheckError::NotConfigured(format!("{} is not set", config.api_key_env)))?;
        Ok(Self::new(api_key, config.model.clone(), config.endpoint.clone()))
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn parse_response(json: &Value) -> Result<String, SymptomCheckError> {
        json.pointer("/candidates/0/content/parts/0/text")
            .and_then(|t| t.as_str())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| SymptomCheckError::Parse("missing candidates[0].content.parts[0].text".into()))
    }
}

#[async_trait]
impl SymptomChecker for GeminiSymptomChecker {
    async fn complete(&self, prompt: &str) -> Result<String, SymptomCheckError> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let resp = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|_| SymptomCheckError::ProviderUnavailable("gemini".into()))?
            .error_for_status()?;
        let json: Value = resp.json().await?;
        Self::parse_response(&json)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
