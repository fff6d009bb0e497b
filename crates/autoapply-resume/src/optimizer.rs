//! LLM-backed resume tailoring.

use crate::error::{ResumeError, Result};
use crate::prompts;
use async_trait::async_trait;
use autoapply_core::{LlmConfig, TailoredResume};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rewrites resumes against a target job description.
///
/// All three operations are single calls to a text-completion provider; the
/// engineering here is boundary-shaped (request building, response parsing,
/// error mapping), deliberately thin.
#[async_trait]
pub trait ResumeOptimizer: Send + Sync {
    /// Free-text rewrite of the whole resume.
    async fn improve(&self, resume_text: &str, job_description: &str) -> Result<String>;

    /// Structured, ATS-friendly rewrite.
    async fn optimize(&self, resume_text: &str, job_description: &str)
        -> Result<TailoredResume>;

    /// Concrete improvement suggestions, ordered by impact.
    async fn suggestions(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<Vec<String>>;
}

/// [`ResumeOptimizer`] over an OpenAI-compatible chat-completions API.
pub struct OpenAiOptimizer {
    config: LlmConfig,
    client: Client,
}

impl OpenAiOptimizer {
    /// Create an optimizer from LLM configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { config, client })
    }

    async fn complete(&self, system: &str, user: String) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ResumeError::MissingApiKey)?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResumeError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ResumeError::ResponseParse("no choices in response".to_string()))?;
        Ok(choice.message.content)
    }
}

#[async_trait]
impl ResumeOptimizer for OpenAiOptimizer {
    async fn improve(&self, resume_text: &str, job_description: &str) -> Result<String> {
        let content = self
            .complete(
                prompts::IMPROVE_SYSTEM,
                prompts::user_message(resume_text, job_description),
            )
            .await?;
        Ok(content.trim().to_string())
    }

    async fn optimize(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<TailoredResume> {
        let content = self
            .complete(
                prompts::OPTIMIZE_SYSTEM,
                prompts::user_message(resume_text, job_description),
            )
            .await?;
        parse_json_payload(&content)
    }

    async fn suggestions(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<Vec<String>> {
        let content = self
            .complete(
                prompts::SUGGESTIONS_SYSTEM,
                prompts::user_message(resume_text, job_description),
            )
            .await?;
        parse_json_payload(&content)
    }
}

/// Parse a JSON payload out of a model response, tolerating markdown fences
/// the model sometimes adds despite instructions.
fn parse_json_payload<T: serde::de::DeserializeOwned>(content: &str) -> Result<T> {
    let stripped = strip_code_fences(content);
    serde_json::from_str(stripped).map_err(|e| ResumeError::ResponseParse(e.to_string()))
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag after the opening fence
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .trim_end_matches('`')
        .trim()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
