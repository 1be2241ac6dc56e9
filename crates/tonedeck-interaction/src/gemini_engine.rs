//! GeminiToneEngine - Direct REST API implementation of the engine seam.
//!
//! Calls the Gemini generateContent endpoint with a system instruction
//! that demands a strict-JSON analysis record, and parses the reply.

use crate::engine::{EngineError, ToneEngine};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tonedeck_core::config::{EngineMode, EngineSettings};
use tonedeck_core::AnalysisResult;
use tracing::debug;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Engine implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiToneEngine {
    client: Client,
    api_key: String,
    model: String,
    respond: bool,
}

impl GeminiToneEngine {
    /// Creates a new engine from a credential and settings.
    ///
    /// Construction validates the settings and builds the HTTP client; it
    /// does not call the network. A bad credential surfaces on the first
    /// `run`.
    pub fn new(
        api_key: impl Into<String>,
        settings: &EngineSettings,
    ) -> Result<Self, EngineError> {
        match settings.mode {
            EngineMode::Gemini => {}
        }

        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|err| EngineError::Construction(format!("HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: settings.model.clone(),
            respond: settings.respond,
        })
    }

    fn system_instruction(&self) -> String {
        let mut instruction = String::from(
            "You are an emotion-analysis engine. For the user's text, reply with a single JSON object and nothing else. \
             Fields: \"input_tags\" maps detected emotion labels (snake_case) to intensity scores between 0 and 1; \
             \"response_tags\" maps personality-trait labels (snake_case) describing how a reply should sound to true; \
             \"final_prompt\" is one paragraph of instruction text telling an assistant how to answer in that tone.",
        );
        if self.respond {
            instruction.push_str(
                " \"response_text\" is the reply itself, written in exactly that tone.",
            );
        } else {
            instruction.push_str(" Omit the \"response_text\" field.");
        }
        instruction.push_str(" Do not wrap the JSON in markdown fences.");
        instruction
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, EngineError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    EngineError::Process {
                        status_code: None,
                        message: format!("Gemini API request timed out: {err}"),
                        is_retryable: true,
                    }
                } else {
                    EngineError::Process {
                        status_code: None,
                        message: format!("Gemini API request failed: {err}"),
                        is_retryable: err.is_connect(),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            EngineError::InvalidResponse(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ToneEngine for GeminiToneEngine {
    fn describe(&self) -> &str {
        "Gemini API engine for emotion tagging and response generation"
    }

    async fn run(&self, input: &str) -> Result<AnalysisResult, EngineError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: input.to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: "system".to_string(),
                parts: vec![Part {
                    text: self.system_instruction(),
                }],
            }),
        };

        let text = self.send_request(&request).await?;
        debug!(model = %self.model, chars = text.len(), "gemini reply received");
        parse_analysis(&text)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, EngineError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            EngineError::InvalidResponse(
                "Gemini API returned no text in the response candidates".into(),
            )
        })
}

/// Parses the engine's textual reply into an [`AnalysisResult`].
///
/// The instruction forbids markdown fences, but models add them anyway;
/// a fenced JSON body is accepted.
fn parse_analysis(text: &str) -> Result<AnalysisResult, EngineError> {
    let body = strip_fences(text);
    serde_json::from_str(body).map_err(|err| {
        EngineError::InvalidResponse(format!("Gemini reply is not a valid analysis record: {err}"))
    })
}

fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn map_http_error(status: StatusCode, body: String) -> EngineError {
    let (status_text, message) = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            (
                wrapper.error.status.unwrap_or_default(),
                wrapper.error.message.unwrap_or_else(|| body.clone()),
            )
        })
        .unwrap_or_else(|_| (String::new(), body.clone()));

    if status == StatusCode::TOO_MANY_REQUESTS || status_text == "RESOURCE_EXHAUSTED" {
        return EngineError::ResourceExhausted(message);
    }

    let is_retryable = matches!(
        status,
        StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    let message = if status_text.is_empty() {
        message
    } else {
        format!("{status_text}: {message}")
    };

    EngineError::Process {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
    }
}
