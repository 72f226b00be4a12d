//! LLM Client — the single point of entry for all Gemini API calls in ResumeAI.
//!
//! ARCHITECTURAL RULE: No other module may call the Generative Language API
//! directly. All generator interactions MUST go through the `TextGenerator`
//! trait, so handlers and the generation client stay stubbable in tests.
//!
//! Model: gemini-pro (hardcoded — do not make configurable to prevent drift)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::session::InstructionSet;

pub mod prompts;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generator calls in ResumeAI.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-pro";

const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Output lengths the caller may request via `custom_max_tokens`.
const TOKEN_OPTIONS: [u32; 4] = [500, 1000, 1500, 2000];

/// Body-level status value signalling a successful generation.
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("connection failed: {0}")]
    Connection(String),
}

/// Structured profile fields supplied by the caller for a creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub summary: String,
}

/// One request toward the external generator: the operation-specific fields
/// plus the caller's effective instruction set, carried verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum GeneratorRequest {
    Generate {
        #[serde(flatten)]
        profile: ProfileData,
        custom_instructions: InstructionSet,
    },
    Optimize {
        resume_content: String,
        job_description: String,
        custom_instructions: InstructionSet,
    },
}

impl GeneratorRequest {
    pub fn instructions(&self) -> &InstructionSet {
        match self {
            GeneratorRequest::Generate {
                custom_instructions,
                ..
            }
            | GeneratorRequest::Optimize {
                custom_instructions,
                ..
            } => custom_instructions,
        }
    }
}

/// Parsed body of a generator reply. `status` is the body's own success
/// indicator, distinct from the transport-level `ok` flag on [`GeneratorReply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyBody {
    #[serde(default)]
    pub status: String,
    pub resume_content: Option<String>,
    pub optimized_resume: Option<String>,
    pub error: Option<String>,
}

/// Outcome of one transport round-trip to the generator.
#[derive(Debug, Clone)]
pub struct GeneratorReply {
    /// Transport-level success. When false, `body` carries no usable content.
    pub ok: bool,
    pub body: ReplyBody,
}

/// The black-box text-completion collaborator. The concrete protocol behind
/// this seam (model, auth, prompt template) is deployment configuration.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Makes exactly one call to the generator. `Err` means the call itself
    /// could not complete (connection problem); a reply with `ok == false`
    /// means the generator answered but did not succeed.
    async fn complete(&self, request: &GeneratorRequest) -> Result<GeneratorReply, GeneratorError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Extracts the text of the first candidate part, if any.
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

/// Tuning knobs parsed from the effective instruction set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Reads tuning directives out of the instruction set.
///
/// `custom_creativity` is clamped to [0, 1]; `custom_max_tokens` must be one
/// of the allowed output lengths. Unparseable values keep the defaults.
pub fn generation_settings(instructions: &InstructionSet) -> GenerationSettings {
    let mut settings = GenerationSettings::default();

    if let Some(value) = instructions.get("custom_creativity") {
        if let Ok(creativity) = value.trim().parse::<f32>() {
            settings.temperature = creativity.clamp(0.0, 1.0);
        }
    }

    if let Some(value) = instructions.get("custom_max_tokens") {
        if let Ok(tokens) = value.trim().parse::<u32>() {
            if TOKEN_OPTIONS.contains(&tokens) {
                settings.max_output_tokens = tokens;
            }
        }
    }

    settings
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// The production `TextGenerator` backed by the Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    fn reply_body(request: &GeneratorRequest, text: String) -> ReplyBody {
        match request {
            GeneratorRequest::Generate { .. } => ReplyBody {
                status: STATUS_SUCCESS.to_string(),
                resume_content: Some(text),
                ..Default::default()
            },
            GeneratorRequest::Optimize { .. } => ReplyBody {
                status: STATUS_SUCCESS.to_string(),
                optimized_resume: Some(text),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn complete(&self, request: &GeneratorRequest) -> Result<GeneratorReply, GeneratorError> {
        let prompt = prompts::compose_prompt(request);
        let settings = generation_settings(request.instructions());

        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: settings.max_output_tokens,
                temperature: settings.temperature,
            },
        };

        let url = format!("{GEMINI_API_URL}/{MODEL}:generateContent?key={}", self.api_key);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generator API returned {status}: {body}");
            return Ok(GeneratorReply {
                ok: false,
                body: ReplyBody::default(),
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        match gemini_response.text() {
            Some(text) => {
                debug!("Generator call succeeded: {} chars", text.len());
                Ok(GeneratorReply {
                    ok: true,
                    body: Self::reply_body(request, text),
                })
            }
            None => {
                warn!("Generator returned no candidate text");
                Ok(GeneratorReply {
                    ok: true,
                    body: ReplyBody {
                        status: STATUS_ERROR.to_string(),
                        error: Some("Generator returned empty content".to_string()),
                        ..Default::default()
                    },
                })
            }
        }
    }
}
