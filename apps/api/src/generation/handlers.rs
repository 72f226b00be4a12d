//! Axum route handlers for the Generation API.
//!
//! Handlers are the single translation point from generation outcomes to
//! transport responses: a `Failure` becomes a 500 with its reason, never a
//! propagated error. Each request gets its own configuration session.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::errors::AppError;
use crate::generation::client::{self, Outcome};
use crate::llm_client::ProfileData;
use crate::session::ConfigManager;
use crate::state::AppState;

const DEFAULT_PROFILE: &str = "professional";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    #[serde(flatten)]
    pub profile_data: ProfileData,
    /// Preset profile to start the session from. Unknown names fall back to
    /// `professional`.
    pub profile: Option<String>,
    /// Ad-hoc directive overrides, keyed by bare name (stored as `custom_<key>`).
    #[serde(default)]
    pub custom_instructions: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeResumeRequest {
    #[serde(alias = "existingResume")]
    #[serde(default)]
    pub resume_content: String,
    #[serde(alias = "jobDescription")]
    #[serde(default)]
    pub job_description: String,
    pub email: Option<String>,
    pub profile: Option<String>,
    #[serde(default)]
    pub custom_instructions: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub status: &'static str,
    pub resume_content: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResumeResponse {
    pub status: &'static str,
    pub optimized_resume: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-resume
///
/// Validates the structured profile fields, builds the effective instruction
/// set for this request, and delegates to the generation client.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    validate_required(&[
        ("full_name", &request.profile_data.full_name),
        ("email", &request.profile_data.email),
        ("industry", &request.profile_data.industry),
        ("experience_level", &request.profile_data.experience_level),
    ])?;

    let session = build_session(request.profile.as_deref(), &request.custom_instructions);

    info!(
        "Generating resume for {} ({})",
        request.profile_data.email, request.profile_data.industry
    );

    let email = request.profile_data.email.clone();
    let outcome = client::generate(
        state.generator.as_ref(),
        request.profile_data,
        session.current_instructions(),
    )
    .await;

    match outcome {
        Outcome::Success { content } => {
            state.dashboard.log_resume_generation(&email);
            Ok(Json(GenerateResumeResponse {
                status: "success",
                resume_content: content,
            }))
        }
        Outcome::Failure { reason } => Err(AppError::Generation(reason)),
    }
}

/// POST /optimize-resume
///
/// Optimizes an existing resume against a target job description.
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    Json(request): Json<OptimizeResumeRequest>,
) -> Result<Json<OptimizeResumeResponse>, AppError> {
    if request.resume_content.trim().is_empty() {
        return Err(AppError::Validation("Missing resume content".to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation("Missing job description".to_string()));
    }

    let session = build_session(request.profile.as_deref(), &request.custom_instructions);
    let user_id = request.email.as_deref().unwrap_or("unknown").to_string();

    let outcome = client::optimize(
        state.generator.as_ref(),
        request.resume_content,
        request.job_description,
        session.current_instructions(),
    )
    .await;

    match outcome {
        Outcome::Success { content } => {
            state.dashboard.log_resume_optimization(&user_id);
            Ok(Json(OptimizeResumeResponse {
                status: "success",
                optimized_resume: content,
            }))
        }
        Outcome::Failure { reason } => Err(AppError::Generation(reason)),
    }
}

/// Scopes one configuration session to this request: preset first, then the
/// caller's overrides in order (last write wins).
fn build_session(profile: Option<&str>, overrides: &BTreeMap<String, String>) -> ConfigManager {
    let mut session = ConfigManager::new();
    session.select_profile(profile.unwrap_or(DEFAULT_PROFILE));
    for (key, directive) in overrides {
        session.inject(key, directive);
    }
    session
}

fn validate_required(fields: &[(&str, &str)]) -> Result<(), AppError> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required field: {name}"
            )));
        }
    }
    Ok(())
}
