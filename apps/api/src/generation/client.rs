//! Generation client — combines caller content with the effective instruction
//! set, makes exactly one call to the external generator, and normalizes the
//! result into a two-variant outcome.
//!
//! No retries at this layer: each invocation surfaces the outcome of a single
//! external call. Backoff policy, if ever wanted, belongs outside the core.

use tracing::info;

use crate::llm_client::{
    GeneratorRequest, ProfileData, ReplyBody, TextGenerator, STATUS_SUCCESS,
};
use crate::session::InstructionSet;

/// Generic failure reasons. Transport-internal detail is deliberately not
/// leaked through these; only transport *faults* carry their own message.
pub const GENERATION_FAILED: &str = "Resume generation failed";
pub const OPTIMIZATION_FAILED: &str = "Resume optimization failed";

/// The two-variant result of one generation or optimization attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { content: String },
    Failure { reason: String },
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Generate,
    Optimize,
}

impl Operation {
    fn generic_reason(self) -> &'static str {
        match self {
            Operation::Generate => GENERATION_FAILED,
            Operation::Optimize => OPTIMIZATION_FAILED,
        }
    }

    /// The body field carrying generated text for this operation.
    fn content_of(self, body: ReplyBody) -> Option<String> {
        match self {
            Operation::Generate => body.resume_content,
            Operation::Optimize => body.optimized_resume,
        }
    }
}

/// Generates a resume from structured profile data.
pub async fn generate(
    generator: &dyn TextGenerator,
    profile: ProfileData,
    instructions: &InstructionSet,
) -> Outcome {
    let request = GeneratorRequest::Generate {
        profile,
        custom_instructions: instructions.clone(),
    };
    run(generator, request, Operation::Generate).await
}

/// Optimizes an existing resume against a target job description.
pub async fn optimize(
    generator: &dyn TextGenerator,
    resume_content: String,
    job_description: String,
    instructions: &InstructionSet,
) -> Outcome {
    let request = GeneratorRequest::Optimize {
        resume_content,
        job_description,
        custom_instructions: instructions.clone(),
    };
    run(generator, request, Operation::Optimize).await
}

async fn run(generator: &dyn TextGenerator, request: GeneratorRequest, op: Operation) -> Outcome {
    // Transport fault: the call itself could not complete. Kept distinct from
    // a non-success reply — the fault's own message becomes the reason.
    let reply = match generator.complete(&request).await {
        Ok(reply) => reply,
        Err(fault) => {
            return Outcome::Failure {
                reason: fault.to_string(),
            }
        }
    };

    if !reply.ok {
        return Outcome::Failure {
            reason: op.generic_reason().to_string(),
        };
    }

    if reply.body.status != STATUS_SUCCESS {
        let reason = reply
            .body
            .error
            .unwrap_or_else(|| op.generic_reason().to_string());
        return Outcome::Failure { reason };
    }

    match op.content_of(reply.body) {
        Some(content) => {
            info!("Generator returned {} chars", content.len());
            Outcome::Success { content }
        }
        // Success status without the operation's content field is an
        // upstream contract violation.
        None => Outcome::Failure {
            reason: op.generic_reason().to_string(),
        },
    }
}
