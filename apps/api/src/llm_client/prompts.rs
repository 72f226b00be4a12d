//! Prompt composition for the Gemini generator.
//!
//! The generator is a black box reached with a single composed prompt:
//! operation framing + user-supplied content + the effective instruction set.
//! Injected directives (`custom_*` keys) are rendered as labelled instruction
//! blocks appended to the template.

use crate::llm_client::GeneratorRequest;
use crate::session::InstructionSet;

/// System framing per experience context.
#[derive(Debug)]
pub struct SystemContext {
    pub name: &'static str,
    pub base_instruction: &'static str,
    pub tone: &'static str,
    pub formatting_guidelines: &'static str,
}

pub const PROFESSIONAL_CONTEXT: SystemContext = SystemContext {
    name: "professional",
    base_instruction: "You are a professional resume writer with 20+ years of experience \
        in career development and talent acquisition. Your goal is to create compelling, \
        ATS-optimized resumes that highlight professional achievements and potential.",
    tone: "Formal, professional, achievement-focused",
    formatting_guidelines: "Use clean, modern resume formatting with clear sections",
};

pub const ENTRY_LEVEL_CONTEXT: SystemContext = SystemContext {
    name: "entry_level",
    base_instruction: "You are a career coach specializing in helping early-career \
        professionals create impactful resumes. Focus on potential, academic achievements, \
        and transferable skills.",
    tone: "Encouraging, potential-driven, optimistic",
    formatting_guidelines: "Use a clean, contemporary layout that emphasizes education and potential",
};

pub const EXECUTIVE_CONTEXT: SystemContext = SystemContext {
    name: "executive",
    base_instruction: "You are a high-level executive recruitment specialist \
        crafting strategic, leadership-oriented resumes for C-suite and senior management roles.",
    tone: "Strategic, authoritative, impact-driven",
    formatting_guidelines: "Use a sophisticated, executive-level resume format",
};

/// Resume generation prompt template.
/// Replace: {system_instruction}, {tone}, {formatting_guidelines},
///          {full_name}, {industry}, {experience_level}, {skills}, {summary}
const GENERATION_PROMPT_TEMPLATE: &str = r#"{system_instruction}

Tone: {tone}
Formatting Guidelines: {formatting_guidelines}

User Details:
- Name: {full_name}
- Industry: {industry}
- Experience Level: {experience_level}
- Key Skills: {skills}

Professional Summary:
{summary}

Create a complete, ready-to-use resume for this candidate."#;

/// Resume optimization prompt template.
/// Replace: {resume_content}, {job_description}, {tone}, {context}
const OPTIMIZATION_PROMPT_TEMPLATE: &str = r#"Optimize the following resume for the given job description:

Existing Resume:
{resume_content}

Job Description:
{job_description}

Optimization Instructions:
- Tone: {tone}
- Context: {context}
- Align keywords with the job description and strengthen achievement statements."#;

/// Maps the effective instruction set to a system context.
///
/// `customization_level` comes from the selected preset; when absent, the
/// caller's experience level decides. Both default to professional.
pub fn resolve_context(instructions: &InstructionSet, experience_level: &str) -> &'static SystemContext {
    let level = instructions
        .get("customization_level")
        .map(String::as_str)
        .unwrap_or(experience_level);

    match level {
        "entry" => &ENTRY_LEVEL_CONTEXT,
        "executive" => &EXECUTIVE_CONTEXT,
        "professional" | "mid" | "senior" => &PROFESSIONAL_CONTEXT,
        _ => &PROFESSIONAL_CONTEXT,
    }
}

/// Composes the full prompt for one generator request.
pub fn compose_prompt(request: &GeneratorRequest) -> String {
    match request {
        GeneratorRequest::Generate {
            profile,
            custom_instructions,
        } => {
            let context = resolve_context(custom_instructions, &profile.experience_level);
            let tone = custom_instructions
                .get("custom_tone")
                .map(String::as_str)
                .unwrap_or(context.tone);

            let prompt = GENERATION_PROMPT_TEMPLATE
                .replace("{system_instruction}", context.base_instruction)
                .replace("{tone}", tone)
                .replace("{formatting_guidelines}", context.formatting_guidelines)
                .replace("{full_name}", &profile.full_name)
                .replace("{industry}", &profile.industry)
                .replace("{experience_level}", &profile.experience_level)
                .replace("{skills}", &profile.skills)
                .replace("{summary}", &profile.summary);

            append_custom_block(prompt, custom_instructions)
        }
        GeneratorRequest::Optimize {
            resume_content,
            job_description,
            custom_instructions,
        } => {
            let context = resolve_context(custom_instructions, "");
            let tone = custom_instructions
                .get("custom_tone")
                .map(String::as_str)
                .unwrap_or(context.tone);

            let prompt = OPTIMIZATION_PROMPT_TEMPLATE
                .replace("{resume_content}", resume_content)
                .replace("{job_description}", job_description)
                .replace("{tone}", tone)
                .replace("{context}", context.name);

            append_custom_block(prompt, custom_instructions)
        }
    }
}

/// Appends one labelled block per injected `custom_*` directive.
fn append_custom_block(mut prompt: String, instructions: &InstructionSet) -> String {
    for (key, directive) in instructions {
        if let Some(name) = key.strip_prefix("custom_") {
            prompt.push_str("\n\nCustom Instruction - ");
            prompt.push_str(&title_case(name));
            prompt.push_str(":\n");
            prompt.push_str(directive);
        }
    }
    prompt
}

/// "max_tokens" -> "Max Tokens"
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
