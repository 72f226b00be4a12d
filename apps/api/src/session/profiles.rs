//! Preset instruction profiles — named bundles of AI directives, one per
//! career tier. Pure static data, defined at process start and never mutated.

/// A named, immutable bundle of instruction directives.
#[derive(Debug, Clone, Copy)]
pub struct InstructionProfile {
    pub name: &'static str,
    pub directives: &'static [(&'static str, &'static str)],
}

pub const ENTRY_LEVEL: InstructionProfile = InstructionProfile {
    name: "entry-level",
    directives: &[
        ("customization_level", "entry"),
        ("custom_tone", "Emphasize potential and eagerness to learn"),
        (
            "custom_formatting",
            "Use a clean, modern layout suitable for recent graduates",
        ),
    ],
};

pub const PROFESSIONAL: InstructionProfile = InstructionProfile {
    name: "professional",
    directives: &[
        ("customization_level", "professional"),
        (
            "custom_achievements",
            "Highlight quantifiable results and career progression",
        ),
        (
            "custom_branding",
            "Create a narrative that shows strategic career development",
        ),
    ],
};

pub const EXECUTIVE: InstructionProfile = InstructionProfile {
    name: "executive",
    directives: &[
        ("customization_level", "executive"),
        (
            "custom_leadership",
            "Demonstrate strategic leadership and organizational impact",
        ),
        (
            "custom_positioning",
            "Position as a thought leader in the industry",
        ),
    ],
};

/// Resolves a profile name to its preset bundle.
///
/// Total function: unknown names default to `professional`. Callers never
/// observe a lookup failure.
pub fn resolve_profile(name: &str) -> &'static InstructionProfile {
    match name {
        "entry-level" => &ENTRY_LEVEL,
        "professional" => &PROFESSIONAL,
        "executive" => &EXECUTIVE,
        _ => &PROFESSIONAL,
    }
}
