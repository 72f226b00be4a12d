//! Per-session AI configuration — merges a preset profile with ad-hoc
//! directive overrides into the effective instruction set attached to each
//! generation request.
//!
//! One `ConfigManager` is scoped per caller session (in the HTTP layer: per
//! request). Instances are never shared across unrelated sessions; handlers
//! construct a fresh one for every inbound call.

#![allow(dead_code)]

pub mod profiles;

use std::collections::BTreeMap;

use crate::session::profiles::resolve_profile;

/// The merged mapping of instruction keys to directive text attached to one
/// outgoing generation request.
pub type InstructionSet = BTreeMap<String, String>;

/// Builds the effective instruction set for one session.
///
/// Two logical states: `Empty` (fresh or post-reset) and `Configured`
/// (after `select_profile` or `inject`). Overrides follow last-write-wins:
/// a later `inject` silently replaces an earlier value under the same key.
#[derive(Debug, Default)]
pub struct ConfigManager {
    instructions: InstructionSet,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current instruction set with a fresh copy of the named
    /// preset profile, discarding any prior overrides. Unknown names fall
    /// back to the `professional` profile.
    pub fn select_profile(&mut self, name: &str) {
        let profile = resolve_profile(name);
        self.instructions = profile
            .directives
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
    }

    /// Stores `directive` under `custom_<key>`, overwriting silently if the
    /// key is already present. The key is used verbatim — no sanitization.
    pub fn inject(&mut self, key: &str, directive: &str) {
        self.instructions
            .insert(format!("custom_{key}"), directive.to_string());
    }

    /// Clears the instruction set to empty, independent of any profile.
    pub fn reset(&mut self) {
        self.instructions.clear();
    }

    /// Read-only view of the effective instruction set.
    pub fn current_instructions(&self) -> &InstructionSet {
        &self.instructions
    }
}
