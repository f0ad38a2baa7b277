//! Tunable parameters.
//!
//! Per-concern parameter structs with defaults, aggregated into one
//! [`EngineConfig`] that the caller constructs explicitly and hands to
//! the engine — no module-level globals.

use serde::{Deserialize, Serialize};

/// Parameters of the proficiency update rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateParams {
    /// Base magnitude of a normal update step.
    pub update_strength: f64,
    /// Scale applied when the responding student was not the primary
    /// actor (a weaker, shared update).
    pub group_update_coefficient: f64,
    /// Value assigned on the first observed correct answer.
    pub initial_correct: f64,
    /// Value assigned on the first observed incorrect answer.
    pub initial_incorrect: f64,
    /// Fixed step for the Others family (discussion).
    pub discussion_step: f64,
    /// Lower bound of the proficiency range.
    pub min_proficiency: f64,
    /// Upper bound of the proficiency range.
    pub max_proficiency: f64,
}

impl Default for UpdateParams {
    fn default() -> Self {
        Self {
            update_strength: 1.0,
            group_update_coefficient: 0.25,
            initial_correct: 7.5,
            initial_incorrect: 2.5,
            discussion_step: 0.5,
            min_proficiency: 1.0,
            max_proficiency: 10.0,
        }
    }
}

impl UpdateParams {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_proficiency, self.max_proficiency)
    }
}

/// Parameters of sub-type selection and difficulty blending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionParams {
    /// Difficulty handed out while a sub-type is still unexplored.
    pub default_difficulty: f64,
    /// Weight of the domain average against the per-sub-type
    /// proficiency (which always weighs 1) in the difficulty blend.
    pub average_weighting: f64,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            default_difficulty: 5.0,
            average_weighting: 0.5,
        }
    }
}

/// Parameters of path override construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathParams {
    /// Proficiency delta applied per sub-type by the blanket
    /// raise-all / lower-all paths (sign chosen by the path).
    pub blanket_shift: f64,
    /// Probability mass a focus path adds to its target sub-type.
    pub focus_boost: f64,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            blanket_shift: 0.1,
            focus_boost: 1.0,
        }
    }
}

/// Aggregate engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub update: UpdateParams,
    pub selection: SelectionParams,
    pub paths: PathParams,
    /// Seed for the engine RNG; `None` draws one from entropy.
    /// Fixing the seed makes every selection reproducible.
    pub seed: Option<u64>,
}
