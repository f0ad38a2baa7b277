//! Sub-type selection.
//!
//! Unexplored sub-types always win: as long as a candidate has no known
//! proficiency, one of them is drawn uniformly and handed the default
//! difficulty, so every sub-type is sampled at least once before
//! probability-weighted exploitation begins. Once everything is known,
//! each candidate gets the unnormalized weight `110 - x^2` of its
//! proficiency `x` — strictly decreasing over [1, 10], so weaker
//! sub-types surface more often — and active paths then reshape the
//! normalized distribution before the draw.

use std::collections::BTreeMap;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SelectionParams;
use crate::error::EngineError;
use crate::paths::PathOverride;
use crate::types::SubType;

/// Offset of the weighting function `w(x) = 110 - x^2`. Positive over
/// the whole proficiency range (109 at x = 1 down to 10 at x = 10).
const WEIGHT_OFFSET: f64 = 110.0;

/// Proficiency range bounds used when paths adjust the drawn value.
const PROFICIENCY_MIN: f64 = 1.0;
const PROFICIENCY_MAX: f64 = 10.0;

/// Unnormalized selection weight of a known proficiency.
pub fn probability_weight(proficiency: f64) -> f64 {
    WEIGHT_OFFSET - proficiency * proficiency
}

/// Outcome of one selection: the sub-type to practice next and the
/// difficulty to request from the content repository, on the continuous
/// 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub sub_type: SubType,
    pub difficulty: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SubTypeSelector {
    params: SelectionParams,
}

impl SubTypeSelector {
    pub fn new(params: SelectionParams) -> Self {
        Self { params }
    }

    /// Picks the next sub-type from `candidates` and computes its
    /// difficulty.
    ///
    /// `candidates` maps every selectable sub-type to its proficiency
    /// (`None` = unknown); `domain_average` is the family average used
    /// for difficulty blending; `paths` are the student's active
    /// overrides, applied only in the exploitation branch.
    pub fn select<R: Rng>(
        &self,
        candidates: &BTreeMap<SubType, Option<f64>>,
        domain_average: f64,
        paths: &[PathOverride],
        rng: &mut R,
    ) -> Result<Selection, EngineError> {
        let mut unknown = Vec::new();
        let mut known = Vec::new();
        for (sub_type, proficiency) in candidates {
            match proficiency {
                Some(p) => known.push((*sub_type, *p)),
                None => unknown.push(*sub_type),
            }
        }

        // Unexplored sub-types take precedence; known values and paths
        // are not consulted here.
        if let Some(sub_type) = unknown.choose(rng) {
            return Ok(Selection {
                sub_type: *sub_type,
                difficulty: self.params.default_difficulty,
            });
        }

        if known.is_empty() {
            return Err(EngineError::EmptyCandidateSet);
        }

        self.select_known(&known, domain_average, paths, rng)
    }

    fn select_known<R: Rng>(
        &self,
        known: &[(SubType, f64)],
        domain_average: f64,
        paths: &[PathOverride],
        rng: &mut R,
    ) -> Result<Selection, EngineError> {
        let distribution = selection_distribution(known, paths);

        let weights: Vec<f64> = known
            .iter()
            .map(|(sub_type, _)| distribution.get(sub_type).copied().unwrap_or(0.0))
            .collect();
        let index = WeightedIndex::new(&weights)
            .map_err(|_| EngineError::DegenerateDistribution)?
            .sample(rng);
        let (sub_type, drawn_proficiency) = known[index];

        // Paths shift the drawn proficiency before difficulty blending;
        // the stored value is untouched.
        let delta: f64 = paths.iter().map(|p| p.proficiency_delta(sub_type)).sum();
        let adjusted = (drawn_proficiency + delta).clamp(PROFICIENCY_MIN, PROFICIENCY_MAX);

        let difficulty = (adjusted + domain_average * self.params.average_weighting)
            / (1.0 + self.params.average_weighting);

        tracing::debug!(sub_type = ?sub_type, difficulty, "selected sub-type");

        Ok(Selection {
            sub_type,
            difficulty,
        })
    }
}

/// The normalized selection distribution over `known` after applying
/// `paths`.
///
/// Additive adjustments run first, replacement (`set_prob`) overrides
/// last, so a fixed probability always wins over accumulated deltas.
/// After each adjusted entry the rest of the vector is rescaled by
/// `(1 - old) / (1 - new)` to keep the total at 1 — unless the new value
/// reaches 1, which saturates the distribution to that single sub-type.
/// Sub-types a path mentions but the candidate list lacks are ignored.
pub fn selection_distribution(
    known: &[(SubType, f64)],
    paths: &[PathOverride],
) -> BTreeMap<SubType, f64> {
    let total: f64 = known.iter().map(|(_, p)| probability_weight(*p)).sum();
    let mut probabilities: BTreeMap<SubType, f64> = known
        .iter()
        .map(|(sub_type, p)| (*sub_type, probability_weight(*p) / total))
        .collect();

    if !paths.is_empty() {
        for path in paths.iter().filter(|p| !p.set_prob()) {
            apply_path(&mut probabilities, path);
        }
        for path in paths.iter().filter(|p| p.set_prob()) {
            apply_path(&mut probabilities, path);
        }
    }

    probabilities
}

fn apply_path(probabilities: &mut BTreeMap<SubType, f64>, path: &PathOverride) {
    for (sub_type, adjustment) in path.probability_adjustments() {
        let old = match probabilities.get(sub_type) {
            Some(p) => *p,
            None => continue,
        };
        let new = if path.set_prob() {
            *adjustment
        } else {
            old + *adjustment
        };
        renormalize(probabilities, *sub_type, old, new);
    }
}

fn renormalize(probabilities: &mut BTreeMap<SubType, f64>, changed: SubType, old: f64, new: f64) {
    if new < 1.0 {
        let norm = (1.0 - old) / (1.0 - new);
        for (sub_type, probability) in probabilities.iter_mut() {
            if *sub_type == changed {
                *probability = new;
            } else {
                *probability /= norm;
            }
        }
    } else {
        // Probability saturation: the override claims all the mass.
        for (sub_type, probability) in probabilities.iter_mut() {
            *probability = if *sub_type == changed { 1.0 } else { 0.0 };
        }
    }
}
