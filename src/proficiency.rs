//! Per-student proficiency state.
//!
//! One [`ProficiencyModel`] per student. Each sub-type family keeps its
//! own map of `SubType -> Option<f64>`, where `None` means the sub-type
//! has never been observed. Known values live in [1, 10]; updates
//! saturate at the range bounds. The grammar and vocabulary averages are
//! derived scalars over the *known* values of the respective map and
//! start at the cold-start default of 5 until the first observation.

use std::collections::BTreeMap;

use crate::config::UpdateParams;
use crate::types::{Family, Grammar, Others, SubType, Vocabulary};

/// Average reported before any value in a family is known; also the
/// initial discussion proficiency.
pub const COLD_START_AVERAGE: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct ProficiencyModel {
    params: UpdateParams,
    grammar: BTreeMap<SubType, Option<f64>>,
    vocabulary: BTreeMap<SubType, Option<f64>>,
    others: BTreeMap<SubType, Option<f64>>,
    grammar_avg: f64,
    vocab_avg: f64,
}

impl ProficiencyModel {
    /// A brand-new student: every grammar and vocabulary sub-type
    /// unknown, discussion initialized at the cold-start value.
    pub fn new(params: UpdateParams) -> Self {
        let grammar = Grammar::ALL
            .iter()
            .map(|g| (SubType::Grammar(*g), None))
            .collect();
        let vocabulary = Vocabulary::ALL
            .iter()
            .map(|v| (SubType::Vocabulary(*v), None))
            .collect();
        let others = Others::ALL
            .iter()
            .map(|o| (SubType::Others(*o), Some(COLD_START_AVERAGE)))
            .collect();

        Self {
            params,
            grammar,
            vocabulary,
            others,
            grammar_avg: COLD_START_AVERAGE,
            vocab_avg: COLD_START_AVERAGE,
        }
    }

    /// Rebuilds a model from persisted values. Sub-types missing from
    /// `values` stay unknown (discussion included); averages are
    /// recomputed once.
    pub fn from_values<I>(params: UpdateParams, values: I) -> Self
    where
        I: IntoIterator<Item = (SubType, Option<f64>)>,
    {
        let mut model = Self::new(params);
        for slot in model.others.values_mut() {
            *slot = None;
        }
        for (sub_type, value) in values {
            let map = model.family_map_mut(sub_type.family());
            map.insert(sub_type, value);
        }
        model.refresh_averages();
        model
    }

    /// Current proficiency of a sub-type; `None` while unobserved.
    pub fn get(&self, sub_type: SubType) -> Option<f64> {
        self.family_map(sub_type.family())
            .get(&sub_type)
            .copied()
            .flatten()
    }

    /// The selector's candidate map for one family.
    pub fn candidates(&self, family: Family) -> &BTreeMap<SubType, Option<f64>> {
        self.family_map(family)
    }

    pub fn grammar_average(&self) -> f64 {
        self.grammar_avg
    }

    pub fn vocab_average(&self) -> f64 {
        self.vocab_avg
    }

    pub fn discussion(&self) -> Option<f64> {
        self.get(SubType::Others(Others::Discussion))
    }

    /// Domain average used for difficulty blending. Grammar and
    /// vocabulary report their derived scalars; the Other family has no
    /// tracked scalar and reports the mean of its known values.
    pub fn average(&self, family: Family) -> f64 {
        match family {
            Family::Grammar => self.grammar_avg,
            Family::Vocabulary => self.vocab_avg,
            Family::Other => known_mean(&self.others).unwrap_or(COLD_START_AVERAGE),
        }
    }

    /// Applies the outcome of one task to one sub-type.
    ///
    /// Grammar and vocabulary follow the stepped rule: the first
    /// observation jumps to a fixed prior (7.5 correct / 2.5 incorrect),
    /// later observations move by `update_strength` (scaled down for
    /// group updates), saturating at the range bounds. The Other family
    /// moves by the fixed discussion step with no first-observation
    /// branch and skips silently while unknown.
    ///
    /// Averages are not refreshed here; [`update_many`] does that, or
    /// call [`refresh_averages`] after direct single updates.
    ///
    /// [`update_many`]: Self::update_many
    /// [`refresh_averages`]: Self::refresh_averages
    pub fn update_one(&mut self, sub_type: SubType, correct: bool, group_update: bool) {
        if sub_type.family() == Family::Other {
            self.update_other(sub_type, correct);
            return;
        }

        let initial_correct = self.params.initial_correct;
        let initial_incorrect = self.params.initial_incorrect;
        let step = if group_update {
            self.params.update_strength * self.params.group_update_coefficient
        } else {
            self.params.update_strength
        };
        let (lo, hi) = (self.params.min_proficiency, self.params.max_proficiency);

        let map = self.family_map_mut(sub_type.family());
        if let Some(slot) = map.get_mut(&sub_type) {
            let next = match *slot {
                None => {
                    if correct {
                        initial_correct
                    } else {
                        initial_incorrect
                    }
                }
                Some(current) => {
                    if correct {
                        current + step
                    } else {
                        current - step
                    }
                }
            };
            *slot = Some(next.clamp(lo, hi));
        }
    }

    /// Applies one outcome to every listed sub-type, then refreshes the
    /// family averages.
    pub fn update_many(&mut self, sub_types: &[SubType], correct: bool, group_update: bool) {
        for sub_type in sub_types {
            self.update_one(*sub_type, correct, group_update);
        }
        self.refresh_averages();
    }

    /// Recomputes the grammar and vocabulary averages over known values.
    /// A family with zero known values keeps its previous average.
    pub fn refresh_averages(&mut self) {
        if let Some(mean) = known_mean(&self.grammar) {
            self.grammar_avg = mean;
        }
        if let Some(mean) = known_mean(&self.vocabulary) {
            self.vocab_avg = mean;
        }
    }

    /// Every tracked sub-type with its current value, unknowns included.
    /// This is the full-overwrite snapshot the persistence service
    /// expects.
    pub fn entries(&self) -> impl Iterator<Item = (SubType, Option<f64>)> + '_ {
        self.grammar
            .iter()
            .chain(self.vocabulary.iter())
            .chain(self.others.iter())
            .map(|(sub_type, value)| (*sub_type, *value))
    }

    fn update_other(&mut self, sub_type: SubType, correct: bool) {
        let step = self.params.discussion_step;
        let (lo, hi) = (self.params.min_proficiency, self.params.max_proficiency);
        if let Some(slot) = self.others.get_mut(&sub_type) {
            if let Some(current) = *slot {
                let next = if correct { current + step } else { current - step };
                *slot = Some(next.clamp(lo, hi));
            }
        }
    }

    fn family_map(&self, family: Family) -> &BTreeMap<SubType, Option<f64>> {
        match family {
            Family::Grammar => &self.grammar,
            Family::Vocabulary => &self.vocabulary,
            Family::Other => &self.others,
        }
    }

    fn family_map_mut(&mut self, family: Family) -> &mut BTreeMap<SubType, Option<f64>> {
        match family {
            Family::Grammar => &mut self.grammar,
            Family::Vocabulary => &mut self.vocabulary,
            Family::Other => &mut self.others,
        }
    }
}

impl Default for ProficiencyModel {
    fn default() -> Self {
        Self::new(UpdateParams::default())
    }
}

fn known_mean(map: &BTreeMap<SubType, Option<f64>>) -> Option<f64> {
    let known: Vec<f64> = map.values().filter_map(|v| *v).collect();
    if known.is_empty() {
        return None;
    }
    Some(known.iter().sum::<f64>() / known.len() as f64)
}
