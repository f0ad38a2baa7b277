//! Learning paths.
//!
//! A path is a personalization override a student picks for the
//! upcoming task segment. The two blanket paths shift every grammar and
//! vocabulary proficiency by a small delta; a focus path boosts the
//! selection probability of one target sub-type. The catalog maps path
//! identifiers to their student-facing prompt and, for focus paths, the
//! sub-type they target. Paths are caller-supplied per selection call;
//! the engine never stores them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::PathParams;
use crate::error::EngineError;
use crate::types::{Grammar, SubType, Vocabulary};

/// Identifier of a selectable path. Codes mirror the historical
/// database identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathId {
    None,
    RaiseAll,
    LowerAll,
    OnlyInfinitives,
    OnlyGerunds,
    OnlyNegation,
    OnlyPrepositions,
    OnlyAdverbs,
    OnlySubjunctive,
    OnlyFreeTime,
    OnlyHumanities,
    OnlySociety,
    OnlyNature,
    OnlyAliment,
    OnlyBodySoul,
    OnlyHome,
}

impl PathId {
    pub const ALL: [Self; 16] = [
        Self::None,
        Self::RaiseAll,
        Self::LowerAll,
        Self::OnlyInfinitives,
        Self::OnlyGerunds,
        Self::OnlyNegation,
        Self::OnlyPrepositions,
        Self::OnlyAdverbs,
        Self::OnlySubjunctive,
        Self::OnlyFreeTime,
        Self::OnlyHumanities,
        Self::OnlySociety,
        Self::OnlyNature,
        Self::OnlyAliment,
        Self::OnlyBodySoul,
        Self::OnlyHome,
    ];

    pub fn code(&self) -> u16 {
        match self {
            Self::None => 0,
            Self::RaiseAll => 98,
            Self::LowerAll => 99,
            Self::OnlyInfinitives => 4,
            Self::OnlyGerunds => 6,
            Self::OnlyNegation => 9,
            Self::OnlyPrepositions => 10,
            Self::OnlyAdverbs => 11,
            Self::OnlySubjunctive => 12,
            Self::OnlyFreeTime => 21,
            Self::OnlyHumanities => 22,
            Self::OnlySociety => 23,
            Self::OnlyNature => 24,
            Self::OnlyAliment => 25,
            Self::OnlyBodySoul => 26,
            Self::OnlyHome => 27,
        }
    }

    pub fn from_code(code: u16) -> Result<Self, EngineError> {
        Self::ALL
            .iter()
            .find(|p| p.code() == code)
            .copied()
            .ok_or_else(|| EngineError::PathResolution(format!("unknown path code {code}")))
    }

    /// True for the `Only*` single-sub-type paths.
    pub fn is_focus(&self) -> bool {
        !matches!(self, Self::None | Self::RaiseAll | Self::LowerAll)
    }

    /// The focus path targeting a sub-type, when one exists.
    pub fn focus_for(sub_type: SubType) -> Option<Self> {
        match sub_type {
            SubType::Grammar(Grammar::ToInfinitive) => Some(Self::OnlyInfinitives),
            SubType::Grammar(Grammar::Gerunds) => Some(Self::OnlyGerunds),
            SubType::Grammar(Grammar::Negation) => Some(Self::OnlyNegation),
            SubType::Grammar(Grammar::PrepositionsConjunctions) => Some(Self::OnlyPrepositions),
            SubType::Grammar(Grammar::AdverbsAdjectives) => Some(Self::OnlyAdverbs),
            SubType::Grammar(Grammar::Subjunctive) => Some(Self::OnlySubjunctive),
            SubType::Vocabulary(Vocabulary::FreeTime) => Some(Self::OnlyFreeTime),
            SubType::Vocabulary(Vocabulary::Humanities) => Some(Self::OnlyHumanities),
            SubType::Vocabulary(Vocabulary::Society) => Some(Self::OnlySociety),
            SubType::Vocabulary(Vocabulary::NatureAndScience) => Some(Self::OnlyNature),
            SubType::Vocabulary(Vocabulary::Aliment) => Some(Self::OnlyAliment),
            SubType::Vocabulary(Vocabulary::BodyAndSoul) => Some(Self::OnlyBodySoul),
            SubType::Vocabulary(Vocabulary::HomeAndBuilding) => Some(Self::OnlyHome),
            _ => None,
        }
    }
}

/// One catalog row: prompt shown to the student plus, for focus paths,
/// the targeted sub-type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCatalogEntry {
    pub path: PathId,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SubType>,
}

/// Static path catalog, loaded once. The built-in table covers every
/// [`PathId`]; deployments can replace it from JSON.
#[derive(Debug, Clone)]
pub struct PathCatalog {
    entries: BTreeMap<PathId, PathCatalogEntry>,
}

impl PathCatalog {
    /// Builds a catalog, rejecting focus entries without a target.
    pub fn new(entries: Vec<PathCatalogEntry>) -> Result<Self, EngineError> {
        for entry in &entries {
            if entry.path.is_focus() && entry.target.is_none() {
                return Err(EngineError::PathResolution(format!(
                    "focus path {:?} has no target sub-type",
                    entry.path
                )));
            }
        }
        let entries = entries.into_iter().map(|e| (e.path, e)).collect();
        Ok(Self { entries })
    }

    /// Parses a catalog from its JSON representation (an array of
    /// entries).
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let entries: Vec<PathCatalogEntry> = serde_json::from_str(json)
            .map_err(|e| EngineError::PathResolution(format!("malformed path catalog: {e}")))?;
        Self::new(entries)
    }

    /// The student-facing prompt for a path.
    pub fn prompt(&self, path: PathId) -> Option<&str> {
        self.entries.get(&path).map(|e| e.prompt.as_str())
    }

    /// Prompts for a list of suggested paths, in list order. Paths
    /// missing from the catalog are skipped.
    pub fn prompts_for(&self, paths: &[PathId]) -> Vec<&str> {
        paths.iter().filter_map(|p| self.prompt(*p)).collect()
    }

    /// Resolves a path identifier into its override, with the default
    /// additive probability mode.
    pub fn resolve(&self, path: PathId, params: &PathParams) -> Result<PathOverride, EngineError> {
        self.resolve_with_mode(path, params, false)
    }

    /// Resolves a path identifier, choosing whether a focus path's
    /// probability entry replaces (`set_prob = true`) or adds to the
    /// computed probability.
    pub fn resolve_with_mode(
        &self,
        path: PathId,
        params: &PathParams,
        set_prob: bool,
    ) -> Result<PathOverride, EngineError> {
        let mut over = PathOverride {
            id: path,
            prof_deltas: BTreeMap::new(),
            prob_adjust: BTreeMap::new(),
            set_prob,
        };

        match path {
            PathId::None => {}
            PathId::RaiseAll => over.fill_blanket(params.blanket_shift),
            PathId::LowerAll => over.fill_blanket(-params.blanket_shift),
            _ => {
                let target = self
                    .entries
                    .get(&path)
                    .ok_or_else(|| {
                        EngineError::PathResolution(format!("path {path:?} not in catalog"))
                    })?
                    .target
                    .ok_or_else(|| {
                        EngineError::PathResolution(format!(
                            "focus path {path:?} has no target sub-type"
                        ))
                    })?;
                over.prob_adjust.insert(target, params.focus_boost);
            }
        }

        Ok(over)
    }
}

impl Default for PathCatalog {
    fn default() -> Self {
        let focus = |path: PathId, prompt: &str, target: SubType| PathCatalogEntry {
            path,
            prompt: prompt.to_string(),
            target: Some(target),
        };
        let plain = |path: PathId, prompt: &str| PathCatalogEntry {
            path,
            prompt: prompt.to_string(),
            target: None,
        };

        let entries = vec![
            plain(PathId::None, "Keep everything as it is"),
            plain(PathId::RaiseAll, "Raise the level a little across all topics"),
            plain(PathId::LowerAll, "Lower the level a little across all topics"),
            focus(
                PathId::OnlyInfinitives,
                "Focus on verbs with to + infinitive",
                SubType::Grammar(Grammar::ToInfinitive),
            ),
            focus(
                PathId::OnlyGerunds,
                "Focus on gerunds",
                SubType::Grammar(Grammar::Gerunds),
            ),
            focus(
                PathId::OnlyNegation,
                "Focus on negation",
                SubType::Grammar(Grammar::Negation),
            ),
            focus(
                PathId::OnlyPrepositions,
                "Focus on prepositions and conjunctions",
                SubType::Grammar(Grammar::PrepositionsConjunctions),
            ),
            focus(
                PathId::OnlyAdverbs,
                "Focus on adverbs and adjectives",
                SubType::Grammar(Grammar::AdverbsAdjectives),
            ),
            focus(
                PathId::OnlySubjunctive,
                "Focus on the subjunctive",
                SubType::Grammar(Grammar::Subjunctive),
            ),
            focus(
                PathId::OnlyFreeTime,
                "Practice free-time vocabulary",
                SubType::Vocabulary(Vocabulary::FreeTime),
            ),
            focus(
                PathId::OnlyHumanities,
                "Practice humanities vocabulary",
                SubType::Vocabulary(Vocabulary::Humanities),
            ),
            focus(
                PathId::OnlySociety,
                "Practice society vocabulary",
                SubType::Vocabulary(Vocabulary::Society),
            ),
            focus(
                PathId::OnlyNature,
                "Practice nature and science vocabulary",
                SubType::Vocabulary(Vocabulary::NatureAndScience),
            ),
            focus(
                PathId::OnlyAliment,
                "Practice food and drink vocabulary",
                SubType::Vocabulary(Vocabulary::Aliment),
            ),
            focus(
                PathId::OnlyBodySoul,
                "Practice body and soul vocabulary",
                SubType::Vocabulary(Vocabulary::BodyAndSoul),
            ),
            focus(
                PathId::OnlyHome,
                "Practice home and building vocabulary",
                SubType::Vocabulary(Vocabulary::HomeAndBuilding),
            ),
        ];

        // The built-in table carries a target for every focus path.
        Self::new(entries).expect("built-in catalog is well-formed")
    }
}

/// A resolved path: the adjustments it applies during selection.
///
/// Overrides are caller-supplied per selection call and never persisted;
/// how long a student keeps one (a task, a segment) is the
/// orchestrator's choice.
#[derive(Debug, Clone)]
pub struct PathOverride {
    id: PathId,
    prof_deltas: BTreeMap<SubType, f64>,
    prob_adjust: BTreeMap<SubType, f64>,
    set_prob: bool,
}

impl PathOverride {
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Whether the probability entries replace (`true`) or add to
    /// (`false`) the computed probability.
    pub fn set_prob(&self) -> bool {
        self.set_prob
    }

    pub fn probability_adjustments(&self) -> &BTreeMap<SubType, f64> {
        &self.prob_adjust
    }

    pub fn proficiency_deltas(&self) -> &BTreeMap<SubType, f64> {
        &self.prof_deltas
    }

    /// Signed proficiency delta this path applies to a sub-type
    /// (0 when the path does not mention it).
    pub fn proficiency_delta(&self, sub_type: SubType) -> f64 {
        self.prof_deltas.get(&sub_type).copied().unwrap_or(0.0)
    }

    fn fill_blanket(&mut self, delta: f64) {
        for grammar in Grammar::ALL {
            self.prof_deltas.insert(SubType::Grammar(grammar), delta);
        }
        for vocab in Vocabulary::ALL {
            self.prof_deltas.insert(SubType::Vocabulary(vocab), delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PathCatalog {
        PathCatalog::default()
    }

    #[test]
    fn none_resolves_to_identity() {
        let params = PathParams::default();
        let a = catalog().resolve(PathId::None, &params).unwrap();
        let b = catalog().resolve(PathId::None, &params).unwrap();
        for over in [a, b] {
            assert!(over.proficiency_deltas().is_empty());
            assert!(over.probability_adjustments().is_empty());
        }
    }

    #[test]
    fn raise_all_shifts_both_families() {
        let over = catalog()
            .resolve(PathId::RaiseAll, &PathParams::default())
            .unwrap();
        assert_eq!(
            over.proficiency_deltas().len(),
            Grammar::ALL.len() + Vocabulary::ALL.len()
        );
        for delta in over.proficiency_deltas().values() {
            assert_eq!(*delta, 0.1);
        }
        assert!(over.probability_adjustments().is_empty());
    }

    #[test]
    fn lower_all_shifts_negative() {
        let over = catalog()
            .resolve(PathId::LowerAll, &PathParams::default())
            .unwrap();
        for delta in over.proficiency_deltas().values() {
            assert_eq!(*delta, -0.1);
        }
    }

    #[test]
    fn focus_path_boosts_its_target_additively() {
        let over = catalog()
            .resolve(PathId::OnlyGerunds, &PathParams::default())
            .unwrap();
        assert!(!over.set_prob());
        assert!(over.proficiency_deltas().is_empty());
        assert_eq!(
            over.probability_adjustments()
                .get(&SubType::Grammar(Grammar::Gerunds)),
            Some(&1.0)
        );
        assert_eq!(over.probability_adjustments().len(), 1);
    }

    #[test]
    fn resolve_with_mode_sets_replacement_flag() {
        let over = catalog()
            .resolve_with_mode(PathId::OnlyAliment, &PathParams::default(), true)
            .unwrap();
        assert!(over.set_prob());
    }

    #[test]
    fn unknown_code_fails_resolution() {
        assert!(matches!(
            PathId::from_code(2),
            Err(EngineError::PathResolution(_))
        ));
        assert!(matches!(
            PathId::from_code(8),
            Err(EngineError::PathResolution(_))
        ));
        assert_eq!(PathId::from_code(98).unwrap(), PathId::RaiseAll);
    }

    #[test]
    fn focus_entry_without_target_is_rejected() {
        let json = r#"[{"path": "only_gerunds", "prompt": "Focus on gerunds"}]"#;
        assert!(matches!(
            PathCatalog::from_json(json),
            Err(EngineError::PathResolution(_))
        ));
    }

    #[test]
    fn catalog_json_round_trip() {
        let json = r#"[
            {"path": "none", "prompt": "Keep everything as it is"},
            {"path": "only_negation", "prompt": "Focus on negation",
             "target": {"grammar": "negation"}}
        ]"#;
        let catalog = PathCatalog::from_json(json).unwrap();
        assert_eq!(catalog.prompt(PathId::None), Some("Keep everything as it is"));
        let over = catalog
            .resolve(PathId::OnlyNegation, &PathParams::default())
            .unwrap();
        assert_eq!(
            over.probability_adjustments()
                .get(&SubType::Grammar(Grammar::Negation)),
            Some(&1.0)
        );
    }

    #[test]
    fn builtin_catalog_has_prompts_for_every_path() {
        let catalog = catalog();
        for path in PathId::ALL {
            assert!(catalog.prompt(path).is_some(), "missing prompt for {path:?}");
        }
    }

    #[test]
    fn focus_for_maps_targets_back_to_paths() {
        assert_eq!(
            PathId::focus_for(SubType::Grammar(Grammar::Gerunds)),
            Some(PathId::OnlyGerunds)
        );
        assert_eq!(
            PathId::focus_for(SubType::Vocabulary(Vocabulary::HomeAndBuilding)),
            Some(PathId::OnlyHome)
        );
        // Participles and passives never had a focus path.
        assert_eq!(PathId::focus_for(SubType::Grammar(Grammar::Participles)), None);
    }
}
