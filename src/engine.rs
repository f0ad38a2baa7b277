//! Engine facade.
//!
//! [`AdaptiveEngine`] bundles the configuration, the path catalog, the
//! selector, and one RNG into the object the session orchestrator talks
//! to. One engine serves many students (their state lives in their
//! [`ProficiencyModel`]s); one model must not be shared across threads
//! without external synchronization, matching the per-student turn
//! serialization the surrounding game already enforces.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::paths::{PathCatalog, PathId, PathOverride};
use crate::proficiency::ProficiencyModel;
use crate::selection::{Selection, SubTypeSelector};
use crate::snapshot::ProficiencySnapshot;
use crate::suggestion::{suggest_paths, TaskDurationRecord};
use crate::types::{Family, SubType};

pub struct AdaptiveEngine {
    config: EngineConfig,
    catalog: PathCatalog,
    selector: SubTypeSelector,
    rng: ChaCha8Rng,
}

impl AdaptiveEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_catalog(config, PathCatalog::default())
    }

    pub fn with_catalog(config: EngineConfig, catalog: PathCatalog) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let selector = SubTypeSelector::new(config.selection.clone());
        Self {
            config,
            catalog,
            selector,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PathCatalog {
        &self.catalog
    }

    /// A fresh model for a student with no history.
    pub fn new_student(&self) -> ProficiencyModel {
        ProficiencyModel::new(self.config.update.clone())
    }

    /// Rebuilds a student's model from the persisted snapshot.
    pub fn restore_student(
        &self,
        snapshot: &ProficiencySnapshot,
    ) -> Result<ProficiencyModel, EngineError> {
        snapshot.to_model(self.config.update.clone())
    }

    /// Picks the next sub-type within one family and its difficulty,
    /// honoring the student's active paths.
    pub fn select(
        &mut self,
        model: &ProficiencyModel,
        family: Family,
        paths: &[PathOverride],
    ) -> Result<Selection, EngineError> {
        self.selector.select(
            model.candidates(family),
            model.average(family),
            paths,
            &mut self.rng,
        )
    }

    /// Applies a task outcome to the listed sub-types and refreshes the
    /// family averages.
    pub fn update(
        &self,
        model: &mut ProficiencyModel,
        sub_types: &[SubType],
        correct: bool,
        group_update: bool,
    ) {
        model.update_many(sub_types, correct, group_update);
    }

    /// Resolves a path the student picked into its override.
    pub fn resolve_path(&self, path: PathId) -> Result<PathOverride, EngineError> {
        self.catalog.resolve(path, &self.config.paths)
    }

    /// Like [`resolve_path`], but with an explicit replacement flag for
    /// the focus probability entry.
    ///
    /// [`resolve_path`]: Self::resolve_path
    pub fn resolve_path_with_mode(
        &self,
        path: PathId,
        set_prob: bool,
    ) -> Result<PathOverride, EngineError> {
        self.catalog.resolve_with_mode(path, &self.config.paths, set_prob)
    }

    /// The path menu to offer a student, given their recent task
    /// history.
    pub fn suggest_paths(&self, records: &[TaskDurationRecord]) -> Vec<PathId> {
        suggest_paths(records)
    }

    /// Prompts for a suggested path menu, in menu order.
    pub fn path_prompts(&self, paths: &[PathId]) -> Vec<&str> {
        self.catalog.prompts_for(paths)
    }
}

impl Default for AdaptiveEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
