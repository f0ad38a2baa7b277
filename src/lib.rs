//! # lingo-algo — adaptive tutoring core
//!
//! Pure-Rust implementation of the adaptive difficulty engine behind a
//! cooperative language-tutoring game:
//!
//! - **ProficiencyModel** — per-student skill estimates on a 1-10 scale
//!   across three sub-type families, with asymmetric first-observation
//!   priors and saturating updates
//! - **SubTypeSelector** — explore-first, then probability-weighted
//!   sampling that favors weaker sub-types, plus difficulty blending
//!   against the family average
//! - **Paths** — student-picked overrides that shift proficiencies or
//!   reshape the selection distribution for a task segment
//!
//! ## Design
//!
//! - **Pure computation** — no I/O, no timers, no internal locking; the
//!   surrounding services hand in plain data and persist what comes out
//! - **Reproducible** — all randomness flows through injectable RNGs
//!   (`ChaCha8` seeded from config in the engine facade)
//! - **Fail fast** — invalid identifiers and empty candidate sets are
//!   caller bugs surfaced as typed errors, never patched over
//!
//! ## Modules
//!
//! - [`types`] — sub-type enums, families, numeric codes
//! - [`config`] — tunable parameters with defaults
//! - [`error`] — error taxonomy
//! - [`proficiency`] — per-student proficiency state
//! - [`selection`] — sub-type selection and difficulty computation
//! - [`paths`] — path identifiers, catalog, overrides
//! - [`suggestion`] — path menus from task-duration history
//! - [`snapshot`] — persistence-facing state snapshot
//! - [`engine`] — facade tying it all together
//!
//! ## Example
//!
//! ```rust
//! use lingo_algo::{AdaptiveEngine, EngineConfig, Family};
//!
//! let mut engine = AdaptiveEngine::new(EngineConfig {
//!     seed: Some(42),
//!     ..EngineConfig::default()
//! });
//! let mut student = engine.new_student();
//!
//! let selection = engine.select(&student, Family::Grammar, &[]).unwrap();
//! // ... fetch content for (selection.sub_type, selection.difficulty),
//! // run the task, then feed the outcome back:
//! engine.update(&mut student, &[selection.sub_type], true, false);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod paths;
pub mod proficiency;
pub mod selection;
pub mod snapshot;
pub mod suggestion;
pub mod types;

pub use config::{EngineConfig, PathParams, SelectionParams, UpdateParams};
pub use engine::AdaptiveEngine;
pub use error::EngineError;
pub use paths::{PathCatalog, PathCatalogEntry, PathId, PathOverride};
pub use proficiency::ProficiencyModel;
pub use selection::{Selection, SubTypeSelector};
pub use snapshot::{ProficiencyRecord, ProficiencySnapshot};
pub use suggestion::{suggest_paths, TaskDurationRecord};
pub use types::{Family, Grammar, Others, SubType, Vocabulary};
