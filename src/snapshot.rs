//! Persistence-facing snapshot of a student's proficiency state.
//!
//! The external store works full-overwrite: it hands the engine a fresh
//! snapshot at session start and receives a complete replacement after
//! every change. Sub-types are carried as their numeric codes here;
//! decoding is the boundary where unknown identifiers fail fast.

use serde::{Deserialize, Serialize};

use crate::config::UpdateParams;
use crate::error::EngineError;
use crate::proficiency::ProficiencyModel;
use crate::types::SubType;

/// One persisted value: the sub-type's numeric code and its proficiency
/// (`None` while unobserved — unknowns are persisted too).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProficiencyRecord {
    pub code: u16,
    pub value: Option<f64>,
}

/// A complete per-student proficiency snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProficiencySnapshot {
    pub records: Vec<ProficiencyRecord>,
}

impl ProficiencySnapshot {
    /// Exports every tracked sub-type, unknowns included.
    pub fn from_model(model: &ProficiencyModel) -> Self {
        let records = model
            .entries()
            .map(|(sub_type, value)| ProficiencyRecord {
                code: sub_type.code(),
                value,
            })
            .collect();
        Self { records }
    }

    /// Rebuilds the model, recomputing the family averages once.
    /// Sub-types missing from the snapshot stay unknown; a record with
    /// an unrecognized code is a programming error and fails fast.
    pub fn to_model(&self, params: UpdateParams) -> Result<ProficiencyModel, EngineError> {
        let mut values = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let sub_type = SubType::from_code(record.code)?;
            values.push((sub_type, record.value));
        }
        Ok(ProficiencyModel::from_values(params, values))
    }
}
