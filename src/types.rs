//! Sub-type identifiers and their families.
//!
//! Every skill the engine tracks is an atomic sub-type belonging to
//! exactly one of three disjoint families: grammar topics, vocabulary
//! domains, and the coarser "other" axis (currently just discussion).
//! Family membership is structural — a [`SubType`] carries its family in
//! the type, so routing a value to the wrong family map is
//! unrepresentable. Numeric codes exist only at the persistence
//! boundary; decoding an unrecognized code is the one place an invalid
//! identifier can enter the engine.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Grammar topics. Codes mirror the historical database identifiers;
/// the retired codes (1-3, 8, 13) are deliberately not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    ToInfinitive,
    Participles,
    Gerunds,
    Passives,
    Negation,
    PrepositionsConjunctions,
    AdverbsAdjectives,
    Subjunctive,
}

impl Grammar {
    pub const ALL: [Self; 8] = [
        Self::ToInfinitive,
        Self::Participles,
        Self::Gerunds,
        Self::Passives,
        Self::Negation,
        Self::PrepositionsConjunctions,
        Self::AdverbsAdjectives,
        Self::Subjunctive,
    ];

    pub fn code(&self) -> u16 {
        match self {
            Self::ToInfinitive => 4,
            Self::Participles => 5,
            Self::Gerunds => 6,
            Self::Passives => 7,
            Self::Negation => 9,
            Self::PrepositionsConjunctions => 10,
            Self::AdverbsAdjectives => 11,
            Self::Subjunctive => 12,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            4 => Some(Self::ToInfinitive),
            5 => Some(Self::Participles),
            6 => Some(Self::Gerunds),
            7 => Some(Self::Passives),
            9 => Some(Self::Negation),
            10 => Some(Self::PrepositionsConjunctions),
            11 => Some(Self::AdverbsAdjectives),
            12 => Some(Self::Subjunctive),
            _ => None,
        }
    }
}

/// Vocabulary domains, codes 21-27.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    FreeTime,
    Humanities,
    Society,
    NatureAndScience,
    Aliment,
    BodyAndSoul,
    HomeAndBuilding,
}

impl Vocabulary {
    pub const ALL: [Self; 7] = [
        Self::FreeTime,
        Self::Humanities,
        Self::Society,
        Self::NatureAndScience,
        Self::Aliment,
        Self::BodyAndSoul,
        Self::HomeAndBuilding,
    ];

    pub fn code(&self) -> u16 {
        match self {
            Self::FreeTime => 21,
            Self::Humanities => 22,
            Self::Society => 23,
            Self::NatureAndScience => 24,
            Self::Aliment => 25,
            Self::BodyAndSoul => 26,
            Self::HomeAndBuilding => 27,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            21 => Some(Self::FreeTime),
            22 => Some(Self::Humanities),
            23 => Some(Self::Society),
            24 => Some(Self::NatureAndScience),
            25 => Some(Self::Aliment),
            26 => Some(Self::BodyAndSoul),
            27 => Some(Self::HomeAndBuilding),
            _ => None,
        }
    }
}

/// Skills tracked outside the grammar/vocabulary axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Others {
    Discussion,
}

impl Others {
    pub const ALL: [Self; 1] = [Self::Discussion];

    pub fn code(&self) -> u16 {
        match self {
            Self::Discussion => 101,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            101 => Some(Self::Discussion),
            _ => None,
        }
    }
}

/// The three disjoint sub-type families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Grammar,
    Vocabulary,
    Other,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Vocabulary => "vocabulary",
            Self::Other => "other",
        }
    }
}

/// An atomic skill tag, tagged with its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubType {
    Grammar(Grammar),
    Vocabulary(Vocabulary),
    Others(Others),
}

impl SubType {
    pub fn family(&self) -> Family {
        match self {
            Self::Grammar(_) => Family::Grammar,
            Self::Vocabulary(_) => Family::Vocabulary,
            Self::Others(_) => Family::Other,
        }
    }

    /// The numeric identifier used by the persistence layer.
    pub fn code(&self) -> u16 {
        match self {
            Self::Grammar(g) => g.code(),
            Self::Vocabulary(v) => v.code(),
            Self::Others(o) => o.code(),
        }
    }

    /// Decodes a persisted identifier. Fails fast on codes that belong
    /// to no family.
    pub fn from_code(code: u16) -> Result<Self, EngineError> {
        Grammar::from_code(code)
            .map(Self::Grammar)
            .or_else(|| Vocabulary::from_code(code).map(Self::Vocabulary))
            .or_else(|| Others::from_code(code).map(Self::Others))
            .ok_or(EngineError::UnknownSubType(code))
    }

    /// Every sub-type the engine knows, grouped family-first.
    pub fn all() -> impl Iterator<Item = SubType> {
        Grammar::ALL
            .iter()
            .map(|g| SubType::Grammar(*g))
            .chain(Vocabulary::ALL.iter().map(|v| SubType::Vocabulary(*v)))
            .chain(Others::ALL.iter().map(|o| SubType::Others(*o)))
    }
}

impl From<Grammar> for SubType {
    fn from(g: Grammar) -> Self {
        Self::Grammar(g)
    }
}

impl From<Vocabulary> for SubType {
    fn from(v: Vocabulary) -> Self {
        Self::Vocabulary(v)
    }
}

impl From<Others> for SubType {
    fn from(o: Others) -> Self {
        Self::Others(o)
    }
}
