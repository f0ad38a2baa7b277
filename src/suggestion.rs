//! Path suggestion.
//!
//! Before a task segment the orchestrator offers each student a small
//! menu of paths. The menu always contains the identity and the two
//! blanket paths; when the student's recent task history shows a
//! sub-type they are consistently slow on, the matching focus path is
//! offered as well.

use chrono::Duration;
use std::collections::BTreeMap;

use crate::paths::PathId;
use crate::types::SubType;

/// One historical task observation supplied by the persistence service.
#[derive(Debug, Clone)]
pub struct TaskDurationRecord {
    pub duration: Duration,
    pub sub_type: SubType,
}

impl TaskDurationRecord {
    pub fn new(duration: Duration, sub_type: SubType) -> Self {
        Self { duration, sub_type }
    }
}

/// The sub-type with the highest mean task duration across `records`,
/// or `None` for an empty history. Ties keep the first maximum in
/// sub-type order.
pub fn slowest_sub_type(records: &[TaskDurationRecord]) -> Option<SubType> {
    let mut totals: BTreeMap<SubType, (f64, u32)> = BTreeMap::new();
    for record in records {
        let seconds = record.duration.num_milliseconds() as f64 / 1000.0;
        let entry = totals.entry(record.sub_type).or_insert((0.0, 0));
        entry.0 += seconds;
        entry.1 += 1;
    }

    let mut slowest: Option<(SubType, f64)> = None;
    for (sub_type, (sum, count)) in totals {
        let mean = sum / count as f64;
        match slowest {
            Some((_, best)) if mean <= best => {}
            _ => slowest = Some((sub_type, mean)),
        }
    }
    slowest.map(|(sub_type, _)| sub_type)
}

/// The path menu to offer, given the student's recent task history:
/// the identity path, both blanket paths, and — when the slowest
/// sub-type has one — its focus path, in catalog order.
pub fn suggest_paths(records: &[TaskDurationRecord]) -> Vec<PathId> {
    let focus = slowest_sub_type(records).and_then(PathId::focus_for);
    PathId::ALL
        .iter()
        .filter(|path| {
            matches!(path, PathId::None | PathId::RaiseAll | PathId::LowerAll)
                || Some(**path) == focus
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grammar, Vocabulary};

    fn record(seconds: i64, sub_type: SubType) -> TaskDurationRecord {
        TaskDurationRecord::new(Duration::seconds(seconds), sub_type)
    }

    #[test]
    fn empty_history_offers_only_the_blanket_menu() {
        let paths = suggest_paths(&[]);
        assert_eq!(paths, vec![PathId::None, PathId::RaiseAll, PathId::LowerAll]);
    }

    #[test]
    fn slowest_sub_type_uses_mean_duration() {
        let records = vec![
            // Gerunds: one slow outlier but fast on average.
            record(90, SubType::Grammar(Grammar::Gerunds)),
            record(10, SubType::Grammar(Grammar::Gerunds)),
            record(10, SubType::Grammar(Grammar::Gerunds)),
            // Negation: consistently slow.
            record(60, SubType::Grammar(Grammar::Negation)),
            record(70, SubType::Grammar(Grammar::Negation)),
        ];
        assert_eq!(
            slowest_sub_type(&records),
            Some(SubType::Grammar(Grammar::Negation))
        );
    }

    #[test]
    fn focus_path_for_the_slowest_sub_type_is_offered() {
        let records = vec![
            record(120, SubType::Vocabulary(Vocabulary::Aliment)),
            record(20, SubType::Grammar(Grammar::Gerunds)),
        ];
        let paths = suggest_paths(&records);
        assert_eq!(
            paths,
            vec![
                PathId::None,
                PathId::RaiseAll,
                PathId::LowerAll,
                PathId::OnlyAliment,
            ]
        );
    }

    #[test]
    fn slowest_sub_type_without_focus_path_adds_nothing() {
        let records = vec![
            record(200, SubType::Grammar(Grammar::Participles)),
            record(10, SubType::Grammar(Grammar::Gerunds)),
        ];
        let paths = suggest_paths(&records);
        assert_eq!(paths, vec![PathId::None, PathId::RaiseAll, PathId::LowerAll]);
    }

    #[test]
    fn sub_second_durations_are_not_truncated() {
        let records = vec![
            TaskDurationRecord::new(
                Duration::milliseconds(1500),
                SubType::Grammar(Grammar::Gerunds),
            ),
            TaskDurationRecord::new(
                Duration::milliseconds(1400),
                SubType::Grammar(Grammar::Negation),
            ),
        ];
        assert_eq!(
            slowest_sub_type(&records),
            Some(SubType::Grammar(Grammar::Gerunds))
        );
    }
}
