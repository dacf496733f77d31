//! ProgressionTable - Level → rank lookup for a single proficiency track

use super::ProficiencyRank;
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tie point: from `level` onward the track is at `rank`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStep {
    pub level: u32,
    pub rank: ProficiencyRank,
}

impl ProgressionStep {
    pub fn new(level: u32, rank: ProficiencyRank) -> Self {
        ProgressionStep { level, rank }
    }
}

impl From<(u32, ProficiencyRank)> for ProgressionStep {
    fn from((level, rank): (u32, ProficiencyRank)) -> Self {
        ProgressionStep { level, rank }
    }
}

/// Malformed progression data, reported when a table is authored or loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("progression table '{0}' has no steps")]
    Empty(TrackId),
    #[error("progression table '{track}' starts at level {first}; a level 1 step is required")]
    MissingFirstLevel { track: TrackId, first: u32 },
    #[error("progression table '{track}' has more than one step at level {level}")]
    DuplicateLevel { track: TrackId, level: u32 },
    #[error("progression table '{track}' drops from {from} to {to} at level {level}")]
    RankDecreases {
        track: TrackId,
        level: u32,
        from: ProficiencyRank,
        to: ProficiencyRank,
    },
    #[error("progression table '{track}' has a step at level {level}, above the maximum of {max}")]
    AboveMaxLevel { track: TrackId, level: u32, max: u32 },
}

/// Immutable, validated progression for one track (e.g. "fortitude", "martial_weapons").
///
/// Invariants, enforced by [`ProgressionTable::new`]:
/// - at least one step, and the first step is at level 1
/// - steps are sorted by level with no level repeated
/// - rank never decreases as level increases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgressionTable")]
pub struct ProgressionTable {
    track: TrackId,
    steps: Vec<ProgressionStep>,
}

#[derive(Deserialize)]
struct RawProgressionTable {
    track: TrackId,
    steps: Vec<ProgressionStep>,
}

impl TryFrom<RawProgressionTable> for ProgressionTable {
    type Error = ProgressionError;

    fn try_from(raw: RawProgressionTable) -> Result<Self, Self::Error> {
        ProgressionTable::new(raw.track, raw.steps)
    }
}

impl ProgressionTable {
    /// Build and validate a table. Steps may be given in any order.
    pub fn new(
        track: impl Into<TrackId>,
        steps: impl IntoIterator<Item = ProgressionStep>,
    ) -> Result<Self, ProgressionError> {
        let track = track.into();
        let mut steps: Vec<ProgressionStep> = steps.into_iter().collect();
        steps.sort_by_key(|step| step.level);

        let first = steps
            .first()
            .ok_or_else(|| ProgressionError::Empty(track.clone()))?;
        if first.level != 1 {
            return Err(ProgressionError::MissingFirstLevel {
                first: first.level,
                track,
            });
        }

        for pair in steps.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if prev.level == next.level {
                return Err(ProgressionError::DuplicateLevel {
                    track,
                    level: next.level,
                });
            }
            if next.rank < prev.rank {
                return Err(ProgressionError::RankDecreases {
                    track,
                    level: next.level,
                    from: prev.rank,
                    to: next.rank,
                });
            }
        }

        Ok(ProgressionTable { track, steps })
    }

    /// A track that never changes rank
    pub fn constant(track: impl Into<TrackId>, rank: ProficiencyRank) -> Self {
        ProgressionTable {
            track: track.into(),
            steps: vec![ProgressionStep::new(1, rank)],
        }
    }

    pub fn track(&self) -> &TrackId {
        &self.track
    }

    pub fn steps(&self) -> &[ProgressionStep] {
        &self.steps
    }

    /// Rank of the highest step whose level is ≤ `level`.
    ///
    /// Levels below 1 resolve as level 1.
    pub fn resolve(&self, level: u32) -> ProficiencyRank {
        let unlocked = self.steps.partition_point(|step| step.level <= level);
        self.steps
            .get(unlocked.saturating_sub(1))
            .map(|step| step.rank)
            .unwrap_or_default()
    }

    /// Full proficiency bonus on this track at `level`
    pub fn proficiency_bonus(&self, level: u32, add_level: bool) -> i32 {
        self.resolve(level).proficiency_bonus(level, add_level)
    }

    /// Levels at which the rank goes up (excludes the level 1 starting rank)
    pub fn upgrade_levels(&self) -> Vec<u32> {
        self.steps
            .windows(2)
            .filter(|pair| pair[1].rank > pair[0].rank)
            .map(|pair| pair[1].level)
            .collect()
    }

    /// Level of the last step
    pub fn highest_level(&self) -> u32 {
        self.steps.last().map(|step| step.level).unwrap_or(1)
    }

    /// Reject tables with steps beyond the level cap
    pub fn check_max_level(&self, max: u32) -> Result<(), ProgressionError> {
        match self.steps.iter().find(|step| step.level > max) {
            Some(step) => Err(ProgressionError::AboveMaxLevel {
                track: self.track.clone(),
                level: step.level,
                max,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProficiencyRank::*;

    fn steps(list: &[(u32, ProficiencyRank)]) -> Vec<ProgressionStep> {
        list.iter().copied().map(ProgressionStep::from).collect()
    }

    fn fighter_fortitude() -> ProgressionTable {
        ProgressionTable::new(
            "fighter_fortitude",
            [ProgressionStep::new(1, Expert), ProgressionStep::new(17, Master)],
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_fighter_fortitude() {
        let table = fighter_fortitude();
        assert_eq!(table.resolve(1), Expert);
        assert_eq!(table.resolve(16), Expert);
        assert_eq!(table.resolve(17), Master);
        assert_eq!(table.resolve(20), Master);
    }

    #[test]
    fn test_resolve_below_level_one_uses_first_step() {
        assert_eq!(fighter_fortitude().resolve(0), Expert);
    }

    #[test]
    fn test_unsorted_steps_are_sorted() {
        let table = ProgressionTable::new(
            "perception",
            steps(&[(7, Master), (1, Expert), (13, Legendary)]),
        )
        .unwrap();
        assert_eq!(table.steps()[0].level, 1);
        assert_eq!(table.resolve(8), Master);
        assert_eq!(table.upgrade_levels(), vec![7, 13]);
    }

    #[test]
    fn test_missing_first_level_rejected() {
        let err = ProgressionTable::new("will", [ProgressionStep::new(3, Trained)]).unwrap_err();
        assert_eq!(
            err,
            ProgressionError::MissingFirstLevel {
                track: "will".into(),
                first: 3
            }
        );
    }

    #[test]
    fn test_empty_rejected() {
        let err = ProgressionTable::new("will", Vec::new()).unwrap_err();
        assert!(matches!(err, ProgressionError::Empty(_)));
    }

    #[test]
    fn test_duplicate_level_rejected() {
        let err = ProgressionTable::new("reflex", steps(&[(1, Trained), (1, Expert)]))
            .unwrap_err();
        assert!(matches!(err, ProgressionError::DuplicateLevel { level: 1, .. }));
    }

    #[test]
    fn test_decreasing_rank_rejected() {
        let err = ProgressionTable::new("reflex", steps(&[(1, Expert), (9, Trained)]))
            .unwrap_err();
        assert!(matches!(
            err,
            ProgressionError::RankDecreases {
                level: 9,
                from: Expert,
                to: Trained,
                ..
            }
        ));
    }

    #[test]
    fn test_plateau_steps_allowed() {
        let table =
            ProgressionTable::new("class_dc", steps(&[(1, Trained), (5, Trained)])).unwrap();
        assert!(table.upgrade_levels().is_empty());
    }

    #[test]
    fn test_proficiency_bonus_adds_level() {
        let table = fighter_fortitude();
        assert_eq!(table.proficiency_bonus(3, true), 7);
        assert_eq!(table.proficiency_bonus(17, false), 6);
    }

    #[test]
    fn test_check_max_level() {
        let table = ProgressionTable::new("will", steps(&[(1, Trained), (25, Expert)]))
            .unwrap();
        assert!(table.check_max_level(20).is_err());
        assert!(fighter_fortitude().check_max_level(20).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"
track = "fortitude"
steps = [{ level = 1, rank = "expert" }, { level = 17, rank = "master" }]
"#;
        let table: ProgressionTable = toml::from_str(ok).unwrap();
        assert_eq!(table.resolve(17), Master);

        let bad = r#"
track = "fortitude"
steps = [{ level = 2, rank = "expert" }]
"#;
        assert!(toml::from_str::<ProgressionTable>(bad).is_err());
    }
}
