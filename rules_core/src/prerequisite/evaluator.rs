//! Prerequisite evaluation against a character snapshot
//!
//! Evaluation is total: missing ability scores or proficiencies and
//! unparseable thresholds make a prerequisite unsatisfied rather than
//! producing an error.

use super::Prerequisite;
use crate::snapshot::CharacterSnapshot;

/// Evaluate a single prerequisite
pub fn evaluate(prereq: &Prerequisite, snapshot: &CharacterSnapshot) -> bool {
    match prereq {
        Prerequisite::AbilityScore {
            target,
            operator,
            value,
        } => match (snapshot.ability_score(*target), value.as_score()) {
            (Some(actual), Some(expected)) => operator.compare(actual, expected),
            _ => false,
        },
        Prerequisite::Skill {
            target,
            operator,
            value,
        } => snapshot
            .proficiency(target)
            .is_some_and(|rank| operator.compare(rank.bonus(), value.as_rank_value())),
        Prerequisite::Level { value } => snapshot.level >= *value,
        Prerequisite::Feat { target } => snapshot.has_feat(target),
        Prerequisite::AnyOf { options } => options.iter().any(|option| evaluate(option, snapshot)),
        Prerequisite::Unconstrained { .. } | Prerequisite::Unrecognized => true,
    }
}

/// Logical AND over prerequisites, stopping at the first unsatisfied one.
///
/// An empty list is satisfied.
pub fn evaluate_all<'a>(
    prereqs: impl IntoIterator<Item = &'a Prerequisite>,
    snapshot: &CharacterSnapshot,
) -> bool {
    prereqs.into_iter().all(|prereq| evaluate(prereq, snapshot))
}

/// The unsatisfied prerequisites, in declaration order
pub fn unmet_prerequisites<'a>(
    prereqs: impl IntoIterator<Item = &'a Prerequisite>,
    snapshot: &CharacterSnapshot,
) -> Vec<&'a Prerequisite> {
    prereqs
        .into_iter()
        .filter(|prereq| !evaluate(prereq, snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prerequisite::Comparison;
    use crate::proficiency::ProficiencyRank;
    use crate::types::Ability;

    fn strength(score: i32) -> CharacterSnapshot {
        CharacterSnapshot::new(3).with_ability(Ability::Strength, score)
    }

    #[test]
    fn test_ability_at_least() {
        let prereq = Prerequisite::ability(Ability::Strength, Comparison::AtLeast, "14");
        assert!(evaluate(&prereq, &strength(14)));
        assert!(evaluate(&prereq, &strength(20)));
        assert!(!evaluate(&prereq, &strength(13)));
    }

    #[test]
    fn test_ability_operators() {
        let cases = [
            (Comparison::GreaterThan, [false, false, true]),
            (Comparison::Equal, [false, true, false]),
            (Comparison::AtMost, [true, true, false]),
            (Comparison::LessThan, [true, false, false]),
            (Comparison::AtLeast, [false, true, true]),
        ];
        for (op, expected) in cases {
            let prereq = Prerequisite::ability(Ability::Strength, op, 14);
            for (score, want) in [13, 14, 15].into_iter().zip(expected) {
                assert_eq!(
                    evaluate(&prereq, &strength(score)),
                    want,
                    "Strength {} {} 14",
                    score,
                    op
                );
            }
        }
    }

    #[test]
    fn test_missing_ability_fails_closed() {
        let prereq = Prerequisite::ability(Ability::Wisdom, Comparison::AtMost, 30);
        assert!(!evaluate(&prereq, &strength(18)));
    }

    #[test]
    fn test_unparseable_threshold_fails_closed() {
        let prereq = Prerequisite::ability(Ability::Strength, Comparison::AtLeast, "high");
        assert!(!evaluate(&prereq, &strength(18)));
    }

    #[test]
    fn test_skill_compares_rank_ordinal() {
        let prereq = Prerequisite::skill("medicine", Comparison::AtLeast, "Trained");
        let expert = CharacterSnapshot::new(2).with_proficiency("medicine", ProficiencyRank::Expert);
        let untrained =
            CharacterSnapshot::new(2).with_proficiency("medicine", ProficiencyRank::Untrained);
        assert!(evaluate(&prereq, &expert));
        assert!(!evaluate(&prereq, &untrained));
        assert!(!evaluate(&prereq, &CharacterSnapshot::new(2)));
    }

    #[test]
    fn test_skill_unknown_rank_name_is_untrained() {
        let prereq = Prerequisite::skill("arcana", Comparison::AtLeast, "adept");
        let untrained =
            CharacterSnapshot::new(1).with_proficiency("arcana", ProficiencyRank::Untrained);
        assert!(evaluate(&prereq, &untrained));
    }

    #[test]
    fn test_level_is_at_least() {
        let prereq = Prerequisite::level(4);
        assert!(!evaluate(&prereq, &CharacterSnapshot::new(3)));
        assert!(evaluate(&prereq, &CharacterSnapshot::new(4)));
        assert!(evaluate(&prereq, &CharacterSnapshot::new(12)));
    }

    #[test]
    fn test_feat_accepts_granted() {
        let prereq = Prerequisite::feat("shield-block");
        assert!(!evaluate(&prereq, &CharacterSnapshot::new(1)));
        assert!(evaluate(
            &prereq,
            &CharacterSnapshot::new(1).with_granted_feat("shield-block")
        ));
        assert!(evaluate(
            &prereq,
            &CharacterSnapshot::new(1).with_feat("shield-block")
        ));
    }

    #[test]
    fn test_any_of() {
        let prereq = Prerequisite::any_of(vec![
            Prerequisite::ability(Ability::Strength, Comparison::AtLeast, 14),
            Prerequisite::ability(Ability::Dexterity, Comparison::AtLeast, 14),
        ]);
        let dex = CharacterSnapshot::new(1).with_ability(Ability::Dexterity, 16);
        assert!(evaluate(&prereq, &dex));
        assert!(!evaluate(&prereq, &strength(10)));
        assert!(!evaluate(&Prerequisite::any_of(Vec::new()), &dex));
    }

    #[test]
    fn test_escape_hatches_are_satisfied() {
        let snapshot = CharacterSnapshot::new(1);
        assert!(evaluate(&Prerequisite::Unrecognized, &snapshot));
        assert!(evaluate(
            &Prerequisite::Unconstrained {
                description: "worshipper of Pharasma".to_string()
            },
            &snapshot
        ));
    }

    #[test]
    fn test_evaluate_all_short_circuits() {
        let failing = Prerequisite::level(20);
        let mut yielded = 0;
        let prereqs = std::iter::from_fn(|| {
            yielded += 1;
            if yielded == 1 {
                Some(&failing)
            } else {
                panic!("second prerequisite must not be evaluated")
            }
        });
        assert!(!evaluate_all(prereqs, &CharacterSnapshot::new(1)));
    }

    #[test]
    fn test_evaluate_all_empty_is_satisfied() {
        assert!(evaluate_all(&Vec::<Prerequisite>::new(), &CharacterSnapshot::new(1)));
    }

    #[test]
    fn test_unmet_prerequisites_in_order() {
        let prereqs = vec![
            Prerequisite::level(5),
            Prerequisite::ability(Ability::Strength, Comparison::AtLeast, 14),
            Prerequisite::feat("power-attack"),
        ];
        let unmet = unmet_prerequisites(&prereqs, &strength(16));
        assert_eq!(unmet, vec![&prereqs[0], &prereqs[2]]);
    }
}
