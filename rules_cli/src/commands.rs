//! Subcommand implementations. Each returns the text to print.

use crate::error::CliError;
use rules_core::config::{self, RulesConfig};
use rules_core::error::RulesError;
use rules_core::prelude::*;
use std::fmt::Write;
use std::path::Path;

/// Read a snapshot file and bring its level into 1..=max_level
pub fn load_snapshot(path: &Path, settings: &RulesConfig) -> Result<CharacterSnapshot, CliError> {
    let mut snapshot: CharacterSnapshot = config::load_document(path)?;
    let max = settings.levels.max_level;
    let clamped = snapshot.level.min(max).max(1);
    if clamped != snapshot.level {
        tracing::warn!(level = snapshot.level, clamped, "snapshot level out of range");
        snapshot.level = clamped;
    }
    Ok(snapshot)
}

pub fn progression(
    content: &RulesContent,
    settings: &RulesConfig,
    class_id: &str,
    track: Option<&str>,
    level: Option<u32>,
) -> Result<String, CliError> {
    let class = content.require_class(class_id)?;
    if let Some(level) = level {
        let max = settings.levels.max_level;
        if level == 0 || level > max {
            return Err(CliError::LevelOutOfRange { level, max });
        }
    }

    let tables: Vec<&ProgressionTable> = match track {
        Some(track) => vec![class.progression(track).ok_or_else(|| RulesError::UnknownTrack {
            class: class.id.clone(),
            track: track.into(),
        })?],
        None => class.progressions.iter().collect(),
    };

    let mut out = String::new();
    let add_level = settings.proficiency.add_level_to_trained;
    match level {
        Some(level) => {
            let _ = writeln!(out, "{} at level {}", class.name, level);
            for table in tables {
                let _ = writeln!(
                    out,
                    "  {:<18} {:<10} {:+}",
                    table.track(),
                    table.resolve(level),
                    table.proficiency_bonus(level, add_level)
                );
            }
        }
        None => {
            let _ = writeln!(out, "{}", class.name);
            for table in tables {
                let steps: Vec<String> = table
                    .steps()
                    .iter()
                    .map(|step| format!("{} {}", step.level, step.rank))
                    .collect();
                let _ = writeln!(out, "  {:<18} {}", table.track(), steps.join(", "));
            }
        }
    }
    Ok(out.trim_end().to_string())
}

pub fn check(
    content: &RulesContent,
    settings: &RulesConfig,
    snapshot: &CharacterSnapshot,
    feat_id: &str,
) -> Result<String, CliError> {
    let feat = content.require_feat(feat_id)?;
    let report = EligibilityResolver::from_config(settings).check(feat, snapshot);

    let mut out = report.to_string();
    if let Some(alternative) = &feat.alternative {
        let _ = write!(out, "\n  alternative (not enforced): {}", alternative);
    }
    if !feat.effects.is_empty() {
        out.push_str("\neffects:");
        for effect in &feat.effects {
            let _ = write!(out, "\n  {}", effect);
        }
    }
    Ok(out)
}

pub fn archetype(
    content: &RulesContent,
    settings: &RulesConfig,
    snapshot: &CharacterSnapshot,
    archetype_id: &str,
) -> Result<String, CliError> {
    let progression = ArchetypeProgression::new(content, EligibilityResolver::from_config(settings));
    let archetype = progression.archetype(archetype_id)?;

    let mut out = String::new();
    let met = progression.validate_prerequisites(archetype_id, snapshot)?;
    let _ = writeln!(
        out,
        "{} ({}): prerequisites {}",
        archetype.name,
        archetype.id,
        if met { "met" } else { "not met" }
    );
    for prereq in &archetype.prerequisites {
        let _ = writeln!(out, "  requires {}", prereq);
    }
    if let Some(alternative) = &archetype.alternative {
        let _ = writeln!(out, "  alternative (not enforced): {}", alternative);
    }
    if progression.is_dedicated(archetype_id, snapshot)? {
        let _ = writeln!(out, "dedicated via {}", archetype.dedication);
    }

    let available = progression.available_feats(archetype_id, snapshot)?;
    if available.is_empty() {
        out.push_str("no feats available");
    } else {
        out.push_str("available feats:");
        for feat in available {
            let _ = write!(out, "\n  {} (level {})", feat.id, feat.level);
        }
    }

    let slots = progression.granted_spell_slots(archetype_id, snapshot)?;
    if !slots.is_empty() {
        out.push_str("\nspell slots:");
        for (rank, count) in slots {
            let label = if rank == 0 {
                "cantrips".to_string()
            } else {
                format!("rank {}", rank)
            };
            let _ = write!(out, "\n  {}: {}", label, count);
        }
    }
    Ok(out)
}
