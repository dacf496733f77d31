//! Lookup errors for id-based rules queries

use crate::types::{ArchetypeId, ClassId, FeatId, TrackId};
use thiserror::Error;

/// An id passed to a rules query does not exist in the loaded content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("unknown feat: {0}")]
    UnknownFeat(FeatId),
    #[error("unknown archetype: {0}")]
    UnknownArchetype(ArchetypeId),
    #[error("unknown class: {0}")]
    UnknownClass(ClassId),
    #[error("class '{class}' has no '{track}' progression")]
    UnknownTrack { class: ClassId, track: TrackId },
}
