//! Errors raised while building a puzzle from its level description.

use thiserror::Error;

use super::entities::StatueId;

/// A level description that cannot produce a consistent puzzle.
#[derive(Debug, Error, PartialEq)]
pub enum PuzzleBuildError {
    /// The puzzle has nothing to solve.
    #[error("Puzzle has no pedestals")]
    NoPedestals,

    /// Every pedestal needs exactly one statue.
    #[error("Puzzle has {pedestals} pedestal(s) but {statues} statue(s)")]
    CountMismatch { pedestals: usize, statues: usize },

    /// Two statues share an id.
    #[error("Statue id '{0}' is declared more than once")]
    DuplicateStatueId(StatueId),

    /// A pedestal expects a statue that does not exist.
    #[error("Pedestal {pedestal} expects unknown statue '{statue}'")]
    UnknownCorrectStatue { pedestal: usize, statue: StatueId },

    /// A statue starts on a slot past the last pedestal.
    #[error("Statue '{statue}' starts on slot {slot}, but there are only {slots} slot(s)")]
    SlotOutOfRange {
        statue: StatueId,
        slot: usize,
        slots: usize,
    },

    /// Two statues start on the same slot.
    #[error("Slot {slot} is claimed by both '{first}' and '{second}'")]
    SlotOccupied {
        slot: usize,
        first: StatueId,
        second: StatueId,
    },
}
