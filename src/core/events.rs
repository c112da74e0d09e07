//! Global events used for cross-system communication.
//!
//! The puzzle never plays sounds or draws feedback itself. It reports what
//! happened through these events and the presentation side decides how to
//! show it.

use bevy::prelude::*;

use crate::puzzle::StatueId;

/// Discrete outcomes of puzzle interactions.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PuzzleEvent {
    /// A statue was picked as the first half of a swap.
    StatueSelected(StatueId),
    /// The selected statue was chosen again, cancelling the selection.
    SelectionCanceled(StatueId),
    /// Two statues traded slots.
    StatuesSwapped { first: StatueId, second: StatueId },
    /// A solution check failed; carries the order as it stands, as a hint.
    OrderMismatch { order: Vec<StatueId> },
    /// Every pedestal holds its statue and the door is unlocked.
    Solved,
    /// The door was tried before the puzzle was solved.
    DoorLocked,
    /// The unlocked door was used.
    LevelComplete,
    /// A statue was touched after the puzzle was solved.
    AlreadySolved,
    /// The touch interaction found no target.
    NothingInRange,
    /// A pedestal inscription was read.
    InscriptionRead { pedestal: usize, text: String },
}

/// Sent when the player walks into or out of a camera trigger zone.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CameraZoneChanged {
    /// Camera of the zone the player is now in, `None` outside every zone.
    pub camera: Option<String>,
}
