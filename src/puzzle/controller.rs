//! The statue puzzle state machine.
//!
//! Statues stand on pedestals, one per slot. The player selects one statue,
//! then another, and the two trade places. When every pedestal holds the statue
//! it expects, the puzzle is solved for good and the door unlocks.

use bevy::color::Color;
use bevy::log::{debug, info, warn};
use bevy::math::DVec3;

use super::config::InteractionConfig;
use super::data::PuzzleDescriptor;
use super::entities::{
    Door, EntityRef, Interactable, Pedestal, Statue, StatueId, TextureHandle, TextureLookup,
};
use super::error::PuzzleBuildError;
use super::messages::MessageLog;
use crate::collision::{ray_intersects_box, BoundingBox, InteractionRaycaster};
use crate::core::PuzzleEvent;

/// Where the puzzle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleState<'a> {
    Unsolved { selection: Option<&'a StatueId> },
    /// Terminal.
    Solved,
}

fn vec3(v: (f64, f64, f64)) -> DVec3 {
    DVec3::new(v.0, v.1, v.2)
}

fn resolve_texture(textures: &impl TextureLookup, key: Option<&str>) -> TextureHandle {
    key.map_or(TextureHandle::NONE, |key| textures.texture(key))
}

/// Owns every puzzle entity and drives selection, swapping and solving.
#[derive(Debug, Clone)]
pub struct PuzzleController {
    pedestals: Vec<Pedestal>,
    statues: Vec<Statue>,
    door: Door,
    slot_positions: Vec<DVec3>,
    /// `current_order[i]` is the statue standing on `slot_positions[i]`.
    current_order: Vec<StatueId>,
    selected: Option<StatueId>,
    solved: bool,
    raycaster: InteractionRaycaster,
    interaction_radius: f64,
    selection_color: Color,
    solved_color: Color,
    messages: MessageLog,
    events: Vec<PuzzleEvent>,
}

impl PuzzleController {
    /// Build the puzzle, placing each statue on its declared slot.
    ///
    /// The starting arrangement is not checked for being solved; that is only
    /// discovered by the first [`check_solution`](Self::check_solution).
    pub fn new(
        descriptor: &PuzzleDescriptor,
        textures: &impl TextureLookup,
        config: &InteractionConfig,
    ) -> Result<Self, PuzzleBuildError> {
        let slots = descriptor.pedestals.len();
        if slots == 0 {
            return Err(PuzzleBuildError::NoPedestals);
        }
        if descriptor.statues.len() != slots {
            return Err(PuzzleBuildError::CountMismatch {
                pedestals: slots,
                statues: descriptor.statues.len(),
            });
        }

        for (i, statue) in descriptor.statues.iter().enumerate() {
            if descriptor.statues[..i].iter().any(|other| other.id == statue.id) {
                return Err(PuzzleBuildError::DuplicateStatueId(statue.id.clone()));
            }
        }

        for (index, pedestal) in descriptor.pedestals.iter().enumerate() {
            if !descriptor.statues.iter().any(|s| s.id == pedestal.correct_statue_id) {
                return Err(PuzzleBuildError::UnknownCorrectStatue {
                    pedestal: index,
                    statue: pedestal.correct_statue_id.clone(),
                });
            }
        }

        let mut occupants: Vec<Option<StatueId>> = vec![None; slots];
        for statue in &descriptor.statues {
            let slot = statue.initial_slot;
            let Some(occupant) = occupants.get_mut(slot) else {
                return Err(PuzzleBuildError::SlotOutOfRange {
                    statue: statue.id.clone(),
                    slot,
                    slots,
                });
            };
            if let Some(first) = occupant {
                return Err(PuzzleBuildError::SlotOccupied {
                    slot,
                    first: first.clone(),
                    second: statue.id.clone(),
                });
            }
            *occupant = Some(statue.id.clone());
        }
        // Equal counts, distinct in-range slots: every slot is filled.
        let current_order: Vec<StatueId> = occupants.into_iter().flatten().collect();

        let pedestals: Vec<Pedestal> = descriptor
            .pedestals
            .iter()
            .enumerate()
            .map(|(index, p)| {
                Pedestal::new(
                    index,
                    vec3(p.position),
                    vec3(p.size),
                    p.inscription.clone(),
                    p.correct_statue_id.clone(),
                    resolve_texture(textures, p.texture.as_deref()),
                )
            })
            .collect();

        let slot_positions: Vec<DVec3> = pedestals.iter().map(Pedestal::slot_position).collect();

        let statues: Vec<Statue> = descriptor
            .statues
            .iter()
            .map(|s| {
                Statue::new(
                    s.id.clone(),
                    s.name.clone(),
                    s.phrase.clone(),
                    slot_positions[s.initial_slot],
                    vec3(s.size),
                    s.rotation,
                    resolve_texture(textures, s.texture.as_deref()),
                )
            })
            .collect();

        let door_desc = &descriptor.door;
        let door = Door::new(
            vec3(door_desc.position),
            vec3(door_desc.size),
            door_desc.rotation,
            resolve_texture(textures, door_desc.texture.as_deref()),
        );

        info!("Statue puzzle built with {} statues", statues.len());

        Ok(Self {
            pedestals,
            statues,
            door,
            slot_positions,
            current_order,
            selected: None,
            solved: false,
            raycaster: InteractionRaycaster::new(config.acceptance_threshold),
            interaction_radius: config.interaction_radius,
            selection_color: config.selection_color(),
            solved_color: config.solved_color(),
            messages: MessageLog::new(config.message_duration),
            events: Vec::new(),
        })
    }

    // === Affordance queries ===

    /// Would the touch interaction hit something right now?
    pub fn can_touch_interact(&self, origin: DVec3, facing_angle_deg: f64) -> bool {
        self.touch_target(origin, facing_angle_deg).is_some()
    }

    /// Would the read interaction hit a pedestal right now?
    pub fn can_read_interact(&self, origin: DVec3, facing_angle_deg: f64) -> bool {
        self.read_target(origin, facing_angle_deg).is_some()
    }

    /// Every piece of the puzzle, pedestals first.
    fn interactables(&self) -> impl Iterator<Item = Interactable<'_>> {
        self.pedestals
            .iter()
            .map(Interactable::Pedestal)
            .chain(self.statues.iter().map(Interactable::Statue))
            .chain(std::iter::once(Interactable::Door(&self.door)))
    }

    fn touch_target(&self, origin: DVec3, facing_angle_deg: f64) -> Option<EntityRef> {
        let candidates: Vec<Interactable<'_>> = self
            .interactables()
            .filter(|i| i.capabilities().has_interact_action)
            .collect();

        self.raycaster
            .cast(origin, facing_angle_deg, &candidates, self.interaction_radius)
            .or_else(|| {
                // Doors are wide; aiming at any part of one counts.
                ray_intersects_box(
                    origin,
                    facing_angle_deg,
                    &self.door.collider,
                    self.interaction_radius,
                )
                .then_some(EntityRef::Door)
            })
    }

    fn read_target(&self, origin: DVec3, facing_angle_deg: f64) -> Option<EntityRef> {
        let candidates: Vec<Interactable<'_>> = self
            .interactables()
            .filter(|i| !i.capabilities().has_interact_action)
            .collect();
        self.raycaster
            .cast(origin, facing_angle_deg, &candidates, self.interaction_radius)
    }

    // === Actions ===

    /// Touch whatever the actor is facing. Returns the resolved target.
    pub fn interact(&mut self, origin: DVec3, facing_angle_deg: f64) -> Option<EntityRef> {
        let target = self.touch_target(origin, facing_angle_deg);

        match &target {
            Some(EntityRef::Statue(id)) => self.handle_statue_selection(id),
            Some(EntityRef::Door) => self.use_door(),
            Some(EntityRef::Pedestal(_)) => {}
            None => {
                self.notify("There is nothing here to interact with.", PuzzleEvent::NothingInRange);
            }
        }

        target
    }

    /// Read the inscription of the pedestal the actor is facing.
    pub fn read_interact(&mut self, origin: DVec3, facing_angle_deg: f64) -> Option<EntityRef> {
        let target = self.read_target(origin, facing_angle_deg);

        if let Some(EntityRef::Pedestal(index)) = target {
            let text = self.pedestals[index].inscription.clone();
            self.notify(
                text.clone(),
                PuzzleEvent::InscriptionRead {
                    pedestal: index,
                    text,
                },
            );
        }

        target
    }

    fn use_door(&mut self) {
        if self.solved && self.door.interact() {
            info!("Door opened, level complete");
            self.notify("Crossing the door...", PuzzleEvent::LevelComplete);
        } else {
            self.notify(
                "It's locked. Something still needs to be solved...",
                PuzzleEvent::DoorLocked,
            );
        }
    }

    /// Select, deselect, or swap with the given statue.
    pub fn handle_statue_selection(&mut self, statue: &StatueId) {
        if self.solved {
            self.notify("The puzzle is already solved.", PuzzleEvent::AlreadySolved);
            return;
        }

        let Some(index) = self.statue_index(statue) else {
            warn!("Ignoring selection of unknown statue '{}'", statue);
            return;
        };

        match self.selected.take() {
            None => {
                let chosen = &self.statues[index];
                let text = if chosen.phrase.is_empty() {
                    format!("Selected {}. Choose another statue to swap with.", chosen.name)
                } else {
                    format!(
                        "{}: {} Choose another statue to swap with.",
                        chosen.name, chosen.phrase
                    )
                };
                debug!("Selected statue {}", statue);
                self.selected = Some(statue.clone());
                self.notify(text, PuzzleEvent::StatueSelected(statue.clone()));
            }
            Some(current) if &current == statue => {
                debug!("Selection of {} canceled", statue);
                self.notify("Selection canceled.", PuzzleEvent::SelectionCanceled(current));
            }
            Some(current) => {
                self.swap(&current, statue);
                self.check_solution();
            }
        }

        self.refresh_highlights();
    }

    /// Exchange the slots of two statues and move both to their new slots.
    ///
    /// Returns `false` without changing anything once the puzzle is solved or
    /// when `a` and `b` are the same statue.
    ///
    /// # Panics
    ///
    /// If either id is not a statue of this puzzle. Ids come from the puzzle's
    /// own entities, so a miss means the slot bookkeeping is broken.
    pub fn swap(&mut self, a: &StatueId, b: &StatueId) -> bool {
        if self.solved || a == b {
            return false;
        }

        let slot_a = self.slot_of(a);
        let slot_b = self.slot_of(b);
        self.current_order.swap(slot_a, slot_b);
        self.place(slot_a);
        self.place(slot_b);

        debug!("Swapped {} (slot {}) with {} (slot {})", a, slot_a, b, slot_b);
        self.events.push(PuzzleEvent::StatuesSwapped {
            first: a.clone(),
            second: b.clone(),
        });
        true
    }

    /// Check whether every pedestal holds its statue, solving the puzzle if so.
    pub fn check_solution(&mut self) -> bool {
        if self.solved {
            return true;
        }

        let all_match = self
            .pedestals
            .iter()
            .zip(&self.current_order)
            .all(|(pedestal, occupant)| &pedestal.correct_statue_id == occupant);

        if all_match {
            self.solved = true;
            self.selected = None;
            self.door.unlock();
            info!("Statue puzzle solved, door unlocked");
            self.notify("Click... The door has been unlocked.", PuzzleEvent::Solved);
        } else {
            let names: Vec<&str> = self
                .current_order
                .iter()
                .filter_map(|id| self.statue(id).map(|s| s.name.as_str()))
                .collect();
            let hint = format!("Current order: {}", names.join(" - "));
            self.notify(
                hint,
                PuzzleEvent::OrderMismatch {
                    order: self.current_order.clone(),
                },
            );
        }

        self.refresh_highlights();
        all_match
    }

    /// Advance notice timers. No simulation happens here.
    pub fn update(&mut self, delta_time: f32) {
        self.messages.update(delta_time);
    }

    // === Bookkeeping ===

    fn notify(&mut self, text: impl Into<String>, event: PuzzleEvent) {
        self.messages.push(text);
        self.events.push(event);
    }

    fn statue_index(&self, id: &StatueId) -> Option<usize> {
        self.statues.iter().position(|s| &s.id == id)
    }

    fn slot_of(&self, id: &StatueId) -> usize {
        self.current_order
            .iter()
            .position(|occupant| occupant == id)
            .unwrap_or_else(|| panic!("statue '{id}' does not occupy any slot"))
    }

    /// Move the occupant of `slot` onto that slot.
    fn place(&mut self, slot: usize) {
        let position = self.slot_positions[slot];
        let id = &self.current_order[slot];
        if let Some(statue) = self.statues.iter_mut().find(|s| &s.id == id) {
            statue.reposition(position);
        }
    }

    fn refresh_highlights(&mut self) {
        let solved = self.solved.then_some(self.solved_color);
        for statue in &mut self.statues {
            statue.highlight = if solved.is_some() {
                solved
            } else if self.selected.as_ref() == Some(&statue.id) {
                Some(self.selection_color)
            } else {
                None
            };
        }
        for pedestal in &mut self.pedestals {
            pedestal.highlight = solved;
        }
    }

    // === Read-only accessors ===

    pub fn state(&self) -> PuzzleState<'_> {
        if self.solved {
            PuzzleState::Solved
        } else {
            PuzzleState::Unsolved {
                selection: self.selected.as_ref(),
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.solved
    }

    pub fn selected(&self) -> Option<&StatueId> {
        self.selected.as_ref()
    }

    pub fn current_order(&self) -> &[StatueId] {
        &self.current_order
    }

    pub fn slot_positions(&self) -> &[DVec3] {
        &self.slot_positions
    }

    pub fn statues(&self) -> &[Statue] {
        &self.statues
    }

    pub fn statue(&self, id: &StatueId) -> Option<&Statue> {
        self.statues.iter().find(|s| &s.id == id)
    }

    pub fn pedestals(&self) -> &[Pedestal] {
        &self.pedestals
    }

    pub fn door(&self) -> &Door {
        &self.door
    }

    /// Colliders that block the player: pedestals, statues and the door.
    pub fn obstacles(&self) -> Vec<BoundingBox> {
        self.interactables()
            .filter(|i| i.capabilities().has_collider)
            .map(|i| i.collider())
            .collect()
    }

    pub fn current_message(&self) -> Option<&str> {
        self.messages.current().map(|m| m.text.as_str())
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }
}
