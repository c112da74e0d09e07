//! Interaction targeting: what is the player looking at?

use bevy::math::{DVec2, DVec3};

use super::bounding_box::BoundingBox;
use crate::puzzle::{EntityRef, Interactable};

/// Cosine of the widest accepted aim angle (~41.4 degrees off forward).
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.75;

/// Replaces a direction component of exactly zero in the slab test.
const SLAB_EPSILON: f64 = 1e-8;

/// Horizontal forward vector for a yaw angle in degrees.
///
/// An angle of 0 faces +Z and 90 faces +X.
pub fn forward(facing_angle_deg: f64) -> DVec2 {
    let rad = facing_angle_deg.to_radians();
    DVec2::new(rad.sin(), rad.cos())
}

/// Cone query selecting the closest interactable in front of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionRaycaster {
    /// Minimum dot product between forward and the direction to a candidate.
    pub acceptance_threshold: f64,
}

impl Default for InteractionRaycaster {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}

impl InteractionRaycaster {
    pub fn new(acceptance_threshold: f64) -> Self {
        Self { acceptance_threshold }
    }

    /// Return the nearest candidate within `max_distance` whose direction from
    /// `origin` lies inside the acceptance cone.
    ///
    /// Ties keep the earliest candidate in `candidates`.
    pub fn cast(
        &self,
        origin: DVec3,
        facing_angle_deg: f64,
        candidates: &[Interactable<'_>],
        max_distance: f64,
    ) -> Option<EntityRef> {
        let forward = forward(facing_angle_deg);
        let max_distance_sq = max_distance * max_distance;

        let mut best: Option<(&Interactable<'_>, f64)> = None;

        for candidate in candidates {
            let target = candidate.position();
            let to_target = DVec2::new(target.x - origin.x, target.z - origin.z);

            let distance_sq = to_target.length_squared();
            if distance_sq > max_distance_sq {
                continue;
            }

            let distance = distance_sq.sqrt();
            // Standing on top of a target counts as aiming at it.
            if distance > 0.0 {
                let aim = (to_target / distance).dot(forward);
                if aim <= self.acceptance_threshold {
                    continue;
                }
            }

            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((candidate, distance));
            }
        }

        best.map(|(candidate, _)| candidate.entity_ref())
    }
}

/// 2D slab test of a ray from `origin` along `facing_angle_deg` against `bounds`.
///
/// Hits only if the box is in front of the origin and is entered within
/// `max_distance`. An origin inside the box enters at distance zero.
pub fn ray_intersects_box(
    origin: DVec3,
    facing_angle_deg: f64,
    bounds: &BoundingBox,
    max_distance: f64,
) -> bool {
    let dir = forward(facing_angle_deg);
    let dir_x = if dir.x == 0.0 { SLAB_EPSILON } else { dir.x };
    let dir_z = if dir.y == 0.0 { SLAB_EPSILON } else { dir.y };

    let tx1 = (bounds.min_x - origin.x) / dir_x;
    let tx2 = (bounds.max_x - origin.x) / dir_x;
    let tz1 = (bounds.min_z - origin.z) / dir_z;
    let tz2 = (bounds.max_z - origin.z) / dir_z;

    let t_min = tx1.min(tx2).max(tz1.min(tz2));
    let t_max = tx1.max(tx2).min(tz1.max(tz2));

    if t_max < 0.0 {
        return false;
    }
    if t_min > t_max {
        return false;
    }

    t_min.max(0.0) <= max_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Pedestal, Statue, StatueId, TextureHandle};

    fn statue_at(id: &str, x: f64, z: f64) -> Statue {
        Statue::new(
            StatueId::from(id),
            id.to_string(),
            String::new(),
            DVec3::new(x, 0.0, z),
            DVec3::new(1.0, 2.0, 1.0),
            0.0,
            TextureHandle::NONE,
        )
    }

    fn hit(statues: &[Statue], angle: f64) -> Option<EntityRef> {
        let candidates: Vec<_> = statues.iter().map(Interactable::Statue).collect();
        InteractionRaycaster::default().cast(DVec3::ZERO, angle, &candidates, 8.0)
    }

    #[test]
    fn forward_matches_yaw_convention() {
        let north = forward(0.0);
        assert!((north.x).abs() < 1e-12 && (north.y - 1.0).abs() < 1e-12);
        let east = forward(90.0);
        assert!((east.x - 1.0).abs() < 1e-12 && east.y.abs() < 1e-12);
    }

    #[test]
    fn selects_target_straight_ahead() {
        let statues = [statue_at("a", 0.0, 3.0)];
        assert_eq!(hit(&statues, 0.0), Some(EntityRef::Statue(StatueId::from("a"))));
        assert_eq!(hit(&statues, 180.0), None);
    }

    #[test]
    fn rejects_targets_beyond_range() {
        let statues = [statue_at("far", 0.0, 8.5)];
        assert_eq!(hit(&statues, 0.0), None);
    }

    #[test]
    fn cone_boundary_around_threshold() {
        // acos(0.75) is about 41.41 degrees.
        let r = 4.0;
        let place = |deg: f64| {
            let d = forward(deg);
            statue_at("edge", d.x * r, d.y * r)
        };

        assert!(hit(&[place(40.0)], 0.0).is_some());
        assert!(hit(&[place(-40.0)], 0.0).is_some());
        assert!(hit(&[place(43.0)], 0.0).is_none());
        assert!(hit(&[place(-43.0)], 0.0).is_none());
    }

    #[test]
    fn aim_exactly_on_threshold_is_rejected() {
        fn candidates(statues: &[Statue]) -> Vec<Interactable<'_>> {
            statues.iter().map(Interactable::Statue).collect()
        }

        // A 3-4-5 triangle gives exact cosines of 0.6 and 0.8.
        let wide = [statue_at("wide", 4.0, 3.0)];
        let narrow = [statue_at("narrow", 3.0, 4.0)];

        let raycaster = InteractionRaycaster::new(0.6);
        assert_eq!(raycaster.cast(DVec3::ZERO, 0.0, &candidates(&wide), 8.0), None);
        assert_eq!(
            raycaster.cast(DVec3::ZERO, 0.0, &candidates(&narrow), 8.0),
            Some(EntityRef::Statue(StatueId::from("narrow")))
        );

        let raycaster = InteractionRaycaster::new(0.8);
        assert_eq!(raycaster.cast(DVec3::ZERO, 0.0, &candidates(&narrow), 8.0), None);
    }

    #[test]
    fn threshold_is_configurable() {
        let d = forward(60.0);
        let statue = statue_at("wide", d.x * 3.0, d.y * 3.0);
        let candidates = [Interactable::Statue(&statue)];

        assert!(InteractionRaycaster::default()
            .cast(DVec3::ZERO, 0.0, &candidates, 8.0)
            .is_none());
        assert!(InteractionRaycaster::new(0.4)
            .cast(DVec3::ZERO, 0.0, &candidates, 8.0)
            .is_some());
    }

    #[test]
    fn nearest_candidate_wins() {
        let statues = [statue_at("far", 0.5, 6.0), statue_at("near", -0.5, 2.0)];
        assert_eq!(hit(&statues, 0.0), Some(EntityRef::Statue(StatueId::from("near"))));
    }

    #[test]
    fn first_candidate_wins_ties() {
        let statues = [statue_at("left", -1.0, 4.0), statue_at("right", 1.0, 4.0)];
        assert_eq!(hit(&statues, 0.0), Some(EntityRef::Statue(StatueId::from("left"))));

        let reversed = [statue_at("right", 1.0, 4.0), statue_at("left", -1.0, 4.0)];
        assert_eq!(hit(&reversed, 0.0), Some(EntityRef::Statue(StatueId::from("right"))));
    }

    #[test]
    fn mixed_candidates_report_their_kind() {
        let pedestal = Pedestal::new(
            0,
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(1.0, 1.0, 1.0),
            "Here rests the first".to_string(),
            StatueId::from("a"),
            TextureHandle::NONE,
        );
        let candidates = [Interactable::Pedestal(&pedestal)];
        assert_eq!(
            InteractionRaycaster::default().cast(DVec3::ZERO, 0.0, &candidates, 8.0),
            Some(EntityRef::Pedestal(0))
        );
    }

    #[test]
    fn empty_candidates_yield_none() {
        assert_eq!(hit(&[], 0.0), None);
    }

    fn wall_ahead() -> BoundingBox {
        BoundingBox::new(DVec3::new(-2.0, 0.0, 4.0), DVec3::new(2.0, 0.0, 5.0))
    }

    #[test]
    fn slab_hits_box_in_front() {
        assert!(ray_intersects_box(DVec3::ZERO, 0.0, &wall_ahead(), 8.0));
        // Axis-aligned ray: x component is exactly zero.
        assert!(ray_intersects_box(DVec3::new(1.5, 0.0, 0.0), 0.0, &wall_ahead(), 8.0));
    }

    #[test]
    fn slab_rejects_box_behind() {
        assert!(!ray_intersects_box(DVec3::ZERO, 180.0, &wall_ahead(), 8.0));
    }

    #[test]
    fn slab_rejects_missed_box() {
        assert!(!ray_intersects_box(DVec3::new(3.0, 0.0, 0.0), 0.0, &wall_ahead(), 8.0));
        assert!(!ray_intersects_box(DVec3::ZERO, 90.0, &wall_ahead(), 8.0));
    }

    #[test]
    fn slab_respects_max_distance() {
        assert!(!ray_intersects_box(DVec3::ZERO, 0.0, &wall_ahead(), 3.9));
        assert!(ray_intersects_box(DVec3::ZERO, 0.0, &wall_ahead(), 4.0));
    }

    #[test]
    fn slab_hits_from_inside() {
        let origin = DVec3::new(0.0, 0.0, 4.5);
        assert!(ray_intersects_box(origin, 180.0, &wall_ahead(), 0.1));
    }
}
