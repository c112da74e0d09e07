//! Sliding movement resolution against static obstacles.

use super::bounding_box::BoundingBox;

/// Clip a desired displacement so the actor does not enter any obstacle.
///
/// Each axis is tested on its own, always starting from the original box, so a
/// diagonal move into a wall keeps the unblocked component and the actor
/// slides along the wall instead of stopping dead.
pub fn resolve(
    actor_box: BoundingBox,
    desired_dx: f64,
    desired_dz: f64,
    obstacles: &[BoundingBox],
) -> (f64, f64) {
    let mut allowed_dx = desired_dx;
    if desired_dx != 0.0 {
        let future = actor_box.translated(desired_dx, 0.0);
        if obstacles.iter().any(|wall| future.overlaps(wall)) {
            allowed_dx = 0.0;
        }
    }

    let mut allowed_dz = desired_dz;
    if desired_dz != 0.0 {
        let future = actor_box.translated(0.0, desired_dz);
        if obstacles.iter().any(|wall| future.overlaps(wall)) {
            allowed_dz = 0.0;
        }
    }

    (allowed_dx, allowed_dz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec3;
    use proptest::prelude::*;

    fn square(cx: f64, cz: f64, half: f64) -> BoundingBox {
        BoundingBox::new(
            DVec3::new(cx - half, 0.0, cz - half),
            DVec3::new(cx + half, 0.0, cz + half),
        )
    }

    #[test]
    fn slides_along_wall_to_the_east() {
        let actor = square(0.0, 0.0, 0.5);
        // Tall wall just east of the actor.
        let wall = BoundingBox::new(DVec3::new(0.6, 0.0, -10.0), DVec3::new(1.6, 0.0, 10.0));

        let (dx, dz) = resolve(actor, 0.2, 0.3, &[wall]);
        assert_eq!(dx, 0.0);
        assert_eq!(dz, 0.3);
    }

    #[test]
    fn blocked_on_both_axes_in_a_corner() {
        let actor = square(0.0, 0.0, 0.5);
        let east = BoundingBox::new(DVec3::new(0.6, 0.0, -10.0), DVec3::new(1.6, 0.0, 10.0));
        let north = BoundingBox::new(DVec3::new(-10.0, 0.0, 0.6), DVec3::new(10.0, 0.0, 1.6));

        assert_eq!(resolve(actor, 0.2, 0.2, &[east, north]), (0.0, 0.0));
    }

    #[test]
    fn moving_away_from_a_touching_wall_is_allowed() {
        let actor = square(0.0, 0.0, 0.5);
        let wall = BoundingBox::new(DVec3::new(0.5, 0.0, -1.0), DVec3::new(1.0, 0.0, 1.0));

        // The actor already touches the wall, so any x move that keeps it touching
        // is rejected, while moving away is free.
        assert_eq!(resolve(actor, 0.1, 0.0, &[wall]).0, 0.0);
        assert_eq!(resolve(actor, -0.1, 0.0, &[wall]).0, -0.1);
    }

    #[test]
    fn axes_use_the_original_box() {
        // A diagonal-only obstacle: neither single-axis move reaches it.
        let actor = square(0.0, 0.0, 0.5);
        let corner = square(1.3, 1.3, 0.5);

        assert_eq!(resolve(actor, 0.5, 0.5, &[corner]), (0.5, 0.5));
    }

    proptest! {
        #[test]
        fn free_movement_without_obstacles(
            cx in -100f64..100.0, cz in -100f64..100.0,
            dx in -5f64..5.0, dz in -5f64..5.0,
        ) {
            prop_assert_eq!(resolve(square(cx, cz, 0.5), dx, dz, &[]), (dx, dz));
        }
    }
}
