//! Axis-aligned bounding boxes in the horizontal (XZ) plane.
//!
//! Height is ignored on purpose: every collision and trigger test in the game
//! is a 2D footprint test. Boxes are plain values; moving an entity produces a
//! new box instead of editing the old one in place.

use bevy::math::{DVec2, DVec3};

/// Rectangle in the XZ plane with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl BoundingBox {
    /// Build a box from any two opposite corners, in any order.
    pub fn new(p1: DVec3, p2: DVec3) -> Self {
        Self {
            min_x: p1.x.min(p2.x),
            max_x: p1.x.max(p2.x),
            min_z: p1.z.min(p2.z),
            max_z: p1.z.max(p2.z),
        }
    }

    /// Footprint of a box of `size` centred on `center`.
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = DVec3::new(size.x.abs() / 2.0, 0.0, size.z.abs() / 2.0);
        Self::new(center - half, center + half)
    }

    /// Separating-axis test. Boxes that only touch along an edge overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if self.max_x < other.min_x || self.min_x > other.max_x {
            return false;
        }
        if self.max_z < other.min_z || self.min_z > other.max_z {
            return false;
        }
        true
    }

    /// A copy of this box shifted by `(dx, dz)`.
    pub fn translated(&self, dx: f64, dz: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            max_x: self.max_x + dx,
            min_z: self.min_z + dz,
            max_z: self.max_z + dz,
        }
    }

    /// A copy of this box with the same extent, centred on `center`.
    pub fn recentered(&self, center: DVec3) -> Self {
        let current = self.center();
        self.translated(center.x - current.x, center.z - current.y)
    }

    /// Centre of the box as `(x, z)`.
    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x:[{:.2}, {:.2}] z:[{:.2}, {:.2}]",
            self.min_x, self.max_x, self.min_z, self.max_z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn planar(x1: f64, z1: f64, x2: f64, z2: f64) -> BoundingBox {
        BoundingBox::new(DVec3::new(x1, 0.0, z1), DVec3::new(x2, 0.0, z2))
    }

    #[test]
    fn new_normalizes_reversed_corners() {
        let b = planar(3.0, -1.0, -2.0, 4.0);
        assert_eq!(b.min_x, -2.0);
        assert_eq!(b.max_x, 3.0);
        assert_eq!(b.min_z, -1.0);
        assert_eq!(b.max_z, 4.0);
    }

    #[test]
    fn height_is_ignored() {
        let low = BoundingBox::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 1.0));
        let high = BoundingBox::new(DVec3::new(0.0, 50.0, 0.0), DVec3::new(1.0, 90.0, 1.0));
        assert_eq!(low, high);
    }

    #[test]
    fn touching_edges_overlap() {
        let a = planar(0.0, 0.0, 1.0, 1.0);
        let b = planar(1.0, 0.5, 2.0, 1.5);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn separated_boxes_do_not_overlap() {
        let a = planar(0.0, 0.0, 1.0, 1.0);
        assert!(!a.overlaps(&planar(1.01, 0.0, 2.0, 1.0)));
        assert!(!a.overlaps(&planar(0.0, -3.0, 1.0, -1.5)));
    }

    #[test]
    fn contained_box_overlaps() {
        let outer = planar(-5.0, -5.0, 5.0, 5.0);
        let inner = planar(-1.0, -1.0, 1.0, 1.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn translated_leaves_original_untouched() {
        let a = planar(0.0, 0.0, 1.0, 1.0);
        let moved = a.translated(2.0, -1.0);
        assert_eq!(a, planar(0.0, 0.0, 1.0, 1.0));
        assert_eq!(moved, planar(2.0, -1.0, 3.0, 0.0));
    }

    #[test]
    fn from_center_size_and_recentered() {
        let b =
            BoundingBox::from_center_size(DVec3::new(2.0, 1.0, -2.0), DVec3::new(2.0, 5.0, 4.0));
        assert_eq!(b, planar(1.0, -4.0, 3.0, 0.0));

        let moved = b.recentered(DVec3::new(10.0, 0.0, 10.0));
        assert_eq!(moved.center(), DVec2::new(10.0, 10.0));
        assert_eq!(moved.width(), 2.0);
        assert_eq!(moved.depth(), 4.0);
    }

    proptest! {
        #[test]
        fn normalization_holds_for_any_corners(
            x1 in -1e3f64..1e3, z1 in -1e3f64..1e3,
            x2 in -1e3f64..1e3, z2 in -1e3f64..1e3,
        ) {
            let b = planar(x1, z1, x2, z2);
            prop_assert!(b.min_x <= b.max_x);
            prop_assert!(b.min_z <= b.max_z);
        }

        #[test]
        fn overlap_is_symmetric(
            ax in -50f64..50.0, az in -50f64..50.0, aw in 0f64..20.0, ad in 0f64..20.0,
            bx in -50f64..50.0, bz in -50f64..50.0, bw in 0f64..20.0, bd in 0f64..20.0,
        ) {
            let a = planar(ax, az, ax + aw, az + ad);
            let b = planar(bx, bz, bx + bw, bz + bd);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
