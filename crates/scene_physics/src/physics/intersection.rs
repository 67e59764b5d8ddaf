//! Static overlap predicates
//!
//! All tests are inclusive: shapes that only touch count as overlapping.

use crate::foundation::math::{MinMax, Vec3};

/// Box-box overlap on (min, max) corners
pub fn aabb_aabb(a: &MinMax, b: &MinMax) -> bool {
    (a.0.x <= b.1.x && a.1.x >= b.0.x)
        && (a.0.y <= b.1.y && a.1.y >= b.0.y)
        && (a.0.z <= b.1.z && a.1.z >= b.0.z)
}

/// Closest point of the box to `point` (the point itself when inside)
pub fn closest_point_on_aabb(aabb: &MinMax, point: &Vec3) -> Vec3 {
    point.sup(&aabb.0).inf(&aabb.1)
}

/// Box-sphere overlap
pub fn aabb_sphere(aabb: &MinMax, centre: &Vec3, radius: f32) -> bool {
    let closest = closest_point_on_aabb(aabb, centre);
    (closest - centre).norm_squared() <= radius * radius
}

/// Sphere-sphere overlap
pub fn sphere_sphere(centre_a: &Vec3, radius_a: f32, centre_b: &Vec3, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    (centre_b - centre_a).norm_squared() <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn aabb(min: [f32; 3], max: [f32; 3]) -> MinMax {
        (Vec3::from(min), Vec3::from(max))
    }

    #[test]
    fn test_shared_face_overlaps() {
        let a = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = aabb([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);

        assert!(aabb_aabb(&a, &b));
        assert!(aabb_aabb(&b, &a));
    }

    #[test]
    fn test_separated_boxes() {
        let a = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = aabb([2.0, 2.0, 2.0], [3.0, 3.0, 3.0]);
        assert!(!aabb_aabb(&a, &b));

        // Separated on one axis only
        let c = aabb([0.0, 0.0, 1.5], [1.0, 1.0, 2.0]);
        assert!(!aabb_aabb(&a, &c));
    }

    #[test]
    fn test_aabb_aabb_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut random_box = || {
            let min = Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let size = Vec3::new(rng.gen_range(0.0..3.0), rng.gen_range(0.0..3.0), rng.gen_range(0.0..3.0));
            (min, min + size)
        };

        for _ in 0..200 {
            let a = random_box();
            let b = random_box();
            assert_eq!(aabb_aabb(&a, &b), aabb_aabb(&b, &a));
        }
    }

    #[test]
    fn test_aabb_sphere() {
        let a = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);

        assert!(aabb_sphere(&a, &Vec3::new(0.5, 0.5, 0.5), 0.1));
        assert!(aabb_sphere(&a, &Vec3::new(2.0, 0.5, 0.5), 1.0));
        assert!(!aabb_sphere(&a, &Vec3::new(2.0, 2.0, 0.5), 1.0));
    }

    #[test]
    fn test_sphere_sphere_touching() {
        let a = Vec3::zeros();
        let b = Vec3::new(2.0, 0.0, 0.0);

        assert!(sphere_sphere(&a, 1.0, &b, 1.0));
        assert!(!sphere_sphere(&a, 0.9, &b, 1.0));
    }
}
