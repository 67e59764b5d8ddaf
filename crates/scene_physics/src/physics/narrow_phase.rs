//! Narrow-phase contact resolution
//!
//! [`collision_check`] decides whether two colliders really touch once the
//! broad phase has paired their bounds, and if so reports the contact to
//! both entities.
//!
//! Shapes are first placed in world space:
//! - spheres scale their radius by the largest scale component
//! - AABBs reuse the collider's cached bounds, so they agree with the
//!   broad phase exactly
//! - oriented boxes follow the entity rotation with scaled half extents
//! - capsules become a segment along the rotated Y axis plus a radius
//!
//! Every test is inclusive, matching the broad phase: touching counts.

use crate::ecs::components::{ColliderComponent, ColliderShape, TransformComponent};
use crate::events::HitInfo;
use crate::foundation::math::{self, Mat4, MinMax, Vec3, Vec4};
use crate::physics::intersection;

const EPSILON: f32 = 1e-6;

/// Resolved contact between shape A and shape B
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World-space contact point
    pub point: Vec3,
    /// Unit normal pointing from A towards B
    pub normal: Vec3,
    /// Overlap depth along the normal
    pub depth: f32,
}

impl Contact {
    fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Box in world space with unit axes
#[derive(Debug, Clone, Copy)]
struct WorldBox {
    centre: Vec3,
    axes: [Vec3; 3],
    half: Vec3,
    /// Rigid world transform (no scale); `None` for axis-aligned boxes
    frame: Option<Mat4>,
}

impl WorldBox {
    /// Point in box space
    fn to_local(&self, point: &Vec3) -> Vec3 {
        match &self.frame {
            None => point - self.centre,
            Some(frame) => {
                let local = math::lu_inverse(frame) * Vec4::new(point.x, point.y, point.z, 1.0);
                math::vec3_nan_to_zero(local.xyz())
            }
        }
    }

    fn to_world(&self, local: &Vec3) -> Vec3 {
        self.centre + self.axes[0] * local.x + self.axes[1] * local.y + self.axes[2] * local.z
    }

    /// Box corners in box space
    fn local_min_max(&self) -> MinMax {
        (-self.half, self.half)
    }

    fn closest_point(&self, point: &Vec3) -> Vec3 {
        let local = self.to_local(point);
        self.to_world(&intersection::closest_point_on_aabb(&self.local_min_max(), &local))
    }
}

#[derive(Debug, Clone, Copy)]
enum WorldShape {
    Sphere { centre: Vec3, radius: f32 },
    Cuboid(WorldBox),
    Capsule { a: Vec3, b: Vec3, radius: f32 },
}

impl WorldShape {
    fn new(transform: &TransformComponent, collider: &ColliderComponent) -> Self {
        let scale = transform.scale.abs();
        match collider.shape {
            ColliderShape::Sphere { radius } => Self::Sphere {
                centre: transform.position,
                radius: radius * scale.max(),
            },
            ColliderShape::Aabb { .. } => {
                let bounds = collider.bounds.translated(&transform.position);
                Self::Cuboid(WorldBox {
                    centre: bounds.centre,
                    axes: [Vec3::x(), Vec3::y(), Vec3::z()],
                    half: bounds.extents.abs(),
                    frame: None,
                })
            }
            ColliderShape::OrientedBox { half_extents } => {
                let rotation = transform.rotation;
                Self::Cuboid(WorldBox {
                    centre: transform.position,
                    axes: [rotation * Vec3::x(), rotation * Vec3::y(), rotation * Vec3::z()],
                    half: half_extents.abs().component_mul(&scale),
                    frame: Some(Mat4::new_translation(&transform.position) * rotation.to_homogeneous()),
                })
            }
            ColliderShape::Capsule { radius, half_height } => {
                let offset = transform.rotation * Vec3::new(0.0, half_height * scale.y, 0.0);
                Self::Capsule {
                    a: transform.position - offset,
                    b: transform.position + offset,
                    radius: radius * scale.x.max(scale.z),
                }
            }
        }
    }
}

/// Exact contact test between two colliders
///
/// Returns one [`HitInfo`] per participant: the first is addressed to A
/// with the normal pointing from A to B, the second to B with the normal
/// negated. Velocities are left at zero for the caller to fill in.
pub fn collision_check(
    transform_a: &TransformComponent,
    collider_a: &ColliderComponent,
    transform_b: &TransformComponent,
    collider_b: &ColliderComponent,
) -> Option<[HitInfo; 2]> {
    let shape_a = WorldShape::new(transform_a, collider_a);
    let shape_b = WorldShape::new(transform_b, collider_b);

    let contact = resolve(&shape_a, &shape_b)?;
    let hit = HitInfo::new(collider_a.entity, collider_b.entity, contact.point, contact.normal);
    Some([hit, hit.mirrored()])
}

fn resolve(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    use WorldShape::{Capsule, Cuboid, Sphere};

    match (a, b) {
        (Sphere { centre: ca, radius: ra }, Sphere { centre: cb, radius: rb }) => sphere_sphere_contact(ca, *ra, cb, *rb),
        (Cuboid(box_a), Cuboid(box_b)) => box_box(box_a, box_b),
        (Cuboid(cube), Sphere { centre, radius }) => box_sphere(cube, centre, *radius),
        (Sphere { .. }, Cuboid(_)) => resolve(b, a).map(Contact::flipped),
        (Capsule { a: p, b: q, radius }, Sphere { centre, radius: rs }) => {
            let closest = closest_on_segment(p, q, centre);
            sphere_sphere_contact(&closest, *radius, centre, *rs)
        }
        (Sphere { .. }, Capsule { .. }) => resolve(b, a).map(Contact::flipped),
        (Capsule { a: p1, b: q1, radius: r1 }, Capsule { a: p2, b: q2, radius: r2 }) => {
            let (c1, c2) = closest_between_segments(p1, q1, p2, q2);
            sphere_sphere_contact(&c1, *r1, &c2, *r2)
        }
        (Capsule { a: p, b: q, radius }, Cuboid(cube)) => {
            let core = closest_on_segment_to_box(p, q, cube);
            box_sphere(cube, &core, *radius).map(Contact::flipped)
        }
        (Cuboid(_), Capsule { .. }) => resolve(b, a).map(Contact::flipped),
    }
}

/// Sphere-sphere contact; coincident centres use +Y as the normal
pub fn sphere_sphere_contact(centre_a: &Vec3, radius_a: f32, centre_b: &Vec3, radius_b: f32) -> Option<Contact> {
    if !intersection::sphere_sphere(centre_a, radius_a, centre_b, radius_b) {
        return None;
    }

    let diff = centre_b - centre_a;
    let reach = radius_a + radius_b;
    let dist = diff.norm();
    let normal = if dist > EPSILON { diff / dist } else { Vec3::y() };
    let depth = reach - dist;

    Some(Contact {
        point: centre_a + normal * (radius_a - depth * 0.5),
        normal,
        depth,
    })
}

/// Box-sphere contact, normal from the box towards the sphere
fn box_sphere(cube: &WorldBox, centre: &Vec3, radius: f32) -> Option<Contact> {
    let local = cube.to_local(centre);
    let bounds = cube.local_min_max();
    if !intersection::aabb_sphere(&bounds, &local, radius) {
        return None;
    }

    let closest = cube.to_world(&intersection::closest_point_on_aabb(&bounds, &local));
    let to_sphere = centre - closest;
    let dist_sq = to_sphere.norm_squared();

    let dist = dist_sq.sqrt();
    if dist > EPSILON {
        return Some(Contact {
            point: closest,
            normal: to_sphere / dist,
            depth: radius - dist,
        });
    }

    // Centre inside the box: leave through the nearest face
    let mut min_pen = f32::MAX;
    let mut normal = Vec3::y();
    for axis in 0..3 {
        let pen_pos = cube.half[axis] - local[axis];
        let pen_neg = cube.half[axis] + local[axis];
        if pen_pos < min_pen {
            min_pen = pen_pos;
            normal = cube.axes[axis];
        }
        if pen_neg < min_pen {
            min_pen = pen_neg;
            normal = -cube.axes[axis];
        }
    }

    Some(Contact {
        point: centre - normal * radius,
        normal,
        depth: min_pen + radius,
    })
}

/// Separating-axis test over the 15 candidate axes of two boxes
fn box_box(a: &WorldBox, b: &WorldBox) -> Option<Contact> {
    let t = b.centre - a.centre;

    let mut axes: Vec<Vec3> = Vec::with_capacity(15);
    axes.extend_from_slice(&a.axes);
    axes.extend_from_slice(&b.axes);
    for edge_a in &a.axes {
        for edge_b in &b.axes {
            let cross = edge_a.cross(edge_b);
            let len = cross.norm();
            // Parallel edges add nothing a face axis does not
            if len > EPSILON {
                axes.push(cross / len);
            }
        }
    }

    let mut min_overlap = f32::MAX;
    let mut best_axis = Vec3::y();
    for axis in axes {
        let overlap = project(a, &axis) + project(b, &axis) - t.dot(&axis).abs();
        if overlap < 0.0 {
            return None;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
    }

    if best_axis.dot(&t) < 0.0 {
        best_axis = -best_axis;
    }

    // Midway between the two boxes' closest points to each other's centre
    let point = (a.closest_point(&b.centre) + b.closest_point(&a.centre)) * 0.5;

    Some(Contact {
        point,
        normal: best_axis,
        depth: min_overlap,
    })
}

fn project(cube: &WorldBox, axis: &Vec3) -> f32 {
    (0..3).map(|i| cube.half[i] * cube.axes[i].dot(axis).abs()).sum()
}

/// Closest point on segment `pq` to `point`
pub fn closest_on_segment(p: &Vec3, q: &Vec3, point: &Vec3) -> Vec3 {
    let d = q - p;
    let len_sq = d.norm_squared();
    if len_sq <= EPSILON {
        return *p;
    }
    let t = math::nan_to_zero((point - p).dot(&d) / len_sq).clamp(0.0, 1.0);
    p + d * t
}

/// Closest points between segments `p1q1` and `p2q2`
pub fn closest_between_segments(p1: &Vec3, q1: &Vec3, p2: &Vec3, q2: &Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    if a <= EPSILON && e <= EPSILON {
        return (*p1, *p2);
    }
    if a <= EPSILON {
        return (*p1, closest_on_segment(p2, q2, p1));
    }

    let c = d1.dot(&r);
    let (s, t) = if e <= EPSILON {
        ((-c / a).clamp(0.0, 1.0), 0.0)
    } else {
        let b = d1.dot(&d2);
        let denom = a * e - b * b;
        // Parallel segments: any s works, start from p1
        let mut s = if denom > EPSILON {
            ((b * f - c * e) / denom).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut t = (b * s + f) / e;
        if t < 0.0 {
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else if t > 1.0 {
            t = 1.0;
            s = ((b - c) / a).clamp(0.0, 1.0);
        }
        (s, t)
    };

    (p1 + d1 * s, p2 + d2 * t)
}

/// Point of segment `pq` closest to the box
///
/// In box space the squared distance to the box is a convex, piecewise
/// quadratic function of the segment parameter. Its pieces change only where
/// a coordinate crosses a face plane, so each piece is minimised in closed
/// form and the best one wins. A segment that enters the box yields a point
/// inside it.
fn closest_on_segment_to_box(p: &Vec3, q: &Vec3, cube: &WorldBox) -> Vec3 {
    let start = cube.to_local(p);
    let dir = cube.to_local(q) - start;
    let t = closest_param_to_box(&start, &dir, &cube.half);
    p + (q - p) * t
}

/// Parameter in `[0, 1]` of `start + dir * t` closest to the box `±half`
fn closest_param_to_box(start: &Vec3, dir: &Vec3, half: &Vec3) -> f32 {
    let mut breaks = vec![0.0, 1.0];
    for axis in 0..3 {
        if dir[axis].abs() > EPSILON {
            for plane in [-half[axis], half[axis]] {
                let t = (plane - start[axis]) / dir[axis];
                if t > 0.0 && t < 1.0 {
                    breaks.push(t);
                }
            }
        }
    }
    breaks.sort_by(f32::total_cmp);

    let mut best = (f32::MAX, 0.0);
    for span in breaks.windows(2) {
        let (lo, hi) = (span[0], span[1]);
        let mid = (lo + hi) * 0.5;

        // On this span each axis is below, inside or above its slab
        let (mut quad, mut lin) = (0.0, 0.0);
        for axis in 0..3 {
            let at = start[axis] + dir[axis] * mid;
            let plane = if at < -half[axis] {
                -half[axis]
            } else if at > half[axis] {
                half[axis]
            } else {
                continue;
            };
            quad += dir[axis] * dir[axis];
            lin += dir[axis] * (start[axis] - plane);
        }

        let t = if quad > EPSILON { (-lin / quad).clamp(lo, hi) } else { lo };
        let dist_sq = distance_sq_to_box(&(start + dir * t), half);
        if dist_sq < best.0 {
            best = (dist_sq, t);
        }
    }
    best.1
}

fn distance_sq_to_box(point: &Vec3, half: &Vec3) -> f32 {
    let outside = point.abs() - half;
    outside.sup(&Vec3::zeros()).norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;
    use crate::foundation::math::{constants::PI, Quat};
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    fn body(id: u32, position: Vec3, shape: ColliderShape) -> (TransformComponent, ColliderComponent) {
        let entity = Entity::new(id);
        let transform = TransformComponent::from_position(entity, position);
        let mut collider = ColliderComponent::new(entity, shape);
        collider.bounds = crate::physics::bounds::local_bounds(&shape, &transform);
        (transform, collider)
    }

    fn check(a: &(TransformComponent, ColliderComponent), b: &(TransformComponent, ColliderComponent)) -> Option<[HitInfo; 2]> {
        collision_check(&a.0, &a.1, &b.0, &b.1)
    }

    #[test]
    fn test_spheres_overlapping() {
        let a = body(1, Vec3::zeros(), ColliderShape::sphere(0.5));
        let b = body(2, Vec3::new(0.8, 0.0, 0.0), ColliderShape::sphere(0.5));

        let [hit_a, hit_b] = check(&a, &b).expect("spheres overlap");

        assert_eq!(hit_a.entity, Entity::new(1));
        assert_eq!(hit_a.colliding_entity, Entity::new(2));
        assert_relative_eq!(hit_a.normal, Vec3::new(1.0, 0.0, 0.0), epsilon = TOLERANCE);
        assert_relative_eq!(hit_b.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = TOLERANCE);
        assert_relative_eq!(hit_a.hit_point, Vec3::new(0.4, 0.0, 0.0), epsilon = TOLERANCE);
        assert_eq!(hit_a.hit_point, hit_b.hit_point);
    }

    #[test]
    fn test_spheres_apart() {
        let a = body(1, Vec3::zeros(), ColliderShape::sphere(0.5));
        let b = body(2, Vec3::new(1.2, 0.0, 0.0), ColliderShape::sphere(0.5));

        assert!(check(&a, &b).is_none());
    }

    #[test]
    fn test_coincident_spheres_use_up() {
        let a = body(1, Vec3::zeros(), ColliderShape::sphere(1.0));
        let b = body(2, Vec3::zeros(), ColliderShape::sphere(1.0));

        let [hit_a, _] = check(&a, &b).unwrap();
        assert_relative_eq!(hit_a.normal, Vec3::y());
    }

    #[test]
    fn test_sphere_radius_uses_largest_scale() {
        let mut a = body(1, Vec3::zeros(), ColliderShape::sphere(0.5));
        a.0.set_scale(Vec3::new(1.0, 3.0, 1.0));
        let b = body(2, Vec3::new(1.8, 0.0, 0.0), ColliderShape::sphere(0.5));

        assert!(check(&a, &b).is_some());
    }

    #[test]
    fn test_aabb_boxes() {
        let a = body(1, Vec3::zeros(), ColliderShape::aabb(Vec3::new(1.0, 1.0, 1.0)));
        let b = body(2, Vec3::new(1.5, 0.2, 0.0), ColliderShape::aabb(Vec3::new(1.0, 1.0, 1.0)));
        let c = body(3, Vec3::new(2.5, 0.0, 0.0), ColliderShape::aabb(Vec3::new(1.0, 1.0, 1.0)));

        let [hit, _] = check(&a, &b).expect("boxes overlap");
        assert_relative_eq!(hit.normal, Vec3::x(), epsilon = TOLERANCE);
        assert!(check(&a, &c).is_none());
    }

    #[test]
    fn test_rotated_box_sat() {
        // A cube rotated 45° about Y reaches sqrt(2) along X
        let mut a = body(1, Vec3::zeros(), ColliderShape::oriented_box(Vec3::new(1.0, 1.0, 1.0)));
        a.0.set_rotation(Quat::from_axis_angle(&Vec3::y_axis(), PI / 4.0));
        let near = body(2, Vec3::new(2.3, 0.0, 0.0), ColliderShape::oriented_box(Vec3::new(1.0, 1.0, 1.0)));
        let far = body(3, Vec3::new(2.5, 0.0, 0.0), ColliderShape::oriented_box(Vec3::new(1.0, 1.0, 1.0)));

        assert!(check(&a, &near).is_some());
        assert!(check(&a, &far).is_none());
    }

    #[test]
    fn test_box_sphere_both_orders() {
        let cube = body(1, Vec3::zeros(), ColliderShape::aabb(Vec3::new(1.0, 1.0, 1.0)));
        let ball = body(2, Vec3::new(1.4, 0.0, 0.0), ColliderShape::sphere(0.5));

        let [from_box, _] = check(&cube, &ball).expect("sphere touches face");
        assert_relative_eq!(from_box.normal, Vec3::x(), epsilon = TOLERANCE);
        assert_relative_eq!(from_box.hit_point, Vec3::new(1.0, 0.0, 0.0), epsilon = TOLERANCE);

        let [from_ball, to_box] = check(&ball, &cube).expect("symmetric");
        assert_relative_eq!(from_ball.normal, -Vec3::x(), epsilon = TOLERANCE);
        assert_eq!(to_box.entity, Entity::new(1));
    }

    #[test]
    fn test_oriented_box_sphere_uses_box_space() {
        let mut cube = body(1, Vec3::new(5.0, 0.0, 0.0), ColliderShape::oriented_box(Vec3::new(2.0, 0.5, 0.5)));
        cube.0.set_rotation(Quat::from_axis_angle(&Vec3::z_axis(), PI / 2.0));
        // The long axis now points along Y
        let above = body(2, Vec3::new(5.0, 2.3, 0.0), ColliderShape::sphere(0.5));
        let beside = body(3, Vec3::new(6.3, 0.0, 0.0), ColliderShape::sphere(0.5));

        let [hit, _] = check(&cube, &above).expect("sphere at the box tip");
        assert_relative_eq!(hit.normal, Vec3::y(), epsilon = TOLERANCE);
        assert!(check(&cube, &beside).is_none());
    }

    #[test]
    fn test_sphere_inside_box() {
        let cube = body(1, Vec3::zeros(), ColliderShape::aabb(Vec3::new(2.0, 2.0, 2.0)));
        let ball = body(2, Vec3::new(0.0, 0.0, 1.5), ColliderShape::sphere(0.1));

        let [hit, _] = check(&cube, &ball).unwrap();
        assert_relative_eq!(hit.normal, Vec3::z(), epsilon = TOLERANCE);
    }

    #[test]
    fn test_capsule_sphere() {
        let capsule = body(1, Vec3::zeros(), ColliderShape::capsule(0.5, 1.0));
        let top = body(2, Vec3::new(0.0, 1.8, 0.0), ColliderShape::sphere(0.5));
        let side = body(3, Vec3::new(1.2, 0.5, 0.0), ColliderShape::sphere(0.5));

        let [hit, _] = check(&capsule, &top).expect("sphere on the cap");
        assert_relative_eq!(hit.normal, Vec3::y(), epsilon = TOLERANCE);
        assert!(check(&capsule, &side).is_none());
    }

    #[test]
    fn test_crossed_capsules() {
        let a = body(1, Vec3::zeros(), ColliderShape::capsule(0.25, 2.0));
        let mut b = body(2, Vec3::new(0.0, 0.0, 0.4), ColliderShape::capsule(0.25, 2.0));
        b.0.set_rotation(Quat::from_axis_angle(&Vec3::z_axis(), PI / 2.0));

        let [hit, _] = check(&a, &b).expect("segments pass 0.4 apart");
        assert_relative_eq!(hit.normal, Vec3::z(), epsilon = TOLERANCE);

        b.0.set_position(Vec3::new(0.0, 0.0, 0.6));
        assert!(check(&a, &b).is_none());
    }

    #[test]
    fn test_capsule_box() {
        let cube = body(1, Vec3::zeros(), ColliderShape::aabb(Vec3::new(1.0, 1.0, 1.0)));
        let mut capsule = body(2, Vec3::new(0.0, 1.4, 0.0), ColliderShape::capsule(0.5, 2.0));
        capsule.0.set_rotation(Quat::from_axis_angle(&Vec3::z_axis(), PI / 2.0));

        let [hit, _] = check(&cube, &capsule).expect("capsule lying on the box");
        assert_relative_eq!(hit.normal, Vec3::y(), epsilon = TOLERANCE);

        capsule.0.set_position(Vec3::new(0.0, 1.6, 0.0));
        assert!(check(&cube, &capsule).is_none());
    }

    #[test]
    fn test_capsule_nearly_parallel_to_face() {
        let cube = body(1, Vec3::zeros(), ColliderShape::aabb(Vec3::new(1.0, 1.0, 1.0)));
        // Long thin capsule whose axis is (1, -0.015, 0): it clears the top
        // face by 0.035 at x = 1, inside its radius of 0.04
        let tilt = Quat::from_axis_angle(&Vec3::z_axis(), 1.0_f32.atan2(0.015));
        let mut capsule = body(2, Vec3::new(0.0, 1.05, 0.0), ColliderShape::capsule(0.04, 10.0));
        capsule.0.set_rotation(tilt);

        let [hit, _] = check(&cube, &capsule).expect("capsule grazes the top edge");
        assert!(hit.normal.y > 0.99);
        assert_relative_eq!(hit.hit_point, Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-3);

        capsule.0.set_position(Vec3::new(0.0, 1.08, 0.0));
        assert!(check(&cube, &capsule).is_none());
    }

    #[test]
    fn test_segment_box_closest_param() {
        let half = Vec3::new(1.0, 1.0, 1.0);

        // Crossing the box: the chosen point lies inside
        let t = closest_param_to_box(&Vec3::new(-3.0, 0.0, 0.0), &Vec3::new(6.0, 0.0, 0.0), &half);
        let point = Vec3::new(-3.0, 0.0, 0.0) + Vec3::new(6.0, 0.0, 0.0) * t;
        assert_relative_eq!(distance_sq_to_box(&point, &half), 0.0);

        // Diagonal pass beside a corner: closest where it passes (2, 2, 0)
        let start = Vec3::new(4.0, 0.0, 0.0);
        let dir = Vec3::new(-4.0, 4.0, 0.0);
        let t = closest_param_to_box(&start, &dir, &half);
        assert_relative_eq!(t, 0.5, epsilon = TOLERANCE);
        assert_relative_eq!(distance_sq_to_box(&(start + dir * t), &half), 2.0, epsilon = TOLERANCE);

        // Degenerate segment
        assert_relative_eq!(closest_param_to_box(&Vec3::new(3.0, 0.0, 0.0), &Vec3::zeros(), &half), 0.0);
    }

    #[test]
    fn test_segment_helpers() {
        let p = Vec3::zeros();
        let q = Vec3::new(2.0, 0.0, 0.0);

        assert_relative_eq!(closest_on_segment(&p, &q, &Vec3::new(1.0, 5.0, 0.0)), Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(closest_on_segment(&p, &q, &Vec3::new(-3.0, 0.0, 0.0)), p);
        assert_relative_eq!(closest_on_segment(&p, &p, &Vec3::new(1.0, 1.0, 1.0)), p);

        let (c1, c2) = closest_between_segments(
            &p,
            &q,
            &Vec3::new(1.0, -1.0, 1.0),
            &Vec3::new(1.0, 1.0, 1.0),
        );
        assert_relative_eq!(c1, Vec3::new(1.0, 0.0, 0.0), epsilon = TOLERANCE);
        assert_relative_eq!(c2, Vec3::new(1.0, 0.0, 1.0), epsilon = TOLERANCE);
    }
}
