//! Math utilities and types
//!
//! Vector, matrix and quaternion primitives come from nalgebra. On top of
//! those this module adds the integer key type used by the octree and the
//! NaN-guarded LU path used wherever a matrix is inverted during a tick.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Integer 3D vector (octree keys and ranges)
pub type IVec3 = Vector3<i32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// A pair of (min, max) corners describing an axis-aligned box
pub type MinMax = (Vec3, Vec3);

/// Replace NaN with zero, leave every other value untouched
///
/// NaN is the only value that compares unequal to itself.
#[inline]
#[allow(clippy::eq_op)]
pub fn nan_to_zero(value: f32) -> f32 {
    if value != value {
        0.0
    } else {
        value
    }
}

/// Component-wise NaN clamp for vectors
#[inline]
pub fn vec3_nan_to_zero(v: Vec3) -> Vec3 {
    v.map(nan_to_zero)
}

/// Convert an integer vector to a float vector
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn ivec3_to_vec3(v: IVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Rotation + scale model matrix with the translation left out
pub fn rotation_scale_matrix(rotation: &Quat, scale: &Vec3) -> Mat4 {
    rotation.to_homogeneous() * Mat4::new_nonuniform_scaling(scale)
}

/// Full TRS model matrix
pub fn model_matrix(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position) * rotation_scale_matrix(rotation, scale)
}

/// LU factorisation of a 4x4 matrix with partial pivoting
///
/// The unit lower triangle (multipliers) and the upper triangle share one
/// matrix; `pivot[i]` is the source row of row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    lu: Mat4,
    pivot: [usize; 4],
}

/// Factorise `matrix` into L and U
///
/// A NaN elimination multiplier (0/0 on a zero pivot) is treated as 0 so a
/// singular input degrades to a finite result instead of poisoning every
/// later row.
pub fn lu_decompose(matrix: &Mat4) -> LuDecomposition {
    let mut lu = *matrix;
    let mut pivot = [0, 1, 2, 3];

    for i in 0..4 {
        // Partial pivoting: bring the largest remaining entry of column i up
        let mut max_row = i;
        for r in (i + 1)..4 {
            if lu[(r, i)].abs() > lu[(max_row, i)].abs() {
                max_row = r;
            }
        }
        if max_row != i {
            lu.swap_rows(i, max_row);
            pivot.swap(i, max_row);
        }

        for k in (i + 1)..4 {
            let c = nan_to_zero(lu[(k, i)] / lu[(i, i)]);
            lu[(k, i)] = c;
            for j in (i + 1)..4 {
                lu[(k, j)] -= c * lu[(i, j)];
            }
        }
    }

    LuDecomposition { lu, pivot }
}

impl LuDecomposition {
    /// Solve `A x = b` using the stored factorisation
    pub fn solve(&self, b: &Vec4) -> Vec4 {
        let mut y = Vec4::new(
            b[self.pivot[0]],
            b[self.pivot[1]],
            b[self.pivot[2]],
            b[self.pivot[3]],
        );

        // Forward substitution with the unit lower triangle
        for i in 0..4 {
            for k in (i + 1)..4 {
                let c = nan_to_zero(self.lu[(k, i)]);
                y[k] -= c * y[i];
            }
        }

        // Back substitution with the upper triangle
        let mut x = y;
        for i in (0..4).rev() {
            for j in (i + 1)..4 {
                x[i] -= self.lu[(i, j)] * x[j];
            }
            x[i] = nan_to_zero(x[i] / self.lu[(i, i)]);
        }
        x
    }

    /// The combined L\U matrix
    pub fn factors(&self) -> &Mat4 {
        &self.lu
    }
}

/// Solve `matrix * x = b`
pub fn lu_solve(matrix: &Mat4, b: &Vec4) -> Vec4 {
    lu_decompose(matrix).solve(b)
}

/// Invert `matrix` column by column through one LU factorisation
pub fn lu_inverse(matrix: &Mat4) -> Mat4 {
    let lu = lu_decompose(matrix);
    let mut inverse = Mat4::zeros();
    for column in 0..4 {
        let mut unit = Vec4::zeros();
        unit[column] = 1.0;
        inverse.set_column(column, &lu.solve(&unit));
    }
    inverse
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nan_to_zero() {
        assert_eq!(nan_to_zero(f32::NAN), 0.0);
        assert_eq!(nan_to_zero(1.5), 1.5);
        assert_eq!(nan_to_zero(f32::INFINITY), f32::INFINITY);
        assert_eq!(vec3_nan_to_zero(Vec3::new(f32::NAN, 2.0, f32::NAN)), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_lu_inverse_of_trs_matrix() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 0.7);
        let matrix = model_matrix(&Vec3::new(1.0, -2.0, 3.0), &rotation, &Vec3::new(2.0, 1.0, 0.5));

        let inverse = lu_inverse(&matrix);

        assert_relative_eq!(matrix * inverse, Mat4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_lu_inverse_needs_pivoting() {
        // Zero on the leading diagonal forces a row swap
        let matrix = Mat4::new(
            0.0, 1.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        assert_relative_eq!(lu_inverse(&matrix), matrix, epsilon = 1e-6);
    }

    #[test]
    fn test_lu_solve_matches_direct_product() {
        let matrix = Mat4::new(
            4.0, 1.0, 0.0, 2.0,
            1.0, 3.0, 1.0, 0.0,
            0.0, 1.0, 5.0, 1.0,
            2.0, 0.0, 1.0, 6.0,
        );
        let x = Vec4::new(1.0, -1.0, 2.0, 0.5);
        let b = matrix * x;

        assert_relative_eq!(lu_solve(&matrix, &b), x, epsilon = 1e-5);
    }

    #[test]
    fn test_singular_matrix_degrades_to_finite_values() {
        let inverse = lu_inverse(&Mat4::zeros());
        assert!(inverse.iter().all(|v| !v.is_nan()));
    }
}
