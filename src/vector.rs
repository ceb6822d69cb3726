use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;
use crate::matrix::{ Matrix, MatrixError };

/// A position or direction in 3D space.
///
/// The `is_point` tag decides the homogeneous w component (1 for points, 0
/// for directions), so affine transforms translate points but leave
/// directions alone. Arithmetic carries the tag through the natural rules:
/// point − point = direction, point + direction = point, cross products and
/// normalized vectors are directions. Equality ignores the tag and compares
/// components within the crate tolerance.
#[derive(Debug, Copy, Clone, PartialOrd)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub is_point: bool,
}

impl Vector3D {
    pub fn point(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D { x, y, z, is_point: true }
    }

    pub fn direction(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D { x, y, z, is_point: false }
    }

    /// Same components, tagged as a point.
    pub fn as_point(&self) -> Vector3D {
        Vector3D { is_point: true, ..*self }
    }

    /// Same components, tagged as a direction.
    pub fn as_direction(&self) -> Vector3D {
        Vector3D { is_point: false, ..*self }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector with this vector's orientation. Undefined for a zero
    /// vector; callers must not normalize one.
    pub fn normalize(&self) -> Vector3D {
        let length = self.length();
        Vector3D::direction(self.x / length, self.y / length, self.z / length)
    }

    pub fn dot(&self, other: &Vector3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Vector3D {
        Vector3D::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Mirrors this vector across `normal` (assumed unit):
    /// `2(N·V)N − V`. Both vectors point away from the surface.
    pub fn reflect_across(&self, normal: &Vector3D) -> Vector3D {
        (*normal * (2.0 * self.dot(normal)) - *self).as_direction()
    }

    /// The 4×1 homogeneous column for this vector: w is 1 for points and 0
    /// for directions.
    pub fn as_homogeneous(&self) -> Matrix {
        let w = if self.is_point { 1.0 } else { 0.0 };
        Matrix::column4(self.x, self.y, self.z, w)
    }

    /// Reads a vector back out of a 4×1 homogeneous column.
    pub fn from_homogeneous(column: &Matrix) -> Result<Vector3D, MatrixError> {
        if column.rows() != 4 || column.cols() != 1 {
            return Err(MatrixError::NotHomogeneous {
                rows: column.rows(),
                cols: column.cols(),
            });
        }

        Ok(Vector3D {
            x: column[(0, 0)],
            y: column[(1, 0)],
            z: column[(2, 0)],
            is_point: column[(3, 0)] != 0.0,
        })
    }

    /// Re-expresses this vector through a transform, going out and back
    /// through homogeneous coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use phong_tracer::vector::Vector3D;
    /// use phong_tracer::matrix::Matrix;
    ///
    /// let m = Matrix::translation(5.0, 0.0, 0.0);
    /// let p = Vector3D::point(1.0, 2.0, 3.0).transform(&m).unwrap();
    /// let d = Vector3D::direction(1.0, 2.0, 3.0).transform(&m).unwrap();
    ///
    /// assert_eq!(p, Vector3D::point(6.0, 2.0, 3.0));
    /// assert_eq!(d, Vector3D::direction(1.0, 2.0, 3.0));
    /// ```
    pub fn transform(&self, matrix: &Matrix) -> Result<Vector3D, MatrixError> {
        let transformed = matrix.multiply(&self.as_homogeneous())?;
        Vector3D::from_homogeneous(&transformed)
    }
}

impl Default for Vector3D {
    fn default() -> Vector3D {
        Vector3D::point(0.0, 0.0, 0.0)
    }
}

impl PartialEq for Vector3D {
    fn eq(&self, other: &Vector3D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, other: Vector3D) -> Vector3D {
        Vector3D {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            is_point: self.is_point || other.is_point,
        }
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, other: Vector3D) -> Vector3D {
        Vector3D {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            is_point: self.is_point && !other.is_point,
        }
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        Vector3D { x: -self.x, y: -self.y, z: -self.z, is_point: self.is_point }
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, scalar: f64) -> Vector3D {
        Vector3D {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
            is_point: self.is_point,
        }
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, vector: Vector3D) -> Vector3D {
        vector * self
    }
}

impl Div<f64> for Vector3D {
    type Output = Vector3D;

    fn div(self, scalar: f64) -> Vector3D {
        self * (1.0 / scalar)
    }
}

/* Tests */

#[test]
fn add_point_and_direction() {
    let p = Vector3D::point(3.0, -2.0, 5.0);
    let d = Vector3D::direction(-2.0, 3.0, 1.0);

    let sum = p + d;
    assert_eq!(sum, Vector3D::point(1.0, 1.0, 6.0));
    assert!(sum.is_point);
}

#[test]
fn sub_points_gives_direction() {
    let p1 = Vector3D::point(3.0, 2.0, 1.0);
    let p2 = Vector3D::point(5.0, 6.0, 7.0);

    let diff = p1 - p2;
    assert_eq!(diff, Vector3D::direction(-2.0, -4.0, -6.0));
    assert!(!diff.is_point);
}

#[test]
fn sub_direction_from_point_gives_point() {
    let p = Vector3D::point(3.0, 2.0, 1.0);
    let d = Vector3D::direction(5.0, 6.0, 7.0);

    let moved = p - d;
    assert_eq!(moved, Vector3D::point(-2.0, -4.0, -6.0));
    assert!(moved.is_point);
}

#[test]
fn scale_and_divide() {
    let v = Vector3D::direction(1.0, -2.0, 3.0);

    assert_eq!(v * 3.5, Vector3D::direction(3.5, -7.0, 10.5));
    assert_eq!(3.5 * v, Vector3D::direction(3.5, -7.0, 10.5));
    assert_eq!(v / 2.0, Vector3D::direction(0.5, -1.0, 1.5));
    assert_eq!(-v, Vector3D::direction(-1.0, 2.0, -3.0));
}

#[test]
fn length_of_known_vectors() {
    assert!(feq(Vector3D::direction(1.0, 0.0, 0.0).length(), 1.0));
    assert!(feq(Vector3D::direction(1.0, 2.0, 3.0).length(), 14.0_f64.sqrt()));
}

#[test]
fn normalize_produces_unit_length() {
    let vectors = [
        Vector3D::direction(4.0, 0.0, 0.0),
        Vector3D::direction(1.0, 2.0, 3.0),
        Vector3D::direction(-0.3, 17.9, 2.4),
    ];

    for v in vectors.iter() {
        assert!(crate::feq_eps(v.normalize().length(), 1.0, 1e-6));
    }
}

#[test]
fn dot_product() {
    let a = Vector3D::direction(1.0, 2.0, 3.0);
    let b = Vector3D::direction(2.0, 3.0, 4.0);

    assert!(feq(a.dot(&b), 20.0));
}

#[test]
fn cross_product_is_orthogonal_and_anticommutes() {
    let a = Vector3D::direction(1.0, 2.0, 3.0);
    let b = Vector3D::direction(2.0, 3.0, 4.0);
    let c = a.cross(&b);

    assert_eq!(c, Vector3D::direction(-1.0, 2.0, -1.0));
    assert!(feq(c.dot(&a), 0.0));
    assert!(feq(c.dot(&b), 0.0));
    assert_eq!(a.cross(&b), -(b.cross(&a)));
}

#[test]
fn equality_is_tolerance_based() {
    let a = Vector3D::point(1.0, 2.0, 3.0);
    let b = Vector3D::point(1.0 + 5e-13, 2.0, 3.0 - 5e-13);
    let c = Vector3D::point(1.0 + 1e-9, 2.0, 3.0);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn equality_ignores_tag() {
    assert_eq!(Vector3D::point(1.0, 2.0, 3.0), Vector3D::direction(1.0, 2.0, 3.0));
}

#[test]
fn homogeneous_round_trip() {
    let p = Vector3D::point(1.0, -2.0, 3.0);
    let d = Vector3D::direction(1.0, -2.0, 3.0);

    let hp = p.as_homogeneous();
    let hd = d.as_homogeneous();

    assert!(feq(hp[(3, 0)], 1.0));
    assert!(feq(hd[(3, 0)], 0.0));

    let p2 = Vector3D::from_homogeneous(&hp).unwrap();
    let d2 = Vector3D::from_homogeneous(&hd).unwrap();

    assert_eq!(p, p2);
    assert!(p2.is_point);
    assert_eq!(d, d2);
    assert!(!d2.is_point);
}

#[test]
fn from_homogeneous_rejects_other_shapes() {
    let m = Matrix::identity(4);

    match Vector3D::from_homogeneous(&m) {
        Err(MatrixError::NotHomogeneous { rows: 4, cols: 4 }) => (),
        other => panic!("expected NotHomogeneous, got {:?}", other),
    }
}

#[test]
fn transform_translates_points_but_not_directions() {
    let m = Matrix::translation(5.0, -3.0, 2.0);

    let p = Vector3D::point(-3.0, 4.0, 5.0).transform(&m).unwrap();
    let d = Vector3D::direction(-3.0, 4.0, 5.0).transform(&m).unwrap();

    assert_eq!(p, Vector3D::point(2.0, 1.0, 7.0));
    assert_eq!(d, Vector3D::direction(-3.0, 4.0, 5.0));
}

#[test]
fn reflect_across_surface_normal() {
    let half = 2.0_f64.sqrt() / 2.0;
    let to_light = Vector3D::direction(half, half, 0.0);
    let normal = Vector3D::direction(0.0, 1.0, 0.0);

    let reflected = to_light.reflect_across(&normal);
    assert_eq!(reflected, Vector3D::direction(-half, half, 0.0));
}
