use std::fmt;
use std::ops::{ Index, IndexMut };
use std::convert::From;

use thiserror::Error;

use crate::feq;
use crate::consts::GEOM_EPSILON;
use crate::vector::Vector3D;

/// Errors produced by matrix operations with incompatible shapes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("row {row} has {found} entries where {expected} were expected")]
    RaggedRows { row: usize, found: usize, expected: usize },

    #[error("cannot {op} a {left_rows}x{left_cols} matrix \
             and a {right_rows}x{right_cols} matrix")]
    DimensionMismatch {
        op: &'static str,
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("expected a 4x1 homogeneous column, found a {rows}x{cols} matrix")]
    NotHomogeneous { rows: usize, cols: usize },
}

/// A coordinate axis, for picking which axis-aligned rotation to build.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A row-major matrix of arbitrary dimensions.
///
/// Most of the ray tracer logic runs on 4x4 transformation matrices and 4x1
/// homogeneous columns, but the arithmetic here is fully general: any two
/// matrices whose dimensions conform can be added, subtracted or multiplied.
/// Operations that can be handed non-conforming operands return a
/// `MatrixError` instead of panicking.
///
/// The transformation builders (`translation`, `scale`, `rotation` and
/// friends) always produce 4x4 matrices, meant to act on the homogeneous
/// columns produced by `Vector3D::as_homogeneous`.
///
/// # Examples
///
/// Multiplying by an identity matrix changes nothing:
///
/// ```
/// # #![allow(unused)]
/// # use phong_tracer::matrix::Matrix;
/// let m = Matrix::translation(1.0, 2.0, 3.0);
/// assert_eq!(Matrix::identity(4).multiply(&m).unwrap(), m);
/// ```
///
/// Mismatched dimensions are reported, not silently accepted:
///
/// ```
/// # use phong_tracer::matrix::Matrix;
/// let wide = Matrix::new(2, 3);
/// let also_wide = Matrix::new(2, 3);
/// assert!(wide.multiply(&also_wide).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialOrd)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows` by `cols` matrix with all elements set to `0.0`.
    pub fn new(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Instantiates a `size` by `size` identity matrix.
    pub fn identity(size: usize) -> Matrix {
        let mut ident = Matrix::new(size, size);
        for i in 0..size {
            ident[(i, i)] = 1.0;
        }

        ident
    }

    /// Builds a matrix from explicit rows. Every row must have the same
    /// number of entries as the first.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        let expected = rows.first().map_or(0, |row| row.len());

        for (index, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(MatrixError::RaggedRows {
                    row: index,
                    found: row.len(),
                    expected,
                });
            }
        }

        Ok(Matrix {
            rows: rows.len(),
            cols: expected,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Builds the 4x1 column `[x, y, z, w]^T` used for homogeneous
    /// coordinates.
    pub fn column4(x: f64, y: f64, z: f64, w: f64) -> Matrix {
        Matrix { rows: 4, cols: 1, data: vec![x, y, z, w] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Adds two matrices of identical dimensions, element-wise.
    pub fn sum(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch("add", other));
        }

        let data = self.data.iter()
            .zip(other.data.iter())
            .map(|(x, y)| x + y)
            .collect();

        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    /// Subtracts `other` from `self`, element-wise. Dimensions must match.
    pub fn difference(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch("subtract", other));
        }

        let data = self.data.iter()
            .zip(other.data.iter())
            .map(|(x, y)| x - y)
            .collect();

        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    /// Multiplies two matrices. The column count of `self` must equal the
    /// row count of `other`; the product has `self.rows()` rows and
    /// `other.cols()` columns.
    ///
    /// Note that matrix multiplication is not commutative; for matrices `A`
    /// and `B`, `A * B` is generally different from `B * A` (when both
    /// products exist at all).
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != other.rows {
            return Err(self.mismatch("multiply", other));
        }

        let mut product = Matrix::new(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut element = 0.0;
                for k in 0..self.cols {
                    element += self[(r, k)] * other[(k, c)];
                }

                product[(r, c)] = element;
            }
        }

        Ok(product)
    }

    /// Multiplies every element by a scalar.
    pub fn multiply_scalar(&self, scalar: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|x| x * scalar).collect(),
        }
    }

    /// Divides every element by a scalar.
    pub fn divide_scalar(&self, scalar: f64) -> Matrix {
        self.multiply_scalar(1.0 / scalar)
    }

    fn mismatch(&self, op: &'static str, other: &Matrix) -> MatrixError {
        MatrixError::DimensionMismatch {
            op,
            left_rows: self.rows,
            left_cols: self.cols,
            right_rows: other.rows,
            right_cols: other.cols,
        }
    }
}

/* Transformation builders */

impl Matrix {
    // 4x4 by 4x4 product for the builders below; both factors have fixed
    // dimensions, so the general shape check cannot fail.
    fn compose(&self, other: &Matrix) -> Matrix {
        self.multiply(other).expect("4x4 product")
    }

    /// Instantiates a 4x4 translation matrix.
    ///
    /// This matrix offsets a point by `x`, `y` and `z`. Directions (columns
    /// with `w == 0`) pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::vector::Vector3D;
    /// # use phong_tracer::matrix::Matrix;
    /// let m = Matrix::translation(5.0, -3.0, 2.0);
    /// let p = Vector3D::point(-3.0, 4.0, 5.0);
    /// assert_eq!(p.transform(&m).unwrap(), Vector3D::point(2.0, 1.0, 7.0));
    /// ```
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut trans = Matrix::identity(4);
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Instantiates a 4x4 scaling matrix about a fixed point.
    ///
    /// Points are scaled by `sx`, `sy` and `sz` along the X, Y and Z axes
    /// while `fixed_point` stays where it is. Scaling about the origin is
    /// the special case where `fixed_point` is the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::vector::Vector3D;
    /// # use phong_tracer::matrix::Matrix;
    /// let fixed = Vector3D::point(1.0, 1.0, 1.0);
    /// let m = Matrix::scale(2.0, 2.0, 2.0, &fixed);
    /// let p = Vector3D::point(2.0, 3.0, 4.0);
    ///
    /// assert_eq!(p.transform(&m).unwrap(), Vector3D::point(3.0, 5.0, 7.0));
    /// assert_eq!(fixed.transform(&m).unwrap(), fixed);
    /// ```
    pub fn scale(sx: f64, sy: f64, sz: f64, fixed_point: &Vector3D) -> Matrix {
        let mut scaling = Matrix::identity(4);
        scaling[(0, 0)] = sx;
        scaling[(1, 1)] = sy;
        scaling[(2, 2)] = sz;

        let to_origin = Matrix::translation(
            -fixed_point.x, -fixed_point.y, -fixed_point.z);
        let from_origin = Matrix::translation(
            fixed_point.x, fixed_point.y, fixed_point.z);

        from_origin.compose(&scaling).compose(&to_origin)
    }

    /// Instantiates a 4x4 rotation matrix about a coordinate axis through
    /// the origin.
    ///
    /// Rotations are counterclockwise when the axis points toward the
    /// viewer. Assumes that parameter `theta` is in radians.
    ///
    /// # Examples
    ///
    /// Rotate a point 90 degrees about the Z axis:
    ///
    /// ```
    /// # use phong_tracer::vector::Vector3D;
    /// # use phong_tracer::matrix::{ Matrix, Axis };
    /// let m = Matrix::rotation(std::f64::consts::PI / 2.0, Axis::Z);
    /// let p = Vector3D::point(1.0, 0.0, 0.0);
    /// assert_eq!(p.transform(&m).unwrap(), Vector3D::point(0.0, 1.0, 0.0));
    /// ```
    pub fn rotation(theta: f64, axis: Axis) -> Matrix {
        Matrix::rotation_from_sin_cos(theta.sin(), theta.cos(), axis)
    }

    /// Instantiates a 4x4 rotation matrix directly from the sine and cosine
    /// of the rotation angle.
    ///
    /// `arbitrary_rotation` uses this to build its axis-alignment rotations,
    /// whose sines and cosines fall out of the axis direction without any
    /// angle ever being computed.
    pub fn rotation_from_sin_cos(sin: f64, cos: f64, axis: Axis) -> Matrix {
        let mut rotate = Matrix::identity(4);
        match axis {
            Axis::X => {
                rotate[(1, 1)] =  cos;
                rotate[(1, 2)] = -sin;
                rotate[(2, 1)] =  sin;
                rotate[(2, 2)] =  cos;
            },
            Axis::Y => {
                rotate[(0, 0)] =  cos;
                rotate[(0, 2)] =  sin;
                rotate[(2, 0)] = -sin;
                rotate[(2, 2)] =  cos;
            },
            Axis::Z => {
                rotate[(0, 0)] =  cos;
                rotate[(0, 1)] = -sin;
                rotate[(1, 0)] =  sin;
                rotate[(1, 1)] =  cos;
            },
        }

        rotate
    }

    /// Instantiates a 4x4 rotation matrix about the line through `p1` and
    /// `p2`, by `theta` radians.
    ///
    /// The rotation is assembled from seven factors: translate `p1` to the
    /// origin, rotate the line onto the Z axis (about X, then about Y), spin
    /// about Z by `theta`, then undo the alignment rotations and the
    /// translation. Points on the line itself are left fixed.
    pub fn arbitrary_rotation(p1: &Vector3D, p2: &Vector3D, theta: f64)
        -> Matrix {
        let u = (*p2 - *p1).normalize();
        let d = (u.y * u.y + u.z * u.z).sqrt();

        // When the line is already parallel to the X axis, the X-alignment
        // rotation is undefined (d == 0) and unnecessary.
        let (align_x, unalign_x) = if d > GEOM_EPSILON {
            (Matrix::rotation_from_sin_cos(u.y / d, u.z / d, Axis::X),
             Matrix::rotation_from_sin_cos(-u.y / d, u.z / d, Axis::X))
        } else {
            (Matrix::identity(4), Matrix::identity(4))
        };

        let align_y = Matrix::rotation_from_sin_cos(-u.x, d, Axis::Y);
        let unalign_y = Matrix::rotation_from_sin_cos(u.x, d, Axis::Y);

        let spin = Matrix::rotation(theta, Axis::Z);

        let to_origin = Matrix::translation(-p1.x, -p1.y, -p1.z);
        let from_origin = Matrix::translation(p1.x, p1.y, p1.z);

        from_origin
            .compose(&unalign_x)
            .compose(&unalign_y)
            .compose(&spin)
            .compose(&align_y)
            .compose(&align_x)
            .compose(&to_origin)
    }
}

impl From<[[f64; 4]; 4]> for Matrix {
    fn from(rows: [[f64; 4]; 4]) -> Matrix {
        let mut data = Vec::with_capacity(16);
        for row in rows.iter() {
            data.extend_from_slice(row);
        }

        Matrix { rows: 4, cols: 4, data }
    }
}

/// Determines whether two matrices are equal.
///
/// Matrices are equal when their dimensions match and their elements are
/// equal. Note that element equality is approximate, as elements are floating
/// point numbers.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.rows == other.rows &&
            self.cols == other.cols &&
            self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index<'a>(&'a self, index: (usize, usize)) -> &'a f64 {
        &self.data[(index.0 * self.cols) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut<'a>(&'a mut self, index: (usize, usize)) -> &'a mut f64 {
        &mut self.data[(index.0 * self.cols) + index.1]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            write!(f, "|")?;
            for c in 0..self.cols {
                write!(f, " {} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r != self.rows - 1 {
                write!(f, "\n")?;
            }
        }

        Ok(())
    }
}

/* Tests */

#[test]
fn identity_multiply() {
    let i = Matrix::identity(4);
    let a: Matrix = [ [ 0.0, 1.0,  2.0,  4.0 ],
                      [ 1.0, 2.0,  4.0,  8.0 ],
                      [ 2.0, 4.0,  8.0, 16.0 ],
                      [ 4.0, 8.0, 16.0, 32.0 ] ].into();

    assert_eq!(i.multiply(&a).unwrap(), a);
    assert_eq!(a.multiply(&i).unwrap(), a);
}

#[test]
fn from_rows_rejects_ragged_input() {
    let rows = vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0],
    ];

    match Matrix::from_rows(rows) {
        Err(MatrixError::RaggedRows { row: 1, found: 2, expected: 3 }) => (),
        other => panic!("expected RaggedRows, got {:?}", other),
    }
}

#[test]
fn from_rows_round_trip() {
    let m = Matrix::from_rows(vec![
        vec![1.0, 2.0],
        vec![3.0, 4.0],
        vec![5.0, 6.0],
    ]).unwrap();

    assert_eq!(m.rows(), 3);
    assert_eq!(m.cols(), 2);
    assert!(feq(m[(0, 1)], 2.0));
    assert!(feq(m[(2, 0)], 5.0));
}

#[test]
fn sum_and_difference() {
    let a = Matrix::from_rows(vec![
        vec![1.0, 2.0],
        vec![3.0, 4.0],
    ]).unwrap();
    let b = Matrix::from_rows(vec![
        vec![5.0, 6.0],
        vec![7.0, 8.0],
    ]).unwrap();

    let total = Matrix::from_rows(vec![
        vec![ 6.0,  8.0],
        vec![10.0, 12.0],
    ]).unwrap();

    assert_eq!(a.sum(&b).unwrap(), total);
    assert_eq!(total.difference(&b).unwrap(), a);
}

#[test]
fn sum_rejects_mismatched_dimensions() {
    let a = Matrix::new(2, 3);
    let b = Matrix::new(3, 2);

    match a.sum(&b) {
        Err(MatrixError::DimensionMismatch { op: "add", .. }) => (),
        other => panic!("expected DimensionMismatch, got {:?}", other),
    }
}

#[test]
fn multiply_non_square() {
    let a = Matrix::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
    ]).unwrap();
    let b = Matrix::from_rows(vec![
        vec![ 7.0,  8.0],
        vec![ 9.0, 10.0],
        vec![11.0, 12.0],
    ]).unwrap();

    let product = Matrix::from_rows(vec![
        vec![ 58.0,  64.0],
        vec![139.0, 154.0],
    ]).unwrap();

    assert_eq!(a.multiply(&b).unwrap(), product);
}

#[test]
fn multiply_rejects_mismatched_dimensions() {
    let a = Matrix::new(2, 3);
    let b = Matrix::new(2, 3);

    match a.multiply(&b) {
        Err(MatrixError::DimensionMismatch {
            op: "multiply",
            left_cols: 3,
            right_rows: 2,
            ..
        }) => (),
        other => panic!("expected DimensionMismatch, got {:?}", other),
    }
}

#[test]
fn scalar_multiply_and_divide() {
    let a = Matrix::from_rows(vec![
        vec![1.0, -2.0],
        vec![4.0,  8.0],
    ]).unwrap();

    let doubled = Matrix::from_rows(vec![
        vec![2.0, -4.0],
        vec![8.0, 16.0],
    ]).unwrap();

    assert_eq!(a.multiply_scalar(2.0), doubled);
    assert_eq!(doubled.divide_scalar(2.0), a);
}

#[test]
fn translation_moves_points_only() {
    let m = Matrix::translation(5.0, -3.0, 2.0);

    let p = Vector3D::point(-3.0, 4.0, 5.0);
    let d = Vector3D::direction(-3.0, 4.0, 5.0);

    assert_eq!(p.transform(&m).unwrap(), Vector3D::point(2.0, 1.0, 7.0));
    assert_eq!(d.transform(&m).unwrap(), d);
}

#[test]
fn scale_about_fixed_point() {
    let fixed = Vector3D::point(1.0, 1.0, 1.0);
    let m = Matrix::scale(2.0, 2.0, 2.0, &fixed);

    let p = Vector3D::point(2.0, 3.0, 4.0);
    assert_eq!(p.transform(&m).unwrap(), Vector3D::point(3.0, 5.0, 7.0));
    assert_eq!(fixed.transform(&m).unwrap(), fixed);
}

#[test]
fn scale_about_origin() {
    let origin = Vector3D::point(0.0, 0.0, 0.0);
    let m = Matrix::scale(2.0, 3.0, 4.0, &origin);

    let p = Vector3D::point(-4.0, 6.0, 8.0);
    assert_eq!(p.transform(&m).unwrap(), Vector3D::point(-8.0, 18.0, 32.0));
}

#[test]
fn rotate_about_x() {
    let half_quarter = Matrix::rotation(std::f64::consts::PI / 4.0, Axis::X);
    let full_quarter = Matrix::rotation(std::f64::consts::PI / 2.0, Axis::X);
    let p = Vector3D::point(0.0, 1.0, 0.0);

    assert_eq!(p.transform(&full_quarter).unwrap(),
        Vector3D::point(0.0, 0.0, 1.0));
    assert_eq!(p.transform(&half_quarter).unwrap(),
        Vector3D::point(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn rotate_about_y() {
    let full_quarter = Matrix::rotation(std::f64::consts::PI / 2.0, Axis::Y);
    let p = Vector3D::point(0.0, 0.0, 1.0);

    assert_eq!(p.transform(&full_quarter).unwrap(),
        Vector3D::point(1.0, 0.0, 0.0));
}

#[test]
fn rotate_about_z() {
    let full_quarter = Matrix::rotation(std::f64::consts::PI / 2.0, Axis::Z);
    let p = Vector3D::point(0.0, 1.0, 0.0);

    assert_eq!(p.transform(&full_quarter).unwrap(),
        Vector3D::point(-1.0, 0.0, 0.0));
}

#[test]
fn rotation_from_sin_cos_matches_rotation() {
    let theta: f64 = 0.7;

    for &axis in &[Axis::X, Axis::Y, Axis::Z] {
        assert_eq!(
            Matrix::rotation_from_sin_cos(theta.sin(), theta.cos(), axis),
            Matrix::rotation(theta, axis),
        );
    }
}

#[test]
fn arbitrary_rotation_matches_axis_rotations() {
    let theta = 1.234;
    let origin = Vector3D::point(0.0, 0.0, 0.0);

    let cases = [
        (Vector3D::point(1.0, 0.0, 0.0), Axis::X),
        (Vector3D::point(0.0, 1.0, 0.0), Axis::Y),
        (Vector3D::point(0.0, 0.0, 1.0), Axis::Z),
    ];

    for &(tip, axis) in cases.iter() {
        assert_eq!(
            Matrix::arbitrary_rotation(&origin, &tip, theta),
            Matrix::rotation(theta, axis),
        );
    }
}

#[test]
fn arbitrary_rotation_quarter_turn() {
    let origin = Vector3D::point(0.0, 0.0, 0.0);
    let tip = Vector3D::point(0.0, 0.0, 1.0);
    let m = Matrix::arbitrary_rotation(&origin, &tip,
        std::f64::consts::PI / 2.0);

    let p = Vector3D::point(1.0, 0.0, 0.0);
    assert_eq!(p.transform(&m).unwrap(), Vector3D::point(0.0, 1.0, 0.0));
}

#[test]
fn arbitrary_rotation_fixes_the_line() {
    // A line parallel to the X axis, where the alignment rotation about X
    // degenerates.
    let p1 = Vector3D::point(1.0, 1.0, 1.0);
    let p2 = Vector3D::point(3.0, 1.0, 1.0);
    let m = Matrix::arbitrary_rotation(&p1, &p2, 1.234);

    let on_line = Vector3D::point(2.0, 1.0, 1.0);
    assert_eq!(on_line.transform(&m).unwrap(), on_line);

    // A general line through two off-origin points.
    let q1 = Vector3D::point(1.0, 2.0, 3.0);
    let q2 = Vector3D::point(4.0, 5.0, 6.0);
    let m = Matrix::arbitrary_rotation(&q1, &q2, 2.5);

    let midpoint = Vector3D::point(2.5, 3.5, 4.5);
    assert_eq!(midpoint.transform(&m).unwrap(), midpoint);
    assert_eq!(q1.transform(&m).unwrap(), q1);
    assert_eq!(q2.transform(&m).unwrap(), q2);
}

#[test]
fn arbitrary_rotation_reverses() {
    let p1 = Vector3D::point(1.0, -2.0, 0.5);
    let p2 = Vector3D::point(-3.0, 0.25, 2.0);

    let forward = Matrix::arbitrary_rotation(&p1, &p2, 0.875);
    let backward = Matrix::arbitrary_rotation(&p1, &p2, -0.875);

    assert_eq!(forward.multiply(&backward).unwrap(), Matrix::identity(4));
}

#[test]
fn arbitrary_rotation_preserves_distance_to_line() {
    let p1 = Vector3D::point(0.0, 0.0, 0.0);
    let p2 = Vector3D::point(1.0, 1.0, 0.0);
    let m = Matrix::arbitrary_rotation(&p1, &p2, 2.0);

    // Rotating (1, 0, 0) about the x = y diagonal keeps it a unit vector
    // whose projection onto the axis is unchanged.
    let p = Vector3D::point(1.0, 0.0, 0.0);
    let rotated = p.transform(&m).unwrap();
    let axis = (p2 - p1).normalize();

    assert!(feq(rotated.as_direction().length(), 1.0));
    assert!(feq(rotated.as_direction().dot(&axis), axis.x));
}
