use std::io;
use std::io::Write;
use std::fs::File;
use std::path::Path;

use thiserror::Error;

use crate::consts::GEOM_EPSILON;
use crate::color::Color;
use crate::vector::Vector3D;
use crate::matrix::Matrix;
use crate::ray::Ray;

/// Errors raised while deriving a camera basis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("the eye cannot sit on the look-at point")]
    EyeOnLookAt,

    #[error("the view-up direction is parallel to the view direction")]
    DegenerateBasis,
}

/// The coordinate space a piece of geometry is currently expressed in.
///
/// World coordinates are the ones scenes are authored in; camera coordinates
/// put the eye at the origin with the view running down the negative Z axis,
/// which is the frame sampling rays are generated in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    World,
    Camera,
}

/// The sampling window of a camera, along with the pixel grid shaded
/// through it.
///
/// The window lives in camera-local coordinates: a `width` by `height`
/// rectangle centered on the view axis at `(0, 0, -focal_distance)`, divided
/// into `cols` by `rows` cells. Each rendered cell's color is cached in
/// `colors`; `should_update` tells the caller whether that cache still
/// matches the camera it was rendered through.
///
/// For now, grids can only be saved as PPM images.
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    /// The physical width and height of the window rectangle.
    pub width: f64,
    pub height: f64,

    /// The sampling resolution of the window, in cells.
    pub cols: usize,
    pub rows: usize,

    /// The rendered colors, in row-major order.
    pub colors: Vec<Vec<Color>>,

    /// Whether the colors grid is stale and needs another render pass.
    pub should_update: bool,

    center: Vector3D,
    dx: f64,
    dy: f64,
}

impl Window {
    /// Creates a window at the given focal distance, with every cell
    /// initialized to a neutral gray.
    pub fn new(focal_distance: f64, width: f64, height: f64, cols: usize,
        rows: usize) -> Window {
        Window {
            width,
            height,
            cols,
            rows,
            colors: vec![vec![Color::rgb(100, 100, 100); cols]; rows],
            should_update: true,
            center: Vector3D::point(0.0, 0.0, -focal_distance),
            dx: width / (cols as f64),
            dy: height / (rows as f64),
        }
    }

    /// The camera-local ray from the eye through the center of a cell.
    ///
    /// Row 0 is the top of the window (`+height/2`), column 0 the left edge
    /// (`-width/2`); cell centers sit half a spacing in from the edges.
    pub fn ray_through_cell(&self, row: usize, col: usize) -> Ray {
        let x = -self.width / 2.0 + self.dx / 2.0 + self.dx * (col as f64);
        let y = self.height / 2.0 - self.dy / 2.0 - self.dy * (row as f64);

        Ray::new(
            Vector3D::point(0.0, 0.0, 0.0),
            Vector3D::point(x, y, self.center.z),
        )
    }

    /// Saves the colors grid to a PPM file.
    ///
    /// Lines in the PPM file are clamped to 70 columns. If some color would
    /// exceed the 70 column mark on a line, it is moved to the next line
    /// over.
    pub fn save_ppm(&self, path: &Path) -> io::Result<()> {
        let mut out = File::create(path)?;

        writeln!(&mut out, "P3")?;
        writeln!(&mut out, "{} {}", self.cols, self.rows)?;
        writeln!(&mut out, "255")?; // Maximum channel value

        let mut col = 1;
        for row in self.colors.iter() {
            for color in row.iter() {
                let r = color.r.to_string();
                let g = color.g.to_string();
                let b = color.b.to_string();

                // Break the line wherever the next channel would run past
                // the 70 column marker.
                if col + r.len() > 70 {
                    write!(&mut out, "\n{} {} {}", r, g, b)?;
                    col = r.len() + g.len() + b.len() + 3;
                } else if col + r.len() + g.len() + 1 > 70 {
                    write!(&mut out, " {}\n{} {}", r, g, b)?;
                    col = g.len() + b.len() + 2;
                } else if col + r.len() + g.len() + b.len() + 2 > 70 {
                    write!(&mut out, " {} {}\n{}", r, g, b)?;
                    col = b.len() + 1;
                } else {
                    if col != 1 {
                        write!(&mut out, " ")?;
                        col += 1;
                    }

                    write!(&mut out, "{} {} {}", r, g, b)?;
                    col += r.len() + g.len() + b.len() + 2;
                }
            }
        }

        // Terminate the PPM file with a newline
        writeln!(&mut out)?;

        Ok(())
    }
}

/// A camera record for framing a scene.
///
/// The camera derives an orthonormal basis from its eye, look-at and view-up
/// parameters: `kc` points from the look-at point back toward the eye, `ic`
/// to the camera's right and `jc` up the frame. From the basis it derives
/// the two affine transforms that move geometry between world coordinates
/// and camera-local coordinates, where the eye is the origin and the scene
/// lies down the negative Z axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The sampling window, with the cached color grid.
    pub window: Window,

    look_at: Vector3D,
    eye: Vector3D,
    view_up: Vector3D,
    focal_distance: f64,
    world_to_camera: Matrix,
    camera_to_world: Matrix,
}

impl Camera {
    /// Creates a camera and derives its basis and transform pair.
    ///
    /// Fails when the eye coincides with the look-at point, or when the
    /// view-up direction is parallel to the view direction; in both cases no
    /// basis exists.
    pub fn new(look_at: Vector3D, eye: Vector3D, view_up: Vector3D,
        focal_distance: f64, width: f64, height: f64, cols: usize,
        rows: usize) -> Result<Camera, CameraError> {
        let look_at = look_at.as_point();
        let eye = eye.as_point();
        let view_up = view_up.as_direction();

        let backward = eye - look_at;
        if backward.length() < GEOM_EPSILON {
            return Err(CameraError::EyeOnLookAt);
        }

        let kc = backward.normalize();
        let sideways = view_up.cross(&kc);
        if sideways.length() < GEOM_EPSILON {
            return Err(CameraError::DegenerateBasis);
        }

        let ic = sideways.normalize();
        let jc = kc.cross(&ic);

        let world_to_camera = Matrix::from([
            [ic.x, ic.y, ic.z, -ic.dot(&eye)],
            [jc.x, jc.y, jc.z, -jc.dot(&eye)],
            [kc.x, kc.y, kc.z, -kc.dot(&eye)],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let camera_to_world = Matrix::from([
            [ic.x, jc.x, kc.x, eye.x],
            [ic.y, jc.y, kc.y, eye.y],
            [ic.z, jc.z, kc.z, eye.z],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        Ok(Camera {
            window: Window::new(focal_distance, width, height, cols, rows),
            look_at,
            eye,
            view_up,
            focal_distance,
            world_to_camera,
            camera_to_world,
        })
    }

    pub fn eye(&self) -> Vector3D {
        self.eye
    }

    pub fn look_at(&self) -> Vector3D {
        self.look_at
    }

    pub fn view_up(&self) -> Vector3D {
        self.view_up
    }

    pub fn focal_distance(&self) -> f64 {
        self.focal_distance
    }

    /// The transform taking world coordinates to camera-local coordinates.
    pub fn world_to_camera(&self) -> &Matrix {
        &self.world_to_camera
    }

    /// The transform taking camera-local coordinates back to the world.
    pub fn camera_to_world(&self) -> &Matrix {
        &self.camera_to_world
    }

    /// Re-expresses a world-space vector in camera-local coordinates.
    pub fn transform_vector_from_world_to_camera(&self, vector: &Vector3D)
        -> Vector3D {
        vector.transform(&self.world_to_camera)
            .expect("Camera matrices should always be 4x4.")
    }

    /// Re-expresses a camera-local vector in world coordinates.
    pub fn transform_vector_from_camera_to_world(&self, vector: &Vector3D)
        -> Vector3D {
        vector.transform(&self.camera_to_world)
            .expect("Camera matrices should always be 4x4.")
    }

    /// The camera-local ray through the center of a window cell.
    pub fn ray_through_cell(&self, row: usize, col: usize) -> Ray {
        self.window.ray_through_cell(row, col)
    }

    /// Moves the eye, rebuilding the basis, the transform pair and the
    /// window grid. On failure the camera is left untouched.
    pub fn set_eye(&mut self, eye: Vector3D) -> Result<(), CameraError> {
        let replacement = Camera::new(self.look_at, eye, self.view_up,
            self.focal_distance, self.window.width, self.window.height,
            self.window.cols, self.window.rows)?;

        *self = replacement;
        Ok(())
    }

    /// Re-aims the camera at a new look-at point, rebuilding the basis, the
    /// transform pair and the window grid. On failure the camera is left
    /// untouched.
    pub fn set_look_at(&mut self, look_at: Vector3D)
        -> Result<(), CameraError> {
        let replacement = Camera::new(look_at, self.eye, self.view_up,
            self.focal_distance, self.window.width, self.window.height,
            self.window.cols, self.window.rows)?;

        *self = replacement;
        Ok(())
    }
}

/* Tests */

#[cfg(test)]
use crate::feq;

#[test]
fn camera_basis_maps_world_to_camera() {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, 5.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0, 2.0, 2.0, 10, 10,
    ).unwrap();

    // The eye lands on the local origin, the look-at point dead ahead.
    let eye = camera.transform_vector_from_world_to_camera(
        &Vector3D::point(0.0, 0.0, 5.0));
    assert_eq!(eye, Vector3D::point(0.0, 0.0, 0.0));

    let target = camera.transform_vector_from_world_to_camera(
        &Vector3D::point(0.0, 0.0, 0.0));
    assert_eq!(target, Vector3D::point(0.0, 0.0, -5.0));

    let off_axis = camera.transform_vector_from_world_to_camera(
        &Vector3D::point(1.0, 2.0, 3.0));
    assert_eq!(off_axis, Vector3D::point(1.0, 2.0, -2.0));
}

#[test]
fn camera_transforms_invert_each_other() {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(5.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0, 2.0, 2.0, 10, 10,
    ).unwrap();

    let product = camera.world_to_camera()
        .multiply(camera.camera_to_world())
        .unwrap();
    assert_eq!(product, Matrix::identity(4));

    // Looking down the X axis, the camera's right hand points along -Z.
    let sideways = camera.transform_vector_from_world_to_camera(
        &Vector3D::point(5.0, 0.0, -2.0));
    assert_eq!(sideways, Vector3D::point(2.0, 0.0, 0.0));

    let original = Vector3D::point(1.0, 2.0, 3.0);
    let there = camera.transform_vector_from_world_to_camera(&original);
    let back = camera.transform_vector_from_camera_to_world(&there);
    assert_eq!(back, original);
}

#[test]
fn degenerate_cameras_are_rejected() {
    let eye_on_target = Camera::new(
        Vector3D::point(1.0, 2.0, 3.0),
        Vector3D::point(1.0, 2.0, 3.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0, 2.0, 2.0, 10, 10,
    );
    match eye_on_target {
        Err(CameraError::EyeOnLookAt) => (),
        other => panic!("expected EyeOnLookAt, got {:?}", other),
    }

    let up_along_view = Camera::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, 5.0),
        Vector3D::direction(0.0, 0.0, 1.0),
        1.0, 2.0, 2.0, 10, 10,
    );
    match up_along_view {
        Err(CameraError::DegenerateBasis) => (),
        other => panic!("expected DegenerateBasis, got {:?}", other),
    }
}

#[test]
fn rays_fan_out_through_window_cells() {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, -1.0),
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0, 2.0, 2.0, 2, 2,
    ).unwrap();

    // Row 0 is the top of the window, column 0 its left edge.
    let top_left = camera.ray_through_cell(0, 0);
    assert_eq!(top_left.origin, Vector3D::point(0.0, 0.0, 0.0));
    assert_eq!(top_left.through, Vector3D::point(-0.5, 0.5, -1.0));

    let bottom_right = camera.ray_through_cell(1, 1);
    assert_eq!(bottom_right.through, Vector3D::point(0.5, -0.5, -1.0));
}

#[test]
fn center_cell_looks_straight_ahead() {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, -1.0),
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        0.3, 0.6, 0.6, 3, 3,
    ).unwrap();

    let center = camera.ray_through_cell(1, 1);
    assert_eq!(center.through, Vector3D::point(0.0, 0.0, -0.3));
    assert_eq!(center.direction(), Vector3D::direction(0.0, 0.0, -1.0));
}

#[test]
fn window_starts_gray_and_dirty() {
    let window = Window::new(1.0, 2.0, 1.0, 4, 2);

    assert_eq!(window.cols, 4);
    assert_eq!(window.rows, 2);
    assert_eq!(window.colors.len(), 2);
    assert_eq!(window.colors[0].len(), 4);
    assert_eq!(window.colors[0][0], Color::rgb(100, 100, 100));
    assert!(window.should_update);
}

#[test]
fn moving_the_eye_rebuilds_the_camera() {
    let mut camera = Camera::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, 5.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0, 2.0, 2.0, 10, 10,
    ).unwrap();

    camera.set_eye(Vector3D::point(0.0, 0.0, 3.0)).unwrap();
    assert_eq!(camera.eye(), Vector3D::point(0.0, 0.0, 3.0));
    assert_eq!(camera.look_at(), Vector3D::point(0.0, 0.0, 0.0));

    let eye = camera.transform_vector_from_world_to_camera(
        &Vector3D::point(0.0, 0.0, 3.0));
    assert_eq!(eye, Vector3D::point(0.0, 0.0, 0.0));

    // A rejected move leaves the camera as it was.
    let result = camera.set_eye(Vector3D::point(0.0, 0.0, 0.0));
    assert_eq!(result, Err(CameraError::EyeOnLookAt));
    assert_eq!(camera.eye(), Vector3D::point(0.0, 0.0, 3.0));

    camera.set_look_at(Vector3D::point(0.0, 1.0, 0.0)).unwrap();
    assert_eq!(camera.look_at(), Vector3D::point(0.0, 1.0, 0.0));
    assert_eq!(camera.eye(), Vector3D::point(0.0, 0.0, 3.0));
}
