use thiserror::Error;

use crate::consts::{ GEOM_EPSILON, SURFACE_EPSILON };
use crate::vector::Vector3D;
use crate::matrix::{ Axis, Matrix, MatrixError };
use crate::ray::Ray;
use crate::light::Material;
use crate::intersect::Intersection;
use crate::camera::{ Camera, CoordinateSpace };

/// Errors produced when building geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("a mesh needs at least one face")]
    EmptyMesh,
}

/// A sphere, defined by its center and radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vector3D,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Vector3D, radius: f64) -> Sphere {
        Sphere { center: center.as_point(), radius }
    }

    pub fn center(&self) -> Vector3D {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Checks whether a ray strikes this sphere.
    ///
    /// Solves the usual quadratic in the ray's distance parameter. When the
    /// ray starts inside the sphere, the near root is behind the origin and
    /// the far root wins; when the sphere sits behind the ray, both roots are
    /// negative and the result is invalid.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let d = ray.direction();
        let center_to_origin = ray.origin - self.center;

        let a = d.dot(&d);
        let b = 2.0 * d.dot(&center_to_origin);
        let c = center_to_origin.dot(&center_to_origin)
              - self.radius * self.radius;

        let delta = b * b - 4.0 * a * c;
        if delta < 0.0 {
            return Intersection::none();
        }

        let t1 = (-b - delta.sqrt()) / (2.0 * a);
        let t2 = (-b + delta.sqrt()) / (2.0 * a);

        Intersection::at(t1).nearer(Intersection::at(t2))
    }

    /// A normal vector on the surface of a sphere is found by subtracting
    /// the sphere's center from a point on the surface.
    pub fn normal_at(&self, point: &Vector3D) -> Vector3D {
        (*point - self.center).normalize()
    }

    fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        self.center = self.center.transform(matrix)?;
        Ok(())
    }

    fn scale(&mut self, matrix: &Matrix, factor: f64)
        -> Result<(), MatrixError> {
        self.center = self.center.transform(matrix)?;
        self.radius *= factor;
        Ok(())
    }
}

/// An infinite plane through a point, with a unit normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    point: Vector3D,
    normal: Vector3D,
}

impl Plane {
    /// Creates a plane. The normal is normalized on the way in and must not
    /// be the zero vector.
    pub fn new(point: Vector3D, normal: Vector3D) -> Plane {
        Plane {
            point: point.as_point(),
            normal: normal.as_direction().normalize(),
        }
    }

    pub fn normal(&self) -> Vector3D {
        self.normal
    }

    /// Checks whether a ray strikes this plane.
    ///
    /// A ray parallel to the plane divides by zero here; the resulting
    /// infinity (or NaN, for a ray lying in the plane) is rejected by the
    /// validity rule on `Intersection::at`.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let t = self.normal.dot(&(self.point - ray.origin))
              / self.normal.dot(&ray.direction());

        Intersection::at(t)
    }

    /// A plane has the same normal vector at all points across itself.
    pub fn normal_at(&self, _point: &Vector3D) -> Vector3D {
        self.normal
    }

    fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        self.point = self.point.transform(matrix)?;
        // The normal moves as a direction: translations leave it alone and
        // rotations turn it with the plane.
        self.normal = self.normal.transform(matrix)?.normalize();
        Ok(())
    }

    fn scale(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        self.point = self.point.transform(matrix)?;
        Ok(())
    }
}

/// A triangle, with its two edge vectors out of `p1` kept alongside the
/// vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    p1: Vector3D,
    p2: Vector3D,
    p3: Vector3D,
    r1: Vector3D,
    r2: Vector3D,
}

impl Triangle {
    pub fn new(p1: Vector3D, p2: Vector3D, p3: Vector3D) -> Triangle {
        let p1 = p1.as_point();
        let p2 = p2.as_point();
        let p3 = p3.as_point();

        Triangle { p1, p2, p3, r1: p2 - p1, r2: p3 - p1 }
    }

    /// Checks whether a ray strikes this triangle.
    ///
    /// First the ray is cut against the triangle's plane, then the hit point
    /// is tested for containment through its barycentric weights: the three
    /// sub-triangle areas it forms against the vertices, signed by the face
    /// normal. All weights non-negative (within tolerance, so edge grazes
    /// count) means the point lies inside.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let cross = self.r1.cross(&self.r2);
        let doubled_area = cross.length();

        // A triangle with collinear vertices has no interior.
        if doubled_area < GEOM_EPSILON {
            return Intersection::none();
        }

        let normal = cross / doubled_area;

        let t = normal.dot(&(self.p1 - ray.origin))
              / normal.dot(&ray.direction());
        let hit = Intersection::at(t);
        if !hit.valid {
            return Intersection::none();
        }

        let x = ray.position(t);

        let w1 = (self.p2 - x).cross(&(self.p3 - x)).dot(&normal)
               / doubled_area;
        let w2 = (self.p3 - x).cross(&(self.p1 - x)).dot(&normal)
               / doubled_area;
        let w3 = (self.p1 - x).cross(&(self.p2 - x)).dot(&normal)
               / doubled_area;

        if w1 >= -GEOM_EPSILON && w2 >= -GEOM_EPSILON && w3 >= -GEOM_EPSILON {
            hit
        } else {
            Intersection::none()
        }
    }

    /// The face normal, oriented by the vertex winding.
    pub fn normal_at(&self, _point: &Vector3D) -> Vector3D {
        self.r1.cross(&self.r2).normalize()
    }

    fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        *self = Triangle::new(
            self.p1.transform(matrix)?,
            self.p2.transform(matrix)?,
            self.p3.transform(matrix)?,
        );

        Ok(())
    }
}

/// A quadrilateral, stored as the two triangles it splits into along the
/// diagonal from its first to its third vertex.
///
/// The vertices are expected to be coplanar and wound consistently; nothing
/// enforces this, and a bent quad simply behaves as its two triangles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    first: Triangle,
    second: Triangle,
}

impl Quad {
    pub fn new(p1: Vector3D, p2: Vector3D, p3: Vector3D, p4: Vector3D)
        -> Quad {
        Quad {
            first: Triangle::new(p1, p2, p3),
            second: Triangle::new(p1, p3, p4),
        }
    }

    /// Tries the first triangle, then the second. A planar quad is struck in
    /// at most one of them (or on the shared diagonal, at the same
    /// distance), so the order only matters for bent quads.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let hit = self.first.intersect(ray);
        if hit.valid {
            hit
        } else {
            self.second.intersect(ray)
        }
    }

    /// The face normal, taken from the first triangle.
    pub fn normal_at(&self, point: &Vector3D) -> Vector3D {
        self.first.normal_at(point)
    }

    fn vertices(&self) -> [Vector3D; 4] {
        [self.first.p1, self.first.p2, self.first.p3, self.second.p3]
    }

    fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        self.first.transform(matrix)?;
        self.second.transform(matrix)
    }
}

/// A mesh of quadrilateral faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    faces: Vec<Quad>,
}

impl Mesh {
    /// Creates a mesh from its faces. A mesh with no faces is rejected.
    pub fn new(faces: Vec<Quad>) -> Result<Mesh, ShapeError> {
        if faces.is_empty() {
            return Err(ShapeError::EmptyMesh);
        }

        Ok(Mesh { faces })
    }

    /// Builds an axis-aligned box around `center`, as a six-face mesh with
    /// all faces wound outward.
    pub fn cuboid(center: Vector3D, width: f64, height: f64, depth: f64)
        -> Mesh {
        let x0 = center.x - width / 2.0;
        let x1 = center.x + width / 2.0;
        let y0 = center.y - height / 2.0;
        let y1 = center.y + height / 2.0;
        let z0 = center.z - depth / 2.0;
        let z1 = center.z + depth / 2.0;

        // Corner names carry the x, y, z choice in their digits.
        let c000 = Vector3D::point(x0, y0, z0);
        let c100 = Vector3D::point(x1, y0, z0);
        let c010 = Vector3D::point(x0, y1, z0);
        let c110 = Vector3D::point(x1, y1, z0);
        let c001 = Vector3D::point(x0, y0, z1);
        let c101 = Vector3D::point(x1, y0, z1);
        let c011 = Vector3D::point(x0, y1, z1);
        let c111 = Vector3D::point(x1, y1, z1);

        let faces = vec![
            // Near and far faces (normals along -z and +z).
            Quad::new(c000, c010, c110, c100),
            Quad::new(c001, c101, c111, c011),
            // Left and right faces (normals along -x and +x).
            Quad::new(c000, c001, c011, c010),
            Quad::new(c100, c110, c111, c101),
            // Bottom and top faces (normals along -y and +y).
            Quad::new(c000, c100, c101, c001),
            Quad::new(c010, c011, c111, c110),
        ];

        Mesh { faces }
    }

    pub fn faces(&self) -> &[Quad] {
        &self.faces
    }

    /// The average of all face vertices. Vertices shared between faces count
    /// once per face.
    pub fn center(&self) -> Vector3D {
        let mut total = Vector3D::direction(0.0, 0.0, 0.0);
        let mut count = 0.0;

        for face in self.faces.iter() {
            for vertex in face.vertices().iter() {
                total = total + vertex.as_direction();
                count += 1.0;
            }
        }

        (total / count).as_point()
    }

    /// Checks every face and keeps the nearest hit, remembering which face
    /// produced it so the normal lookup can go straight back to it.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let mut best = Intersection::none();

        for (index, face) in self.faces.iter().enumerate() {
            let mut candidate = face.intersect(ray);
            if candidate.valid {
                candidate.face = Some(index);
            }

            best = best.nearer(candidate);
        }

        best
    }

    /// The normal of the face recorded on `hit`.
    pub fn normal_at(&self, point: &Vector3D, hit: &Intersection)
        -> Vector3D {
        // Meshes are never built without faces, so the fallback index holds.
        match hit.face.and_then(|index| self.faces.get(index)) {
            Some(face) => face.normal_at(point),
            None => self.faces[0].normal_at(point),
        }
    }

    fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        for face in self.faces.iter_mut() {
            face.transform(matrix)?;
        }

        Ok(())
    }
}

/// A finite cylinder: a base disk center, a unit axis direction, a radius
/// and a height. The opposite cap sits at `base + height * axis`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cylinder {
    base: Vector3D,
    axis: Vector3D,
    radius: f64,
    height: f64,
}

impl Cylinder {
    pub fn new(base: Vector3D, axis: Vector3D, radius: f64, height: f64)
        -> Cylinder {
        Cylinder {
            base: base.as_point(),
            axis: axis.as_direction().normalize(),
            radius,
            height,
        }
    }

    /// Checks whether a ray strikes this cylinder, on the wall or a cap.
    ///
    /// The wall test solves a quadratic on the components perpendicular to
    /// the axis, then filters each root by its height along the axis. A ray
    /// running parallel to the axis has no perpendicular component and can
    /// only hit the caps; a discriminant below zero means the ray never
    /// comes within one radius of the axis, placing the caps out of reach
    /// as well.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let d = ray.direction();
        let w = ray.origin - self.base;

        let d_axial = d.dot(&self.axis);
        let w_axial = w.dot(&self.axis);
        let d_radial = d - self.axis * d_axial;
        let w_radial = w - self.axis * w_axial;

        let a = d_radial.dot(&d_radial);

        let wall = if a > GEOM_EPSILON {
            let b = 2.0 * d_radial.dot(&w_radial);
            let c = w_radial.dot(&w_radial) - self.radius * self.radius;

            let delta = b * b - 4.0 * a * c;
            if delta < 0.0 {
                return Intersection::none();
            }

            let t1 = (-b - delta.sqrt()) / (2.0 * a);
            let t2 = (-b + delta.sqrt()) / (2.0 * a);

            self.wall_hit(t1, w_axial, d_axial)
                .nearer(self.wall_hit(t2, w_axial, d_axial))
        } else {
            Intersection::none()
        };

        let top = self.base + self.axis * self.height;

        wall.nearer(disk_hit(ray, &self.base, &self.axis, self.radius))
            .nearer(disk_hit(ray, &top, &self.axis, self.radius))
    }

    fn wall_hit(&self, t: f64, w_axial: f64, d_axial: f64) -> Intersection {
        let hit = Intersection::at(t);
        if !hit.valid {
            return Intersection::none();
        }

        let height = w_axial + t * d_axial;
        if 0.0 <= height && height <= self.height {
            hit
        } else {
            Intersection::none()
        }
    }

    /// The normal at a surface point: straight out along a cap's axis near
    /// either end, radially away from the axis on the wall.
    pub fn normal_at(&self, point: &Vector3D) -> Vector3D {
        let height = (*point - self.base).dot(&self.axis);

        if height <= SURFACE_EPSILON {
            return -self.axis;
        }
        if height >= self.height - SURFACE_EPSILON {
            return self.axis;
        }

        ((*point - self.base) - self.axis * height).normalize()
    }

    fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        self.base = self.base.transform(matrix)?;
        self.axis = self.axis.transform(matrix)?.normalize();
        Ok(())
    }

    fn scale(&mut self, matrix: &Matrix, factor: f64)
        -> Result<(), MatrixError> {
        self.base = self.base.transform(matrix)?;
        self.radius *= factor;
        self.height *= factor;
        Ok(())
    }
}

/// A finite cone: a base disk center, a unit axis direction pointing at the
/// apex, a base radius and a height. The apex sits at
/// `base + height * axis`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cone {
    base: Vector3D,
    axis: Vector3D,
    radius: f64,
    height: f64,
}

impl Cone {
    pub fn new(base: Vector3D, axis: Vector3D, radius: f64, height: f64)
        -> Cone {
        Cone {
            base: base.as_point(),
            axis: axis.as_direction().normalize(),
            radius,
            height,
        }
    }

    fn apex(&self) -> Vector3D {
        self.base + self.axis * self.height
    }

    // Squared cosine of the half-angle at the apex.
    fn cos_squared(&self) -> f64 {
        let slant_squared = self.height * self.height
                          + self.radius * self.radius;
        self.height * self.height / slant_squared
    }

    /// Checks whether a ray strikes this cone, on the slant wall or the
    /// base cap.
    ///
    /// The wall equation compares a point's angle from the apex against the
    /// cone's half-angle, squared, which also describes a mirror cone past
    /// the apex; roots are filtered by their height along the axis to keep
    /// only the real nappe between apex and base. When the quadratic
    /// coefficient degenerates (the ray runs parallel to a slant line)
    /// exactly one wall crossing remains, found linearly. A negative
    /// discriminant means the ray misses the infinite double cone, which
    /// contains the base cap, so nothing else can be hit either.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        let down = -self.axis;
        let d = ray.direction();
        let from_apex = ray.origin - self.apex();
        let cos_squared = self.cos_squared();

        let d_axial = d.dot(&down);
        let o_axial = from_apex.dot(&down);

        let a = d_axial * d_axial - cos_squared * d.dot(&d);
        let b = 2.0 * (d_axial * o_axial - cos_squared * d.dot(&from_apex));
        let c = o_axial * o_axial - cos_squared * from_apex.dot(&from_apex);

        let wall = if a.abs() > GEOM_EPSILON {
            let delta = b * b - 4.0 * a * c;
            if delta < 0.0 {
                return Intersection::none();
            }

            let t1 = (-b - delta.sqrt()) / (2.0 * a);
            let t2 = (-b + delta.sqrt()) / (2.0 * a);

            self.wall_hit(t1, o_axial, d_axial)
                .nearer(self.wall_hit(t2, o_axial, d_axial))
        } else if b.abs() > GEOM_EPSILON {
            self.wall_hit(-c / b, o_axial, d_axial)
        } else {
            Intersection::none()
        };

        wall.nearer(disk_hit(ray, &self.base, &self.axis, self.radius))
    }

    fn wall_hit(&self, t: f64, o_axial: f64, d_axial: f64) -> Intersection {
        let hit = Intersection::at(t);
        if !hit.valid {
            return Intersection::none();
        }

        // Height below the apex; negative on the mirror nappe, beyond the
        // cone's height past the base plane.
        let height = o_axial + t * d_axial;
        if 0.0 <= height && height <= self.height {
            hit
        } else {
            Intersection::none()
        }
    }

    /// The normal at a surface point: down the axis on the base cap, the
    /// gradient of the cone equation on the wall and, at the apex itself
    /// (where the wall normal degenerates), straight out along the axis.
    pub fn normal_at(&self, point: &Vector3D) -> Vector3D {
        let height = (*point - self.base).dot(&self.axis);
        if height <= SURFACE_EPSILON {
            return -self.axis;
        }

        let from_apex = *point - self.apex();
        if from_apex.length() <= SURFACE_EPSILON {
            return self.axis;
        }

        let down = -self.axis;
        let axial = from_apex.dot(&down);

        (self.cos_squared() * from_apex - axial * down).normalize()
    }

    fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        self.base = self.base.transform(matrix)?;
        self.axis = self.axis.transform(matrix)?.normalize();
        Ok(())
    }

    fn scale(&mut self, matrix: &Matrix, factor: f64)
        -> Result<(), MatrixError> {
        self.base = self.base.transform(matrix)?;
        self.radius *= factor;
        self.height *= factor;
        Ok(())
    }
}

/// Intersects a ray with the disk of the given radius around `center`, in
/// the plane with the given normal. Used for cylinder and cone caps; a ray
/// parallel to the cap plane falls to the validity rule on
/// `Intersection::at`.
fn disk_hit(ray: &Ray, center: &Vector3D, normal: &Vector3D, radius: f64)
    -> Intersection {
    let t = normal.dot(&(*center - ray.origin))
          / normal.dot(&ray.direction());

    let hit = Intersection::at(t);
    if !hit.valid {
        return Intersection::none();
    }

    if (ray.position(t) - *center).length() <= radius {
        hit
    } else {
        Intersection::none()
    }
}

/// Every kind of geometry an object can carry.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Quad(Quad),
    Mesh(Mesh),
    Cylinder(Cylinder),
    Cone(Cone),
}

impl Geometry {
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        match self {
            Geometry::Sphere(sphere) => sphere.intersect(ray),
            Geometry::Plane(plane) => plane.intersect(ray),
            Geometry::Triangle(triangle) => triangle.intersect(ray),
            Geometry::Quad(quad) => quad.intersect(ray),
            Geometry::Mesh(mesh) => mesh.intersect(ray),
            Geometry::Cylinder(cylinder) => cylinder.intersect(ray),
            Geometry::Cone(cone) => cone.intersect(ray),
        }
    }

    pub fn normal_at(&self, point: &Vector3D, hit: &Intersection)
        -> Vector3D {
        match self {
            Geometry::Sphere(sphere) => sphere.normal_at(point),
            Geometry::Plane(plane) => plane.normal_at(point),
            Geometry::Triangle(triangle) => triangle.normal_at(point),
            Geometry::Quad(quad) => quad.normal_at(point),
            Geometry::Mesh(mesh) => mesh.normal_at(point, hit),
            Geometry::Cylinder(cylinder) => cylinder.normal_at(point),
            Geometry::Cone(cone) => cone.normal_at(point),
        }
    }

    pub fn transform(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        match self {
            Geometry::Sphere(sphere) => sphere.transform(matrix),
            Geometry::Plane(plane) => plane.transform(matrix),
            Geometry::Triangle(triangle) => triangle.transform(matrix),
            Geometry::Quad(quad) => quad.transform(matrix),
            Geometry::Mesh(mesh) => mesh.transform(matrix),
            Geometry::Cylinder(cylinder) => cylinder.transform(matrix),
            Geometry::Cone(cone) => cone.transform(matrix),
        }
    }

    fn scale(&mut self, matrix: &Matrix, factor: f64)
        -> Result<(), MatrixError> {
        match self {
            Geometry::Sphere(sphere) => sphere.scale(matrix, factor),
            Geometry::Plane(plane) => plane.scale(matrix),
            Geometry::Triangle(triangle) => triangle.transform(matrix),
            Geometry::Quad(quad) => quad.transform(matrix),
            Geometry::Mesh(mesh) => mesh.transform(matrix),
            Geometry::Cylinder(cylinder) => cylinder.scale(matrix, factor),
            Geometry::Cone(cone) => cone.scale(matrix, factor),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Geometry {
        Geometry::Sphere(sphere)
    }
}

impl From<Plane> for Geometry {
    fn from(plane: Plane) -> Geometry {
        Geometry::Plane(plane)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Geometry {
        Geometry::Triangle(triangle)
    }
}

impl From<Quad> for Geometry {
    fn from(quad: Quad) -> Geometry {
        Geometry::Quad(quad)
    }
}

impl From<Mesh> for Geometry {
    fn from(mesh: Mesh) -> Geometry {
        Geometry::Mesh(mesh)
    }
}

impl From<Cylinder> for Geometry {
    fn from(cylinder: Cylinder) -> Geometry {
        Geometry::Cylinder(cylinder)
    }
}

impl From<Cone> for Geometry {
    fn from(cone: Cone) -> Geometry {
        Geometry::Cone(cone)
    }
}

/// A renderable object: some geometry plus the material covering it.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub material: Material,
    pub geometry: Geometry,
}

impl Object {
    pub fn new(geometry: Geometry, material: Material) -> Object {
        Object { material, geometry }
    }

    /// Fires a ray at this object.
    pub fn get_intersection(&self, ray: &Ray) -> Intersection {
        self.geometry.intersect(ray)
    }

    /// The surface normal at a point previously reported as hit. Meshes use
    /// the face recorded on `hit` to pick the right face normal.
    pub fn get_normal_vector(&self, point: &Vector3D, hit: &Intersection)
        -> Vector3D {
        self.geometry.normal_at(point, hit)
    }

    /// Applies a rigid transformation (translation, rotation, or a product
    /// of those) to this object's geometry.
    ///
    /// Positions move as points, axes and normals as directions. Radii and
    /// heights do not change; scaling must go through
    /// `apply_scale_transformation`, which knows how to treat them.
    pub fn apply_transformation(&mut self, matrix: &Matrix)
        -> Result<(), MatrixError> {
        self.geometry.transform(matrix)
    }

    /// Scales this object about a fixed point.
    ///
    /// Positional data runs through the scaling matrix. Radii and heights,
    /// which a matrix cannot reach, are multiplied by the smallest of the
    /// three factors; for uniform scaling this is exact, for non-uniform
    /// scaling round shapes stay round at the smallest factor.
    pub fn apply_scale_transformation(&mut self, fixed_point: &Vector3D,
        sx: f64, sy: f64, sz: f64) -> Result<(), MatrixError> {
        let matrix = Matrix::scale(sx, sy, sz, fixed_point);
        let factor = sx.min(sy).min(sz);

        self.geometry.scale(&matrix, factor)
    }

    /// Moves this object by an offset.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64)
        -> Result<(), MatrixError> {
        self.apply_transformation(&Matrix::translation(dx, dy, dz))
    }

    /// Rotates this object by `theta` radians about a coordinate axis
    /// through the origin.
    pub fn rotate(&mut self, theta: f64, axis: Axis)
        -> Result<(), MatrixError> {
        self.apply_transformation(&Matrix::rotation(theta, axis))
    }

    /// Rotates this object by `theta` radians about the line through `p1`
    /// and `p2`.
    pub fn rotate_about_line(&mut self, p1: &Vector3D, p2: &Vector3D,
        theta: f64) -> Result<(), MatrixError> {
        self.apply_transformation(&Matrix::arbitrary_rotation(p1, p2, theta))
    }

    /// Re-expresses this object's geometry in the given coordinate space,
    /// using the camera that defines the two spaces.
    ///
    /// The caller is responsible for knowing which space the geometry is
    /// currently in; moving an object into the space it already occupies
    /// applies the transform twice over.
    pub fn apply_coordinate_change(&mut self, camera: &Camera,
        target: CoordinateSpace) -> Result<(), MatrixError> {
        match target {
            CoordinateSpace::Camera =>
                self.apply_transformation(camera.world_to_camera()),
            CoordinateSpace::World =>
                self.apply_transformation(camera.camera_to_world()),
        }
    }
}

/* Tests */

#[cfg(test)]
use crate::feq;

#[test]
fn ray_strikes_a_sphere_head_on() {
    let sphere = Sphere::new(Vector3D::point(0.0, 0.0, -3.0), 1.5);
    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, -1.0),
    );

    let hit = sphere.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 1.5));
}

#[test]
fn ray_from_sphere_center_exits_at_one_radius() {
    let sphere = Sphere::new(Vector3D::point(0.0, 0.0, -3.0), 1.5);
    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, -3.0),
        Vector3D::point(0.0, 0.0, -2.0),
    );

    let hit = sphere.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, sphere.radius()));
}

#[test]
fn ray_is_tangent_to_sphere() {
    let sphere = Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0);
    let ray = Ray::new(
        Vector3D::point(0.0, 1.0, -5.0),
        Vector3D::point(0.0, 1.0, -4.0),
    );

    let hit = sphere.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 5.0));
}

#[test]
fn sphere_behind_ray_is_not_hit() {
    let sphere = Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0);
    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 5.0),
        Vector3D::point(0.0, 0.0, 6.0),
    );

    assert!(!sphere.intersect(&ray).valid);
}

#[test]
fn ray_misses_a_sphere() {
    let sphere = Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0);
    let ray = Ray::new(
        Vector3D::point(0.0, 2.0, -5.0),
        Vector3D::point(0.0, 2.0, -4.0),
    );

    assert!(!sphere.intersect(&ray).valid);
}

#[test]
fn normal_on_a_sphere() {
    let sphere = Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0);

    let n = sphere.normal_at(&Vector3D::point(1.0, 0.0, 0.0));
    assert_eq!(n, Vector3D::direction(1.0, 0.0, 0.0));

    let third = 3.0f64.sqrt() / 3.0;
    let n = sphere.normal_at(&Vector3D::point(third, third, third));
    assert_eq!(n, Vector3D::direction(third, third, third));
    assert!(feq(n.length(), 1.0));
}

#[test]
fn normal_on_a_translated_sphere() {
    let half = 2.0f64.sqrt() / 2.0;
    let sphere = Sphere::new(Vector3D::point(0.0, 1.0, 0.0), 1.0);

    let n = sphere.normal_at(&Vector3D::point(0.0, 1.0 + half, -half));
    assert_eq!(n, Vector3D::direction(0.0, half, -half));
}

#[test]
fn ray_intersecting_plane_from_above_and_below() {
    let plane = Plane::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
    );

    let from_above = Ray::new(
        Vector3D::point(0.0, 1.0, 0.0),
        Vector3D::point(0.0, 0.0, 0.0),
    );
    let from_below = Ray::new(
        Vector3D::point(0.0, -1.0, 0.0),
        Vector3D::point(0.0, 0.0, 0.0),
    );

    assert!(feq(plane.intersect(&from_above).time, 1.0));
    assert!(feq(plane.intersect(&from_below).time, 1.0));
}

#[test]
fn ray_parallel_to_plane_misses() {
    let plane = Plane::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
    );

    // Parallel above the plane, and coplanar inside it.
    let above = Ray::new(
        Vector3D::point(0.0, 1.0, 0.0),
        Vector3D::point(1.0, 1.0, 0.0),
    );
    let inside = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
    );

    assert!(!plane.intersect(&above).valid);
    assert!(!plane.intersect(&inside).valid);
}

#[test]
fn plane_normal_is_constant_and_unit() {
    let plane = Plane::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 3.0, 0.0),
    );

    let up = Vector3D::direction(0.0, 1.0, 0.0);
    assert_eq!(plane.normal_at(&Vector3D::point(0.0, 0.0, 0.0)), up);
    assert_eq!(plane.normal_at(&Vector3D::point(10.0, 0.0, -10.0)), up);
    assert!(feq(plane.normal().length(), 1.0));
}

#[test]
fn rotating_a_plane_turns_its_normal() {
    let mut plane = Plane::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 0.0, 1.0),
    );

    let quarter = Matrix::rotation(std::f64::consts::PI / 2.0,
        crate::matrix::Axis::X);
    plane.transform(&quarter).unwrap();

    assert_eq!(plane.normal(), Vector3D::direction(0.0, -1.0, 0.0));

    let ray = Ray::new(
        Vector3D::point(0.0, 5.0, 0.0),
        Vector3D::point(0.0, 4.0, 0.0),
    );
    assert!(feq(plane.intersect(&ray).time, 5.0));
}

#[test]
fn a_ray_strikes_a_triangle() {
    let triangle = Triangle::new(
        Vector3D::point(0.0, 1.0, 0.0),
        Vector3D::point(-1.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
    );

    let ray = Ray::new(
        Vector3D::point(0.0, 0.5, -2.0),
        Vector3D::point(0.0, 0.5, -1.0),
    );

    let hit = triangle.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 2.0));
}

#[test]
fn a_ray_parallel_to_a_triangle_misses() {
    let triangle = Triangle::new(
        Vector3D::point(0.0, 1.0, 0.0),
        Vector3D::point(-1.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
    );

    let ray = Ray::new(
        Vector3D::point(0.0, -1.0, -2.0),
        Vector3D::point(0.0, 0.0, -2.0),
    );

    assert!(!triangle.intersect(&ray).valid);
}

#[test]
fn rays_past_the_triangle_edges_miss() {
    let triangle = Triangle::new(
        Vector3D::point(0.0, 1.0, 0.0),
        Vector3D::point(-1.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
    );

    for &(x, y) in &[(1.0, 1.0), (-1.0, 1.0), (0.0, -1.0)] {
        let ray = Ray::new(
            Vector3D::point(x, y, -2.0),
            Vector3D::point(x, y, -1.0),
        );

        assert!(!triangle.intersect(&ray).valid);
    }
}

#[test]
fn centroid_is_inside_a_triangle() {
    let triangle = Triangle::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(4.0, 0.0, 0.0),
        Vector3D::point(0.0, 4.0, 0.0),
    );

    let third = 4.0 / 3.0;
    let inside = Ray::new(
        Vector3D::point(third, third, 5.0),
        Vector3D::point(third, third, 4.0),
    );
    let outside = Ray::new(
        Vector3D::point(3.0, 3.0, 5.0),
        Vector3D::point(3.0, 3.0, 4.0),
    );

    let hit = triangle.intersect(&inside);
    assert!(hit.valid);
    assert!(feq(hit.time, 5.0));

    assert!(!triangle.intersect(&outside).valid);
}

#[test]
fn degenerate_triangle_is_never_hit() {
    let triangle = Triangle::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(1.0, 1.0, 1.0),
        Vector3D::point(2.0, 2.0, 2.0),
    );

    let ray = Ray::new(
        Vector3D::point(1.0, 1.0, -2.0),
        Vector3D::point(1.0, 1.0, -1.0),
    );

    assert!(!triangle.intersect(&ray).valid);
}

#[test]
fn triangle_normal_follows_the_winding() {
    let triangle = Triangle::new(
        Vector3D::point(0.0, 1.0, 0.0),
        Vector3D::point(-1.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
    );

    let n = triangle.normal_at(&Vector3D::point(0.0, 0.5, 0.0));
    assert_eq!(n, Vector3D::direction(0.0, 0.0, 1.0));
}

#[test]
fn a_quad_is_hit_in_both_of_its_triangles() {
    let quad = Quad::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
        Vector3D::point(1.0, 1.0, 0.0),
        Vector3D::point(0.0, 1.0, 0.0),
    );

    let toward = |x: f64, y: f64| Ray::new(
        Vector3D::point(x, y, -2.0),
        Vector3D::point(x, y, -1.0),
    );

    // One point on each side of the splitting diagonal, one outside.
    let first = quad.intersect(&toward(0.75, 0.25));
    let second = quad.intersect(&toward(0.25, 0.75));
    let outside = quad.intersect(&toward(1.5, 0.5));

    assert!(first.valid);
    assert!(feq(first.time, 2.0));
    assert!(second.valid);
    assert!(feq(second.time, 2.0));
    assert!(!outside.valid);
}

#[test]
fn quad_normal_comes_from_its_first_triangle() {
    let quad = Quad::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
        Vector3D::point(1.0, 1.0, 0.0),
        Vector3D::point(0.0, 1.0, 0.0),
    );

    let n = quad.normal_at(&Vector3D::point(0.25, 0.75, 0.0));
    assert_eq!(n, Vector3D::direction(0.0, 0.0, 1.0));
}

#[test]
fn a_mesh_needs_at_least_one_face() {
    match Mesh::new(Vec::new()) {
        Err(ShapeError::EmptyMesh) => (),
        other => panic!("expected EmptyMesh, got {:?}", other),
    }
}

#[test]
fn mesh_reports_its_nearest_face() {
    let square = |z: f64| Quad::new(
        Vector3D::point(-1.0, -1.0, z),
        Vector3D::point(1.0, -1.0, z),
        Vector3D::point(1.0, 1.0, z),
        Vector3D::point(-1.0, 1.0, z),
    );

    let mesh = Mesh::new(vec![square(-5.0), square(-2.0)]).unwrap();
    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, -1.0),
    );

    let hit = mesh.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 2.0));
    assert_eq!(hit.face, Some(1));
}

#[test]
fn cuboid_has_six_outward_faces() {
    let cuboid = Mesh::cuboid(Vector3D::point(0.0, 0.0, 0.0), 2.0, 2.0, 2.0);
    assert_eq!(cuboid.faces().len(), 6);
    assert_eq!(cuboid.center(), Vector3D::point(0.0, 0.0, 0.0));

    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, -5.0),
        Vector3D::point(0.0, 0.0, -4.0),
    );

    let hit = cuboid.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 4.0));

    let point = ray.position(hit.time);
    let n = cuboid.normal_at(&point, &hit);
    assert_eq!(n, Vector3D::direction(0.0, 0.0, -1.0));
}

#[test]
fn ray_from_inside_a_cuboid_hits_the_far_wall() {
    let cuboid = Mesh::cuboid(Vector3D::point(0.0, 0.0, 0.0), 2.0, 2.0, 2.0);
    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(1.0, 0.0, 0.0),
    );

    let hit = cuboid.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 1.0));
}

#[test]
fn mesh_center_averages_every_face() {
    let mesh = Mesh::cuboid(Vector3D::point(1.0, -2.0, 3.0), 2.0, 4.0, 6.0);
    assert_eq!(mesh.center(), Vector3D::point(1.0, -2.0, 3.0));
}

#[test]
fn ray_strikes_a_cylinder_wall() {
    let cylinder = Cylinder::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    let ray = Ray::new(
        Vector3D::point(5.0, 1.0, 0.0),
        Vector3D::point(4.0, 1.0, 0.0),
    );

    let hit = cylinder.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 4.0));

    let n = cylinder.normal_at(&Vector3D::point(1.0, 1.0, 0.0));
    assert_eq!(n, Vector3D::direction(1.0, 0.0, 0.0));
}

#[test]
fn ray_along_the_axis_only_sees_the_caps() {
    let cylinder = Cylinder::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    let from_above = Ray::new(
        Vector3D::point(0.5, 5.0, 0.0),
        Vector3D::point(0.5, 4.0, 0.0),
    );
    let hit = cylinder.intersect(&from_above);
    assert!(hit.valid);
    assert!(feq(hit.time, 3.0));
    assert_eq!(cylinder.normal_at(&Vector3D::point(0.5, 2.0, 0.0)),
        Vector3D::direction(0.0, 1.0, 0.0));

    let from_below = Ray::new(
        Vector3D::point(0.5, -3.0, 0.0),
        Vector3D::point(0.5, -2.0, 0.0),
    );
    let hit = cylinder.intersect(&from_below);
    assert!(hit.valid);
    assert!(feq(hit.time, 3.0));
    assert_eq!(cylinder.normal_at(&Vector3D::point(0.5, 0.0, 0.0)),
        Vector3D::direction(0.0, -1.0, 0.0));

    // Parallel to the axis but outside the radius.
    let beside = Ray::new(
        Vector3D::point(2.0, -5.0, 0.0),
        Vector3D::point(2.0, -4.0, 0.0),
    );
    assert!(!cylinder.intersect(&beside).valid);
}

#[test]
fn ray_past_the_cylinder_height_misses() {
    let cylinder = Cylinder::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    let ray = Ray::new(
        Vector3D::point(5.0, 3.0, 0.0),
        Vector3D::point(4.0, 3.0, 0.0),
    );

    assert!(!cylinder.intersect(&ray).valid);
}

#[test]
fn ray_misses_a_cylinder_sideways() {
    let cylinder = Cylinder::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    let ray = Ray::new(
        Vector3D::point(5.0, 1.0, 0.0),
        Vector3D::point(5.0, 1.0, 1.0),
    );

    assert!(!cylinder.intersect(&ray).valid);
}

#[test]
fn oblique_ray_hits_the_top_cap_before_the_wall() {
    let cylinder = Cylinder::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    let ray = Ray::new(
        Vector3D::point(2.0, 4.0, 0.0),
        Vector3D::point(0.0, 2.0, 0.0),
    );

    let hit = cylinder.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 2.0 * 2.0f64.sqrt()));
}

#[test]
fn cylinder_along_another_axis() {
    let cylinder = Cylinder::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(1.0, 0.0, 0.0),
        1.0,
        2.0,
    );

    let ray = Ray::new(
        Vector3D::point(1.0, 5.0, 0.0),
        Vector3D::point(1.0, 4.0, 0.0),
    );

    let hit = cylinder.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 4.0));
    assert_eq!(cylinder.normal_at(&Vector3D::point(1.0, 1.0, 0.0)),
        Vector3D::direction(0.0, 1.0, 0.0));
}

#[test]
fn ray_strikes_a_cone_wall() {
    let cone = Cone::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    // Halfway up, the cone's radius has narrowed to one half.
    let ray = Ray::new(
        Vector3D::point(5.0, 1.0, 0.0),
        Vector3D::point(4.0, 1.0, 0.0),
    );

    let hit = cone.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 4.5));

    let n = cone.normal_at(&Vector3D::point(0.5, 1.0, 0.0));
    let five = 5.0f64.sqrt();
    assert_eq!(n, Vector3D::direction(2.0 / five, 1.0 / five, 0.0));
}

#[test]
fn ray_up_the_cone_axis_enters_through_the_base_cap() {
    let cone = Cone::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    let ray = Ray::new(
        Vector3D::point(0.5, -5.0, 0.0),
        Vector3D::point(0.5, -4.0, 0.0),
    );

    let hit = cone.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 5.0));
    assert_eq!(cone.normal_at(&Vector3D::point(0.5, 0.0, 0.0)),
        Vector3D::direction(0.0, -1.0, 0.0));
}

#[test]
fn mirror_nappe_of_a_cone_is_not_part_of_the_surface() {
    let cone = Cone::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    // Above the apex, the infinite double cone widens again; the real
    // surface does not.
    let above_apex = Ray::new(
        Vector3D::point(5.0, 3.0, 0.0),
        Vector3D::point(4.0, 3.0, 0.0),
    );
    assert!(!cone.intersect(&above_apex).valid);

    // Below the base the infinite cone continues widening; the real surface
    // stops at the base plane.
    let below_base = Ray::new(
        Vector3D::point(5.0, -1.0, 0.0),
        Vector3D::point(4.0, -1.0, 0.0),
    );
    assert!(!cone.intersect(&below_base).valid);
}

#[test]
fn ray_grazing_the_cone_apex() {
    let cone = Cone::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0,
        2.0,
    );

    let ray = Ray::new(
        Vector3D::point(5.0, 2.0, 0.0),
        Vector3D::point(4.0, 2.0, 0.0),
    );

    let hit = cone.intersect(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 5.0));

    // The apex itself has no slant normal; the axis stands in.
    assert_eq!(cone.normal_at(&Vector3D::point(0.0, 2.0, 0.0)),
        Vector3D::direction(0.0, 1.0, 0.0));
}

#[test]
fn translating_an_object_moves_its_geometry() {
    let mut object = Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0).into(),
        Default::default(),
    );

    object.translate(0.0, 0.0, -5.0).unwrap();

    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, -1.0),
    );

    let hit = object.get_intersection(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 4.0));
}

#[test]
fn rotating_an_object_about_an_axis() {
    let mut object = Object::new(
        Cylinder::new(
            Vector3D::point(0.0, 0.0, 0.0),
            Vector3D::direction(0.0, 1.0, 0.0),
            1.0,
            2.0,
        ).into(),
        Default::default(),
    );

    // A quarter turn about the Z axis lays the cylinder along -X.
    object.rotate(std::f64::consts::PI / 2.0, Axis::Z).unwrap();

    let ray = Ray::new(
        Vector3D::point(-1.0, 5.0, 0.0),
        Vector3D::point(-1.0, 4.0, 0.0),
    );

    let hit = object.get_intersection(&ray);
    assert!(hit.valid);
    assert!(feq(hit.time, 4.0));

    let n = object.get_normal_vector(&Vector3D::point(-1.0, 1.0, 0.0), &hit);
    assert_eq!(n, Vector3D::direction(0.0, 1.0, 0.0));
}

#[test]
fn rotating_an_object_about_an_off_origin_line() {
    let mut object = Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0).into(),
        Default::default(),
    );

    // A half turn about the vertical line through (2, 0, 0) carries the
    // center to (4, 0, 0).
    object.rotate_about_line(
        &Vector3D::point(2.0, 0.0, 0.0),
        &Vector3D::point(2.0, 1.0, 0.0),
        std::f64::consts::PI,
    ).unwrap();

    if let Geometry::Sphere(ref sphere) = object.geometry {
        assert_eq!(sphere.center(), Vector3D::point(4.0, 0.0, 0.0));
    } else {
        unreachable!();
    }
}

#[test]
fn moving_an_object_between_coordinate_spaces() {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, 5.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        1.0, 2.0, 2.0, 10, 10,
    ).unwrap();

    let mut object = Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0).into(),
        Default::default(),
    );

    object.apply_coordinate_change(&camera, CoordinateSpace::Camera)
        .unwrap();
    if let Geometry::Sphere(ref sphere) = object.geometry {
        assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -5.0));
    } else {
        unreachable!();
    }

    object.apply_coordinate_change(&camera, CoordinateSpace::World).unwrap();
    if let Geometry::Sphere(ref sphere) = object.geometry {
        assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, 0.0));
    } else {
        unreachable!();
    }
}

#[test]
fn scaling_an_object_grows_position_and_radius() {
    let mut object = Object::new(
        Sphere::new(Vector3D::point(2.0, 0.0, 0.0), 1.0).into(),
        Default::default(),
    );

    let origin = Vector3D::point(0.0, 0.0, 0.0);
    object.apply_scale_transformation(&origin, 2.0, 2.0, 2.0).unwrap();

    if let Geometry::Sphere(ref sphere) = object.geometry {
        assert_eq!(sphere.center(), Vector3D::point(4.0, 0.0, 0.0));
        assert!(feq(sphere.radius(), 2.0));
    } else {
        unreachable!();
    }

    let ray = Ray::new(
        Vector3D::point(10.0, 0.0, 0.0),
        Vector3D::point(9.0, 0.0, 0.0),
    );
    assert!(feq(object.get_intersection(&ray).time, 4.0));
}

#[test]
fn non_uniform_scale_keeps_the_smallest_factor_for_radii() {
    let mut object = Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0).into(),
        Default::default(),
    );

    let origin = Vector3D::point(0.0, 0.0, 0.0);
    object.apply_scale_transformation(&origin, 3.0, 2.0, 4.0).unwrap();

    if let Geometry::Sphere(ref sphere) = object.geometry {
        assert!(feq(sphere.radius(), 2.0));
    } else {
        unreachable!();
    }
}

#[test]
fn transforming_with_a_bad_matrix_reports_the_shapes() {
    let mut object = Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0).into(),
        Default::default(),
    );

    let lopsided = Matrix::identity(3);
    match object.apply_transformation(&lopsided) {
        Err(MatrixError::DimensionMismatch { op: "multiply", .. }) => (),
        other => panic!("expected DimensionMismatch, got {:?}", other),
    }
}
