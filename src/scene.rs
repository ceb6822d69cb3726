use std::time::Instant;

use log::{ debug, info };
use rayon::prelude::*;
use thiserror::Error;

use crate::color::{ Color, IntensityColor };
use crate::vector::Vector3D;
use crate::matrix::{ Matrix, MatrixError };
use crate::ray::Ray;
use crate::intersect::{ Intersection, ObjectId };
use crate::light::{ SourceOfLight, diffuse_contribution,
    specular_contribution };
use crate::shape::Object;
use crate::camera::{ Camera, CameraError, CoordinateSpace };

/// Errors raised while assembling or editing a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("no object with id {0:?}")]
    UnknownObject(ObjectId),
}

/// A scene with objects, a light and a camera.
///
/// The scene owns every object pushed into it and hands out `ObjectId`
/// handles in return. Most rendering logic lives here: finding the nearest
/// object along a ray, deciding whether the light reaches it, and summing
/// the Phong terms into a display color.
///
/// Object geometry is stored either in world coordinates or in the camera's
/// local coordinates, tracked by a single flag. Pushing an object converts
/// it into the active space; replacing the camera re-expresses every stored
/// object so the flag stays truthful. Rays given to `get_color_to_draw` are
/// interpreted in the active space.
#[derive(Clone, Debug)]
pub struct Scene {
    background_color: Color,
    source_of_light: SourceOfLight,
    ambient_light: IntensityColor,
    camera: Camera,
    objects: Vec<Object>,
    coordinates: CoordinateSpace,
}

impl Scene {
    /// Creates an empty scene keeping its objects in camera coordinates,
    /// the space sampling rays are generated in.
    pub fn new(background_color: Color, source_of_light: SourceOfLight,
        ambient_light: IntensityColor, camera: Camera) -> Scene {
        Scene {
            background_color,
            source_of_light,
            ambient_light,
            camera,
            objects: Vec::new(),
            coordinates: CoordinateSpace::Camera,
        }
    }

    /// Creates an empty scene keeping its objects in world coordinates.
    ///
    /// Objects stay exactly as authored until the first render pass, which
    /// moves the whole scene into camera coordinates.
    pub fn in_world_coordinates(background_color: Color,
        source_of_light: SourceOfLight, ambient_light: IntensityColor,
        camera: Camera) -> Scene {
        Scene {
            background_color,
            source_of_light,
            ambient_light,
            camera,
            objects: Vec::new(),
            coordinates: CoordinateSpace::World,
        }
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn source_of_light(&self) -> SourceOfLight {
        self.source_of_light
    }

    pub fn ambient_light(&self) -> IntensityColor {
        self.ambient_light
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn coordinates(&self) -> CoordinateSpace {
        self.coordinates
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Looks up an object by the id `push_object` returned for it.
    pub fn object(&self, id: ObjectId) -> Result<&Object, SceneError> {
        self.objects.get(id.0).ok_or(SceneError::UnknownObject(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut Object, SceneError> {
        self.objects.get_mut(id.0).ok_or(SceneError::UnknownObject(id))
    }

    /// Adds a world-space object to the scene and returns its handle.
    ///
    /// When the scene keeps its objects in camera coordinates, the new
    /// object is converted on the way in.
    pub fn push_object(&mut self, mut object: Object)
        -> Result<ObjectId, SceneError> {
        if self.coordinates == CoordinateSpace::Camera {
            object.apply_coordinate_change(&self.camera,
                CoordinateSpace::Camera)?;
        }

        self.objects.push(object);
        debug!("scene now holds {} objects", self.objects.len());

        Ok(ObjectId(self.objects.len() - 1))
    }

    /// Removes every object from the scene.
    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }

    /// Applies a transformation to one object, in the active coordinate
    /// space.
    pub fn transform_object(&mut self, id: ObjectId, matrix: &Matrix)
        -> Result<(), SceneError> {
        self.object_mut(id)?.apply_transformation(matrix)?;
        Ok(())
    }

    /// Scales one object about a fixed point given in the active coordinate
    /// space.
    pub fn scale_object(&mut self, id: ObjectId, fixed_point: &Vector3D,
        sx: f64, sy: f64, sz: f64) -> Result<(), SceneError> {
        self.object_mut(id)?
            .apply_scale_transformation(fixed_point, sx, sy, sz)?;
        Ok(())
    }

    /// Replaces the camera. The window is stale after any camera change,
    /// even when the incoming camera carries an already-rendered grid.
    ///
    /// When the objects live in camera coordinates they are re-expressed
    /// through the old camera back into the world and through the new
    /// camera into its space. The re-projection is atomic: the objects are
    /// rebuilt to the side and committed only once every one succeeded.
    pub fn set_camera(&mut self, camera: Camera) -> Result<(), SceneError> {
        if self.coordinates == CoordinateSpace::Camera {
            let mut moved = Vec::with_capacity(self.objects.len());
            for object in self.objects.iter() {
                let mut object = object.clone();
                object.apply_coordinate_change(&self.camera,
                    CoordinateSpace::World)?;
                object.apply_coordinate_change(&camera,
                    CoordinateSpace::Camera)?;
                moved.push(object);
            }

            self.objects = moved;
            info!("re-projected {} objects for the new camera",
                self.objects.len());
        }

        self.camera = camera;
        self.camera.window.should_update = true;
        Ok(())
    }

    /// Moves the camera's eye, keeping its other parameters, and
    /// re-projects the scene accordingly.
    pub fn set_eye(&mut self, eye: Vector3D) -> Result<(), SceneError> {
        let camera = &self.camera;
        let replacement = Camera::new(camera.look_at(), eye,
            camera.view_up(), camera.focal_distance(), camera.window.width,
            camera.window.height, camera.window.cols, camera.window.rows)?;

        debug!("camera rebuilt for eye {:?}", eye);
        self.set_camera(replacement)
    }

    /// The nearest valid intersection of a ray with the scene's objects,
    /// tagged with the winning object's id. Earlier objects win ties.
    fn nearest_hit(&self, ray: &Ray) -> Intersection {
        let mut best = Intersection::none();

        for (index, object) in self.objects.iter().enumerate() {
            let mut candidate = object.get_intersection(ray);
            if candidate.valid {
                candidate.object = Some(ObjectId(index));
            }

            best = best.nearer(candidate);
        }

        best
    }

    // The light, with its position re-expressed in the active space.
    fn local_light(&self) -> SourceOfLight {
        match self.coordinates {
            CoordinateSpace::World => self.source_of_light,
            CoordinateSpace::Camera => SourceOfLight::new(
                self.source_of_light.intensity,
                self.camera.transform_vector_from_world_to_camera(
                    &self.source_of_light.position),
            ),
        }
    }

    // The eye position in the active space; in camera coordinates the eye
    // is the local origin by construction.
    fn local_eye(&self) -> Vector3D {
        match self.coordinates {
            CoordinateSpace::World => self.camera.eye(),
            CoordinateSpace::Camera => Vector3D::point(0.0, 0.0, 0.0),
        }
    }

    /// Resolves the color a ray contributes to the image.
    ///
    /// The nearest object hit by the ray is shaded with the Phong terms. To
    /// decide whether the point is lit, a shadow ray is cast from the light
    /// toward the point: if its nearest hit is some other object, that
    /// object stands between the light and the point, and only the ambient
    /// term survives. A ray that hits nothing yields the background color.
    pub fn get_color_to_draw(&self, ray: &Ray) -> Color {
        let hit = self.nearest_hit(ray);
        if !hit.valid {
            return self.background_color;
        }

        let id = match hit.object {
            Some(id) => id,
            None => return self.background_color,
        };
        let object = &self.objects[id.0];

        let point = ray.position(hit.time);
        let normal = object.get_normal_vector(&point, &hit);
        let light = self.local_light();

        let ambient = self.ambient_light * object.material.ambient;

        let shadow_ray = Ray::new(light.position, point);
        let occluder = self.nearest_hit(&shadow_ray);
        if occluder.valid && occluder.object != Some(id) {
            return object.material.color.multiply(&ambient);
        }

        let diffuse = diffuse_contribution(&light, &object.material, &point,
            &normal);
        let specular = specular_contribution(&light, &object.material,
            &point, &normal, &self.local_eye());

        object.material.color.multiply(&(ambient + diffuse + specular))
    }

    // Moves every object into camera coordinates so window rays can be used
    // directly. Atomic in the same way as `set_camera`.
    fn ensure_camera_coordinates(&mut self) -> Result<(), SceneError> {
        if self.coordinates == CoordinateSpace::Camera {
            return Ok(());
        }

        let mut moved = Vec::with_capacity(self.objects.len());
        for object in self.objects.iter() {
            let mut object = object.clone();
            object.apply_coordinate_change(&self.camera,
                CoordinateSpace::Camera)?;
            moved.push(object);
        }

        self.objects = moved;
        self.coordinates = CoordinateSpace::Camera;
        info!("re-projected {} objects into camera coordinates",
            self.objects.len());

        Ok(())
    }

    /// Renders the scene into the camera's window grid.
    ///
    /// Rows are shaded in parallel; each worker reads the scene and writes
    /// only its own row. Taking the scene by mutable borrow keeps object
    /// transforms and render passes from interleaving.
    pub fn render(&mut self) -> Result<(), SceneError> {
        self.ensure_camera_coordinates()?;

        let start = Instant::now();
        let mut grid = std::mem::take(&mut self.camera.window.colors);

        let scene = &*self;
        grid.par_iter_mut().enumerate().for_each(|(row, cells)| {
            for (col, cell) in cells.iter_mut().enumerate() {
                let ray = scene.camera.ray_through_cell(row, col);
                *cell = scene.get_color_to_draw(&ray);
            }
        });

        self.camera.window.colors = grid;
        self.camera.window.should_update = false;

        info!("rendered {} by {} cells in {:?}", self.camera.window.cols,
            self.camera.window.rows, start.elapsed());

        Ok(())
    }
}

/* Tests */

#[cfg(test)]
use crate::feq;
#[cfg(test)]
use crate::shape::{ Geometry, Mesh, Plane, Sphere };
#[cfg(test)]
use crate::light::Material;

#[cfg(test)]
fn straight_ahead_camera() -> Camera {
    // Eye at the origin looking down -Z; world and camera coordinates
    // coincide for this camera.
    Camera::new(
        Vector3D::point(0.0, 0.0, -1.0),
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        0.3, 0.6, 0.6, 3, 3,
    ).unwrap()
}

#[cfg(test)]
fn side_camera() -> Camera {
    Camera::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 3.0, 10.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        0.3, 0.6, 0.6, 3, 3,
    ).unwrap()
}

#[cfg(test)]
fn matte(color: Color, ambient: f64, diffuse: f64) -> Material {
    Material {
        color,
        ambient: IntensityColor::uniform(ambient),
        diffuse: IntensityColor::uniform(diffuse),
        specular: IntensityColor::uniform(0.0),
        shininess: 10.0,
    }
}

#[test]
fn missing_everything_draws_the_background() {
    let scene = Scene::new(
        Color::rgb(30, 30, 30),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, -1.0),
    );

    assert_eq!(scene.get_color_to_draw(&ray), Color::rgb(30, 30, 30));
}

#[test]
fn shadowed_point_keeps_only_ambient_light() {
    let mut scene = Scene::in_world_coordinates(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        side_camera(),
    );

    let floor = Object::new(
        Plane::new(
            Vector3D::point(0.0, 0.0, 0.0),
            Vector3D::direction(0.0, 1.0, 0.0),
        ).into(),
        matte(Color::white(), 0.4, 0.5),
    );
    let occluder = Object::new(
        Plane::new(
            Vector3D::point(0.0, 5.0, 0.0),
            Vector3D::direction(0.0, 1.0, 0.0),
        ).into(),
        matte(Color::white(), 0.4, 0.5),
    );

    scene.push_object(floor.clone()).unwrap();
    scene.push_object(occluder).unwrap();

    // Straight down at the floor, underneath the occluder.
    let ray = Ray::new(
        Vector3D::point(0.0, 3.0, 0.0),
        Vector3D::point(0.0, 2.0, 0.0),
    );

    // Ambient only: 255 * (0.3 * 0.4) rounds to 31.
    assert_eq!(scene.get_color_to_draw(&ray), Color::rgb(31, 31, 31));

    // Without the occluder the diffuse term comes back:
    // 255 * (0.3 * 0.4 + 0.7 * 0.5) rounds to 120.
    scene.clear_objects();
    scene.push_object(floor).unwrap();
    assert_eq!(scene.get_color_to_draw(&ray), Color::rgb(120, 120, 120));
}

#[test]
fn nearest_object_wins_the_ray() {
    let mut scene = Scene::in_world_coordinates(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 0.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let blue = Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -4.0), 1.5).into(),
        Material { color: Color::blue(), ..Default::default() },
    );
    let red = Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -3.0), 1.5).into(),
        Material { color: Color::red(), ..Default::default() },
    );

    // Push the farther sphere first; insertion order must not matter when
    // the distances differ.
    scene.push_object(blue).unwrap();
    scene.push_object(red).unwrap();

    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, -1.0),
    );
    assert_eq!(scene.get_color_to_draw(&ray), Color::red());

    // From behind, the blue sphere is nearer. Its back side faces away
    // from the light and the red sphere occludes it besides, leaving only
    // ambient light: 255 * (0.3 * 0.7) rounds to 54.
    let from_behind = Ray::new(
        Vector3D::point(0.0, 0.0, -7.0),
        Vector3D::point(0.0, 0.0, -6.0),
    );
    assert_eq!(scene.get_color_to_draw(&from_behind), Color::rgb(0, 0, 54));
}

#[test]
fn objects_enter_camera_space_on_push() {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, -1.0),
        Vector3D::point(0.0, 0.0, 2.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        0.3, 0.6, 0.6, 3, 3,
    ).unwrap();

    let mut scene = Scene::new(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        camera,
    );

    let id = scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, 0.0), 1.0).into(),
        Default::default(),
    )).unwrap();

    match &scene.object(id).unwrap().geometry {
        Geometry::Sphere(sphere) => {
            assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -2.0));
        },
        other => panic!("expected a sphere, got {:?}", other),
    }
}

#[test]
fn changing_the_camera_reprojects_objects() {
    let mut scene = Scene::new(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let id = scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -5.0), 1.0).into(),
        Default::default(),
    )).unwrap();

    let moved_back = Camera::new(
        Vector3D::point(0.0, 0.0, -1.0),
        Vector3D::point(0.0, 0.0, 2.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        0.3, 0.6, 0.6, 3, 3,
    ).unwrap();
    scene.set_camera(moved_back).unwrap();

    match &scene.object(id).unwrap().geometry {
        Geometry::Sphere(sphere) => {
            assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -7.0));
        },
        other => panic!("expected a sphere, got {:?}", other),
    }
}

#[test]
fn world_coordinate_scenes_keep_objects_as_authored() {
    let mut scene = Scene::in_world_coordinates(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let id = scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -5.0), 1.0).into(),
        Default::default(),
    )).unwrap();

    scene.set_camera(side_camera()).unwrap();

    match &scene.object(id).unwrap().geometry {
        Geometry::Sphere(sphere) => {
            assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -5.0));
        },
        other => panic!("expected a sphere, got {:?}", other),
    }
}

#[test]
fn moving_the_eye_reprojects_the_scene() {
    let mut scene = Scene::new(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let id = scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -5.0), 1.0).into(),
        Default::default(),
    )).unwrap();

    scene.set_eye(Vector3D::point(0.0, 0.0, 2.0)).unwrap();

    assert_eq!(scene.camera().eye(), Vector3D::point(0.0, 0.0, 2.0));
    assert_eq!(scene.camera().look_at(), Vector3D::point(0.0, 0.0, -1.0));
    match &scene.object(id).unwrap().geometry {
        Geometry::Sphere(sphere) => {
            assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -7.0));
        },
        other => panic!("expected a sphere, got {:?}", other),
    }
}

#[test]
fn replacing_the_camera_leaves_the_window_stale() {
    let mut scene = Scene::new(
        Color::rgb(30, 30, 30),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 0.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    scene.render().unwrap();
    assert!(!scene.camera().window.should_update);

    // Handing back the already-rendered camera is still a camera change.
    let rendered = scene.camera().clone();
    scene.set_camera(rendered).unwrap();
    assert!(scene.camera().window.should_update);
}

#[test]
fn failed_camera_change_leaves_the_scene_alone() {
    let mut scene = Scene::new(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let id = scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -5.0), 1.0).into(),
        Default::default(),
    )).unwrap();

    // The camera's look-at point is (0, 0, -1); moving the eye there has
    // to fail and change nothing.
    let result = scene.set_eye(Vector3D::point(0.0, 0.0, -1.0));
    assert_eq!(result, Err(SceneError::Camera(CameraError::EyeOnLookAt)));

    assert_eq!(scene.camera().eye(), Vector3D::point(0.0, 0.0, 0.0));
    match &scene.object(id).unwrap().geometry {
        Geometry::Sphere(sphere) => {
            assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -5.0));
        },
        other => panic!("expected a sphere, got {:?}", other),
    }
}

#[test]
fn unknown_object_ids_are_rejected() {
    let mut scene = Scene::new(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let missing = ObjectId(0);
    assert_eq!(scene.object(missing).err(),
        Some(SceneError::UnknownObject(missing)));

    let result = scene.transform_object(missing,
        &Matrix::translation(1.0, 0.0, 0.0));
    assert_eq!(result, Err(SceneError::UnknownObject(missing)));
}

#[test]
fn objects_can_be_transformed_through_the_scene() {
    let mut scene = Scene::in_world_coordinates(
        Color::black(),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 10.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    let center = Vector3D::point(0.0, 0.0, -3.0);
    let id = scene.push_object(Object::new(
        Mesh::cuboid(center, 1.0, 1.0, 1.0).into(),
        Default::default(),
    )).unwrap();

    let ray = Ray::new(
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::point(0.0, 0.0, -1.0),
    );

    // Doubling the box about its own center pulls the near face from
    // z = -2.5 to z = -2.
    scene.scale_object(id, &center, 2.0, 2.0, 2.0).unwrap();
    let hit = scene.object(id).unwrap().get_intersection(&ray);
    assert!(feq(hit.time, 2.0));

    scene.transform_object(id, &Matrix::translation(0.0, 0.0, 1.0))
        .unwrap();
    let hit = scene.object(id).unwrap().get_intersection(&ray);
    assert!(feq(hit.time, 1.0));
}

#[test]
fn render_fills_the_window_grid() {
    let mut scene = Scene::new(
        Color::rgb(30, 30, 30),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 0.0, 0.0)),
        IntensityColor::uniform(0.3),
        straight_ahead_camera(),
    );

    scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -1.0), 0.4).into(),
        Material { color: Color::red(), ..Default::default() },
    )).unwrap();

    scene.render().unwrap();

    // The center cell looks straight at the lit sphere; the corner ray
    // passes 0.686 from the sphere's center, outside its radius.
    let window = &scene.camera().window;
    assert_eq!(window.colors[1][1], Color::red());
    assert_eq!(window.colors[0][0], Color::rgb(30, 30, 30));
    assert!(!window.should_update);
}

#[test]
fn render_moves_world_scenes_into_camera_space() {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, -1.0),
        Vector3D::point(0.0, 0.0, 2.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        0.3, 0.6, 0.6, 3, 3,
    ).unwrap();

    let mut scene = Scene::in_world_coordinates(
        Color::rgb(30, 30, 30),
        SourceOfLight::new(IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 0.0, 2.0)),
        IntensityColor::uniform(0.3),
        camera,
    );

    let id = scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -1.0), 0.4).into(),
        Material { color: Color::red(), ..Default::default() },
    )).unwrap();

    scene.render().unwrap();

    assert_eq!(scene.coordinates(), CoordinateSpace::Camera);
    match &scene.object(id).unwrap().geometry {
        Geometry::Sphere(sphere) => {
            assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -3.0));
        },
        other => panic!("expected a sphere, got {:?}", other),
    }

    let window = &scene.camera().window;
    assert_eq!(window.colors[1][1], Color::red());
    assert_eq!(window.colors[0][0], Color::rgb(30, 30, 30));
}
