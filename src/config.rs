use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use log::info;
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::color::{ Color, IntensityColor };
use crate::vector::Vector3D;
use crate::light::{ Material, SourceOfLight };
use crate::shape::{ Cone, Cylinder, Geometry, Mesh, Object, Plane, Quad,
    ShapeError, Sphere, Triangle };
use crate::camera::{ Camera, CameraError };
use crate::scene::{ Scene, SceneError };

/// Errors raised while loading a scene description file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read the scene file")]
    Io(#[from] std::io::Error),

    #[error("the scene file is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A scene as written in a JSON file.
///
/// Positions and directions are plain `[x, y, z]` triples, display colors
/// are `[r, g, b]` bytes, and intensities are `[r, g, b]` factors. Objects
/// are given in world coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub background_color: [u8; 3],
    pub ambient_light: [f64; 3],
    pub light: LightDescription,
    pub camera: CameraDescription,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LightDescription {
    pub position: [f64; 3],
    pub intensity: [f64; 3],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CameraDescription {
    pub eye: [f64; 3],
    pub look_at: [f64; 3],
    pub view_up: [f64; 3],
    pub focal_distance: f64,
    pub window: WindowDescription,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowDescription {
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
}

/// One object: a shape, tagged by its `type` field, plus an optional
/// material. Missing material fields fall back to the material defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObjectDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,
    #[serde(default)]
    pub material: MaterialDescription,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere { center: [f64; 3], radius: f64 },
    Plane { point: [f64; 3], normal: [f64; 3] },
    Triangle { p1: [f64; 3], p2: [f64; 3], p3: [f64; 3] },
    Quad { p1: [f64; 3], p2: [f64; 3], p3: [f64; 3], p4: [f64; 3] },
    Cylinder { base: [f64; 3], axis: [f64; 3], radius: f64, height: f64 },
    Cone { base: [f64; 3], axis: [f64; 3], radius: f64, height: f64 },
    Cuboid { center: [f64; 3], width: f64, height: f64, depth: f64 },
    Mesh { faces: Vec<[[f64; 3]; 4]> },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MaterialDescription {
    pub color: [u8; 3],
    pub ambient: [f64; 3],
    pub diffuse: [f64; 3],
    pub specular: [f64; 3],
    pub shininess: f64,
}

impl Default for MaterialDescription {
    fn default() -> MaterialDescription {
        let surface = Material::default();
        MaterialDescription {
            color: [surface.color.r, surface.color.g, surface.color.b],
            ambient: [surface.ambient.r, surface.ambient.g,
                surface.ambient.b],
            diffuse: [surface.diffuse.r, surface.diffuse.g,
                surface.diffuse.b],
            specular: [surface.specular.r, surface.specular.g,
                surface.specular.b],
            shininess: surface.shininess,
        }
    }
}

fn point(coordinates: [f64; 3]) -> Vector3D {
    Vector3D::point(coordinates[0], coordinates[1], coordinates[2])
}

fn direction(coordinates: [f64; 3]) -> Vector3D {
    Vector3D::direction(coordinates[0], coordinates[1], coordinates[2])
}

fn intensity(channels: [f64; 3]) -> IntensityColor {
    IntensityColor::new(channels[0], channels[1], channels[2])
}

fn color(channels: [u8; 3]) -> Color {
    Color::rgb(channels[0], channels[1], channels[2])
}

impl From<MaterialDescription> for Material {
    fn from(description: MaterialDescription) -> Material {
        Material {
            color: color(description.color),
            ambient: intensity(description.ambient),
            diffuse: intensity(description.diffuse),
            specular: intensity(description.specular),
            shininess: description.shininess,
        }
    }
}

impl TryFrom<ShapeDescription> for Geometry {
    type Error = ShapeError;

    fn try_from(description: ShapeDescription)
        -> Result<Geometry, ShapeError> {
        Ok(match description {
            ShapeDescription::Sphere { center, radius } =>
                Sphere::new(point(center), radius).into(),
            ShapeDescription::Plane { point: origin, normal } =>
                Plane::new(point(origin), direction(normal)).into(),
            ShapeDescription::Triangle { p1, p2, p3 } =>
                Triangle::new(point(p1), point(p2), point(p3)).into(),
            ShapeDescription::Quad { p1, p2, p3, p4 } =>
                Quad::new(point(p1), point(p2), point(p3), point(p4))
                    .into(),
            ShapeDescription::Cylinder { base, axis, radius, height } =>
                Cylinder::new(point(base), direction(axis), radius, height)
                    .into(),
            ShapeDescription::Cone { base, axis, radius, height } =>
                Cone::new(point(base), direction(axis), radius, height)
                    .into(),
            ShapeDescription::Cuboid { center, width, height, depth } =>
                Mesh::cuboid(point(center), width, height, depth).into(),
            ShapeDescription::Mesh { faces } => {
                let faces = faces.into_iter()
                    .map(|[p1, p2, p3, p4]| Quad::new(point(p1), point(p2),
                        point(p3), point(p4)))
                    .collect();

                Mesh::new(faces)?.into()
            },
        })
    }
}

impl TryFrom<SceneDescription> for Scene {
    type Error = ConfigError;

    fn try_from(description: SceneDescription)
        -> Result<Scene, ConfigError> {
        let camera = Camera::new(
            point(description.camera.look_at),
            point(description.camera.eye),
            direction(description.camera.view_up),
            description.camera.focal_distance,
            description.camera.window.width,
            description.camera.window.height,
            description.camera.window.cols,
            description.camera.window.rows,
        )?;

        let mut scene = Scene::in_world_coordinates(
            color(description.background_color),
            SourceOfLight::new(intensity(description.light.intensity),
                point(description.light.position)),
            intensity(description.ambient_light),
            camera,
        );

        for object in description.objects {
            let geometry = Geometry::try_from(object.shape)?;
            scene.push_object(Object::new(geometry, object.material.into()))?;
        }

        Ok(scene)
    }
}

/// Loads a scene from a JSON description file.
pub fn load(path: &Path) -> Result<Scene, ConfigError> {
    let text = fs::read_to_string(path)?;
    let description: SceneDescription = serde_json::from_str(&text)?;

    info!("loaded {} objects from {}", description.objects.len(),
        path.display());

    Scene::try_from(description)
}

/* Tests */

#[cfg(test)]
use crate::feq;
#[cfg(test)]
use crate::camera::CoordinateSpace;

#[test]
fn a_scene_description_builds_a_scene() {
    let json = r#"{
        "background_color": [30, 30, 30],
        "ambient_light": [0.3, 0.3, 0.3],
        "light": {
            "position": [0.0, 0.6, -0.3],
            "intensity": [0.7, 0.7, 0.7]
        },
        "camera": {
            "eye": [0.0, 0.0, 0.0],
            "look_at": [0.0, 0.0, -1.0],
            "view_up": [0.0, 1.0, 0.0],
            "focal_distance": 0.3,
            "window": { "width": 0.6, "height": 0.6, "cols": 4, "rows": 4 }
        },
        "objects": [
            {
                "type": "sphere",
                "center": [0.0, 0.0, -1.0],
                "radius": 0.4,
                "material": { "color": [255, 0, 0] }
            },
            {
                "type": "plane",
                "point": [0.0, -0.4, 0.0],
                "normal": [0.0, 1.0, 0.0]
            }
        ]
    }"#;

    let description: SceneDescription = serde_json::from_str(json).unwrap();
    let scene = Scene::try_from(description).unwrap();

    assert_eq!(scene.objects().len(), 2);
    assert_eq!(scene.coordinates(), CoordinateSpace::World);
    assert_eq!(scene.camera().eye(), Vector3D::point(0.0, 0.0, 0.0));
    assert_eq!(scene.background_color(), Color::rgb(30, 30, 30));

    match &scene.objects()[0].geometry {
        Geometry::Sphere(sphere) => {
            assert_eq!(sphere.center(), Vector3D::point(0.0, 0.0, -1.0));
            assert!(feq(sphere.radius(), 0.4));
        },
        other => panic!("expected a sphere, got {:?}", other),
    }

    // The sphere's material keeps the default coefficients around its
    // custom color; the plane gets the default material outright.
    assert_eq!(scene.objects()[0].material.color, Color::red());
    assert!(feq(scene.objects()[0].material.shininess,
        Material::default().shininess));
    assert_eq!(scene.objects()[1].material, Material::default());
}

#[test]
fn every_shape_variant_parses() {
    let json = r#"[
        { "type": "sphere", "center": [0, 0, 0], "radius": 1.0 },
        { "type": "plane", "point": [0, 0, 0], "normal": [0, 1, 0] },
        { "type": "triangle",
          "p1": [0, 0, 0], "p2": [1, 0, 0], "p3": [0, 1, 0] },
        { "type": "quad",
          "p1": [0, 0, 0], "p2": [1, 0, 0],
          "p3": [1, 1, 0], "p4": [0, 1, 0] },
        { "type": "cylinder",
          "base": [0, 0, 0], "axis": [0, 1, 0],
          "radius": 1.0, "height": 2.0 },
        { "type": "cone",
          "base": [0, 0, 0], "axis": [0, 1, 0],
          "radius": 1.0, "height": 2.0 },
        { "type": "cuboid",
          "center": [0, 0, 0],
          "width": 1.0, "height": 1.0, "depth": 1.0 },
        { "type": "mesh",
          "faces": [[[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]]] }
    ]"#;

    let descriptions: Vec<ObjectDescription> =
        serde_json::from_str(json).unwrap();
    assert_eq!(descriptions.len(), 8);

    for description in descriptions {
        Geometry::try_from(description.shape).unwrap();
    }
}

#[test]
fn a_cuboid_description_becomes_a_six_faced_mesh() {
    let description = ShapeDescription::Cuboid {
        center: [0.0, 0.0, -3.0],
        width: 2.0,
        height: 2.0,
        depth: 2.0,
    };

    match Geometry::try_from(description).unwrap() {
        Geometry::Mesh(mesh) => assert_eq!(mesh.faces().len(), 6),
        other => panic!("expected a mesh, got {:?}", other),
    }
}

#[test]
fn an_empty_mesh_description_is_rejected() {
    let description = ShapeDescription::Mesh { faces: Vec::new() };

    match Geometry::try_from(description) {
        Err(ShapeError::EmptyMesh) => (),
        other => panic!("expected the empty mesh error, got {:?}", other),
    }
}

#[test]
fn an_unknown_shape_type_is_rejected() {
    let json = r#"{ "type": "torus", "center": [0, 0, 0], "radius": 1.0 }"#;

    assert!(serde_json::from_str::<ObjectDescription>(json).is_err());
}

#[test]
fn a_partial_material_fills_in_the_defaults() {
    let json = r#"{ "color": [0, 0, 255], "shininess": 30.0 }"#;

    let description: MaterialDescription =
        serde_json::from_str(json).unwrap();
    let material = Material::from(description);

    assert_eq!(material.color, Color::blue());
    assert!(feq(material.shininess, 30.0));
    assert_eq!(material.ambient, Material::default().ambient);
    assert_eq!(material.diffuse, Material::default().diffuse);
}

#[test]
fn object_descriptions_round_trip_through_json() {
    let description = ObjectDescription {
        shape: ShapeDescription::Sphere {
            center: [0.0, 0.0, -1.0],
            radius: 0.4,
        },
        material: MaterialDescription {
            color: [255, 0, 0],
            ..Default::default()
        },
    };

    let json = serde_json::to_string(&description).unwrap();
    let back: ObjectDescription = serde_json::from_str(&json).unwrap();

    assert_eq!(back, description);
}

#[test]
fn a_missing_scene_file_reports_an_io_error() {
    match load(Path::new("does-not-exist.json")) {
        Err(ConfigError::Io(_)) => (),
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[test]
fn a_degenerate_camera_description_is_rejected() {
    let json = r#"{
        "background_color": [0, 0, 0],
        "ambient_light": [0.3, 0.3, 0.3],
        "light": {
            "position": [0.0, 10.0, 0.0],
            "intensity": [0.7, 0.7, 0.7]
        },
        "camera": {
            "eye": [0.0, 0.0, -1.0],
            "look_at": [0.0, 0.0, -1.0],
            "view_up": [0.0, 1.0, 0.0],
            "focal_distance": 0.3,
            "window": { "width": 0.6, "height": 0.6, "cols": 4, "rows": 4 }
        }
    }"#;

    let description: SceneDescription = serde_json::from_str(json).unwrap();

    match Scene::try_from(description) {
        Err(ConfigError::Camera(CameraError::EyeOnLookAt)) => (),
        other => panic!("expected the eye-on-look-at error, got {:?}", other),
    }
}
