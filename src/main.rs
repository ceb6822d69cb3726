use std::path::Path;

use anyhow::Result;
use clap::Parser;
use log::info;

use phong_tracer::color::{ Color, IntensityColor };
use phong_tracer::vector::Vector3D;
use phong_tracer::light::{ Material, SourceOfLight };
use phong_tracer::shape::{ Object, Plane, Sphere };
use phong_tracer::camera::Camera;
use phong_tracer::scene::Scene;
use phong_tracer::config;

/// Renders a scene to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// A JSON scene description to render instead of the built-in scene.
    #[clap(short, long)]
    scene: Option<String>,

    /// Where to write the rendered image.
    #[clap(short, long, default_value = "out.ppm")]
    output: String,

    /// Cells per side of the rendering window, overriding the scene's own
    /// resolution.
    #[clap(long)]
    size: Option<usize>,
}

/// The built-in scene: a red sphere floating in front of a floor and a back
/// wall, lit from above the viewer.
fn demo_scene() -> Result<Scene> {
    let camera = Camera::new(
        Vector3D::point(0.0, 0.0, -1.0),
        Vector3D::point(0.0, 0.0, 0.0),
        Vector3D::direction(0.0, 1.0, 0.0),
        0.3, 0.6, 0.6, 500, 500,
    )?;

    let mut scene = Scene::in_world_coordinates(
        Color::rgb(30, 30, 30),
        SourceOfLight::new(
            IntensityColor::uniform(0.7),
            Vector3D::point(0.0, 0.6, -0.3),
        ),
        IntensityColor::uniform(0.3),
        camera,
    );

    scene.push_object(Object::new(
        Sphere::new(Vector3D::point(0.0, 0.0, -1.0), 0.4).into(),
        Material { color: Color::red(), ..Default::default() },
    ))?;

    scene.push_object(Object::new(
        Plane::new(
            Vector3D::point(0.0, -0.4, 0.0),
            Vector3D::direction(0.0, 1.0, 0.0),
        ).into(),
        Material { color: Color::rgb(160, 160, 160), ..Default::default() },
    ))?;

    scene.push_object(Object::new(
        Plane::new(
            Vector3D::point(0.0, 0.0, -2.0),
            Vector3D::direction(0.0, 0.0, 1.0),
        ).into(),
        Material { color: Color::rgb(120, 120, 170), ..Default::default() },
    ))?;

    Ok(scene)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scene = match &args.scene {
        Some(path) => config::load(Path::new(path))?,
        None => demo_scene()?,
    };

    if let Some(size) = args.size {
        let camera = scene.camera();
        let resized = Camera::new(camera.look_at(), camera.eye(),
            camera.view_up(), camera.focal_distance(), camera.window.width,
            camera.window.height, size, size)?;
        scene.set_camera(resized)?;
    }

    scene.render()?;
    scene.camera().window.save_ppm(Path::new(&args.output))?;
    info!("wrote {}", args.output);

    Ok(())
}
