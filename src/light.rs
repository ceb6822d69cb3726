use crate::color::{ Color, IntensityColor };
use crate::consts::{ DEFAULT_REFLECTIVITY, DEFAULT_SHININESS };
use crate::vector::Vector3D;

/// A point light.
///
/// A very simple light source. Provides an emitted intensity and a position
/// where light is produced from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SourceOfLight {
    pub intensity: IntensityColor,
    pub position: Vector3D,
}

impl SourceOfLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: IntensityColor, position: Vector3D) -> SourceOfLight {
        SourceOfLight { intensity, position: position.as_point() }
    }

    /// Creates a point light whose emitted intensity reproduces a display
    /// color at full brightness.
    pub fn from_display_color(color: Color, position: Vector3D)
        -> SourceOfLight {
        SourceOfLight::new(color.to_intensity(), position)
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model: a surface color
/// plus one reflection coefficient triple per term (ambient, diffuse,
/// specular) and a shininess exponent. Each coefficient filters the light's
/// intensity channel by channel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,

    pub ambient: IntensityColor,
    pub diffuse: IntensityColor,
    pub specular: IntensityColor,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),

            ambient: IntensityColor::uniform(DEFAULT_REFLECTIVITY),
            diffuse: IntensityColor::uniform(DEFAULT_REFLECTIVITY),
            specular: IntensityColor::uniform(DEFAULT_REFLECTIVITY),
            shininess: DEFAULT_SHININESS,
        }
    }
}

/// Calculates the diffuse term of the Phong model at a surface point.
///
/// The term is the light's intensity filtered through the material's diffuse
/// coefficient, scaled by the cosine of the angle between the surface normal
/// and the direction toward the light. Surfaces facing away from the light
/// receive nothing.
///
/// Both `point` and the light's position must be expressed in the same
/// coordinate space as `normal`.
pub fn diffuse_contribution(light: &SourceOfLight, material: &Material,
    point: &Vector3D, normal: &Vector3D) -> IntensityColor {
    // Find direction to light source
    let to_light = (light.position - *point).normalize();

    // For the side of the surface with no light, there is no diffuse term
    let light_dot_normal = to_light.dot(normal);
    if light_dot_normal <= 0.0 {
        return IntensityColor::default();
    }

    light.intensity * material.diffuse * light_dot_normal
}

/// Calculates the specular term of the Phong model at a surface point.
///
/// The direction toward the light is mirrored across the surface normal; the
/// closer that mirror direction lies to the direction toward `eye`, the
/// stronger the highlight. The alignment cosine is clamped to `[0, 1]` before
/// the shininess exponent is applied, so a ray leaving away from the eye
/// contributes nothing rather than a negative (or, for even exponents,
/// spuriously positive) amount.
///
/// `eye` is the position the scene is viewed from, in the same coordinate
/// space as the rest of the arguments.
pub fn specular_contribution(light: &SourceOfLight, material: &Material,
    point: &Vector3D, normal: &Vector3D, eye: &Vector3D) -> IntensityColor {
    let to_light = (light.position - *point).normalize();

    // No highlight on the side of the surface with no light
    let light_dot_normal = to_light.dot(normal);
    if light_dot_normal <= 0.0 {
        return IntensityColor::default();
    }

    let reflected = to_light.reflect_across(normal);
    let to_eye = (*eye - *point).normalize();

    let alignment = reflected.dot(&to_eye).max(0.0).min(1.0);
    let factor = alignment.powf(material.shininess);

    light.intensity * material.specular * factor
}

/* Tests */

#[cfg(test)]
fn plain_material() -> Material {
    Material {
        color: Color::white(),
        ambient: IntensityColor::uniform(0.1),
        diffuse: IntensityColor::uniform(0.9),
        specular: IntensityColor::uniform(0.9),
        shininess: 200.0,
    }
}

#[test]
fn default_material() {
    let m: Material = Default::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.diffuse, IntensityColor::uniform(0.7));
    assert_eq!(m.specular, IntensityColor::uniform(0.7));
    assert_eq!(m.ambient, IntensityColor::uniform(0.7));
    assert!(crate::feq(m.shininess, 10.0));
}

#[test]
fn light_coerces_position() {
    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::direction(0.0, 0.0, -10.0),
    );

    assert!(light.position.is_point);
}

#[test]
fn light_from_display_color() {
    let light = SourceOfLight::from_display_color(
        Color::rgb(255, 51, 0),
        Vector3D::point(0.0, 10.0, 0.0),
    );

    assert_eq!(light.intensity, IntensityColor::new(1.0, 0.2, 0.0));
    assert_eq!(light.position, Vector3D::point(0.0, 10.0, 0.0));
}

#[test]
fn diffuse_head_on() {
    let m = plain_material();
    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::point(0.0, 0.0, -10.0),
    );

    let point = Vector3D::point(0.0, 0.0, 0.0);
    let normal = Vector3D::direction(0.0, 0.0, -1.0);

    let diffuse = diffuse_contribution(&light, &m, &point, &normal);
    assert_eq!(diffuse, IntensityColor::uniform(0.9));
}

#[test]
fn diffuse_at_45_degrees() {
    let m = plain_material();
    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::point(0.0, 10.0, -10.0),
    );

    let point = Vector3D::point(0.0, 0.0, 0.0);
    let normal = Vector3D::direction(0.0, 0.0, -1.0);

    let diffuse = diffuse_contribution(&light, &m, &point, &normal);
    let expected = 0.9 * 2.0f64.sqrt() / 2.0;
    assert_eq!(diffuse, IntensityColor { r: expected, g: expected, b: expected });
}

#[test]
fn diffuse_dark_side() {
    let m = plain_material();
    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::point(0.0, 0.0, 10.0),
    );

    let point = Vector3D::point(0.0, 0.0, 0.0);
    let normal = Vector3D::direction(0.0, 0.0, -1.0);

    let diffuse = diffuse_contribution(&light, &m, &point, &normal);
    assert_eq!(diffuse, IntensityColor::default());
}

#[test]
fn specular_in_mirror_direction() {
    let m = plain_material();
    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::point(0.0, 10.0, -10.0),
    );

    let point = Vector3D::point(0.0, 0.0, 0.0);
    let normal = Vector3D::direction(0.0, 0.0, -1.0);
    let half = 2.0f64.sqrt() / 2.0;
    let eye = Vector3D::point(0.0, -half, -half);

    let specular = specular_contribution(&light, &m, &point, &normal, &eye);
    assert_eq!(specular, IntensityColor::uniform(0.9));
}

#[test]
fn specular_off_mirror_direction() {
    let m = plain_material();
    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::point(0.0, 0.0, -10.0),
    );

    let point = Vector3D::point(0.0, 0.0, 0.0);
    let normal = Vector3D::direction(0.0, 0.0, -1.0);
    let eye = Vector3D::point(0.0, 5.0, 5.0);

    // The mirror direction points straight back at the light; the eye sits
    // 90 degrees away, so the clamped alignment is zero.
    let specular = specular_contribution(&light, &m, &point, &normal, &eye);
    assert_eq!(specular, IntensityColor::default());
}

#[test]
fn specular_dark_side() {
    let m = plain_material();
    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::point(0.0, 0.0, 10.0),
    );

    let point = Vector3D::point(0.0, 0.0, 0.0);
    let normal = Vector3D::direction(0.0, 0.0, -1.0);
    let eye = Vector3D::point(0.0, 0.0, -5.0);

    let specular = specular_contribution(&light, &m, &point, &normal, &eye);
    assert_eq!(specular, IntensityColor::default());
}

#[test]
fn shininess_narrows_the_highlight() {
    let mut soft = plain_material();
    soft.shininess = 2.0;

    let mut sharp = plain_material();
    sharp.shininess = 10.0;

    let light = SourceOfLight::new(
        IntensityColor::uniform(1.0),
        Vector3D::point(0.0, 0.0, -10.0),
    );

    let point = Vector3D::point(0.0, 0.0, 0.0);
    let normal = Vector3D::direction(0.0, 0.0, -1.0);

    // Off-peak by 60 degrees: the mirror direction is (0, 0, -1), and the
    // eye direction makes its dot product exactly 0.5.
    let eye = Vector3D::point(0.75f64.sqrt(), 0.0, -0.5);

    let dim = specular_contribution(&light, &sharp, &point, &normal, &eye);
    let bright = specular_contribution(&light, &soft, &point, &normal, &eye);

    assert!(dim.r < bright.r);
    assert!(crate::feq(dim.r, 0.9 * 0.5f64.powi(10)));
    assert!(crate::feq(bright.r, 0.9 * 0.5f64.powi(2)));
}
