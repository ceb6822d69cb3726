use std::ops::{ Add, Mul };

use serde::{ Serialize, Deserialize };

use crate::feq;
use crate::consts::DISPLAY_MAX;

/// A displayable color.
///
/// Represented conventionally with red-green-blue (RGB) channels, each an
/// integer from 0 to 255. This is the type that ends up in the window grid
/// and in image files; the shading math runs on `IntensityColor` and is
/// applied to a `Color` with `multiply`.
///
/// # Examples
///
/// Dimming a white surface to half brightness:
///
/// ```
/// # #![allow(unused)]
/// # use phong_tracer::color::{ Color, IntensityColor };
/// let half = IntensityColor::uniform(0.5);
/// assert_eq!(Color::white().multiply(&half), Color::rgb(128, 128, 128));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd,
         Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color with red, green and blue channels.
    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color { r: 0, g: 0, b: 0 }
    }

    /// The color white.
    pub fn white() -> Color {
        Color { r: 255, g: 255, b: 255 }
    }

    /// The color red.
    pub fn red() -> Color {
        Color { r: 255, g: 0, b: 0 }
    }

    /// The color green.
    pub fn green() -> Color {
        Color { r: 0, g: 255, b: 0 }
    }

    /// The color blue.
    pub fn blue() -> Color {
        Color { r: 0, g: 0, b: 255 }
    }

    /// Scales each channel by the matching intensity component, rounding to
    /// the nearest integer and clamping to the displayable range.
    ///
    /// This is how a Phong shading factor (which may exceed 1 when several
    /// contributions pile up) lands back on a displayable color.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::color::{ Color, IntensityColor };
    /// let surface = Color::rgb(200, 100, 0);
    /// let factor = IntensityColor::new(0.5, 1.0, 1.0) + IntensityColor::new(0.0, 1.0, 0.0);
    /// assert_eq!(surface.multiply(&factor), Color::rgb(100, 200, 0));
    /// ```
    pub fn multiply(&self, intensity: &IntensityColor) -> Color {
        Color {
            r: Color::scale_channel(self.r, intensity.r),
            g: Color::scale_channel(self.g, intensity.g),
            b: Color::scale_channel(self.b, intensity.b),
        }
    }

    /// Converts a display color to the intensity that produces it, mapping
    /// each channel from `[0, 255]` back onto `[0.0, 1.0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::color::{ Color, IntensityColor };
    /// assert_eq!(Color::rgb(255, 51, 0).to_intensity(),
    ///     IntensityColor::new(1.0, 0.2, 0.0));
    /// ```
    pub fn to_intensity(&self) -> IntensityColor {
        IntensityColor {
            r: self.r as f64 / DISPLAY_MAX,
            g: self.g as f64 / DISPLAY_MAX,
            b: self.b as f64 / DISPLAY_MAX,
        }
    }

    fn scale_channel(channel: u8, factor: f64) -> u8 {
        let scaled = (channel as f64 * factor).round();
        scaled.max(0.0).min(DISPLAY_MAX) as u8
    }
}

/// A light intensity or reflection coefficient triple.
///
/// Each component is a dimensionless factor, nominally between 0.0 and 1.0.
/// Light sources carry one of these for their emitted intensity, and
/// materials carry one per Phong term for how much of that intensity the
/// surface reflects. The shading model combines them with Hadamard products
/// and sums, then modulates the surface `Color` with the result.
#[derive(Copy, Clone, Debug, Default, PartialOrd, Serialize, Deserialize)]
pub struct IntensityColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two intensities.
///
/// Similar to the `PartialEq` implementation on `Vector3D`, intensities are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for IntensityColor {
    fn eq(&self, other: &IntensityColor) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl IntensityColor {
    /// Creates an intensity, clamping each component to the range
    /// `[0.0, 1.0]`.
    pub fn new(r: f64, g: f64, b: f64) -> IntensityColor {
        IntensityColor {
            r: IntensityColor::clamp_component(r),
            g: IntensityColor::clamp_component(g),
            b: IntensityColor::clamp_component(b),
        }
    }

    /// Creates an intensity with the same value in every component.
    pub fn uniform(value: f64) -> IntensityColor {
        IntensityColor::new(value, value, value)
    }

    fn clamp_component(value: f64) -> f64 {
        value.max(0.0).min(1.0)
    }

    /// Computes the Hadamard product of two intensities.
    ///
    /// The Hadamard product multiplies each component of the two intensities,
    /// and yields a new intensity containing those products. This is how a
    /// light's emitted intensity is filtered through a material coefficient.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::color::IntensityColor;
    /// let light = IntensityColor::new(0.8, 0.8, 0.8);
    /// let coefficient = IntensityColor::new(0.5, 1.0, 0.0);
    /// let reflected = IntensityColor::hadamard(&light, &coefficient);
    /// assert_eq!(reflected, IntensityColor::new(0.4, 0.8, 0.0));
    /// ```
    pub fn hadamard(c1: &IntensityColor, c2: &IntensityColor)
        -> IntensityColor {
        IntensityColor {
            r: c1.r * c2.r,
            g: c1.g * c2.g,
            b: c1.b * c2.b,
        }
    }

    /// Converts an intensity directly to a displayable color, mapping the
    /// range `[0.0, 1.0]` onto `[0, 255]` with rounding and clamping.
    pub fn to_color(&self) -> Color {
        Color {
            r: IntensityColor::to_channel(self.r),
            g: IntensityColor::to_channel(self.g),
            b: IntensityColor::to_channel(self.b),
        }
    }

    fn to_channel(value: f64) -> u8 {
        (value * DISPLAY_MAX).round().max(0.0).min(DISPLAY_MAX) as u8
    }
}

/// Adds two intensities together.
///
/// Components are added together individually, without clamping; the Phong
/// terms are summed this way before modulating the surface color, and the
/// clamp happens there.
impl Add<IntensityColor> for IntensityColor {
    type Output = IntensityColor;

    fn add(self, other: IntensityColor) -> Self::Output {
        IntensityColor {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

/// Multiplies an intensity by a scalar.
///
/// Each component is multiplied by the scalar, without clamping.
impl Mul<f64> for IntensityColor {
    type Output = IntensityColor;

    fn mul(self, other: f64) -> Self::Output {
        IntensityColor {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by an intensity.
///
/// Returns an intensity with each component multiplied by the scalar.
impl Mul<IntensityColor> for f64 {
    type Output = IntensityColor;

    fn mul(self, other: IntensityColor) -> Self::Output {
        other * self
    }
}

/// Multiplies an intensity by an intensity.
///
/// For intensities `c1` and `c2`, `c1 * c2` is shorthand for
/// `IntensityColor::hadamard(&c1, &c2)`.
impl Mul<IntensityColor> for IntensityColor {
    type Output = IntensityColor;

    fn mul(self, other: IntensityColor) -> Self::Output {
        IntensityColor::hadamard(&self, &other)
    }
}

/* Tests */

#[test]
fn new_clamps_components() {
    let c = IntensityColor::new(1.5, -0.25, 0.5);
    assert_eq!(c, IntensityColor { r: 1.0, g: 0.0, b: 0.5 });
}

#[test]
fn add_intensities() {
    let c1 = IntensityColor::new(0.9, 0.6, 0.75);
    let c2 = IntensityColor::new(0.7, 0.1, 0.25);
    let c3 = IntensityColor { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn scale_intensity() {
    let c = IntensityColor::new(0.2, 0.3, 0.4);
    let doubled = IntensityColor { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c * 2.0, doubled);
    assert_eq!(2.0 * c, doubled);
}

#[test]
fn hadamard_intensities() {
    let c1 = IntensityColor::new(1.0, 0.2, 0.4);
    let c2 = IntensityColor::new(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, IntensityColor::new(0.9, 0.2, 0.04));
}

#[test]
fn intensity_to_color_rounds() {
    let c = IntensityColor::new(0.5, 1.0, 0.0);
    assert_eq!(c.to_color(), Color::rgb(128, 255, 0));
}

#[test]
fn intensity_to_color_clamps_overbright() {
    let c = IntensityColor::new(0.8, 0.8, 0.8) + IntensityColor::new(0.6, 0.6, 0.6);
    assert_eq!(c.to_color(), Color::white());
}

#[test]
fn multiply_color_by_intensity() {
    let surface = Color::rgb(255, 255, 255);
    let factor = IntensityColor::new(0.5, 0.25, 0.0);

    assert_eq!(surface.multiply(&factor), Color::rgb(128, 64, 0));
}

#[test]
fn multiply_color_clamps_overbright() {
    let surface = Color::rgb(200, 10, 0);
    let factor = IntensityColor::new(0.9, 0.9, 0.9) + IntensityColor::new(0.9, 0.9, 0.9);

    assert_eq!(surface.multiply(&factor), Color::rgb(255, 18, 0));
}

#[test]
fn color_to_intensity_normalizes() {
    let c = Color::rgb(255, 51, 0);
    assert_eq!(c.to_intensity(), IntensityColor::new(1.0, 0.2, 0.0));
}

#[test]
fn display_and_intensity_round_trip() {
    for &c in &[Color::black(), Color::white(), Color::rgb(12, 128, 255)] {
        assert_eq!(c.to_intensity().to_color(), c);
    }

    let i = IntensityColor::new(0.2, 0.0, 1.0);
    assert_eq!(i.to_color().to_intensity(), i);
}

#[test]
fn intensity_to_color_clamps_negative() {
    let c = IntensityColor { r: -0.5, g: 0.5, b: 0.0 };
    assert_eq!(c.to_color(), Color::rgb(0, 128, 0));
}

#[test]
fn intensity_equality_is_tolerance_based() {
    let a = IntensityColor::new(0.1, 0.2, 0.3);
    let b = IntensityColor::new(0.1 + 5e-13, 0.2, 0.3);

    assert_eq!(a, b);
}
