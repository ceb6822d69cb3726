use crate::feq;
use crate::vector::Vector3D;

/// A ray through two points: where it starts and a point it passes through.
/// `direction` is always unit length, so `position(t)` walks `t` units of
/// distance along the ray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vector3D,
    pub through: Vector3D,
}

impl Ray {
    pub fn new(origin: Vector3D, through: Vector3D) -> Ray {
        Ray { origin: origin.as_point(), through: through.as_point() }
    }

    pub fn length(&self) -> f64 {
        (self.through - self.origin).length()
    }

    pub fn direction(&self) -> Vector3D {
        (self.through - self.origin).normalize()
    }

    pub fn position(&self, t: f64) -> Vector3D {
        (self.origin + t * self.direction()).as_point()
    }
}

/* Tests */

#[test]
fn ray_position() {
    let r = Ray::new(
                Vector3D::point(2.0, 3.0, 4.0),
                Vector3D::point(5.0, 3.0, 4.0)
            );

    assert_eq!(r.position(0.0), Vector3D::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Vector3D::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Vector3D::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(3.0), r.through);
}

#[test]
fn ray_length_and_direction() {
    let r = Ray::new(
                Vector3D::point(1.0, 2.0, 3.0),
                Vector3D::point(1.0, 5.0, 7.0)
            );

    assert!(feq(r.length(), 5.0));
    assert_eq!(r.direction(), Vector3D::direction(0.0, 0.6, 0.8));
    assert!(feq(r.direction().length(), 1.0));
}

#[test]
fn ray_coerces_endpoints_to_points() {
    let r = Ray::new(
                Vector3D::direction(0.0, 0.0, 0.0),
                Vector3D::direction(0.0, 0.0, -1.0)
            );

    assert!(r.origin.is_point);
    assert!(r.through.is_point);
}
