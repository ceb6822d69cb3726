use crate::feq;

/// A handle to an object owned by a `Scene`.
///
/// Handles are dense indices handed out by `Scene::push_object`; a scene
/// resolves them back to objects and stamps them onto the intersections it
/// reports. Looking up a handle in a scene it did not come from (or after
/// `clear_objects`) is caught by the scene, not here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// The result of firing a ray at something.
///
/// `time` is the distance along the ray, in units of its normalized
/// direction. An intersection only counts when it is `valid`: the distance
/// must be finite and strictly positive, so hits behind the ray origin, at
/// the origin itself, or produced by degenerate geometry (infinities, NaN
/// from a parallel denominator) are all ruled out by the same check in
/// `Intersection::at`.
///
/// `object` names which scene object was hit, once the scene has resolved
/// that; `face` names the winning face when the object is a mesh.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    pub time: f64,
    pub valid: bool,
    pub object: Option<ObjectId>,
    pub face: Option<usize>,
}

impl Intersection {
    /// An intersection at distance `time`, valid only when that distance is
    /// finite and strictly positive.
    pub fn at(time: f64) -> Intersection {
        Intersection {
            time,
            valid: time.is_finite() && time > 0.0,
            object: None,
            face: None,
        }
    }

    /// The "no hit" intersection.
    pub fn none() -> Intersection {
        Intersection {
            time: f64::INFINITY,
            valid: false,
            object: None,
            face: None,
        }
    }

    /// Picks the nearer of two intersections, ignoring invalid ones. On an
    /// exact tie, `self` wins; scanning a scene in insertion order with this
    /// combinator therefore resolves ties toward the earliest object.
    pub fn nearer(self, other: Intersection) -> Intersection {
        if !self.valid {
            other
        } else if other.valid && other.time < self.time {
            other
        } else {
            self
        }
    }
}

impl Default for Intersection {
    fn default() -> Intersection {
        Intersection::none()
    }
}

/// Implements partial equality on an `Intersection`.
///
/// Two invalid intersections are equal no matter what distances they carry.
/// Two valid ones are equal when their distances match (within the crate
/// tolerance) and they name the same object and face.
impl PartialEq for Intersection {
    fn eq(&self, other: &Intersection) -> bool {
        if self.valid != other.valid {
            return false;
        }

        if !self.valid {
            return true;
        }

        feq(self.time, other.time) &&
            self.object == other.object &&
            self.face == other.face
    }
}

/* Tests */

#[test]
fn at_accepts_positive_finite_distances() {
    let i = Intersection::at(2.5);

    assert!(i.valid);
    assert!(feq(i.time, 2.5));
    assert_eq!(i.object, None);
    assert_eq!(i.face, None);
}

#[test]
fn at_rejects_everything_else() {
    assert!(!Intersection::at(0.0).valid);
    assert!(!Intersection::at(-3.0).valid);
    assert!(!Intersection::at(f64::INFINITY).valid);
    assert!(!Intersection::at(f64::NEG_INFINITY).valid);
    assert!(!Intersection::at(f64::NAN).valid);
}

#[test]
fn none_is_invalid() {
    assert!(!Intersection::none().valid);
    assert_eq!(Intersection::default(), Intersection::none());
}

#[test]
fn nearer_picks_the_smaller_distance() {
    let near = Intersection::at(2.0);
    let far = Intersection::at(5.0);

    assert_eq!(near.nearer(far), near);
    assert_eq!(far.nearer(near), near);
}

#[test]
fn nearer_skips_invalid_intersections() {
    let hit = Intersection::at(3.0);
    let miss = Intersection::none();

    assert_eq!(miss.nearer(hit), hit);
    assert_eq!(hit.nearer(miss), hit);
    assert!(!miss.nearer(miss).valid);
}

#[test]
fn nearer_keeps_the_first_on_a_tie() {
    let mut first = Intersection::at(2.0);
    first.object = Some(ObjectId(0));

    let mut second = Intersection::at(2.0);
    second.object = Some(ObjectId(1));

    assert_eq!(first.nearer(second).object, Some(ObjectId(0)));
}

#[test]
fn equality_is_tolerance_based() {
    assert_eq!(Intersection::at(1.0), Intersection::at(1.0 + 5e-13));
    assert_ne!(Intersection::at(1.0), Intersection::at(1.1));

    // Invalid intersections compare equal regardless of distance.
    assert_eq!(Intersection::at(-1.0), Intersection::at(-7.0));
}
