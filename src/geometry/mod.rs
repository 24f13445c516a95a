mod ray_triangle_intersection;
mod triangle;

use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};

use crate::scene::Object;

pub use triangle::{BarycentricCoordinates, Triangle};

pub type FloatType = f64;

/// Smallest determinant magnitude that is still considered a proper (non-degenerate)
/// linear system when solving for ray-triangle intersections.
pub const DETERMINANT_EPSILON: FloatType = 1e-12;

pub const EPSILON: FloatType = 1e-9;

pub type ScreenPoint = Point2<u32>;
pub type ScreenSize = Vector2<u32>;

pub type WorldPoint = Point3<FloatType>;
pub type WorldVector = Vector3<FloatType>;

/// Texture coordinates (u, v, w). Meshes only ever fill u and v, w stays zero.
pub type TexturePoint = Point3<FloatType>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Normalized direction of the ray
    pub direction: Unit<WorldVector>,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    pub fn point_at(&self, distance: FloatType) -> WorldPoint {
        self.origin + self.direction.as_ref() * distance
    }
}

/// Result of a successful ray query against an object.
#[derive(Copy, Clone)]
pub struct HitRecord<'a> {
    /// Distance along the ray
    pub t: FloatType,
    pub point: WorldPoint,
    /// Shading normal, flat or interpolated
    pub normal: WorldVector,
    pub texture_coords: TexturePoint,
    /// Direction in object space along which the texture u coordinate grows
    pub dndx: WorldVector,
    /// Direction in object space along which the texture v coordinate grows
    pub dndy: WorldVector,
    /// The object that was hit
    pub object: &'a dyn Object,
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("t", &self.t)
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("texture_coords", &self.texture_coords)
            .field("dndx", &self.dndx)
            .field("dndy", &self.dndy)
            .finish_non_exhaustive()
    }
}

/// Returns a unit vector in the direction of `v`, or a zero vector if `v` has zero
/// or non-finite length.
pub fn normalize_or_zero(v: WorldVector) -> WorldVector {
    let norm = v.norm();
    if norm > 0.0 && norm.is_finite() {
        v / norm
    } else {
        WorldVector::zeros()
    }
}

/// Scalar triple product (a x b) . c
pub fn triple_product(a: &WorldVector, b: &WorldVector, c: &WorldVector) -> FloatType {
    a.cross(b).dot(c)
}
