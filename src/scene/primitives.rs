use crate::geometry::{
    FloatType, HitRecord, Ray, TexturePoint, WorldPoint, WorldVector, normalize_or_zero,
};

use super::Object;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: WorldPoint,
    pub radius: FloatType,
}

impl Sphere {
    pub fn new(center: WorldPoint, radius: FloatType) -> Self {
        Sphere { center, radius }
    }

    /// Returns the distance to the nearest intersection in front of the ray origin.
    /// Rays starting inside the sphere hit its far side.
    pub fn intersect_distance(&self, ray: &Ray) -> Option<FloatType> {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction.as_ref());
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = -b - sqrt_disc;
        let t2 = -b + sqrt_disc;
        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }

    pub fn contains(&self, point: &WorldPoint) -> bool {
        (point - self.center).norm() <= self.radius
    }
}

impl Object for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let t = self.intersect_distance(ray)?;
        let point = ray.point_at(t);

        Some(HitRecord {
            t,
            point,
            normal: normalize_or_zero(point - self.center),
            texture_coords: TexturePoint::origin(),
            dndx: WorldVector::zeros(),
            dndy: WorldVector::zeros(),
            object: self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, let_assert};

    fn sphere() -> Sphere {
        Sphere::new([1.0, 2.0, 3.0].into(), 1.0)
    }

    #[test]
    fn test_direct_hit_through_center() {
        let sphere = sphere();
        let ray = Ray::new([1.0, 2.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let_assert!(Some(h) = sphere.intersect(&ray));
        assert!((h.t - 2.0).abs() < 1e-9);
        assert!((h.normal - WorldVector::new(0.0, 0.0, -1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_grazing_hit() {
        let ray = Ray::new([2.0, 2.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let_assert!(Some(t) = sphere().intersect_distance(&ray));
        assert!((t - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_miss() {
        let ray = Ray::new([2.0, 2.01, 0.0].into(), [0.0, 0.0, 1.0].into());
        assert!(sphere().intersect(&ray).is_none());
    }

    #[test]
    fn test_origin_inside_hits_far_side() {
        let ray = Ray::new([1.0, 2.0, 3.0].into(), [0.0, 0.0, 1.0].into());
        let_assert!(Some(t) = sphere().intersect_distance(&ray));
        assert!((t - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_behind_ray() {
        let ray = Ray::new([1.0, 2.0, 5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(sphere().intersect_distance(&ray).is_none());
    }

    #[test]
    fn test_contains() {
        assert!(sphere().contains(&WorldPoint::new(1.0, 2.0, 4.0)));
        assert!(!sphere().contains(&WorldPoint::new(1.0, 2.0, 4.1)));
    }
}
