use super::{
    BarycentricCoordinates, DETERMINANT_EPSILON, FloatType, Ray, Triangle, WorldPoint,
    triple_product,
};

impl Triangle<WorldPoint> {
    /// Calculates ray intersection with the (two sided) triangle.
    /// Returns distance along the ray and barycentric coordinates of the hit.
    ///
    /// Solves `origin + t * direction = A + u * (B - A) + v * (C - A)` using Cramer's rule.
    /// Nearly singular systems (ray parallel to the triangle plane, or a degenerate triangle)
    /// are reported as a miss, as are hits behind the ray origin.
    pub fn intersect(&self, ray: &Ray) -> Option<(FloatType, BarycentricCoordinates<FloatType>)> {
        let [ab, ac] = self.edges();
        let h = ray.origin - self[0];
        let neg_d = -ray.direction.into_inner();

        let det = triple_product(&ab, &ac, &neg_d);
        if det.abs() < DETERMINANT_EPSILON {
            return None;
        }

        let u = triple_product(&h, &ac, &neg_d) / det;
        let v = triple_product(&ab, &h, &neg_d) / det;

        if u < 0.0 || v < 0.0 {
            return None;
        }
        if u > 1.0 || v > 1.0 {
            return None;
        }
        if u + v > 1.0 {
            return None;
        }

        let t = triple_product(&ab, &ac, &h) / det;
        if t < 0.0 {
            return None;
        }

        Some((t, BarycentricCoordinates { u, v }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::WorldVector;
    use assert2::{assert, let_assert};
    use test_case::test_case;

    fn unit_triangle() -> Triangle<WorldPoint> {
        Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(1.0, 0.0, 0.0),
            WorldPoint::new(0.0, 1.0, 0.0),
        )
    }

    #[test_case(0.25, 0.25 ; "inside")]
    #[test_case(0.1, 0.8 ; "near hypotenuse")]
    #[test_case(0.0, 0.0 ; "first vertex")]
    #[test_case(0.5, 0.0 ; "on edge")]
    fn hit_from_above(x: FloatType, y: FloatType) {
        let ray = Ray::new(WorldPoint::new(x, y, 2.0), WorldVector::new(0.0, 0.0, -1.0));
        let_assert!(Some((t, uv)) = unit_triangle().intersect(&ray));
        assert!((t - 2.0).abs() < 1e-12);
        assert!((uv.u - x).abs() < 1e-12);
        assert!((uv.v - y).abs() < 1e-12);
    }

    #[test]
    fn hit_from_below_is_two_sided() {
        let ray = Ray::new(
            WorldPoint::new(0.2, 0.2, -3.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );
        let_assert!(Some((t, _)) = unit_triangle().intersect(&ray));
        assert!((t - 3.0).abs() < 1e-12);
    }

    #[test_case(-0.1, 0.5 ; "u negative")]
    #[test_case(0.5, -0.1 ; "v negative")]
    #[test_case(1.1, 0.0 ; "u above one")]
    #[test_case(0.0, 1.1 ; "v above one")]
    #[test_case(0.6, 0.6 ; "outside hypotenuse")]
    fn miss_outside(x: FloatType, y: FloatType) {
        let ray = Ray::new(WorldPoint::new(x, y, 2.0), WorldVector::new(0.0, 0.0, -1.0));
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn miss_behind_origin() {
        let ray = Ray::new(
            WorldPoint::new(0.25, 0.25, 2.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn miss_parallel() {
        let ray = Ray::new(
            WorldPoint::new(-1.0, 0.25, 0.0),
            WorldVector::new(1.0, 0.0, 0.0),
        );
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn miss_collinear_triangle() {
        let triangle = Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(1.0, 1.0, 0.0),
            WorldPoint::new(2.0, 2.0, 0.0),
        );
        let ray = Ray::new(
            WorldPoint::new(1.0, 1.0, 1.0),
            WorldVector::new(0.0, 0.0, -1.0),
        );
        assert!(triangle.intersect(&ray).is_none());
    }
}
