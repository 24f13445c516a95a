use std::sync::OnceLock;

use crate::geometry::{
    BarycentricCoordinates, FloatType, HitRecord, Ray, TexturePoint, normalize_or_zero,
};
use crate::scene::Object;

use super::{Mesh, MeshTriangle};

impl Object for Mesh {
    fn begin_render(&mut self) {
        self.bounding_sphere = OnceLock::from(self.compute_bounding_sphere());
    }

    /// Finds the nearest triangle hit by the ray.
    /// Rays that miss the bounding sphere are rejected without testing any triangle,
    /// otherwise all triangles are tested in order. On equal distances the earlier
    /// triangle wins.
    fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.bounding_sphere().intersect_distance(ray)?;

        let mut best_t = FloatType::INFINITY;
        let mut best = None;

        for triangle in self.triangles.iter() {
            if let Some((t, uv)) = self.triangle_hit(ray, triangle) {
                if t < best_t {
                    best_t = t;
                    best = Some((triangle, uv));
                }
            }
        }

        let (triangle, uv) = best?;
        Some(self.hit_record(ray, triangle, best_t, uv))
    }
}

impl Mesh {
    /// Intersects the ray with a single triangle of this mesh.
    /// Triangles facing away from the ray are never hit.
    pub fn intersect_triangle(
        &self,
        ray: &Ray,
        triangle: &MeshTriangle,
    ) -> Option<HitRecord<'_>> {
        let (t, uv) = self.triangle_hit(ray, triangle)?;
        Some(self.hit_record(ray, triangle, t, uv))
    }

    fn triangle_hit(
        &self,
        ray: &Ray,
        triangle: &MeshTriangle,
    ) -> Option<(FloatType, BarycentricCoordinates<FloatType>)> {
        // Rays exactly parallel to the face plane are not culled here
        if ray.direction.dot(&triangle.face_normal) > 0.0 {
            return None;
        }

        self.triangle_positions(triangle).intersect(ray)
    }

    fn hit_record(
        &self,
        ray: &Ray,
        triangle: &MeshTriangle,
        t: FloatType,
        uv: BarycentricCoordinates<FloatType>,
    ) -> HitRecord<'_> {
        let normal = if self.faceted || triangle.has_missing_normals() {
            triangle.face_normal
        } else {
            let normals = triangle.normals.map(|i| self.normals[*i]);
            normalize_or_zero(uv.interpolate_triangle(&normals))
        };

        let texture_coords = triangle
            .texture_coords
            .map(|i| self.texture_coords[*i].coords);

        HitRecord {
            t,
            point: ray.point_at(t),
            normal,
            texture_coords: TexturePoint::from(uv.interpolate_triangle(&texture_coords)),
            dndx: triangle.dndx,
            dndy: triangle.dndy,
            object: self,
        }
    }
}
