use crate::geometry::{FloatType, WorldPoint, WorldVector};
use crate::scene::Sphere;

use super::{Mesh, MeshTriangle};

/// Relative padding of the bounding sphere radius.
const RADIUS_PADDING: FloatType = 1e-9;

impl Mesh {
    /// Sphere around the centroid of the loaded vertices, with radius reaching the farthest one.
    /// Not minimal, but contains every triangle of the mesh.
    ///
    /// The sentinel vertex only takes part if some triangle uses it.
    pub fn compute_bounding_sphere(&self) -> Sphere {
        let positions = if self.triangles.iter().any(MeshTriangle::uses_sentinel_position) {
            &self.positions.raw[..]
        } else {
            self.loaded_positions()
        };
        if positions.is_empty() {
            return Sphere::new(WorldPoint::origin(), 0.0);
        }

        let center = WorldPoint::from(
            positions.iter().map(|p| p.coords).sum::<WorldVector>()
                / positions.len() as FloatType,
        );
        let radius = positions
            .iter()
            .map(|p| (p - center).norm())
            .fold(0.0, FloatType::max);

        Sphere::new(center, radius * (1.0 + RADIUS_PADDING))
    }
}

#[cfg(test)]
mod test {
    use crate::geometry::test::WorldPointWrapper;
    use crate::scene::Object as _;
    use crate::scene::mesh::test::{UNIT_SQUARE, mesh_from_obj};

    use super::*;

    use assert2::assert;
    use proptest::{arbitrary::any, collection::vec};
    use test_strategy::proptest;

    #[test]
    fn unit_square() {
        let mesh = mesh_from_obj(UNIT_SQUARE, false);
        let sphere = mesh.compute_bounding_sphere();
        assert!((sphere.center - WorldPoint::new(0.5, 0.5, 0.0)).norm() < 1e-12);
        assert!((sphere.radius - FloatType::sqrt(0.5)).abs() < 1e-6);
    }

    #[test]
    fn empty_mesh() {
        let sphere = Mesh::default().compute_bounding_sphere();
        assert!(sphere.center == WorldPoint::origin());
        assert!(sphere.radius == 0.0);
    }

    #[test]
    fn sentinel_is_ignored() {
        let mesh = mesh_from_obj("v 10 10 10\nv 12 10 10\n", false);
        let sphere = mesh.compute_bounding_sphere();
        assert!((sphere.center - WorldPoint::new(11.0, 10.0, 10.0)).norm() < 1e-12);
        assert!((sphere.radius - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sentinel_is_included_when_used() {
        let mesh = mesh_from_obj("v 10 0 0\nv 12 0 0\nv 10 2 0\nf x 2 3\n", false);
        let sphere = mesh.compute_bounding_sphere();
        assert!(sphere.contains(&WorldPoint::origin()));
        for p in mesh.loaded_positions() {
            assert!(sphere.contains(p));
        }
    }

    #[test]
    fn begin_render_stores_bound() {
        let mut mesh = mesh_from_obj(UNIT_SQUARE, false);
        mesh.begin_render();
        assert!(*mesh.bounding_sphere() == mesh.compute_bounding_sphere());
        mesh.begin_render();
        assert!(*mesh.bounding_sphere() == mesh.compute_bounding_sphere());
    }

    #[test]
    fn reload_resets_bound() {
        let mut mesh = mesh_from_obj(UNIT_SQUARE, false);
        mesh.begin_render();
        mesh.read_obj("v 5 5 5\nv 7 5 5\nv 5 7 5\nf 1 2 3\n".as_bytes()).unwrap();
        assert!(mesh.bounding_sphere().center.x > 5.0);
    }

    #[proptest]
    fn contains_all_vertices(
        #[strategy(vec(any::<WorldPointWrapper>(), 1..50))] points: Vec<WorldPointWrapper>,
    ) {
        let source: String = points
            .iter()
            .map(|p| format!("v {} {} {}\n", p.x, p.y, p.z))
            .collect();
        let mesh = mesh_from_obj(&source, false);
        let sphere = mesh.compute_bounding_sphere();

        for p in mesh.loaded_positions() {
            assert!(sphere.contains(p));
        }
    }
}
