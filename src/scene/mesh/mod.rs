//! Triangle mesh loaded from an OBJ file.
//!
//! Attribute arrays (positions, normals, texture coordinates) use the same 1-based indices
//! as the file format: raw index 0 of every array holds a zero sentinel entry. For normals and
//! texture coordinates, index 0 means the face corner has no such attribute.
//! A position index that failed to parse reads as 0 and refers to the sentinel vertex at the
//! origin, the same as any other vertex.

mod bounding;
mod intersection;
mod loading;

use std::sync::OnceLock;

use index_vec::IndexVec;

use crate::geometry::{TexturePoint, Triangle, WorldPoint, WorldVector};

use super::Sphere;

pub use loading::ObjLoadError;

/// Raw index reserved in every attribute array for the sentinel entry.
const SENTINEL: usize = 0;

index_vec::define_index_type! {
    pub struct PositionIdx = usize;
}

index_vec::define_index_type! {
    pub struct NormalIdx = usize;
}

index_vec::define_index_type! {
    pub struct TextureIdx = usize;
}

index_vec::define_index_type! {
    pub struct TriangleIdx = usize;
}

/// A single triangle of the mesh, with geometry derived when the mesh was loaded.
#[derive(Clone, Debug)]
pub struct MeshTriangle {
    pub positions: Triangle<PositionIdx>,
    pub normals: Triangle<NormalIdx>,
    pub texture_coords: Triangle<TextureIdx>,

    /// Unit normal from the edge cross product, zero for degenerate triangles
    pub face_normal: WorldVector,
    /// Unit direction along which texture u grows, zero if texture edges are degenerate
    pub dndx: WorldVector,
    /// Unit direction along which texture v grows, zero if texture edges are degenerate
    pub dndy: WorldVector,
}

impl MeshTriangle {
    /// True if any corner of the triangle uses the sentinel vertex.
    pub fn uses_sentinel_position(&self) -> bool {
        self.positions.iter().any(|i| i.index() == SENTINEL)
    }

    /// True if any corner of the triangle lacks a vertex normal.
    pub fn has_missing_normals(&self) -> bool {
        self.normals.iter().any(|i| i.index() == SENTINEL)
    }
}

#[derive(Debug)]
pub struct Mesh {
    positions: IndexVec<PositionIdx, WorldPoint>,
    normals: IndexVec<NormalIdx, WorldVector>,
    texture_coords: IndexVec<TextureIdx, TexturePoint>,
    triangles: IndexVec<TriangleIdx, MeshTriangle>,

    /// Flat shading with face normals instead of interpolated vertex normals
    faceted: bool,

    bounding_sphere: OnceLock<Sphere>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new(faceted: bool) -> Mesh {
        Mesh {
            positions: IndexVec::from_vec(vec![WorldPoint::origin()]),
            normals: IndexVec::from_vec(vec![WorldVector::zeros()]),
            texture_coords: IndexVec::from_vec(vec![TexturePoint::origin()]),
            triangles: IndexVec::new(),
            faceted,
            bounding_sphere: OnceLock::new(),
        }
    }

    pub fn is_faceted(&self) -> bool {
        self.faceted
    }

    pub fn set_faceted(&mut self, faceted: bool) {
        self.faceted = faceted;
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &IndexVec<TriangleIdx, MeshTriangle> {
        &self.triangles
    }

    /// All positions, including the sentinel at raw index 0.
    pub fn positions(&self) -> &IndexVec<PositionIdx, WorldPoint> {
        &self.positions
    }

    pub fn normals(&self) -> &IndexVec<NormalIdx, WorldVector> {
        &self.normals
    }

    pub fn texture_coords(&self) -> &IndexVec<TextureIdx, TexturePoint> {
        &self.texture_coords
    }

    /// Positions read from the file, without the sentinel.
    pub fn loaded_positions(&self) -> &[WorldPoint] {
        &self.positions.raw[SENTINEL + 1..]
    }

    /// Corner positions of a triangle of this mesh.
    pub fn triangle_positions(&self, triangle: &MeshTriangle) -> Triangle<WorldPoint> {
        triangle.positions.map(|i| self.positions[*i])
    }

    /// Bounding sphere of the mesh.
    /// Computed on first use if `begin_render` was not called before.
    pub fn bounding_sphere(&self) -> &Sphere {
        self.bounding_sphere.get_or_init(|| self.compute_bounding_sphere())
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Mesh::new(false)
    }
}
