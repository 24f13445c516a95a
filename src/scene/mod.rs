pub mod mesh;
pub mod primitives;

use crate::geometry::{HitRecord, Ray};

pub use mesh::Mesh;
pub use primitives::Sphere;

/// Renderable object
pub trait Object: Send + Sync {
    /// Called once by the render loop before the first `intersect`.
    fn begin_render(&mut self) {}

    fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>>;
}

pub struct Scene<O: Object> {
    pub object: O,
}

impl<O: Object> Scene<O> {
    pub fn new(object: O) -> Self {
        Scene { object }
    }

    pub fn begin_render(&mut self) {
        self.object.begin_render();
    }
}
