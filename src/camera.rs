use assert2::assert;
use bon::bon;
use nalgebra::Unit;

use crate::geometry::{EPSILON, FloatType, Ray, ScreenPoint, ScreenSize, WorldPoint, WorldVector};

/// Pinhole camera.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    center: WorldPoint,

    resolution: ScreenSize,

    forward: Unit<WorldVector>,
    up: Unit<WorldVector>,
    right: Unit<WorldVector>,

    /// Distance between pixels on a film one unit in front of the center
    pixel_pitch: FloatType,
}

#[bon]
impl Camera {
    #[builder]
    pub fn new(
        center: WorldPoint,
        forward: WorldVector,
        up: WorldVector,
        resolution: ScreenSize,
        // Degrees
        horizontal_fov: FloatType,
    ) -> Self {
        let forward = Unit::try_new(forward, EPSILON).expect("Forward vector must be non-zero");
        let up = Unit::try_new(up, EPSILON).expect("Up vector must be no-zero");
        let right = Unit::try_new(forward.cross(up.as_ref()), EPSILON)
            .expect("`up` and `forward` must be linearly independent");
        let up = Unit::new_normalize(right.cross(forward.as_ref()));

        assert!(resolution.x > 0);
        assert!(resolution.y > 0);
        assert!(horizontal_fov > 0.0);
        assert!(horizontal_fov < 180.0);

        let film_width = 2.0 * (horizontal_fov / 2.0).to_radians().tan();

        Camera {
            center,
            resolution,
            forward,
            up,
            right,
            pixel_pitch: film_width / resolution.x as FloatType,
        }
    }
}

impl Camera {
    pub fn get_resolution(&self) -> ScreenSize {
        self.resolution
    }

    /// Samples a new ray from the camera through a random point of the given image pixel.
    pub fn sample_ray(&self, point: &ScreenPoint, rng: &mut impl rand::Rng) -> Ray {
        let film_u = point.x as FloatType + rng.random::<FloatType>()
            - self.resolution.x as FloatType / 2.0;
        let film_v = point.y as FloatType + rng.random::<FloatType>()
            - self.resolution.y as FloatType / 2.0;

        let direction = self.forward.as_ref() + self.right.as_ref() * (film_u * self.pixel_pitch)
            - self.up.as_ref() * (film_v * self.pixel_pitch);

        Ray::new(self.center, direction)
    }
}
