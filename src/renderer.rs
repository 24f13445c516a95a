use std::{
    num::NonZeroU32,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use image::RgbaImage;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    camera::Camera,
    geometry::ScreenPoint,
    scene::{Object, Scene},
    util::{Rgba, color_to_image},
};

#[derive(Copy, Clone, Debug)]
pub struct RenderSettings {
    pub sample_count: NonZeroU32,
}

#[derive(Copy, Clone, Debug)]
pub struct RenderProgress {
    /// Number of finished image rows
    pub finished: usize,
    pub total: usize,
}

/// Renders the scene with one worker thread per CPU.
///
/// The scene must be ready for rendering (`Scene::begin_render` called), workers only
/// ever query it. `progress_callback` is called from the workers after each finished row.
pub fn render<O: Object, F: Fn(RenderProgress) + Sync>(
    scene: &Scene<O>,
    camera: &Camera,
    settings: &RenderSettings,
    progress_callback: F,
) -> anyhow::Result<RgbaImage> {
    let resolution = camera.get_resolution();
    let total = resolution.y as usize;

    let image = Mutex::new(RgbaImage::new(resolution.x, resolution.y));
    let next_row = AtomicUsize::new(0);
    let finished_rows = AtomicUsize::new(0);

    thread::scope(|s| -> anyhow::Result<()> {
        for worker_id in 0..num_cpus::get() {
            let image = &image;
            let next_row = &next_row;
            let finished_rows = &finished_rows;
            let progress_callback = &progress_callback;

            thread::Builder::new()
                .name(format!("worker{worker_id}"))
                .spawn_scoped(s, move || {
                    let mut rng = SmallRng::from_os_rng();
                    let mut row = Vec::with_capacity(resolution.x as usize);

                    loop {
                        let y = next_row.fetch_add(1, Ordering::AcqRel);
                        if y >= total {
                            break;
                        }

                        row.clear();
                        row.extend((0..resolution.x).map(|x| {
                            let point = ScreenPoint::new(x, y as u32);
                            render_pixel(scene, camera, settings, &point, &mut rng)
                        }));

                        let mut image = image.lock().expect("Poisoned lock!");
                        for (x, pixel) in row.iter().enumerate() {
                            image.put_pixel(x as u32, y as u32, color_to_image(*pixel));
                        }
                        drop(image);

                        let finished = finished_rows.fetch_add(1, Ordering::AcqRel) + 1;
                        progress_callback(RenderProgress { finished, total });
                    }
                })?;
        }
        Ok(())
    })?;

    Ok(image.into_inner().expect("Poisoned lock!"))
}

fn render_pixel<O: Object>(
    scene: &Scene<O>,
    camera: &Camera,
    settings: &RenderSettings,
    point: &ScreenPoint,
    rng: &mut SmallRng,
) -> Rgba {
    let mut pixel_sum = Rgba::new(0.0, 0.0, 0.0, 0.0);
    for _i in 0..settings.sample_count.get() {
        pixel_sum += render_sample(scene, camera, point, rng);
    }
    pixel_sum * (1.0 / settings.sample_count.get() as f32)
}

fn render_sample<O: Object>(
    scene: &Scene<O>,
    camera: &Camera,
    point: &ScreenPoint,
    rng: &mut SmallRng,
) -> Rgba {
    let ray = camera.sample_ray(point, rng);

    if let Some(intersection) = scene.object.intersect(&ray) {
        let dot = ray.direction.dot(&intersection.normal).abs() as f32;
        Rgba::new(dot, dot, dot, 1.0)
    } else {
        Rgba::new(0.0, 0.0, 0.0, 0.0)
    }
}
