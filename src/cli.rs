use std::{num::NonZeroU32, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use indicatif::ProgressBar;
use minimesh::{
    Camera, Mesh, RenderSettings, Scene,
    geometry::{FloatType, ScreenSize, WorldVector},
    render,
};

/// Renders an OBJ model with simple grey shading.
#[derive(Parser, Debug)]
#[command(name = "minimesh-cli", version, about, long_about = None)]
struct Args {
    /// OBJ model to render
    model: PathBuf,

    /// Output image, format is chosen by the extension
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    #[arg(long, default_value = "800")]
    width: NonZeroU32,

    #[arg(long, default_value = "600")]
    height: NonZeroU32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 40.0)]
    fov: FloatType,

    /// Samples per pixel
    #[arg(short, long, default_value = "4")]
    samples: NonZeroU32,

    /// Use face normals instead of interpolated vertex normals
    #[arg(long)]
    faceted: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mesh = Mesh::with_obj(&args.model, args.faceted)
        .with_context(|| format!("Failed to load {}", args.model.display()))?;
    let mut scene = Scene::new(mesh);
    scene.begin_render();

    // Frame the whole bounding sphere, looking along -Z
    let bounds = *scene.object.bounding_sphere();
    let half_fov = (args.fov / 2.0).to_radians();
    let distance = bounds.radius.max(1e-3) / half_fov.sin() * 1.1;
    let camera = Camera::builder()
        .center(bounds.center + WorldVector::z() * distance)
        .forward(-WorldVector::z())
        .up(WorldVector::y())
        .resolution(ScreenSize::new(args.width.get(), args.height.get()))
        .horizontal_fov(args.fov)
        .build();

    let settings = RenderSettings {
        sample_count: args.samples,
    };

    let bar = ProgressBar::new(args.height.get() as u64);
    let image = render(&scene, &camera, &settings, |progress| {
        bar.set_position(progress.finished as u64)
    })?;
    bar.finish();

    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
