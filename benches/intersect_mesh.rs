use std::fmt::Write as _;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minimesh::{
    Mesh, Object,
    geometry::{Ray, WorldPoint, WorldVector},
};

/// Wavy height field of `size * size` quads, as OBJ source.
fn height_field_obj(size: usize) -> String {
    let mut source = String::new();
    for y in 0..=size {
        for x in 0..=size {
            let (fx, fy) = (x as f64 / size as f64, y as f64 / size as f64);
            let z = 0.1 * (fx * 12.0).sin() * (fy * 9.0).cos();
            writeln!(source, "v {fx} {fy} {z}").unwrap();
            writeln!(source, "vt {fx} {fy}").unwrap();
        }
    }
    let index = |x: usize, y: usize| y * (size + 1) + x + 1;
    for y in 0..size {
        for x in 0..size {
            let corners = [index(x, y), index(x + 1, y), index(x + 1, y + 1), index(x, y + 1)];
            let [a, b, c, d] = corners.map(|i| format!("{i}/{i}"));
            writeln!(source, "f {a} {b} {c} {d}").unwrap();
        }
    }
    source
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut mesh = Mesh::new(true);
    mesh.read_obj(height_field_obj(32).as_bytes()).unwrap();
    mesh.begin_render();

    let rays: Vec<Ray> = (0..64)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .map(|(x, y)| {
            Ray::new(
                WorldPoint::new(x as f64 / 64.0, y as f64 / 64.0, 2.0),
                WorldVector::new(0.01, -0.02, -1.0),
            )
        })
        .collect();

    c.bench_function("intersect_height_field", |b| {
        b.iter_batched(
            || rays.clone(),
            |rays| {
                rays.iter()
                    .filter(|ray| mesh.intersect(ray).is_some())
                    .count()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = criterion_benchmark
}
criterion_main!(benches);
