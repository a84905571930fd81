//! Benchmarks for the cellpix pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cellpix::pipeline::{build_workbook, prepare};
use cellpix::{
    test_card, Constrainer, Dimensions, GridRenderer, MemorySheet, PixelImage, Settings,
    ZoomCalibration,
};

fn gradient(height: u32, width: u32, channels: usize) -> PixelImage {
    let mut data = Vec::with_capacity((height * width) as usize * channels);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8]);
            if channels == 4 {
                data.push(255);
            }
        }
    }
    PixelImage::from_raw(Dimensions::new(height, width), channels, data).unwrap()
}

// -- Constraining benchmarks --

fn bench_constrain(c: &mut Criterion) {
    let mut group = c.benchmark_group("constrain");

    let constrainer = Constrainer::new(Dimensions::new(350, 350)).unwrap();
    let large = gradient(1000, 1500, 3);
    let small = gradient(200, 200, 3);

    group.bench_function("downscale_1000x1500", |b| {
        b.iter(|| constrainer.constrain(black_box(large.clone()), None).unwrap())
    });

    group.bench_function("within_bounds_200x200", |b| {
        b.iter(|| constrainer.constrain(black_box(small.clone()), None).unwrap())
    });

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let renderer = GridRenderer::default();
    let rgb = gradient(350, 350, 3);
    let rgba = gradient(350, 350, 4);

    group.bench_function("grid_rgb_350x350", |b| {
        b.iter(|| {
            let mut sheet = MemorySheet::new();
            renderer.render(black_box(&rgb), &mut sheet).unwrap()
        })
    });

    group.bench_function("grid_rgba_350x350", |b| {
        b.iter(|| {
            let mut sheet = MemorySheet::new();
            renderer.render(black_box(&rgba), &mut sheet).unwrap()
        })
    });

    let zoom = ZoomCalibration::default();
    group.bench_function("zoom", |b| {
        b.iter(|| zoom.zoom_for(black_box(Dimensions::new(175, 350))))
    });

    group.finish();
}

// -- Full pipeline benchmarks --

fn bench_workbook(c: &mut Criterion) {
    let mut group = c.benchmark_group("workbook");
    group.sample_size(10);

    let settings = Settings::default();
    let prepared = prepare(test_card().unwrap(), &settings, None).unwrap();

    group.bench_function("build_test_card", |b| {
        b.iter(|| build_workbook(black_box(&prepared), &settings, "bench").unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_constrain, bench_rendering, bench_workbook);
criterion_main!(benches);
