#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for PNG encoding and tight-bbox saving.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plotloop::color::Rgba;
use plotloop::framebuffer::Framebuffer;
use plotloop::output::PngEncoder;

fn gradient(width: u32, height: u32) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height).expect("framebuffer creation should succeed");
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            fb.set_pixel(x, y, Rgba::new(r, g, 128, 255));
        }
    }
    fb
}

fn png_encoder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoder");

    for (width, height) in [(640, 480), (1280, 960), (1920, 1080)] {
        let fb = gradient(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(width, height),
            |b, _| {
                b.iter(|| PngEncoder::to_bytes(black_box(&fb)).expect("encoding should succeed"));
            },
        );
    }

    group.finish();
}

fn tight_crop_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("tight_crop");

    let mut fb = Framebuffer::new(640, 480).expect("framebuffer creation should succeed");
    fb.clear(Rgba::WHITE);
    fb.fill_rect(40, 40, 560, 400, Rgba::cycle(1));

    group.bench_function("content_bounds", |b| {
        b.iter(|| black_box(&fb).content_bounds(Rgba::WHITE));
    });

    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("plot.png");
    group.bench_function("write_tight", |b| {
        b.iter(|| {
            PngEncoder::write_tight(black_box(&fb), &path, Rgba::WHITE, 10)
                .expect("write should succeed")
        });
    });

    group.finish();
}

criterion_group!(benches, png_encoder_benchmark, tight_crop_benchmark);
criterion_main!(benches);
