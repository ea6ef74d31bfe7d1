//! Benchmarks for the transformation engine.
//!
//! Run with: cargo bench -p webpify-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, RgbImage};
use std::path::Path;
use webpify_core::transform::codec;
use webpify_core::{Image, ImageFormat, OptionPipeline, TargetFormat, TransformEngine};

fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
    let pixels = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }));
    codec::encode(&pixels, &ImageFormat::Jpeg, 90, Path::new("bench.jpg"))
        .expect("encode bench fixture")
}

fn benchmark_resize(c: &mut Criterion) {
    let engine = TransformEngine::default();
    let image = Image::new(Path::new("bench.jpg"), sample_jpeg(1920, 1080));

    c.bench_function("resize_1080p_to_480p", |b| {
        b.iter(|| engine.resize(black_box(&image), 854, 480))
    });
}

fn benchmark_reformat_webp(c: &mut Criterion) {
    let engine = TransformEngine::default();
    let image = Image::new(Path::new("bench.jpg"), sample_jpeg(1280, 720));

    c.bench_function("reformat_720p_webp", |b| {
        b.iter(|| engine.reformat_webp(black_box(&image)))
    });
}

fn benchmark_full_options(c: &mut Criterion) {
    let engine = TransformEngine::default();
    let bytes = sample_jpeg(1920, 1080);
    let options = OptionPipeline::new()
        .resize(640, 0)
        .reformat(TargetFormat::WebP);

    c.bench_function("construct_resize_webp", |b| {
        b.iter(|| {
            Image::construct(
                Path::new("bench.jpg"),
                black_box(bytes.clone()),
                &options,
                &engine,
            )
        })
    });
}

criterion_group!(
    benches,
    benchmark_resize,
    benchmark_reformat_webp,
    benchmark_full_options
);
criterion_main!(benches);
