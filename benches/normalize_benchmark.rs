use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dataset_prep::{ColorDepth, ContainerFormat, ImageNormalizer, NormalizationConfig};
use image::{DynamicImage, Rgb};

/// Synthesize a gradient test image of the given dimensions
fn test_image(width: u32, height: u32) -> DynamicImage {
    let buffer = image::RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(buffer)
}

fn bench_render_canonical(c: &mut Criterion) {
    let normalizer = ImageNormalizer::new(NormalizationConfig::default());

    let mut group = c.benchmark_group("render_canonical");
    for (name, width, height) in [
        ("small_128x128", 128, 128),
        ("photo_1024x768", 1024, 768),
        ("already_canonical_64x64", 64, 64),
    ] {
        let image = test_image(width, height);
        group.bench_function(name, |b| {
            b.iter(|| normalizer.render_canonical(black_box(&image)));
        });
    }
    group.finish();
}

fn bench_render_luma(c: &mut Criterion) {
    let config = NormalizationConfig::builder()
        .target_width(64)
        .target_height(64)
        .color_depth(ColorDepth::Luma8)
        .container_format(ContainerFormat::Png)
        .build()
        .unwrap();
    let normalizer = ImageNormalizer::new(config);
    let image = test_image(512, 512);

    c.bench_function("render_canonical_luma_512", |b| {
        b.iter(|| normalizer.render_canonical(black_box(&image)));
    });
}

criterion_group!(benches, bench_render_canonical, bench_render_luma);
criterion_main!(benches);
