use criterion::{criterion_group, criterion_main, Criterion};
use image::{DynamicImage, GrayImage, Luma};
use std::hint::black_box;
use trifind::image::preprocess::preprocess_frame;
use trifind::{DetectConfig, Detector, TemplateBank};

const BACKGROUND: u8 = 225;
const INK: u8 = 35;

fn draw_triangle(img: &mut GrayImage, left: u32, top: u32, size: u32) {
    for y in 0..size {
        let half = (y + 1) / 2;
        let start = left + size / 2 - half.min(size / 2);
        let end = (left + size / 2 + half).min(left + size);
        for x in start..end {
            img.put_pixel(x, top + y, Luma([INK]));
        }
    }
}

fn make_template(size: u32, margin: u32) -> DynamicImage {
    let side = size + 2 * margin;
    let mut img = GrayImage::from_pixel(side, side, Luma([BACKGROUND]));
    draw_triangle(&mut img, margin, margin, size);
    DynamicImage::ImageLuma8(img)
}

fn make_frame(width: u32, height: u32) -> DynamicImage {
    let mut img = GrayImage::from_fn(width, height, |x, y| {
        Luma([BACKGROUND - (((x * 7) ^ (y * 13)) & 0x0F) as u8])
    });
    draw_triangle(&mut img, 120, 90, 48);
    draw_triangle(&mut img, 400, 260, 48);
    DynamicImage::ImageLuma8(img)
}

fn bench_detector(c: &mut Criterion) {
    let templates = vec![make_template(48, 12), make_template(40, 10), make_template(56, 14)];
    let bank = TemplateBank::build(&templates, 0.5).unwrap();
    let frame = make_frame(640, 480);

    c.bench_function("preprocess_frame_640x480", |b| {
        b.iter(|| black_box(preprocess_frame(&frame, bank.config()).unwrap()));
    });

    let edges = preprocess_frame(&frame, bank.config()).unwrap();
    let sequential = Detector::new(bank.clone());
    c.bench_function("detect_matrix_3_templates", |b| {
        b.iter(|| black_box(sequential.detect_matrix(&edges).unwrap()));
    });

    c.bench_function("detect_image_3_templates", |b| {
        b.iter(|| black_box(sequential.detect(&frame).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let parallel = Detector::new(bank).with_config(DetectConfig {
            parallel: true,
            ..DetectConfig::default()
        });
        c.bench_function("detect_matrix_3_templates_parallel", |b| {
            b.iter(|| black_box(parallel.detect_matrix(&edges).unwrap()));
        });
    }
}

criterion_group!(benches, bench_detector);
criterion_main!(benches);
