use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use highlight_overlay::core::{rasterize, render, IndexedCanvas, PngDataUriEncoder};
use highlight_overlay::{OverlayConfig, Rect, Rgba};

/// Deterministic spread of targets across the viewport
fn scatter_targets(count: usize, width: u32, height: u32) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let seed = i as f64;
            let left = (seed * 137.508) % width as f64;
            let top = (seed * 61.803) % height as f64;
            let w = 20.0 + (seed * 7.0) % 120.0;
            let h = 10.0 + (seed * 3.0) % 60.0;
            Rect::new(left, top, w, h)
        })
        .collect()
}

/// Benchmark: Single large disk
fn bench_fill_disk(c: &mut Criterion) {
    let mut canvas = IndexedCanvas::new(1920, 1080, Rgba::new(0, 0, 0, 155));
    let fill = canvas.color(Rgba::new(0, 0, 0, 10)).unwrap_or(0);

    c.bench_function("fill_disk_r400", |b| {
        b.iter(|| canvas.fill_disk(black_box(960), black_box(540), black_box(400.0), fill))
    });
}

/// Benchmark: Rasterize only, varying target count
fn bench_rasterize_targets(c: &mut Criterion) {
    let config = OverlayConfig::default();
    let mut group = c.benchmark_group("rasterize");

    for count in [1, 10, 100].iter() {
        let targets = scatter_targets(*count, 1280, 720);
        group.bench_with_input(BenchmarkId::new("targets", count), count, |b, _| {
            b.iter(|| black_box(rasterize(black_box(&targets), 1280, 720, &config)))
        });
    }

    group.finish();
}

/// Benchmark: Full render (rasterize + PNG + base64), varying viewport size
fn bench_render_viewport(c: &mut Criterion) {
    let config = OverlayConfig::default();
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    for (width, height) in [(640u32, 480u32), (1280, 720), (1920, 1080)].iter() {
        let targets = scatter_targets(5, *width, *height);
        let label = format!("{width}x{height}");
        group.bench_with_input(BenchmarkId::new("viewport", &label), &label, |b, _| {
            b.iter(|| black_box(render(&targets, *width, *height, &config, &PngDataUriEncoder)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fill_disk,
    bench_rasterize_targets,
    bench_render_viewport,
);

criterion_main!(benches);
