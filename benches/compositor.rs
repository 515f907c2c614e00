//! Surface/compositor ANSI run-length emission benchmarks.

#![allow(missing_docs)]

use cellstage::color::{Color, ColorPair};
use cellstage::geometry::{Extent, Offset};
use cellstage::pixel::Pixel;
use cellstage::surface::Surface;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// A window filled with a single uninterrupted color run — the best case
/// for run-length ANSI emission (one SGR pair for the whole frame).
fn benchmark_refresh_uniform(c: &mut Criterion) {
    c.bench_function("refresh_80x24_uniform", |b| {
        b.iter(|| {
            let mut surf = Surface::new(Extent::new(80, 24));
            surf.image_mut().fill_rect(
                cellstage::geometry::Rect::new(0, 0, 80, 24),
                b'.',
                ColorPair::pack(Color::White, Color::Black),
            ).unwrap();
            surf.refresh();
            black_box(surf.rendered_text().len())
        })
    });
}

/// A window where every pixel alternates fg color, the worst case: one
/// SGR pair emitted per cell.
fn benchmark_refresh_checkerboard(c: &mut Criterion) {
    c.bench_function("refresh_80x24_checkerboard", |b| {
        b.iter(|| {
            let mut surf = Surface::new(Extent::new(80, 24));
            for y in 0i32..24 {
                for x in 0i32..80 {
                    let color = if (x + y) % 2 == 0 { Color::White } else { Color::Red };
                    surf.image_mut()
                        .set(Offset::new(x, y), Pixel { char: b'#', color: ColorPair::pack(color, Color::Black) })
                        .unwrap();
                }
            }
            surf.refresh();
            black_box(surf.rendered_text().len())
        })
    });
}

criterion_group!(benches, benchmark_refresh_uniform, benchmark_refresh_checkerboard);
criterion_main!(benches);
