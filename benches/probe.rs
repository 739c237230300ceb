use std::hint::black_box;

use chroma_probe_rs::probe_pipeline::{
    CancellationToken, LineProbe, MemoryFrames, NativeCoord, NoProgress, PointProbe, Rgb, RgbRaster, profile,
    sample_line,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn generate_raster(width: u32, height: u32) -> RgbRaster {
    RgbRaster::from_fn(width, height, |x, y| {
        Rgb::new((x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8)
    })
}

fn benchmark_line_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_line");
    let raster = generate_raster(2000, 2000);

    for length in [100u32, 1000, 1999] {
        let probe = LineProbe::new(NativeCoord::new(0, 0), NativeCoord::new(length, length / 2));
        group.bench_with_input(BenchmarkId::from_parameter(length), &probe, |b, probe| {
            b.iter(|| sample_line(black_box(&raster), black_box(probe)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_profile_regions(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");
    let frames: Vec<RgbRaster> = (0..120).map(|_| generate_raster(320, 240)).collect();

    for region in [1u32, 5, 21] {
        let probe = PointProbe::new(NativeCoord::new(160, 120), region).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(region), &probe, |b, probe| {
            b.iter(|| {
                let mut seq = MemoryFrames::new(frames.clone()).unwrap();
                profile(&mut seq, black_box(probe), &mut NoProgress, &CancellationToken::new()).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_line_lengths, benchmark_profile_regions);
criterion_main!(benches);
