use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use motion_core::{ChannelCfg, ChannelWeights, FillPolicy, dissimilarity, normalize};
use motion_traits::Frame;

const CHANNELS: [&str; 6] = ["acc_x", "acc_y", "acc_z", "gyro_x", "gyro_y", "gyro_z"];

fn recording(frames: usize, phase: f64) -> Vec<Frame> {
    (0..frames)
        .map(|i| {
            let t = i as f64 * 0.05 + phase;
            CHANNELS
                .iter()
                .enumerate()
                .map(|(c, ch)| ((*ch).to_string(), (t * (c + 1) as f64).sin()))
                .collect()
        })
        .collect()
}

fn bench_align_score(c: &mut Criterion) {
    let cfg = ChannelCfg::new(CHANNELS, FillPolicy::Reject);
    let weights = ChannelWeights::uniform(CHANNELS.len());
    let mut group = c.benchmark_group("align_score");
    for &(m, n) in &[(100usize, 100usize), (200, 500), (1000, 3000)] {
        let a = normalize(&recording(m, 0.0), &cfg).unwrap();
        let b = normalize(&recording(n, 0.3), &cfg).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format!("{m}x{n}")), &(a, b), |bch, (a, b)| {
            bch.iter(|| dissimilarity(black_box(a), black_box(b), &weights).unwrap());
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let cfg = ChannelCfg::new(CHANNELS, FillPolicy::CarryForward);
    let frames = recording(2000, 0.0);
    c.bench_function("normalize_2000", |b| {
        b.iter(|| normalize(black_box(&frames), &cfg).unwrap());
    });
}

criterion_group!(benches, bench_align_score, bench_normalize);
criterion_main!(benches);
