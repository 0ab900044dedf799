use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use perceptual::{fingerprint_tokens, winnow, PerceptualConfig};

const VOCAB: [&str; 12] = [
    "int", "VAR", "=", "0", ";", "while", "(", "<", ")", "{", "}", "FUNC",
];

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");

    for size in [100, 1_000, 10_000].iter() {
        let tokens: Vec<&str> = (0..*size)
            .map(|i| VOCAB[(i * 7 + i / 5) % VOCAB.len()])
            .collect();
        group.throughput(Throughput::Elements(*size as u64));
        for w in [4, 16] {
            let config = PerceptualConfig::default().with_w(w);
            group.bench_function(format!("tokens_{size}_w{w}"), |b| {
                b.iter(|| {
                    fingerprint_tokens(black_box(tokens.as_slice()), black_box(&config))
                        .expect("fingerprint")
                })
            });
        }
    }

    group.finish();
}

fn bench_winnow(c: &mut Criterion) {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let hashes: Vec<u64> = (0..50_000)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            state >> 32
        })
        .collect();

    let mut group = c.benchmark_group("winnow");
    group.throughput(Throughput::Elements(hashes.len() as u64));
    for w in [4, 25, 100] {
        group.bench_function(format!("w{w}"), |b| {
            b.iter(|| winnow(black_box(&hashes), black_box(w)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fingerprint, bench_winnow);
criterion_main!(benches);
