use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use emote_packer_core::prelude::*;
use std::hint::black_box;

fn generate_catalog(count: usize) -> Vec<Emote> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let stems = ["pwgood", "peepo", "pepe", "forsen", "feels", "kappa", "omega"];
    (0..count)
        .map(|i| {
            let stem = stems[rng.gen_range(0..stems.len())];
            let w = rng.gen_range(16..=112);
            let h = rng.gen_range(16..=64);
            let glyph = char::from_u32(0xE000 + i as u32).unwrap_or('?');
            Emote::new(format!("{stem}_{i}"), glyph, w, h).expect("non-zero")
        })
        .collect()
}

fn bench_classify_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_encode");
    let cfg = EmoteConfig::default();
    let opts = LayoutOptions::from(&cfg);

    for count in [100, 1_000, 5_000] {
        let catalog = generate_catalog(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("classify", count), &catalog, |b, catalog| {
            b.iter(|| {
                black_box(classify(
                    catalog,
                    &cfg.group_prefixes,
                    cfg.wide_width_to_height,
                ))
            });
        });

        let partition = classify(&catalog, &cfg.group_prefixes, cfg.wide_width_to_height);
        group.bench_with_input(BenchmarkId::new("encode", count), &partition, |b, p| {
            b.iter(|| black_box(encode(p, &opts)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify_encode);
criterion_main!(benches);
