use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fieldsweep_core::*;

const TIERS: [(&str, Coord2, CellCount); 4] = [
    ("beginner", (9, 9), 10),
    ("intermediate", (16, 16), 40),
    ("expert", (30, 16), 99),
    ("crowded", (50, 50), 2400),
];

fn gen_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, mines) in TIERS {
        let config = GameConfig::new_unchecked(size, mines);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomMinefieldGenerator::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, gen_tiers);
criterion_main!(benches);
