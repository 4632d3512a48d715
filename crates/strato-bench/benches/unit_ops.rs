//! Criterion micro-benchmarks for the unit algebra and constants registry.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strato_units::{constants, gas_mol_weight, K, KG, M, S};

/// Benchmark: compose a density-flux unit from base units, 1000 times.
fn bench_unit_algebra(c: &mut Criterion) {
    c.bench_function("unit_algebra_compose_1k", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                let flux = black_box(KG) / black_box(M).pow(2) / black_box(S);
                let combined = flux * black_box(K) / (black_box(M) / black_box(S).pow(2));
                black_box(combined);
            }
        });
    });
}

/// Benchmark: exact unit equality over a mixed set of pairs.
fn bench_unit_equality(c: &mut Criterion) {
    let units = [
        KG / M.pow(3),
        M / S.pow(2),
        K,
        KG * M.pow(2) / S.pow(2),
        KG / M.pow(3),
    ];
    c.bench_function("unit_equality_pairs", |b| {
        b.iter(|| {
            let mut equal = 0u32;
            for x in &units {
                for y in &units {
                    if black_box(*x) == black_box(*y) {
                        equal += 1;
                    }
                }
            }
            black_box(equal)
        });
    });
}

/// Benchmark: constants-registry access plus derived-constant arithmetic.
fn bench_constants_access(c: &mut Criterion) {
    c.bench_function("constants_access", |b| {
        b.iter(|| {
            let pc = constants();
            let buoyancy = pc.rho_h2o * pc.gravit;
            black_box(buoyancy.value);
            black_box(pc.inv_rho_h2o.unit);
        });
    });
}

/// Benchmark: gas molecular-weight lookup, hit and miss.
fn bench_gas_lookup(c: &mut Criterion) {
    c.bench_function("gas_mol_weight_lookup", |b| {
        b.iter(|| {
            black_box(gas_mol_weight(black_box("co2")));
            black_box(gas_mol_weight(black_box("CH4")));
            black_box(gas_mol_weight(black_box("xenon")));
        });
    });
}

criterion_group!(
    benches,
    bench_unit_algebra,
    bench_unit_equality,
    bench_constants_access,
    bench_gas_lookup
);
criterion_main!(benches);
