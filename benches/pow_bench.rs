//! Benchmarks for the proof-of-work engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::atomic::AtomicU64;

use powgate::{pow_digest, target_for, verify, Solver};

fn bench_digest(c: &mut Criterion) {
    let challenge = [0x42u8; 32];

    c.bench_function("pow_digest", |b| {
        let mut nonce: u32 = 0;
        b.iter(|| {
            nonce = nonce.wrapping_add(1);
            pow_digest(black_box(&challenge), black_box(nonce))
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let challenge = [0x42u8; 32];
    let target = target_for(8);

    c.bench_function("verify", |b| {
        b.iter(|| verify(black_box(&challenge), black_box(12345), black_box(&target)))
    });
}

fn bench_solve_difficulty_8(c: &mut Criterion) {
    let challenge = [0x42u8; 32];
    let target = target_for(8);
    let solver = Solver::new(4);

    c.bench_function("solve_difficulty_8", |b| {
        b.iter(|| {
            let attempts = AtomicU64::new(0);
            solver
                .solve(black_box(&challenge), black_box(&target), &attempts)
                .expect("difficulty 8 must solve")
        })
    });
}

criterion_group!(benches, bench_digest, bench_verify, bench_solve_difficulty_8);
criterion_main!(benches);
