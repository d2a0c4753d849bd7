use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use catamount_pow::{check_proof_of_work, next_required_target, AlgorithmId, MemoryChain};
use catamount_types::{BlockHash, CompactTarget, ConsensusParams};

const BITS: CompactTarget = CompactTarget::new(0x1c00_ffff);

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy");
    let params = ConsensusParams::main();
    // Deep enough for the KGW maximum walk (1008 blocks).
    let chain = MemoryChain::with_constant_spacing(2_000, 1_000_000, 650, BITS);
    let tip = chain.tip().unwrap();
    let candidate = tip.time + 650;

    for algorithm in [
        AlgorithmId::IntervalV2,
        AlgorithmId::Pid,
        AlgorithmId::PidMultiWindow,
        AlgorithmId::DayNight,
        AlgorithmId::Kgw,
        AlgorithmId::Dgw,
        AlgorithmId::Agw,
        AlgorithmId::Lwma,
        AlgorithmId::Peercoin,
        AlgorithmId::EnsembleB,
    ] {
        group.bench_with_input(
            BenchmarkId::new("compute", format!("{algorithm:?}")),
            &algorithm,
            |b, &algorithm| {
                b.iter(|| {
                    black_box(algorithm.compute(
                        black_box(&chain),
                        black_box(&tip),
                        black_box(candidate),
                        black_box(&params),
                    ))
                });
            },
        );
    }

    group.finish();
}

fn bench_next_required_target(c: &mut Criterion) {
    let chain = MemoryChain::with_constant_spacing(2_000, 1_000_000, 650, BITS);
    let tip = chain.tip().unwrap();
    let candidate = tip.time + 650;

    for params in [ConsensusParams::main(), ConsensusParams::testnet5()] {
        c.bench_function(
            &format!("next_required_target_{}", params.network.as_str()),
            |b| {
                b.iter(|| {
                    black_box(next_required_target(
                        black_box(&chain),
                        black_box(&tip),
                        black_box(candidate),
                        black_box(&params),
                    ))
                });
            },
        );
    }
}

fn bench_check_proof_of_work(c: &mut Criterion) {
    let params = ConsensusParams::main();
    let passing = BlockHash::new(BITS.decode_lossy().to_be_bytes());
    let failing = BlockHash::new([0xff; 32]);

    c.bench_function("check_pow_valid", |b| {
        b.iter(|| {
            black_box(check_proof_of_work(
                black_box(&passing),
                black_box(BITS),
                black_box(&params),
            ))
        });
    });

    c.bench_function("check_pow_invalid", |b| {
        b.iter(|| {
            black_box(check_proof_of_work(
                black_box(&failing),
                black_box(BITS),
                black_box(&params),
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_strategies,
    bench_next_required_target,
    bench_check_proof_of_work,
);
criterion_main!(benches);
