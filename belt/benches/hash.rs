//! belt-hash and belt-block benchmarks

use belt::{BeltBlock, BeltHash, BeltWbl};
use criterion::{
    BenchmarkGroup, Criterion, Throughput, criterion_group, criterion_main,
    measurement::Measurement,
};
use hex_literal::hex;

const KEY: [u8; 32] = hex!("E9DEE72C8F0C0FA62DDB49F46F73964706075316ED247A3739CBA38303A98BF6");

fn bench_block_encrypt<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let cipher = BeltBlock::new(&KEY);
    let mut block = [0u8; 16];
    group.throughput(Throughput::Bytes(16));
    group.bench_function("block encrypt", |b| {
        b.iter(|| cipher.encrypt_block(&mut block))
    });
}

fn bench_wbl_encrypt<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let mut buf = [0u8; 64];
    group.throughput(Throughput::Bytes(64));
    group.bench_function("wbl encrypt 64", |b| {
        b.iter(|| BeltWbl::new(&KEY).encrypt(&mut buf))
    });
}

fn bench_hash_update<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>, size: usize) {
    let data = vec![0x5Au8; size];
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function(format!("hash {size}"), |b| {
        b.iter(|| {
            let mut hasher = BeltHash::new();
            hasher.update(&data);
            hasher.finalize()
        })
    });
}

fn bench_cipher(c: &mut Criterion) {
    let mut group = c.benchmark_group("cipher operations");
    bench_block_encrypt(&mut group);
    bench_wbl_encrypt(&mut group);
    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash operations");
    bench_hash_update(&mut group, 64);
    bench_hash_update(&mut group, 1024);
    bench_hash_update(&mut group, 16384);
    group.finish();
}

criterion_group!(benches, bench_cipher, bench_hash);
criterion_main!(benches);
