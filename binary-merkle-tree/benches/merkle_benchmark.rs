#[macro_use]
extern crate criterion;

use binary_merkle_tree::{Digest, MerkleTree, leaf_hash, verify};
use criterion::{BenchmarkId, Criterion};

fn leaves(count: u32) -> Vec<Digest> {
    (0..count).map(|i| leaf_hash(&i.to_le_bytes())).collect()
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("Merkle tree build");
        let inputs = [1_000u32, 10_000, 100_000];
        for input in inputs.iter() {
            let data = leaves(*input);
            group.bench_with_input(BenchmarkId::new("leaves", input), &data, |b, data| {
                b.iter(|| MerkleTree::new(data.as_slice()).expect("build"));
            });
        }
    }

    c.bench_function("Merkle gen proof", |b| {
        let tree = MerkleTree::new(leaves(100_000)).expect("build");
        let mut index = 0usize;
        b.iter(|| {
            index = (index + 7919) % tree.leaf_count();
            tree.proof(index).expect("proof")
        });
    });

    c.bench_function("Merkle verify", |b| {
        let count = 100_000u32;
        let tree = MerkleTree::new(leaves(count)).expect("build");
        let root = tree.root();
        let proofs: Vec<_> = (0..1_000u32)
            .map(|i| {
                let index = (i * 97) % count;
                let proof = tree.proof(index as usize).expect("proof");
                (index.to_le_bytes(), proof)
            })
            .collect();
        let mut next = 0usize;
        b.iter(|| {
            let (raw, proof) = &proofs[next % proofs.len()];
            next += 1;
            assert!(verify(raw, proof, &root));
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench
);
criterion_main!(benches);
