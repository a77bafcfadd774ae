// Criterion benchmarks for gridloc-registry
//
// Run benchmarks with:
//   cargo bench -p gridloc-registry
//
// For detailed output with plots:
//   cargo bench -p gridloc-registry -- --save-baseline main

use std::sync::Arc;

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridloc_common::{
    AdapterDescriptor, AdapterProxy, LoadBalancingKind, LoadBalancingSpec, LoadSample,
    ReplicaGroupDescriptor, Result,
};
use gridloc_registry::{AdapterCache, LoadBalancing, ServerHandle};

/// Server stub for benchmarks; registration never calls into it.
struct StubServer;

#[async_trait]
impl ServerHandle for StubServer {
    async fn get_adapter(&self, adapter_id: &str, _up_to_date: bool) -> Result<AdapterProxy> {
        Ok(AdapterProxy::new(adapter_id))
    }

    async fn get_load(&self, _sample: LoadSample) -> Result<f32> {
        Ok(0.0)
    }
}

fn populated_cache(members: usize) -> AdapterCache {
    let cache = AdapterCache::new();
    cache
        .add_replica_group(
            &ReplicaGroupDescriptor::new(
                "Group",
                LoadBalancingSpec::new(LoadBalancingKind::RoundRobin, "0"),
            ),
            "BenchApp",
        )
        .unwrap();
    for i in 0..members {
        let desc = AdapterDescriptor::new(format!("adapter{i}")).with_replica_group("Group");
        cache
            .add_server_adapter(&desc, Arc::new(StubServer), "BenchApp")
            .unwrap();
    }
    cache
}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for member_count in [2, 10, 50].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(member_count),
            member_count,
            |b, &count| {
                b.iter(|| populated_cache(black_box(count)));
            },
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let cache = populated_cache(50);

    group.bench_function("get", |b| {
        b.iter(|| cache.get(black_box("adapter25")).unwrap());
    });

    group.bench_function("get_server_adapter", |b| {
        b.iter(|| cache.get_server_adapter(black_box("adapter25")).unwrap());
    });

    group.bench_function("get_replica_group", |b| {
        b.iter(|| cache.get_replica_group(black_box("Group")).unwrap());
    });

    group.finish();
}

fn bench_membership_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership_churn");

    group.bench_function("add_remove_member", |b| {
        let cache = populated_cache(10);
        let desc = AdapterDescriptor::new("churn").with_replica_group("Group");
        b.iter(|| {
            cache
                .add_server_adapter(&desc, Arc::new(StubServer), "BenchApp")
                .unwrap();
            cache.remove_server_adapter("churn").unwrap();
        });
    });

    group.finish();
}

fn bench_policy_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_parsing");

    let adaptive = LoadBalancingSpec::new(LoadBalancingKind::Adaptive, "3").with_load_sample("15");
    group.bench_function("adaptive", |b| {
        b.iter(|| LoadBalancing::from_spec(black_box(&adaptive)));
    });

    let malformed = LoadBalancingSpec::new(LoadBalancingKind::Random, "not-a-number");
    group.bench_function("malformed_n_replicas", |b| {
        b.iter(|| LoadBalancing::from_spec(black_box(&malformed)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_registration,
    bench_lookup,
    bench_membership_churn,
    bench_policy_parsing,
);
criterion_main!(benches);
