//! # Authz Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | Base string | encode + sort parameters |
//! | Verify | parse params, one lookup, one HMAC-SHA1 |
//! | Authorize | one lookup, up to three candidate checks |

use std::sync::Arc;
use std::time::Duration;

use authz_01_signature_verification::domain::signing::{base_string, normalize_url};
use authz_01_signature_verification::{
    OAuthSigner, SignatureVerificationApi, SignatureVerificationService, SignedRequest,
};
use authz_02_policy_matching::{PolicyMatchingApi, PolicyMatchingService};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use node_runtime::adapters::InMemoryDirectory;
use shared_types::{Action, ActionSet, Consumer, Policy, ResourceId};

fn directory_with(consumers: usize, policies_each: usize) -> Arc<InMemoryDirectory> {
    let directory = Arc::new(InMemoryDirectory::new());
    for c in 0..consumers {
        let key = format!("consumer-{c}");
        directory
            .insert_consumer(Consumer::new(key.clone(), format!("secret-{c}"), "Bench"))
            .unwrap();
        for p in 0..policies_each {
            directory
                .upsert_policy(Policy::new(
                    key.clone(),
                    ResourceId::new("pbs:api", format!("kind-{p}"), "*"),
                    ActionSet::new([Action::Get, Action::Put]).unwrap(),
                ))
                .unwrap();
        }
    }
    directory
}

fn bench_base_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("authz-01-base-string");

    for count in [5usize, 20, 100] {
        let params: Vec<(String, String)> = (0..count)
            .map(|i| (format!("param_{i}"), format!("value with spaces & symbols {i}")))
            .collect();
        let url = normalize_url("https://API.example.com:443/v1/resource").unwrap();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("params", count), &params, |b, params| {
            b.iter(|| black_box(base_string("post", &url, params)))
        });
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("authz-01-verify");
    group.measurement_time(Duration::from_secs(5));

    let directory = directory_with(1_000, 0);
    let verifier = SignatureVerificationService::new(directory);
    let signed = OAuthSigner::new("consumer-500", "secret-500")
        .sign(
            SignedRequest::new("GET", "https://api.example.com/v1/shows?page=3&limit=50"),
            "bench-nonce",
            1_700_000_000,
        )
        .unwrap();

    group.bench_function("header_signed", |b| {
        b.iter(|| black_box(runtime.block_on(verifier.verify(&signed)).is_ok()))
    });

    let mut tampered = signed.clone();
    tampered.method = "POST".into();
    group.bench_function("mismatch", |b| {
        b.iter(|| black_box(runtime.block_on(verifier.verify(&tampered)).is_err()))
    });

    group.finish();
}

fn bench_authorize(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("authz-02-authorize");

    for policies_each in [1usize, 50, 500] {
        let directory = directory_with(100, policies_each);
        let matcher = PolicyMatchingService::new(directory.clone(), directory);
        let path = format!("kind-{}/item", policies_each - 1);

        group.bench_with_input(
            BenchmarkId::new("policies_per_consumer", policies_each),
            &path,
            |b, path| {
                b.iter(|| {
                    black_box(runtime.block_on(matcher.authorize(
                        "consumer-42",
                        "pbs:api",
                        path,
                        Action::Put,
                    )))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_base_string, bench_verify, bench_authorize);
criterion_main!(benches);
