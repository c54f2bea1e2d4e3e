use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

use effigy_dispatch::testing::FixedBackend;
use effigy_dispatch::{classify, route, Backend, Dispatcher, MatchContext, Request};

fn scored_backend(id: usize, score: [u32; 5]) -> Arc<dyn Backend> {
    let backend =
        FixedBackend::new(format!("backend-{id}")).with_candidate(&format!("scenario-{id}"), score);
    Arc::new(backend)
}

/// Backends that each offer one candidate; the one at `winner` dominates.
fn build_backends(count: usize, winner: usize) -> Vec<Arc<dyn Backend>> {
    (0..count)
        .map(|i| {
            if i == winner {
                scored_backend(i, [2, 0, 0, 0, 0])
            } else {
                scored_backend(i, [1, 0, 0, 0, 0])
            }
        })
        .collect()
}

fn build_context() -> MatchContext {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/items")
        .header("Content-Type", "application/json")
        .body(br#"{"sku": "A-17", "qty": 3}"#.to_vec())
        .build();
    MatchContext::from_request(&request)
}

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    let context = build_context();

    for backend_count in [1, 4, 16, 64, 256].iter() {
        // Winner declared first (best case for the scan)
        let backends_first = build_backends(*backend_count, 0);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("winner_first", backend_count),
            backend_count,
            |b, _| {
                b.iter(|| route(black_box(&context), black_box(&backends_first)));
            },
        );

        // Winner declared last (every backend still contributes candidates)
        let backends_last = build_backends(*backend_count, backend_count - 1);

        group.bench_with_input(
            BenchmarkId::new("winner_last", backend_count),
            backend_count,
            |b, _| {
                b.iter(|| route(black_box(&context), black_box(&backends_last)));
            },
        );

        // No candidates anywhere, resolved by the first default
        let mut backends_default: Vec<Arc<dyn Backend>> = (0..*backend_count - 1)
            .map(|i| Arc::new(FixedBackend::new(&format!("backend-{i}"))) as Arc<dyn Backend>)
            .collect();
        backends_default.push(Arc::new(FixedBackend::new("fallback").with_default("default")));

        group.bench_with_input(
            BenchmarkId::new("default_fallback", backend_count),
            backend_count,
            |b, _| {
                b.iter(|| route(black_box(&context), black_box(&backends_default)));
            },
        );
    }

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let small_json = br#"{"sku": "A-17", "qty": 3}"#.to_vec();
    let large_json = serde_json::to_vec(&serde_json::json!({
        "items": (0..200)
            .map(|i| serde_json::json!({"sku": format!("A-{i}"), "qty": i}))
            .collect::<Vec<_>>()
    }))
    .unwrap();
    let xml = b"<order><item sku=\"A-17\" qty=\"3\"/><item sku=\"B-9\" qty=\"1\"/></order>".to_vec();
    let text = b"plain text payload that is neither json nor xml".to_vec();

    for (name, payload) in [
        ("small_json", &small_json),
        ("large_json", &large_json),
        ("xml", &xml),
        ("text", &text),
    ] {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| classify(black_box(payload)));
        });
    }

    group.finish();
}

fn bench_full_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_dispatch");

    let dispatcher = Dispatcher::new(build_backends(16, 7));

    let get_request = Request::builder().uri("/api/v1/items").build();
    let post_request = Request::builder()
        .method("POST")
        .uri("/api/v1/items")
        .body(br#"{"sku": "A-17", "qty": 3}"#.to_vec())
        .build();

    group.throughput(Throughput::Elements(1));
    group.bench_function("get_no_body", |b| {
        b.iter(|| dispatcher.dispatch(black_box(&get_request)));
    });

    group.bench_function("post_json_body", |b| {
        b.iter(|| dispatcher.dispatch(black_box(&post_request)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_routing,
    bench_classification,
    bench_full_dispatch
);
criterion_main!(benches);
