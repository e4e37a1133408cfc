//! Benchmarks for request signing
//!
//! Run with: cargo bench --bench signing

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ftx_auth::{sign, signing_payload, FixedClock};
use ftx_types::{Method, Query};

const SECRET: &str = "T4lPid48QtjNxjLUFOcUZghD7CUJ7sTVsfuvQZF2";

fn order_body() -> Query {
    Query::new()
        .with("market", "BTC-PERP")
        .with("side", "buy")
        .with("price", 8500.5)
        .with("type", "limit")
        .with("size", 0.25)
        .with("reduceOnly", false)
        .with("ioc", false)
        .with("postOnly", true)
}

fn bench_payload(c: &mut Criterion) {
    let query = Query::new()
        .with("market", "BTC/USD")
        .with("start_time", 1_600_000_000)
        .with("end_time", 1_600_086_400)
        .with("limit", 100);
    let empty = Query::new();

    c.bench_function("payload_get_query", |b| {
        b.iter(|| {
            signing_payload(
                black_box("1588591511721"),
                Method::Get,
                black_box("/api/fills"),
                black_box(&query),
                &empty,
            )
        })
    });

    let body = order_body();
    c.bench_function("payload_post_body", |b| {
        b.iter(|| {
            signing_payload(
                black_box("1588591511721"),
                Method::Post,
                black_box("/api/orders"),
                &empty,
                black_box(&body),
            )
        })
    });
}

fn bench_sign(c: &mut Criterion) {
    let clock = FixedClock::new(1_588_591_511_721);
    let body = order_body();
    let empty = Query::new();

    c.bench_function("sign_create_order", |b| {
        b.iter(|| {
            sign(
                black_box(SECRET),
                Method::Post,
                "/api/orders",
                &empty,
                black_box(&body),
                &clock,
            )
        })
    });
}

criterion_group!(benches, bench_payload, bench_sign);
criterion_main!(benches);
