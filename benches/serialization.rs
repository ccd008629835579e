use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_inibean::{from_str, to_string, to_string_documented, Document, Documented, TypeDoc};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone)]
struct Server {
    host: String,
    port: u16,
    secure: bool,
    names: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Upstream {
    name: String,
    address: String,
    weight: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Proxy {
    server: Server,
    upstreams: Vec<Upstream>,
    env: BTreeMap<String, String>,
}

impl Documented for Proxy {
    fn documentation() -> TypeDoc {
        TypeDoc::new("Proxy")
            .comment("reverse proxy settings")
            .property("server", "listener")
            .property("upstreams", "backends, one section each")
    }
}

fn server() -> Server {
    Server {
        host: "example.org".to_string(),
        port: 8443,
        secure: true,
        names: vec!["www.example.org".to_string(), "api.example.org".to_string()],
    }
}

fn proxy(size: u32) -> Proxy {
    let mut env = BTreeMap::new();
    env.insert("RUST_LOG".to_string(), "info".to_string());
    env.insert("WORKERS".to_string(), "4".to_string());

    Proxy {
        server: server(),
        upstreams: (0..size)
            .map(|i| Upstream {
                name: format!("backend-{}", i),
                address: format!("10.0.0.{}:80", i % 256),
                weight: i % 10,
            })
            .collect(),
        env,
    }
}

fn benchmark_marshal_simple(c: &mut Criterion) {
    let server = server();

    c.bench_function("marshal_simple_struct", |b| {
        b.iter(|| to_string(black_box(&server)))
    });
}

fn benchmark_unmarshal_simple(c: &mut Criterion) {
    let ini = "host = example.org\nport = 8443\nsecure = true\nname = www.example.org\nname = api.example.org\n";

    c.bench_function("unmarshal_simple_struct", |b| {
        b.iter(|| from_str::<Server>(black_box(ini)))
    });
}

fn benchmark_marshal_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal_sections");

    for size in [10, 50, 100, 500].iter() {
        let proxy = proxy(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&proxy)))
        });
    }
    group.finish();
}

fn benchmark_unmarshal_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("unmarshal_sections");

    for size in [10, 50, 100, 500].iter() {
        let ini = to_string(&proxy(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| from_str::<Proxy>(black_box(&ini)))
        });
    }
    group.finish();
}

fn benchmark_documented(c: &mut Criterion) {
    let proxy = proxy(50);

    c.bench_function("marshal_documented", |b| {
        b.iter(|| to_string_documented(black_box(&proxy)))
    });
}

fn benchmark_parse_only(c: &mut Criterion) {
    let ini = to_string(&proxy(500)).unwrap();

    c.bench_function("parse_document", |b| {
        b.iter(|| Document::parse(black_box(&ini)))
    });
}

criterion_group!(
    benches,
    benchmark_marshal_simple,
    benchmark_unmarshal_simple,
    benchmark_marshal_sections,
    benchmark_unmarshal_sections,
    benchmark_documented,
    benchmark_parse_only
);
criterion_main!(benches);
