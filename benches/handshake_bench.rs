use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wss_client::config::ClientConfig;
use wss_client::pipeline::ExecutionMode;
use wss_client::ws::{host_header, UpgradeRequest};

fn benchmark_upgrade_request(c: &mut Criterion) {
    let agent = ClientConfig::default().user_agent(ExecutionMode::Cooperative);

    c.bench_function("upgrade_request_build", |b| {
        b.iter(|| {
            let request = UpgradeRequest::new(
                black_box("example.com"),
                black_box(8443),
                "/401",
                agent.as_str(),
            );
            black_box(request.into_client_request().unwrap())
        })
    });

    c.bench_function("host_header_ipv6", |b| {
        b.iter(|| black_box(host_header(black_box("2001:db8::1"), 443)))
    });
}

criterion_group!(benches, benchmark_upgrade_request);
criterion_main!(benches);
