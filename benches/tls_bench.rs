use boring::ssl::{SslConnector, SslMethod};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wss_client::socket::tls::{TlsConfig, TlsConnector, TrustStore};

fn benchmark_tls_config_apply(c: &mut Criterion) {
    let config = TlsConfig::default();

    c.bench_function("tls_config_apply", |b| {
        b.iter(|| {
            let mut builder = SslConnector::builder(SslMethod::tls()).unwrap();
            config.apply_to_builder(&mut builder).unwrap();
            black_box(());
        })
    });
}

fn benchmark_ssl_for(c: &mut Criterion) {
    let connector = TlsConnector::new(&TlsConfig::default(), &TrustStore::empty()).unwrap();

    c.bench_function("ssl_for_sni", |b| {
        b.iter(|| black_box(connector.ssl_for(black_box("example.com")).unwrap()))
    });
}

criterion_group!(benches, benchmark_tls_config_apply, benchmark_ssl_for);
criterion_main!(benches);
