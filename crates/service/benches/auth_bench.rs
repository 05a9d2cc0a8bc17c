use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;

use service::auth::AuthService;
use service::auth::storage::mock::MockStorage;
use service::auth::token::JwtTokenIssuer;

fn bench_login(c: &mut Criterion) {
    let store = Arc::new(MockStorage::new().with_app(1, "bench", "bench-secret"));
    let svc = AuthService::from_storage(store, Arc::new(JwtTokenIssuer), Duration::from_secs(3600));

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(svc.register_new_user("bench@example.com", "Benchmark1")).unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            rt.block_on(svc.login("bench@example.com", "Benchmark1", 1)).unwrap();
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_login
}
criterion_main!(benches);
