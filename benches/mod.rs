use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    mqtt::bench_build_minimal,
    mqtt::bench_build_full,
    mqtt::bench_parse_connack,
    mqtt::bench_varint
);
criterion_main!(benches);
