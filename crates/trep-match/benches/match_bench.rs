//! Criterion benchmarks for the matching engine hot path: partitioning and
//! whole-query search against a small synthetic catalog.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trep_core::codes::IataType;
use trep_core::{LocationKey, LocationRecord};
use trep_index::{index_record, IndexBuilder, InMemoryIndex};
use trep_match::{MatchOrchestrator, SearchOptions, StringPartitioner};

fn build_catalog() -> InMemoryIndex {
    let mut builder = IndexBuilder::new();
    builder.begin_build();

    let seeds = [
        ("NCE", 6_299_418u64, "Nice Cote d'Azur", 43.66272, 7.20787),
        ("SFO", 5_391_959, "San Francisco", 37.6213, -122.3790),
        ("RIO", 6_320_062, "Rio de Janeiro", -22.9068, -43.1729),
        ("LHR", 2_647_216, "London Heathrow", 51.4700, -0.4543),
        ("JFK", 5_128_581, "New York John F Kennedy", 40.6413, -73.7781),
    ];
    for (code, geonames_id, name, lat, lon) in seeds {
        let mut rec = LocationRecord::new(
            LocationKey::new(code, IataType::Airport, geonames_id),
            name,
            name,
        );
        rec.latitude = lat;
        rec.longitude = lon;
        index_record(&mut builder, rec);
    }

    builder.commit().unwrap()
}

fn bench_partitioner(c: &mut Criterion) {
    let tokens: Vec<String> = "new york john f kennedy international airport"
        .split_whitespace()
        .map(str::to_string)
        .collect();

    c.bench_function("partitioner_7_tokens", |b| {
        b.iter(|| black_box(StringPartitioner::partitions(black_box(&tokens))))
    });
}

fn bench_orchestrator_search(c: &mut Criterion) {
    let index = build_catalog();
    let orchestrator = MatchOrchestrator::new(&index);

    c.bench_function("search_multi_place_query", |b| {
        b.iter(|| {
            black_box(
                orchestrator
                    .search(
                        black_box("san francisco rio de janeiro"),
                        &SearchOptions::default(),
                    )
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_partitioner, bench_orchestrator_search);
criterion_main!(benches);
