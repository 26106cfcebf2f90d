use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hbnb_core::Record;
use hbnb_infra::FileStorage;
use hbnb_models::{Place, State, catalog};
use serde_json::json;

/// Engine at `path` holding `count` places and `count / 10` states.
fn populated(path: &std::path::Path, count: usize) -> FileStorage {
    let mut storage = FileStorage::new(path, catalog());
    for i in 0..count {
        let overrides = json!({
            "name": format!("place-{i}"),
            "number_of_rooms": i % 7,
            "latitude": 37.77,
            "longitude": -122.41,
            "amenity_ids": ["a", "b", "c"],
        });
        Place::create(&mut storage, overrides.as_object().cloned().unwrap_or_default())
            .expect("place");
        if i % 10 == 0 {
            State::create(&mut storage, Record::new()).expect("state");
        }
    }
    storage
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_save");
    for count in [100usize, 1_000, 10_000] {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = populated(&dir.path().join("file.json"), count);
        group.throughput(Throughput::Elements(storage.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &storage, |b, storage| {
            b.iter(|| storage.save().expect("save"));
        });
    }
    group.finish();
}

fn bench_reload(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_reload");
    for count in [100usize, 1_000, 10_000] {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("file.json");
        let written = populated(&path, count);
        written.save().expect("save");

        let mut storage = FileStorage::new(&path, catalog());
        group.throughput(Throughput::Elements(written.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| {
                storage.reload().expect("reload");
                black_box(storage.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_save, bench_reload);
criterion_main!(benches);
