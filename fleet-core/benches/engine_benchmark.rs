use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use fleet_core::{
    engine::{
        FilterCriteria, SearchField, SortColumn, SortDirection, filter_servers,
        highlight::highlight_segments, sort_servers,
    },
    model::{Location, Server, ServerStatus},
};

const FLEET_SIZES: [usize; 3] = [100, 1_000, 10_000];

// Deterministic fleet so runs are comparable.
fn make_fleet(len: usize) -> Vec<Server> {
    (0..len)
        .map(|i| Server {
            id: format!("srv-{:05}", i + 1),
            hostname: format!("{}-{:04}", ["web", "db", "cache", "edge"][i % 4], i),
            ip_address: format!("10.{}.{}.{}", i / 65_536, (i / 256) % 256, i % 256),
            status: ServerStatus::ALL[i % 3],
            location: Location::ALL[(i / 3) % 3],
            os: ["Ubuntu 22.04 LTS", "Debian 12", "Rocky Linux 9"][i % 3].to_string(),
            cpu_cores: 2 << (i % 5),
            ram_gb: 4 << (i % 6),
            storage_gb: 100 * (1 + (i as u32 % 40)),
            uptime_hours: (i as u32 * 37) % 9_000,
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_servers");

    let criteria = FilterCriteria {
        status: Some(ServerStatus::Running),
        location: None,
        search_term: "web".to_string(),
        search_field: SearchField::Hostname,
    };

    for size in FLEET_SIZES {
        let fleet = make_fleet(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &fleet, |b, fleet| {
            b.iter(|| filter_servers(black_box(fleet), black_box(&criteria)));
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_servers");

    for size in FLEET_SIZES {
        let fleet = make_fleet(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("hostname", size), &fleet, |b, fleet| {
            b.iter(|| {
                sort_servers(
                    black_box(fleet),
                    Some(SortColumn::Hostname),
                    SortDirection::Asc,
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("cpu_desc", size), &fleet, |b, fleet| {
            b.iter(|| {
                sort_servers(
                    black_box(fleet),
                    Some(SortColumn::CpuCores),
                    SortDirection::Desc,
                )
            });
        });
    }

    group.finish();
}

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight_segments");

    group.bench_function("short_match", |b| {
        b.iter(|| highlight_segments(black_box("web-prod-01"), black_box("prod"), 3));
    });

    group.bench_function("regex_metachars", |b| {
        b.iter(|| highlight_segments(black_box("Ubuntu 22.04 LTS"), black_box("2.0"), 3));
    });

    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort, bench_highlight);
criterion_main!(benches);
