//! Criterion benchmarks for the layout and settlement hot paths
//!
//! Covers: position mapping, proximity grouping at small and large item
//! counts, and settlement planning.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use justsplit_core::ledger::balance::Balance;
use justsplit_core::ledger::settlement::SettlementPlanner;
use justsplit_core::time::parse::parse_timestamp_ms;
use justsplit_core::timeline::grouping::{GroupingConfig, ProximityGrouper};
use justsplit_core::timeline::position::{PositionMapper, MS_PER_DAY};
use justsplit_core::timeline::types::{EventBounds, TimedItem};

fn make_items(count: usize) -> Vec<TimedItem> {
    (0..count)
        .map(|i| {
            let day = 1 + (i % 28);
            TimedItem::new(format!("e{i}"), format!("2023-06-{day:02}"))
        })
        .collect()
}

fn make_balances(count: usize) -> Vec<Balance> {
    (0..count)
        .map(|i| {
            let net = if i % 2 == 0 { 25.0 } else { -25.0 };
            Balance {
                participant: format!("p{i}"),
                paid: 0.0,
                share: 0.0,
                net,
            }
        })
        .collect()
}

fn bench_map_position(c: &mut Criterion) {
    let mapper = PositionMapper::with_now_ms(parse_timestamp_ms("2023-07-01T00:00:00Z"));
    let start = parse_timestamp_ms("2023-06-01");
    let end = Some(start + 30.0 * MS_PER_DAY);

    c.bench_function("map_position", |b| {
        b.iter(|| {
            for day in 0..60 {
                black_box(mapper.map(
                    black_box(start + day as f64 * MS_PER_DAY),
                    black_box(start),
                    black_box(end),
                ));
            }
        });
    });
}

fn bench_map_item_with_parsing(c: &mut Criterion) {
    let mapper = PositionMapper::with_now_ms(parse_timestamp_ms("2023-07-01T00:00:00Z"));
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-30"));
    let item = TimedItem::new("e", "2023-06-15T12:00:00Z");

    c.bench_function("map_item_with_parsing", |b| {
        b.iter(|| black_box(mapper.map_item(black_box(&item), black_box(&bounds))));
    });
}

fn bench_grouping(c: &mut Criterion) {
    let mapper = PositionMapper::with_now_ms(parse_timestamp_ms("2023-07-01T00:00:00Z"));
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-30"));
    let grouper = ProximityGrouper::with_config(GroupingConfig { threshold_pct: 5.0 });

    let mut group = c.benchmark_group("group_by_proximity");
    for count in [10usize, 50, 200] {
        let items = make_items(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| black_box(grouper.group(black_box(items), &bounds, &mapper)));
        });
    }
    group.finish();
}

fn bench_settlement(c: &mut Criterion) {
    let planner = SettlementPlanner::new();
    let balances = make_balances(50);

    c.bench_function("settlement_50_participants", |b| {
        b.iter(|| black_box(planner.suggest(black_box(&balances))));
    });
}

criterion_group!(
    benches,
    bench_map_position,
    bench_map_item_with_parsing,
    bench_grouping,
    bench_settlement
);
criterion_main!(benches);
