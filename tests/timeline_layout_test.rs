//! Integration tests for the timeline layout pipeline
//!
//! These tests verify the complete path from an event document to
//! renderable markers: timestamp parsing -> position mapping ->
//! proximity grouping -> marker projection.

use justsplit_core::ledger::document::EventDocument;
use justsplit_core::ledger::types::{EventInfo, Expense};
use justsplit_core::time::clock::FixedClock;
use justsplit_core::time::parse::parse_timestamp_ms;
use justsplit_core::timeline::grouping::{GroupingConfig, ProximityGrouper};
use justsplit_core::timeline::layout::LayoutEngine;
use justsplit_core::timeline::position::{PositionMapper, MS_PER_DAY, PRE_EVENT_SPAN_PCT};
use justsplit_core::timeline::types::{Cluster, EventBounds, TimedItem};

const NOW: &str = "2023-07-01T00:00:00Z";

/// Create a test item
fn make_item(id: &str, timestamp: &str) -> TimedItem {
    TimedItem::new(id, timestamp)
}

fn mapper() -> PositionMapper {
    PositionMapper::new(&FixedClock::from_timestamp(NOW))
}

fn grouper(threshold: f64) -> ProximityGrouper {
    ProximityGrouper::with_config(GroupingConfig {
        threshold_pct: threshold,
    })
}

#[test]
fn test_midway_expense_lands_near_half() {
    // June 5th over [June 1, June 10]: 4 of 9 days, rounds to 44.
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-10"));
    let pos = mapper().map_item(&make_item("dinner", "2023-06-05"), &bounds);
    assert_eq!(pos, 44.0);
    assert!((40.0..=60.0).contains(&pos));
}

#[test]
fn test_boundary_snapping_positions() {
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-10"));
    let m = mapper();
    assert_eq!(m.map_item(&make_item("at-start", "2023-06-01"), &bounds), 1.0);
    assert_eq!(m.map_item(&make_item("at-end", "2023-06-10"), &bounds), 99.0);
    assert_eq!(
        m.map_item(&make_item("near-end", "2023-06-09T23:30:00Z"), &bounds),
        99.0
    );
}

#[test]
fn test_pre_event_items_map_into_negative_zone() {
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-10"));
    let m = mapper();

    for (id, ts) in [
        ("day-before", "2023-05-31"),
        ("week-before", "2023-05-25"),
        ("month-before", "2023-05-02"),
    ] {
        let pos = m.map_item(&make_item(id, ts), &bounds);
        assert!(pos >= -PRE_EVENT_SPAN_PCT, "{id} too deep: {pos}");
        assert!(pos < 0.0, "{id} not negative: {pos}");
    }

    // Anything older than the 30-day window pins to the floor.
    let ancient = m.map_item(&make_item("ancient", "2022-01-01"), &bounds);
    assert_eq!(ancient, -PRE_EVENT_SPAN_PCT);
}

#[test]
fn test_positions_monotonic_across_the_window() {
    let bounds = EventBounds::new("2023-01-01", Some("2023-04-11")); // 100 days
    let m = mapper();
    let start = parse_timestamp_ms("2023-01-01");

    let mut last = f64::NEG_INFINITY;
    for day in [2.0, 9.0, 23.0, 41.0, 60.0, 77.0, 95.0, 98.0] {
        let pos = m.map(start + day * MS_PER_DAY, start, Some(start + 100.0 * MS_PER_DAY));
        assert!(pos >= last, "position regressed at day {day}");
        assert!((1.0..=99.0).contains(&pos));
        last = pos;
    }
}

#[test]
fn test_grouping_merges_early_expenses_into_one_badge() {
    // Positions: 1 (start snap), 5, 47. Threshold 5 merges the first two.
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-20"));
    let items = vec![
        make_item("a", "2023-06-01"),
        make_item("b", "2023-06-02"),
        make_item("c", "2023-06-10"),
    ];

    let clusters = grouper(5.0).group(&items, &bounds, &mapper());

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].len(), 2);
    assert!(clusters[0].position < 5.0);
    assert_eq!(clusters[1].len(), 1);
    assert!((40.0..=50.0).contains(&clusters[1].position));
}

#[test]
fn test_grouping_conserves_every_item() {
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-30"));
    let items: Vec<TimedItem> = (1..=20)
        .map(|day| make_item(&format!("e{day}"), &format!("2023-06-{day:02}")))
        .collect();

    for threshold in [1.0, 5.0, 20.0, 119.0] {
        let clusters = grouper(threshold).group(&items, &bounds, &mapper());
        let total: usize = clusters.iter().map(Cluster::len).sum();
        assert_eq!(total, items.len(), "items lost at threshold {threshold}");
    }
}

#[test]
fn test_empty_document_lays_out_to_nothing() {
    let engine = LayoutEngine::new();
    let document = EventDocument::new(EventInfo::new("empty", "2023-06-01", Some("2023-06-10")));
    let markers = engine.layout_document(&document, &FixedClock::from_timestamp(NOW));
    assert!(markers.is_empty());
}

#[test]
fn test_greedy_first_fit_not_nearest_center() {
    // 100-day window so day N sits at position N. Clusters form at 10
    // and 28; the item at 20 is nearer to 28 but first-fit hands it to
    // the cluster at 10.
    let bounds = EventBounds::new("2023-01-01", Some("2023-04-11"));
    let items = vec![
        make_item("a", "2023-01-11"),
        make_item("b", "2023-01-29"),
        make_item("c", "2023-01-21"),
    ];

    let clusters = grouper(11.0).group(&items, &bounds, &mapper());

    assert_eq!(clusters.len(), 2);
    let first_ids: Vec<&str> = clusters[0].members.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(first_ids, vec!["a", "c"]);
    assert!((clusters[0].position - 15.0).abs() < 1e-9);
    assert_eq!(clusters[1].members[0].id, "b");
}

#[test]
fn test_input_order_changes_grouping() {
    let bounds = EventBounds::new("2023-01-01", Some("2023-04-11"));
    let a = make_item("a", "2023-01-11"); // position 10
    let b = make_item("b", "2023-01-29"); // position 28
    let c = make_item("c", "2023-01-21"); // position 20
    let g = grouper(11.0);
    let m = mapper();

    let abc = g.group(&[a.clone(), b.clone(), c.clone()], &bounds, &m);
    let bca = g.group(&[b, c, a], &bounds, &m);

    // Same items, both split 2/1, but c switches sides.
    assert_eq!(abc.len(), 2);
    assert_eq!(bca.len(), 2);
    let abc_partner = abc[0].members[0].id.as_str();
    let bca_partner = bca[0].members[0].id.as_str();
    assert_eq!(abc_partner, "a");
    assert_eq!(bca_partner, "b");
    assert!(abc[0].members.iter().any(|i| i.id == "c"));
    assert!(bca[0].members.iter().any(|i| i.id == "c"));
}

#[test]
fn test_ongoing_event_positions_against_injected_now() {
    // Event started June 1, no end; "now" pinned at July 1 makes June 16
    // the halfway point.
    let bounds = EventBounds::ongoing("2023-06-01");
    let pos = mapper().map_item(&make_item("mid", "2023-06-16"), &bounds);
    assert_eq!(pos, 50.0);

    // A later "now" moves the same expense earlier on the axis.
    let later = PositionMapper::new(&FixedClock::from_timestamp("2023-08-30T00:00:00Z"));
    let pos_later = later.map_item(&make_item("mid", "2023-06-16"), &bounds);
    assert!(pos_later < pos);
}

#[test]
fn test_unparseable_timestamp_renders_at_end_fallback() {
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-10"));
    let items = vec![make_item("ok", "2023-06-05"), make_item("bad", "sometime")];

    let clusters = grouper(5.0).group(&items, &bounds, &mapper());

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[1].members[0].id, "bad");
    assert_eq!(clusters[1].position, 100.0);
}

#[test]
fn test_document_to_markers_end_to_end() {
    let event = EventInfo::new("road trip", "2023-06-01", Some("2023-06-20"))
        .with_participants(vec!["ana".into(), "ben".into()]);
    let mut document = EventDocument::new(event);
    let both = vec!["ana".to_string(), "ben".to_string()];
    document.add_expense(Expense::new("fuel", 45.0, "USD", "2023-06-01", "ana", both.clone()));
    document.add_expense(Expense::new("lunch", 30.0, "USD", "2023-06-02", "ben", both.clone()));
    document.add_expense(Expense::new("hotel", 120.0, "USD", "2023-06-10", "ana", both));

    assert!(document.validate().is_ok());

    let engine = LayoutEngine::new();
    let markers = engine.layout_document(&document, &FixedClock::from_timestamp(NOW));

    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].count, 2);
    assert_eq!(markers[1].count, 1);
    assert_eq!(
        markers.iter().map(|m| m.count).sum::<usize>(),
        document.len()
    );
    // Marker ids are the expense ids, so the renderer can link back.
    assert_eq!(markers[0].item_ids[0], document.expenses[0].id.to_string());
}

#[test]
fn test_repeated_layout_is_stable_for_bounded_events() {
    // With a defined end the clock never enters the math, so two passes
    // agree even with different "now" values.
    let bounds = EventBounds::new("2023-06-01", Some("2023-06-20"));
    let items: Vec<TimedItem> = (1..=15)
        .map(|day| make_item(&format!("e{day}"), &format!("2023-06-{day:02}")))
        .collect();
    let engine = LayoutEngine::new();

    let first = engine.layout(&items, &bounds, &FixedClock::from_timestamp(NOW));
    let second = engine.layout(
        &items,
        &bounds,
        &FixedClock::from_timestamp("2024-01-01T00:00:00Z"),
    );

    assert_eq!(first, second);
}
