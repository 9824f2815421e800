mod common;

use common::{at, expense, item, order, table};
use rvenue::core::aggregator::{ActivitySnapshot, AggregateOptions, SortOrder, WorkDayAggregator};
use rvenue::models::tournament::{Participant, Prize, Tournament};

fn tournament(id: i64, created: &str, fee: f64, paid: usize, unpaid: usize, prizes: &[f64]) -> Tournament {
    let mut participants = Vec::new();
    for i in 0..paid {
        participants.push(Participant {
            name: format!("P{}", i),
            paid: true,
        });
    }
    for i in 0..unpaid {
        participants.push(Participant {
            name: format!("U{}", i),
            paid: false,
        });
    }
    Tournament {
        id,
        created_at: at(created),
        name: format!("Cup {}", id),
        subscription_fee: fee,
        participants,
        prizes: prizes.iter().map(|a| Prize { amount: *a }).collect(),
    }
}

fn asc() -> AggregateOptions {
    AggregateOptions {
        order: SortOrder::Asc,
        ..AggregateOptions::default()
    }
}

#[test]
fn revenue_is_the_sum_of_categories() {
    let snapshot = ActivitySnapshot {
        table_sessions: vec![
            table(1, "2024-03-01 18:00", Some("2024-03-01 20:00"), 10.0, true),
            table(2, "2024-03-01 19:00", Some("2024-03-01 21:00"), 15.0, false),
        ],
        order_sessions: vec![order(1, "2024-03-01 20:00", true)],
        line_items: vec![item(1, 1, 1, 2, 10.0, Some(6.0)), item(2, 1, 2, 1, 5.0, Some(5.0))],
        tournaments: vec![tournament(1, "2024-03-01 21:00", 5.0, 2, 1, &[4.0])],
        expenses: vec![expense(1, "2024-03-01 12:00", 7.0)],
        ..Default::default()
    };

    let agg = WorkDayAggregator::aggregate(&snapshot, asc());
    assert_eq!(agg.days.len(), 1);
    let d = &agg.days[0];

    assert_eq!(d.revenue_by_category.table, 25.0);
    assert_eq!(d.revenue_by_category.orders, 25.0);
    assert_eq!(d.revenue_by_category.tournaments, 10.0);
    assert_eq!(d.total_revenue, 60.0);

    // 25 (tables) + 8 (order) + 6 (tournament) - 7 (expense)
    assert_eq!(d.total_profit, 32.0);
    assert_eq!(d.total_expenses, 7.0);
    assert_eq!(d.unpaid_table_count, 1);
    assert_eq!(d.open_order_count, 0);
    assert_eq!(d.record_count(), 5);
}

#[test]
fn work_day_starts_at_six() {
    let snapshot = ActivitySnapshot {
        expenses: vec![
            expense(1, "2024-01-11 05:59", 1.0),
            expense(2, "2024-01-11 06:00", 2.0),
        ],
        ..Default::default()
    };

    let agg = WorkDayAggregator::aggregate(&snapshot, asc());
    let keys: Vec<&str> = agg.days.iter().map(|d| d.date_key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-10", "2024-01-11"]);
    assert_eq!(agg.days[0].total_expenses, 1.0);
    assert!(agg.days[0].spans_midnight);
    assert!(!agg.days[1].spans_midnight);
}

#[test]
fn start_hour_is_configurable() {
    let snapshot = ActivitySnapshot {
        expenses: vec![expense(1, "2024-01-11 05:30", 1.0)],
        ..Default::default()
    };
    let options = AggregateOptions {
        order: SortOrder::Asc,
        work_day_start_hour: 5,
    };

    let agg = WorkDayAggregator::aggregate(&snapshot, options);
    assert_eq!(agg.days[0].date_key, "2024-01-11");
}

#[test]
fn session_crossing_midnight_stays_on_its_start_day() {
    let snapshot = ActivitySnapshot {
        table_sessions: vec![table(1, "2024-01-10 23:00", Some("2024-01-11 01:00"), 12.0, true)],
        ..Default::default()
    };

    let agg = WorkDayAggregator::aggregate(&snapshot, asc());
    assert_eq!(agg.days.len(), 1);
    assert_eq!(agg.days[0].date_key, "2024-01-10");
    assert!(agg.days[0].spans_midnight);
}

#[test]
fn different_kinds_share_a_work_day() {
    let snapshot = ActivitySnapshot {
        table_sessions: vec![table(1, "2024-01-10 22:00", None, 5.0, false)],
        order_sessions: vec![order(1, "2024-01-11 02:00", false)],
        line_items: vec![item(1, 1, 9, 1, 3.0, None)],
        expenses: vec![expense(1, "2024-01-10 07:00", 1.0)],
        ..Default::default()
    };

    let agg = WorkDayAggregator::aggregate(&snapshot, asc());
    assert_eq!(agg.days.len(), 1);
    let d = &agg.days[0];
    assert_eq!(d.table_sessions.len(), 1);
    assert_eq!(d.order_sessions.len(), 1);
    assert_eq!(d.expenses.len(), 1);
    assert_eq!(d.open_order_count, 1);
    assert_eq!(d.unpaid_table_count, 1);
    // missing cost and no inventory entry: the whole sell price is profit
    assert_eq!(d.order_sessions[0].total_profit, 3.0);
    assert_eq!(d.order_sessions[0].lines[0].label, "Product #9");
}

#[test]
fn days_are_sorted_by_requested_order() {
    let snapshot = ActivitySnapshot {
        expenses: vec![
            expense(1, "2024-01-12 10:00", 1.0),
            expense(2, "2024-01-10 10:00", 1.0),
            expense(3, "2024-01-11 10:00", 1.0),
        ],
        ..Default::default()
    };

    let desc = WorkDayAggregator::aggregate(&snapshot, AggregateOptions::default());
    let keys: Vec<&str> = desc.days.iter().map(|d| d.date_key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-12", "2024-01-11", "2024-01-10"]);

    let up = WorkDayAggregator::aggregate(&snapshot, asc());
    let keys: Vec<&str> = up.days.iter().map(|d| d.date_key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-10", "2024-01-11", "2024-01-12"]);
}

#[test]
fn aggregation_is_idempotent() {
    let snapshot = ActivitySnapshot {
        table_sessions: vec![table(1, "2024-01-10 23:00", Some("2024-01-11 01:00"), 12.0, true)],
        order_sessions: vec![order(1, "2024-01-10 21:00", true)],
        line_items: vec![item(1, 1, 1, 2, 10.0, Some(6.0))],
        ..Default::default()
    };

    let first = WorkDayAggregator::aggregate(&snapshot, AggregateOptions::default());
    let second = WorkDayAggregator::aggregate(&snapshot, AggregateOptions::default());
    assert_eq!(first, second);
    assert_eq!(first.total_revenue(), 32.0);
}
