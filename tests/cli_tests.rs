use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init, rv, seed_evening, setup_test_db, temp_out};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rv().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    rv().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("table_sessions").and(contains("order_items")));
}

#[test]
fn test_session_lifecycle() {
    let db_path = setup_test_db("cli_session");
    init(&db_path);

    rv().args(["--db", &db_path, "session", "status"])
        .assert()
        .success()
        .stdout(contains("idle"));

    rv().args(["--db", &db_path, "session", "start", "--cash", "500"])
        .assert()
        .success()
        .stdout(contains("Session started").and(contains("500.00")));

    rv().args(["--db", &db_path, "session", "start", "--cash", "10"])
        .assert()
        .failure()
        .stderr(contains("already active"));

    rv().args(["--db", &db_path, "session", "status"])
        .assert()
        .success()
        .stdout(contains("active"));

    rv().args(["--db", &db_path, "session", "end"])
        .assert()
        .success()
        .stdout(contains("Session ended"));

    rv().args(["--db", &db_path, "session", "end"])
        .assert()
        .failure()
        .stderr(contains("Invalid state"));

    rv().args(["--db", &db_path, "session", "status"])
        .assert()
        .success()
        .stdout(contains("completed").and(contains("Ended")));
}

#[test]
fn test_add_and_list_days() {
    let db_path = setup_test_db("cli_add_days");
    init(&db_path);

    rv().args([
        "--db",
        &db_path,
        "add",
        "table",
        "--label",
        "Pool 1",
        "--start",
        "2024-01-10 23:00",
        "--end",
        "2024-01-11 01:00",
        "--revenue",
        "12",
    ])
    .assert()
    .success()
    .stdout(contains("Added table 'Pool 1'"));

    rv().args(["--db", &db_path, "add", "order", "--customer", "Bar", "--at", "2024-01-11 00:30"])
        .assert()
        .success();

    rv().args(["--db", &db_path, "add", "product", "--id", "7", "--name", "Beer", "--cost", "1.5"])
        .assert()
        .success();

    rv().args(["--db", &db_path, "add", "item", "--order", "1", "--product", "7", "--qty", "2", "--sell", "4"])
        .assert()
        .success();

    rv().args(["--db", &db_path, "days", "--details"])
        .assert()
        .success()
        .stdout(
            contains("2024-01-10")
                .and(contains("20.00"))
                .and(contains("Beer"))
                .and(contains("2024-01-11 00:30:00")),
        );
}

#[test]
fn test_item_on_unknown_order_fails() {
    let db_path = setup_test_db("cli_item_unknown_order");
    init(&db_path);

    rv().args(["--db", &db_path, "add", "item", "--order", "9", "--product", "1", "--sell", "2"])
        .assert()
        .failure()
        .stderr(contains("order_sessions"));
}

#[test]
fn test_invalid_datetime_is_rejected() {
    let db_path = setup_test_db("cli_invalid_datetime");
    init(&db_path);

    rv().args(["--db", &db_path, "add", "expense", "--amount", "3", "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(contains("Invalid date/time"));
}

#[test]
fn test_paid_toggle_and_delete() {
    let db_path = setup_test_db("cli_paid_del");
    init(&db_path);
    seed_evening(&db_path);

    // table #2 was seeded unpaid
    rv().args(["--db", &db_path, "paid", "2"])
        .assert()
        .success()
        .stdout(contains("marked paid").and(contains("Totals refreshed")));

    rv().args(["--db", &db_path, "close", "1"])
        .assert()
        .success()
        .stdout(contains("closed"));

    rv().args(["--db", &db_path, "del", "order", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    rv().args(["--db", &db_path, "del", "order", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No order_sessions record with id 1"));

    rv().args(["--db", &db_path, "del", "widgets", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Unknown record stream"));

    rv().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("toggle_paid").and(contains("del")));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    init(&db_path);
    seed_evening(&db_path);

    let csv_out = temp_out("cli_export", "csv");
    rv().args(["--db", &db_path, "export", "--format", "csv", "--file", &csv_out, "--force"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let csv = fs::read_to_string(&csv_out).expect("csv written");
    assert!(csv.starts_with("work_day,"));
    assert!(csv.contains("2024-01-10"));

    let json_out = temp_out("cli_export", "json");
    rv().args(["--db", &db_path, "export", "--format", "json", "--file", &json_out])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("json written")).expect("valid json");
    let rows = json.as_array().expect("array of work days");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total_revenue"], 45.0);
    assert_eq!(rows[0]["spans_midnight"], true);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("cli_export_relative");
    init(&db_path);

    rv().args(["--db", &db_path, "export", "--file", "out.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_range_for_custom_and_past_day() {
    let db_path = setup_test_db("cli_range");
    init(&db_path);
    seed_evening(&db_path);

    rv().args(["--db", &db_path, "range", "--preset", "custom", "--from", "2024-01-10"])
        .assert()
        .success()
        .stdout(contains("2024-01-10 00:00:00").and(contains("2024-01-10 23:59:59")));

    rv().args(["--db", &db_path, "range", "--day", "2024-01-10"])
        .assert()
        .success()
        .stdout(contains("2024-01-10 18:00:00").not().and(contains("2024-01-10 20:00:00")));

    rv().args(["--db", &db_path, "range", "--preset", "week", "--save"])
        .assert()
        .success()
        .stdout(contains("Date filter set to 'week'"));

    rv().args(["--db", &db_path, "range"])
        .assert()
        .success()
        .stdout(contains("Date filter: week"));
}
