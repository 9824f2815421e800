use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Activity streams: tables, orders with their items, tournaments, expenses.
const CREATE_ACTIVITY_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS table_sessions (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        table_label  TEXT NOT NULL,
        start_time   TEXT NOT NULL,
        end_time     TEXT,
        revenue      REAL NOT NULL DEFAULT 0,
        is_paid      INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS order_sessions (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_label  TEXT NOT NULL,
        created_at      TEXT NOT NULL,
        is_closed       INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS order_items (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        order_session_id  INTEGER NOT NULL,
        product_id        INTEGER NOT NULL,
        quantity          INTEGER NOT NULL DEFAULT 1,
        unit_sell_price   REAL NOT NULL,
        unit_cost_price   REAL
    );

    CREATE TABLE IF NOT EXISTS tournaments (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        name              TEXT NOT NULL,
        created_at        TEXT NOT NULL,
        subscription_fee  REAL NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS tournament_participants (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        tournament_id  INTEGER NOT NULL,
        name           TEXT NOT NULL DEFAULT '',
        paid           INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS tournament_prizes (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        tournament_id  INTEGER NOT NULL,
        amount         REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS expenses (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        date         TEXT NOT NULL,
        amount       REAL NOT NULL,
        description  TEXT NOT NULL DEFAULT '',
        category     TEXT NOT NULL DEFAULT 'other'
    );

    CREATE INDEX IF NOT EXISTS idx_table_sessions_start ON table_sessions(start_time);
    CREATE INDEX IF NOT EXISTS idx_order_sessions_created ON order_sessions(created_at);
    CREATE INDEX IF NOT EXISTS idx_order_items_session ON order_items(order_session_id);
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
"#;

const CREATE_INVENTORY_AND_SETTINGS: &str = r#"
    CREATE TABLE IF NOT EXISTS inventory (
        id          INTEGER PRIMARY KEY,
        name        TEXT NOT NULL,
        cost_price  REAL NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS settings (
        key    TEXT PRIMARY KEY,
        value  TEXT NOT NULL
    );
"#;

/// Ordered list of (version, description, sql).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250301_0001_create_activity_tables",
        "Created activity tables",
        CREATE_ACTIVITY_TABLES,
    ),
    (
        "20250301_0002_create_inventory_and_settings",
        "Created inventory and settings tables",
        CREATE_INVENTORY_AND_SETTINGS,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)?;
        mark_applied(conn, version, message)?;

        tracing::info!(version, "migration applied");
        success(format!("Migration applied: {}", version));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, MIGRATIONS.len() as i64);
    }
}
