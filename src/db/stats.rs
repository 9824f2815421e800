use crate::db::pool::DbPool;
use crate::db::queries::count_rows;
use crate::errors::AppResult;
use crate::models::activity::Stream;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use std::fs;

const STREAMS: [Stream; 6] = [
    Stream::TableSessions,
    Stream::OrderSessions,
    Stream::OrderItems,
    Stream::Tournaments,
    Stream::Expenses,
    Stream::Inventory,
];

/// Row count per stream, in display order.
pub fn stream_counts(pool: &DbPool) -> AppResult<Vec<(Stream, i64)>> {
    STREAMS
        .iter()
        .map(|s| Ok((*s, count_rows(&pool.conn, *s)?)))
        .collect()
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    for (stream, count) in stream_counts(pool)? {
        println!(
            "{}• {}:{} {}{}{}",
            CYAN, stream, RESET, GREEN, count, RESET
        );
    }

    println!();
    Ok(())
}
