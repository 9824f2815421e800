pub mod activity;
pub mod date_filter;
pub mod expense;
pub mod inventory;
pub mod order_session;
pub mod session;
pub mod table_session;
pub mod tournament;
pub mod work_day;
