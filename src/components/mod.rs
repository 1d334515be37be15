pub mod check_result;
pub mod nav_bar;
pub mod report_history;
pub mod status_badge;
