#[path = "../test_utils.rs"]
#[allow(dead_code)]
mod test_utils;

mod admin_test;
mod config_test;
mod middleware_test;
mod routes_test;
mod schedule_row_test;
