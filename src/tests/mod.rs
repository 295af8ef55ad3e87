mod app_flow_tests;
mod router_tests;
pub mod utils;
