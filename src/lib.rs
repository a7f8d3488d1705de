pub mod app_state;
pub mod cache;
pub mod config;
pub mod db;
pub mod dedup;
pub mod enrichment;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod limiter;
pub mod logging;
pub mod models;
pub mod utils;
pub mod weather;
