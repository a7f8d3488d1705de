use env_logger::Env;

pub use actix_web::middleware::Logger;

/// Request log line: client, request line, status, body size, latency.
pub const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %Dms"#;

/// Initialises `env_logger` with an `info` default, overridable via `RUST_LOG`.
/// Calling it more than once is harmless.
pub fn setup_logger() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

pub fn access_logger() -> Logger {
    Logger::new(ACCESS_LOG_FORMAT)
}
