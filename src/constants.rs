use std::sync::LazyLock;

pub mod version;

pub static STARTUP_TIME: LazyLock<std::time::SystemTime> =
    LazyLock::new(std::time::SystemTime::now);

pub const DEFAULT_DATABASE_URL: &str = "sqlite:quotes.db";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;
