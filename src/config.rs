use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub lock_wait_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            jwt_secret: env::var("JWT_SECRET")?,
            token_ttl_hours: env::var("TOKEN_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            lock_wait_ms: env::var("LOCK_WAIT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        })
    }

    /// Bounded wait applied to every per-record lock acquisition.
    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }
}
