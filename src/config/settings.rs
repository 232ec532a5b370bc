//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_PORT, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` falls back to `JWT_ACCESS_SECRET`. In debug builds a
    /// development secret is used when neither is set; release builds
    /// refuse to start without one.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET").or_else(|_| env::var("JWT_ACCESS_SECRET")) {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self::new(
            database_url_from_env(),
            jwt_secret,
            jwt_expiration_hours_from_env()?,
            env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        )
    }

    /// Build a configuration from explicit values.
    ///
    /// # Errors
    /// Returns an internal error if the JWT secret is shorter than
    /// `MIN_JWT_SECRET_LENGTH`, or if the token lifetime is not within
    /// `1..=MAX_JWT_EXPIRATION_HOURS`.
    pub fn new(
        database_url: String,
        jwt_secret: String,
        jwt_expiration_hours: i64,
        server_host: String,
        server_port: u16,
    ) -> AppResult<Self> {
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&jwt_expiration_hours) {
            return Err(AppError::internal(format!(
                "JWT expiration must be between 1 and {} hours, got {}",
                MAX_JWT_EXPIRATION_HOURS, jwt_expiration_hours
            )));
        }

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            server_host,
            server_port,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// `JWT_EXPIRATION_HOURS` wins; otherwise `JWT_EXPIRATION_TIME` is read in
/// the `60`, `90s`, `30m`, `12h`, `7d` notation (bare numbers are seconds).
fn jwt_expiration_hours_from_env() -> AppResult<i64> {
    if let Ok(hours) = env::var("JWT_EXPIRATION_HOURS") {
        return hours.trim().parse().map_err(|_| {
            AppError::internal(format!("JWT_EXPIRATION_HOURS is not a number: {}", hours))
        });
    }

    match env::var("JWT_EXPIRATION_TIME") {
        Ok(value) => parse_expiration_time(&value).ok_or_else(|| {
            AppError::internal(format!("JWT_EXPIRATION_TIME is not a duration: {}", value))
        }),
        Err(_) => Ok(DEFAULT_JWT_EXPIRATION_HOURS),
    }
}

/// Convert a duration like `12h` to whole hours, rounding partial hours up.
fn parse_expiration_time(value: &str) -> Option<i64> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);
    let amount: i64 = amount.parse().ok()?;

    let seconds_per_unit = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        _ => return None,
    };

    let seconds = amount.checked_mul(seconds_per_unit)?;
    Some(seconds.checked_add(3599)? / 3600)
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the
/// `DATABASE_HOST`/`_PORT`/`_NAME`/`_USERNAME`/`_PASSWORD` variables when a
/// host is given.
fn database_url_from_env() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }

    match env::var("DATABASE_HOST") {
        Ok(host) => assemble_database_url(
            &host,
            env::var("DATABASE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DATABASE_PORT),
            &env::var("DATABASE_NAME").unwrap_or_else(|_| "postgres".to_string()),
            &env::var("DATABASE_USERNAME").unwrap_or_else(|_| "postgres".to_string()),
            &env::var("DATABASE_PASSWORD").unwrap_or_default(),
        ),
        Err(_) => DEFAULT_DATABASE_URL.to_string(),
    }
}

fn assemble_database_url(host: &str, port: u16, name: &str, user: &str, password: &str) -> String {
    if password.is_empty() {
        format!("postgres://{}@{}:{}/{}", user, host, port, name)
    } else {
        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new(
            DEFAULT_DATABASE_URL.to_string(),
            "short".to_string(),
            1,
            DEFAULT_SERVER_HOST.to_string(),
            DEFAULT_SERVER_PORT,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_expiration_out_of_range_rejected() {
        for hours in [0, -1, MAX_JWT_EXPIRATION_HOURS + 1, i64::MAX / 1000] {
            let result = Config::new(
                DEFAULT_DATABASE_URL.to_string(),
                SECRET.to_string(),
                hours,
                DEFAULT_SERVER_HOST.to_string(),
                DEFAULT_SERVER_PORT,
            );
            assert!(result.is_err(), "{} hours accepted", hours);
        }
    }

    #[test]
    fn test_parse_expiration_time() {
        assert_eq!(parse_expiration_time("12h"), Some(12));
        assert_eq!(parse_expiration_time("7d"), Some(168));
        assert_eq!(parse_expiration_time("3600"), Some(1));
        assert_eq!(parse_expiration_time("90m"), Some(2));
        assert_eq!(parse_expiration_time("1 h"), Some(1));
        assert_eq!(parse_expiration_time("soon"), None);
        assert_eq!(parse_expiration_time("5w"), None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new(
            "postgres://admin:hunter2@db:5432/shop".to_string(),
            SECRET.to_string(),
            1,
            "127.0.0.1".to_string(),
            8080,
        )
        .unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains(SECRET));
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_assemble_database_url() {
        assert_eq!(
            assemble_database_url("db", 5433, "shop", "admin", "pw"),
            "postgres://admin:pw@db:5433/shop"
        );
        assert_eq!(
            assemble_database_url("db", 5432, "shop", "admin", ""),
            "postgres://admin@db:5432/shop"
        );
    }
}
