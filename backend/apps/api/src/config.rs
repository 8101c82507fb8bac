//! Process configuration
//!
//! Read once at start-up from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use auth::config::AdminCredentials;
use axum::http::HeaderValue;
use platform::crypto::from_base64;
use platform::password::HashedPassword;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 600;

#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    /// `None` disables the background session sweeper
    pub sweep_interval: Option<Duration>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let sweep_secs = match env::var("SESSION_SWEEP_INTERVAL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .context("SESSION_SWEEP_INTERVAL_SECS must be a whole number")?,
            Err(_) => DEFAULT_SWEEP_INTERVAL_SECS,
        };
        let sweep_interval = (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs));

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            sweep_interval,
            auth: auth_config()?,
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let cookie_secure = match env::var("COOKIE_SECURE") {
        Ok(raw) => parse_flag(&raw).context("COOKIE_SECURE must be true or false")?,
        Err(_) => true,
    };

    let password_pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| from_base64(raw.trim()))
        .transpose()
        .context("PASSWORD_PEPPER is not valid base64")?;

    let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD_HASH")) {
        (Ok(user_name), Ok(hash)) => Some(AdminCredentials {
            user_name: user_name.trim().to_string(),
            password_hash: HashedPassword::from_phc_string(hash.trim())
                .context("ADMIN_PASSWORD_HASH is not a PHC string")?,
        }),
        (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
            tracing::warn!("ADMIN_USERNAME and ADMIN_PASSWORD_HASH must both be set; admin login disabled");
            None
        }
        _ => None,
    };

    Ok(AuthConfig {
        cookie_secure,
        password_pepper,
        admin,
        ..AuthConfig::default()
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
