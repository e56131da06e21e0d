//! Process Settings
//!
//! Read once from the environment (after `.env` is loaded) and passed
//! down explicitly.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5000,http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    /// Served as the router fallback when set
    pub static_dir: Option<PathBuf>,
    pub auth: AuthConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .context("Invalid BIND_ADDR")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let mut auth = match var("SECRET_KEY") {
            Some(secret) => AuthConfig::from_secret(secret.into_bytes()),
            None if cfg!(debug_assertions) => {
                tracing::warn!("SECRET_KEY not set, using a random development secret");
                AuthConfig::development()
            }
            None => bail!("SECRET_KEY must be set in production"),
        };
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            static_dir: var("STATIC_DIR").map(PathBuf::from),
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://localhost/shoes"),
            ("SECRET_KEY", "s3cret"),
        ])
        .unwrap();

        assert_eq!(settings.database_max_connections, 5);
        assert_eq!(settings.bind_addr.port(), 5000);
        assert_eq!(settings.frontend_origins.len(), 2);
        assert!(settings.static_dir.is_none());
        assert_eq!(settings.auth.token_secret, b"s3cret".to_vec());
        assert!(settings.auth.pepper().is_none());
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://db/shoes"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FRONTEND_ORIGINS", "https://shop.example, ,https://admin.example"),
            ("STATIC_DIR", "static"),
            ("SECRET_KEY", "s3cret"),
            ("PASSWORD_PEPPER", "pepper"),
        ])
        .unwrap();

        assert_eq!(settings.database_max_connections, 12);
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            settings.frontend_origins,
            vec!["https://shop.example", "https://admin.example"]
        );
        assert_eq!(settings.static_dir, Some(PathBuf::from("static")));
        assert_eq!(settings.auth.pepper(), Some(b"pepper".as_slice()));
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(settings(&[("SECRET_KEY", "s3cret")]).is_err());
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let result = settings(&[
            ("DATABASE_URL", "postgres://localhost/shoes"),
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]);
        assert!(result.is_err());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_missing_secret_is_random_in_debug() {
        let settings = settings(&[("DATABASE_URL", "postgres://localhost/shoes")]).unwrap();
        assert_eq!(settings.auth.token_secret.len(), 32);
    }
}
