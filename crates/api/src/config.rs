use homeinv_core::upload::{ObjectStoreEndpoint, DEFAULT_BUCKET, DEFAULT_PORT, DEFAULT_REGION};

use crate::auth::jwt::JwtConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token validation.
    pub jwt: JwtConfig,
    /// S3-compatible object store used for item photos.
    pub object_store: ObjectStoreConfig,
}

/// Connection settings for the S3-compatible object store.
#[derive(Clone)]
pub struct ObjectStoreConfig {
    pub endpoint: ObjectStoreEndpoint,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
}

impl std::fmt::Debug for ObjectStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `JWT_SECRET`              | **required**            |
    /// | `JWT_AUDIENCE`            | unset (not checked)     |
    /// | `OBJECT_STORE_*`          | see [`ObjectStoreConfig::from_lookup`] |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_lookup(&lookup)?,
            object_store: ObjectStoreConfig::from_lookup(&lookup)?,
        })
    }
}

impl ObjectStoreConfig {
    /// | Env Var                   | Default           |
    /// |---------------------------|-------------------|
    /// | `OBJECT_STORE_ENDPOINT`   | **required**      |
    /// | `OBJECT_STORE_PORT`       | `9000`            |
    /// | `OBJECT_STORE_USE_SSL`    | **required**      |
    /// | `OBJECT_STORE_ACCESS_KEY` | **required**      |
    /// | `OBJECT_STORE_SECRET_KEY` | **required**      |
    /// | `OBJECT_STORE_BUCKET`     | `home-inventory`  |
    /// | `OBJECT_STORE_REGION`     | `us-east-1`       |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = required(lookup, "OBJECT_STORE_ENDPOINT")?;
        let port = parse_or(lookup, "OBJECT_STORE_PORT", DEFAULT_PORT)?;
        let use_ssl = parse_bool(&required(lookup, "OBJECT_STORE_USE_SSL")?, "OBJECT_STORE_USE_SSL")?;

        Ok(Self {
            endpoint: ObjectStoreEndpoint {
                host,
                port,
                use_ssl,
            },
            access_key: required(lookup, "OBJECT_STORE_ACCESS_KEY")?,
            secret_key: required(lookup, "OBJECT_STORE_SECRET_KEY")?,
            bucket: lookup("OBJECT_STORE_BUCKET")
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BUCKET.into()),
            region: lookup("OBJECT_STORE_REGION")
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.into()),
        })
    }
}

/// Fetch a variable that must be present and non-empty.
pub(crate) fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

fn parse_bool(raw: &str, var: &'static str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        }),
    }
}
