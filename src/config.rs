use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Initial administrator created at startup when all three variables are present.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: i64,
    pub bcrypt_cost: u32,
    pub gcloud_credentials: String,
    pub gcloud_project: String,
    pub gcloud_bucket: String,
    pub storage_public_url: String,
    pub cors_origins: Vec<String>,
    pub admin_seed: Option<AdminSeed>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        // Storage settings are checked first
        let gcloud_credentials = require("GOOGLE_APPLICATION_CREDENTIALS")?;
        let gcloud_project = require("GCLOUD_PROJECT")?;
        let gcloud_bucket = require("GCLOUD_BUCKET")?;
        let jwt_secret = require("JWT_SECRET_KEY")?;
        let database_url = require("DATABASE_URL")?;

        let storage_public_url = get("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|| format!("https://storage.googleapis.com/{}", gcloud_bucket));

        let cors_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let admin_seed = match (get("ADMIN_NAME"), get("ADMIN_EMAIL"), get("ADMIN_PASSWORD")) {
            (Some(name), Some(email), Some(password)) => Some(AdminSeed { name, email, password }),
            _ => None,
        };

        Ok(Config {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 5000)?,
            database_url,
            database_name: get("DATABASE_NAME").unwrap_or_else(|| "recetas".to_string()),
            jwt_secret,
            jwt_expiration_secs: parse_or("JWT_EXPIRATION_SECS", get("JWT_EXPIRATION_SECS"), 3600)?,
            bcrypt_cost: parse_or("BCRYPT_COST", get("BCRYPT_COST"), 10)?,
            gcloud_credentials,
            gcloud_project,
            gcloud_bucket,
            storage_public_url: storage_public_url.trim_end_matches('/').to_string(),
            cors_origins,
            admin_seed,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("GOOGLE_APPLICATION_CREDENTIALS", "/secrets/sa.json"),
            ("GCLOUD_PROJECT", "recetas-prod"),
            ("GCLOUD_BUCKET", "recetas-imagenes"),
            ("JWT_SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "mongodb://localhost:27017"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_name, "recetas");
        assert_eq!(config.jwt_expiration_secs, 3600);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(
            config.storage_public_url,
            "https://storage.googleapis.com/recetas-imagenes"
        );
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.admin_seed.is_none());
    }

    #[test]
    fn test_missing_storage_variable_is_fatal() {
        for key in ["GOOGLE_APPLICATION_CREDENTIALS", "GCLOUD_PROJECT", "GCLOUD_BUCKET"] {
            let mut env = base_env();
            env.remove(key);
            assert_eq!(load(&env).unwrap_err(), ConfigError::Missing(key));
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut env = base_env();
        env.insert("JWT_SECRET_KEY", "   ");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("JWT_SECRET_KEY"));
    }

    #[test]
    fn test_invalid_port() {
        let mut env = base_env();
        env.insert("PORT", "http");
        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::Invalid { key: "PORT", .. }
        ));
    }

    #[test]
    fn test_admin_seed_requires_all_fields() {
        let mut env = base_env();
        env.insert("ADMIN_EMAIL", "admin@recetas.com");
        env.insert("ADMIN_NAME", "admin");
        assert!(load(&env).unwrap().admin_seed.is_none());

        env.insert("ADMIN_PASSWORD", "cambiar");
        let seed = load(&env).unwrap().admin_seed.unwrap();
        assert_eq!(seed.email, "admin@recetas.com");
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let mut env = base_env();
        env.insert("CORS_ALLOWED_ORIGINS", "https://a.com, https://b.com ,");
        let config = load(&env).unwrap();
        assert_eq!(config.cors_origins, vec!["https://a.com", "https://b.com"]);
    }
}
