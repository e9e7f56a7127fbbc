// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A local `.env` file is read first if present; variables already set in
//! the process environment take precedence. Keys are matched
//! case-insensitively, so `strava_access_token` and `STRAVA_ACCESS_TOKEN`
//! are the same setting.

use axum::http::HeaderValue;
use std::collections::HashMap;
use std::env;
use std::fmt;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STRAVA_API_BASE_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    // --- Strava credentials ---
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Bearer token sent with every upstream request
    pub strava_access_token: String,
    /// Refresh token (kept for completeness; tokens are never refreshed)
    pub strava_refresh_token: Option<String>,

    // --- Server ---
    pub host: String,
    pub port: u16,

    // --- Upstream ---
    /// Strava API base URL, without a trailing slash
    pub strava_api_base_url: String,
    /// Client-wide timeout for upstream requests
    pub request_timeout_secs: u64,

    /// Origins allowed by the CORS layer
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_vars(vars)
    }

    /// Build configuration from key/value pairs.
    ///
    /// Keys are lowercased before lookup. If the same key appears twice with
    /// different casing, the last one wins.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.as_ref().trim().to_string()))
            .collect();

        let lookup = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();
        let require = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let port = match lookup("port") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let request_timeout_secs = match lookup("strava_timeout_secs") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "STRAVA_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let strava_api_base_url = lookup("strava_api_base_url")
            .unwrap_or_else(|| DEFAULT_STRAVA_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let cors_allowed_origins = parse_cors_origins(
            &lookup("cors_allowed_origins")
                .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.to_string()),
        )?;

        Ok(Self {
            strava_client_id: require("strava_client_id")?,
            strava_client_secret: require("strava_client_secret")?,
            strava_access_token: require("strava_access_token")?,
            strava_refresh_token: lookup("strava_refresh_token"),
            host: lookup("host").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            strava_api_base_url,
            request_timeout_secs,
            cors_allowed_origins,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_access_token: "test_access_token".to_string(),
            strava_refresh_token: None,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            strava_api_base_url: DEFAULT_STRAVA_API_BASE_URL.to_string(),
            request_timeout_secs: 5,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }

    /// Address the server binds to, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("strava_client_id", &self.strava_client_id)
            .field("strava_client_secret", &"<redacted>")
            .field("strava_access_token", &"<redacted>")
            .field(
                "strava_refresh_token",
                &self.strava_refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .field("strava_api_base_url", &self.strava_api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

/// Split a comma-separated origin list.
///
/// Credentialed CORS forbids the `*` wildcard, and every origin must be a
/// valid header value.
fn parse_cors_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" || HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    key: "CORS_ALLOWED_ORIGINS",
                    value: origin.to_string(),
                });
            }
            Ok(origin.to_string())
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("STRAVA_CLIENT_ID", "12345"),
            ("STRAVA_CLIENT_SECRET", "shh"),
            ("STRAVA_ACCESS_TOKEN", "token"),
        ]
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_vars(required()).expect("Config should load");

        assert_eq!(config.strava_client_id, "12345");
        assert_eq!(config.strava_access_token, "token");
        assert_eq!(config.strava_refresh_token, None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.strava_api_base_url, "https://www.strava.com/api/v3");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let vars = vec![
            ("strava_client_id", "1"),
            ("Strava_Client_Secret", "2"),
            ("STRAVA_access_TOKEN", "3"),
            ("strava_refresh_token", "4"),
            ("port", "9000"),
            ("Strava_Api_Base_Url", "http://localhost:4000/api/v3/"),
        ];

        let config = Config::from_vars(vars).expect("Config should load");

        assert_eq!(config.strava_client_secret, "2");
        assert_eq!(config.strava_access_token, "3");
        assert_eq!(config.strava_refresh_token.as_deref(), Some("4"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.strava_api_base_url, "http://localhost:4000/api/v3");
    }

    #[test]
    fn test_missing_access_token() {
        let vars = required()
            .into_iter()
            .filter(|(k, _)| *k != "STRAVA_ACCESS_TOKEN");

        let err = Config::from_vars(vars).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STRAVA_ACCESS_TOKEN")));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut vars = required();
        vars.push(("STRAVA_CLIENT_SECRET", "   "));

        let err = Config::from_vars(vars).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STRAVA_CLIENT_SECRET")));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = required();
        vars.push(("PORT", "eighty"));

        let err = Config::from_vars(vars).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT: \"eighty\"");
    }

    #[test]
    fn test_cors_origins_parsed() {
        let mut vars = required();
        vars.push(("CORS_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"));

        let config = Config::from_vars(vars).unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_cors_wildcard_rejected() {
        let mut vars = required();
        vars.push(("CORS_ALLOWED_ORIGINS", "http://localhost:3000,*"));

        let err = Config::from_vars(vars).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGINS",
                ref value,
            } if value == "*"
        ));
    }

    #[test]
    fn test_cors_unparseable_origin_rejected() {
        let mut vars = required();
        vars.push(("CORS_ALLOWED_ORIGINS", "https://ok.example,https://bad\u{7f}.example"));

        let err = Config::from_vars(vars).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGINS",
                ..
            }
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_vars(required()).unwrap();
        let debug = format!("{:?}", config);

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("shh"));
        assert!(!debug.contains("\"token\""));
    }
}
