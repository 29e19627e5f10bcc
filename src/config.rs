use std::env;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_ADMIN_PASSWORD: &str = "dev_admin_password";
const MIN_ADMIN_PASSWORD_LEN: usize = 12;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub admin_password: SecretString,
    pub cors_allowed_origins: Vec<String>,
    pub enforce_single_attempt: bool,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quiz-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            admin_password: SecretString::from(
                env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            ),
            cors_allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5173,http://localhost:5174".to_string()),
            ),
            enforce_single_attempt: env::var("ENFORCE_SINGLE_ATTEMPT")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configurations that would run production with development secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let admin_password = self.admin_password.expose_secret();

        if admin_password == DEFAULT_ADMIN_PASSWORD {
            return Err(AppError::InternalError(
                "ADMIN_PASSWORD is using the default value".to_string(),
            ));
        }

        if admin_password.len() < MIN_ADMIN_PASSWORD_LEN {
            return Err(AppError::InternalError(format!(
                "ADMIN_PASSWORD is too short ({}); at least {} characters required",
                admin_password.len(),
                MIN_ADMIN_PASSWORD_LEN
            )));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            admin_password: SecretString::from("test_admin_password".to_string()),
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            enforce_single_attempt: false,
            app_env: "test".to_string(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
