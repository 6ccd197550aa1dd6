// src/config.rs

use std::env;
use dotenvy::dotenv;

const DEV_SECRET_KEY: &str = "dev-secret-change-me-0123456789abcdef";

#[derive(Debug, Clone)]
pub struct Config {
    /// Session signing key. Must be at least 32 bytes.
    pub secret_key: String,
    /// Optional: absence runs the app in stats-disabled mode.
    pub database_url: Option<String>,
    pub rust_log: String,
    pub port: u16,
    pub questions_path: String,
    /// Base URL baked into batch-generated QR images.
    pub qr_base_url: String,
    pub qr_output_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let secret_key =
            env::var("SECRET_KEY").unwrap_or_else(|_| DEV_SECRET_KEY.to_string());

        if secret_key.len() < 32 {
            panic!("SECRET_KEY must be at least 32 bytes");
        }

        // Hosting providers sometimes surround the value with quotes.
        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|url| url.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|url| !url.is_empty());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let questions_path =
            env::var("QUESTIONS_PATH").unwrap_or_else(|_| "questions.json".to_string());

        let qr_base_url =
            env::var("QR_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let qr_output_dir =
            env::var("QR_OUTPUT_DIR").unwrap_or_else(|_| "static/qr".to_string());

        Self {
            secret_key,
            database_url,
            rust_log,
            port,
            questions_path,
            qr_base_url,
            qr_output_dir,
        }
    }
}
