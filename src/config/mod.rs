// src/config/mod.rs

use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Generation Provider Configuration
    //
    // Presence of the key selects the real Gemini provider; absence selects
    // deterministic echo mode.
    pub gemini_api_key: Option<String>,
}

// Handles values with trailing comments and extra whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        let _ = dotenv::dotenv();

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            host: env_var_or("COLLOQUY_HOST", "0.0.0.0".to_string()),
            port: env_var_or("PORT", 3001),
            database_url: env_var_or("DATABASE_URL", "sqlite:./colloquy.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 10),
            gemini_api_key,
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when no provider credential is configured and the server runs
    /// the deterministic echo fallback.
    pub fn echo_mode(&self) -> bool {
        self.gemini_api_key.is_none()
    }
}
