//! Environment configuration

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub admin_username: String,
    pub admin_password: String,
    /// Store WhatsApp number in international format without '+', as wa.me
    /// expects it.
    pub whatsapp_number: String,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    /// The mock auth backend sleeps this long per call to imitate a real
    /// round trip. Zero in tests.
    pub auth_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080),
            data_dir: env::var("DATA_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("data")),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".to_string()),
            whatsapp_number: env::var("WHATSAPP_NUMBER").unwrap_or_else(|_| "60123925913".to_string()),
            bank_name: env::var("BANK_NAME").unwrap_or_else(|_| "Maybank".to_string()),
            bank_account_name: env::var("BANK_ACCOUNT_NAME")
                .unwrap_or_else(|_| "Fruitbasket Malaysia".to_string()),
            bank_account_number: env::var("BANK_ACCOUNT_NUMBER")
                .unwrap_or_else(|_| "512345678901".to_string()),
            auth_delay_ms: env::var("AUTH_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(1000),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with no simulated latency, pointed at a throwaway data dir.
    pub fn for_tests(data_dir: PathBuf) -> Self {
        Self {
            port: 0,
            data_dir,
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
            whatsapp_number: "60123925913".to_string(),
            bank_name: "Maybank".to_string(),
            bank_account_name: "Fruitbasket Malaysia".to_string(),
            bank_account_number: "512345678901".to_string(),
            auth_delay_ms: 0,
        }
    }
}
