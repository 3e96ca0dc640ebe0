// src/config.rs
use std::net::SocketAddr;
use std::path::PathBuf;

/// Used when `ONE_MISSION_BASE_URL` is unset or blank.
pub const DEFAULT_HUB_URL: &str = "https://one-mission.vercel.app";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub page_cache_capacity: u64,
    pub enable_hsts: bool,
    /// Normalized mission hub base URL.
    pub hub_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self {
            host: std::env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("PORT: {}", e))?,
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string())
                .into(),
            page_cache_capacity: std::env::var("PAGE_CACHE_CAPACITY")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .map_err(|e| format!("PAGE_CACHE_CAPACITY: {}", e))?,
            enable_hsts: std::env::var("ENABLE_HSTS").unwrap_or_default() == "true",
            hub_base_url: normalize_base_url(
                &std::env::var("ONE_MISSION_BASE_URL").unwrap_or_default(),
            ),
        })
    }

    pub fn server_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("static"),
            page_cache_capacity: 256,
            enable_hsts: false,
            hub_base_url: DEFAULT_HUB_URL.to_string(),
        }
    }
}

/// Trim, drop one trailing slash, fall back when empty, and assume https
/// when no scheme is given. An explicit `http://` is kept as is.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let s = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if s.is_empty() {
        return DEFAULT_HUB_URL.to_string();
    }
    if s.starts_with("http://") || s.starts_with("https://") {
        return s.to_string();
    }
    format!("https://{}", s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), DEFAULT_HUB_URL);
        assert_eq!(normalize_base_url("   "), DEFAULT_HUB_URL);
        assert_eq!(normalize_base_url("/"), DEFAULT_HUB_URL);
        assert_eq!(normalize_base_url("example.com/"), "https://example.com");
        assert_eq!(normalize_base_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_base_url(" https://example.com/ "), "https://example.com");
        // Only one trailing slash is removed.
        assert_eq!(normalize_base_url("https://example.com//"), "https://example.com/");
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr().unwrap().port(), 3000);

        let bad = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert!(bad.server_addr().is_err());
    }
}
