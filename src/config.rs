use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SITE_BASE: &str = "https://www.amazon.com";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings. Built once at startup and handed to the pieces that
/// need them; nothing below `main` reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme + host of the shop, without a trailing slash.
    pub site_base: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub static_dir: PathBuf,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            site_base: DEFAULT_SITE_BASE.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            static_dir: PathBuf::from("static"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok(); // Load .env file if present
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_base = lookup("SITE_BASE_URL")
            .or_else(|| lookup("AMAZON_DOMAIN"))
            .unwrap_or_else(|| DEFAULT_SITE_BASE.to_string());

        Ok(Config {
            site_base: normalize_base(&site_base),
            port: parsed_or_default(&lookup, "PORT", DEFAULT_PORT)?,
            request_timeout: Duration::from_secs(parsed_or_default(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            user_agent: lookup("SCRAPER_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }

    pub fn with_site_base(mut self, site_base: &str) -> Config {
        self.site_base = normalize_base(site_base);
        self
    }
}

pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn parsed_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_strips_trailing_slashes() {
        assert_eq!(normalize_base("https://www.amazon.de/"), "https://www.amazon.de");
        assert_eq!(normalize_base(" https://x.test// "), "https://x.test");
        assert_eq!(normalize_base("https://x.test"), "https://x.test");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.site_base, DEFAULT_SITE_BASE);
        assert_eq!(config.port, 4000);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_empty_source_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.site_base, DEFAULT_SITE_BASE);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_values_read_from_source() {
        let config = Config::from_lookup(lookup_from(&[
            ("SITE_BASE_URL", " https://www.amazon.co.uk/ "),
            ("PORT", "8080"),
            ("REQUEST_TIMEOUT_SECS", " 3 "),
            ("STATIC_DIR", "/srv/client"),
            ("SCRAPER_USER_AGENT", "Mozilla/5.0 test"),
        ]))
        .unwrap();
        assert_eq!(config.site_base, "https://www.amazon.co.uk");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.static_dir, PathBuf::from("/srv/client"));
        assert_eq!(config.user_agent, "Mozilla/5.0 test");
    }

    #[test]
    fn test_legacy_domain_key() {
        let config =
            Config::from_lookup(lookup_from(&[("AMAZON_DOMAIN", "https://www.amazon.de/")]))
                .unwrap();
        assert_eq!(config.site_base, "https://www.amazon.de");
    }

    #[test]
    fn test_site_base_url_wins_over_legacy_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("AMAZON_DOMAIN", "https://www.amazon.de"),
            ("SITE_BASE_URL", "https://www.amazon.fr"),
        ]))
        .unwrap();
        assert_eq!(config.site_base, "https://www.amazon.fr");
    }

    #[test]
    fn test_unparsable_port_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        match err {
            ConfigError::Invalid { key, value } => {
                assert_eq!(key, "PORT");
                assert_eq!(value, "eighty");
            }
        }
    }

    #[test]
    fn test_unparsable_timeout_is_an_error() {
        let err =
            Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REQUEST_TIMEOUT_SECS", .. }));
    }
}
