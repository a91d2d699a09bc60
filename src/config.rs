//! Runtime configuration assembled from the command line.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// API base URL, normalized to end with `/`.
    pub base_url: String,
    pub initial_page: u32,
    /// Open the detail screen for this identifier on start.
    pub initial_id: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            initial_page: 1,
            initial_id: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn new(
        base_url: &str,
        initial_page: u32,
        initial_id: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            initial_page: initial_page.max(1),
            initial_id: initial_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            log_file,
        }
    }
}

/// Trim whitespace and make sure the URL ends with exactly one `/`.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }
    format!("{trimmed}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/api/v2"),
            "http://localhost:8000/api/v2/"
        );
        assert_eq!(normalize_base_url(DEFAULT_BASE_URL), DEFAULT_BASE_URL);
        assert_eq!(normalize_base_url("  "), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_clamps_page_and_drops_blank_id() {
        let config = Config::new("https://pokeapi.co/api/v2", 0, Some("  ".into()), None);
        assert_eq!(config.initial_page, 1);
        assert_eq!(config.initial_id, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
