use log::LevelFilter;
use shared::WeekStart;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TOAST_MS: u32 = 3000;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Build-time configuration, read from `BOOKING_*` environment variables
/// when the bundle is compiled
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: LevelFilter,
    pub toast_duration_ms: u32,
    pub history_page_size: u32,
    pub week_start: WeekStart,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_level: LevelFilter::Info,
            toast_duration_ms: DEFAULT_TOAST_MS,
            history_page_size: DEFAULT_PAGE_SIZE,
            week_start: WeekStart::Monday,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_values(
            option_env!("BOOKING_API_URL"),
            option_env!("BOOKING_LOG_LEVEL"),
            option_env!("BOOKING_TOAST_MS"),
            option_env!("BOOKING_PAGE_SIZE"),
            option_env!("BOOKING_WEEK_START"),
        )
    }

    /// Invalid values fall back to the defaults with a warning
    pub fn from_values(
        api_url: Option<&str>,
        log_level: Option<&str>,
        toast_ms: Option<&str>,
        page_size: Option<&str>,
        week_start: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let api_base_url = api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        Self {
            api_base_url,
            log_level: parse_or(log_level, "BOOKING_LOG_LEVEL", defaults.log_level),
            toast_duration_ms: parse_or(toast_ms, "BOOKING_TOAST_MS", defaults.toast_duration_ms),
            history_page_size: parse_or(page_size, "BOOKING_PAGE_SIZE", defaults.history_page_size)
                .max(1),
            week_start: parse_or(week_start, "BOOKING_WEEK_START", defaults.week_start),
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, name: &str, default: T) -> T {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("ignoring invalid {}={:?}", name, raw);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.toast_duration_ms, 3000);
        assert_eq!(config.history_page_size, 10);
        assert_eq!(config.week_start, WeekStart::Monday);
    }

    #[test]
    fn test_values_override_defaults() {
        let config = AppConfig::from_values(
            Some("https://booking.example.com/"),
            Some("debug"),
            Some("5000"),
            Some("25"),
            Some("sunday"),
        );
        assert_eq!(config.api_base_url, "https://booking.example.com");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.toast_duration_ms, 5000);
        assert_eq!(config.history_page_size, 25);
        assert_eq!(config.week_start, WeekStart::Sunday);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_values(None, Some("loud"), Some("soon"), Some("0"), None);
        assert_eq!(config, AppConfig {
            history_page_size: 1,
            ..AppConfig::default()
        });
    }
}
