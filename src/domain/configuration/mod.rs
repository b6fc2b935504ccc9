pub mod app_config;
pub mod loader;

pub use app_config::{AppConfig, MarketConfig, MarketProvider};
pub use loader::{API_KEYS_ENV, BASE_URL_ENV, DEFAULT_CONFIG_FILE, load_config, parse_config_content};
