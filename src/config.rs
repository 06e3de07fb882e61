use std::time::Duration;
use clap::Parser;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long)]
    pub google_maps_api_key: String,

    /// Comma separated list of origins allowed through CORS
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    #[clap(env, long, default_value_t = 8080)]
    pub port: u16,

    #[clap(env, long, default_value = "https://maps.googleapis.com/maps/api/place")]
    pub places_base_url: String,

    #[clap(env, long, default_value = "dog park")]
    pub search_keyword: String,

    #[clap(env, long, default_value_t = 500)]
    pub debounce_ms: u64,

    /// Wait between continuation page requests, clamped to 1-2s
    #[clap(env, long, default_value_t = 1000)]
    pub page_delay_ms: u64,

    #[clap(env, long, default_value_t = 30)]
    pub page_size: usize,
}

impl Config {
    pub fn allowed_origins(&self) -> Vec<String> {
        self.origin_urls
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms.clamp(1000, 2000))
    }
}
