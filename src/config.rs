use crate::pagination::DEFAULT_PER_PAGE;
use dotenv::dotenv;
use std::env;

/// Runtime settings handed to the handlers as app data.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Absolute base for links embedded in emails.
    pub base_url: String,
    pub posts_per_page: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv().ok();
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8088".to_owned());
        let posts_per_page = env::var("POSTS_PER_PAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PER_PAGE);
        Self {
            base_url,
            posts_per_page,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8088".to_owned(),
            posts_per_page: DEFAULT_PER_PAGE,
        }
    }
}
