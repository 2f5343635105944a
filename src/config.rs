use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with TMDB poster and profile paths
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Recommendation backend base URL (similarity, render, toggle, chat, beacon)
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Optional file with one autocomplete suggestion per line
    #[serde(default)]
    pub suggestions_path: Option<String>,

    /// Upper bound on in-flight person/poster lookups per enrichment run
    #[serde(default = "default_lookup_concurrency")]
    pub lookup_concurrency: usize,

    /// Seconds a browser session may stay idle before its state is dropped
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_lookup_concurrency() -> usize {
    8
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.lookup_concurrency == 0 {
            anyhow::bail!("LOOKUP_CONCURRENCY must be at least 1");
        }

        Ok(config)
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
