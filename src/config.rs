use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Simulated upload latency before an accepted batch is appended.
    pub upload_delay: Duration,
    pub template_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            upload_delay: Duration::from_millis(700),
            template_dir: PathBuf::from("templates"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = var("HOST").unwrap_or(defaults.host);
        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let upload_delay = var("UPLOAD_DELAY_MS")
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.upload_delay);

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let template_dir = base_dir.join(
            var("TEMPLATE_DIR").unwrap_or_else(|| "templates".to_string()),
        );

        Self {
            host,
            port,
            upload_delay,
            template_dir,
        }
    }
}
