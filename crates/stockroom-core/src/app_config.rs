#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the inventory client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// REST root, e.g. `http://localhost:3000/api`. Store routes live under `{api_base_url}/Stores`.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// How long a success popup stays on screen before auto-hiding.
    pub notification_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn notification_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.notification_ms)
    }
}
