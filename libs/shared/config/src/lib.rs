use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| {
                    warn!("MONGODB_URI not set, using local default");
                    "mongodb://localhost:27017".to_string()
                }),
            database_name: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| {
                    warn!("MONGODB_DATABASE not set, using default");
                    "curoo".to_string()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set or invalid, using default");
                    8000
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.mongodb_uri.is_empty() && !self.database_name.is_empty()
    }
}
