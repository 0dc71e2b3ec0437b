use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin is accepted.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn parse(raw: Option<&str>) -> Self {
        let allowed_origins = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { allowed_origins }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub admin_email: String,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let admin_email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?;
        let cors = CorsConfig::parse(std::env::var("CORS_ALLOWED_ORIGINS").ok().as_deref());
        Ok(Self {
            database_url,
            admin_email: admin_email.trim().to_lowercase(),
            cors,
        })
    }

    /// Config for running against [`crate::memory::MemoryStore`]; no database is touched.
    pub fn local(admin_email: &str) -> Self {
        Self {
            database_url: String::new(),
            admin_email: admin_email.trim().to_lowercase(),
            cors: CorsConfig::parse(None),
        }
    }
}
