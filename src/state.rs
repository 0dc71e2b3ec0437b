use std::sync::Arc;

use crate::{
    auth::{
        policy::{AdminPolicy, SingleAdmin},
        repo::UserRepo,
    },
    blog::repo::BlogRepo,
    config::AppConfig,
    db::PgStore,
    portfolio::repo::PortfolioRepo,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub portfolio: Arc<dyn PortfolioRepo>,
    pub blog: Arc<dyn BlogRepo>,
    pub admin: Arc<dyn AdminPolicy>,
}

impl AppState {
    /// Connects to Postgres and brings the schema up to date.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = Arc::new(PgStore::connect(&config.database_url).await?);
        store.migrate().await?;
        Ok(Self::from_store(config, store))
    }

    pub fn from_store<S>(config: AppConfig, store: Arc<S>) -> Self
    where
        S: UserRepo + PortfolioRepo + BlogRepo + 'static,
    {
        let admin = Arc::new(SingleAdmin::new(&config.admin_email)) as Arc<dyn AdminPolicy>;
        Self {
            config: Arc::new(config),
            users: store.clone(),
            portfolio: store.clone(),
            blog: store,
            admin,
        }
    }
}
