use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};

use crate::{errors::Result, utils::mailer::Mailer};

#[derive(Debug, Clone)]
pub struct AppState {
    pub sdb: Surreal<Any>,
    pub mailer: Mailer,
    pub app_url: String,
}

impl AppState {
    pub async fn init() -> Result<Self> {
        let endpoint =
            std::env::var("SDB_ENDPOINT").unwrap_or_else(|_| "ws://localhost:8050".to_string());
        Self::connect(&endpoint).await
    }

    /// Tests connect to `mem://`; production to a ws/http endpoint with root auth.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let sdb = any::connect(endpoint).await?;

        if !endpoint.starts_with("mem") {
            let username = std::env::var("SDB_USER").unwrap_or_else(|_| "root".to_string());
            let password = std::env::var("SDB_PASS").unwrap_or_else(|_| "secret".to_string());
            sdb.signin(Root {
                username: &username,
                password: &password,
            })
            .await?;
        }

        let ns = std::env::var("SDB_NS").unwrap_or_else(|_| "attendance".to_string());
        let db = std::env::var("SDB_DB").unwrap_or_else(|_| "attendance".to_string());
        sdb.use_ns(ns).use_db(db).await?;

        let app_url =
            std::env::var("APP_URL").unwrap_or_else(|_| "https://example.app".to_string());

        Ok(Self {
            sdb,
            mailer: Mailer::from_env(),
            app_url,
        })
    }
}
