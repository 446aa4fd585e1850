mod helpers;
mod landmark_api;
mod route_api;
mod user_api;

use std::sync::Arc;

use crate::{
    api::API,
    auth::UserDirectory,
    config::Config,
    db::{FileStore, RouteStore},
    error::Error,
};

pub struct Engine {
    store: Arc<dyn RouteStore>,
    users: UserDirectory,
}

impl Engine {
    pub fn new(store: Arc<dyn RouteStore>) -> Self {
        Self {
            store,
            users: UserDirectory::new(),
        }
    }

    #[tracing::instrument(name = "Engine::open", skip_all)]
    pub async fn open(config: &Config) -> Result<Self, Error> {
        let store = FileStore::new(&config.data_dir).await?;
        tracing::info!("storing routes in {}", store.dir().display());

        Ok(Self::new(Arc::new(store)))
    }
}

impl API for Engine {}
