use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    auth::User,
    entities::{NewRoute, Route, RouteUpdate},
    error::Error,
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self, draft), fields(author_id = %user.id))]
    async fn create_route(&self, user: User, draft: NewRoute) -> Result<Route, Error> {
        let route = Route::new(&user, draft);
        let route = self.save(route).await?;

        tracing::info!(id = %route.id, "created route");

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self, id: &str) -> Result<Option<Route>, Error> {
        Ok(self.store.read(id).await)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_route(&self, id: &str, update: RouteUpdate) -> Result<Option<Route>, Error> {
        self.modify(id, move |route| {
            route.apply(update);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_route(&self, id: &str) -> Result<bool, Error> {
        let existed = self.store.remove(id).await?;

        if existed {
            tracing::info!("deleted route");
        }

        Ok(existed)
    }

    #[tracing::instrument(skip(self))]
    async fn list_routes(&self) -> Result<Vec<Route>, Error> {
        Ok(self.store.list().await)
    }

    #[tracing::instrument(skip(self))]
    async fn list_routes_by_author(&self, author_id: &str) -> Result<Vec<Route>, Error> {
        let routes = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|route| route.author_id == author_id)
            .collect();

        Ok(routes)
    }
}
