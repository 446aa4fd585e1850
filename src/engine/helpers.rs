use super::Engine;

use crate::{
    entities::{sequence, Route},
    error::Error,
};

impl Engine {
    /// Every write passes through here so the order invariant and the field
    /// rules are checked before anything reaches storage.
    #[tracing::instrument(skip(self, route), fields(id = %route.id))]
    pub(super) async fn save(&self, mut route: Route) -> Result<Route, Error> {
        route.landmarks = sequence::normalize(std::mem::take(&mut route.landmarks));

        if let Err(err) = route.validate() {
            tracing::info!("rejecting route: {}", err.message);
            return Err(err);
        }

        self.store.write(&route, None).await?;

        Ok(route)
    }

    /// Loads the route, lets `change` mutate it, and saves the result.
    /// `Ok(None)` when the route does not exist.
    pub(super) async fn modify<F>(&self, id: &str, change: F) -> Result<Option<Route>, Error>
    where
        F: FnOnce(&mut Route) -> Result<(), Error> + Send,
    {
        let mut route = match self.store.read(id).await {
            Some(route) => route,
            None => return Ok(None),
        };

        change(&mut route)?;

        self.save(route).await.map(Some)
    }
}
