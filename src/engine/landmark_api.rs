use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LandmarkAPI,
    entities::{sequence, Direction, Landmark, LandmarkUpdate, Route},
    error::{not_found_error, validation_error, Error},
};

#[async_trait]
impl LandmarkAPI for Engine {
    #[tracing::instrument(skip(self, landmark))]
    async fn append_landmark(&self, route_id: &str, landmark: Landmark) -> Result<Option<Route>, Error> {
        self.modify(route_id, move |route| {
            let landmarks = std::mem::take(&mut route.landmarks);
            route.landmarks = sequence::append(landmarks, landmark);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_landmark(&self, route_id: &str, landmark_id: &str) -> Result<Option<Route>, Error> {
        self.modify(route_id, |route| {
            let landmarks = std::mem::take(&mut route.landmarks);
            route.landmarks = sequence::remove_by_id(landmarks, landmark_id);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self, update))]
    async fn edit_landmark(
        &self,
        route_id: &str,
        landmark_id: &str,
        update: LandmarkUpdate,
    ) -> Result<Option<Route>, Error> {
        self.modify(route_id, move |route| {
            let landmark = route
                .landmarks
                .iter_mut()
                .find(|landmark| landmark.id == landmark_id)
                .ok_or_else(|| not_found_error("landmark"))?;

            landmark.apply(update);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn reorder_landmarks(&self, route_id: &str, landmark_ids: Vec<String>) -> Result<Option<Route>, Error> {
        self.modify(route_id, move |route| {
            let ordering = landmark_ids
                .iter()
                .map(|id| {
                    route
                        .landmarks
                        .iter()
                        .find(|landmark| &landmark.id == id)
                        .cloned()
                        .ok_or_else(|| {
                            validation_error(format!("landmark {} is not part of this route", id))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            route.landmarks = sequence::reorder(&route.landmarks, ordering)?;
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn move_landmark(
        &self,
        route_id: &str,
        index: usize,
        direction: Direction,
    ) -> Result<Option<Route>, Error> {
        self.modify(route_id, move |route| {
            let landmarks = std::mem::take(&mut route.landmarks);
            route.landmarks = sequence::move_adjacent(landmarks, index, direction);
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RouteAPI;
    use crate::auth::User;
    use crate::db::FileStore;
    use crate::entities::NewRoute;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn engine_with_route(count: usize) -> (TempDir, Engine, Route) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();
        let engine = Engine::new(Arc::new(store));

        let draft = NewRoute {
            name: "Walk".into(),
            landmarks: (0..count)
                .map(|i| Landmark::new(format!("L{}", i), "", 0.0, i as f64))
                .collect(),
        };
        let route = engine
            .create_route(User::from_name("carol"), draft)
            .await
            .unwrap();

        (dir, engine, route)
    }

    fn names(route: &Route) -> Vec<&str> {
        route.landmarks.iter().map(|l| l.name.as_str()).collect()
    }

    fn orders(route: &Route) -> Vec<u32> {
        route.landmarks.iter().map(|l| l.order).collect()
    }

    #[tokio::test]
    async fn append_goes_to_the_end() {
        let (_dir, engine, route) = engine_with_route(2).await;

        let updated = engine
            .append_landmark(&route.id, Landmark::new("L2", "new", 1.0, 1.0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(names(&updated), vec!["L0", "L1", "L2"]);
        assert_eq!(orders(&updated), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn remove_renumbers_and_persists() {
        let (_dir, engine, route) = engine_with_route(3).await;
        let first = route.landmarks[0].id.clone();

        engine.remove_landmark(&route.id, &first).await.unwrap();
        let stored = engine.find_route(&route.id).await.unwrap().unwrap();

        assert_eq!(names(&stored), vec!["L1", "L2"]);
        assert_eq!(orders(&stored), vec![0, 1]);
    }

    #[tokio::test]
    async fn remove_below_minimum_is_rejected() {
        let (_dir, engine, route) = engine_with_route(2).await;
        let first = route.landmarks[0].id.clone();

        assert!(engine.remove_landmark(&route.id, &first).await.is_err());
        assert_eq!(engine.find_route(&route.id).await.unwrap(), Some(route));
    }

    #[tokio::test]
    async fn edit_changes_text_only() {
        let (_dir, engine, route) = engine_with_route(2).await;
        let target = route.landmarks[1].id.clone();

        let update = LandmarkUpdate {
            name: None,
            description: Some("Bring water".into()),
        };
        let updated = engine
            .edit_landmark(&route.id, &target, update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.landmarks[1].description, "Bring water");
        assert_eq!(updated.landmarks[1].name, "L1");
        assert_eq!(updated.landmarks[1].order, 1);
    }

    #[tokio::test]
    async fn edit_unknown_landmark_is_not_found() {
        let (_dir, engine, route) = engine_with_route(2).await;

        let err = engine
            .edit_landmark(&route.id, "nope", LandmarkUpdate::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn reorder_by_ids() {
        let (_dir, engine, route) = engine_with_route(3).await;
        let ids: Vec<String> = route.landmarks.iter().rev().map(|l| l.id.clone()).collect();

        let updated = engine
            .reorder_landmarks(&route.id, ids)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(names(&updated), vec!["L2", "L1", "L0"]);
        assert_eq!(orders(&updated), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn reorder_with_foreign_id_is_rejected() {
        let (_dir, engine, route) = engine_with_route(2).await;
        let ids = vec![route.landmarks[0].id.clone(), "stranger".to_string()];

        assert!(engine.reorder_landmarks(&route.id, ids).await.is_err());
    }

    #[tokio::test]
    async fn move_up_and_out_of_range() {
        let (_dir, engine, route) = engine_with_route(3).await;

        let moved = engine
            .move_landmark(&route.id, 2, Direction::Up)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(names(&moved), vec!["L0", "L2", "L1"]);

        let unchanged = engine
            .move_landmark(&route.id, 0, Direction::Up)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(names(&unchanged), vec!["L0", "L2", "L1"]);
    }

    #[tokio::test]
    async fn mutations_on_missing_route_are_none() {
        let (_dir, engine, _route) = engine_with_route(2).await;

        let result = engine
            .append_landmark("missing", Landmark::new("X", "", 0.0, 0.0))
            .await
            .unwrap();

        assert_eq!(result, None);
    }
}
