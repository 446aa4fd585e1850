use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::entities::Route;
use crate::error::{storage_error, Error};

const RECORD_EXTENSION: &str = "json";

/// Durable storage for routes keyed by id.
///
/// Reads swallow storage failures after logging them: a missing or unreadable
/// record is `None`, an unreadable listing is empty and a corrupt record is
/// skipped. Writes report failures so that data is never dropped silently.
#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn read(&self, id: &str) -> Option<Route>;

    /// Stores `route` under its id, replacing any previous record.
    /// `expected_version` is reserved for compare-and-swap stores; stores
    /// without versioning ignore it and the last write wins.
    async fn write(&self, route: &Route, expected_version: Option<u64>) -> Result<(), Error>;

    /// Returns whether a record existed.
    async fn remove(&self, id: &str) -> Result<bool, Error>;

    async fn list(&self) -> Vec<Route>;
}

/// One pretty-printed JSON file per route, named `<id>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[tracing::instrument(name = "FileStore::new", skip_all)]
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `None` when the id could not be a record name, which callers treat the
    /// same as an absent record.
    fn record_path(&self, id: &str) -> Option<PathBuf> {
        let id = id.trim();

        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return None;
        }

        Some(self.dir.join(format!("{}.{}", id, RECORD_EXTENSION)))
    }

    async fn read_record(path: &Path) -> Result<Route, Error> {
        let content = fs::read(path).await?;
        let route = serde_json::from_slice(&content)?;

        Ok(route)
    }
}

#[async_trait]
impl RouteStore for FileStore {
    #[tracing::instrument(skip(self))]
    async fn read(&self, id: &str) -> Option<Route> {
        let path = match self.record_path(id) {
            Some(path) => path,
            None => {
                tracing::warn!("rejecting malformed route id");
                return None;
            }
        };

        match fs::read(&path).await {
            Ok(content) => match serde_json::from_slice(&content) {
                Ok(route) => Some(route),
                Err(err) => {
                    tracing::error!(path = %path.display(), "malformed route record: {}", err);
                    None
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("route not found");
                None
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "failed to read route: {}", err);
                None
            }
        }
    }

    #[tracing::instrument(skip(self, route), fields(id = %route.id))]
    async fn write(&self, route: &Route, expected_version: Option<u64>) -> Result<(), Error> {
        if let Some(version) = expected_version {
            tracing::debug!(version, "versioned writes are not supported, last write wins");
        }

        let path = self
            .record_path(&route.id)
            .ok_or_else(|| storage_error(format!("unusable route id {:?}", route.id)))?;

        let content = serde_json::to_vec_pretty(route)?;

        // write aside and rename so a reader never sees a half-written record
        let staging = self.dir.join(format!(".{}.{}.tmp", route.id, Uuid::new_v4()));

        if let Err(err) = fs::write(&staging, &content).await {
            tracing::error!(path = %staging.display(), "failed to write route: {}", err);
            return Err(err.into());
        }

        if let Err(err) = fs::rename(&staging, &path).await {
            tracing::error!(path = %path.display(), "failed to move route into place: {}", err);
            let _ = fs::remove_file(&staging).await;
            return Err(err.into());
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: &str) -> Result<bool, Error> {
        let path = match self.record_path(id) {
            Some(path) => path,
            None => return Ok(false),
        };

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => {
                tracing::error!(path = %path.display(), "failed to delete route: {}", err);
                Err(err.into())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Vec<Route> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(dir = %self.dir.display(), "failed to list routes: {}", err);
                return Vec::new();
            }
        };

        let mut routes = Vec::new();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(dir = %self.dir.display(), "failed to list routes: {}", err);
                    break;
                }
            };

            let path = entry.path();
            let is_record = path
                .extension()
                .map_or(false, |extension| extension == RECORD_EXTENSION);

            if !is_record {
                continue;
            }

            match Self::read_record(&path).await {
                Ok(route) => routes.push(route),
                Err(err) => {
                    tracing::error!(path = %path.display(), "skipping unreadable route: {}", err);
                }
            }
        }

        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;
    use crate::entities::{Landmark, NewRoute};
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    fn route(name: &str) -> Route {
        Route::new(
            &User::from_name("alice"),
            NewRoute {
                name: name.into(),
                landmarks: vec![
                    Landmark::new("Start", "", 1.0, 1.0),
                    Landmark::new("End", "", 2.0, 2.0),
                ],
            },
        )
    }

    async fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("routes")).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn write_then_read() {
        let (_dir, store) = store().await;
        let route = route("Tour");

        assert_ok!(store.write(&route, None).await);

        assert_eq!(store.read(&route.id).await, Some(route.clone()));
        // ids are trimmed before lookup
        assert_eq!(store.read(&format!("  {} ", route.id)).await, Some(route));
    }

    #[tokio::test]
    async fn write_overwrites_same_id() {
        let (_dir, store) = store().await;
        let mut route = route("Tour");
        store.write(&route, None).await.unwrap();

        route.name = "Second".into();
        store.write(&route, Some(7)).await.unwrap();

        assert_eq!(store.list().await.len(), 1);
        assert_eq!(store.read(&route.id).await.unwrap().name, "Second");
    }

    #[tokio::test]
    async fn missing_and_malformed_ids_read_as_none() {
        let (_dir, store) = store().await;

        assert_eq!(store.read("nonexistent-id").await, None);
        assert_eq!(store.read("../etc/passwd").await, None);
        assert_eq!(store.read("").await, None);
    }

    #[tokio::test]
    async fn remove_reports_existence() {
        let (_dir, store) = store().await;
        let route = route("Tour");
        store.write(&route, None).await.unwrap();

        assert_eq!(store.remove(&route.id).await, Ok(true));
        assert_eq!(store.remove(&route.id).await, Ok(false));
        assert_eq!(store.read(&route.id).await, None);
    }

    #[tokio::test]
    async fn list_skips_corrupt_and_foreign_files() {
        let (_dir, store) = store().await;
        let first = route("First");
        let second = route("Second");
        store.write(&first, None).await.unwrap();
        store.write(&second, None).await.unwrap();

        std::fs::write(store.dir().join("broken.json"), "{ not json").unwrap();
        std::fs::write(store.dir().join("notes.txt"), "hello").unwrap();

        let mut names: Vec<String> = store.list().await.into_iter().map(|r| r.name).collect();
        names.sort();

        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(store.read("broken").await, None);
    }

    #[tokio::test]
    async fn list_of_missing_directory_is_empty() {
        let (dir, store) = store().await;
        std::fs::remove_dir_all(dir.path().join("routes")).unwrap();

        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let (dir, store) = store().await;
        std::fs::remove_dir_all(dir.path().join("routes")).unwrap();

        let err = assert_err!(store.write(&route("Tour"), None).await);
        assert!(err.is_internal());
    }
}
