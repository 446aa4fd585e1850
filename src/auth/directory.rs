use std::collections::HashMap;
use std::sync::Mutex;

use crate::auth::user::{derive_author_id, normalize_name, User};

/// Remembers which author id a normalized name resolved to. Losing an entry
/// costs nothing: `derive_author_id` regenerates it.
#[derive(Debug, Default)]
pub struct UserDirectory {
    known: Mutex<HashMap<String, String>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, name: &str) -> User {
        let normalized = normalize_name(name);

        let id = match self.known.lock() {
            Ok(mut known) => known
                .entry(normalized)
                .or_insert_with_key(|key| derive_author_id(key))
                .clone(),
            Err(_) => {
                tracing::warn!("user directory lock poisoned, deriving id directly");
                derive_author_id(&normalized)
            }
        };

        User {
            name: name.trim().to_string(),
            id,
        }
    }

    #[cfg(test)]
    pub(crate) fn lookup(&self, name: &str) -> Option<String> {
        let known = self.known.lock().ok()?;
        known.get(&normalize_name(name)).cloned()
    }
}
