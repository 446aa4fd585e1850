use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The caller on whose behalf an operation runs. There are no accounts: the
/// id is derived from the display name, so the same name always maps to the
/// same author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "username")]
    pub name: String,
    #[serde(rename = "userId")]
    pub id: String,
}

impl User {
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            id: derive_author_id(name),
        }
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// SHA-256 of the normalized name, first 32 hex digits laid out as 8-4-4-4-12.
pub fn derive_author_id(name: &str) -> String {
    let digest = Sha256::digest(normalize_name(name).as_bytes());
    let hex = hex::encode(digest);

    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
