mod directory;
mod user;

pub use directory::UserDirectory;
pub use user::{derive_author_id, normalize_name, User};
