use super::Engine;

use crate::{
    api::UserAPI,
    auth::User,
    error::{validation_error, Error},
};

impl UserAPI for Engine {
    #[tracing::instrument(skip(self))]
    fn register_user(&self, name: &str) -> Result<User, Error> {
        if name.trim().is_empty() {
            return Err(validation_error("username must not be empty"));
        }

        Ok(self.users.resolve(name))
    }
}
