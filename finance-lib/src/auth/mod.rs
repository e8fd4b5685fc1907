pub mod password;

use crate::error::TrackerError;
use finance_repo::user_repo::{User, UserRepo, UserRepoError};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Registers users and checks their passwords against the stored hashes.
#[derive(Clone)]
pub struct CredentialStore {
    user_repo: Arc<dyn UserRepo>,
}

impl CredentialStore {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> CredentialStore {
        CredentialStore { user_repo }
    }

    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<(), TrackerError> {
        let password_hash = password::encode_password(password)?;

        self.user_repo
            .create_user(User::new(username.to_owned(), password_hash))?;
        info!("User registered");
        Ok(())
    }

    /// Returns `false` for unknown users as well as wrong passwords. Only store failures are
    /// errors.
    #[instrument(skip(self, password))]
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, TrackerError> {
        let user = match self.user_repo.get_user(username) {
            Ok(user) => user,
            Err(UserRepoError::UserNotFound(_)) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        match password::verify_password(password, &user.password_hash) {
            Ok(matched) => Ok(matched),
            Err(err) => {
                warn!(%err, "Stored password hash could not be read");
                Ok(false)
            }
        }
    }
}
