use crate::user_repo::{User, UserRepo, UserRepoError};
use anyhow::anyhow;
use std::collections::HashMap;
use std::sync::RwLock;

/// Users keyed by username.
#[derive(Default)]
pub struct MemUserRepo {
    users: RwLock<HashMap<String, User>>,
}

impl MemUserRepo {
    pub fn new() -> MemUserRepo {
        MemUserRepo::default()
    }
}

impl UserRepo for MemUserRepo {
    fn get_user(&self, username: &str) -> Result<User, UserRepoError> {
        let users = self
            .users
            .read()
            .map_err(|_| anyhow!("Unable to read users"))?;

        let user = users.get(username).cloned();
        user.ok_or_else(|| UserRepoError::UserNotFound(username.to_owned()))
    }

    fn create_user(&self, user: User) -> Result<(), UserRepoError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| anyhow!("Unable to update users"))?;

        if users.contains_key(&user.username) {
            return Err(UserRepoError::UserAlreadyExists(user.username));
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }
}
