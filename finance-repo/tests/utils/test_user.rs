use finance_repo::user_repo::{User, UserRepo};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub username: String,
}

#[allow(dead_code)]
impl TestUser {
    pub fn new(user_repo: &Arc<dyn UserRepo>) -> TestUser {
        let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
        let user = User::new(username.clone(), "not a real hash".to_owned());
        user_repo.create_user(user).unwrap();
        info!(%username, "Created user");
        TestUser { username }
    }
}
