use finance_lib::Tracker;
use finance_repo::user_repo::UserRepo;
use rstest::*;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

#[derive(Debug)]
pub enum RepoType {
    Diesel,
    Mem,
}

pub struct TestTracker {
    pub tracker: Tracker,
    pub user_repo: Arc<dyn UserRepo>,
    _db_dir: Option<TempDir>,
}

impl TestTracker {
    pub fn new(repo_type: RepoType) -> TestTracker {
        let (user_repo, transaction_repo, db_dir) = match repo_type {
            RepoType::Diesel => {
                let db_dir = tempfile::tempdir().unwrap();
                let (user_repo, transaction_repo) =
                    finance_repo::diesel_repo::create_repos(&db_dir.path().join("finance.db"), 2)
                        .unwrap();
                (user_repo, transaction_repo, Some(db_dir))
            }
            RepoType::Mem => {
                let (user_repo, transaction_repo) = finance_repo::mem_repo::create_repos();
                (user_repo, transaction_repo, None)
            }
        };
        TestTracker {
            tracker: Tracker::new(user_repo.clone(), transaction_repo),
            user_repo,
            _db_dir: db_dir,
        }
    }
}

pub fn unique_username() -> String {
    "test-user-".to_owned() + &Uuid::new_v4().to_string()
}

#[allow(dead_code)]
pub fn registered_session(test_tracker: &TestTracker) -> finance_lib::Session {
    let username = unique_username();
    test_tracker.tracker.register(&username, "pass").unwrap();
    info!(%username, "Registered user");
    test_tracker.tracker.login(&username, "pass").unwrap()
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}
