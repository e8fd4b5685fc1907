pub mod generator;
pub mod test_user;

use finance_repo::transaction_repo::TransactionRepo;
use finance_repo::user_repo::UserRepo;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug)]
pub enum RepoType {
    Diesel,
    Mem,
}

pub struct Repos {
    pub user_repo: Arc<dyn UserRepo>,
    pub transaction_repo: Arc<dyn TransactionRepo>,
    // keeps the sqlite file alive for the duration of the test
    _db_dir: Option<TempDir>,
}

pub fn build_repos(repo_type: RepoType) -> Repos {
    match repo_type {
        RepoType::Diesel => {
            let db_dir = tempfile::tempdir().unwrap();
            let (user_repo, transaction_repo) =
                finance_repo::diesel_repo::create_repos(&db_dir.path().join("finance.db"), 2)
                    .unwrap();
            Repos {
                user_repo,
                transaction_repo,
                _db_dir: Some(db_dir),
            }
        }
        RepoType::Mem => {
            let (user_repo, transaction_repo) = finance_repo::mem_repo::create_repos();
            Repos {
                user_repo,
                transaction_repo,
                _db_dir: None,
            }
        }
    }
}
