use finance_repo::transaction_repo::{ParseKindError, TransactionRepoError};
use finance_repo::user_repo::UserRepoError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Transaction amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),
    #[error(transparent)]
    UnknownKind(#[from] ParseKindError),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Username {0} already exists")]
    AlreadyExists(String),
    // unknown users and wrong passwords are reported the same way
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<UserRepoError> for TrackerError {
    fn from(e: UserRepoError) -> Self {
        match e {
            UserRepoError::UserAlreadyExists(username) => TrackerError::AlreadyExists(username),
            UserRepoError::UserNotFound(_) => TrackerError::InvalidCredentials,
            UserRepoError::Other(e) => TrackerError::Store(e),
        }
    }
}

impl From<TransactionRepoError> for TrackerError {
    fn from(e: TransactionRepoError) -> Self {
        match e {
            TransactionRepoError::Other(e) => TrackerError::Store(e),
        }
    }
}

impl From<argon2::Error> for TrackerError {
    fn from(e: argon2::Error) -> Self {
        TrackerError::Store(anyhow::Error::new(e).context("Unable to hash password"))
    }
}
