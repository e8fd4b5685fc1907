use crate::auth::CredentialStore;
use crate::error::TrackerError;
use crate::transaction::TransactionStore;
use chrono::NaiveDate;
use finance_repo::transaction_repo::{
    CategoryTotal, Summary, Transaction, TransactionKind, TransactionRepo,
};
use finance_repo::user_repo::UserRepo;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Entry point for front-ends: registration, login, and the sessions they hand out.
#[derive(Clone)]
pub struct Tracker {
    credentials: CredentialStore,
    transactions: TransactionStore,
}

impl Tracker {
    pub fn new(user_repo: Arc<dyn UserRepo>, transaction_repo: Arc<dyn TransactionRepo>) -> Tracker {
        Tracker {
            credentials: CredentialStore::new(user_repo),
            transactions: TransactionStore::new(transaction_repo),
        }
    }

    pub fn register(&self, username: &str, password: &str) -> Result<(), TrackerError> {
        self.credentials.register(username, password)
    }

    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<Session, TrackerError> {
        if !self.credentials.verify(username, password)? {
            warn!("Login failed");
            return Err(TrackerError::InvalidCredentials);
        }

        info!("Logged in");
        Ok(Session {
            username: username.to_owned(),
            transactions: self.transactions.clone(),
        })
    }
}

/// An authenticated user. Every operation is scoped to that user's transactions.
#[derive(Clone)]
pub struct Session {
    username: String,
    transactions: TransactionStore,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn add_transaction(
        &self,
        kind: TransactionKind,
        category: &str,
        amount: Decimal,
        description: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Transaction, TrackerError> {
        self.transactions
            .append(&self.username, kind, category, amount, description, date)
    }

    pub fn transactions(&self, limit: Option<usize>) -> Vec<Transaction> {
        self.transactions.list(&self.username, limit)
    }

    pub fn summary(&self) -> Summary {
        self.transactions.summarize(&self.username)
    }

    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        self.transactions.category_totals(&self.username)
    }
}
