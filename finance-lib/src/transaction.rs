use crate::error::{TrackerError, ValidationError};
use chrono::NaiveDate;
use finance_repo::transaction_repo::{
    CategoryTotal, NewTransaction, Summary, Transaction, TransactionKind, TransactionRepo,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, instrument};

/// Parses a transaction date in the canonical `YYYY-MM-DD` form.
pub fn parse_date(date: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_owned()))
}

pub fn parse_kind(kind: &str) -> Result<TransactionKind, ValidationError> {
    Ok(TransactionKind::from_str(kind.trim())?)
}

/// Income and expense records, always scoped to one user.
#[derive(Clone)]
pub struct TransactionStore {
    transaction_repo: Arc<dyn TransactionRepo>,
}

impl TransactionStore {
    pub fn new(transaction_repo: Arc<dyn TransactionRepo>) -> TransactionStore {
        TransactionStore { transaction_repo }
    }

    #[instrument(skip(self, category, description))]
    pub fn append(
        &self,
        username: &str,
        kind: TransactionKind,
        category: &str,
        amount: Decimal,
        description: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Transaction, TrackerError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(amount).into());
        }

        let new_transaction = NewTransaction::new(
            kind,
            category.to_owned(),
            amount,
            description.map(str::to_owned),
            date,
        );
        let transaction = self
            .transaction_repo
            .create_new_transaction(username, new_transaction)?;
        Ok(transaction)
    }

    /// Most recent first. Store failures are logged and yield an empty list.
    #[instrument(skip(self))]
    pub fn list(&self, username: &str, limit: Option<usize>) -> Vec<Transaction> {
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));
        match self.transaction_repo.get_all_transactions(username, limit) {
            Ok(transactions) => transactions,
            Err(err) => {
                error!(%err, "Unable to retrieve transactions");
                Vec::new()
            }
        }
    }

    /// Store failures are logged and yield a zero summary.
    #[instrument(skip(self))]
    pub fn summarize(&self, username: &str) -> Summary {
        match self.transaction_repo.get_totals(username) {
            Ok(summary) => summary,
            Err(err) => {
                error!(%err, "Unable to compute summary");
                Summary::zero()
            }
        }
    }

    #[instrument(skip(self))]
    pub fn category_totals(&self, username: &str) -> Vec<CategoryTotal> {
        match self.transaction_repo.get_category_totals(username) {
            Ok(totals) => totals,
            Err(err) => {
                error!(%err, "Unable to compute category totals");
                Vec::new()
            }
        }
    }
}
