use anyhow::anyhow;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

pub trait TransactionRepo: Sync + Send {
    fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError>;

    /// Most recent first. Transactions on the same date keep insertion order.
    fn get_all_transactions(
        &self,
        user: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>, TransactionRepoError>;

    fn get_totals(&self, user: &str) -> Result<Summary, TransactionRepoError>;

    fn get_category_totals(&self, user: &str) -> Result<Vec<CategoryTotal>, TransactionRepoError>;
}

#[derive(Error, Debug)]
pub enum TransactionRepoError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Adds `amount` to a running total. Totals that leave the `Decimal` range are an error.
pub fn add_to_total(total: Decimal, amount: Decimal) -> Result<Decimal, TransactionRepoError> {
    total
        .checked_add(amount)
        .ok_or_else(|| anyhow!("Total overflowed while adding {}", amount).into())
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Transaction type must be either 'income' or 'expense', got '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for TransactionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Transaction {
    pub id: i32,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl Transaction {
    pub const fn new(
        id: i32,
        kind: TransactionKind,
        category: String,
        amount: Decimal,
        description: Option<String>,
        date: NaiveDate,
    ) -> Transaction {
        Transaction {
            id,
            kind,
            category,
            amount,
            description,
            date,
        }
    }

    /// Ordering used for listings: later dates first, then lower ids first.
    pub fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
        b.date.cmp(&a.date).then(a.id.cmp(&b.id))
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl NewTransaction {
    pub const fn new(
        kind: TransactionKind,
        category: String,
        amount: Decimal,
        description: Option<String>,
        date: Option<NaiveDate>,
    ) -> NewTransaction {
        NewTransaction {
            kind,
            category,
            amount,
            description,
            date,
        }
    }

    /// The date to store, today's local date when none was given.
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn to_transaction(self, id: i32) -> Transaction {
        let date = self.date_or_today();
        Transaction::new(
            id,
            self.kind,
            self.category,
            self.amount,
            self.description,
            date,
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

impl Summary {
    pub fn new(total_income: Decimal, total_expenses: Decimal) -> Summary {
        Summary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    pub fn zero() -> Summary {
        Summary::new(Decimal::ZERO, Decimal::ZERO)
    }
}

impl Default for Summary {
    fn default() -> Self {
        Summary::zero()
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct CategoryTotal {
    pub kind: TransactionKind,
    pub category: String,
    pub total: Decimal,
}

impl CategoryTotal {
    pub const fn new(kind: TransactionKind, category: String, total: Decimal) -> CategoryTotal {
        CategoryTotal {
            kind,
            category,
            total,
        }
    }
}
