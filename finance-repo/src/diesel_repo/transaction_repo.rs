use super::schema::transactions;
use super::{get_connection, DbConnection, DbPool};
use crate::transaction_repo::{
    add_to_total, CategoryTotal, NewTransaction, Summary, Transaction, TransactionKind,
    TransactionRepo, TransactionRepoError,
};
use anyhow::Context;
use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::instrument;

#[derive(Queryable, Identifiable)]
#[diesel(table_name = transactions)]
struct TransactionEntry {
    id: i32,
    #[allow(dead_code)]
    username: String,
    kind: String,
    category: String,
    amount: String,
    description: Option<String>,
    date: NaiveDate,
}

impl TryFrom<TransactionEntry> for Transaction {
    type Error = anyhow::Error;

    fn try_from(value: TransactionEntry) -> Result<Self, Self::Error> {
        let kind = parse_kind(&value.kind)?;
        let amount = parse_amount(&value.amount)?;
        Ok(Transaction::new(
            value.id,
            kind,
            value.category,
            amount,
            value.description,
            value.date,
        ))
    }
}

#[derive(Insertable)]
#[diesel(table_name = transactions)]
struct NewTransactionEntry {
    username: String,
    kind: String,
    category: String,
    amount: String,
    description: Option<String>,
    date: NaiveDate,
}

impl NewTransactionEntry {
    fn from_new_transaction(new_transaction: NewTransaction, username: String) -> Self {
        NewTransactionEntry {
            username,
            kind: new_transaction.kind.as_str().to_owned(),
            date: new_transaction.date_or_today(),
            category: new_transaction.category,
            amount: new_transaction.amount.to_string(),
            description: new_transaction.description,
        }
    }
}

fn parse_kind(kind: &str) -> Result<TransactionKind, anyhow::Error> {
    kind.parse()
        .with_context(|| format!("Invalid transaction type stored in database: {}", kind))
}

fn parse_amount(amount: &str) -> Result<Decimal, anyhow::Error> {
    amount
        .parse()
        .with_context(|| format!("Invalid amount stored in database: {}", amount))
}

pub struct DieselTransactionRepo {
    db_pool: DbPool,
}

impl DieselTransactionRepo {
    pub fn new(db_pool: DbPool) -> DieselTransactionRepo {
        DieselTransactionRepo { db_pool }
    }

    /// Runs `f` on a pooled connection, which is released once `f` returns.
    fn run<F, R>(&self, f: F) -> Result<R, TransactionRepoError>
    where
        F: FnOnce(&mut DbConnection) -> Result<R, TransactionRepoError>,
    {
        let mut db_conn = get_connection(&self.db_pool)?;
        f(&mut db_conn)
    }
}

impl TransactionRepo for DieselTransactionRepo {
    #[instrument(skip(self, new_transaction))]
    fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let new_transaction_entry =
            NewTransactionEntry::from_new_transaction(new_transaction, user.to_owned());

        self.run(|db_conn| {
            let transaction_entry: TransactionEntry = diesel::insert_into(transactions::table)
                .values(new_transaction_entry)
                .get_result(db_conn)
                .context("Unable to insert transaction")?;
            Ok(Transaction::try_from(transaction_entry)?)
        })
    }

    #[instrument(skip(self))]
    fn get_all_transactions(
        &self,
        user: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        self.run(|db_conn| {
            let mut query = transactions::table
                .filter(transactions::username.eq(user))
                .order((transactions::date.desc(), transactions::id.asc()))
                .into_boxed();
            if let Some(limit) = limit {
                query = query.limit(limit)
            }

            let transactions_list = query
                .load::<TransactionEntry>(db_conn)
                .with_context(|| format!("Unable to retrieve transactions for user {}", user))?
                .into_iter()
                .map(Transaction::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(transactions_list)
        })
    }

    #[instrument(skip(self))]
    fn get_totals(&self, user: &str) -> Result<Summary, TransactionRepoError> {
        self.run(|db_conn| {
            let amounts: Vec<(String, String)> = transactions::table
                .filter(transactions::username.eq(user))
                .select((transactions::kind, transactions::amount))
                .load(db_conn)
                .with_context(|| format!("Unable to get totals for user {}", user))?;

            let mut income = Decimal::ZERO;
            let mut expenses = Decimal::ZERO;
            for (kind, amount) in amounts {
                let amount = parse_amount(&amount)?;
                match parse_kind(&kind)? {
                    TransactionKind::Income => income = add_to_total(income, amount)?,
                    TransactionKind::Expense => expenses = add_to_total(expenses, amount)?,
                }
            }
            Ok(Summary::new(income, expenses))
        })
    }

    #[instrument(skip(self))]
    fn get_category_totals(&self, user: &str) -> Result<Vec<CategoryTotal>, TransactionRepoError> {
        self.run(|db_conn| {
            let rows: Vec<(String, String, String)> = transactions::table
                .filter(transactions::username.eq(user))
                .select((
                    transactions::kind,
                    transactions::category,
                    transactions::amount,
                ))
                .load(db_conn)
                .with_context(|| format!("Unable to get category totals for user {}", user))?;

            let mut totals: BTreeMap<(TransactionKind, String), Decimal> = BTreeMap::new();
            for (kind, category, amount) in rows {
                let amount = parse_amount(&amount)?;
                let total = totals
                    .entry((parse_kind(&kind)?, category))
                    .or_insert(Decimal::ZERO);
                *total = add_to_total(*total, amount)?;
            }

            Ok(totals
                .into_iter()
                .map(|((kind, category), total)| CategoryTotal::new(kind, category, total))
                .collect())
        })
    }
}
