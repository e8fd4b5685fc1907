use crate::transaction_repo::{
    add_to_total, CategoryTotal, NewTransaction, Summary, Transaction, TransactionKind,
    TransactionRepo, TransactionRepoError,
};
use anyhow::anyhow;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    transactions: HashMap<i32, Transaction>,
    user_transactions: HashMap<String, HashSet<i32>>,
    next_id: i32,
}

impl State {
    fn transactions_of<'a>(&'a self, user: &str) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.user_transactions
            .get(user)
            .into_iter()
            .flatten()
            .map(move |id| {
                self.transactions
                    .get(id)
                    .expect("transactions should have all the ids from user_transactions")
            })
    }
}

pub struct MemTransactionRepo {
    state: RwLock<State>,
}

impl MemTransactionRepo {
    pub fn new() -> MemTransactionRepo {
        let state = State {
            transactions: HashMap::new(),
            user_transactions: HashMap::new(),
            next_id: 1,
        };
        MemTransactionRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

impl Default for MemTransactionRepo {
    fn default() -> Self {
        MemTransactionRepo::new()
    }
}

impl TransactionRepo for MemTransactionRepo {
    fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let transaction = new_transaction.to_transaction(id);
        write_guard.transactions.insert(id, transaction.clone());
        write_guard
            .user_transactions
            .entry(user.to_owned())
            .or_insert_with(HashSet::new)
            .insert(id);

        Ok(transaction)
    }

    fn get_all_transactions(
        &self,
        user: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let mut transactions: Vec<Transaction> =
            read_guard.transactions_of(user).cloned().collect();
        transactions.sort_by(Transaction::newest_first);

        if let Some(limit) = limit {
            transactions.truncate(limit.max(0) as usize);
        }
        Ok(transactions)
    }

    fn get_totals(&self, user: &str) -> Result<Summary, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for t in read_guard.transactions_of(user) {
            match t.kind {
                TransactionKind::Income => income = add_to_total(income, t.amount)?,
                TransactionKind::Expense => expenses = add_to_total(expenses, t.amount)?,
            }
        }
        Ok(Summary::new(income, expenses))
    }

    fn get_category_totals(&self, user: &str) -> Result<Vec<CategoryTotal>, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let mut totals: BTreeMap<(TransactionKind, String), Decimal> = BTreeMap::new();
        for t in read_guard.transactions_of(user) {
            let total = totals
                .entry((t.kind, t.category.clone()))
                .or_insert(Decimal::ZERO);
            *total = add_to_total(*total, t.amount)?;
        }

        Ok(totals
            .into_iter()
            .map(|((kind, category), total)| CategoryTotal::new(kind, category, total))
            .collect())
    }
}
