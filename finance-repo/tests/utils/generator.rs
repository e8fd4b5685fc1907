use chrono::{Days, NaiveDate};
use fake::faker::lorem::en::Sentence;
use fake::{Fake, Faker};
use finance_repo::transaction_repo::{NewTransaction, TransactionKind};
use rand::seq::SliceRandom;
use rust_decimal::Decimal;

trait Generator<T> {
    fn gen(&mut self) -> T;
}

struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos].clone();
        self.current_pos += 1;
        v
    }
}

struct RandomSample<T> {
    values: Vec<T>,
}

impl<T> RandomSample<T> {
    fn boxed(values: Vec<T>) -> Box<RandomSample<T>> {
        Box::new(RandomSample { values })
    }
}

impl<T: Clone> Generator<T> for RandomSample<T> {
    fn gen(&mut self) -> T {
        self.values.choose(&mut rand::thread_rng()).unwrap().clone()
    }
}

struct FakeDescription;

impl Generator<Option<String>> for FakeDescription {
    fn gen(&mut self) -> Option<String> {
        if Faker.fake::<bool>() {
            Some(Sentence(3..8).fake())
        } else {
            None
        }
    }
}

struct FakeDate;

impl Generator<Option<NaiveDate>> for FakeDate {
    fn gen(&mut self) -> Option<NaiveDate> {
        let days: u64 = (0..10_000u64).fake();
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|start| start.checked_add_days(Days::new(days)))
    }
}

/// Non-negative amounts with two decimal places
struct FakeAmount;

impl Generator<Decimal> for FakeAmount {
    fn gen(&mut self) -> Decimal {
        Decimal::new((0..10_000_000i64).fake::<i64>(), 2)
    }
}

#[allow(dead_code)]
pub struct NewTransactionGenerator {
    kind_gen: Box<dyn Generator<TransactionKind>>,
    cat_gen: Box<dyn Generator<String>>,
    amnt_gen: Box<dyn Generator<Decimal>>,
    desc_gen: Box<dyn Generator<Option<String>>>,
    date_gen: Box<dyn Generator<Option<NaiveDate>>>,
}

#[allow(dead_code)]
impl NewTransactionGenerator {
    pub fn with_kinds(mut self, kinds: Vec<TransactionKind>) -> NewTransactionGenerator {
        self.kind_gen = Predefined::boxed(kinds);
        self
    }

    pub fn with_categories(mut self, categories: Vec<&str>) -> NewTransactionGenerator {
        let categories: Vec<String> = categories.into_iter().map(|s| s.to_string()).collect();
        self.cat_gen = Predefined::boxed(categories);
        self
    }

    pub fn with_amounts(mut self, amounts: Vec<Decimal>) -> NewTransactionGenerator {
        self.amnt_gen = Predefined::boxed(amounts);
        self
    }

    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> NewTransactionGenerator {
        let dates = dates.into_iter().map(Some).collect();
        self.date_gen = Predefined::boxed(dates);
        self
    }

    pub fn without_dates(mut self) -> NewTransactionGenerator {
        self.date_gen = RandomSample::boxed(vec![None]);
        self
    }

    pub fn generate(&mut self) -> NewTransaction {
        NewTransaction::new(
            self.kind_gen.gen(),
            self.cat_gen.gen(),
            self.amnt_gen.gen(),
            self.desc_gen.gen(),
            self.date_gen.gen(),
        )
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<NewTransaction> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate())
        }
        vec
    }
}

impl Default for NewTransactionGenerator {
    fn default() -> Self {
        NewTransactionGenerator {
            kind_gen: RandomSample::boxed(vec![TransactionKind::Income, TransactionKind::Expense]),
            cat_gen: RandomSample::boxed(vec![
                "Misc".to_string(),
                "Groceries".to_string(),
                "Salary".to_string(),
                "Transportation".to_string(),
            ]),
            amnt_gen: Box::new(FakeAmount),
            desc_gen: Box::new(FakeDescription),
            date_gen: Box::new(FakeDate),
        }
    }
}
