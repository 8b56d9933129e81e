//! Balance aggregation
//!
//! Pure reductions from transactions to [`Balance`] figures. None of these
//! functions validate their input: amounts are summed as given and a
//! category is never checked against its transaction type here.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Balance, Category, Money, Transaction, TransactionType};

/// Sum transactions into a single balance
///
/// Empty input yields a zero balance.
pub fn aggregate<'a, I>(transactions: I) -> Balance
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Balance::zero(), |mut acc, txn| {
            acc.record(txn);
            acc
        })
}

/// Sum transactions into one balance per date
///
/// Only dates that occur in the input appear in the result; there is no zero
/// fill for days without transactions. Keys iterate in date order.
pub fn aggregate_by_date<'a, I>(transactions: I) -> BTreeMap<NaiveDate, Balance>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_date: BTreeMap<NaiveDate, Balance> = BTreeMap::new();
    for txn in transactions {
        by_date.entry(txn.date).or_default().record(txn);
    }
    by_date
}

/// Sum the amounts of one transaction type per category
///
/// Categories without transactions of that type are absent.
pub fn aggregate_by_category<'a, I>(
    transactions: I,
    transaction_type: TransactionType,
) -> BTreeMap<Category, Money>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_category: BTreeMap<Category, Money> = BTreeMap::new();
    for txn in transactions
        .into_iter()
        .filter(|t| t.transaction_type == transaction_type)
    {
        *by_category.entry(txn.category).or_default() += txn.amount;
    }
    by_category
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn income(d: &str, yen: i64) -> Transaction {
        Transaction::income(date(d), Money::from_yen(yen), "給料", Category::Salary)
    }

    fn expense(d: &str, yen: i64) -> Transaction {
        Transaction::expense(date(d), Money::from_yen(yen), "買い物", Category::Food)
    }

    fn balance(income: i64, expense: i64) -> Balance {
        Balance::new(Money::from_yen(income), Money::from_yen(expense))
    }

    fn sample() -> Vec<Transaction> {
        vec![
            income("2025-01-01", 1000),
            expense("2025-01-01", 700),
            expense("2025-01-02", 200),
        ]
    }

    fn mixed() -> Vec<Transaction> {
        vec![
            income("2025-01-25", 250000),
            expense("2025-01-03", 1200),
            expense("2025-01-03", 800),
            income("2025-01-10", 5000),
            expense("2025-01-25", 65000),
            expense("2025-01-31", 0),
            income("2025-01-03", 3000),
        ]
    }

    #[test]
    fn test_aggregate_empty() {
        let empty: Vec<Transaction> = Vec::new();
        assert_eq!(aggregate(&empty), Balance::zero());
        assert!(aggregate_by_date(&empty).is_empty());
    }

    #[test]
    fn test_worked_example() {
        let txns = sample();

        assert_eq!(aggregate(&txns), balance(1000, 900));
        assert_eq!(aggregate(&txns).balance.yen(), 100);

        let by_date = aggregate_by_date(&txns);
        assert_eq!(by_date.len(), 2);
        assert_eq!(by_date[&date("2025-01-01")], balance(1000, 700));
        assert_eq!(by_date[&date("2025-01-01")].balance.yen(), 300);
        assert_eq!(by_date[&date("2025-01-02")], balance(0, 200));
        assert_eq!(by_date[&date("2025-01-02")].balance.yen(), -200);
    }

    #[test]
    fn test_balance_is_income_minus_expense() {
        for txns in [sample(), mixed()] {
            let total = aggregate(&txns);
            assert_eq!(total.balance, total.income - total.expense);

            for day in aggregate_by_date(&txns).values() {
                assert_eq!(day.balance, day.income - day.expense);
            }
        }
    }

    #[test]
    fn test_per_date_totals_add_up() {
        let txns = mixed();
        let total = aggregate(&txns);
        let by_date = aggregate_by_date(&txns);

        let income: Money = by_date.values().map(|b| b.income).sum();
        let expense: Money = by_date.values().map(|b| b.expense).sum();
        assert_eq!(income, total.income);
        assert_eq!(expense, total.expense);
        assert_eq!(by_date.values().copied().sum::<Balance>(), total);
    }

    #[test]
    fn test_order_independent() {
        let txns = mixed();
        let expected_total = aggregate(&txns);
        let expected_by_date = aggregate_by_date(&txns);

        let mut reversed = txns.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed), expected_total);
        assert_eq!(aggregate_by_date(&reversed), expected_by_date);

        for shift in 1..txns.len() {
            let mut rotated = txns.clone();
            rotated.rotate_left(shift);
            assert_eq!(aggregate(&rotated), expected_total);
            assert_eq!(aggregate_by_date(&rotated), expected_by_date);
        }
    }

    #[test]
    fn test_idempotent_and_input_untouched() {
        let txns = mixed();
        let snapshot = txns.clone();

        let first = aggregate(&txns);
        let second = aggregate(&txns);
        assert_eq!(first, second);
        assert_eq!(aggregate_by_date(&txns), aggregate_by_date(&txns));
        assert_eq!(txns, snapshot);
    }

    #[test]
    fn test_zero_amount_contributes_nothing() {
        let txns = vec![expense("2025-01-31", 0)];
        let by_date = aggregate_by_date(&txns);

        assert_eq!(aggregate(&txns), Balance::zero());
        // the date still gets a bucket
        assert_eq!(by_date[&date("2025-01-31")], Balance::zero());
    }

    #[test]
    fn test_same_date_same_type_accumulates() {
        let txns = vec![expense("2025-01-03", 1200), expense("2025-01-03", 800)];
        let by_date = aggregate_by_date(&txns);
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[&date("2025-01-03")], balance(0, 2000));
    }

    #[test]
    fn test_no_zero_fill() {
        let by_date = aggregate_by_date(&sample());
        assert!(!by_date.contains_key(&date("2025-01-03")));
        let dates: Vec<_> = by_date.keys().copied().collect();
        assert_eq!(dates, vec![date("2025-01-01"), date("2025-01-02")]);
    }

    #[test]
    fn test_mismatched_category_is_not_revalidated() {
        let odd = Transaction::income(date("2025-01-05"), Money::from_yen(500), "返金", Category::Food);
        assert_eq!(aggregate([&odd]), balance(500, 0));
    }

    #[test]
    fn test_oversized_records_saturate() {
        // Records read from disk skip draft validation
        let huge = Money::parse("9,000,000,000,000,000,000").unwrap();
        let txns = vec![
            Transaction::income(date("2025-01-01"), huge, "a", Category::Salary),
            Transaction::income(date("2025-01-02"), huge, "b", Category::Salary),
            Transaction::expense(date("2025-01-02"), huge, "c", Category::Food),
        ];

        let total = aggregate(&txns);
        assert_eq!(total.income.yen(), i64::MAX);
        assert_eq!(total.expense, huge);
        assert!(total.balance.yen() > 0);
    }

    #[test]
    fn test_aggregate_by_category() {
        let txns = vec![
            Transaction::expense(date("2025-01-03"), Money::from_yen(1200), "ランチ", Category::Food),
            Transaction::expense(date("2025-01-04"), Money::from_yen(300), "おやつ", Category::Food),
            Transaction::expense(date("2025-01-05"), Money::from_yen(65000), "家賃", Category::Housing),
            Transaction::income(date("2025-01-25"), Money::from_yen(250000), "給料", Category::Salary),
        ];

        let expenses = aggregate_by_category(&txns, TransactionType::Expense);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[&Category::Food].yen(), 1500);
        assert_eq!(expenses[&Category::Housing].yen(), 65000);

        let incomes = aggregate_by_category(&txns, TransactionType::Income);
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[&Category::Salary].yen(), 250000);

        let category_total: Money = expenses.values().sum();
        assert_eq!(category_total, aggregate(&txns).expense);
    }
}
