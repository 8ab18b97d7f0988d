//! The ledger store
//!
//! Owns the five entity collections (incomes, expense categories, expenses,
//! debts, savings goals) for one session. Collections are loaded once from
//! the key-value store at startup, mutated synchronously in memory through
//! the CRUD families below, and mirrored back to storage through a
//! background write queue after every mutation (full-collection overwrite).
//!
//! Lenient by contract: update and delete on an absent id are silent
//! no-ops, and a missing or unreadable collection at startup falls back to
//! its default (the seed categories, or an empty list). There is no
//! cross-entity transactionality; deleting a category does not cascade to
//! the expenses referencing it.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    default_categories, CategoryId, CategoryPatch, Debt, DebtId, DebtPatch, Expense,
    ExpenseCategory, ExpenseId, ExpensePatch, GoalId, GoalPatch, Income, IncomeId, IncomePatch,
    Money, NewCategory, NewDebt, NewExpense, NewGoal, NewIncome, SavingsGoal,
};
use crate::storage::{keys, KeyValueStore, WriteQueue};

/// Single source of truth for the entity collections during a session
pub struct LedgerStore {
    writer: WriteQueue,
    incomes: RwLock<Vec<Income>>,
    categories: RwLock<Vec<ExpenseCategory>>,
    expenses: RwLock<Vec<Expense>>,
    debts: RwLock<Vec<Debt>>,
    goals: RwLock<Vec<SavingsGoal>>,
}

impl LedgerStore {
    /// Open the ledger, loading every collection from `store`
    ///
    /// A missing key yields the collection default (the seed category set
    /// for categories, empty for everything else). Unreadable data is
    /// logged and treated the same as missing; startup never fails.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let incomes = load_collection(store.as_ref(), keys::INCOMES).unwrap_or_default();
        let categories = load_collection(store.as_ref(), keys::EXPENSE_CATEGORIES)
            .unwrap_or_else(default_categories);
        let expenses = load_collection(store.as_ref(), keys::EXPENSES).unwrap_or_default();
        let debts = load_collection(store.as_ref(), keys::DEBTS).unwrap_or_default();
        let goals = load_collection(store.as_ref(), keys::SAVINGS_GOALS).unwrap_or_default();

        Self {
            writer: WriteQueue::new(store),
            incomes: RwLock::new(incomes),
            categories: RwLock::new(categories),
            expenses: RwLock::new(expenses),
            debts: RwLock::new(debts),
            goals: RwLock::new(goals),
        }
    }

    /// Block until every queued persistence write has completed
    ///
    /// The write queue also drains itself when the store is dropped; this
    /// is for explicit teardown points and tests.
    pub fn flush(&self) {
        self.writer.flush();
    }

    fn persist<T: Serialize>(&self, key: &str, items: &[T]) {
        match serde_json::to_string(items) {
            Ok(json) => self.writer.submit(key, json),
            Err(e) => warn!(key, error = %e, "failed to serialize collection"),
        }
    }

    // --- Incomes ---

    /// Snapshot of all incomes in insertion order
    pub fn incomes(&self) -> LedgerResult<Vec<Income>> {
        Ok(read_guard(&self.incomes)?.clone())
    }

    /// Record a new income entry and return it
    pub fn add_income(&self, payload: NewIncome) -> LedgerResult<Income> {
        let income = Income::new(payload);
        income
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut incomes = write_guard(&self.incomes)?;
        incomes.push(income.clone());
        self.persist(keys::INCOMES, &incomes);
        Ok(income)
    }

    /// Apply a partial update to an income entry; absent ids are a no-op
    pub fn update_income(&self, id: IncomeId, patch: IncomePatch) -> LedgerResult<()> {
        let mut incomes = write_guard(&self.incomes)?;
        let pos = match incomes.iter().position(|income| income.id == id) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        let mut updated = incomes[pos].clone();
        updated.apply_patch(patch);
        updated
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        incomes[pos] = updated;
        self.persist(keys::INCOMES, &incomes);
        Ok(())
    }

    /// Delete an income entry; absent ids are a no-op
    pub fn delete_income(&self, id: IncomeId) -> LedgerResult<()> {
        let mut incomes = write_guard(&self.incomes)?;
        let before = incomes.len();
        incomes.retain(|income| income.id != id);
        if incomes.len() != before {
            self.persist(keys::INCOMES, &incomes);
        }
        Ok(())
    }

    // --- Expense categories ---

    /// Snapshot of all categories in insertion order
    pub fn categories(&self) -> LedgerResult<Vec<ExpenseCategory>> {
        Ok(read_guard(&self.categories)?.clone())
    }

    /// Create a new expense category and return it
    pub fn add_category(&self, payload: NewCategory) -> LedgerResult<ExpenseCategory> {
        let category = ExpenseCategory::new(payload);
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut categories = write_guard(&self.categories)?;
        categories.push(category.clone());
        self.persist(keys::EXPENSE_CATEGORIES, &categories);
        Ok(category)
    }

    /// Apply a partial update to a category; absent ids are a no-op
    pub fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> LedgerResult<()> {
        let mut categories = write_guard(&self.categories)?;
        let pos = match categories.iter().position(|category| category.id == id) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        let mut updated = categories[pos].clone();
        updated.apply_patch(patch);
        updated
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        categories[pos] = updated;
        self.persist(keys::EXPENSE_CATEGORIES, &categories);
        Ok(())
    }

    /// Delete a category; absent ids are a no-op
    ///
    /// Expenses referencing the deleted category keep their orphaned
    /// `category_id` and resolve to the unknown-category fallback at
    /// display time.
    pub fn delete_category(&self, id: CategoryId) -> LedgerResult<()> {
        let mut categories = write_guard(&self.categories)?;
        let before = categories.len();
        categories.retain(|category| category.id != id);
        if categories.len() != before {
            self.persist(keys::EXPENSE_CATEGORIES, &categories);
        }
        Ok(())
    }

    // --- Expenses ---

    /// Snapshot of all expenses in insertion order
    pub fn expenses(&self) -> LedgerResult<Vec<Expense>> {
        Ok(read_guard(&self.expenses)?.clone())
    }

    /// Record a new expense and return it
    pub fn add_expense(&self, payload: NewExpense) -> LedgerResult<Expense> {
        let expense = Expense::new(payload);
        expense
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut expenses = write_guard(&self.expenses)?;
        expenses.push(expense.clone());
        self.persist(keys::EXPENSES, &expenses);
        Ok(expense)
    }

    /// Apply a partial update to an expense; absent ids are a no-op
    pub fn update_expense(&self, id: ExpenseId, patch: ExpensePatch) -> LedgerResult<()> {
        let mut expenses = write_guard(&self.expenses)?;
        let pos = match expenses.iter().position(|expense| expense.id == id) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        let mut updated = expenses[pos].clone();
        updated.apply_patch(patch);
        updated
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        expenses[pos] = updated;
        self.persist(keys::EXPENSES, &expenses);
        Ok(())
    }

    /// Delete an expense; absent ids are a no-op
    pub fn delete_expense(&self, id: ExpenseId) -> LedgerResult<()> {
        let mut expenses = write_guard(&self.expenses)?;
        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() != before {
            self.persist(keys::EXPENSES, &expenses);
        }
        Ok(())
    }

    // --- Debts ---

    /// Snapshot of all debts in insertion order
    pub fn debts(&self) -> LedgerResult<Vec<Debt>> {
        Ok(read_guard(&self.debts)?.clone())
    }

    /// Record a new pending debt and return it
    pub fn add_debt(&self, payload: NewDebt) -> LedgerResult<Debt> {
        let debt = Debt::new(payload);
        debt.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut debts = write_guard(&self.debts)?;
        debts.push(debt.clone());
        self.persist(keys::DEBTS, &debts);
        Ok(debt)
    }

    /// Apply a partial update to a debt; absent ids are a no-op
    ///
    /// A patch carrying an illegal status transition (anything other than
    /// pending to the debt's own terminal status) is rejected with a
    /// validation error and changes nothing.
    pub fn update_debt(&self, id: DebtId, patch: DebtPatch) -> LedgerResult<()> {
        let mut debts = write_guard(&self.debts)?;
        let pos = match debts.iter().position(|debt| debt.id == id) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        let mut updated = debts[pos].clone();
        updated
            .apply_patch(patch)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        updated
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        debts[pos] = updated;
        self.persist(keys::DEBTS, &debts);
        Ok(())
    }

    /// Settle a pending debt into its terminal status (paid/received)
    ///
    /// Absent ids are a no-op; settling an already-terminal debt is a
    /// validation error.
    pub fn settle_debt(&self, id: DebtId) -> LedgerResult<()> {
        let mut debts = write_guard(&self.debts)?;
        let pos = match debts.iter().position(|debt| debt.id == id) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        let mut updated = debts[pos].clone();
        updated
            .settle()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        debts[pos] = updated;
        self.persist(keys::DEBTS, &debts);
        Ok(())
    }

    /// Delete a debt; absent ids are a no-op
    pub fn delete_debt(&self, id: DebtId) -> LedgerResult<()> {
        let mut debts = write_guard(&self.debts)?;
        let before = debts.len();
        debts.retain(|debt| debt.id != id);
        if debts.len() != before {
            self.persist(keys::DEBTS, &debts);
        }
        Ok(())
    }

    // --- Savings goals ---

    /// Snapshot of all savings goals in insertion order
    pub fn goals(&self) -> LedgerResult<Vec<SavingsGoal>> {
        Ok(read_guard(&self.goals)?.clone())
    }

    /// Create a new savings goal (saved amount starts at zero) and return it
    pub fn add_goal(&self, payload: NewGoal) -> LedgerResult<SavingsGoal> {
        let goal = SavingsGoal::new(payload);
        goal.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut goals = write_guard(&self.goals)?;
        goals.push(goal.clone());
        self.persist(keys::SAVINGS_GOALS, &goals);
        Ok(goal)
    }

    /// Apply a partial update to a goal; absent ids are a no-op
    pub fn update_goal(&self, id: GoalId, patch: GoalPatch) -> LedgerResult<()> {
        let mut goals = write_guard(&self.goals)?;
        let pos = match goals.iter().position(|goal| goal.id == id) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        let mut updated = goals[pos].clone();
        updated.apply_patch(patch);
        updated
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        goals[pos] = updated;
        self.persist(keys::SAVINGS_GOALS, &goals);
        Ok(())
    }

    /// Add to a goal's saved amount; absent ids are a no-op
    pub fn deposit_to_goal(&self, id: GoalId, amount: Money) -> LedgerResult<()> {
        let mut goals = write_guard(&self.goals)?;
        match goals.iter_mut().find(|goal| goal.id == id) {
            Some(goal) => goal.deposit(amount),
            None => return Ok(()),
        }
        self.persist(keys::SAVINGS_GOALS, &goals);
        Ok(())
    }

    /// Subtract from a goal's saved amount, clamped at zero; absent ids
    /// are a no-op
    pub fn withdraw_from_goal(&self, id: GoalId, amount: Money) -> LedgerResult<()> {
        let mut goals = write_guard(&self.goals)?;
        match goals.iter_mut().find(|goal| goal.id == id) {
            Some(goal) => goal.withdraw(amount),
            None => return Ok(()),
        }
        self.persist(keys::SAVINGS_GOALS, &goals);
        Ok(())
    }

    /// Delete a goal; absent ids are a no-op
    pub fn delete_goal(&self, id: GoalId) -> LedgerResult<()> {
        let mut goals = write_guard(&self.goals)?;
        let before = goals.len();
        goals.retain(|goal| goal.id != id);
        if goals.len() != before {
            self.persist(keys::SAVINGS_GOALS, &goals);
        }
        Ok(())
    }
}

fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<Vec<T>> {
    match store.get(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(items) => Some(items),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable collection, using default");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "failed to read collection, using default");
            None
        }
    }
}

fn read_guard<T>(lock: &RwLock<Vec<T>>) -> LedgerResult<RwLockReadGuard<'_, Vec<T>>> {
    lock.read()
        .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
}

fn write_guard<T>(lock: &RwLock<Vec<T>>) -> LedgerResult<RwLockWriteGuard<'_, Vec<T>>> {
    lock.write()
        .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStore, MemoryStore};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn memory_ledger() -> LedgerStore {
        LedgerStore::open(Arc::new(MemoryStore::new()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn salary(amount_cents: i64) -> NewIncome {
        NewIncome {
            source: "Salary".into(),
            amount: Money::from_cents(amount_cents),
            date: date(2024, 3, 1),
            description: None,
        }
    }

    #[test]
    fn test_add_appends_and_returns_entity() {
        let ledger = memory_ledger();

        let created = ledger.add_income(salary(100_000)).unwrap();
        let incomes = ledger.incomes().unwrap();

        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0], created);
        assert_eq!(created.source, "Salary");
        assert_eq!(created.amount.cents(), 100_000);
    }

    #[test]
    fn test_rapid_adds_generate_distinct_ids() {
        let ledger = memory_ledger();

        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            let income = ledger.add_income(salary(1_000)).unwrap();
            assert!(ids.insert(income.id));
        }
        assert_eq!(ledger.incomes().unwrap().len(), 100);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let ledger = memory_ledger();

        for i in 1..=5 {
            ledger
                .add_income(NewIncome {
                    source: format!("Source {}", i),
                    ..salary(i * 100)
                })
                .unwrap();
        }

        let incomes = ledger.incomes().unwrap();
        let sources: Vec<_> = incomes.iter().map(|i| i.source.as_str()).collect();
        assert_eq!(
            sources,
            vec!["Source 1", "Source 2", "Source 3", "Source 4", "Source 5"]
        );
    }

    #[test]
    fn test_add_rejects_invalid_payload() {
        let ledger = memory_ledger();

        let err = ledger
            .add_income(NewIncome {
                source: "".into(),
                ..salary(1_000)
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert!(ledger.incomes().unwrap().is_empty());
    }

    #[test]
    fn test_update_changes_only_patched_fields() {
        let ledger = memory_ledger();
        let created = ledger.add_income(salary(100_000)).unwrap();

        ledger
            .update_income(
                created.id,
                IncomePatch {
                    amount: Some(Money::from_cents(120_000)),
                    ..Default::default()
                },
            )
            .unwrap();

        let incomes = ledger.incomes().unwrap();
        assert_eq!(incomes[0].amount.cents(), 120_000);
        assert_eq!(incomes[0].id, created.id);
        assert_eq!(incomes[0].source, created.source);
        assert_eq!(incomes[0].date, created.date);
        assert_eq!(incomes[0].description, created.description);
    }

    #[test]
    fn test_update_absent_id_is_silent_noop() {
        let ledger = memory_ledger();
        ledger.add_income(salary(100_000)).unwrap();
        let before = ledger.incomes().unwrap();

        ledger
            .update_income(
                IncomeId::new(),
                IncomePatch {
                    amount: Some(Money::from_cents(1)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(ledger.incomes().unwrap(), before);
    }

    #[test]
    fn test_delete_absent_id_is_silent_noop() {
        let ledger = memory_ledger();
        ledger.add_income(salary(100_000)).unwrap();
        let before = ledger.incomes().unwrap();

        ledger.delete_income(IncomeId::new()).unwrap();

        assert_eq!(ledger.incomes().unwrap(), before);
    }

    #[test]
    fn test_delete_removes_entity_and_keeps_order() {
        let ledger = memory_ledger();
        let first = ledger.add_income(salary(100)).unwrap();
        let second = ledger.add_income(salary(200)).unwrap();
        let third = ledger.add_income(salary(300)).unwrap();

        ledger.delete_income(second.id).unwrap();

        let ids: Vec<_> = ledger.incomes().unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[test]
    fn test_missing_categories_fall_back_to_seed() {
        let ledger = memory_ledger();
        let categories = ledger.categories().unwrap();

        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].name, "Food & Dining");
    }

    #[test]
    fn test_category_delete_does_not_cascade() {
        let ledger = memory_ledger();
        let category = ledger
            .add_category(NewCategory {
                name: "Travel".into(),
                color: "#84CC16".into(),
                monthly_limit: None,
            })
            .unwrap();
        let expense = ledger
            .add_expense(NewExpense {
                category_id: category.id,
                amount: Money::from_cents(5_000),
                date: date(2024, 3, 10),
                description: "Train ticket".into(),
            })
            .unwrap();

        ledger.delete_category(category.id).unwrap();

        // The expense survives with its orphaned reference intact
        let expenses = ledger.expenses().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, expense.id);
        assert_eq!(expenses[0].category_id, category.id);
        assert!(!ledger
            .categories()
            .unwrap()
            .iter()
            .any(|c| c.id == category.id));
    }

    #[test]
    fn test_settle_debt_transitions() {
        let ledger = memory_ledger();
        let debt = ledger
            .add_debt(NewDebt {
                kind: crate::models::DebtKind::Borrowed,
                person_name: "Sam".into(),
                amount: Money::from_cents(10_000),
                date_borrowed: date(2024, 2, 1),
                due_date: None,
                purpose: "Rent split".into(),
            })
            .unwrap();

        ledger.settle_debt(debt.id).unwrap();
        assert_eq!(
            ledger.debts().unwrap()[0].status,
            crate::models::DebtStatus::Paid
        );

        // Terminal: settling again is a validation error
        let err = ledger.settle_debt(debt.id).unwrap_err();
        assert!(err.is_validation());

        // Absent id stays a silent no-op
        ledger.settle_debt(DebtId::new()).unwrap();
    }

    #[test]
    fn test_goal_deposit_and_clamped_withdraw() {
        let ledger = memory_ledger();
        let goal = ledger
            .add_goal(NewGoal {
                name: "Emergency Fund".into(),
                target_amount: Money::from_dollars(1_000),
                deadline: None,
                color: "#10B981".into(),
            })
            .unwrap();
        assert!(goal.current_amount.is_zero());

        ledger.deposit_to_goal(goal.id, Money::from_dollars(50)).unwrap();
        ledger
            .withdraw_from_goal(goal.id, Money::from_dollars(80))
            .unwrap();

        assert_eq!(ledger.goals().unwrap()[0].current_amount, Money::zero());
    }

    #[test]
    fn test_persisted_round_trip_preserves_collections() {
        let temp_dir = TempDir::new().unwrap();
        let incomes;
        let expenses;
        let debts;
        let goals;
        let categories;

        {
            let store = Arc::new(JsonFileStore::open(temp_dir.path()).unwrap());
            let ledger = LedgerStore::open(store);

            ledger.add_income(salary(250_000)).unwrap();
            ledger.add_income(salary(10_000)).unwrap();
            let category = ledger.categories().unwrap()[0].clone();
            ledger
                .add_expense(NewExpense {
                    category_id: category.id,
                    amount: Money::from_cents(4_200),
                    date: date(2024, 3, 12),
                    description: "Groceries".into(),
                })
                .unwrap();
            ledger
                .add_debt(NewDebt {
                    kind: crate::models::DebtKind::Lent,
                    person_name: "Alex".into(),
                    amount: Money::from_cents(3_000),
                    date_borrowed: date(2024, 1, 20),
                    due_date: Some(date(2024, 6, 1)),
                    purpose: "Concert ticket".into(),
                })
                .unwrap();
            let goal = ledger
                .add_goal(NewGoal {
                    name: "Vacation".into(),
                    target_amount: Money::from_dollars(2_000),
                    deadline: None,
                    color: "#8B5CF6".into(),
                })
                .unwrap();
            ledger.deposit_to_goal(goal.id, Money::from_dollars(300)).unwrap();

            ledger.flush();

            incomes = ledger.incomes().unwrap();
            categories = ledger.categories().unwrap();
            expenses = ledger.expenses().unwrap();
            debts = ledger.debts().unwrap();
            goals = ledger.goals().unwrap();
        }

        // Reopen from the same directory; everything comes back in order
        let store = Arc::new(JsonFileStore::open(temp_dir.path()).unwrap());
        let reopened = LedgerStore::open(store);

        assert_eq!(reopened.incomes().unwrap(), incomes);
        assert_eq!(reopened.categories().unwrap(), categories);
        assert_eq!(reopened.expenses().unwrap(), expenses);
        assert_eq!(reopened.debts().unwrap(), debts);
        assert_eq!(reopened.goals().unwrap(), goals);
    }

    #[test]
    fn test_unreadable_collection_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::INCOMES, "not json").unwrap();
        store.set(keys::EXPENSE_CATEGORIES, "{broken").unwrap();

        let ledger = LedgerStore::open(store);

        assert!(ledger.incomes().unwrap().is_empty());
        assert_eq!(ledger.categories().unwrap().len(), 6);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> LedgerResult<Option<String>> {
            Err(LedgerError::Storage("read failed".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> LedgerResult<()> {
            Err(LedgerError::Storage("write failed".into()))
        }

        fn remove(&self, _key: &str) -> LedgerResult<()> {
            Err(LedgerError::Storage("remove failed".into()))
        }
    }

    #[test]
    fn test_failing_store_leaves_memory_authoritative() {
        // Startup reads fail (defaults used); mutation writes fail silently,
        // but the in-memory state keeps serving the session.
        let ledger = LedgerStore::open(Arc::new(FailingStore));
        assert_eq!(ledger.categories().unwrap().len(), 6);

        let income = ledger.add_income(salary(100_000)).unwrap();
        ledger.flush();

        assert_eq!(ledger.incomes().unwrap(), vec![income]);
    }
}
