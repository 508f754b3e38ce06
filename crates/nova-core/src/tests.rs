use std::{collections::HashMap, sync::Mutex};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    dashboard::DashboardQuery, predict::PredictionPolicy, profile_service::ProfileService,
    session::LedgerSession, storage::ProfileStore, storage::TransactionStore, time::FixedClock,
    transaction_service::TransactionService, CoreError,
};
use nova_domain::{
    Category, CurrencyCode, FilterRange, Profile, Session, Transaction, TransactionDraft,
    TransactionKind,
};

#[derive(Default)]
struct MemoryStore {
    profiles: Mutex<Vec<Profile>>,
    session: Mutex<Option<Session>>,
    transactions: Mutex<HashMap<Uuid, Vec<Transaction>>>,
}

impl ProfileStore for MemoryStore {
    fn load_profiles(&self) -> Result<Vec<Profile>, CoreError> {
        Ok(self.profiles.lock().unwrap().clone())
    }

    fn save_profile(&self, profile: &Profile) -> Result<(), CoreError> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| p.uid == profile.uid) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Session>, CoreError> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn save_session(&self, session: Option<&Session>) -> Result<(), CoreError> {
        *self.session.lock().unwrap() = session.cloned();
        Ok(())
    }
}

impl TransactionStore for MemoryStore {
    fn load_transactions(&self, owner: Uuid) -> Result<Vec<Transaction>, CoreError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .get(&owner)
            .cloned()
            .unwrap_or_default())
    }

    fn insert_transaction(&self, owner: Uuid, transaction: &Transaction) -> Result<(), CoreError> {
        self.transactions
            .lock()
            .unwrap()
            .entry(owner)
            .or_default()
            .push(transaction.clone());
        Ok(())
    }

    fn replace_transaction(
        &self,
        owner: Uuid,
        transaction: &Transaction,
    ) -> Result<bool, CoreError> {
        let mut all = self.transactions.lock().unwrap();
        let Some(existing) = all
            .get_mut(&owner)
            .and_then(|list| list.iter_mut().find(|t| t.id == transaction.id))
        else {
            return Ok(false);
        };
        *existing = transaction.clone();
        Ok(true)
    }

    fn delete_transaction(&self, owner: Uuid, id: Uuid) -> Result<bool, CoreError> {
        let mut all = self.transactions.lock().unwrap();
        let Some(list) = all.get_mut(&owner) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|t| t.id != id);
        Ok(list.len() != before)
    }
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

fn clock(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock(at(y, m, d))
}

fn expense(description: &str, amount: f64) -> TransactionDraft {
    TransactionDraft::new(TransactionKind::Expense, amount, description, Category::Utilities)
}

fn income(amount: f64) -> TransactionDraft {
    TransactionDraft::new(TransactionKind::Income, amount, "Salary", Category::Salary)
}

fn open_session(store: &MemoryStore, clock: &FixedClock) -> LedgerSession {
    let profile = ProfileService::create(store, "Tester", CurrencyCode::EUR).expect("profile");
    LedgerSession::open(
        store,
        clock,
        profile,
        DashboardQuery::new(FilterRange::Month),
        PredictionPolicy::default(),
    )
    .expect("open session")
}

#[test]
fn create_dates_transactions_with_the_clock() {
    let store = MemoryStore::default();
    let owner = Uuid::new_v4();
    let clock = clock(2025, 3, 14);

    let created = TransactionService::create(&store, &clock, owner, expense("Power", 40.0)).unwrap();

    assert_eq!(created.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    assert_eq!(created.created_at, clock.0);
    assert_eq!(TransactionService::list(&store, owner).unwrap().len(), 1);
}

#[test]
fn create_rejects_invalid_drafts() {
    let store = MemoryStore::default();
    let owner = Uuid::new_v4();
    let clock = clock(2025, 3, 14);

    let err = TransactionService::create(&store, &clock, owner, expense("Power", -1.0)).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)), "unexpected error: {err:?}");
    let err = TransactionService::create(&store, &clock, owner, expense("  ", 1.0)).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)), "unexpected error: {err:?}");
    assert!(TransactionService::list(&store, owner).unwrap().is_empty());
}

#[test]
fn update_keeps_original_date() {
    let store = MemoryStore::default();
    let owner = Uuid::new_v4();
    let created =
        TransactionService::create(&store, &clock(2025, 1, 10), owner, expense("Gas", 30.0)).unwrap();

    let updated =
        TransactionService::update(&store, owner, created.id, expense("Gas bill", 35.0)).unwrap();

    assert_eq!(updated.date, created.date);
    assert_eq!(updated.description, "Gas bill");
    let stored = TransactionService::find(&store, owner, created.id).unwrap();
    assert_eq!(stored.amount, 35.0);
}

#[test]
fn update_and_delete_report_missing_transactions() {
    let store = MemoryStore::default();
    let owner = Uuid::new_v4();
    let missing = Uuid::new_v4();

    let err = TransactionService::update(&store, owner, missing, expense("x", 1.0)).unwrap_err();
    assert!(matches!(err, CoreError::TransactionNotFound(id) if id == missing));
    let err = TransactionService::delete(&store, owner, missing).unwrap_err();
    assert!(matches!(err, CoreError::TransactionNotFound(id) if id == missing));
}

#[test]
fn list_returns_newest_first() {
    let store = MemoryStore::default();
    let owner = Uuid::new_v4();
    TransactionService::create(&store, &clock(2025, 1, 1), owner, expense("old", 1.0)).unwrap();
    TransactionService::create(&store, &clock(2025, 3, 1), owner, expense("new", 1.0)).unwrap();
    TransactionService::create(&store, &clock(2025, 2, 1), owner, expense("mid", 1.0)).unwrap();

    let names: Vec<_> = TransactionService::list(&store, owner)
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(names, vec!["new", "mid", "old"]);
}

#[test]
fn transactions_are_scoped_per_owner() {
    let store = MemoryStore::default();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    TransactionService::create(&store, &clock(2025, 1, 1), alice, expense("a", 1.0)).unwrap();

    assert!(TransactionService::list(&store, bob).unwrap().is_empty());
}

#[test]
fn profile_login_and_logout_round_trip() {
    let store = MemoryStore::default();
    let clock = clock(2025, 3, 1);
    let profile = ProfileService::create(&store, "  Ada ", CurrencyCode::GBP).unwrap();
    assert_eq!(profile.display_name, "Ada");

    assert!(ProfileService::current(&store).unwrap().is_none());
    let session = ProfileService::login(&store, &clock, profile.uid).unwrap();
    assert_eq!(session.uid, profile.uid);
    assert_eq!(session.started_at, clock.0);
    assert_eq!(ProfileService::current(&store).unwrap(), Some(profile.clone()));

    ProfileService::logout(&store).unwrap();
    assert!(ProfileService::current(&store).unwrap().is_none());
}

#[test]
fn profile_lookup_by_name_or_uid() {
    let store = MemoryStore::default();
    let ada = ProfileService::create(&store, "Ada", CurrencyCode::USD).unwrap();
    ProfileService::create(&store, "Grace", CurrencyCode::INR).unwrap();

    assert_eq!(ProfileService::resolve(&store, "ada").unwrap().uid, ada.uid);
    assert_eq!(
        ProfileService::resolve(&store, &ada.uid.to_string()).unwrap().uid,
        ada.uid
    );
    assert!(matches!(
        ProfileService::resolve(&store, "linus"),
        Err(CoreError::ProfileNotFound(_))
    ));
    assert!(ProfileService::create(&store, "   ", CurrencyCode::USD).is_err());
}

#[test]
fn currency_update_persists() {
    let store = MemoryStore::default();
    let profile = ProfileService::create(&store, "Ada", CurrencyCode::USD).unwrap();

    ProfileService::update_currency(&store, profile.uid, CurrencyCode::JPY).unwrap();

    assert_eq!(
        ProfileService::find(&store, profile.uid).unwrap().currency,
        CurrencyCode::JPY
    );
    assert_eq!(ProfileService::list(&store).unwrap().len(), 1);
}

#[test]
fn session_with_unknown_profile_is_ignored() {
    let store = MemoryStore::default();
    store
        .save_session(Some(&Session {
            uid: Uuid::new_v4(),
            started_at: at(2025, 1, 1),
        }))
        .unwrap();
    assert!(ProfileService::current(&store).unwrap().is_none());
}

/// Seeds a monthly phone bill whose next occurrence falls on 2025-04-03.
fn seed_phone_bill(store: &MemoryStore, session: &mut LedgerSession) {
    session.add(store, &clock(2025, 2, 1), expense("Phone", 20.0)).unwrap();
    session.add(store, &clock(2025, 3, 3), expense("Phone", 24.0)).unwrap();
    session.add(store, &clock(2025, 3, 5), income(2000.0)).unwrap();
    session.add(store, &clock(2025, 3, 6), expense("Coffee", 3.0)).unwrap();
}

#[test]
fn ledger_session_recomputes_alert_after_each_mutation() {
    let store = MemoryStore::default();
    let now = clock(2025, 4, 1);
    let mut session = open_session(&store, &now);
    seed_phone_bill(&store, &mut session);

    session.reload(&store, &now).unwrap();
    assert!(session.alert().is_none(), "four transactions are not enough");

    session.add(&store, &now, expense("Groceries", 55.0)).unwrap();
    let alert = session.alert().expect("phone bill alert");
    assert_eq!(alert.description, "Phone");
    assert_eq!(alert.days_remaining, 2);
    assert_eq!(alert.avg_amount, 22.0);
}

#[test]
fn dismissal_is_reset_by_the_next_change() {
    let store = MemoryStore::default();
    let now = clock(2025, 4, 1);
    let mut session = open_session(&store, &now);
    seed_phone_bill(&store, &mut session);
    session.add(&store, &now, expense("Groceries", 55.0)).unwrap();

    assert!(session.dismiss_alert());
    assert!(session.alert().is_none());
    assert_eq!(session.transactions().len(), 5);

    let coffee = session
        .transactions()
        .iter()
        .find(|t| t.description == "Coffee")
        .map(|t| t.id)
        .unwrap();
    session.remove(&store, &now, coffee).unwrap();
    assert!(session.alert().is_none(), "back to four transactions");

    session.add(&store, &now, expense("Coffee", 3.0)).unwrap();
    assert!(session.alert().is_some());
}

#[test]
fn editing_description_breaks_the_group() {
    let store = MemoryStore::default();
    let now = clock(2025, 4, 1);
    let mut session = open_session(&store, &now);
    seed_phone_bill(&store, &mut session);
    session.add(&store, &now, expense("Groceries", 55.0)).unwrap();
    assert!(session.alert().is_some());

    let latest_phone = session
        .transactions()
        .iter()
        .find(|t| t.description == "Phone")
        .map(|t| t.id)
        .unwrap();
    session
        .edit(&store, &now, latest_phone, expense("Mobile", 24.0))
        .unwrap();
    assert!(session.alert().is_none());
}

#[test]
fn dashboard_follows_range_and_search() {
    let store = MemoryStore::default();
    let now = clock(2025, 3, 20);
    let mut session = open_session(&store, &now);
    session.add(&store, &clock(2025, 3, 2), expense("Rent", 900.0)).unwrap();
    session.add(&store, &clock(2025, 3, 18), income(2500.0)).unwrap();
    session.add(&store, &clock(2025, 1, 5), expense("Rent", 900.0)).unwrap();

    let month = session.dashboard(&now);
    assert_eq!(month.transactions.len(), 2);
    assert_eq!(month.stats.balance, 1600.0);

    session.set_range(FilterRange::Year);
    assert_eq!(session.dashboard(&now).stats.expense, 1800.0);

    session.set_range(FilterRange::Week);
    assert_eq!(session.dashboard(&now).transactions.len(), 1);

    session.set_range(FilterRange::Year);
    session.set_search("rent");
    let searched = session.dashboard(&now);
    assert_eq!(searched.transactions.len(), 2);
    assert_eq!(searched.stats.income, 0.0);
    assert_eq!(session.total_balance(), 700.0);
}

#[test]
fn lookup_accepts_unique_id_prefixes() {
    let store = MemoryStore::default();
    let now = clock(2025, 3, 20);
    let mut session = open_session(&store, &now);
    let created = session.add(&store, &now, expense("Rent", 900.0)).unwrap();

    let prefix = &created.id.to_string()[..8];
    assert_eq!(session.lookup(prefix).map(|t| t.id), Some(created.id));
    assert!(session.lookup("").is_none());
}

#[test]
fn export_uses_full_collection_balance() {
    let store = MemoryStore::default();
    let now = clock(2025, 3, 20);
    let mut session = open_session(&store, &now);
    session.add(&store, &clock(2024, 6, 1), income(100.0)).unwrap();
    session.add(&store, &now, expense("Rent", 40.0)).unwrap();

    let csv = session.export_csv(&now);
    assert!(csv.starts_with("FINANCIAL SUMMARY\nTotal Balance,60.00\nGenerated Date,2025-03-20\n"));
    assert!(csv.contains("2024-06-01,\"Salary\",Salary,Personal,100\n"));
}

#[test]
fn creation_date_is_the_utc_date_of_the_clock() {
    let store = MemoryStore::default();
    let later = FixedClock(at(2025, 3, 20) + Duration::hours(20));
    let owner = Uuid::new_v4();
    let created = TransactionService::create(&store, &later, owner, expense("Late", 1.0)).unwrap();
    assert_eq!(created.date, NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
}
