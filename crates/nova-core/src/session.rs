//! In-memory state of a signed-in profile: its loaded collection, dashboard
//! filters and the current recurring-bill alert.
//!
//! Every mutation goes through [`TransactionService`], then the full collection is
//! reloaded and the prediction recomputed before control returns to the caller.

use tracing::debug;
use uuid::Uuid;

use nova_domain::{FilterRange, Prediction, Profile, Transaction, TransactionDraft};

use crate::{
    aggregate::summarize,
    dashboard::{DashboardQuery, DashboardView},
    export,
    predict::{predict_with_policy, PredictionPolicy},
    storage::TransactionStore,
    time::Clock,
    transaction_service::TransactionService,
    CoreError,
};

#[derive(Debug, Clone)]
pub struct LedgerSession {
    profile: Profile,
    transactions: Vec<Transaction>,
    query: DashboardQuery,
    policy: PredictionPolicy,
    prediction: Option<Prediction>,
    alert_dismissed: bool,
}

impl LedgerSession {
    pub fn open(
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        profile: Profile,
        query: DashboardQuery,
        policy: PredictionPolicy,
    ) -> Result<Self, CoreError> {
        let mut session = Self {
            profile,
            transactions: Vec::new(),
            query,
            policy,
            prediction: None,
            alert_dismissed: false,
        };
        session.reload(store, clock)?;
        Ok(session)
    }

    /// Replaces the snapshot with the stored collection and recomputes the alert.
    pub fn reload(&mut self, store: &dyn TransactionStore, clock: &dyn Clock) -> Result<(), CoreError> {
        self.transactions = TransactionService::list(store, self.profile.uid)?;
        self.prediction = predict_with_policy(&self.transactions, clock.now(), &self.policy);
        self.alert_dismissed = false;
        debug!(
            uid = %self.profile.uid,
            count = self.transactions.len(),
            alert = self.prediction.is_some(),
            "ledger reloaded"
        );
        Ok(())
    }

    pub fn add(
        &mut self,
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        draft: TransactionDraft,
    ) -> Result<Transaction, CoreError> {
        let created = TransactionService::create(store, clock, self.profile.uid, draft)?;
        self.reload(store, clock)?;
        Ok(created)
    }

    pub fn edit(
        &mut self,
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        id: Uuid,
        draft: TransactionDraft,
    ) -> Result<Transaction, CoreError> {
        let updated = TransactionService::update(store, self.profile.uid, id, draft)?;
        self.reload(store, clock)?;
        Ok(updated)
    }

    pub fn remove(
        &mut self,
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        id: Uuid,
    ) -> Result<(), CoreError> {
        TransactionService::delete(store, self.profile.uid, id)?;
        self.reload(store, clock)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Swaps in an updated copy of the same profile (e.g. after a currency change).
    pub fn set_profile(&mut self, profile: Profile) {
        if profile.uid == self.profile.uid {
            self.profile = profile;
        }
    }

    /// Snapshot of the whole collection, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Finds a transaction by full id or by a unique id prefix.
    pub fn lookup(&self, needle: &str) -> Option<&Transaction> {
        let needle = needle.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .transactions
            .iter()
            .filter(|txn| txn.id.to_string().starts_with(&needle));
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }

    pub fn query(&self) -> &DashboardQuery {
        &self.query
    }

    pub fn set_range(&mut self, range: FilterRange) {
        self.query.range = range;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn policy(&self) -> &PredictionPolicy {
        &self.policy
    }

    /// Swaps the predictor thresholds and recomputes the alert over the current snapshot.
    pub fn set_policy(&mut self, policy: PredictionPolicy, clock: &dyn Clock) {
        self.policy = policy;
        self.prediction = predict_with_policy(&self.transactions, clock.now(), &self.policy);
        self.alert_dismissed = false;
    }

    pub fn dashboard(&self, clock: &dyn Clock) -> DashboardView {
        DashboardView::compute(&self.transactions, &self.query, clock.now())
    }

    /// The current alert unless the user dismissed it since the last reload.
    pub fn alert(&self) -> Option<&Prediction> {
        if self.alert_dismissed {
            None
        } else {
            self.prediction.as_ref()
        }
    }

    /// Hides the alert until the collection next changes. Stored data is untouched.
    pub fn dismiss_alert(&mut self) -> bool {
        let had_alert = self.alert().is_some();
        self.alert_dismissed = true;
        had_alert
    }

    /// Balance over the full collection, ignoring dashboard filters.
    pub fn total_balance(&self) -> f64 {
        summarize(&self.transactions).balance
    }

    pub fn export_csv(&self, clock: &dyn Clock) -> String {
        export::render_csv(&self.transactions, self.total_balance(), clock.today())
    }
}
