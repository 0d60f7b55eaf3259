//! Daily balance ledger: reconciliation, carry-forward and range views

pub mod audit;
pub mod carry_forward;
pub mod consistency;
pub mod edit;
pub mod error;
pub mod models;
pub mod range;
pub mod reconcile;
pub mod reports;
pub mod store;
pub mod time;
pub mod types;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use cashbook_config::Config;
use cashbook_utils::{format_money, MoneyFormat};
use chrono::NaiveDate;

pub use audit::{AuditEntry, ANONYMOUS_USER};
pub use consistency::{check_consistency, Consistency, Mismatch, TOLERANCE};
pub use edit::AccountEdit;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{AccountSnapshot, DailySnapshot, RangeView, Totals, Transaction};
pub use reports::{BalanceHistory, DailySeriesPoint, DistributionEntry, LedgerSummary};
pub use store::{SnapshotStore, StoreError, StoreRef};
pub use time::{format_date, parse_date, DateRange};
pub use types::{AuditAction, FlowKind, SensitiveField};

/// Cached view of the stored days plus the operations that edit them.
///
/// Reads are served from the cache. Every write goes to the store first and
/// the cache is only replaced by re-fetching after the save succeeded.
pub struct Ledger {
    config: Config,
    store: StoreRef,
    days: Vec<DailySnapshot>,
    fingerprint: u64,
}

impl Ledger {
    /// Create an empty ledger; call [`Ledger::load`] before use
    pub fn new(config: Config, store: StoreRef) -> Self {
        Self {
            config,
            store,
            days: Vec::new(),
            fingerprint: fingerprint(&[]),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch every stored day
    pub async fn load(&mut self) -> CoreResult<()> {
        let mut days = self.store.load_all().await?;
        for day in &mut days {
            day.recompute_totals();
        }
        days.sort_by_key(|d| d.date);

        self.fingerprint = fingerprint(&days);
        self.days = days;

        log::info!(
            target: "cashbook::ledger",
            "loaded {} day(s) from store",
            self.days.len()
        );
        Ok(())
    }

    /// Re-fetch and report whether the stored data changed since the last
    /// fetch, e.g. because another user saved
    pub async fn refresh(&mut self) -> CoreResult<bool> {
        let previous = self.fingerprint;
        self.load().await?;
        let changed = previous != self.fingerprint;
        if changed {
            log::info!(target: "cashbook::ledger", "stored data changed, cache refreshed");
        }
        Ok(changed)
    }

    /// Stored days in calendar order
    pub fn days(&self) -> &[DailySnapshot] {
        &self.days
    }

    /// Day as shown for `date`, carrying the closest prior day forward when
    /// nothing was saved for it
    pub fn snapshot_for_date(&self, date: NaiveDate) -> DailySnapshot {
        carry_forward::resolve(date, &self.days)
    }

    /// Consolidated view of `[start, end]`; `selected` is shown when the
    /// range holds no stored day
    pub fn range_view(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> RangeView {
        let range = DateRange::new(start, end);
        range::aggregate(range.start, range.end, &self.days, selected.unwrap_or(range.start))
    }

    /// The single date a view over `range` writes to
    pub fn editable_date(range: DateRange) -> CoreResult<NaiveDate> {
        if range.is_single_day() {
            Ok(range.start)
        } else {
            Err(CoreError::RangeReadOnly)
        }
    }

    pub fn check_consistency(&self, account: &AccountSnapshot) -> CoreResult<Consistency> {
        account.validate_amounts()?;
        Ok(consistency::check_consistency(account))
    }

    /// Inconsistent accounts of the day shown for `date`
    pub fn consistency_report(&self, date: NaiveDate) -> Vec<Mismatch> {
        consistency::check_day(&self.snapshot_for_date(date))
    }

    /// Replace the account at `index` of the day shown for `date` and save
    /// the day. Returns the day's totals after the save.
    pub async fn update_account(
        &mut self,
        date: NaiveDate,
        index: usize,
        mut account: AccountSnapshot,
        user: &str,
    ) -> CoreResult<Totals> {
        let mut accounts = self.snapshot_for_date(date).accounts;
        check_index(date, index, accounts.len())?;

        account.name = account.name.trim().to_string();
        validate_name(&account.name, &accounts, Some(index))?;
        account.validate_amounts()?;
        if reconcile::sync_totals(&mut account) {
            account.recompute_closing();
        }

        let description = format!(
            "updated {} on {}: closing {}",
            account.name,
            format_date(date),
            format_money(account.closing_balance, &self.money_format())
        );
        let entity = AuditEntry::account_entity(&account.name);
        accounts[index] = account;

        let totals = self.persist(date, accounts).await?;
        self.record(user, AuditAction::Update, entity, description).await;
        Ok(totals)
    }

    /// Apply field edits to the account at `index` and save the day.
    /// Returns the edited account as stored.
    pub async fn edit_account(
        &mut self,
        date: NaiveDate,
        index: usize,
        edits: Vec<AccountEdit>,
        user: &str,
    ) -> CoreResult<AccountSnapshot> {
        let day = self.snapshot_for_date(date);
        check_index(date, index, day.accounts.len())?;

        let mut account = day.accounts[index].clone();
        account.apply_all(edits)?;
        self.update_account(date, index, account, user).await?;

        self.snapshot_for_date(date)
            .accounts
            .get(index)
            .cloned()
            .ok_or_else(|| CoreError::InternalError {
                message: format!("account #{} missing after save", index),
            })
    }

    /// Append an account to the day shown for `date` and save the day
    pub async fn add_account(
        &mut self,
        date: NaiveDate,
        mut account: AccountSnapshot,
        user: &str,
    ) -> CoreResult<Totals> {
        let mut accounts = self.snapshot_for_date(date).accounts;

        account.name = account.name.trim().to_string();
        validate_name(&account.name, &accounts, None)?;
        account.validate_amounts()?;
        reconcile::sync_totals(&mut account);
        account.recompute_closing();

        let description = format!(
            "created {} on {}: opening {}",
            account.name,
            format_date(date),
            format_money(account.opening_balance, &self.money_format())
        );
        let entity = AuditEntry::account_entity(&account.name);
        accounts.push(account);

        let totals = self.persist(date, accounts).await?;
        self.record(user, AuditAction::Create, entity, description).await;
        Ok(totals)
    }

    /// Remove the account at `index` of the day shown for `date`
    pub async fn remove_account(
        &mut self,
        date: NaiveDate,
        index: usize,
        user: &str,
    ) -> CoreResult<Totals> {
        let mut accounts = self.snapshot_for_date(date).accounts;
        check_index(date, index, accounts.len())?;

        let removed = accounts.remove(index);
        let description = format!("removed {} on {}", removed.name, format_date(date));

        let totals = self.persist(date, accounts).await?;
        self.record(
            user,
            AuditAction::Delete,
            AuditEntry::account_entity(&removed.name),
            description,
        )
        .await;
        Ok(totals)
    }

    pub fn balance_history(&self, start: NaiveDate, end: NaiveDate) -> BalanceHistory {
        reports::balance_history(DateRange::new(start, end), &self.days)
    }

    pub fn daily_series(&self) -> Vec<DailySeriesPoint> {
        reports::daily_series(&self.days)
    }

    pub fn account_distribution(&self, date: NaiveDate) -> Vec<DistributionEntry> {
        reports::account_distribution(&self.snapshot_for_date(date))
    }

    pub fn summary(&self) -> LedgerSummary {
        reports::summarize(&self.days)
    }

    /// Recorded changes, newest first
    pub async fn audit_log(&self) -> CoreResult<Vec<AuditEntry>> {
        Ok(self.store.audit_log().await?)
    }

    pub async fn clear_audit(&self, user: &str) -> CoreResult<()> {
        self.store.clear_audit().await?;
        log::info!(target: "cashbook::ledger", "audit log cleared by {}", user);
        Ok(())
    }

    fn money_format(&self) -> MoneyFormat {
        let currency = &self.config.currency;
        MoneyFormat {
            symbol: currency.symbol.clone(),
            decimal_places: currency.decimal_places,
            thousands_separator: currency.thousands_separator.clone(),
            decimal_separator: currency.decimal_separator.clone(),
        }
    }

    /// Save a day's accounts, then re-fetch. If the re-fetch fails the saved
    /// day is written into the cache directly, since the store accepted it.
    async fn persist(&mut self, date: NaiveDate, accounts: Vec<AccountSnapshot>) -> CoreResult<Totals> {
        let totals = Totals::rollup(&accounts);
        let saved = DailySnapshot::new(date, accounts.clone());

        self.store.save(date, accounts).await.map_err(|e| {
            log::error!(
                target: "cashbook::ledger",
                "saving {} failed: {}",
                format_date(date),
                e
            );
            CoreError::from(e)
        })?;

        if let Err(e) = self.load().await {
            log::warn!(
                target: "cashbook::ledger",
                "re-fetch after save failed, caching {} as saved: {}",
                format_date(date),
                e
            );
            self.cache_day(saved.clone());
        }

        for mismatch in consistency::check_day(&saved) {
            log::warn!(
                target: "cashbook::ledger",
                "{} on {}: closing {} differs from expected {} by {}",
                mismatch.account,
                format_date(date),
                mismatch.closing_balance,
                mismatch.expected,
                mismatch.diff
            );
        }

        Ok(totals)
    }

    fn cache_day(&mut self, day: DailySnapshot) {
        self.days.retain(|d| d.date != day.date);
        self.days.push(day);
        self.days.sort_by_key(|d| d.date);
    }

    async fn record(&self, user: &str, action: AuditAction, entity: String, description: String) {
        let entry = AuditEntry::new(user, action, entity, description);
        log::debug!(
            target: "cashbook::ledger",
            "{} {} by {}",
            entry.action,
            entry.entity,
            entry.user
        );
        if let Err(e) = self.store.append_audit(entry).await {
            log::warn!(target: "cashbook::ledger", "audit entry not recorded: {}", e);
        }
    }
}

fn check_index(date: NaiveDate, index: usize, len: usize) -> CoreResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(CoreError::AccountNotFound {
            name: format!("#{} on {}", index, format_date(date)),
        })
    }
}

/// Names must be non-empty and unique within the day
fn validate_name(name: &str, accounts: &[AccountSnapshot], skip: Option<usize>) -> CoreResult<()> {
    if name.is_empty() {
        return Err(CoreError::ValidationError {
            message: "account name must not be empty".to_string(),
        });
    }
    let taken = accounts
        .iter()
        .enumerate()
        .any(|(i, a)| Some(i) != skip && a.name == name);
    if taken {
        return Err(CoreError::DuplicateEntry { entry: name.to_string() });
    }
    Ok(())
}

fn fingerprint(days: &[DailySnapshot]) -> u64 {
    let mut hasher = DefaultHasher::new();
    serde_json::to_string(days).unwrap_or_default().hash(&mut hasher);
    hasher.finish()
}
