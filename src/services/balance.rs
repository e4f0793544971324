//! Balance service
//!
//! Loads the raw records and runs the ledger engine over them. Nothing is
//! cached; each call recomputes from scratch.

use crate::error::SplitResult;
use crate::ledger::{self, BalanceSummary, LedgerContext, LedgerSnapshot, PendingTransfers, Transfer};
use crate::models::{Money, UserId};
use crate::storage::Storage;

/// Service for balance queries
pub struct BalanceService<'a> {
    storage: &'a Storage,
    conversion_rate: f64,
}

impl<'a> BalanceService<'a> {
    pub fn new(storage: &'a Storage, conversion_rate: f64) -> Self {
        Self {
            storage,
            conversion_rate,
        }
    }

    /// Run the full pipeline over everything in storage
    pub fn snapshot(&self) -> SplitResult<LedgerSnapshot> {
        let users: Vec<UserId> = self
            .storage
            .users
            .get_all()?
            .into_iter()
            .map(|u| u.id)
            .collect();
        let expenses = self.storage.expenses.get_all()?;
        let settlements = self.storage.settlements.get_all()?;

        Ok(ledger::compute(&LedgerContext {
            users: &users,
            expenses: &expenses,
            settlements: &settlements,
            conversion_rate: self.conversion_rate,
        }))
    }

    /// Dashboard figures for `user`
    pub fn summary(&self, user: UserId) -> SplitResult<BalanceSummary> {
        Ok(ledger::summarize(&self.snapshot()?, user))
    }

    /// The simplified plan for everyone
    pub fn plan(&self) -> SplitResult<Vec<Transfer>> {
        Ok(self.snapshot()?.transfers)
    }

    /// Planned transfers `user` has to make or will receive
    pub fn pending(&self, user: UserId) -> SplitResult<PendingTransfers> {
        Ok(ledger::pending_for(&self.snapshot()?, user))
    }

    /// Amount the plan has `payer` sending to `recipient`, rounded to cents
    pub fn planned_amount(&self, payer: UserId, recipient: UserId) -> SplitResult<Option<Money>> {
        Ok(self
            .plan()?
            .into_iter()
            .find(|t| t.payer == payer && t.recipient == recipient)
            .map(|t| Money::from_major(t.amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::mirror::NullMirror;
    use crate::models::{Currency, DEFAULT_CONVERSION_RATE};
    use crate::services::expense::{ExpenseService, NewExpense};
    use crate::services::group::{CreateGroupInput, GroupService};
    use crate::services::settlement::SettlementService;
    use crate::services::user::{MemberInput, UserService};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    struct Trip {
        _temp_dir: TempDir,
        storage: Storage,
        group: crate::models::GroupId,
        a: UserId,
        b: UserId,
        c: UserId,
    }

    fn trip() -> Trip {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let users = UserService::new(&storage);
        let a = users.register("Asha", "asha@gmail.com").unwrap().id;
        let group = GroupService::new(&storage, &NullMirror)
            .create(
                a,
                CreateGroupInput {
                    name: "Goa Trip".into(),
                    members: vec![
                        MemberInput::parse("Ravi <ravi@yahoo.in>").unwrap(),
                        MemberInput::parse("Meera <meera@outlook.com>").unwrap(),
                    ],
                    ..Default::default()
                },
            )
            .unwrap()
            .id;
        let b = users.find("ravi@yahoo.in").unwrap().unwrap().id;
        let c = users.find("meera@outlook.com").unwrap().unwrap().id;

        Trip {
            _temp_dir: temp_dir,
            storage,
            group,
            a,
            b,
            c,
        }
    }

    fn expense(t: &Trip, cents: i64, payers: Vec<UserId>, participants: Vec<UserId>) -> NewExpense {
        NewExpense {
            group_id: t.group,
            description: "Taxi".into(),
            amount: Money::from_cents(cents),
            currency: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            payers,
            participants,
            split_shares: None,
            payer_contributions: None,
        }
    }

    #[test]
    fn test_equal_split_then_settle() {
        let t = trip();
        ExpenseService::new(&t.storage, &NullMirror)
            .add(expense(&t, 30_000, vec![t.a], vec![t.a, t.b, t.c]))
            .unwrap();

        let service = BalanceService::new(&t.storage, DEFAULT_CONVERSION_RATE);
        let summary = service.summary(t.a).unwrap();
        assert_eq!(summary.total_expenses, 300.0);
        assert_eq!(summary.lent, 200.0);
        assert_eq!(service.summary(t.b).unwrap().owe, 100.0);

        let amount = service.planned_amount(t.b, t.a).unwrap().unwrap();
        assert_eq!(amount, Money::from_cents(10_000));

        SettlementService::new(&t.storage, &NullMirror)
            .record(t.b, t.a, amount, "UPI", t.b)
            .unwrap();

        assert!(service.summary(t.b).unwrap().is_settled());
        assert_eq!(service.summary(t.a).unwrap().lent, 100.0);
        assert_eq!(service.summary(t.a).unwrap().total_expenses, 300.0);
        assert!(service.planned_amount(t.b, t.a).unwrap().is_none());
    }

    #[test]
    fn test_multi_payer_custom_split_plan() {
        let t = trip();
        let mut input = expense(&t, 20_000, vec![t.a, t.b], vec![t.c]);
        input.payer_contributions = Some(BTreeMap::from([
            (t.a, Money::from_cents(15_000)),
            (t.b, Money::from_cents(5_000)),
        ]));
        input.split_shares = Some(BTreeMap::from([(t.c, Money::from_cents(20_000))]));
        ExpenseService::new(&t.storage, &NullMirror).add(input).unwrap();

        let service = BalanceService::new(&t.storage, DEFAULT_CONVERSION_RATE);
        let pending = service.pending(t.c).unwrap();
        assert_eq!(pending.to_pay.len(), 2);
        assert_eq!(pending.to_pay[0].recipient, t.a);
        assert_eq!(pending.to_pay[0].amount, 150.0);
        assert_eq!(pending.to_pay[1].amount, 50.0);

        SettlementService::new(&t.storage, &NullMirror)
            .record(t.c, t.a, Money::from_cents(15_000), "Cash", t.c)
            .unwrap();
        let snapshot = service.snapshot().unwrap();
        assert_eq!(snapshot.net.get(t.c, t.a), None);
        assert_eq!(snapshot.net.get(t.c, t.b), Some(50.0));
    }

    #[test]
    fn test_foreign_currency_uses_configured_rate() {
        let t = trip();
        let mut input = expense(&t, 1_000, vec![t.a], vec![t.a, t.b]);
        input.currency = Some(Currency::Usd);
        ExpenseService::new(&t.storage, &NullMirror).add(input).unwrap();

        let summary = BalanceService::new(&t.storage, 80.0).summary(t.a).unwrap();
        assert_eq!(summary.total_expenses, 800.0);
        assert_eq!(summary.lent, 400.0);
    }
}
