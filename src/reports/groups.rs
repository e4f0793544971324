//! Spending per group

use serde::Serialize;

use crate::error::SplitResult;
use crate::models::{Currency, GroupId, Money};
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize)]
pub struct GroupSpending {
    pub group: GroupId,
    pub name: String,
    pub currency: Currency,
    /// Running total of raw expense amounts
    pub total: Money,
    pub expense_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSpendingReport {
    pub groups: Vec<GroupSpending>,
}

impl GroupSpendingReport {
    /// Groups in id order, optionally only those `member` belongs to
    pub fn generate(storage: &Storage, member: Option<crate::models::UserId>) -> SplitResult<Self> {
        let groups = match member {
            Some(user) => storage.groups.get_for_member(user)?,
            None => storage.groups.get_all()?,
        };

        let mut rows = Vec::with_capacity(groups.len());
        for group in groups {
            rows.push(GroupSpending {
                expense_count: storage.expenses.get_by_group(group.id)?.len(),
                group: group.id,
                name: group.name,
                currency: group.currency,
                total: group.total_expense,
            });
        }

        Ok(Self { groups: rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::models::{Group, UserId};
    use tempfile::TempDir;

    #[test]
    fn test_lists_running_totals() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let mut trip = Group::new(GroupId::new(101), "Goa Trip", UserId::new(1), vec![], Currency::Inr);
        trip.record_expense(Money::from_cents(45_000));
        storage.groups.upsert(trip).unwrap();
        storage
            .groups
            .upsert(Group::new(GroupId::new(102), "Flat", UserId::new(2), vec![], Currency::Usd))
            .unwrap();

        let report = GroupSpendingReport::generate(&storage, None).unwrap();
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].total, Money::from_cents(45_000));

        let mine = GroupSpendingReport::generate(&storage, Some(UserId::new(2))).unwrap();
        assert_eq!(mine.groups.len(), 1);
        assert_eq!(mine.groups[0].name, "Flat");
    }
}
