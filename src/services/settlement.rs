//! Settlement service
//!
//! Records payments between users. The log is append-only.

use crate::error::{SplitError, SplitResult};
use crate::mirror::{MirrorEvent, MirrorSink};
use crate::models::{Money, Settlement, SettlementId, UserId};
use crate::storage::Storage;

use super::user::UserService;

/// Service for recording payments
pub struct SettlementService<'a> {
    storage: &'a Storage,
    mirror: &'a dyn MirrorSink,
}

impl<'a> SettlementService<'a> {
    pub fn new(storage: &'a Storage, mirror: &'a dyn MirrorSink) -> Self {
        Self { storage, mirror }
    }

    /// Record that `from` paid `to`.
    ///
    /// The amount is in the common unit. An empty method is stored as "Other".
    pub fn record(
        &self,
        from: UserId,
        to: UserId,
        amount: Money,
        method: &str,
        settled_by: UserId,
    ) -> SplitResult<Settlement> {
        for id in [from, to] {
            if !self.storage.users.exists(id)? {
                return Err(SplitError::user_not_found(id.to_string()));
            }
        }

        let mut settlement = Settlement::new(
            SettlementId::new(0),
            from,
            to,
            amount,
            method.trim(),
            settled_by,
        );
        settlement
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        settlement.id = self.storage.next_settlement_id()?;
        self.storage.settlements.append(settlement.clone())?;
        self.storage.settlements.save()?;
        self.storage.save_sequences()?;

        tracing::info!(
            settlement = %settlement.id,
            from = %from,
            to = %to,
            amount = %amount,
            method = %settlement.method,
            "recorded settlement"
        );

        let users = UserService::new(self.storage);
        self.mirror.record(MirrorEvent::SettlementRecorded {
            payer: users.name_of(from)?,
            recipient: users.name_of(to)?,
            amount: amount.to_major(),
            method: settlement.method.clone(),
        });

        Ok(settlement)
    }

    /// Payment history newest first, optionally only those involving `user`
    pub fn history(&self, user: Option<UserId>) -> SplitResult<Vec<Settlement>> {
        let mut settlements = match user {
            Some(id) => self.storage.settlements.get_involving(id)?,
            None => self.storage.settlements.get_all()?,
        };
        settlements.reverse();
        Ok(settlements)
    }
}

/// Method text for a payment made through a channel with a detail,
/// e.g. `UPI ID (asha@okbank)`
pub fn describe_method(channel: &str, detail: Option<&str>) -> String {
    match detail.map(str::trim).filter(|d| !d.is_empty()) {
        Some(detail) => format!("{} ({})", channel.trim(), detail),
        None => channel.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::mirror::testing::RecordingMirror;
    use crate::models::settlement::DEFAULT_METHOD;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, UserId, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let users = UserService::new(&storage);
        let asha = users.register("Asha", "asha@gmail.com").unwrap().id;
        let ravi = users.register("Ravi", "ravi@yahoo.in").unwrap().id;
        (temp_dir, storage, asha, ravi)
    }

    #[test]
    fn test_record_and_mirror() {
        let (_temp_dir, storage, asha, ravi) = create_test_storage();
        let mirror = RecordingMirror::default();
        let service = SettlementService::new(&storage, &mirror);

        let s = service
            .record(ravi, asha, Money::from_cents(15_000), "", ravi)
            .unwrap();
        assert_eq!(s.id, SettlementId::new(1));
        assert_eq!(s.method, DEFAULT_METHOD);

        assert_eq!(
            mirror.events(),
            vec![MirrorEvent::SettlementRecorded {
                payer: "Ravi".into(),
                recipient: "Asha".into(),
                amount: 150.0,
                method: "Other".into(),
            }]
        );
    }

    #[test]
    fn test_rejects_invalid_payments() {
        let (_temp_dir, storage, asha, ravi) = create_test_storage();
        let mirror = RecordingMirror::default();
        let service = SettlementService::new(&storage, &mirror);

        assert!(service
            .record(ravi, asha, Money::zero(), "Cash", ravi)
            .unwrap_err()
            .is_validation());
        assert!(service
            .record(ravi, ravi, Money::from_cents(100), "Cash", ravi)
            .unwrap_err()
            .is_validation());
        assert!(service
            .record(ravi, UserId::new(99), Money::from_cents(100), "Cash", ravi)
            .unwrap_err()
            .is_not_found());

        assert_eq!(storage.settlements.count().unwrap(), 0);
        assert!(mirror.events().is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let (_temp_dir, storage, asha, ravi) = create_test_storage();
        let service = SettlementService::new(&storage, &crate::mirror::NullMirror);

        service
            .record(ravi, asha, Money::from_cents(100), "Cash", ravi)
            .unwrap();
        service
            .record(asha, ravi, Money::from_cents(200), "UPI", asha)
            .unwrap();

        let history = service.history(Some(asha)).unwrap();
        assert_eq!(history[0].amount, Money::from_cents(200));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_describe_method() {
        assert_eq!(describe_method("UPI ID", Some("asha@okbank")), "UPI ID (asha@okbank)");
        assert_eq!(describe_method("Other", Some("  ")), "Other");
        assert_eq!(describe_method("Cash", None), "Cash");
    }
}
