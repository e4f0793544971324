//! Group service
//!
//! Creating, editing and deleting groups. Members are given by email and
//! unknown addresses become new users.

use chrono::NaiveDate;

use crate::error::{SplitError, SplitResult};
use crate::mirror::{MirrorEvent, MirrorSink};
use crate::models::{Currency, Group, GroupId, User, UserId};
use crate::storage::Storage;

use super::user::{MemberInput, UserService};

/// Input for creating a group
#[derive(Debug, Clone, Default)]
pub struct CreateGroupInput {
    pub name: String,
    pub currency: Currency,
    pub members: Vec<MemberInput>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Changes to a group; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub currency: Option<Currency>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Replaces the whole member list (the admin is always kept)
    pub members: Option<Vec<MemberInput>>,
}

/// A group with its members resolved
#[derive(Debug, Clone)]
pub struct GroupDetails {
    pub group: Group,
    pub admin: Option<User>,
    pub members: Vec<User>,
    pub expense_count: usize,
}

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
    mirror: &'a dyn MirrorSink,
}

impl<'a> GroupService<'a> {
    pub fn new(storage: &'a Storage, mirror: &'a dyn MirrorSink) -> Self {
        Self { storage, mirror }
    }

    /// Create a group administered by `admin`
    pub fn create(&self, admin: UserId, input: CreateGroupInput) -> SplitResult<Group> {
        if !self.storage.users.exists(admin)? {
            return Err(SplitError::user_not_found(admin.to_string()));
        }

        let name = input.name.trim();
        let mut group = Group::new(GroupId::new(0), name, admin, Vec::new(), input.currency);
        group.start_date = input.start_date;
        group.end_date = input.end_date;
        group
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        let members = UserService::new(self.storage).ensure_members(&input.members)?;
        group.set_members(members);
        group.id = self.storage.next_group_id()?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.users.save()?;
        self.storage.groups.save()?;
        self.storage.save_sequences()?;

        tracing::info!(group = %group.id, name = %group.name, members = group.members.len(), "created group");

        self.mirror.record(MirrorEvent::GroupCreated {
            name: group.name.clone(),
            currency: group.currency.code().to_string(),
        });

        Ok(group)
    }

    /// Edit a group's details or replace its member list
    pub fn update(&self, id: GroupId, update: GroupUpdate) -> SplitResult<Group> {
        let mut group = self.require(id)?;

        if let Some(name) = update.name {
            group.name = name.trim().to_string();
        }
        if let Some(currency) = update.currency {
            group.currency = currency;
        }
        if update.start_date.is_some() {
            group.start_date = update.start_date;
        }
        if update.end_date.is_some() {
            group.end_date = update.end_date;
        }
        group
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        if let Some(members) = update.members {
            let ids = UserService::new(self.storage).ensure_members(&members)?;
            group.set_members(ids);
        }

        self.storage.groups.upsert(group.clone())?;
        self.storage.users.save()?;
        self.storage.groups.save()?;
        self.storage.save_sequences()?;

        tracing::info!(group = %group.id, "updated group");
        Ok(group)
    }

    /// Add members to a group, keeping existing ones
    pub fn add_members(&self, id: GroupId, members: &[MemberInput]) -> SplitResult<Group> {
        let mut group = self.require(id)?;

        let new_ids = UserService::new(self.storage).ensure_members(members)?;
        let mut all = group.members.clone();
        all.extend(new_ids);
        group.set_members(all);

        self.storage.groups.upsert(group.clone())?;
        self.storage.users.save()?;
        self.storage.groups.save()?;
        self.storage.save_sequences()?;

        tracing::info!(group = %group.id, members = group.members.len(), "added group members");
        Ok(group)
    }

    /// Delete a group and every expense recorded in it.
    ///
    /// Settlements are kept; any that no longer match a debt are ignored by
    /// the ledger. Returns the group and the number of expenses removed.
    pub fn delete(&self, id: GroupId) -> SplitResult<(Group, usize)> {
        let group = self
            .storage
            .groups
            .delete(id)?
            .ok_or_else(|| SplitError::group_not_found(id.to_string()))?;

        let removed = self.storage.expenses.delete_by_group(id)?;

        self.storage.groups.save()?;
        self.storage.expenses.save()?;

        tracing::info!(group = %id, expenses = removed.len(), "deleted group");
        Ok((group, removed.len()))
    }

    pub fn get(&self, id: GroupId) -> SplitResult<Option<Group>> {
        self.storage.groups.get(id)
    }

    /// Find a group by name or id
    pub fn find(&self, identifier: &str) -> SplitResult<Option<Group>> {
        if let Some(group) = self.storage.groups.get_by_name(identifier)? {
            return Ok(Some(group));
        }

        if let Ok(id) = identifier.parse::<GroupId>() {
            return self.storage.groups.get(id);
        }

        Ok(None)
    }

    pub fn resolve(&self, identifier: &str) -> SplitResult<Group> {
        self.find(identifier)?
            .ok_or_else(|| SplitError::group_not_found(identifier))
    }

    fn require(&self, id: GroupId) -> SplitResult<Group> {
        self.storage
            .groups
            .get(id)?
            .ok_or_else(|| SplitError::group_not_found(id.to_string()))
    }

    /// All groups, or only those `member` belongs to
    pub fn list(&self, member: Option<UserId>) -> SplitResult<Vec<Group>> {
        match member {
            Some(user) => self.storage.groups.get_for_member(user),
            None => self.storage.groups.get_all(),
        }
    }

    /// Resolve a group's members and admin. Ids without a user record are skipped.
    pub fn details(&self, group: Group) -> SplitResult<GroupDetails> {
        let mut members = Vec::new();
        for id in group.effective_members() {
            if let Some(user) = self.storage.users.get(id)? {
                members.push(user);
            }
        }

        Ok(GroupDetails {
            admin: self.storage.users.get(group.admin_id)?,
            expense_count: self.storage.expenses.get_by_group(group.id)?.len(),
            members,
            group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::mirror::testing::RecordingMirror;
    use crate::mirror::NullMirror;
    use crate::models::{Expense, ExpenseId, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn members(inputs: &[&str]) -> Vec<MemberInput> {
        inputs.iter().map(|m| MemberInput::parse(m).unwrap()).collect()
    }

    #[test]
    fn test_create_appends_admin_and_mirrors() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = UserService::new(&storage)
            .register("Asha", "asha@gmail.com")
            .unwrap();
        let mirror = RecordingMirror::default();
        let service = GroupService::new(&storage, &mirror);

        let group = service
            .create(
                asha.id,
                CreateGroupInput {
                    name: "Goa Trip".into(),
                    members: members(&["Ravi <ravi@yahoo.in>", "meera@outlook.com"]),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(group.id, GroupId::new(101));
        assert_eq!(group.members.len(), 3);
        assert_eq!(*group.members.last().unwrap(), asha.id);
        assert_eq!(storage.users.count().unwrap(), 3);
        assert_eq!(
            mirror.events(),
            vec![MirrorEvent::GroupCreated {
                name: "Goa Trip".into(),
                currency: "INR".into()
            }]
        );
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = UserService::new(&storage)
            .register("Asha", "asha@gmail.com")
            .unwrap();
        let mirror = RecordingMirror::default();
        let service = GroupService::new(&storage, &mirror);

        let err = service
            .create(
                asha.id,
                CreateGroupInput {
                    name: "  ".into(),
                    members: members(&["ravi@yahoo.in"]),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.users.count().unwrap(), 1);
        assert!(mirror.events().is_empty());
    }

    #[test]
    fn test_update_members_keeps_admin() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = UserService::new(&storage)
            .register("Asha", "asha@gmail.com")
            .unwrap();
        let service = GroupService::new(&storage, &NullMirror);
        let group = service
            .create(
                asha.id,
                CreateGroupInput {
                    name: "Flat".into(),
                    members: members(&["ravi@yahoo.in"]),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = service
            .update(
                group.id,
                GroupUpdate {
                    name: Some("Flat 4B".into()),
                    members: Some(members(&["meera@outlook.com", "meera@outlook.com"])),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Flat 4B");
        assert_eq!(updated.members.len(), 2);
        assert!(updated.is_member(asha.id));
    }

    #[test]
    fn test_delete_cascades_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = UserService::new(&storage)
            .register("Asha", "asha@gmail.com")
            .unwrap();
        let service = GroupService::new(&storage, &NullMirror);
        let group = service
            .create(
                asha.id,
                CreateGroupInput {
                    name: "Flat".into(),
                    ..Default::default()
                },
            )
            .unwrap();

        storage
            .expenses
            .insert(Expense::new(
                ExpenseId::new(1),
                group.id,
                "Rent",
                Money::from_cents(100_000),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                vec![asha.id],
                vec![asha.id],
            ))
            .unwrap();

        let (_, removed) = service.delete(group.id).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert!(service.delete(group.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_details_repairs_missing_admin() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = UserService::new(&storage)
            .register("Asha", "asha@gmail.com")
            .unwrap();
        let service = GroupService::new(&storage, &NullMirror);

        let mut stale = Group::new(GroupId::new(150), "Old", asha.id, vec![], Currency::Inr);
        stale.members.clear();
        storage.groups.upsert(stale.clone()).unwrap();

        let details = service.details(stale).unwrap();
        assert_eq!(details.members.len(), 1);
        assert_eq!(details.members[0].id, asha.id);
    }
}
